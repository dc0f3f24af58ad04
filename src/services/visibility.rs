use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::puzzle::PuzzleDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
    PrivateUntil(DateTime<Utc>),
}

/// Derives a puzzle's visibility at `now`. A `privateUntil` that has passed makes the puzzle
/// public even when the private flag is still set.
pub fn classify(doc: &PuzzleDocument, now: DateTime<Utc>) -> Visibility {
    match doc.private_until {
        Some(until) if until > now => Visibility::PrivateUntil(until),
        Some(_) => Visibility::Public,
        None if doc.private_flag => Visibility::Private,
        None => Visibility::Public,
    }
}

/// Where a puzzle snapshot sits in the index state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "until", rename_all = "camelCase")]
pub enum PuzzleState {
    Absent,
    Private,
    PrivateUntil(DateTime<Utc>),
    Public,
    Deleted,
}

impl PuzzleState {
    pub fn of(doc: Option<&PuzzleDocument>, now: DateTime<Utc>) -> Self {
        match doc {
            None => PuzzleState::Absent,
            Some(doc) if doc.deleted => PuzzleState::Deleted,
            Some(doc) => match classify(doc, now) {
                Visibility::Public => PuzzleState::Public,
                Visibility::Private => PuzzleState::Private,
                Visibility::PrivateUntil(until) => PuzzleState::PrivateUntil(until),
            },
        }
    }

    /// State a change starts from. A scheduled puzzle stays `PrivateUntil` here even after its
    /// release time, so the first write after release still publishes it.
    pub fn before_change(doc: Option<&PuzzleDocument>, now: DateTime<Utc>) -> Self {
        match doc {
            Some(doc) if !doc.deleted => match doc.private_until {
                Some(until) => PuzzleState::PrivateUntil(until),
                None => Self::of(Some(doc), now),
            },
            _ => Self::of(doc, now),
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, PuzzleState::Public)
    }
}
