#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use puzzle_notify::{
    config::Config,
    models::{
        comment::CommentNode, notification::NotificationRecord, play::PlayRecord, puzzle::PuzzleDocument,
    },
    services::{Collection, DocumentStore, Filter, MemoryStore},
    state::AppState,
};
use serde_json::json;
use std::sync::Arc;

pub const AUTHOR: &str = "mike";

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 11, 10, 0, 0, 0).unwrap()
}

pub fn puzzle() -> PuzzleDocument {
    PuzzleDocument {
        author_id: AUTHOR.to_string(),
        author_name: Some("Mike D".to_string()),
        title: "Raises, as young".to_string(),
        private_flag: false,
        private_until: None,
        deleted: false,
        featured: false,
        daily_mini_date: None,
        published_at: Some(base_time()),
        comments: Vec::new(),
    }
}

pub fn with_comments(comments: Vec<CommentNode>) -> PuzzleDocument {
    PuzzleDocument {
        comments,
        ..puzzle()
    }
}

pub fn comment(id: &str, author: &str, children: Vec<CommentNode>) -> CommentNode {
    CommentNode {
        id: id.to_string(),
        author_id: author.to_string(),
        author_name: format!("{} name", author),
        text: "A couple of two-worders today which I don't love".to_string(),
        posted_at: base_time(),
        edited: false,
        children,
    }
}

pub fn app_state(store: &MemoryStore) -> AppState {
    let config = Config {
        write_concurrency: 4,
        ..Config::default()
    };
    AppState::new(config, Arc::new(store.clone()))
}

pub async fn add_followers(store: &MemoryStore, author: &str, followers: &[&str]) {
    store
        .set(Collection::Followers, author, json!({ "followers": followers }))
        .await
        .unwrap();
}

pub async fn add_play(store: &MemoryStore, puzzle_id: &str, user_id: &str) {
    let play = PlayRecord {
        puzzle_id: puzzle_id.to_string(),
        user_id: user_id.to_string(),
        updated_at: Some(base_time()),
    };
    store
        .set(
            Collection::Plays,
            &PlayRecord::key(puzzle_id, user_id),
            serde_json::to_value(&play).unwrap(),
        )
        .await
        .unwrap();
}

pub async fn notifications_for(store: &MemoryStore, puzzle_id: &str) -> Vec<NotificationRecord> {
    store
        .query(Collection::Notifications, &Filter::new().eq("puzzleId", puzzle_id))
        .await
        .unwrap()
        .into_iter()
        .map(|doc| serde_json::from_value(doc.data).unwrap())
        .collect()
}

pub async fn notification_ids(store: &MemoryStore, puzzle_id: &str) -> Vec<String> {
    let mut ids: Vec<String> = notifications_for(store, puzzle_id)
        .await
        .into_iter()
        .map(|n| n.id)
        .collect();
    ids.sort();
    ids
}
