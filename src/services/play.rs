use crate::{
    error::Result,
    services::database::{Collection, DocumentStore, Filter},
};
use futures::{stream, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct PlayService {
    store: Arc<dyn DocumentStore>,
    write_concurrency: usize,
}

impl PlayService {
    pub fn new(store: Arc<dyn DocumentStore>, write_concurrency: usize) -> Self {
        Self {
            store,
            write_concurrency: write_concurrency.max(1),
        }
    }

    /// Removes every play of the puzzle. Safe to repeat.
    pub async fn delete_for_puzzle(&self, puzzle_id: &str) -> Result<usize> {
        let docs = self
            .store
            .query(Collection::Plays, &Filter::new().eq("puzzleId", puzzle_id))
            .await?;
        let count = docs.len();
        let store = &self.store;

        stream::iter(docs.into_iter().map(|doc| async move {
            store.delete(Collection::Plays, &doc.id).await
        }))
        .buffer_unordered(self.write_concurrency)
        .try_collect::<Vec<()>>()
        .await?;

        info!("Removed {} plays for puzzle {}", count, puzzle_id);
        Ok(count)
    }
}
