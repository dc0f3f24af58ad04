use crate::error::Result;
use crate::services::database::{Collection, DocumentStore, Filter, StoredDocument};
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

/// 内存文档存储
/// 用于本地开发和测试，进程退出后数据丢失
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Arc<DashMap<(Collection, String), Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub fn count(&self, collection: Collection) -> usize {
        self.documents
            .iter()
            .filter(|entry| entry.key().0 == collection)
            .count()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
        Ok(self
            .documents
            .get(&(collection, id.to_string()))
            .map(|entry| entry.value().clone()))
    }

    async fn set(&self, collection: Collection, id: &str, doc: Value) -> Result<()> {
        self.documents.insert((collection, id.to_string()), doc);
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<()> {
        self.documents.remove(&(collection, id.to_string()));
        Ok(())
    }

    async fn query(&self, collection: Collection, filter: &Filter) -> Result<Vec<StoredDocument>> {
        let mut documents: Vec<StoredDocument> = self
            .documents
            .iter()
            .filter(|entry| entry.key().0 == collection && filter.matches(entry.value()))
            .map(|entry| StoredDocument {
                id: entry.key().1.clone(),
                data: entry.value().clone(),
            })
            .collect();
        documents.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn set_overwrites_and_delete_is_idempotent() {
        let store = MemoryStore::new();
        store.set(Collection::Plays, "p1-jo", json!({"puzzleId": "p1"})).await.unwrap();
        store.set(Collection::Plays, "p1-jo", json!({"puzzleId": "p1", "userId": "jo"})).await.unwrap();

        let doc = store.get(Collection::Plays, "p1-jo").await.unwrap().unwrap();
        assert_eq!(doc["userId"], "jo");
        assert_eq!(store.count(Collection::Plays), 1);

        store.delete(Collection::Plays, "p1-jo").await.unwrap();
        store.delete(Collection::Plays, "p1-jo").await.unwrap();
        assert!(store.get(Collection::Plays, "p1-jo").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn query_is_scoped_to_collection() {
        let store = MemoryStore::new();
        store.set(Collection::Plays, "a", json!({"puzzleId": "p1"})).await.unwrap();
        store.set(Collection::Notifications, "b", json!({"puzzleId": "p1"})).await.unwrap();
        store.set(Collection::Plays, "c", json!({"puzzleId": "p2"})).await.unwrap();

        let found = store
            .query(Collection::Plays, &Filter::new().eq("puzzleId", "p1"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");
    }
}
