use crate::{
    error::Result,
    models::follow::FollowersDocument,
    services::database::{Collection, DocumentStore},
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

#[derive(Clone)]
pub struct FollowService {
    store: Arc<dyn DocumentStore>,
}

impl FollowService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Returns the followers of `author_id` in stored order, without duplicates.
    ///
    /// A missing or malformed followers document yields an empty list. Store failures are
    /// still returned to the caller.
    pub async fn followers_of(&self, author_id: &str) -> Result<Vec<String>> {
        debug!("Checking for followers of {}", author_id);

        let raw = match self.store.get(Collection::Followers, author_id).await? {
            Some(raw) => raw,
            None => {
                info!("No followers document for {}", author_id);
                return Ok(Vec::new());
            }
        };

        let document: FollowersDocument = match serde_json::from_value(raw) {
            Ok(document) => document,
            Err(e) => {
                warn!("Could not decode followers for {}: {}", author_id, e);
                return Ok(Vec::new());
            }
        };
        if let Err(e) = document.validate() {
            warn!("Invalid followers document for {}: {}", author_id, e);
            return Ok(Vec::new());
        }

        let followers = document.followers.unwrap_or_default();
        let mut seen = HashSet::new();
        let followers: Vec<String> = followers
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();

        debug!("{} followers for {}", followers.len(), author_id);
        Ok(followers)
    }
}
