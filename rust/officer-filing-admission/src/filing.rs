use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use url::Url;

use crate::FilingStoreError;

/// A filing held against a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilingResource {
    /// Filing identifier.
    pub id: String,
    /// Owning transaction.
    pub transaction_id: String,
    /// Canonical link to this filing, e.g. `/transactions/{tx}/officers/{id}`.
    pub self_link: String,
    /// The filing document; opaque to admission.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl FilingResource {
    /// The filing identifier embedded in the self link: its last non-empty
    /// path segment. Relative links are resolved against a dummy origin.
    pub fn self_link_filing_id(&self) -> Option<String> {
        let base = Url::parse("http://localhost/").ok()?;
        let link = base.join(&self.self_link).ok()?;

        link.path_segments()?
            .filter(|segment| !segment.is_empty())
            .next_back()
            .map(str::to_owned)
    }
}

/// Persistence for filing resources.
#[async_trait]
pub trait FilingStore: Send + Sync {
    /// Look up a filing by its identifier within a transaction.
    async fn find(
        &self,
        filing_id: &str,
        transaction_id: &str,
    ) -> Result<Option<FilingResource>, FilingStoreError>;

    /// Insert or replace a filing.
    async fn save(&self, filing: FilingResource) -> Result<(), FilingStoreError>;
}

/// A trivial [FilingStore] backed by a [HashMap]; nothing is persisted.
#[derive(Clone, Default)]
pub struct MemoryFilingStore {
    entries: Arc<RwLock<HashMap<(String, String), FilingResource>>>,
}

#[async_trait]
impl FilingStore for MemoryFilingStore {
    async fn find(
        &self,
        filing_id: &str,
        transaction_id: &str,
    ) -> Result<Option<FilingResource>, FilingStoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&(transaction_id.to_owned(), filing_id.to_owned()))
            .cloned())
    }

    async fn save(&self, filing: FilingResource) -> Result<(), FilingStoreError> {
        let mut entries = self.entries.write().await;
        entries.insert(
            (filing.transaction_id.clone(), filing.id.clone()),
            filing,
        );
        Ok(())
    }
}
