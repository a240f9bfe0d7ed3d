//! In-memory collaborators for exercising admission in tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    Action, COMPANY_OFFICERS, TokenPermissions, Transaction, TransactionService,
    TransactionServiceError,
};

/// A [`TransactionService`] serving transactions from a map.
///
/// Unknown identifiers yield [`TransactionServiceError::NotFound`]. Every call
/// is counted so tests can assert that a gate never reached the service.
#[derive(Clone, Default)]
pub struct MemoryTransactionService {
    transactions: Arc<RwLock<HashMap<String, Transaction>>>,
    calls: Arc<AtomicUsize>,
}

impl MemoryTransactionService {
    /// A service holding the given transactions.
    pub fn with(transactions: impl IntoIterator<Item = Transaction>) -> Self {
        let transactions = transactions
            .into_iter()
            .map(|transaction| (transaction.id.clone(), transaction))
            .collect();

        Self {
            transactions: Arc::new(RwLock::new(transactions)),
            calls: Arc::default(),
        }
    }

    /// Number of lookups served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransactionService for MemoryTransactionService {
    async fn get(
        &self,
        transaction_id: &str,
        _passthrough_token: Option<&str>,
    ) -> Result<Transaction, TransactionServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.transactions
            .read()
            .await
            .get(transaction_id)
            .cloned()
            .ok_or_else(|| TransactionServiceError::NotFound(transaction_id.to_owned()))
    }
}

/// [`TokenPermissions`] granting a fixed set of officer actions.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenPermissions {
    granted: BTreeSet<Action>,
}

impl StaticTokenPermissions {
    /// Grants every required officer action.
    pub fn all() -> Self {
        Self::granting(Action::REQUIRED)
    }

    /// Grants exactly the given officer actions.
    pub fn granting(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            granted: actions.into_iter().collect(),
        }
    }

    /// Grants every required officer action except `action`.
    pub fn all_except(action: Action) -> Self {
        Self::granting(Action::REQUIRED.into_iter().filter(|held| *held != action))
    }
}

impl TokenPermissions for StaticTokenPermissions {
    fn has_permission(&self, key: &str, action: Action) -> bool {
        key == COMPANY_OFFICERS && self.granted.contains(&action)
    }
}
