use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::TransactionServiceError;

/// Lifecycle state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Filings may still be added or changed.
    #[serde(rename = "open")]
    Open,
    /// The transaction has been submitted.
    #[serde(rename = "closed")]
    Closed,
    /// Submitted, awaiting payment.
    #[serde(rename = "closed pending payment")]
    ClosedPendingPayment,
    /// Any status this service does not know about.
    #[serde(other)]
    Unknown,
}

/// A transaction as reported by the transaction service.
///
/// Only the fields admission depends on are modelled; everything else in the
/// upstream document is ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction identifier.
    pub id: String,
    /// Current lifecycle state.
    pub status: TransactionStatus,
    /// Company the transaction files against, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_number: Option<String>,
}

impl Transaction {
    /// Create a transaction record.
    pub fn new(id: impl Into<String>, status: TransactionStatus) -> Self {
        Self {
            id: id.into(),
            status,
            company_number: None,
        }
    }

    /// Set the company number.
    pub fn with_company_number(mut self, company_number: impl Into<String>) -> Self {
        self.company_number = Some(company_number.into());
        self
    }

    /// Whether filings may be made against this transaction.
    pub fn is_open(&self) -> bool {
        self.status == TransactionStatus::Open
    }
}

/// Looks up transactions on behalf of a caller.
#[async_trait]
pub trait TransactionService: Send + Sync {
    /// Fetch the transaction, forwarding the caller's passthrough token.
    async fn get(
        &self,
        transaction_id: &str,
        passthrough_token: Option<&str>,
    ) -> Result<Transaction, TransactionServiceError>;
}
