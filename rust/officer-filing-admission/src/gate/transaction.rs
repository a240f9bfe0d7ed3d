use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;

use crate::{AdmissionError, Decision, Gate, RequestContext, TRANSACTION_ID, TransactionService};

/// Logged when the transaction service cannot produce the transaction.
pub const TRANSACTION_RETRIEVAL_FAILED: &str = "Error retrieving transaction";
/// Logged when the transaction is anything other than open.
pub const TRANSACTION_NOT_OPEN: &str = "This transaction is not open";

/// Admits requests whose transaction exists and is open, attaching the
/// transaction to the context for the gates and handlers that follow.
pub struct TransactionGate {
    transactions: Arc<dyn TransactionService>,
}

impl TransactionGate {
    /// A gate resolving transactions through `transactions`.
    pub fn new(transactions: Arc<dyn TransactionService>) -> Self {
        Self { transactions }
    }
}

#[async_trait]
impl Gate for TransactionGate {
    fn name(&self) -> &'static str {
        "transaction"
    }

    async fn admit(&self, context: &mut RequestContext) -> Result<Decision, AdmissionError> {
        let transaction_id = context
            .transaction_id()
            .ok_or(AdmissionError::MissingPathVariable(TRANSACTION_ID))?;

        let transaction = match self
            .transactions
            .get(transaction_id, context.passthrough_token())
            .await
        {
            Ok(transaction) => transaction,
            Err(error) => {
                tracing::warn!(%transaction_id, %error, "transaction lookup failed");
                return Ok(Decision::deny(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    TRANSACTION_RETRIEVAL_FAILED,
                ));
            }
        };

        if !transaction.is_open() {
            tracing::debug!(%transaction_id, status = ?transaction.status, "transaction not open");
            return Ok(Decision::deny(StatusCode::BAD_REQUEST, TRANSACTION_NOT_OPEN));
        }

        context.attach_transaction(transaction);
        Ok(Decision::Allow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::MemoryTransactionService;
    use crate::{Transaction, TransactionStatus};

    fn gate(transactions: &MemoryTransactionService) -> TransactionGate {
        TransactionGate::new(Arc::new(transactions.clone()))
    }

    #[tokio::test]
    async fn it_admits_open_transactions_and_attaches_them() {
        let open = Transaction::new("12345", TransactionStatus::Open).with_company_number("12345678");
        let transactions = MemoryTransactionService::with([open.clone()]);
        let mut context = RequestContext::new().with_transaction_id("12345");

        let decision = gate(&transactions).admit(&mut context).await.unwrap();

        assert_eq!(decision, Decision::Allow);
        assert_eq!(context.transaction(), Some(&open));
    }

    #[tokio::test]
    async fn it_denies_transactions_that_are_not_open() {
        for status in [
            TransactionStatus::Closed,
            TransactionStatus::ClosedPendingPayment,
            TransactionStatus::Unknown,
        ] {
            let transactions = MemoryTransactionService::with([Transaction::new("12345", status)]);
            let mut context = RequestContext::new().with_transaction_id("12345");

            let decision = gate(&transactions).admit(&mut context).await.unwrap();

            assert_eq!(
                decision,
                Decision::deny(StatusCode::BAD_REQUEST, TRANSACTION_NOT_OPEN),
                "{status:?}"
            );
            assert_eq!(context.transaction(), None);
        }
    }

    #[tokio::test]
    async fn it_denies_with_server_error_when_lookup_fails() {
        let transactions = MemoryTransactionService::default();
        let mut context = RequestContext::new().with_transaction_id("missing");

        let decision = gate(&transactions).admit(&mut context).await.unwrap();

        assert_eq!(
            decision,
            Decision::deny(StatusCode::INTERNAL_SERVER_ERROR, TRANSACTION_RETRIEVAL_FAILED)
        );
        assert_eq!(context.transaction(), None);
    }

    #[tokio::test]
    async fn it_faults_when_transaction_id_is_not_bound() {
        let transactions = MemoryTransactionService::default();
        let mut context = RequestContext::new();

        let result = gate(&transactions).admit(&mut context).await;

        assert_eq!(result, Err(AdmissionError::MissingPathVariable(TRANSACTION_ID)));
        assert_eq!(transactions.calls(), 0);
    }
}
