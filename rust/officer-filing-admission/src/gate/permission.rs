use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;

use crate::{
    Action, AdmissionError, COMPANY_OFFICERS, Decision, Gate, RequestContext,
    TRANSACTION_RETRIEVAL_FAILED, TransactionService,
};

/// Logged when any required action is missing from the token.
pub const UNAUTHORISED: &str = "Request unauthorised";
/// Logged when the path has no transaction identifier.
pub const UNAUTHORISED_NO_TRANSACTION_ID: &str =
    "Request unauthorised - no transaction identifier found";
/// Logged when the transaction has no company number.
pub const UNAUTHORISED_NO_TRANSACTION_COMPANY: &str =
    "Request unauthorised - no company number in transaction";
/// Logged when the token scope has no company number.
pub const UNAUTHORISED_NO_SCOPE_COMPANY: &str = "Request unauthorised - no company number in scope";
/// Logged when the transaction and token scope name different companies.
pub const UNAUTHORISED_COMPANY_MISMATCH: &str =
    "Request unauthorised - company number in transaction does not match company number in scope";

/// Admits requests whose token is scoped to the transaction's company and
/// holds every officer action.
///
/// Runs last: its checks are only meaningful once the transaction and filing
/// are known.
pub struct PermissionGate {
    transactions: Arc<dyn TransactionService>,
}

impl PermissionGate {
    /// A gate that falls back to `transactions` when no transaction has been
    /// attached yet.
    pub fn new(transactions: Arc<dyn TransactionService>) -> Self {
        Self { transactions }
    }
}

#[async_trait]
impl Gate for PermissionGate {
    fn name(&self) -> &'static str {
        "permission"
    }

    async fn admit(&self, context: &mut RequestContext) -> Result<Decision, AdmissionError> {
        let Some(transaction_id) = context.transaction_id().map(str::to_owned) else {
            return Ok(Decision::deny(
                StatusCode::FORBIDDEN,
                UNAUTHORISED_NO_TRANSACTION_ID,
            ));
        };

        if context.transaction().is_none() {
            let lookup = self
                .transactions
                .get(&transaction_id, context.passthrough_token())
                .await;

            match lookup {
                Ok(transaction) => context.attach_transaction(transaction),
                Err(error) => {
                    tracing::warn!(%transaction_id, %error, "transaction lookup failed");
                    return Ok(Decision::deny(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        TRANSACTION_RETRIEVAL_FAILED,
                    ));
                }
            }
        }

        let Some(transaction_company) = context
            .transaction()
            .and_then(|transaction| transaction.company_number.as_deref())
        else {
            return Ok(Decision::deny(
                StatusCode::FORBIDDEN,
                UNAUTHORISED_NO_TRANSACTION_COMPANY,
            ));
        };

        let scope = context.scope();
        let Some(scope_company) = scope.company_number() else {
            return Ok(Decision::deny(
                StatusCode::FORBIDDEN,
                UNAUTHORISED_NO_SCOPE_COMPANY,
            ));
        };

        if transaction_company != scope_company {
            return Ok(Decision::deny(
                StatusCode::FORBIDDEN,
                UNAUTHORISED_COMPANY_MISMATCH,
            ));
        }

        let permissions = context
            .permissions()
            .ok_or(AdmissionError::MissingTokenPermissions)?;

        let held = Action::REQUIRED
            .iter()
            .all(|action| permissions.has_permission(COMPANY_OFFICERS, *action));

        if !held {
            tracing::info!(
                key = COMPANY_OFFICERS,
                evaluated = ?Action::REQUIRED.map(|action| action.as_str()),
                "token lacks required permissions"
            );
            return Ok(Decision::deny(StatusCode::FORBIDDEN, UNAUTHORISED));
        }

        Ok(Decision::Allow)
    }
}
