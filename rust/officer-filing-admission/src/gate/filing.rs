use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;

use crate::{AdmissionError, Decision, FilingStore, Gate, RequestContext, TRANSACTION_ID};

/// Logged when no filing exists for the request path.
pub const FILING_NOT_FOUND: &str = "Filing resource not found";
/// Logged when the stored filing's self link names a different filing.
pub const FILING_MISMATCH: &str = "Filing resource does not match request";
/// Logged when the filing store itself fails.
pub const FILING_RETRIEVAL_FAILED: &str = "Error retrieving filing resource";

/// Admits requests whose path names a filing that exists within the
/// transaction and whose self link agrees with the path.
///
/// Routes without a filing identifier (creation) are admitted unconditionally.
pub struct FilingIdentityGate {
    filings: Arc<dyn FilingStore>,
}

impl FilingIdentityGate {
    /// A gate resolving filings through `filings`.
    pub fn new(filings: Arc<dyn FilingStore>) -> Self {
        Self { filings }
    }
}

#[async_trait]
impl Gate for FilingIdentityGate {
    fn name(&self) -> &'static str {
        "filing"
    }

    async fn admit(&self, context: &mut RequestContext) -> Result<Decision, AdmissionError> {
        let Some(filing_id) = context.filing_id() else {
            return Ok(Decision::Allow);
        };
        let transaction_id = context
            .transaction_id()
            .ok_or(AdmissionError::MissingPathVariable(TRANSACTION_ID))?;

        let filing = match self.filings.find(filing_id, transaction_id).await {
            Ok(Some(filing)) => filing,
            Ok(None) => return Ok(Decision::deny(StatusCode::NOT_FOUND, FILING_NOT_FOUND)),
            Err(error) => {
                tracing::warn!(%transaction_id, %filing_id, %error, "filing lookup failed");
                return Ok(Decision::deny(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    FILING_RETRIEVAL_FAILED,
                ));
            }
        };

        if filing.self_link_filing_id().as_deref() != Some(filing_id) {
            tracing::debug!(
                %filing_id,
                self_link = %filing.self_link,
                "filing self link does not match path"
            );
            return Ok(Decision::deny(StatusCode::NOT_FOUND, FILING_MISMATCH));
        }

        context.attach_filing(filing);
        Ok(Decision::Allow)
    }
}
