//! REST client for the transaction service.

use std::time::Duration;

use async_trait::async_trait;
use officer_filing_admission::{Transaction, TransactionService, TransactionServiceError};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::headers::PASSTHROUGH_TOKEN;

/// Configuration for [`RestTransactionService`].
#[derive(Clone, Debug)]
pub struct RestTransactionConfig {
    /// Base URL of the transaction service.
    pub endpoint: Url,

    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl RestTransactionConfig {
    /// Configuration for the service at `endpoint`.
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout_seconds: 30,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Fetches transactions with `GET {endpoint}/transactions/{id}`, forwarding
/// the caller's passthrough token.
#[derive(Clone)]
pub struct RestTransactionService {
    client: Client,
    config: RestTransactionConfig,
}

impl RestTransactionService {
    /// A client for the configured service.
    pub fn new(config: RestTransactionConfig) -> Result<Self, TransactionServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|error| TransactionServiceError::Transport(error.to_string()))?;

        Ok(Self { client, config })
    }

    /// Location of a transaction document. Dot segments are not transaction
    /// ids and would resolve to the collection, so they are rejected.
    pub fn transaction_url(&self, transaction_id: &str) -> Result<Url, TransactionServiceError> {
        if matches!(transaction_id, "" | "." | "..") {
            return Err(TransactionServiceError::NotFound(transaction_id.to_owned()));
        }

        let mut url = self.config.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                TransactionServiceError::Transport(format!(
                    "'{}' cannot be a base URL",
                    self.config.endpoint
                ))
            })?
            .pop_if_empty()
            .extend(["transactions", transaction_id]);
        Ok(url)
    }
}

#[async_trait]
impl TransactionService for RestTransactionService {
    async fn get(
        &self,
        transaction_id: &str,
        passthrough_token: Option<&str>,
    ) -> Result<Transaction, TransactionServiceError> {
        let mut request = self.client.get(self.transaction_url(transaction_id)?);
        if let Some(token) = passthrough_token {
            request = request.header(PASSTHROUGH_TOKEN, token);
        }

        let response = request
            .send()
            .await
            .map_err(|error| TransactionServiceError::Transport(error.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .json::<Transaction>()
                .await
                .map_err(|error| TransactionServiceError::Decode(error.to_string())),
            StatusCode::NOT_FOUND => Err(TransactionServiceError::NotFound(
                transaction_id.to_owned(),
            )),
            status => Err(TransactionServiceError::Status(status.as_u16())),
        }
    }
}
