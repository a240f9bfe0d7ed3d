use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use officer_filing_admission::{AdmissionError, ApiErrorCollection, FieldError, FilingStoreError};
use thiserror::Error;

/// Every way a request can fail after it reached the service.
///
/// This is the single place failures are logged and turned into responses:
/// payload and validation failures become a structured
/// [`ApiErrorCollection`], everything else a bare 500 whose cause stays in
/// the service log.
#[derive(Debug, Error)]
pub enum ApiFailure {
    /// The request body could not be decoded.
    #[error("Malformed request body: {message}")]
    MalformedBody {
        /// Status assigned to the decode failure.
        status: StatusCode,
        /// Decoder message.
        message: String,
        /// Raw request body.
        body: String,
    },

    /// The decoded request failed field validation.
    #[error("Request failed validation with {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Admission was mis-wired.
    #[error(transparent)]
    Admission(#[from] AdmissionError),

    /// The filing store failed.
    #[error(transparent)]
    Store(#[from] FilingStoreError),

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiFailure {
    /// A decode failure for `body`, reported with status 400.
    pub fn malformed_body(error: &serde_json::Error, body: &[u8]) -> Self {
        ApiFailure::MalformedBody {
            status: StatusCode::BAD_REQUEST,
            message: error.to_string(),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        match self {
            ApiFailure::MalformedBody {
                status,
                message,
                body,
            } => {
                tracing::info!(%message, "malformed request body");
                (status, Json(ApiErrorCollection::malformed_body(&message, body))).into_response()
            }
            ApiFailure::Validation(fields) => {
                let report = ApiErrorCollection::from_field_errors(&fields);
                tracing::info!(errors = report.len(), "request failed validation");
                (StatusCode::BAD_REQUEST, Json(report)).into_response()
            }
            failure => {
                tracing::error!(error = %failure, detail = ?failure, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use officer_filing_admission::{FILING_ID, FieldError};

    use super::*;

    async fn parts(failure: ApiFailure) -> (StatusCode, Vec<u8>) {
        let response = failure.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn it_hides_wiring_faults_behind_a_bare_500() {
        for fault in [
            AdmissionError::MissingTokenPermissions,
            AdmissionError::MissingPathVariable(FILING_ID),
        ] {
            let (status, body) = parts(ApiFailure::from(fault)).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(body.is_empty());
        }
    }

    #[tokio::test]
    async fn it_hides_store_and_internal_failures_behind_a_bare_500() {
        for failure in [
            ApiFailure::from(FilingStoreError::Backend("disk on fire".into())),
            ApiFailure::Internal("no filing".into()),
        ] {
            let (status, body) = parts(failure).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(body.is_empty());
        }
    }

    #[tokio::test]
    async fn it_reports_malformed_bodies_at_the_assigned_status() {
        let error = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();

        let (status, body) = parts(ApiFailure::malformed_body(&error, b"{")).await;
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["location"], "$");
        assert_eq!(body["errors"][0]["error_values"]["body"], "{");
    }

    #[tokio::test]
    async fn it_reports_validation_failures_as_a_collection() {
        let field = FieldError::new("NotNull", "officerFiling", "resigned_on", "missing");

        let (status, body) = parts(ApiFailure::Validation(vec![field.clone(), field])).await;
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
        assert_eq!(body["errors"][0]["location"], "$.resigned_on");
    }
}
