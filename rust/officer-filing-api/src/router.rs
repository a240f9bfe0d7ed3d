use std::any::Any;
use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use officer_filing_admission::{AdmissionPipeline, FilingStore, TransactionService};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::catalog::MessageCatalog;
use crate::handlers::{create_filing, get_filing, healthcheck, update_filing};
use crate::{admission, token_permissions};

/// Shared state for every request.
#[derive(Clone)]
pub struct AppState {
    /// Gates run before any filing route.
    pub pipeline: Arc<AdmissionPipeline>,
    /// Where filings are kept.
    pub filings: Arc<dyn FilingStore>,
    /// Validation messages.
    pub catalog: Arc<MessageCatalog>,
}

impl AppState {
    /// State running the standard admission pipeline over the given
    /// collaborators.
    pub fn new(
        transactions: Arc<dyn TransactionService>,
        filings: Arc<dyn FilingStore>,
        catalog: MessageCatalog,
    ) -> Self {
        Self {
            pipeline: Arc::new(AdmissionPipeline::standard(transactions, filings.clone())),
            filings,
            catalog: Arc::new(catalog),
        }
    }
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(%detail, "request handler panicked");

    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

/// The officer filing service.
///
/// Filing routes sit behind admission; the healthcheck does not. Token
/// permissions are resolved for every request before routing.
pub fn router(state: AppState) -> Router {
    let filings = Router::new()
        .route("/transactions/{transaction_id}/officers", post(create_filing))
        .route(
            "/transactions/{transaction_id}/officers/{filing_id}",
            get(get_filing).patch(update_filing),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), admission));

    Router::new()
        .route("/officer-filing/healthcheck", get(healthcheck))
        .merge(filings)
        .layer(middleware::from_fn(token_permissions))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
