use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use officer_filing_admission::{
    Decision, FILING_ID, FilingResource, RequestContext, TRANSACTION_ID, TokenPermissionSet,
    TokenPermissions, Transaction,
};

use crate::headers::{PASSTHROUGH_TOKEN, TOKEN_PERMISSIONS};
use crate::{ApiFailure, AppState};

/// What admission resolved for a request, available to handlers as an
/// extension.
#[derive(Debug, Clone)]
pub struct Admitted {
    /// The open transaction the request files against.
    pub transaction: Option<Transaction>,
    /// The filing named in the path, if any.
    pub filing: Option<FilingResource>,
}

fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
}

/// Resolve the caller's token permissions from the gateway header and attach
/// them to the request. A missing header resolves to no permissions at all.
pub async fn token_permissions(mut request: Request, next: Next) -> Response {
    let permissions: Arc<dyn TokenPermissions> = Arc::new(TokenPermissionSet::parse(
        header(&request, TOKEN_PERMISSIONS).unwrap_or_default(),
    ));
    request.extensions_mut().insert(permissions);

    next.run(request).await
}

/// Run the admission pipeline for the matched route. Denied requests end
/// here with the gate's status and an empty body.
pub async fn admission(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiFailure> {
    let mut context = RequestContext::new();
    if let Some(transaction_id) = params.get(TRANSACTION_ID) {
        context = context.with_transaction_id(transaction_id);
    }
    if let Some(filing_id) = params.get(FILING_ID) {
        context = context.with_filing_id(filing_id);
    }
    if let Some(token) = header(&request, PASSTHROUGH_TOKEN) {
        context = context.with_passthrough_token(token);
    }
    if let Some(scope) = header(&request, TOKEN_PERMISSIONS) {
        context = context.with_scope(scope);
    }
    if let Some(permissions) = request.extensions().get::<Arc<dyn TokenPermissions>>() {
        context = context.with_permissions(permissions.clone());
    }

    match state.pipeline.admit(&mut context).await? {
        Decision::Allow => {
            let (transaction, filing) = context.into_admitted();
            request
                .extensions_mut()
                .insert(Admitted { transaction, filing });
            Ok(next.run(request).await)
        }
        Decision::Deny(denial) => Ok(denial.status.into_response()),
    }
}
