use axum::Extension;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use officer_filing_admission::FilingResource;
use serde::Serialize;
use ulid::Ulid;

use crate::officer::OfficerFiling;
use crate::{Admitted, ApiFailure, AppState};

#[derive(Debug, Serialize)]
pub(crate) struct Links {
    #[serde(rename = "self")]
    self_link: String,
}

/// Response body for a stored filing.
#[derive(Debug, Serialize)]
pub(crate) struct FilingResponse {
    id: String,
    data: OfficerFiling,
    links: Links,
}

impl FilingResponse {
    fn from_resource(resource: &FilingResource) -> Result<Self, ApiFailure> {
        let data = serde_json::from_value(resource.data.clone()).map_err(|error| {
            ApiFailure::Internal(format!(
                "Stored filing {} is not an officer filing: {error}",
                resource.id
            ))
        })?;

        Ok(Self {
            id: resource.id.clone(),
            data,
            links: Links {
                self_link: resource.self_link.clone(),
            },
        })
    }
}

fn self_link(transaction_id: &str, filing_id: &str) -> String {
    format!("/transactions/{transaction_id}/officers/{filing_id}")
}

fn decode(body: &Bytes) -> Result<OfficerFiling, ApiFailure> {
    serde_json::from_slice(body).map_err(|error| ApiFailure::malformed_body(&error, body))
}

fn admitted_filing(admitted: &Admitted) -> Result<&FilingResource, ApiFailure> {
    admitted
        .filing
        .as_ref()
        .ok_or_else(|| ApiFailure::Internal("Admission attached no filing".into()))
}

async fn store(
    state: &AppState,
    transaction_id: &str,
    filing_id: String,
    filing: OfficerFiling,
) -> Result<FilingResource, ApiFailure> {
    let errors = filing.validate(&state.catalog, chrono::Utc::now().date_naive());
    if !errors.is_empty() {
        return Err(ApiFailure::Validation(errors));
    }

    let data = serde_json::to_value(&filing)
        .map_err(|error| ApiFailure::Internal(format!("Failed to encode filing: {error}")))?;
    let resource = FilingResource {
        self_link: self_link(transaction_id, &filing_id),
        id: filing_id,
        transaction_id: transaction_id.to_owned(),
        data,
    };
    state.filings.save(resource.clone()).await?;

    Ok(resource)
}

pub(crate) async fn healthcheck() -> StatusCode {
    StatusCode::OK
}

pub(crate) async fn create_filing(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<FilingResponse>), ApiFailure> {
    let filing = decode(&body)?;
    let resource = store(&state, &transaction_id, Ulid::new().to_string(), filing).await?;

    tracing::info!(%transaction_id, filing_id = %resource.id, "created officer filing");
    Ok((
        StatusCode::CREATED,
        Json(FilingResponse::from_resource(&resource)?),
    ))
}

pub(crate) async fn update_filing(
    State(state): State<AppState>,
    Path((transaction_id, filing_id)): Path<(String, String)>,
    Extension(admitted): Extension<Admitted>,
    body: Bytes,
) -> Result<Json<FilingResponse>, ApiFailure> {
    let patch = decode(&body)?;
    let current = FilingResponse::from_resource(admitted_filing(&admitted)?)?.data;
    let resource = store(&state, &transaction_id, filing_id, current.merge(patch)).await?;

    tracing::info!(%transaction_id, filing_id = %resource.id, "updated officer filing");
    Ok(Json(FilingResponse::from_resource(&resource)?))
}

pub(crate) async fn get_filing(
    Extension(admitted): Extension<Admitted>,
) -> Result<Json<FilingResponse>, ApiFailure> {
    Ok(Json(FilingResponse::from_resource(admitted_filing(
        &admitted,
    )?)?))
}
