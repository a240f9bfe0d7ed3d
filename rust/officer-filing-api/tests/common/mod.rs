#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use officer_filing_admission::helpers::MemoryTransactionService;
use officer_filing_admission::{
    FilingResource, FilingStore, MemoryFilingStore, Transaction, TransactionStatus,
};
use officer_filing_api::catalog::MessageCatalog;
use officer_filing_api::headers::{PASSTHROUGH_TOKEN, TOKEN_PERMISSIONS};
use officer_filing_api::{AppState, router};
use tower::ServiceExt;

pub const COMPANY: &str = "12345678";
pub const OPEN: &str = "178417-909116-690426";
pub const CLOSED: &str = "178417-909116-000000";
pub const ALL_ACTIONS: &str = "create,update,delete,readprotected";

pub struct TestApp {
    pub router: Router,
    pub transactions: MemoryTransactionService,
    pub filings: MemoryFilingStore,
}

impl TestApp {
    pub fn new() -> Self {
        let transactions = MemoryTransactionService::with([
            Transaction::new(OPEN, TransactionStatus::Open).with_company_number(COMPANY),
            Transaction::new(CLOSED, TransactionStatus::Closed).with_company_number(COMPANY),
        ]);
        let filings = MemoryFilingStore::default();
        let state = AppState::new(
            Arc::new(transactions.clone()),
            Arc::new(filings.clone()),
            MessageCatalog::default(),
        );

        Self {
            router: router(state),
            transactions,
            filings,
        }
    }

    pub async fn seed_filing(&self, transaction_id: &str, id: &str, self_link: &str) {
        self.filings
            .save(FilingResource {
                id: id.into(),
                transaction_id: transaction_id.into(),
                self_link: self_link.into(),
                data: serde_json::json!({
                    "reference_appointment_id": "ABCDEF123",
                    "resigned_on": "2020-01-31"
                }),
            })
            .await
            .unwrap();
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }
}

pub fn grants(company: &str, actions: &str) -> String {
    format!("company_number={company} company_officers={actions}")
}

pub fn request(method: Method, uri: &str, permissions: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(PASSTHROUGH_TOKEN, "passthrough")
        .header("content-type", "application/json");
    if let Some(permissions) = permissions {
        builder = builder.header(TOKEN_PERMISSIONS, permissions);
    }
    builder.body(Body::from(body.to_owned())).unwrap()
}

pub fn json(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).unwrap()
}
