mod common;

use std::sync::Arc;

use axum::Router;
use axum::http::{Method, StatusCode};
use axum::middleware;
use axum::routing::post;
use common::*;
use officer_filing_admission::MemoryFilingStore;
use officer_filing_admission::helpers::MemoryTransactionService;
use officer_filing_admission::{Transaction, TransactionStatus};
use officer_filing_api::catalog::MessageCatalog;
use officer_filing_api::{AppState, admission};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

const VALID: &str = r#"{"reference_appointment_id": "ABCDEF123", "resigned_on": "2020-01-31"}"#;

fn create_uri(transaction_id: &str) -> String {
    format!("/transactions/{transaction_id}/officers")
}

fn filing_uri(transaction_id: &str, filing_id: &str) -> String {
    format!("/transactions/{transaction_id}/officers/{filing_id}")
}

#[tokio::test]
async fn it_answers_the_healthcheck_without_credentials() {
    let app = TestApp::new();

    let (status, _) = app
        .send(request(Method::GET, "/officer-filing/healthcheck", None, ""))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.transactions.calls(), 0);
}

#[tokio::test]
async fn it_creates_a_filing_for_an_authorised_caller() {
    let app = TestApp::new();
    let permissions = grants(COMPANY, ALL_ACTIONS);

    let (status, body) = app
        .send(request(Method::POST, &create_uri(OPEN), Some(&permissions), VALID))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let body = json(&body);
    let id = body["id"].as_str().unwrap();
    assert_eq!(body["data"]["resigned_on"], "2020-01-31");
    assert_eq!(body["links"]["self"], filing_uri(OPEN, id));

    let (status, fetched) = app
        .send(request(Method::GET, &filing_uri(OPEN, id), Some(&permissions), ""))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&fetched), body);
}

#[tokio::test]
async fn it_forbids_a_caller_scoped_to_another_company() {
    let app = TestApp::new();

    let (status, body) = app
        .send(request(
            Method::POST,
            &create_uri(OPEN),
            Some(&grants("87654321", ALL_ACTIONS)),
            VALID,
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.is_empty());
}

#[tokio::test]
async fn it_forbids_a_caller_without_permissions() {
    let app = TestApp::new();

    let (status, _) = app
        .send(request(Method::POST, &create_uri(OPEN), None, VALID))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn it_forbids_a_caller_missing_any_officer_action() {
    let app = TestApp::new();

    for missing in ["create", "update", "delete", "readprotected"] {
        let actions = ALL_ACTIONS
            .split(',')
            .filter(|action| *action != missing)
            .collect::<Vec<_>>()
            .join(",");

        let (status, _) = app
            .send(request(
                Method::POST,
                &create_uri(OPEN),
                Some(&grants(COMPANY, &actions)),
                VALID,
            ))
            .await;

        assert_eq!(status, StatusCode::FORBIDDEN, "without {missing}");
    }
}

#[tokio::test]
async fn it_rejects_filings_against_a_closed_transaction() {
    let app = TestApp::new();

    let (status, body) = app
        .send(request(
            Method::POST,
            &create_uri(CLOSED),
            Some(&grants(COMPANY, ALL_ACTIONS)),
            VALID,
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_empty());
}

#[tokio::test]
async fn it_fails_when_the_transaction_cannot_be_retrieved() {
    let app = TestApp::new();

    let (status, _) = app
        .send(request(
            Method::POST,
            &create_uri("no-such-transaction"),
            Some(&grants(COMPANY, ALL_ACTIONS)),
            VALID,
        ))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn it_reports_unknown_filings_as_not_found() {
    let app = TestApp::new();

    let (status, _) = app
        .send(request(
            Method::GET,
            &filing_uri(OPEN, "missing"),
            Some(&grants(COMPANY, ALL_ACTIONS)),
            "",
        ))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn it_reports_filings_whose_self_link_disagrees_as_not_found() {
    let app = TestApp::new();
    app.seed_filing(OPEN, "abcde", &filing_uri(OPEN, "wxyz"))
        .await;

    let (status, _) = app
        .send(request(
            Method::GET,
            &filing_uri(OPEN, "abcde"),
            Some(&grants(COMPANY, ALL_ACTIONS)),
            "",
        ))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn it_reports_malformed_bodies() {
    let app = TestApp::new();
    let malformed = r#"{"resigned_on": "#;

    let (status, body) = app
        .send(request(
            Method::POST,
            &create_uri(OPEN),
            Some(&grants(COMPANY, ALL_ACTIONS)),
            malformed,
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = json(&body);
    let error = &body["errors"][0];
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert_eq!(error["location"], "$");
    assert_eq!(error["location_type"], "request-body");
    assert_eq!(error["type"], "ch:validation");
    assert_eq!(error["error_values"]["body"], malformed);
}

#[tokio::test]
async fn it_reports_validation_failures_by_field() {
    let app = TestApp::new();

    let (status, body) = app
        .send(request(
            Method::POST,
            &create_uri(OPEN),
            Some(&grants(COMPANY, ALL_ACTIONS)),
            r#"{"reference_appointment_id": "ABCDEF123", "resigned_on": "2020-13-45"}"#,
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = json(&body);
    let error = &body["errors"][0];
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert_eq!(error["location"], "$.resigned_on");
    assert_eq!(error["location_type"], "request-body");
    assert_eq!(error["type"], "ch:validation");
    assert_eq!(error["error_values"]["rejected"], "2020-13-45");
}

#[tokio::test]
async fn it_merges_updates_into_the_stored_filing() {
    let app = TestApp::new();
    app.seed_filing(OPEN, "abcde", &filing_uri(OPEN, "abcde"))
        .await;

    let (status, body) = app
        .send(request(
            Method::PATCH,
            &filing_uri(OPEN, "abcde"),
            Some(&grants(COMPANY, ALL_ACTIONS)),
            r#"{"reference_etag": "etag-1"}"#,
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["id"], "abcde");
    assert_eq!(body["data"]["reference_appointment_id"], "ABCDEF123");
    assert_eq!(body["data"]["reference_etag"], "etag-1");
    assert_eq!(body["data"]["resigned_on"], "2020-01-31");
}

#[tokio::test]
async fn it_fails_rather_than_forbids_when_permissions_were_never_resolved() {
    let transactions = MemoryTransactionService::with([
        Transaction::new(OPEN, TransactionStatus::Open).with_company_number(COMPANY),
    ]);
    let state = AppState::new(
        Arc::new(transactions),
        Arc::new(MemoryFilingStore::default()),
        MessageCatalog::default(),
    );
    let unwired = Router::new()
        .route(
            "/transactions/{transaction_id}/officers",
            post(|| async { StatusCode::CREATED }),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), admission))
        .with_state(state);

    let response = unwired
        .oneshot(request(
            Method::POST,
            &create_uri(OPEN),
            Some(&grants(COMPANY, ALL_ACTIONS)),
            VALID,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    assert!(body.is_empty());
}
