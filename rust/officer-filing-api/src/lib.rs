//! HTTP surface for officer filings.
//!
//! Wires the admission pipeline from `officer_filing_admission` into an axum
//! [`Router`](axum::Router). An outer layer resolves the caller's token
//! permissions before the admission route layer runs; handlers then read the
//! admitted transaction and filing from [`Admitted`]. Every failure after
//! admission is classified by [`ApiFailure`], which is the one place that
//! logs and formats error responses.

pub mod catalog;
pub mod config;
pub mod headers;
pub mod logging;
pub mod officer;
pub mod transactions;

mod failure;
pub use failure::*;

mod middleware;
pub use middleware::*;

mod handlers;

mod router;
pub use router::*;
