//! Request admission for officer filings.
//!
//! Every mutating request against a filing passes through an ordered chain of
//! [`Gate`]s before it reaches business handling:
//!
//! ```text
//! TransactionGate              → transaction exists and is open
//!   └── FilingIdentityGate      → referenced filing exists and belongs to it
//!         └── PermissionGate    → token scope matches company, holds all actions
//! ```
//!
//! Each gate inspects and enriches a per-request [`RequestContext`] and
//! returns a [`Decision`]. The [`AdmissionPipeline`] drives the gates in order
//! and stops at the first [`Denial`]. Conditions caused by the caller are
//! always denials; an `Err(AdmissionError)` means the service itself is
//! mis-wired and must surface as an internal error.
//!
//! Failures that happen *after* admission (undecodable payloads, field
//! validation) are turned into an [`ApiErrorCollection`] by the [`report`]
//! module, which defines the wire shape returned to callers.
//!
//! # Example
//!
//! ```rust
//! use officer_filing_admission::PermissionScope;
//!
//! let scope = PermissionScope::parse(Some(
//!     "company_number=12345678 company_officers=create,delete,update,readprotected",
//! ));
//! assert_eq!(scope.company_number(), Some("12345678"));
//!
//! assert_eq!(PermissionScope::parse(Some("not a scope")).company_number(), None);
//! ```

mod error;
pub use error::*;

mod scope;
pub use scope::*;

mod permission;
pub use permission::*;

mod transaction;
pub use transaction::*;

mod filing;
pub use filing::*;

mod context;
pub use context::*;

mod gate;
pub use gate::*;

mod pipeline;
pub use pipeline::*;

pub mod report;
pub use report::{ApiError, ApiErrorCollection, ErrorType, FieldError, LocationType};

#[cfg(any(test, feature = "helpers"))]
pub mod helpers;
