use async_trait::async_trait;
use http::StatusCode;

use crate::{AdmissionError, RequestContext};

mod transaction;
pub use transaction::*;

mod filing;
pub use filing::*;

mod permission;
pub use permission::*;

/// Why a gate refused a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    /// Status the caller receives.
    pub status: StatusCode,
    /// Reason recorded in the service log.
    pub reason: String,
}

/// Outcome of a gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the request continue.
    Allow,
    /// Stop the request here.
    Deny(Denial),
}

impl Decision {
    /// Deny with the given status and log reason.
    pub fn deny(status: StatusCode, reason: impl Into<String>) -> Self {
        Decision::Deny(Denial {
            status,
            reason: reason.into(),
        })
    }

    /// Whether the request may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// The denial, if any.
    pub fn denial(&self) -> Option<&Denial> {
        match self {
            Decision::Allow => None,
            Decision::Deny(denial) => Some(denial),
        }
    }
}

/// One step of request admission.
///
/// A gate reads the [`RequestContext`], may attach what it resolved, and
/// decides. Caller-caused conditions are always a [`Decision::Deny`]; `Err`
/// is reserved for wiring faults.
#[async_trait]
pub trait Gate: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Decide whether the request described by `context` may proceed.
    async fn admit(&self, context: &mut RequestContext) -> Result<Decision, AdmissionError>;
}
