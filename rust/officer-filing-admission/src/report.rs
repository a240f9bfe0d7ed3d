//! Structured error reports returned to callers.
//!
//! A report is an [`ApiErrorCollection`]: a de-duplicated, insertion-ordered
//! set of [`ApiError`]s serialized as
//!
//! ```json
//! {
//!   "errors": [
//!     {
//!       "error": "must be a valid date",
//!       "location": "$.resigned_on",
//!       "location_type": "request-body",
//!       "type": "ch:validation",
//!       "error_values": { "rejected": "2022-13-01" }
//!     }
//!   ]
//! }
//! ```
//!
//! Reports are built from two kinds of failure: a payload that could not be
//! decoded at all ([`ApiError::malformed_body`]) and field-level validation
//! errors ([`FieldError`]).

use std::collections::BTreeMap;
use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Path of the whole request body.
pub const ROOT_PATH: &str = "$";
/// Context key holding the raw body of an undecodable request.
pub const BODY_VALUE: &str = "body";
/// Context key holding the value a field was rejected with.
pub const REJECTED_VALUE: &str = "rejected";

static SOURCE_LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Source: .*?; ").expect("valid source location pattern"));

/// Where in the request the problem lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LocationType {
    /// The addressed resource.
    #[serde(rename = "resource")]
    Resource,
    /// The request body.
    #[serde(rename = "request-body")]
    RequestBody,
    /// A JSON path into the request body.
    #[serde(rename = "json-path")]
    JsonPath,
}

/// Class of problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorType {
    /// The service could not process an otherwise valid request.
    #[serde(rename = "ch:service")]
    Service,
    /// The request failed validation.
    #[serde(rename = "ch:validation")]
    Validation,
}

/// A single problem with a request.
///
/// Two errors are the same error when every field matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApiError {
    /// Human readable description.
    #[serde(rename = "error")]
    pub message: String,
    /// JSON path to the offending value, rooted at `$`.
    #[serde(rename = "location", default, skip_serializing_if = "Option::is_none")]
    pub json_path: Option<String>,
    /// Where the problem lies.
    pub location_type: LocationType,
    /// Class of problem.
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    /// Extra values that help the caller locate the problem.
    #[serde(
        rename = "error_values",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub context_values: BTreeMap<String, String>,
}

impl ApiError {
    /// An error without location or context.
    pub fn new(
        message: impl Into<String>,
        location_type: LocationType,
        error_type: ErrorType,
    ) -> Self {
        Self {
            message: message.into(),
            json_path: None,
            location_type,
            error_type,
            context_values: BTreeMap::new(),
        }
    }

    /// Set the JSON path.
    pub fn with_json_path(mut self, json_path: impl Into<String>) -> Self {
        self.json_path = Some(json_path.into());
        self
    }

    /// Add a context value.
    pub fn with_context_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context_values.insert(key.into(), value.into());
        self
    }

    /// The error reported for a body that could not be decoded.
    ///
    /// Any `Source: …; ` location the decoder embedded in `message` is removed,
    /// and the raw body is echoed back under [`BODY_VALUE`].
    pub fn malformed_body(message: &str, body: impl Into<String>) -> Self {
        ApiError::new(
            strip_source_location(message),
            LocationType::RequestBody,
            ErrorType::Validation,
        )
        .with_json_path(ROOT_PATH)
        .with_context_value(BODY_VALUE, body)
    }
}

impl From<&FieldError> for ApiError {
    fn from(field: &FieldError) -> Self {
        let mut error = ApiError::new(
            field.default_message.clone(),
            LocationType::RequestBody,
            ErrorType::Validation,
        );
        error.json_path = json_path_from_codes(&field.codes);

        match field.rejected_value.as_deref() {
            Some(rejected) if !rejected.is_empty() => {
                error.with_context_value(REJECTED_VALUE, rejected)
            }
            _ => error,
        }
    }
}

/// A field-level validation failure produced by business validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Error codes, most specific first. The first is the generic
    /// `constraint.object.field` code; the second `constraint.field`.
    pub codes: Vec<String>,
    /// Resolved, human readable message.
    pub default_message: String,
    /// The value that was rejected, in string form.
    pub rejected_value: Option<String>,
}

impl FieldError {
    /// A field error for `field` of `object` violating `constraint`.
    pub fn new(
        constraint: &str,
        object: &str,
        field: &str,
        default_message: impl Into<String>,
    ) -> Self {
        Self {
            codes: vec![
                format!("{constraint}.{object}.{field}"),
                format!("{constraint}.{field}"),
                constraint.to_owned(),
            ],
            default_message: default_message.into(),
            rejected_value: None,
        }
    }

    /// Record the rejected value.
    pub fn with_rejected_value(mut self, rejected: impl Into<String>) -> Self {
        self.rejected_value = Some(rejected.into());
        self
    }
}

/// Remove every `Source: …; ` segment a decoder embedded in its message.
pub fn strip_source_location(message: &str) -> String {
    SOURCE_LOCATION.replace_all(message, "").into_owned()
}

/// Derive a JSON path from a field error's codes.
///
/// The second code is used; its leading segment (up to and including the
/// first `.`) is replaced by `$.`, so `typeMismatch.dateOfBirth` becomes
/// `$.dateOfBirth`. A code without `.` is rooted as is.
pub fn json_path_from_codes(codes: &[String]) -> Option<String> {
    codes.get(1).map(|code| match code.split_once('.') {
        Some((_, path)) => format!("{ROOT_PATH}.{path}"),
        None => format!("{ROOT_PATH}.{code}"),
    })
}

/// A de-duplicated set of [`ApiError`]s, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorCollection {
    errors: IndexSet<ApiError>,
}

impl ApiErrorCollection {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error. Returns `false` when an identical error was already
    /// present.
    pub fn insert(&mut self, error: ApiError) -> bool {
        self.errors.insert(error)
    }

    /// Number of distinct errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether the collection holds no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The errors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ApiError> {
        self.errors.iter()
    }

    /// The report for a body that could not be decoded.
    pub fn malformed_body(message: &str, body: impl Into<String>) -> Self {
        Self::from_iter([ApiError::malformed_body(message, body)])
    }

    /// The report for a set of field validation failures.
    pub fn from_field_errors<'a>(fields: impl IntoIterator<Item = &'a FieldError>) -> Self {
        fields.into_iter().map(ApiError::from).collect()
    }
}

impl FromIterator<ApiError> for ApiErrorCollection {
    fn from_iter<T: IntoIterator<Item = ApiError>>(iter: T) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl Extend<ApiError> for ApiErrorCollection {
    fn extend<T: IntoIterator<Item = ApiError>>(&mut self, iter: T) {
        self.errors.extend(iter);
    }
}
