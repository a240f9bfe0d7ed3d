//! Officer filing documents and their validation.

use chrono::NaiveDate;
use officer_filing_admission::FieldError;
use serde::{Deserialize, Serialize};

use crate::catalog::{
    APPOINTMENT_ID_MISSING, MessageCatalog, RESIGNED_ON_IN_FUTURE, RESIGNED_ON_INVALID,
    RESIGNED_ON_MISSING,
};

const OBJECT: &str = "officerFiling";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// An officer filing as submitted and stored. Every field is optional on
/// the wire so partial updates can be merged before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OfficerFiling {
    /// Appointment being changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_appointment_id: Option<String>,
    /// ETag of the appointment the caller last saw.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_etag: Option<String>,
    /// Date the officer resigned, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resigned_on: Option<String>,
}

impl OfficerFiling {
    /// Overlay the fields present in `patch`.
    pub fn merge(mut self, patch: OfficerFiling) -> Self {
        if patch.reference_appointment_id.is_some() {
            self.reference_appointment_id = patch.reference_appointment_id;
        }
        if patch.reference_etag.is_some() {
            self.reference_etag = patch.reference_etag;
        }
        if patch.resigned_on.is_some() {
            self.resigned_on = patch.resigned_on;
        }
        self
    }

    /// Field errors for this filing, judged as of `today`.
    pub fn validate(&self, catalog: &MessageCatalog, today: NaiveDate) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self
            .reference_appointment_id
            .as_deref()
            .is_none_or(|id| id.trim().is_empty())
        {
            errors.push(FieldError::new(
                "NotBlank",
                OBJECT,
                "reference_appointment_id",
                catalog.message(APPOINTMENT_ID_MISSING),
            ));
        }

        match self.resigned_on.as_deref() {
            None => errors.push(FieldError::new(
                "NotNull",
                OBJECT,
                "resigned_on",
                catalog.message(RESIGNED_ON_MISSING),
            )),
            Some(raw) => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
                Err(_) => errors.push(
                    FieldError::new(
                        "typeMismatch",
                        OBJECT,
                        "resigned_on",
                        catalog.message(RESIGNED_ON_INVALID),
                    )
                    .with_rejected_value(raw),
                ),
                Ok(date) if date > today => errors.push(
                    FieldError::new(
                        "PastOrPresent",
                        OBJECT,
                        "resigned_on",
                        catalog.message(RESIGNED_ON_IN_FUTURE),
                    )
                    .with_rejected_value(raw),
                ),
                Ok(_) => {}
            },
        }

        errors
    }
}
