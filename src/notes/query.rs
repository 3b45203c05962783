//! Validated search input.

use chrono::NaiveDate;
use thiserror::Error;

/// Prefix that selects a FHIR logical id instead of an MRN.
pub const FHIR_ID_PREFIX: &str = "fhir:";

/// Errors produced while turning raw form input into a [`SearchQuery`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Patient identifier is empty")]
    EmptyPatientId,

    #[error("Date '{input}' is not a valid YYYY-MM-DD date")]
    InvalidDate { input: String },
}

/// How the patient is identified on the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientRef {
    /// Medical record number, sent as `mrn`.
    Mrn(String),
    /// FHIR logical id, sent as `fhir_id`.
    FhirId(String),
}

impl PatientRef {
    pub fn param_name(&self) -> &'static str {
        match self {
            PatientRef::Mrn(_) => "mrn",
            PatientRef::FhirId(_) => "fhir_id",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            PatientRef::Mrn(value) | PatientRef::FhirId(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub patient: PatientRef,
    pub after: NaiveDate,
}

impl SearchQuery {
    /// Parse form input.
    ///
    /// `after` may be a full ISO-8601 timestamp; only the part before the
    /// first `T` is used.
    pub fn parse(patient_id: &str, after: &str) -> Result<Self, SearchError> {
        let patient_id = patient_id.trim();
        let patient = match patient_id.strip_prefix(FHIR_ID_PREFIX) {
            Some(id) => PatientRef::FhirId(id.trim().to_string()),
            None => PatientRef::Mrn(patient_id.to_string()),
        };
        if patient.value().is_empty() {
            return Err(SearchError::EmptyPatientId);
        }

        let date_part = after.trim().split('T').next().unwrap_or_default();
        let after = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| {
            SearchError::InvalidDate {
                input: after.trim().to_string(),
            }
        })?;

        Ok(Self { patient, after })
    }

    /// Query string parameters in request order.
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            (self.patient.param_name(), self.patient.value().to_string()),
            ("after", self.after.format("%Y-%m-%d").to_string()),
        ]
    }
}
