//! Form field collection and payload building.
//!
//! The host submits each form as ordered `(name, value)` pairs. Parsing
//! enforces the required fields and turns empty optional fields into `None`
//! so payloads carry `null` rather than `""`.

mod patient;
mod restock;
mod surgery;

pub use patient::*;
pub use restock::*;
pub use surgery::*;

use std::str::FromStr;

use thiserror::Error;

use crate::models::RecordId;

/// Validation failures caught before any request is sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Please fill in the {0} field")]
    Missing(&'static str),

    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{0} must be at least 1")]
    NotPositive(&'static str),

    #[error("Unknown form: {0}")]
    UnknownForm(String),

    #[error("No record selected for this form")]
    NoTarget,
}

pub type FormResult<T> = Result<T, FormError>;

/// The forms the dashboard submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormId {
    AddPatient,
    ScheduleSurgery,
    UpdateStatus,
    RestockSupply,
}

impl FormId {
    /// Element id in the rendered markup.
    pub fn dom_id(&self) -> &'static str {
        match self {
            FormId::AddPatient => "addPatientForm",
            FormId::ScheduleSurgery => "scheduleSurgeryForm",
            FormId::UpdateStatus => "updateStatusForm",
            FormId::RestockSupply => "restockSupplyForm",
        }
    }
}

impl FromStr for FormId {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            FormId::AddPatient,
            FormId::ScheduleSurgery,
            FormId::UpdateStatus,
            FormId::RestockSupply,
        ]
        .into_iter()
        .find(|f| f.dom_id() == s)
        .ok_or_else(|| FormError::UnknownForm(s.to_string()))
    }
}

/// Submitted field values, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Builder-style append.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// First value for `name`, trimmed.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.trim())
    }

    /// Every value for a repeated field, trimmed, in order.
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.trim())
            .collect()
    }

    /// Non-empty value or `Missing(label)`.
    pub fn required(&self, name: &str, label: &'static str) -> FormResult<String> {
        self.optional(name).ok_or(FormError::Missing(label))
    }

    /// Value, with empty normalised to `None`.
    pub fn optional(&self, name: &str) -> Option<String> {
        self.value(name)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Required record reference (a select holding an id).
    pub fn required_id(&self, name: &str, label: &'static str) -> FormResult<RecordId> {
        let raw = self.required(name, label)?;
        parse_id(&raw, label)
    }

    /// Required positive integer.
    pub fn required_positive(&self, name: &str, label: &'static str) -> FormResult<u32> {
        let raw = self.required(name, label)?;
        parse_positive(&raw, label)
    }
}

pub(crate) fn parse_id(raw: &str, label: &'static str) -> FormResult<RecordId> {
    raw.parse().map_err(|_| FormError::InvalidNumber {
        field: label,
        value: raw.to_string(),
    })
}

pub(crate) fn parse_positive(raw: &str, label: &'static str) -> FormResult<u32> {
    let n: i64 = raw.parse().map_err(|_| FormError::InvalidNumber {
        field: label,
        value: raw.to_string(),
    })?;
    if n < 1 {
        return Err(FormError::NotPositive(label));
    }
    u32::try_from(n).map_err(|_| FormError::InvalidNumber {
        field: label,
        value: raw.to_string(),
    })
}
