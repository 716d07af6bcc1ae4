//! Patient models.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// A patient record as returned by `/api/patients`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Backend ID
    pub id: RecordId,
    /// Full name
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    /// Date of birth (ISO date)
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Free-text medical history
    #[serde(default)]
    pub medical_history: Option<String>,
    /// Free-text allergies
    #[serde(default)]
    pub allergies: Option<String>,
}

/// Body of `POST /api/patients`.
///
/// Optional fields serialize as `null` when absent, never as `""`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    pub name: String,
    pub gender: Option<String>,
    pub dob: Option<String>,
    pub blood_type: Option<String>,
    pub contact_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
}

impl NewPatient {
    /// Create a payload with only the required fields set.
    pub fn new(name: impl Into<String>, contact_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gender: None,
            dob: None,
            blood_type: None,
            contact_number: contact_number.into(),
            email: None,
            address: None,
            medical_history: None,
            allergies: None,
        }
    }
}
