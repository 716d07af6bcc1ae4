//! REST backend seam.
//!
//! [`HospitalApi`] is the only way the dashboard talks to the backend. The
//! production implementation is [`HttpApi`]; tests supply in-memory ones.

mod http;
mod outcome;

pub use http::*;
pub use outcome::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Doctor, NewPatient, NewSurgery, Notification, OperatingRoom, Patient, RecordId, Restock,
    StatusUpdate, Supply, Surgery, SurgeryStatus,
};

/// Transport and decoding failures.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Filter for the patient list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientQuery {
    pub search: Option<String>,
}

impl PatientQuery {
    /// Build from the raw search box text; blank means no filter.
    pub fn from_search(search: &str) -> Self {
        Self {
            search: non_empty(search),
        }
    }

    /// Query-string pairs.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        self.search
            .iter()
            .map(|s| ("search", s.clone()))
            .collect()
    }
}

/// Filter for the surgery list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurgeryQuery {
    pub search: Option<String>,
    /// `None` means every status
    pub status: Option<SurgeryStatus>,
    /// ISO date
    pub date: Option<String>,
}

impl SurgeryQuery {
    /// Query-string pairs, omitting unset filters.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(status) = &self.status {
            params.push(("status", status.to_string()));
        }
        if let Some(date) = &self.date {
            params.push(("date", date.clone()));
        }
        params
    }
}

pub(crate) fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Every backend operation the dashboard uses.
#[async_trait]
pub trait HospitalApi: Send + Sync {
    async fn list_patients(&self, query: &PatientQuery) -> ApiResult<Vec<Patient>>;
    async fn get_patient(&self, id: RecordId) -> ApiResult<Patient>;
    async fn patient_surgeries(&self, id: RecordId) -> ApiResult<Vec<Surgery>>;
    async fn create_patient(&self, patient: &NewPatient) -> ApiResult<WriteOutcome<RecordId>>;

    async fn list_surgeries(&self, query: &SurgeryQuery) -> ApiResult<Vec<Surgery>>;
    async fn get_surgery(&self, id: RecordId) -> ApiResult<Surgery>;
    async fn create_surgery(&self, surgery: &NewSurgery) -> ApiResult<WriteOutcome<RecordId>>;
    async fn update_surgery_status(
        &self,
        id: RecordId,
        update: &StatusUpdate,
    ) -> ApiResult<WriteOutcome<()>>;

    async fn list_doctors(&self) -> ApiResult<Vec<Doctor>>;
    async fn list_operating_rooms(&self) -> ApiResult<Vec<OperatingRoom>>;

    async fn list_supplies(&self) -> ApiResult<Vec<Supply>>;
    async fn get_supply(&self, id: RecordId) -> ApiResult<Supply>;
    async fn restock_supply(&self, id: RecordId, restock: &Restock) -> ApiResult<WriteOutcome<()>>;

    async fn list_notifications(&self) -> ApiResult<Vec<Notification>>;
    async fn mark_notification_read(&self, id: RecordId) -> ApiResult<WriteOutcome<()>>;
}
