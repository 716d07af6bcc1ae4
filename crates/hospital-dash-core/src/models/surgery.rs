//! Surgery models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{null_as_default, RecordId};

/// Surgery lifecycle status.
///
/// Transition rules live on the backend; the client only displays and
/// requests changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SurgeryStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    Postponed,
    /// A status string this client does not know about
    Other(String),
}

impl SurgeryStatus {
    /// Every status the status-update form offers.
    pub const SELECTABLE: [SurgeryStatus; 5] = [
        SurgeryStatus::Scheduled,
        SurgeryStatus::InProgress,
        SurgeryStatus::Completed,
        SurgeryStatus::Cancelled,
        SurgeryStatus::Postponed,
    ];

    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            SurgeryStatus::Scheduled => "scheduled",
            SurgeryStatus::InProgress => "in_progress",
            SurgeryStatus::Completed => "completed",
            SurgeryStatus::Cancelled => "cancelled",
            SurgeryStatus::Postponed => "postponed",
            SurgeryStatus::Other(s) => s,
        }
    }

    /// Completed and cancelled surgeries never count as upcoming.
    pub fn is_closed(&self) -> bool {
        matches!(self, SurgeryStatus::Completed | SurgeryStatus::Cancelled)
    }
}

impl From<String> for SurgeryStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "scheduled" => SurgeryStatus::Scheduled,
            "in_progress" => SurgeryStatus::InProgress,
            "completed" => SurgeryStatus::Completed,
            "cancelled" => SurgeryStatus::Cancelled,
            "postponed" => SurgeryStatus::Postponed,
            _ => SurgeryStatus::Other(s),
        }
    }
}

impl From<&str> for SurgeryStatus {
    fn from(s: &str) -> Self {
        SurgeryStatus::from(s.to_string())
    }
}

impl From<SurgeryStatus> for String {
    fn from(status: SurgeryStatus) -> Self {
        match status {
            SurgeryStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SurgeryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A supply consumed by a surgery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurgerySupply {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub quantity: i64,
    #[serde(default)]
    pub unit: Option<String>,
}

/// A surgery as returned by `/api/surgeries`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Surgery {
    pub id: RecordId,
    #[serde(default)]
    pub patient_id: Option<RecordId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub patient_name: String,
    #[serde(default)]
    pub doctor_id: Option<RecordId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub doctor_name: String,
    #[serde(default)]
    pub operating_room_id: Option<RecordId>,
    #[serde(default)]
    pub operating_room_name: Option<String>,
    pub surgery_type: String,
    /// Scheduled day (ISO date, possibly with a time suffix)
    pub scheduled_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_time: String,
    pub status: SurgeryStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub supplies: Vec<SurgerySupply>,
}

impl Surgery {
    /// Parse the scheduled day, ignoring any time component.
    pub fn scheduled_day(&self) -> Option<NaiveDate> {
        crate::format::parse_day(&self.scheduled_date)
    }

    /// Scheduled today or later and not completed/cancelled.
    ///
    /// An unparseable date is never upcoming.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        !self.status.is_closed() && self.scheduled_day().is_some_and(|day| day >= today)
    }

    /// "09:00 - 11:30"
    pub fn time_window(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}

/// One requested supply line in a surgery booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplyRequest {
    pub id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    pub quantity: u32,
}

/// Body of `POST /api/surgeries`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSurgery {
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub operating_room_id: RecordId,
    pub surgery_type: String,
    pub scheduled_date: String,
    pub start_time: String,
    pub end_time: String,
    pub notes: Option<String>,
    pub supplies_needed: Vec<SupplyRequest>,
}

/// Body of `PUT /api/surgeries/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusUpdate {
    pub status: SurgeryStatus,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surgery(status: &str, date: &str) -> Surgery {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "patient_name": "Jane Doe",
            "doctor_name": "House",
            "surgery_type": "Appendectomy",
            "scheduled_date": date,
            "start_time": "09:00",
            "end_time": "10:00",
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn test_status_round_trips_unknown_values() {
        let status: SurgeryStatus = serde_json::from_str("\"on_hold\"").unwrap();
        assert_eq!(status, SurgeryStatus::Other("on_hold".into()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"on_hold\"");
        assert_eq!(
            serde_json::to_string(&SurgeryStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn test_is_upcoming() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        assert!(surgery("scheduled", "2026-03-10").is_upcoming(today));
        assert!(surgery("postponed", "2026-03-11T00:00:00").is_upcoming(today));
        assert!(!surgery("scheduled", "2026-03-09").is_upcoming(today));
        assert!(!surgery("completed", "2026-04-01").is_upcoming(today));
        assert!(!surgery("cancelled", "2026-04-01").is_upcoming(today));
        assert!(!surgery("scheduled", "soon").is_upcoming(today));
    }

    #[test]
    fn test_null_display_fields_decode_as_empty() {
        let surgery: Surgery = serde_json::from_value(serde_json::json!({
            "id": 4,
            "patient_name": "Jane Doe",
            "doctor_name": null,
            "surgery_type": "Appendectomy",
            "scheduled_date": "2026-03-10",
            "start_time": null,
            "end_time": "10:00",
            "status": "scheduled",
            "supplies": null,
        }))
        .unwrap();
        assert_eq!(surgery.doctor_name, "");
        assert_eq!(surgery.start_time, "");
        assert!(surgery.supplies.is_empty());
    }

    #[test]
    fn test_supply_request_omits_unknown_name() {
        let line = SupplyRequest { id: 3, name: None, quantity: 2 };
        let json = serde_json::to_value(&line).unwrap();
        assert!(json.get("name").is_none());
        assert_eq!(json["quantity"], 2);
    }
}
