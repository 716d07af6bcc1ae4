//! Doctors and operating rooms.

use serde::{Deserialize, Serialize};

use super::{RecordId, Scalar};

/// A doctor as returned by `/api/doctors`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Doctor {
    /// Option label used by the scheduling form: "Dr. Grey (Cardiology)".
    pub fn option_label(&self) -> String {
        match super::non_blank(&self.specialty) {
            Some(specialty) => format!("Dr. {} ({})", self.name, specialty),
            None => format!("Dr. {}", self.name),
        }
    }
}

/// An operating room as returned by `/api/operating-rooms`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperatingRoom {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub floor: Option<Scalar>,
    /// Availability as reported by the backend ("available", "in_use", ...)
    #[serde(default)]
    pub status: Option<String>,
}

impl OperatingRoom {
    /// Option label used by the scheduling form: "OR-1 (2)".
    pub fn option_label(&self) -> String {
        match &self.floor {
            Some(floor) => format!("{} ({})", self.name, floor),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doctor_label() {
        let doctor: Doctor =
            serde_json::from_str(r#"{"id": 1, "name": "Grey", "specialty": "Cardiology"}"#).unwrap();
        assert_eq!(doctor.option_label(), "Dr. Grey (Cardiology)");
    }

    #[test]
    fn test_room_label_with_numeric_floor() {
        let room: OperatingRoom = serde_json::from_str(r#"{"id": 2, "name": "OR-2", "floor": 3}"#).unwrap();
        assert_eq!(room.option_label(), "OR-2 (3)");

        let bare: OperatingRoom = serde_json::from_str(r#"{"id": 3, "name": "OR-3"}"#).unwrap();
        assert_eq!(bare.option_label(), "OR-3");
    }
}
