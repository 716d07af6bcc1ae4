//! In-memory backend for controller tests.
//!
//! Records every call, serves canned lists, and can be told to fail an
//! endpoint, refuse writes, or hold a response back for a while.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as Days, Local};

use hospital_dash_core::api::{
    ApiError, ApiResult, HospitalApi, PatientQuery, SurgeryQuery, WriteOutcome,
};
use hospital_dash_core::models::{
    Doctor, NewPatient, NewSurgery, Notification, NotificationKind, OperatingRoom, Patient,
    RecordId, Restock, StatusUpdate, Supply, Surgery, SurgeryStatus,
};

#[derive(Default)]
struct Backend {
    patients: Vec<Patient>,
    surgeries: Vec<Surgery>,
    doctors: Vec<Doctor>,
    rooms: Vec<OperatingRoom>,
    supplies: Vec<Supply>,
    notifications: Vec<Notification>,

    failing: HashSet<&'static str>,
    rejection: Option<String>,
    delays: HashMap<&'static str, VecDeque<Duration>>,

    calls: Vec<&'static str>,
    patient_queries: Vec<PatientQuery>,
    surgery_queries: Vec<SurgeryQuery>,
    created_patients: Vec<NewPatient>,
    created_surgeries: Vec<NewSurgery>,
    marked_read: Vec<RecordId>,
}

#[derive(Default)]
pub struct MockApi {
    backend: Mutex<Backend>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn backend(&self) -> MutexGuard<'_, Backend> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_patients(self, patients: Vec<Patient>) -> Self {
        self.backend().patients = patients;
        self
    }

    pub fn with_surgeries(self, surgeries: Vec<Surgery>) -> Self {
        self.backend().surgeries = surgeries;
        self
    }

    pub fn with_doctors(self, doctors: Vec<Doctor>) -> Self {
        self.backend().doctors = doctors;
        self
    }

    pub fn with_rooms(self, rooms: Vec<OperatingRoom>) -> Self {
        self.backend().rooms = rooms;
        self
    }

    pub fn with_supplies(self, supplies: Vec<Supply>) -> Self {
        self.backend().supplies = supplies;
        self
    }

    pub fn with_notifications(self, notifications: Vec<Notification>) -> Self {
        self.backend().notifications = notifications;
        self
    }

    /// Make `endpoint` answer with HTTP 500.
    pub fn failing(self, endpoint: &'static str) -> Self {
        self.backend().failing.insert(endpoint);
        self
    }

    /// Refuse every write with `message` in the body.
    pub fn rejecting(self, message: &str) -> Self {
        self.backend().rejection = Some(message.to_string());
        self
    }

    /// Hold the next call to `endpoint` back by `delay`.
    pub fn delay_next(&self, endpoint: &'static str, delay: Duration) {
        self.backend()
            .delays
            .entry(endpoint)
            .or_default()
            .push_back(delay);
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.backend().calls.iter().filter(|c| **c == endpoint).count()
    }

    pub fn total_calls(&self) -> usize {
        self.backend().calls.len()
    }

    pub fn patient_queries(&self) -> Vec<PatientQuery> {
        self.backend().patient_queries.clone()
    }

    pub fn surgery_queries(&self) -> Vec<SurgeryQuery> {
        self.backend().surgery_queries.clone()
    }

    pub fn created_patients(&self) -> Vec<NewPatient> {
        self.backend().created_patients.clone()
    }

    pub fn created_surgeries(&self) -> Vec<NewSurgery> {
        self.backend().created_surgeries.clone()
    }

    pub fn marked_read(&self) -> Vec<RecordId> {
        self.backend().marked_read.clone()
    }

    /// Log the call, wait out any scheduled delay, then report a forced
    /// failure if one is configured.
    async fn enter(&self, endpoint: &'static str) -> ApiResult<()> {
        let delay = {
            let mut backend = self.backend();
            backend.calls.push(endpoint);
            backend.delays.get_mut(endpoint).and_then(VecDeque::pop_front)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.backend().failing.contains(endpoint) {
            return Err(ApiError::Status {
                status: 500,
                url: format!("http://mock/api/{}", endpoint),
            });
        }
        Ok(())
    }

    fn rejection(&self) -> Option<String> {
        self.backend().rejection.clone()
    }
}

#[async_trait]
impl HospitalApi for MockApi {
    async fn list_patients(&self, query: &PatientQuery) -> ApiResult<Vec<Patient>> {
        self.backend().patient_queries.push(query.clone());
        self.enter("list_patients").await?;
        let needle = query.search.as_deref().unwrap_or("").to_lowercase();
        Ok(self
            .backend()
            .patients
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn get_patient(&self, id: RecordId) -> ApiResult<Patient> {
        self.enter("get_patient").await?;
        self.backend()
            .patients
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found("patients", id))
    }

    async fn patient_surgeries(&self, id: RecordId) -> ApiResult<Vec<Surgery>> {
        self.enter("patient_surgeries").await?;
        Ok(self
            .backend()
            .surgeries
            .iter()
            .filter(|s| s.patient_id == Some(id))
            .cloned()
            .collect())
    }

    async fn create_patient(&self, patient: &NewPatient) -> ApiResult<WriteOutcome<RecordId>> {
        self.enter("create_patient").await?;
        if let Some(message) = self.rejection() {
            return Ok(WriteOutcome::Rejected(message));
        }
        let mut backend = self.backend();
        backend.created_patients.push(patient.clone());
        let id = backend.patients.len() as RecordId + 100;
        backend.patients.push(Patient {
            id,
            name: patient.name.clone(),
            gender: patient.gender.clone(),
            dob: patient.dob.clone(),
            blood_type: patient.blood_type.clone(),
            contact_number: Some(patient.contact_number.clone()),
            email: patient.email.clone(),
            address: patient.address.clone(),
            medical_history: patient.medical_history.clone(),
            allergies: patient.allergies.clone(),
        });
        Ok(WriteOutcome::Ok(id))
    }

    async fn list_surgeries(&self, query: &SurgeryQuery) -> ApiResult<Vec<Surgery>> {
        self.backend().surgery_queries.push(query.clone());
        self.enter("list_surgeries").await?;
        Ok(self
            .backend()
            .surgeries
            .iter()
            .filter(|s| query.status.as_ref().map_or(true, |status| &s.status == status))
            .filter(|s| query.date.as_ref().map_or(true, |d| s.scheduled_date.starts_with(d)))
            .cloned()
            .collect())
    }

    async fn get_surgery(&self, id: RecordId) -> ApiResult<Surgery> {
        self.enter("get_surgery").await?;
        self.backend()
            .surgeries
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| not_found("surgeries", id))
    }

    async fn create_surgery(&self, surgery: &NewSurgery) -> ApiResult<WriteOutcome<RecordId>> {
        self.enter("create_surgery").await?;
        if let Some(message) = self.rejection() {
            return Ok(WriteOutcome::Rejected(message));
        }
        let mut backend = self.backend();
        backend.created_surgeries.push(surgery.clone());
        Ok(WriteOutcome::Ok(backend.surgeries.len() as RecordId + 100))
    }

    async fn update_surgery_status(
        &self,
        id: RecordId,
        update: &StatusUpdate,
    ) -> ApiResult<WriteOutcome<()>> {
        self.enter("update_surgery_status").await?;
        if let Some(message) = self.rejection() {
            return Ok(WriteOutcome::Rejected(message));
        }
        let mut backend = self.backend();
        match backend.surgeries.iter_mut().find(|s| s.id == id) {
            Some(surgery) => {
                surgery.status = update.status.clone();
                Ok(WriteOutcome::Ok(()))
            }
            None => Ok(WriteOutcome::Rejected("Surgery not found".into())),
        }
    }

    async fn list_doctors(&self) -> ApiResult<Vec<Doctor>> {
        self.enter("list_doctors").await?;
        Ok(self.backend().doctors.clone())
    }

    async fn list_operating_rooms(&self) -> ApiResult<Vec<OperatingRoom>> {
        self.enter("list_operating_rooms").await?;
        Ok(self.backend().rooms.clone())
    }

    async fn list_supplies(&self) -> ApiResult<Vec<Supply>> {
        self.enter("list_supplies").await?;
        Ok(self.backend().supplies.clone())
    }

    async fn get_supply(&self, id: RecordId) -> ApiResult<Supply> {
        self.enter("get_supply").await?;
        self.backend()
            .supplies
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| not_found("medical-supplies", id))
    }

    async fn restock_supply(&self, id: RecordId, restock: &Restock) -> ApiResult<WriteOutcome<()>> {
        self.enter("restock_supply").await?;
        if let Some(message) = self.rejection() {
            return Ok(WriteOutcome::Rejected(message));
        }
        let mut backend = self.backend();
        match backend.supplies.iter_mut().find(|s| s.id == id) {
            Some(supply) => {
                supply.quantity += i64::from(restock.amount);
                Ok(WriteOutcome::Ok(()))
            }
            None => Ok(WriteOutcome::Rejected("Supply not found".into())),
        }
    }

    async fn list_notifications(&self) -> ApiResult<Vec<Notification>> {
        self.enter("list_notifications").await?;
        Ok(self.backend().notifications.clone())
    }

    async fn mark_notification_read(&self, id: RecordId) -> ApiResult<WriteOutcome<()>> {
        self.enter("mark_notification_read").await?;
        let mut backend = self.backend();
        backend.marked_read.push(id);
        if let Some(n) = backend.notifications.iter_mut().find(|n| n.id == id) {
            n.read = true;
        }
        Ok(WriteOutcome::Ok(()))
    }
}

fn not_found(collection: &str, id: RecordId) -> ApiError {
    ApiError::Status {
        status: 404,
        url: format!("http://mock/api/{}/{}", collection, id),
    }
}

// =========================================================================
// Fixtures
// =========================================================================

pub fn patient(id: RecordId, name: &str) -> Patient {
    Patient {
        id,
        name: name.to_string(),
        gender: Some("Female".into()),
        dob: Some("1980-04-12".into()),
        blood_type: Some("O+".into()),
        contact_number: Some("555-0100".into()),
        email: None,
        address: None,
        medical_history: None,
        allergies: None,
    }
}

/// A surgery `offset` days from today's local date.
pub fn surgery(id: RecordId, offset: i64, status: SurgeryStatus) -> Surgery {
    let day = Local::now().date_naive() + Days::days(offset);
    Surgery {
        id,
        patient_id: Some(1),
        patient_name: "Jane Doe".into(),
        doctor_id: Some(1),
        doctor_name: "Dr. House".into(),
        operating_room_id: Some(1),
        operating_room_name: Some("OR 1".into()),
        surgery_type: "Appendectomy".into(),
        scheduled_date: day.format("%Y-%m-%d").to_string(),
        start_time: "09:00".into(),
        end_time: "10:30".into(),
        status,
        notes: None,
        supplies: Vec::new(),
    }
}

pub fn supply(id: RecordId, name: &str, quantity: i64, min: i64, max: i64) -> Supply {
    Supply {
        id,
        name: name.to_string(),
        category: Some("Consumables".into()),
        unit: "boxes".into(),
        quantity,
        min_stock_level: min,
        max_stock_level: max,
    }
}

pub fn doctor(id: RecordId, name: &str) -> Doctor {
    Doctor {
        id,
        name: name.to_string(),
        specialty: Some("General Surgery".into()),
        contact_number: None,
        email: None,
    }
}

pub fn room(id: RecordId, name: &str) -> OperatingRoom {
    OperatingRoom {
        id,
        name: name.to_string(),
        floor: None,
        status: Some("available".into()),
    }
}

pub fn notification(id: RecordId, message: &str, read: bool) -> Notification {
    Notification {
        id,
        message: message.to_string(),
        kind: NotificationKind::Alert,
        created_at: "2026-03-10T09:00:00".into(),
        read,
    }
}
