//! Application state.
//!
//! Everything the page shows lives here. Loaders commit into it, the
//! renderer reads from it, and nothing else holds view data.

use crate::api::{non_empty, PatientQuery, SurgeryQuery};
use crate::dashboard::DashboardSummary;
use crate::models::{
    Doctor, Notification, OperatingRoom, Patient, RecordId, Supply, Surgery, SurgeryStatus,
};
use crate::ui::{Chrome, ModalController, SectionRouter, ToastQueue};

/// Value of the status filter that disables it.
pub const ALL_STATUSES: &str = "all";

/// Latest committed result of a list load.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState<T> {
    /// Never loaded
    Idle,
    Loaded(Vec<T>),
    /// Last load failed; earlier rows are gone
    Failed,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        ListState::Idle
    }
}

impl<T> ListState<T> {
    /// Committed rows; empty unless loaded.
    pub fn rows(&self) -> &[T] {
        match self {
            ListState::Loaded(rows) => rows,
            ListState::Idle | ListState::Failed => &[],
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ListState::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ListState::Failed)
    }
}

/// Patients panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientsView {
    /// Raw search box text
    pub search: String,
    pub list: ListState<Patient>,
}

impl PatientsView {
    pub fn query(&self) -> PatientQuery {
        PatientQuery::from_search(&self.search)
    }
}

/// Surgeries panel and its filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurgeriesView {
    pub search: String,
    /// `None` is the "all" option
    pub status: Option<SurgeryStatus>,
    /// ISO date from the date picker; empty for no filter
    pub date: String,
    pub list: ListState<Surgery>,
}

impl SurgeriesView {
    pub fn query(&self) -> SurgeryQuery {
        SurgeryQuery {
            search: non_empty(&self.search),
            status: self.status.clone(),
            date: non_empty(&self.date),
        }
    }

    /// Set the status dropdown from its option value.
    pub fn set_status_filter(&mut self, value: &str) {
        let value = value.trim();
        self.status = if value.is_empty() || value == ALL_STATUSES {
            None
        } else {
            Some(SurgeryStatus::from(value))
        };
    }

    /// Option value currently selected in the status dropdown.
    pub fn status_filter_value(&self) -> &str {
        self.status.as_ref().map_or(ALL_STATUSES, |s| s.as_str())
    }

    /// Reset search, status and date.
    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.status = None;
        self.date.clear();
    }
}

/// View-patient dialog contents.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientDetail {
    pub patient: Patient,
    pub surgeries: ListState<Surgery>,
}

/// Schedule-surgery dialog: select options and supply rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleForm {
    pub patients: Vec<Patient>,
    pub doctors: Vec<Doctor>,
    pub rooms: Vec<OperatingRoom>,
    /// Only supplies with stock on hand
    pub supplies: Vec<Supply>,
    rows: Vec<u32>,
    next_row: u32,
}

impl Default for ScheduleForm {
    fn default() -> Self {
        Self {
            patients: Vec::new(),
            doctors: Vec::new(),
            rooms: Vec::new(),
            supplies: Vec::new(),
            rows: vec![0],
            next_row: 1,
        }
    }
}

impl ScheduleForm {
    /// Keys of the supply rows currently shown, in order.
    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    pub fn add_row(&mut self) -> u32 {
        let key = self.next_row;
        self.next_row += 1;
        self.rows.push(key);
        key
    }

    pub fn remove_row(&mut self, key: u32) -> bool {
        let before = self.rows.len();
        self.rows.retain(|k| *k != key);
        self.rows.len() != before
    }

    /// Name of a bookable supply, for the request payload.
    pub fn supply_name(&self, id: RecordId) -> Option<String> {
        self.supplies
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.clone())
    }
}

/// Data behind the dialogs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dialogs {
    pub patient: Option<PatientDetail>,
    pub surgery: Option<Surgery>,
    /// Surgery whose status form is open
    pub status_target: Option<Surgery>,
    /// Supply whose restock form is open
    pub restock_target: Option<Supply>,
    pub schedule: ScheduleForm,
}

/// The whole page.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub router: SectionRouter,
    pub chrome: Chrome,
    pub modal: ModalController,
    pub toasts: ToastQueue,
    pub dashboard: DashboardSummary,
    pub patients: PatientsView,
    pub surgeries: SurgeriesView,
    pub doctors: ListState<Doctor>,
    pub rooms: ListState<OperatingRoom>,
    pub supplies: ListState<Supply>,
    pub notifications: ListState<Notification>,
    pub dialogs: Dialogs,
}

impl AppState {
    pub fn new(toasts: ToastQueue) -> Self {
        Self {
            toasts,
            ..Self::default()
        }
    }
}
