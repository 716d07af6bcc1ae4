//! The dashboard controller.
//!
//! [`Dashboard`] owns the application state and the backend handle. Every
//! host event lands on one of its methods; each method performs its reads or
//! writes, commits the results into [`AppState`], and returns. The host asks
//! for a fresh [`RenderedPage`] whenever it wants to repaint.
//!
//! State sits behind a `std::sync::Mutex` that is only ever held between
//! awaits, never across one.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Local;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::api::{ApiResult, HospitalApi, PatientQuery, SurgeryQuery, WriteOutcome};
use crate::config::UiConfig;
use crate::dashboard::{DashboardSummary, StockOverview, SurgeryOverview};
use crate::dispatch::{Action, DispatchResult};
use crate::forms::{
    parse_new_patient, parse_new_surgery, parse_restock, parse_status_update, FormData, FormError,
    FormId, FormResult,
};
use crate::models::{NewPatient, NewSurgery, RecordId, Restock, StatusUpdate, Supply};
use crate::notifications::{self, unread_ids};
use crate::render::{self, RenderContext, RenderedPage};
use crate::state::{AppState, ListState, PatientDetail, ScheduleForm};
use crate::ui::{
    Dropdown, ModalClick, ModalId, Region, RequestGenerations, SearchDebouncer, SearchField,
    Section, Ticket, ToastQueue,
};

/// Toast for transport failures on writes.
pub const GENERIC_ERROR: &str = "An error occurred. Please try again.";

/// A validated write waiting to be sent.
#[derive(Debug, Clone)]
enum PendingWrite {
    Patient(NewPatient),
    Surgery(NewSurgery),
    Status(RecordId, StatusUpdate),
    Restock(RecordId, Restock),
}

fn success_message(form: FormId) -> &'static str {
    match form {
        FormId::AddPatient => "Patient added successfully",
        FormId::ScheduleSurgery => "Surgery scheduled successfully",
        FormId::UpdateStatus => "Surgery status updated successfully",
        FormId::RestockSupply => "Supply restocked successfully",
    }
}

pub struct Dashboard<A> {
    api: A,
    state: Mutex<AppState>,
    generations: Mutex<RequestGenerations>,
    debouncer: SearchDebouncer,
    preview_limit: usize,
}

impl<A: HospitalApi> Dashboard<A> {
    pub fn new(api: A, ui: &UiConfig) -> Self {
        Self {
            api,
            state: Mutex::new(AppState::new(ToastQueue::new(ui.toast_ttl(), ui.toast_fade()))),
            generations: Mutex::new(RequestGenerations::default()),
            debouncer: SearchDebouncer::new(ui.search_debounce()),
            preview_limit: ui.preview_limit,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> AppState {
        self.state().clone()
    }

    fn state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn generations(&self) -> MutexGuard<'_, RequestGenerations> {
        self.generations.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, region: Region) -> Ticket {
        self.generations().begin(region)
    }

    /// Apply `f` only if `ticket` is still its region's newest request.
    ///
    /// The generations lock is held while applying so a newer request cannot
    /// commit in between the check and the write.
    fn commit<F>(&self, ticket: Ticket, f: F) -> bool
    where
        F: FnOnce(&mut AppState),
    {
        let generations = self.generations();
        if !generations.is_current(ticket) {
            debug!(region = ?ticket.region(), "discarding superseded response");
            return false;
        }
        f(&mut self.state());
        true
    }

    fn commit_list<T, S>(&self, ticket: Ticket, entity: &str, result: ApiResult<Vec<T>>, slot: S)
    where
        S: FnOnce(&mut AppState) -> &mut ListState<T>,
    {
        self.commit(ticket, |state| match result {
            Ok(rows) => {
                debug!(entity, count = rows.len(), "list loaded");
                *slot(state) = ListState::Loaded(rows);
            }
            Err(e) => {
                error!(entity, error = %e, "list load failed");
                *slot(state) = ListState::Failed;
                state.toasts.error(format!("Failed to load {} data", entity));
            }
        });
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Show a section and run its loader. Unknown targets change nothing.
    pub async fn navigate(&self, target: &str) -> Option<Section> {
        let section = self.state().router.route(target);
        match section {
            Some(section) => {
                info!(section = section.slug(), "navigate");
                self.load_section(section).await;
            }
            None => debug!(requested = target, "ignoring unknown navigation target"),
        }
        section
    }

    async fn load_section(&self, section: Section) {
        match section {
            Section::Dashboard => self.refresh_dashboard().await,
            Section::Patients => self.load_patients().await,
            Section::Surgeries => self.load_surgeries().await,
            Section::Doctors => self.load_doctors().await,
            Section::OperatingRooms => self.load_operating_rooms().await,
            Section::MedicalSupplies => self.load_supplies().await,
        }
    }

    /// Initial load: dashboard aggregates and the notification bell.
    pub async fn start(&self) {
        tokio::join!(self.refresh_dashboard(), self.load_notifications());
    }

    /// Reload the active section and the notification bell.
    pub async fn refresh(&self) {
        let section = self.state().router.active();
        tokio::join!(self.load_section(section), self.load_notifications());
    }

    // =========================================================================
    // Loaders
    // =========================================================================

    pub async fn load_patients(&self) {
        let ticket = self.begin(Region::Patients);
        let query = self.state().patients.query();
        let result = self.api.list_patients(&query).await;
        self.commit_list(ticket, "patient", result, |s| &mut s.patients.list);
    }

    pub async fn load_surgeries(&self) {
        let ticket = self.begin(Region::Surgeries);
        let query = self.state().surgeries.query();
        let result = self.api.list_surgeries(&query).await;
        self.commit_list(ticket, "surgery", result, |s| &mut s.surgeries.list);
    }

    pub async fn load_doctors(&self) {
        let ticket = self.begin(Region::Doctors);
        let result = self.api.list_doctors().await;
        self.commit_list(ticket, "doctor", result, |s| &mut s.doctors);
    }

    pub async fn load_operating_rooms(&self) {
        let ticket = self.begin(Region::OperatingRooms);
        let result = self.api.list_operating_rooms().await;
        self.commit_list(ticket, "operating room", result, |s| &mut s.rooms);
    }

    pub async fn load_supplies(&self) {
        let ticket = self.begin(Region::Supplies);
        let result = self.api.list_supplies().await;
        self.commit_list(ticket, "supply", result, |s| &mut s.supplies);
    }

    pub async fn load_notifications(&self) {
        let ticket = self.begin(Region::Notifications);
        let result = self.api.list_notifications().await;
        self.commit_list(ticket, "notification", result, |s| &mut s.notifications);
    }

    // =========================================================================
    // Search and filters
    // =========================================================================

    /// A keystroke in a search box. Loads once the box has been quiet for
    /// the debounce delay; returns whether this keystroke triggered the load.
    pub async fn on_search_input(&self, field: SearchField, value: &str) -> bool {
        {
            let mut state = self.state();
            match field {
                SearchField::Patients => state.patients.search = value.to_string(),
                SearchField::Surgeries => state.surgeries.search = value.to_string(),
            }
        }

        if !self.debouncer.settle(field).await {
            return false;
        }
        match field {
            SearchField::Patients => self.load_patients().await,
            SearchField::Surgeries => self.load_surgeries().await,
        }
        true
    }

    pub async fn set_surgery_status_filter(&self, value: &str) {
        self.state().surgeries.set_status_filter(value);
        self.load_surgeries().await;
    }

    pub async fn set_surgery_date_filter(&self, value: &str) {
        self.state().surgeries.date = value.trim().to_string();
        self.load_surgeries().await;
    }

    pub async fn clear_surgery_filters(&self) {
        self.state().surgeries.clear_filters();
        self.load_surgeries().await;
    }

    // =========================================================================
    // Dialogs
    // =========================================================================

    pub fn open_add_patient(&self) {
        let ticket = self.begin(Region::Dialog);
        self.commit(ticket, |state| state.modal.show(ModalId::AddPatient));
    }

    /// A click on a close control or the overlay. Detail fetches still in
    /// flight are dropped once the dialog closes.
    fn close_dialog(&self, click: ModalClick) {
        let ticket = self.begin(Region::Dialog);
        self.commit(ticket, |state| {
            state.modal.click(click);
        });
    }

    /// Fetch the patient fresh, show it, then fill in its surgeries.
    ///
    /// Opening any other dialog meanwhile discards both responses.
    pub async fn view_patient(&self, id: RecordId) {
        let ticket = self.begin(Region::Dialog);
        let patient = match self.api.get_patient(id).await {
            Ok(patient) => patient,
            Err(e) => {
                error!(patient = id, error = %e, "failed to load patient details");
                self.commit(ticket, |state| {
                    state.toasts.error("Failed to load patient details");
                });
                return;
            }
        };

        let shown = self.commit(ticket, |state| {
            state.dialogs.patient = Some(PatientDetail {
                patient,
                surgeries: ListState::Idle,
            });
            state.modal.show(ModalId::ViewPatient);
        });
        if !shown {
            return;
        }

        let surgeries = match self.api.patient_surgeries(id).await {
            Ok(list) => ListState::Loaded(list),
            Err(e) => {
                warn!(patient = id, error = %e, "failed to load patient surgeries");
                ListState::Failed
            }
        };

        self.commit(ticket, |state| {
            if let Some(detail) = state.dialogs.patient.as_mut().filter(|d| d.patient.id == id) {
                detail.surgeries = surgeries;
            }
        });
    }

    pub async fn view_surgery(&self, id: RecordId) {
        let ticket = self.begin(Region::Dialog);
        let result = self.api.get_surgery(id).await;
        self.commit(ticket, |state| match result {
            Ok(surgery) => {
                state.dialogs.surgery = Some(surgery);
                state.modal.show(ModalId::ViewSurgery);
            }
            Err(e) => {
                error!(surgery = id, error = %e, "failed to load surgery details");
                state.toasts.error("Failed to load surgery details");
            }
        });
    }

    pub async fn open_status_form(&self, id: RecordId) {
        let ticket = self.begin(Region::Dialog);
        let result = self.api.get_surgery(id).await;
        self.commit(ticket, |state| match result {
            Ok(surgery) => {
                state.dialogs.status_target = Some(surgery);
                state.modal.show(ModalId::UpdateStatus);
            }
            Err(e) => {
                error!(surgery = id, error = %e, "failed to load surgery details");
                state.toasts.error("Failed to load surgery details");
            }
        });
    }

    pub async fn open_restock(&self, id: RecordId) {
        let ticket = self.begin(Region::Dialog);
        let result = self.api.get_supply(id).await;
        self.commit(ticket, |state| match result {
            Ok(supply) => {
                state.dialogs.restock_target = Some(supply);
                state.modal.show(ModalId::RestockSupply);
            }
            Err(e) => {
                error!(supply = id, error = %e, "failed to load supply details");
                state.toasts.error("Failed to load supply details");
            }
        });
    }

    /// Open the scheduling form with one empty supply row and load its
    /// select options. Each option list loads on its own; failures leave
    /// that select empty.
    pub async fn open_schedule_surgery(&self) {
        let ticket = self.begin(Region::Dialog);
        self.commit(ticket, |state| {
            state.dialogs.schedule = ScheduleForm::default();
            state.modal.show(ModalId::ScheduleSurgery);
        });

        let all_patients = PatientQuery::default();
        let (patients, doctors, rooms, supplies) = tokio::join!(
            self.api.list_patients(&all_patients),
            self.api.list_doctors(),
            self.api.list_operating_rooms(),
            self.api.list_supplies(),
        );

        self.commit(ticket, |state| {
            let form = &mut state.dialogs.schedule;
            match patients {
                Ok(list) => form.patients = list,
                Err(e) => warn!(error = %e, "failed to load patient options"),
            }
            match doctors {
                Ok(list) => form.doctors = list,
                Err(e) => warn!(error = %e, "failed to load doctor options"),
            }
            match rooms {
                Ok(list) => form.rooms = list,
                Err(e) => warn!(error = %e, "failed to load operating room options"),
            }
            match supplies {
                Ok(list) => form.supplies = list.into_iter().filter(Supply::is_bookable).collect(),
                Err(e) => warn!(error = %e, "failed to load supply options"),
            }
        });
    }

    // =========================================================================
    // Forms
    // =========================================================================

    fn prepare(&self, form: FormId, data: &FormData) -> FormResult<PendingWrite> {
        let state = self.state();
        let pending = match form {
            FormId::AddPatient => PendingWrite::Patient(parse_new_patient(data)?),
            FormId::ScheduleSurgery => PendingWrite::Surgery(parse_new_surgery(data, |id| {
                state.dialogs.schedule.supply_name(id)
            })?),
            FormId::UpdateStatus => {
                let id = state
                    .dialogs
                    .status_target
                    .as_ref()
                    .map(|s| s.id)
                    .ok_or(FormError::NoTarget)?;
                PendingWrite::Status(id, parse_status_update(data)?)
            }
            FormId::RestockSupply => {
                let id = state
                    .dialogs
                    .restock_target
                    .as_ref()
                    .map(|s| s.id)
                    .ok_or(FormError::NoTarget)?;
                PendingWrite::Restock(id, parse_restock(data)?)
            }
        };
        Ok(pending)
    }

    /// Validate and send one form. Returns true when the backend accepted it.
    ///
    /// Validation failures and refusals keep the dialog open with an error
    /// toast. Success closes it and refreshes the affected list and the
    /// dashboard.
    pub async fn submit_form(&self, form: FormId, data: &FormData) -> bool {
        let pending = match self.prepare(form, data) {
            Ok(pending) => pending,
            Err(e) => {
                warn!(form = form.dom_id(), error = %e, "form not submitted");
                self.state().toasts.error(e.to_string());
                return false;
            }
        };

        let outcome = match &pending {
            PendingWrite::Patient(patient) => self
                .api
                .create_patient(patient)
                .await
                .map(|o| o.map(|id| debug!(id, "patient created"))),
            PendingWrite::Surgery(surgery) => self
                .api
                .create_surgery(surgery)
                .await
                .map(|o| o.map(|id| debug!(id, "surgery created"))),
            PendingWrite::Status(id, update) => self.api.update_surgery_status(*id, update).await,
            PendingWrite::Restock(id, restock) => self.api.restock_supply(*id, restock).await,
        };

        match outcome {
            Ok(WriteOutcome::Ok(())) => {
                info!(form = form.dom_id(), "write accepted");
                {
                    let mut state = self.state();
                    state.modal.close();
                    state.toasts.success(success_message(form));
                }
                self.refresh_after_write(form).await;
                true
            }
            Ok(WriteOutcome::Rejected(message)) => {
                warn!(form = form.dom_id(), %message, "write refused");
                self.state().toasts.error(format!("Error: {}", message));
                false
            }
            Err(e) => {
                error!(form = form.dom_id(), error = %e, "write failed");
                self.state().toasts.error(GENERIC_ERROR);
                false
            }
        }
    }

    async fn refresh_after_write(&self, form: FormId) {
        let own_list = async {
            match form {
                FormId::AddPatient => self.load_patients().await,
                FormId::ScheduleSurgery | FormId::UpdateStatus => self.load_surgeries().await,
                FormId::RestockSupply => self.load_supplies().await,
            }
        };
        tokio::join!(own_list, self.refresh_dashboard());
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Mark one notification read; reload the list when the backend agrees.
    pub async fn mark_read(&self, id: RecordId) {
        match self.api.mark_notification_read(id).await {
            Ok(WriteOutcome::Ok(())) => self.load_notifications().await,
            Ok(WriteOutcome::Rejected(message)) => {
                warn!(notification = id, %message, "mark-as-read refused")
            }
            Err(e) => warn!(notification = id, error = %e, "mark-as-read failed"),
        }
    }

    /// Mark every unread notification read, then reload.
    pub async fn mark_all_read(&self) {
        let ids = unread_ids(self.state().notifications.rows());
        let report = notifications::mark_all_read(&self.api, &ids).await;
        self.load_notifications().await;

        let mut state = self.state();
        if report.all_succeeded() {
            info!(count = report.attempted, "all notifications marked as read");
            state.toasts.success("All notifications marked as read");
        } else {
            warn!(failed = report.failed, attempted = report.attempted, "bulk mark-as-read incomplete");
            state.toasts.error(GENERIC_ERROR);
        }
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Run the three dashboard fetches concurrently. Each commits its own
    /// region as soon as it finishes; a failure leaves that region as it was.
    pub async fn refresh_dashboard(&self) {
        let limit = self.preview_limit;

        let patients = async {
            let ticket = self.begin(Region::DashboardPatients);
            let result = self.api.list_patients(&PatientQuery::default()).await;
            self.commit_summary(ticket, "patient", result, |summary, rows| {
                summary.total_patients = Some(rows.len());
            });
        };

        let surgeries = async {
            let ticket = self.begin(Region::DashboardSurgeries);
            let result = self.api.list_surgeries(&SurgeryQuery::default()).await;
            self.commit_summary(ticket, "surgery", result, |summary, rows| {
                let today = Local::now().date_naive();
                summary.surgeries = Some(SurgeryOverview::from_surgeries(rows, today, limit));
            });
        };

        let supplies = async {
            let ticket = self.begin(Region::DashboardSupplies);
            let result = self.api.list_supplies().await;
            self.commit_summary(ticket, "supply", result, |summary, rows| {
                summary.stock = Some(StockOverview::from_supplies(rows, limit));
            });
        };

        tokio::join!(patients, surgeries, supplies);
    }

    fn commit_summary<T, F>(&self, ticket: Ticket, entity: &str, result: ApiResult<Vec<T>>, apply: F)
    where
        F: FnOnce(&mut DashboardSummary, Vec<T>),
    {
        self.commit(ticket, |state| match result {
            Ok(rows) => apply(&mut state.dashboard, rows),
            Err(e) => {
                error!(entity, error = %e, "dashboard fetch failed");
                state.toasts.error(format!("Failed to load {} data", entity));
            }
        });
    }

    // =========================================================================
    // Actions and rendering
    // =========================================================================

    /// Run one action from the table.
    pub async fn dispatch(&self, action: Action) {
        debug!(action = action.name(), "dispatch");
        match action {
            Action::Navigate(target) => {
                self.navigate(&target).await;
            }
            Action::ViewPatient(id) => self.view_patient(id).await,
            Action::ViewSurgery(id) => self.view_surgery(id).await,
            Action::UpdateStatus(id) => self.open_status_form(id).await,
            Action::Restock(id) => self.open_restock(id).await,
            Action::MarkRead(id) => self.mark_read(id).await,
            Action::MarkAllRead => self.mark_all_read().await,
            Action::AddPatient => {
                self.open_add_patient();
            }
            Action::ScheduleSurgery => self.open_schedule_surgery().await,
            Action::AddSupplyRow => {
                self.state().dialogs.schedule.add_row();
            }
            Action::RemoveSupplyRow(key) => {
                self.state().dialogs.schedule.remove_row(key);
            }
            Action::ClearSurgeryFilters => self.clear_surgery_filters().await,
            Action::DismissToast(id) => {
                self.state().toasts.dismiss(&id, Instant::now());
            }
            Action::CloseModal => self.close_dialog(ModalClick::CloseControl),
            Action::ModalOverlay => self.close_dialog(ModalClick::Overlay),
            Action::ToggleSidebar => {
                self.state().chrome.toggle_sidebar();
            }
            Action::ToggleNotifications => {
                self.state().chrome.toggle_dropdown(Dropdown::Notifications);
            }
            Action::ToggleUserMenu => {
                self.state().chrome.toggle_dropdown(Dropdown::UserMenu);
            }
            Action::ClickOutside => {
                self.state().chrome.click_outside();
            }
            Action::ViewAllSurgeries => {
                self.navigate(Section::Surgeries.slug()).await;
            }
            Action::ViewAllSupplies => {
                self.navigate(Section::MedicalSupplies.slug()).await;
            }
        }
    }

    /// Decode a `data-action` / `data-id` pair and run it.
    pub async fn dispatch_raw(&self, name: &str, argument: Option<&str>) -> DispatchResult<()> {
        let action = Action::parse(name, argument)?;
        self.dispatch(action).await;
        Ok(())
    }

    /// Render the current state, dropping toasts that have finished fading.
    pub fn page(&self) -> RenderedPage {
        self.page_at(&RenderContext::current())
    }

    pub fn page_at(&self, ctx: &RenderContext) -> RenderedPage {
        let mut state = self.state();
        state.toasts.expire(ctx.instant);
        render::page(&state, ctx)
    }
}
