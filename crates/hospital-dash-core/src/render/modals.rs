//! Overlay and dialogs.

use super::tables::{option, status_badge, status_options};
use super::escape;
use crate::dispatch::Action;
use crate::format::{format_day_str, or_fallback, status_class};
use crate::forms::FormId;
use crate::state::{AppState, ListState, PatientDetail, ScheduleForm};
use crate::models::{Supply, Surgery};
use crate::ui::ModalId;

/// Overlay plus every visible dialog; empty while nothing is open.
pub fn modal_layer(state: &AppState) -> String {
    if !state.modal.overlay_visible() {
        return String::new();
    }

    let dialogs: String = ModalId::ALL
        .iter()
        .filter(|id| state.modal.is_open(**id))
        .map(|id| dialog(*id, state))
        .collect();

    format!(
        r#"<div id="modalOverlay" class="modal-overlay" style="display: block;" {}></div>{}"#,
        Action::ModalOverlay.data_attrs(),
        dialogs
    )
}

fn dialog(id: ModalId, state: &AppState) -> String {
    let (title, body) = match id {
        ModalId::AddPatient => ("Add New Patient", add_patient_form()),
        ModalId::ScheduleSurgery => ("Schedule Surgery", schedule_form(&state.dialogs.schedule)),
        ModalId::ViewPatient => (
            "Patient Details",
            state
                .dialogs
                .patient
                .as_ref()
                .map(patient_detail)
                .unwrap_or_default(),
        ),
        ModalId::ViewSurgery => (
            "Surgery Details",
            state
                .dialogs
                .surgery
                .as_ref()
                .map(surgery_detail)
                .unwrap_or_default(),
        ),
        ModalId::UpdateStatus => (
            "Update Surgery Status",
            state
                .dialogs
                .status_target
                .as_ref()
                .map(status_form)
                .unwrap_or_default(),
        ),
        ModalId::RestockSupply => (
            "Restock Supply",
            state
                .dialogs
                .restock_target
                .as_ref()
                .map(restock_form)
                .unwrap_or_default(),
        ),
    };

    format!(
        r#"<div id="{}" class="modal" style="display: block;">
    <div class="modal-content">
        <div class="modal-header"><h2>{}</h2><button type="button" class="close-modal" {}>&times;</button></div>
        <div class="modal-body">{}</div>
    </div>
</div>"#,
        id.dom_id(),
        title,
        Action::CloseModal.data_attrs(),
        body
    )
}

fn field(label: &str, input: String) -> String {
    format!(
        r#"<div class="form-group"><label>{}</label>{}</div>"#,
        label, input
    )
}

fn text_input(name: &str, kind: &str, required: bool) -> String {
    format!(
        r#"<input type="{}" name="{}" class="form-control"{}>"#,
        kind,
        name,
        if required { " required" } else { "" }
    )
}

fn textarea(name: &str) -> String {
    format!(r#"<textarea name="{}" class="form-control"></textarea>"#, name)
}

fn select(name: &str, placeholder: &str, options: String, required: bool) -> String {
    format!(
        r#"<select name="{}" class="form-control"{}><option value="">{}</option>{}</select>"#,
        name,
        if required { " required" } else { "" },
        escape(placeholder),
        options
    )
}

fn form(id: FormId, fields: String, submit: &str) -> String {
    format!(
        r#"<form id="{}">{}<div class="form-actions"><button type="button" class="btn" {}>Cancel</button><button type="submit" class="btn btn-primary">{}</button></div></form>"#,
        id.dom_id(),
        fields,
        Action::CloseModal.data_attrs(),
        submit
    )
}

fn add_patient_form() -> String {
    let gender = select(
        "gender",
        "Select Gender",
        ["Male", "Female", "Other"]
            .iter()
            .map(|g| option(g, g, false))
            .collect(),
        false,
    );
    let blood = select(
        "blood_type",
        "Select Blood Type",
        ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"]
            .iter()
            .map(|b| option(b, b, false))
            .collect(),
        false,
    );

    let fields = [
        field("Full Name", text_input("name", "text", true)),
        field("Gender", gender),
        field("Date of Birth", text_input("dob", "date", false)),
        field("Blood Type", blood),
        field("Contact Number", text_input("contact_number", "tel", true)),
        field("Email", text_input("email", "email", false)),
        field("Address", textarea("address")),
        field("Medical History", textarea("medical_history")),
        field("Allergies", textarea("allergies")),
    ]
    .concat();
    form(FormId::AddPatient, fields, "Add Patient")
}

/// Supply `<option>`s for one row of the scheduling form.
fn supply_options(supplies: &[Supply]) -> String {
    supplies
        .iter()
        .map(|s| option(&s.id.to_string(), &s.option_label(), false))
        .collect()
}

fn schedule_form(schedule: &ScheduleForm) -> String {
    let patients = schedule
        .patients
        .iter()
        .map(|p| option(&p.id.to_string(), &p.name, false))
        .collect();
    let doctors = schedule
        .doctors
        .iter()
        .map(|d| option(&d.id.to_string(), &d.option_label(), false))
        .collect();
    let rooms = schedule
        .rooms
        .iter()
        .map(|r| option(&r.id.to_string(), &r.option_label(), false))
        .collect();

    let supply_rows: String = schedule
        .rows()
        .iter()
        .map(|key| {
            format!(
                r#"<div class="supply-row" data-row="{}"><select name="supply_id" class="form-control supply-select"><option value="">Select Medical Supply</option>{}</select><input type="number" name="supply_quantity" class="form-control supply-quantity" placeholder="Qty" min="1"><button type="button" class="btn btn-danger remove-supply" {}><i class="fas fa-times"></i></button></div>"#,
                key,
                supply_options(&schedule.supplies),
                Action::RemoveSupplyRow(*key).data_attrs()
            )
        })
        .collect();

    let fields = [
        field("Patient", select("patient_id", "Select Patient", patients, true)),
        field("Doctor", select("doctor_id", "Select Doctor", doctors, true)),
        field("Operating Room", select("operating_room_id", "Select Operating Room", rooms, true)),
        field("Surgery Type", text_input("surgery_type", "text", true)),
        field("Date", text_input("scheduled_date", "date", true)),
        field("Start Time", text_input("start_time", "time", true)),
        field("End Time", text_input("end_time", "time", true)),
        field("Notes", textarea("notes")),
        format!(
            r#"<div class="form-group"><label>Medical Supplies</label><div id="surgerySuppliesContainer">{}</div><button type="button" id="addSupplyBtn" class="btn btn-sm" {}><i class="fas fa-plus"></i> Add Supply</button></div>"#,
            supply_rows,
            Action::AddSupplyRow.data_attrs()
        ),
    ]
    .concat();
    form(FormId::ScheduleSurgery, fields, "Schedule Surgery")
}

fn detail_row(label: &str, value: &str) -> String {
    format!(
        r#"<div class="detail-row"><span class="detail-label">{}</span><span class="detail-value">{}</span></div>"#,
        label,
        escape(value)
    )
}

fn patient_detail(detail: &PatientDetail) -> String {
    let patient = &detail.patient;
    let dob = match &patient.dob {
        Some(dob) if !dob.trim().is_empty() => format_day_str(dob),
        _ => "Not specified".to_string(),
    };

    let surgeries = match &detail.surgeries {
        ListState::Idle => String::new(),
        ListState::Failed => r#"<div class="error-message">Failed to load surgeries</div>"#.to_string(),
        ListState::Loaded(list) if list.is_empty() => {
            r#"<div class="no-data">No surgeries found</div>"#.to_string()
        }
        ListState::Loaded(list) => list.iter().map(patient_surgery_item).collect(),
    };

    [
        detail_row("Name", &patient.name),
        detail_row("Gender", or_fallback(&patient.gender, "Not specified")),
        detail_row("Date of Birth", &dob),
        detail_row("Blood Type", or_fallback(&patient.blood_type, "Not specified")),
        detail_row("Contact", or_fallback(&patient.contact_number, "Not specified")),
        detail_row("Email", or_fallback(&patient.email, "Not specified")),
        detail_row("Address", or_fallback(&patient.address, "Not specified")),
        detail_row("Medical History", or_fallback(&patient.medical_history, "No medical history")),
        detail_row("Allergies", or_fallback(&patient.allergies, "No known allergies")),
        format!(
            r#"<h3>Surgeries</h3><div id="patientSurgeriesList">{}</div>"#,
            surgeries
        ),
    ]
    .concat()
}

fn patient_surgery_item(surgery: &Surgery) -> String {
    format!(
        r#"<div class="surgery-item {}"><div class="surgery-details"><h4>{}</h4><p><i class="fas fa-user-md"></i> Dr. {}</p><p><i class="fas fa-calendar-day"></i> {}</p><p><i class="fas fa-clock"></i> {}</p><p><i class="fas fa-info-circle"></i> Status: {}</p></div><div class="surgery-actions"><button type="button" class="btn btn-sm" {}>Details</button></div></div>"#,
        status_class(&surgery.status),
        escape(&surgery.surgery_type),
        escape(&surgery.doctor_name),
        escape(&format_day_str(&surgery.scheduled_date)),
        escape(&surgery.time_window()),
        status_badge(&surgery.status),
        Action::ViewSurgery(surgery.id).data_attrs()
    )
}

fn surgery_detail(surgery: &Surgery) -> String {
    let supplies = if surgery.supplies.is_empty() {
        "No supplies specified".to_string()
    } else {
        let items: String = surgery
            .supplies
            .iter()
            .map(|s| {
                format!(
                    "<li>{} - {} {}</li>",
                    escape(&s.name),
                    s.quantity,
                    escape(s.unit.as_deref().unwrap_or_default())
                )
            })
            .collect();
        format!(r#"<ul class="supplies-list">{}</ul>"#, items)
    };

    [
        detail_row("Surgery ID", &surgery.id.to_string()),
        detail_row("Type", &surgery.surgery_type),
        detail_row("Patient", &surgery.patient_name),
        detail_row("Doctor", &format!("Dr. {}", surgery.doctor_name)),
        detail_row("Operating Room", or_fallback(&surgery.operating_room_name, "Not assigned")),
        detail_row("Date", &format_day_str(&surgery.scheduled_date)),
        detail_row("Time", &surgery.time_window()),
        format!(
            r#"<div class="detail-row"><span class="detail-label">Status</span>{}</div>"#,
            status_badge(&surgery.status)
        ),
        detail_row("Notes", or_fallback(&surgery.notes, "No notes")),
        format!(
            r#"<div class="detail-row"><span class="detail-label">Supplies</span><div id="viewSurgerySupplies">{}</div></div>"#,
            supplies
        ),
    ]
    .concat()
}

fn status_form(surgery: &Surgery) -> String {
    let fields = [
        format!(
            r#"<div class="detail-row"><span class="detail-label">Current Status</span><span id="currentStatusDisplay">{}</span></div>"#,
            status_badge(&surgery.status)
        ),
        field(
            "New Status",
            format!(
                r#"<select name="status" class="form-control" required>{}</select>"#,
                status_options(surgery.status.as_str(), false)
            ),
        ),
        field("Notes", textarea("notes")),
    ]
    .concat();
    form(FormId::UpdateStatus, fields, "Update Status")
}

fn restock_form(supply: &Supply) -> String {
    let unit = &supply.unit;
    let fields = [
        detail_row("Supply", &supply.name),
        detail_row("Current Stock", &format!("{} {}", supply.quantity, unit)),
        detail_row("Minimum Level", &format!("{} {}", supply.min_stock_level, unit)),
        detail_row("Maximum Level", &format!("{} {}", supply.max_stock_level, unit)),
        field(
            "Restock Amount",
            r#"<input type="number" name="amount" class="form-control" min="1" required>"#.to_string(),
        ),
    ]
    .concat();
    form(FormId::RestockSupply, fields, "Restock")
}
