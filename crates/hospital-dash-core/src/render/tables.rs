//! List panels: patients, surgeries, doctors, operating rooms, supplies.

use super::escape;
use crate::dispatch::Action;
use crate::format::{format_day_str, or_fallback, status_class, status_label};
use crate::models::{Doctor, OperatingRoom, Patient, SurgeryStatus, Supply, Surgery};
use crate::state::{ListState, PatientsView, SurgeriesView, ALL_STATUSES};

/// Table body for a list: one row per record, the placeholder row when the
/// list loaded empty, and nothing when it never loaded or failed.
pub fn table_body<T, F>(list: &ListState<T>, columns: usize, placeholder: &str, row: F) -> String
where
    F: Fn(&T) -> String,
{
    match list {
        ListState::Loaded(rows) if rows.is_empty() => format!(
            r#"<tr><td colspan="{}" class="no-data">{}</td></tr>"#,
            columns, placeholder
        ),
        ListState::Loaded(rows) => rows.iter().map(row).collect(),
        ListState::Idle | ListState::Failed => String::new(),
    }
}

fn table(id: &str, headings: &[&str], body: String) -> String {
    let head: String = headings
        .iter()
        .map(|h| format!("<th>{}</th>", h))
        .collect();
    format!(
        r#"<table id="{}" class="table"><thead><tr>{}</tr></thead><tbody>{}</tbody></table>"#,
        id, head, body
    )
}

fn action_button(action: Action, class: &str, icon: &str) -> String {
    format!(
        r#"<button type="button" class="action-btn {}" {}><i class="fas {}"></i></button>"#,
        class,
        action.data_attrs(),
        icon
    )
}

fn dash(value: &Option<String>) -> String {
    escape(or_fallback(value, "-"))
}

pub fn patients_panel(view: &PatientsView) -> String {
    const HEADINGS: [&str; 6] = ["ID", "Name", "Gender", "Date of Birth", "Contact", "Actions"];

    let body = table_body(&view.list, HEADINGS.len(), "No patients found", patient_row);
    format!(
        r#"<div class="section-toolbar">
    <input type="text" id="patientSearch" class="form-control search-input" placeholder="Search patients..." value="{}">
    <button type="button" id="addPatientBtn" class="btn btn-primary" {}><i class="fas fa-plus"></i> Add Patient</button>
</div>{}"#,
        escape(&view.search),
        Action::AddPatient.data_attrs(),
        table("patientsTable", &HEADINGS, body)
    )
}

fn patient_row(patient: &Patient) -> String {
    let dob = match &patient.dob {
        Some(dob) if !dob.trim().is_empty() => escape(&format_day_str(dob)),
        _ => "-".to_string(),
    };
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        patient.id,
        escape(&patient.name),
        dash(&patient.gender),
        dob,
        dash(&patient.contact_number),
        action_button(Action::ViewPatient(patient.id), "view-btn", "fa-eye")
    )
}

/// `<option>` list for the status dropdowns, with `selected` on the match.
pub fn status_options(selected: &str, include_all: bool) -> String {
    let mut options = String::new();
    if include_all {
        options.push_str(&option(ALL_STATUSES, "All Statuses", selected == ALL_STATUSES));
    }
    for status in SurgeryStatus::SELECTABLE.iter() {
        options.push_str(&option(
            status.as_str(),
            &status_label(status),
            status.as_str() == selected,
        ));
    }
    options
}

pub(crate) fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape(value),
        if selected { " selected" } else { "" },
        escape(label)
    )
}

pub fn surgeries_panel(view: &SurgeriesView) -> String {
    const HEADINGS: [&str; 7] = ["ID", "Patient", "Doctor", "Type", "Date", "Status", "Actions"];

    let body = table_body(&view.list, HEADINGS.len(), "No surgeries found", surgery_row);
    format!(
        r#"<div class="section-toolbar">
    <input type="text" id="surgerySearch" class="form-control search-input" placeholder="Search surgeries..." value="{}">
    <select id="surgeryStatusFilter" class="form-control">{}</select>
    <input type="date" id="surgeryDateFilter" class="form-control" value="{}">
    <button type="button" id="clearSurgeryFilters" class="btn" {}>Clear Filters</button>
    <button type="button" id="scheduleSurgeryBtn" class="btn btn-primary" {}><i class="fas fa-plus"></i> Schedule Surgery</button>
</div>{}"#,
        escape(&view.search),
        status_options(view.status_filter_value(), true),
        escape(&view.date),
        Action::ClearSurgeryFilters.data_attrs(),
        Action::ScheduleSurgery.data_attrs(),
        table("surgeriesTable", &HEADINGS, body)
    )
}

/// Status pill.
pub fn status_badge(status: &SurgeryStatus) -> String {
    format!(
        r#"<span class="status-badge {}">{}</span>"#,
        escape(status.as_str()),
        escape(&status_label(status))
    )
}

fn surgery_row(surgery: &Surgery) -> String {
    format!(
        r#"<tr class="{}"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}{}</td></tr>"#,
        status_class(&surgery.status),
        surgery.id,
        escape(&surgery.patient_name),
        escape(&surgery.doctor_name),
        escape(&surgery.surgery_type),
        escape(&format_day_str(&surgery.scheduled_date)),
        status_badge(&surgery.status),
        action_button(Action::ViewSurgery(surgery.id), "view-btn", "fa-eye"),
        action_button(Action::UpdateStatus(surgery.id), "status-btn", "fa-clock")
    )
}

pub fn doctors_panel(list: &ListState<Doctor>) -> String {
    const HEADINGS: [&str; 5] = ["ID", "Name", "Specialty", "Contact", "Email"];

    let body = table_body(list, HEADINGS.len(), "No doctors found", |doctor: &Doctor| {
        format!(
            "<tr><td>{}</td><td>Dr. {}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            doctor.id,
            escape(&doctor.name),
            dash(&doctor.specialty),
            dash(&doctor.contact_number),
            dash(&doctor.email)
        )
    });
    table("doctorsTable", &HEADINGS, body)
}

pub fn rooms_panel(list: &ListState<OperatingRoom>) -> String {
    const HEADINGS: [&str; 4] = ["ID", "Name", "Floor", "Status"];

    let body = table_body(list, HEADINGS.len(), "No operating rooms found", |room: &OperatingRoom| {
        let floor = room
            .floor
            .as_ref()
            .map(|f| escape(&f.to_string()))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            room.id,
            escape(&room.name),
            floor,
            dash(&room.status)
        )
    });
    table("operatingRoomsTable", &HEADINGS, body)
}

pub fn supplies_panel(list: &ListState<Supply>) -> String {
    const HEADINGS: [&str; 8] = [
        "ID", "Name", "Category", "Quantity", "Min Level", "Max Level", "Status", "Actions",
    ];

    let body = table_body(list, HEADINGS.len(), "No medical supplies found", supply_row);
    table("medicalSuppliesTable", &HEADINGS, body)
}

fn supply_row(supply: &Supply) -> String {
    let (class, label) = if supply.is_low_stock() {
        ("stock-low", "Low Stock")
    } else {
        ("stock-ok", "In Stock")
    };
    let unit = escape(&supply.unit);
    format!(
        r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{} {}</td><td>{}</td><td>{}</td><td><span class="stock-badge {}">{}</span></td><td>{}</td></tr>"#,
        supply.id,
        escape(&supply.name),
        dash(&supply.category),
        supply.quantity,
        unit,
        supply.min_stock_level,
        supply.max_stock_level,
        class,
        label,
        action_button(Action::Restock(supply.id), "restock-btn", "fa-plus-circle")
    )
}
