//! Add-patient form.

use super::{FormData, FormResult};
use crate::models::NewPatient;

/// Build a `POST /api/patients` body. Requires name and contact number.
pub fn parse_new_patient(form: &FormData) -> FormResult<NewPatient> {
    Ok(NewPatient {
        name: form.required("name", "name")?,
        gender: form.optional("gender"),
        dob: form.optional("dob"),
        blood_type: form.optional("blood_type"),
        contact_number: form.required("contact_number", "contact number")?,
        email: form.optional("email"),
        address: form.optional("address"),
        medical_history: form.optional("medical_history"),
        allergies: form.optional("allergies"),
    })
}
