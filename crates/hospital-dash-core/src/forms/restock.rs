//! Restock form.

use super::{FormData, FormResult};
use crate::models::Restock;

/// Build a `PUT /api/medical-supplies/{id}/restock` body.
pub fn parse_restock(form: &FormData) -> FormResult<Restock> {
    Ok(Restock {
        amount: form.required_positive("amount", "amount")?,
    })
}
