//! Schedule-surgery and status-update forms.

use super::{parse_id, parse_positive, FormData, FormError, FormResult};
use crate::models::{NewSurgery, RecordId, StatusUpdate, SupplyRequest, SurgeryStatus};

/// Build a `POST /api/surgeries` body.
///
/// Supply rows arrive as repeated `supply_id` / `supply_quantity` pairs.
/// Rows without a selected supply are skipped; selected rows need a
/// positive quantity. `supply_name` resolves option labels for the payload.
pub fn parse_new_surgery<F>(form: &FormData, supply_name: F) -> FormResult<NewSurgery>
where
    F: Fn(RecordId) -> Option<String>,
{
    let patient_id = form.required_id("patient_id", "patient")?;
    let doctor_id = form.required_id("doctor_id", "doctor")?;
    let operating_room_id = form.required_id("operating_room_id", "operating room")?;
    let surgery_type = form.required("surgery_type", "surgery type")?;
    let scheduled_date = form.required("scheduled_date", "date")?;
    let start_time = form.required("start_time", "start time")?;
    let end_time = form.required("end_time", "end time")?;

    let ids = form.all("supply_id");
    let quantities = form.all("supply_quantity");
    let mut supplies_needed = Vec::new();
    for (i, raw_id) in ids.iter().enumerate() {
        if raw_id.is_empty() {
            continue;
        }
        let id = parse_id(raw_id, "supply")?;
        let quantity = match quantities.get(i) {
            Some(raw) if !raw.is_empty() => parse_positive(raw, "supply quantity")?,
            _ => return Err(FormError::Missing("supply quantity")),
        };
        supplies_needed.push(SupplyRequest {
            id,
            name: supply_name(id),
            quantity,
        });
    }

    Ok(NewSurgery {
        patient_id,
        doctor_id,
        operating_room_id,
        surgery_type,
        scheduled_date,
        start_time,
        end_time,
        notes: form.optional("notes"),
        supplies_needed,
    })
}

/// Build a `PUT /api/surgeries/{id}/status` body.
pub fn parse_status_update(form: &FormData) -> FormResult<StatusUpdate> {
    Ok(StatusUpdate {
        status: SurgeryStatus::from(form.required("status", "status")?),
        notes: form.optional("notes"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> FormData {
        FormData::from_pairs([
            ("patient_id", "1"),
            ("doctor_id", "2"),
            ("operating_room_id", "3"),
            ("surgery_type", "Knee replacement"),
            ("scheduled_date", "2026-11-02"),
            ("start_time", "08:00"),
            ("end_time", "11:00"),
            ("notes", ""),
        ])
    }

    #[test]
    fn test_supply_rows_collected() {
        let form = base_form()
            .with("supply_id", "7")
            .with("supply_quantity", "2")
            .with("supply_id", "")
            .with("supply_quantity", "")
            .with("supply_id", "9")
            .with("supply_quantity", "1");

        let surgery = parse_new_surgery(&form, |id| (id == 7).then(|| "Gauze".to_string())).unwrap();
        assert_eq!(surgery.notes, None);
        assert_eq!(
            surgery.supplies_needed,
            vec![
                SupplyRequest { id: 7, name: Some("Gauze".into()), quantity: 2 },
                SupplyRequest { id: 9, name: None, quantity: 1 },
            ]
        );
    }

    #[test]
    fn test_supply_row_needs_positive_quantity() {
        let zero = base_form().with("supply_id", "7").with("supply_quantity", "0");
        assert_eq!(
            parse_new_surgery(&zero, |_| None),
            Err(FormError::NotPositive("supply quantity"))
        );

        let missing = base_form().with("supply_id", "7");
        assert_eq!(
            parse_new_surgery(&missing, |_| None),
            Err(FormError::Missing("supply quantity"))
        );
    }

    #[test]
    fn test_required_selects() {
        let form = FormData::from_pairs([("patient_id", ""), ("doctor_id", "2")]);
        assert_eq!(parse_new_surgery(&form, |_| None), Err(FormError::Missing("patient")));
    }

    #[test]
    fn test_status_update_notes_optional() {
        let form = FormData::from_pairs([("status", "in_progress"), ("notes", "")]);
        assert_eq!(
            parse_status_update(&form).unwrap(),
            StatusUpdate { status: SurgeryStatus::InProgress, notes: None }
        );
    }
}
