//! Dashboard aggregates derived from the patient, surgery and supply lists.

use chrono::NaiveDate;

use crate::models::{Supply, Surgery};

/// Default number of items shown in each dashboard list.
pub const DEFAULT_PREVIEW_LIMIT: usize = 5;

/// Surgery counters and the upcoming preview.
#[derive(Debug, Clone, PartialEq)]
pub struct SurgeryOverview {
    pub total: usize,
    /// Upcoming across the whole list, not just the preview
    pub upcoming_count: usize,
    /// First `limit` upcoming surgeries, in API order
    pub upcoming: Vec<Surgery>,
}

impl SurgeryOverview {
    pub fn from_surgeries(surgeries: Vec<Surgery>, today: NaiveDate, limit: usize) -> Self {
        let total = surgeries.len();
        let upcoming: Vec<Surgery> = surgeries
            .into_iter()
            .filter(|s| s.is_upcoming(today))
            .collect();
        let upcoming_count = upcoming.len();

        Self {
            total,
            upcoming_count,
            upcoming: upcoming.into_iter().take(limit).collect(),
        }
    }
}

/// Low-stock counter and preview.
#[derive(Debug, Clone, PartialEq)]
pub struct StockOverview {
    pub low_stock_count: usize,
    /// First `limit` low-stock supplies, in API order
    pub low_stock: Vec<Supply>,
}

impl StockOverview {
    pub fn from_supplies(supplies: Vec<Supply>, limit: usize) -> Self {
        let low: Vec<Supply> = supplies.into_iter().filter(Supply::is_low_stock).collect();
        Self {
            low_stock_count: low.len(),
            low_stock: low.into_iter().take(limit).collect(),
        }
    }
}

/// Everything the dashboard panel shows. Each part is filled by its own
/// fetch; `None` means that fetch has not succeeded yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub total_patients: Option<usize>,
    pub surgeries: Option<SurgeryOverview>,
    pub stock: Option<StockOverview>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SurgeryStatus;

    fn surgery(id: i64, status: SurgeryStatus, date: &str) -> Surgery {
        Surgery {
            id,
            patient_id: Some(1),
            patient_name: "Jane Doe".into(),
            doctor_id: Some(2),
            doctor_name: "Grey".into(),
            operating_room_id: Some(3),
            operating_room_name: Some("OR-1".into()),
            surgery_type: "Appendectomy".into(),
            scheduled_date: date.into(),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            status,
            notes: None,
            supplies: vec![],
        }
    }

    fn supply(id: i64, quantity: i64, min: i64) -> Supply {
        Supply {
            id,
            name: format!("Supply {}", id),
            category: None,
            unit: "units".into(),
            quantity,
            min_stock_level: min,
            max_stock_level: 100,
        }
    }

    #[test]
    fn test_upcoming_excludes_closed_statuses() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let overview = SurgeryOverview::from_surgeries(
            vec![
                surgery(1, SurgeryStatus::Scheduled, "2026-05-01"),
                surgery(2, SurgeryStatus::Completed, "2026-05-02"),
                surgery(3, SurgeryStatus::InProgress, "2026-05-03"),
            ],
            today,
            DEFAULT_PREVIEW_LIMIT,
        );
        assert_eq!(overview.total, 3);
        assert_eq!(overview.upcoming_count, 2);
        assert_eq!(
            overview.upcoming.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn test_upcoming_preview_truncates_but_counts_all() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let surgeries = (1..=8)
            .map(|id| surgery(id, SurgeryStatus::Scheduled, "2026-06-01"))
            .collect();
        let overview = SurgeryOverview::from_surgeries(surgeries, today, 5);
        assert_eq!(overview.upcoming_count, 8);
        assert_eq!(overview.upcoming.len(), 5);
        assert_eq!(overview.upcoming[4].id, 5);
    }

    #[test]
    fn test_past_surgeries_are_not_upcoming() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let overview = SurgeryOverview::from_surgeries(
            vec![surgery(1, SurgeryStatus::Postponed, "2026-04-30")],
            today,
            5,
        );
        assert_eq!(overview.upcoming_count, 0);
    }

    #[test]
    fn test_low_stock() {
        let overview = StockOverview::from_supplies(vec![supply(1, 5, 10), supply(2, 15, 10)], 5);
        assert_eq!(overview.low_stock_count, 1);
        assert_eq!(overview.low_stock[0].id, 1);
    }
}
