//! Medical supply models.

use serde::{Deserialize, Serialize};

use super::{null_as_default, RecordId};

/// A stocked medical supply as returned by `/api/medical-supplies`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supply {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Unit of measure ("boxes", "units", "ml")
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
    pub quantity: i64,
    pub min_stock_level: i64,
    pub max_stock_level: i64,
}

impl Supply {
    /// At or below the configured minimum.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock_level
    }

    /// Stock bar width in percent, rounded.
    ///
    /// Not clamped: over-stocked items report more than 100. `None` when the
    /// maximum is not positive.
    pub fn stock_percentage(&self) -> Option<i64> {
        if self.max_stock_level <= 0 {
            return None;
        }
        Some((self.quantity as f64 / self.max_stock_level as f64 * 100.0).round() as i64)
    }

    /// Only supplies with something on the shelf can be booked for a surgery.
    pub fn is_bookable(&self) -> bool {
        self.quantity > 0
    }

    /// "Gauze (12 boxes available)"
    pub fn option_label(&self) -> String {
        format!("{} ({} {} available)", self.name, self.quantity, self.unit)
    }
}

/// Body of `PUT /api/medical-supplies/{id}/restock`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Restock {
    pub amount: u32,
}
