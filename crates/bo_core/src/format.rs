//! Indian currency denomination for display.
//!
//! Figures are recorded in lakhs. From 100 lakhs upward the amount is shown in
//! crores (1 crore = 100 lakhs); always two decimals.

use crate::amount::{Figure, Lakhs, LAKHS_PER_CRORE};
use crate::ids::TerritoryKey;

/// Placeholder for an absent figure.
pub const ABSENT: &str = "—";

/// `None` → `—`, `150` → `₹1.50 Cr`, `45.5` → `₹45.50L`.
pub fn format_amount(amount: Figure) -> String {
    match amount {
        None => ABSENT.to_string(),
        Some(v) if v >= LAKHS_PER_CRORE => format!("₹{:.2} Cr", v / LAKHS_PER_CRORE),
        Some(v) => format_lakhs(v),
    }
}

/// Always lakh-denominated, as the per-town ranking cards show it.
pub fn format_lakhs(amount: Lakhs) -> String {
    format!("₹{amount:.2}L")
}

/// `TAMIL_NADU` → `TAMIL NADU`.
pub fn territory_label(key: &TerritoryKey) -> String {
    key.as_str().replace('_', " ")
}
