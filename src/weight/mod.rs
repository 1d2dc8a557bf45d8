//! Weight data model
//!
//! Measurements, units and the per-animal history they belong to.

pub mod history;
pub mod types;
pub mod units;

pub use history::{WeightHistory, MIN_CHART_ENTRIES};
pub use types::{parse_date, ParseTagError, SortOrder, WeightEntry};
pub use units::{to_kg, WeightUnit, G_TO_KG, LB_TO_KG};
