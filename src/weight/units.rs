//! Unit normalization
//!
//! Every weight is compared and scaled in kilograms. The original value and
//! unit stay attached to each entry for display.

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use super::ParseTagError;

/// Pounds to kilograms
pub const LB_TO_KG: f64 = 0.453592;

/// Grams to kilograms
pub const G_TO_KG: f64 = 0.001;

/// Supported weight units
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    /// Kilograms (canonical unit)
    #[default]
    Kg,
    /// Pounds
    Lb,
    /// Grams
    G,
}

impl WeightUnit {
    /// Get all units for iteration
    pub fn all() -> &'static [WeightUnit] {
        &[WeightUnit::Kg, WeightUnit::Lb, WeightUnit::G]
    }

    /// Multiplicative factor into kilograms
    pub fn factor(&self) -> f64 {
        match self {
            WeightUnit::Kg => 1.0,
            WeightUnit::Lb => LB_TO_KG,
            WeightUnit::G => G_TO_KG,
        }
    }

    /// Convert a value in this unit to kilograms
    pub fn to_kg(&self, weight: f64) -> f64 {
        weight * self.factor()
    }

    /// Convert a value in kilograms back to this unit
    pub fn from_kg(&self, kg: f64) -> f64 {
        kg / self.factor()
    }

    /// Look up a unit tag, accepting short and long spellings
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Some(WeightUnit::Kg),
            "lb" | "lbs" | "pound" | "pounds" => Some(WeightUnit::Lb),
            "g" | "gram" | "grams" => Some(WeightUnit::G),
            _ => None,
        }
    }

    /// Short tag used in labels
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
            WeightUnit::G => "g",
        }
    }
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| ParseTagError::new("weight unit", s))
    }
}

/// Convert a weight to kilograms; a missing unit means the value is already kg
pub fn to_kg(weight: f64, unit: Option<WeightUnit>) -> f64 {
    unit.unwrap_or_default().to_kg(weight)
}

/// Deserialize a unit tag leniently: unknown, null or non-string tags fall
/// back to kg
pub(crate) fn deserialize_unit<'de, D>(deserializer: D) -> Result<WeightUnit, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = serde_json::Value::deserialize(deserializer)?;
    Ok(match &tag {
        serde_json::Value::String(tag) => WeightUnit::from_tag(tag).unwrap_or_else(|| {
            tracing::debug!(unit = %tag, "Unknown weight unit, treating as kg");
            WeightUnit::Kg
        }),
        serde_json::Value::Null => WeightUnit::Kg,
        other => {
            tracing::debug!(unit = %other, "Non-string weight unit, treating as kg");
            WeightUnit::Kg
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_kg_is_identity() {
        for value in [0.0, 1.0, 12.5, 78.9] {
            assert_eq!(WeightUnit::Kg.to_kg(value), value);
        }
    }

    #[test]
    fn test_known_conversions() {
        assert!((WeightUnit::Lb.to_kg(78.9) - 35.788_408_8).abs() < TOLERANCE);
        assert!((WeightUnit::G.to_kg(2500.0) - 2.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_round_trip_all_units() {
        for unit in WeightUnit::all() {
            for value in [0.5, 10.0, 34.0, 1234.5] {
                let back = unit.from_kg(unit.to_kg(value));
                assert!((back - value).abs() < TOLERANCE, "{} {}", unit, value);
            }
        }
    }

    #[test]
    fn test_missing_unit_defaults_to_kg() {
        assert_eq!(to_kg(7.0, None), 7.0);
        assert_eq!(to_kg(1000.0, Some(WeightUnit::G)), 1.0);
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!("KG".parse::<WeightUnit>().unwrap(), WeightUnit::Kg);
        assert_eq!("lbs".parse::<WeightUnit>().unwrap(), WeightUnit::Lb);
        assert_eq!("grams".parse::<WeightUnit>().unwrap(), WeightUnit::G);
        assert!("stone".parse::<WeightUnit>().is_err());
    }

    #[test]
    fn test_serde_tags() {
        assert_eq!(serde_json::to_string(&WeightUnit::Lb).unwrap(), r#""lb""#);
        let unit: WeightUnit = serde_json::from_str(r#""g""#).unwrap();
        assert_eq!(unit, WeightUnit::G);
    }
}
