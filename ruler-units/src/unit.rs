//! Unit representation with conversion factors

use std::fmt;

use ruler_core::{Result, RulerError};
use serde::{Deserialize, Serialize};

/// Largest relative drift allowed between `to_base * from_base` and 1
const FACTOR_TOLERANCE: f64 = 1e-6;

/// Multipliers into and out of the base unit (meters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionFactors {
    /// value_m = value * to_base
    pub to_base: f64,
    /// value = value_m * from_base
    pub from_base: f64,
}

impl ConversionFactors {
    /// Factors of the base unit itself
    pub const BASE: ConversionFactors = ConversionFactors { to_base: 1.0, from_base: 1.0 };

    pub const fn new(to_base: f64, from_base: f64) -> Self {
        ConversionFactors { to_base, from_base }
    }

    /// Check that both factors are positive, finite and inverse to each other
    pub fn validate(&self, label: &str) -> Result<()> {
        for (name, factor) in [("to_base", self.to_base), ("from_base", self.from_base)] {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(RulerError::invalid_registry(format!(
                    "{} factor of '{}' must be positive and finite, got {}",
                    name, label, factor
                )));
            }
        }

        let product = self.to_base * self.from_base;
        if (product - 1.0).abs() > FACTOR_TOLERANCE {
            return Err(RulerError::invalid_registry(format!(
                "factors of '{}' are not inverse: {} * {} = {}",
                label, self.to_base, self.from_base, product
            )));
        }

        Ok(())
    }
}

/// A length unit known to the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthUnit {
    /// Display label, also the lookup key (e.g., "Meter (m)")
    pub label: String,
    /// Short symbol (e.g., "m")
    pub symbol: String,
    /// Singular name (e.g., "meter")
    pub name: String,
    pub factors: ConversionFactors,
}

impl LengthUnit {
    pub fn new(label: &str, symbol: &str, name: &str, factors: ConversionFactors) -> Self {
        LengthUnit {
            label: label.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            factors,
        }
    }

    /// Check if this is the base unit
    pub fn is_base(&self) -> bool {
        self.factors == ConversionFactors::BASE
    }

    /// Convert a value in this unit to meters
    pub fn to_base(&self, value: f64) -> f64 {
        value * self.factors.to_base
    }

    /// Convert a value in meters to this unit
    pub fn from_base(&self, value_m: f64) -> f64 {
        value_m * self.factors.from_base
    }

    /// Convert a value from this unit to another unit
    pub fn convert_to(&self, value: f64, target: &LengthUnit) -> f64 {
        target.from_base(self.to_base(value))
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter() -> LengthUnit {
        LengthUnit::new("Meter (m)", "m", "meter", ConversionFactors::BASE)
    }

    fn kilometer() -> LengthUnit {
        LengthUnit::new("Kilometer (km)", "km", "kilometer", ConversionFactors::new(1000.0, 0.001))
    }

    #[test]
    fn test_base_unit() {
        assert!(meter().is_base());
        assert!(!kilometer().is_base());
    }

    #[test]
    fn test_to_and_from_base() {
        let km = kilometer();
        assert_eq!(km.to_base(5.0), 5000.0);
        assert_eq!(km.from_base(5000.0), 5.0);
    }

    #[test]
    fn test_unit_conversion() {
        let converted = meter().convert_to(5000.0, &kilometer());
        assert_eq!(converted, 5.0);
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(kilometer().to_string(), "Kilometer (km)");
    }

    #[test]
    fn test_validate_accepts_inverse_pair() {
        assert!(ConversionFactors::new(0.0254, 39.3700787).validate("Inch (in)").is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        let err = ConversionFactors::new(0.0, 1.0).validate("Zero").unwrap_err();
        assert!(matches!(err, RulerError::InvalidRegistry(_)));

        let err = ConversionFactors::new(f64::INFINITY, 0.0).validate("Inf").unwrap_err();
        assert!(matches!(err, RulerError::InvalidRegistry(_)));
    }

    #[test]
    fn test_validate_rejects_inconsistent_pair() {
        let err = ConversionFactors::new(0.3048, 3.0).validate("Foot (ft)").unwrap_err();
        assert!(err.to_string().contains("not inverse"));
    }
}
