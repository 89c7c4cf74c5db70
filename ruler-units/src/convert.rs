//! Length conversion through the base unit

use ruler_core::Result;
use serde::{Deserialize, Serialize};

use crate::units::{UnitRegistry, UNITS};

/// One converted value in a target unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Target unit label
    pub unit: String,
    /// Converted value, unrounded
    pub value: f64,
}

/// A single conversion request
///
/// A missing `to_unit` asks for every other registered unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub value: f64,
    pub from_unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "result", rename_all = "snake_case")]
pub enum ConversionOutcome {
    Single(f64),
    All(Vec<ConversionResult>),
}

impl ConversionRequest {
    pub fn single(value: f64, from_unit: &str, to_unit: &str) -> Self {
        ConversionRequest {
            value,
            from_unit: from_unit.to_string(),
            to_unit: Some(to_unit.to_string()),
        }
    }

    pub fn all(value: f64, from_unit: &str) -> Self {
        ConversionRequest {
            value,
            from_unit: from_unit.to_string(),
            to_unit: None,
        }
    }

    pub fn execute(&self, registry: &UnitRegistry) -> Result<ConversionOutcome> {
        match &self.to_unit {
            Some(to_unit) => registry
                .convert(self.value, &self.from_unit, to_unit)
                .map(ConversionOutcome::Single),
            None => registry
                .convert_to_all(self.value, &self.from_unit)
                .map(ConversionOutcome::All),
        }
    }
}

impl UnitRegistry {
    /// Convert `value` from one unit label to another
    ///
    /// Same-unit conversions are allowed and return `value`.
    pub fn convert(&self, value: f64, from_unit: &str, to_unit: &str) -> Result<f64> {
        let from = self.factors(from_unit)?;
        let to = self.factors(to_unit)?;
        Ok(value * from.to_base * to.from_base)
    }

    /// Convert `value` into every registered unit except `from_unit`, in registry order
    pub fn convert_to_all(&self, value: f64, from_unit: &str) -> Result<Vec<ConversionResult>> {
        let from = self.get(from_unit)?;
        Ok(self
            .iter()
            .filter(|unit| unit.label != from.label)
            .map(|unit| ConversionResult {
                unit: unit.label.clone(),
                value: from.convert_to(value, unit),
            })
            .collect())
    }
}

/// Convert with the global registry
pub fn convert(value: f64, from_unit: &str, to_unit: &str) -> Result<f64> {
    UNITS.convert(value, from_unit, to_unit)
}

/// Convert to all other units with the global registry
pub fn convert_to_all(value: f64, from_unit: &str) -> Result<Vec<ConversionResult>> {
    UNITS.convert_to_all(value, from_unit)
}
