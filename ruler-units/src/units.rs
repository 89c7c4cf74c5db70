//! Unit definitions and the registry that owns them

use std::collections::HashMap;
use std::sync::LazyLock;

use ruler_core::{Result, RulerError};
use tracing::{debug, warn};

use crate::{ConversionFactors, LengthUnit};

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::length);

/// Ordered, immutable registry of length units keyed by display label
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    units: Vec<LengthUnit>,
    labels: HashMap<String, usize>,
    aliases: HashMap<String, usize>,
}

impl UnitRegistry {
    /// The built-in length table
    pub fn length() -> Self {
        let mut registry = UnitRegistry::empty();
        registry.register_length_units();
        debug!(units = registry.len(), "length unit registry ready");
        registry
    }

    /// Build a registry from an arbitrary table, checking the factor invariant
    pub fn from_units(units: Vec<LengthUnit>) -> Result<Self> {
        if units.is_empty() {
            return Err(RulerError::invalid_registry("registry holds no units"));
        }

        let mut registry = UnitRegistry::empty();
        for unit in units {
            unit.factors.validate(&unit.label)?;
            if registry.labels.contains_key(&unit.label) {
                return Err(RulerError::invalid_registry(format!(
                    "duplicate unit label '{}'",
                    unit.label
                )));
            }
            registry.register(unit);
        }
        Ok(registry)
    }

    fn empty() -> Self {
        UnitRegistry {
            units: Vec::new(),
            labels: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Get a unit by its exact display label
    pub fn get(&self, label: &str) -> Result<&LengthUnit> {
        self.labels
            .get(label)
            .map(|&idx| &self.units[idx])
            .ok_or_else(|| RulerError::unsupported_unit(label))
    }

    /// Get the factor pair of a unit by its exact display label
    pub fn factors(&self, label: &str) -> Result<ConversionFactors> {
        self.get(label).map(|unit| unit.factors)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains_key(label)
    }

    /// Find a unit from user input: a label, symbol or name
    ///
    /// Labels match exactly after trimming; symbols and names (and their
    /// plurals) match case-insensitively.
    pub fn resolve(&self, input: &str) -> Result<&LengthUnit> {
        let trimmed = input.trim();
        if let Ok(unit) = self.get(trimmed) {
            return Ok(unit);
        }
        self.aliases
            .get(&trimmed.to_lowercase())
            .map(|&idx| &self.units[idx])
            .ok_or_else(|| RulerError::unsupported_unit(trimmed))
    }

    /// Unit labels in display order
    pub fn labels(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.label.as_str()).collect()
    }

    /// Units in display order
    pub fn iter(&self) -> impl Iterator<Item = &LengthUnit> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Re-check every unit against the factor invariant
    pub fn validate(&self) -> Result<()> {
        self.units.iter().try_for_each(|u| u.factors.validate(&u.label))
    }

    fn register(&mut self, unit: LengthUnit) {
        let idx = self.units.len();
        self.labels.insert(unit.label.clone(), idx);
        let keys = [&unit.label, &unit.symbol, &unit.name];
        for key in keys.map(|k| k.to_lowercase()) {
            self.alias_index(&key, idx);
        }
        self.units.push(unit);
    }

    fn alias(&mut self, alias: &str, label: &str) {
        if let Some(&idx) = self.labels.get(label) {
            self.alias_index(&alias.to_lowercase(), idx);
        }
    }

    fn alias_index(&mut self, key: &str, idx: usize) {
        if let Some(&existing) = self.aliases.get(key) {
            if existing != idx {
                warn!(alias = key, "alias already taken, keeping first unit");
            }
            return;
        }
        self.aliases.insert(key.to_string(), idx);
    }

    fn register_length_units(&mut self) {
        let table = [
            // Metric
            ("Meter (m)", "m", "meter", ConversionFactors::BASE),
            ("Centimeter (cm)", "cm", "centimeter", ConversionFactors::new(0.01, 100.0)),
            ("Kilometer (km)", "km", "kilometer", ConversionFactors::new(1000.0, 0.001)),
            // Imperial
            ("Inch (in)", "in", "inch", ConversionFactors::new(0.0254, 39.3700787)),
            ("Foot (ft)", "ft", "foot", ConversionFactors::new(0.3048, 3.2808399)),
        ];
        for (label, symbol, name, factors) in table {
            self.register(LengthUnit::new(label, symbol, name, factors));
        }

        // Aliases
        self.alias("meters", "Meter (m)");
        self.alias("metre", "Meter (m)");
        self.alias("metres", "Meter (m)");
        self.alias("centimeters", "Centimeter (cm)");
        self.alias("centimetre", "Centimeter (cm)");
        self.alias("centimetres", "Centimeter (cm)");
        self.alias("kilometers", "Kilometer (km)");
        self.alias("kilometre", "Kilometer (km)");
        self.alias("kilometres", "Kilometer (km)");
        self.alias("inches", "Inch (in)");
        self.alias("feet", "Foot (ft)");
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_registry() {
        let reg = UnitRegistry::length();

        assert!(reg.get("Meter (m)").is_ok());
        assert!(reg.get("Foot (ft)").is_ok());
        assert!(reg.contains("Inch (in)"));

        let err = reg.get("Parsec").unwrap_err();
        assert_eq!(err, RulerError::UnsupportedUnit("Parsec".to_string()));
    }

    #[test]
    fn test_get_is_exact() {
        let reg = UnitRegistry::length();
        assert!(reg.get("m").is_err());
        assert!(reg.get("meter (m)").is_err());
        assert!(reg.get(" Meter (m)").is_err());
    }

    #[test]
    fn test_display_order() {
        let reg = UnitRegistry::length();
        assert_eq!(
            reg.labels(),
            vec!["Meter (m)", "Centimeter (cm)", "Kilometer (km)", "Inch (in)", "Foot (ft)"]
        );
        assert_eq!(reg.len(), 5);
        assert!(!reg.is_empty());
    }

    #[test]
    fn test_factor_table() {
        let reg = UnitRegistry::length();
        assert_eq!(reg.factors("Meter (m)").unwrap(), ConversionFactors::new(1.0, 1.0));
        assert_eq!(reg.factors("Centimeter (cm)").unwrap(), ConversionFactors::new(0.01, 100.0));
        assert_eq!(reg.factors("Kilometer (km)").unwrap(), ConversionFactors::new(1000.0, 0.001));
        assert_eq!(reg.factors("Inch (in)").unwrap(), ConversionFactors::new(0.0254, 39.3700787));
        assert_eq!(reg.factors("Foot (ft)").unwrap(), ConversionFactors::new(0.3048, 3.2808399));
    }

    #[test]
    fn test_builtin_table_is_consistent() {
        assert!(UnitRegistry::length().validate().is_ok());
    }

    #[test]
    fn test_resolve_aliases() {
        let reg = UnitRegistry::length();
        assert_eq!(reg.resolve("Foot (ft)").unwrap().label, "Foot (ft)");
        assert_eq!(reg.resolve("  ft ").unwrap().label, "Foot (ft)");
        assert_eq!(reg.resolve("Feet").unwrap().label, "Foot (ft)");
        assert_eq!(reg.resolve("KM").unwrap().label, "Kilometer (km)");
        assert_eq!(reg.resolve("inches").unwrap().label, "Inch (in)");
        assert_eq!(reg.resolve("meter (m)").unwrap().label, "Meter (m)");
        assert!(matches!(reg.resolve("parsec"), Err(RulerError::UnsupportedUnit(_))));
    }

    #[test]
    fn test_from_units_rejects_bad_tables() {
        assert!(UnitRegistry::from_units(vec![]).is_err());

        let dup = vec![
            LengthUnit::new("Meter (m)", "m", "meter", ConversionFactors::BASE),
            LengthUnit::new("Meter (m)", "mm", "other", ConversionFactors::BASE),
        ];
        assert!(matches!(UnitRegistry::from_units(dup), Err(RulerError::InvalidRegistry(_))));

        let yard = ConversionFactors::new(0.9144, 1.0);
        let skewed = vec![LengthUnit::new("Yard (yd)", "yd", "yard", yard)];
        assert!(matches!(UnitRegistry::from_units(skewed), Err(RulerError::InvalidRegistry(_))));
    }

    #[test]
    fn test_from_units_keeps_order() {
        let reg = UnitRegistry::from_units(vec![
            LengthUnit::new("Foot (ft)", "ft", "foot", ConversionFactors::new(0.3048, 3.2808399)),
            LengthUnit::new("Meter (m)", "m", "meter", ConversionFactors::BASE),
        ])
        .unwrap();
        assert_eq!(reg.labels(), vec!["Foot (ft)", "Meter (m)"]);
        assert_eq!(reg.resolve("m").unwrap().label, "Meter (m)");
    }
}
