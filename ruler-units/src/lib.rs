//! Ruler Units - Length unit registry and conversion
//!
//! Every unit carries a pair of factors relative to the meter. Converting a
//! value multiplies it into meters and then out of meters into the target.
//!
//! Supported units, in display order:
//! - Meter (m)
//! - Centimeter (cm)
//! - Kilometer (km)
//! - Inch (in)
//! - Foot (ft)

mod convert;
mod unit;
mod units;

pub use convert::{convert, convert_to_all, ConversionOutcome, ConversionRequest, ConversionResult};
pub use ruler_core::{Result, RulerError};
pub use unit::{ConversionFactors, LengthUnit};
pub use units::{UnitRegistry, UNITS};

/// Label of the base unit every conversion is routed through
pub const BASE_UNIT: &str = "Meter (m)";
