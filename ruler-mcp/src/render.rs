//! Text rendering for conversion results
//!
//! Converted values are shown with a fixed number of decimals. The input
//! value is echoed as the user typed it would usually be read back.

use ruler_units::ConversionResult;

/// Decimal places for converted values
pub const DISPLAY_DECIMALS: usize = 4;

pub const SAME_UNIT_MESSAGE: &str = "From Unit and To Unit are the same. No conversion needed.";

pub fn format_value(value: f64) -> String {
    format!("{:.*}", DISPLAY_DECIMALS, value)
}

/// Echo an input value, keeping a trailing `.0` on whole numbers
///
/// Very large and very small magnitudes switch to scientific notation with
/// a signed, two-digit exponent (`1e+20`, `1e-05`).
pub fn format_input(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1e16 || (magnitude != 0.0 && magnitude < 1e-4) {
        scientific(value)
    } else if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn scientific(value: f64) -> String {
    let raw = format!("{:e}", value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => raw,
    }
}

/// "1.0 Meter (m) = 100.0000 Centimeter (cm)"
pub fn single_line(value: f64, from_unit: &str, result: f64, to_unit: &str) -> String {
    format!(
        "{} {} = {} {}",
        format_input(value),
        from_unit,
        format_value(result),
        to_unit
    )
}

/// Heading plus a markdown table of every converted value
pub fn results_table(value: f64, from_unit: &str, results: &[ConversionResult]) -> String {
    let mut output = format!(
        "Converted {} {} to all other units:\n\n",
        format_input(value),
        from_unit
    );
    output.push_str("| Target Unit | Converted Value |\n");
    output.push_str("|-------------|-----------------|\n");
    for result in results {
        output.push_str(&format!("| {} | {} |\n", result.unit, format_value(result.value)));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_pads_to_four_places() {
        assert_eq!(format_value(100.0), "100.0000");
        assert_eq!(format_value(0.001), "0.0010");
        assert_eq!(format_value(39.3700787), "39.3701");
    }

    #[test]
    fn test_format_input() {
        assert_eq!(format_input(1.0), "1.0");
        assert_eq!(format_input(0.0), "0.0");
        assert_eq!(format_input(2.5), "2.5");
        assert_eq!(format_input(123456.75), "123456.75");
    }

    #[test]
    fn test_format_input_scientific() {
        assert_eq!(format_input(1e20), "1e+20");
        assert_eq!(format_input(1e308), "1e+308");
        assert_eq!(format_input(1.5e16), "1.5e+16");
        assert_eq!(format_input(1e-5), "1e-05");
        assert_eq!(format_input(2.5e-7), "2.5e-07");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(
            single_line(1.0, "Meter (m)", 100.0, "Centimeter (cm)"),
            "1.0 Meter (m) = 100.0000 Centimeter (cm)"
        );
    }

    #[test]
    fn test_results_table() {
        let results = vec![
            ConversionResult { unit: "Centimeter (cm)".to_string(), value: 100.0 },
            ConversionResult { unit: "Kilometer (km)".to_string(), value: 0.001 },
        ];
        let table = results_table(1.0, "Meter (m)", &results);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Converted 1.0 Meter (m) to all other units:");
        assert_eq!(lines[2], "| Target Unit | Converted Value |");
        assert_eq!(lines[4], "| Centimeter (cm) | 100.0000 |");
        assert_eq!(lines[5], "| Kilometer (km) | 0.0010 |");
        assert_eq!(lines.len(), 6);
    }
}
