//! Utilities for converting between Celsius and Kelvin
//! and for the temperature-dependent Nernst slope.

use crate::constants::{FARADAY_C_PER_MOL, GAS_CONSTANT_J_PER_MOL_K, TO_KELVIN};
use std::f64::consts::LN_10;

/// Converts Celsius to Kelvin.
pub fn celsius_to_kelvin(temp_c: f64) -> f64 {
    temp_c + TO_KELVIN
}

/// Converts Kelvin to Celsius.
pub fn kelvin_to_celsius(temp_k: f64) -> f64 {
    temp_k - TO_KELVIN
}

/// Computes the thermal voltage S = R·T·ln(10)/F in volts.
///
/// S is the potential shift per decade of activity (and per pH unit for
/// one proton per electron).
///
/// # Arguments
/// - `temp_k`: Absolute temperature in Kelvin
/// - `gas_constant`: R in J/(mol·K)
/// - `faraday`: F in C/mol
pub fn thermal_voltage(temp_k: f64, gas_constant: f64, faraday: f64) -> f64 {
    gas_constant * temp_k * LN_10 / faraday
}

/// Convenience function that uses the standard R and F
pub fn thermal_voltage_at_celsius(temp_c: f64) -> f64 {
    thermal_voltage(
        celsius_to_kelvin(temp_c),
        GAS_CONSTANT_J_PER_MOL_K,
        FARADAY_C_PER_MOL,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_celsius_kelvin_conversion() {
        let test_cases = vec![
            (0.0, 273.15),   // Freezing point of water
            (25.0, 298.15),  // Standard state
            (100.0, 373.15), // Boiling point of water
        ];

        for (celsius, expected_kelvin) in test_cases {
            let kelvin = celsius_to_kelvin(celsius);
            let back_to_celsius = kelvin_to_celsius(kelvin);

            assert_abs_diff_eq!(kelvin, expected_kelvin, epsilon = 0.01);
            assert_abs_diff_eq!(back_to_celsius, celsius, epsilon = 0.01);
        }
    }

    #[test]
    fn test_nernst_slope_at_standard_temperature() {
        // 59.16 mV per decade at 25 °C
        assert_abs_diff_eq!(thermal_voltage_at_celsius(25.0), 0.059159, epsilon = 1e-5);
    }

    #[test]
    fn test_thermal_voltage_scales_with_kelvin() {
        let s1 = thermal_voltage(300.0, GAS_CONSTANT_J_PER_MOL_K, FARADAY_C_PER_MOL);
        let s2 = thermal_voltage(600.0, GAS_CONSTANT_J_PER_MOL_K, FARADAY_C_PER_MOL);

        assert_abs_diff_eq!(s2, s1 * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_thermal_voltage_across_ui_range() {
        for temp_c in [0.0, 50.0, 100.0] {
            let s = thermal_voltage_at_celsius(temp_c);
            println!("{:.0} °C -> S = {:.5} V", temp_c, s);
            assert!(s > 0.054 && s < 0.075);
        }
    }
}
