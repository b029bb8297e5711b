/// Chemistry inputs for one diagram evaluation

use crate::constants::{ABSOLUTE_ZERO_C, DEFAULT_LOG_ACTIVITY, DEFAULT_TEMP_C};
use crate::error::{PourbaixError, Result};
use crate::species::{ActivityRef, PhaseFamily};
use crate::temp_utils::{celsius_to_kelvin, thermal_voltage};
use crate::thermo::ThermodynamicConstants;
use serde::{Deserialize, Serialize};

/// Temperature, dissolved-ion activities and phase family
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChemistryParameters {
    pub temp_c: f64,
    pub log_a_fe2: f64,
    pub log_a_fe3: f64,
    pub phase_family: PhaseFamily,
}

impl Default for ChemistryParameters {
    fn default() -> Self {
        Self {
            temp_c: DEFAULT_TEMP_C,
            log_a_fe2: DEFAULT_LOG_ACTIVITY,
            log_a_fe3: DEFAULT_LOG_ACTIVITY,
            phase_family: PhaseFamily::Oxides,
        }
    }
}

impl ChemistryParameters {
    /// Build and validate in one step
    pub fn new(temp_c: f64, log_a_fe2: f64, log_a_fe3: f64, phase_family: PhaseFamily) -> Result<Self> {
        let params = Self {
            temp_c,
            log_a_fe2,
            log_a_fe3,
            phase_family,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_temperature(self, temp_c: f64) -> Self {
        Self { temp_c, ..self }
    }

    pub fn with_log_activities(self, log_a_fe2: f64, log_a_fe3: f64) -> Self {
        Self {
            log_a_fe2,
            log_a_fe3,
            ..self
        }
    }

    pub fn with_phase_family(self, phase_family: PhaseFamily) -> Self {
        Self {
            phase_family,
            ..self
        }
    }

    /// Rejects temperatures at or below absolute zero and non-finite inputs.
    /// Nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        if !self.temp_c.is_finite() {
            return Err(PourbaixError::invalid(format!(
                "temperature must be finite, got {}",
                self.temp_c
            )));
        }
        if self.temp_c <= ABSOLUTE_ZERO_C {
            return Err(PourbaixError::invalid(format!(
                "temperature {} °C is at or below absolute zero",
                self.temp_c
            )));
        }
        if !self.log_a_fe2.is_finite() {
            return Err(PourbaixError::invalid(format!(
                "log10 a(Fe2+) must be finite, got {}",
                self.log_a_fe2
            )));
        }
        if !self.log_a_fe3.is_finite() {
            return Err(PourbaixError::invalid(format!(
                "log10 a(Fe3+) must be finite, got {}",
                self.log_a_fe3
            )));
        }
        Ok(())
    }

    pub fn temperature_k(&self) -> f64 {
        celsius_to_kelvin(self.temp_c)
    }

    /// S = R·T·ln(10)/F for this temperature
    pub fn thermal_voltage(&self, constants: &ThermodynamicConstants) -> f64 {
        thermal_voltage(
            self.temperature_k(),
            constants.gas_constant_j_per_mol_k,
            constants.faraday_c_per_mol,
        )
    }

    pub fn log_activity(&self, reference: ActivityRef) -> f64 {
        match reference {
            ActivityRef::None => 0.0,
            ActivityRef::Fe2 => self.log_a_fe2,
            ActivityRef::Fe3 => self.log_a_fe3,
        }
    }
}
