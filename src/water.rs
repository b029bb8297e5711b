/// Water stability lines: O2/H2O above, H+/H2 below

use crate::constants::{WATER_HYDROGEN_INTERCEPT_V, WATER_OXYGEN_INTERCEPT_V};
use crate::params::ChemistryParameters;
use crate::thermo::ThermodynamicConstants;
use serde::{Deserialize, Serialize};

/// Both lines share the slope -S; they depend on temperature only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterStabilityLines {
    pub slope_v_per_ph: f64,
    pub oxygen_intercept_v: f64,
    pub hydrogen_intercept_v: f64,
}

impl WaterStabilityLines {
    pub fn new(thermal_voltage: f64) -> Self {
        Self {
            slope_v_per_ph: -thermal_voltage,
            oxygen_intercept_v: WATER_OXYGEN_INTERCEPT_V,
            hydrogen_intercept_v: WATER_HYDROGEN_INTERCEPT_V,
        }
    }

    pub fn for_params(params: &ChemistryParameters, constants: &ThermodynamicConstants) -> Self {
        Self::new(params.thermal_voltage(constants))
    }

    /// Potential above which water oxidises to O2
    pub fn oxygen_potential(&self, ph: f64) -> f64 {
        self.oxygen_intercept_v + self.slope_v_per_ph * ph
    }

    /// Potential below which water reduces to H2
    pub fn hydrogen_potential(&self, ph: f64) -> f64 {
        self.hydrogen_intercept_v + self.slope_v_per_ph * ph
    }

    pub fn is_water_stable(&self, ph: f64, e: f64) -> bool {
        e <= self.oxygen_potential(ph) && e >= self.hydrogen_potential(ph)
    }

    /// (pH, E_O2, E_H2) for each pH sample
    pub fn sample(&self, ph_axis: &[f64]) -> Vec<(f64, f64, f64)> {
        ph_axis
            .iter()
            .map(|&ph| (ph, self.oxygen_potential(ph), self.hydrogen_potential(ph)))
            .collect()
    }
}
