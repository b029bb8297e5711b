// Physical constants for the Fe–H2O system
pub const FARADAY_C_PER_MOL: f64 = 96485.3;
pub const GAS_CONSTANT_J_PER_MOL_K: f64 = 8.31446;
pub const TO_KELVIN: f64 = 273.15;
pub const ABSOLUTE_ZERO_C: f64 = -TO_KELVIN;

// Standard Gibbs energies of formation (J/mol)
pub const GIBBS_H2O_J_PER_MOL: f64 = -237130.0;
pub const GIBBS_FE_J_PER_MOL: f64 = 0.0;
pub const GIBBS_FE2_J_PER_MOL: f64 = -78900.0;
pub const GIBBS_FE3_J_PER_MOL: f64 = -4700.0;
pub const GIBBS_FE_OH_2_J_PER_MOL: f64 = -486500.0;
pub const GIBBS_FE_OH_3_J_PER_MOL: f64 = -696500.0;
pub const GIBBS_FE3O4_J_PER_MOL: f64 = -1015400.0;
pub const GIBBS_FE2O3_J_PER_MOL: f64 = -742200.0;
pub const GIBBS_HFEO2_J_PER_MOL: f64 = -379000.0;

// Water stability: O2/H2O at 1.229 V, H+/H2 at 0 V (SHE), both sloping by -S per pH unit
pub const WATER_OXYGEN_INTERCEPT_V: f64 = 1.229;
pub const WATER_HYDROGEN_INTERCEPT_V: f64 = 0.0;

// default diagram settings:
pub const DEFAULT_TEMP_C: f64 = 25.0;
pub const DEFAULT_LOG_ACTIVITY: f64 = -6.0;
pub const PH_MIN: f64 = 0.0;
pub const PH_MAX: f64 = 14.0;
pub const POTENTIAL_MIN_V: f64 = -2.5;
pub const POTENTIAL_MAX_V: f64 = 2.5;
pub const DEFAULT_RESOLUTION: usize = 600;
pub const MIN_RESOLUTION: usize = 2;
