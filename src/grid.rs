/// Rectangular (pH, E) sample grid

use crate::constants::{
    DEFAULT_RESOLUTION, MIN_RESOLUTION, PH_MAX, PH_MIN, POTENTIAL_MAX_V, POTENTIAL_MIN_V,
};
use crate::error::{PourbaixError, Result};
use crate::math_utils::{inverse_lerp, linspace};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Bounds and sample counts of the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub ph_min: f64,
    pub ph_max: f64,
    pub e_min_v: f64,
    pub e_max_v: f64,
    pub ph_samples: usize,
    pub e_samples: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::with_resolution(DEFAULT_RESOLUTION)
    }
}

impl GridSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard bounds (pH 0..14, E -2.5..2.5 V) with `resolution` samples per axis
    pub fn with_resolution(resolution: usize) -> Self {
        Self {
            ph_min: PH_MIN,
            ph_max: PH_MAX,
            e_min_v: POTENTIAL_MIN_V,
            e_max_v: POTENTIAL_MAX_V,
            ph_samples: resolution,
            e_samples: resolution,
        }
    }

    pub fn with_bounds(self, ph_min: f64, ph_max: f64, e_min_v: f64, e_max_v: f64) -> Self {
        Self {
            ph_min,
            ph_max,
            e_min_v,
            e_max_v,
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        let bounds = [self.ph_min, self.ph_max, self.e_min_v, self.e_max_v];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(PourbaixError::invalid("grid bounds must be finite"));
        }
        if self.ph_min >= self.ph_max {
            return Err(PourbaixError::invalid(format!(
                "pH bounds inverted or empty: [{}, {}]",
                self.ph_min, self.ph_max
            )));
        }
        if self.e_min_v >= self.e_max_v {
            return Err(PourbaixError::invalid(format!(
                "potential bounds inverted or empty: [{}, {}]",
                self.e_min_v, self.e_max_v
            )));
        }
        if self.ph_samples < MIN_RESOLUTION || self.e_samples < MIN_RESOLUTION {
            return Err(PourbaixError::invalid(format!(
                "grid needs at least {} samples per axis, got {}x{}",
                MIN_RESOLUTION, self.ph_samples, self.e_samples
            )));
        }
        Ok(())
    }
}

/// Meshgrid of sample coordinates. Rows run along E (row 0 = e_min),
/// columns along pH (column 0 = ph_min).
#[derive(Debug, Clone)]
pub struct SampleGrid {
    pub spec: GridSpec,
    pub ph_axis: Vec<f64>,
    pub e_axis: Vec<f64>,
    pub ph: Array2<f64>,
    pub e: Array2<f64>,
}

impl SampleGrid {
    pub fn new(spec: GridSpec) -> Result<Self> {
        spec.validate()?;

        let ph_axis = linspace(spec.ph_min, spec.ph_max, spec.ph_samples);
        let e_axis = linspace(spec.e_min_v, spec.e_max_v, spec.e_samples);
        let shape = (e_axis.len(), ph_axis.len());

        let ph = Array2::from_shape_fn(shape, |(_, col)| ph_axis[col]);
        let e = Array2::from_shape_fn(shape, |(row, _)| e_axis[row]);

        Ok(Self {
            spec,
            ph_axis,
            e_axis,
            ph,
            e,
        })
    }

    pub fn with_resolution(resolution: usize) -> Result<Self> {
        Self::new(GridSpec::with_resolution(resolution))
    }

    /// (rows, cols) = (E samples, pH samples)
    pub fn shape(&self) -> (usize, usize) {
        (self.e_axis.len(), self.ph_axis.len())
    }

    pub fn point(&self, row: usize, col: usize) -> (f64, f64) {
        (self.ph_axis[col], self.e_axis[row])
    }

    /// Nearest grid cell to a coordinate, or None outside the bounds
    pub fn nearest_cell(&self, ph: f64, e: f64) -> Option<(usize, usize)> {
        let spec = &self.spec;
        if !(spec.ph_min..=spec.ph_max).contains(&ph) || !(spec.e_min_v..=spec.e_max_v).contains(&e) {
            return None;
        }
        let col = (inverse_lerp(spec.ph_min, spec.ph_max, ph) * (spec.ph_samples - 1) as f64).round();
        let row = (inverse_lerp(spec.e_min_v, spec.e_max_v, e) * (spec.e_samples - 1) as f64).round();
        Some((row as usize, col as usize))
    }
}
