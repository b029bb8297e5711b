//! Bundled diagram configuration, exchanged as JSON strings.

use crate::diagram::{DiagramOptions, PourbaixDiagram};
use crate::error::Result;
use crate::grid::{GridSpec, SampleGrid};
use crate::params::ChemistryParameters;
use crate::thermo::ThermodynamicConstants;
use serde::{Deserialize, Serialize};

/// Everything needed to compute one diagram except the constants table
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub chemistry: ChemistryParameters,
    pub grid: GridSpec,
    pub options: DiagramOptions,
}

impl DiagramConfig {
    pub fn new(chemistry: ChemistryParameters, grid: GridSpec, options: DiagramOptions) -> Self {
        Self {
            chemistry,
            grid,
            options,
        }
    }

    /// Parse and validate; missing sections and fields take their defaults
    pub fn from_json_str(json_str: &str) -> Result<Self> {
        let config: DiagramConfig = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.chemistry.validate()?;
        self.grid.validate()
    }

    pub fn build(&self, constants: &ThermodynamicConstants) -> Result<PourbaixDiagram> {
        self.validate()?;
        let grid = SampleGrid::new(self.grid)?;
        PourbaixDiagram::compute(&self.chemistry, grid, constants, self.options)
    }
}
