//! One full Pourbaix diagram: evaluate, classify, and derive the
//! presentation data (title, legend, labels, summary).

use crate::classifier::{Classification, classify, classify_phases};
use crate::error::{PourbaixError, Result};
use crate::evaluator::{PotentialFields, evaluate};
use crate::grid::SampleGrid;
use crate::params::ChemistryParameters;
use crate::species::{SpeciesId, precipitation_species};
use crate::thermo::ThermodynamicConstants;
use crate::water::WaterStabilityLines;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

pub const PRECIPITATION_LEGEND: &str = "Precipitation (solid stable)";
pub const NO_PRECIPITATION_LEGEND: &str = "No precipitation (aqueous/metal stable)";

/// How downstream views present the phase map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Binary map: solid-stable region against everything else
    #[default]
    PrecipitationOnly,
    /// Colour per species with a translucent precipitation overlay
    PhaseColors,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::PrecipitationOnly => "precipitation-only",
            RenderMode::PhaseColors => "phase-colors",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = PourbaixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "precipitation-only" | "precipitation" => Ok(RenderMode::PrecipitationOnly),
            "phase-colors" | "phases" => Ok(RenderMode::PhaseColors),
            other => Err(PourbaixError::invalid(format!("unknown render mode '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramOptions {
    pub show_boundaries: bool,
    pub render_mode: RenderMode,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            show_boundaries: true,
            render_mode: RenderMode::PrecipitationOnly,
        }
    }
}

impl DiagramOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boundaries(self, show_boundaries: bool) -> Self {
        Self {
            show_boundaries,
            ..self
        }
    }

    pub fn with_render_mode(self, render_mode: RenderMode) -> Self {
        Self {
            render_mode,
            ..self
        }
    }
}

/// Text label for a precipitation region, placed at its centroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionLabel {
    pub species: SpeciesId,
    pub ph: f64,
    pub e_v: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesArea {
    pub species: SpeciesId,
    pub index: usize,
    pub area_fraction: f64,
    pub solid: bool,
}

/// Serialisable digest of a diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramSummary {
    pub title: String,
    pub params: ChemistryParameters,
    pub thermal_voltage_v: f64,
    pub grid_shape: (usize, usize),
    pub species: Vec<SpeciesArea>,
    pub precipitation_fraction: f64,
    pub labels: Vec<RegionLabel>,
    pub water_lines: WaterStabilityLines,
}

/// Fields, classification and water lines for one parameter set
#[derive(Debug, Clone)]
pub struct PourbaixDiagram {
    pub params: ChemistryParameters,
    pub options: DiagramOptions,
    pub grid: SampleGrid,
    pub thermal_voltage: f64,
    pub fields: PotentialFields,
    pub classification: Classification,
    pub water_lines: WaterStabilityLines,
}

impl PourbaixDiagram {
    pub fn compute(
        params: &ChemistryParameters,
        grid: SampleGrid,
        constants: &ThermodynamicConstants,
        options: DiagramOptions,
    ) -> Result<Self> {
        let started = Instant::now();

        let fields = evaluate(params, &grid, constants)?;
        let order = fields.species().to_vec();
        let precip = precipitation_species(params.phase_family);
        let classification = if options.show_boundaries {
            classify(&fields, &order, &precip)?
        } else {
            classify_phases(&fields, &order, &precip)?
        };
        let thermal_voltage = params.thermal_voltage(constants);
        let water_lines = WaterStabilityLines::new(thermal_voltage);

        let (rows, cols) = grid.shape();
        info!(
            "{} diagram at {} °C on {}x{} grid: {:.1}% precipitation ({:?})",
            params.phase_family,
            params.temp_c,
            rows,
            cols,
            classification.precipitation_fraction() * 100.0,
            started.elapsed()
        );

        Ok(Self {
            params: *params,
            options,
            grid,
            thermal_voltage,
            fields,
            classification,
            water_lines,
        })
    }

    /// Standard constants and default options
    pub fn with_defaults(params: &ChemistryParameters, grid: SampleGrid) -> Result<Self> {
        Self::compute(params, grid, ThermodynamicConstants::standard(), DiagramOptions::default())
    }

    pub fn species(&self) -> &[SpeciesId] {
        &self.classification.species
    }

    pub fn title(&self) -> String {
        format!(
            "Fe–H2O Pourbaix Diagram @ {}°C, log a(Fe2+)={:.1}, log a(Fe3+)={:.1}",
            self.params.temp_c, self.params.log_a_fe2, self.params.log_a_fe3
        )
    }

    /// Legend entries; only the precipitation-only view carries a legend
    pub fn legend(&self) -> Vec<&'static str> {
        match self.options.render_mode {
            RenderMode::PrecipitationOnly => vec![PRECIPITATION_LEGEND, NO_PRECIPITATION_LEGEND],
            RenderMode::PhaseColors => Vec::new(),
        }
    }

    /// Centroid labels for every solid species with a non-empty region
    pub fn precipitation_labels(&self) -> Vec<RegionLabel> {
        self.classification
            .precipitation_indices
            .iter()
            .filter_map(|&index| {
                self.classification
                    .region_centroid(index, &self.grid)
                    .map(|(ph, e_v)| RegionLabel {
                        species: self.classification.species[index],
                        ph,
                        e_v,
                    })
            })
            .collect()
    }

    /// Labels the active render mode shows
    pub fn labels(&self) -> Vec<RegionLabel> {
        match self.options.render_mode {
            RenderMode::PrecipitationOnly => self.precipitation_labels(),
            RenderMode::PhaseColors => Vec::new(),
        }
    }

    /// Stable species at the grid cell nearest to (pH, E)
    pub fn stable_species_near(&self, ph: f64, e: f64) -> Option<SpeciesId> {
        self.grid
            .nearest_cell(ph, e)
            .map(|(row, col)| self.classification.species_at(row, col))
    }

    pub fn summary(&self) -> DiagramSummary {
        let precip = &self.classification.precipitation_indices;
        let species = self
            .species()
            .iter()
            .enumerate()
            .map(|(index, id)| SpeciesArea {
                species: *id,
                index,
                area_fraction: self.classification.area_fraction(index),
                solid: precip.contains(&index),
            })
            .collect();

        DiagramSummary {
            title: self.title(),
            params: self.params,
            thermal_voltage_v: self.thermal_voltage,
            grid_shape: self.grid.shape(),
            species,
            precipitation_fraction: self.classification.precipitation_fraction(),
            labels: self.labels(),
            water_lines: self.water_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSpec;
    use crate::species::PhaseFamily;
    use approx::assert_abs_diff_eq;

    fn diagram(family: PhaseFamily, options: DiagramOptions) -> PourbaixDiagram {
        let params = ChemistryParameters::default().with_phase_family(family);
        let grid = SampleGrid::new(GridSpec::with_resolution(120)).unwrap();
        PourbaixDiagram::compute(&params, grid, ThermodynamicConstants::standard(), options).unwrap()
    }

    #[test]
    fn test_title_formatting() {
        let d = diagram(PhaseFamily::Oxides, DiagramOptions::default());
        assert_eq!(
            d.title(),
            "Fe–H2O Pourbaix Diagram @ 25°C, log a(Fe2+)=-6.0, log a(Fe3+)=-6.0"
        );

        let params = ChemistryParameters::default()
            .with_temperature(60.0)
            .with_log_activities(-4.0, -5.5);
        let grid = SampleGrid::new(GridSpec::with_resolution(10)).unwrap();
        let d = PourbaixDiagram::with_defaults(&params, grid).unwrap();
        assert_eq!(
            d.title(),
            "Fe–H2O Pourbaix Diagram @ 60°C, log a(Fe2+)=-4.0, log a(Fe3+)=-5.5"
        );
    }

    #[test]
    fn test_boundaries_follow_toggle() {
        let with = diagram(PhaseFamily::Oxides, DiagramOptions::default());
        assert_eq!(with.classification.boundaries.len(), 15);

        let without = diagram(PhaseFamily::Oxides, DiagramOptions::new().with_boundaries(false));
        assert!(without.classification.boundaries.is_empty());
        assert_eq!(with.classification.phase_map, without.classification.phase_map);
    }

    #[test]
    fn test_labels_only_in_precipitation_mode() {
        let d = diagram(PhaseFamily::Oxides, DiagramOptions::default());
        let labels = d.labels();
        assert!(!labels.is_empty());
        for label in &labels {
            assert!(matches!(label.species, SpeciesId::Fe3O4 | SpeciesId::Fe2O3));
            assert!((0.0..=14.0).contains(&label.ph));
            assert!((-2.5..=2.5).contains(&label.e_v));
        }
        assert_eq!(d.legend(), vec![PRECIPITATION_LEGEND, NO_PRECIPITATION_LEGEND]);

        let colourful = diagram(
            PhaseFamily::Oxides,
            DiagramOptions::new().with_render_mode(RenderMode::PhaseColors),
        );
        assert!(colourful.labels().is_empty());
        assert!(colourful.legend().is_empty());
        assert_eq!(colourful.precipitation_labels(), labels);
    }

    #[test]
    fn test_summary_fractions_add_up() {
        let d = diagram(PhaseFamily::Hydroxides, DiagramOptions::default());
        let summary = d.summary();
        let total: f64 = summary.species.iter().map(|s| s.area_fraction).sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);

        let solid: f64 = summary.species.iter().filter(|s| s.solid).map(|s| s.area_fraction).sum();
        assert_abs_diff_eq!(solid, summary.precipitation_fraction, epsilon = 1e-9);
        assert_eq!(summary.grid_shape, (120, 120));
    }

    #[test]
    fn test_summary_serializes() {
        let d = diagram(PhaseFamily::Oxides, DiagramOptions::default());
        let json = serde_json::to_string(&d.summary()).unwrap();
        assert!(json.contains("\"Fe2O3\""));
        assert!(json.contains("\"phase_family\":\"Oxides\""));
    }

    #[test]
    fn test_render_mode_parsing() {
        assert_eq!("phase-colors".parse::<RenderMode>().unwrap(), RenderMode::PhaseColors);
        assert_eq!(
            "precipitation-only".parse::<RenderMode>().unwrap(),
            RenderMode::PrecipitationOnly
        );
        assert!("sepia".parse::<RenderMode>().is_err());
    }

    #[test]
    fn test_stable_species_near() {
        let d = diagram(PhaseFamily::Oxides, DiagramOptions::default());
        assert_eq!(d.stable_species_near(10.0, 1.0), Some(SpeciesId::Fe2O3));
        assert_eq!(d.stable_species_near(7.0, -2.0), Some(SpeciesId::Fe));
        assert_eq!(d.stable_species_near(20.0, 0.0), None);
    }
}
