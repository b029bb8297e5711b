pub mod classifier;
pub mod config;
pub mod constants;
pub mod diagram;
pub mod error;
pub mod evaluator;
pub mod grid;
pub mod math_utils;
pub mod params;
pub mod species;
pub mod temp_utils;
pub mod thermo;
pub mod view;
pub mod water;

pub use classifier::{Classification, PhaseBoundary, classify, classify_phases};
pub use config::DiagramConfig;
pub use diagram::{DiagramOptions, DiagramSummary, PourbaixDiagram, RenderMode};
pub use error::{PourbaixError, Result};
pub use evaluator::{PotentialFields, evaluate, stability_potential};
pub use grid::{GridSpec, SampleGrid};
pub use params::ChemistryParameters;
pub use species::{PhaseFamily, SpeciesId, precipitation_species, species_set};
pub use thermo::ThermodynamicConstants;
pub use water::WaterStabilityLines;
