// src/species.rs - Fe–H2O species and their half-reaction stoichiometry

use crate::error::PourbaixError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpeciesId {
    #[serde(rename = "Fe")]
    Fe,
    #[serde(rename = "Fe2+")]
    Fe2Plus,
    #[serde(rename = "Fe3+")]
    Fe3Plus,
    #[serde(rename = "Fe(OH)2")]
    FeOH2,
    #[serde(rename = "Fe(OH)3")]
    FeOH3,
    #[serde(rename = "Fe3O4")]
    Fe3O4,
    #[serde(rename = "Fe2O3")]
    Fe2O3,
    #[serde(rename = "HFeO2-")]
    HFeO2Minus,
}

impl SpeciesId {
    pub const COUNT: usize = 8;

    pub const ALL: [SpeciesId; SpeciesId::COUNT] = [
        SpeciesId::Fe,
        SpeciesId::Fe2Plus,
        SpeciesId::Fe3Plus,
        SpeciesId::FeOH2,
        SpeciesId::FeOH3,
        SpeciesId::Fe3O4,
        SpeciesId::Fe2O3,
        SpeciesId::HFeO2Minus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeciesId::Fe => "Fe",
            SpeciesId::Fe2Plus => "Fe2+",
            SpeciesId::Fe3Plus => "Fe3+",
            SpeciesId::FeOH2 => "Fe(OH)2",
            SpeciesId::FeOH3 => "Fe(OH)3",
            SpeciesId::Fe3O4 => "Fe3O4",
            SpeciesId::Fe2O3 => "Fe2O3",
            SpeciesId::HFeO2Minus => "HFeO2-",
        }
    }

    /// Single character used by the terminal view
    pub fn glyph(&self) -> char {
        match self {
            SpeciesId::Fe => 'F',
            SpeciesId::Fe2Plus => '2',
            SpeciesId::Fe3Plus => '3',
            SpeciesId::FeOH2 => 'h',
            SpeciesId::FeOH3 => 'H',
            SpeciesId::Fe3O4 => 'm',
            SpeciesId::Fe2O3 => 'M',
            SpeciesId::HFeO2Minus => '-',
        }
    }

    pub fn descriptor(&self) -> &'static SpeciesDescriptor {
        &SPECIES_TABLE[self.table_index()]
    }

    fn table_index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpeciesId {
    type Err = PourbaixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpeciesId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| PourbaixError::invalid(format!("unknown species '{}'", s)))
    }
}

/// Which solid pair takes part in the stability comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PhaseFamily {
    #[default]
    Oxides,
    Hydroxides,
}

impl PhaseFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseFamily::Oxides => "Oxides only",
            PhaseFamily::Hydroxides => "Hydroxides only",
        }
    }
}

impl fmt::Display for PhaseFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhaseFamily {
    type Err = PourbaixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oxides" | "oxides only" => Ok(PhaseFamily::Oxides),
            "hydroxides" | "hydroxides only" => Ok(PhaseFamily::Hydroxides),
            other => Err(PourbaixError::invalid(format!("unknown phase family '{}'", other))),
        }
    }
}

/// Dissolved ion whose log-activity enters a species' potential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityRef {
    None,
    Fe2,
    Fe3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Always,
    Only(PhaseFamily),
}

/// Stoichiometry of the balanced half-reaction that forms one species from Fe.
///
/// Potential: ((ΔGf - waters·ΔGf(H2O))/F + log_a·S - electrons·E - protons·S·pH) / fe_atoms
#[derive(Debug, Clone, Copy)]
pub struct SpeciesDescriptor {
    pub id: SpeciesId,
    pub waters: f64,
    pub electrons: f64,
    pub protons: f64,
    pub activity: ActivityRef,
    pub fe_atoms: f64,
    pub availability: Availability,
    pub solid: bool,
}

impl SpeciesDescriptor {
    pub fn applies_to(&self, family: PhaseFamily) -> bool {
        match self.availability {
            Availability::Always => true,
            Availability::Only(f) => f == family,
        }
    }
}

/// Species descriptors, in SpeciesId order. Filtering this table by family
/// yields the species order used for phase indices.
pub static SPECIES_TABLE: [SpeciesDescriptor; SpeciesId::COUNT] = [
    SpeciesDescriptor {
        id: SpeciesId::Fe,
        waters: 0.0,
        electrons: 0.0,
        protons: 0.0,
        activity: ActivityRef::None,
        fe_atoms: 1.0,
        availability: Availability::Always,
        solid: false,
    },
    SpeciesDescriptor {
        id: SpeciesId::Fe2Plus,
        waters: 0.0,
        electrons: 2.0,
        protons: 0.0,
        activity: ActivityRef::Fe2,
        fe_atoms: 1.0,
        availability: Availability::Always,
        solid: false,
    },
    SpeciesDescriptor {
        id: SpeciesId::Fe3Plus,
        waters: 0.0,
        electrons: 3.0,
        protons: 0.0,
        activity: ActivityRef::Fe3,
        fe_atoms: 1.0,
        availability: Availability::Always,
        solid: false,
    },
    SpeciesDescriptor {
        id: SpeciesId::FeOH2,
        waters: 2.0,
        electrons: 2.0,
        protons: 2.0,
        activity: ActivityRef::Fe2,
        fe_atoms: 1.0,
        availability: Availability::Only(PhaseFamily::Hydroxides),
        solid: true,
    },
    SpeciesDescriptor {
        id: SpeciesId::FeOH3,
        waters: 3.0,
        electrons: 3.0,
        protons: 3.0,
        activity: ActivityRef::Fe3,
        fe_atoms: 1.0,
        availability: Availability::Only(PhaseFamily::Hydroxides),
        solid: true,
    },
    SpeciesDescriptor {
        id: SpeciesId::Fe3O4,
        waters: 4.0,
        electrons: 8.0,
        protons: 8.0,
        activity: ActivityRef::None,
        fe_atoms: 3.0,
        availability: Availability::Only(PhaseFamily::Oxides),
        solid: true,
    },
    SpeciesDescriptor {
        id: SpeciesId::Fe2O3,
        waters: 3.0,
        electrons: 6.0,
        protons: 6.0,
        activity: ActivityRef::None,
        fe_atoms: 2.0,
        availability: Availability::Only(PhaseFamily::Oxides),
        solid: true,
    },
    SpeciesDescriptor {
        id: SpeciesId::HFeO2Minus,
        waters: 2.0,
        electrons: 2.0,
        protons: 3.0,
        activity: ActivityRef::Fe2,
        fe_atoms: 1.0,
        availability: Availability::Always,
        solid: false,
    },
];

/// Ordered species universe for a phase family
pub fn species_set(family: PhaseFamily) -> Vec<SpeciesId> {
    SPECIES_TABLE
        .iter()
        .filter(|d| d.applies_to(family))
        .map(|d| d.id)
        .collect()
}

/// The two solids whose stability marks precipitation
pub fn precipitation_species(family: PhaseFamily) -> Vec<SpeciesId> {
    SPECIES_TABLE
        .iter()
        .filter(|d| d.solid && d.applies_to(family))
        .map(|d| d.id)
        .collect()
}
