// src/thermo.rs - Read-only thermodynamic data for the Fe–H2O system

use crate::constants::*;
use crate::error::{PourbaixError, Result};
use crate::species::SpeciesId;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Faraday and gas constants plus standard Gibbs energies of formation.
///
/// Built once and passed by reference into the evaluator; nothing mutates it
/// after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermodynamicConstants {
    pub faraday_c_per_mol: f64,
    pub gas_constant_j_per_mol_k: f64,
    pub gibbs_h2o_j_per_mol: f64,
    pub gibbs_j_per_mol: BTreeMap<SpeciesId, f64>,
}

pub static STANDARD_CONSTANTS: Lazy<ThermodynamicConstants> = Lazy::new(|| {
    use SpeciesId::*;
    let mut gibbs = BTreeMap::new();

    gibbs.insert(Fe, GIBBS_FE_J_PER_MOL);
    gibbs.insert(Fe2Plus, GIBBS_FE2_J_PER_MOL);
    gibbs.insert(Fe3Plus, GIBBS_FE3_J_PER_MOL);
    gibbs.insert(FeOH2, GIBBS_FE_OH_2_J_PER_MOL);
    gibbs.insert(FeOH3, GIBBS_FE_OH_3_J_PER_MOL);
    gibbs.insert(Fe3O4, GIBBS_FE3O4_J_PER_MOL);
    gibbs.insert(Fe2O3, GIBBS_FE2O3_J_PER_MOL);
    gibbs.insert(HFeO2Minus, GIBBS_HFEO2_J_PER_MOL);

    ThermodynamicConstants {
        faraday_c_per_mol: FARADAY_C_PER_MOL,
        gas_constant_j_per_mol_k: GAS_CONSTANT_J_PER_MOL_K,
        gibbs_h2o_j_per_mol: GIBBS_H2O_J_PER_MOL,
        gibbs_j_per_mol: gibbs,
    }
});

impl Default for ThermodynamicConstants {
    fn default() -> Self {
        STANDARD_CONSTANTS.clone()
    }
}

impl ThermodynamicConstants {
    /// The process-wide standard table
    pub fn standard() -> &'static ThermodynamicConstants {
        &STANDARD_CONSTANTS
    }

    /// Replace one species' Gibbs energy, keeping everything else
    pub fn with_gibbs(mut self, species: SpeciesId, gibbs_j_per_mol: f64) -> Self {
        self.gibbs_j_per_mol.insert(species, gibbs_j_per_mol);
        self
    }

    /// Parse a full table from JSON and validate it.
    ///
    /// Keys of `gibbs_j_per_mol` use chemical names ("Fe2+", "Fe(OH)3", ...).
    pub fn from_json_str(json_str: &str) -> Result<Self> {
        let constants: ThermodynamicConstants = serde_json::from_str(json_str)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn gibbs(&self, species: SpeciesId) -> Result<f64> {
        self.gibbs_j_per_mol.get(&species).copied().ok_or_else(|| {
            PourbaixError::invalid(format!("no Gibbs energy of formation for {}", species))
        })
    }

    /// Every species present, every value finite, F and R positive
    pub fn validate(&self) -> Result<()> {
        if !(self.faraday_c_per_mol.is_finite() && self.faraday_c_per_mol > 0.0) {
            return Err(PourbaixError::invalid(format!(
                "Faraday constant must be positive, got {}",
                self.faraday_c_per_mol
            )));
        }
        if !(self.gas_constant_j_per_mol_k.is_finite() && self.gas_constant_j_per_mol_k > 0.0) {
            return Err(PourbaixError::invalid(format!(
                "gas constant must be positive, got {}",
                self.gas_constant_j_per_mol_k
            )));
        }
        if !self.gibbs_h2o_j_per_mol.is_finite() {
            return Err(PourbaixError::invalid("Gibbs energy of water is not finite"));
        }
        for species in SpeciesId::ALL {
            let g = self.gibbs(species)?;
            if !g.is_finite() {
                return Err(PourbaixError::invalid(format!(
                    "Gibbs energy of {} is not finite",
                    species
                )));
            }
        }
        Ok(())
    }
}
