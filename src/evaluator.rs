//! Potential field evaluation.
//!
//! Every species' stability potential is affine in pH and E, so each species
//! is reduced once to three coefficients and then mapped over the grid.

use crate::error::{PourbaixError, Result};
use crate::grid::SampleGrid;
use crate::params::ChemistryParameters;
use crate::species::{SpeciesDescriptor, SpeciesId, species_set};
use crate::thermo::ThermodynamicConstants;
use log::debug;
use ndarray::{Array2, Zip};
use std::collections::HashMap;
use std::time::Instant;

/// Ψ(pH, E) = offset + per_volt·E + per_ph·pH
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffinePotential {
    pub offset: f64,
    pub per_volt: f64,
    pub per_ph: f64,
}

impl AffinePotential {
    /// Reduce a species' half-reaction to affine coefficients, normalised per Fe atom
    pub fn for_species(
        descriptor: &SpeciesDescriptor,
        params: &ChemistryParameters,
        constants: &ThermodynamicConstants,
        thermal_voltage: f64,
    ) -> Result<Self> {
        let faraday = constants.faraday_c_per_mol;
        let gibbs = constants.gibbs(descriptor.id)?;
        let reaction_gibbs = gibbs - descriptor.waters * constants.gibbs_h2o_j_per_mol;
        let activity_term = params.log_activity(descriptor.activity) * thermal_voltage;

        Ok(Self {
            offset: (reaction_gibbs / faraday + activity_term) / descriptor.fe_atoms,
            per_volt: -descriptor.electrons / descriptor.fe_atoms,
            per_ph: -descriptor.protons * thermal_voltage / descriptor.fe_atoms,
        })
    }

    pub fn at(&self, ph: f64, e: f64) -> f64 {
        self.offset + self.per_volt * e + self.per_ph * ph
    }
}

/// Per-species stability potential fields in species order
#[derive(Debug, Clone)]
pub struct PotentialFields {
    order: Vec<SpeciesId>,
    fields: HashMap<SpeciesId, Array2<f64>>,
}

impl PotentialFields {
    /// Assemble from (species, field) pairs; the pair order becomes the species order.
    pub fn from_fields(pairs: Vec<(SpeciesId, Array2<f64>)>) -> Result<Self> {
        let mut order = Vec::with_capacity(pairs.len());
        let mut fields = HashMap::with_capacity(pairs.len());
        let mut shape: Option<(usize, usize)> = None;

        for (species, field) in pairs {
            let field_shape = field.dim();
            if let Some(expected) = shape {
                if field_shape != expected {
                    return Err(PourbaixError::invalid(format!(
                        "{} field has shape {:?}, expected {:?}",
                        species, field_shape, expected
                    )));
                }
            }
            shape = Some(field_shape);
            if fields.insert(species, field).is_some() {
                return Err(PourbaixError::invalid(format!("{} appears twice", species)));
            }
            order.push(species);
        }

        Ok(Self { order, fields })
    }

    pub fn species(&self) -> &[SpeciesId] {
        &self.order
    }

    pub fn get(&self, species: SpeciesId) -> Option<&Array2<f64>> {
        self.fields.get(&species)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpeciesId, &Array2<f64>)> {
        self.order
            .iter()
            .filter_map(move |id| self.fields.get(id).map(|field| (*id, field)))
    }
}

/// Stability potential of one species at one (pH, E) point
pub fn stability_potential(
    species: SpeciesId,
    params: &ChemistryParameters,
    constants: &ThermodynamicConstants,
    ph: f64,
    e: f64,
) -> Result<f64> {
    params.validate()?;
    let s = params.thermal_voltage(constants);
    let affine = AffinePotential::for_species(species.descriptor(), params, constants, s)?;
    Ok(affine.at(ph, e))
}

/// Evaluate every species of the active phase family over the grid
pub fn evaluate(
    params: &ChemistryParameters,
    grid: &SampleGrid,
    constants: &ThermodynamicConstants,
) -> Result<PotentialFields> {
    params.validate()?;
    constants.validate()?;

    let started = Instant::now();
    let s = params.thermal_voltage(constants);
    if !(s.is_finite() && s > 0.0) {
        return Err(PourbaixError::invalid(format!(
            "thermal voltage {} is not a positive finite number",
            s
        )));
    }

    let mut pairs = Vec::new();
    for species in species_set(params.phase_family) {
        let affine = AffinePotential::for_species(species.descriptor(), params, constants, s)?;
        let field = Zip::from(&grid.ph)
            .and(&grid.e)
            .map_collect(|&ph, &e| affine.at(ph, e));

        if field.iter().any(|v| !v.is_finite()) {
            return Err(PourbaixError::degenerate(format!(
                "{} potential field holds non-finite values",
                species
            )));
        }
        pairs.push((species, field));
    }

    let (rows, cols) = grid.shape();
    debug!(
        "evaluated {} species over {}x{} grid (S = {:.5} V) in {:?}",
        pairs.len(),
        rows,
        cols,
        s,
        started.elapsed()
    );

    PotentialFields::from_fields(pairs)
}
