//! Phase classification: which species is most stable at each grid cell.

use crate::error::{PourbaixError, Result};
use crate::evaluator::PotentialFields;
use crate::grid::SampleGrid;
use crate::species::SpeciesId;
use log::{debug, warn};
use ndarray::{Array2, Array3, ArrayView2, Axis, Zip, stack};
use std::time::Instant;

/// Difference field between two species; its zero level set is the
/// candidate boundary between them.
#[derive(Debug, Clone)]
pub struct PhaseBoundary {
    pub lower: usize,
    pub upper: usize,
    pub species: (SpeciesId, SpeciesId),
    pub difference: Array2<f64>,
}

impl PhaseBoundary {
    /// True when the two fields are identical over the whole grid
    pub fn is_degenerate(&self) -> bool {
        self.difference.iter().all(|&d| d == 0.0)
    }

    /// Zero-crossings of the difference along grid edges, linearly
    /// interpolated to (pH, E) coordinates. Empty when `grid` does not
    /// match the difference array.
    pub fn zero_crossings(&self, grid: &SampleGrid) -> Vec<(f64, f64)> {
        let (rows, cols) = self.difference.dim();
        let mut points = Vec::new();
        if grid.shape() != (rows, cols) {
            return points;
        }

        for row in 0..rows {
            for col in 0..cols {
                let d0 = self.difference[[row, col]];
                let (ph0, e0) = grid.point(row, col);
                if d0 == 0.0 {
                    points.push((ph0, e0));
                    continue;
                }
                if col + 1 < cols {
                    let d1 = self.difference[[row, col + 1]];
                    if d0 * d1 < 0.0 {
                        let t = d0 / (d0 - d1);
                        let (ph1, _) = grid.point(row, col + 1);
                        points.push((ph0 + (ph1 - ph0) * t, e0));
                    }
                }
                if row + 1 < rows {
                    let d1 = self.difference[[row + 1, col]];
                    if d0 * d1 < 0.0 {
                        let t = d0 / (d0 - d1);
                        let (_, e1) = grid.point(row + 1, col);
                        points.push((ph0, e0 + (e1 - e0) * t));
                    }
                }
            }
        }
        points
    }

    /// Sign change between (row, col) and its right or upper neighbour
    pub fn crosses_at(&self, row: usize, col: usize) -> bool {
        let (rows, cols) = self.difference.dim();
        let d0 = self.difference[[row, col]];
        let right = col + 1 < cols && changes_sign(d0, self.difference[[row, col + 1]]);
        let up = row + 1 < rows && changes_sign(d0, self.difference[[row + 1, col]]);
        right || up
    }
}

fn changes_sign(a: f64, b: f64) -> bool {
    (a <= 0.0 && b > 0.0) || (a > 0.0 && b <= 0.0)
}

/// Output of the classifier
#[derive(Debug, Clone)]
pub struct Classification {
    pub species: Vec<SpeciesId>,
    pub phase_map: Array2<usize>,
    pub precipitation_mask: Array2<bool>,
    pub precipitation_indices: Vec<usize>,
    pub boundaries: Vec<PhaseBoundary>,
}

impl Classification {
    pub fn species_at(&self, row: usize, col: usize) -> SpeciesId {
        self.species[self.phase_map[[row, col]]]
    }

    pub fn index_of(&self, species: SpeciesId) -> Option<usize> {
        self.species.iter().position(|s| *s == species)
    }

    pub fn cell_count(&self) -> usize {
        self.phase_map.len()
    }

    /// Share of grid cells where species `index` is stable
    pub fn area_fraction(&self, index: usize) -> f64 {
        if self.phase_map.is_empty() {
            return 0.0;
        }
        let count = self.phase_map.iter().filter(|&&i| i == index).count();
        count as f64 / self.cell_count() as f64
    }

    pub fn precipitation_fraction(&self) -> f64 {
        if self.precipitation_mask.is_empty() {
            return 0.0;
        }
        let count = self.precipitation_mask.iter().filter(|&&m| m).count();
        count as f64 / self.cell_count() as f64
    }

    /// Mean (pH, E) of the cells where species `index` is stable; `None` when
    /// the region is empty or `grid` does not match the phase map.
    pub fn region_centroid(&self, index: usize, grid: &SampleGrid) -> Option<(f64, f64)> {
        if grid.shape() != self.phase_map.dim() {
            return None;
        }
        let mut count = 0usize;
        let mut sum_ph = 0.0;
        let mut sum_e = 0.0;
        for ((row, col), &i) in self.phase_map.indexed_iter() {
            if i == index {
                let (ph, e) = grid.point(row, col);
                sum_ph += ph;
                sum_e += e;
                count += 1;
            }
        }
        if count == 0 {
            None
        } else {
            Some((sum_ph / count as f64, sum_e / count as f64))
        }
    }
}

fn stacked_fields(fields: &PotentialFields, species_order: &[SpeciesId]) -> Result<Array3<f64>> {
    if species_order.is_empty() {
        return Err(PourbaixError::invalid("species order is empty"));
    }
    let views = species_order
        .iter()
        .map(|id| {
            fields
                .get(*id)
                .map(|field| field.view())
                .ok_or_else(|| PourbaixError::invalid(format!("no potential field for {}", id)))
        })
        .collect::<Result<Vec<ArrayView2<f64>>>>()?;

    Ok(stack(Axis(0), &views)?)
}

/// Argmin along the species axis. Exact ties keep the lowest index and NaN
/// never replaces a finite minimum.
fn argmin_phase_map(stacked: &Array3<f64>) -> Array2<usize> {
    let (_, rows, cols) = stacked.dim();
    let mut phase_map = Array2::<usize>::zeros((rows, cols));

    Zip::from(&mut phase_map)
        .and(stacked.lanes(Axis(0)))
        .for_each(|slot, lane| {
            let mut best = 0;
            let mut best_value = lane[0];
            for (index, &value) in lane.iter().enumerate().skip(1) {
                if value < best_value || (best_value.is_nan() && !value.is_nan()) {
                    best = index;
                    best_value = value;
                }
            }
            *slot = best;
        });

    phase_map
}

fn precipitation_indices(species_order: &[SpeciesId], precip_species: &[SpeciesId]) -> Vec<usize> {
    precip_species
        .iter()
        .filter_map(|p| species_order.iter().position(|s| s == p))
        .collect()
}

fn pairwise_boundaries(stacked: &Array3<f64>, species_order: &[SpeciesId]) -> Vec<PhaseBoundary> {
    let count = species_order.len();
    let mut boundaries = Vec::with_capacity(count * count.saturating_sub(1) / 2);

    for lower in 0..count {
        for upper in (lower + 1)..count {
            let difference = &stacked.index_axis(Axis(0), lower) - &stacked.index_axis(Axis(0), upper);
            let boundary = PhaseBoundary {
                lower,
                upper,
                species: (species_order[lower], species_order[upper]),
                difference,
            };
            if boundary.is_degenerate() {
                warn!(
                    "{} and {} have identical potential fields; ties resolve to {}",
                    species_order[lower], species_order[upper], species_order[lower]
                );
            }
            boundaries.push(boundary);
        }
    }
    boundaries
}

fn classify_stacked(
    stacked: &Array3<f64>,
    species_order: &[SpeciesId],
    precip_species: &[SpeciesId],
    with_boundaries: bool,
) -> Classification {
    let started = Instant::now();
    let phase_map = argmin_phase_map(stacked);

    let precip = precipitation_indices(species_order, precip_species);
    let precipitation_mask = phase_map.mapv(|index| precip.contains(&index));

    let boundaries = if with_boundaries {
        pairwise_boundaries(stacked, species_order)
    } else {
        Vec::new()
    };

    debug!(
        "classified {} cells across {} species ({} boundary pairs) in {:?}",
        phase_map.len(),
        species_order.len(),
        boundaries.len(),
        started.elapsed()
    );

    Classification {
        species: species_order.to_vec(),
        phase_map,
        precipitation_mask,
        precipitation_indices: precip,
        boundaries,
    }
}

/// Phase map, precipitation mask and all pairwise boundary differences
pub fn classify(
    fields: &PotentialFields,
    species_order: &[SpeciesId],
    precip_species: &[SpeciesId],
) -> Result<Classification> {
    let stacked = stacked_fields(fields, species_order)?;
    Ok(classify_stacked(&stacked, species_order, precip_species, true))
}

/// Same as [`classify`] without the pairwise difference arrays
pub fn classify_phases(
    fields: &PotentialFields,
    species_order: &[SpeciesId],
    precip_species: &[SpeciesId],
) -> Result<Classification> {
    let stacked = stacked_fields(fields, species_order)?;
    Ok(classify_stacked(&stacked, species_order, precip_species, false))
}
