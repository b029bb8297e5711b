// Properties of the evaluator + classifier pipeline over a full grid
// Each test builds real fields from the standard constants table

use approx::assert_abs_diff_eq;
use fe_pourbaix::grid::{GridSpec, SampleGrid};
use fe_pourbaix::species::{PhaseFamily, SpeciesId, precipitation_species, species_set};
use fe_pourbaix::{
    ChemistryParameters, Classification, PotentialFields, PourbaixError, ThermodynamicConstants,
    classify, evaluate,
};
use more_asserts::{assert_ge, assert_gt, assert_le};

const GRID_RESOLUTION: usize = 101;

fn grid() -> SampleGrid {
    SampleGrid::new(GridSpec::with_resolution(GRID_RESOLUTION)).unwrap()
}

fn standard() -> &'static ThermodynamicConstants {
    ThermodynamicConstants::standard()
}

#[test]
fn test_phase_indices_are_valid() {
    for family in [PhaseFamily::Oxides, PhaseFamily::Hydroxides] {
        let params = ChemistryParameters::default().with_phase_family(family);
        let grid = grid();
        let fields = evaluate(&params, &grid, standard()).unwrap();
        let order = species_set(family);
        let result = classify(&fields, &order, &precipitation_species(family)).unwrap();

        assert_eq!(result.phase_map.dim(), grid.shape());
        assert!(result.phase_map.iter().all(|&index| index < order.len()));
        assert_eq!(result.boundaries.len(), order.len() * (order.len() - 1) / 2);
    }
}

#[test]
fn test_phase_is_the_minimum_field() {
    let params = ChemistryParameters::default();
    let grid = grid();
    let fields = evaluate(&params, &grid, standard()).unwrap();
    let order = species_set(params.phase_family);
    let result = classify(&fields, &order, &precipitation_species(params.phase_family)).unwrap();

    for ((row, col), &phase) in result.phase_map.indexed_iter() {
        let winner = fields.get(order[phase]).unwrap()[[row, col]];
        for (index, species) in order.iter().enumerate() {
            let value = fields.get(*species).unwrap()[[row, col]];
            assert_le!(winner, value);
            // ties keep the lowest index
            if value == winner {
                assert_ge!(index, phase);
            }
        }
    }
}

#[test]
fn test_mask_is_exactly_solid_membership() {
    for family in [PhaseFamily::Oxides, PhaseFamily::Hydroxides] {
        let params = ChemistryParameters::default().with_phase_family(family);
        let fields = evaluate(&params, &grid(), standard()).unwrap();
        let order = species_set(family);
        let precip = precipitation_species(family);
        let result = classify(&fields, &order, &precip).unwrap();

        for (&phase, &masked) in result.phase_map.iter().zip(result.precipitation_mask.iter()) {
            assert_eq!(masked, precip.contains(&order[phase]));
        }
        assert_gt!(result.precipitation_fraction(), 0.0);
        assert_gt!(1.0, result.precipitation_fraction());
    }
}

#[test]
fn test_repeated_runs_are_bit_identical() {
    let params = ChemistryParameters::default()
        .with_temperature(60.0)
        .with_log_activities(-4.0, -5.0);
    let grid = grid();
    let order = species_set(params.phase_family);
    let precip = precipitation_species(params.phase_family);

    let first_fields = evaluate(&params, &grid, standard()).unwrap();
    let second_fields = evaluate(&params, &grid, standard()).unwrap();
    for species in &order {
        let a = first_fields.get(*species).unwrap();
        let b = second_fields.get(*species).unwrap();
        assert!(a.iter().zip(b.iter()).all(|(x, y)| x.to_bits() == y.to_bits()));
    }

    let first = classify(&first_fields, &order, &precip).unwrap();
    let second = classify(&second_fields, &order, &precip).unwrap();
    assert_eq!(first.phase_map, second.phase_map);
    assert_eq!(first.precipitation_mask, second.precipitation_mask);
}

#[test]
fn test_fe2_activity_shifts_field_by_thermal_voltage() {
    let grid = grid();
    let low = ChemistryParameters::default();
    let high = low.with_log_activities(-4.0, -6.0);
    let s = low.thermal_voltage(standard());

    let low_fields = evaluate(&low, &grid, standard()).unwrap();
    let high_fields = evaluate(&high, &grid, standard()).unwrap();

    let low_fe2 = low_fields.get(SpeciesId::Fe2Plus).unwrap();
    let high_fe2 = high_fields.get(SpeciesId::Fe2Plus).unwrap();
    for (a, b) in low_fe2.iter().zip(high_fe2.iter()) {
        assert_abs_diff_eq!(b - a, 2.0 * s, epsilon = 1e-9);
    }

    // Fe3+ and the metal do not see the Fe2+ activity
    assert_eq!(
        low_fields.get(SpeciesId::Fe3Plus).unwrap(),
        high_fields.get(SpeciesId::Fe3Plus).unwrap()
    );
    assert_eq!(
        low_fields.get(SpeciesId::Fe).unwrap(),
        high_fields.get(SpeciesId::Fe).unwrap()
    );
}

#[test]
fn test_metal_field_is_zero_everywhere() {
    let params = ChemistryParameters::default();
    let fields = evaluate(&params, &grid(), standard()).unwrap();
    assert!(fields.get(SpeciesId::Fe).unwrap().iter().all(|&v| v == 0.0));
}

/// Cells where a pair of fields ties (within 1e-6) at the overall minimum.
/// Returns (cells checked, cells whose phase is neither of the pair nor a
/// lower-index species at or below the pair's value).
fn boundary_violations(
    fields: &PotentialFields,
    order: &[SpeciesId],
    result: &Classification,
) -> (usize, Vec<(usize, usize, usize, usize)>) {
    const TIE: f64 = 1e-6;
    let mut checked = 0;
    let mut violations = Vec::new();

    for boundary in &result.boundaries {
        let lower = fields.get(boundary.species.0).unwrap();
        let upper = fields.get(boundary.species.1).unwrap();
        for ((row, col), &difference) in boundary.difference.indexed_iter() {
            assert_abs_diff_eq!(difference, lower[[row, col]] - upper[[row, col]], epsilon = 1e-12);
            if difference.abs() > TIE {
                continue;
            }
            let minimum = order
                .iter()
                .map(|s| fields.get(*s).unwrap()[[row, col]])
                .fold(f64::INFINITY, f64::min);
            let (a, b) = (lower[[row, col]], upper[[row, col]]);
            if (a - minimum).abs() > TIE || (b - minimum).abs() > TIE {
                continue;
            }

            checked += 1;
            let phase = result.phase_map[[row, col]];
            let pair_min = a.min(b);
            let phase_value = fields.get(order[phase]).unwrap()[[row, col]];
            let allowed = phase == boundary.lower
                || phase == boundary.upper
                || phase_value < pair_min
                || (phase_value == pair_min && phase < boundary.lower);
            if !allowed {
                violations.push((row, col, boundary.lower, boundary.upper));
            }
        }
    }
    (checked, violations)
}

/// 3 x 3 grid over pH 0..1 whose middle row sits on the potential `e_line`
fn grid_through(e_line: f64) -> SampleGrid {
    let spec = GridSpec {
        ph_samples: 3,
        e_samples: 3,
        ..GridSpec::default().with_bounds(0.0, 1.0, e_line - 1.0, e_line + 1.0)
    };
    SampleGrid::new(spec).unwrap()
}

#[test]
fn test_boundary_consistency() {
    let constants = standard();
    let params = ChemistryParameters::default();
    let s = params.thermal_voltage(constants);
    let faraday = constants.faraday_c_per_mol;
    let g_fe2 = constants.gibbs(SpeciesId::Fe2Plus).unwrap();
    let g_fe3 = constants.gibbs(SpeciesId::Fe3Plus).unwrap();

    // Fe/Fe2+ and Fe2+/Fe3+ lines are horizontal in acidic solution
    let metal_line = (g_fe2 / faraday + params.log_a_fe2 * s) / 2.0;
    let ferric_line = (g_fe3 - g_fe2) / faraday + (params.log_a_fe3 - params.log_a_fe2) * s;

    let order = species_set(params.phase_family);
    let precip = precipitation_species(params.phase_family);
    for (e_line, pair) in [
        (metal_line, (SpeciesId::Fe, SpeciesId::Fe2Plus)),
        (ferric_line, (SpeciesId::Fe2Plus, SpeciesId::Fe3Plus)),
    ] {
        let grid = grid_through(e_line);
        let fields = evaluate(&params, &grid, constants).unwrap();
        let result = classify(&fields, &order, &precip).unwrap();

        let (checked, violations) = boundary_violations(&fields, &order, &result);
        println!("   {}/{} boundary: checked {} cells", pair.0, pair.1, checked);
        assert_ge!(checked, 3);
        assert!(violations.is_empty(), "violations: {:?}", violations);

        for col in 0..3 {
            let phase = order[result.phase_map[[1, col]]];
            assert!(phase == pair.0 || phase == pair.1);
        }

        // a phase map pointing elsewhere breaks the property
        let mut broken = result.clone();
        broken.phase_map.fill(order.len() - 1);
        let (_, violations) = boundary_violations(&fields, &order, &broken);
        assert_eq!(violations.len(), checked);
    }
}

#[test]
fn test_acidic_reducing_point_is_metal() {
    // pH 2 and E -1.0 V fall exactly on grid nodes of an 8 x 11 grid
    let spec = GridSpec {
        ph_samples: 8,
        e_samples: 11,
        ..GridSpec::default()
    };
    let grid = SampleGrid::new(spec).unwrap();
    let (row, col) = (3, 1);
    let (ph, e) = grid.point(row, col);
    assert_abs_diff_eq!(ph, 2.0);
    assert_abs_diff_eq!(e, -1.0);

    let params = ChemistryParameters::default();
    let fields = evaluate(&params, &grid, standard()).unwrap();
    let order = species_set(PhaseFamily::Oxides);
    let result = classify(&fields, &order, &precipitation_species(PhaseFamily::Oxides)).unwrap();

    let mut expected = 0;
    for (index, species) in order.iter().enumerate() {
        let best = fields.get(order[expected]).unwrap()[[row, col]];
        if fields.get(*species).unwrap()[[row, col]] < best {
            expected = index;
        }
    }

    assert_eq!(result.phase_map[[row, col]], expected);
    assert_eq!(order[expected], SpeciesId::Fe);
    assert!(!result.precipitation_mask[[row, col]]);
}

#[test]
fn test_family_switch_only_touches_solid_slots() {
    let grid = grid();
    let oxides = ChemistryParameters::default();
    let hydroxides = oxides.with_phase_family(PhaseFamily::Hydroxides);

    let oxide_fields = evaluate(&oxides, &grid, standard()).unwrap();
    let hydroxide_fields = evaluate(&hydroxides, &grid, standard()).unwrap();

    let oxide_order = oxide_fields.species().to_vec();
    let hydroxide_order = hydroxide_fields.species().to_vec();
    for position in [0, 1, 2, 5] {
        assert_eq!(oxide_order[position], hydroxide_order[position]);
        assert_eq!(
            oxide_fields.get(oxide_order[position]).unwrap(),
            hydroxide_fields.get(hydroxide_order[position]).unwrap()
        );
    }
    assert_eq!(&oxide_order[3..5], &[SpeciesId::Fe3O4, SpeciesId::Fe2O3]);
    assert_eq!(&hydroxide_order[3..5], &[SpeciesId::FeOH2, SpeciesId::FeOH3]);
}

#[test]
fn test_absolute_zero_is_rejected() {
    let params = ChemistryParameters::default().with_temperature(-273.15);
    let result = evaluate(&params, &grid(), standard());
    assert!(matches!(result, Err(PourbaixError::InvalidParameter(_))));
}
