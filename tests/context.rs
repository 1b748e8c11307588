use approx::assert_relative_eq;
use nalgebra::DMatrix;

use molint::atom::point_charges;
use molint::{Engine, Error, IntegralConfig, IntegralContext, Operator};

fn hydrogen() -> IntegralContext {
    let positions = DMatrix::from_row_slice(1, 3, &[0.0, 0.0, 0.0]);
    IntegralContext::new(&[1], &positions, "sto-3g").unwrap()
}

fn dihydrogen() -> IntegralContext {
    let positions = DMatrix::from_row_slice(2, 3, &[0.0, 0.0, 0.0, 0.0, 0.0, 1.4]);
    IntegralContext::new(&[1, 1], &positions, "sto-3g").unwrap()
}

fn water() -> IntegralContext {
    // experimental geometry, Bohr
    let positions = DMatrix::from_row_slice(
        3,
        3,
        &[
            0.0, 0.0, -0.143225816552,
            0.0, 1.638036840407, 1.136548822547,
            0.0, -1.638036840407, 1.136548822547,
        ],
    );
    IntegralContext::new(&[8, 1, 1], &positions, "sto-3g").unwrap()
}

fn assert_symmetric(matrix: &DMatrix<f64>) {
    assert_eq!(matrix.nrows(), matrix.ncols());
    for i in 0..matrix.nrows() {
        for j in 0..i {
            assert_relative_eq!(matrix[(i, j)], matrix[(j, i)], epsilon = 1e-10);
        }
    }
}

#[test]
fn hydrogen_overlap_is_the_unit_1x1_matrix() {
    let context = hydrogen();
    assert_eq!(context.num_basis_functions(), 1);

    let overlap = context.overlap().unwrap();
    assert_eq!(overlap.shape(), (1, 1));
    assert_relative_eq!(overlap[(0, 0)], 1.0, epsilon = 1e-10);
}

#[test]
fn dihydrogen_overlap_has_unit_diagonal_and_bounded_off_diagonal() {
    let overlap = dihydrogen().overlap().unwrap();

    assert_eq!(overlap.shape(), (2, 2));
    for i in 0..2 {
        assert_relative_eq!(overlap[(i, i)], 1.0, epsilon = 1e-10);
    }
    let cross = overlap[(0, 1)];
    assert!(cross > 0.0 && cross < 1.0, "S01 = {cross}");
    assert_relative_eq!(cross, overlap[(1, 0)], epsilon = 1e-12);
}

#[test]
fn water_matrices_are_square_and_symmetric() {
    let context = water();
    // O: 1s, 2s, 2p; H: 1s each
    assert_eq!(context.num_shells(), 5);
    assert_eq!(context.num_basis_functions(), 7);

    let (overlap, kinetic, nuclear) = context.one_body_integrals().unwrap();
    for matrix in [&overlap, &kinetic, &nuclear] {
        assert_eq!(matrix.shape(), (7, 7));
        assert_symmetric(matrix);
    }

    // physically sensible diagonals
    for i in 0..7 {
        assert_relative_eq!(overlap[(i, i)], 1.0, epsilon = 1e-10);
        assert!(kinetic[(i, i)] > 0.0);
        assert!(nuclear[(i, i)] < 0.0);
    }
}

#[test]
fn symmetric_assembly_matches_the_naive_double_loop() {
    let context = water();
    let basis = context.basis();
    let charges = point_charges(context.atoms());
    let config = IntegralConfig::default();

    for operator in [Operator::Overlap, Operator::Kinetic, Operator::Nuclear] {
        let assembled = match operator {
            Operator::Nuclear => context.nuclear().unwrap(),
            Operator::Kinetic => context.kinetic().unwrap(),
            Operator::Overlap => context.overlap().unwrap(),
        };

        // full ordered double loop, no symmetry exploitation
        let n = basis.num_basis_functions();
        let mut engine = Engine::new(basis, operator, &config, &charges).unwrap();
        let mut naive = DMatrix::zeros(n, n);
        for s1 in 0..basis.num_shells() {
            for s2 in 0..basis.num_shells() {
                let block = engine.compute_block(&basis.shells()[s1], &basis.shells()[s2]);
                let bf1 = basis.first_basis_function(s1);
                let bf2 = basis.first_basis_function(s2);
                naive
                    .view_mut((bf1, bf2), block.shape())
                    .copy_from(&block);
            }
        }

        assert_relative_eq!(assembled, naive, epsilon = 1e-12, max_relative = 1e-12);
    }
}

#[test]
fn repeated_computation_is_bit_identical() {
    let context = water();
    assert_eq!(context.overlap().unwrap(), context.overlap().unwrap());
    assert_eq!(context.nuclear().unwrap(), context.nuclear().unwrap());
}

#[test]
fn nuclear_depends_on_every_point_charge() {
    let context = dihydrogen();
    let charges = point_charges(context.atoms());

    let full = context.nuclear().unwrap();
    let partial = context.nuclear_with_charges(&charges[..1]).unwrap();

    // dropping a nucleus must change every entry, not just its own shells
    for i in 0..2 {
        for j in 0..2 {
            assert!((full[(i, j)] - partial[(i, j)]).abs() > 1e-8);
        }
    }
}

#[test]
fn empty_atom_list_yields_empty_matrices() {
    let positions = DMatrix::zeros(0, 3);
    let context = IntegralContext::new(&[], &positions, "sto-3g").unwrap();

    assert_eq!(context.num_atoms(), 0);
    assert_eq!(context.num_shells(), 0);
    assert_eq!(context.num_basis_functions(), 0);

    let (overlap, kinetic, nuclear) = context.one_body_integrals().unwrap();
    assert_eq!(overlap.shape(), (0, 0));
    assert_eq!(kinetic.shape(), (0, 0));
    assert_eq!(nuclear.shape(), (0, 0));
}

#[test]
fn two_column_positions_are_rejected() {
    let positions = DMatrix::from_row_slice(1, 2, &[0.0, 0.0]);
    let err = IntegralContext::new(&[1], &positions, "sto-3g").unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn mismatched_row_count_is_rejected() {
    let positions = DMatrix::from_row_slice(2, 3, &[0.0; 6]);
    let err = IntegralContext::new(&[1, 1, 1], &positions, "sto-3g").unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn unknown_basis_name_is_rejected() {
    let positions = DMatrix::from_row_slice(1, 3, &[0.0; 3]);
    let err = IntegralContext::new(&[1], &positions, "def2-qzvpp").unwrap_err();
    assert!(matches!(err, Error::BasisNotFound { .. }));
}

#[test]
fn non_positive_precision_is_rejected() {
    let positions = DMatrix::from_row_slice(1, 3, &[0.0; 3]);
    for precision in [0.0, -1e-10, f64::NAN] {
        let config = IntegralConfig {
            precision,
            ..Default::default()
        };
        let err =
            IntegralContext::with_config(&[1], &positions, "sto-3g", config).unwrap_err();
        assert!(matches!(err, Error::NumericalConfiguration(_)));
    }
}

#[test]
fn engine_rejects_unsupported_derivative_orders() {
    let context = hydrogen();
    let config = IntegralConfig {
        deriv_order: 1,
        ..Default::default()
    };

    let err = Engine::new(context.basis(), Operator::Overlap, &config, &[]).unwrap_err();
    assert!(matches!(err, Error::NumericalConfiguration(_)));
}

#[test]
fn unsupported_derivative_order_fails_at_compute_time() {
    let positions = DMatrix::from_row_slice(1, 3, &[0.0; 3]);
    let config = IntegralConfig {
        deriv_order: 1,
        ..Default::default()
    };

    // accepted as configuration, rejected by the kernel
    let context = IntegralContext::with_config(&[1], &positions, "sto-3g", config).unwrap();
    assert_eq!(context.deriv_order(), 1);
    let err = context.overlap().unwrap_err();
    assert!(matches!(err, Error::NumericalConfiguration(_)));
}

#[test]
fn summary_lists_the_introspection_fields() {
    let context = water();
    assert_eq!(context.basis_name(), "sto-3g");
    assert_eq!(context.num_atoms(), 3);
    assert_eq!(context.max_nprim(), 3);
    assert_eq!(context.max_l(), 1);
    assert_eq!(context.precision(), f64::EPSILON);

    let summary = context.to_string();
    for field in [
        "basis_name",
        "num_atoms : 3",
        "num_shells : 5",
        "max_nprim : 3",
        "max_l : 1",
        "num_basis_functions : 7",
        "deriv_order : 0",
    ] {
        assert!(summary.contains(field), "missing '{field}' in {summary}");
    }
}
