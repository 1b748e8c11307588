use std::fmt;

use nalgebra::{DMatrix, Vector3};

use crate::atom::{point_charges, Atom, PointCharge};
use crate::basis::{library, BasisSet};
use crate::error::{Error, Result};
use crate::integrals::{one_electron_matrix, Operator};

/// Numerical knobs of the integral engine, with sensible defaults. One
/// constructor with a defaulted config structure instead of a family of
/// overloads:
///
/// ```
/// # use molint::IntegralConfig;
/// let config = IntegralConfig {
///     precision: 1e-12,
///     ..Default::default()
/// };
/// # assert_eq!(config.deriv_order, 0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralConfig {
    /// Derivative order threaded through to the integral kernel. Order 0 is
    /// the bare integral.
    pub deriv_order: u32,
    /// Screening threshold bounding primitive-pair significance. Affects
    /// cost and accuracy, never the output shape.
    pub precision: f64,
}

impl Default for IntegralConfig {
    fn default() -> Self {
        Self {
            deriv_order: 0,
            precision: f64::EPSILON,
        }
    }
}

impl IntegralConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.precision > 0.0 && self.precision.is_finite()) {
            return Err(Error::NumericalConfiguration(format!(
                "precision must be a positive finite number, got {}",
                self.precision
            )));
        }
        Ok(())
    }
}

/// Atoms, their assigned basis set and the numerical configuration, bundled
/// behind `overlap()` / `kinetic()` / `nuclear()`.
///
/// Immutable after construction. Matrices are recomputed on every call, not
/// cached; repeated calls repeat the full computation.
#[derive(Debug)]
pub struct IntegralContext {
    atoms: Vec<Atom>,
    basis: BasisSet,
    basis_name: String,
    config: IntegralConfig,
}

impl IntegralContext {
    /// Constructs a context with the default configuration. `positions` must
    /// have exactly 3 columns and one row per atomic number.
    pub fn new(
        atomic_numbers: &[u32],
        positions: &DMatrix<f64>,
        basis_name: &str,
    ) -> Result<Self> {
        Self::with_config(
            atomic_numbers,
            positions,
            basis_name,
            IntegralConfig::default(),
        )
    }

    /// Input shapes are validated before any basis lookup, so a failed
    /// construction leaves no partial state.
    pub fn with_config(
        atomic_numbers: &[u32],
        positions: &DMatrix<f64>,
        basis_name: &str,
        config: IntegralConfig,
    ) -> Result<Self> {
        if positions.ncols() != 3 {
            return Err(Error::InvalidArgument(format!(
                "position matrix must have 3 columns (x, y, z), got {}",
                positions.ncols()
            )));
        }
        if positions.nrows() != atomic_numbers.len() {
            return Err(Error::InvalidArgument(format!(
                "number of atomic numbers ({}) must match number of positions ({})",
                atomic_numbers.len(),
                positions.nrows()
            )));
        }
        config.validate()?;

        let atoms = atomic_numbers
            .iter()
            .enumerate()
            .map(|(i, &z)| {
                Atom::new(
                    z,
                    Vector3::new(positions[(i, 0)], positions[(i, 1)], positions[(i, 2)]),
                )
            })
            .collect::<Vec<_>>();

        let basis = library().assign(basis_name, &atoms)?;

        Ok(Self {
            atoms,
            basis,
            basis_name: basis_name.to_owned(),
            config,
        })
    }

    pub fn overlap(&self) -> Result<DMatrix<f64>> {
        one_electron_matrix(&self.basis, Operator::Overlap, &self.config, &[])
    }

    pub fn kinetic(&self) -> Result<DMatrix<f64>> {
        one_electron_matrix(&self.basis, Operator::Kinetic, &self.config, &[])
    }

    /// Nuclear attraction with one point charge per atom, charge equal to
    /// the atomic number.
    pub fn nuclear(&self) -> Result<DMatrix<f64>> {
        self.nuclear_with_charges(&point_charges(&self.atoms))
    }

    /// Nuclear attraction over a caller-supplied charge list, the extension
    /// point for non-identity charge mappings.
    pub fn nuclear_with_charges(&self, charges: &[PointCharge]) -> Result<DMatrix<f64>> {
        one_electron_matrix(&self.basis, Operator::Nuclear, &self.config, charges)
    }

    /// Overlap, kinetic and nuclear-attraction matrices in one call.
    pub fn one_body_integrals(&self) -> Result<(DMatrix<f64>, DMatrix<f64>, DMatrix<f64>)> {
        Ok((self.overlap()?, self.kinetic()?, self.nuclear()?))
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn basis(&self) -> &BasisSet {
        &self.basis
    }

    pub fn basis_name(&self) -> &str {
        &self.basis_name
    }

    pub fn deriv_order(&self) -> u32 {
        self.config.deriv_order
    }

    pub fn precision(&self) -> f64 {
        self.config.precision
    }

    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn num_shells(&self) -> usize {
        self.basis.num_shells()
    }

    pub fn max_nprim(&self) -> usize {
        self.basis.max_num_primitives()
    }

    pub fn max_l(&self) -> i32 {
        self.basis.max_angular_momentum()
    }

    pub fn num_basis_functions(&self) -> usize {
        self.basis.num_basis_functions()
    }
}

impl fmt::Display for IntegralContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IntegralContext(")?;
        writeln!(f, "  basis_name : '{}',", self.basis_name)?;
        writeln!(f, "  num_atoms : {},", self.num_atoms())?;
        writeln!(f, "  num_shells : {},", self.num_shells())?;
        writeln!(f, "  max_nprim : {},", self.max_nprim())?;
        writeln!(f, "  max_l : {},", self.max_l())?;
        writeln!(f, "  num_basis_functions : {},", self.num_basis_functions())?;
        writeln!(f, "  deriv_order : {},", self.deriv_order())?;
        writeln!(f, "  precision : {:e}", self.precision())?;
        write!(f, ")")
    }
}
