use nalgebra::DMatrix;

use crate::atom::PointCharge;
use crate::basis::{num_cartesian, BasisSet, Shell};
use crate::context::IntegralConfig;
use crate::error::{Error, Result};

use super::{mmd, Operator};

/// Computes the dense integral block for one pair of shells.
///
/// An engine is a pure function of its inputs except for a scratch buffer
/// sized to the basis set's largest shell; instantiate one engine per
/// concurrent worker instead of sharing.
#[derive(Debug)]
pub struct Engine<'a> {
    operator: Operator,
    precision: f64,
    charges: &'a [PointCharge],
    buf: Vec<f64>,
}

impl<'a> Engine<'a> {
    /// `charges` is only consulted for [`Operator::Nuclear`]; pass an empty
    /// slice otherwise. Fails with [`Error::NumericalConfiguration`] for a
    /// derivative order the kernel does not implement.
    pub fn new(
        basis: &BasisSet,
        operator: Operator,
        config: &IntegralConfig,
        charges: &'a [PointCharge],
    ) -> Result<Self> {
        if config.deriv_order != 0 {
            return Err(Error::NumericalConfiguration(format!(
                "derivative order {} is not supported",
                config.deriv_order
            )));
        }

        let max_size = num_cartesian(basis.max_angular_momentum());

        Ok(Self {
            operator,
            precision: config.precision,
            charges,
            buf: vec![0.0; max_size * max_size],
        })
    }

    /// The block between `a` and `b`, shape `a.size() x b.size()`.
    pub fn compute_block(&mut self, a: &Shell, b: &Shell) -> DMatrix<f64> {
        let (n1, n2) = (a.size(), b.size());
        for (i, function_a) in a.functions().iter().enumerate() {
            for (j, function_b) in b.functions().iter().enumerate() {
                self.buf[i * n2 + j] = match self.operator {
                    Operator::Overlap => mmd::contracted_overlap(
                        function_a,
                        a.center(),
                        function_b,
                        b.center(),
                        self.precision,
                    ),
                    Operator::Kinetic => mmd::contracted_kinetic(
                        function_a,
                        a.center(),
                        function_b,
                        b.center(),
                        self.precision,
                    ),
                    Operator::Nuclear => mmd::contracted_nuclear(
                        function_a,
                        a.center(),
                        function_b,
                        b.center(),
                        self.charges,
                        self.precision,
                    ),
                };
            }
        }

        let buf = &self.buf;
        DMatrix::from_fn(n1, n2, |i, j| buf[i * n2 + j])
    }
}
