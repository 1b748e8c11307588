use nalgebra::Vector3;

use super::ContractedGaussian;

/// Number of Cartesian basis functions carried by a shell of the given
/// angular momentum.
pub(crate) fn num_cartesian(angular_momentum: i32) -> usize {
    ((angular_momentum + 1) * (angular_momentum + 2) / 2) as usize
}

/// A contracted-Gaussian shell: all Cartesian components of one angular
/// momentum, sharing a center and a primitive expansion.
#[derive(Clone, Debug)]
pub struct Shell {
    angular_momentum: i32,
    center: Vector3<f64>,
    /// One contracted function per Cartesian component, in x-major order.
    functions: Vec<ContractedGaussian>,
}

impl Shell {
    pub(crate) fn new(
        angular_momentum: i32,
        center: Vector3<f64>,
        functions: Vec<ContractedGaussian>,
    ) -> Self {
        debug_assert_eq!(functions.len(), num_cartesian(angular_momentum));
        Self {
            angular_momentum,
            center,
            functions,
        }
    }

    pub fn angular_momentum(&self) -> i32 {
        self.angular_momentum
    }

    pub fn center(&self) -> Vector3<f64> {
        self.center
    }

    /// Number of basis functions this shell contributes to the set.
    pub fn size(&self) -> usize {
        self.functions.len()
    }

    /// Length of the primitive expansion.
    pub fn num_primitives(&self) -> usize {
        self.functions.first().map_or(0, |f| f.num_primitives())
    }

    pub fn functions(&self) -> &[ContractedGaussian] {
        &self.functions
    }
}

/// An ordered sequence of shells together with the prefix-sum mapping from
/// shell index to global basis-function offset. Constructed once, immutable.
#[derive(Clone, Debug)]
pub struct BasisSet {
    shells: Vec<Shell>,
    shell_to_bf_offset: Vec<usize>,
    num_basis_functions: usize,
    max_num_primitives: usize,
    max_angular_momentum: i32,
}

impl BasisSet {
    pub(crate) fn new(shells: Vec<Shell>) -> Self {
        let mut shell_to_bf_offset = Vec::with_capacity(shells.len());
        let mut offset = 0;
        for shell in &shells {
            shell_to_bf_offset.push(offset);
            offset += shell.size();
        }

        let max_num_primitives = shells.iter().map(Shell::num_primitives).max().unwrap_or(0);
        let max_angular_momentum = shells
            .iter()
            .map(Shell::angular_momentum)
            .max()
            .unwrap_or(0);

        Self {
            shells,
            shell_to_bf_offset,
            num_basis_functions: offset,
            max_num_primitives,
            max_angular_momentum,
        }
    }

    pub fn shells(&self) -> &[Shell] {
        &self.shells
    }

    pub fn num_shells(&self) -> usize {
        self.shells.len()
    }

    /// Index of the first basis function of the given shell.
    pub fn first_basis_function(&self, shell: usize) -> usize {
        self.shell_to_bf_offset[shell]
    }

    pub fn num_basis_functions(&self) -> usize {
        self.num_basis_functions
    }

    pub fn max_num_primitives(&self) -> usize {
        self.max_num_primitives
    }

    pub fn max_angular_momentum(&self) -> i32 {
        self.max_angular_momentum
    }
}
