use nalgebra::Vector3;

/// A nucleus: atomic number plus position in Bohr.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Atom {
    pub atomic_number: u32,
    pub position: Vector3<f64>,
}

impl Atom {
    pub fn new(atomic_number: u32, position: Vector3<f64>) -> Self {
        Self {
            atomic_number,
            position,
        }
    }

    /// Returns the charge of this nucleus under the default
    /// charge-equals-atomic-number mapping.
    pub fn nuclear_charge(&self) -> f64 {
        self.atomic_number as f64
    }
}

/// A classical point charge, the per-nucleus parameter of the
/// nuclear-attraction operator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointCharge {
    pub charge: f64,
    pub position: Vector3<f64>,
}

impl From<&Atom> for PointCharge {
    fn from(atom: &Atom) -> Self {
        Self {
            charge: atom.nuclear_charge(),
            position: atom.position,
        }
    }
}

/// One point charge per atom, with charge equal to the atomic number.
pub fn point_charges(atoms: &[Atom]) -> Vec<PointCharge> {
    atoms.iter().map(PointCharge::from).collect()
}

/// One point charge per atom with a caller-supplied mapping from atomic
/// number to charge magnitude, for effective-core-potential or isotope
/// scenarios where the identity mapping does not apply.
pub fn point_charges_with(atoms: &[Atom], charge: impl Fn(u32) -> f64) -> Vec<PointCharge> {
    atoms
        .iter()
        .map(|atom| PointCharge {
            charge: charge(atom.atomic_number),
            position: atom.position,
        })
        .collect()
}
