use std::collections::HashMap;
use std::sync::OnceLock;

use nalgebra::Vector3;
use serde::Deserialize;
use smallvec::SmallVec;

use crate::atom::Atom;
use crate::error::{Error, Result};
use crate::integrals::mmd;

use super::{BasisSet, ContractedGaussian, Gaussian, Shell};

/// Basis definitions in the Basis Set Exchange JSON schema. Exponents and
/// coefficients are strings there; `coefficients` carries one list per entry
/// of `angular_momentum` so that shared-exponent sp shells stay one record.
#[derive(Deserialize)]
struct BseBasisSet {
    elements: HashMap<u32, BseElement>,
}

#[derive(Deserialize)]
struct BseElement {
    electron_shells: Vec<BseElectronShell>,
}

#[derive(Deserialize)]
struct BseElectronShell {
    angular_momentum: Vec<i32>,
    exponents: Vec<String>,
    coefficients: Vec<Vec<String>>,
}

/// One angular momentum worth of primitive data, numeric and ready to be
/// placed on an atom.
struct ShellDefinition {
    angular_momentum: i32,
    exponents: Vec<f64>,
    coefficients: Vec<f64>,
}

/// The process-wide basis-set provider: embedded definitions, parsed once.
pub(crate) struct BasisLibrary {
    sets: HashMap<String, HashMap<u32, Vec<ShellDefinition>>>,
}

static LIBRARY: OnceLock<BasisLibrary> = OnceLock::new();

/// Returns the basis library, parsing the embedded definitions on first use.
/// The parse runs exactly once per process, never per context construction.
pub(crate) fn library() -> &'static BasisLibrary {
    LIBRARY.get_or_init(|| {
        const STO_3G_JSON: &str = include_str!("../../resources/sto-3g.json");

        let mut sets = HashMap::new();
        sets.insert("sto-3g".to_owned(), parse_set(STO_3G_JSON));
        BasisLibrary { sets }
    })
}

fn parse_set(json: &str) -> HashMap<u32, Vec<ShellDefinition>> {
    let raw: BseBasisSet = serde_json::from_str(json)
        .expect("failed to parse an embedded basis set. This is a library bug.");

    let mut elements = HashMap::with_capacity(raw.elements.len());
    for (element, definition) in raw.elements {
        let mut shells = Vec::new();

        for electron_shell in &definition.electron_shells {
            for (index, &angular_momentum) in electron_shell.angular_momentum.iter().enumerate() {
                shells.push(ShellDefinition {
                    angular_momentum,
                    exponents: parse_numbers(&electron_shell.exponents),
                    coefficients: parse_numbers(&electron_shell.coefficients[index]),
                });
            }
        }

        elements.insert(element, shells);
    }
    elements
}

fn parse_numbers(values: &[String]) -> Vec<f64> {
    values
        .iter()
        .map(|value| {
            value
                .parse::<f64>()
                .expect("malformed number in an embedded basis set. This is a library bug.")
        })
        .collect()
}

impl BasisLibrary {
    /// Resolves `name` against the atom list, placing every matching shell
    /// definition on its atom in input order. Fails with
    /// [`Error::BasisNotFound`] if any atom has no definition.
    pub(crate) fn assign(&self, name: &str, atoms: &[Atom]) -> Result<BasisSet> {
        let key = name.to_ascii_lowercase();

        let mut shells = Vec::new();
        for atom in atoms {
            let definitions = self
                .sets
                .get(&key)
                .and_then(|set| set.get(&atom.atomic_number))
                .ok_or_else(|| Error::BasisNotFound {
                    basis: name.to_owned(),
                    element: atom.atomic_number,
                })?;

            for definition in definitions {
                shells.push(build_shell(definition, atom.position));
            }
        }

        log::debug!(
            "assigned basis '{name}' to {} atoms: {} shells",
            atoms.len(),
            shells.len()
        );

        Ok(BasisSet::new(shells))
    }
}

/// Instantiates one shell at `center`: every Cartesian component of the
/// angular momentum, each primitive-normalized and then renormalized so the
/// contracted function has unit self-overlap.
fn build_shell(definition: &ShellDefinition, center: Vector3<f64>) -> Shell {
    let mut functions = Vec::with_capacity(super::num_cartesian(definition.angular_momentum));

    for angular in generate_angular_vectors(definition.angular_momentum) {
        let mut primitives = SmallVec::with_capacity(definition.exponents.len());

        for (&exponent, &coefficient) in definition
            .exponents
            .iter()
            .zip(&definition.coefficients)
        {
            primitives.push(Gaussian {
                exponent,
                coefficient: coefficient * Gaussian::norm(exponent, angular),
                angular,
            });
        }

        let mut function = ContractedGaussian(primitives);
        let self_overlap = mmd::contracted_overlap(&function, center, &function, center, 0.0);
        let scale = self_overlap.sqrt().recip();
        for primitive in &mut function.0 {
            primitive.coefficient *= scale;
        }

        functions.push(function);
    }

    Shell::new(definition.angular_momentum, center, functions)
}

// generate all (i, j, k) such that i + j + k = angular, x-major
fn generate_angular_vectors(angular_momentum: i32) -> Vec<(i32, i32, i32)> {
    let mut angular_vectors = Vec::with_capacity(8);
    for i in (0..=angular_momentum).rev() {
        for j in (0..=angular_momentum - i).rev() {
            angular_vectors.push((i, j, angular_momentum - i - j));
        }
    }
    angular_vectors
}
