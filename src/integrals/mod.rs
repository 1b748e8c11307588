//! The integral evaluation engine: per-shell-pair blocks and the
//! symmetry-exploiting assembly of full matrices.

mod engine;
pub(crate) mod mmd;
mod one_electron;
mod utils;

pub use engine::Engine;
pub use one_electron::one_electron_matrix;

/// The one-electron operator kinds the engine evaluates. All three are
/// symmetric over a real Gaussian basis: `M[i,j] == M[j,i]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operator {
    Overlap,
    Kinetic,
    /// Requires the full point-charge list; every charge contributes to
    /// every basis-function pair.
    Nuclear,
}
