mod functions;
mod library;
mod set;

pub use functions::{ContractedGaussian, Gaussian};
pub use set::{BasisSet, Shell};

pub(crate) use library::library;
pub(crate) use set::num_cartesian;
