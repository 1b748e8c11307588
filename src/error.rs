use thiserror::Error;

/// The error type for all fallible operations in the `molint` library.
///
/// Every failure is raised synchronously at the point of violation and
/// propagates to the caller unrecovered: a failed construction yields no
/// usable [`crate::IntegralContext`], and a failed block computation aborts
/// the whole matrix computation rather than returning a partial result.
#[derive(Error, Debug)]
pub enum Error {
    /// The construction inputs are inconsistent, for example a position
    /// matrix without exactly 3 columns or with a row count that does not
    /// match the number of atomic numbers. Checked before any basis or
    /// engine work, so no partial state is ever built.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The named basis set has no shell definitions for a required element.
    #[error("basis set '{basis}' has no definition for element Z={element}")]
    BasisNotFound {
        /// The basis-set name that was requested.
        basis: String,
        /// The atomic number that could not be resolved.
        element: u32,
    },

    /// The numerical configuration cannot be honoured, for example a
    /// non-positive screening precision or a derivative order the
    /// integral kernel does not implement.
    #[error("invalid numerical configuration: {0}")]
    NumericalConfiguration(String),
}

pub type Result<T> = std::result::Result<T, Error>;
