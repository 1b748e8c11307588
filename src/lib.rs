//! One-electron molecular integrals over contracted Cartesian Gaussian
//! basis sets.
//!
//! The crate is organised around three layers: the immutable data model
//! ([`atom`], [`basis`]), the integral engine and symmetric matrix assembler
//! ([`integrals`]), and the [`context::IntegralContext`] facade that bundles
//! atoms, an assigned basis set and the numerical configuration behind
//! `overlap()` / `kinetic()` / `nuclear()`.

pub mod atom;
pub mod basis;
pub mod context;
pub mod error;
pub mod integrals;

pub use atom::{Atom, PointCharge};
pub use basis::{BasisSet, Shell};
pub use context::{IntegralConfig, IntegralContext};
pub use error::Error;
pub use integrals::{one_electron_matrix, Engine, Operator};
