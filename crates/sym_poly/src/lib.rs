//! Sparse univariate polynomials over arbitrary-precision integers.
//!
//! The container keeps an exponent → coefficient map with no zero entries;
//! multiplication uses Kronecker substitution so the whole coefficient
//! convolution collapses into a single big-integer multiply.

pub mod error;
pub mod sparse;

pub use error::PolyError;
pub use sparse::{Exp, SparsePoly};
