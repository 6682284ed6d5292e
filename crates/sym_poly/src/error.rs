//! Error types for sym_poly.

use thiserror::Error;

/// Errors raised by polynomial operations with a defined precondition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolyError {
    /// `max_abs_coeff` has no value on the empty (zero) polynomial.
    #[error("max_abs_coeff is undefined for the zero polynomial")]
    ZeroPolynomial,
}
