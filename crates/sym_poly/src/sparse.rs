//! Sparse polynomial storage and arithmetic.
//!
//! A polynomial is a `BTreeMap` from exponent to non-zero coefficient; the
//! empty map is the zero polynomial. Every ingestion path prunes zero
//! coefficients, so the no-zero-entry invariant holds at all times.
//!
//! Multiplication packs both operands into big integers (evaluation at a
//! power of two wide enough that product digits cannot overlap) and decodes
//! the single big-integer product back into coefficients.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use tracing::trace;

use crate::error::PolyError;

/// Exponent type. Degrees are non-negative and fit comfortably in 32 bits.
pub type Exp = u32;

/// A sparse univariate polynomial with `BigInt` coefficients.
///
/// Plain value type: `Clone` copies the backing map, so two instances never
/// observe each other's mutations regardless of how they were constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SparsePoly {
    terms: BTreeMap<Exp, BigInt>,
}

impl SparsePoly {
    /// The zero polynomial (no terms).
    pub fn new() -> Self {
        Self::default()
    }

    /// Constant polynomial. A zero constant yields the zero polynomial.
    pub fn from_int<T: Into<BigInt>>(c: T) -> Self {
        let c = c.into();
        let mut terms = BTreeMap::new();
        if !c.is_zero() {
            terms.insert(0, c);
        }
        Self { terms }
    }

    /// Build from an explicit exponent → coefficient map.
    ///
    /// Zero-valued entries are pruned silently; supplying them is not an
    /// error.
    pub fn from_map(map: BTreeMap<Exp, BigInt>) -> Self {
        Self {
            terms: map.into_iter().filter(|(_, c)| !c.is_zero()).collect(),
        }
    }

    /// The multiplicative identity.
    pub fn one() -> Self {
        Self::from_int(1)
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of non-zero terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Highest stored exponent. The zero polynomial reports degree 0.
    pub fn degree(&self) -> Exp {
        self.terms.keys().next_back().copied().unwrap_or(0)
    }

    /// Coefficient of `x^exp`, if non-zero.
    pub fn coeff(&self, exp: Exp) -> Option<&BigInt> {
        self.terms.get(&exp)
    }

    /// Set the coefficient of `x^exp`; a zero value removes the term.
    pub fn set_coeff(&mut self, exp: Exp, c: BigInt) {
        if c.is_zero() {
            self.terms.remove(&exp);
        } else {
            self.terms.insert(exp, c);
        }
    }

    /// Iterate terms in increasing exponent order.
    pub fn iter(&self) -> impl Iterator<Item = (Exp, &BigInt)> + '_ {
        self.terms.iter().map(|(&e, c)| (e, c))
    }

    /// Magnitude of the largest-magnitude coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::ZeroPolynomial`] on the empty polynomial; callers
    /// must special-case zero first (as [`SparsePoly::mul`] does).
    pub fn max_abs_coeff(&self) -> Result<BigInt, PolyError> {
        if self.terms.is_empty() {
            return Err(PolyError::ZeroPolynomial);
        }
        Ok(self.max_abs_coeff_nonzero())
    }

    // Callers guarantee at least one term.
    fn max_abs_coeff_nonzero(&self) -> BigInt {
        debug_assert!(!self.terms.is_empty());
        self.terms
            .values()
            .map(|c| c.abs())
            .max()
            .unwrap_or_else(BigInt::zero)
    }

    /// Evaluate at `2^bits`, treating the polynomial as a base-2^bits
    /// positional integer.
    ///
    /// Folds from the highest exponent down: shift the running total by
    /// `bits` times the gap to the next stored exponent, add that
    /// coefficient, and finish with one shift by `bits` times the lowest
    /// exponent. Private packing primitive for [`SparsePoly::mul`].
    fn eval_pow2(&self, bits: usize) -> BigInt {
        let mut last = match self.terms.keys().next_back() {
            Some(&d) => d,
            None => return BigInt::zero(),
        };
        let mut result = BigInt::zero();
        for (&deg, c) in self.terms.iter().rev() {
            result <<= bits * (last - deg) as usize;
            result += c;
            last = deg;
        }
        result << (bits * last as usize)
    }

    /// Kronecker-substitution product.
    ///
    /// The pack width `N` is wide enough that no product digit can corrupt
    /// its neighbor: `bits(min(deg a, deg b) + 1)` accounts for the number of
    /// cross terms per degree, plus the bit lengths of both operands' largest
    /// coefficient magnitudes. Both operands are packed via [`eval_pow2`],
    /// multiplied as plain integers, and the digits of the product are
    /// unpacked with a half-range threshold: a digit at or above `2^N / 2`
    /// encodes a negative coefficient plus a carry into the next digit.
    pub fn mul(&self, other: &SparsePoly) -> SparsePoly {
        if self.is_zero() || other.is_zero() {
            return SparsePoly::new();
        }

        let n = bit_length(self.degree().min(other.degree()) + 1)
            + self.max_abs_coeff_nonzero().bits() as usize
            + other.max_abs_coeff_nonzero().bits() as usize;
        trace!(pack_bits = n, "kronecker multiply");

        let full = BigInt::one() << n;
        let thresh = &full >> 1usize;
        let mask = &full - BigInt::one();

        let mut s = self.eval_pow2(n) * other.eval_pow2(n);
        let negative = s.is_negative();
        if negative {
            s = -s;
        }

        let mut terms = BTreeMap::new();
        let mut deg: Exp = 0;
        let mut carry = 0u8;
        while !s.is_zero() || carry != 0 {
            let digit = &s & &mask;
            let raw = if digit < thresh {
                let raw = digit + BigInt::from(carry);
                carry = 0;
                raw
            } else {
                let raw = digit - &full + BigInt::from(carry);
                carry = 1;
                raw
            };
            let c = if negative { -raw } else { raw };
            if !c.is_zero() {
                terms.insert(deg, c);
            }
            s >>= n;
            deg += 1;
        }
        SparsePoly { terms }
    }

    /// Exponentiation by squaring: O(log p) multiplies.
    pub fn pow(&self, mut p: u32) -> SparsePoly {
        if p == 0 {
            return SparsePoly::one();
        }
        if p == 1 {
            return self.clone();
        }
        let mut base = self.clone();
        let mut acc = SparsePoly::one();
        while p > 1 {
            if p & 1 == 1 {
                acc = acc.mul(&base);
            }
            base = base.mul(&base);
            p >>= 1;
        }
        acc.mul(&base)
    }
}

/// Bits needed to represent `x` (0 for 0).
fn bit_length(x: Exp) -> usize {
    (Exp::BITS - x.leading_zeros()) as usize
}

impl Ord for SparsePoly {
    /// Fewer terms sorts first; ties break on a lexicographic walk over
    /// `(exponent, coefficient)` pairs.
    fn cmp(&self, other: &Self) -> Ordering {
        self.terms.len().cmp(&other.terms.len()).then_with(|| {
            for ((e1, c1), (e2, c2)) in self.terms.iter().zip(other.terms.iter()) {
                let ord = e1.cmp(e2).then_with(|| c1.cmp(c2));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        })
    }
}

impl PartialOrd for SparsePoly {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::ops::Mul for &SparsePoly {
    type Output = SparsePoly;

    fn mul(self, rhs: &SparsePoly) -> SparsePoly {
        SparsePoly::mul(self, rhs)
    }
}

impl fmt::Display for SparsePoly {
    /// Diagnostic form with a generic variable, highest degree first:
    /// `3*x^2 + -1*x^1 + 1*x^0`; the zero polynomial prints as `0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, (&e, c)) in self.terms.iter().rev().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}*x^{}", c, e)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(pairs: &[(Exp, i64)]) -> SparsePoly {
        SparsePoly::from_map(pairs.iter().map(|&(e, c)| (e, BigInt::from(c))).collect())
    }

    #[test]
    fn test_from_map_prunes_zeros() {
        let p = poly(&[(0, 1), (1, 0), (2, 3)]);
        assert_eq!(p.len(), 2);
        assert_eq!(p.coeff(1), None);
        assert_eq!(p.coeff(2), Some(&BigInt::from(3)));
    }

    #[test]
    fn test_from_int_zero_is_zero_poly() {
        assert!(SparsePoly::from_int(0).is_zero());
        assert_eq!(SparsePoly::from_int(0), SparsePoly::new());
    }

    #[test]
    fn test_set_coeff_prunes() {
        let mut p = poly(&[(1, 2)]);
        p.set_coeff(1, BigInt::zero());
        assert!(p.is_zero());
    }

    #[test]
    fn test_degree() {
        assert_eq!(poly(&[(0, 1), (5, -2)]).degree(), 5);
        assert_eq!(SparsePoly::new().degree(), 0);
    }

    #[test]
    fn test_max_abs_coeff() {
        let p = poly(&[(0, 3), (1, -7), (2, 5)]);
        assert_eq!(p.max_abs_coeff(), Ok(BigInt::from(7)));
    }

    #[test]
    fn test_max_abs_coeff_zero_poly_errors() {
        assert_eq!(
            SparsePoly::new().max_abs_coeff(),
            Err(PolyError::ZeroPolynomial)
        );
    }

    #[test]
    fn test_eval_pow2() {
        // 1 + x at base 16: 0x11 = 17
        assert_eq!(poly(&[(0, 1), (1, 1)]).eval_pow2(4), BigInt::from(17));
        // 3*x^2 at base 4: 3 << 4 = 48
        assert_eq!(poly(&[(2, 3)]).eval_pow2(2), BigInt::from(48));
        assert_eq!(SparsePoly::new().eval_pow2(8), BigInt::zero());
    }

    #[test]
    fn test_mul_one_plus_x_times_one_minus_x() {
        let a = poly(&[(0, 1), (1, 1)]);
        let b = poly(&[(0, 1), (1, -1)]);
        assert_eq!(a.mul(&b), poly(&[(0, 1), (2, -1)]));
    }

    #[test]
    fn test_mul_zero_short_circuits() {
        let a = poly(&[(0, 1), (3, 4)]);
        assert!(a.mul(&SparsePoly::new()).is_zero());
        assert!(SparsePoly::new().mul(&a).is_zero());
    }

    #[test]
    fn test_mul_negative_coefficients() {
        // (-2x + 1)(3x - 5) = -6x^2 + 13x - 5
        let a = poly(&[(1, -2), (0, 1)]);
        let b = poly(&[(1, 3), (0, -5)]);
        assert_eq!(a.mul(&b), poly(&[(2, -6), (1, 13), (0, -5)]));
    }

    #[test]
    fn test_mul_sparse_gap() {
        // (x^7 + 2)(x^3 - 1) = x^10 - x^7 + 2x^3 - 2
        let a = poly(&[(7, 1), (0, 2)]);
        let b = poly(&[(3, 1), (0, -1)]);
        assert_eq!(a.mul(&b), poly(&[(10, 1), (7, -1), (3, 2), (0, -2)]));
    }

    #[test]
    fn test_mul_operator() {
        let a = poly(&[(1, 1)]);
        let b = poly(&[(1, 1)]);
        assert_eq!(&a * &b, poly(&[(2, 1)]));
    }

    #[test]
    fn test_pow_identities() {
        let a = poly(&[(0, 1), (1, 1)]);
        assert_eq!(a.pow(0), SparsePoly::one());
        assert_eq!(a.pow(1), a);
        // (1 + x)^3 = 1 + 3x + 3x^2 + x^3
        assert_eq!(a.pow(3), poly(&[(0, 1), (1, 3), (2, 3), (3, 1)]));
    }

    #[test]
    fn test_ordering_by_term_count_first() {
        let small = poly(&[(9, 100)]);
        let big = poly(&[(0, 1), (1, 1)]);
        assert!(small < big);
    }

    #[test]
    fn test_ordering_lexicographic_tiebreak() {
        let a = poly(&[(0, 1), (1, 2)]);
        let b = poly(&[(0, 1), (1, 3)]);
        assert!(a < b);
        let c = poly(&[(0, 1), (2, 2)]);
        assert!(a < c);
    }

    #[test]
    fn test_clone_is_independent_storage() {
        let original = poly(&[(0, 1), (2, 4)]);
        let mut copy = original.clone();
        copy.set_coeff(2, BigInt::from(99));
        copy.set_coeff(5, BigInt::from(-1));
        assert_eq!(original, poly(&[(0, 1), (2, 4)]));
        assert_eq!(copy.coeff(2), Some(&BigInt::from(99)));
    }

    #[test]
    fn test_display() {
        assert_eq!(poly(&[(0, 1), (2, -1)]).to_string(), "-1*x^2 + 1*x^0");
        assert_eq!(SparsePoly::new().to_string(), "0");
    }
}
