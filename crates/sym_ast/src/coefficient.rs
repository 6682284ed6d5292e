//! Coefficient extraction.
//!
//! Accumulator-style visitor: results from children must be combined
//! algebraically, so the visitor recurses itself through [`Transformer`]
//! dispatch instead of delegating to a traversal driver.

use num_rational::BigRational;
use num_traits::Zero;

use crate::expression::{Context, Expr, ExprId};
use crate::symbol::SymbolId;
use crate::visitor::Transformer;

/// Extracts the coefficient of `base^exp` from an expression.
///
/// Handler semantics, per node kind of the visited term:
/// - sum: the coefficient of every addend, scaled and re-summed; zero
///   contributions are skipped.
/// - product: if some factor is exactly `(base, exp)`, the product's scalar
///   times the remaining factors; otherwise zero.
/// - power: one on an exact `(base, exp)` match, else zero.
/// - symbol: one when the query is `(this symbol, 1)`, else zero.
/// - anything else: zero, via the fallback.
pub struct CoefficientExtractor {
    base: ExprId,
    exp: ExprId,
}

impl CoefficientExtractor {
    pub fn new(base: ExprId, exp: ExprId) -> Self {
        Self { base, exp }
    }

    /// Compute the coefficient of `base^exp` in `root`.
    ///
    /// Pure function of the inputs: the accumulator is rebuilt from the
    /// additive identity on every call.
    pub fn apply(&mut self, ctx: &mut Context, root: ExprId) -> ExprId {
        self.transform(ctx, root)
    }
}

impl Transformer for CoefficientExtractor {
    fn transform_add(
        &mut self,
        ctx: &mut Context,
        _id: ExprId,
        _coef: &BigRational,
        terms: &[(ExprId, BigRational)],
    ) -> ExprId {
        let mut acc: Vec<(ExprId, BigRational)> = Vec::new();
        for &(term, ref k) in terms {
            let c = self.transform(ctx, term);
            if matches!(ctx.get(c), Expr::Number(n) if n.is_zero()) {
                continue;
            }
            acc.push((c, k.clone()));
        }
        ctx.add_from_dict(BigRational::zero(), acc)
    }

    fn transform_mul(
        &mut self,
        ctx: &mut Context,
        _id: ExprId,
        coef: &BigRational,
        factors: &[(ExprId, ExprId)],
    ) -> ExprId {
        for (i, &(base, exp)) in factors.iter().enumerate() {
            // Hash-consed arena: id equality is structural equality.
            if base == self.base && exp == self.exp {
                let mut rest = factors.to_vec();
                rest.remove(i);
                return ctx.mul_from_dict(coef.clone(), rest);
            }
        }
        ctx.num(0)
    }

    fn transform_pow(&mut self, ctx: &mut Context, _id: ExprId, base: ExprId, exp: ExprId) -> ExprId {
        if base == self.base && exp == self.exp {
            ctx.num(1)
        } else {
            ctx.num(0)
        }
    }

    fn transform_symbol(&mut self, ctx: &mut Context, id: ExprId, _sym: SymbolId) -> ExprId {
        let one = ctx.num(1);
        if id == self.base && self.exp == one {
            one
        } else {
            ctx.num(0)
        }
    }

    fn transform_default(&mut self, ctx: &mut Context, _id: ExprId) -> ExprId {
        ctx.num(0)
    }
}

/// The coefficient of `base^exp` in `root`, as an expression.
pub fn coefficient_of(ctx: &mut Context, root: ExprId, base: ExprId, exp: ExprId) -> ExprId {
    CoefficientExtractor::new(base, exp).apply(ctx, root)
}
