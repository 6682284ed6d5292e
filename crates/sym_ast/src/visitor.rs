//! Visitor dispatch over expression nodes.
//!
//! Two adapter traits, both with one method per node kind and a single
//! overridable fallback, so an algorithm implements only the kinds it cares
//! about. Handler binding happens at compile time through trait resolution;
//! nothing is re-decided per dispatch call.
//!
//! [`Visitor`] reads the tree ([`accept`] dispatches once, the traversal
//! drivers recurse). Every visit method returns [`ControlFlow`]: `Break`
//! requests cancellation of the surrounding cancellable walk as part of the
//! call's return contract.
//!
//! [`Transformer`] is for algorithms that build expressions while visiting
//! and therefore need mutable access to the arena; it recurses itself where
//! child results must be combined rather than observed.

use std::ops::ControlFlow;

use num_rational::BigRational;
use sym_poly::SparsePoly;

use crate::expression::{Context, Expr, ExprId};
use crate::symbol::SymbolId;

/// Read-only visitor with one handler per node kind.
///
/// Default handlers forward to [`Visitor::visit_default`], which continues.
pub trait Visitor {
    fn visit_number(&mut self, ctx: &Context, id: ExprId, _value: &BigRational) -> ControlFlow<()> {
        self.visit_default(ctx, id)
    }

    fn visit_symbol(&mut self, ctx: &Context, id: ExprId, _sym: SymbolId) -> ControlFlow<()> {
        self.visit_default(ctx, id)
    }

    fn visit_poly(
        &mut self,
        ctx: &Context,
        id: ExprId,
        _var: SymbolId,
        _dict: &SparsePoly,
    ) -> ControlFlow<()> {
        self.visit_default(ctx, id)
    }

    fn visit_pow(&mut self, ctx: &Context, id: ExprId, _base: ExprId, _exp: ExprId) -> ControlFlow<()> {
        self.visit_default(ctx, id)
    }

    fn visit_mul(
        &mut self,
        ctx: &Context,
        id: ExprId,
        _coef: &BigRational,
        _factors: &[(ExprId, ExprId)],
    ) -> ControlFlow<()> {
        self.visit_default(ctx, id)
    }

    fn visit_add(
        &mut self,
        ctx: &Context,
        id: ExprId,
        _coef: &BigRational,
        _terms: &[(ExprId, BigRational)],
    ) -> ControlFlow<()> {
        self.visit_default(ctx, id)
    }

    /// Fallback for every kind without a dedicated override.
    fn visit_default(&mut self, _ctx: &Context, _id: ExprId) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Dispatch on `id`'s concrete kind, exactly once, no recursion.
///
/// The kind set is closed, so the match is exhaustive; a node of an unknown
/// kind is unrepresentable.
pub fn accept<V: Visitor + ?Sized>(ctx: &Context, id: ExprId, v: &mut V) -> ControlFlow<()> {
    match ctx.get(id) {
        Expr::Number(n) => v.visit_number(ctx, id, n),
        Expr::Symbol(s) => v.visit_symbol(ctx, id, *s),
        Expr::Poly { var, dict } => v.visit_poly(ctx, id, *var, dict),
        Expr::Pow { base, exp } => v.visit_pow(ctx, id, *base, *exp),
        Expr::Mul { coef, factors } => v.visit_mul(ctx, id, coef, factors),
        Expr::Add { coef, terms } => v.visit_add(ctx, id, coef, terms),
    }
}

/// Expression-building visitor: maps a node to a (possibly new) node.
///
/// Default handlers forward to [`Transformer::transform_default`], which
/// returns the node unchanged.
pub trait Transformer {
    /// Dispatch on `id`'s concrete kind, exactly once.
    fn transform(&mut self, ctx: &mut Context, id: ExprId) -> ExprId {
        // Clone the node so handlers may insert into the arena.
        let expr = ctx.get(id).clone();
        match expr {
            Expr::Number(n) => self.transform_number(ctx, id, &n),
            Expr::Symbol(s) => self.transform_symbol(ctx, id, s),
            Expr::Poly { var, dict } => self.transform_poly(ctx, id, var, &dict),
            Expr::Pow { base, exp } => self.transform_pow(ctx, id, base, exp),
            Expr::Mul { coef, factors } => self.transform_mul(ctx, id, &coef, &factors),
            Expr::Add { coef, terms } => self.transform_add(ctx, id, &coef, &terms),
        }
    }

    fn transform_number(&mut self, ctx: &mut Context, id: ExprId, _value: &BigRational) -> ExprId {
        self.transform_default(ctx, id)
    }

    fn transform_symbol(&mut self, ctx: &mut Context, id: ExprId, _sym: SymbolId) -> ExprId {
        self.transform_default(ctx, id)
    }

    fn transform_poly(
        &mut self,
        ctx: &mut Context,
        id: ExprId,
        _var: SymbolId,
        _dict: &SparsePoly,
    ) -> ExprId {
        self.transform_default(ctx, id)
    }

    fn transform_pow(&mut self, ctx: &mut Context, id: ExprId, _base: ExprId, _exp: ExprId) -> ExprId {
        self.transform_default(ctx, id)
    }

    fn transform_mul(
        &mut self,
        ctx: &mut Context,
        id: ExprId,
        _coef: &BigRational,
        _factors: &[(ExprId, ExprId)],
    ) -> ExprId {
        self.transform_default(ctx, id)
    }

    fn transform_add(
        &mut self,
        ctx: &mut Context,
        id: ExprId,
        _coef: &BigRational,
        _terms: &[(ExprId, BigRational)],
    ) -> ExprId {
        self.transform_default(ctx, id)
    }

    /// Fallback for every kind without a dedicated override.
    fn transform_default(&mut self, _ctx: &mut Context, id: ExprId) -> ExprId {
        id
    }
}
