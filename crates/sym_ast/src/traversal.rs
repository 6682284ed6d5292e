//! Depth-first traversal drivers.
//!
//! Children are walked in each node's canonical stored order: a sum's terms
//! and a product's factors are already sorted structurally, a power yields
//! base then exponent, leaves yield nothing. The order is deterministic, so
//! first-match semantics under cancellation are well defined.
//!
//! [`preorder`] and [`postorder`] walk the whole tree and ignore cancellation
//! requests; [`try_preorder`] and [`try_postorder`] unwind on the first
//! `Break` without dispatching on any further node at any level. Drivers
//! never reset visitor state; `apply`-style entry points own that.
//!
//! The walks recurse, so stack use grows with tree depth. Expression trees
//! deep enough to matter are a resource concern for the caller, not handled
//! here.

use std::ops::ControlFlow;

use crate::expression::{Context, Expr, ExprId};
use crate::visitor::{accept, Visitor};

/// Dispatch on `root`, then on every descendant, parents before children.
pub fn preorder<V: Visitor + ?Sized>(ctx: &Context, root: ExprId, v: &mut V) {
    let _ = accept(ctx, root, v);
    match ctx.get(root) {
        Expr::Number(_) | Expr::Symbol(_) | Expr::Poly { .. } => {}
        Expr::Pow { base, exp } => {
            preorder(ctx, *base, v);
            preorder(ctx, *exp, v);
        }
        Expr::Mul { factors, .. } => {
            for &(base, exp) in factors {
                preorder(ctx, base, v);
                preorder(ctx, exp, v);
            }
        }
        Expr::Add { terms, .. } => {
            for &(term, _) in terms {
                preorder(ctx, term, v);
            }
        }
    }
}

/// Dispatch on every descendant, children before parents, then on `root`.
pub fn postorder<V: Visitor + ?Sized>(ctx: &Context, root: ExprId, v: &mut V) {
    match ctx.get(root) {
        Expr::Number(_) | Expr::Symbol(_) | Expr::Poly { .. } => {}
        Expr::Pow { base, exp } => {
            postorder(ctx, *base, v);
            postorder(ctx, *exp, v);
        }
        Expr::Mul { factors, .. } => {
            for &(base, exp) in factors {
                postorder(ctx, base, v);
                postorder(ctx, exp, v);
            }
        }
        Expr::Add { terms, .. } => {
            for &(term, _) in terms {
                postorder(ctx, term, v);
            }
        }
    }
    let _ = accept(ctx, root, v);
}

/// Cancellable [`preorder`]: the first `Break` unwinds the whole walk.
pub fn try_preorder<V: Visitor + ?Sized>(
    ctx: &Context,
    root: ExprId,
    v: &mut V,
) -> ControlFlow<()> {
    accept(ctx, root, v)?;
    match ctx.get(root) {
        Expr::Number(_) | Expr::Symbol(_) | Expr::Poly { .. } => {}
        Expr::Pow { base, exp } => {
            try_preorder(ctx, *base, v)?;
            try_preorder(ctx, *exp, v)?;
        }
        Expr::Mul { factors, .. } => {
            for &(base, exp) in factors {
                try_preorder(ctx, base, v)?;
                try_preorder(ctx, exp, v)?;
            }
        }
        Expr::Add { terms, .. } => {
            for &(term, _) in terms {
                try_preorder(ctx, term, v)?;
            }
        }
    }
    ControlFlow::Continue(())
}

/// Cancellable [`postorder`]: the first `Break` unwinds the whole walk.
pub fn try_postorder<V: Visitor + ?Sized>(
    ctx: &Context,
    root: ExprId,
    v: &mut V,
) -> ControlFlow<()> {
    match ctx.get(root) {
        Expr::Number(_) | Expr::Symbol(_) | Expr::Poly { .. } => {}
        Expr::Pow { base, exp } => {
            try_postorder(ctx, *base, v)?;
            try_postorder(ctx, *exp, v)?;
        }
        Expr::Mul { factors, .. } => {
            for &(base, exp) in factors {
                try_postorder(ctx, base, v)?;
                try_postorder(ctx, exp, v)?;
            }
        }
        Expr::Add { terms, .. } => {
            for &(term, _) in terms {
                try_postorder(ctx, term, v)?;
            }
        }
    }
    accept(ctx, root, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the dispatch order; optionally breaks at one node.
    struct Trace {
        visited: Vec<ExprId>,
        stop_at: Option<ExprId>,
    }

    impl Trace {
        fn new() -> Self {
            Self {
                visited: Vec::new(),
                stop_at: None,
            }
        }

        fn stopping_at(id: ExprId) -> Self {
            Self {
                visited: Vec::new(),
                stop_at: Some(id),
            }
        }
    }

    impl Visitor for Trace {
        fn visit_default(&mut self, _ctx: &Context, id: ExprId) -> ControlFlow<()> {
            self.visited.push(id);
            if self.stop_at == Some(id) {
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        }
    }

    /// x + 2*y as (root, x, y).
    fn sum_tree(ctx: &mut Context) -> (ExprId, ExprId, ExprId) {
        use num_bigint::BigInt;
        use num_rational::BigRational;
        use num_traits::{One, Zero};
        let x = ctx.var("x");
        let y = ctx.var("y");
        let root = ctx.add_from_dict(
            BigRational::zero(),
            vec![
                (x, BigRational::one()),
                (y, BigRational::from_integer(BigInt::from(2))),
            ],
        );
        (root, x, y)
    }

    #[test]
    fn test_preorder_root_first() {
        let mut ctx = Context::new();
        let (root, x, y) = sum_tree(&mut ctx);

        let mut v = Trace::new();
        preorder(&ctx, root, &mut v);
        assert_eq!(v.visited, vec![root, x, y]);
    }

    #[test]
    fn test_postorder_root_last() {
        let mut ctx = Context::new();
        let (root, x, y) = sum_tree(&mut ctx);

        let mut v = Trace::new();
        postorder(&ctx, root, &mut v);
        assert_eq!(v.visited, vec![x, y, root]);
    }

    #[test]
    fn test_preorder_visits_pow_base_then_exp() {
        let mut ctx = Context::new();
        let x = ctx.var("x");
        let two = ctx.num(2);
        let p = ctx.pow(x, two);

        let mut v = Trace::new();
        preorder(&ctx, p, &mut v);
        assert_eq!(v.visited, vec![p, x, two]);
    }

    #[test]
    fn test_root_visited_exactly_once() {
        let mut ctx = Context::new();
        let (root, ..) = sum_tree(&mut ctx);

        let mut pre = Trace::new();
        preorder(&ctx, root, &mut pre);
        assert_eq!(pre.visited.iter().filter(|&&id| id == root).count(), 1);

        let mut post = Trace::new();
        postorder(&ctx, root, &mut post);
        assert_eq!(post.visited.iter().filter(|&&id| id == root).count(), 1);
    }

    #[test]
    fn test_try_preorder_stops_siblings_and_descendants() {
        let mut ctx = Context::new();
        // y + x^2: the symbol y ranks before the Pow node, so it is the
        // first child. Cancelling at y must skip the whole x^2 subtree.
        use num_rational::BigRational;
        use num_traits::{One, Zero};
        let x = ctx.var("x");
        let two = ctx.num(2);
        let xsq = ctx.pow(x, two);
        let y = ctx.var("y");
        let root = ctx.add_from_dict(
            BigRational::zero(),
            vec![(xsq, BigRational::one()), (y, BigRational::one())],
        );

        let mut v = Trace::stopping_at(y);
        let flow = try_preorder(&ctx, root, &mut v);
        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(v.visited, vec![root, y]);
        assert!(!v.visited.contains(&xsq));
        assert!(!v.visited.contains(&x));
        assert!(!v.visited.contains(&two));
    }

    #[test]
    fn test_try_postorder_stops_remaining_nodes() {
        let mut ctx = Context::new();
        let (root, x, y) = sum_tree(&mut ctx);

        let mut v = Trace::stopping_at(x);
        let flow = try_postorder(&ctx, root, &mut v);
        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(v.visited, vec![x]);
        assert!(!v.visited.contains(&y));
        assert!(!v.visited.contains(&root));
    }

    #[test]
    fn test_plain_drivers_ignore_break() {
        let mut ctx = Context::new();
        let (root, x, _y) = sum_tree(&mut ctx);

        let mut v = Trace::stopping_at(x);
        preorder(&ctx, root, &mut v);
        assert_eq!(v.visited.len(), 3, "plain walk visits everything");
    }
}
