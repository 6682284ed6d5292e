//! Symbol occurrence search.
//!
//! Observer-style visitor: the cancellable preorder driver recurses, the
//! visitor only reacts, and the first hit cancels the rest of the walk.

use std::ops::ControlFlow;

use sym_poly::SparsePoly;

use crate::expression::{Context, Expr, ExprId};
use crate::symbol::SymbolId;
use crate::traversal::try_preorder;
use crate::visitor::Visitor;

/// Looks for one symbol anywhere in a tree.
///
/// Reusable: every [`SymbolSearch::apply`] resets the found flag before
/// walking, so no state leaks between applies.
pub struct SymbolSearch {
    target: SymbolId,
    found: bool,
}

impl SymbolSearch {
    pub fn new(target: SymbolId) -> Self {
        Self {
            target,
            found: false,
        }
    }

    /// True iff the target symbol occurs structurally in `root`'s tree.
    pub fn apply(&mut self, ctx: &Context, root: ExprId) -> bool {
        self.found = false;
        let _ = try_preorder(ctx, root, self);
        self.found
    }
}

impl Visitor for SymbolSearch {
    fn visit_symbol(&mut self, _ctx: &Context, _id: ExprId, sym: SymbolId) -> ControlFlow<()> {
        if sym == self.target {
            self.found = true;
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }

    // A polynomial node mentions its generator without holding a child
    // symbol node.
    fn visit_poly(
        &mut self,
        _ctx: &Context,
        _id: ExprId,
        var: SymbolId,
        _dict: &SparsePoly,
    ) -> ControlFlow<()> {
        if var == self.target {
            self.found = true;
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}

/// Whether the symbol node `target` occurs anywhere in `root`'s tree.
///
/// `target` must be a `Symbol` node; anything else never occurs "as a
/// symbol" and yields false.
pub fn contains_symbol(ctx: &Context, root: ExprId, target: ExprId) -> bool {
    match ctx.get(target) {
        Expr::Symbol(sym) => SymbolSearch::new(*sym).apply(ctx, root),
        _ => false,
    }
}
