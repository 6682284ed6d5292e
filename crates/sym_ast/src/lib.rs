//! Expression representation and traversal core.
//!
//! Immutable expression nodes live in a hash-consing [`Context`] arena and
//! are addressed by [`ExprId`]. Algorithms are written as visitors: one
//! handler per node kind, a single overridable fallback, and traversal
//! drivers that walk children in canonical order.

pub mod coefficient;
pub mod expression;
pub mod has_symbol;
pub mod kind;
pub mod ordering;
pub mod symbol;
pub mod traversal;
pub mod visitor;

pub use coefficient::{coefficient_of, CoefficientExtractor};
pub use expression::{Context, ContextStats, Expr, ExprId};
pub use has_symbol::{contains_symbol, SymbolSearch};
pub use kind::NodeKind;
pub use ordering::{compare, eq};
pub use symbol::{SymbolId, SymbolTable};
pub use traversal::{postorder, preorder, try_postorder, try_preorder};
pub use visitor::{accept, Transformer, Visitor};
