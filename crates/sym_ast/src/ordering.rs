//! Structural total order over expressions.
//!
//! Kind rank is the primary key; nodes of the same kind break ties on their
//! fields. This order is what the canonical term layout of sums and products
//! is sorted by.

use std::cmp::Ordering;

use num_rational::BigRational;

use crate::expression::{Context, Expr, ExprId};

/// Compare two expressions structurally.
///
/// Equal ids short-circuit: the arena hash-conses, so identical structure
/// means identical id within one context.
pub fn compare(ctx: &Context, a: ExprId, b: ExprId) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let ea = ctx.get(a);
    let eb = ctx.get(b);

    let rank = ea.kind().cmp(&eb.kind());
    if rank != Ordering::Equal {
        return rank;
    }

    match (ea, eb) {
        (Expr::Number(x), Expr::Number(y)) => x.cmp(y),
        (Expr::Symbol(x), Expr::Symbol(y)) => ctx.sym_name(*x).cmp(ctx.sym_name(*y)),
        (Expr::Poly { var: v1, dict: d1 }, Expr::Poly { var: v2, dict: d2 }) => ctx
            .sym_name(*v1)
            .cmp(ctx.sym_name(*v2))
            .then_with(|| d1.cmp(d2)),
        (Expr::Pow { base: b1, exp: e1 }, Expr::Pow { base: b2, exp: e2 }) => {
            match compare(ctx, *b1, *b2) {
                Ordering::Equal => compare(ctx, *e1, *e2),
                ord => ord,
            }
        }
        (
            Expr::Mul {
                coef: c1,
                factors: f1,
            },
            Expr::Mul {
                coef: c2,
                factors: f2,
            },
        ) => c1.cmp(c2).then_with(|| compare_factors(ctx, f1, f2)),
        (
            Expr::Add {
                coef: c1,
                terms: t1,
            },
            Expr::Add {
                coef: c2,
                terms: t2,
            },
        ) => c1.cmp(c2).then_with(|| compare_terms(ctx, t1, t2)),
        // Ranks already matched, so both sides have the same variant.
        _ => unreachable!("kind ranks diverge from variants"),
    }
}

/// Structural equality.
pub fn eq(ctx: &Context, a: ExprId, b: ExprId) -> bool {
    compare(ctx, a, b) == Ordering::Equal
}

fn compare_factors(
    ctx: &Context,
    f1: &[(ExprId, ExprId)],
    f2: &[(ExprId, ExprId)],
) -> Ordering {
    for ((b1, e1), (b2, e2)) in f1.iter().zip(f2.iter()) {
        let ord = compare(ctx, *b1, *b2).then_with(|| compare(ctx, *e1, *e2));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    f1.len().cmp(&f2.len())
}

fn compare_terms(
    ctx: &Context,
    t1: &[(ExprId, BigRational)],
    t2: &[(ExprId, BigRational)],
) -> Ordering {
    for ((x1, k1), (x2, k2)) in t1.iter().zip(t2.iter()) {
        let ord = compare(ctx, *x1, *x2).then_with(|| k1.cmp(k2));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    t1.len().cmp(&t2.len())
}
