//! Expression nodes and the hash-consing arena.
//!
//! Nodes are immutable once inserted and addressed by [`ExprId`]. The
//! [`Context`] deduplicates on insert, so building the same structure twice
//! yields the same id and `ExprId` equality implies structural equality
//! within one context. Sum and product term mappings are stored sorted by the
//! structural order, which fixes the canonical child order traversal relies
//! on.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use rustc_hash::FxHashMap;
use sym_poly::SparsePoly;

use crate::kind::NodeKind;
use crate::ordering::compare;
use crate::symbol::{SymbolId, SymbolTable};

/// Index of a node in its [`Context`] arena.
pub type ExprId = usize;

/// An immutable expression node.
///
/// `Add` and `Mul` keep an overall rational constant next to their term
/// mapping: `Add` is `coef + Σ kᵢ·termᵢ`, `Mul` is `coef · Π baseᵢ^expᵢ`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Numeric leaf.
    Number(BigRational),
    /// Interned symbol.
    Symbol(SymbolId),
    /// Sum: addend → rational coefficient, in canonical order.
    Add {
        coef: BigRational,
        terms: Vec<(ExprId, BigRational)>,
    },
    /// Product: base → exponent, in canonical order, times a rational scalar.
    Mul {
        coef: BigRational,
        factors: Vec<(ExprId, ExprId)>,
    },
    /// Power.
    Pow { base: ExprId, exp: ExprId },
    /// Sparse integer polynomial in one generator symbol.
    Poly { var: SymbolId, dict: SparsePoly },
}

impl Expr {
    /// The stable kind tag of this node. O(1).
    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Number(_) => NodeKind::Number,
            Expr::Symbol(_) => NodeKind::Symbol,
            Expr::Poly { .. } => NodeKind::Poly,
            Expr::Pow { .. } => NodeKind::Pow,
            Expr::Mul { .. } => NodeKind::Mul,
            Expr::Add { .. } => NodeKind::Add,
        }
    }
}

/// Arena creation counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextStats {
    /// Nodes physically inserted (dedup hits excluded).
    pub nodes_created: usize,
    /// Inserts satisfied by an already-present structurally equal node.
    pub dedup_hits: usize,
}

/// Arena of hash-consed expression nodes plus the symbol table.
#[derive(Debug, Default)]
pub struct Context {
    nodes: Vec<Expr>,
    interned: FxHashMap<Expr, ExprId>,
    symbols: SymbolTable,
    stats: ContextStats,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, reusing the id of an existing structurally equal one.
    pub fn insert(&mut self, expr: Expr) -> ExprId {
        if let Some(&id) = self.interned.get(&expr) {
            self.stats.dedup_hits += 1;
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(expr.clone());
        self.interned.insert(expr, id);
        self.stats.nodes_created += 1;
        id
    }

    /// Fetch a node.
    ///
    /// # Panics
    /// Panics on an id not issued by this context.
    #[inline]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.nodes[id]
    }

    pub fn stats(&self) -> &ContextStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Intern a symbol name without creating a node.
    pub fn sym(&mut self, name: &str) -> SymbolId {
        self.symbols.intern(name)
    }

    /// Resolve an interned symbol name.
    pub fn sym_name(&self, id: SymbolId) -> &str {
        self.symbols.resolve(id)
    }

    /// Id of a name if it was ever interned.
    pub fn sym_id(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get_id(name)
    }

    /// Symbol node for `name`.
    pub fn var(&mut self, name: &str) -> ExprId {
        let sym = self.symbols.intern(name);
        self.insert(Expr::Symbol(sym))
    }

    /// Integer number node.
    pub fn num(&mut self, n: i64) -> ExprId {
        self.insert(Expr::Number(BigRational::from_integer(BigInt::from(n))))
    }

    /// Rational number node.
    pub fn num_rational(&mut self, n: BigRational) -> ExprId {
        self.insert(Expr::Number(n))
    }

    /// Power node. No canonicalization beyond hash-consing.
    pub fn pow(&mut self, base: ExprId, exp: ExprId) -> ExprId {
        self.insert(Expr::Pow { base, exp })
    }

    /// Polynomial node over the generator `var`.
    pub fn poly(&mut self, var: &str, dict: SparsePoly) -> ExprId {
        let sym = self.symbols.intern(var);
        self.insert(Expr::Poly { var: sym, dict })
    }

    /// Canonicalizing sum constructor.
    ///
    /// Merges duplicate addends, folds numeric addends into the constant,
    /// drops zero coefficients, and collapses degenerate shapes: an empty
    /// dict becomes `Number(coef)`, a lone `1·t` dict with zero constant
    /// becomes `t` itself.
    pub fn add_from_dict(
        &mut self,
        mut coef: BigRational,
        terms: Vec<(ExprId, BigRational)>,
    ) -> ExprId {
        let mut merged: Vec<(ExprId, BigRational)> = Vec::new();
        for (term, k) in terms {
            if k.is_zero() {
                continue;
            }
            if let Expr::Number(n) = self.get(term) {
                coef += n * &k;
                continue;
            }
            match merged.iter_mut().find(|(t, _)| *t == term) {
                Some(entry) => entry.1 += &k,
                None => merged.push((term, k)),
            }
        }
        merged.retain(|(_, k)| !k.is_zero());

        if merged.is_empty() {
            return self.insert(Expr::Number(coef));
        }
        if coef.is_zero() && merged.len() == 1 && merged[0].1.is_one() {
            return merged[0].0;
        }
        let ctx = &*self;
        merged.sort_by(|x, y| compare(ctx, x.0, y.0));
        self.insert(Expr::Add {
            coef,
            terms: merged,
        })
    }

    /// Canonicalizing product constructor.
    ///
    /// A zero scalar collapses to zero, zero exponents are dropped, an empty
    /// dict becomes `Number(coef)`, and a lone factor with unit scalar
    /// becomes the bare base (unit exponent) or a `Pow` node.
    pub fn mul_from_dict(
        &mut self,
        coef: BigRational,
        factors: Vec<(ExprId, ExprId)>,
    ) -> ExprId {
        if coef.is_zero() {
            return self.num(0);
        }
        let mut kept: Vec<(ExprId, ExprId)> = Vec::new();
        for (base, exp) in factors {
            if matches!(self.get(exp), Expr::Number(n) if n.is_zero()) {
                continue;
            }
            kept.push((base, exp));
        }

        if kept.is_empty() {
            return self.insert(Expr::Number(coef));
        }
        if coef.is_one() && kept.len() == 1 {
            let (base, exp) = kept[0];
            if matches!(self.get(exp), Expr::Number(n) if n.is_one()) {
                return base;
            }
            return self.insert(Expr::Pow { base, exp });
        }
        let ctx = &*self;
        kept.sort_by(|x, y| compare(ctx, x.0, y.0).then_with(|| compare(ctx, x.1, y.1)));
        self.insert(Expr::Mul {
            coef,
            factors: kept,
        })
    }

    /// Binary sum convenience: `a + b`.
    pub fn add2(&mut self, a: ExprId, b: ExprId) -> ExprId {
        self.add_from_dict(
            BigRational::zero(),
            vec![(a, BigRational::one()), (b, BigRational::one())],
        )
    }

    /// Binary product convenience: `a * b`.
    pub fn mul2(&mut self, a: ExprId, b: ExprId) -> ExprId {
        let one = self.num(1);
        self.mul_from_dict(BigRational::one(), vec![(a, one), (b, one)])
    }
}
