//! Stable node-kind identifiers.
//!
//! The node set is closed, so kind ids are enum discriminants fixed at
//! compile time: registration is idempotent by construction and `kind_of` is
//! a tag read. The discriminant order doubles as the total preorder over
//! kinds used as the primary sort key of expression ordering.

/// Concrete node kinds, in canonical rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum NodeKind {
    Number = 0,
    Symbol,
    Poly,
    Pow,
    Mul,
    Add,
}

impl NodeKind {
    /// Total number of node kinds.
    pub const COUNT: usize = 6;

    /// The stable identifier of this kind.
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            NodeKind::Number => "Number",
            NodeKind::Symbol => "Symbol",
            NodeKind::Poly => "Poly",
            NodeKind::Pow => "Pow",
            NodeKind::Mul => "Mul",
            NodeKind::Add => "Add",
        }
    }

    /// Inverse of [`NodeKind::id`].
    ///
    /// # Panics
    /// Panics on an id no kind was ever assigned: that is a broken internal
    /// invariant, not a recoverable condition.
    pub fn from_id(id: u8) -> Self {
        match id {
            0 => NodeKind::Number,
            1 => NodeKind::Symbol,
            2 => NodeKind::Poly,
            3 => NodeKind::Pow,
            4 => NodeKind::Mul,
            5 => NodeKind::Add,
            _ => panic!("unknown node kind id {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_stable() {
        assert_eq!(NodeKind::Number.id(), 0);
        assert_eq!(NodeKind::Symbol.id(), 1);
        assert_eq!(NodeKind::Poly.id(), 2);
        assert_eq!(NodeKind::Pow.id(), 3);
        assert_eq!(NodeKind::Mul.id(), 4);
        assert_eq!(NodeKind::Add.id(), 5);
    }

    #[test]
    fn test_from_id_roundtrip() {
        for id in 0..NodeKind::COUNT as u8 {
            assert_eq!(NodeKind::from_id(id).id(), id);
        }
    }

    #[test]
    #[should_panic(expected = "unknown node kind id")]
    fn test_from_id_rejects_unknown() {
        NodeKind::from_id(200);
    }

    #[test]
    fn test_rank_order() {
        assert!(NodeKind::Number < NodeKind::Symbol);
        assert!(NodeKind::Pow < NodeKind::Mul);
        assert!(NodeKind::Mul < NodeKind::Add);
    }
}
