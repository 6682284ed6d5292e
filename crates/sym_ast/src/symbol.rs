//! Symbol interning.
//!
//! Every symbol name is stored once; nodes carry a [`SymbolId`] so symbol
//! equality is an integer compare.

use rustc_hash::FxHashMap;

/// Identifier of an interned symbol name. Index into the table's storage.
pub type SymbolId = usize;

/// Interning table for symbol names.
///
/// Single-threaded by design; lives inside `Context`.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    names: Vec<String>,
    lookup: FxHashMap<String, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a name, returning its id. Idempotent.
    pub fn intern(&mut self, name: &str) -> SymbolId {
        if let Some(&id) = self.lookup.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.lookup.insert(name.to_string(), id);
        id
    }

    /// Resolve an id back to its name.
    ///
    /// # Panics
    /// Panics on an id that was never issued by this table.
    #[inline]
    pub fn resolve(&self, id: SymbolId) -> &str {
        &self.names[id]
    }

    /// Look up a name without interning it.
    #[inline]
    pub fn get_id(&self, name: &str) -> Option<SymbolId> {
        self.lookup.get(name).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_roundtrip() {
        let mut table = SymbolTable::new();
        let id = table.intern("x");
        assert_eq!(table.resolve(id), "x");
    }

    #[test]
    fn test_intern_is_idempotent() {
        let mut table = SymbolTable::new();
        assert_eq!(table.intern("x"), table.intern("x"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_distinct_names_distinct_ids() {
        let mut table = SymbolTable::new();
        assert_ne!(table.intern("x"), table.intern("y"));
    }

    #[test]
    fn test_get_id_does_not_intern() {
        let mut table = SymbolTable::new();
        assert_eq!(table.get_id("x"), None);
        let id = table.intern("x");
        assert_eq!(table.get_id("x"), Some(id));
    }
}
