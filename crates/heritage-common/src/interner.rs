//! Name interner for class and type-parameter identifiers.
//!
//! Names are interned into a shared pool and passed around as `u32` handles
//! (`Atom`). Substitution maps and class lookups then compare integers
//! instead of strings.
//!
//! The interner takes `&self` for every operation so it can live inside a
//! store that is shared between threads.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// An interned name.
///
/// Atoms are cheap to copy (just a u32) and can be compared with == in O(1).
/// To get the actual string, use `Interner::resolve(atom)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// A sentinel value representing no atom / empty string.
    pub const NONE: Atom = Atom(0);

    /// Check if this is the empty/none atom.
    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Get the raw index value.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Default)]
struct NameTable {
    map: FxHashMap<Arc<str>, Atom>,
    strings: Vec<Arc<str>>,
}

/// Concurrent name interner.
///
/// # Example
/// ```
/// use heritage_common::Interner;
/// let interner = Interner::new();
/// let a1 = interner.intern("T");
/// let a2 = interner.intern("T");
/// assert_eq!(a1, a2);
/// assert_eq!(&*interner.resolve(a1), "T");
/// ```
pub struct Interner {
    table: RwLock<NameTable>,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    /// Create a new interner with the empty string pre-interned at index 0.
    pub fn new() -> Self {
        let mut table = NameTable::default();
        let empty: Arc<str> = Arc::from("");
        table.strings.push(empty.clone());
        table.map.insert(empty, Atom::NONE);
        Interner {
            table: RwLock::new(table),
        }
    }

    /// Intern a name, returning its Atom handle.
    /// If the name was already interned, returns the existing Atom.
    pub fn intern(&self, s: &str) -> Atom {
        if s.is_empty() {
            return Atom::NONE;
        }
        if let Some(atom) = self.lookup(s) {
            return atom;
        }

        let mut table = self.write();
        // Another writer may have won the race between the read and write lock.
        if let Some(&atom) = table.map.get(s) {
            return atom;
        }
        let atom = Atom(table.strings.len() as u32);
        let owned: Arc<str> = Arc::from(s);
        table.strings.push(owned.clone());
        table.map.insert(owned, atom);
        atom
    }

    /// Look up an already-interned name without inserting it.
    pub fn lookup(&self, s: &str) -> Option<Atom> {
        self.read().map.get(s).copied()
    }

    /// Resolve an Atom back to its string value.
    /// Returns empty string if atom is out of bounds.
    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        self.try_resolve(atom).unwrap_or_else(|| Arc::from(""))
    }

    /// Try to resolve an Atom, returning None if invalid.
    pub fn try_resolve(&self, atom: Atom) -> Option<Arc<str>> {
        self.read().strings.get(atom.0 as usize).cloned()
    }

    /// Get the number of interned names (including the empty name).
    pub fn len(&self) -> usize {
        self.read().strings.len()
    }

    /// Check if the interner is empty (only has the empty string).
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    // The table is append-only, so a writer that panicked cannot leave it
    // half-updated in a way readers would observe.
    fn read(&self) -> RwLockReadGuard<'_, NameTable> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, NameTable> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "../tests/interner_tests.rs"]
mod tests;
