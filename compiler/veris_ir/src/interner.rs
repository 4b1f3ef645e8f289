//! String interner and collision-free fresh-name generation.
//!
//! The interner hands out stable [`Name`] ids for identifier strings. Strings
//! are stored contiguously and never deallocated, so resolution returns a
//! `&'static str`. Interning goes through a lock so that interning stays
//! available behind a shared reference: the pattern-matching compiler holds
//! the context immutably but still mints fresh variable names while it runs.

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::name::Name;

struct InternerInner {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents.
    strings: Vec<&'static str>,
}

/// Interner for identifier strings.
pub struct NameInterner {
    inner: RwLock<InternerInner>,
}

impl NameInterner {
    pub fn new() -> Self {
        let interner = NameInterner {
            inner: RwLock::new(InternerInner {
                map: FxHashMap::default(),
                strings: Vec::with_capacity(256),
            }),
        };
        // Slot 0 is the pre-interned empty string backing `Name::EMPTY`.
        let empty = interner.intern("");
        debug_assert_eq!(empty, Name::EMPTY);
        interner
    }

    /// Intern a string, returning its stable id.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&idx) = self.inner.read().map.get(s) {
            return Name::from_raw(idx);
        }

        let mut inner = self.inner.write();
        // Double-check: another caller may have interned between the locks.
        if let Some(&idx) = inner.map.get(s) {
            return Name::from_raw(idx);
        }
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let idx = u32::try_from(inner.strings.len()).unwrap_or_else(|_| {
            panic!("interner overflow: more than u32::MAX distinct identifiers")
        });
        inner.strings.push(leaked);
        inner.map.insert(leaked, idx);
        Name::from_raw(idx)
    }

    /// Resolve a name back to its string content.
    ///
    /// # Panics
    ///
    /// Panics if `name` was not produced by this interner.
    pub fn resolve(&self, name: Name) -> &'static str {
        let inner = self.inner.read();
        inner
            .strings
            .get(name.raw() as usize)
            .copied()
            .unwrap_or_else(|| panic!("unknown name id {}", name.raw()))
    }
}

impl Default for NameInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Collision-free fresh-name generator.
///
/// Seeded with a set of names that are already in use (a rule's free
/// variables, or a context's declared symbols); `fresh` returns the first of
/// `base`, `base1`, `base2`, … not in that set and marks it used.
#[derive(Default)]
pub struct FreshNameGenerator {
    used: FxHashSet<Name>,
}

impl FreshNameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a name as already in use.
    pub fn add_identifier(&mut self, name: Name) {
        self.used.insert(name);
    }

    /// Produce a fresh name derived from `base`.
    pub fn fresh(&mut self, interner: &NameInterner, base: &str) -> Name {
        let mut counter: u64 = 0;
        loop {
            let name = if counter == 0 {
                interner.intern(base)
            } else {
                interner.intern(&format!("{base}{counter}"))
            };
            if self.used.insert(name) {
                return name;
            }
            counter += 1;
        }
    }
}

#[cfg(test)]
mod tests;
