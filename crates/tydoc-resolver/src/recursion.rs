//! Call-scoped guard against infinite expansion of named type graphs.
//!
//! The resolver pushes a symbol here before expanding its declaration and
//! pops it after; a symbol found already on the stack is a cycle and comes
//! back as a `Reference` node instead of being re-entered. The set lives
//! for exactly one top-level resolution call. It is *not* a memo table, so
//! a symbol expanded once can be expanded again on a sibling path (see the
//! equal-depth precedence note in DESIGN.md).
//!
//! A depth limit backs the cycle set as stack-overflow defense. Hitting it
//! collapses the expansion like a cycle does; it is never an error.
//!
//! In debug builds, dropping a guard with live entries or leaving a key
//! that was never entered panics, catching unbalanced enter/leave pairs.

use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Default expansion depth. Generous: real declaration graphs nest named
/// composites far shallower than this before a cycle breaks the path.
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Outcome of attempting to enter an expansion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GuardEntry {
    /// Proceed; the caller must `leave()` with the same key.
    Entered,
    /// The key is already mid-expansion on this call stack.
    Cycle,
    /// Nesting limit reached; collapse instead of expanding.
    DepthExceeded,
}

impl GuardEntry {
    #[inline]
    pub fn is_entered(self) -> bool {
        matches!(self, Self::Entered)
    }
}

/// Tracks the set of symbols currently being expanded in one call.
pub struct ExpansionGuard<K: Hash + Eq + Copy> {
    expanding: FxHashSet<K>,
    depth: u32,
    max_depth: u32,
    exceeded: bool,
}

impl<K: Hash + Eq + Copy> ExpansionGuard<K> {
    pub fn new(max_depth: u32) -> Self {
        Self {
            expanding: FxHashSet::default(),
            depth: 0,
            max_depth,
            exceeded: false,
        }
    }

    /// Try to enter an expansion for `key`.
    pub fn enter(&mut self, key: K) -> GuardEntry {
        if self.expanding.contains(&key) {
            return GuardEntry::Cycle;
        }
        if self.depth >= self.max_depth {
            self.exceeded = true;
            return GuardEntry::DepthExceeded;
        }
        self.expanding.insert(key);
        self.depth += 1;
        GuardEntry::Entered
    }

    /// Leave an expansion. Must be called exactly once per successful
    /// [`enter`](Self::enter).
    pub fn leave(&mut self, key: K) {
        let was_present = self.expanding.remove(&key);
        debug_assert!(
            was_present,
            "ExpansionGuard::leave() for a key that is not mid-expansion \
             (double leave, or leave without enter)"
        );
        self.depth = self.depth.saturating_sub(1);
    }

    /// Is `key` on the current expansion stack?
    #[inline]
    pub fn is_expanding(&self, key: &K) -> bool {
        self.expanding.contains(key)
    }

    /// Run `f` inside a guarded scope, or report why entry was denied.
    pub fn scope<T>(&mut self, key: K, f: impl FnOnce(&mut Self) -> T) -> Result<T, GuardEntry> {
        match self.enter(key) {
            GuardEntry::Entered => {
                let value = f(self);
                self.leave(key);
                Ok(value)
            }
            denied => Err(denied),
        }
    }

    /// Number of expansions currently on the stack.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Sticky flag: has the depth limit ever been hit in this call?
    #[inline]
    pub fn is_exceeded(&self) -> bool {
        self.exceeded
    }
}

#[cfg(debug_assertions)]
impl<K: Hash + Eq + Copy> Drop for ExpansionGuard<K> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.expanding.is_empty() {
            panic!(
                "ExpansionGuard dropped with {} live entries; some enter() has no matching leave()",
                self.expanding.len(),
            );
        }
    }
}

#[cfg(test)]
#[path = "../tests/recursion_tests.rs"]
mod tests;
