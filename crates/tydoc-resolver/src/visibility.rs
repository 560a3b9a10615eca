//! Inline-vs-reference policy for named symbols.
//!
//! Every occurrence of a named composite resolves to exactly one of a full
//! expansion or a `Reference` node. The default draws the line at the
//! first-party boundary: local declarations inline, vendored ones collapse.
//! A caller-supplied predicate can redraw it per symbol: `true` forces
//! inlining (even for vendored symbols), `false` forces a reference (even
//! for first-party ones).
//!
//! The recursion guard's mid-expansion check is applied *before* this
//! policy and always wins; a symbol on the current expansion stack
//! collapses no matter what the predicate says.

/// What to do with one occurrence of a named symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Expansion {
    /// Expand the declaration in place.
    Inline,
    /// Emit a terminal `Reference` node.
    Reference,
}

/// Symbol facts handed to the filter predicate.
#[derive(Copy, Clone, Debug)]
pub struct SymbolMeta<'a> {
    pub name: &'a str,
    /// Declared outside the first-party tree.
    pub is_vendored: bool,
    /// File of the first declaration.
    pub file_path: &'a str,
}

/// Caller-supplied override: `true` → inline, `false` → collapse.
pub type FilterPredicate = dyn Fn(&SymbolMeta<'_>) -> bool;

/// Decide inline-vs-reference for a symbol occurrence.
pub fn decide(meta: &SymbolMeta<'_>, filter: Option<&FilterPredicate>) -> Expansion {
    match filter {
        Some(predicate) => {
            if predicate(meta) {
                Expansion::Inline
            } else {
                Expansion::Reference
            }
        }
        None => {
            if meta.is_vendored {
                Expansion::Reference
            } else {
                Expansion::Inline
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/visibility_tests.rs"]
mod tests;
