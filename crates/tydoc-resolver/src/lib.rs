//! Structural type resolver.
//!
//! Turns type handles from a host checker ([`tydoc_host::TypeHost`]) into
//! serializable [`tydoc_model::TypeNode`] trees. The walk is synchronous,
//! depth-first, and call-scoped: the only mutable state is the recursion
//! guard created per call, so independent calls are freely parallel.
//!
//! The one-stop entry point mirrors the engine's public surface:
//!
//! ```ignore
//! let node = tydoc_resolver::resolve_type(&host, handle, Some(decl), None)?;
//! ```
//!
//! For options (strict null-tracking, expansion depth, the component
//! heuristic) build a [`Resolver`] directly:
//!
//! ```ignore
//! let options = ResolverOptions {
//!     component: Some(ComponentPolicy::new(["Element"])),
//!     ..ResolverOptions::default()
//! };
//! let node = Resolver::new(&host).with_options(options).resolve(handle, None)?;
//! ```

mod class;
pub mod component;
pub mod metadata;
pub mod recursion;
mod resolve;
pub mod visibility;

pub use component::ComponentPolicy;
pub use recursion::{DEFAULT_MAX_DEPTH, ExpansionGuard, GuardEntry};
pub use resolve::{Resolver, ResolverOptions};
pub use visibility::{Expansion, FilterPredicate, SymbolMeta};

use tydoc_host::{DeclId, HostError, TypeHandle, TypeHost};
use tydoc_model::TypeNode;

/// Resolve one type handle into a description tree.
///
/// `origin` is the declaration the handle came from (its doc comment and
/// source span land on the root node); `filter` overrides the default
/// inline-vs-reference policy per symbol. Default options apply; use
/// [`Resolver`] for anything fancier.
///
/// The only error is the host failing to answer; unresolved symbols and
/// unrecognized shapes degrade to `Unknown` nodes instead.
pub fn resolve_type(
    host: &dyn TypeHost,
    ty: TypeHandle,
    origin: Option<DeclId>,
    filter: Option<&FilterPredicate>,
) -> Result<TypeNode, HostError> {
    let mut resolver = Resolver::new(host);
    if let Some(filter) = filter {
        resolver = resolver.with_filter(filter);
    }
    resolver.resolve(ty, origin)
}
