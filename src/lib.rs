//! tydoc: a type-resolution and normalization engine.
//!
//! Given a type handle from a host static type-checker, tydoc produces a
//! fully-resolved, serializable description tree whose nodes are tagged by
//! structural category. It walks arbitrarily deep (and cyclic) graphs of
//! named types, decides per symbol whether to inline or collapse to a
//! reference, attaches documentation and default-value metadata, and
//! terminates deterministically on self- and mutually-recursive
//! declarations.
//!
//! This facade crate re-exports the three workspace members:
//! - [`tydoc_model`]: the `TypeNode` output tree;
//! - [`tydoc_host`]: the abstract checker collaborator boundary;
//! - [`tydoc_resolver`]: the resolution engine and its entry point.
//!
//! ```ignore
//! use tydoc::{resolve_type, Resolver, ResolverOptions};
//!
//! let tree = resolve_type(&checker, handle, Some(decl), None)?;
//! let json = serde_json::to_string(&tree)?;
//! ```

pub use tydoc_host::{
    DeclId, DocComment, FixtureHost, HostError, HostResult, Initializer, Shape, ShapeDescriptor,
    SourceSpan, SymbolId, TypeHandle, TypeHost,
};
pub use tydoc_model::{LiteralValue, NodeKind, Position, TypeNode};
pub use tydoc_resolver::{
    ComponentPolicy, Expansion, FilterPredicate, Resolver, ResolverOptions, SymbolMeta,
    resolve_type,
};
