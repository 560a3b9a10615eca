//! The abstract type-checker collaborator boundary.
//!
//! The resolver never loads programs or infers types; all type and symbol
//! data arrives through the [`TypeHost`] trait defined here. Hosts hand out
//! opaque handles ([`TypeHandle`], [`DeclId`], [`SymbolId`]) and answer
//! structural queries about them ([`ShapeDescriptor`]), which is exactly
//! enough for the resolver to dispatch and recurse.
//!
//! The host is passed explicitly into every resolution call (`&dyn
//! TypeHost`), never reached through a global, so independent calls share
//! no mutable state.
//!
//! [`FixtureHost`] is an in-memory implementation used by the test suites
//! across the workspace.

pub mod fixture;
pub mod handles;
pub mod host;
pub mod shape;

pub use fixture::FixtureHost;
pub use handles::{DeclId, SymbolId, TypeHandle};
pub use host::{DocComment, HostError, HostResult, Initializer, SourceSpan, TypeHost};
pub use shape::{
    AliasDesc, ClassDesc, ClassMemberDesc, ClassMemberKind, ConditionalDesc, EnumDesc,
    EnumMemberDesc, IndexDesc, InitializerExpr, IntrinsicKind, MappedDesc, MemberDesc,
    ModifierFlags, ParameterDesc, PropertyDesc, Shape, ShapeDescriptor, SignatureDesc,
    TupleElementDesc, TypeParamDesc,
};
