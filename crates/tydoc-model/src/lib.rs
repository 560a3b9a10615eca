//! Resolved type description trees.
//!
//! This crate defines the output vocabulary of the tydoc engine: a
//! serializable tree of [`TypeNode`]s, each tagged with a closed structural
//! category ([`NodeKind`]). Trees are built once by the resolver and are
//! immutable afterwards.
//!
//! Key properties of the model:
//! - `NodeKind` is a closed sum type; consumers can match exhaustively and
//!   the compiler keeps every dispatcher honest when a category is added.
//! - `text` on every node is the verbatim rendered annotation at the point
//!   of reference, never a re-rendering of the resolved shape.
//! - Union and intersection member order is declaration order and is never
//!   canonicalized.
//! - Structural flags (`is_optional`, `is_readonly`, `is_rest`, ...) are
//!   plain booleans computed by the resolver, never parsed out of `text`.

pub mod literal;
pub mod node;
pub mod position;

pub use literal::LiteralValue;
pub use node::{
    AccessorPair, ClassMethod, ClassProperty, DocTag, EnumMember, IndexMember, MappedKey,
    MappedModifier, Member, MethodMember, NodeKind, Parameter, PropertyMember, Signature,
    TupleElement, TypeNode, TypeOperatorKind, TypeParam, Visibility,
};
pub use position::Position;
