//! The resolved type tree: [`TypeNode`] and the closed [`NodeKind`] tag set.

use crate::literal::LiteralValue;
use crate::position::Position;
use serde::Serialize;

fn is_false(v: &bool) -> bool {
    !v
}

/// One node of a resolved type tree.
///
/// Every node carries the closed structural tag (with its per-kind payload)
/// plus the fields common to all categories. `text` is the verbatim rendered
/// annotation at the point of reference.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeNode {
    #[serde(flatten)]
    pub kind: NodeKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Doc tags in source order; duplicate tag names are preserved.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<DocTag>,
}

impl TypeNode {
    /// Create a node with no name or metadata attached yet.
    pub fn new(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            name: None,
            file_path: None,
            position: None,
            description: None,
            tags: Vec::new(),
        }
    }

    /// Builder: attach a symbol or parameter name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A single doc-comment tag (`@deprecated since 2.0` → name `deprecated`,
/// body `since 2.0`). Order and duplicates are meaningful and preserved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocTag {
    pub name: String,
    pub body: String,
}

impl DocTag {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// The closed structural category set.
///
/// Serialized internally tagged as `"kind"`, so a union node becomes
/// `{"kind": "Union", "members": [...], ...}`. Consumers dispatch on this
/// tag; the resolver's own dispatcher is an exhaustive `match` over the host
/// shape vocabulary that produces exactly one of these per type occurrence.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum NodeKind {
    // Primitives: `text` only, no payload.
    Any,
    Unknown,
    Never,
    Void,
    Undefined,
    Null,
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,

    /// Literal type; `value` re-renders to `text` exactly.
    Literal { value: LiteralValue },

    /// Object or interface body; members in declaration order.
    Object {
        #[serde(skip_serializing_if = "Vec::is_empty")]
        members: Vec<Member>,
    },

    /// Union in declaration order, never canonicalized.
    Union { members: Vec<TypeNode> },

    /// Intersection in declaration order.
    Intersection { members: Vec<TypeNode> },

    Tuple { elements: Vec<TupleElement> },

    Array { element: Box<TypeNode> },

    /// Callable with one signature per overload.
    Function { signatures: Vec<Signature> },

    /// A `Function` relabeled by the component heuristic.
    Component { signatures: Vec<Signature> },

    Class {
        #[serde(skip_serializing_if = "Vec::is_empty")]
        constructors: Vec<Signature>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        properties: Vec<ClassProperty>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        methods: Vec<ClassMethod>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        accessors: Vec<AccessorPair>,
        /// Parent class as a Reference node, never flattened.
        #[serde(skip_serializing_if = "Option::is_none")]
        extends: Option<Box<TypeNode>>,
        /// Implemented interfaces as Reference nodes.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        implements: Vec<TypeNode>,
    },

    /// Enum-like declaration; members in declaration order.
    Enum { members: Vec<EnumMember> },

    /// Terminal reference to a named symbol; never expanded.
    Reference {
        /// External module the symbol comes from, when not first-party.
        #[serde(skip_serializing_if = "Option::is_none")]
        module: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        type_arguments: Vec<TypeNode>,
    },

    /// Generic alias or utility application that was inlined; `underlying`
    /// is the resolved body. Collapsed aliases are `Reference` instead.
    Alias {
        #[serde(skip_serializing_if = "Vec::is_empty")]
        type_arguments: Vec<TypeNode>,
        underlying: Box<TypeNode>,
    },

    Mapped {
        key: MappedKey,
        value: Box<TypeNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        optional: Option<MappedModifier>,
        #[serde(skip_serializing_if = "Option::is_none")]
        readonly: Option<MappedModifier>,
    },

    Conditional {
        check: Box<TypeNode>,
        extends: Box<TypeNode>,
        true_type: Box<TypeNode>,
        false_type: Box<TypeNode>,
        #[serde(skip_serializing_if = "is_false")]
        distributive: bool,
    },

    IndexedAccess {
        object: Box<TypeNode>,
        index: Box<TypeNode>,
    },

    TypeOperator {
        operator: TypeOperatorKind,
        operand: Box<TypeNode>,
    },
}

impl NodeKind {
    /// Stable name of the category, for logging and diagnostics.
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::Unknown => "Unknown",
            Self::Never => "Never",
            Self::Void => "Void",
            Self::Undefined => "Undefined",
            Self::Null => "Null",
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::BigInt => "BigInt",
            Self::Symbol => "Symbol",
            Self::Literal { .. } => "Literal",
            Self::Object { .. } => "Object",
            Self::Union { .. } => "Union",
            Self::Intersection { .. } => "Intersection",
            Self::Tuple { .. } => "Tuple",
            Self::Array { .. } => "Array",
            Self::Function { .. } => "Function",
            Self::Component { .. } => "Component",
            Self::Class { .. } => "Class",
            Self::Enum { .. } => "Enum",
            Self::Reference { .. } => "Reference",
            Self::Alias { .. } => "Alias",
            Self::Mapped { .. } => "Mapped",
            Self::Conditional { .. } => "Conditional",
            Self::IndexedAccess { .. } => "IndexedAccess",
            Self::TypeOperator { .. } => "TypeOperator",
        }
    }

    /// True for the non-literal primitive categories.
    pub const fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Any
                | Self::Unknown
                | Self::Never
                | Self::Void
                | Self::Undefined
                | Self::Null
                | Self::String
                | Self::Number
                | Self::Boolean
                | Self::BigInt
                | Self::Symbol
        )
    }

    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal { .. })
    }

    pub const fn is_callable(&self) -> bool {
        matches!(self, Self::Function { .. } | Self::Component { .. })
    }

    /// True when the category describes a record-shaped value: something
    /// with named members (directly, or behind a reference/alias). Unions
    /// qualify only when every member does.
    pub fn is_record_like(&self) -> bool {
        match self {
            Self::Object { .. }
            | Self::Class { .. }
            | Self::Mapped { .. }
            | Self::Intersection { .. }
            | Self::Reference { .. }
            | Self::Alias { .. } => true,
            Self::Union { members } => members.iter().all(|m| m.kind.is_record_like()),
            _ => false,
        }
    }
}

/// One member of an object or interface body.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "member")]
pub enum Member {
    Property(PropertyMember),
    Method(MethodMember),
    Index(IndexMember),
    Call(Signature),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMember {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeNode,
    #[serde(skip_serializing_if = "is_false")]
    pub is_optional: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_readonly: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodMember {
    pub name: String,
    pub signatures: Vec<Signature>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMember {
    pub key: TypeNode,
    pub value: TypeNode,
    #[serde(skip_serializing_if = "is_false")]
    pub is_readonly: bool,
}

/// One tuple element, optionally labeled.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TupleElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeNode,
}

/// One overload signature of a callable.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParam>,
    pub parameters: Vec<Parameter>,
    /// Explicit receiver type, when declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub this_type: Option<Box<TypeNode>>,
    pub return_type: Box<TypeNode>,
    #[serde(skip_serializing_if = "is_false")]
    pub is_async: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_generator: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParam {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Box<TypeNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Box<TypeNode>>,
}

/// A callable parameter.
///
/// A destructured parameter stays one node: `name` holds the full binding
/// pattern text and `ty` is the object type of the whole pattern.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeNode,
    #[serde(skip_serializing_if = "is_false")]
    pub is_optional: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_rest: bool,
    /// Structured snapshot of a JSON-shaped default; absent for computed
    /// initializers even when `default_text` is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Member visibility on class-like declarations. Private members never make
/// it into the tree; the variant exists so hosts can describe them and the
/// class resolver can skip them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeNode,
    pub visibility: Visibility,
    #[serde(skip_serializing_if = "is_false")]
    pub is_static: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_readonly: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_text: Option<String>,
}

/// All overloads of one class method, grouped under the method name.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMethod {
    pub name: String,
    pub visibility: Visibility,
    #[serde(skip_serializing_if = "is_false")]
    pub is_static: bool,
    pub signatures: Vec<Signature>,
}

/// A get/set accessor pair; either side may be absent.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessorPair {
    pub name: String,
    pub visibility: Visibility,
    #[serde(skip_serializing_if = "is_false")]
    pub is_static: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub getter: Option<Signature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setter: Option<Signature>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumMember {
    pub name: String,
    /// Literal member value; `None` when the initializer is computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<LiteralValue>,
}

/// The key type-parameter of a mapped type (`[K in keyof T]`).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedKey {
    pub name: String,
    pub constraint: Box<TypeNode>,
}

/// `+` / `-` modifier on a mapped type's `?` or `readonly`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum MappedModifier {
    Add,
    Remove,
}

/// Operator applied by a type-operator node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeOperatorKind {
    KeyOf,
    Readonly,
    Unique,
}

#[cfg(test)]
#[path = "../tests/node_tests.rs"]
mod tests;
