//! Structural shape descriptors: what the host tells the resolver about a
//! type, category plus constituent handles. Just enough to dispatch on.

use crate::handles::{DeclId, SymbolId, TypeHandle};
use bitflags::bitflags;
use tydoc_model::{LiteralValue, Visibility};

/// Category + constituent handles for one type, plus the symbol identity
/// when the type is a named declaration (interface, class, alias, enum).
///
/// The symbol is what the visibility filter and recursion guard key on; an
/// anonymous shape (`symbol: None`) is always expanded in place.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeDescriptor {
    pub shape: Shape,
    pub symbol: Option<SymbolId>,
}

impl ShapeDescriptor {
    pub fn anonymous(shape: Shape) -> Self {
        Self {
            shape,
            symbol: None,
        }
    }

    pub fn named(shape: Shape, symbol: SymbolId) -> Self {
        Self {
            shape,
            symbol: Some(symbol),
        }
    }
}

/// The closed structural category set the resolver dispatches on.
///
/// Constituents are handles; the resolver re-enters itself to resolve them.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Intrinsic(IntrinsicKind),
    Literal(LiteralValue),
    Object(Vec<MemberDesc>),
    Union(Vec<TypeHandle>),
    Intersection(Vec<TypeHandle>),
    Tuple(Vec<TupleElementDesc>),
    Array(TypeHandle),
    /// Callable with one descriptor per overload signature.
    Callable(Vec<SignatureDesc>),
    Class(Box<ClassDesc>),
    Enum(EnumDesc),
    /// Named generic alias or utility application.
    Alias(AliasDesc),
    Mapped(Box<MappedDesc>),
    Conditional(Box<ConditionalDesc>),
    IndexedAccess {
        object: TypeHandle,
        index: TypeHandle,
    },
    TypeOperator {
        operator: tydoc_model::TypeOperatorKind,
        operand: TypeHandle,
    },
    /// A generic type variable in scope; has a name but no declaration
    /// graph to expand.
    TypeParameter {
        name: String,
    },
    /// A shape the host cannot describe; degrades to `Unknown`.
    Unsupported,
}

impl Shape {
    /// Stable category name, for logging and diagnostics.
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Intrinsic(_) => "Intrinsic",
            Self::Literal(_) => "Literal",
            Self::Object(_) => "Object",
            Self::Union(_) => "Union",
            Self::Intersection(_) => "Intersection",
            Self::Tuple(_) => "Tuple",
            Self::Array(_) => "Array",
            Self::Callable(_) => "Callable",
            Self::Class(_) => "Class",
            Self::Enum(_) => "Enum",
            Self::Alias(_) => "Alias",
            Self::Mapped(_) => "Mapped",
            Self::Conditional(_) => "Conditional",
            Self::IndexedAccess { .. } => "IndexedAccess",
            Self::TypeOperator { .. } => "TypeOperator",
            Self::TypeParameter { .. } => "TypeParameter",
            Self::Unsupported => "Unsupported",
        }
    }
}

/// Intrinsic (keyword) types. Each maps 1:1 to a primitive node category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
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
}

impl IntrinsicKind {
    /// The keyword as it renders in source.
    pub const fn text(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Unknown => "unknown",
            Self::Never => "never",
            Self::Void => "void",
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::BigInt => "bigint",
            Self::Symbol => "symbol",
        }
    }
}

bitflags! {
    /// Structural modifier facts the checker owns. The resolver converts
    /// these to plain booleans on the serialized model; they are never
    /// derived from rendered text.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    pub struct ModifierFlags: u16 {
        const OPTIONAL  = 1 << 0;
        const READONLY  = 1 << 1;
        const REST      = 1 << 2;
        const STATIC    = 1 << 3;
        const ABSTRACT  = 1 << 4;
        const ASYNC     = 1 << 5;
        const GENERATOR = 1 << 6;
    }
}

/// One member of an object/interface shape, in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub enum MemberDesc {
    Property(PropertyDesc),
    Method {
        name: String,
        signatures: Vec<SignatureDesc>,
    },
    Index(IndexDesc),
    Call(SignatureDesc),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDesc {
    pub name: String,
    pub ty: TypeHandle,
    pub flags: ModifierFlags,
    /// Declaration carrying the member's docs and initializer.
    pub decl: Option<DeclId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IndexDesc {
    pub key: TypeHandle,
    pub value: TypeHandle,
    pub flags: ModifierFlags,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SignatureDesc {
    pub type_params: Vec<TypeParamDesc>,
    pub params: Vec<ParameterDesc>,
    /// Explicit receiver type, when declared.
    pub this_param: Option<TypeHandle>,
    pub return_type: TypeHandle,
    pub flags: ModifierFlags,
    pub decl: Option<DeclId>,
}

impl SignatureDesc {
    /// A plain `(params...) -> ret` signature with no extras.
    pub fn simple(params: Vec<ParameterDesc>, return_type: TypeHandle) -> Self {
        Self {
            type_params: Vec::new(),
            params,
            this_param: None,
            return_type,
            flags: ModifierFlags::empty(),
            decl: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeParamDesc {
    pub name: String,
    pub constraint: Option<TypeHandle>,
    pub default: Option<TypeHandle>,
}

/// One callable parameter. For a destructured parameter `name` holds the
/// whole binding-pattern text; the host never splits the pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterDesc {
    pub name: String,
    pub ty: TypeHandle,
    pub flags: ModifierFlags,
    pub decl: Option<DeclId>,
}

impl ParameterDesc {
    pub fn required(name: impl Into<String>, ty: TypeHandle) -> Self {
        Self {
            name: name.into(),
            ty,
            flags: ModifierFlags::empty(),
            decl: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TupleElementDesc {
    pub label: Option<String>,
    pub ty: TypeHandle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassDesc {
    pub constructors: Vec<SignatureDesc>,
    pub members: Vec<ClassMemberDesc>,
    pub extends: Option<TypeHandle>,
    pub implements: Vec<TypeHandle>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassMemberDesc {
    /// `None` for computed/unnamed members; those never reach the tree.
    pub name: Option<String>,
    pub visibility: Visibility,
    pub flags: ModifierFlags,
    pub kind: ClassMemberKind,
    pub decl: Option<DeclId>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClassMemberKind {
    Property { ty: TypeHandle },
    Method { signatures: Vec<SignatureDesc> },
    Getter { signature: SignatureDesc },
    Setter { signature: SignatureDesc },
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumDesc {
    pub members: Vec<EnumMemberDesc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumMemberDesc {
    pub name: String,
    /// `None` when the member's initializer is computed.
    pub value: Option<LiteralValue>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AliasDesc {
    pub type_arguments: Vec<TypeHandle>,
    pub underlying: TypeHandle,
    /// True when `underlying` is the result of invoking another callable
    /// (a "return type of"-style utility). Such aliases unwrap one level
    /// unless the visibility policy keeps them reference-worthy.
    pub instantiated_return: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MappedDesc {
    pub key_name: String,
    pub constraint: TypeHandle,
    pub value: TypeHandle,
    pub optional: Option<tydoc_model::MappedModifier>,
    pub readonly: Option<tydoc_model::MappedModifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConditionalDesc {
    pub check: TypeHandle,
    pub extends: TypeHandle,
    pub true_branch: TypeHandle,
    pub false_branch: TypeHandle,
    pub distributive: bool,
}

/// Literal expression tree for an initializer. A `Computed` leaf anywhere
/// suppresses the structured default-value snapshot; only the rendered text
/// survives.
#[derive(Clone, Debug, PartialEq)]
pub enum InitializerExpr {
    Number(f64),
    String(String),
    Bool(bool),
    Null,
    Array(Vec<InitializerExpr>),
    Object(Vec<(String, InitializerExpr)>),
    Computed,
}
