//! The structural resolver: kind-based dispatch over host shapes.
//!
//! `Resolver::resolve` is total over the shape vocabulary: an unusual
//! shape degrades to an `Unknown` node, it never fails the call. The only
//! fatal condition is the host itself failing to answer ([`HostError`]),
//! which aborts the whole call because no node can be produced without it.
//!
//! Before expanding any named composite the resolver consults, in order:
//! 1. the recursion guard; a symbol already mid-expansion collapses to a
//!    `Reference` no matter what the policy says;
//! 2. the visibility policy (default or caller predicate).
//!
//! All mutable state lives in [`ResolveCtx`], created per call and dropped
//! at the call boundary; the resolver itself is shareable and reusable.

use crate::component::{self, ComponentPolicy};
use crate::metadata;
use crate::recursion::{DEFAULT_MAX_DEPTH, ExpansionGuard, GuardEntry};
use crate::visibility::{self, Expansion, FilterPredicate, SymbolMeta};
use tracing::{debug, trace};
use tydoc_host::{
    AliasDesc, ConditionalDesc, DeclId, EnumDesc, HostError, HostResult, IntrinsicKind,
    MappedDesc, MemberDesc, ModifierFlags, ParameterDesc, Shape, SignatureDesc, SymbolId,
    TypeHandle, TypeHost,
};
use tydoc_model::{
    IndexMember, MappedKey, Member, MethodMember, NodeKind, Parameter, PropertyMember, Signature,
    TupleElement, TypeNode, TypeParam,
};

/// Options for one resolver instance. Independent calls on the same
/// instance share nothing but these read-only settings.
#[derive(Clone, Debug)]
pub struct ResolverOptions {
    /// Whether the host program tracks `null`/`undefined` strictly. When
    /// set, an `undefined` union member that only restates an optional
    /// marker is dropped so optionality is not represented twice.
    pub strict_nullability: bool,
    /// Expansion nesting limit backing the cycle set.
    pub max_depth: u32,
    /// Renderable-result family for the component heuristic; `None`
    /// disables the relabel pass.
    pub component: Option<ComponentPolicy>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            strict_nullability: true,
            max_depth: DEFAULT_MAX_DEPTH,
            component: None,
        }
    }
}

/// Per-call mutable state. Created at the public entry point, dropped when
/// the call returns; never shared between calls.
pub(crate) struct ResolveCtx {
    pub(crate) guard: ExpansionGuard<SymbolId>,
}

/// How a child resolution was reached.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ChildCtx {
    /// True only for the entry handle of the call.
    pub(crate) at_root: bool,
    /// The enclosing declaration carries its own optional marker; an
    /// `undefined` member of an immediate union restates it and is dropped
    /// under strict null-tracking.
    pub(crate) drop_undefined: bool,
    /// Declaration whose metadata should land on the resolved node.
    pub(crate) decl: Option<DeclId>,
}

impl ChildCtx {
    pub(crate) fn root(decl: Option<DeclId>) -> Self {
        Self {
            at_root: true,
            drop_undefined: false,
            decl,
        }
    }

    pub(crate) fn child() -> Self {
        Self {
            at_root: false,
            drop_undefined: false,
            decl: None,
        }
    }

    pub(crate) fn member(decl: Option<DeclId>, drop_undefined: bool) -> Self {
        Self {
            at_root: false,
            drop_undefined,
            decl,
        }
    }
}

/// The resolution engine. Holds a borrowed host and read-only options;
/// every call builds its own [`ResolveCtx`].
pub struct Resolver<'h> {
    pub(crate) host: &'h dyn TypeHost,
    pub(crate) options: ResolverOptions,
    pub(crate) filter: Option<&'h FilterPredicate>,
}

impl<'h> Resolver<'h> {
    pub fn new(host: &'h dyn TypeHost) -> Self {
        Self {
            host,
            options: ResolverOptions::default(),
            filter: None,
        }
    }

    /// Builder: replace the default options.
    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Builder: install an inline-vs-reference override predicate.
    pub fn with_filter(mut self, filter: &'h FilterPredicate) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Resolve one type handle into a description tree.
    ///
    /// `origin` is the declaration the handle was taken from, when the
    /// caller has one; its doc comment and span land on the root node.
    pub fn resolve(
        &self,
        ty: TypeHandle,
        origin: Option<DeclId>,
    ) -> Result<TypeNode, HostError> {
        let mut ctx = ResolveCtx {
            guard: ExpansionGuard::new(self.options.max_depth),
        };
        let mut node = self.resolve_handle(&mut ctx, ty, ChildCtx::root(origin))?;
        if let Some(policy) = &self.options.component {
            component::relabel_tree(&mut node, policy);
        }
        Ok(node)
    }

    // -----------------------------------------------------------------
    // Core recursion
    // -----------------------------------------------------------------

    pub(crate) fn resolve_handle(
        &self,
        ctx: &mut ResolveCtx,
        ty: TypeHandle,
        cx: ChildCtx,
    ) -> HostResult<TypeNode> {
        let text = self.host.render_text(ty)?;
        let desc = self.host.shape_of(ty)?;
        trace!(handle = ty.0, category = desc.shape.category(), "dispatch");

        let (mut node, symbol_decl) = match desc.symbol {
            Some(symbol) => self.resolve_named(ctx, &desc.shape, text, symbol, cx)?,
            None => (self.dispatch(ctx, &desc.shape, text, cx, None)?, None),
        };

        // Member-declaration metadata first, then the symbol's own; the
        // first writer of each field wins.
        if let Some(decl) = cx.decl {
            metadata::apply(self.host, &mut node, decl)?;
        }
        if let Some(decl) = symbol_decl {
            metadata::apply(self.host, &mut node, decl)?;
        }
        Ok(node)
    }

    /// Resolve a type that carries a symbol identity: consult the guard,
    /// then the visibility policy, and either expand or collapse.
    fn resolve_named(
        &self,
        ctx: &mut ResolveCtx,
        shape: &Shape,
        text: String,
        symbol: SymbolId,
        cx: ChildCtx,
    ) -> HostResult<(TypeNode, Option<DeclId>)> {
        let decls = self.host.declarations_of(symbol)?;
        let Some(&first_decl) = decls.first() else {
            debug!(symbol = symbol.0, "symbol has no declarations; degrading to Unknown");
            return Ok((TypeNode::new(NodeKind::Unknown, text), None));
        };
        let name = self.host.symbol_name(symbol)?;

        // Mid-expansion always collapses; this is how cycles break.
        if ctx.guard.is_expanding(&symbol) {
            trace!(name = %name, "symbol is mid-expansion; emitting reference");
            let node = self.reference_node(ctx, shape, symbol, &name, text)?;
            return Ok((node, Some(first_decl)));
        }

        let span = self.host.source_span_of(first_decl)?;
        let meta = SymbolMeta {
            name: &name,
            is_vendored: self.host.is_vendored(first_decl)?,
            file_path: &span.file,
        };
        if visibility::decide(&meta, self.filter) == Expansion::Reference {
            trace!(name = %name, vendored = meta.is_vendored, "policy collapses symbol");
            let node = self.reference_node(ctx, shape, symbol, &name, text)?;
            return Ok((node, Some(first_decl)));
        }

        match ctx.guard.enter(symbol) {
            GuardEntry::Entered => {
                let result = self.dispatch(ctx, shape, text, cx, Some(name.as_str()));
                ctx.guard.leave(symbol);
                let mut node = result?;
                if node.name.is_none() {
                    node.name = Some(name);
                }
                Ok((node, Some(first_decl)))
            }
            denied => {
                trace!(name = %name, ?denied, "expansion denied; emitting reference");
                let node = self.reference_node(ctx, shape, symbol, &name, text)?;
                Ok((node, Some(first_decl)))
            }
        }
    }

    /// Build a terminal `Reference` node for a symbol occurrence. Type
    /// arguments (present on alias applications) are resolved as children;
    /// the referenced declaration itself is not.
    fn reference_node(
        &self,
        ctx: &mut ResolveCtx,
        shape: &Shape,
        symbol: SymbolId,
        name: &str,
        text: String,
    ) -> HostResult<TypeNode> {
        let module = self.host.external_module_of(symbol)?;
        let type_arguments = match shape {
            Shape::Alias(alias) => {
                let mut out = Vec::with_capacity(alias.type_arguments.len());
                for &arg in &alias.type_arguments {
                    out.push(self.resolve_handle(ctx, arg, ChildCtx::child())?);
                }
                out
            }
            _ => Vec::new(),
        };
        Ok(TypeNode::new(
            NodeKind::Reference {
                module,
                type_arguments,
            },
            text,
        )
        .with_name(name))
    }

    /// Resolve a handle that must stay a `Reference` (class `extends` /
    /// `implements` targets). Falls back to full resolution only when the
    /// handle carries no symbol at all.
    pub(crate) fn resolve_reference_only(
        &self,
        ctx: &mut ResolveCtx,
        ty: TypeHandle,
    ) -> HostResult<TypeNode> {
        let text = self.host.render_text(ty)?;
        let desc = self.host.shape_of(ty)?;
        match desc.symbol {
            Some(symbol) => {
                let name = self.host.symbol_name(symbol)?;
                let mut node = self.reference_node(ctx, &desc.shape, symbol, &name, text)?;
                if let Some(&decl) = self.host.declarations_of(symbol)?.first() {
                    metadata::apply(self.host, &mut node, decl)?;
                }
                Ok(node)
            }
            None => self.resolve_handle(ctx, ty, ChildCtx::child()),
        }
    }

    // -----------------------------------------------------------------
    // Shape dispatch
    // -----------------------------------------------------------------

    fn dispatch(
        &self,
        ctx: &mut ResolveCtx,
        shape: &Shape,
        text: String,
        cx: ChildCtx,
        symbol_name: Option<&str>,
    ) -> HostResult<TypeNode> {
        match shape {
            Shape::Intrinsic(kind) => Ok(TypeNode::new(intrinsic_node(*kind), text)),
            Shape::Literal(value) => Ok(TypeNode::new(
                NodeKind::Literal {
                    value: value.clone(),
                },
                text,
            )),
            Shape::Object(members) => self.resolve_object(ctx, members, text),
            Shape::Union(members) => self.resolve_union(ctx, members, text, cx),
            Shape::Intersection(members) => {
                let mut nodes = Vec::with_capacity(members.len());
                for &member in members {
                    nodes.push(self.resolve_handle(ctx, member, ChildCtx::child())?);
                }
                Ok(TypeNode::new(NodeKind::Intersection { members: nodes }, text))
            }
            Shape::Tuple(elements) => {
                let mut out = Vec::with_capacity(elements.len());
                for element in elements {
                    out.push(TupleElement {
                        label: element.label.clone(),
                        ty: self.resolve_handle(ctx, element.ty, ChildCtx::child())?,
                    });
                }
                Ok(TypeNode::new(NodeKind::Tuple { elements: out }, text))
            }
            Shape::Array(element) => {
                let element = self.resolve_handle(ctx, *element, ChildCtx::child())?;
                Ok(TypeNode::new(
                    NodeKind::Array {
                        element: Box::new(element),
                    },
                    text,
                ))
            }
            Shape::Callable(signatures) => {
                let signatures = self.resolve_signatures(ctx, signatures)?;
                Ok(TypeNode::new(NodeKind::Function { signatures }, text))
            }
            Shape::Class(desc) => crate::class::resolve_class(self, ctx, desc, text),
            Shape::Enum(desc) => self.resolve_enum(desc, text, symbol_name, cx),
            Shape::Alias(desc) => self.resolve_alias(ctx, desc, text),
            Shape::Mapped(desc) => self.resolve_mapped(ctx, desc, text),
            Shape::Conditional(desc) => self.resolve_conditional(ctx, desc, text),
            Shape::IndexedAccess { object, index } => {
                let object = self.resolve_handle(ctx, *object, ChildCtx::child())?;
                let index = self.resolve_handle(ctx, *index, ChildCtx::child())?;
                Ok(TypeNode::new(
                    NodeKind::IndexedAccess {
                        object: Box::new(object),
                        index: Box::new(index),
                    },
                    text,
                ))
            }
            Shape::TypeOperator { operator, operand } => {
                let operand = self.resolve_handle(ctx, *operand, ChildCtx::child())?;
                Ok(TypeNode::new(
                    NodeKind::TypeOperator {
                        operator: *operator,
                        operand: Box::new(operand),
                    },
                    text,
                ))
            }
            Shape::TypeParameter { name } => Ok(TypeNode::new(
                NodeKind::Reference {
                    module: None,
                    type_arguments: Vec::new(),
                },
                text,
            )
            .with_name(name.as_str())),
            Shape::Unsupported => {
                debug!("host reported an unsupported shape; degrading to Unknown");
                Ok(TypeNode::new(NodeKind::Unknown, text))
            }
        }
    }

    // -----------------------------------------------------------------
    // Per-kind handlers
    // -----------------------------------------------------------------

    fn resolve_object(
        &self,
        ctx: &mut ResolveCtx,
        members: &[MemberDesc],
        text: String,
    ) -> HostResult<TypeNode> {
        let mut out = Vec::with_capacity(members.len());
        for member in members {
            out.push(match member {
                MemberDesc::Property(prop) => {
                    let is_optional = prop.flags.contains(ModifierFlags::OPTIONAL);
                    let ty =
                        self.resolve_handle(ctx, prop.ty, ChildCtx::member(prop.decl, is_optional))?;
                    Member::Property(PropertyMember {
                        name: prop.name.clone(),
                        ty,
                        is_optional,
                        is_readonly: prop.flags.contains(ModifierFlags::READONLY),
                    })
                }
                MemberDesc::Method { name, signatures } => Member::Method(MethodMember {
                    name: name.clone(),
                    signatures: self.resolve_signatures(ctx, signatures)?,
                }),
                MemberDesc::Index(index) => Member::Index(IndexMember {
                    key: self.resolve_handle(ctx, index.key, ChildCtx::child())?,
                    value: self.resolve_handle(ctx, index.value, ChildCtx::child())?,
                    is_readonly: index.flags.contains(ModifierFlags::READONLY),
                }),
                MemberDesc::Call(signature) => {
                    Member::Call(self.resolve_signature(ctx, signature)?)
                }
            });
        }
        Ok(TypeNode::new(NodeKind::Object { members: out }, text))
    }

    fn resolve_union(
        &self,
        ctx: &mut ResolveCtx,
        members: &[TypeHandle],
        text: String,
        cx: ChildCtx,
    ) -> HostResult<TypeNode> {
        let mut kept: Vec<TypeHandle> = members.to_vec();
        if cx.drop_undefined && self.options.strict_nullability {
            let mut filtered = Vec::with_capacity(members.len());
            for &member in members {
                if !self.is_undefined(member)? {
                    filtered.push(member);
                }
            }
            // A union can't be all-undefined; keep the original on the
            // off chance a host hands one over.
            if !filtered.is_empty() {
                kept = filtered;
            }
        }

        if kept.len() == 1 && members.len() > 1 {
            // The optional marker already captures the dropped member;
            // the union collapses to its surviving constituent.
            trace!("optional marker absorbs undefined member; collapsing union");
            return self.resolve_handle(ctx, kept[0], ChildCtx::child());
        }

        let mut nodes = Vec::with_capacity(kept.len());
        for &member in &kept {
            nodes.push(self.resolve_handle(ctx, member, ChildCtx::child())?);
        }
        Ok(TypeNode::new(NodeKind::Union { members: nodes }, text))
    }

    fn resolve_enum(
        &self,
        desc: &EnumDesc,
        text: String,
        symbol_name: Option<&str>,
        cx: ChildCtx,
    ) -> HostResult<TypeNode> {
        if cx.at_root {
            // Resolving the enum declaration itself: keep the member list.
            let members = desc
                .members
                .iter()
                .map(|member| tydoc_model::EnumMember {
                    name: member.name.clone(),
                    value: member.value.clone(),
                })
                .collect();
            return Ok(TypeNode::new(NodeKind::Enum { members }, text));
        }

        // Referenced as a type: the enum is the union of its members,
        // rendered member-access style (`Color.Red`).
        let prefix = symbol_name.unwrap_or(text.as_str()).to_string();
        let mut members = Vec::with_capacity(desc.members.len());
        for member in &desc.members {
            let member_text = format!("{prefix}.{}", member.name);
            members.push(match &member.value {
                Some(value) => TypeNode::new(
                    NodeKind::Literal {
                        value: value.clone(),
                    },
                    member_text,
                ),
                // Computed member: no literal value to show.
                None => TypeNode::new(NodeKind::Unknown, member_text),
            });
        }
        Ok(TypeNode::new(NodeKind::Union { members }, text))
    }

    fn resolve_alias(
        &self,
        ctx: &mut ResolveCtx,
        desc: &AliasDesc,
        text: String,
    ) -> HostResult<TypeNode> {
        // A "return type of" style alias stands for its concrete result;
        // substitute it one level. Reference-worthy aliases never get here
        // (the visibility policy collapsed them already).
        if desc.instantiated_return {
            trace!("alias wraps an invocation result; unwrapping one level");
            return self.resolve_handle(ctx, desc.underlying, ChildCtx::child());
        }

        let mut type_arguments = Vec::with_capacity(desc.type_arguments.len());
        for &arg in &desc.type_arguments {
            type_arguments.push(self.resolve_handle(ctx, arg, ChildCtx::child())?);
        }
        let underlying = self.resolve_handle(ctx, desc.underlying, ChildCtx::child())?;
        Ok(TypeNode::new(
            NodeKind::Alias {
                type_arguments,
                underlying: Box::new(underlying),
            },
            text,
        ))
    }

    fn resolve_mapped(
        &self,
        ctx: &mut ResolveCtx,
        desc: &MappedDesc,
        text: String,
    ) -> HostResult<TypeNode> {
        let constraint = self.resolve_handle(ctx, desc.constraint, ChildCtx::child())?;
        let value = self.resolve_handle(ctx, desc.value, ChildCtx::child())?;
        Ok(TypeNode::new(
            NodeKind::Mapped {
                key: MappedKey {
                    name: desc.key_name.clone(),
                    constraint: Box::new(constraint),
                },
                value: Box::new(value),
                optional: desc.optional,
                readonly: desc.readonly,
            },
            text,
        ))
    }

    fn resolve_conditional(
        &self,
        ctx: &mut ResolveCtx,
        desc: &ConditionalDesc,
        text: String,
    ) -> HostResult<TypeNode> {
        Ok(TypeNode::new(
            NodeKind::Conditional {
                check: Box::new(self.resolve_handle(ctx, desc.check, ChildCtx::child())?),
                extends: Box::new(self.resolve_handle(ctx, desc.extends, ChildCtx::child())?),
                true_type: Box::new(self.resolve_handle(ctx, desc.true_branch, ChildCtx::child())?),
                false_type: Box::new(
                    self.resolve_handle(ctx, desc.false_branch, ChildCtx::child())?,
                ),
                distributive: desc.distributive,
            },
            text,
        ))
    }

    // -----------------------------------------------------------------
    // Signatures and parameters
    // -----------------------------------------------------------------

    pub(crate) fn resolve_signatures(
        &self,
        ctx: &mut ResolveCtx,
        signatures: &[SignatureDesc],
    ) -> HostResult<Vec<Signature>> {
        let mut out = Vec::with_capacity(signatures.len());
        for signature in signatures {
            out.push(self.resolve_signature(ctx, signature)?);
        }
        Ok(out)
    }

    pub(crate) fn resolve_signature(
        &self,
        ctx: &mut ResolveCtx,
        signature: &SignatureDesc,
    ) -> HostResult<Signature> {
        let mut type_parameters = Vec::with_capacity(signature.type_params.len());
        for param in &signature.type_params {
            let constraint = match param.constraint {
                Some(handle) => Some(Box::new(self.resolve_handle(ctx, handle, ChildCtx::child())?)),
                None => None,
            };
            let default = match param.default {
                Some(handle) => Some(Box::new(self.resolve_handle(ctx, handle, ChildCtx::child())?)),
                None => None,
            };
            type_parameters.push(TypeParam {
                name: param.name.clone(),
                constraint,
                default,
            });
        }

        let mut parameters = Vec::with_capacity(signature.params.len());
        for param in &signature.params {
            parameters.push(self.resolve_parameter(ctx, param)?);
        }

        let this_type = match signature.this_param {
            Some(handle) => Some(Box::new(self.resolve_handle(ctx, handle, ChildCtx::child())?)),
            None => None,
        };
        let return_type = Box::new(self.resolve_handle(
            ctx,
            signature.return_type,
            ChildCtx::child(),
        )?);

        Ok(Signature {
            type_parameters,
            parameters,
            this_type,
            return_type,
            is_async: signature.flags.contains(ModifierFlags::ASYNC),
            is_generator: signature.flags.contains(ModifierFlags::GENERATOR),
        })
    }

    fn resolve_parameter(
        &self,
        ctx: &mut ResolveCtx,
        param: &ParameterDesc,
    ) -> HostResult<Parameter> {
        let marked_optional = param.flags.contains(ModifierFlags::OPTIONAL);
        let (default_value, default_text, description) = match param.decl {
            Some(decl) => {
                let (value, rendered) = metadata::default_of(self.host, decl)?;
                (value, rendered, metadata::description_of(self.host, decl)?)
            }
            None => (None, None, None),
        };

        // A destructured pattern stays one parameter: `param.name` is the
        // whole binding text and `ty` the object type of the pattern.
        let ty = self.resolve_handle(ctx, param.ty, ChildCtx::member(None, marked_optional))?;
        Ok(Parameter {
            name: param.name.clone(),
            ty,
            is_optional: marked_optional || default_text.is_some(),
            is_rest: param.flags.contains(ModifierFlags::REST),
            default_value,
            default_text,
            description,
        })
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    fn is_undefined(&self, ty: TypeHandle) -> HostResult<bool> {
        Ok(matches!(
            self.host.shape_of(ty)?.shape,
            Shape::Intrinsic(IntrinsicKind::Undefined)
        ))
    }
}

const fn intrinsic_node(kind: IntrinsicKind) -> NodeKind {
    match kind {
        IntrinsicKind::Any => NodeKind::Any,
        IntrinsicKind::Unknown => NodeKind::Unknown,
        IntrinsicKind::Never => NodeKind::Never,
        IntrinsicKind::Void => NodeKind::Void,
        IntrinsicKind::Undefined => NodeKind::Undefined,
        IntrinsicKind::Null => NodeKind::Null,
        IntrinsicKind::String => NodeKind::String,
        IntrinsicKind::Number => NodeKind::Number,
        IntrinsicKind::Boolean => NodeKind::Boolean,
        IntrinsicKind::BigInt => NodeKind::BigInt,
        IntrinsicKind::Symbol => NodeKind::Symbol,
    }
}

#[cfg(test)]
#[path = "../tests/resolve_tests.rs"]
mod tests;
