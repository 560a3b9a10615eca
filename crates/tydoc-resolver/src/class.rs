//! Decomposition of class-like declarations.
//!
//! A class shape splits into constructor signatures, properties, methods
//! (overloads grouped under one name), and accessor pairs. Private and
//! unnamed members never reach the tree. `extends`/`implements` stay
//! `Reference` nodes; walking the inheritance chain is a host concern.

use crate::metadata;
use crate::resolve::{ChildCtx, ResolveCtx, Resolver};
use indexmap::IndexMap;
use tracing::trace;
use tydoc_host::{ClassDesc, ClassMemberKind, HostResult, ModifierFlags};
use tydoc_model::{
    AccessorPair, ClassMethod, ClassProperty, NodeKind, TypeNode, Visibility,
};

pub(crate) fn resolve_class(
    resolver: &Resolver<'_>,
    ctx: &mut ResolveCtx,
    desc: &ClassDesc,
    text: String,
) -> HostResult<TypeNode> {
    let constructors = resolver.resolve_signatures(ctx, &desc.constructors)?;

    let mut properties = Vec::new();
    // Overloads of one method arrive as separate member entries; group
    // them under the first occurrence, preserving declaration order.
    let mut methods: IndexMap<(String, bool), ClassMethod> = IndexMap::new();
    let mut accessors: IndexMap<(String, bool), AccessorPair> = IndexMap::new();

    for member in &desc.members {
        let Some(name) = member.name.clone() else {
            trace!("skipping unnamed class member");
            continue;
        };
        if member.visibility == Visibility::Private {
            trace!(name = %name, "skipping private class member");
            continue;
        }
        let is_static = member.flags.contains(ModifierFlags::STATIC);

        match &member.kind {
            ClassMemberKind::Property { ty } => {
                let is_optional = member.flags.contains(ModifierFlags::OPTIONAL);
                let node =
                    resolver.resolve_handle(ctx, *ty, ChildCtx::member(member.decl, is_optional))?;
                let (default_value, default_text) = match member.decl {
                    Some(decl) => metadata::default_of(resolver.host, decl)?,
                    None => (None, None),
                };
                properties.push(ClassProperty {
                    name,
                    ty: node,
                    visibility: member.visibility,
                    is_static,
                    is_readonly: member.flags.contains(ModifierFlags::READONLY),
                    default_value,
                    default_text,
                });
            }
            ClassMemberKind::Method { signatures } => {
                let resolved = resolver.resolve_signatures(ctx, signatures)?;
                let entry = methods
                    .entry((name.clone(), is_static))
                    .or_insert_with(|| ClassMethod {
                        name,
                        visibility: member.visibility,
                        is_static,
                        signatures: Vec::new(),
                    });
                entry.signatures.extend(resolved);
            }
            ClassMemberKind::Getter { signature } => {
                let resolved = resolver.resolve_signature(ctx, signature)?;
                accessor_entry(&mut accessors, name, member.visibility, is_static).getter =
                    Some(resolved);
            }
            ClassMemberKind::Setter { signature } => {
                let resolved = resolver.resolve_signature(ctx, signature)?;
                accessor_entry(&mut accessors, name, member.visibility, is_static).setter =
                    Some(resolved);
            }
        }
    }

    let extends = match desc.extends {
        Some(parent) => Some(Box::new(resolver.resolve_reference_only(ctx, parent)?)),
        None => None,
    };
    let mut implements = Vec::with_capacity(desc.implements.len());
    for &interface in &desc.implements {
        implements.push(resolver.resolve_reference_only(ctx, interface)?);
    }

    Ok(TypeNode::new(
        NodeKind::Class {
            constructors,
            properties,
            methods: methods.into_values().collect(),
            accessors: accessors.into_values().collect(),
            extends,
            implements,
        },
        text,
    ))
}

fn accessor_entry<'a>(
    accessors: &'a mut IndexMap<(String, bool), AccessorPair>,
    name: String,
    visibility: Visibility,
    is_static: bool,
) -> &'a mut AccessorPair {
    accessors
        .entry((name.clone(), is_static))
        .or_insert_with(|| AccessorPair {
            name,
            visibility,
            is_static,
            getter: None,
            setter: None,
        })
}

#[cfg(test)]
#[path = "../tests/class_tests.rs"]
mod tests;
