//! Post-processing relabel of component-shaped callables.
//!
//! A `Function` node becomes a `Component` when every overload takes at
//! most one record-shaped parameter and returns a member of the caller's
//! renderable-result family. Overload sets that only partially qualify
//! stay plain `Function`.

use rustc_hash::FxHashSet;
use tydoc_model::{Member, NodeKind, Signature, TypeNode};

/// The caller-configured "renderable result" family, matched by node name
/// (or rendered text when a node carries no name).
#[derive(Clone, Debug, Default)]
pub struct ComponentPolicy {
    renderable: FxHashSet<String>,
}

impl ComponentPolicy {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            renderable: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Does this node's type belong to the renderable family?
    ///
    /// Unions qualify when at least one member is renderable and the rest
    /// are renderable or nullish (`Element | null` renders).
    pub fn is_renderable(&self, node: &TypeNode) -> bool {
        if let Some(name) = &node.name {
            if self.renderable.contains(name) {
                return true;
            }
        }
        match &node.kind {
            NodeKind::Union { members } => {
                members.iter().any(|m| self.is_renderable(m))
                    && members.iter().all(|m| {
                        self.is_renderable(m)
                            || matches!(m.kind, NodeKind::Null | NodeKind::Undefined)
                    })
            }
            _ => self.renderable.contains(&node.text),
        }
    }
}

fn signature_qualifies(policy: &ComponentPolicy, signature: &Signature) -> bool {
    if signature.parameters.len() > 1 {
        return false;
    }
    if let Some(param) = signature.parameters.first() {
        if !param.ty.kind.is_record_like() {
            return false;
        }
    }
    policy.is_renderable(&signature.return_type)
}

/// Walk a finished tree and relabel every qualifying `Function` node.
pub(crate) fn relabel_tree(node: &mut TypeNode, policy: &ComponentPolicy) {
    if let NodeKind::Function { signatures } = &node.kind {
        if !signatures.is_empty()
            && signatures.iter().all(|s| signature_qualifies(policy, s))
        {
            let NodeKind::Function { signatures } =
                std::mem::replace(&mut node.kind, NodeKind::Unknown)
            else {
                unreachable!("kind checked above");
            };
            node.kind = NodeKind::Component { signatures };
        }
    }
    for_each_child_mut(node, &mut |child| relabel_tree(child, policy));
}

/// Visit every nested `TypeNode` exactly once, in tree order.
fn for_each_child_mut(node: &mut TypeNode, f: &mut impl FnMut(&mut TypeNode)) {
    match &mut node.kind {
        NodeKind::Any
        | NodeKind::Unknown
        | NodeKind::Never
        | NodeKind::Void
        | NodeKind::Undefined
        | NodeKind::Null
        | NodeKind::String
        | NodeKind::Number
        | NodeKind::Boolean
        | NodeKind::BigInt
        | NodeKind::Symbol
        | NodeKind::Literal { .. }
        | NodeKind::Enum { .. } => {}
        NodeKind::Object { members } => {
            for member in members {
                match member {
                    Member::Property(property) => f(&mut property.ty),
                    Member::Method(method) => {
                        for signature in &mut method.signatures {
                            visit_signature_mut(signature, f);
                        }
                    }
                    Member::Index(index) => {
                        f(&mut index.key);
                        f(&mut index.value);
                    }
                    Member::Call(signature) => visit_signature_mut(signature, f),
                }
            }
        }
        NodeKind::Union { members } | NodeKind::Intersection { members } => {
            for member in members {
                f(member);
            }
        }
        NodeKind::Tuple { elements } => {
            for element in elements {
                f(&mut element.ty);
            }
        }
        NodeKind::Array { element } => f(element),
        NodeKind::Function { signatures } | NodeKind::Component { signatures } => {
            for signature in signatures {
                visit_signature_mut(signature, f);
            }
        }
        NodeKind::Class {
            constructors,
            properties,
            methods,
            accessors,
            extends,
            implements,
        } => {
            for signature in constructors {
                visit_signature_mut(signature, f);
            }
            for property in properties {
                f(&mut property.ty);
            }
            for method in methods {
                for signature in &mut method.signatures {
                    visit_signature_mut(signature, f);
                }
            }
            for accessor in accessors {
                if let Some(signature) = &mut accessor.getter {
                    visit_signature_mut(signature, f);
                }
                if let Some(signature) = &mut accessor.setter {
                    visit_signature_mut(signature, f);
                }
            }
            if let Some(parent) = extends {
                f(parent);
            }
            for interface in implements {
                f(interface);
            }
        }
        NodeKind::Reference { type_arguments, .. } => {
            for argument in type_arguments {
                f(argument);
            }
        }
        NodeKind::Alias {
            type_arguments,
            underlying,
        } => {
            for argument in type_arguments {
                f(argument);
            }
            f(underlying);
        }
        NodeKind::Mapped { key, value, .. } => {
            f(&mut key.constraint);
            f(value);
        }
        NodeKind::Conditional {
            check,
            extends,
            true_type,
            false_type,
            ..
        } => {
            f(check);
            f(extends);
            f(true_type);
            f(false_type);
        }
        NodeKind::IndexedAccess { object, index } => {
            f(object);
            f(index);
        }
        NodeKind::TypeOperator { operand, .. } => f(operand),
    }
}

fn visit_signature_mut(signature: &mut Signature, f: &mut impl FnMut(&mut TypeNode)) {
    for param in &mut signature.type_parameters {
        if let Some(constraint) = &mut param.constraint {
            f(constraint);
        }
        if let Some(default) = &mut param.default {
            f(default);
        }
    }
    for param in &mut signature.parameters {
        f(&mut param.ty);
    }
    if let Some(this_type) = &mut signature.this_type {
        f(this_type);
    }
    f(&mut signature.return_type);
}

#[cfg(test)]
#[path = "../tests/component_tests.rs"]
mod tests;
