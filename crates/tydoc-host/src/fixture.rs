//! In-memory `TypeHost` used by the test suites.
//!
//! `FixtureHost` plays the role of the external checker: tests register
//! types, symbols, and declarations up front (two-phase `reserve_type` /
//! `set_shape` for cyclic graphs), then hand the fixture to the resolver as
//! `&dyn TypeHost`. `poison()` flips every query into the fatal
//! collaborator-unavailable error for the abort path.

use crate::handles::{DeclId, SymbolId, TypeHandle};
use crate::host::{DocComment, HostError, HostResult, Initializer, SourceSpan, TypeHost};
use crate::shape::{
    InitializerExpr, IntrinsicKind, Shape, ShapeDescriptor,
};
use rustc_hash::FxHashMap;
use tydoc_model::{DocTag, LiteralValue};

struct TypeEntry {
    text: String,
    shape: Option<ShapeDescriptor>,
}

struct DeclEntry {
    ty: Option<TypeHandle>,
    span: SourceSpan,
    doc: Option<DocComment>,
    initializer: Option<Initializer>,
    vendored: bool,
}

struct SymbolEntry {
    name: String,
    decls: Vec<DeclId>,
    external_module: Option<String>,
}

/// Builder-style in-memory collaborator.
#[derive(Default)]
pub struct FixtureHost {
    types: Vec<TypeEntry>,
    decls: Vec<DeclEntry>,
    symbols: Vec<SymbolEntry>,
    intrinsics: FxHashMap<IntrinsicKind, TypeHandle>,
    poisoned: bool,
}

impl FixtureHost {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------
    // Types
    // -----------------------------------------------------------------

    /// Register a type with its shape already known.
    pub fn add_type(&mut self, text: impl Into<String>, shape: Shape) -> TypeHandle {
        let handle = self.reserve_type(text);
        self.set_shape(handle, shape);
        handle
    }

    /// Allocate a handle whose shape is filled in later; this is how tests
    /// build cyclic graphs (`Node` containing `Node[]`).
    pub fn reserve_type(&mut self, text: impl Into<String>) -> TypeHandle {
        self.types.push(TypeEntry {
            text: text.into(),
            shape: None,
        });
        TypeHandle(self.types.len() as u32)
    }

    pub fn set_shape(&mut self, handle: TypeHandle, shape: Shape) {
        let entry = self.type_entry_mut(handle);
        entry.shape = Some(ShapeDescriptor::anonymous(shape));
    }

    /// Attach a symbol identity to a type, making it a named declaration
    /// from the resolver's point of view.
    pub fn set_type_symbol(&mut self, handle: TypeHandle, symbol: SymbolId) {
        let entry = self.type_entry_mut(handle);
        let desc = entry
            .shape
            .as_mut()
            .expect("set a shape before naming the type");
        desc.symbol = Some(symbol);
    }

    /// The intrinsic keyword type, allocated once per kind.
    pub fn intrinsic(&mut self, kind: IntrinsicKind) -> TypeHandle {
        if let Some(&handle) = self.intrinsics.get(&kind) {
            return handle;
        }
        let handle = self.add_type(kind.text(), Shape::Intrinsic(kind));
        self.intrinsics.insert(kind, handle);
        handle
    }

    /// A literal type whose text is the value's own rendering.
    pub fn literal(&mut self, value: LiteralValue) -> TypeHandle {
        self.add_type(value.render(), Shape::Literal(value))
    }

    pub fn string_literal(&mut self, value: &str) -> TypeHandle {
        self.literal(LiteralValue::String(value.to_string()))
    }

    pub fn number_literal(&mut self, value: f64) -> TypeHandle {
        self.literal(LiteralValue::Number(value))
    }

    // -----------------------------------------------------------------
    // Symbols and declarations
    // -----------------------------------------------------------------

    pub fn add_symbol(&mut self, name: impl Into<String>) -> SymbolId {
        self.symbols.push(SymbolEntry {
            name: name.into(),
            decls: Vec::new(),
            external_module: None,
        });
        SymbolId(self.symbols.len() as u32)
    }

    pub fn set_external_module(&mut self, symbol: SymbolId, module: impl Into<String>) {
        self.symbol_entry_mut(symbol).external_module = Some(module.into());
    }

    /// A declaration in `file` with a default one-line span.
    pub fn add_decl(&mut self, file: &str) -> DeclId {
        self.decls.push(DeclEntry {
            ty: None,
            span: SourceSpan {
                file: file.to_string(),
                start_line: 1,
                start_column: 1,
                end_line: 1,
                end_column: 1,
            },
            doc: None,
            initializer: None,
            vendored: false,
        });
        DeclId(self.decls.len() as u32)
    }

    pub fn bind(&mut self, symbol: SymbolId, decl: DeclId) {
        self.symbol_entry_mut(symbol).decls.push(decl);
    }

    pub fn set_decl_type(&mut self, decl: DeclId, ty: TypeHandle) {
        self.decl_entry_mut(decl).ty = Some(ty);
    }

    pub fn set_span(&mut self, decl: DeclId, span: SourceSpan) {
        self.decl_entry_mut(decl).span = span;
    }

    pub fn set_doc(&mut self, decl: DeclId, description: &str, tags: Vec<DocTag>) {
        self.decl_entry_mut(decl).doc = Some(DocComment {
            description: Some(description.to_string()),
            tags,
        });
    }

    pub fn set_initializer(&mut self, decl: DeclId, text: &str, expr: InitializerExpr) {
        self.decl_entry_mut(decl).initializer = Some(Initializer {
            text: text.to_string(),
            expr,
        });
    }

    pub fn set_vendored(&mut self, decl: DeclId) {
        self.decl_entry_mut(decl).vendored = true;
    }

    /// Register a named type in one step: symbol + declaration + shape.
    /// Returns the pieces so tests can keep refining them.
    pub fn declare(
        &mut self,
        name: &str,
        file: &str,
        text: impl Into<String>,
        shape: Shape,
    ) -> (TypeHandle, SymbolId, DeclId) {
        let symbol = self.add_symbol(name);
        let decl = self.add_decl(file);
        self.bind(symbol, decl);
        let handle = self.add_type(text, shape);
        self.set_type_symbol(handle, symbol);
        self.set_decl_type(decl, handle);
        (handle, symbol, decl)
    }

    /// Like [`declare`](Self::declare), but the declaration is marked
    /// vendored (outside the first-party tree).
    pub fn declare_vendored(
        &mut self,
        name: &str,
        file: &str,
        text: impl Into<String>,
        shape: Shape,
    ) -> (TypeHandle, SymbolId, DeclId) {
        let (handle, symbol, decl) = self.declare(name, file, text, shape);
        self.set_vendored(decl);
        (handle, symbol, decl)
    }

    // -----------------------------------------------------------------
    // Failure injection
    // -----------------------------------------------------------------

    /// Make every subsequent query fail, simulating a collaborator that
    /// has gone away mid-call.
    pub fn poison(&mut self) {
        self.poisoned = true;
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn type_entry_mut(&mut self, handle: TypeHandle) -> &mut TypeEntry {
        &mut self.types[handle.0 as usize - 1]
    }

    fn decl_entry_mut(&mut self, decl: DeclId) -> &mut DeclEntry {
        &mut self.decls[decl.0 as usize - 1]
    }

    fn symbol_entry_mut(&mut self, symbol: SymbolId) -> &mut SymbolEntry {
        &mut self.symbols[symbol.0 as usize - 1]
    }

    fn check(&self) -> HostResult<()> {
        if self.poisoned {
            return Err(HostError::unavailable("fixture poisoned"));
        }
        Ok(())
    }

    fn type_entry(&self, handle: TypeHandle) -> HostResult<&TypeEntry> {
        self.check()?;
        self.types
            .get(handle.0.wrapping_sub(1) as usize)
            .filter(|_| handle.is_valid())
            .ok_or(HostError::InvalidHandle {
                handle: handle.0,
                space: "type",
            })
    }

    fn decl_entry(&self, decl: DeclId) -> HostResult<&DeclEntry> {
        self.check()?;
        self.decls
            .get(decl.0.wrapping_sub(1) as usize)
            .filter(|_| decl.is_valid())
            .ok_or(HostError::InvalidHandle {
                handle: decl.0,
                space: "declaration",
            })
    }

    fn symbol_entry(&self, symbol: SymbolId) -> HostResult<&SymbolEntry> {
        self.check()?;
        self.symbols
            .get(symbol.0.wrapping_sub(1) as usize)
            .filter(|_| symbol.is_valid())
            .ok_or(HostError::InvalidHandle {
                handle: symbol.0,
                space: "symbol",
            })
    }
}

impl TypeHost for FixtureHost {
    fn type_of(&self, decl: DeclId) -> HostResult<TypeHandle> {
        self.decl_entry(decl)?.ty.ok_or(HostError::InvalidHandle {
            handle: decl.0,
            space: "declaration-type",
        })
    }

    fn declarations_of(&self, symbol: SymbolId) -> HostResult<Vec<DeclId>> {
        Ok(self.symbol_entry(symbol)?.decls.clone())
    }

    fn shape_of(&self, ty: TypeHandle) -> HostResult<ShapeDescriptor> {
        let entry = self.type_entry(ty)?;
        entry.shape.clone().ok_or(HostError::InvalidHandle {
            handle: ty.0,
            space: "type-shape",
        })
    }

    fn render_text(&self, ty: TypeHandle) -> HostResult<String> {
        Ok(self.type_entry(ty)?.text.clone())
    }

    fn symbol_name(&self, symbol: SymbolId) -> HostResult<String> {
        Ok(self.symbol_entry(symbol)?.name.clone())
    }

    fn external_module_of(&self, symbol: SymbolId) -> HostResult<Option<String>> {
        Ok(self.symbol_entry(symbol)?.external_module.clone())
    }

    fn source_span_of(&self, decl: DeclId) -> HostResult<SourceSpan> {
        Ok(self.decl_entry(decl)?.span.clone())
    }

    fn doc_comment_of(&self, decl: DeclId) -> HostResult<Option<DocComment>> {
        Ok(self.decl_entry(decl)?.doc.clone())
    }

    fn initializer_of(&self, decl: DeclId) -> HostResult<Option<Initializer>> {
        Ok(self.decl_entry(decl)?.initializer.clone())
    }

    fn is_vendored(&self, decl: DeclId) -> HostResult<bool> {
        Ok(self.decl_entry(decl)?.vendored)
    }
}

#[cfg(test)]
#[path = "../tests/fixture_tests.rs"]
mod tests;
