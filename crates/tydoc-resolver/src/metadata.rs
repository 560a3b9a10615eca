//! Doc-comment and default-value capture.
//!
//! Metadata flows from declarations onto finished nodes: description and
//! tags from the doc comment, file/position from the source span. When a
//! node has both a member declaration and a symbol declaration, the member
//! is applied first and the first writer of each field wins.
//!
//! Initializer snapshots are deliberately narrow: only JSON-shaped
//! expressions (numbers, strings, booleans, null, and object/array
//! literals built recursively of the same) become a structured value. A
//! computed part anywhere (a call, an identifier, arithmetic) suppresses
//! the structured snapshot entirely, leaving only the rendered text.

use tydoc_host::{DeclId, HostResult, InitializerExpr, TypeHost};
use tydoc_model::{Position, TypeNode, literal::number_to_json};

/// Attach span, description, and tags from `decl` onto `node`, filling
/// only fields that are still empty.
pub fn apply(host: &dyn TypeHost, node: &mut TypeNode, decl: DeclId) -> HostResult<()> {
    if node.file_path.is_none() || node.position.is_none() {
        let span = host.source_span_of(decl)?;
        if node.file_path.is_none() {
            node.file_path = Some(span.file);
        }
        if node.position.is_none() {
            node.position = Some(Position::new(
                span.start_line,
                span.start_column,
                span.end_line,
                span.end_column,
            ));
        }
    }
    if node.description.is_none() && node.tags.is_empty() {
        if let Some(doc) = host.doc_comment_of(decl)? {
            node.description = doc.description;
            node.tags = doc.tags;
        }
    }
    Ok(())
}

/// Description text of a declaration's doc comment, if any.
pub fn description_of(host: &dyn TypeHost, decl: DeclId) -> HostResult<Option<String>> {
    Ok(host
        .doc_comment_of(decl)?
        .and_then(|doc| doc.description))
}

/// Structured + rendered default value of a declaration's initializer.
///
/// The structured half is `None` unless the whole initializer is
/// JSON-shaped; the rendered text is kept either way.
pub fn default_of(
    host: &dyn TypeHost,
    decl: DeclId,
) -> HostResult<(Option<serde_json::Value>, Option<String>)> {
    match host.initializer_of(decl)? {
        Some(init) => Ok((json_snapshot(&init.expr), Some(init.text))),
        None => Ok((None, None)),
    }
}

/// Convert a JSON-shaped initializer expression to a structured value.
/// Returns `None` if any part of the expression is computed.
pub fn json_snapshot(expr: &InitializerExpr) -> Option<serde_json::Value> {
    match expr {
        InitializerExpr::Number(n) => Some(number_to_json(*n)),
        InitializerExpr::String(s) => Some(serde_json::Value::String(s.clone())),
        InitializerExpr::Bool(b) => Some(serde_json::Value::Bool(*b)),
        InitializerExpr::Null => Some(serde_json::Value::Null),
        InitializerExpr::Array(items) => items
            .iter()
            .map(json_snapshot)
            .collect::<Option<Vec<_>>>()
            .map(serde_json::Value::Array),
        InitializerExpr::Object(entries) => {
            let mut map = serde_json::Map::with_capacity(entries.len());
            for (key, value) in entries {
                map.insert(key.clone(), json_snapshot(value)?);
            }
            Some(serde_json::Value::Object(map))
        }
        InitializerExpr::Computed => None,
    }
}

#[cfg(test)]
#[path = "../tests/metadata_tests.rs"]
mod tests;
