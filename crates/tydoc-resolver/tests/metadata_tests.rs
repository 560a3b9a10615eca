use super::*;
use tydoc_host::{FixtureHost, SourceSpan};
use tydoc_model::{DocTag, NodeKind, TypeNode};

fn host_with_decl() -> (FixtureHost, tydoc_host::DeclId) {
    let mut host = FixtureHost::new();
    let decl = host.add_decl("src/props.ts");
    host.set_span(
        decl,
        SourceSpan {
            file: "src/props.ts".into(),
            start_line: 4,
            start_column: 3,
            end_line: 4,
            end_column: 20,
        },
    );
    (host, decl)
}

// ===================================================================
// apply: span + doc attachment
// ===================================================================

#[test]
fn apply_fills_span_and_doc() {
    let (mut host, decl) = host_with_decl();
    host.set_doc(
        decl,
        "The title shown above the fold.",
        vec![DocTag::new("default", "\"hello\"")],
    );

    let mut node = TypeNode::new(NodeKind::String, "string");
    apply(&host, &mut node, decl).unwrap();

    assert_eq!(node.file_path.as_deref(), Some("src/props.ts"));
    let pos = node.position.unwrap();
    assert_eq!((pos.start_line, pos.start_column), (4, 3));
    assert_eq!(
        node.description.as_deref(),
        Some("The title shown above the fold.")
    );
    assert_eq!(node.tags.len(), 1);
}

#[test]
fn apply_does_not_overwrite_existing_fields() {
    let (mut host, decl) = host_with_decl();
    host.set_doc(decl, "Symbol-level description.", vec![]);

    let mut node = TypeNode::new(NodeKind::String, "string");
    node.description = Some("Member-level description.".into());
    apply(&host, &mut node, decl).unwrap();

    // First writer wins.
    assert_eq!(
        node.description.as_deref(),
        Some("Member-level description.")
    );
    // Span was still empty, so it is filled.
    assert!(node.position.is_some());
}

#[test]
fn apply_preserves_duplicate_tags_in_order() {
    let (mut host, decl) = host_with_decl();
    host.set_doc(
        decl,
        "x",
        vec![
            DocTag::new("see", "first"),
            DocTag::new("see", "second"),
        ],
    );
    let mut node = TypeNode::new(NodeKind::String, "string");
    apply(&host, &mut node, decl).unwrap();
    assert_eq!(node.tags[0].body, "first");
    assert_eq!(node.tags[1].body, "second");
}

// ===================================================================
// json_snapshot: JSON-shaped initializers only
// ===================================================================

#[test]
fn snapshot_scalars() {
    assert_eq!(
        json_snapshot(&InitializerExpr::Number(1.0)),
        Some(serde_json::json!(1))
    );
    assert_eq!(
        json_snapshot(&InitializerExpr::String("hi".into())),
        Some(serde_json::json!("hi"))
    );
    assert_eq!(
        json_snapshot(&InitializerExpr::Bool(true)),
        Some(serde_json::json!(true))
    );
    assert_eq!(
        json_snapshot(&InitializerExpr::Null),
        Some(serde_json::Value::Null)
    );
}

#[test]
fn snapshot_nested_object_and_array() {
    let expr = InitializerExpr::Object(vec![
        (
            "items".into(),
            InitializerExpr::Array(vec![
                InitializerExpr::Number(1.0),
                InitializerExpr::Number(2.0),
            ]),
        ),
        ("label".into(), InitializerExpr::String("x".into())),
    ]);
    assert_eq!(
        json_snapshot(&expr),
        Some(serde_json::json!({ "items": [1, 2], "label": "x" }))
    );
}

#[test]
fn computed_leaf_suppresses_whole_snapshot() {
    assert_eq!(json_snapshot(&InitializerExpr::Computed), None);

    // Even one computed entry deep inside poisons the whole capture.
    let expr = InitializerExpr::Object(vec![
        ("a".into(), InitializerExpr::Number(1.0)),
        ("b".into(), InitializerExpr::Computed),
    ]);
    assert_eq!(json_snapshot(&expr), None);

    let expr = InitializerExpr::Array(vec![
        InitializerExpr::Number(1.0),
        InitializerExpr::Computed,
    ]);
    assert_eq!(json_snapshot(&expr), None);
}

// ===================================================================
// default_of: structured + rendered defaults
// ===================================================================

#[test]
fn default_of_json_shaped_initializer() {
    let (mut host, decl) = host_with_decl();
    host.set_initializer(
        decl,
        "{ a: 1 }",
        InitializerExpr::Object(vec![("a".into(), InitializerExpr::Number(1.0))]),
    );
    let (value, text) = default_of(&host, decl).unwrap();
    assert_eq!(value, Some(serde_json::json!({ "a": 1 })));
    assert_eq!(text.as_deref(), Some("{ a: 1 }"));
}

#[test]
fn default_of_computed_initializer_keeps_text_only() {
    let (mut host, decl) = host_with_decl();
    host.set_initializer(decl, "makeDefaults()", InitializerExpr::Computed);
    let (value, text) = default_of(&host, decl).unwrap();
    assert_eq!(value, None);
    assert_eq!(text.as_deref(), Some("makeDefaults()"));
}

#[test]
fn default_of_absent_initializer() {
    let (host, decl) = host_with_decl();
    let (value, text) = default_of(&host, decl).unwrap();
    assert!(value.is_none());
    assert!(text.is_none());
}
