//! End to end: source text through the expression language into a fabric and back.

use serde_json::json;
use wiregram::ast::{BinaryOp, Node, NodeKind, PatternCategory, Value};
use wiregram::fabric::Fabric;
use wiregram::languages::{Expression, Language, LanguageRegistry};
use wiregram::token::{Token, TokenKind};

fn sum_fabric() -> Fabric {
    let root = Node::binary(BinaryOp::Add, Node::int(1), Node::int(2));
    let tokens = vec![
        Token::with_value(TokenKind::Number, 1i64, 0),
        Token::bare(TokenKind::Plus, 2),
        Token::with_value(TokenKind::Number, 2i64, 4),
        Token::eof(5),
    ];
    Fabric::new("1 + 2", root, tokens)
}

#[test]
fn test_fabric_projection() {
    let fabric = sum_fabric();
    assert_eq!(
        fabric.root().to_json(),
        json!({
            "type": "add",
            "value": null,
            "children": [
                {"type": "number", "value": 1, "children": [], "metadata": {}},
                {"type": "number", "value": 2, "children": [], "metadata": {}}
            ],
            "metadata": {}
        })
    );
    assert_eq!(fabric.to_json()["source"], json!("1 + 2"));
    assert_eq!(fabric.to_json()["tokens"][3], json!({"type": "eof", "value": null, "position": 5}));
    assert_eq!(fabric.to_source(), "1 + 2");
}

#[test]
fn test_declining_transform_rebuilds_equal_tree() {
    let fabric = sum_fabric();
    let same = fabric.transform(|_| None);
    assert_eq!(&same, fabric.root());
}

#[test]
fn test_literals_in_pre_order() {
    let root = Node::program(vec![Node::assign(
        Node::identifier("greeting"),
        Node::binary(BinaryOp::Add, Node::string("hi"), Node::int(3)),
    )]);
    let literals = root.find_patterns(PatternCategory::Literals);
    let kinds: Vec<NodeKind> = literals.iter().map(|node| node.kind()).collect();
    assert_eq!(kinds, vec![NodeKind::String, NodeKind::Number]);
    assert_eq!(literals[1].value(), Some(&Value::Int(3)));
}

#[test]
fn test_process_then_rewrite_then_unweave() {
    let processed = Expression::default().process("let rate = 2 * 4; rate + 0x0A");
    assert!(!processed.has_errors());

    let folded = processed.fabric.transform(|node| {
        if node.kind() != NodeKind::Multiply {
            return None;
        }
        match (node.child(0)?.value(), node.child(1)?.value()) {
            (Some(Value::Int(a)), Some(Value::Int(b))) => Some(Node::int(a * b)),
            _ => None,
        }
    });
    let rewritten = processed.fabric.with_root(folded);
    insta::assert_snapshot!(rewritten.to_source(), @"let rate = 8 rate + 0x0A");
    assert_eq!(processed.fabric.to_source(), "let rate = 2 * 4 rate + 0x0A");
}

#[test]
fn test_streaming_parse_keeps_window_bounded() {
    let input: String = (0..2_000)
        .map(|i| format!("let v{i} = {i} * (v{i} + 1);\n"))
        .collect();
    let mut statements = Expression::default().statements(&input);
    let mut count = 0;
    for statement in statements.by_ref() {
        assert_eq!(statement.kind(), NodeKind::Assign);
        count += 1;
    }
    assert_eq!(count, 2_000);
    assert!(statements.parser().diagnostics().is_empty());
    assert!(statements.parser().tokens().peak_window() <= 2);
}

#[test]
fn test_raw_literals_round_trip_through_config() {
    let config = wiregram::config::Loader::new()
        .set_override("languages.expression.preserve_raw_literals", true)
        .unwrap()
        .build()
        .unwrap();
    let registry = LanguageRegistry::from_config(&config);
    let language = registry.get("expression").unwrap();
    let source = "let price = 010.50 * 1e2";
    let processed = language.process(source);
    assert_eq!(processed.fabric.to_source(), source);

    let raw = processed.root().find_all(Node::is_raw);
    assert_eq!(raw.len(), 2);
    assert_eq!(raw[0].text(), Some("010.50"));
    assert!(processed.to_json()["ast"]["children"][0]["children"][1]["children"][0]["metadata"]
        .as_object()
        .is_some_and(|metadata| metadata.is_empty()));
}

#[test]
fn test_errors_are_collected_not_fatal() {
    let processed = Expression::default().process("let a = ; let b = 2; (b");
    let got: Vec<TokenKind> = processed.diagnostics.iter().map(|d| d.got).collect();
    assert_eq!(got, vec![TokenKind::Semicolon, TokenKind::Eof]);
    assert_eq!(processed.fabric.to_source(), "let b = 2");
    assert_eq!(
        processed.diagnostics[0].to_string(),
        "unexpected_token: expected expression, got semicolon at 8"
    );
}

#[test]
fn test_long_flat_sum_processes_and_drops() {
    let terms = 200_000;
    let source = vec!["1"; terms].join(" + ");
    let processed = Expression::default().process(&source);
    assert!(!processed.has_errors());
    assert_eq!(processed.shape().node_count, 2 * terms);
    assert_eq!(processed.shape().depth, terms);
    assert_eq!(processed.fabric.to_source(), source);

    let doubled = processed.fabric.transform(|node| match node.value() {
        Some(Value::Int(1)) => Some(Node::int(2)),
        _ => None,
    });
    assert_eq!(doubled.find_all(|node| node.value() == Some(&Value::Int(2))).len(), terms);
    assert_eq!(processed.root().snapshot().children.len(), 1);
    drop(doubled);
    drop(processed);
}
