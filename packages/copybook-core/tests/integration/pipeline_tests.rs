//! Parse -> resolve -> layout passes over a schema arena.

use copybook_core::{FieldDecl, FieldId, Group, Primitive, Schema, SchemaError, StandardCodecs};
use ntest::timeout;

use super::helpers::customer_schema;

#[timeout(1000)]
#[test]
fn test_passes_produce_independent_snapshots() -> anyhow::Result<()> {
    let codecs = StandardCodecs::default();
    let parsed = customer_schema(&codecs);
    let resolved = parsed.mark_dependee("ORDER-COUNT")?;
    let laid_out = resolved.resolve_sizes(&codecs)?;

    let order_count = parsed.find("ORDER-COUNT").expect("field exists");
    assert!(!parsed.primitive(order_count)?.is_dependee());
    assert!(resolved.primitive(order_count)?.is_dependee());
    assert!(laid_out.primitive(order_count)?.is_dependee());

    assert_eq!(parsed.primitive(order_count)?.binary_properties().bit_length, 0);
    assert_eq!(laid_out.primitive(order_count)?.binary_properties().bit_length, 16);

    // Group node is shared across every pass
    let root = FieldId(0);
    assert!(parsed.shares_node(&resolved, root));
    assert!(resolved.shares_node(&laid_out, root));
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_layout_widths() -> anyhow::Result<()> {
    let codecs = StandardCodecs::default();
    let schema = customer_schema(&codecs).resolve_sizes(&codecs)?;

    let widths: Vec<(String, usize)> = schema
        .primitives()
        .map(|(_, p)| (p.name().to_string(), p.binary_properties().byte_length))
        .collect();
    assert_eq!(
        widths,
        vec![
            ("CUST-ID".to_string(), 6),
            ("CUST-NAME".to_string(), 10),
            ("BALANCE".to_string(), 5),
            ("ORDER-COUNT".to_string(), 2),
            ("FILLER".to_string(), 2),
            ("NOTE".to_string(), 8),
        ]
    );
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_layout_pass_surfaces_definition_error() -> anyhow::Result<()> {
    let codecs = StandardCodecs::default();
    let mut schema = Schema::new();
    let root = schema.push(Group {
        level: 1,
        name: "REC".to_string(),
        line_number: 1,
        parent: None,
    });
    let json = r#"{
        "level": 5,
        "name": "HUGE",
        "line_number": 7,
        "data_type": {"kind": "decimal", "encoding": "ebcdic", "precision": 45, "scale": 2}
    }"#;
    let decl: FieldDecl = serde_json::from_str(json)?;
    schema.push(Primitive::bind(
        FieldDecl {
            parent: Some(root),
            ..decl
        },
        &codecs,
    ));

    let err = schema.resolve_sizes(&codecs).unwrap_err();
    assert!(matches!(err, SchemaError::Definition(_)));
    let message = err.to_string();
    assert!(message.contains("Line 7"));
    assert!(message.contains("HUGE"));
    assert!(message.contains("38"));
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_qualified_names_follow_parent_links() -> anyhow::Result<()> {
    let codecs = StandardCodecs::default();
    let schema = customer_schema(&codecs);
    let balance = schema.find("BALANCE").expect("field exists");
    assert_eq!(schema.qualified_name(balance)?, "CUSTOMER.BALANCE");
    Ok(())
}
