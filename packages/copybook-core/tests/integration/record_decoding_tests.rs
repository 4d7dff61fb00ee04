//! Decoding whole records against a laid out schema.

use copybook_core::config::{CodecConfig, StringTrimming};
use copybook_core::{BigInt, Decimal, DecodeError, Schema, StandardCodecs, Value};
use ntest::timeout;

use super::helpers::{customer_schema, ebcdic, sequential_offsets};

fn laid_out(codecs: &StandardCodecs) -> anyhow::Result<Schema> {
    let schema = customer_schema(codecs).resolve_sizes(codecs)?;
    let offsets = sequential_offsets(&schema);
    Ok(schema.with_offsets(&offsets)?)
}

fn customer_record() -> Vec<u8> {
    let mut record = Vec::new();
    record.extend(ebcdic("004217"));
    record.extend(ebcdic("JANE DOE  "));
    record.extend([0x00, 0x01, 0x23, 0x45, 0x6D]);
    record.extend([0xFF, 0xFD]);
    record.extend([0x40, 0x40]);
    record.extend(ebcdic("VIP     "));
    record
}

#[timeout(1000)]
#[test]
fn test_decode_full_record() -> anyhow::Result<()> {
    let codecs = StandardCodecs::default();
    let schema = laid_out(&codecs)?;

    let row = schema.decode_record(&customer_record())?;
    assert_eq!(
        row,
        vec![
            ("CUST-ID".to_string(), Some(Value::Integer(BigInt::from(4217)))),
            ("CUST-NAME".to_string(), Some(Value::Text("JANE DOE".to_string()))),
            (
                "BALANCE".to_string(),
                Some(Value::Decimal(Decimal::new(-123456, 2)))
            ),
            ("ORDER-COUNT".to_string(), Some(Value::Integer(BigInt::from(-3)))),
            ("NOTE".to_string(), Some(Value::Text("VIP".to_string()))),
        ]
    );

    let json = serde_json::to_string(&row[2].1)?;
    assert_eq!(json, r#""-1234.56""#);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_short_record_yields_absent_tail() -> anyhow::Result<()> {
    let codecs = StandardCodecs::default();
    let schema = laid_out(&codecs)?;

    let record = customer_record();
    let row = schema.decode_record(&record[..22])?;
    assert_eq!(row[2].1, Some(Value::Decimal(Decimal::new(-123456, 2))));
    assert_eq!(row[3], ("ORDER-COUNT".to_string(), None));
    assert_eq!(row[4], ("NOTE".to_string(), None));
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_malformed_bytes_propagate() -> anyhow::Result<()> {
    let codecs = StandardCodecs::default();
    let schema = laid_out(&codecs)?;

    let mut record = customer_record();
    record[2] = 0x7A;
    assert_eq!(
        schema.decode_record(&record).unwrap_err(),
        DecodeError::InvalidDigit {
            byte: 0x7A,
            position: 2
        }
    );
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_config_changes_text_decoding() -> anyhow::Result<()> {
    let config = CodecConfig {
        string_trimming: StringTrimming::None,
        ..CodecConfig::from_json("{}")?
    };
    let codecs = StandardCodecs::new(config);
    let schema = laid_out(&codecs)?;

    let row = schema.decode_record(&customer_record())?;
    assert_eq!(row[1].1, Some(Value::Text("JANE DOE  ".to_string())));
    Ok(())
}
