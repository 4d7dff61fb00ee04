//! Shared fixtures for integration tests.

use copybook_core::{
    DataType, Encoding, FieldDecl, FieldId, Group, Primitive, Schema, SignPosition,
    StandardCodecs, Usage,
};

/// Builds a declaration with no OCCURS/REDEFINES metadata.
pub fn decl(level: u32, name: &str, line: usize, data_type: DataType, parent: FieldId) -> FieldDecl {
    FieldDecl {
        level,
        name: name.to_string(),
        line_number: line,
        data_type,
        redefines: None,
        occurs: None,
        to: None,
        depending_on: None,
        is_filler: false,
        parent: Some(parent),
    }
}

/// Customer record used across tests (EBCDIC):
///
/// ```text
/// 01 CUSTOMER.
///    05 CUST-ID      PIC 9(6).
///    05 CUST-NAME    PIC X(10).
///    05 BALANCE      PIC S9(7)V99 COMP-3.
///    05 ORDER-COUNT  PIC S9(4) COMP.
///    05 FILLER       PIC X(2).
///    05 NOTE         PIC X(8).
/// ```
pub fn customer_schema(codecs: &StandardCodecs) -> Schema {
    let mut schema = Schema::new();
    let root = schema.push(Group {
        level: 1,
        name: "CUSTOMER".to_string(),
        line_number: 1,
        parent: None,
    });
    let ebcdic = Encoding::Ebcdic;
    schema.push(Primitive::bind(
        decl(
            5,
            "CUST-ID",
            2,
            DataType::Integral {
                encoding: ebcdic,
                compact: None,
                precision: 6,
                sign_position: None,
                is_sign_separate: false,
            },
            root,
        ),
        codecs,
    ));
    schema.push(Primitive::bind(
        decl(
            5,
            "CUST-NAME",
            3,
            DataType::AlphaNumeric {
                length: 10,
                encoding: ebcdic,
            },
            root,
        ),
        codecs,
    ));
    schema.push(Primitive::bind(
        decl(
            5,
            "BALANCE",
            4,
            DataType::Decimal {
                encoding: ebcdic,
                compact: Some(Usage::Packed),
                precision: 9,
                scale: 2,
                sign_position: Some(SignPosition::Trailing),
                is_sign_separate: false,
                explicit_decimal_point: false,
            },
            root,
        ),
        codecs,
    ));
    schema.push(Primitive::bind(
        decl(
            5,
            "ORDER-COUNT",
            5,
            DataType::Integral {
                encoding: ebcdic,
                compact: Some(Usage::Binary),
                precision: 4,
                sign_position: Some(SignPosition::Leading),
                is_sign_separate: false,
            },
            root,
        ),
        codecs,
    ));
    schema.push(Primitive::bind(
        FieldDecl {
            is_filler: true,
            ..decl(
                5,
                "FILLER",
                6,
                DataType::AlphaNumeric {
                    length: 2,
                    encoding: ebcdic,
                },
                root,
            )
        },
        codecs,
    ));
    schema.push(Primitive::bind(
        decl(
            5,
            "NOTE",
            7,
            DataType::AlphaNumeric {
                length: 8,
                encoding: ebcdic,
            },
            root,
        ),
        codecs,
    ));
    schema
}

/// Assigns consecutive offsets to every primitive, the way a simple
/// record layout without REDEFINES would.
pub fn sequential_offsets(schema: &Schema) -> Vec<(FieldId, usize)> {
    let mut offset = 0;
    schema
        .primitives()
        .map(|(id, p)| {
            let at = offset;
            offset += p.binary_properties().bit_length;
            (id, at)
        })
        .collect()
}

/// Encodes ASCII text as EBCDIC (letters, digits and space only).
pub fn ebcdic(text: &str) -> Vec<u8> {
    text.bytes()
        .map(|b| match b {
            b'0'..=b'9' => 0xF0 + (b - b'0'),
            b'A'..=b'I' => 0xC1 + (b - b'A'),
            b'J'..=b'R' => 0xD1 + (b - b'J'),
            b'S'..=b'Z' => 0xE2 + (b - b'S'),
            _ => 0x40,
        })
        .collect()
}
