//! Sizing and decoding properties over generated field declarations.

use std::sync::{Arc, Mutex};

use copybook_core::codec::Decoder;
use copybook_core::config::{MAX_DECIMAL_PRECISION, MAX_DECIMAL_SCALE};
use copybook_core::{
    BigInt, BinaryProperties, DataType, DecodeError, Encoding, FieldId, Primitive, SignPosition,
    StandardCodecs, Usage, Value,
};
use proptest::prelude::*;

use super::helpers::decl;

fn size(data_type: DataType) -> usize {
    let codecs = StandardCodecs::default();
    Primitive::bind(decl(5, "F", 1, data_type, FieldId(0)), &codecs)
        .binary_size_bits(&codecs)
        .unwrap()
}

fn sign_position() -> impl Strategy<Value = Option<SignPosition>> {
    prop::option::of(prop_oneof![Just(SignPosition::Leading), Just(SignPosition::Trailing)])
}

fn single_byte_encoding() -> impl Strategy<Value = Encoding> {
    prop_oneof![Just(Encoding::Ebcdic), Just(Encoding::Ascii)]
}

proptest! {
    #[test]
    fn alphanumeric_is_eight_bits_per_char(length in 1u32..2000, encoding in single_byte_encoding()) {
        prop_assert_eq!(size(DataType::AlphaNumeric { length, encoding }), 8 * length as usize);
    }

    #[test]
    fn packed_integral_width(precision in 1u32..=38) {
        let bits = size(DataType::Integral {
            encoding: Encoding::Ebcdic,
            compact: Some(Usage::Packed),
            precision,
            sign_position: Some(SignPosition::Trailing),
            is_sign_separate: false,
        });
        let raw = (precision as usize + 1) * 4;
        prop_assert_eq!(bits, raw.div_ceil(8) * 8);
    }

    #[test]
    fn display_decimal_width(
        precision in 1u32..=38,
        scale in 0u32..=18,
        sign_position in sign_position(),
        separate in any::<bool>(),
        encoding in single_byte_encoding(),
    ) {
        prop_assume!(scale <= precision);
        let bits = size(DataType::Decimal {
            encoding,
            compact: None,
            precision,
            scale,
            sign_position,
            is_sign_separate: separate,
            explicit_decimal_point: false,
        });
        let expected = precision as usize * 8 + if separate { 8 } else { 0 };
        prop_assert_eq!(bits, expected);
    }

    #[test]
    fn width_is_byte_aligned(precision in 1u32..=38, packed in any::<bool>()) {
        let compact = if packed { Some(Usage::Packed) } else { Some(Usage::PackedUnsigned) };
        let bits = size(DataType::Integral {
            encoding: Encoding::Ebcdic,
            compact,
            precision,
            sign_position: None,
            is_sign_separate: false,
        });
        prop_assert_eq!(bits % 8, 0);
    }

    #[test]
    fn decimal_integer_digit_limit(scale in 0u32..=MAX_DECIMAL_SCALE) {
        let codecs = StandardCodecs::default();
        let at = |precision| {
            Primitive::bind(
                decl(5, "D", 9, DataType::Decimal {
                    encoding: Encoding::Ascii,
                    compact: None,
                    precision,
                    scale,
                    sign_position: None,
                    is_sign_separate: false,
                    explicit_decimal_point: false,
                }, FieldId(0)),
                &codecs,
            )
            .binary_size_bits(&codecs)
        };
        prop_assert!(at(MAX_DECIMAL_PRECISION + scale).is_ok());
        prop_assert!(at(MAX_DECIMAL_PRECISION + scale + 1).is_err());
    }

    #[test]
    fn decoding_stays_within_field(
        offset_bytes in 0usize..64,
        bytes in 1usize..16,
        record_len in 0usize..96,
    ) {
        let max_seen = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&max_seen);
        let decode: Decoder = Arc::new(move |slice: &[u8]| -> Result<Option<Value>, DecodeError> {
            let mut seen = sink.lock().unwrap();
            *seen = (*seen).max(slice.len());
            Ok(Some(Value::Integer(BigInt::from(0))))
        });
        let field = Primitive::new(
            decl(5, "P", 1, DataType::AlphaNumeric { length: bytes as u32, encoding: Encoding::Ascii }, FieldId(0)),
            decode,
        )
        .with_binary_properties(BinaryProperties::new(offset_bytes * 8, bytes * 8));

        let record = vec![0u8; record_len];
        let result = field.decode_value(offset_bytes * 8, &record).unwrap();
        if offset_bytes + bytes > record_len {
            prop_assert_eq!(result, None);
            prop_assert_eq!(*max_seen.lock().unwrap(), 0);
        } else {
            prop_assert!(result.is_some());
            prop_assert_eq!(*max_seen.lock().unwrap(), bytes);
        }
    }
}
