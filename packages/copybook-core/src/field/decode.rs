//! Reading a field's value out of a record buffer.

use crate::error::DecodeError;
use crate::types::Value;

use super::Primitive;

impl Primitive {
    /// Decodes the field from `record` starting at `offset_bits`.
    ///
    /// Returns `Ok(None)` when the field has no resolved width yet, when the
    /// record ends before the field does, or when the codec reports a null.
    /// Codec failures are returned unchanged.
    pub fn decode_value(
        &self,
        offset_bits: usize,
        record: &[u8],
    ) -> Result<Option<Value>, DecodeError> {
        let byte_length = self.binary_properties().bit_length / 8;
        if byte_length == 0 {
            tracing::trace!("Field '{}' has no resolved width", self.name());
            return Ok(None);
        }
        let start = offset_bits / 8;
        let end = match start.checked_add(byte_length) {
            Some(end) if end <= record.len() => end,
            _ => {
                tracing::trace!(
                    "Field '{}' bytes {}..{} beyond record of {} bytes",
                    self.name(),
                    start,
                    start.saturating_add(byte_length),
                    record.len()
                );
                return Ok(None);
            }
        };
        (self.decoder())(&record[start..end])
    }
}
