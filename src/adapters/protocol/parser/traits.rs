use bytes::BufMut;

use crate::adapters::protocol::dto::TaggedFields;
use crate::domain::error::CodecError;
use crate::domain::TopicId;

use super::base_parser::FrameReader;

/// Position tracking over a byte stream being parsed.
pub trait ByteParser {
    /// Offset of the next unread byte, relative to the start of the payload.
    fn offset(&self) -> usize;

    fn remaining(&self) -> usize;

    /// Fails with `TruncatedInput` unless `required` bytes remain.
    fn ensure_remaining(&self, field: &'static str, required: usize) -> Result<(), CodecError> {
        if self.remaining() < required {
            return Err(CodecError::TruncatedInput {
                field,
                offset: self.offset(),
                needed: required,
                available: self.remaining(),
            });
        }
        Ok(())
    }
}

/// Decodes a record from the reader.
pub trait Deserialize: Sized {
    fn deserialize(src: &mut FrameReader) -> Result<Self, CodecError>;
}

/// Encodes a record into a growable buffer.
pub trait Serialize {
    fn serialize<B: BufMut>(&self, dst: &mut B) -> Result<(), CodecError>;
}

/// Fixed-width big-endian primitives.
pub trait PrimitiveParser: ByteParser {
    fn parse_i8(&mut self, field: &'static str) -> Result<i8, CodecError>;
    fn parse_i16(&mut self, field: &'static str) -> Result<i16, CodecError>;
    fn parse_i32(&mut self, field: &'static str) -> Result<i32, CodecError>;
    fn parse_i64(&mut self, field: &'static str) -> Result<i64, CodecError>;
    fn parse_bool(&mut self, field: &'static str) -> Result<bool, CodecError>;
    fn parse_uuid(&mut self, field: &'static str) -> Result<TopicId, CodecError>;
}

/// INT16-prefixed and compact strings.
pub trait CompactStringParser: ByteParser {
    /// INT16 length prefixed string, -1 means null. Only the request header uses it.
    fn parse_nullable_string(&mut self, field: &'static str) -> Result<Option<String>, CodecError>;
    fn parse_compact_string(&mut self, field: &'static str) -> Result<String, CodecError>;
    fn parse_compact_nullable_string(
        &mut self,
        field: &'static str,
    ) -> Result<Option<String>, CodecError>;
}

/// Compact arrays: uvarint count + 1, then the elements.
pub trait CompactArrayParser: ByteParser {
    /// Element count of a compact array, `None` for a null array.
    fn parse_compact_array_len(&mut self, field: &'static str) -> Result<Option<usize>, CodecError>;

    fn parse_compact_array<T, F>(&mut self, field: &'static str, parser: F) -> Result<Vec<T>, CodecError>
    where
        F: FnMut(&mut Self) -> Result<T, CodecError>;
}

/// Unsigned varints.
pub trait VarIntParser: ByteParser {
    fn parse_uvarint(&mut self, field: &'static str) -> Result<u32, CodecError>;
}

/// Trailing tagged-field section shared by every flexible record.
pub trait TaggedFieldsParser: VarIntParser {
    fn parse_tagged_fields(&mut self, field: &'static str) -> Result<TaggedFields, CodecError>;
}
