use bytes::{Buf, Bytes};
use tracing::debug;

use crate::adapters::protocol::dto::{RawTaggedField, TaggedFields};
use crate::domain::error::CodecError;
use crate::domain::TopicId;

use super::traits::*;
use super::varint::MAX_UVARINT_BYTES;

/// Upper bound on elements reserved up front for a count read off the wire.
const MAX_PREALLOCATED_ITEMS: usize = 1024;

/// Cursor over one frame payload (everything after the 4-byte length prefix).
///
/// Each read checks the remaining length first, so running off the end always
/// surfaces as [`CodecError::TruncatedInput`] for the field being read.
#[derive(Debug, Clone)]
pub struct FrameReader {
    buf: Bytes,
    origin: usize,
}

impl FrameReader {
    pub fn new(buf: Bytes) -> Self {
        let origin = buf.len();
        Self { buf, origin }
    }

    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    pub fn is_empty(&self) -> bool {
        !self.buf.has_remaining()
    }

    /// Splits off the next `len` bytes without copying.
    pub fn take_bytes(&mut self, field: &'static str, len: usize) -> Result<Bytes, CodecError> {
        self.ensure_remaining(field, len)?;
        Ok(self.buf.split_to(len))
    }

    /// Fails unless every byte of the payload was consumed.
    pub fn expect_end(&self, field: &'static str) -> Result<(), CodecError> {
        if self.is_empty() {
            return Ok(());
        }
        Err(CodecError::InvalidEncoding {
            field,
            offset: self.offset(),
            reason: format!("{} trailing bytes after the last field", self.remaining()),
        })
    }

    /// Length prefix of a compact field, already shifted down by one.
    ///
    /// The prefix is read as an unsigned varint but carries a signed 32-bit length.
    fn parse_compact_len(&mut self, field: &'static str) -> Result<i64, CodecError> {
        let raw = self.parse_uvarint(field)?;
        Ok(raw as i32 as i64 - 1)
    }

    fn read_utf8(&mut self, field: &'static str, len: usize) -> Result<String, CodecError> {
        let offset = self.offset();
        let bytes = self.take_bytes(field, len)?;
        std::str::from_utf8(&bytes)
            .map(str::to_owned)
            .map_err(|e| CodecError::InvalidEncoding {
                field,
                offset,
                reason: format!("invalid UTF-8 sequence: {}", e),
            })
    }
}

impl ByteParser for FrameReader {
    fn offset(&self) -> usize {
        self.origin - self.buf.remaining()
    }

    fn remaining(&self) -> usize {
        self.buf.remaining()
    }
}

impl PrimitiveParser for FrameReader {
    fn parse_i8(&mut self, field: &'static str) -> Result<i8, CodecError> {
        self.ensure_remaining(field, 1)?;
        Ok(self.buf.get_i8())
    }

    fn parse_i16(&mut self, field: &'static str) -> Result<i16, CodecError> {
        self.ensure_remaining(field, 2)?;
        Ok(self.buf.get_i16())
    }

    fn parse_i32(&mut self, field: &'static str) -> Result<i32, CodecError> {
        self.ensure_remaining(field, 4)?;
        Ok(self.buf.get_i32())
    }

    fn parse_i64(&mut self, field: &'static str) -> Result<i64, CodecError> {
        self.ensure_remaining(field, 8)?;
        Ok(self.buf.get_i64())
    }

    fn parse_bool(&mut self, field: &'static str) -> Result<bool, CodecError> {
        self.ensure_remaining(field, 1)?;
        Ok(self.buf.get_u8() != 0)
    }

    fn parse_uuid(&mut self, field: &'static str) -> Result<TopicId, CodecError> {
        self.ensure_remaining(field, 16)?;
        let most_significant = self.buf.get_u64();
        let least_significant = self.buf.get_u64();
        Ok(TopicId::from_halves(most_significant, least_significant))
    }
}

impl CompactStringParser for FrameReader {
    fn parse_nullable_string(&mut self, field: &'static str) -> Result<Option<String>, CodecError> {
        let offset = self.offset();
        let len = self.parse_i16(field)?;
        match len {
            -1 => Ok(None),
            len if len < 0 => Err(CodecError::NegativeLength {
                field,
                offset,
                length: len as i64,
            }),
            len => self.read_utf8(field, len as usize).map(Some),
        }
    }

    fn parse_compact_string(&mut self, field: &'static str) -> Result<String, CodecError> {
        let offset = self.offset();
        let len = self.parse_compact_len(field)?;
        if len < 0 {
            return Err(CodecError::NegativeLength {
                field,
                offset,
                length: len,
            });
        }
        self.read_utf8(field, len as usize)
    }

    fn parse_compact_nullable_string(
        &mut self,
        field: &'static str,
    ) -> Result<Option<String>, CodecError> {
        let offset = self.offset();
        match self.parse_compact_len(field)? {
            -1 => Ok(None),
            len if len < 0 => Err(CodecError::NegativeLength {
                field,
                offset,
                length: len,
            }),
            len => self.read_utf8(field, len as usize).map(Some),
        }
    }
}

impl CompactArrayParser for FrameReader {
    fn parse_compact_array_len(&mut self, field: &'static str) -> Result<Option<usize>, CodecError> {
        let offset = self.offset();
        match self.parse_compact_len(field)? {
            -1 => Ok(None),
            len if len < 0 => Err(CodecError::NegativeLength {
                field,
                offset,
                length: len,
            }),
            len => Ok(Some(len as usize)),
        }
    }

    fn parse_compact_array<T, F>(&mut self, field: &'static str, mut parser: F) -> Result<Vec<T>, CodecError>
    where
        F: FnMut(&mut Self) -> Result<T, CodecError>,
    {
        let items_len = self.parse_compact_array_len(field)?.unwrap_or(0);

        // the count is untrusted; grow past the cap only as elements actually decode
        let mut items = Vec::with_capacity(items_len.min(MAX_PREALLOCATED_ITEMS));
        for _ in 0..items_len {
            items.push(parser(self)?);
        }

        Ok(items)
    }
}

impl VarIntParser for FrameReader {
    fn parse_uvarint(&mut self, field: &'static str) -> Result<u32, CodecError> {
        let offset = self.offset();
        let mut res: u32 = 0;

        for n_bytes in 0..MAX_UVARINT_BYTES {
            self.ensure_remaining(field, 1)?;
            let byte = self.buf.get_u8();
            let group = (byte & 0b0111_1111) as u32;

            // the fifth group only has room for the top four bits
            if n_bytes == MAX_UVARINT_BYTES - 1 && group > 0b1111 {
                return Err(CodecError::InvalidEncoding {
                    field,
                    offset,
                    reason: "unsigned varint overflows 32 bits".to_string(),
                });
            }

            res |= group << (7 * n_bytes);

            if byte & 0b1000_0000 == 0 {
                return Ok(res);
            }
        }

        Err(CodecError::InvalidEncoding {
            field,
            offset,
            reason: format!("unsigned varint longer than {} bytes", MAX_UVARINT_BYTES),
        })
    }
}

impl TaggedFieldsParser for FrameReader {
    fn parse_tagged_fields(&mut self, field: &'static str) -> Result<TaggedFields, CodecError> {
        let count = self.parse_uvarint(field)? as usize;

        let mut fields = Vec::with_capacity(count.min(MAX_PREALLOCATED_ITEMS));
        for _ in 0..count {
            let tag = self.parse_uvarint(field)?;
            let size = self.parse_uvarint(field)? as usize;
            let data = self.take_bytes(field, size)?;
            fields.push(RawTaggedField { tag, data });
        }

        if count > 0 {
            debug!(field, count, "skipped unknown tagged fields");
        }

        Ok(TaggedFields::from_fields(fields))
    }
}
