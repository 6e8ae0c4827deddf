use bytes::BufMut;

use crate::adapters::protocol::dto::TaggedFields;
use crate::domain::error::CodecError;
use crate::domain::TopicId;

use super::traits::Serialize;
use super::varint::PutVarint;

/// Largest length a compact prefix can carry: the prefix holds `len + 1` and is
/// read back as a signed 32-bit value.
const MAX_COMPACT_LEN: usize = i32::MAX as usize - 1;

fn compact_prefix(field: &'static str, len: usize) -> Result<u32, CodecError> {
    if len > MAX_COMPACT_LEN {
        return Err(CodecError::invalid_argument(
            field,
            format!("length {} exceeds the compact maximum of {}", len, MAX_COMPACT_LEN),
        ));
    }
    Ok(len as u32 + 1)
}

/// Rejects an absent value for a field the protocol never allows to be null.
pub fn require_present<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, CodecError> {
    value.ok_or_else(|| CodecError::invalid_argument(field, "value must not be null"))
}

/// Writers for the wire primitives, on top of any growable `BufMut`.
pub trait PutCompact: BufMut {
    fn put_bool(&mut self, value: bool) {
        self.put_u8(value as u8);
    }

    fn put_uuid(&mut self, id: &TopicId) {
        let (most_significant, least_significant) = id.halves();
        self.put_u64(most_significant);
        self.put_u64(least_significant);
    }

    /// INT16 length prefixed, non-null string.
    fn put_string(&mut self, field: &'static str, value: &str) -> Result<(), CodecError> {
        let bytes = value.as_bytes();
        if bytes.len() > i16::MAX as usize {
            return Err(CodecError::invalid_argument(
                field,
                format!("length {} exceeds {}", bytes.len(), i16::MAX),
            ));
        }
        self.put_i16(bytes.len() as i16);
        self.put_slice(bytes);
        Ok(())
    }

    fn put_compact_string(&mut self, field: &'static str, value: &str) -> Result<(), CodecError> {
        let bytes = value.as_bytes();
        self.put_uvarint(compact_prefix(field, bytes.len())?);
        self.put_slice(bytes);
        Ok(())
    }

    fn put_compact_nullable_string(
        &mut self,
        field: &'static str,
        value: Option<&str>,
    ) -> Result<(), CodecError> {
        match value {
            Some(value) => self.put_compact_string(field, value),
            None => {
                self.put_uvarint(0);
                Ok(())
            }
        }
    }

    fn put_compact_array_len(&mut self, field: &'static str, len: usize) -> Result<(), CodecError> {
        self.put_uvarint(compact_prefix(field, len)?);
        Ok(())
    }

    fn put_compact_array<T: Serialize>(&mut self, field: &'static str, items: &[T]) -> Result<(), CodecError>
    where
        Self: Sized,
    {
        self.put_compact_array_len(field, items.len())?;
        for item in items {
            item.serialize(self)?;
        }
        Ok(())
    }

    /// Writes the section as count, then `tag size data` per entry.
    fn put_tagged_fields(&mut self, field: &'static str, fields: &TaggedFields) -> Result<(), CodecError> {
        let mut previous: Option<u32> = None;
        for entry in fields.iter() {
            if previous.is_some_and(|tag| tag >= entry.tag) {
                return Err(CodecError::invalid_argument(
                    field,
                    format!("tag {} is not in strictly ascending order", entry.tag),
                ));
            }
            previous = Some(entry.tag);
        }

        self.put_uvarint(fields.len() as u32);
        for entry in fields.iter() {
            self.put_uvarint(entry.tag);
            self.put_uvarint(compact_prefix(field, entry.data.len())? - 1);
            self.put_slice(&entry.data);
        }
        Ok(())
    }
}

impl<B: BufMut + ?Sized> PutCompact for B {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::protocol::parser::base_parser::FrameReader;
    use crate::adapters::protocol::parser::traits::{
        CompactArrayParser, CompactStringParser, TaggedFieldsParser,
    };
    use bytes::BytesMut;

    #[test]
    fn test_put_compact_string() {
        let mut buf = BytesMut::new();
        buf.put_compact_string("name", "orders").unwrap();
        assert_eq!(&buf[..], b"\x07orders");

        let mut buf = BytesMut::new();
        buf.put_compact_string("name", "").unwrap();
        assert_eq!(&buf[..], &[1]);
    }

    #[test]
    fn test_put_compact_nullable_string() {
        let mut buf = BytesMut::new();
        buf.put_compact_nullable_string("value", None).unwrap();
        buf.put_compact_nullable_string("value", Some("1")).unwrap();
        assert_eq!(&buf[..], &[0, 2, b'1']);

        let mut src = FrameReader::new(buf.freeze());
        assert_eq!(src.parse_compact_nullable_string("value").unwrap(), None);
        assert_eq!(src.parse_compact_nullable_string("value").unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_put_compact_array_len_is_count_plus_one() {
        let mut buf = BytesMut::new();
        buf.put_compact_array_len("topics", 0).unwrap();
        buf.put_compact_array_len("topics", 127).unwrap();
        assert_eq!(&buf[..], &[1, 0x80, 0x01]);

        let mut src = FrameReader::new(buf.freeze());
        assert_eq!(src.parse_compact_array_len("topics").unwrap(), Some(0));
        assert_eq!(src.parse_compact_array_len("topics").unwrap(), Some(127));
    }

    #[test]
    fn test_put_string_uses_int16_prefix() {
        let mut buf = BytesMut::new();
        buf.put_string("client_id", "client-id").unwrap();
        assert_eq!(&buf[..2], &[0, 9]);
        assert_eq!(&buf[2..], b"client-id");
    }

    #[test]
    fn test_put_string_too_long() {
        let long = "x".repeat(i16::MAX as usize + 1);
        let err = BytesMut::new().put_string("client_id", &long).unwrap_err();
        assert!(matches!(err, CodecError::InvalidArgument { field: "client_id", .. }));
    }

    #[test]
    fn test_require_present() {
        assert_eq!(require_present("client_id", Some("a")).unwrap(), "a");
        assert_eq!(
            require_present("client_id", None).unwrap_err(),
            CodecError::InvalidArgument {
                field: "client_id",
                reason: "value must not be null".to_string(),
            }
        );
    }

    #[test]
    fn test_put_empty_tagged_fields_is_single_zero() {
        let mut buf = BytesMut::new();
        buf.put_tagged_fields("tagged_fields", &TaggedFields::new()).unwrap();
        assert_eq!(&buf[..], &[0]);
    }

    #[test]
    fn test_put_tagged_fields_layout() {
        let fields = TaggedFields::new()
            .with_field(1, vec![0xaau8])
            .with_field(200, vec![0xbbu8, 0xcc]);

        let mut buf = BytesMut::new();
        buf.put_tagged_fields("tagged_fields", &fields).unwrap();
        assert_eq!(&buf[..], &[2, 1, 1, 0xaa, 0xc8, 0x01, 2, 0xbb, 0xcc]);

        let mut src = FrameReader::new(buf.freeze());
        assert_eq!(src.parse_tagged_fields("tagged_fields").unwrap(), fields);
        assert!(src.is_empty());
    }

    #[test]
    fn test_put_tagged_fields_rejects_unordered_tags() {
        let fields = TaggedFields::new()
            .with_field(3, Vec::<u8>::new())
            .with_field(3, Vec::<u8>::new());
        let err = BytesMut::new().put_tagged_fields("tagged_fields", &fields).unwrap_err();
        assert!(matches!(err, CodecError::InvalidArgument { field: "tagged_fields", .. }));
    }
}
