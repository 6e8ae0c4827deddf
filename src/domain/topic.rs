use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::domain::error::CodecError;

/// Topic identifier as assigned by the controller.
///
/// On the wire it is two big-endian 64-bit halves, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TopicId {
    id: Uuid,
}

impl TopicId {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }

    pub fn from_halves(most_significant: u64, least_significant: u64) -> Self {
        let value = ((most_significant as u128) << 64) | least_significant as u128;
        Self {
            id: Uuid::from_u128(value),
        }
    }

    pub fn halves(&self) -> (u64, u64) {
        let value = self.id.as_u128();
        ((value >> 64) as u64, value as u64)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.id.as_bytes()
    }

    pub fn zero() -> Self {
        Self { id: Uuid::nil() }
    }

    pub fn is_zero(&self) -> bool {
        self.id.is_nil()
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id.hyphenated())
    }
}

impl FromStr for TopicId {
    type Err = CodecError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self::new)
            .map_err(|e| CodecError::invalid_argument("topic_id", e.to_string()))
    }
}

impl From<Uuid> for TopicId {
    fn from(id: Uuid) -> Self {
        Self { id }
    }
}

impl From<[u8; 16]> for TopicId {
    fn from(bytes: [u8; 16]) -> Self {
        Self {
            id: Uuid::from_bytes(bytes),
        }
    }
}
