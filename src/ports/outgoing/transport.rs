use async_trait::async_trait;
use bytes::Bytes;

use crate::Result;

/// Byte stream to the broker. One frame is written in full before the reply is read.
#[async_trait]
pub trait Transport: Send {
    async fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    /// Reads exactly `len` bytes, failing if the peer closes first.
    async fn read_exact(&mut self, len: usize) -> Result<Bytes>;
}
