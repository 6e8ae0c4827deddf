use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use std::io;

use crate::application::ApplicationError;
use crate::ports::outgoing::Transport;
use crate::Result;

/// In-process transport: reads come from a preloaded buffer, writes are recorded.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    inbound: BytesMut,
    written: Vec<u8>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inbound(data: &[u8]) -> Self {
        let mut transport = Self::new();
        transport.push_inbound(data);
        transport
    }

    /// Queues bytes for later reads, after anything already queued.
    pub fn push_inbound(&mut self, data: &[u8]) {
        self.inbound.extend_from_slice(data);
    }

    /// Everything written so far, in order.
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    pub fn inbound_remaining(&self) -> usize {
        self.inbound.len()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.written.extend_from_slice(bytes);
        Ok(())
    }

    async fn read_exact(&mut self, len: usize) -> Result<Bytes> {
        if self.inbound.len() < len {
            return Err(ApplicationError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("wanted {} bytes but only {} remain", len, self.inbound.len()),
            )));
        }
        Ok(self.inbound.split_to(len).freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_in_order_and_records_writes() {
        let mut transport = MemoryTransport::with_inbound(&[1, 2]);
        transport.push_inbound(&[3]);

        assert_eq!(&transport.read_exact(2).await.unwrap()[..], &[1, 2]);
        assert_eq!(&transport.read_exact(1).await.unwrap()[..], &[3]);
        assert_eq!(transport.inbound_remaining(), 0);

        transport.write_all(b"ab").await.unwrap();
        transport.write_all(b"c").await.unwrap();
        assert_eq!(transport.written(), b"abc");
    }

    #[tokio::test]
    async fn test_short_read_is_unexpected_eof() {
        let mut transport = MemoryTransport::with_inbound(&[1]);
        match transport.read_exact(2).await {
            Err(ApplicationError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected eof, got {:?}", other),
        }
        // nothing is consumed by a failed read
        assert_eq!(transport.inbound_remaining(), 1);
    }
}
