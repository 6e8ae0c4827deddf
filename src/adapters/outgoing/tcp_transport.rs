use async_trait::async_trait;
use bytes::Bytes;
use std::future::Future;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::application::ApplicationError;
use crate::ports::outgoing::Transport;
use crate::Result;

/// Blocking-style connection to one broker. Every operation runs under `timeout`.
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
    timeout: Duration,
}

impl TcpTransport {
    pub async fn connect(addr: &str, timeout: Duration) -> Result<Self> {
        let stream = with_deadline("connect", timeout, TcpStream::connect(addr)).await?;
        stream.set_nodelay(true)?;
        info!(addr, "connected to broker");
        Ok(Self { stream, timeout })
    }
}

async fn with_deadline<T, F>(operation: &'static str, after: Duration, fut: F) -> Result<T>
where
    F: Future<Output = std::io::Result<T>>,
{
    match tokio::time::timeout(after, fut).await {
        Ok(res) => res.map_err(ApplicationError::Io),
        Err(_) => Err(ApplicationError::Timeout { operation, after }),
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        with_deadline("write", self.timeout, self.stream.write_all(bytes)).await?;
        debug!(size = bytes.len(), "wrote to broker");
        Ok(())
    }

    async fn read_exact(&mut self, len: usize) -> Result<Bytes> {
        let mut buf = vec![0u8; len];
        with_deadline("read", self.timeout, self.stream.read_exact(&mut buf)).await?;
        Ok(Bytes::from(buf))
    }
}
