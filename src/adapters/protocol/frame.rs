use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::domain::error::CodecError;
use crate::ports::outgoing::Transport;
use crate::Result;

use super::constants::FRAME_LENGTH_SIZE;
use super::parser::Serialize;

/// Serializes `message` behind a 4-byte big-endian length that excludes itself.
///
/// The buffer grows with the message; the prefix is patched in once the size is known.
pub fn encode_frame<T: Serialize>(message: &T) -> std::result::Result<Bytes, CodecError> {
    let mut buf = BytesMut::with_capacity(128);
    buf.put_i32(0); // size placeholder
    message.serialize(&mut buf)?;

    let size = buf.len() - FRAME_LENGTH_SIZE;
    let size = i32::try_from(size).map_err(|_| {
        CodecError::invalid_argument("frame.length", format!("frame of {} bytes is too large", size))
    })?;
    buf[..FRAME_LENGTH_SIZE].copy_from_slice(&size.to_be_bytes());

    Ok(buf.freeze())
}

/// Validates the length prefix of an inbound frame.
pub fn decode_frame_length(
    prefix: [u8; FRAME_LENGTH_SIZE],
    max_frame_bytes: usize,
) -> std::result::Result<usize, CodecError> {
    let length = i32::from_be_bytes(prefix);
    if length < 0 || length as usize > max_frame_bytes {
        return Err(CodecError::InvalidFrameLength {
            length: length as i64,
            max: max_frame_bytes,
        });
    }
    Ok(length as usize)
}

/// Reads one frame: the 4-byte length first, then exactly that many bytes.
/// Returns the payload without the length prefix.
pub async fn read_frame<T>(transport: &mut T, max_frame_bytes: usize) -> Result<Bytes>
where
    T: Transport + ?Sized,
{
    let prefix = transport.read_exact(FRAME_LENGTH_SIZE).await?;
    let mut size_bytes = [0u8; FRAME_LENGTH_SIZE];
    size_bytes.copy_from_slice(&prefix);

    let size = decode_frame_length(size_bytes, max_frame_bytes)?;
    trace!(size, "reading frame payload");

    transport.read_exact(size).await
}
