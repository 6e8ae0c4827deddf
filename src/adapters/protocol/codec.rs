use bytes::Bytes;
use tracing::{debug, trace};

use crate::adapters::protocol::constants::DEFAULT_MAX_FRAME_BYTES;
use crate::adapters::protocol::dto::{KafkaRequest, KafkaResponse, RequestHeader, ResponseHeader};
use crate::adapters::protocol::frame::encode_frame;
use crate::adapters::protocol::parser::{
    deserialize_request_payload, deserialize_response_payload, Deserialize, FrameReader,
};
use crate::application::error::ApplicationError;
use crate::Result;

/// Frame level entry points: whole requests and responses in, framed bytes out.
///
/// Decoders take the payload that follows the 4-byte length prefix, the way the
/// transport hands it over, and reject payloads with bytes left over.
#[derive(Debug, Clone)]
pub struct KafkaProtocolCodec {
    max_frame_bytes: usize,
}

impl Default for KafkaProtocolCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl KafkaProtocolCodec {
    pub fn new() -> Self {
        Self::with_max_frame_bytes(DEFAULT_MAX_FRAME_BYTES)
    }

    pub fn with_max_frame_bytes(max_frame_bytes: usize) -> Self {
        Self { max_frame_bytes }
    }

    pub fn max_frame_bytes(&self) -> usize {
        self.max_frame_bytes
    }

    pub fn encode_request(&self, request: &KafkaRequest) -> Result<Bytes> {
        let frame = encode_frame(request)?;
        debug!(
            api_key = request.header.api_key,
            api_version = request.header.api_version,
            correlation_id = request.header.correlation_id,
            size = frame.len(),
            "encoded request frame"
        );
        trace!(bytes = %hex::encode(&frame), "request frame");
        Ok(frame)
    }

    pub fn decode_request(&self, data: &[u8]) -> Result<KafkaRequest> {
        trace!(bytes = %hex::encode(data), "decoding request payload");
        let mut src = FrameReader::from_slice(data);

        let header = RequestHeader::deserialize(&mut src)?;
        debug!(
            api_key = header.api_key,
            api_version = header.api_version,
            correlation_id = header.correlation_id,
            client_id = ?header.client_id,
            "decoded request header"
        );

        let payload = deserialize_request_payload(&header, &mut src)?.ok_or(
            ApplicationError::UnsupportedApi {
                api_key: header.api_key,
                api_version: header.api_version,
            },
        )?;
        src.expect_end("request")?;

        Ok(KafkaRequest::new(header, payload))
    }

    pub fn encode_response(&self, response: &KafkaResponse) -> Result<Bytes> {
        let frame = encode_frame(response)?;
        debug!(
            correlation_id = response.header.correlation_id,
            size = frame.len(),
            "encoded response frame"
        );
        trace!(bytes = %hex::encode(&frame), "response frame");
        Ok(frame)
    }

    /// Decodes the reply to a request sent with `api_key`/`api_version`.
    pub fn decode_response(&self, api_key: i16, api_version: i16, data: &[u8]) -> Result<KafkaResponse> {
        trace!(bytes = %hex::encode(data), "decoding response payload");
        let mut src = FrameReader::from_slice(data);

        let header = ResponseHeader::deserialize(&mut src)?;
        debug!(correlation_id = header.correlation_id, "decoded response header");

        let payload = deserialize_response_payload(api_key, api_version, &mut src)?
            .ok_or(ApplicationError::UnsupportedApi { api_key, api_version })?;
        src.expect_end("response")?;

        Ok(KafkaResponse { header, payload })
    }
}
