use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::adapters::protocol::dto::{
    CreateTopicsRequest, CreateTopicsResponse, KafkaRequest, KafkaResponse, ResponsePayload,
};
use crate::adapters::protocol::frame::read_frame;
use crate::adapters::protocol::KafkaProtocolCodec;
use crate::application::error::ApplicationError;
use crate::config::ClientConfig;
use crate::ports::incoming::TopicAdmin;
use crate::ports::outgoing::Transport;
use crate::Result;

/// Admin client over a single broker connection.
///
/// Requests are half-duplex: one frame out, one frame back, matched by correlation id.
pub struct AdminClient<T: Transport> {
    transport: T,
    codec: KafkaProtocolCodec,
    client_id: String,
    next_correlation_id: i32,
}

impl<T: Transport> AdminClient<T> {
    pub fn new(transport: T, client_id: impl Into<String>, max_response_bytes: usize) -> Self {
        Self {
            transport,
            codec: KafkaProtocolCodec::with_max_frame_bytes(max_response_bytes),
            client_id: client_id.into(),
            next_correlation_id: 1,
        }
    }

    pub fn from_config(transport: T, config: &ClientConfig) -> Self {
        Self::new(transport, config.client_id.clone(), config.max_response_bytes)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    fn allocate_correlation_id(&mut self) -> i32 {
        let id = self.next_correlation_id;
        self.next_correlation_id = self.next_correlation_id.wrapping_add(1);
        id
    }

    /// Writes `request` and waits for the matching response.
    pub async fn send(&mut self, request: KafkaRequest) -> Result<KafkaResponse> {
        let expected = request.header.correlation_id;
        let api_key = request.header.api_key;
        let api_version = request.header.api_version;

        let frame = self.codec.encode_request(&request)?;
        self.transport.write_all(&frame).await?;
        debug!(correlation_id = expected, size = frame.len(), "request sent");

        let payload = read_frame(&mut self.transport, self.codec.max_frame_bytes()).await?;
        let response = self.codec.decode_response(api_key, api_version, &payload)?;

        let actual = response.correlation_id();
        if actual != expected {
            warn!(expected, actual, "response does not answer the request");
            return Err(ApplicationError::CorrelationMismatch { expected, actual });
        }

        Ok(response)
    }
}

#[async_trait]
impl<T: Transport> TopicAdmin for AdminClient<T> {
    async fn create_topics(&mut self, request: CreateTopicsRequest) -> Result<CreateTopicsResponse> {
        let correlation_id = self.allocate_correlation_id();
        info!(
            correlation_id,
            topics = request.topics.len(),
            validate_only = request.validate_only,
            "sending CreateTopics"
        );

        let request = KafkaRequest::create_topics(correlation_id, self.client_id.clone(), request);
        match self.send(request).await?.payload {
            ResponsePayload::CreateTopics(response) => Ok(response),
        }
    }
}
