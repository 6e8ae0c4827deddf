use bytes::BufMut;

use crate::adapters::protocol::constants::{CREATE_TOPICS_KEY, CREATE_TOPICS_VERSION};
use crate::adapters::protocol::dto::{
    CreatableTopicConfigResult, CreatableTopicResult, CreateTopicsResponse, KafkaResponse,
    ResponseHeader, ResponsePayload,
};
use crate::domain::error::CodecError;

use super::base_parser::FrameReader;
use super::encoder::PutCompact;
use super::traits::*;

// Response Header (Version: 1) => correlation_id _tagged_fields
impl Serialize for ResponseHeader {
    fn serialize<B: BufMut>(&self, dst: &mut B) -> Result<(), CodecError> {
        dst.put_i32(self.correlation_id);
        dst.put_tagged_fields("response_header.tagged_fields", &self.tagged_fields)
    }
}

impl Deserialize for ResponseHeader {
    fn deserialize(src: &mut FrameReader) -> Result<Self, CodecError> {
        let correlation_id = src.parse_i32("response_header.correlation_id")?;
        let tagged_fields = src.parse_tagged_fields("response_header.tagged_fields")?;

        Ok(ResponseHeader {
            correlation_id,
            tagged_fields,
        })
    }
}

// CreateTopics Response (Version: 7) => throttle_time_ms [topics] _tagged_fields
//   topics => name topic_id error_code error_message num_partitions replication_factor [configs] _tagged_fields
//     configs => name value read_only config_source is_sensitive _tagged_fields
impl Serialize for CreatableTopicConfigResult {
    fn serialize<B: BufMut>(&self, dst: &mut B) -> Result<(), CodecError> {
        dst.put_compact_string("create_topics_response.topics.configs.name", &self.name)?;
        dst.put_compact_nullable_string(
            "create_topics_response.topics.configs.value",
            self.value.as_deref(),
        )?;
        dst.put_bool(self.read_only);
        dst.put_i8(self.config_source);
        dst.put_bool(self.is_sensitive);
        dst.put_tagged_fields(
            "create_topics_response.topics.configs.tagged_fields",
            &self.tagged_fields,
        )
    }
}

impl Deserialize for CreatableTopicConfigResult {
    fn deserialize(src: &mut FrameReader) -> Result<Self, CodecError> {
        let name = src.parse_compact_string("create_topics_response.topics.configs.name")?;
        let value = src.parse_compact_nullable_string("create_topics_response.topics.configs.value")?;
        let read_only = src.parse_bool("create_topics_response.topics.configs.read_only")?;
        let config_source = src.parse_i8("create_topics_response.topics.configs.config_source")?;
        let is_sensitive = src.parse_bool("create_topics_response.topics.configs.is_sensitive")?;
        let tagged_fields =
            src.parse_tagged_fields("create_topics_response.topics.configs.tagged_fields")?;

        Ok(CreatableTopicConfigResult {
            name,
            value,
            read_only,
            config_source,
            is_sensitive,
            tagged_fields,
        })
    }
}

impl Serialize for CreatableTopicResult {
    fn serialize<B: BufMut>(&self, dst: &mut B) -> Result<(), CodecError> {
        dst.put_compact_string("create_topics_response.topics.name", &self.name)?;
        dst.put_uuid(&self.topic_id);
        dst.put_i16(self.error_code);
        dst.put_compact_nullable_string(
            "create_topics_response.topics.error_message",
            self.error_message.as_deref(),
        )?;
        dst.put_i32(self.num_partitions);
        dst.put_i16(self.replication_factor);
        dst.put_compact_array("create_topics_response.topics.configs", &self.configs)?;
        dst.put_tagged_fields("create_topics_response.topics.tagged_fields", &self.tagged_fields)
    }
}

impl Deserialize for CreatableTopicResult {
    fn deserialize(src: &mut FrameReader) -> Result<Self, CodecError> {
        let name = src.parse_compact_string("create_topics_response.topics.name")?;
        let topic_id = src.parse_uuid("create_topics_response.topics.topic_id")?;
        let error_code = src.parse_i16("create_topics_response.topics.error_code")?;
        let error_message =
            src.parse_compact_nullable_string("create_topics_response.topics.error_message")?;
        let num_partitions = src.parse_i32("create_topics_response.topics.num_partitions")?;
        let replication_factor = src.parse_i16("create_topics_response.topics.replication_factor")?;
        let configs = src.parse_compact_array(
            "create_topics_response.topics.configs",
            CreatableTopicConfigResult::deserialize,
        )?;
        let tagged_fields = src.parse_tagged_fields("create_topics_response.topics.tagged_fields")?;

        Ok(CreatableTopicResult {
            name,
            topic_id,
            error_code,
            error_message,
            num_partitions,
            replication_factor,
            configs,
            tagged_fields,
        })
    }
}

impl Serialize for CreateTopicsResponse {
    fn serialize<B: BufMut>(&self, dst: &mut B) -> Result<(), CodecError> {
        dst.put_i32(self.throttle_time_ms);
        dst.put_compact_array("create_topics_response.topics", &self.topics)?;
        dst.put_tagged_fields("create_topics_response.tagged_fields", &self.tagged_fields)
    }
}

impl Deserialize for CreateTopicsResponse {
    fn deserialize(src: &mut FrameReader) -> Result<Self, CodecError> {
        let throttle_time_ms = src.parse_i32("create_topics_response.throttle_time_ms")?;
        let topics = src.parse_compact_array(
            "create_topics_response.topics",
            CreatableTopicResult::deserialize,
        )?;
        let tagged_fields = src.parse_tagged_fields("create_topics_response.tagged_fields")?;

        Ok(CreateTopicsResponse {
            throttle_time_ms,
            topics,
            tagged_fields,
        })
    }
}

impl Serialize for ResponsePayload {
    fn serialize<B: BufMut>(&self, dst: &mut B) -> Result<(), CodecError> {
        match self {
            ResponsePayload::CreateTopics(response) => response.serialize(dst),
        }
    }
}

impl Serialize for KafkaResponse {
    fn serialize<B: BufMut>(&self, dst: &mut B) -> Result<(), CodecError> {
        self.header.serialize(dst)?;
        self.payload.serialize(dst)
    }
}

/// The response carries no api key, so the caller names the request it answers.
/// `None` for unknown APIs.
pub fn deserialize_response_payload(
    api_key: i16,
    api_version: i16,
    src: &mut FrameReader,
) -> Result<Option<ResponsePayload>, CodecError> {
    match (api_key, api_version) {
        (CREATE_TOPICS_KEY, CREATE_TOPICS_VERSION) => Ok(Some(ResponsePayload::CreateTopics(
            CreateTopicsResponse::deserialize(src)?,
        ))),
        _ => Ok(None),
    }
}
