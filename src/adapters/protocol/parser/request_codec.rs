use bytes::BufMut;

use crate::adapters::protocol::constants::CREATE_TOPICS_KEY;
use crate::adapters::protocol::dto::{
    CreatableReplicaAssignment, CreatableTopic, CreatableTopicConfig, CreateTopicsRequest,
    KafkaRequest, RequestHeader, RequestPayload,
};
use crate::domain::error::CodecError;

use super::base_parser::FrameReader;
use super::encoder::{require_present, PutCompact};
use super::traits::*;

// Request Header (Version: 2) => request_api_key request_api_version correlation_id client_id _tagged_fields
//   client_id => NULLABLE_STRING (INT16 length, not compact)
impl Serialize for RequestHeader {
    fn serialize<B: BufMut>(&self, dst: &mut B) -> Result<(), CodecError> {
        if !self.is_supported_version() {
            return Err(CodecError::invalid_argument(
                "request_header.api_key",
                format!(
                    "api key {} version {} is not supported",
                    self.api_key, self.api_version
                ),
            ));
        }
        let client_id = require_present("request_header.client_id", self.client_id.as_deref())?;

        dst.put_i16(self.api_key);
        dst.put_i16(self.api_version);
        dst.put_i32(self.correlation_id);
        dst.put_string("request_header.client_id", client_id)?;
        dst.put_tagged_fields("request_header.tagged_fields", &self.tagged_fields)
    }
}

impl Deserialize for RequestHeader {
    fn deserialize(src: &mut FrameReader) -> Result<Self, CodecError> {
        let api_key = src.parse_i16("request_header.api_key")?;
        let api_version = src.parse_i16("request_header.api_version")?;
        let correlation_id = src.parse_i32("request_header.correlation_id")?;
        let client_id = src.parse_nullable_string("request_header.client_id")?;
        let tagged_fields = src.parse_tagged_fields("request_header.tagged_fields")?;

        Ok(RequestHeader {
            api_key,
            api_version,
            correlation_id,
            client_id,
            tagged_fields,
        })
    }
}

// CreateTopics Request (Version: 7) => [topics] timeout_ms validate_only _tagged_fields
//   topics => name num_partitions replication_factor [assignments] [configs] _tagged_fields
//     assignments => partition_index [broker_ids] _tagged_fields
//     configs => name value _tagged_fields
impl Serialize for CreatableReplicaAssignment {
    fn serialize<B: BufMut>(&self, dst: &mut B) -> Result<(), CodecError> {
        dst.put_i32(self.partition_index);
        dst.put_compact_array_len("create_topics_request.assignments.broker_ids", self.broker_ids.len())?;
        for broker_id in &self.broker_ids {
            dst.put_i32(*broker_id);
        }
        dst.put_tagged_fields("create_topics_request.assignments.tagged_fields", &self.tagged_fields)
    }
}

impl Deserialize for CreatableReplicaAssignment {
    fn deserialize(src: &mut FrameReader) -> Result<Self, CodecError> {
        let partition_index = src.parse_i32("create_topics_request.assignments.partition_index")?;
        let broker_ids = src.parse_compact_array("create_topics_request.assignments.broker_ids", |src| {
            src.parse_i32("create_topics_request.assignments.broker_ids")
        })?;
        let tagged_fields = src.parse_tagged_fields("create_topics_request.assignments.tagged_fields")?;

        Ok(CreatableReplicaAssignment {
            partition_index,
            broker_ids,
            tagged_fields,
        })
    }
}

impl Serialize for CreatableTopicConfig {
    fn serialize<B: BufMut>(&self, dst: &mut B) -> Result<(), CodecError> {
        dst.put_compact_string("create_topics_request.configs.name", &self.name)?;
        dst.put_compact_nullable_string("create_topics_request.configs.value", self.value.as_deref())?;
        dst.put_tagged_fields("create_topics_request.configs.tagged_fields", &self.tagged_fields)
    }
}

impl Deserialize for CreatableTopicConfig {
    fn deserialize(src: &mut FrameReader) -> Result<Self, CodecError> {
        let name = src.parse_compact_string("create_topics_request.configs.name")?;
        let value = src.parse_compact_nullable_string("create_topics_request.configs.value")?;
        let tagged_fields = src.parse_tagged_fields("create_topics_request.configs.tagged_fields")?;

        Ok(CreatableTopicConfig {
            name,
            value,
            tagged_fields,
        })
    }
}

impl Serialize for CreatableTopic {
    fn serialize<B: BufMut>(&self, dst: &mut B) -> Result<(), CodecError> {
        dst.put_compact_string("create_topics_request.topics.name", &self.name)?;
        dst.put_i32(self.num_partitions);
        dst.put_i16(self.replication_factor);
        dst.put_compact_array("create_topics_request.topics.assignments", &self.assignments)?;
        dst.put_compact_array("create_topics_request.topics.configs", &self.configs)?;
        dst.put_tagged_fields("create_topics_request.topics.tagged_fields", &self.tagged_fields)
    }
}

impl Deserialize for CreatableTopic {
    fn deserialize(src: &mut FrameReader) -> Result<Self, CodecError> {
        let name = src.parse_compact_string("create_topics_request.topics.name")?;
        let num_partitions = src.parse_i32("create_topics_request.topics.num_partitions")?;
        let replication_factor = src.parse_i16("create_topics_request.topics.replication_factor")?;
        let assignments = src.parse_compact_array(
            "create_topics_request.topics.assignments",
            CreatableReplicaAssignment::deserialize,
        )?;
        let configs = src.parse_compact_array(
            "create_topics_request.topics.configs",
            CreatableTopicConfig::deserialize,
        )?;
        let tagged_fields = src.parse_tagged_fields("create_topics_request.topics.tagged_fields")?;

        Ok(CreatableTopic {
            name,
            num_partitions,
            replication_factor,
            assignments,
            configs,
            tagged_fields,
        })
    }
}

impl Serialize for CreateTopicsRequest {
    fn serialize<B: BufMut>(&self, dst: &mut B) -> Result<(), CodecError> {
        dst.put_compact_array("create_topics_request.topics", &self.topics)?;
        dst.put_i32(self.timeout_ms);
        dst.put_bool(self.validate_only);
        dst.put_tagged_fields("create_topics_request.tagged_fields", &self.tagged_fields)
    }
}

impl Deserialize for CreateTopicsRequest {
    fn deserialize(src: &mut FrameReader) -> Result<Self, CodecError> {
        let topics = src.parse_compact_array("create_topics_request.topics", CreatableTopic::deserialize)?;
        let timeout_ms = src.parse_i32("create_topics_request.timeout_ms")?;
        let validate_only = src.parse_bool("create_topics_request.validate_only")?;
        let tagged_fields = src.parse_tagged_fields("create_topics_request.tagged_fields")?;

        Ok(CreateTopicsRequest {
            topics,
            timeout_ms,
            validate_only,
            tagged_fields,
        })
    }
}

impl Serialize for RequestPayload {
    fn serialize<B: BufMut>(&self, dst: &mut B) -> Result<(), CodecError> {
        match self {
            RequestPayload::CreateTopics(request) => request.serialize(dst),
        }
    }
}

impl Serialize for KafkaRequest {
    fn serialize<B: BufMut>(&self, dst: &mut B) -> Result<(), CodecError> {
        if self.header.api_key != self.payload.api_key() {
            return Err(CodecError::invalid_argument(
                "request_header.api_key",
                format!(
                    "header api key {} does not match payload api key {}",
                    self.header.api_key,
                    self.payload.api_key()
                ),
            ));
        }
        self.header.serialize(dst)?;
        self.payload.serialize(dst)
    }
}

/// Body decoder for a header that was already read. `None` for unknown APIs.
pub fn deserialize_request_payload(
    header: &RequestHeader,
    src: &mut FrameReader,
) -> Result<Option<RequestPayload>, CodecError> {
    if !header.is_supported_version() {
        return Ok(None);
    }
    match header.api_key {
        CREATE_TOPICS_KEY => Ok(Some(RequestPayload::CreateTopics(
            CreateTopicsRequest::deserialize(src)?,
        ))),
        _ => Ok(None),
    }
}
