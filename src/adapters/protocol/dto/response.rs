use crate::adapters::protocol::constants::{
    CREATE_TOPICS_KEY, DEFAULT_PARTITIONS, DEFAULT_REPLICATION_FACTOR,
};
use crate::domain::TopicId;

use super::common::{ConfigSource, ErrorCode, TaggedFields};

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseHeader {
    pub correlation_id: i32,
    pub tagged_fields: TaggedFields,
}

impl ResponseHeader {
    pub fn new(correlation_id: i32) -> Self {
        Self {
            correlation_id,
            tagged_fields: TaggedFields::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatableTopicConfigResult {
    pub name: String,
    pub value: Option<String>,
    pub read_only: bool,
    pub config_source: i8,
    pub is_sensitive: bool,
    pub tagged_fields: TaggedFields,
}

impl CreatableTopicConfigResult {
    pub fn source(&self) -> ConfigSource {
        ConfigSource::from(self.config_source)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatableTopicResult {
    pub name: String,
    pub topic_id: TopicId,
    pub error_code: i16,
    pub error_message: Option<String>,
    pub num_partitions: i32,
    pub replication_factor: i16,
    pub configs: Vec<CreatableTopicConfigResult>,
    pub tagged_fields: TaggedFields,
}

impl CreatableTopicResult {
    pub fn created(
        name: impl Into<String>,
        topic_id: TopicId,
        num_partitions: i32,
        replication_factor: i16,
    ) -> Self {
        Self {
            name: name.into(),
            topic_id,
            error_code: ErrorCode::None.into(),
            error_message: None,
            num_partitions,
            replication_factor,
            configs: vec![],
            tagged_fields: TaggedFields::new(),
        }
    }

    pub fn failed(name: impl Into<String>, error: ErrorCode, message: Option<String>) -> Self {
        Self {
            name: name.into(),
            topic_id: TopicId::zero(),
            error_code: error.into(),
            error_message: message,
            num_partitions: DEFAULT_PARTITIONS,
            replication_factor: DEFAULT_REPLICATION_FACTOR,
            configs: vec![],
            tagged_fields: TaggedFields::new(),
        }
    }

    pub fn error(&self) -> ErrorCode {
        ErrorCode::from(self.error_code)
    }

    pub fn is_success(&self) -> bool {
        self.error().is_success()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTopicsResponse {
    pub throttle_time_ms: i32,
    pub topics: Vec<CreatableTopicResult>,
    pub tagged_fields: TaggedFields,
}

impl CreateTopicsResponse {
    pub fn new(throttle_time_ms: i32, topics: Vec<CreatableTopicResult>) -> Self {
        Self {
            throttle_time_ms,
            topics,
            tagged_fields: TaggedFields::new(),
        }
    }

    pub fn topic(&self, name: &str) -> Option<&CreatableTopicResult> {
        self.topics.iter().find(|t| t.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePayload {
    CreateTopics(CreateTopicsResponse),
}

impl ResponsePayload {
    pub fn api_key(&self) -> i16 {
        match self {
            ResponsePayload::CreateTopics(_) => CREATE_TOPICS_KEY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KafkaResponse {
    pub header: ResponseHeader,
    pub payload: ResponsePayload,
}

impl KafkaResponse {
    pub fn new(correlation_id: i32, payload: ResponsePayload) -> Self {
        Self {
            header: ResponseHeader::new(correlation_id),
            payload,
        }
    }

    pub fn correlation_id(&self) -> i32 {
        self.header.correlation_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_result_status() {
        let created = CreatableTopicResult::created("orders", TopicId::zero(), 3, 1);
        assert!(created.is_success());

        let failed = CreatableTopicResult::failed(
            "orders",
            ErrorCode::TopicAlreadyExists,
            Some("Topic 'orders' already exists.".to_string()),
        );
        assert_eq!(failed.error(), ErrorCode::TopicAlreadyExists);
        assert_eq!(failed.error_code, 36);
        assert!(!failed.is_success());
    }

    #[test]
    fn test_response_topic_lookup() {
        let response = CreateTopicsResponse::new(
            0,
            vec![CreatableTopicResult::created("orders", TopicId::zero(), 3, 1)],
        );
        assert!(response.topic("orders").is_some());
        assert!(response.topic("payments").is_none());
    }
}
