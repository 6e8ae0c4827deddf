use crate::adapters::protocol::constants::{
    CREATE_TOPICS_KEY, CREATE_TOPICS_VERSION, DEFAULT_PARTITIONS, DEFAULT_REPLICATION_FACTOR,
};

use super::common::TaggedFields;

#[derive(Debug, Clone, PartialEq)]
pub struct RequestHeader {
    pub api_key: i16,
    pub api_version: i16,
    pub correlation_id: i32,
    pub client_id: Option<String>,
    pub tagged_fields: TaggedFields,
}

impl RequestHeader {
    pub fn new(
        api_key: i16,
        api_version: i16,
        correlation_id: i32,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key,
            api_version,
            correlation_id,
            client_id: Some(client_id.into()),
            tagged_fields: TaggedFields::new(),
        }
    }

    pub fn create_topics(correlation_id: i32, client_id: impl Into<String>) -> Self {
        Self::new(CREATE_TOPICS_KEY, CREATE_TOPICS_VERSION, correlation_id, client_id)
    }

    pub fn is_supported_version(&self) -> bool {
        match self.api_key {
            CREATE_TOPICS_KEY => self.api_version == CREATE_TOPICS_VERSION,
            _ => false,
        }
    }
}

/// Manual partition placement: replicas for one partition, leader first.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatableReplicaAssignment {
    pub partition_index: i32,
    pub broker_ids: Vec<i32>,
    pub tagged_fields: TaggedFields,
}

impl CreatableReplicaAssignment {
    pub fn new(partition_index: i32, broker_ids: Vec<i32>) -> Self {
        Self {
            partition_index,
            broker_ids,
            tagged_fields: TaggedFields::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatableTopicConfig {
    pub name: String,
    pub value: Option<String>,
    pub tagged_fields: TaggedFields,
}

impl CreatableTopicConfig {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
            tagged_fields: TaggedFields::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatableTopic {
    pub name: String,
    pub num_partitions: i32,
    pub replication_factor: i16,
    pub assignments: Vec<CreatableReplicaAssignment>,
    pub configs: Vec<CreatableTopicConfig>,
    pub tagged_fields: TaggedFields,
}

impl CreatableTopic {
    pub fn new(name: impl Into<String>, num_partitions: i32, replication_factor: i16) -> Self {
        Self {
            name: name.into(),
            num_partitions,
            replication_factor,
            assignments: vec![],
            configs: vec![],
            tagged_fields: TaggedFields::new(),
        }
    }

    /// Leaves partition count and replication factor to the broker.
    pub fn with_broker_defaults(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_PARTITIONS, DEFAULT_REPLICATION_FACTOR)
    }

    pub fn with_config(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.configs
            .push(CreatableTopicConfig::new(name, Some(value.into())));
        self
    }

    pub fn with_assignment(mut self, partition_index: i32, broker_ids: Vec<i32>) -> Self {
        self.assignments
            .push(CreatableReplicaAssignment::new(partition_index, broker_ids));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTopicsRequest {
    pub topics: Vec<CreatableTopic>,
    pub timeout_ms: i32,
    pub validate_only: bool,
    pub tagged_fields: TaggedFields,
}

impl CreateTopicsRequest {
    pub fn new(topics: Vec<CreatableTopic>, timeout_ms: i32, validate_only: bool) -> Self {
        Self {
            topics,
            timeout_ms,
            validate_only,
            tagged_fields: TaggedFields::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestPayload {
    CreateTopics(CreateTopicsRequest),
}

impl RequestPayload {
    pub fn api_key(&self) -> i16 {
        match self {
            RequestPayload::CreateTopics(_) => CREATE_TOPICS_KEY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KafkaRequest {
    pub header: RequestHeader,
    pub payload: RequestPayload,
}

impl KafkaRequest {
    pub fn new(header: RequestHeader, payload: RequestPayload) -> Self {
        Self { header, payload }
    }

    pub fn create_topics(
        correlation_id: i32,
        client_id: impl Into<String>,
        request: CreateTopicsRequest,
    ) -> Self {
        Self::new(
            RequestHeader::create_topics(correlation_id, client_id),
            RequestPayload::CreateTopics(request),
        )
    }
}
