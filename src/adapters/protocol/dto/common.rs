use bytes::Bytes;

/// One entry of a tagged-field section, kept as opaque bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTaggedField {
    pub tag: u32,
    pub data: Bytes,
}

/// Trailing tagged-field section of a flexible record.
///
/// Decoders retain unknown entries without interpreting them. Encoders write
/// whatever the record carries, which is nothing unless a caller adds entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedFields {
    fields: Vec<RawTaggedField>,
}

impl TaggedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: Vec<RawTaggedField>) -> Self {
        Self { fields }
    }

    pub fn with_field(mut self, tag: u32, data: impl Into<Bytes>) -> Self {
        self.push(tag, data);
        self
    }

    pub fn push(&mut self, tag: u32, data: impl Into<Bytes>) {
        self.fields.push(RawTaggedField {
            tag,
            data: data.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawTaggedField> {
        self.fields.iter()
    }

    pub fn get(&self, tag: u32) -> Option<&Bytes> {
        self.fields.iter().find(|f| f.tag == tag).map(|f| &f.data)
    }
}

/// Error codes a CreateTopics result can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    None,
    RequestTimedOut,
    InvalidTopicException,
    TopicAlreadyExists,
    InvalidPartitions,
    InvalidReplicationFactor,
    InvalidReplicaAssignment,
    InvalidConfig,
    NotController,
    InvalidRequest,
    PolicyViolation,
    Unknown(i16),
}

impl ErrorCode {
    pub fn is_success(&self) -> bool {
        matches!(self, ErrorCode::None)
    }
}

impl From<ErrorCode> for i16 {
    fn from(error_code: ErrorCode) -> Self {
        match error_code {
            ErrorCode::None => 0,
            ErrorCode::RequestTimedOut => 7,
            ErrorCode::InvalidTopicException => 17,
            ErrorCode::TopicAlreadyExists => 36,
            ErrorCode::InvalidPartitions => 37,
            ErrorCode::InvalidReplicationFactor => 38,
            ErrorCode::InvalidReplicaAssignment => 39,
            ErrorCode::InvalidConfig => 40,
            ErrorCode::NotController => 41,
            ErrorCode::InvalidRequest => 42,
            ErrorCode::PolicyViolation => 44,
            ErrorCode::Unknown(code) => code,
        }
    }
}

impl From<i16> for ErrorCode {
    fn from(code: i16) -> Self {
        match code {
            0 => ErrorCode::None,
            7 => ErrorCode::RequestTimedOut,
            17 => ErrorCode::InvalidTopicException,
            36 => ErrorCode::TopicAlreadyExists,
            37 => ErrorCode::InvalidPartitions,
            38 => ErrorCode::InvalidReplicationFactor,
            39 => ErrorCode::InvalidReplicaAssignment,
            40 => ErrorCode::InvalidConfig,
            41 => ErrorCode::NotController,
            42 => ErrorCode::InvalidRequest,
            44 => ErrorCode::PolicyViolation,
            other => ErrorCode::Unknown(other),
        }
    }
}

/// Where a reported config value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    Unknown,
    DynamicTopicConfig,
    DynamicBrokerConfig,
    DynamicDefaultBrokerConfig,
    StaticBrokerConfig,
    DefaultConfig,
    DynamicBrokerLoggerConfig,
    Other(i8),
}

impl From<i8> for ConfigSource {
    fn from(source: i8) -> Self {
        match source {
            0 => ConfigSource::Unknown,
            1 => ConfigSource::DynamicTopicConfig,
            2 => ConfigSource::DynamicBrokerConfig,
            3 => ConfigSource::DynamicDefaultBrokerConfig,
            4 => ConfigSource::StaticBrokerConfig,
            5 => ConfigSource::DefaultConfig,
            6 => ConfigSource::DynamicBrokerLoggerConfig,
            other => ConfigSource::Other(other),
        }
    }
}

impl From<ConfigSource> for i8 {
    fn from(source: ConfigSource) -> Self {
        match source {
            ConfigSource::Unknown => 0,
            ConfigSource::DynamicTopicConfig => 1,
            ConfigSource::DynamicBrokerConfig => 2,
            ConfigSource::DynamicDefaultBrokerConfig => 3,
            ConfigSource::StaticBrokerConfig => 4,
            ConfigSource::DefaultConfig => 5,
            ConfigSource::DynamicBrokerLoggerConfig => 6,
            ConfigSource::Other(other) => other,
        }
    }
}
