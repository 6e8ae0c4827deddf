use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, warn};

use crate::adapters::protocol::constants::DEFAULT_MAX_FRAME_BYTES;
use crate::adapters::protocol::dto::{CreatableTopic, CreateTopicsRequest};
use crate::application::ApplicationError;
use crate::Result;

/// What the driver asks the broker to create.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicRequestConfig {
    pub name: String,
    pub num_partitions: i32,
    pub replication_factor: i16,
    pub timeout_ms: i32,   // broker-side wait for topic creation
    pub validate_only: bool,
}

impl Default for TopicRequestConfig {
    fn default() -> Self {
        Self {
            name: "orders".to_string(),
            num_partitions: 3,
            replication_factor: 1,
            timeout_ms: 5000,
            validate_only: false,
        }
    }
}

impl TopicRequestConfig {
    pub fn to_request(&self) -> CreateTopicsRequest {
        CreateTopicsRequest::new(
            vec![CreatableTopic::new(
                self.name.clone(),
                self.num_partitions,
                self.replication_factor,
            )],
            self.timeout_ms,
            self.validate_only,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub bootstrap_server: String,
    pub client_id: String,
    pub request_timeout: Duration, // applied to connect, read and write separately
    pub max_response_bytes: usize,
    pub topic: TopicRequestConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            bootstrap_server: "127.0.0.1:9092".to_string(),
            client_id: "client-id".to_string(),
            request_timeout: Duration::from_millis(30_000),
            max_response_bytes: DEFAULT_MAX_FRAME_BYTES,
            topic: TopicRequestConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_properties_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_properties_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ApplicationError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "loading client properties");
        Self::from_properties_str(&contents)
    }

    /// Parses `key=value` lines; `#` and `!` start comments.
    pub fn from_properties_str(contents: &str) -> Result<Self> {
        let mut config = Self::default();

        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| {
                ApplicationError::Config(format!("line {}: expected key=value", line_no + 1))
            })?;
            config.apply(key.trim(), value.trim())?;
        }

        Ok(config)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "bootstrap.server" => self.bootstrap_server = value.to_string(),
            "client.id" => self.client_id = value.to_string(),
            "request.timeout.ms" => {
                self.request_timeout = Duration::from_millis(parse_value(key, value)?)
            }
            "max.response.bytes" => self.max_response_bytes = parse_value(key, value)?,
            "topic.name" => self.topic.name = value.to_string(),
            "topic.partitions" => self.topic.num_partitions = parse_value(key, value)?,
            "topic.replication.factor" => self.topic.replication_factor = parse_value(key, value)?,
            "topic.create.timeout.ms" => self.topic.timeout_ms = parse_value(key, value)?,
            "topic.validate.only" => self.topic.validate_only = parse_value(key, value)?,
            _ => warn!(key, "ignoring unknown client property"),
        }
        Ok(())
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| ApplicationError::Config(format!("invalid value {:?} for {}: {}", value, key, e)))
}
