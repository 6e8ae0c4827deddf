/// Api key of CreateTopics.
pub const CREATE_TOPICS_KEY: i16 = 19;

/// Only the flexible version 7 of CreateTopics is supported.
pub const CREATE_TOPICS_VERSION: i16 = 7;

/// Size of the big-endian length prefix in front of every frame.
pub const FRAME_LENGTH_SIZE: usize = 4;

/// Default upper bound for an inbound frame (100 MiB, the broker default).
pub const DEFAULT_MAX_FRAME_BYTES: usize = 100 * 1024 * 1024;

/// Sentinel used by CreateTopics for "use the broker default".
pub const DEFAULT_PARTITIONS: i32 = -1;
pub const DEFAULT_REPLICATION_FACTOR: i16 = -1;
