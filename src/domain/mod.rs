pub mod error;
pub mod topic;

pub use error::CodecError;
pub use topic::TopicId;
