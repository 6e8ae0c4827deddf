pub mod codec;
pub mod constants;
pub mod dto;
pub mod frame;
pub mod parser;

pub use codec::KafkaProtocolCodec;
