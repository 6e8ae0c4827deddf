pub mod base_parser;
pub mod encoder;
pub mod request_codec;
pub mod response_codec;
pub mod traits;
pub mod varint;

pub use base_parser::FrameReader;
pub use encoder::PutCompact;
pub use request_codec::deserialize_request_payload;
pub use response_codec::deserialize_response_payload;
pub use traits::*;
pub use varint::PutVarint;
