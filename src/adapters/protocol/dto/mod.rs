mod common;
pub mod request;
pub mod response;

pub use common::*;
pub use request::*;
pub use response::*;
