pub mod admin_client;
pub mod error;

pub use admin_client::AdminClient;
pub use error::{ApplicationError, Result};
