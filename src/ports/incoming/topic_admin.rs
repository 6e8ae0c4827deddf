use async_trait::async_trait;

use crate::adapters::protocol::dto::{CreateTopicsRequest, CreateTopicsResponse};
use crate::Result;

#[async_trait]
pub trait TopicAdmin: Send {
    async fn create_topics(&mut self, request: CreateTopicsRequest) -> Result<CreateTopicsResponse>;
}
