use std::path::PathBuf;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use create_topics_client::adapters::outgoing::TcpTransport;
use create_topics_client::application::AdminClient;
use create_topics_client::config::ClientConfig;
use create_topics_client::ports::incoming::TopicAdmin;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("create_topics_client=info".parse()?),
        )
        .init();

    // optional first argument: path to client.properties
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ClientConfig::load(config_path.as_deref()).context("loading client config")?;

    let transport = TcpTransport::connect(&config.bootstrap_server, config.request_timeout)
        .await
        .with_context(|| format!("connecting to {}", config.bootstrap_server))?;
    let mut client = AdminClient::from_config(transport, &config);

    let response = client
        .create_topics(config.topic.to_request())
        .await
        .context("CreateTopics request failed")?;

    info!(
        throttle_time_ms = response.throttle_time_ms,
        topics = response.topics.len(),
        "CreateTopics response"
    );
    for topic in &response.topics {
        info!(
            name = %topic.name,
            topic_id = %topic.topic_id,
            error_code = topic.error_code,
            error_message = ?topic.error_message,
            num_partitions = topic.num_partitions,
            replication_factor = topic.replication_factor,
            configs = topic.configs.len(),
            "topic result"
        );
        for entry in &topic.configs {
            info!(
                topic = %topic.name,
                name = %entry.name,
                value = ?entry.value,
                read_only = entry.read_only,
                source = ?entry.source(),
                is_sensitive = entry.is_sensitive,
                "topic config"
            );
        }
        if !topic.is_success() {
            warn!(name = %topic.name, error = ?topic.error(), "topic was not created");
        }
    }

    Ok(())
}
