use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use uuid::Uuid;

use create_topics_client::adapters::outgoing::{MemoryTransport, TcpTransport};
use create_topics_client::adapters::protocol::dto::{
    CreatableTopic, CreatableTopicResult, CreateTopicsRequest, CreateTopicsResponse, ErrorCode,
    KafkaResponse, RequestPayload, ResponsePayload,
};
use create_topics_client::adapters::protocol::KafkaProtocolCodec;
use create_topics_client::application::AdminClient;
use create_topics_client::config::ClientConfig;
use create_topics_client::domain::TopicId;
use create_topics_client::ports::incoming::TopicAdmin;
use create_topics_client::{ApplicationError, Result};

/// Accepts one connection and answers each CreateTopics frame: new names are
/// created, names already seen get TOPIC_ALREADY_EXISTS.
async fn spawn_broker(requests: usize) -> (String, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let handle = tokio::spawn(async move {
        let codec = KafkaProtocolCodec::new();
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut known: Vec<String> = Vec::new();

        for _ in 0..requests {
            let mut size = [0u8; 4];
            stream.read_exact(&mut size).await.unwrap();
            let mut payload = vec![0u8; i32::from_be_bytes(size) as usize];
            stream.read_exact(&mut payload).await.unwrap();

            let request = codec.decode_request(&payload).unwrap();
            let RequestPayload::CreateTopics(body) = request.payload;

            let topics = body
                .topics
                .iter()
                .map(|topic| {
                    if known.contains(&topic.name) {
                        CreatableTopicResult::failed(
                            topic.name.clone(),
                            ErrorCode::TopicAlreadyExists,
                            Some(format!("Topic '{}' already exists.", topic.name)),
                        )
                    } else {
                        known.push(topic.name.clone());
                        CreatableTopicResult::created(
                            topic.name.clone(),
                            TopicId::new(Uuid::new_v4()),
                            topic.num_partitions,
                            topic.replication_factor,
                        )
                    }
                })
                .collect();

            let response = KafkaResponse::new(
                request.header.correlation_id,
                ResponsePayload::CreateTopics(CreateTopicsResponse::new(0, topics)),
            );
            let frame = codec.encode_response(&response).unwrap();
            stream.write_all(&frame).await.unwrap();
        }
    });

    (addr, handle)
}

fn orders() -> CreateTopicsRequest {
    CreateTopicsRequest::new(vec![CreatableTopic::new("orders", 3, 1)], 5000, false)
}

#[tokio::test]
async fn test_create_topics_over_loopback() -> Result<()> {
    let (addr, broker) = spawn_broker(2).await;
    let config = ClientConfig {
        bootstrap_server: addr.clone(),
        ..ClientConfig::default()
    };

    let transport = TcpTransport::connect(&addr, Duration::from_secs(5)).await?;
    let mut client = AdminClient::from_config(transport, &config);

    let created = client.create_topics(orders()).await?;
    let topic = created.topic("orders").expect("orders result");
    assert!(topic.is_success());
    assert!(!topic.topic_id.is_zero());
    assert_eq!(topic.num_partitions, 3);
    assert_eq!(topic.replication_factor, 1);

    let again = client.create_topics(orders()).await?;
    let topic = again.topic("orders").expect("orders result");
    assert_eq!(topic.error(), ErrorCode::TopicAlreadyExists);
    assert_eq!(topic.error_message.as_deref(), Some("Topic 'orders' already exists."));
    assert!(topic.topic_id.is_zero());
    assert_eq!(topic.num_partitions, -1);

    broker.await.unwrap();
    Ok(())
}

#[tokio::test]
async fn test_broker_closes_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let broker = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut size = [0u8; 4];
        stream.read_exact(&mut size).await.unwrap();
        // hang up without answering
    });

    let transport = TcpTransport::connect(&addr, Duration::from_secs(5)).await.unwrap();
    let mut client = AdminClient::new(transport, "client-id", 1024);

    let err = client.create_topics(orders()).await.unwrap_err();
    assert!(matches!(err, ApplicationError::Io(_)));
    broker.await.unwrap();
}

#[tokio::test]
async fn test_scripted_response_with_configs_and_tags() {
    // throttle 25ms; one topic with one config and an unknown tagged field at the top level
    let mut body = Vec::new();
    body.extend_from_slice(&1i32.to_be_bytes()); // correlation id
    body.push(0); // header tagged fields
    body.extend_from_slice(&25i32.to_be_bytes());
    body.push(2); // one topic
    body.push(7);
    body.extend_from_slice(b"orders");
    body.extend_from_slice(&0x0123_4567_89ab_cdefu64.to_be_bytes());
    body.extend_from_slice(&0xfedc_ba98_7654_3210u64.to_be_bytes());
    body.extend_from_slice(&0i16.to_be_bytes());
    body.push(0); // null error message
    body.extend_from_slice(&3i32.to_be_bytes());
    body.extend_from_slice(&1i16.to_be_bytes());
    body.push(2); // one config
    body.push(15);
    body.extend_from_slice(b"cleanup.policy");
    body.push(7);
    body.extend_from_slice(b"delete");
    body.push(0); // read_only
    body.push(5); // DEFAULT_CONFIG
    body.push(0); // is_sensitive
    body.push(0); // config tagged fields
    body.push(0); // topic tagged fields
    body.extend_from_slice(&[1, 3, 2, 0xbe, 0xef]); // tag 3, two bytes

    let mut inbound = (body.len() as i32).to_be_bytes().to_vec();
    inbound.extend_from_slice(&body);

    let mut client = AdminClient::new(MemoryTransport::with_inbound(&inbound), "client-id", 1024);
    let response = client.create_topics(orders()).await.unwrap();

    assert_eq!(response.throttle_time_ms, 25);
    assert_eq!(response.tagged_fields.get(3).map(|b| b.to_vec()), Some(vec![0xbe, 0xef]));

    let topic = &response.topics[0];
    assert_eq!(topic.topic_id.to_string(), "01234567-89ab-cdef-fedc-ba9876543210");
    assert_eq!(topic.error_message, None);

    let config = &topic.configs[0];
    assert_eq!(config.name, "cleanup.policy");
    assert_eq!(config.value.as_deref(), Some("delete"));
    assert_eq!(config.config_source, 5);
    assert!(!config.read_only && !config.is_sensitive);

    assert_eq!(client.transport().inbound_remaining(), 0);
}
