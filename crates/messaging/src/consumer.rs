//! Kafka-backed subscription to the upstream registration stream.

use async_trait::async_trait;
use log::info;
use profile_service_core::errors::Result;
use profile_service_core::events::MessageSubscription;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::Message;

use crate::config::BusConfig;
use crate::errors::{connection_error, receive_error};

/// Consumer-group subscription to one topic.
///
/// Offsets are auto-committed, so a message counts as handled once it has been
/// received, whatever the handler did with it.
pub struct KafkaSubscription {
    consumer: Option<StreamConsumer>,
    topic: String,
}

impl KafkaSubscription {
    /// Subscribes to the registration topic. Returns `None` when the bus is
    /// disabled.
    pub fn connect(config: &BusConfig) -> Result<Option<Self>> {
        let topic = config.users_registered_topic.clone();
        if !config.enabled {
            info!("Kafka consumer disabled: topic={}", topic);
            return Ok(None);
        }

        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.bootstrap_servers)
            .set("group.id", &config.consumer_group)
            .set("enable.auto.commit", "true")
            .set("auto.offset.reset", "earliest")
            .create()
            .map_err(connection_error)?;
        consumer
            .subscribe(&[topic.as_str()])
            .map_err(connection_error)?;

        info!(
            "Kafka consumer started: topic={}, group={}",
            topic, config.consumer_group
        );
        Ok(Some(Self {
            consumer: Some(consumer),
            topic,
        }))
    }
}

#[async_trait]
impl MessageSubscription for KafkaSubscription {
    async fn recv(&mut self) -> Option<Result<Vec<u8>>> {
        let consumer = self.consumer.as_ref()?;
        let received = consumer
            .recv()
            .await
            .map(|message| message.payload().map(<[u8]>::to_vec).unwrap_or_default())
            .map_err(receive_error);
        Some(received)
    }

    async fn close(&mut self) {
        if let Some(consumer) = self.consumer.take() {
            consumer.unsubscribe();
            info!("Kafka consumer stopped: {}", self.topic);
        }
    }
}
