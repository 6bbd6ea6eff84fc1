//! Kafka-backed event publisher with an explicit start/stop lifecycle.

use std::time::Duration;

use async_trait::async_trait;
use log::{error, info, warn};
use profile_service_core::errors::{BusError, Error, Result};
use profile_service_core::events::{EventPublisher, ProfileEvent};
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use tokio::sync::RwLock;

use crate::config::BusConfig;
use crate::errors::{connection_error, delivery_error};

/// How long a send may wait in the local queue before failing.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);
const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// Advisory producer state, reported by the health surface only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusStatus {
    Disabled,
    NotStarted,
    Connected,
}

impl BusStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusStatus::Disabled => "disabled",
            BusStatus::NotStarted => "not started",
            BusStatus::Connected => "connected",
        }
    }
}

/// Process-wide producer handle.
///
/// Constructed once, started once at startup, stopped once at shutdown and
/// shared by reference with every sender in between.
pub struct EventBusProducer {
    config: BusConfig,
    producer: RwLock<Option<FutureProducer>>,
}

impl EventBusProducer {
    pub fn new(config: BusConfig) -> Self {
        Self {
            config,
            producer: RwLock::new(None),
        }
    }

    /// Creates the underlying Kafka producer. A no-op when the bus is disabled.
    pub async fn start(&self) -> Result<()> {
        if !self.config.enabled {
            info!("Kafka producer disabled");
            return Ok(());
        }

        let mut slot = self.producer.write().await;
        if slot.is_some() {
            warn!("Kafka producer already started");
            return Ok(());
        }

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &self.config.bootstrap_servers)
            .set("message.timeout.ms", "5000")
            .create()
            .map_err(connection_error)?;
        *slot = Some(producer);

        info!("Kafka producer started: {}", self.config.bootstrap_servers);
        Ok(())
    }

    /// Flushes pending deliveries and drops the producer.
    pub async fn stop(&self) {
        let Some(producer) = self.producer.write().await.take() else {
            return;
        };

        match tokio::task::spawn_blocking(move || producer.flush(FLUSH_TIMEOUT)).await {
            Ok(Ok(())) => info!("Kafka producer stopped"),
            Ok(Err(e)) => warn!("Kafka producer stopped with undelivered events: {}", e),
            Err(e) => warn!("Kafka producer flush task failed: {}", e),
        }
    }

    pub async fn status(&self) -> BusStatus {
        if !self.config.enabled {
            BusStatus::Disabled
        } else if self.producer.read().await.is_some() {
            BusStatus::Connected
        } else {
            BusStatus::NotStarted
        }
    }
}

#[async_trait]
impl EventPublisher for EventBusProducer {
    async fn send_event(&self, topic: &str, event: &ProfileEvent) -> Result<()> {
        let kind = event.event_type.as_str();
        if !self.config.enabled {
            info!("Kafka disabled, event not sent: {}", kind);
            return Ok(());
        }

        let producer = self
            .producer
            .read()
            .await
            .clone()
            .ok_or(Error::Bus(BusError::NotStarted))?;

        let payload = serde_json::to_vec(event)?;
        let record = FutureRecord::to(topic)
            .key(event.user_id.as_str())
            .payload(&payload);

        producer
            .send(record, DELIVERY_TIMEOUT)
            .await
            .map_err(|(e, _message)| {
                error!("Failed to send event to {}: {}", topic, e);
                delivery_error(topic, e)
            })?;

        info!("Event sent to {}: {}", topic, kind);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use profile_service_core::events::ProfileEventKind;

    fn event() -> ProfileEvent {
        ProfileEvent {
            event_type: ProfileEventKind::ProfileCreated,
            user_id: "u1".to_string(),
            full_name: "Ann".to_string(),
            email: "a@x.com".to_string(),
            timestamp: Utc::now().naive_utc(),
        }
    }

    fn enabled_config() -> BusConfig {
        BusConfig {
            enabled: true,
            ..BusConfig::default()
        }
    }

    #[tokio::test]
    async fn test_disabled_producer_is_a_silent_noop() {
        let producer = EventBusProducer::new(BusConfig::default());

        producer.start().await.unwrap();
        assert_eq!(producer.status().await, BusStatus::Disabled);
        assert!(producer
            .send_event("profile.events", &event())
            .await
            .is_ok());
        producer.stop().await;
    }

    #[tokio::test]
    async fn test_enabled_but_not_started_is_a_lifecycle_error() {
        let producer = EventBusProducer::new(enabled_config());

        assert_eq!(producer.status().await, BusStatus::NotStarted);
        let err = producer
            .send_event("profile.events", &event())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Bus(BusError::NotStarted)));
    }

    #[tokio::test]
    async fn test_stop_without_start_is_harmless() {
        let producer = EventBusProducer::new(enabled_config());
        producer.stop().await;
        assert_eq!(producer.status().await, BusStatus::NotStarted);
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(BusStatus::Disabled.as_str(), "disabled");
        assert_eq!(BusStatus::NotStarted.as_str(), "not started");
        assert_eq!(BusStatus::Connected.as_str(), "connected");
    }
}
