//! Kafka event bus adapter for the profile service.
//!
//! Implements the publisher and subscription traits from
//! `profile-service-core` on top of `rdkafka`:
//! - [`EventBusProducer`] delivers profile events and owns the producer lifecycle
//! - [`KafkaSubscription`] reads the upstream registration stream
//!
//! Both honour [`BusConfig::enabled`]; with the bus disabled nothing ever
//! connects to a broker.

pub mod config;
pub mod consumer;
mod errors;
pub mod producer;

pub use config::BusConfig;
pub use consumer::KafkaSubscription;
pub use producer::{BusStatus, EventBusProducer};
