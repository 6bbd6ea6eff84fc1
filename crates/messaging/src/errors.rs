//! Conversions from rdkafka errors to core bus errors.

use profile_service_core::errors::{BusError, Error};
use rdkafka::error::KafkaError;

pub(crate) fn connection_error(err: KafkaError) -> Error {
    Error::Bus(BusError::Connection(err.to_string()))
}

pub(crate) fn delivery_error(topic: &str, err: KafkaError) -> Error {
    Error::Bus(BusError::Delivery {
        topic: topic.to_string(),
        message: err.to_string(),
    })
}

pub(crate) fn receive_error(err: KafkaError) -> Error {
    Error::Bus(BusError::Receive(err.to_string()))
}
