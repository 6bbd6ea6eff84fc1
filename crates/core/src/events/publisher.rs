//! Event publisher trait and in-process implementations.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::ProfileEvent;
use crate::errors::{BusError, Result};

/// Trait for delivering profile events to a bus topic.
///
/// Services call this after the store mutation has committed. An error means
/// the data was saved but the notification was lost; callers never roll back.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Serializes `event` and delivers it to `topic`.
    async fn send_event(&self, topic: &str, event: &ProfileEvent) -> Result<()>;
}

/// No-op implementation for tests or contexts that don't need events.
#[derive(Clone, Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn send_event(&self, _topic: &str, _event: &ProfileEvent) -> Result<()> {
        Ok(())
    }
}

/// Mock publisher for testing - collects sent events and can be told to fail.
#[derive(Clone, Default)]
pub struct MockEventPublisher {
    sent: Arc<Mutex<Vec<(String, ProfileEvent)>>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `send_event` fail with a delivery error.
    pub fn fail_deliveries(&self, message: impl Into<String>) {
        *lock(&self.fail_with) = Some(message.into());
    }

    /// Returns all delivered `(topic, event)` pairs.
    pub fn sent(&self) -> Vec<(String, ProfileEvent)> {
        lock(&self.sent).clone()
    }

    /// Returns all delivered events, without topics.
    pub fn events(&self) -> Vec<ProfileEvent> {
        lock(&self.sent).iter().map(|(_, e)| e.clone()).collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.sent).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.sent).is_empty()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn send_event(&self, topic: &str, event: &ProfileEvent) -> Result<()> {
        if let Some(message) = lock(&self.fail_with).clone() {
            return Err(BusError::Delivery {
                topic: topic.to_string(),
                message,
            }
            .into());
        }
        lock(&self.sent).push((topic.to_string(), event.clone()));
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::events::ProfileEventKind;
    use chrono::Utc;

    fn event(user_id: &str) -> ProfileEvent {
        ProfileEvent {
            event_type: ProfileEventKind::ProfileCreated,
            user_id: user_id.to_string(),
            full_name: "Ann".to_string(),
            email: "a@x.com".to_string(),
            timestamp: Utc::now().naive_utc(),
        }
    }

    #[tokio::test]
    async fn test_noop_publisher_accepts_everything() {
        let publisher = NoOpEventPublisher;
        assert!(publisher.send_event("profile.events", &event("u1")).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_publisher_collects_events() {
        let publisher = MockEventPublisher::new();
        assert!(publisher.is_empty());

        publisher.send_event("profile.events", &event("u1")).await.unwrap();
        publisher.send_event("profile.events", &event("u2")).await.unwrap();

        assert_eq!(publisher.len(), 2);
        let sent = publisher.sent();
        assert_eq!(sent[0].0, "profile.events");
        assert_eq!(sent[1].1.user_id, "u2");
    }

    #[tokio::test]
    async fn test_mock_publisher_failure_mode() {
        let publisher = MockEventPublisher::new();
        publisher.fail_deliveries("broker down");

        let err = publisher
            .send_event("profile.events", &event("u1"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Bus(BusError::Delivery { .. })));
        assert!(publisher.is_empty());
    }
}
