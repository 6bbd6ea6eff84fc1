//! Background consumer that materializes profiles from registration events.

use std::sync::Arc;
use std::time::Duration;

use profile_service_core::events::MessageSubscription;
use profile_service_core::registrations::RegistrationService;
use profile_service_messaging::{BusConfig, KafkaSubscription};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Owns the running consumer task.
pub struct ConsumerHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ConsumerHandle {
    pub fn spawn<S>(subscription: S, service: Arc<RegistrationService>) -> Self
    where
        S: MessageSubscription + 'static,
    {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_registration_consumer(
            subscription,
            service,
            cancel.clone(),
        ));
        Self { cancel, task }
    }

    /// Cancels the loop and waits for it to release its subscription.
    pub async fn stop(self) {
        self.cancel.cancel();
        match tokio::time::timeout(JOIN_TIMEOUT, self.task).await {
            Ok(Ok(())) => tracing::info!("Registration consumer stopped"),
            Ok(Err(e)) => tracing::error!("Registration consumer task failed: {}", e),
            Err(_) => tracing::warn!("Registration consumer did not stop within timeout"),
        }
    }
}

/// Subscribes to the registration topic and spawns the consumer loop.
///
/// Returns `None` when the bus is disabled; no task is started then.
pub fn start_consumers(
    bus: &BusConfig,
    service: Arc<RegistrationService>,
) -> anyhow::Result<Option<ConsumerHandle>> {
    let Some(subscription) = KafkaSubscription::connect(bus)? else {
        return Ok(None);
    };
    Ok(Some(ConsumerHandle::spawn(subscription, service)))
}

/// Handles messages one at a time until cancelled or the stream ends.
///
/// Failures on a single message are logged and the message is dropped; only
/// cancellation stops the loop.
pub async fn run_registration_consumer<S>(
    mut subscription: S,
    service: Arc<RegistrationService>,
    cancel: CancellationToken,
) where
    S: MessageSubscription,
{
    tracing::info!("Registration consumer started");

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            next = subscription.recv() => match next {
                None => {
                    tracing::info!("Registration stream ended");
                    break;
                }
                Some(Err(e)) => tracing::warn!("Dropping unreadable registration message: {}", e),
                Some(Ok(payload)) => {
                    if let Err(e) = service.handle_message(&payload).await {
                        tracing::error!("Failed to process registration message: {}", e);
                    }
                }
            },
        }
    }

    subscription.close().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use profile_service_core::errors::{BusError, DatabaseError, Error, Result};
    use profile_service_core::events::ChannelSubscription;
    use profile_service_core::profiles::{
        InMemoryProfileRepository, Profile, ProfileChanges, ProfileRepositoryTrait,
    };

    /// Fails every upsert for one user id, delegates the rest.
    struct FailingRepository {
        inner: InMemoryProfileRepository,
        failing_user_id: &'static str,
    }

    #[async_trait]
    impl ProfileRepositoryTrait for FailingRepository {
        fn get(&self, user_id: &str) -> Result<Option<Profile>> {
            self.inner.get(user_id)
        }

        async fn upsert(&self, changes: ProfileChanges, user_id: String) -> Result<Profile> {
            if user_id == self.failing_user_id {
                return Err(Error::Database(DatabaseError::QueryFailed(
                    "database is locked".to_string(),
                )));
            }
            self.inner.upsert(changes, user_id).await
        }
    }

    fn service() -> (Arc<RegistrationService>, Arc<InMemoryProfileRepository>) {
        let repository = Arc::new(InMemoryProfileRepository::new());
        (
            Arc::new(RegistrationService::new(repository.clone())),
            repository,
        )
    }

    #[tokio::test]
    async fn test_bad_messages_do_not_stop_the_loop() {
        let (service, repository) = service();
        let (tx, mut subscription) = ChannelSubscription::new();
        let mut closed = subscription.on_close();

        tx.send(Ok(b"not json".to_vec())).unwrap();
        tx.send(Err(Error::Bus(BusError::Receive("partition EOF".into()))))
            .unwrap();
        tx.send(Ok(br#"{"user_id": "u1", "email": "a@x.com"}"#.to_vec()))
            .unwrap();
        tx.send(Ok(
            br#"{"user_id": "u2", "full_name": "Bo", "email": "b@x.com"}"#.to_vec(),
        ))
        .unwrap();
        drop(tx);

        run_registration_consumer(subscription, service, CancellationToken::new()).await;

        assert_eq!(repository.get("u1").unwrap().unwrap().full_name, "");
        assert_eq!(repository.get("u2").unwrap().unwrap().full_name, "Bo");
        assert_eq!(closed.recv().await, Some(()));
    }

    #[tokio::test]
    async fn test_store_failure_does_not_stop_the_loop() {
        let repository = Arc::new(FailingRepository {
            inner: InMemoryProfileRepository::new(),
            failing_user_id: "broken",
        });
        let service = Arc::new(RegistrationService::new(repository.clone()));
        let (tx, mut subscription) = ChannelSubscription::new();
        let mut closed = subscription.on_close();

        tx.send(Ok(
            br#"{"user_id": "broken", "full_name": "X", "email": "x@x.com"}"#.to_vec(),
        ))
        .unwrap();
        tx.send(Ok(
            br#"{"user_id": "u3", "full_name": "Cy", "email": "c@x.com"}"#.to_vec(),
        ))
        .unwrap();
        drop(tx);

        run_registration_consumer(subscription, service, CancellationToken::new()).await;

        assert!(repository.get("broken").unwrap().is_none());
        assert_eq!(repository.get("u3").unwrap().unwrap().full_name, "Cy");
        assert_eq!(repository.inner.upsert_count(), 1);
        assert_eq!(closed.recv().await, Some(()));
    }

    #[tokio::test]
    async fn test_stop_releases_subscription() {
        let (service, repository) = service();
        let (tx, mut subscription) = ChannelSubscription::new();
        let mut closed = subscription.on_close();

        let handle = ConsumerHandle::spawn(subscription, service);
        handle.stop().await;

        assert_eq!(closed.recv().await, Some(()));
        // Nothing is read after cancellation.
        assert!(tx
            .send(Ok(br#"{"user_id": "late", "full_name": "L", "email": "l@x.com"}"#.to_vec()))
            .is_err());
        assert!(repository.is_empty());
    }

    #[test]
    fn test_disabled_bus_starts_nothing() {
        let (service, _) = service();
        let handle = start_consumers(&BusConfig::default(), service).unwrap();
        assert!(handle.is_none());
    }
}
