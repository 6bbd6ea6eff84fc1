//! Serve-and-teardown sequence for the running process.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::{api::app_router, config::Config, consumers::ConsumerHandle, main_lib::AppState};

/// Binds the listener, starts the consumer and serves until `shutdown` resolves.
///
/// The listener is bound before any consumer subscribes. Every exit path,
/// successful or not, stops the consumer (when one was started) before the
/// producer is flushed.
pub async fn run<F, S>(
    config: &Config,
    state: Arc<AppState>,
    start_consumer: F,
    shutdown: S,
) -> anyhow::Result<()>
where
    F: FnOnce(&AppState) -> anyhow::Result<Option<ConsumerHandle>>,
    S: Future<Output = ()> + Send + 'static,
{
    let listener = match TcpListener::bind(config.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            state.producer.stop().await;
            return Err(e).with_context(|| format!("Failed to bind {}", config.listen_addr));
        }
    };

    let consumer = match start_consumer(&state) {
        Ok(consumer) => consumer,
        Err(e) => {
            state.producer.stop().await;
            return Err(e);
        }
    };

    tracing::info!("Listening on {}", config.listen_addr);
    let router = app_router(state.clone(), config);
    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await;

    if let Some(consumer) = consumer {
        consumer.stop().await;
    }
    state.producer.stop().await;
    tracing::info!("Profile service stopped");

    served.context("HTTP server failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_state;
    use profile_service_core::events::ChannelSubscription;
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tempfile::{tempdir, TempDir};

    async fn setup(listen_addr: SocketAddr) -> (Config, Arc<AppState>, TempDir) {
        let tmp = tempdir().unwrap();
        let config = Config {
            listen_addr,
            db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
            ..Config::default()
        };
        let state = build_state(&config).await.unwrap();
        (config, state, tmp)
    }

    #[tokio::test]
    async fn test_taken_port_fails_before_any_consumer_subscribes() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let (config, state, _tmp) = setup(taken.local_addr().unwrap()).await;
        let started = AtomicBool::new(false);

        let result = run(
            &config,
            state,
            |_| {
                started.store(true, Ordering::SeqCst);
                Ok(None)
            },
            async {},
        )
        .await;

        assert!(result.is_err());
        assert!(!started.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_consumer_start_failure_is_reported() {
        let (config, state, _tmp) = setup("127.0.0.1:0".parse().unwrap()).await;

        let result = run(
            &config,
            state,
            |_| Err(anyhow::anyhow!("broker unreachable")),
            async {},
        )
        .await;

        assert!(result.unwrap_err().to_string().contains("broker unreachable"));
    }

    #[tokio::test]
    async fn test_shutdown_releases_the_subscription() {
        let (config, state, _tmp) = setup("127.0.0.1:0".parse().unwrap()).await;
        let (_tx, mut subscription) = ChannelSubscription::new();
        let mut closed = subscription.on_close();

        run(
            &config,
            state,
            |state| {
                Ok(Some(ConsumerHandle::spawn(
                    subscription,
                    state.registration_service.clone(),
                )))
            },
            async {},
        )
        .await
        .unwrap();

        assert_eq!(closed.recv().await, Some(()));
    }
}
