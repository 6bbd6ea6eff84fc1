use std::sync::Arc;

use profile_service_core::{
    events::EventPublisher,
    profiles::{ProfileRepositoryTrait, ProfileService, ProfileServiceTrait},
    registrations::RegistrationService,
};
use profile_service_messaging::EventBusProducer;
use profile_service_storage_sqlite::{db, profiles::ProfileRepository, DbPool};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub profile_service: Arc<dyn ProfileServiceTrait>,
    pub registration_service: Arc<RegistrationService>,
    /// Process-wide bus handle. Started by `build_state`, stopped at shutdown.
    pub producer: Arc<EventBusProducer>,
    pub pool: Arc<DbPool>,
}

pub fn init_tracing() {
    let log_format = std::env::var("PROFILE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Opens the database, starts the bus producer and wires the services.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let producer = Arc::new(EventBusProducer::new(config.bus.clone()));
    producer.start().await?;
    let publisher: Arc<dyn EventPublisher> = producer.clone();
    match build_state_with_publisher(config, producer.clone(), publisher).await {
        Ok(state) => Ok(state),
        Err(e) => {
            producer.stop().await;
            Err(e)
        }
    }
}

/// Same as [`build_state`], but events go to `publisher` instead of the
/// producer. The producer still backs the health report.
pub async fn build_state_with_publisher(
    config: &Config,
    producer: Arc<EventBusProducer>,
    publisher: Arc<dyn EventPublisher>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone())?;

    let profile_repository: Arc<dyn ProfileRepositoryTrait> =
        Arc::new(ProfileRepository::new(pool.clone(), writer));

    let profile_service: Arc<dyn ProfileServiceTrait> = Arc::new(ProfileService::new(
        profile_repository.clone(),
        publisher,
        config.bus.profile_events_topic.clone(),
    ));
    let registration_service = Arc::new(RegistrationService::new(profile_repository));

    Ok(Arc::new(AppState {
        profile_service,
        registration_service,
        producer,
        pool,
    }))
}
