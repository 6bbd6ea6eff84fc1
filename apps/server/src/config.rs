use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use profile_service_messaging::BusConfig;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub bus: BusConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8001)),
            db_path: "./db/profiles.db".into(),
            cors_allow: vec!["*".into()],
            request_timeout: Duration::from_millis(30000),
            bus: BusConfig::default(),
        }
    }
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let listen_addr = match var("PROFILE_LISTEN_ADDR") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid PROFILE_LISTEN_ADDR: {}", raw))?,
            None => defaults.listen_addr,
        };
        let db_path = var("PROFILE_DATABASE_URL").unwrap_or(defaults.db_path);
        let cors_allow = var("PROFILE_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = var("PROFILE_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30000);

        let bus_defaults = defaults.bus;
        let bus = BusConfig {
            enabled: var("KAFKA_ENABLED")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(bus_defaults.enabled),
            bootstrap_servers: var("KAFKA_BOOTSTRAP_SERVERS")
                .unwrap_or(bus_defaults.bootstrap_servers),
            profile_events_topic: var("TOPIC_PROFILE_EVENTS")
                .unwrap_or(bus_defaults.profile_events_topic),
            users_registered_topic: var("TOPIC_USERS_REGISTERED")
                .unwrap_or(bus_defaults.users_registered_topic),
            consumer_group: var("KAFKA_CONSUMER_GROUP").unwrap_or(bus_defaults.consumer_group),
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            bus,
        })
    }
}
