/// Bus settings, read once at startup by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusConfig {
    /// Master switch for all bus interaction.
    pub enabled: bool,
    pub bootstrap_servers: String,
    pub profile_events_topic: String,
    pub users_registered_topic: String,
    pub consumer_group: String,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bootstrap_servers: "localhost:9092".to_string(),
            profile_events_topic: "profile.events".to_string(),
            users_registered_topic: "users.registered".to_string(),
            consumer_group: "profile-service-users".to_string(),
        }
    }
}
