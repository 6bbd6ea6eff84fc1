use std::sync::Arc;

use log::{info, warn};

use super::registrations_model::SubjectRegistered;
use crate::errors::Result;
use crate::profiles::{Profile, ProfileRepositoryTrait};

/// Turns one inbound registration message into one repository upsert.
///
/// No payload validation happens here: an empty `user_id` is logged and still
/// forwarded to the repository.
pub struct RegistrationService {
    repository: Arc<dyn ProfileRepositoryTrait>,
}

impl RegistrationService {
    pub fn new(repository: Arc<dyn ProfileRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Decodes a raw JSON payload and materializes the profile.
    pub async fn handle_message(&self, payload: &[u8]) -> Result<Profile> {
        let event: SubjectRegistered = serde_json::from_slice(payload)?;
        self.handle_registered(event).await
    }

    pub async fn handle_registered(&self, event: SubjectRegistered) -> Result<Profile> {
        info!(
            "Received SubjectRegistered for user '{}' ({})",
            event.user_id, event.email
        );
        if event.user_id.is_empty() {
            warn!("SubjectRegistered carries an empty user_id; forwarding it unchanged");
        }

        let user_id = event.user_id.clone();
        let profile = self.repository.upsert(event.into(), user_id).await?;
        info!("Profile materialized for user '{}'", profile.user_id);
        Ok(profile)
    }
}
