use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error};

use super::profiles_model::{NewProfile, Profile, ProfileUpdate};
use super::profiles_traits::{ProfileRepositoryTrait, ProfileServiceTrait};
use crate::errors::Result;
use crate::events::{EventPublisher, ProfileEvent};

/// Service backing the request handlers.
///
/// Validates input, funnels both create and update through the repository
/// upsert, then publishes the matching event. Publishing happens after the
/// commit, so a delivery failure is reported to the caller with the data
/// already saved.
pub struct ProfileService {
    repository: Arc<dyn ProfileRepositoryTrait>,
    publisher: Arc<dyn EventPublisher>,
    events_topic: String,
}

impl ProfileService {
    pub fn new(
        repository: Arc<dyn ProfileRepositoryTrait>,
        publisher: Arc<dyn EventPublisher>,
        events_topic: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            publisher,
            events_topic: events_topic.into(),
        }
    }

    async fn publish(&self, event: ProfileEvent) -> Result<()> {
        self.publisher
            .send_event(&self.events_topic, &event)
            .await
            .map_err(|e| {
                error!(
                    "Profile {} was saved but {} was not delivered: {}",
                    event.user_id,
                    event.event_type.as_str(),
                    e
                );
                e
            })
    }
}

#[async_trait]
impl ProfileServiceTrait for ProfileService {
    fn get_profile(&self, user_id: &str) -> Result<Option<Profile>> {
        self.repository.get(user_id)
    }

    async fn create_profile(&self, new_profile: NewProfile) -> Result<Profile> {
        new_profile.validate()?;
        let user_id = new_profile.user_id.clone();
        let profile = self.repository.upsert(new_profile.into(), user_id).await?;
        debug!("Profile {} stored via create", profile.user_id);

        self.publish(ProfileEvent::created(&profile)).await?;
        Ok(profile)
    }

    async fn update_profile(&self, user_id: String, update: ProfileUpdate) -> Result<Profile> {
        update.validate()?;
        let profile = self.repository.upsert(update.into(), user_id).await?;
        debug!("Profile {} stored via update", profile.user_id);

        self.publish(ProfileEvent::updated(&profile)).await?;
        Ok(profile)
    }
}
