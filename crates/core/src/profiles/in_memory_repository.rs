//! In-memory profile repository for tests and local wiring.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use super::profiles_model::{Profile, ProfileChanges};
use super::profiles_traits::ProfileRepositoryTrait;
use crate::errors::Result;

/// Map-backed repository with the same upsert semantics as the SQL store.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<String, Profile>>,
    upserts: Mutex<usize>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `upsert` calls received, successful or not.
    pub fn upsert_count(&self) -> usize {
        *lock(&self.upserts)
    }

    pub fn len(&self) -> usize {
        lock(&self.profiles).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.profiles).is_empty()
    }
}

#[async_trait]
impl ProfileRepositoryTrait for InMemoryProfileRepository {
    fn get(&self, user_id: &str) -> Result<Option<Profile>> {
        Ok(lock(&self.profiles).get(user_id).cloned())
    }

    async fn upsert(&self, changes: ProfileChanges, user_id: String) -> Result<Profile> {
        *lock(&self.upserts) += 1;
        let now = Utc::now().naive_utc();
        let mut profiles = lock(&self.profiles);

        if let Some(existing) = profiles.get_mut(&user_id) {
            existing.apply_changes(changes, now);
            return Ok(existing.clone());
        }

        let new_profile = changes.into_new_profile(user_id)?;
        let profile = Profile {
            user_id: new_profile.user_id,
            full_name: new_profile.full_name,
            email: new_profile.email,
            avatar_url: new_profile.avatar_url,
            bio: new_profile.bio,
            created_at: now,
            updated_at: now,
        };
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::{NewProfile, ProfileUpdate};
    use std::time::Duration;

    fn ann() -> ProfileChanges {
        NewProfile {
            user_id: "u1".to_string(),
            full_name: "Ann".to_string(),
            email: "a@x.com".to_string(),
            avatar_url: None,
            bio: None,
        }
        .into()
    }

    #[tokio::test]
    async fn test_update_restamps_updated_at_but_not_created_at() {
        let repository = InMemoryProfileRepository::new();
        let created = repository.upsert(ann(), "u1".to_string()).await.unwrap();
        assert_eq!(created.created_at, created.updated_at);

        std::thread::sleep(Duration::from_millis(5));
        let changes = ProfileChanges::from(ProfileUpdate {
            bio: Some(Some("hello".to_string())),
            ..Default::default()
        });
        let updated = repository.upsert(changes, "u1".to_string()).await.unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert!(
            updated.updated_at > created.updated_at,
            "updated_at was not re-stamped"
        );
        assert_eq!(repository.get("u1").unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_failed_create_stores_nothing_but_counts_the_call() {
        let repository = InMemoryProfileRepository::new();
        let changes = ProfileChanges {
            full_name: Some("Bo".to_string()),
            ..Default::default()
        };

        assert!(repository.upsert(changes, "u2".to_string()).await.is_err());
        assert_eq!(repository.upsert_count(), 1);
        assert!(repository.is_empty());
    }
}
