use crate::errors::Result;
use crate::profiles::profiles_model::{NewProfile, Profile, ProfileChanges, ProfileUpdate};
use async_trait::async_trait;

/// Trait for profile repository operations.
///
/// The repository is the only component allowed to mutate stored profiles.
#[async_trait]
pub trait ProfileRepositoryTrait: Send + Sync {
    /// Looks up a profile by primary key. Absence is `Ok(None)`, never an error.
    fn get(&self, user_id: &str) -> Result<Option<Profile>>;

    /// Creates the profile when `user_id` is unknown, otherwise applies only the
    /// fields present in `changes`. Read-check-write commits as one transaction
    /// and the returned profile is the committed row.
    async fn upsert(&self, changes: ProfileChanges, user_id: String) -> Result<Profile>;
}

/// Trait for profile service operations
#[async_trait]
pub trait ProfileServiceTrait: Send + Sync {
    fn get_profile(&self, user_id: &str) -> Result<Option<Profile>>;
    async fn create_profile(&self, new_profile: NewProfile) -> Result<Profile>;
    async fn update_profile(&self, user_id: String, update: ProfileUpdate) -> Result<Profile>;
}
