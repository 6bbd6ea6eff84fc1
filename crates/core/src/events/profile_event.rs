//! Outbound profile event types.

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profiles::Profile;

/// Closed set of profile event kinds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProfileEventKind {
    ProfileCreated,
    ProfileUpdated,
}

impl ProfileEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileEventKind::ProfileCreated => "ProfileCreated",
            ProfileEventKind::ProfileUpdated => "ProfileUpdated",
        }
    }
}

/// Event emitted after a profile was created or updated.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileEvent {
    pub event_type: ProfileEventKind,
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    /// Emission time, naive UTC.
    pub timestamp: NaiveDateTime,
}

impl ProfileEvent {
    /// Creates an event describing `profile`, stamped with the current time.
    pub fn from_profile(event_type: ProfileEventKind, profile: &Profile) -> Self {
        Self {
            event_type,
            user_id: profile.user_id.clone(),
            full_name: profile.full_name.clone(),
            email: profile.email.clone(),
            timestamp: Utc::now().naive_utc(),
        }
    }

    /// Creates a ProfileCreated event.
    pub fn created(profile: &Profile) -> Self {
        Self::from_profile(ProfileEventKind::ProfileCreated, profile)
    }

    /// Creates a ProfileUpdated event.
    pub fn updated(profile: &Profile) -> Self {
        Self::from_profile(ProfileEventKind::ProfileUpdated, profile)
    }
}
