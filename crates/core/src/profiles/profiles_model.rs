//! Profile domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Upper bound on `full_name`, counted in characters.
pub const FULL_NAME_MAX_CHARS: usize = 120;

/// Domain model representing a user profile.
///
/// This is also the read representation returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Profile {
    /// Applies the fields present in `changes`, leaving the others untouched.
    pub fn apply_changes(&mut self, changes: ProfileChanges, now: NaiveDateTime) {
        if let Some(full_name) = changes.full_name {
            self.full_name = full_name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(avatar_url) = changes.avatar_url {
            self.avatar_url = avatar_url;
        }
        if let Some(bio) = changes.bio {
            self.bio = bio;
        }
        self.updated_at = now;
    }
}

/// Input model for creating a new profile.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

impl NewProfile {
    /// Checks the create payload constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("user_id", &self.user_id)?;
        validate_full_name(&self.full_name)?;
        require_non_empty("email", &self.email)?;
        Ok(())
    }
}

/// Input model for a partial profile update.
///
/// Each field distinguishes "omitted" (`None`) from "explicitly null"
/// (`Some(None)`) and "set" (`Some(Some(value))`).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub full_name: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub email: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub avatar_url: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub bio: Option<Option<String>>,
}

impl ProfileUpdate {
    /// Checks the update payload constraints.
    ///
    /// `full_name` and `email` may be omitted but never cleared.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.full_name {
            Some(Some(full_name)) => validate_full_name(full_name)?,
            Some(None) => return Err(null_not_allowed("full_name")),
            None => {}
        }
        match &self.email {
            Some(Some(email)) => require_non_empty("email", email)?,
            Some(None) => return Err(null_not_allowed("email")),
            None => {}
        }
        Ok(())
    }
}

/// The single input accepted by the repository upsert.
///
/// Both create and update payloads funnel into this shape. `None` means
/// "leave untouched"; for the optional columns `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<Option<String>>,
    pub bio: Option<Option<String>>,
}

impl ProfileChanges {
    /// Builds the record inserted on the create path.
    ///
    /// Fails when a required column has no value to start from.
    pub fn into_new_profile(self, user_id: String) -> Result<NewProfile, ValidationError> {
        let full_name = self
            .full_name
            .ok_or_else(|| ValidationError::MissingField("full_name".to_string()))?;
        let email = self
            .email
            .ok_or_else(|| ValidationError::MissingField("email".to_string()))?;
        Ok(NewProfile {
            user_id,
            full_name,
            email,
            avatar_url: self.avatar_url.flatten(),
            bio: self.bio.flatten(),
        })
    }
}

impl From<NewProfile> for ProfileChanges {
    fn from(new_profile: NewProfile) -> Self {
        Self {
            full_name: Some(new_profile.full_name),
            email: Some(new_profile.email),
            avatar_url: new_profile.avatar_url.map(Some),
            bio: new_profile.bio.map(Some),
        }
    }
}

impl From<ProfileUpdate> for ProfileChanges {
    fn from(update: ProfileUpdate) -> Self {
        Self {
            full_name: update.full_name.flatten(),
            email: update.email.flatten(),
            avatar_url: update.avatar_url,
            bio: update.bio,
        }
    }
}

/// Validates a full name: 1 to [`FULL_NAME_MAX_CHARS`] characters.
pub fn validate_full_name(full_name: &str) -> Result<(), ValidationError> {
    require_non_empty("full_name", full_name)?;
    if full_name.chars().count() > FULL_NAME_MAX_CHARS {
        return Err(ValidationError::TooLong {
            field: "full_name".to_string(),
            max: FULL_NAME_MAX_CHARS,
        });
    }
    Ok(())
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn null_not_allowed(field: &str) -> ValidationError {
    ValidationError::InvalidInput(format!("Field '{}' cannot be null", field))
}
