//! Database models for profiles.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use profile_service_core::profiles::{NewProfile, Profile, ProfileChanges};

/// Database model for profiles
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProfileDB {
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for inserting a new profile
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::profiles)]
pub struct NewProfileDB {
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update. `None` columns are left out of the `SET` clause;
/// `Some(None)` on a nullable column writes NULL.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::profiles)]
pub struct ProfileChangesetDB {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub updated_at: NaiveDateTime,
}

impl NewProfileDB {
    pub fn from_domain(new_profile: NewProfile, now: NaiveDateTime) -> Self {
        Self {
            user_id: new_profile.user_id,
            full_name: new_profile.full_name,
            email: new_profile.email,
            avatar_url: new_profile.avatar_url,
            bio: new_profile.bio,
            created_at: now,
            updated_at: now,
        }
    }
}

impl ProfileChangesetDB {
    pub fn from_domain(changes: ProfileChanges, now: NaiveDateTime) -> Self {
        Self {
            full_name: changes.full_name,
            email: changes.email,
            avatar_url: changes.avatar_url,
            bio: changes.bio,
            updated_at: now,
        }
    }
}

// Conversion to domain models
impl From<ProfileDB> for Profile {
    fn from(db: ProfileDB) -> Self {
        Self {
            user_id: db.user_id,
            full_name: db.full_name,
            email: db.email,
            avatar_url: db.avatar_url,
            bio: db.bio,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
