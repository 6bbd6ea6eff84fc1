use serde::{Deserialize, Serialize};

use crate::profiles::ProfileChanges;

/// Upstream event announcing a newly registered subject.
///
/// Every field defaults to an empty string when missing.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectRegistered {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
}

impl From<SubjectRegistered> for ProfileChanges {
    fn from(event: SubjectRegistered) -> Self {
        Self {
            full_name: Some(event.full_name),
            email: Some(event.email),
            avatar_url: None,
            bio: None,
        }
    }
}
