//! Profile entity

use crate::core::ids::UserId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Shown to the partner when a name is unknown.
pub const DEFAULT_PARTNER_NAME: &str = "Partner";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: UserId,
    pub display_name: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub religion: Option<String>,
}

impl Profile {
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            display_name: None,
            birthday: None,
            religion: None,
        }
    }

    /// Name to show, falling back to [`DEFAULT_PARTNER_NAME`].
    pub fn display_name_or_default(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_PARTNER_NAME)
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub religion: Option<String>,
}

impl ProfileUpdate {
    pub fn apply_to(self, profile: &mut Profile) {
        if let Some(name) = self.display_name {
            profile.display_name = Some(name.trim().to_string());
        }
        if let Some(birthday) = self.birthday {
            profile.birthday = Some(birthday);
        }
        if let Some(religion) = self.religion {
            profile.religion = Some(religion.trim().to_ascii_lowercase());
        }
    }
}
