use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shown instead of a group name when a user's group reference is missing.
pub const NO_GROUP_LABEL: &str = "Chưa phân nhóm";

/// Back-office account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemUser {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login name (unique)
    pub username: String,

    /// User's full name
    pub full_name: String,

    pub email: String,

    /// Group this user belongs to, if any
    pub group_id: Option<Uuid>,

    /// Whether the account may log in
    pub is_active: bool,

    /// Timestamp of the user's last login
    pub last_login_at: Option<NaiveDateTime>,
}

/// Named set of users sharing a permission profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl SystemUser {
    /// Group name for display, falling back to [`NO_GROUP_LABEL`].
    pub fn group_label<'a>(&self, groups: &'a [UserGroup]) -> &'a str {
        self.group_id
            .and_then(|id| groups.iter().find(|group| group.id == id))
            .map(|group| group.name.as_str())
            .unwrap_or(NO_GROUP_LABEL)
    }
}
