//! User and group administration.
//!
//! Both tabs share one edit dialog; what it edits is decided by the active tab and
//! carried as an [`AdminDraft`] variant.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AdminError;
use crate::models::{SystemUser, UserGroup};
use crate::store::EntityStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminTab {
    #[default]
    Users,
    Groups,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserDraft {
    /// `None` while creating
    pub id: Option<Uuid>,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub group_id: Option<Uuid>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupDraft {
    pub id: Option<Uuid>,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminDraft {
    User(UserDraft),
    Group(GroupDraft),
}

/// User line with its resolved group name.
#[derive(Debug, Clone)]
pub struct UserRow<'a> {
    pub user: &'a SystemUser,
    pub group_label: &'a str,
}

#[derive(Debug, Clone, Default)]
pub struct AdminController {
    tab: AdminTab,
    draft: Option<AdminDraft>,
}

impl AdminController {
    pub fn tab(&self) -> AdminTab {
        self.tab
    }

    /// Switches tab and closes any open dialog.
    pub fn select_tab(&mut self, tab: AdminTab) {
        self.tab = tab;
        self.draft = None;
    }

    pub fn draft(&self) -> Option<&AdminDraft> {
        self.draft.as_ref()
    }

    /// Mutable access to the open dialog's draft for field edits.
    pub fn draft_mut(&mut self) -> Result<&mut AdminDraft, AdminError> {
        self.draft.as_mut().ok_or(AdminError::NotOpen)
    }

    /// Opens an empty dialog for the active tab. New users start active.
    pub fn open_create(&mut self) {
        self.draft = Some(match self.tab {
            AdminTab::Users => AdminDraft::User(UserDraft {
                is_active: true,
                ..UserDraft::default()
            }),
            AdminTab::Groups => AdminDraft::Group(GroupDraft::default()),
        });
    }

    /// Opens the dialog for the user or group `id` on the active tab.
    pub fn open_edit(&mut self, id: Uuid, store: &EntityStore) -> bool {
        let draft = match self.tab {
            AdminTab::Users => store.users.iter().find(|u| u.id == id).map(|u| {
                AdminDraft::User(UserDraft {
                    id: Some(u.id),
                    username: u.username.clone(),
                    full_name: u.full_name.clone(),
                    email: u.email.clone(),
                    group_id: u.group_id,
                    is_active: u.is_active,
                })
            }),
            AdminTab::Groups => store.groups.iter().find(|g| g.id == id).map(|g| {
                AdminDraft::Group(GroupDraft {
                    id: Some(g.id),
                    name: g.name.clone(),
                    description: g.description.clone(),
                })
            }),
        };
        self.draft = draft;
        self.draft.is_some()
    }

    pub fn close(&mut self) {
        self.draft = None;
    }

    /// Validates the open draft and writes it to `store`, closing the dialog.
    ///
    /// Users need a username and a full name, and usernames must be unique.
    /// Groups need a name. On error the dialog stays open.
    pub fn save(&mut self, store: &mut EntityStore) -> Result<Uuid, AdminError> {
        let draft = self.draft.as_ref().ok_or(AdminError::NotOpen)?;
        let id = match draft {
            AdminDraft::User(user) => save_user(user, store)?,
            AdminDraft::Group(group) => save_group(group, store)?,
        };
        self.draft = None;
        Ok(id)
    }

    /// Deletes the user or group `id` on the active tab. Users of a deleted group
    /// keep the dangling reference and show the placeholder label.
    pub fn delete(&mut self, id: Uuid, store: &mut EntityStore) {
        match self.tab {
            AdminTab::Users => store.users.retain(|u| u.id != id),
            AdminTab::Groups => store.groups.retain(|g| g.id != id),
        }
        info!("Deleted {:?} entry {}", self.tab, id);
    }

    /// Users with their group names resolved for the list view.
    pub fn user_rows<'a>(&self, store: &'a EntityStore) -> Vec<UserRow<'a>> {
        store
            .users
            .iter()
            .map(|user| UserRow {
                user,
                group_label: user.group_label(&store.groups),
            })
            .collect()
    }
}

fn save_user(draft: &UserDraft, store: &mut EntityStore) -> Result<Uuid, AdminError> {
    if draft.username.is_empty() {
        return Err(AdminError::MissingRequiredField("username"));
    }
    if draft.full_name.is_empty() {
        return Err(AdminError::MissingRequiredField("full name"));
    }
    if store
        .users
        .iter()
        .any(|u| u.username == draft.username && Some(u.id) != draft.id)
    {
        warn!("Rejected duplicate username {}", draft.username);
        return Err(AdminError::DuplicateUsername(draft.username.clone()));
    }

    match draft.id.and_then(|id| store.users.iter_mut().find(|u| u.id == id)) {
        Some(user) => {
            user.username = draft.username.clone();
            user.full_name = draft.full_name.clone();
            user.email = draft.email.clone();
            user.group_id = draft.group_id;
            user.is_active = draft.is_active;
            info!("Updated user {}", user.username);
            Ok(user.id)
        }
        None => {
            let user = SystemUser {
                id: Uuid::new_v4(),
                username: draft.username.clone(),
                full_name: draft.full_name.clone(),
                email: draft.email.clone(),
                group_id: draft.group_id,
                is_active: draft.is_active,
                last_login_at: None,
            };
            info!("Created user {}", user.username);
            let id = user.id;
            store.users.push(user);
            Ok(id)
        }
    }
}

fn save_group(draft: &GroupDraft, store: &mut EntityStore) -> Result<Uuid, AdminError> {
    if draft.name.is_empty() {
        return Err(AdminError::MissingRequiredField("group name"));
    }

    match draft.id.and_then(|id| store.groups.iter_mut().find(|g| g.id == id)) {
        Some(group) => {
            group.name = draft.name.clone();
            group.description = draft.description.clone();
            Ok(group.id)
        }
        None => {
            let group = UserGroup {
                id: Uuid::new_v4(),
                name: draft.name.clone(),
                description: draft.description.clone(),
            };
            info!("Created group {}", group.name);
            let id = group.id;
            store.groups.push(group);
            Ok(id)
        }
    }
}
