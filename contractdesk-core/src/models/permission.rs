use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four independent flags on a permission node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    CanView,
    CanAdd,
    CanEdit,
    CanDelete,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::CanView => write!(f, "canView"),
            Capability::CanAdd => write!(f, "canAdd"),
            Capability::CanEdit => write!(f, "canEdit"),
            Capability::CanDelete => write!(f, "canDelete"),
        }
    }
}

/// Screen or function in the permission matrix.
///
/// Nodes form a one-level tree through `parent_id`; parents carry no parent themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionNode {
    pub id: String,
    pub name: String,
    pub is_parent: bool,
    pub parent_id: Option<String>,
    pub can_view: bool,
    pub can_add: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl PermissionNode {
    pub fn parent(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            is_parent: true,
            parent_id: None,
            can_view: false,
            can_add: false,
            can_edit: false,
            can_delete: false,
        }
    }

    pub fn child(id: &str, name: &str, parent_id: &str) -> Self {
        Self {
            is_parent: false,
            parent_id: Some(parent_id.to_string()),
            ..Self::parent(id, name)
        }
    }

    pub fn get(&self, capability: Capability) -> bool {
        match capability {
            Capability::CanView => self.can_view,
            Capability::CanAdd => self.can_add,
            Capability::CanEdit => self.can_edit,
            Capability::CanDelete => self.can_delete,
        }
    }

    pub fn set(&mut self, capability: Capability, value: bool) {
        match capability {
            Capability::CanView => self.can_view = value,
            Capability::CanAdd => self.can_add = value,
            Capability::CanEdit => self.can_edit = value,
            Capability::CanDelete => self.can_delete = value,
        }
    }
}
