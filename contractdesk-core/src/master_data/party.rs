//! Modal editor and delete policy for customers and suppliers.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::MasterDataError;
use crate::models::{Customer, Party, PartyStatus, Supplier};

/// Row being edited in the customer/supplier dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PartyDraft {
    Customer(Customer),
    Supplier(Supplier),
}

impl PartyDraft {
    pub fn code(&self) -> &str {
        match self {
            PartyDraft::Customer(c) => &c.code,
            PartyDraft::Supplier(s) => &s.code,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PartyDraft::Customer(c) => &c.name,
            PartyDraft::Supplier(s) => &s.name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyModal {
    pub mode: ModalMode,
    pub draft: PartyDraft,
}

/// Confirmation the user must answer before a delete takes effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeletePrompt {
    /// Row is active: it will only be marked inactive
    Deactivate { id: Uuid, code: String, name: String },
    /// Row is already inactive: it will be removed
    Remove { id: Uuid, code: String, name: String },
}

impl DeletePrompt {
    /// Picks the prompt from the row's current status.
    pub fn for_row<T: Party>(row: &T) -> Self {
        let (id, code, name) = (row.id(), row.code().to_string(), row.name().to_string());
        match row.status() {
            PartyStatus::Active => DeletePrompt::Deactivate { id, code, name },
            PartyStatus::Inactive => DeletePrompt::Remove { id, code, name },
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            DeletePrompt::Deactivate { id, .. } | DeletePrompt::Remove { id, .. } => *id,
        }
    }

    /// Confirmation text shown to the user.
    pub fn message(&self) -> String {
        match self {
            DeletePrompt::Deactivate { code, name, .. } => format!(
                "{} ({}) đang hoạt động. Chuyển sang ngừng hoạt động?",
                name, code
            ),
            DeletePrompt::Remove { code, name, .. } => {
                format!("Xóa vĩnh viễn {} ({})?", name, code)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deactivated(Uuid),
    Removed(Uuid),
    Declined,
}

/// Validates and applies a dialog save to `rows`.
pub(crate) fn commit_party<T: Party>(
    rows: &mut Vec<T>,
    row: T,
    mode: ModalMode,
) -> Result<Uuid, MasterDataError> {
    if row.code().is_empty() || row.name().is_empty() {
        warn!("Rejected {} save: missing code or name", T::CODE_PREFIX);
        return Err(MasterDataError::MissingCodeOrName);
    }

    let id = row.id();
    match mode {
        ModalMode::Create => {
            if rows.iter().any(|existing| existing.code() == row.code()) {
                warn!("Rejected duplicate code {}", row.code());
                return Err(MasterDataError::DuplicateCode(row.code().to_string()));
            }
            info!("Added {} {}", row.code(), row.name());
            rows.push(row);
        }
        ModalMode::Edit => match rows.iter_mut().find(|existing| existing.id() == id) {
            Some(slot) => {
                info!("Updated {} {}", row.code(), row.name());
                *slot = row;
            }
            None => return Err(MasterDataError::RowNotFound(id)),
        },
    }
    Ok(id)
}

pub(crate) fn apply_delete<T: Party>(rows: &mut Vec<T>, prompt: &DeletePrompt) -> DeleteOutcome {
    match prompt {
        DeletePrompt::Deactivate { id, code, .. } => {
            if let Some(row) = rows.iter_mut().find(|r| r.id() == *id) {
                row.set_status(PartyStatus::Inactive);
            }
            info!("Deactivated {}", code);
            DeleteOutcome::Deactivated(*id)
        }
        DeletePrompt::Remove { id, code, .. } => {
            rows.retain(|r| r.id() != *id);
            info!("Removed {}", code);
            DeleteOutcome::Removed(*id)
        }
    }
}
