//! Shared-categories screen: inline editing for generic rows, a dialog editor for
//! customers and suppliers, and a session cache so unsaved edits survive switching
//! between categories.
//!
//! Every change to the working list is written to the [`SessionCache`] before the
//! call returns.

pub mod cache;
pub mod filter;
pub mod party;


use std::collections::HashSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::MasterDataError;
use crate::models::{Category, Customer, GenericRow, Party, StatusColor, Supplier};
use crate::store::MasterData;

pub use cache::{CategoryRows, SessionCache};
pub use filter::{filter_generic, filter_parties, Filters};
pub use party::{DeleteOutcome, DeletePrompt, ModalMode, PartyDraft, PartyModal};

/// Inline edit of a generic row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowField {
    Code(String),
    Name(String),
    Description(String),
    Color(StatusColor),
}

impl RowField {
    fn apply(self, row: &mut GenericRow) {
        match self {
            RowField::Code(v) => row.code = v,
            RowField::Name(v) => row.name = v,
            RowField::Description(v) => row.description = v,
            RowField::Color(v) => row.color = Some(v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAllOutcome {
    /// Nothing changed since the last save
    NotDirty,
    Saved { rows: usize },
}

#[derive(Debug, Clone)]
pub struct MasterDataController {
    cache: SessionCache,
    category: Category,
    rows: CategoryRows,
    editing: HashSet<Uuid>,
    dirty: bool,
    filters: Filters,
    modal: Option<PartyModal>,
    pending_delete: Option<DeletePrompt>,
}

impl MasterDataController {
    /// Creates the controller with `category` selected.
    pub fn new(cache: SessionCache, category: Category, master: &MasterData) -> Self {
        let mut controller = Self {
            cache,
            category,
            rows: CategoryRows::Generic(Vec::new()),
            editing: HashSet::new(),
            dirty: false,
            filters: Filters::default(),
            modal: None,
            pending_delete: None,
        };
        controller.select_category(category, master);
        controller
    }

    /// Loads `category` from the session cache, or from the committed lists when it
    /// has not been touched yet, and resets all screen state.
    pub fn select_category(&mut self, category: Category, master: &MasterData) {
        self.rows = match self.cache.get(category) {
            Some(cached) => {
                debug!("Restoring {} from session cache", category);
                cached.clone()
            }
            None => CategoryRows::baseline(category, master),
        };
        self.category = category;
        self.editing.clear();
        self.dirty = false;
        self.filters = Filters::default();
        self.modal = None;
        self.pending_delete = None;
    }

    /// Category currently on screen.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Working rows of the current category, including unsaved edits.
    pub fn rows(&self) -> &CategoryRows {
        &self.rows
    }

    /// Working rows when a generic category is selected.
    pub fn generic_rows(&self) -> Option<&[GenericRow]> {
        match &self.rows {
            CategoryRows::Generic(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn customers(&self) -> Option<&[Customer]> {
        match &self.rows {
            CategoryRows::Customers(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn suppliers(&self) -> Option<&[Supplier]> {
        match &self.rows {
            CategoryRows::Suppliers(rows) => Some(rows),
            _ => None,
        }
    }

    /// Whether the working list changed since it was loaded or last saved.
    ///
    /// Toggling edit mode alone never sets this.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_editing(&self, row_id: Uuid) -> bool {
        self.editing.contains(&row_id)
    }

    pub fn editing_count(&self) -> usize {
        self.editing.len()
    }

    /// Session cache backing every category visited so far.
    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    /// Hands the cache back, e.g. when the session ends.
    pub fn into_cache(self) -> SessionCache {
        self.cache
    }

    fn persist(&mut self) {
        self.cache.put(self.category, &self.rows);
    }

    fn generic_mut(&mut self, operation: &'static str) -> Result<&mut Vec<GenericRow>, MasterDataError> {
        let category = self.category;
        match &mut self.rows {
            CategoryRows::Generic(rows) => Ok(rows),
            _ => Err(unsupported(category, operation)),
        }
    }

    fn unsupported(&self, operation: &'static str) -> MasterDataError {
        unsupported(self.category, operation)
    }

    // Generic categories

    /// Appends a blank row and opens it for editing.
    pub fn add_row(&mut self) -> Result<Uuid, MasterDataError> {
        let category = self.category;
        let row = GenericRow::blank(category);
        let id = row.id;
        self.generic_mut("add row")?.push(row);
        self.editing.insert(id);
        self.dirty = true;
        self.persist();
        Ok(id)
    }

    /// Flips one row between display and edit mode. Ids not in the working list are
    /// ignored.
    pub fn toggle_edit_mode(&mut self, row_id: Uuid) {
        if !self.rows.contains_id(row_id) {
            debug!("Row {} not found, ignoring edit-mode toggle", row_id);
            return;
        }
        if !self.editing.remove(&row_id) {
            self.editing.insert(row_id);
        }
    }

    /// Edits one field of a generic row and marks the list dirty.
    ///
    /// Unknown ids are ignored. The row does not need to be in edit mode.
    pub fn update_field(&mut self, row_id: Uuid, field: RowField) -> Result<(), MasterDataError> {
        match self.generic_mut("edit row")?.iter_mut().find(|r| r.id == row_id) {
            Some(row) => field.apply(row),
            None => {
                debug!("Row {} not found, ignoring edit", row_id);
                return Ok(());
            }
        }
        self.dirty = true;
        self.persist();
        Ok(())
    }

    /// Removes a generic row. No confirmation is asked for.
    pub fn delete_row(&mut self, row_id: Uuid) -> Result<(), MasterDataError> {
        self.generic_mut("delete row")?.retain(|r| r.id != row_id);
        self.editing.remove(&row_id);
        self.dirty = true;
        self.persist();
        Ok(())
    }

    /// Commits the working list if every row has a code and a name.
    ///
    /// On rejection the dirty flag and every row's edit mode are left as they were.
    pub fn save_all(&mut self, master: &mut MasterData) -> Result<SaveAllOutcome, MasterDataError> {
        if !self.dirty {
            return Ok(SaveAllOutcome::NotDirty);
        }
        let category = self.category;
        let rows = self.generic_mut("save")?;

        if rows.iter().any(|row| !row.has_code_and_name()) {
            warn!("Rejected save of {}: rows without code or name", category);
            return Err(MasterDataError::MissingCodeOrName);
        }

        for row in rows.iter_mut() {
            row.is_new = false;
        }
        let saved = rows.len();

        self.editing.clear();
        self.dirty = false;
        self.persist();
        self.rows.commit_to(category, master);
        info!("Saved {} rows of {}", saved, category);
        Ok(SaveAllOutcome::Saved { rows: saved })
    }

    // Customers and suppliers

    /// The open customer/supplier dialog, if any.
    pub fn modal(&self) -> Option<&PartyModal> {
        self.modal.as_ref()
    }

    /// Draft in the open dialog, for field edits.
    pub fn modal_draft_mut(&mut self) -> Result<&mut PartyDraft, MasterDataError> {
        self.modal
            .as_mut()
            .map(|modal| &mut modal.draft)
            .ok_or(MasterDataError::ModalNotOpen)
    }

    /// Opens the dialog with a suggested code and category defaults.
    pub fn open_create_modal(&mut self) -> Result<&PartyDraft, MasterDataError> {
        let sequence = self.rows.len() + 1;
        let draft = match self.category {
            Category::Customers => {
                PartyDraft::Customer(Customer::new(&Customer::suggested_code(sequence), ""))
            }
            Category::Suppliers => {
                PartyDraft::Supplier(Supplier::new(&Supplier::suggested_code(sequence), ""))
            }
            _ => return Err(self.unsupported("create dialog")),
        };
        let modal = self.modal.insert(PartyModal {
            mode: ModalMode::Create,
            draft,
        });
        Ok(&modal.draft)
    }

    /// Opens the dialog on a copy of an existing customer or supplier.
    pub fn open_edit_modal(&mut self, row_id: Uuid) -> Result<&PartyDraft, MasterDataError> {
        let draft = match &self.rows {
            CategoryRows::Customers(rows) => rows
                .iter()
                .find(|r| r.id == row_id)
                .cloned()
                .map(PartyDraft::Customer),
            CategoryRows::Suppliers(rows) => rows
                .iter()
                .find(|r| r.id == row_id)
                .cloned()
                .map(PartyDraft::Supplier),
            CategoryRows::Generic(_) => return Err(self.unsupported("edit dialog")),
        }
        .ok_or(MasterDataError::RowNotFound(row_id))?;

        let modal = self.modal.insert(PartyModal {
            mode: ModalMode::Edit,
            draft,
        });
        Ok(&modal.draft)
    }

    /// Closes the dialog and drops its draft without saving.
    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Saves the dialog. The dialog stays open when validation fails.
    pub fn save_modal(&mut self, master: &mut MasterData) -> Result<Uuid, MasterDataError> {
        let modal = self.modal.as_ref().ok_or(MasterDataError::ModalNotOpen)?;
        let (mode, draft) = (modal.mode, modal.draft.clone());
        let category = self.category;

        let id = match (&mut self.rows, draft) {
            (CategoryRows::Customers(rows), PartyDraft::Customer(row)) => {
                party::commit_party(rows, row, mode)?
            }
            (CategoryRows::Suppliers(rows), PartyDraft::Supplier(row)) => {
                party::commit_party(rows, row, mode)?
            }
            _ => return Err(unsupported(category, "save dialog")),
        };

        self.modal = None;
        self.persist();
        self.rows.commit_to(self.category, master);
        Ok(id)
    }

    /// Prompt waiting for an answer from [`resolve_delete`](Self::resolve_delete).
    pub fn pending_delete(&self) -> Option<&DeletePrompt> {
        self.pending_delete.as_ref()
    }

    /// Starts a delete. Active rows are offered deactivation, inactive rows removal;
    /// nothing changes until [`resolve_delete`](Self::resolve_delete).
    pub fn request_delete(&mut self, row_id: Uuid) -> Result<&DeletePrompt, MasterDataError> {
        let prompt = match &self.rows {
            CategoryRows::Customers(rows) => {
                rows.iter().find(|r| r.id == row_id).map(DeletePrompt::for_row)
            }
            CategoryRows::Suppliers(rows) => {
                rows.iter().find(|r| r.id == row_id).map(DeletePrompt::for_row)
            }
            CategoryRows::Generic(_) => return Err(self.unsupported("confirmed delete")),
        }
        .ok_or(MasterDataError::RowNotFound(row_id))?;

        Ok(self.pending_delete.insert(prompt))
    }

    /// Answers the pending prompt. Declining leaves the rows untouched.
    pub fn resolve_delete(
        &mut self,
        confirmed: bool,
        master: &mut MasterData,
    ) -> Result<DeleteOutcome, MasterDataError> {
        let prompt = self
            .pending_delete
            .take()
            .ok_or(MasterDataError::NoPendingDelete)?;
        if !confirmed {
            debug!("Delete of {} declined", prompt.id());
            return Ok(DeleteOutcome::Declined);
        }

        let category = self.category;
        let outcome = match &mut self.rows {
            CategoryRows::Customers(rows) => party::apply_delete(rows, &prompt),
            CategoryRows::Suppliers(rows) => party::apply_delete(rows, &prompt),
            CategoryRows::Generic(_) => return Err(unsupported(category, "confirmed delete")),
        };
        self.persist();
        self.rows.commit_to(self.category, master);
        Ok(outcome)
    }

    // Filtering

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Replaces the list filters. Filtering never changes the working rows.
    pub fn set_filters(&mut self, filters: Filters) {
        self.filters = filters;
    }

    /// Customers passing the current filters; empty on other categories.
    pub fn filtered_customers(&self) -> Vec<&Customer> {
        self.customers()
            .map(|rows| filter_parties(rows, &self.filters))
            .unwrap_or_default()
    }

    pub fn filtered_suppliers(&self) -> Vec<&Supplier> {
        self.suppliers()
            .map(|rows| filter_parties(rows, &self.filters))
            .unwrap_or_default()
    }

    pub fn filtered_generic(&self) -> Vec<&GenericRow> {
        self.generic_rows()
            .map(|rows| filter_generic(rows, &self.filters))
            .unwrap_or_default()
    }
}

fn unsupported(category: Category, operation: &'static str) -> MasterDataError {
    MasterDataError::UnsupportedOperation {
        category,
        operation,
    }
}
