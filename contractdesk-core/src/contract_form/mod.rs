//! Working draft for creating or editing one contract.
//!
//! The form owns a private copy of the contract. Edits only touch that copy; the
//! stored collection changes on [`ContractForm::save`] alone.

pub mod fields;

#[cfg(test)]
mod tests;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::fmt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ContractFormError;
use crate::models::{
    Attachment, Contract, Expense, FileInput, GenericRow, PaymentTerm, ProjectMember,
};
use crate::status::{resolve_status, StatusLabel};
use crate::store::{EntityStore, MasterData};

pub use fields::{ContractField, ExpenseField, MemberField, PaymentTermField};

/// Which flow the form is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Closed,
    Creating,
    Editing,
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormMode::Closed => write!(f, "closed"),
            FormMode::Creating => write!(f, "creating"),
            FormMode::Editing => write!(f, "editing"),
        }
    }
}

#[derive(Debug, Clone)]
enum FormState {
    Closed,
    Creating(Contract),
    Editing(Contract),
}

/// Result of a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(Uuid),
    Updated(Uuid),
}

/// Expense line as shown in the form, with its live contract status.
#[derive(Debug, Clone)]
pub struct ExpenseRow<'a> {
    pub expense: &'a Expense,
    pub contract_status: StatusLabel,
    pub supplier_name: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct ContractForm {
    state: FormState,
    default_vat: Decimal,
}

impl Default for ContractForm {
    fn default() -> Self {
        Self::new(Decimal::from(10))
    }
}

impl ContractForm {
    /// Creates a closed form. New drafts start with `default_vat` percent VAT.
    pub fn new(default_vat: Decimal) -> Self {
        Self {
            state: FormState::Closed,
            default_vat,
        }
    }

    /// Current flow, derived from the draft state.
    pub fn mode(&self) -> FormMode {
        match self.state {
            FormState::Closed => FormMode::Closed,
            FormState::Creating(_) => FormMode::Creating,
            FormState::Editing(_) => FormMode::Editing,
        }
    }

    /// The working copy, or `None` while the form is closed.
    pub fn draft(&self) -> Option<&Contract> {
        match &self.state {
            FormState::Closed => None,
            FormState::Creating(draft) | FormState::Editing(draft) => Some(draft),
        }
    }

    fn draft_mut(&mut self) -> Result<&mut Contract, ContractFormError> {
        match &mut self.state {
            FormState::Closed => Err(ContractFormError::NotOpen),
            FormState::Creating(draft) | FormState::Editing(draft) => Ok(draft),
        }
    }

    /// Opens a blank draft, discarding any draft in progress.
    pub fn open_for_create(&mut self) {
        debug!("Opening contract form for create");
        self.state = FormState::Creating(Contract::blank(self.default_vat));
    }

    /// Opens a draft copied from `contract`.
    pub fn open_for_edit(&mut self, contract: &Contract) {
        debug!("Opening contract form for {}", contract.code);
        self.state = FormState::Editing(contract.clone());
    }

    /// Discards the draft. The store is not touched.
    pub fn cancel(&mut self) {
        self.state = FormState::Closed;
    }

    /// Sets one top-level field on the draft.
    ///
    /// Values are stored as given; only [`validate_for_save`](Self::validate_for_save)
    /// enforces anything.
    pub fn set_field(&mut self, field: ContractField) -> Result<(), ContractFormError> {
        field.apply(self.draft_mut()?);
        Ok(())
    }

    /// Appends a term labelled "Đợt N", where N is the new term count, with zero
    /// ratio and value. Returns the new term id.
    pub fn add_payment_term(&mut self) -> Result<Uuid, ContractFormError> {
        let draft = self.draft_mut()?;
        let term = PaymentTerm::new(draft.payment_terms.len() + 1);
        let id = term.id;
        draft.payment_terms.push(term);
        Ok(id)
    }

    /// Edits one payment term. Unknown ids are ignored.
    pub fn update_payment_term(
        &mut self,
        id: Uuid,
        field: PaymentTermField,
    ) -> Result<(), ContractFormError> {
        let draft = self.draft_mut()?;
        let value_post_vat = draft.value_post_vat;
        match draft.payment_terms.iter_mut().find(|t| t.id == id) {
            Some(term) => field.apply(term, value_post_vat),
            None => debug!("Payment term {} not found, ignoring edit", id),
        }
        Ok(())
    }

    /// Removes a term. Labels of the remaining terms are not renumbered.
    pub fn delete_payment_term(&mut self, id: Uuid) -> Result<(), ContractFormError> {
        self.draft_mut()?.payment_terms.retain(|t| t.id != id);
        Ok(())
    }

    /// Appends an unpaid expense with no supplier and returns its id.
    pub fn add_expense(&mut self) -> Result<Uuid, ContractFormError> {
        let expense = Expense::new();
        let id = expense.id;
        self.draft_mut()?.expenses.push(expense);
        Ok(id)
    }

    /// Edits one expense. Unknown ids are ignored.
    pub fn update_expense(&mut self, id: Uuid, field: ExpenseField) -> Result<(), ContractFormError> {
        match self.draft_mut()?.expenses.iter_mut().find(|e| e.id == id) {
            Some(expense) => field.apply(expense),
            None => debug!("Expense {} not found, ignoring edit", id),
        }
        Ok(())
    }

    /// Removes an expense together with its attachments.
    pub fn delete_expense(&mut self, id: Uuid) -> Result<(), ContractFormError> {
        self.draft_mut()?.expenses.retain(|e| e.id != id);
        Ok(())
    }

    /// Attaches uploaded files to an expense, stamped with today's date.
    ///
    /// Files for an expense that no longer exists are dropped.
    pub fn add_expense_attachment(
        &mut self,
        expense_id: Uuid,
        files: &[FileInput],
    ) -> Result<(), ContractFormError> {
        self.add_expense_attachment_on(expense_id, files, today())
    }

    /// Same as [`add_expense_attachment`](Self::add_expense_attachment) with an explicit upload date.
    pub fn add_expense_attachment_on(
        &mut self,
        expense_id: Uuid,
        files: &[FileInput],
        uploaded_on: NaiveDate,
    ) -> Result<(), ContractFormError> {
        match self.draft_mut()?.expenses.iter_mut().find(|e| e.id == expense_id) {
            Some(expense) => expense
                .attachments
                .extend(files.iter().map(|f| Attachment::from_upload(f, uploaded_on))),
            None => debug!("Expense {} not found, dropping {} files", expense_id, files.len()),
        }
        Ok(())
    }

    /// Removes one file from an expense; missing ids are a no-op.
    pub fn remove_expense_attachment(
        &mut self,
        expense_id: Uuid,
        file_id: Uuid,
    ) -> Result<(), ContractFormError> {
        if let Some(expense) = self.draft_mut()?.expenses.iter_mut().find(|e| e.id == expense_id) {
            expense.attachments.retain(|a| a.id != file_id);
        }
        Ok(())
    }

    /// Appends a blank member with the `Dev` role.
    pub fn add_member(&mut self) -> Result<Uuid, ContractFormError> {
        let member = ProjectMember::new();
        let id = member.id;
        self.draft_mut()?.members.push(member);
        Ok(id)
    }

    /// Edits one member. Unknown ids are ignored.
    pub fn update_member(&mut self, id: Uuid, field: MemberField) -> Result<(), ContractFormError> {
        match self.draft_mut()?.members.iter_mut().find(|m| m.id == id) {
            Some(member) => field.apply(member),
            None => debug!("Member {} not found, ignoring edit", id),
        }
        Ok(())
    }

    /// Removes a member.
    pub fn delete_member(&mut self, id: Uuid) -> Result<(), ContractFormError> {
        self.draft_mut()?.members.retain(|m| m.id != id);
        Ok(())
    }

    /// Attaches uploaded files to the contract itself, stamped with today's date.
    pub fn add_contract_attachment(&mut self, files: &[FileInput]) -> Result<(), ContractFormError> {
        self.add_contract_attachment_on(files, today())
    }

    /// Same as [`add_contract_attachment`](Self::add_contract_attachment) with an explicit upload date.
    pub fn add_contract_attachment_on(
        &mut self,
        files: &[FileInput],
        uploaded_on: NaiveDate,
    ) -> Result<(), ContractFormError> {
        self.draft_mut()?
            .attachments
            .extend(files.iter().map(|f| Attachment::from_upload(f, uploaded_on)));
        Ok(())
    }

    /// Removes one contract-level file.
    pub fn remove_contract_attachment(&mut self, file_id: Uuid) -> Result<(), ContractFormError> {
        self.draft_mut()?.attachments.retain(|a| a.id != file_id);
        Ok(())
    }

    /// The only hard rule: a completed contract needs an acceptance date.
    ///
    /// `statuses` is the Status master list; legacy literals such as `completed`
    /// count as completed too.
    pub fn validate_for_save(&self, statuses: &[GenericRow]) -> Result<(), ContractFormError> {
        let draft = self.draft().ok_or(ContractFormError::NotOpen)?;
        if draft.is_completed(statuses) && draft.acceptance_date.is_none() {
            return Err(ContractFormError::AcceptanceDateRequired);
        }
        Ok(())
    }

    /// Commits the draft to `store` and closes the form.
    ///
    /// On any error the form stays open and the store is untouched.
    pub fn save(&mut self, store: &mut EntityStore) -> Result<SaveOutcome, ContractFormError> {
        if let Err(e) = self.validate_for_save(&store.master.statuses) {
            warn!("Contract save rejected: {}", e);
            return Err(e);
        }

        match std::mem::replace(&mut self.state, FormState::Closed) {
            FormState::Creating(mut draft) => {
                draft.id = Uuid::new_v4();
                let id = draft.id;
                store.insert_contract(draft);
                info!("Contract form saved (created {})", id);
                Ok(SaveOutcome::Created(id))
            }
            FormState::Editing(draft) => {
                let id = draft.id;
                if store.contract(id).is_none() {
                    warn!("Contract {} vanished while being edited", id);
                    self.state = FormState::Editing(draft);
                    return Err(ContractFormError::ContractNotFound(id));
                }
                store.replace_contract(draft);
                info!("Contract form saved (updated {})", id);
                Ok(SaveOutcome::Updated(id))
            }
            FormState::Closed => Err(ContractFormError::NotOpen),
        }
    }

    /// Expense lines of the draft with the draft's current status resolved for display.
    pub fn expense_rows<'a>(&'a self, master: &'a MasterData) -> Vec<ExpenseRow<'a>> {
        let Some(draft) = self.draft() else {
            return Vec::new();
        };
        draft
            .expense_rows()
            .map(|(expense, status)| ExpenseRow {
                expense,
                contract_status: resolve_status(status, &master.statuses),
                supplier_name: master.supplier_name(&expense.supplier_id),
            })
            .collect()
    }

    /// Sum of payment-term ratios, for the "total must reach 100%" hint.
    pub fn total_ratio(&self) -> Decimal {
        self.draft()
            .map(|d| d.payment_terms.iter().map(|t| t.ratio).sum())
            .unwrap_or(Decimal::ZERO)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
