//! Typed single-field edits for a contract draft and its nested rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Contract, Expense, InvoiceStatus, PaymentStatus, PaymentTerm, ProjectMember};

/// Top-level contract field edit. Values are taken as entered; nothing is validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ContractField {
    Code(String),
    SignDate(Option<NaiveDate>),
    CustomerName(String),
    Content(String),
    SoftwareTypes(Vec<String>),
    ContractType(String),
    ValuePreVat(Decimal),
    Vat(Decimal),
    ValuePostVat(Decimal),
    Duration(String),
    Status(String),
    AcceptanceDate(Option<NaiveDate>),
}

impl ContractField {
    pub fn apply(self, contract: &mut Contract) {
        match self {
            ContractField::Code(v) => contract.code = v,
            ContractField::SignDate(v) => contract.sign_date = v,
            ContractField::CustomerName(v) => contract.customer_name = v,
            ContractField::Content(v) => contract.content = v,
            ContractField::SoftwareTypes(v) => contract.software_types = v,
            ContractField::ContractType(v) => contract.contract_type = v,
            ContractField::ValuePreVat(v) => contract.value_pre_vat = v,
            ContractField::Vat(v) => contract.vat = v,
            ContractField::ValuePostVat(v) => contract.value_post_vat = v,
            ContractField::Duration(v) => contract.duration = v,
            ContractField::Status(v) => contract.status = v,
            ContractField::AcceptanceDate(v) => contract.acceptance_date = v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum PaymentTermField {
    Batch(String),
    Content(String),
    Ratio(Decimal),
    Value(Decimal),
    IsCollected(bool),
    CollectionDate(Option<NaiveDate>),
    InvoiceStatus(InvoiceStatus),
}

impl PaymentTermField {
    /// Applies the edit. A ratio edit also sets `value` from `value_post_vat`;
    /// a value edit leaves the ratio alone.
    ///
    /// When `value_post_vat * ratio` does not fit in a `Decimal` the ratio is still
    /// stored but `value` keeps its previous amount.
    pub fn apply(self, term: &mut PaymentTerm, value_post_vat: Decimal) {
        match self {
            PaymentTermField::Batch(v) => term.batch = v,
            PaymentTermField::Content(v) => term.content = v,
            PaymentTermField::Ratio(ratio) => {
                term.ratio = ratio;
                match derive_value(value_post_vat, ratio) {
                    Some(value) => term.value = value,
                    None => warn!(
                        "Payment term {}: {}% of {} overflows, keeping value {}",
                        term.batch, ratio, value_post_vat, term.value
                    ),
                }
            }
            PaymentTermField::Value(v) => term.value = v,
            PaymentTermField::IsCollected(v) => term.is_collected = v,
            PaymentTermField::CollectionDate(v) => term.collection_date = v,
            PaymentTermField::InvoiceStatus(v) => term.invoice_status = v,
        }
    }
}

/// `ratio` percent of `value_post_vat`, or `None` on overflow.
pub fn derive_value(value_post_vat: Decimal, ratio: Decimal) -> Option<Decimal> {
    value_post_vat
        .checked_mul(ratio)?
        .checked_div(Decimal::ONE_HUNDRED)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ExpenseField {
    Category(String),
    Description(String),
    SupplierId(String),
    TotalAmount(Decimal),
    PaymentStatus(PaymentStatus),
    Pic(String),
    Note(String),
}

impl ExpenseField {
    pub fn apply(self, expense: &mut Expense) {
        match self {
            ExpenseField::Category(v) => expense.category = v,
            ExpenseField::Description(v) => expense.description = v,
            ExpenseField::SupplierId(v) => expense.supplier_id = v,
            ExpenseField::TotalAmount(v) => expense.total_amount = v,
            ExpenseField::PaymentStatus(v) => expense.payment_status = v,
            ExpenseField::Pic(v) => expense.pic = v,
            ExpenseField::Note(v) => expense.note = v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum MemberField {
    MemberCode(String),
    Name(String),
    Role(String),
}

impl MemberField {
    pub fn apply(self, member: &mut ProjectMember) {
        match self {
            MemberField::MemberCode(v) => member.member_code = v,
            MemberField::Name(v) => member.name = v,
            MemberField::Role(v) => member.role = v,
        }
    }
}
