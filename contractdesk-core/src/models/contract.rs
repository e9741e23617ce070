use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::GenericRow;
use crate::status;

/// Status code assigned to freshly created contracts.
pub const STATUS_NOT_STARTED: &str = "NOT_STARTED";

/// Status code that requires an acceptance date before a contract can be saved.
pub const STATUS_COMPLETED: &str = "COMPLETED";

/// Project roles offered by the member picker.
pub const MEMBER_ROLES: [&str; 5] = ["PM", "BA", "Dev", "Tester", "AM"];

/// Invoice state of a single payment term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Exported,
    #[default]
    NotExported,
}

/// Payment state of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
}

/// File metadata attached to a contract or an expense.
///
/// No content is kept; the record only describes what was uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Uuid,
    pub name: String,
    /// Display size, e.g. `"1.50 MB"`
    pub size: String,
    /// Lowercase file extension, `"file"` when the name has none
    #[serde(rename = "type")]
    pub file_type: String,
    pub upload_date: NaiveDate,
}

/// A file handed over by the upload widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInput {
    pub name: String,
    pub size_bytes: u64,
}

impl FileInput {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }
}

impl Attachment {
    /// Builds the attachment record for an uploaded file.
    pub fn from_upload(file: &FileInput, uploaded_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: file.name.clone(),
            size: format_megabytes(file.size_bytes),
            file_type: extension_of(&file.name),
            upload_date: uploaded_on,
        }
    }
}

fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_lowercase(),
        _ => "file".to_string(),
    }
}

/// One installment ("Đợt") of a contract's payment schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTerm {
    pub id: Uuid,

    /// Batch label, auto-numbered `"Đợt N"` on creation
    pub batch: String,

    pub content: String,

    /// Share of the post-VAT value, 0-100
    pub ratio: Decimal,

    /// Amount in VND
    pub value: Decimal,

    pub is_collected: bool,

    pub collection_date: Option<NaiveDate>,

    pub invoice_status: InvoiceStatus,
}

impl PaymentTerm {
    pub fn new(sequence: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            batch: format!("Đợt {}", sequence),
            content: String::new(),
            ratio: Decimal::ZERO,
            value: Decimal::ZERO,
            is_collected: false,
            collection_date: None,
            invoice_status: InvoiceStatus::NotExported,
        }
    }
}

/// Cost line booked against a contract.
///
/// The contract status shown next to an expense is not stored here; see
/// [`Contract::expense_rows`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub category: String,
    pub description: String,
    /// Reference into the supplier master list, empty when unset
    pub supplier_id: String,
    pub total_amount: Decimal,
    pub payment_status: PaymentStatus,
    /// Person in charge
    pub pic: String,
    pub note: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Expense {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            category: String::new(),
            description: String::new(),
            supplier_id: String::new(),
            total_amount: Decimal::ZERO,
            payment_status: PaymentStatus::Unpaid,
            pic: String::new(),
            note: String::new(),
            attachments: Vec::new(),
        }
    }
}

impl Default for Expense {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    pub id: Uuid,
    pub member_code: String,
    pub name: String,
    /// One of [`MEMBER_ROLES`]; the picker constrains it, storage does not
    pub role: String,
}

impl ProjectMember {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            member_code: String::new(),
            name: String::new(),
            role: "Dev".to_string(),
        }
    }
}

impl Default for ProjectMember {
    fn default() -> Self {
        Self::new()
    }
}

/// Contract model with its nested schedule, costs, team and files.
///
/// Nested lists missing from serialized input deserialize as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Unique identifier for the contract
    pub id: Uuid,

    /// Contract number
    pub code: String,

    /// Date the contract was signed
    pub sign_date: Option<NaiveDate>,

    /// Customer reference (id or name from the customer master list)
    pub customer_name: String,

    /// Scope of work
    pub content: String,

    #[serde(default)]
    pub software_types: Vec<String>,

    pub contract_type: String,

    /// Value before VAT, VND
    pub value_pre_vat: Decimal,

    /// VAT percentage
    pub vat: Decimal,

    /// Value after VAT, VND. Entered manually; never derived from `value_pre_vat` and `vat`.
    pub value_post_vat: Decimal,

    /// Free-text duration, e.g. "6 tháng"
    pub duration: String,

    /// Status code resolved against the Status master list
    pub status: String,

    /// Required once `status` resolves to completed (`COMPLETED` or the legacy `completed`)
    pub acceptance_date: Option<NaiveDate>,

    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Payment schedule in insertion order
    #[serde(default)]
    pub payment_terms: Vec<PaymentTerm>,

    #[serde(default)]
    pub expenses: Vec<Expense>,

    #[serde(default)]
    pub members: Vec<ProjectMember>,
}

impl Contract {
    /// Blank contract as offered by the "add" flow.
    pub fn blank(default_vat: Decimal) -> Self {
        Self {
            id: Uuid::nil(),
            code: String::new(),
            sign_date: None,
            customer_name: String::new(),
            content: String::new(),
            software_types: Vec::new(),
            contract_type: String::new(),
            value_pre_vat: Decimal::ZERO,
            vat: default_vat,
            value_post_vat: Decimal::ZERO,
            duration: String::new(),
            status: STATUS_NOT_STARTED.to_string(),
            acceptance_date: None,
            attachments: Vec::new(),
            payment_terms: Vec::new(),
            expenses: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Whether the status means the contract is finished, through the Status master
    /// list first and the legacy literals second.
    pub fn is_completed(&self, statuses: &[GenericRow]) -> bool {
        status::is_completed(&self.status, statuses)
    }

    /// Expenses paired with the contract's current status.
    pub fn expense_rows(&self) -> impl Iterator<Item = (&Expense, &str)> {
        let status = self.status.as_str();
        self.expenses.iter().map(move |expense| (expense, status))
    }

    /// Sum of payment terms already collected, saturating at the `Decimal` bounds.
    pub fn collected_amount(&self) -> Decimal {
        saturating_total(
            self.payment_terms
                .iter()
                .filter(|term| term.is_collected)
                .map(|term| term.value),
        )
    }
}

/// Adds up amounts entered without validation; a total past `Decimal::MAX` (or
/// below `Decimal::MIN`) sticks at that bound instead of panicking.
pub fn saturating_total<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |total, value| total.saturating_add(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    #[test]
    fn test_attachment_from_upload_formats_size_and_type() {
        let file = FileInput::new("Bien_ban.PDF", 1_572_864);
        let attachment = Attachment::from_upload(&file, date());

        assert_eq!(attachment.name, "Bien_ban.PDF");
        assert_eq!(attachment.size, "1.50 MB");
        assert_eq!(attachment.file_type, "pdf");
        assert_eq!(attachment.upload_date, date());
    }

    #[test]
    fn test_attachment_without_extension_defaults_to_file() {
        assert_eq!(Attachment::from_upload(&FileInput::new("README", 10), date()).file_type, "file");
        assert_eq!(Attachment::from_upload(&FileInput::new("draft.", 10), date()).file_type, "file");
        assert_eq!(Attachment::from_upload(&FileInput::new("a.tar.GZ", 0), date()).size, "0.00 MB");
    }

    #[test]
    fn test_expense_rows_follow_contract_status() {
        let mut contract = Contract::blank(Decimal::from(10));
        contract.expenses.push(Expense::new());
        contract.expenses.push(Expense::new());

        contract.status = "IN_PROGRESS".to_string();
        assert!(contract.expense_rows().all(|(_, status)| status == "IN_PROGRESS"));

        contract.status = STATUS_COMPLETED.to_string();
        assert!(contract.expense_rows().all(|(_, status)| status == STATUS_COMPLETED));
    }

    #[test]
    fn test_missing_nested_lists_deserialize_empty() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "code": "HD-01",
            "sign_date": null,
            "customer_name": "VNPT",
            "content": "",
            "contract_type": "",
            "value_pre_vat": 0,
            "vat": 10,
            "value_post_vat": 0,
            "duration": "",
            "status": "NOT_STARTED",
            "acceptance_date": null
        });
        let contract: Contract = serde_json::from_value(json).unwrap();
        assert!(contract.payment_terms.is_empty());
        assert!(contract.expenses.is_empty());
        assert!(contract.members.is_empty());
        assert!(contract.attachments.is_empty());
    }
}
