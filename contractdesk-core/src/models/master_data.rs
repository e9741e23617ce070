use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Master-data categories shown on the shared-categories screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Customers,
    Suppliers,
    Units,
    SoftwareTypes,
    ContractTypes,
    Statuses,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Customers,
        Category::Suppliers,
        Category::Units,
        Category::SoftwareTypes,
        Category::ContractTypes,
        Category::Statuses,
    ];

    /// Whether rows of this category are edited inline as code/name/description rows.
    pub fn is_generic(&self) -> bool {
        !matches!(self, Category::Customers | Category::Suppliers)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Customers => write!(f, "customers"),
            Category::Suppliers => write!(f, "suppliers"),
            Category::Units => write!(f, "units"),
            Category::SoftwareTypes => write!(f, "software_types"),
            Category::ContractTypes => write!(f, "contract_types"),
            Category::Statuses => write!(f, "statuses"),
        }
    }
}

/// Fixed palette for status badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    #[default]
    Gray,
    Blue,
    Green,
    Yellow,
    Red,
}

impl StatusColor {
    pub const PALETTE: [StatusColor; 5] = [
        StatusColor::Gray,
        StatusColor::Blue,
        StatusColor::Green,
        StatusColor::Yellow,
        StatusColor::Red,
    ];

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusColor::Gray => "bg-gray-100 text-gray-800",
            StatusColor::Blue => "bg-blue-100 text-blue-800",
            StatusColor::Green => "bg-green-100 text-green-800",
            StatusColor::Yellow => "bg-yellow-100 text-yellow-800",
            StatusColor::Red => "bg-red-100 text-red-800",
        }
    }
}

/// Row of a generic category (units, software types, contract types, statuses).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericRow {
    pub id: Uuid,

    /// Unique within the category
    pub code: String,

    pub name: String,

    pub description: String,

    /// Only set for the Status category
    pub color: Option<StatusColor>,

    /// Added in this session and not yet committed
    #[serde(default)]
    pub is_new: bool,
}

impl GenericRow {
    pub fn new(code: &str, name: &str, description: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            color: None,
            is_new: false,
        }
    }

    pub fn with_color(mut self, color: StatusColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Blank row for `category`; Status rows start with the default colour.
    pub fn blank(category: Category) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: String::new(),
            name: String::new(),
            description: String::new(),
            color: (category == Category::Statuses).then(StatusColor::default),
            is_new: true,
        }
    }

    pub fn has_code_and_name(&self) -> bool {
        !self.code.is_empty() && !self.name.is_empty()
    }
}

/// Lifecycle of a customer or supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PartyStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    /// Customer group, e.g. "Thường" or "VIP"
    pub group: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub tax_code: String,
    pub address: String,
    pub status: PartyStatus,
}

impl Customer {
    pub const DEFAULT_GROUP: &'static str = "Thường";

    pub fn new(code: &str, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.to_string(),
            name: name.to_string(),
            group: Self::DEFAULT_GROUP.to_string(),
            contact_person: String::new(),
            phone: String::new(),
            email: String::new(),
            tax_code: String::new(),
            address: String::new(),
            status: PartyStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    /// Business field, e.g. "Phần cứng"
    pub field: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub tax_code: String,
    pub address: String,
    pub status: PartyStatus,
}

impl Supplier {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.to_string(),
            name: name.to_string(),
            field: String::new(),
            contact_person: String::new(),
            phone: String::new(),
            email: String::new(),
            tax_code: String::new(),
            address: String::new(),
            status: PartyStatus::Active,
        }
    }
}

/// Shared behaviour of customer and supplier rows.
pub trait Party: Clone {
    /// Prefix of suggested codes, e.g. `KH` for customers.
    const CODE_PREFIX: &'static str;

    fn id(&self) -> Uuid;
    fn code(&self) -> &str;
    fn name(&self) -> &str;
    fn status(&self) -> PartyStatus;
    fn set_status(&mut self, status: PartyStatus);
    /// Group (customers) or field (suppliers).
    fn classification(&self) -> &str;

    /// Suggested code for the `sequence`-th row, e.g. `KH003`.
    fn suggested_code(sequence: usize) -> String {
        format!("{}{:03}", Self::CODE_PREFIX, sequence)
    }
}

impl Party for Customer {
    const CODE_PREFIX: &'static str = "KH";

    fn id(&self) -> Uuid {
        self.id
    }
    fn code(&self) -> &str {
        &self.code
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn status(&self) -> PartyStatus {
        self.status
    }
    fn set_status(&mut self, status: PartyStatus) {
        self.status = status;
    }
    fn classification(&self) -> &str {
        &self.group
    }
}

impl Party for Supplier {
    const CODE_PREFIX: &'static str = "NCC";

    fn id(&self) -> Uuid {
        self.id
    }
    fn code(&self) -> &str {
        &self.code
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn status(&self) -> PartyStatus {
        self.status
    }
    fn set_status(&mut self, status: PartyStatus) {
        self.status = status;
    }
    fn classification(&self) -> &str {
        &self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_codes_are_zero_padded() {
        assert_eq!(Customer::suggested_code(4), "KH004");
        assert_eq!(Supplier::suggested_code(12), "NCC012");
    }

    #[test]
    fn test_blank_status_row_gets_default_color() {
        assert_eq!(GenericRow::blank(Category::Statuses).color, Some(StatusColor::Gray));
        assert_eq!(GenericRow::blank(Category::Units).color, None);
        assert!(GenericRow::blank(Category::Units).is_new);
    }

    #[test]
    fn test_row_requires_code_and_name() {
        assert!(!GenericRow::new("", "Bộ", "").has_code_and_name());
        assert!(!GenericRow::new("BO", "", "").has_code_and_name());
        assert!(GenericRow::new("BO", "Bộ", "").has_code_and_name());
    }
}
