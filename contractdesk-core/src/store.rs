//! Canonical in-memory collections for one running session.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::models::{
    AuditLogEntry, Category, Contract, Customer, GenericRow, PermissionNode, Supplier, SystemUser,
    UserGroup,
};

/// Shared reference lists maintained on the master-data screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MasterData {
    pub customers: Vec<Customer>,
    pub suppliers: Vec<Supplier>,
    pub units: Vec<GenericRow>,
    pub software_types: Vec<GenericRow>,
    pub contract_types: Vec<GenericRow>,
    pub statuses: Vec<GenericRow>,
}

impl MasterData {
    /// Rows of a generic category; `None` for customers and suppliers.
    pub fn generic(&self, category: Category) -> Option<&Vec<GenericRow>> {
        match category {
            Category::Units => Some(&self.units),
            Category::SoftwareTypes => Some(&self.software_types),
            Category::ContractTypes => Some(&self.contract_types),
            Category::Statuses => Some(&self.statuses),
            Category::Customers | Category::Suppliers => None,
        }
    }

    pub fn generic_mut(&mut self, category: Category) -> Option<&mut Vec<GenericRow>> {
        match category {
            Category::Units => Some(&mut self.units),
            Category::SoftwareTypes => Some(&mut self.software_types),
            Category::ContractTypes => Some(&mut self.contract_types),
            Category::Statuses => Some(&mut self.statuses),
            Category::Customers | Category::Suppliers => None,
        }
    }

    pub fn supplier_name(&self, supplier_id: &str) -> Option<&str> {
        self.suppliers
            .iter()
            .find(|s| s.id.to_string() == supplier_id || s.code == supplier_id)
            .map(|s| s.name.as_str())
    }
}

/// Filter for the contract list.
#[derive(Debug, Clone, Default)]
pub struct ContractQuery {
    /// Case-insensitive match on code, customer or content
    pub search: Option<String>,
    /// Exact status code
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    /// Newest first
    pub contracts: Vec<Contract>,
    /// Contract highlighted in the list
    pub selected_contract: Option<Uuid>,
    pub master: MasterData,
    pub users: Vec<SystemUser>,
    pub groups: Vec<UserGroup>,
    pub permissions: Vec<PermissionNode>,
    pub audit_log: Vec<AuditLogEntry>,
}

impl EntityStore {
    pub fn contract(&self, id: Uuid) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.id == id)
    }

    /// Marks `id` as the selected contract. Returns `false` if it is not stored.
    pub fn select_contract(&mut self, id: Uuid) -> bool {
        if self.contract(id).is_some() {
            self.selected_contract = Some(id);
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<&Contract> {
        self.selected_contract.and_then(|id| self.contract(id))
    }

    /// Replaces the stored contract with the same id. Returns `false` if none matched.
    pub fn replace_contract(&mut self, contract: Contract) -> bool {
        match self.contracts.iter_mut().find(|c| c.id == contract.id) {
            Some(slot) => {
                info!("Updated contract {} ({})", contract.code, contract.id);
                *slot = contract;
                true
            }
            None => false,
        }
    }

    /// Stores a new contract at the top of the list and selects it.
    pub fn insert_contract(&mut self, contract: Contract) {
        info!("Created contract {} ({})", contract.code, contract.id);
        self.selected_contract = Some(contract.id);
        self.contracts.insert(0, contract);
    }

    /// Contracts matching every set criterion of `query`, newest first.
    pub fn search_contracts(&self, query: &ContractQuery) -> Vec<&Contract> {
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        self.contracts
            .iter()
            .filter(|c| match &needle {
                Some(needle) => [&c.code, &c.customer_name, &c.content]
                    .iter()
                    .any(|field| field.to_lowercase().contains(needle)),
                None => true,
            })
            .filter(|c| query.status.as_ref().map_or(true, |s| &c.status == s))
            .collect()
    }
}
