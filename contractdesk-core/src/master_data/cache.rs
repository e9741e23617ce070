use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Category, Customer, GenericRow, Supplier};
use crate::store::MasterData;

/// Working rows of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum CategoryRows {
    Generic(Vec<GenericRow>),
    Customers(Vec<Customer>),
    Suppliers(Vec<Supplier>),
}

impl CategoryRows {
    /// Copy of the committed rows for `category`.
    pub fn baseline(category: Category, master: &MasterData) -> Self {
        match category {
            Category::Customers => CategoryRows::Customers(master.customers.clone()),
            Category::Suppliers => CategoryRows::Suppliers(master.suppliers.clone()),
            generic => CategoryRows::Generic(master.generic(generic).cloned().unwrap_or_default()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CategoryRows::Generic(rows) => rows.len(),
            CategoryRows::Customers(rows) => rows.len(),
            CategoryRows::Suppliers(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a row with `row_id` is in this list.
    pub fn contains_id(&self, row_id: Uuid) -> bool {
        match self {
            CategoryRows::Generic(rows) => rows.iter().any(|r| r.id == row_id),
            CategoryRows::Customers(rows) => rows.iter().any(|r| r.id == row_id),
            CategoryRows::Suppliers(rows) => rows.iter().any(|r| r.id == row_id),
        }
    }

    /// Writes these rows over the committed list for `category`.
    pub fn commit_to(&self, category: Category, master: &mut MasterData) {
        match self {
            CategoryRows::Customers(rows) => master.customers = rows.clone(),
            CategoryRows::Suppliers(rows) => master.suppliers = rows.clone(),
            CategoryRows::Generic(rows) => {
                if let Some(target) = master.generic_mut(category) {
                    *target = rows.clone();
                }
            }
        }
    }
}

/// Per-session snapshots of category working lists.
///
/// Lives as long as the login session; dropping it loses every unsaved edit.
#[derive(Debug, Clone, Default)]
pub struct SessionCache {
    entries: HashMap<Category, CategoryRows>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> Option<&CategoryRows> {
        self.entries.get(&category)
    }

    /// Stores a copy of `rows`, replacing the previous snapshot.
    pub fn put(&mut self, category: Category, rows: &CategoryRows) {
        debug!("Caching {} rows for {}", rows.len(), category);
        self.entries.insert(category, rows.clone());
    }

    pub fn contains(&self, category: Category) -> bool {
        self.entries.contains_key(&category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
