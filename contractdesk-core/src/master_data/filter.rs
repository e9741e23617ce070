use serde::{Deserialize, Serialize};

use crate::models::{GenericRow, Party, PartyStatus};

/// List filters on the master-data screen. The default matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    /// Case-insensitive substring of code or name
    pub search: String,
    pub status: Option<PartyStatus>,
    /// Customer group or supplier field, exact match
    pub classification: Option<String>,
}

impl Filters {
    fn matches_text(&self, code: &str, name: &str) -> bool {
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || code.to_lowercase().contains(&needle)
            || name.to_lowercase().contains(&needle)
    }

    pub fn matches_party<T: Party>(&self, row: &T) -> bool {
        self.matches_text(row.code(), row.name())
            && self.status.map_or(true, |s| row.status() == s)
            && self
                .classification
                .as_deref()
                .map_or(true, |c| row.classification() == c)
    }

    pub fn matches_generic(&self, row: &GenericRow) -> bool {
        self.matches_text(&row.code, &row.name)
    }
}

pub fn filter_parties<'a, T: Party>(rows: &'a [T], filters: &Filters) -> Vec<&'a T> {
    rows.iter().filter(|row| filters.matches_party(*row)).collect()
}

pub fn filter_generic<'a>(rows: &'a [GenericRow], filters: &Filters) -> Vec<&'a GenericRow> {
    rows.iter().filter(|row| filters.matches_generic(row)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Customer;

    fn customers() -> Vec<Customer> {
        let mut vip = Customer::new("KH001", "VNPT Hà Nội");
        vip.group = "VIP".to_string();
        let mut inactive = Customer::new("KH002", "Bưu điện Hà Nội");
        inactive.status = PartyStatus::Inactive;
        vec![vip, inactive, Customer::new("KH003", "Sở Tài chính")]
    }

    #[test]
    fn test_default_filters_match_everything() {
        assert_eq!(filter_parties(&customers(), &Filters::default()).len(), 3);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let rows = customers();
        let by_name = Filters {
            search: "hà nội".to_string(),
            ..Filters::default()
        };
        assert_eq!(filter_parties(&rows, &by_name).len(), 2);

        let active_vip = Filters {
            search: "hà nội".to_string(),
            status: Some(PartyStatus::Active),
            classification: Some("VIP".to_string()),
        };
        let hits = filter_parties(&rows, &active_vip);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "KH001");

        let by_code = Filters {
            search: "kh003".to_string(),
            ..Filters::default()
        };
        assert_eq!(filter_parties(&rows, &by_code)[0].name, "Sở Tài chính");
    }
}
