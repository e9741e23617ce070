//! Display resolution for contract status codes.
//!
//! Lookup order: the live Status master list (by code or id), then the legacy
//! literal values older contracts still carry, then the raw code itself.

use serde::Serialize;

use crate::models::{GenericRow, StatusColor, STATUS_COMPLETED};

/// What a status badge shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLabel {
    pub name: String,
    pub color: StatusColor,
    /// Which lookup tier produced the label
    pub source: StatusSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusSource {
    MasterData,
    Legacy,
    Unknown,
}

/// Literal status values stored before statuses became master data.
const LEGACY_STATUSES: [(&str, &str, StatusColor); 5] = [
    ("not_started", "Chưa thực hiện", StatusColor::Gray),
    ("in_progress", "Đang thực hiện", StatusColor::Blue),
    ("completed", "Hoàn thành", StatusColor::Green),
    ("paused", "Tạm dừng", StatusColor::Yellow),
    ("cancelled", "Đã hủy", StatusColor::Red),
];

/// Legacy literal that marks a finished contract.
const LEGACY_COMPLETED: &str = "completed";

fn master_row<'a>(code: &str, statuses: &'a [GenericRow]) -> Option<&'a GenericRow> {
    statuses
        .iter()
        .find(|row| row.code == code || row.id.to_string() == code)
}

fn legacy_entry(code: &str) -> Option<&'static (&'static str, &'static str, StatusColor)> {
    LEGACY_STATUSES
        .iter()
        .find(|(literal, name, _)| literal.eq_ignore_ascii_case(code) || *name == code)
}

/// Resolves against the Status master list only.
pub fn lookup_master(code: &str, statuses: &[GenericRow]) -> Option<StatusLabel> {
    master_row(code, statuses).map(|row| StatusLabel {
        name: row.name.clone(),
        color: row.color.unwrap_or_default(),
        source: StatusSource::MasterData,
    })
}

/// Resolves against the legacy literals only. Matching ignores case, so `Completed` and
/// `COMPLETED` both hit.
pub fn lookup_legacy(code: &str) -> Option<StatusLabel> {
    legacy_entry(code).map(|(_, name, color)| StatusLabel {
        name: name.to_string(),
        color: *color,
        source: StatusSource::Legacy,
    })
}

/// Whether `code` marks a finished contract, resolved in the same order as
/// [`resolve_status`]: a master row counts when its code is `COMPLETED`, otherwise
/// the legacy `completed` literal (or its display name) counts.
pub fn is_completed(code: &str, statuses: &[GenericRow]) -> bool {
    match master_row(code, statuses) {
        Some(row) => row.code == STATUS_COMPLETED,
        None => legacy_entry(code).is_some_and(|(literal, _, _)| *literal == LEGACY_COMPLETED),
    }
}

/// Label for any status code. Unknown codes are shown as-is in gray.
pub fn resolve_status(code: &str, statuses: &[GenericRow]) -> StatusLabel {
    lookup_master(code, statuses)
        .or_else(|| lookup_legacy(code))
        .unwrap_or_else(|| StatusLabel {
            name: code.to_string(),
            color: StatusColor::Gray,
            source: StatusSource::Unknown,
        })
}
