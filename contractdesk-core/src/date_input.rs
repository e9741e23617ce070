//! Fixed `dd/mm/yyyy` text form used by the date widget.

use chrono::NaiveDate;

pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Parses `dd/mm/yyyy`, ignoring surrounding whitespace.
pub fn parse_display_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DISPLAY_FORMAT).ok()
}

pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Date picker value holder.
///
/// Navigating the calendar only changes the pending value; the committed value moves
/// on [`commit`](Self::commit), which is also the only call that reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatePicker {
    committed: Option<NaiveDate>,
    pending: Option<NaiveDate>,
}

impl DatePicker {
    pub fn new(value: Option<NaiveDate>) -> Self {
        Self {
            committed: value,
            pending: value,
        }
    }

    pub fn value(&self) -> Option<NaiveDate> {
        self.committed
    }

    pub fn pick(&mut self, date: Option<NaiveDate>) {
        self.pending = date;
    }

    /// Accepts typed input; unparseable text leaves the pending value alone.
    pub fn type_text(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            self.pending = None;
            return true;
        }
        match parse_display_date(text) {
            Some(date) => {
                self.pending = Some(date);
                true
            }
            None => false,
        }
    }

    /// Confirms the pending value and returns it as the committed value.
    pub fn commit(&mut self) -> Option<NaiveDate> {
        self.committed = self.pending;
        self.committed
    }

    /// Drops the pending value and goes back to the committed one.
    pub fn cancel(&mut self) {
        self.pending = self.committed;
    }
}
