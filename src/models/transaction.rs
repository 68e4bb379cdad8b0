use chrono::{DateTime, Datelike, Month, NaiveDate};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

/// Session-stable handle for a record. Assigned by the repository on load and
/// on append, never written to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub(crate) u64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What sat under `valor` when it wasn't a number. Written back as found.
#[derive(Debug, Clone, PartialEq)]
pub enum UnreadableAmount {
    Missing,
    Stored(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Option<RecordId>,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    /// Kept exactly as stored: `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub date: String,
    /// Fields of the stored object we don't model, written back untouched.
    pub extra: Map<String, Value>,
    /// Set when the stored amount isn't a number. `amount` is zero then, so
    /// the record counts toward nothing until an amount is entered.
    pub unreadable_amount: Option<UnreadableAmount>,
}

impl Transaction {
    pub fn new(description: String, amount: Decimal, category: String, date: String) -> Self {
        Self {
            id: None,
            description,
            amount,
            category,
            date,
            extra: Map::new(),
            unreadable_amount: None,
        }
    }

    pub fn set_amount(&mut self, amount: Decimal) {
        self.amount = amount;
        self.unreadable_amount = None;
    }

    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }

    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Month of the year the record falls in, or `None` when the date is unreadable.
    pub fn month(&self) -> Option<Month> {
        let date = self.calendar_date()?;
        Month::try_from(date.month() as u8).ok()
    }
}

/// Read the calendar date out of a stored date string, as written (no timezone shift).
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    let head = text.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
