use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::{RecordId, Transaction};
use crate::repository::TransactionRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormMode {
    Creating,
    Editing(RecordId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Description,
    Amount,
    Category,
    Date,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[Self::Description, Self::Amount, Self::Category, Self::Date]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Date => "Date",
        }
    }
}

/// Text state of the add/edit form. Nothing is parsed until `submit`.
#[derive(Debug, Clone)]
pub(crate) struct EntryForm {
    pub(crate) mode: FormMode,
    pub(crate) focus: FormField,
    pub(crate) description: String,
    pub(crate) amount: String,
    pub(crate) category: String,
    pub(crate) date: String,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryForm {
    pub(crate) fn new() -> Self {
        Self {
            mode: FormMode::Creating,
            focus: FormField::Description,
            description: String::new(),
            amount: String::new(),
            category: String::new(),
            date: String::new(),
        }
    }

    pub(crate) fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Editing(_))
    }

    /// Seed the form with an existing record and switch to editing it.
    pub(crate) fn edit(&mut self, repo: &TransactionRepository, id: RecordId) -> Result<()> {
        let txn = repo.get(id).ok_or(Error::UnknownRecord(id))?;
        self.mode = FormMode::Editing(id);
        self.focus = FormField::Description;
        self.description = txn.description.clone();
        self.amount = match txn.unreadable_amount {
            Some(_) => String::new(),
            None => txn.amount.normalize().to_string(),
        };
        self.category = txn.category.clone();
        self.date = txn.date.clone();
        Ok(())
    }

    pub(crate) fn cancel(&mut self) {
        *self = Self::new();
    }

    /// Validate, then append (creating) or replace (editing). On success the form
    /// is cleared and back in `Creating`; on error it is left untouched.
    pub(crate) fn submit(
        &mut self,
        repo: &mut TransactionRepository,
        now: DateTime<Utc>,
    ) -> Result<RecordId> {
        let txn = self.to_transaction(now)?;
        let id = match self.mode {
            FormMode::Creating => repo.append(txn)?,
            FormMode::Editing(id) => {
                repo.replace(id, txn)?;
                id
            }
        };
        *self = Self::new();
        Ok(id)
    }

    pub(crate) fn to_transaction(&self, now: DateTime<Utc>) -> Result<Transaction> {
        let amount = parse_amount(&self.amount)?;
        let date = normalize_date(&self.date, now)?;
        Ok(Transaction::new(
            self.description.clone(),
            amount,
            self.category.clone(),
            date,
        ))
    }

    pub(crate) fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Description => &self.description,
            FormField::Amount => &self.amount,
            FormField::Category => &self.category,
            FormField::Date => &self.date,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Description => &mut self.description,
            FormField::Amount => &mut self.amount,
            FormField::Category => &mut self.category,
            FormField::Date => &mut self.date,
        }
    }

    pub(crate) fn push_char(&mut self, c: char) {
        let focus = self.focus;
        self.field_mut(focus).push(c);
    }

    pub(crate) fn pop_char(&mut self) {
        let focus = self.focus;
        self.field_mut(focus).pop();
    }

    pub(crate) fn next_field(&mut self) {
        let fields = FormField::all();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + 1) % fields.len()];
    }

    pub(crate) fn prev_field(&mut self) {
        let fields = FormField::all();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + fields.len() - 1) % fields.len()];
    }
}

/// Largest magnitude accepted from the user, in whole currency units.
const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Parse a user-typed amount, rounded to cents. Magnitudes above
/// `MAX_AMOUNT` are refused; within that range every value survives the
/// f64 it is stored as.
pub(crate) fn parse_amount(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidAmount(input.to_string()));
    }
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| Error::InvalidAmount(input.to_string()))?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if amount.abs() > Decimal::from(MAX_AMOUNT) {
        return Err(Error::InvalidAmount(input.to_string()));
    }
    Ok(amount)
}

/// An empty date means "now" as an ISO-8601 UTC timestamp with milliseconds.
pub(crate) fn normalize_date(input: &str, now: DateTime<Utc>) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(now.to_rfc3339_opts(SecondsFormat::Millis, true));
    }
    if NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(trimmed).is_ok()
    {
        return Ok(trimmed.to_string());
    }
    Err(Error::InvalidDate(input.to_string()))
}
