use rust_decimal::Decimal;

use crate::models::RecordId;

/// Errors raised by the ledger core: the store, the repository, the entry form and
/// the goal tracker. Terminal and CLI plumbing wraps these in `anyhow`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Failed to read stored data: {0}")]
    PersistenceRead(String),
    #[error("Failed to save data: {0}")]
    PersistenceWrite(String),
    #[error("No transaction at position {index} (there are {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Transaction {0} no longer exists")]
    UnknownRecord(RecordId),
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),
    #[error("Invalid date: '{0}' (use YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Invalid goal for '{category}': limit must be positive, got {limit}")]
    InvalidGoalConfiguration { category: String, limit: Decimal },
}

pub type Result<T> = std::result::Result<T, Error>;
