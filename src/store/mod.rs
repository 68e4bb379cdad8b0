mod codec;
mod schema;
mod sqlite;

use crate::error::Result;

pub(crate) use codec::{decode_transactions, encode_transactions};
pub(crate) use sqlite::SqliteStore;

/// Key holding the JSON array of transaction records.
pub(crate) const TRANSACTIONS_KEY: &str = "transacoes";
/// Key holding the `"true"`/`"false"` theme flag.
pub(crate) const DARK_MODE_KEY: &str = "darkMode";

/// Synchronous string key-value storage. An absent key is `Ok(None)`; callers
/// substitute their own default.
pub(crate) trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    values: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests;
