use crate::error::{Error, Result};
use crate::models::{RecordId, Transaction};
use crate::store::{decode_transactions, encode_transactions, KeyValueStore, TRANSACTIONS_KEY};

/// Owns the session's ordered list of transactions and writes the whole list
/// back to the store after every change.
pub(crate) struct TransactionRepository {
    store: Box<dyn KeyValueStore>,
    records: Vec<Transaction>,
    next_id: u64,
}

impl TransactionRepository {
    /// Load the stored list. Missing or unreadable data yields an empty list.
    pub(crate) fn load(store: Box<dyn KeyValueStore>) -> Self {
        let stored = read_records(store.as_ref());
        let mut repo = Self {
            store,
            records: Vec::with_capacity(stored.len()),
            next_id: 1,
        };
        for mut txn in stored {
            txn.id = Some(repo.allocate_id());
            repo.records.push(txn);
        }
        tracing::debug!(count = repo.records.len(), "loaded transactions");
        repo
    }

    pub(crate) fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|t| t.id == Some(id))
    }

    pub(crate) fn get(&self, id: RecordId) -> Option<&Transaction> {
        self.records.iter().find(|t| t.id == Some(id))
    }

    pub(crate) fn append(&mut self, mut txn: Transaction) -> Result<RecordId> {
        let id = self.allocate_id();
        txn.id = Some(id);
        tracing::info!(%id, amount = %txn.amount, category = %txn.category, "adding transaction");
        self.records.push(txn);
        self.commit()?;
        Ok(id)
    }

    /// Overwrite the record at `index`. The new record inherits the old one's
    /// id, and its stored extra fields when it carries none of its own.
    pub(crate) fn replace_at(&mut self, index: usize, mut txn: Transaction) -> Result<()> {
        let len = self.records.len();
        let slot = self
            .records
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        txn.id = slot.id;
        if txn.extra.is_empty() {
            txn.extra = std::mem::take(&mut slot.extra);
        }
        tracing::info!(index, amount = %txn.amount, "replacing transaction");
        *slot = txn;
        self.commit()
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Result<Transaction> {
        let len = self.records.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        let removed = self.records.remove(index);
        tracing::info!(index, description = %removed.description, "removed transaction");
        self.commit()?;
        Ok(removed)
    }

    pub(crate) fn replace(&mut self, id: RecordId, txn: Transaction) -> Result<()> {
        let index = self.position(id).ok_or(Error::UnknownRecord(id))?;
        self.replace_at(index, txn)
    }

    pub(crate) fn remove(&mut self, id: RecordId) -> Result<Transaction> {
        let index = self.position(id).ok_or(Error::UnknownRecord(id))?;
        self.remove_at(index)
    }

    /// Rewrite the full list to the store. On failure the in-memory list is
    /// left as is so the session can carry on.
    pub(crate) fn commit(&mut self) -> Result<()> {
        let encoded = encode_transactions(&self.records)?;
        if let Err(e) = self.store.set(TRANSACTIONS_KEY, &encoded) {
            tracing::error!(error = %e, "failed to persist transactions");
            return Err(e);
        }
        tracing::debug!(count = self.records.len(), bytes = encoded.len(), "persisted transactions");
        Ok(())
    }

    pub(crate) fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub(crate) fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        self.store.as_mut()
    }

    fn allocate_id(&mut self) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Read the persisted list, treating absent or corrupt data as empty.
pub(crate) fn read_records(store: &dyn KeyValueStore) -> Vec<Transaction> {
    let raw = match store.get(TRANSACTIONS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read stored transactions, starting empty");
            return Vec::new();
        }
    };
    decode_transactions(&raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "stored transactions are corrupt, starting empty");
        Vec::new()
    })
}

#[cfg(test)]
mod tests;
