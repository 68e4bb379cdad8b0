#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::store::MemoryStore;

fn txn(description: &str, amount: Decimal, category: &str, date: &str) -> Transaction {
    Transaction::new(description.into(), amount, category.into(), date.into())
}

fn seeded_repo() -> TransactionRepository {
    let mut repo = TransactionRepository::load(Box::new(MemoryStore::new()));
    repo.append(txn("Salary", dec!(1000), "Income", "2024-03-05")).unwrap();
    repo.append(txn("Rent", dec!(-400), "Housing", "2024-03-10")).unwrap();
    repo.append(txn("Cinema", dec!(-30), "Lazer", "2024-04-02")).unwrap();
    repo
}

fn descriptions(txns: &[Transaction]) -> Vec<&str> {
    txns.iter().map(|t| t.description.as_str()).collect()
}

/// Store whose writes always fail, for exercising commit errors.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::PersistenceWrite("quota exceeded".into()))
    }
}

/// Store whose reads always fail.
struct UnreadableStore;

impl KeyValueStore for UnreadableStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::PersistenceRead("disk I/O error".into()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }
}

// ── Loading ───────────────────────────────────────────────────

#[test]
fn test_load_empty_store() {
    let repo = TransactionRepository::load(Box::new(MemoryStore::new()));
    assert!(repo.is_empty());
}

#[test]
fn test_load_corrupt_value_is_empty() {
    let store = MemoryStore::with_value(TRANSACTIONS_KEY, "[{\"descricao\":");
    let repo = TransactionRepository::load(Box::new(store));
    assert!(repo.is_empty());
}

#[test]
fn test_load_read_error_is_empty() {
    let repo = TransactionRepository::load(Box::new(UnreadableStore));
    assert!(repo.is_empty());
}

#[test]
fn test_load_assigns_sequential_ids() {
    let store = MemoryStore::with_value(
        TRANSACTIONS_KEY,
        r#"[{"descricao":"a","valor":1,"categoria":"","data":""},{"descricao":"b","valor":-2,"categoria":"","data":""}]"#,
    );
    let repo = TransactionRepository::load(Box::new(store));
    let ids: Vec<_> = repo.records().iter().map(|t| t.id).collect();
    assert_eq!(ids, [Some(RecordId(1)), Some(RecordId(2))]);
}

#[test]
fn test_persist_then_load_preserves_order() {
    let repo = seeded_repo();
    let raw = repo.store().get(TRANSACTIONS_KEY).unwrap().unwrap();

    let reloaded = TransactionRepository::load(Box::new(MemoryStore::with_value(
        TRANSACTIONS_KEY,
        &raw,
    )));
    assert_eq!(reloaded.records(), repo.records());
}

#[test]
fn test_unreadable_amount_survives_append() {
    let store = MemoryStore::with_value(
        TRANSACTIONS_KEY,
        r#"[{"descricao":"Typo","valor":null,"categoria":"Lazer","data":"2024-03-01"},{"descricao":"b","valor":-2,"categoria":"","data":""}]"#,
    );
    let mut repo = TransactionRepository::load(Box::new(store));
    assert_eq!(repo.len(), 2);

    repo.append(txn("c", dec!(-3), "", "")).unwrap();

    let raw = repo.store().get(TRANSACTIONS_KEY).unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[0]["descricao"], "Typo");
    assert!(stored[0]["valor"].is_null());
    assert_eq!(descriptions(&read_records(repo.store())), ["Typo", "b", "c"]);
}

// ── Append ────────────────────────────────────────────────────

#[test]
fn test_append_persists_full_list() {
    let mut repo = seeded_repo();
    let id = repo
        .append(txn("Bus", dec!(-4.40), "Transporte", "2024-03-12"))
        .unwrap();

    assert_eq!(repo.len(), 4);
    assert_eq!(repo.records()[3].id, Some(id));

    let stored = read_records(repo.store());
    assert_eq!(descriptions(&stored), ["Salary", "Rent", "Cinema", "Bus"]);
    assert_eq!(stored[3].amount, dec!(-4.4));
}

#[test]
fn test_append_ids_are_never_reused() {
    let mut repo = seeded_repo();
    let last = repo.records()[2].id.unwrap();
    repo.remove(last).unwrap();
    let id = repo.append(txn("New", dec!(1), "", "")).unwrap();
    assert_ne!(id, last);
}

#[test]
fn test_append_then_remove_restores_prior_state() {
    let mut repo = seeded_repo();
    let before = repo.records().to_vec();
    let before_raw = repo.store().get(TRANSACTIONS_KEY).unwrap();

    repo.append(txn("Oops", dec!(-1), "Comida", "2024-03-01")).unwrap();
    repo.remove_at(repo.len() - 1).unwrap();

    assert_eq!(repo.records(), before.as_slice());
    assert_eq!(repo.store().get(TRANSACTIONS_KEY).unwrap(), before_raw);
}

// ── Replace ───────────────────────────────────────────────────

#[test]
fn test_replace_at_changes_exactly_one_record() {
    let mut repo = seeded_repo();
    let before = read_records(repo.store());

    repo.replace_at(1, txn("Rent (June)", dec!(-450), "Housing", "2024-06-10"))
        .unwrap();

    let after = read_records(repo.store());
    assert_eq!(after.len(), before.len());
    let changed: Vec<usize> = (0..after.len()).filter(|&i| after[i] != before[i]).collect();
    assert_eq!(changed, [1]);
    assert_eq!(after[1].description, "Rent (June)");
    assert_eq!(after[1].amount, dec!(-450));
}

#[test]
fn test_replace_at_keeps_id() {
    let mut repo = seeded_repo();
    let id = repo.records()[0].id;
    repo.replace_at(0, txn("Bonus", dec!(50), "Income", "2024-03-20"))
        .unwrap();
    assert_eq!(repo.records()[0].id, id);
}

#[test]
fn test_replace_at_keeps_unknown_stored_fields() {
    let store = MemoryStore::with_value(
        TRANSACTIONS_KEY,
        r#"[{"descricao":"Bus","valor":-4.4,"categoria":"Transporte","data":"2024-05-02","nota":"card"}]"#,
    );
    let mut repo = TransactionRepository::load(Box::new(store));
    repo.replace_at(0, txn("Train", dec!(-6), "Transporte", "2024-05-02"))
        .unwrap();

    let stored = read_records(repo.store());
    assert_eq!(stored[0].description, "Train");
    assert_eq!(stored[0].extra.get("nota"), Some(&serde_json::json!("card")));
}

#[test]
fn test_replace_at_out_of_range() {
    let mut repo = seeded_repo();
    let before_raw = repo.store().get(TRANSACTIONS_KEY).unwrap();

    let err = repo.replace_at(3, txn("x", dec!(1), "", "")).unwrap_err();
    assert_eq!(err, Error::IndexOutOfRange { index: 3, len: 3 });
    assert_eq!(repo.store().get(TRANSACTIONS_KEY).unwrap(), before_raw);
}

#[test]
fn test_replace_by_id() {
    let mut repo = seeded_repo();
    let id = repo.records()[2].id.unwrap();
    repo.replace(id, txn("Theatre", dec!(-45), "Lazer", "2024-04-02"))
        .unwrap();
    assert_eq!(repo.get(id).unwrap().description, "Theatre");
    assert_eq!(repo.position(id), Some(2));
}

#[test]
fn test_replace_unknown_id() {
    let mut repo = seeded_repo();
    let err = repo
        .replace(RecordId(99), txn("x", dec!(1), "", ""))
        .unwrap_err();
    assert_eq!(err, Error::UnknownRecord(RecordId(99)));
}

// ── Remove ────────────────────────────────────────────────────

#[test]
fn test_remove_at_shifts_and_preserves_order() {
    let mut repo = seeded_repo();
    let removed = repo.remove_at(1).unwrap();

    assert_eq!(removed.description, "Rent");
    assert_eq!(repo.len(), 2);
    assert_eq!(descriptions(repo.records()), ["Salary", "Cinema"]);
    assert_eq!(descriptions(&read_records(repo.store())), ["Salary", "Cinema"]);
}

#[test]
fn test_remove_at_out_of_range() {
    let mut repo = seeded_repo();
    assert_eq!(
        repo.remove_at(7).unwrap_err(),
        Error::IndexOutOfRange { index: 7, len: 3 }
    );
    assert_eq!(repo.len(), 3);
}

#[test]
fn test_remove_at_on_empty() {
    let mut repo = TransactionRepository::load(Box::new(MemoryStore::new()));
    assert_eq!(
        repo.remove_at(0).unwrap_err(),
        Error::IndexOutOfRange { index: 0, len: 0 }
    );
}

#[test]
fn test_remove_by_id_twice() {
    let mut repo = seeded_repo();
    let id = repo.records()[0].id.unwrap();
    repo.remove(id).unwrap();
    assert_eq!(repo.remove(id).unwrap_err(), Error::UnknownRecord(id));
    assert!(repo.get(id).is_none());
}

// ── Write failures ────────────────────────────────────────────

#[test]
fn test_write_failure_keeps_memory_state() {
    let mut repo = TransactionRepository::load(Box::new(ReadOnlyStore));
    let err = repo
        .append(txn("Lunch", dec!(-25), "Comida", "2024-03-02"))
        .unwrap_err();

    assert!(matches!(err, Error::PersistenceWrite(_)));
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.records()[0].description, "Lunch");
}

#[test]
fn test_failed_writes_accumulate_in_memory() {
    let mut repo = TransactionRepository::load(Box::new(ReadOnlyStore));
    let _ = repo.append(txn("a", dec!(1), "", ""));
    let _ = repo.append(txn("b", dec!(2), "", ""));
    assert_eq!(repo.len(), 2);
    assert!(repo.commit().is_err());
}
