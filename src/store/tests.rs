#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use super::*;
use crate::error::Error;
use crate::models::{Transaction, UnreadableAmount};

// ── SQLite store ──────────────────────────────────────────────

#[test]
fn test_missing_key_is_none() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(store.get(TRANSACTIONS_KEY).unwrap(), None);
}

#[test]
fn test_set_then_get() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.set(DARK_MODE_KEY, "true").unwrap();
    assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
}

#[test]
fn test_set_overwrites() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.set(DARK_MODE_KEY, "true").unwrap();
    store.set(DARK_MODE_KEY, "false").unwrap();
    assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
}

#[test]
fn test_keys_are_independent() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.set(DARK_MODE_KEY, "true").unwrap();
    store.set(TRANSACTIONS_KEY, "[]").unwrap();
    assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
    assert_eq!(store.get(TRANSACTIONS_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_schema_version_recorded() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(store.schema_version().unwrap(), schema::CURRENT_VERSION);
}

#[test]
fn test_empty_version_table_is_initialised() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roxbudget.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE schema_version (version INTEGER NOT NULL);")
            .unwrap();
    }

    let mut store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.schema_version().unwrap(), schema::CURRENT_VERSION);
    store.set(DARK_MODE_KEY, "true").unwrap();
    assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
}

#[test]
fn test_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roxbudget.db");

    {
        let mut store = SqliteStore::open(&path).unwrap();
        store.set(TRANSACTIONS_KEY, r#"[{"descricao":"x"}]"#).unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(
        store.get(TRANSACTIONS_KEY).unwrap().as_deref(),
        Some(r#"[{"descricao":"x"}]"#)
    );
    assert_eq!(store.schema_version().unwrap(), schema::CURRENT_VERSION);
}

// ── Memory store ──────────────────────────────────────────────

#[test]
fn test_memory_store_roundtrip() {
    let mut store = MemoryStore::new();
    assert_eq!(store.get("k").unwrap(), None);
    store.set("k", "v").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
}

// ── Codec ─────────────────────────────────────────────────────

#[test]
fn test_decode_reference_shape() {
    let raw = r#"[
        {"descricao":"Salary","valor":1000,"categoria":"Income","data":"2024-03-05"},
        {"descricao":"Rent","valor":-400.5,"categoria":"Housing","data":"2024-03-10T09:00:00.000Z"}
    ]"#;
    let txns = decode_transactions(raw).unwrap();
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[0].description, "Salary");
    assert_eq!(txns[0].amount, dec!(1000));
    assert_eq!(txns[0].category, "Income");
    assert_eq!(txns[0].date, "2024-03-05");
    assert_eq!(txns[1].amount, dec!(-400.5));
    assert_eq!(txns[1].date, "2024-03-10T09:00:00.000Z");
    assert!(txns.iter().all(|t| t.id.is_none()));
}

#[test]
fn test_decode_missing_text_fields_default_to_empty() {
    let txns = decode_transactions(r#"[{"valor":-3}]"#).unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].description, "");
    assert_eq!(txns[0].category, "");
    assert_eq!(txns[0].date, "");
}

#[test]
fn test_non_numeric_amounts_survive_rewrite() {
    let raw = r#"[{"descricao":"ok","valor":-1,"categoria":"","data":""},{"descricao":"nan","valor":null,"categoria":"","data":""},{"descricao":"text","valor":"12","categoria":"","data":""},{"descricao":"missing","categoria":"","data":""}]"#;
    let txns = decode_transactions(raw).unwrap();
    assert_eq!(txns.len(), 4);
    assert_eq!(txns[0].unreadable_amount, None);
    assert_eq!(
        txns[1].unreadable_amount,
        Some(UnreadableAmount::Stored(Value::Null))
    );
    assert_eq!(
        txns[2].unreadable_amount,
        Some(UnreadableAmount::Stored(json!("12")))
    );
    assert_eq!(txns[3].unreadable_amount, Some(UnreadableAmount::Missing));
    assert!(txns[1..].iter().all(|t| t.amount == Decimal::ZERO));

    let rewritten: Value = serde_json::from_str(&encode_transactions(&txns).unwrap()).unwrap();
    let original: Value = serde_json::from_str(raw).unwrap();
    assert_eq!(rewritten, original);
}

#[test]
fn test_entering_an_amount_replaces_unreadable_value() {
    let mut txns =
        decode_transactions(r#"[{"descricao":"nan","valor":null,"categoria":"","data":""}]"#)
            .unwrap();
    txns[0].set_amount(dec!(-7.5));
    let rewritten: Value = serde_json::from_str(&encode_transactions(&txns).unwrap()).unwrap();
    assert_eq!(rewritten[0]["valor"], json!(-7.5));
}

#[test]
fn test_high_precision_amount_roundtrip() {
    let amount = crate::form::parse_amount("1234567890.123456789").unwrap();
    let txns = vec![
        Transaction::new("Big".into(), amount, "Income".into(), "2024-03-01".into()),
        Transaction::new("Max".into(), dec!(-999999999999.99), "Lazer".into(), "2024-03-02".into()),
        Transaction::new("Cents".into(), dec!(0.07), "Comida".into(), "2024-03-03".into()),
    ];
    let decoded = decode_transactions(&encode_transactions(&txns).unwrap()).unwrap();
    assert_eq!(decoded, txns);
    assert_eq!(decoded[0].amount, dec!(1234567890.12));
}

#[test]
fn test_decode_corrupt_is_read_failure() {
    for raw in ["{not json", r#"{"descricao":"x"}"#, "42", ""] {
        let err = decode_transactions(raw).unwrap_err();
        assert!(matches!(err, Error::PersistenceRead(_)), "{raw}: {err:?}");
    }
}

#[test]
fn test_encode_field_names_and_numbers() {
    let txns = vec![
        Transaction::new("Rent".into(), dec!(-400.00), "Housing".into(), "2024-03-10".into()),
        Transaction::new("Tip".into(), dec!(12.34), "Lazer".into(), "2024-03-11".into()),
    ];
    let encoded: Value = serde_json::from_str(&encode_transactions(&txns).unwrap()).unwrap();
    assert_eq!(
        encoded,
        json!([
            {"descricao": "Rent", "valor": -400, "categoria": "Housing", "data": "2024-03-10"},
            {"descricao": "Tip", "valor": 12.34, "categoria": "Lazer", "data": "2024-03-11"}
        ])
    );
}

#[test]
fn test_unknown_fields_survive_rewrite() {
    let raw = r#"[{"descricao":"Bus","valor":-4.4,"categoria":"Transporte","data":"2024-05-02","nota":"card","tags":["a"]}]"#;
    let txns = decode_transactions(raw).unwrap();
    assert_eq!(txns[0].extra.get("nota"), Some(&json!("card")));

    let rewritten: Value = serde_json::from_str(&encode_transactions(&txns).unwrap()).unwrap();
    let original: Value = serde_json::from_str(raw).unwrap();
    assert_eq!(rewritten, original);
}

#[test]
fn test_encode_empty_list() {
    assert_eq!(encode_transactions(&[]).unwrap(), "[]");
}
