//! JSON shape of the persisted transaction list:
//! `[{"descricao": "...", "valor": -12.5, "categoria": "...", "data": "..."}, ...]`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::{Transaction, UnreadableAmount};

#[derive(Debug, Serialize, Deserialize)]
struct StoredRecord {
    #[serde(rename = "descricao", default)]
    description: String,
    #[serde(
        rename = "valor",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    amount: Option<Value>,
    #[serde(rename = "categoria", default)]
    category: String,
    #[serde(rename = "data", default)]
    date: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// `Some` whenever the key is there, so an explicit `null` isn't read as missing.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Parse the stored list. A record whose amount isn't a number is kept with
/// its raw `valor` so a rewrite puts it back unchanged.
pub(crate) fn decode_transactions(raw: &str) -> Result<Vec<Transaction>> {
    let stored: Vec<StoredRecord> =
        serde_json::from_str(raw).map_err(|e| Error::PersistenceRead(e.to_string()))?;

    let mut txns = Vec::with_capacity(stored.len());
    for (position, record) in stored.into_iter().enumerate() {
        let (amount, unreadable_amount) = match record.amount {
            Some(value) => match amount_from_json(&value) {
                Some(amount) => (amount, None),
                None => {
                    tracing::warn!(
                        position,
                        valor = %value,
                        "stored transaction has a non-numeric amount"
                    );
                    (Decimal::ZERO, Some(UnreadableAmount::Stored(value)))
                }
            },
            None => {
                tracing::warn!(position, "stored transaction has no amount");
                (Decimal::ZERO, Some(UnreadableAmount::Missing))
            }
        };
        txns.push(Transaction {
            id: None,
            description: record.description,
            amount,
            category: record.category,
            date: record.date,
            extra: record.extra,
            unreadable_amount,
        });
    }
    Ok(txns)
}

pub(crate) fn encode_transactions(txns: &[Transaction]) -> Result<String> {
    let stored = txns
        .iter()
        .map(|txn| {
            let amount = match &txn.unreadable_amount {
                Some(UnreadableAmount::Stored(value)) => Some(value.clone()),
                Some(UnreadableAmount::Missing) => None,
                None => Some(amount_to_json(txn.amount)?),
            };
            Ok(StoredRecord {
                description: txn.description.clone(),
                amount,
                category: txn.category.clone(),
                date: txn.date.clone(),
                extra: txn.extra.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    serde_json::to_string(&stored).map_err(|e| Error::PersistenceWrite(e.to_string()))
}

fn amount_from_json(value: &Value) -> Option<Decimal> {
    let Value::Number(n) = value else {
        return None;
    };
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn amount_to_json(amount: Decimal) -> Result<Value> {
    let amount = amount.normalize();
    if amount.scale() == 0 {
        if let Some(whole) = amount.to_i64() {
            return Ok(Value::from(whole));
        }
    }
    let value = amount
        .to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| Error::PersistenceWrite(format!("amount {amount} is not representable")))?;
    if amount_from_json(&value) != Some(amount) {
        tracing::warn!(%amount, stored = %value, "amount loses precision when stored");
    }
    Ok(value)
}
