use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Monthly spending ceiling for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub category: String,
    pub limit: Decimal,
}

impl Goal {
    pub fn new(category: impl Into<String>, limit: Decimal) -> Self {
        Self {
            category: category.into(),
            limit,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.limit <= Decimal::ZERO {
            return Err(Error::InvalidGoalConfiguration {
                category: self.category.clone(),
                limit: self.limit,
            });
        }
        Ok(())
    }

    /// The goal table used when the config file doesn't provide one.
    pub fn defaults() -> Vec<Goal> {
        vec![
            Goal::new("Lazer", Decimal::from(500)),
            Goal::new("Comida", Decimal::from(1000)),
            Goal::new("Transporte", Decimal::from(600)),
        ]
    }
}
