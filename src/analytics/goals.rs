use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::Goal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GoalProgress {
    pub(crate) category: String,
    pub(crate) spent: Decimal,
    pub(crate) limit: Decimal,
    /// Share of the limit used, capped at 100.
    pub(crate) percent: Decimal,
}

impl GoalProgress {
    pub(crate) fn is_exceeded(&self) -> bool {
        self.percent >= HUNDRED
    }

    /// `percent` as a 0.0..=1.0 ratio, for gauges.
    pub(crate) fn ratio(&self) -> f64 {
        (self.percent / HUNDRED).to_f64().unwrap_or(0.0).clamp(0.0, 1.0)
    }
}

/// Progress for every goal, in goal-table order. Spending in categories
/// without a goal is ignored.
pub(crate) fn progress(by_category: &[(String, Decimal)], goals: &[Goal]) -> Result<Vec<GoalProgress>> {
    goals
        .iter()
        .map(|goal| {
            goal.validate()?;
            let spent = by_category
                .iter()
                .find(|(name, _)| *name == goal.category)
                .map(|(_, amount)| *amount)
                .unwrap_or(Decimal::ZERO);
            // Only a spend far past the limit can overflow, so that reads as 100.
            let percent = spent
                .checked_mul(HUNDRED)
                .and_then(|scaled| scaled.checked_div(goal.limit))
                .or_else(|| {
                    spent
                        .checked_div(goal.limit)
                        .and_then(|ratio| ratio.checked_mul(HUNDRED))
                })
                .map_or(HUNDRED, |p| p.min(HUNDRED));
            Ok(GoalProgress {
                category: goal.category.clone(),
                spent,
                limit: goal.limit,
                percent,
            })
        })
        .collect()
}
