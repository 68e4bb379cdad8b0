use chrono::Month;
use rust_decimal::Decimal;

use crate::models::Transaction;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MonthlySummary {
    /// Sum of positive amounts.
    pub(crate) income: Decimal,
    /// Sum of negative amounts, so never above zero.
    pub(crate) expenses: Decimal,
    pub(crate) balance: Decimal,
    pub(crate) income_count: usize,
    pub(crate) expense_count: usize,
    /// Absolute spend per category, in order of first appearance.
    pub(crate) by_category: Vec<(String, Decimal)>,
}

impl MonthlySummary {
    pub(crate) fn total_spent(&self) -> Decimal {
        -self.expenses
    }

    pub(crate) fn spent_in(&self, category: &str) -> Decimal {
        self.by_category
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, amount)| *amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Fraction (0..=1) of the month's spending that went to `category`.
    pub(crate) fn share(&self, category: &str) -> Decimal {
        let total = self.total_spent();
        if total.is_zero() {
            return Decimal::ZERO;
        }
        self.spent_in(category) / total
    }
}

/// True when the record's date falls in `month` of any year.
pub(crate) fn in_month(txn: &Transaction, month: Month) -> bool {
    txn.month() == Some(month)
}

pub(crate) fn aggregate(records: &[Transaction], month: Month) -> MonthlySummary {
    let mut summary = MonthlySummary::default();

    for txn in records.iter().filter(|t| in_month(t, month)) {
        if txn.is_income() {
            summary.income = add_saturating(summary.income, txn.amount);
            summary.income_count += 1;
        } else if txn.is_expense() {
            summary.expenses = add_saturating(summary.expenses, txn.amount);
            summary.expense_count += 1;
            match summary
                .by_category
                .iter_mut()
                .find(|(name, _)| *name == txn.category)
            {
                Some((_, total)) => *total = add_saturating(*total, txn.abs_amount()),
                None => summary
                    .by_category
                    .push((txn.category.clone(), txn.abs_amount())),
            }
        }
    }

    summary.balance = add_saturating(summary.income, summary.expenses);
    summary
}

/// Sums past the `Decimal` range pin to its bounds instead of panicking.
fn add_saturating(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or(if amount.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}
