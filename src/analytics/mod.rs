//! Month-scoped totals and goal progress, derived fresh from the record list
//! on every refresh.

mod aggregate;
mod goals;

pub(crate) use aggregate::{aggregate, in_month, MonthlySummary};
pub(crate) use goals::{progress, GoalProgress};
