mod goal;
mod month;
mod transaction;

pub use goal::Goal;
pub use month::{month_label, parse_month};
pub use transaction::{parse_date, RecordId, Transaction, UnreadableAmount};
