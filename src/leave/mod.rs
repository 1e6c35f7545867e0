pub mod calculator;
pub mod journal;
pub mod ledger;

pub use calculator::{compute_days, compute_days_str, parse_date};
pub use journal::RequestJournal;
pub use ledger::BalanceLedger;
