pub mod identifiers;
pub mod time_utils;

pub use identifiers::validate_identifier;
pub use time_utils::{now_timestamp, parse_history_start};
