mod format_utils;
mod time_utils;

pub use format_utils::format_amount;
pub use time_utils::{at_notify_hour, days_until, now_local};
