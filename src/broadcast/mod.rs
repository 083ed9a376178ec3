//! Scheduled channel broadcasts.

mod messages;
mod scheduler;

pub use messages::{Broadcast, DEFAULT_MESSAGES, interval_units, load_messages, parse_messages};
pub use scheduler::{BroadcastScheduler, TimerSet};
