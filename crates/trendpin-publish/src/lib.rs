//! Publish fan-out and the daily recurring scheduler.

mod dispatch;
mod error;
mod schedule;

pub use dispatch::{Dispatch, Dispatcher};
pub use error::PublishError;
pub use schedule::{next_midnight, remaining_triggers, Clock, Scheduler, SystemClock};
