//! Daily recurring scheduling loop.
//!
//! Computes the day's fixed local trigger times in the configured time zone,
//! dispatches every trigger still in the future, then sleeps until local
//! midnight of the next calendar day and repeats. Time and sleeping go
//! through the [`Clock`] trait so tests can simulate days in microseconds.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::dispatch::Dispatch;
use crate::error::PublishError;

/// Fixed local times-of-day at which a publish cycle fires.
const DAILY_TRIGGER_TIMES: [(u32, u32); 3] = [(9, 0), (13, 30), (20, 0)];

/// Source of "now" and sleeping for the scheduling loop.
#[allow(async_fn_in_trait)]
pub trait Clock {
    /// Current time in the scheduling time zone.
    fn now(&self) -> DateTime<Tz>;

    /// Suspends until `duration` has elapsed.
    async fn sleep(&self, duration: Duration);
}

/// Production clock: system time projected into the scheduling time zone,
/// real `tokio::time::sleep`.
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    #[must_use]
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Forever-running daily scheduler.
///
/// Single sequential task: dispatches are awaited to completion in trigger
/// order and nothing overlaps. There is no cancellation mechanism — the loop
/// exits only by propagating a dispatch error or by process termination.
pub struct Scheduler<'a, D, C> {
    dispatcher: &'a D,
    clock: C,
}

impl<'a, D: Dispatch, C: Clock> Scheduler<'a, D, C> {
    #[must_use]
    pub fn new(dispatcher: &'a D, clock: C) -> Self {
        Self { dispatcher, clock }
    }

    /// Runs the scheduling loop forever.
    ///
    /// Each outer iteration captures the current local time once, dispatches
    /// every trigger of today that was strictly in the future at that
    /// instant, then sleeps until the next local midnight. The future check
    /// is deliberately not re-evaluated between dispatches: a trigger whose
    /// time passes while an earlier dispatch runs still fires (the
    /// dispatcher clamps its post date to now), rather than being silently
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns the first [`PublishError`] raised by a dispatch; there is no
    /// retry at this level.
    pub async fn run(&self) -> Result<(), PublishError> {
        loop {
            let now = self.clock.now();
            let triggers = remaining_triggers(now);
            tracing::info!(
                date = %now.date_naive(),
                remaining = triggers.len(),
                "scheduler: evaluating today's triggers"
            );

            for trigger in triggers {
                tracing::info!(trigger = %trigger, "scheduler: dispatching");
                self.dispatcher.dispatch(trigger).await?;
            }

            let midnight = next_midnight(self.clock.now());
            let pause = (midnight - self.clock.now())
                .to_std()
                .unwrap_or(Duration::ZERO);
            tracing::info!(until = %midnight, "scheduler: sleeping until next day");
            self.clock.sleep(pause).await;
        }
    }
}

/// Today's trigger times strictly after `now`, in ascending order.
#[must_use]
pub fn remaining_triggers(now: DateTime<Tz>) -> Vec<DateTime<Tz>> {
    let today = now.date_naive();
    let tz = now.timezone();
    daily_trigger_times()
        .into_iter()
        .filter_map(|time| resolve_local(today, time, tz))
        .filter(|candidate| *candidate > now)
        .collect()
}

/// Local midnight of the next calendar day.
#[must_use]
pub fn next_midnight(now: DateTime<Tz>) -> DateTime<Tz> {
    let tomorrow = now.date_naive() + chrono::Days::new(1);
    // Some zones skip midnight across a DST change; fall back to a plain
    // 24-hour jump if it cannot be resolved.
    resolve_local(tomorrow, NaiveTime::MIN, now.timezone())
        .unwrap_or_else(|| now + chrono::Duration::days(1))
}

fn daily_trigger_times() -> [NaiveTime; 3] {
    DAILY_TRIGGER_TIMES
        .map(|(hour, minute)| NaiveTime::from_hms_opt(hour, minute, 0).expect("valid trigger time"))
}

/// Resolves a local date + time in `tz`. Ambiguous times (fall-back) take
/// the earlier offset; times in a spring-forward gap land on the earliest
/// valid instant an hour later.
fn resolve_local(date: NaiveDate, time: NaiveTime, tz: Tz) -> Option<DateTime<Tz>> {
    let local = date.and_time(time);
    tz.from_local_datetime(&local)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(local + chrono::Duration::hours(1))).earliest())
}
