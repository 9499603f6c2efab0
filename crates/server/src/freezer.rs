// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The daily freeze scheduler.
//!
//! A single long-lived [`FreezeScheduler`] is constructed at process
//! startup and owns the recurring freeze trigger. The scheduler has two
//! states: idle (no timer armed) and armed (a wake-up pending for the next
//! 07:59 local time). On firing it freezes today's schedule and immediately
//! re-arms for the following day; a failed run is logged and the re-arm
//! happens regardless, so one bad day never disables future runs.
//!
//! The 07:59 trigger time is a design constant: the freeze locks in the
//! night shift's final state just before the day shift begins.

use chrono::{Datelike, Local, NaiveDateTime, NaiveTime};
use rotascope_api::{ApiError, FreezeResponse, freeze_date};
use rotascope_persistence::Persistence;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration as StdDuration;
use time::{Date, Month};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Hour of the daily freeze trigger (local time).
pub const FREEZE_HOUR: u32 = 7;
/// Minute of the daily freeze trigger (local time).
pub const FREEZE_MINUTE: u32 = 59;

/// Computes the delay from `now` until the next freeze trigger.
///
/// The target is 07:59 today when `now` has not reached it yet, otherwise
/// 07:59 tomorrow. The result is always positive and at most 24 hours.
#[must_use]
pub fn delay_until_next_run(now: NaiveDateTime) -> StdDuration {
    let trigger: NaiveTime =
        NaiveTime::from_hms_opt(FREEZE_HOUR, FREEZE_MINUTE, 0).unwrap_or(NaiveTime::MIN);
    let mut target: NaiveDateTime = now.date().and_time(trigger);
    if now >= target {
        target = target
            .checked_add_signed(chrono::Duration::days(1))
            .unwrap_or(target);
    }
    (target - now)
        .to_std()
        .unwrap_or_else(|_| StdDuration::from_secs(60))
}

/// Converts a chrono calendar date into a `time::Date`.
fn to_time_date(value: chrono::NaiveDate) -> Option<Date> {
    let month: Month = Month::try_from(u8::try_from(value.month()).ok()?).ok()?;
    Date::from_calendar_date(value.year(), month, u8::try_from(value.day()).ok()?).ok()
}

/// Returns today's date on the local wall clock.
///
/// # Errors
///
/// Returns an error if the local clock produces a date outside the
/// representable range.
pub fn local_today() -> Result<Date, ApiError> {
    to_time_date(Local::now().date_naive()).ok_or_else(|| ApiError::Internal {
        message: String::from("Local clock produced an unrepresentable date"),
    })
}

/// The recurring daily freeze driver.
///
/// Constructed once at startup and shared behind an `Arc`; nothing else in
/// the process arms freeze timers.
pub struct FreezeScheduler {
    /// Shared persistence handle, the same one the HTTP handlers use.
    persistence: Arc<Mutex<Persistence>>,
    /// Reentrancy guard: true while a scheduled freeze run is executing.
    job_running: AtomicBool,
    /// The armed timer task, when in the armed state.
    timer: StdMutex<Option<JoinHandle<()>>>,
}

impl FreezeScheduler {
    /// Creates an idle scheduler over the shared persistence handle.
    #[must_use]
    pub const fn new(persistence: Arc<Mutex<Persistence>>) -> Self {
        Self {
            persistence,
            job_running: AtomicBool::new(false),
            timer: StdMutex::new(None),
        }
    }

    /// Arms the scheduler: idle to armed.
    ///
    /// The spawned task sleeps until the next 07:59 local time, runs the
    /// freeze, and re-arms itself for the following day. Calling `start` on
    /// an already-armed scheduler logs a warning and changes nothing.
    pub fn start(self: &Arc<Self>) {
        let mut slot = match self.timer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if slot.is_some() {
            warn!("Freeze scheduler is already armed");
            return;
        }

        let scheduler: Arc<Self> = Arc::clone(self);
        let handle: JoinHandle<()> = tokio::spawn(async move {
            loop {
                let delay: StdDuration = delay_until_next_run(Local::now().naive_local());
                info!(
                    seconds_until_run = delay.as_secs(),
                    "Freeze scheduler armed for next {FREEZE_HOUR:02}:{FREEZE_MINUTE:02}"
                );
                tokio::time::sleep(delay).await;
                scheduler.run_scheduled().await;
            }
        });
        *slot = Some(handle);
        info!("Freeze scheduler started");
    }

    /// Disarms the scheduler: armed to idle.
    ///
    /// Cancels the pending timer. A freeze transaction already handed to
    /// the database is not interrupted; rollback semantics make a torn
    /// shutdown safe.
    pub fn stop(&self) {
        let mut slot = match self.timer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(handle) = slot.take() {
            handle.abort();
            info!("Freeze scheduler stopped");
        }
    }

    /// Returns whether a timer is currently armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        match self.timer.lock() {
            Ok(guard) => guard.is_some(),
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }

    /// Runs the freeze immediately, bypassing the reentrancy guard and the
    /// schedule timing. Intended for operational recovery and testing.
    ///
    /// # Arguments
    ///
    /// * `date` - The date to freeze; today (local time) when `None`
    ///
    /// # Errors
    ///
    /// Unlike the scheduled path, errors propagate to the caller.
    pub async fn run_manually(&self, date: Option<Date>) -> Result<FreezeResponse, ApiError> {
        let target: Date = match date {
            Some(d) => d,
            None => local_today()?,
        };
        let mut persistence = self.persistence.lock().await;
        freeze_date(&mut persistence, target)
    }

    /// The scheduled freeze run.
    ///
    /// Guarded against overlap: if a previous run is still executing, this
    /// trigger is skipped with a warning. The freeze store's per-date
    /// idempotency is the second line of defense. Errors are logged and
    /// swallowed so the recurring timer is never broken by one bad run.
    async fn run_scheduled(&self) {
        if self.job_running.swap(true, Ordering::SeqCst) {
            warn!("Freeze job is still running, skipping this trigger");
            return;
        }

        match self.run_manually(None).await {
            Ok(response) => {
                info!(date = %response.date, frozen = response.frozen, "Scheduled freeze completed");
            }
            Err(e) => {
                error!(error = %e, "Scheduled freeze failed");
            }
        }

        self.job_running.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rotascope_domain::parse_date;

    fn make_scheduler() -> Arc<FreezeScheduler> {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        Arc::new(FreezeScheduler::new(Arc::new(Mutex::new(persistence))))
    }

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_delay_before_trigger_targets_same_day() {
        let now: NaiveDateTime = naive(2025, 6, 1, 6, 0, 0);
        let delay: StdDuration = delay_until_next_run(now);
        // 06:00 to 07:59 is 1h59m
        assert_eq!(delay, StdDuration::from_secs(7_140));
    }

    #[test]
    fn test_delay_at_trigger_targets_next_day() {
        let now: NaiveDateTime = naive(2025, 6, 1, 7, 59, 0);
        let delay: StdDuration = delay_until_next_run(now);
        assert_eq!(delay, StdDuration::from_secs(86_400));
    }

    #[test]
    fn test_delay_after_trigger_targets_next_day() {
        let now: NaiveDateTime = naive(2025, 6, 1, 8, 0, 0);
        let delay: StdDuration = delay_until_next_run(now);
        // 24h minus one minute
        assert_eq!(delay, StdDuration::from_secs(86_340));
    }

    #[test]
    fn test_delay_is_always_positive_and_bounded() {
        for hour in 0..24 {
            for minute in [0, 15, 59] {
                let now: NaiveDateTime = naive(2025, 6, 1, hour, minute, 30);
                let delay: StdDuration = delay_until_next_run(now);
                assert!(delay > StdDuration::ZERO);
                assert!(delay <= StdDuration::from_secs(86_400));
            }
        }
    }

    #[tokio::test]
    async fn test_run_manually_freezes_explicit_date() {
        let scheduler: Arc<FreezeScheduler> = make_scheduler();
        let target: Date = parse_date("2025-01-03").unwrap();

        let first: FreezeResponse = scheduler.run_manually(Some(target)).await.unwrap();
        let second: FreezeResponse = scheduler.run_manually(Some(target)).await.unwrap();

        assert!(first.frozen);
        assert!(!second.frozen);
    }

    #[tokio::test]
    async fn test_run_manually_bypasses_reentrancy_guard() {
        let scheduler: Arc<FreezeScheduler> = make_scheduler();
        scheduler.job_running.store(true, Ordering::SeqCst);

        let target: Date = parse_date("2025-01-03").unwrap();
        let response: FreezeResponse = scheduler.run_manually(Some(target)).await.unwrap();

        assert!(response.frozen);
    }

    #[tokio::test]
    async fn test_scheduled_run_skipped_while_guard_held() {
        let scheduler: Arc<FreezeScheduler> = make_scheduler();
        scheduler.job_running.store(true, Ordering::SeqCst);

        scheduler.run_scheduled().await;

        // The skipped trigger froze nothing
        let today: Date = local_today().unwrap();
        let mut persistence = scheduler.persistence.lock().await;
        assert!(!persistence.is_date_frozen(today).unwrap());
    }

    #[tokio::test]
    async fn test_scheduled_run_freezes_and_releases_guard() {
        let scheduler: Arc<FreezeScheduler> = make_scheduler();

        scheduler.run_scheduled().await;

        assert!(!scheduler.job_running.load(Ordering::SeqCst));
        let today: Date = local_today().unwrap();
        let mut persistence = scheduler.persistence.lock().await;
        assert!(persistence.is_date_frozen(today).unwrap());
    }

    #[tokio::test]
    async fn test_start_and_stop_transition_armed_state() {
        let scheduler: Arc<FreezeScheduler> = make_scheduler();
        assert!(!scheduler.is_armed());

        scheduler.start();
        assert!(scheduler.is_armed());

        // Starting an armed scheduler is a no-op
        scheduler.start();
        assert!(scheduler.is_armed());

        scheduler.stop();
        assert!(!scheduler.is_armed());

        // The scheduler can be re-armed after a stop
        scheduler.start();
        assert!(scheduler.is_armed());
        scheduler.stop();
    }
}
