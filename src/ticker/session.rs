use crate::error::{MetronomeError, Result};
use std::time::{Duration, Instant};

/// Period used before any interval has been configured
pub const DEFAULT_INTERVAL_MS: f64 = 25.0;

/// Longest accepted period, one day
pub const MAX_INTERVAL_MS: f64 = 86_400_000.0;

/// Checks that a tick interval is usable as a timer period
pub(crate) fn validate_interval(period_millis: f64) -> Result<Duration> {
    if !period_millis.is_finite() || period_millis <= 0.0 || period_millis > MAX_INTERVAL_MS {
        return Err(MetronomeError::InvalidInterval(period_millis));
    }
    Duration::try_from_secs_f64(period_millis / 1000.0)
        .ok()
        .filter(|period| !period.is_zero())
        .filter(|period| Instant::now().checked_add(*period).is_some())
        .ok_or(MetronomeError::InvalidInterval(period_millis))
}

/// Timer state owned by the scheduler thread
#[derive(Debug)]
pub(crate) struct TimerSession {
    period_millis: f64,
    period: Duration,
    // Some(next firing) while armed
    deadline: Option<Instant>,
    epoch: u64,
}

impl TimerSession {
    pub fn new(period_millis: f64) -> Result<Self> {
        let period = validate_interval(period_millis)?;
        Ok(Self {
            period_millis,
            period,
            deadline: None,
            epoch: 0,
        })
    }

    pub fn period_millis(&self) -> f64 {
        self.period_millis
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn set_epoch(&mut self, epoch: u64) {
        self.epoch = epoch;
    }

    /// Arms the timer one period from `now`. Returns false if it was already armed.
    pub fn arm(&mut self, now: Instant) -> bool {
        if self.deadline.is_some() {
            return false;
        }
        self.deadline = now.checked_add(self.period);
        self.deadline.is_some()
    }

    /// Returns true if a live timer was released.
    pub fn disarm(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Replaces the period, re-arming from `now` when running. An invalid
    /// period leaves the session untouched.
    pub fn set_period(&mut self, period_millis: f64, now: Instant) -> Result<()> {
        let period = validate_interval(period_millis)?;
        self.period_millis = period_millis;
        self.period = period;
        if self.deadline.is_some() {
            self.deadline = now.checked_add(period);
        }
        Ok(())
    }

    /// Advances the deadline after a firing and returns how many periods were
    /// skipped because the thread woke too late.
    pub fn advance(&mut self, now: Instant) -> u64 {
        let Some(deadline) = self.deadline else {
            return 0;
        };

        match deadline.checked_add(self.period) {
            Some(next) if next > now => {
                self.deadline = Some(next);
                return 0;
            }
            _ => {}
        }

        let behind = now.duration_since(deadline).as_secs_f64();
        let skipped = (behind / self.period.as_secs_f64()).floor() as u64;
        self.deadline = now.checked_add(self.period);
        skipped
    }
}
