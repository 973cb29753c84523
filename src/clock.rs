use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

/// Source of the current wall-clock time.
///
/// Filters that compare against "now" take a clock instead of reading the
/// system time directly, so tests can pin the evaluation instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Clock handle shared between the registry and the filters it builds.
pub type SharedClock = Arc<dyn Clock>;

/// Local system time, without offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Shared handle to the system clock.
pub fn system_clock() -> SharedClock {
    Arc::new(SystemClock)
}
