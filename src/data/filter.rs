use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::clock::{SharedClock, SystemClock};
use crate::error::FilterError;

use super::model::Flight;

/// Default ceiling on cumulative layover time, in minutes.
pub const MAX_GROUND_MINUTES: i64 = 120;

// ---------------------------------------------------------------------------
// Filter capability
// ---------------------------------------------------------------------------

/// A pure predicate over a single flight.
///
/// `accept` returns `true` when the flight should be kept. Implementations
/// hold no mutable state, so one instance can be shared across threads and
/// evaluated any number of times.
pub trait FlightFilter: Send + Sync {
    fn accept(&self, flight: &Flight) -> bool;

    /// Registry key of this filter, used in log output.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Variant tags
// ---------------------------------------------------------------------------

/// The built-in filter variants and their registry keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    DepartureBeforeNow,
    ArrivalBeforeDeparture,
    ExcessiveGround,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] = [
        FilterKind::DepartureBeforeNow,
        FilterKind::ArrivalBeforeDeparture,
        FilterKind::ExcessiveGround,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FilterKind::DepartureBeforeNow => "departureBeforeNow",
            FilterKind::ArrivalBeforeDeparture => "arrivalBeforeDeparture",
            FilterKind::ExcessiveGround => "excessiveGround",
        }
    }

    /// Construct a fresh filter of this kind.
    pub fn build(self, clock: &SharedClock) -> Box<dyn FlightFilter> {
        match self {
            FilterKind::DepartureBeforeNow => {
                Box::new(DepartureBeforeNow::with_clock(Arc::clone(clock)))
            }
            FilterKind::ArrivalBeforeDeparture => Box::new(ArrivalBeforeDeparture),
            FilterKind::ExcessiveGround => Box::new(ExcessiveGround::default()),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| FilterError::UnknownFilter(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// DepartureBeforeNow
// ---------------------------------------------------------------------------

/// Rejects a flight if any leg departs strictly before the current time.
///
/// The clock is read once per `accept` call, so every leg of one flight is
/// compared against the same instant.
#[derive(Clone)]
pub struct DepartureBeforeNow {
    clock: SharedClock,
}

impl DepartureBeforeNow {
    /// Compare against the local system time.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: SharedClock) -> Self {
        Self { clock }
    }
}

impl Default for DepartureBeforeNow {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DepartureBeforeNow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepartureBeforeNow").finish_non_exhaustive()
    }
}

impl FlightFilter for DepartureBeforeNow {
    fn accept(&self, flight: &Flight) -> bool {
        let now = self.clock.now();
        !flight.segments().iter().any(|s| s.departure < now)
    }

    fn name(&self) -> &str {
        FilterKind::DepartureBeforeNow.key()
    }
}

// ---------------------------------------------------------------------------
// ArrivalBeforeDeparture
// ---------------------------------------------------------------------------

/// Rejects a flight if any leg lands strictly before it takes off.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrivalBeforeDeparture;

impl FlightFilter for ArrivalBeforeDeparture {
    fn accept(&self, flight: &Flight) -> bool {
        !flight.segments().iter().any(|s| s.arrival < s.departure)
    }

    fn name(&self) -> &str {
        FilterKind::ArrivalBeforeDeparture.key()
    }
}

// ---------------------------------------------------------------------------
// ExcessiveGround
// ---------------------------------------------------------------------------

/// Rejects a flight whose total layover time exceeds a threshold.
///
/// Gaps are summed in itinerary order and the flight is rejected as soon as
/// the running total goes above `max_ground_minutes`. A gap is negative when
/// a leg departs before the previous one lands, and it lowers the total.
/// Reaching the threshold exactly is still accepted.
#[derive(Debug, Clone, Copy)]
pub struct ExcessiveGround {
    max_ground_minutes: i64,
}

impl ExcessiveGround {
    pub fn new() -> Self {
        Self::with_max_ground_minutes(MAX_GROUND_MINUTES)
    }

    pub fn with_max_ground_minutes(max_ground_minutes: i64) -> Self {
        Self { max_ground_minutes }
    }

    pub fn max_ground_minutes(&self) -> i64 {
        self.max_ground_minutes
    }
}

impl Default for ExcessiveGround {
    fn default() -> Self {
        Self::new()
    }
}

impl FlightFilter for ExcessiveGround {
    fn accept(&self, flight: &Flight) -> bool {
        if flight.len() < 2 {
            return true;
        }

        let mut total = 0i64;
        for gap in flight.ground_minutes() {
            total += gap;
            if total > self.max_ground_minutes {
                return false;
            }
        }
        true
    }

    fn name(&self) -> &str {
        FilterKind::ExcessiveGround.key()
    }
}
