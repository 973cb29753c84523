use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FlightError;

/// Timestamp layout used when rendering segments.
const DISPLAY_FORMAT: &str = "%Y-%m-%dT%H:%M";

// ---------------------------------------------------------------------------
// Segment – one leg of an itinerary
// ---------------------------------------------------------------------------

/// A single flight leg.
///
/// Timestamps are timezone-naive. Nothing here checks that `arrival` comes
/// after `departure`; detecting that is the job of the filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
}

impl Segment {
    pub fn new(departure: NaiveDateTime, arrival: NaiveDateTime) -> Self {
        Self { departure, arrival }
    }

    /// Time in the air. Negative when the leg lands before it takes off.
    pub fn duration(&self) -> Duration {
        self.arrival - self.departure
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}|{}]",
            self.departure.format(DISPLAY_FORMAT),
            self.arrival.format(DISPLAY_FORMAT)
        )
    }
}

// ---------------------------------------------------------------------------
// Flight – an ordered, non-empty list of segments
// ---------------------------------------------------------------------------

/// One itinerary. Segment order is travel order, not necessarily time order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Flight {
    segments: Vec<Segment>,
}

// Deserialisation goes through `Flight::new` so empty itineraries are refused.
impl<'de> Deserialize<'de> for Flight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct FlightRecord {
            segments: Vec<Segment>,
        }

        let record = FlightRecord::deserialize(deserializer)?;
        Flight::new(record.segments).map_err(serde::de::Error::custom)
    }
}

impl Flight {
    /// Build a flight from its legs in travel order.
    pub fn new(segments: Vec<Segment>) -> Result<Self, FlightError> {
        if segments.is_empty() {
            return Err(FlightError::EmptyItinerary);
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of legs.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for a constructed flight.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whole minutes on the ground between each pair of consecutive legs.
    ///
    /// One entry per connection, truncated toward zero. Entries are negative
    /// when a leg departs before the previous one lands.
    pub fn ground_minutes(&self) -> impl Iterator<Item = i64> + '_ {
        self.segments
            .windows(2)
            .map(|pair| (pair[1].departure - pair[0].arrival).num_minutes())
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
