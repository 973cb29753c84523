use chrono::{Duration, NaiveDateTime};

use crate::error::FlightError;

use super::model::{Flight, Segment};

// ---------------------------------------------------------------------------
// Built-in demonstration itineraries
// ---------------------------------------------------------------------------

/// Demonstration flights, anchored three days after `now`.
///
/// Each entry is a pair of timestamps per leg. The set covers one case per
/// filter plus two clean itineraries:
///
/// 1. a normal two-hour flight
/// 2. a normal multi-segment flight
/// 3. a flight departing in the past
/// 4. a flight that lands before it takes off
/// 5. a flight with more than two hours on the ground
/// 6. another flight with more than two hours on the ground
pub fn create_flights(now: NaiveDateTime) -> Result<Vec<Flight>, FlightError> {
    let three_days = now + Duration::days(3);
    let h = Duration::hours;

    let itineraries: [&[NaiveDateTime]; 6] = [
        &[three_days, three_days + h(2)],
        &[three_days, three_days + h(2), three_days + h(3), three_days + h(5)],
        &[three_days - Duration::days(6), three_days],
        &[three_days, three_days - h(6)],
        &[three_days, three_days + h(2), three_days + h(5), three_days + h(6)],
        &[
            three_days,
            three_days + h(2),
            three_days + h(3),
            three_days + h(4),
            three_days + h(6),
            three_days + h(7),
        ],
    ];

    itineraries.iter().map(|dates| build(dates)).collect()
}

/// Pair up consecutive timestamps into legs.
fn build(dates: &[NaiveDateTime]) -> Result<Flight, FlightError> {
    let segments = dates
        .chunks_exact(2)
        .map(|pair| Segment::new(pair[0], pair[1]))
        .collect();
    Flight::new(segments)
}
