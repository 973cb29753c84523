use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use flight_filter::clock::{Clock, SystemClock};
use flight_filter::data::fixture::create_flights;
use flight_filter::data::registry::FilterRegistry;
use flight_filter::report::display_flights;
use flight_filter::service::FlightFilterService;

/// Demonstration steps: title and the filter keys applied together.
const STEPS: [(&str, &[&str]); 3] = [
    ("No flights in the past", &["departureBeforeNow"]),
    (
        "Exclude segments with arrival before departure",
        &["arrivalBeforeDeparture"],
    ),
    ("No long waits on the ground", &["excessiveGround"]),
];

fn main() -> Result<()> {
    env_logger::init();

    let clock = Arc::new(SystemClock);
    let flights = create_flights(clock.now())?;
    let service = FlightFilterService::new(FilterRegistry::new(clock));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    display_flights(&mut out, "All flights", &flights)?;

    for (title, keys) in STEPS {
        service.apply_and_display(&mut out, &flights, title, keys)?;
    }

    out.flush()?;
    Ok(())
}
