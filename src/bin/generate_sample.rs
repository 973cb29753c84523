use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDateTime};
use log::info;

use flight_filter::data::model::{Flight, Segment};

const FLIGHT_COUNT: usize = 40;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Small deterministic PRNG (SplitMix64), enough for repeatable sample data.
struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        let span = (hi - lo + 1) as u64;
        lo + (self.next_u64() % span) as i64
    }

    /// True with probability `percent`/100.
    fn chance(&mut self, percent: i64) -> bool {
        self.range(0, 99) < percent
    }
}

/// One random itinerary of 1–4 legs starting somewhere between two days ago
/// and ten days from now. A few legs are deliberately inverted so every
/// filter has something to reject.
fn generate_flight(now: NaiveDateTime, rng: &mut SplitMix64) -> Result<Flight> {
    let legs = rng.range(1, 4);
    let mut departure = now + Duration::hours(rng.range(-48, 240));
    let mut segments = Vec::with_capacity(legs as usize);

    for _ in 0..legs {
        let airborne = Duration::minutes(rng.range(45, 360));
        let arrival = if rng.chance(5) {
            departure - airborne
        } else {
            departure + airborne
        };
        segments.push(Segment::new(departure, arrival));

        let layover = Duration::minutes(rng.range(30, 150));
        departure = arrival + layover;
    }

    Ok(Flight::new(segments)?)
}

fn write_json(path: &str, flights: &[Flight]) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    serde_json::to_writer_pretty(file, flights).context("writing JSON")?;
    Ok(())
}

fn write_csv(path: &str, flights: &[Flight]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(["flight", "departure", "arrival"])?;
    for (id, flight) in flights.iter().enumerate() {
        for segment in flight.segments() {
            writer.write_record([
                format!("F{id:03}"),
                segment.departure.format(TIMESTAMP_FORMAT).to_string(),
                segment.arrival.format(TIMESTAMP_FORMAT).to_string(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SplitMix64(42);
    let now = Local::now().naive_local();

    let flights = (0..FLIGHT_COUNT)
        .map(|_| generate_flight(now, &mut rng))
        .collect::<Result<Vec<_>>>()?;
    let segment_count: usize = flights.iter().map(Flight::len).sum();

    write_json("sample_flights.json", &flights)?;
    write_csv("sample_flights.csv", &flights)?;
    info!("sample anchored at {now}");

    println!(
        "Wrote {} flights ({} segments) to sample_flights.json and sample_flights.csv",
        flights.len(),
        segment_count
    );
    Ok(())
}
