use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use log::info;
use serde_json::Value as JsonValue;

use super::model::{Flight, Segment};

/// Accepted timestamp layouts, tried in order.
const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load itineraries from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "segments": [{ "departure": ..., "arrival": ... }] }, ...]`
/// * `.csv`  – columns `flight`, `departure`, `arrival`, one row per leg
///
/// Itineraries that the filters would reject (legs landing before take-off,
/// long layovers) load normally. Only structural problems fail.
pub fn load_file(path: &Path) -> Result<Vec<Flight>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let flights = match ext.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };
    info!("loaded {} flights from {}", flights.len(), path.display());
    Ok(flights)
}

/// Parse a timezone-naive timestamp in any of the accepted layouts.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .with_context(|| format!("'{s}' is not a valid timestamp"))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (the same shape `Flight` serialises to):
///
/// ```json
/// [
///   {
///     "segments": [
///       { "departure": "2030-01-15T08:00:00", "arrival": "2030-01-15T10:00:00" }
///     ]
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<Flight>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub(crate) fn parse_json(text: &str) -> Result<Vec<Flight>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| json_flight(rec).with_context(|| format!("Row {i}")))
        .collect()
}

fn json_flight(rec: &JsonValue) -> Result<Flight> {
    let segments = rec
        .get("segments")
        .and_then(|v| v.as_array())
        .context("missing or invalid 'segments' array")?;

    let segments = segments
        .iter()
        .enumerate()
        .map(|(j, seg)| {
            let departure = json_timestamp(seg, "departure")
                .with_context(|| format!("segments[{j}]"))?;
            let arrival =
                json_timestamp(seg, "arrival").with_context(|| format!("segments[{j}]"))?;
            Ok(Segment::new(departure, arrival))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Flight::new(segments)?)
}

fn json_timestamp(seg: &JsonValue, field: &str) -> Result<NaiveDateTime> {
    let raw = seg
        .get(field)
        .and_then(|v| v.as_str())
        .with_context(|| format!("missing or non-string '{field}'"))?;
    parse_timestamp(raw)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout:  header row with column names `flight`, `departure`, `arrival`.
/// Consecutive rows sharing a `flight` value form one itinerary, legs in row
/// order. Other columns are ignored.
fn load_csv(path: &Path) -> Result<Vec<Flight>> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    parse_csv(reader)
}

pub(crate) fn parse_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Flight>> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let flight_idx = column("flight")?;
    let dep_idx = column("departure")?;
    let arr_idx = column("arrival")?;

    let mut flights = Vec::new();
    let mut current: Option<(String, Vec<Segment>)> = None;

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let id = record.get(flight_idx).unwrap_or("").to_string();
        let departure = parse_timestamp(record.get(dep_idx).unwrap_or(""))
            .with_context(|| format!("CSV row {row_no}: departure"))?;
        let arrival = parse_timestamp(record.get(arr_idx).unwrap_or(""))
            .with_context(|| format!("CSV row {row_no}: arrival"))?;
        let segment = Segment::new(departure, arrival);

        if let Some((current_id, segments)) = current.as_mut() {
            if *current_id == id {
                segments.push(segment);
                continue;
            }
        }
        if let Some((_, segments)) = current.replace((id, vec![segment])) {
            flights.push(Flight::new(segments)?);
        }
    }

    if let Some((_, segments)) = current {
        flights.push(Flight::new(segments)?);
    }

    Ok(flights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn timestamp_layouts() {
        assert_eq!(parse_timestamp("2030-01-15T08:30:00").unwrap(), at(15, 8, 30));
        assert_eq!(parse_timestamp("2030-01-15T08:30").unwrap(), at(15, 8, 30));
        assert_eq!(parse_timestamp(" 2030-01-15 08:30:00 ").unwrap(), at(15, 8, 30));
        assert!(parse_timestamp("15/01/2030").is_err());
    }

    #[test]
    fn json_flights_keep_leg_order() {
        let flights = parse_json(
            r#"[
                { "segments": [
                    { "departure": "2030-01-15T08:00", "arrival": "2030-01-15T09:00" },
                    { "departure": "2030-01-15T07:00", "arrival": "2030-01-15T06:00" }
                ] },
                { "segments": [
                    { "departure": "2030-01-16T10:00:00", "arrival": "2030-01-16T11:00:00" }
                ] }
            ]"#,
        )
        .unwrap();

        assert_eq!(flights.len(), 2);
        assert_eq!(flights[0].segments()[1], Segment::new(at(15, 7, 0), at(15, 6, 0)));
        assert_eq!(flights[1].len(), 1);
    }

    #[test]
    fn json_empty_flight_is_an_error() {
        let err = parse_json(r#"[{ "segments": [] }]"#).unwrap_err();
        assert!(format!("{err:#}").contains("no segments"));
    }

    #[test]
    fn json_requires_an_array() {
        assert!(parse_json(r#"{ "segments": [] }"#).is_err());
    }

    #[test]
    fn csv_groups_consecutive_rows() {
        let data = "\
flight,departure,arrival
A,2030-01-15T08:00,2030-01-15T09:00
A,2030-01-15T10:00,2030-01-15T11:00
B,2030-01-16T08:00,2030-01-16T09:00
A,2030-01-17T08:00,2030-01-17T09:00
";
        let flights = parse_csv(csv::Reader::from_reader(data.as_bytes())).unwrap();
        let counts: Vec<usize> = flights.iter().map(Flight::len).collect();
        assert_eq!(counts, vec![2, 1, 1]);
    }

    #[test]
    fn csv_missing_column() {
        let data = "flight,departure\nA,2030-01-15T08:00\n";
        let err = parse_csv(csv::Reader::from_reader(data.as_bytes())).unwrap_err();
        assert!(err.to_string().contains("arrival"));
    }

    #[test]
    fn csv_with_no_rows_yields_no_flights() {
        let data = "flight,departure,arrival\n";
        assert!(parse_csv(csv::Reader::from_reader(data.as_bytes()))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("flights.parquet")).unwrap_err();
        assert!(err.to_string().contains(".parquet"));
    }

    #[test]
    fn load_json_file_from_disk() {
        let path = std::env::temp_dir().join(format!("flight-filter-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{ "segments": [{ "departure": "2030-01-15T08:00", "arrival": "2030-01-15T09:00" }] }]"#,
        )
        .unwrap();

        let flights = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(flights.len(), 1);
    }
}
