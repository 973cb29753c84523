/// Data layer: itinerary types, filters, and the filter registry.
///
/// Architecture:
/// ```text
///  fixture / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  Flight = ordered Vec<Segment>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │  filter   │ ◄── │ registry │  key → fresh FlightFilter
///   └──────────┘     └──────────┘
///        │
///        ▼
///   accept(flight) → keep / drop
/// ```

pub mod fixture;
pub mod filter;
pub mod loader;
pub mod model;
pub mod registry;
