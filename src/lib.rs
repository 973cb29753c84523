//! Flight itinerary filtering.
//!
//! Flights are ordered lists of segments. Named predicates ("filters") are
//! looked up in a [`FilterRegistry`](data::registry::FilterRegistry) and
//! combined with logical AND by the [`service`] layer.

pub mod clock;
pub mod data;
pub mod error;
pub mod report;
pub mod service;
