use thiserror::Error;

/// Errors raised while resolving or evaluating flight filters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// No constructor is registered under this key.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),
}

/// Errors raised while constructing flight values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlightError {
    /// A flight must contain at least one segment.
    #[error("flight has no segments")]
    EmptyItinerary,
}
