use std::io::Write;

use log::{debug, info};
use rayon::prelude::*;

use crate::data::filter::FlightFilter;
use crate::data::model::Flight;
use crate::data::registry::FilterRegistry;
use crate::error::FilterError;
use crate::report::display_flights;

// ---------------------------------------------------------------------------
// Conjunctive filtering
// ---------------------------------------------------------------------------

/// Return the flights accepted by every filter, in input order.
///
/// Predicates run in parallel across flights, producing one verdict per
/// flight; a sequential pass then keeps the accepted ones. An empty filter
/// list keeps everything.
pub fn filter_flights<'a>(
    flights: &'a [Flight],
    filters: &[Box<dyn FlightFilter>],
) -> Vec<&'a Flight> {
    let verdicts: Vec<bool> = flights
        .par_iter()
        .map(|flight| filters.iter().all(|filter| filter.accept(flight)))
        .collect();

    flights
        .iter()
        .zip(verdicts)
        .filter_map(|(flight, keep)| keep.then_some(flight))
        .collect()
}

// ---------------------------------------------------------------------------
// Service: registry lookups + filtering
// ---------------------------------------------------------------------------

/// Resolves filter keys against a registry and applies them.
#[derive(Debug, Clone, Default)]
pub struct FlightFilterService {
    registry: FilterRegistry,
}

impl FlightFilterService {
    pub fn new(registry: FilterRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    /// Resolve every key, failing on the first unknown one.
    pub fn resolve_filters(&self, keys: &[&str]) -> Result<Vec<Box<dyn FlightFilter>>, FilterError> {
        keys.iter().map(|key| self.registry.resolve(key)).collect()
    }

    /// Resolve `keys` and keep the flights that pass all of them.
    ///
    /// All keys are resolved before any flight is evaluated, so an unknown
    /// key fails the whole request.
    pub fn resolve_and_filter<'a>(
        &self,
        flights: &'a [Flight],
        keys: &[&str],
    ) -> Result<Vec<&'a Flight>, FilterError> {
        let filters = self.resolve_filters(keys)?;
        let names: Vec<&str> = filters.iter().map(|f| f.name()).collect();
        debug!("filtering {} flights with [{}]", flights.len(), names.join(", "));

        let kept = filter_flights(flights, &filters);
        info!("{} of {} flights passed [{}]", kept.len(), flights.len(), names.join(", "));
        Ok(kept)
    }

    /// Filter by `keys` and write the result as a titled block.
    pub fn apply_and_display<W: Write>(
        &self,
        out: &mut W,
        flights: &[Flight],
        title: &str,
        keys: &[&str],
    ) -> anyhow::Result<()> {
        let kept = self.resolve_and_filter(flights, keys)?;
        display_flights(out, title, &kept)?;
        Ok(())
    }
}
