use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::clock::{system_clock, SharedClock};
use crate::error::FilterError;

use super::filter::{FilterKind, FlightFilter};

/// Builds a fresh filter. Receives the registry's clock so time-dependent
/// filters share one time source.
pub type FilterConstructor = Arc<dyn Fn(&SharedClock) -> Box<dyn FlightFilter> + Send + Sync>;

/// Immutable lookup table from filter key to constructor.
///
/// The table is filled while the registry is being built and cannot change
/// afterwards; extending it means building a new registry with
/// [`FilterRegistry::with_filter`] before the first lookup.
///
/// ```
/// use flight_filter::data::registry::FilterRegistry;
///
/// let registry = FilterRegistry::default();
/// assert!(registry.resolve("excessiveGround").is_ok());
/// assert!(registry.resolve("doesNotExist").is_err());
/// ```
#[derive(Clone)]
pub struct FilterRegistry {
    clock: SharedClock,
    constructors: BTreeMap<String, FilterConstructor>,
}

impl FilterRegistry {
    /// Registry with the three built-in filters.
    pub fn new(clock: SharedClock) -> Self {
        let mut constructors: BTreeMap<String, FilterConstructor> = BTreeMap::new();
        for kind in FilterKind::ALL {
            constructors.insert(
                kind.key().to_string(),
                Arc::new(move |clock: &SharedClock| kind.build(clock)),
            );
        }
        Self {
            clock,
            constructors,
        }
    }

    /// Register an additional key, replacing any existing entry (builder pattern).
    pub fn with_filter<F>(mut self, key: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&SharedClock) -> Box<dyn FlightFilter> + Send + Sync + 'static,
    {
        self.constructors.insert(key.into(), Arc::new(constructor));
        self
    }

    /// Construct the filter registered under `key`.
    pub fn resolve(&self, key: &str) -> Result<Box<dyn FlightFilter>, FilterError> {
        let constructor = self
            .constructors
            .get(key)
            .ok_or_else(|| FilterError::UnknownFilter(key.to_string()))?;
        debug!("resolved filter '{key}'");
        Ok(constructor(&self.clock))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.constructors.contains_key(key)
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new(system_clock())
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::data::filter::ArrivalBeforeDeparture;
    use crate::data::model::{Flight, Segment};
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn registry() -> FilterRegistry {
        FilterRegistry::new(Arc::new(FixedClock(noon())))
    }

    fn one_leg(departure: NaiveDateTime) -> Flight {
        Flight::new(vec![Segment::new(departure, departure + Duration::hours(1))]).unwrap()
    }

    #[test]
    fn default_keys_are_registered() {
        let registry = registry();
        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(
            keys,
            vec!["arrivalBeforeDeparture", "departureBeforeNow", "excessiveGround"]
        );
    }

    #[test]
    fn departure_filter_uses_registry_clock() {
        let filter = registry().resolve("departureBeforeNow").unwrap();
        assert_eq!(filter.name(), "departureBeforeNow");
        assert!(filter.accept(&one_leg(noon() + Duration::minutes(1))));
        assert!(!filter.accept(&one_leg(noon() - Duration::minutes(1))));
    }

    #[test]
    fn unknown_key_fails() {
        let err = registry().resolve("doesNotExist").err().unwrap();
        assert_eq!(err, FilterError::UnknownFilter("doesNotExist".to_string()));
        assert_eq!(err.to_string(), "unknown filter: doesNotExist");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(registry().resolve("ExcessiveGround").is_err());
    }

    #[test]
    fn extension_adds_a_key_without_touching_defaults() {
        let extended = registry().with_filter("sanity", |_: &SharedClock| -> Box<dyn FlightFilter> {
            Box::new(ArrivalBeforeDeparture)
        });

        assert!(extended.contains("sanity"));
        assert!(extended.contains("excessiveGround"));
        assert!(!registry().contains("sanity"));
        assert!(extended.resolve("sanity").is_ok());
    }
}
