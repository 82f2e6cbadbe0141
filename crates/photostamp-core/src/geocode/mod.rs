//! Reverse geocoding: turning a decimal coordinate pair into a place name.
//!
//! The [`ReverseGeocoder`] trait is the seam between the pipeline and the
//! network; [`NominatimGeocoder`] is the production implementation and tests
//! substitute mocks.

pub mod nominatim;
pub mod retry;

pub use nominatim::NominatimGeocoder;

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::error::PipelineError;

/// Place-type key → name mapping from a reverse-geocoding response.
pub type AddressComponents = BTreeMap<String, String>;

/// Place-type keys tried in order when picking a display name. The most
/// specific interesting key wins; `country` is the fallback of last resort.
pub const PLACE_PRIORITY: [&str; 7] = [
    "tourism",
    "hamlet",
    "suburb",
    "town",
    "municipality",
    "city_district",
    "city",
];

/// Pick a display place name out of an address-component mapping.
///
/// First priority key present wins; falls back to `country`; an address
/// with neither is logged as an anomaly and yields `None`.
pub fn select_place_name(address: &AddressComponents) -> Option<String> {
    for key in PLACE_PRIORITY {
        if let Some(name) = address.get(key) {
            return Some(name.clone());
        }
    }
    match address.get("country") {
        Some(country) => Some(country.clone()),
        None => {
            tracing::warn!(?address, "no usable place key in geocoder response");
            None
        }
    }
}

/// Trait implemented by reverse-geocoding backends.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the processor holds a `Box<dyn ReverseGeocoder>`).
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Backend name for logging (e.g. "nominatim").
    fn name(&self) -> &str;

    /// Resolve a decimal coordinate pair to address components,
    /// requesting exactly one best match.
    async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AddressComponents, PipelineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(pairs: &[(&str, &str)]) -> AddressComponents {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_city_beats_country() {
        let addr = address(&[("city", "Springfield"), ("country", "USA")]);
        assert_eq!(select_place_name(&addr).as_deref(), Some("Springfield"));
    }

    #[test]
    fn test_country_fallback() {
        let addr = address(&[("country", "USA")]);
        assert_eq!(select_place_name(&addr).as_deref(), Some("USA"));
    }

    #[test]
    fn test_higher_priority_key_wins() {
        let addr = address(&[
            ("city", "Sydney"),
            ("suburb", "Newtown"),
            ("tourism", "Opera House"),
            ("country", "Australia"),
        ]);
        assert_eq!(select_place_name(&addr).as_deref(), Some("Opera House"));
    }

    #[test]
    fn test_suburb_beats_town() {
        let addr = address(&[("town", "Katoomba"), ("suburb", "Leura")]);
        assert_eq!(select_place_name(&addr).as_deref(), Some("Leura"));
    }

    #[test]
    fn test_empty_address_yields_none() {
        assert_eq!(select_place_name(&AddressComponents::new()), None);
    }

    #[test]
    fn test_irrelevant_keys_yield_none() {
        let addr = address(&[("road", "Main St"), ("postcode", "12345")]);
        assert_eq!(select_place_name(&addr), None);
    }
}
