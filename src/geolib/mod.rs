//! Observer geolocation
//!
//! A one-shot, blocking IP-based lookup of the observer's coordinates.
//! Every failure mode — network, non-success status, parse — collapses to
//! the (0, 0) default with a log line; callers never see an error. The
//! request is fired once at startup and never re-issued, so a stale
//! result at worst overwrites state that is idempotently derived anyway.

use serde::Deserialize;

/// Default lookup endpoint
const IP_API_URL: &str = "http://ip-api.com/json/";

/// An observer's geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    /// Latitude in degrees, -90..90
    pub latitude: f64,
    /// Longitude in degrees, east positive
    pub longitude: f64,
}

impl Default for GeoLocation {
    /// The null-island fallback used whenever acquisition fails.
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

fn location_from_response(response: IpApiResponse) -> Option<GeoLocation> {
    if response.status != "success" {
        return None;
    }
    Some(GeoLocation {
        latitude: response.lat?,
        longitude: response.lon?,
    })
}

/// Look up the observer's location from their public IP.
///
/// Blocking; returns the default location on any failure.
pub fn fetch_observer_location() -> GeoLocation {
    fetch_from(IP_API_URL)
}

fn fetch_from(url: &str) -> GeoLocation {
    let result = reqwest::blocking::get(url)
        .and_then(|response| response.json::<IpApiResponse>());

    match result {
        Ok(response) => location_from_response(response).unwrap_or_else(|| {
            log::warn!("IP geolocation reported failure; using default observer location");
            GeoLocation::default()
        }),
        Err(err) => {
            log::warn!("IP geolocation request failed ({err}); using default observer location");
            GeoLocation::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> IpApiResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_success_response_parses() {
        let location = location_from_response(response(
            r#"{"status": "success", "lat": 52.52, "lon": 13.405}"#,
        ))
        .unwrap();
        assert_eq!(location.latitude, 52.52);
        assert_eq!(location.longitude, 13.405);
    }

    #[test]
    fn test_failure_status_rejected() {
        assert!(location_from_response(response(
            r#"{"status": "fail", "lat": 1.0, "lon": 2.0}"#
        ))
        .is_none());
    }

    #[test]
    fn test_missing_coordinates_rejected() {
        assert!(location_from_response(response(r#"{"status": "success"}"#)).is_none());
    }

    #[test]
    fn test_default_is_null_island() {
        let location = GeoLocation::default();
        assert_eq!(location.latitude, 0.0);
        assert_eq!(location.longitude, 0.0);
    }

    #[test]
    fn test_unreachable_endpoint_falls_back() {
        // A port nothing listens on: the error path must absorb it
        let location = fetch_from("http://127.0.0.1:9/json/");
        assert_eq!(location, GeoLocation::default());
    }
}
