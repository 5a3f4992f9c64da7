//! Endpoint URL construction.

use reqwest::Url;

use crate::{
    error::{ApiError, Result},
    model::Coordinates,
};

pub const PARAM_APPID: &str = "APPID";
pub const PARAM_LAT: &str = "lat";
pub const PARAM_LON: &str = "lon";

/// The two endpoints the client knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    /// Path segment appended to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Current => "weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Build `base_url + path` with `APPID`, `lat` and `lon` set.
///
/// The base is joined by plain concatenation, so it should end in `/`.
/// Pairs already in the base query survive unless they share one of the
/// three names, and the final query is sorted by key.
pub fn build_url(base_url: &str, path: &str, app_id: &str, coord: Coordinates) -> Result<Url> {
    let raw = format!("{base_url}{path}");
    let mut url = Url::parse(&raw).map_err(|e| ApiError::MalformedUrl {
        url: raw.clone(),
        reason: e.to_string(),
    })?;

    let lat = format!("{:.6}", coord.lat);
    let lon = format!("{:.6}", coord.lon);

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != PARAM_APPID && k != PARAM_LAT && k != PARAM_LON)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    pairs.push((PARAM_APPID.to_string(), app_id.to_string()));
    pairs.push((PARAM_LAT.to_string(), lat));
    pairs.push((PARAM_LON.to_string(), lon));
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    url.query_pairs_mut().clear().extend_pairs(pairs);

    Ok(url)
}

/// Render `url` with the API key masked, for logs and error messages.
pub fn redact(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == PARAM_APPID) {
        return url.to_string();
    }

    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == PARAM_APPID { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.example.com/data/2.5/";

    fn query(url: &Url) -> Vec<(String, String)> {
        url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect()
    }

    #[test]
    fn builds_weather_url_with_fixed_point_coordinates() {
        let url = build_url(BASE, "weather", "abc", Coordinates::new(-20.272967, 30.934364))
            .unwrap();

        assert_eq!(url.path(), "/data/2.5/weather");
        assert_eq!(url.query(), Some("APPID=abc&lat=-20.272967&lon=30.934364"));
    }

    #[test]
    fn query_holds_exactly_the_three_parameters() {
        let url = build_url(BASE, "forecast", "key", Coordinates::new(1.5, -2.0)).unwrap();

        assert_eq!(
            query(&url),
            vec![
                ("APPID".to_string(), "key".to_string()),
                ("lat".to_string(), "1.500000".to_string()),
                ("lon".to_string(), "-2.000000".to_string()),
            ]
        );
    }

    #[test]
    fn existing_pairs_are_kept_and_overridden_ones_replaced() {
        let url = build_url(
            "https://api.example.com/data/2.5/weather?units=metric&lat=9&",
            "",
            "abc",
            Coordinates::new(0.0, 0.0),
        )
        .unwrap();

        assert_eq!(url.query(), Some("APPID=abc&lat=0.000000&lon=0.000000&units=metric"));
    }

    #[test]
    fn empty_api_key_is_still_sent() {
        let url = build_url(BASE, "weather", "", Coordinates::default()).unwrap();
        assert!(query(&url).contains(&("APPID".to_string(), String::new())));
    }

    #[test]
    fn endpoints_display_as_their_path() {
        assert_eq!(Endpoint::Current.to_string(), "weather");
        assert_eq!(Endpoint::Forecast.to_string(), Endpoint::Forecast.path());
    }

    #[test]
    fn unparsable_base_is_malformed() {
        let err = build_url("not a url/", "weather", "abc", Coordinates::default()).unwrap_err();
        assert!(matches!(err, ApiError::MalformedUrl { .. }));
    }

    #[test]
    fn redact_masks_only_the_key() {
        let url = build_url(BASE, "weather", "secret", Coordinates::new(1.0, 2.0)).unwrap();
        let shown = redact(&url);

        assert!(!shown.contains("secret"));
        assert!(shown.contains("APPID=***"));
        assert!(shown.contains("lat=1.000000"));
    }
}
