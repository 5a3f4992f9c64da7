//! Record shapes returned by the `weather` and `forecast` endpoints.
//!
//! Every struct carries `#[serde(default)]`: a field missing from the payload
//! or sent as `null` decodes to its zero value, unknown fields are ignored.
//! Numbers are taken as-is, no range checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    #[serde(deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lon)
    }
}

/// One entry of the `weather` array shared by both endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub main: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    #[serde(deserialize_with = "null_as_default")]
    pub speed: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub deg: f64,
}

/// Cloud cover in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clouds {
    #[serde(deserialize_with = "null_as_default")]
    pub all: i64,
}

/// Main block of the current-conditions payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reading {
    #[serde(deserialize_with = "null_as_default")]
    pub temp: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub pressure: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub humidity: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub temp_min: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub temp_max: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunTimes {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub message: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sunrise: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub sunset: i64,
}

/// Snapshot returned by the `weather` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentConditions {
    #[serde(deserialize_with = "null_as_default")]
    pub coord: Coordinates,
    #[serde(deserialize_with = "null_as_default")]
    pub weather: Vec<Condition>,
    #[serde(deserialize_with = "null_as_default")]
    pub base: String,
    #[serde(deserialize_with = "null_as_default")]
    pub main: Reading,
    #[serde(deserialize_with = "null_as_default")]
    pub visibility: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub wind: Wind,
    #[serde(deserialize_with = "null_as_default")]
    pub clouds: Clouds,
    #[serde(deserialize_with = "null_as_default")]
    pub dt: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub sys: SunTimes,
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cod: i64,
}

impl CurrentConditions {
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.dt)
    }

    pub fn sunrise_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sys.sunrise)
    }

    pub fn sunset_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sys.sunset)
    }
}

/// Main block of a forecast item. Pressures are fractional here, unlike
/// [`Reading`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastReading {
    #[serde(deserialize_with = "null_as_default")]
    pub temp: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub temp_min: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub temp_max: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub pressure: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub sea_level: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub grnd_level: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub humidity: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub temp_kf: f64,
}

/// `"d"` or `"n"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartOfDay {
    #[serde(deserialize_with = "null_as_default")]
    pub pod: String,
}

/// Precipitation volume for the three hours covered by an item, in mm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rain {
    #[serde(rename = "3h", deserialize_with = "null_as_default")]
    pub three_hours: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastItem {
    #[serde(deserialize_with = "null_as_default")]
    pub dt: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub main: ForecastReading,
    #[serde(deserialize_with = "null_as_default")]
    pub weather: Vec<Condition>,
    #[serde(deserialize_with = "null_as_default")]
    pub clouds: Clouds,
    #[serde(deserialize_with = "null_as_default")]
    pub wind: Wind,
    #[serde(deserialize_with = "null_as_default")]
    pub sys: PartOfDay,
    #[serde(deserialize_with = "null_as_default")]
    pub dt_txt: String,
    /// `None` when the provider sent no rain block at all, which is not the
    /// same as a block reporting zero millimetres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain: Option<Rain>,
}

impl ForecastItem {
    pub fn forecast_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.dt)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct City {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub coord: Coordinates,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub population: i64,
}

/// Time-ordered sequence returned by the `forecast` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forecast {
    /// The provider reports the status code as a string on this endpoint.
    #[serde(deserialize_with = "null_as_default")]
    pub cod: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub cnt: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub list: Vec<ForecastItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub city: City,
}

impl Forecast {
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT: &str = r#"{
        "coord": {"lon": 30.93, "lat": -20.27},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "base": "stations",
        "main": {"temp": 295.15, "pressure": 1019, "humidity": 37, "temp_min": 294.15, "temp_max": 296.15},
        "visibility": 10000,
        "wind": {"speed": 3.6, "deg": 110},
        "clouds": {"all": 0},
        "dt": 1508328000,
        "sys": {"type": 1, "id": 5873, "message": 0.0031, "country": "ZW", "sunrise": 1508297590, "sunset": 1508342752},
        "id": 878549,
        "name": "Masvingo",
        "cod": 200
    }"#;

    #[test]
    fn current_conditions_decode_every_field() {
        let cur: CurrentConditions = serde_json::from_str(CURRENT).unwrap();

        let expected = CurrentConditions {
            coord: Coordinates::new(-20.27, 30.93),
            weather: vec![Condition {
                id: 800,
                main: "Clear".into(),
                description: "clear sky".into(),
                icon: "01d".into(),
            }],
            base: "stations".into(),
            main: Reading {
                temp: 295.15,
                pressure: 1019,
                humidity: 37,
                temp_min: 294.15,
                temp_max: 296.15,
            },
            visibility: 10000,
            wind: Wind { speed: 3.6, deg: 110.0 },
            clouds: Clouds { all: 0 },
            dt: 1508328000,
            sys: SunTimes {
                kind: 1,
                id: 5873,
                message: 0.0031,
                country: "ZW".into(),
                sunrise: 1508297590,
                sunset: 1508342752,
            },
            id: 878549,
            name: "Masvingo".into(),
            cod: 200,
        };

        assert_eq!(cur, expected);
    }

    #[test]
    fn current_conditions_survive_reencoding() {
        let cur: CurrentConditions = serde_json::from_str(CURRENT).unwrap();
        let json = serde_json::to_string(&cur).unwrap();
        let again: CurrentConditions = serde_json::from_str(&json).unwrap();
        assert_eq!(cur, again);
    }

    #[test]
    fn missing_fields_take_zero_values() {
        let cur: CurrentConditions = serde_json::from_str(r#"{"name": "Nowhere"}"#).unwrap();

        assert_eq!(cur.name, "Nowhere");
        assert_eq!(cur.main, Reading::default());
        assert!(cur.weather.is_empty());
        assert_eq!(cur.sys.country, "");
        assert_eq!(cur.cod, 0);
    }

    #[test]
    fn negative_humidity_is_not_rejected() {
        let cur: CurrentConditions =
            serde_json::from_str(r#"{"main": {"humidity": -5}}"#).unwrap();
        assert_eq!(cur.main.humidity, -5);
    }

    #[test]
    fn rain_is_optional_per_item() {
        let fc: Forecast = serde_json::from_str(
            r#"{"cod": "200", "list": [
                {"dt": 1, "rain": {"3h": 0.0}},
                {"dt": 2}
            ]}"#,
        )
        .unwrap();

        assert_eq!(fc.list[0].rain, Some(Rain { three_hours: 0.0 }));
        assert_eq!(fc.list[1].rain, None);
    }

    #[test]
    fn timestamps_convert_to_utc() {
        let cur: CurrentConditions = serde_json::from_str(CURRENT).unwrap();

        let observed = cur.observed_at().unwrap();
        assert_eq!(observed.to_rfc3339(), "2017-10-18T12:00:00+00:00");
        assert!(cur.sunrise_at().unwrap() < observed);
        assert!(cur.sunset_at().unwrap() > observed);
    }

    #[test]
    fn forecast_item_time_and_out_of_range() {
        let item = ForecastItem {
            dt: 1508338800,
            ..ForecastItem::default()
        };
        assert_eq!(
            item.forecast_at().unwrap().to_rfc3339(),
            "2017-10-18T15:00:00+00:00"
        );

        let far = ForecastItem {
            dt: i64::MAX,
            ..ForecastItem::default()
        };
        assert_eq!(far.forecast_at(), None);

        let cur = CurrentConditions {
            dt: i64::MIN,
            ..CurrentConditions::default()
        };
        assert_eq!(cur.observed_at(), None);
    }

    #[test]
    fn coordinates_display_with_six_decimals() {
        let c = Coordinates::new(-20.272967, 30.934364);
        assert_eq!(c.to_string(), "-20.272967,30.934364");
    }
}
