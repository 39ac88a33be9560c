use schemars::JsonSchema;
use serde::{de, Deserialize, Deserializer, Serialize};

// ============================================================================
// National Weather Service API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AlertResponse {
    /// `None` only when the key is missing; an explicit `null` reads as no alerts
    #[serde(default, deserialize_with = "null_as_empty")]
    pub features: Option<Vec<AlertFeature>>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default()))
}

#[derive(Debug, Deserialize)]
pub struct AlertFeature {
    #[serde(default)]
    pub properties: AlertProperties,
}

/// Alert fields used in reports. NWS omits or nulls any of them freely.
#[derive(Debug, Default, Deserialize)]
pub struct AlertProperties {
    pub event: Option<String>,
    #[serde(rename = "areaDesc")]
    pub area_desc: Option<String>,
    pub severity: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PointsResponse {
    pub properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
pub struct PointsProperties {
    /// Absolute URL of the gridpoint forecast for this point
    pub forecast: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
pub struct ForecastProperties {
    pub periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastPeriod {
    pub name: String,
    pub temperature: f64,
    #[serde(rename = "temperatureUnit")]
    pub temperature_unit: String,
    #[serde(rename = "windSpeed")]
    pub wind_speed: String,
    #[serde(rename = "windDirection")]
    pub wind_direction: String,
    #[serde(rename = "detailedForecast")]
    pub detailed_forecast: String,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAlertsRequest {
    /// Two-letter US state code (e.g. CA for California, NY for New York)
    pub state: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetForecastRequest {
    /// Latitude of the location in decimal degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude of the location in decimal degrees (-180 to 180)
    pub longitude: f64,
}

// ============================================================================
// MCP Prompt Argument Models
// ============================================================================
//
// Prompt arguments often arrive as strings, so coordinates and location
// lists also accept their string-encoded forms.

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AlertByStateArgs {
    /// Two-letter US state code (e.g. CA for California, TX for Texas)
    pub state: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ForecastByLocationArgs {
    /// Name of the location (for reference only)
    pub location_name: String,
    /// Latitude of the location in decimal degrees
    #[serde(deserialize_with = "number_or_string")]
    #[schemars(with = "f64")]
    pub latitude: f64,
    /// Longitude of the location in decimal degrees
    #[serde(deserialize_with = "number_or_string")]
    #[schemars(with = "f64")]
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Location {
    pub name: String,
    #[serde(deserialize_with = "number_or_string")]
    #[schemars(with = "f64")]
    pub latitude: f64,
    #[serde(deserialize_with = "number_or_string")]
    #[schemars(with = "f64")]
    pub longitude: f64,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct TripPlanningArgs {
    /// Two-letter US state code for the trip state
    pub state: String,
    /// Locations to visit, each with a name and coordinates
    #[serde(deserialize_with = "location_list")]
    #[schemars(with = "Vec<Location>")]
    pub locations: Vec<Location>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a number, got {:?}", s))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LocationList {
    List(Vec<Location>),
    Encoded(String),
}

fn location_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Location>, D::Error> {
    match LocationList::deserialize(deserializer)? {
        LocationList::List(locations) => Ok(locations),
        LocationList::Encoded(s) => serde_json::from_str(&s).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn alert_properties_tolerate_missing_and_null_fields() {
        let alerts: AlertResponse = serde_json::from_value(json!({
            "features": [
                { "properties": { "event": "Flood Warning", "severity": null } },
                {}
            ]
        }))
        .unwrap();

        let features = alerts.features.unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].properties.event.as_deref(), Some("Flood Warning"));
        assert!(features[0].properties.severity.is_none());
        assert!(features[1].properties.event.is_none());
    }

    #[test]
    fn alert_response_without_features_parses_as_none() {
        let alerts: AlertResponse =
            serde_json::from_value(json!({ "type": "FeatureCollection" })).unwrap();
        assert!(alerts.features.is_none());
    }

    #[test]
    fn null_features_parse_as_empty_list() {
        let alerts: AlertResponse = serde_json::from_value(json!({ "features": null })).unwrap();
        assert_eq!(alerts.features.map(|f| f.len()), Some(0));
    }

    #[test]
    fn points_response_requires_forecast_url() {
        let missing = serde_json::from_value::<PointsResponse>(json!({ "properties": {} }));
        assert!(missing.is_err());
    }

    #[test]
    fn forecast_args_accept_numeric_strings() {
        let args: ForecastByLocationArgs = serde_json::from_value(json!({
            "location_name": "Denver",
            "latitude": "39.7392",
            "longitude": -104.9903
        }))
        .unwrap();

        assert_eq!(args.latitude, 39.7392);
        assert_eq!(args.longitude, -104.9903);
    }

    #[test]
    fn forecast_args_reject_non_numeric_coordinates() {
        let result = serde_json::from_value::<ForecastByLocationArgs>(json!({
            "location_name": "Nowhere",
            "latitude": "north",
            "longitude": 0
        }));
        assert!(result.is_err());
    }

    #[test]
    fn trip_locations_accept_array_or_encoded_string() {
        let direct: TripPlanningArgs = serde_json::from_value(json!({
            "state": "CO",
            "locations": [{ "name": "A", "latitude": 1, "longitude": 2 }]
        }))
        .unwrap();
        let encoded: TripPlanningArgs = serde_json::from_value(json!({
            "state": "CO",
            "locations": "[{\"name\": \"A\", \"latitude\": 1, \"longitude\": 2}]"
        }))
        .unwrap();

        assert_eq!(direct.locations, encoded.locations);
        assert_eq!(direct.locations[0].name, "A");
    }

    #[test]
    fn trip_location_missing_name_is_rejected() {
        let result = serde_json::from_value::<TripPlanningArgs>(json!({
            "state": "CO",
            "locations": [{ "latitude": 1, "longitude": 2 }]
        }));
        assert!(result.is_err());
    }
}
