use std::time::Duration;

/// User agent string sent with every NWS request
pub const USER_AGENT: &str = "weather-app/1.0";

/// Accept header value; NWS serves GeoJSON
pub const ACCEPT: &str = "application/geo+json";

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// Per-request timeout, after which the request counts as failed
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of forecast periods included in a forecast report
pub const FORECAST_PERIODS: usize = 5;
