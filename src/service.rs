use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::redirect::Policy;
use reqwest::Client;
use rmcp::{
    handler::server::{
        router::{prompt::PromptRouter, tool::ToolRouter},
        wrapper::Parameters,
        ServerHandler,
    },
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, Implementation,
        ListPromptsResult, PaginatedRequestParam, PromptMessage, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    prompt, prompt_handler, prompt_router,
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer,
};
use serde::de::DeserializeOwned;

use crate::constants::{self, NWS_API_BASE, REQUEST_TIMEOUT, USER_AGENT};
use crate::formatters::{format_alerts, format_forecast};
use crate::models::{
    AlertByStateArgs, AlertResponse, ForecastByLocationArgs, ForecastResponse, GetAlertsRequest,
    GetForecastRequest, PointsResponse, TripPlanningArgs,
};
use crate::prompts;

pub const ALERTS_UNAVAILABLE: &str = "Unable to fetch alerts or no alerts found.";
pub const NO_ACTIVE_ALERTS: &str = "No active alerts for this state.";
pub const POINTS_UNAVAILABLE: &str = "Unable to fetch forecast data for this location.";
pub const FORECAST_UNAVAILABLE: &str = "Unable to fetch detailed forecast.";

/// Where and how the service reaches the NWS API
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: NWS_API_BASE.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    client: Arc<Client>,
    base_url: Arc<str>,
    tool_router: ToolRouter<Self>,
    prompt_router: PromptRouter<Self>,
}

impl Weather {
    /// Creates a Weather service against the public NWS API
    pub fn new() -> Result<Self> {
        Self::with_config(WeatherConfig::default())
    }

    pub fn with_config(config: WeatherConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(constants::ACCEPT));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout)
            // a redirect is a non-2xx answer, not data
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.trim_end_matches('/').into(),
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        })
    }

    async fn try_request<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("Request failed with status: {}", response.status());
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Makes a GET request and deserializes the JSON response.
    ///
    /// Timeouts, connection errors, non-2xx statuses and bodies that do not
    /// parse as `T` all yield `None`; the cause is only logged.
    pub async fn make_request<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        match self.try_request(url).await {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!("NWS request to {} failed: {:#}", url, e);
                None
            }
        }
    }

    /// Active alerts for a state, formatted as text
    pub async fn alerts(&self, state: &str) -> String {
        let url = format!("{}/alerts/active/area/{}", self.base_url, state);

        let Some(features) = self
            .make_request::<AlertResponse>(&url)
            .await
            .and_then(|alerts| alerts.features)
        else {
            return ALERTS_UNAVAILABLE.to_string();
        };

        if features.is_empty() {
            return NO_ACTIVE_ALERTS.to_string();
        }

        format_alerts(&features)
    }

    /// Upcoming forecast periods for a coordinate, formatted as text
    pub async fn forecast(&self, latitude: f64, longitude: f64) -> String {
        let points_url = format!("{}/points/{},{}", self.base_url, latitude, longitude);

        let Some(points) = self.make_request::<PointsResponse>(&points_url).await else {
            return POINTS_UNAVAILABLE.to_string();
        };

        let Some(forecast) = self
            .make_request::<ForecastResponse>(&points.properties.forecast)
            .await
        else {
            return FORECAST_UNAVAILABLE.to_string();
        };

        format_forecast(&forecast.properties.periods)
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "A weather information service powered by the National Weather Service API. \
                Provides active alerts for US states and short-range forecasts for US locations."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Gets active weather alerts for a US state
    #[tool(description = "Get active weather alerts and warnings for a US state using the National Weather Service API. Provide a two-letter state code (e.g. CA for California, NY for New York). Returns event type, affected area, severity, description and instructions for each alert.")]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting alerts for state: {}", request.state);

        let formatted = self.alerts(&request.state).await;

        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }

    /// Gets the weather forecast for a US location
    #[tool(description = "Get a detailed weather forecast for a location in the United States using the National Weather Service API. Provide latitude and longitude in decimal degrees. Returns temperature, wind and forecast details for the next 5 periods.")]
    async fn get_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting forecast for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let formatted = self.forecast(request.latitude, request.longitude).await;

        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }
}

#[prompt_router]
impl Weather {
    #[prompt(
        name = "alert_by_state",
        description = "Get current weather alerts for a specific US state"
    )]
    async fn alert_by_state(
        &self,
        Parameters(args): Parameters<AlertByStateArgs>,
    ) -> Result<Vec<PromptMessage>, McpError> {
        tracing::info!("Rendering alert_by_state prompt for {}", args.state);
        Ok(prompts::alert_by_state(&args.state))
    }

    #[prompt(
        name = "forecast_by_location",
        description = "Get weather forecast for a specific location by coordinates"
    )]
    async fn forecast_by_location(
        &self,
        Parameters(args): Parameters<ForecastByLocationArgs>,
    ) -> Result<Vec<PromptMessage>, McpError> {
        tracing::info!(
            "Rendering forecast_by_location prompt for {}",
            args.location_name
        );
        Ok(prompts::forecast_by_location(
            &args.location_name,
            args.latitude,
            args.longitude,
        ))
    }

    #[prompt(
        name = "trip_planning",
        description = "Get weather alerts and forecasts for a planned trip"
    )]
    async fn trip_planning(
        &self,
        Parameters(args): Parameters<TripPlanningArgs>,
    ) -> Result<Vec<PromptMessage>, McpError> {
        tracing::info!(
            "Rendering trip_planning prompt for {} with {} locations",
            args.state,
            args.locations.len()
        );
        Ok(prompts::trip_planning(&args.state, &args.locations))
    }
}
