use crate::constants::FORECAST_PERIODS;
use crate::models::{AlertFeature, ForecastPeriod};

/// Separator placed between alert or forecast blocks
pub const BLOCK_SEPARATOR: &str = "\n---\n";

/// Formats a single alert feature into a readable block
pub fn format_alert(feature: &AlertFeature) -> String {
    let props = &feature.properties;
    format!(
        "\nEvent: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}\n",
        props.event.as_deref().unwrap_or("Unknown"),
        props.area_desc.as_deref().unwrap_or("Unknown"),
        props.severity.as_deref().unwrap_or("Unknown"),
        props
            .description
            .as_deref()
            .unwrap_or("No description available"),
        props
            .instruction
            .as_deref()
            .unwrap_or("No specific instructions provided"),
    )
}

/// Formats all alert features, separated by `---` lines
pub fn format_alerts(features: &[AlertFeature]) -> String {
    features
        .iter()
        .map(format_alert)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

fn format_period(period: &ForecastPeriod) -> String {
    format!(
        "\n{}:\nTemperature: {}\u{00b0}{}\nWind: {} {}\nForecast: {}\n",
        period.name,
        period.temperature,
        period.temperature_unit,
        period.wind_speed,
        period.wind_direction,
        period.detailed_forecast
    )
}

/// Formats the upcoming forecast periods into a human-readable string
pub fn format_forecast(periods: &[ForecastPeriod]) -> String {
    periods
        .iter()
        .take(FORECAST_PERIODS)
        .map(format_period)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}
