//! Prompt templates offered to the calling agent.
//!
//! Each template renders a single user message; none of them touch the network.

use rmcp::model::{PromptMessage, PromptMessageRole};

use crate::models::Location;

fn user_message(text: String) -> Vec<PromptMessage> {
    vec![PromptMessage::new_text(PromptMessageRole::User, text)]
}

/// Asks for the active alerts in a state
pub fn alert_by_state(state: &str) -> Vec<PromptMessage> {
    user_message(format!(
        "What are the current weather alerts for {}?\n\
         Please use the weather tool to check for any active alerts or warnings.",
        state
    ))
}

/// Asks for the forecast at a named coordinate
///
/// Coordinates keep their fractional part (`40.0`, not `40`).
pub fn forecast_by_location(
    location_name: &str,
    latitude: f64,
    longitude: f64,
) -> Vec<PromptMessage> {
    user_message(format!(
        "I need a weather forecast for {} at latitude {:?} and longitude {:?}.\n\
         Can you tell me the temperature, wind conditions, and general forecast?",
        location_name, latitude, longitude
    ))
}

/// Asks for state alerts plus a forecast for every stop of a trip
pub fn trip_planning(state: &str, locations: &[Location]) -> Vec<PromptMessage> {
    let location_text: String = locations
        .iter()
        .map(|loc| {
            format!(
                "- {} at coordinates {}, {}\n",
                loc.name, loc.latitude, loc.longitude
            )
        })
        .collect();

    user_message(format!(
        "I'm planning a trip to {} and will be visiting several locations:\n\
         {}\n\
         Are there any weather alerts in the state I should know about?\n\
         What's the forecast for each of these locations?",
        state, location_text
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn single_user_text(messages: Vec<PromptMessage>) -> String {
        assert_eq!(messages.len(), 1);
        let value = serde_json::to_value(&messages[0]).unwrap();
        assert_eq!(value["role"], "user");
        match &value["content"]["text"] {
            Value::String(text) => text.clone(),
            other => panic!("expected text content, got {}", other),
        }
    }

    #[test]
    fn alert_by_state_mentions_state() {
        let text = single_user_text(alert_by_state("TX"));
        assert_eq!(
            text,
            "What are the current weather alerts for TX?\n\
             Please use the weather tool to check for any active alerts or warnings."
        );
    }

    #[test]
    fn forecast_by_location_embeds_name_and_coordinates() {
        let text = single_user_text(forecast_by_location("Boulder", 40.015, -105.2705));
        assert!(text.starts_with(
            "I need a weather forecast for Boulder at latitude 40.015 and longitude -105.2705.\n"
        ));
        assert!(text.ends_with("temperature, wind conditions, and general forecast?"));
    }

    #[test]
    fn forecast_by_location_keeps_whole_degree_fraction() {
        let text = single_user_text(forecast_by_location("X", 40.0, -105.0));
        assert!(text.contains("at latitude 40.0 and longitude -105.0."));
    }

    #[test]
    fn trip_planning_lists_locations_in_order() {
        let locations = vec![
            Location {
                name: "A".to_string(),
                latitude: 1.0,
                longitude: 2.0,
            },
            Location {
                name: "B".to_string(),
                latitude: 3.0,
                longitude: 4.0,
            },
        ];

        let text = single_user_text(trip_planning("CA", &locations));
        let lines: Vec<_> = text.lines().collect();

        let a = lines.iter().position(|l| *l == "- A at coordinates 1, 2");
        let b = lines.iter().position(|l| *l == "- B at coordinates 3, 4");
        assert!(matches!((a, b), (Some(a), Some(b)) if a < b));
        assert!(text
            .starts_with("I'm planning a trip to CA and will be visiting several locations:\n"));
    }

    #[test]
    fn trip_planning_without_locations_keeps_template_shape() {
        let text = single_user_text(trip_planning("NV", &[]));
        assert_eq!(
            text,
            "I'm planning a trip to NV and will be visiting several locations:\n\n\
             Are there any weather alerts in the state I should know about?\n\
             What's the forecast for each of these locations?"
        );
    }
}
