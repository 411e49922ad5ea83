//! Common types and data structures

use serde::Deserialize;

/// Response body of the message API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponsePayload {
    // A schema-mismatched body ({}) still deserializes; the absent value
    // renders as an empty string.
    #[serde(default)]
    pub message: Option<String>,
}

/// Lifecycle of the single fetch issued when the message view mounts
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Loaded(ResponsePayload),
    Failed(String),
}

impl FetchState {
    /// Text shown by the message panel for this state.
    pub fn display_text(&self) -> String {
        match self {
            FetchState::Loading => "Loading...".to_string(),
            FetchState::Loaded(payload) => payload.message.clone().unwrap_or_default(),
            FetchState::Failed(reason) => format!("Request failed: {}", reason),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_displays_placeholder() {
        assert_eq!(FetchState::Loading.display_text(), "Loading...");
    }

    #[test]
    fn loaded_displays_message() {
        let state = FetchState::Loaded(ResponsePayload {
            message: Some("hello".to_string()),
        });
        assert_eq!(state.display_text(), "hello");
    }

    #[test]
    fn loaded_without_message_displays_empty() {
        let state = FetchState::Loaded(ResponsePayload { message: None });
        assert_eq!(state.display_text(), "");
    }

    #[test]
    fn failed_displays_reason() {
        let state = FetchState::Failed("connection refused".to_string());
        assert_eq!(state.display_text(), "Request failed: connection refused");
    }

    #[test]
    fn payload_parses_with_message() {
        let payload: ResponsePayload = serde_json::from_str(r#"{"message":"hello"}"#).unwrap();
        assert_eq!(payload.message.as_deref(), Some("hello"));
    }

    #[test]
    fn payload_parses_without_message() {
        let payload: ResponsePayload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.message, None);
    }
}
