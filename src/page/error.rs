use thiserror::Error;

/// WebDriver error codes that mean "the element exists but could not be used right now".
const INTERACTION_ERRORS: [&str; 3] = [
    "element not interactable",
    "element click intercepted",
    "stale element reference",
];

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("WebDriver command '{command}' failed ({error}): {message}")]
    WebDriver {
        command: String,
        error: String,
        message: String,
    },

    #[error("WebDriver protocol error: {detail}")]
    Protocol { detail: String },

    #[error("Failed to decode WebDriver response for '{command}'")]
    Decode {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("The page session has already been released")]
    SessionReleased,
}

impl PageError {
    /// True for errors raised by an element that was found but rejected the interaction.
    pub fn is_interaction(&self) -> bool {
        match self {
            PageError::WebDriver { error, .. } => INTERACTION_ERRORS.contains(&error.as_str()),
            _ => false,
        }
    }
}
