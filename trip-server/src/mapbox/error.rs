//! Mapbox client error types.

/// Errors from the Mapbox HTTP client and the fixture provider.
#[derive(Debug, thiserror::Error)]
pub enum MapboxError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization or conversion failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Directions answered with a code other than `Ok` or a no-route code
    #[error("directions error {code}: {message}")]
    Directions { code: String, message: String },

    /// Rate limited by the API
    #[error("rate limited by Mapbox API")]
    RateLimited,

    /// Invalid or missing access token
    #[error("unauthorized (invalid access token)")]
    Unauthorized,

    /// Fixture data could not be loaded or a fixture call was set to fail
    #[error("fixture error: {0}")]
    Fixture(String),
}

/// Render a captured response body for error messages.
fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(" (body: {body})"),
        None => String::new(),
    }
}
