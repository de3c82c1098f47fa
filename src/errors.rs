use thiserror::Error;

/// Failures talking to the Slides and Drive REST APIs.
///
/// These are the construction errors a caller has to see: without an open (or
/// freshly copied) document there is nothing to draw on.
#[derive(Error, Debug)]
pub enum SlidesApiError {
    /// Transport failure inside `reqwest`.
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A request body could not be encoded or a response body decoded.
    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-2xx answer from Google, with the message from its error envelope.
    #[error("API returned an error: Status {status}, Message: {message}")]
    ApiError {
        status: reqwest::StatusCode,
        message: String,
    },

    /// Credentials could not be loaded or produced no access token.
    #[error("Authentication setup/configuration error: {0}")]
    AuthSetupError(String),

    #[cfg(not(target_arch = "wasm32"))]
    #[cfg(feature = "yup-oauth2")]
    #[error("Authentication library error: {0}")]
    AuthLibError(#[from] yup_oauth2::Error),

    /// Rejected before any request was sent (empty ids, empty batch, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SlidesApiError>;
