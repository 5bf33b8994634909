use thiserror::Error;

#[derive(Error, Debug)]
pub enum RolodexError {
    /// The request never produced a response (DNS, connect, transport).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a 4xx/5xx status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// 401/403 from the backend; the stored session has been cleared.
    #[error("session expired or unauthorized, run 'rolodex login'")]
    SessionExpired,

    #[error("not logged in, run 'rolodex login'")]
    NotLoggedIn,

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("configuration error: {0}")]
    Config(String),

    /// Client-side form validation, raised before anything is submitted.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for RolodexError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return RolodexError::Other(format!("unexpected response body: {err}"));
        }
        // Anything that never yielded a usable response is a transport failure.
        RolodexError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RolodexError>;
