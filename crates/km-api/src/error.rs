use thiserror::Error;

#[derive(Debug, Error)]
pub enum GetError {
    #[error("invalid endpoint `{0}`: {1}")]
    InvalidEndpoint(String, String),
    #[error("the request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("{message}")]
    ResponseError {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("the response body could not be read: {0}")]
    ResponseBodyError(#[source] reqwest::Error),
    #[error("unable to parse the response body: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl GetError {
    /// Message fit for showing to the user in place of the listing.
    pub fn user_message(&self) -> String {
        match self {
            GetError::ResponseError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("comment cannot be empty")]
    EmptyComment,
    #[error("feedback cannot be empty")]
    EmptyFeedback,
    #[error("email and password cannot be empty")]
    MissingCredentials,
    #[error("`{0}` is not a valid email address")]
    InvalidEmail(String),
}

/// Errors from operations that act on behalf of the user.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("you must be logged in to do that")]
    NotLoggedIn,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Get(#[from] GetError),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read the file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("unable to parse the file: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("unable to write the file: {0}")]
    WriteError(#[from] std::io::Error),
    #[error("unable to serialize the data: {0}")]
    SerializeError(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read the config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("unable to parse the config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid {0} url `{1}`")]
    InvalidUrl(&'static str, String),
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}
