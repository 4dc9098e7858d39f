use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Application ID is required")]
    MissingAppId,

    #[error("Secret Key is required")]
    MissingSecretKey,

    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("Invalid Request: No endpoint provided")]
    NoEndpoint,

    #[error("Invalid Request: No action provided")]
    NoAction,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected http status {status}")]
    Status { status: u16, body: String },

    #[error("cannot parse response body as json: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// True for errors raised while compiling a request, before any network activity.
    pub fn is_compile_error(&self) -> bool {
        matches!(self, Error::NoEndpoint | Error::NoAction)
    }

    /// Raw response body attached to parse and status errors.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Parse { body, .. } | Error::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}
