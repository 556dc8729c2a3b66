use failure::Fail;

/// Every failure a caller can observe. Per-entry feed problems never reach this type;
/// they are absorbed by the feed decoder.
#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "request to {} failed: {}", endpoint, reason)]
    Transport { endpoint: String, reason: String },

    #[fail(display = "response body could not be parsed: {}", _0)]
    Envelope(String),

    #[fail(display = "route document has an unexpected shape: {}", _0)]
    Structure(String),

    #[fail(display = "image could not be re-encoded: {}", _0)]
    Image(String),

    #[fail(display = "io error: {}", _0)]
    Io(String),

    #[fail(display = "feed contained no decodable flights")]
    EmptyFeed,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn transport(endpoint: &str, reason: impl ToString) -> Self {
        Error::Transport { endpoint: endpoint.to_string(), reason: reason.to_string() }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Envelope(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        let endpoint = e.url().map(|u| u.to_string()).unwrap_or_default();
        Error::Transport { endpoint, reason: e.to_string() }
    }
}
