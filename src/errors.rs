use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaceClipError {
    #[error("Clipboard initialization failed: {0}")]
    ClipboardInitError(String),

    #[error("Clipboard write failed: {0}")]
    ClipboardWriteError(String),

    #[error("Search request failed: {0}")]
    SearchError(String),

    #[error("Unexpected search response: {0}")]
    ResponseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Terminal error: {0}")]
    TerminalError(String),

    #[error("IO Error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for PlaceClipError {
    fn from(err: std::io::Error) -> Self {
        PlaceClipError::IoError(err.to_string())
    }
}

impl From<reqwest::Error> for PlaceClipError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PlaceClipError::ResponseError(err.to_string())
        } else {
            PlaceClipError::SearchError(err.to_string())
        }
    }
}
