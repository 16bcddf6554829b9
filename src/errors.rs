use thiserror::Error;

/// Failures talking to the data source (PokeAPI or a stand-in).
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// The request never produced a response (connect, timeout, reset).
    #[error("network failure requesting {url}: {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("HTTP error! status: {status} ({url})")]
    Status { url: String, status: u16 },

    /// The body decoded but an expected field was missing or mistyped.
    #[error("incomplete data from {url}: {message}")]
    DataIncomplete { url: String, message: String },

    /// The body wasn't valid JSON.
    #[error("malformed response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl DataSourceError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            DataSourceError::Network { .. } => true,
            DataSourceError::Status { status, .. } => *status >= 500 || *status == 429,
            DataSourceError::DataIncomplete { .. } | DataSourceError::Decode { .. } => false,
        }
    }
}

/// Errors raised at the intent boundary of a battle or catch encounter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The intent isn't accepted in the current state (e.g. a move after the battle ended).
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// Move index is out of bounds for the offered move list.
    #[error("invalid move index: {0}")]
    InvalidMoveIndex(usize),
}

/// Errors reading or writing the unlocked set.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Terminal failure of an initial load once retries are exhausted.
#[derive(Debug, Error)]
#[error("failed to load {what} after {attempts} attempt(s): {source}")]
pub struct LoadError {
    pub what: String,
    pub attempts: u32,
    #[source]
    pub source: DataSourceError,
}

pub type DataResult<T> = Result<T, DataSourceError>;

pub type ActionResult<T> = Result<T, ActionError>;

pub type StoreResult<T> = Result<T, StoreError>;
