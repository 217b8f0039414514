use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP status error: {0}")]
    HttpStatus(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("User {user_id} is missing field `{field}`")]
    MissingField { user_id: u64, field: &'static str },
}

impl Error {
    /// Errors confined to a single record.
    pub fn is_structural(&self) -> bool {
        matches!(self, Error::MissingField { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
