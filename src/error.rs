use crate::atelier::export::ExportError;
use crate::guide::GuideError;

/// Crate-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum KioskError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("guide error: {0}")]
    Guide(#[from] GuideError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<toml::de::Error> for KioskError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KioskError>;
