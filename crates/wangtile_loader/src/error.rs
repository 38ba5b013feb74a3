use std::path::PathBuf;
use thiserror::Error;
use wangtile_autotile::AutotileError;

/// Error type for tileset and settings loading failures
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse settings: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("missing attribute '{attribute}' in <{element}>")]
    MissingAttribute { element: String, attribute: String },
    #[error("invalid value '{value}' for attribute '{attribute}' in <{element}>: {reason}")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
        reason: String,
    },
    #[error("document has no <{0}> element")]
    MissingElement(String),
    #[error("unsupported tileset format: {0}")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Autotile(#[from] AutotileError),
}

impl LoadError {
    pub(crate) fn invalid(
        element: &str,
        attribute: &str,
        value: &str,
        reason: impl ToString,
    ) -> Self {
        LoadError::InvalidAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
