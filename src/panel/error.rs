use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PanelError>;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("configuration parse failure: {details}")]
    ConfigParse { details: String },

    #[error("io failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("framebuffer {device}: {details}")]
    Framebuffer { device: String, details: String },

    #[error("touch device {device}: {details}")]
    Touch { device: String, details: String },

    #[error("mqtt transport: {details}")]
    Transport { details: String },
}
