use std::path::PathBuf;

/// Errors raised while turning command-line text into specs.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid dimensions '{0}', expected LxWxH")]
    Dimensions(String),

    #[error("invalid {field} in '{input}'")]
    Number { field: &'static str, input: String },

    #[error("invalid cargo '{0}', expected NAME:LxWxH:KG:QTY")]
    Cargo(String),

    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
}

/// Errors raised by a [`crate::store::CargoStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access cargo file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed cargo list: {0}")]
    Json(#[from] serde_json::Error),
}
