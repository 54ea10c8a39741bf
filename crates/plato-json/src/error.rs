use thiserror::Error;

/// Failure to retrieve or parse a scene document.
///
/// None of these are retried: the viewer reports the error and exits before
/// opening a window.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read scene file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch scene from {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("scene document is not valid: {0}")]
    Json(#[from] serde_json::Error),
}

/// A known primitive whose `attributes` object could not be decoded.
#[derive(Debug, Error)]
#[error("invalid attributes for {kind}: {source}")]
pub struct AttributeError {
    pub kind: &'static str,
    #[source]
    pub source: serde_json::Error,
}

/// A primitive `class` string that names no known primitive kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown primitive class {0:?}")]
pub struct UnknownKind(pub String);
