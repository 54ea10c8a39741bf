use std::fmt;
use std::path::PathBuf;

use crate::document::SceneDocument;
use crate::error::LoadError;

/// Where a scene document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneSource {
    Path(PathBuf),
    /// An `http://` or `https://` URL, fetched with a single GET.
    Url(String),
}

impl SceneSource {
    /// Classifies a command-line argument: anything with an HTTP(S) scheme is a
    /// URL, everything else a filesystem path.
    pub fn parse(arg: &str) -> Self {
        let lower = arg.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SceneSource::Url(arg.to_string())
        } else {
            SceneSource::Path(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for SceneSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneSource::Path(p) => write!(f, "{}", p.display()),
            SceneSource::Url(u) => f.write_str(u),
        }
    }
}

impl From<&str> for SceneSource {
    fn from(arg: &str) -> Self {
        SceneSource::parse(arg)
    }
}

/// Retrieves and parses a scene document.
///
/// Blocks until the read or fetch completes. There is no retry and no timeout
/// beyond the HTTP client's own.
pub fn load_scene(source: &SceneSource) -> Result<SceneDocument, LoadError> {
    log::info!("loading scene from {source}");

    let bytes = match source {
        SceneSource::Path(path) => std::fs::read(path).map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            source: e,
        })?,
        SceneSource::Url(url) => fetch(url)?,
    };

    let doc = parse_scene_slice(&bytes)?;
    log::info!(
        "scene loaded: {} primitives, {} features",
        doc.primitives.len(),
        doc.features.len()
    );
    Ok(doc)
}

fn fetch(url: &str) -> Result<Vec<u8>, LoadError> {
    let http = |e| LoadError::Http {
        url: url.to_string(),
        source: e,
    };

    let response = reqwest::blocking::get(url).map_err(http)?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().map_err(http)?;
    log::debug!("fetched {} bytes from {url}", body.len());
    Ok(body.to_vec())
}

/// Parses an in-memory JSON document.
pub fn parse_scene(src: &str) -> Result<SceneDocument, LoadError> {
    Ok(serde_json::from_str(src)?)
}

pub fn parse_scene_slice(bytes: &[u8]) -> Result<SceneDocument, LoadError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn urls_are_detected() {
        assert_eq!(SceneSource::parse("https://host/3.json"), SceneSource::Url("https://host/3.json".into()));
        assert_eq!(SceneSource::parse("HTTP://host/1.json"), SceneSource::Url("HTTP://host/1.json".into()));
    }
    #[test] fn plain_names_are_paths() {
        assert_eq!(SceneSource::parse("1.json"), SceneSource::Path("1.json".into()));
        assert_eq!(SceneSource::parse("file://x.json"), SceneSource::Path("file://x.json".into()));
    }
    #[test] fn missing_file_is_io_error() {
        let err = load_scene(&SceneSource::parse("definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
    #[test] fn syntax_error_is_json_error() {
        assert!(matches!(parse_scene("{ size: "), Err(LoadError::Json(_))));
    }
    #[test] fn wrong_shape_is_json_error() {
        assert!(matches!(parse_scene(r#"{"primitives": 3}"#), Err(LoadError::Json(_))));
    }
    #[test] fn load_from_file() {
        let path = std::env::temp_dir().join(format!("plato-json-load-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"size": [4, 3], "primitives": []}"#).unwrap();
        let doc = load_scene(&SceneSource::Path(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(doc.size, [4.0, 3.0]);
    }
}
