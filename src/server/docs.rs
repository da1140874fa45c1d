use crate::{Error, Result};
use std::path::Path;
use tracing::warn;

/// Documentation files that may be served by name.
pub const ALLOWED_DOCS: &[&str] = &["README.md", "API.md", "USAGE.md"];

/// Returns the allow-listed entry matching `name` exactly, if any.
pub fn resolve(name: &str) -> Option<&'static str> {
    ALLOWED_DOCS.iter().copied().find(|allowed| *allowed == name)
}

pub fn content_type(name: &str) -> &'static str {
    if name.ends_with(".md") {
        "text/markdown; charset=utf-8"
    } else {
        "text/plain; charset=utf-8"
    }
}

pub async fn read(docs_dir: &Path, name: &str) -> Result<String> {
    let file = resolve(name).ok_or_else(|| Error::not_found("File not found"))?;

    tokio::fs::read_to_string(docs_dir.join(file))
        .await
        .map_err(|e| {
            warn!(file, error = %e, "Allowed documentation file could not be read");
            Error::not_found("File not found")
        })
}
