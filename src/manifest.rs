use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One news entry shown by the installer ui. Keeping the html in a
/// release-side manifest lets the news change without shipping a new
/// installer build.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Article {
    pub status: String,
}

pub type NewsManifest = BTreeMap<String, Article>;

/// Builds the manifest from every `*.html` file in `dir`, keyed by file
/// stem. The fragments are authored by hand, so an unreadable one is an
/// error rather than a silently thinner manifest.
pub fn build(dir: &Path) -> Result<NewsManifest> {
    let pattern = dir.join("*.html");
    let pattern = pattern.to_str().context("working directory is not utf-8")?;
    let mut manifest = NewsManifest::new();
    for entry in glob::glob(pattern)? {
        let path = entry?;
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let status = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        manifest.insert(name.to_string(), Article { status });
    }
    Ok(manifest)
}

/// Writes the manifest as compact json to `updates.json` in `dir`.
pub fn write(dir: &Path, manifest: &NewsManifest) -> Result<PathBuf> {
    let path = dir.join(crate::MANIFEST_FILE);
    std::fs::write(&path, serde_json::to_string(manifest)?)?;
    Ok(path)
}
