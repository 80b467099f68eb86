use anyhow::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use reqwest::blocking::Client;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub struct DownloadManager {
    client: Client,
}

impl Default for DownloadManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadManager {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Downloads `url` into `dir`, keeping the filename the server implies
    /// rather than picking one. Redirects are followed; an error response
    /// yields an `Err` and writes no file.
    pub fn fetch(&self, dir: &Path, url: &str) -> Result<PathBuf> {
        let mut resp = self.client.get(url).send()?;
        anyhow::ensure!(
            resp.status().is_success(),
            "GET {} returned status code {}",
            url,
            resp.status()
        );
        let disposition = resp
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        // Filename comes off the final url, after redirects.
        let name = remote_file_name(resp.url().as_str(), disposition.as_deref())
            .ok_or_else(|| anyhow::anyhow!("cannot derive a filename for {}", url))?;

        let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stdout())
        .with_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {prefix:.bold} [{elapsed}] {wide_bar:.green} {bytes}/{total_bytes} {msg}")?
                .progress_chars("█▇▆▅▄▃▂▁  ")
        );
        pb.set_prefix(name.clone());
        pb.set_message("📥 downloading");
        pb.set_length(resp.content_length().unwrap_or_default());

        let dest = dir.join(&name);
        let file = BufWriter::new(File::create(&dest)?);
        std::io::copy(&mut resp, &mut pb.wrap_write(file))?;
        pb.finish_with_message("📥 downloaded");
        Ok(dest)
    }
}

/// The filename a server implies for a response: the `filename` parameter
/// of a `Content-Disposition` header when present, otherwise the last path
/// segment of the url.
pub fn remote_file_name(url: &str, content_disposition: Option<&str>) -> Option<String> {
    if let Some(value) = content_disposition {
        for param in value.split(';') {
            if let Some(name) = param.trim().strip_prefix("filename=") {
                let name = name.trim().trim_matches('"');
                if !name.is_empty() {
                    return Some(name.to_string());
                }
            }
        }
    }
    let path = url.split(['?', '#']).next()?;
    path.rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_from_url_path() {
        assert_eq!(
            remote_file_name("https://example.com/a/b/versionData.json", None).as_deref(),
            Some("versionData.json")
        );
    }

    #[test]
    fn query_and_fragment_are_ignored() {
        assert_eq!(
            remote_file_name("https://example.com/installData.json?token=abc#top", None).as_deref(),
            Some("installData.json")
        );
    }

    #[test]
    fn trailing_slash_has_no_filename() {
        assert_eq!(remote_file_name("https://example.com/files/", None), None);
    }

    #[test]
    fn content_disposition_wins_over_url() {
        let header = Some("attachment; filename=\"cachedDownloadSizes.json\"");
        assert_eq!(
            remote_file_name("https://example.com/raw/blob", header).as_deref(),
            Some("cachedDownloadSizes.json")
        );
    }

    #[test]
    fn empty_disposition_filename_falls_back_to_url() {
        let header = Some("attachment; filename=\"\"");
        assert_eq!(
            remote_file_name("https://example.com/a.json", header).as_deref(),
            Some("a.json")
        );
    }
}
