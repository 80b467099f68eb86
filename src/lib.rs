use std::path::{Path, PathBuf};

pub mod archiver;
pub mod clean;
pub mod command;
pub mod download;
pub mod manifest;
mod task;

/// Candidate 7zip executables, tried in order.
pub const SEVEN_ZIP_CANDIDATES: &[&str] = &["7za", "7z"];

/// Flags that make a working 7zip installation exit with code 0.
pub const SEVEN_ZIP_PROBE_FLAGS: &[&str] = &["-h"];

/// News manifest consumed by the installer ui. Old installers read this
/// file straight out of the release, so it survives the end-of-run cleanup.
pub const MANIFEST_FILE: &str = "updates.json";

/// Final archive shipped with the release.
pub const ARCHIVE_FILE: &str = "installerMetaData.zip";

/// Metadata files downloaded on every run and removed again afterwards.
pub const DOWNLOADED_FILES: &[&str] = &[
    "versionData.json",
    "installData.json",
    "cachedDownloadSizes.json",
];

pub const METADATA_URLS: &[&str] = &[
    "https://github.com/07th-mod/python-patcher/raw/refs/heads/master/versionData.json",
    "https://github.com/07th-mod/python-patcher/raw/refs/heads/master/installData.json",
    "https://github.com/07th-mod/python-patcher/raw/refs/heads/master/cachedDownloadSizes.json",
];

/// Everything a packaging run needs to know: the directory it operates in
/// and how chatty the step output should be.
pub struct ReleaseEnv {
    work_dir: PathBuf,
    verbose: bool,
}

impl ReleaseEnv {
    pub fn new(work_dir: PathBuf, verbose: bool) -> Self {
        Self { work_dir, verbose }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.work_dir.join(MANIFEST_FILE)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.work_dir.join(ARCHIVE_FILE)
    }
}
