use crate::clean;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Returns the first candidate that can be launched and exits with code 0
/// when invoked with `probe_flags`. Probe output is discarded. Candidates
/// that are missing, not executable or exit nonzero are skipped.
pub fn find_working_executable(candidates: &[&str], probe_flags: &[&str]) -> Option<PathBuf> {
    for candidate in candidates {
        let Ok(path) = which::which(candidate) else {
            continue;
        };
        let status = Command::new(&path)
            .args(probe_flags)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        if matches!(status, Ok(status) if status.success()) {
            return Some(path);
        }
    }
    None
}

/// A probed 7zip installation. The standalone `7za` and the full `7z` take
/// the same arguments for everything done here.
#[derive(Debug)]
pub struct SevenZip {
    exe: PathBuf,
}

impl SevenZip {
    pub fn new(candidates: &[&str], probe_flags: &[&str]) -> Result<Self> {
        match find_working_executable(candidates, probe_flags) {
            Some(exe) => Ok(Self { exe }),
            None => anyhow::bail!("no working 7zip executable found, tried {:?}", candidates),
        }
    }

    pub fn exe(&self) -> &Path {
        &self.exe
    }

    /// Adds everything matching `input_pattern` to an archive at `output`,
    /// both relative to `dir`. Any stale archive is removed first so old
    /// entries cannot survive into the new one. The pattern is passed to
    /// 7zip verbatim; 7zip does its own expansion. A launch failure is an
    /// error, but a nonzero exit from 7zip itself is only reported in the
    /// returned status.
    pub fn make_archive(
        &self,
        dir: &Path,
        input_pattern: &str,
        output: &str,
    ) -> Result<ExitStatus> {
        clean::try_remove_tree(&dir.join(output));
        let status = Command::new(&self.exe)
            .current_dir(dir)
            .arg("a")
            .arg(output)
            .arg(input_pattern)
            .status()?;
        Ok(status)
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_first_working_candidate() {
        let found = find_working_executable(&["true", "false"], &[]).unwrap();
        assert!(found.ends_with("true"));
    }

    #[test]
    fn skips_missing_and_failing_candidates() {
        let found =
            find_working_executable(&["surely-not-installed-anywhere", "false", "true"], &[])
                .unwrap();
        assert!(found.ends_with("true"));
    }

    #[test]
    fn nonzero_exit_is_not_working() {
        assert!(find_working_executable(&["false"], &[]).is_none());
    }

    #[test]
    fn probe_flags_are_passed_through() {
        let found = find_working_executable(&["sh"], &["-c", "exit 0"]).unwrap();
        assert!(found.ends_with("sh"));
        assert!(find_working_executable(&["sh"], &["-c", "exit 3"]).is_none());
    }

    #[test]
    fn construction_error_names_every_candidate() {
        let err = SevenZip::new(&["no-archiver-a", "no-archiver-b"], &["-h"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("no-archiver-a"));
        assert!(message.contains("no-archiver-b"));
    }
}
