use std::path::Path;
use std::time::Duration;

const ATTEMPTS: u32 = 5;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// What happened to the path. Callers that only want best-effort cleanup
/// can ignore this; tests and logging look at it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CleanOutcome {
    /// The file or directory existed and was removed.
    Removed,
    /// Nothing at the path; counts as success.
    Missing,
    /// Every attempt failed; the path may still exist.
    GaveUp,
}

/// Removes a file or directory tree, retrying on errors other than "not
/// found". Another process briefly holding the output archive open is the
/// usual reason a removal needs a second attempt.
pub fn try_remove_tree(path: &Path) -> CleanOutcome {
    for attempt in 1..=ATTEMPTS {
        let result = if path.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        };
        match result {
            Ok(()) => return CleanOutcome::Removed,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return CleanOutcome::Missing;
            }
            Err(err) => {
                tracing::warn!(
                    "failed to remove {} (attempt {}/{}): {:?}",
                    path.display(),
                    attempt,
                    ATTEMPTS,
                    err
                );
            }
        }
        if attempt < ATTEMPTS {
            std::thread::sleep(RETRY_DELAY);
        }
    }
    CleanOutcome::GaveUp
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CleanMode {
    /// Remove the downloaded metadata, the archive and the news manifest.
    Full,
    /// Remove only the downloaded metadata. The archive was just built and
    /// old installers still expect `updates.json` in the release, so both
    /// stay behind.
    Partial,
}

/// Clears the generated files a run leaves behind. Best effort; the
/// per-file outcomes are returned for logging and tests.
pub fn clear_generated(dir: &Path, mode: CleanMode) -> Vec<(&'static str, CleanOutcome)> {
    let mut files = crate::DOWNLOADED_FILES.to_vec();
    if mode == CleanMode::Full {
        files.push(crate::ARCHIVE_FILE);
        files.push(crate::MANIFEST_FILE);
    }
    files
        .into_iter()
        .map(|name| (name, try_remove_tree(&dir.join(name))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nothing-here");
        assert_eq!(try_remove_tree(&path), CleanOutcome::Missing);
        assert_eq!(try_remove_tree(&path), CleanOutcome::Missing);
    }

    #[test]
    fn removes_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stale.json");
        std::fs::write(&path, "{}").unwrap();
        assert_eq!(try_remove_tree(&path), CleanOutcome::Removed);
        assert!(!path.exists());
    }

    #[test]
    fn removes_a_directory_tree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("outer");
        std::fs::create_dir_all(root.join("inner")).unwrap();
        std::fs::write(root.join("inner").join("leaf.txt"), "x").unwrap();
        assert_eq!(try_remove_tree(&root), CleanOutcome::Removed);
        assert!(!root.exists());
    }

    fn touch_all(dir: &Path) {
        for name in crate::DOWNLOADED_FILES {
            std::fs::write(dir.join(name), "{}").unwrap();
        }
        std::fs::write(dir.join(crate::ARCHIVE_FILE), "zip").unwrap();
        std::fs::write(dir.join(crate::MANIFEST_FILE), "{}").unwrap();
    }

    #[test]
    #[cfg(unix)]
    fn gives_up_after_bounded_attempts() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        let target = locked.join("stuck.json");
        std::fs::write(&target, "{}").unwrap();

        // Unlinking needs write permission on the parent directory.
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555)).unwrap();
        if std::fs::remove_file(&target).is_ok() {
            // Running as root; permission bits are not enforced and there
            // is nothing to observe.
            return;
        }

        assert_eq!(try_remove_tree(&target), CleanOutcome::GaveUp);
        assert!(target.exists());

        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(try_remove_tree(&target), CleanOutcome::Removed);
    }

    #[test]
    fn full_clear_removes_archive_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        touch_all(dir.path());
        let outcomes = clear_generated(dir.path(), CleanMode::Full);
        assert_eq!(outcomes.len(), 5);
        assert!(outcomes.iter().all(|(_, o)| *o == CleanOutcome::Removed));
        assert!(!dir.path().join(crate::ARCHIVE_FILE).exists());
        assert!(!dir.path().join(crate::MANIFEST_FILE).exists());
    }

    #[test]
    fn partial_clear_keeps_archive_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        touch_all(dir.path());
        let outcomes = clear_generated(dir.path(), CleanMode::Partial);
        assert_eq!(outcomes.len(), 3);
        for name in crate::DOWNLOADED_FILES {
            assert!(!dir.path().join(name).exists());
        }
        assert!(dir.path().join(crate::ARCHIVE_FILE).exists());
        assert!(dir.path().join(crate::MANIFEST_FILE).exists());
    }
}
