use crate::archiver::SevenZip;
use crate::clean::{self, CleanMode};
use crate::download::DownloadManager;
use crate::task::TaskRunner;
use crate::{manifest, ReleaseEnv};
use anyhow::Result;

/// Runs one full packaging pass over the working directory: clear stale
/// output, rebuild the news manifest, download the installer metadata,
/// archive it and sweep up the intermediates.
///
/// Download and archiving failures are logged and ignored so a flaky
/// mirror doesn't abort the run; a missing archiver is fatal.
pub fn pack(env: &ReleaseEnv) -> Result<()> {
    let dir = env.work_dir();
    let mut runner = TaskRunner::new(6, env.verbose());

    runner.run("Remove stale artifacts", false, || {
        for (name, outcome) in clean::clear_generated(dir, CleanMode::Full) {
            tracing::debug!("clear {}: {:?}", name, outcome);
        }
        Ok(())
    })?;

    let seven_zip = runner.run("Locate 7zip", false, || {
        let seven_zip = SevenZip::new(crate::SEVEN_ZIP_CANDIDATES, crate::SEVEN_ZIP_PROBE_FLAGS)?;
        tracing::debug!("using {}", seven_zip.exe().display());
        Ok(seven_zip)
    })?;

    runner.run(format!("Build {}", crate::MANIFEST_FILE), false, || {
        let news = manifest::build(dir)?;
        manifest::write(dir, &news)?;
        Ok(())
    })?;

    runner.run("Download installer metadata", true, || {
        let manager = DownloadManager::new();
        for url in crate::METADATA_URLS {
            if let Err(err) = manager.fetch(dir, url) {
                tracing::warn!("download of {} failed: {:?}", url, err);
            }
        }
        Ok(())
    })?;

    runner.run(format!("Create {}", crate::ARCHIVE_FILE), true, || {
        // The glob also sweeps in the manifest written above, not just the
        // downloaded metadata, so updates.json ships inside the archive as
        // well as next to it.
        let status = seven_zip.make_archive(dir, "*.json", crate::ARCHIVE_FILE)?;
        if !status.success() {
            tracing::warn!("7zip exited with {}", status);
        }
        Ok(())
    })?;

    runner.run("Remove intermediate files", false, || {
        for (name, outcome) in clean::clear_generated(dir, CleanMode::Partial) {
            tracing::debug!("clear {}: {:?}", name, outcome);
        }
        Ok(())
    })?;

    Ok(())
}
