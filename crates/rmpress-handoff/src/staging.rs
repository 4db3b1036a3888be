// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spool name normalizer.
//
// The framework spools jobs under opaque names like `job-000123.prn`; the
// upload tool names the uploaded document after the file it is given. So
// before invoking the tool we stage a symlink whose name is derived from
// the job's logical name, inside a directory derived from the spool path.
// The link points at the spooled file -- large documents are never copied.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use rmpress_core::error::{Result, RmpressError};

/// Suffix appended to the spool path to form the staging directory.
///
/// Spool paths are unique per job (framework guarantee), so the directory
/// name is collision-free without any locking.
const STAGING_SUFFIX: &str = "_tmpdir";

/// Extension the upload tool requires on its input file.
const REQUIRED_EXTENSION: &str = ".pdf";

/// Basename used when the job name's final path component is empty.
const FALLBACK_BASENAME: &str = "document";

/// A staged upload: one directory and one link inside it, both owned by
/// this component for the duration of a single hand-off.
#[derive(Debug)]
pub struct StagedUpload {
    dir: PathBuf,
    link: PathBuf,
}

impl StagedUpload {
    /// The path handed to the upload tool.
    pub fn path(&self) -> &Path {
        &self.link
    }

    /// The staging directory containing the link.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Remove the link, then the directory. Best-effort: failures are
    /// logged and must never change the upload outcome already decided.
    pub fn cleanup(&self) {
        if let Err(e) = std::fs::remove_file(&self.link) {
            warn!(link = %self.link.display(), error = %e, "failed to remove staging link");
        }
        if let Err(e) = std::fs::remove_dir(&self.dir) {
            warn!(dir = %self.dir.display(), error = %e, "failed to remove staging directory");
        }
    }
}

/// Stage a spooled file under a tool-compatible name.
///
/// The staging directory is `<spool_path>_tmpdir`; the link's basename is
/// the final `/`-separated component of `job_name`, with `.pdf` appended
/// unless it is already the exact suffix (case-sensitive).
///
/// # Errors
///
/// Directory creation and link creation each abort the hand-off with a
/// `Staging` error carrying the OS error text. Nothing is retried.
pub fn stage(spool_path: &Path, job_name: &str) -> Result<StagedUpload> {
    let mut dir_name = spool_path.as_os_str().to_os_string();
    dir_name.push(STAGING_SUFFIX);
    let dir = PathBuf::from(dir_name);

    std::fs::create_dir_all(&dir).map_err(|e| {
        RmpressError::Staging(format!("create directory {}: {e}", dir.display()))
    })?;

    let link = dir.join(staged_basename(job_name));

    link_into_place(spool_path, &link).map_err(|e| {
        RmpressError::Staging(format!(
            "link {} -> {}: {e}",
            link.display(),
            spool_path.display()
        ))
    })?;

    debug!(
        spool = %spool_path.display(),
        staged = %link.display(),
        "spooled file staged for upload"
    );

    Ok(StagedUpload { dir, link })
}

/// Derive the staged basename from the job's logical name.
fn staged_basename(job_name: &str) -> String {
    let last = match job_name.rsplit('/').next() {
        Some(seg) if !seg.is_empty() => seg,
        _ => FALLBACK_BASENAME,
    };

    if last.ends_with(REQUIRED_EXTENSION) {
        last.to_string()
    } else {
        format!("{last}{REQUIRED_EXTENSION}")
    }
}

#[cfg(unix)]
fn link_into_place(spool: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(spool, link)
}

#[cfg(not(unix))]
fn link_into_place(spool: &Path, link: &Path) -> std::io::Result<()> {
    // No symlinks to lean on here; a copy preserves the contract.
    std::fs::copy(spool, link).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Write a fake spooled file and return its path.
    fn spool_fixture(dir: &Path) -> PathBuf {
        let spool = dir.join("job-000123.prn");
        std::fs::write(&spool, b"%PDF-1.7 fake document").expect("write spool");
        spool
    }

    #[test]
    fn plain_name_keeps_basename() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let spool = spool_fixture(tmp.path());

        let staged = stage(&spool, "report.pdf").expect("stage");
        assert_eq!(staged.path().file_name().unwrap(), "report.pdf");
        staged.cleanup();
    }

    #[test]
    fn name_without_extension_gets_pdf_appended() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let spool = spool_fixture(tmp.path());

        let staged = stage(&spool, "meeting notes").expect("stage");
        assert_eq!(staged.path().file_name().unwrap(), "meeting notes.pdf");
        staged.cleanup();
    }

    #[test]
    fn separators_reduce_to_final_segment() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let spool = spool_fixture(tmp.path());

        let staged = stage(&spool, "scans/2026/img").expect("stage");
        assert_eq!(staged.path().file_name().unwrap(), "img.pdf");
        staged.cleanup();
    }

    #[test]
    fn extension_check_is_case_sensitive() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let spool = spool_fixture(tmp.path());

        let staged = stage(&spool, "REPORT.PDF").expect("stage");
        assert_eq!(staged.path().file_name().unwrap(), "REPORT.PDF.pdf");
        staged.cleanup();
    }

    #[test]
    fn empty_final_segment_falls_back() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let spool = spool_fixture(tmp.path());

        let staged = stage(&spool, "scans/").expect("stage");
        assert_eq!(staged.path().file_name().unwrap(), "document.pdf");
        staged.cleanup();
    }

    #[test]
    fn staging_dir_derives_from_spool_path() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let spool = spool_fixture(tmp.path());

        let staged = stage(&spool, "report.pdf").expect("stage");
        let expected = format!("{}_tmpdir", spool.display());
        assert_eq!(staged.dir(), Path::new(&expected));
        staged.cleanup();
    }

    #[test]
    fn link_resolves_to_spooled_content() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let spool = spool_fixture(tmp.path());

        let staged = stage(&spool, "report.pdf").expect("stage");
        let through_link = std::fs::read(staged.path()).expect("read through link");
        assert_eq!(through_link, b"%PDF-1.7 fake document");
        staged.cleanup();
    }

    #[test]
    fn cleanup_removes_link_and_directory() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let spool = spool_fixture(tmp.path());

        let staged = stage(&spool, "report.pdf").expect("stage");
        assert!(staged.path().exists());

        staged.cleanup();
        assert!(!staged.path().exists());
        assert!(!staged.dir().exists());
        // The spooled file itself is the framework's -- untouched.
        assert!(spool.exists());
    }

    #[cfg(unix)]
    #[test]
    fn staging_twice_without_cleanup_fails() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let spool = spool_fixture(tmp.path());

        let first = stage(&spool, "report.pdf").expect("first stage");
        let second = stage(&spool, "report.pdf");
        assert!(matches!(second, Err(RmpressError::Staging(_))));
        first.cleanup();
    }
}
