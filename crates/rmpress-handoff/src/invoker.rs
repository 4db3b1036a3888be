// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Upload invoker.
//
// Runs the external upload tool synchronously and classifies how it died.
// The tool performs the actual authenticated transfer using its own stored
// session, which it finds through the inherited environment -- nothing
// credential-shaped is read or passed here.

use std::path::Path;
use std::process::Command;

use tracing::{error, info};

use rmpress_core::types::UploadOutcome;

/// Subcommand of the upload tool that transfers one file.
const UPLOAD_SUBCOMMAND: &str = "put";

/// Run `<program> put <staged_path> <folder>` and wait for it to finish.
///
/// The calling thread blocks for the full transfer; per-job concurrency is
/// the hosting framework's concern. There is deliberately no timeout -- the
/// tool is relied upon to terminate on its own.
pub fn run_upload(program: &str, staged_path: &Path, folder: &str) -> UploadOutcome {
    info!(
        tool = program,
        file = %staged_path.display(),
        folder,
        "invoking upload tool"
    );

    let status = match Command::new(program)
        .arg(UPLOAD_SUBCOMMAND)
        .arg(staged_path)
        .arg(folder)
        .status()
    {
        Ok(status) => status,
        Err(e) => {
            error!(tool = program, error = %e, "upload tool could not be started");
            return UploadOutcome::SpawnError(e.to_string());
        }
    };

    match status.code() {
        Some(0) => {
            info!(tool = program, "upload tool exited cleanly");
            UploadOutcome::Success
        }
        Some(code) => {
            error!(tool = program, code, "upload tool reported failure");
            UploadOutcome::ExitCode(code)
        }
        None => abnormal_termination(program, status),
    }
}

#[cfg(unix)]
fn abnormal_termination(program: &str, status: std::process::ExitStatus) -> UploadOutcome {
    use std::os::unix::process::ExitStatusExt;

    let signal = status.signal().unwrap_or(0);
    error!(tool = program, signal, "upload tool killed by signal");
    UploadOutcome::Signal(signal)
}

#[cfg(not(unix))]
fn abnormal_termination(program: &str, _status: std::process::ExitStatus) -> UploadOutcome {
    error!(tool = program, "upload tool terminated abnormally");
    UploadOutcome::Signal(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[cfg(unix)]
    fn script_tool(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let tool = dir.join("fake-tool");
        std::fs::write(&tool, format!("#!/bin/sh\n{body}\n")).expect("write script");
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755))
            .expect("chmod script");
        tool
    }

    #[test]
    fn clean_exit_is_success() {
        let outcome = run_upload("true", Path::new("/tmp/doc.pdf"), "/");
        assert_eq!(outcome, UploadOutcome::Success);
    }

    #[test]
    fn nonzero_exit_is_failure() {
        let outcome = run_upload("false", Path::new("/tmp/doc.pdf"), "/");
        assert_eq!(outcome, UploadOutcome::ExitCode(1));
    }

    #[test]
    fn missing_tool_is_spawn_error() {
        let outcome = run_upload(
            "rmpress-no-such-tool-on-path",
            Path::new("/tmp/doc.pdf"),
            "/",
        );
        assert!(matches!(outcome, UploadOutcome::SpawnError(_)));
    }

    #[cfg(unix)]
    #[test]
    fn specific_exit_code_is_preserved() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let tool = script_tool(tmp.path(), "exit 3");

        let outcome = run_upload(tool.to_str().unwrap(), Path::new("/tmp/doc.pdf"), "/");
        assert_eq!(outcome, UploadOutcome::ExitCode(3));
    }

    #[cfg(unix)]
    #[test]
    fn signal_death_is_failure_with_signal_number() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let tool = script_tool(tmp.path(), "kill -KILL $$");

        let outcome = run_upload(tool.to_str().unwrap(), Path::new("/tmp/doc.pdf"), "/");
        assert_eq!(outcome, UploadOutcome::Signal(9));
        assert!(!outcome.succeeded());
    }
}
