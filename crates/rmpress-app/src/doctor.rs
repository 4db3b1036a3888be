// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Environment diagnostics.
//
// Runs a short sequence of checks against the upload tool: is it on PATH,
// and does it hold a usable cloud session. Stops at the first failure and
// tells the user what to do about it.

use std::process::Command;

use tracing::debug;

use crate::context::AppContext;

/// Result of a single diagnostic step.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Step name shown to the user.
    pub name: &'static str,
    /// Whether the step passed.
    pub passed: bool,
    /// Human-readable detail of what was tested.
    pub detail: String,
    /// What to do if the step failed.
    pub fix: Option<&'static str>,
}

/// Full diagnostic report.
#[derive(Debug, Clone)]
pub struct DiagnosticReport {
    pub steps: Vec<StepResult>,
    pub summary: &'static str,
}

impl DiagnosticReport {
    pub fn passed(&self) -> bool {
        self.steps.iter().all(|s| s.passed)
    }
}

/// Run the diagnostic sequence. Each step depends on the previous one.
pub fn run_diagnostics(ctx: &AppContext) -> DiagnosticReport {
    let mut steps = Vec::new();

    let present = check_tool_present(ctx);
    let present_ok = present.passed;
    steps.push(present);
    if !present_ok {
        return DiagnosticReport {
            steps,
            summary: "The upload tool is not installed.",
        };
    }

    let session = check_cloud_session(ctx);
    let session_ok = session.passed;
    steps.push(session);
    if !session_ok {
        return DiagnosticReport {
            steps,
            summary: "The upload tool has no usable cloud session.",
        };
    }

    DiagnosticReport {
        steps,
        summary: "Everything looks ready for printing.",
    }
}

/// Step 1: the upload tool resolves via PATH and runs at all.
fn check_tool_present(ctx: &AppContext) -> StepResult {
    let tool = &ctx.config.upload_program;
    match Command::new(tool).arg("version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            debug!(tool = %tool, version = %version, "upload tool found");
            StepResult {
                name: "upload tool present",
                passed: true,
                detail: format!("{tool}: {version}"),
                fix: None,
            }
        }
        Ok(output) => StepResult {
            name: "upload tool present",
            passed: false,
            detail: format!("{tool} version exited with {}", output.status),
            fix: Some("reinstall the upload tool; its version check should succeed"),
        },
        Err(e) => StepResult {
            name: "upload tool present",
            passed: false,
            detail: format!("{tool}: {e}"),
            fix: Some("install rmapi and make sure it is on your PATH"),
        },
    }
}

/// Step 2: the tool can reach the cloud account it was paired with.
fn check_cloud_session(ctx: &AppContext) -> StepResult {
    let tool = &ctx.config.upload_program;
    match Command::new(tool).arg("ls").output() {
        Ok(output) if output.status.success() => StepResult {
            name: "cloud session",
            passed: true,
            detail: "account listing succeeded".into(),
            fix: None,
        },
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            StepResult {
                name: "cloud session",
                passed: false,
                detail: format!("listing failed: {}", stderr.trim()),
                fix: Some("run `rmpress login` to pair with your reMarkable account"),
            }
        }
        Err(e) => StepResult {
            name: "cloud session",
            passed: false,
            detail: format!("{tool}: {e}"),
            fix: Some("install rmapi and make sure it is on your PATH"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmpress_core::config::AppConfig;

    fn ctx_with_tool(tool: &str) -> AppContext {
        AppContext::new(AppConfig {
            upload_program: tool.into(),
            ..AppConfig::default()
        })
    }

    #[test]
    fn missing_tool_fails_first_step_and_stops() {
        let ctx = ctx_with_tool("rmpress-no-such-tool-on-path");
        let report = run_diagnostics(&ctx);
        assert!(!report.passed());
        assert_eq!(report.steps.len(), 1);
        assert!(report.steps[0].fix.is_some());
    }

    #[cfg(unix)]
    #[test]
    fn working_tool_passes_both_steps() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().expect("tempdir");
        let tool = tmp.path().join("fake-rmapi");
        std::fs::write(&tool, "#!/bin/sh\necho ok\nexit 0\n").expect("write script");
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755))
            .expect("chmod script");

        let ctx = ctx_with_tool(tool.to_str().unwrap());
        let report = run_diagnostics(&ctx);
        assert!(report.passed());
        assert_eq!(report.steps.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn expired_session_fails_second_step() {
        use std::os::unix::fs::PermissionsExt;

        // version succeeds, ls fails -- the shape of an expired session.
        let tmp = tempfile::tempdir().expect("tempdir");
        let tool = tmp.path().join("fake-rmapi");
        std::fs::write(
            &tool,
            "#!/bin/sh\nif [ \"$1\" = version ]; then echo ok; exit 0; fi\nexit 1\n",
        )
        .expect("write script");
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755))
            .expect("chmod script");

        let ctx = ctx_with_tool(tool.to_str().unwrap());
        let report = run_diagnostics(&ctx);
        assert!(!report.passed());
        assert_eq!(report.steps.len(), 2);
        assert!(report.steps[0].passed);
        assert!(!report.steps[1].passed);
    }
}
