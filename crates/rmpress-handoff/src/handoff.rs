// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job hand-off entry point.
//
// The hosting framework calls this once per fully-spooled job. One pass,
// no state between invocations: validate the destination URI, stage the
// spooled file under a tool-compatible name, run the upload tool, clean
// up, and report success or failure back to the framework's job-state
// machinery. Retrying is the framework's business, never ours.

use tracing::{error, info};

use rmpress_core::types::{Destination, JobTicket};

use crate::invoker;
use crate::staging;

/// Process one spooled job: upload it to the folder named in the ticket's
/// device URI.
///
/// Returns `true` only when the upload tool exited with code 0. Every
/// failure path -- bad URI, staging error, spawn error, non-zero exit,
/// signal death -- returns `false` with the diagnostic in the log stream.
pub fn process_job(upload_program: &str, ticket: &JobTicket) -> bool {
    info!(
        job = %ticket.job_name,
        spool = %ticket.spool_path.display(),
        uri = %ticket.device_uri,
        "job hand-off started"
    );

    let destination = match Destination::parse(&ticket.device_uri) {
        Ok(dest) => dest,
        Err(e) => {
            error!(job = %ticket.job_name, error = %e, "job rejected");
            return false;
        }
    };

    let staged = match staging::stage(&ticket.spool_path, &ticket.job_name) {
        Ok(staged) => staged,
        Err(e) => {
            error!(job = %ticket.job_name, error = %e, "job failed before upload");
            return false;
        }
    };

    let outcome = invoker::run_upload(upload_program, staged.path(), destination.folder());

    // Cleanup always runs once staging succeeded; its failures are logged
    // inside and never override the outcome.
    staged.cleanup();

    if outcome.succeeded() {
        info!(job = %ticket.job_name, folder = %destination, "job uploaded");
    } else {
        error!(job = %ticket.job_name, outcome = %outcome, "job failed");
    }

    outcome.succeeded()
}
