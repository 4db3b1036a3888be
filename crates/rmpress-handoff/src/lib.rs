// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// rmpress Hand-off -- the bridge between a spooled print job and an
// invocation of the external upload tool: spool name normalisation, the
// blocking tool run with outcome classification, and the per-job entry
// point the hosting framework calls.

pub mod handoff;
pub mod invoker;
pub mod staging;

pub use handoff::process_job;
pub use invoker::run_upload;
pub use staging::{stage, StagedUpload};
