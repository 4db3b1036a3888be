// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the rmpress printer application.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RmpressError};

/// URI prefix for the virtual reMarkable device scheme.
///
/// Device URIs handed to the job callback look like
/// `remarkable://<host>/<folder-path>`. Anything not starting with this
/// exact prefix is rejected before any filesystem work happens.
pub const DEVICE_URI_PREFIX: &str = "remarkable://";

/// The inputs the hosting print framework supplies for one spooled job.
///
/// The framework owns this data; the hand-off core only reads it. The
/// `spool_path` is guaranteed by the framework to name an existing regular
/// file for the duration of the callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTicket {
    /// Absolute path of the spooled document on local disk.
    pub spool_path: PathBuf,
    /// The job's logical name as submitted by the client. Arbitrary
    /// content -- may resemble a filename, may contain `/` separators, is
    /// not guaranteed unique.
    pub job_name: String,
    /// The destination device URI (`remarkable://host/folder`).
    pub device_uri: String,
}

impl JobTicket {
    pub fn new(
        spool_path: impl Into<PathBuf>,
        job_name: impl Into<String>,
        device_uri: impl Into<String>,
    ) -> Self {
        Self {
            spool_path: spool_path.into(),
            job_name: job_name.into(),
            device_uri: device_uri.into(),
        }
    }
}

/// Parsed form of a `remarkable://` device URI.
///
/// Only the folder path matters to the upload: the host segment identifies
/// the account pairing, which lives entirely inside the upload tool's own
/// session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    folder: String,
}

impl Destination {
    /// Parse a device URI, rejecting anything outside our scheme.
    ///
    /// The folder is everything from the first `/` after the host segment
    /// to the end of the URI. `remarkable://host` and `remarkable://host/`
    /// both resolve to the root folder `/`.
    pub fn parse(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix(DEVICE_URI_PREFIX)
            .ok_or_else(|| RmpressError::InvalidDestination(uri.to_string()))?;

        let folder = match rest.find('/') {
            Some(idx) if idx + 1 < rest.len() => rest[idx..].to_string(),
            _ => "/".to_string(),
        };

        Ok(Self { folder })
    }

    /// The remote folder path, always beginning with `/`.
    pub fn folder(&self) -> &str {
        &self.folder
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.folder)
    }
}

/// Classification of one upload tool run.
///
/// Only `Success` reports the job as completed to the framework; every
/// other variant marks it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Clean exit with code 0.
    Success,
    /// Normal exit with a non-zero code.
    ExitCode(i32),
    /// Terminated by a signal (Unix signal number).
    Signal(i32),
    /// The tool could not be launched at all (not found, resource limits).
    SpawnError(String),
}

impl UploadOutcome {
    /// The boolean handed back to the framework's job-state machinery.
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl std::fmt::Display for UploadOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::ExitCode(code) => write!(f, "exit code {code}"),
            Self::Signal(sig) => write!(f, "killed by signal {sig}"),
            Self::SpawnError(detail) => write!(f, "could not start: {detail}"),
        }
    }
}
