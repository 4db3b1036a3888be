// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for rmpress.

use thiserror::Error;

/// Top-level error type for all rmpress operations.
///
/// Every error here is terminal for the single job attempt it occurred in.
/// Nothing is retried locally -- the hosting print framework owns resubmission.
#[derive(Debug, Error)]
pub enum RmpressError {
    /// The device URI does not belong to this driver's scheme.
    #[error("destination URI not handled by this driver: {0}")]
    InvalidDestination(String),

    /// Creating the staging directory or link failed.
    #[error("staging failed: {0}")]
    Staging(String),

    /// The job's document format cannot be printed by this driver.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Configuration file missing a usable value or unreadable.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RmpressError>;
