// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RmpressError};

/// Persistent application settings.
///
/// The system name and port form the registration record consumed by the
/// hosting print framework's listener; rmpress itself never binds a socket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name the virtual printer system registers under.
    pub system_name: String,
    /// TCP port the hosting framework advertises the printer on.
    pub port: u16,
    /// Program name of the external upload tool, resolved via PATH.
    pub upload_program: String,
    /// Remote folder used when a device URI carries no folder segment.
    pub default_folder: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            system_name: "reMarkable".into(),
            port: 8000,
            upload_program: "rmapi".into(),
            default_folder: "/".into(),
        }
    }
}

impl AppConfig {
    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RmpressError::Config(format!("read {}: {e}", path.as_ref().display()))
        })?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }
}
