// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application context threaded explicitly through every entry point.
// There is no file-level singleton: each subcommand receives the context
// it needs as a value.

use std::path::Path;

use tracing::info;

use rmpress_core::config::AppConfig;
use rmpress_core::error::Result;

/// Everything an entry point needs to know about the running system.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Build a context from an optional config file, falling back to
    /// defaults when none is given.
    pub fn from_config_file(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let config = AppConfig::load(path)?;
                info!(path = %path.display(), "configuration loaded");
                config
            }
            None => AppConfig::default(),
        };
        Ok(Self::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_config_file_uses_defaults() {
        let ctx = AppContext::from_config_file(None).expect("context");
        assert_eq!(ctx.config.system_name, "reMarkable");
        assert_eq!(ctx.config.upload_program, "rmapi");
    }

    #[test]
    fn unreadable_config_file_is_an_error() {
        let missing = Path::new("/nonexistent/rmpress.json");
        assert!(AppContext::from_config_file(Some(missing)).is_err());
    }
}
