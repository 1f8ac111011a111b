// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Link configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::matcher::HostMatcher;
use crate::types::HostEntry;

/// Schemes the OS routes through the web association mechanism rather than
/// custom URL type registration.
const WEB_SCHEMES: [&str; 2] = ["http", "https"];

/// Supported hosts, in the order they were configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    #[serde(default)]
    pub hosts: Vec<HostEntry>,
}

impl LinkConfig {
    pub fn new(hosts: Vec<HostEntry>) -> Self {
        Self { hosts }
    }

    /// Parse a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config = Self::from_json(&data)?;
        info!(path = %path.display(), hosts = config.hosts.len(), "link configuration loaded");
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Custom URL schemes that need registering with the OS, de-duplicated in
    /// first-seen order. `http` and `https` are left out.
    pub fn custom_schemes(&self) -> Vec<&str> {
        let mut schemes: Vec<&str> = Vec::new();
        for host in &self.hosts {
            let scheme = host.scheme.as_str();
            if !WEB_SCHEMES.contains(&scheme) && !schemes.contains(&scheme) {
                schemes.push(scheme);
            }
        }
        schemes
    }

    /// Build the matcher, keeping host order.
    pub fn into_matcher(self) -> HostMatcher {
        HostMatcher::new(self.hosts)
    }
}
