// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Launch source with a preset intent, for host adapters that already know
// how the process was started (command-line tools, tests, iOS app delegates
// forwarding `continueUserActivity`).

use unilink_core::LaunchIntent;
use unilink_core::error::Result;

use crate::traits::LaunchSource;

/// Launch source that reports a fixed intent.
#[derive(Debug, Clone, Default)]
pub struct FixedLaunchSource {
    intent: Option<LaunchIntent>,
}

impl FixedLaunchSource {
    pub fn new(intent: Option<LaunchIntent>) -> Self {
        Self { intent }
    }

    /// A process launched by opening `url`.
    pub fn view(url: impl Into<String>) -> Self {
        Self::new(Some(LaunchIntent::view(url)))
    }

    /// A process started without an intent.
    pub fn none() -> Self {
        Self::new(None)
    }
}

impl LaunchSource for FixedLaunchSource {
    fn platform_name(&self) -> &str {
        "Fixed"
    }

    fn launch_intent(&self) -> Result<Option<LaunchIntent>> {
        Ok(self.intent.clone())
    }
}
