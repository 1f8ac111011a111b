// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub launch source for desktop/CI builds where launch intents do not exist.

use unilink_core::LaunchIntent;
use unilink_core::error::{Result, UnilinkError};

use crate::traits::LaunchSource;

/// No-op launch source returned on non-mobile platforms.
pub struct StubLaunchSource;

impl LaunchSource for StubLaunchSource {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }

    fn launch_intent(&self) -> Result<Option<LaunchIntent>> {
        tracing::warn!("LaunchSource::launch_intent called on stub bridge");
        Err(UnilinkError::PlatformUnavailable)
    }
}
