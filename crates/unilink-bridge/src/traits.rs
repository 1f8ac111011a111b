// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for reading launch intents.

use unilink_core::LaunchIntent;
use unilink_core::error::Result;

/// Where the intent that started this process comes from.
///
/// Implementations only read the intent. Registering intent filters or
/// associated domains with the OS happens at build time, outside this crate.
pub trait LaunchSource {
    /// Human-readable platform name (e.g. "Android", "Desktop (stub)").
    fn platform_name(&self) -> &str;

    /// The intent that launched the process.
    ///
    /// Returns `Ok(None)` when the process was started without one.
    /// Platforms with no intent mechanism return
    /// `UnilinkError::PlatformUnavailable`.
    fn launch_intent(&self) -> Result<Option<LaunchIntent>>;
}
