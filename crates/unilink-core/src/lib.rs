// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unilink — Core types, link matching, and event delivery shared across all crates.

pub mod config;
pub mod error;
pub mod link;
pub mod listeners;
pub mod matcher;
pub mod plugin;
pub mod types;

pub use config::LinkConfig;
pub use error::UnilinkError;
pub use link::{LaunchUrl, LinkTarget, MatchRequest};
pub use listeners::ListenerRegistry;
pub use matcher::HostMatcher;
pub use plugin::UniversalLinks;
pub use types::*;
