// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Unilink.
//
// A URL that matches no configured host is not an error: lookups return
// `None` and the event is dropped.

use thiserror::Error;

/// Top-level error type for all Unilink operations.
#[derive(Debug, Error)]
pub enum UnilinkError {
    // -- Link errors --
    #[error("invalid launch URL: {0}")]
    InvalidUrl(String),

    // -- Configuration --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, UnilinkError>;
