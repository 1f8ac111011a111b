// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host matching.
//
// Maps an incoming link to the first configured `HostEntry` whose name and
// scheme equal the link's lookup name and scheme. Both comparisons are exact:
// no case folding, no trimming. A link without a host is looked up under
// `DEFAULT_HOST_NAME`. Lookups never log or perform I/O.

use std::sync::Arc;

use crate::link::LinkTarget;
use crate::types::HostEntry;

/// Read-only lookup over the configured host entries.
///
/// `HostMatcher::default()` holds no entries and behaves like a matcher that
/// was never initialized: every lookup returns `None`.
#[derive(Debug, Clone, Default)]
pub struct HostMatcher {
    entries: Arc<[HostEntry]>,
}

impl HostMatcher {
    /// Build a matcher over `entries`, keeping their order.
    ///
    /// Entries are not validated. Duplicates and empty fields are kept and
    /// matched literally.
    pub fn new(entries: impl Into<Arc<[HostEntry]>>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Find the first entry matching `target`, or `None`.
    pub fn find<T: LinkTarget + ?Sized>(&self, target: &T) -> Option<&HostEntry> {
        let name = target.lookup_name();
        let scheme = target.scheme();

        self.entries
            .iter()
            .find(|entry| entry.name == name && entry.scheme == scheme)
    }

    /// Whether any entry matches `target`.
    pub fn is_supported<T: LinkTarget + ?Sized>(&self, target: &T) -> bool {
        self.find(target).is_some()
    }

    /// The configured entries, in order.
    pub fn entries(&self) -> &[HostEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<HostEntry>> for HostMatcher {
    fn from(entries: Vec<HostEntry>) -> Self {
        Self::new(entries)
    }
}
