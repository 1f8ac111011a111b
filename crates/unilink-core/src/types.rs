// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Unilink.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Host name used for links that carry no host component (`myapp://`).
pub const DEFAULT_HOST_NAME: &str = "default";

/// Event name fired on the script side when an entry does not name one.
pub const DEFAULT_EVENT_NAME: &str = "didLaunchAppFromLink";

/// Intent action the OS uses when a link opens the app.
pub const ACTION_VIEW: &str = "android.intent.action.VIEW";

/// One supported deep-link pattern.
///
/// Entries are compared field by field during matching, so two entries with
/// the same `name` and `scheme` are both kept and the earlier one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEntry {
    /// Host the link must carry, or [`DEFAULT_HOST_NAME`] for host-less links.
    pub name: String,
    /// Scheme the link must carry (compared case-sensitively).
    pub scheme: String,
    /// Script-side event fired when this entry matches.
    #[serde(default = "default_event_name")]
    pub event: String,
}

fn default_event_name() -> String {
    DEFAULT_EVENT_NAME.to_string()
}

impl HostEntry {
    pub fn new(name: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scheme: scheme.into(),
            event: default_event_name(),
        }
    }

    /// Replace the event name fired for this entry.
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = event.into();
        self
    }
}

impl std::fmt::Display for HostEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}", self.scheme, self.name)
    }
}

/// An intent the OS handed to the app, either at launch or redelivered later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchIntent {
    pub action: String,
    /// The intent's data URI, if any.
    pub data: Option<String>,
}

impl LaunchIntent {
    /// A VIEW intent carrying the given link.
    pub fn view(url: impl Into<String>) -> Self {
        Self {
            action: ACTION_VIEW.to_string(),
            data: Some(url.into()),
        }
    }

    /// The link this intent carries, if it is a VIEW intent with data.
    pub fn link(&self) -> Option<&str> {
        if self.action != ACTION_VIEW {
            return None;
        }
        self.data.as_deref()
    }
}

/// Handle returned by a listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub Uuid);

impl ListenerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payload delivered to script-side listeners when a link matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEvent {
    /// Name of the event to fire (taken from the matched entry).
    pub event: String,
    pub data: LinkData,
}

/// Details of the link that opened the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkData {
    /// The link exactly as the OS delivered it.
    pub url: String,
    pub scheme: String,
    /// Host the link was matched under (fallback name applied).
    pub host: String,
    pub path: String,
    /// Decoded query parameters. For repeated keys the last value wins.
    pub params: BTreeMap<String, String>,
}

impl LinkEvent {
    /// Serialize the event into the JSON shape handed to the web view.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
