// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Launch URL parsing.
//
// Host matching compares components exactly as the OS delivered them.
// `url::Url` would lower-case schemes and special-scheme hosts and reject
// links the OS happily delivers (out-of-range ports, for example), so
// `LaunchUrl` splits the raw text itself. Scheme, host, path, and query all
// come from that one split; only query decoding goes through the `url`
// crate's form-urlencoded parser.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::error::{Result, UnilinkError};
use crate::types::DEFAULT_HOST_NAME;

/// Anything a [`HostMatcher`](crate::HostMatcher) can look up.
///
/// Implementations must return components verbatim. Lookups are
/// case-sensitive, so a target that normalizes (e.g. `url::Url`, which
/// lower-cases the scheme) would match entries the delivered link does not.
pub trait LinkTarget {
    /// The scheme component, compared verbatim.
    fn scheme(&self) -> &str;

    /// The host component, `None` if the link has no authority.
    fn host(&self) -> Option<&str>;

    /// Name used for lookup: the host, or [`DEFAULT_HOST_NAME`] when the host
    /// is absent or empty.
    fn lookup_name(&self) -> &str {
        match self.host() {
            Some(host) if !host.is_empty() => host,
            _ => DEFAULT_HOST_NAME,
        }
    }
}

/// The `(name, scheme)` pair derived from one incoming link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRequest {
    pub name: String,
    pub scheme: String,
}

impl MatchRequest {
    pub fn new(name: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scheme: scheme.into(),
        }
    }

    /// Derive the request for a link, applying the fallback host name.
    pub fn from_target<T: LinkTarget + ?Sized>(target: &T) -> Self {
        Self::new(target.lookup_name(), target.scheme())
    }
}

impl LinkTarget for MatchRequest {
    fn scheme(&self) -> &str {
        &self.scheme
    }

    fn host(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// A link delivered by the OS, with every component kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchUrl {
    raw: String,
    scheme: String,
    host: Option<String>,
    path: String,
    query: Option<String>,
}

impl LaunchUrl {
    /// Parse an absolute link of the form
    /// `scheme:[//[userinfo@]host[:port]]path[?query][#fragment]`.
    ///
    /// Fails with [`UnilinkError::InvalidUrl`] only when there is no valid
    /// scheme. Ports and hosts are not validated.
    pub fn parse(url: &str) -> Result<Self> {
        let raw = url.trim();
        let parts = split_components(raw)
            .ok_or_else(|| UnilinkError::InvalidUrl(format!("{raw}: missing or invalid scheme")))?;

        Ok(Self {
            raw: raw.to_string(),
            scheme: parts.scheme.to_string(),
            host: parts.host.map(str::to_string),
            path: parts.path.to_string(),
            query: parts.query.map(str::to_string),
        })
    }

    /// The link exactly as delivered (surrounding whitespace removed).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The path as delivered (still percent-encoded, empty if absent).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The raw query string, without the `?`.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Decoded query parameters. For repeated keys the last value wins.
    pub fn params(&self) -> BTreeMap<String, String> {
        self.query
            .as_deref()
            .map(|query| {
                form_urlencoded::parse(query.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl LinkTarget for LaunchUrl {
    fn scheme(&self) -> &str {
        &self.scheme
    }

    fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }
}

impl std::fmt::Display for LaunchUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

struct Components<'a> {
    scheme: &'a str,
    host: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Split a link into its components without normalizing anything.
fn split_components(raw: &str) -> Option<Components<'_>> {
    let (scheme, rest) = raw.split_once(':')?;
    if !is_valid_scheme(scheme) {
        return None;
    }

    // The fragment never reaches the app's matching or parameters.
    let rest = rest.split_once('#').map_or(rest, |(before, _fragment)| before);
    let (rest, query) = match rest.split_once('?') {
        Some((before, query)) => (before, Some(query)),
        None => (rest, None),
    };

    let Some(after) = rest.strip_prefix("//") else {
        return Some(Components {
            scheme,
            host: None,
            path: rest,
            query,
        });
    };

    let end = after.find('/').unwrap_or(after.len());
    let (authority, path) = after.split_at(end);
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port);

    // IPv6 literals keep their brackets.
    let host = if host_port.starts_with('[') {
        host_port
            .find(']')
            .map_or(host_port, |close| &host_port[..=close])
    } else {
        host_port
            .split_once(':')
            .map_or(host_port, |(host, _port)| host)
    };

    Some(Components {
        scheme,
        host: Some(host),
        path,
        query,
    })
}
