// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plugin facade tying configuration, matching, and delivery together.
//
// Host adapters call into this synchronously: once with the intent that
// launched the process (see `unilink_bridge::deliver_launch_intent`) and
// again for every intent the OS redelivers while the app is running.

use std::sync::OnceLock;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::link::{LaunchUrl, LinkTarget};
use crate::listeners::ListenerRegistry;
use crate::matcher::HostMatcher;
use crate::types::{HostEntry, LaunchIntent, LinkData, LinkEvent, ListenerId};

/// Deep-link plugin state.
///
/// Starts uninitialized; [`initialize`](Self::initialize) installs the host
/// list once. Until then every link is treated as unsupported.
#[derive(Debug, Default)]
pub struct UniversalLinks {
    matcher: OnceLock<HostMatcher>,
    listeners: ListenerRegistry,
}

impl UniversalLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the supported hosts. Only the first call takes effect.
    pub fn initialize(&self, entries: Vec<HostEntry>) {
        let count = entries.len();
        match self.matcher.set(HostMatcher::new(entries)) {
            Ok(()) => {
                info!(hosts = count, "universal links initialised");
                for entry in self.matcher().entries() {
                    debug!(name = %entry.name, scheme = %entry.scheme, event = %entry.event, "supported host");
                }
            }
            Err(_) => warn!("universal links already initialised, ignoring new host list"),
        }
    }

    /// Whether a host list has been installed.
    pub fn is_ready(&self) -> bool {
        self.matcher.get().is_some()
    }

    /// The installed matcher, or an empty one before initialization.
    pub fn matcher(&self) -> &HostMatcher {
        static UNINITIALIZED: OnceLock<HostMatcher> = OnceLock::new();
        self.matcher
            .get()
            .unwrap_or_else(|| UNINITIALIZED.get_or_init(HostMatcher::default))
    }

    /// Find the host entry that matches `url`.
    pub fn find_host(&self, url: &LaunchUrl) -> Option<&HostEntry> {
        self.matcher().find(url)
    }

    /// Register a script-side listener.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&LinkEvent) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// The registry events are delivered through.
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Handle an intent the OS delivered to the running app.
    ///
    /// Intents that are not VIEW intents or carry no link are ignored, as is
    /// everything when no hosts are configured.
    pub fn on_new_intent(&self, intent: &LaunchIntent) -> Result<Option<LinkEvent>> {
        if self.matcher().is_empty() {
            return Ok(None);
        }
        let Some(link) = intent.link() else {
            debug!(action = %intent.action, "intent carries no link, ignoring");
            return Ok(None);
        };
        self.process_url(link)
    }

    /// Match `url` against the configured hosts and deliver it to listeners.
    ///
    /// Returns the delivered event, or `None` if the link is not supported.
    /// Fails only if `url` cannot be parsed.
    pub fn process_url(&self, url: &str) -> Result<Option<LinkEvent>> {
        let url = LaunchUrl::parse(url)?;
        debug!(host = ?url.host(), scheme = %url.scheme(), "processing link");

        let Some(entry) = self.find_host(&url) else {
            debug!(host = ?url.host(), url = %url, "host is not supported");
            return Ok(None);
        };

        let event = link_event(entry, &url);
        self.listeners.notify(&event);
        Ok(Some(event))
    }
}

/// Package a matched entry and its link for the script side.
pub fn link_event(entry: &HostEntry, url: &LaunchUrl) -> LinkEvent {
    LinkEvent {
        event: entry.event.clone(),
        data: LinkData {
            url: url.as_str().to_string(),
            scheme: url.scheme().to_string(),
            host: url.lookup_name().to_string(),
            path: url.path().to_string(),
            params: url.params(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnilinkError;
    use crate::types::{ACTION_VIEW, DEFAULT_HOST_NAME};
    use std::sync::{Arc, Mutex};

    fn plugin_with(entries: Vec<HostEntry>) -> UniversalLinks {
        let plugin = UniversalLinks::new();
        plugin.initialize(entries);
        plugin
    }

    fn recording(plugin: &UniversalLinks) -> Arc<Mutex<Vec<LinkEvent>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        plugin.subscribe(move |event| sink.lock().expect("sink lock").push(event.clone()));
        seen
    }

    #[test]
    fn uninitialized_plugin_supports_nothing() {
        let plugin = UniversalLinks::new();
        assert!(!plugin.is_ready());
        let seen = recording(&plugin);

        let event = plugin.process_url("https://example.com/").expect("process");
        assert!(event.is_none());
        assert!(seen.lock().expect("lock").is_empty());
    }

    #[test]
    fn second_initialize_is_ignored() {
        let plugin = plugin_with(vec![HostEntry::new("a.com", "https")]);
        plugin.initialize(vec![HostEntry::new("b.com", "https")]);

        assert!(plugin.is_ready());
        assert_eq!(plugin.matcher().len(), 1);
        assert_eq!(plugin.matcher().entries()[0].name, "a.com");
    }

    #[test]
    fn matching_link_is_delivered_to_listeners() {
        let plugin = plugin_with(vec![HostEntry::new("example.com", "https").with_event("openPage")]);
        let seen = recording(&plugin);

        let event = plugin
            .process_url("https://example.com/news/42?utm=mail")
            .expect("process")
            .expect("matched");

        assert_eq!(event.event, "openPage");
        assert_eq!(event.data.host, "example.com");
        assert_eq!(event.data.path, "/news/42");
        assert_eq!(event.data.params.get("utm").map(String::as_str), Some("mail"));
        assert_eq!(*seen.lock().expect("lock"), vec![event]);
    }

    #[test]
    fn unsupported_link_is_dropped() {
        let plugin = plugin_with(vec![HostEntry::new("example.com", "https")]);
        let seen = recording(&plugin);

        let event = plugin.process_url("http://example.com/path").expect("process");
        assert!(event.is_none());
        assert!(seen.lock().expect("lock").is_empty());
    }

    #[test]
    fn hostless_link_reports_default_host() {
        let plugin = plugin_with(vec![HostEntry::new(DEFAULT_HOST_NAME, "myapp")]);
        let event = plugin.process_url("myapp://").expect("process").expect("matched");
        assert_eq!(event.data.host, DEFAULT_HOST_NAME);
        assert_eq!(event.data.url, "myapp://");
    }

    #[test]
    fn match_without_listener_still_returns_event() {
        let plugin = plugin_with(vec![HostEntry::new("example.com", "https")]);
        let event = plugin.process_url("https://example.com/").expect("process");
        assert!(event.is_some());
        assert_eq!(plugin.listeners().len(), 0);
    }

    #[test]
    fn invalid_url_is_an_error() {
        let plugin = plugin_with(vec![HostEntry::new("example.com", "https")]);
        let err = plugin.process_url("not a url").unwrap_err();
        assert!(matches!(err, UnilinkError::InvalidUrl(_)));
    }

    #[test]
    fn new_intent_with_view_action_is_processed() {
        let plugin = plugin_with(vec![HostEntry::new("example.com", "https")]);
        let seen = recording(&plugin);

        plugin
            .on_new_intent(&LaunchIntent::view("https://example.com/a"))
            .expect("intent");
        plugin
            .on_new_intent(&LaunchIntent::view("https://example.com/b"))
            .expect("intent");

        let paths: Vec<_> = seen
            .lock()
            .expect("lock")
            .iter()
            .map(|e| e.data.path.clone())
            .collect();
        assert_eq!(paths, vec!["/a", "/b"]);
    }

    #[test]
    fn new_intent_with_other_action_is_ignored() {
        let plugin = plugin_with(vec![HostEntry::new("example.com", "https")]);
        let intent = LaunchIntent {
            action: "android.intent.action.MAIN".into(),
            data: Some("https://example.com/".into()),
        };
        assert!(plugin.on_new_intent(&intent).expect("intent").is_none());
    }

    #[test]
    fn new_intent_without_data_is_ignored() {
        let plugin = plugin_with(vec![HostEntry::new("example.com", "https")]);
        let intent = LaunchIntent {
            action: ACTION_VIEW.into(),
            data: None,
        };
        assert!(plugin.on_new_intent(&intent).expect("intent").is_none());
    }

    #[test]
    fn new_intent_ignored_without_configured_hosts() {
        let plugin = plugin_with(Vec::new());
        let intent = LaunchIntent::view("garbage that would not parse");
        assert!(plugin.on_new_intent(&intent).expect("intent").is_none());
    }

    #[test]
    fn plugin_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UniversalLinks>();
    }

    #[test]
    fn concurrent_links_are_all_delivered() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        const WORKERS: usize = 8;
        const LINKS_PER_WORKER: usize = 50;

        let plugin = Arc::new(plugin_with(vec![
            HostEntry::new("other.com", "https").with_event("other"),
            HostEntry::new("example.com", "https").with_event("openPage"),
        ]));
        let delivered = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&delivered);
        plugin.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        std::thread::scope(|scope| {
            for worker in 0..WORKERS {
                let plugin = Arc::clone(&plugin);
                scope.spawn(move || {
                    for n in 0..LINKS_PER_WORKER {
                        let url = format!("https://example.com/w{worker}/{n}");
                        let event = plugin
                            .process_url(&url)
                            .expect("process")
                            .expect("matched");
                        assert_eq!(event.event, "openPage");
                        assert_eq!(event.data.host, "example.com");
                        assert_eq!(event.data.path, format!("/w{worker}/{n}"));
                    }
                });
            }
        });

        assert_eq!(delivered.load(Ordering::SeqCst), WORKERS * LINKS_PER_WORKER);
    }

    #[test]
    fn event_fields_come_from_the_delivered_text() {
        let plugin = plugin_with(vec![HostEntry::new("example.com\\evil", "https")]);
        let event = plugin
            .process_url("https://example.com\\evil")
            .expect("process")
            .expect("matched");
        assert_eq!(event.data.host, "example.com\\evil");
        assert_eq!(event.data.path, "");

        let plugin = plugin_with(vec![HostEntry::new("example.com", "https")]);
        let event = plugin
            .process_url("https://example.com:99999/a?x=1")
            .expect("process")
            .expect("matched");
        assert_eq!(event.data.host, "example.com");
        assert_eq!(event.data.path, "/a");
        assert_eq!(event.data.params.get("x").map(String::as_str), Some("1"));
    }
}
