// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Unilink — Native launch-intent bridges.
//!
//! Defines the [`LaunchSource`](traits::LaunchSource) abstraction over "how
//! was this process started" and the platform dispatch that picks an
//! implementation for the target OS. Android reads the hosting activity's
//! intent through JNI; other targets get a stub.

pub mod fixed;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

use tracing::{debug, info};

use unilink_core::error::{Result, UnilinkError};
use unilink_core::{LinkEvent, UniversalLinks};

pub use fixed::FixedLaunchSource;
pub use traits::LaunchSource;

/// Retrieves the launch source implementation for the target operating system.
pub fn launch_source() -> Box<dyn LaunchSource> {
    #[cfg(target_os = "android")]
    {
        Box::new(android::AndroidLaunchSource::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // Desktop/CI/iOS: no readable launch intent. iOS adapters forward
        // the opened URL through `UniversalLinks::process_url` instead.
        Box::new(stub::StubLaunchSource)
    }
}

/// Process the intent that launched the app, if it carried a link.
///
/// Call this once the script side has subscribed its listeners: an event
/// matched before any listener exists is dropped. A platform without launch
/// intents is treated like a process started without one.
pub fn deliver_launch_intent(
    plugin: &UniversalLinks,
    source: &dyn LaunchSource,
) -> Result<Option<LinkEvent>> {
    if plugin.matcher().is_empty() {
        return Ok(None);
    }

    let intent = match source.launch_intent() {
        Ok(Some(intent)) => intent,
        Ok(None) => {
            debug!(platform = source.platform_name(), "process was not launched by an intent");
            return Ok(None);
        }
        Err(UnilinkError::PlatformUnavailable) => {
            debug!(platform = source.platform_name(), "launch intents unavailable");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    info!(
        platform = source.platform_name(),
        action = %intent.action,
        data = ?intent.data,
        "handling launch intent"
    );
    plugin.on_new_intent(&intent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use unilink_core::{HostEntry, LaunchIntent};

    struct FailingSource;

    impl LaunchSource for FailingSource {
        fn platform_name(&self) -> &str {
            "Failing"
        }

        fn launch_intent(&self) -> Result<Option<LaunchIntent>> {
            Err(UnilinkError::Bridge("activity gone".into()))
        }
    }

    fn plugin() -> UniversalLinks {
        let plugin = UniversalLinks::new();
        plugin.initialize(vec![HostEntry::new("example.com", "https")]);
        plugin
    }

    #[test]
    fn launch_link_reaches_listener() {
        let plugin = plugin();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        plugin.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let source = FixedLaunchSource::view("https://example.com/welcome");
        let event = deliver_launch_intent(&plugin, &source)
            .expect("deliver")
            .expect("matched");

        assert_eq!(event.data.path, "/welcome");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn ordinary_launch_does_nothing() {
        let plugin = plugin();
        let event = deliver_launch_intent(&plugin, &FixedLaunchSource::none()).expect("deliver");
        assert!(event.is_none());
    }

    #[test]
    fn unsupported_launch_link_is_dropped() {
        let plugin = plugin();
        let source = FixedLaunchSource::view("https://other.com/");
        assert!(deliver_launch_intent(&plugin, &source).expect("deliver").is_none());
    }

    #[test]
    fn uninitialized_plugin_skips_the_source() {
        let plugin = UniversalLinks::new();
        assert!(
            deliver_launch_intent(&plugin, &FailingSource)
                .expect("deliver")
                .is_none()
        );
    }

    #[test]
    fn bridge_errors_propagate() {
        let err = deliver_launch_intent(&plugin(), &FailingSource).unwrap_err();
        assert!(matches!(err, UnilinkError::Bridge(_)));
    }

    #[cfg(not(target_os = "android"))]
    #[test]
    fn stub_platform_is_treated_as_no_intent() {
        let source = launch_source();
        assert_eq!(source.platform_name(), "Desktop (stub)");
        assert!(
            deliver_launch_intent(&plugin(), source.as_ref())
                .expect("deliver")
                .is_none()
        );
    }
}
