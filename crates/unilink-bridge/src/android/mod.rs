// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android launch source via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Reads `Activity.getIntent()` on the activity
// hosting the native code.
//
// Intents redelivered to a running activity arrive through its
// `onNewIntent(Intent)` override, which is Java/Kotlin code. The host
// Activity forwards the intent's action and data string to
// `UniversalLinks::on_new_intent`.

#![cfg(target_os = "android")]

use std::sync::OnceLock;

use jni::{JNIEnv, JavaVM};
use jni::objects::{JObject, JString};

use unilink_core::LaunchIntent;
use unilink_core::error::{Result, UnilinkError};

use crate::traits::LaunchSource;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// The process-wide `JavaVM`, resolved on first use.
static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

fn java_vm() -> Result<&'static JavaVM> {
    if let Some(vm) = JAVA_VM.get() {
        return Ok(vm);
    }
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| UnilinkError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    Ok(JAVA_VM.get_or_init(|| vm))
}

/// Obtain a [`JNIEnv`] handle for the current thread.
///
/// Attaches the thread permanently if it is not already attached, so the
/// handle stays valid for the thread's lifetime.
fn jni_env() -> Result<JNIEnv<'static>> {
    java_vm()?
        .attach_current_thread_permanently()
        .map_err(|e| UnilinkError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the current Android `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(UnilinkError::Bridge(
            "Android context is null, native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Map any `jni::errors::Error` into `UnilinkError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> UnilinkError {
    UnilinkError::Bridge(format!("{context}: {e}"))
}

/// Call a `()Ljava/lang/String;` method, mapping a Java `null` to `None`.
fn string_method(env: &mut JNIEnv, target: &JObject, method: &str) -> Result<Option<String>> {
    let value: JObject = env
        .call_method(target, method, "()Ljava/lang/String;", &[])
        .map_err(|e| jni_err(method, e))?
        .l()
        .map_err(|e| jni_err(method, e))?;

    if value.is_null() {
        return Ok(None);
    }

    let text: String = env
        .get_string(&JString::from(value))
        .map_err(|e| jni_err(method, e))?
        .into();
    Ok(Some(text))
}

// ---------------------------------------------------------------------------
// Launch source
// ---------------------------------------------------------------------------

/// Android implementation of [`LaunchSource`].
///
/// Zero-sized; the first JNI call happens when the intent is read.
pub struct AndroidLaunchSource;

impl AndroidLaunchSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidLaunchSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LaunchSource for AndroidLaunchSource {
    fn platform_name(&self) -> &str {
        "Android"
    }

    /// Read `getIntent()`, `getAction()`, and `getDataString()` from the
    /// hosting activity.
    fn launch_intent(&self) -> Result<Option<LaunchIntent>> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let intent: JObject = env
            .call_method(&activity, "getIntent", "()Landroid/content/Intent;", &[])
            .map_err(|e| jni_err("getIntent", e))?
            .l()
            .map_err(|e| jni_err("getIntent->l", e))?;

        if intent.is_null() {
            return Ok(None);
        }

        let Some(action) = string_method(&mut env, &intent, "getAction")? else {
            return Ok(None);
        };
        let data = string_method(&mut env, &intent, "getDataString")?;

        tracing::debug!(action = %action, data = ?data, "Android: read launch intent");

        Ok(Some(LaunchIntent { action, data }))
    }
}
