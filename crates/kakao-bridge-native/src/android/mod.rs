// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform host via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Each trait method calls the corresponding
// Android API (PackageManager, Settings.Secure, Build, Intent) through JNI.
//
// ## Architecture notes
//
// Queries complete synchronously. Login flows are started with
// `startActivityForResult`; their outcome arrives later through the host
// Activity's `onActivityResult`, which must forward `(requestCode,
// resultCode, extras)` to `Bridge::on_activity_result`.

#![cfg(target_os = "android")]

use std::sync::OnceLock;

use jni::objects::{JByteArray, JObject, JObjectArray, JString, JValue};
use jni::{JNIEnv, JavaVM};

use kakao_bridge_core::error::{BridgeError, Result};
use kakao_bridge_core::{LaunchTarget, LocaleInfo, OsFamily, TalkLoginRequest, constants};

use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// Activities shipped by the Kotlin side of the plugin.
const CUSTOM_TABS_ACTIVITY: &str = "com.kakao.sdk.flutter.AuthCodeCustomTabsActivity";
const TALK_AUTH_ACTIVITY: &str = "com.kakao.sdk.flutter.TalkAuthCodeActivity";

const ACTION_VIEW: &str = "android.intent.action.VIEW";
const ACTION_SEND: &str = "android.intent.action.SEND";

/// `PackageManager.GET_SIGNATURES`.
const GET_SIGNATURES: i32 = 0x0000_0040;
/// `PackageManager.GET_SIGNING_CERTIFICATES`.
const GET_SIGNING_CERTIFICATES: i32 = 0x0800_0000;
/// `Build.VERSION_CODES.P`.
const API_P: i32 = 28;

static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

fn java_vm() -> Result<&'static JavaVM> {
    if let Some(vm) = JAVA_VM.get() {
        return Ok(vm);
    }
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| BridgeError::PlatformApiFailure(format!("failed to obtain JavaVM: {e}")))?;
    Ok(JAVA_VM.get_or_init(|| vm))
}

/// Obtain a [`JNIEnv`] for the current thread, attaching it if needed.
fn jni_env() -> Result<JNIEnv<'static>> {
    java_vm()?
        .attach_current_thread_permanently()
        .map_err(|e| BridgeError::PlatformApiFailure(format!("failed to attach JNI thread: {e}")))
}

/// The hosting `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ptr = ndk_context::android_context().context();
    if ptr.is_null() {
        return Err(BridgeError::PlatformApiFailure(
            "Android context is null: activity not attached".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Map a JNI failure into a `BridgeError`, clearing any pending Java
/// exception so later calls on this thread are not poisoned.
///
/// `ActivityNotFoundException` becomes `TargetNotInstalled`; everything
/// else is a `PlatformApiFailure`.
fn jni_err(env: &mut JNIEnv<'_>, context: &str, e: jni::errors::Error) -> BridgeError {
    if !matches!(e, jni::errors::Error::JavaException) {
        return BridgeError::PlatformApiFailure(format!("{context}: {e}"));
    }
    let Ok(throwable) = env.exception_occurred() else {
        return BridgeError::PlatformApiFailure(format!("{context}: {e}"));
    };
    let _ = env.exception_clear();
    if env
        .is_instance_of(&throwable, "android/content/ActivityNotFoundException")
        .unwrap_or(false)
    {
        tracing::debug!(context, "ActivityNotFoundException");
        return BridgeError::not_installed("target activity");
    }
    let description = env
        .call_method(&throwable, "toString", "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
        .ok()
        .and_then(|s| java_string(env, s).ok())
        .unwrap_or_else(|| e.to_string());
    BridgeError::PlatformApiFailure(format!("{context}: {description}"))
}

fn java_string(env: &mut JNIEnv<'_>, obj: JObject<'_>) -> jni::errors::Result<String> {
    Ok(env.get_string(&JString::from(obj))?.into())
}

/// Call a method returning an object. Null results are passed through.
fn call_object<'a>(
    env: &mut JNIEnv<'a>,
    target: &JObject<'_>,
    name: &str,
    sig: &str,
    args: &[JValue<'_, '_>],
) -> Result<JObject<'a>> {
    match env.call_method(target, name, sig, args).and_then(|v| v.l()) {
        Ok(obj) => Ok(obj),
        Err(e) => Err(jni_err(env, name, e)),
    }
}

/// Call a method returning a `String`; null maps to `PlatformApiFailure`.
fn call_string(env: &mut JNIEnv<'_>, target: &JObject<'_>, name: &str) -> Result<String> {
    let obj = call_object(env, target, name, "()Ljava/lang/String;", &[])?;
    if obj.is_null() {
        return Err(BridgeError::PlatformApiFailure(format!("{name} returned null")));
    }
    java_string(env, obj).map_err(|e| jni_err(env, name, e))
}

fn static_string_field(env: &mut JNIEnv<'_>, class: &str, field: &str) -> Result<String> {
    let obj = match env
        .get_static_field(class, field, "Ljava/lang/String;")
        .and_then(|v| v.l())
    {
        Ok(obj) => obj,
        Err(e) => return Err(jni_err(env, field, e)),
    };
    java_string(env, obj).map_err(|e| jni_err(env, field, e))
}

fn sdk_int(env: &mut JNIEnv<'_>) -> Result<i32> {
    match env
        .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
        .and_then(|v| v.i())
    {
        Ok(level) => Ok(level),
        Err(e) => Err(jni_err(env, "Build.VERSION.SDK_INT", e)),
    }
}

fn package_manager<'a>(env: &mut JNIEnv<'a>, activity: &JObject<'_>) -> Result<JObject<'a>> {
    call_object(
        env,
        activity,
        "getPackageManager",
        "()Landroid/content/pm/PackageManager;",
        &[],
    )
}

/// `Uri.parse(uri)`.
fn parse_uri<'a>(env: &mut JNIEnv<'a>, uri: &str) -> Result<JObject<'a>> {
    let j_uri: JString = env
        .new_string(uri)
        .map_err(|e| jni_err(env, "new_string(uri)", e))?;
    match env
        .call_static_method(
            "android/net/Uri",
            "parse",
            "(Ljava/lang/String;)Landroid/net/Uri;",
            &[JValue::Object(&j_uri)],
        )
        .and_then(|v| v.l())
    {
        Ok(obj) => Ok(obj),
        Err(e) => Err(jni_err(env, "Uri.parse", e)),
    }
}

/// `new Intent(action, Uri.parse(uri))`.
fn action_intent<'a>(env: &mut JNIEnv<'a>, action: &str, uri: &str) -> Result<JObject<'a>> {
    let uri_obj = parse_uri(env, uri)?;
    let j_action: JString = env
        .new_string(action)
        .map_err(|e| jni_err(env, "new_string(action)", e))?;
    env.new_object(
        "android/content/Intent",
        "(Ljava/lang/String;Landroid/net/Uri;)V",
        &[JValue::Object(&j_action), JValue::Object(&uri_obj)],
    )
    .map_err(|e| jni_err(env, "new Intent(action, uri)", e))
}

/// `new Intent(activity, <plugin activity>)`.
///
/// Plugin classes are not visible to `FindClass` from a native thread, so
/// the class is loaded through the Activity's class loader.
fn component_intent<'a>(
    env: &mut JNIEnv<'a>,
    activity: &JObject<'_>,
    class_name: &str,
) -> Result<JObject<'a>> {
    let loader = call_object(env, activity, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])?;
    let j_name: JString = env
        .new_string(class_name)
        .map_err(|e| jni_err(env, "new_string(class)", e))?;
    let class = call_object(
        env,
        &loader,
        "loadClass",
        "(Ljava/lang/String;)Ljava/lang/Class;",
        &[JValue::Object(&j_name)],
    )?;
    env.new_object(
        "android/content/Intent",
        "(Landroid/content/Context;Ljava/lang/Class;)V",
        &[JValue::Object(activity), JValue::Object(&class)],
    )
    .map_err(|e| jni_err(env, "new Intent(context, class)", e))
}

fn put_string_extra(
    env: &mut JNIEnv<'_>,
    intent: &JObject<'_>,
    key: &str,
    value: &str,
) -> Result<()> {
    let j_key: JString = env
        .new_string(key)
        .map_err(|e| jni_err(env, "new_string(extra key)", e))?;
    let j_value: JString = env
        .new_string(value)
        .map_err(|e| jni_err(env, "new_string(extra value)", e))?;
    call_object(
        env,
        intent,
        "putExtra",
        "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/Intent;",
        &[JValue::Object(&j_key), JValue::Object(&j_value)],
    )?;
    Ok(())
}

fn add_flags(env: &mut JNIEnv<'_>, intent: &JObject<'_>, flags: i32) -> Result<()> {
    call_object(
        env,
        intent,
        "addFlags",
        "(I)Landroid/content/Intent;",
        &[JValue::Int(flags)],
    )?;
    Ok(())
}

/// Put the talk-login parameters and their nested extras bundle.
fn put_talk_login_extras(
    env: &mut JNIEnv<'_>,
    intent: &JObject<'_>,
    request: &TalkLoginRequest,
) -> Result<()> {
    put_string_extra(env, intent, constants::KEY_SDK_VERSION, &request.sdk_version)?;
    put_string_extra(env, intent, constants::KEY_CLIENT_ID, &request.client_id)?;
    put_string_extra(env, intent, constants::KEY_REDIRECT_URI, &request.redirect_uri)?;

    let bundle = env
        .new_object("android/os/Bundle", "()V", &[])
        .map_err(|e| jni_err(env, "new Bundle", e))?;
    for (key, value) in &request.extras {
        let j_key: JString = env
            .new_string(key)
            .map_err(|e| jni_err(env, "new_string(bundle key)", e))?;
        let j_value: JString = env
            .new_string(value)
            .map_err(|e| jni_err(env, "new_string(bundle value)", e))?;
        if let Err(e) = env.call_method(
            &bundle,
            "putString",
            "(Ljava/lang/String;Ljava/lang/String;)V",
            &[JValue::Object(&j_key), JValue::Object(&j_value)],
        ) {
            return Err(jni_err(env, "Bundle.putString", e));
        }
    }

    let j_extras_key: JString = env
        .new_string(constants::KEY_EXTRAS)
        .map_err(|e| jni_err(env, "new_string(key_extras)", e))?;
    call_object(
        env,
        intent,
        "putExtra",
        "(Ljava/lang/String;Landroid/os/Bundle;)Landroid/content/Intent;",
        &[JValue::Object(&j_extras_key), JValue::Object(&bundle)],
    )?;
    Ok(())
}

/// Translate a [`LaunchTarget`] into an `Intent`.
fn build_intent<'a>(
    env: &mut JNIEnv<'a>,
    activity: &JObject<'_>,
    target: &LaunchTarget,
) -> Result<JObject<'a>> {
    match target {
        LaunchTarget::View { uri, flags } => {
            let intent = action_intent(env, ACTION_VIEW, uri)?;
            add_flags(env, &intent, *flags)?;
            Ok(intent)
        }
        LaunchTarget::Send { uri, flags } => {
            let intent = action_intent(env, ACTION_SEND, uri)?;
            add_flags(env, &intent, *flags)?;
            Ok(intent)
        }
        LaunchTarget::BrowserTab {
            full_uri,
            redirect_url,
        } => {
            let intent = component_intent(env, activity, CUSTOM_TABS_ACTIVITY)?;
            put_string_extra(env, &intent, constants::KEY_FULL_URI, full_uri)?;
            if let Some(redirect) = redirect_url {
                put_string_extra(env, &intent, constants::KEY_REDIRECT_URL, redirect)?;
            }
            Ok(intent)
        }
        LaunchTarget::TalkLogin(request) => {
            let intent = component_intent(env, activity, TALK_AUTH_ACTIVITY)?;
            put_talk_login_extras(env, &intent, request)?;
            Ok(intent)
        }
    }
}

/// `pm.getPackageInfo(packageName, flags)`.
fn package_info<'a>(
    env: &mut JNIEnv<'a>,
    activity: &JObject<'_>,
    flags: i32,
) -> Result<JObject<'a>> {
    let pm = package_manager(env, activity)?;
    let pkg = call_object(env, activity, "getPackageName", "()Ljava/lang/String;", &[])?;
    call_object(
        env,
        &pm,
        "getPackageInfo",
        "(Ljava/lang/String;I)Landroid/content/pm/PackageInfo;",
        &[JValue::Object(&pkg), JValue::Int(flags)],
    )
}

/// Collect `Signature.toByteArray()` for every element of a `Signature[]`.
fn signature_bytes(env: &mut JNIEnv<'_>, signatures: JObject<'_>) -> Result<Vec<Vec<u8>>> {
    if signatures.is_null() {
        return Err(BridgeError::PlatformApiFailure("no signatures in PackageInfo".into()));
    }
    let array = JObjectArray::from(signatures);
    let len = env
        .get_array_length(&array)
        .map_err(|e| jni_err(env, "Signature[].length", e))?;

    let mut certificates = Vec::with_capacity(len as usize);
    for i in 0..len {
        let signature = env
            .get_object_array_element(&array, i)
            .map_err(|e| jni_err(env, "Signature[i]", e))?;
        let bytes = call_object(env, &signature, "toByteArray", "()[B", &[])?;
        let der = env
            .convert_byte_array(JByteArray::from(bytes))
            .map_err(|e| jni_err(env, "convert_byte_array(signature)", e))?;
        certificates.push(der);
    }
    Ok(certificates)
}

// ---------------------------------------------------------------------------
// Host struct
// ---------------------------------------------------------------------------

/// Android implementation of the platform host.
///
/// Zero-sized; all state lives on the Java side.
pub struct AndroidHost;

impl AndroidHost {
    /// Create a new Android host. No JNI call happens until a trait method
    /// is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformHost for AndroidHost {
    fn platform_name(&self) -> &str {
        "Android"
    }

    fn os_family(&self) -> OsFamily {
        OsFamily::Android
    }
}

// ---------------------------------------------------------------------------
// NativePackages: android.content.pm.PackageManager
// ---------------------------------------------------------------------------

impl NativePackages for AndroidHost {
    fn is_launchable(&self, package: &str) -> Result<bool> {
        let mut env = jni_env()?;
        let activity = activity()?;
        let pm = package_manager(&mut env, &activity)?;

        let j_pkg: JString = env
            .new_string(package)
            .map_err(|e| jni_err(&mut env, "new_string(package)", e))?;
        let intent = call_object(
            &mut env,
            &pm,
            "getLaunchIntentForPackage",
            "(Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&j_pkg)],
        )?;

        let launchable = !intent.is_null();
        tracing::debug!(package, launchable, "Android: launch intent lookup");
        Ok(launchable)
    }

    fn can_resolve_view(&self, uri: &str) -> Result<bool> {
        let mut env = jni_env()?;
        let activity = activity()?;
        let pm = package_manager(&mut env, &activity)?;
        let intent = action_intent(&mut env, ACTION_VIEW, uri)?;

        let info = call_object(
            &mut env,
            &pm,
            "resolveActivity",
            "(Landroid/content/Intent;I)Landroid/content/pm/ResolveInfo;",
            &[JValue::Object(&intent), JValue::Int(0)],
        )?;
        Ok(!info.is_null())
    }
}

// ---------------------------------------------------------------------------
// NativeAppInfo: PackageInfo of the hosting app
// ---------------------------------------------------------------------------

impl NativeAppInfo for AndroidHost {
    fn package_name(&self) -> Result<String> {
        let mut env = jni_env()?;
        let activity = activity()?;
        call_string(&mut env, &activity, "getPackageName")
    }

    fn app_version(&self) -> Result<String> {
        let mut env = jni_env()?;
        let activity = activity()?;
        let info = package_info(&mut env, &activity, 0)?;
        let name = match env
            .get_field(&info, "versionName", "Ljava/lang/String;")
            .and_then(|v| v.l())
        {
            Ok(obj) => obj,
            Err(e) => return Err(jni_err(&mut env, "PackageInfo.versionName", e)),
        };
        if name.is_null() {
            return Err(BridgeError::PlatformApiFailure("versionName is not set".into()));
        }
        java_string(&mut env, name).map_err(|e| jni_err(&mut env, "versionName", e))
    }

    /// API 28+ reads `signingInfo.signingCertificateHistory`; older
    /// releases fall back to the deprecated `signatures` field.
    fn signing_certificates(&self) -> Result<Vec<Vec<u8>>> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let signatures = if sdk_int(&mut env)? >= API_P {
            let info = package_info(&mut env, &activity, GET_SIGNING_CERTIFICATES)?;
            let signing_info = match env
                .get_field(&info, "signingInfo", "Landroid/content/pm/SigningInfo;")
                .and_then(|v| v.l())
            {
                Ok(obj) => obj,
                Err(e) => return Err(jni_err(&mut env, "PackageInfo.signingInfo", e)),
            };
            if signing_info.is_null() {
                return Err(BridgeError::PlatformApiFailure("signingInfo is null".into()));
            }
            call_object(
                &mut env,
                &signing_info,
                "getSigningCertificateHistory",
                "()[Landroid/content/pm/Signature;",
                &[],
            )?
        } else {
            let info = package_info(&mut env, &activity, GET_SIGNATURES)?;
            match env
                .get_field(&info, "signatures", "[Landroid/content/pm/Signature;")
                .and_then(|v| v.l())
            {
                Ok(obj) => obj,
                Err(e) => return Err(jni_err(&mut env, "PackageInfo.signatures", e)),
            }
        };

        let certificates = signature_bytes(&mut env, signatures)?;
        tracing::debug!(count = certificates.len(), "Android: read signing certificates");
        Ok(certificates)
    }
}

// ---------------------------------------------------------------------------
// NativeDevice: Build, Locale, Settings.Secure
// ---------------------------------------------------------------------------

impl NativeDevice for AndroidHost {
    fn os_api_level(&self) -> Result<u32> {
        let mut env = jni_env()?;
        let level = sdk_int(&mut env)?;
        u32::try_from(level)
            .map_err(|_| BridgeError::PlatformApiFailure(format!("invalid SDK_INT {level}")))
    }

    fn os_version(&self) -> Result<String> {
        let mut env = jni_env()?;
        static_string_field(&mut env, "android/os/Build$VERSION", "RELEASE")
    }

    fn locale(&self) -> Result<LocaleInfo> {
        let mut env = jni_env()?;
        let locale = match env
            .call_static_method("java/util/Locale", "getDefault", "()Ljava/util/Locale;", &[])
            .and_then(|v| v.l())
        {
            Ok(obj) => obj,
            Err(e) => return Err(jni_err(&mut env, "Locale.getDefault", e)),
        };
        Ok(LocaleInfo {
            language: call_string(&mut env, &locale, "getLanguage")?,
            country: call_string(&mut env, &locale, "getCountry")?,
        })
    }

    fn device_model(&self) -> Result<String> {
        let mut env = jni_env()?;
        static_string_field(&mut env, "android/os/Build", "MODEL")
    }

    fn device_product(&self) -> Result<String> {
        let mut env = jni_env()?;
        static_string_field(&mut env, "android/os/Build", "PRODUCT")
    }

    fn secure_device_id(&self) -> Result<String> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let resolver = call_object(
            &mut env,
            &activity,
            "getContentResolver",
            "()Landroid/content/ContentResolver;",
            &[],
        )?;
        let j_name: JString = env
            .new_string("android_id")
            .map_err(|e| jni_err(&mut env, "new_string(android_id)", e))?;
        let id = match env
            .call_static_method(
                "android/provider/Settings$Secure",
                "getString",
                "(Landroid/content/ContentResolver;Ljava/lang/String;)Ljava/lang/String;",
                &[JValue::Object(&resolver), JValue::Object(&j_name)],
            )
            .and_then(|v| v.l())
        {
            Ok(obj) => obj,
            Err(e) => return Err(jni_err(&mut env, "Settings.Secure.getString", e)),
        };
        if id.is_null() {
            return Err(BridgeError::PlatformApiFailure("ANDROID_ID is not set".into()));
        }
        java_string(&mut env, id).map_err(|e| jni_err(&mut env, "ANDROID_ID", e))
    }
}

// ---------------------------------------------------------------------------
// NativeLauncher: startActivity / startActivityForResult
// ---------------------------------------------------------------------------

impl NativeLauncher for AndroidHost {
    fn start_activity(&self, target: &LaunchTarget) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;
        let intent = build_intent(&mut env, &activity, target)?;

        tracing::info!(kind = target.kind(), "Android: dispatching intent");
        if let Err(e) = env.call_method(
            &activity,
            "startActivity",
            "(Landroid/content/Intent;)V",
            &[JValue::Object(&intent)],
        ) {
            return Err(jni_err(&mut env, "startActivity", e));
        }
        Ok(())
    }

    fn start_activity_for_result(&self, target: &LaunchTarget, request_code: i32) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;
        let intent = build_intent(&mut env, &activity, target)?;

        if let Err(e) = env.call_method(
            &activity,
            "startActivityForResult",
            "(Landroid/content/Intent;I)V",
            &[JValue::Object(&intent), JValue::Int(request_code)],
        ) {
            return Err(jni_err(&mut env, "startActivityForResult", e));
        }

        tracing::info!(
            kind = target.kind(),
            request_code,
            "Android: login activity started: awaiting onActivityResult"
        );
        Ok(())
    }
}
