// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS platform host via objc2.
//
// Requires compilation with the iOS SDK (Xcode). Device and app facts come
// from UIDevice, UIScreen, NSBundle and NSLocale; deep links go through
// `UIApplication openURL:`. All UIKit calls require the main thread and
// return `PlatformApiFailure` when made off-main.
//
// iOS has no package manager, no signing-certificate API and no
// activity-result callback, so those capabilities report
// `PlatformUnavailable`.

#![cfg(target_os = "ios")]

use objc2::MainThreadMarker;
use objc2::msg_send;
use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2_foundation::{NSBundle, NSDictionary, NSLocale, NSString, NSURL};
use objc2_ui_kit::{UIApplication, UIDevice, UIScreen};

use kakao_bridge_core::error::{BridgeError, Result};
use kakao_bridge_core::{LaunchTarget, LocaleInfo, OsFamily, ScreenSize};

use crate::traits::*;

const SHORT_VERSION_KEY: &str = "CFBundleShortVersionString";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn require_main_thread() -> Result<MainThreadMarker> {
    MainThreadMarker::new().ok_or_else(|| {
        BridgeError::PlatformApiFailure("must be called from the main thread".into())
    })
}

fn ns_url(raw: &str) -> Result<Retained<NSURL>> {
    let ns_raw = NSString::from_str(raw);
    NSURL::URLWithString(&ns_raw)
        .ok_or_else(|| BridgeError::PlatformApiFailure(format!("NSURL rejected {raw}")))
}

fn main_bundle_string(key: &str) -> Result<String> {
    let bundle = NSBundle::mainBundle();
    let ns_key = NSString::from_str(key);
    let value = bundle
        .objectForInfoDictionaryKey(&ns_key)
        .ok_or_else(|| BridgeError::PlatformApiFailure(format!("{key} missing from Info.plist")))?;
    value
        .downcast::<NSString>()
        .map(|s| s.to_string())
        .map_err(|_| BridgeError::PlatformApiFailure(format!("{key} is not a string")))
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// iOS implementation of the platform host.
pub struct IosHost;

impl IosHost {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IosHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformHost for IosHost {
    fn platform_name(&self) -> &str {
        "iOS"
    }

    fn os_family(&self) -> OsFamily {
        OsFamily::Ios
    }
}

// ---------------------------------------------------------------------------
// NativePackages: UIApplication canOpenURL
// ---------------------------------------------------------------------------

impl NativePackages for IosHost {
    fn is_launchable(&self, package: &str) -> Result<bool> {
        tracing::debug!(package, "iOS: no package manager to query");
        Err(BridgeError::PlatformUnavailable)
    }

    /// Requires the URL scheme in `LSApplicationQueriesSchemes`.
    fn can_resolve_view(&self, uri: &str) -> Result<bool> {
        let mtm = require_main_thread()?;
        let url = ns_url(uri)?;
        let app = UIApplication::sharedApplication(mtm);
        // SAFETY: canOpenURL: is a documented UIApplication selector; main
        // thread guaranteed by the marker above.
        Ok(unsafe { app.canOpenURL(&url) })
    }
}

// ---------------------------------------------------------------------------
// NativeAppInfo: NSBundle
// ---------------------------------------------------------------------------

impl NativeAppInfo for IosHost {
    /// The bundle identifier.
    fn package_name(&self) -> Result<String> {
        NSBundle::mainBundle()
            .bundleIdentifier()
            .map(|id| id.to_string())
            .ok_or_else(|| BridgeError::PlatformApiFailure("bundle has no identifier".into()))
    }

    fn app_version(&self) -> Result<String> {
        main_bundle_string(SHORT_VERSION_KEY)
    }

    fn signing_certificates(&self) -> Result<Vec<Vec<u8>>> {
        Err(BridgeError::PlatformUnavailable)
    }
}

// ---------------------------------------------------------------------------
// NativeDevice: UIDevice, UIScreen, NSLocale
// ---------------------------------------------------------------------------

impl NativeDevice for IosHost {
    fn os_api_level(&self) -> Result<u32> {
        Err(BridgeError::PlatformUnavailable)
    }

    fn os_version(&self) -> Result<String> {
        let mtm = require_main_thread()?;
        Ok(UIDevice::currentDevice(mtm).systemVersion().to_string())
    }

    fn locale(&self) -> Result<LocaleInfo> {
        let locale = NSLocale::currentLocale();
        Ok(LocaleInfo {
            language: locale.languageCode().to_string(),
            country: locale.countryCode().map(|c| c.to_string()).unwrap_or_default(),
        })
    }

    /// `NSLocale.preferredLanguages[0]`, else the current locale's language.
    fn preferred_language(&self) -> Result<String> {
        match NSLocale::preferredLanguages().firstObject() {
            Some(lang) => Ok(lang.to_string()),
            None => Ok(NSLocale::currentLocale().languageCode().to_string()),
        }
    }

    fn screen_size(&self) -> Result<ScreenSize> {
        let mtm = require_main_thread()?;
        let bounds = UIScreen::mainScreen(mtm).bounds();
        Ok(ScreenSize {
            width: bounds.size.width,
            height: bounds.size.height,
        })
    }

    /// `UIDevice.model`, e.g. "iPhone".
    fn device_model(&self) -> Result<String> {
        let mtm = require_main_thread()?;
        Ok(UIDevice::currentDevice(mtm).model().to_string())
    }

    fn device_product(&self) -> Result<String> {
        Err(BridgeError::PlatformUnavailable)
    }

    /// `UIDevice.identifierForVendor`.
    fn secure_device_id(&self) -> Result<String> {
        let mtm = require_main_thread()?;
        UIDevice::currentDevice(mtm)
            .identifierForVendor()
            .map(|uuid| uuid.UUIDString().to_string())
            .ok_or_else(|| {
                BridgeError::PlatformApiFailure("identifierForVendor is unavailable".into())
            })
    }
}

// ---------------------------------------------------------------------------
// NativeLauncher: UIApplication openURL
// ---------------------------------------------------------------------------

impl NativeLauncher for IosHost {
    /// Opens `View` and `Send` targets as URLs. Login targets are driven by
    /// the Swift side of the plugin.
    fn start_activity(&self, target: &LaunchTarget) -> Result<()> {
        let uri = match target {
            LaunchTarget::View { uri, .. } | LaunchTarget::Send { uri, .. } => uri,
            LaunchTarget::BrowserTab { .. } | LaunchTarget::TalkLogin(_) => {
                return Err(BridgeError::PlatformUnavailable);
            }
        };
        let mtm = require_main_thread()?;
        let url = ns_url(uri)?;
        let app = UIApplication::sharedApplication(mtm);

        // SAFETY: canOpenURL: on the main thread, see above.
        if !unsafe { app.canOpenURL(&url) } {
            return Err(BridgeError::not_installed("target app"));
        }

        tracing::info!(kind = target.kind(), "iOS: opening URL");
        let options = NSDictionary::<NSString, AnyObject>::new();
        // SAFETY: openURL:options:completionHandler: is a documented
        // UIApplication selector. A nil completion handler is permitted and
        // the options dictionary is empty. Main thread guaranteed above.
        unsafe {
            let _: () = msg_send![
                &app,
                openURL: &*url,
                options: &*options,
                completionHandler: std::ptr::null::<AnyObject>()
            ];
        }
        Ok(())
    }

    fn start_activity_for_result(&self, target: &LaunchTarget, request_code: i32) -> Result<()> {
        tracing::warn!(
            kind = target.kind(),
            request_code,
            "iOS: no activity-result callback; login is handled by the Swift plugin"
        );
        Err(BridgeError::PlatformUnavailable)
    }
}
