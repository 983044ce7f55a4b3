// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the OS capabilities the bridge
// needs: package queries, app metadata, device facts and activity launch.

use kakao_bridge_core::error::{BridgeError, Result};
use kakao_bridge_core::{LaunchTarget, LocaleInfo, OsFamily, ScreenSize};

/// Unified host that groups all native capabilities.
pub trait PlatformHost: NativePackages + NativeAppInfo + NativeDevice + NativeLauncher {
    /// Human-readable platform name (e.g. "Android").
    fn platform_name(&self) -> &str;

    fn os_family(&self) -> OsFamily;
}

/// Package-manager queries.
pub trait NativePackages {
    /// Whether the package manager yields a launch intent for `package`.
    fn is_launchable(&self, package: &str) -> Result<bool>;

    /// Whether some installed activity handles `ACTION_VIEW` on `uri`.
    fn can_resolve_view(&self, uri: &str) -> Result<bool>;
}

/// Facts about the hosting application.
pub trait NativeAppInfo {
    fn package_name(&self) -> Result<String>;

    /// `versionName` of the hosting application.
    fn app_version(&self) -> Result<String>;

    /// DER bytes of the signing certificates, oldest first.
    fn signing_certificates(&self) -> Result<Vec<Vec<u8>>>;
}

/// Facts about the device.
pub trait NativeDevice {
    /// OS API level (`Build.VERSION.SDK_INT`).
    fn os_api_level(&self) -> Result<u32>;

    /// User-visible OS version (`Build.VERSION.RELEASE`,
    /// `UIDevice.systemVersion`).
    fn os_version(&self) -> Result<String>;

    fn locale(&self) -> Result<LocaleInfo>;

    /// First preferred language tag, e.g. `ko-KR`.
    fn preferred_language(&self) -> Result<String> {
        let locale = self.locale()?;
        Ok(format!("{}-{}", locale.language, locale.country))
    }

    /// Main screen bounds in points.
    fn screen_size(&self) -> Result<ScreenSize> {
        Err(BridgeError::PlatformUnavailable)
    }

    /// `Build.MODEL`, unsanitised.
    fn device_model(&self) -> Result<String>;

    /// `Build.PRODUCT`.
    fn device_product(&self) -> Result<String>;

    /// The per-device secure identifier (`Settings.Secure.ANDROID_ID`).
    fn secure_device_id(&self) -> Result<String>;
}

/// Starting external activities.
pub trait NativeLauncher {
    /// Fire-and-forget launch. An absent handler yields
    /// `BridgeError::TargetNotInstalled`.
    fn start_activity(&self, target: &LaunchTarget) -> Result<()>;

    /// Launch expecting exactly one activity-result callback tagged with
    /// `request_code`.
    fn start_activity_for_result(&self, target: &LaunchTarget, request_code: i32) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Boxed hosts, as returned by `platform_host()`
// ---------------------------------------------------------------------------

impl<T: PlatformHost + ?Sized> PlatformHost for Box<T> {
    fn platform_name(&self) -> &str {
        (**self).platform_name()
    }

    fn os_family(&self) -> OsFamily {
        (**self).os_family()
    }
}

impl<T: NativePackages + ?Sized> NativePackages for Box<T> {
    fn is_launchable(&self, package: &str) -> Result<bool> {
        (**self).is_launchable(package)
    }

    fn can_resolve_view(&self, uri: &str) -> Result<bool> {
        (**self).can_resolve_view(uri)
    }
}

impl<T: NativeAppInfo + ?Sized> NativeAppInfo for Box<T> {
    fn package_name(&self) -> Result<String> {
        (**self).package_name()
    }

    fn app_version(&self) -> Result<String> {
        (**self).app_version()
    }

    fn signing_certificates(&self) -> Result<Vec<Vec<u8>>> {
        (**self).signing_certificates()
    }
}

impl<T: NativeDevice + ?Sized> NativeDevice for Box<T> {
    fn os_api_level(&self) -> Result<u32> {
        (**self).os_api_level()
    }

    fn os_version(&self) -> Result<String> {
        (**self).os_version()
    }

    fn locale(&self) -> Result<LocaleInfo> {
        (**self).locale()
    }

    fn preferred_language(&self) -> Result<String> {
        (**self).preferred_language()
    }

    fn screen_size(&self) -> Result<ScreenSize> {
        (**self).screen_size()
    }

    fn device_model(&self) -> Result<String> {
        (**self).device_model()
    }

    fn device_product(&self) -> Result<String> {
        (**self).device_product()
    }

    fn secure_device_id(&self) -> Result<String> {
        (**self).secure_device_id()
    }
}

impl<T: NativeLauncher + ?Sized> NativeLauncher for Box<T> {
    fn start_activity(&self, target: &LaunchTarget) -> Result<()> {
        (**self).start_activity(target)
    }

    fn start_activity_for_result(&self, target: &LaunchTarget, request_code: i32) -> Result<()> {
        (**self).start_activity_for_result(target, request_code)
    }
}
