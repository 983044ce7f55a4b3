// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub host for desktop/CI builds where the mobile OS is unavailable.
//
// Every query returns `PlatformUnavailable`: the real implementations live
// in the `android` and `ios` modules.

use kakao_bridge_core::error::{BridgeError, Result};
use kakao_bridge_core::{LaunchTarget, LocaleInfo, OsFamily};

use crate::traits::*;

/// No-op host returned on non-mobile platforms.
pub struct StubHost;

impl PlatformHost for StubHost {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }

    fn os_family(&self) -> OsFamily {
        OsFamily::Android
    }
}

impl NativePackages for StubHost {
    fn is_launchable(&self, package: &str) -> Result<bool> {
        tracing::warn!(package, "NativePackages::is_launchable called on stub host");
        Err(BridgeError::PlatformUnavailable)
    }

    fn can_resolve_view(&self, _uri: &str) -> Result<bool> {
        Err(BridgeError::PlatformUnavailable)
    }
}

impl NativeAppInfo for StubHost {
    fn package_name(&self) -> Result<String> {
        Err(BridgeError::PlatformUnavailable)
    }

    fn app_version(&self) -> Result<String> {
        Err(BridgeError::PlatformUnavailable)
    }

    fn signing_certificates(&self) -> Result<Vec<Vec<u8>>> {
        Err(BridgeError::PlatformUnavailable)
    }
}

impl NativeDevice for StubHost {
    fn os_api_level(&self) -> Result<u32> {
        Err(BridgeError::PlatformUnavailable)
    }

    fn os_version(&self) -> Result<String> {
        Err(BridgeError::PlatformUnavailable)
    }

    fn locale(&self) -> Result<LocaleInfo> {
        Err(BridgeError::PlatformUnavailable)
    }

    fn device_model(&self) -> Result<String> {
        Err(BridgeError::PlatformUnavailable)
    }

    fn device_product(&self) -> Result<String> {
        Err(BridgeError::PlatformUnavailable)
    }

    fn secure_device_id(&self) -> Result<String> {
        tracing::warn!("NativeDevice::secure_device_id called on stub host");
        Err(BridgeError::PlatformUnavailable)
    }
}

impl NativeLauncher for StubHost {
    fn start_activity(&self, target: &LaunchTarget) -> Result<()> {
        tracing::warn!(kind = target.kind(), "NativeLauncher::start_activity called on stub host");
        Err(BridgeError::PlatformUnavailable)
    }

    fn start_activity_for_result(&self, target: &LaunchTarget, request_code: i32) -> Result<()> {
        tracing::warn!(
            kind = target.kind(),
            request_code,
            "NativeLauncher::start_activity_for_result called on stub host"
        );
        Err(BridgeError::PlatformUnavailable)
    }
}
