// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Kakao bridge: native platform host abstractions.
//
// The dispatcher only ever talks to the operating system through the
// `PlatformHost` trait set defined here. Android goes through JNI, iOS
// through objc2; every other target gets the stub, which reports
// `PlatformUnavailable`.

pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(not(any(target_os = "android", target_os = "ios")))]
pub mod stub;

pub use traits::PlatformHost;

/// Host implementation for the target operating system.
pub fn platform_host() -> Box<dyn PlatformHost> {
    #[cfg(target_os = "android")]
    {
        Box::new(android::AndroidHost::new())
    }
    #[cfg(target_os = "ios")]
    {
        Box::new(ios::IosHost::new())
    }
    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    {
        Box::new(stub::StubHost)
    }
}
