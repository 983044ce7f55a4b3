// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// KA header: the client identification string sent with Kakao API calls
// for verification, statistics and support. Android and iOS hosts report
// different fields in a different order.

use std::fmt;

use kakao_bridge_core::constants::{ANDROID_PKG, APP_VER, DEVICE, LANG, ORIGIN, OS, RES};
use kakao_bridge_core::error::Result;
use kakao_bridge_core::{OsFamily, ScreenSize};
use kakao_bridge_native::PlatformHost;
use kakao_bridge_security::key_hash;

/// The header for whichever OS family the host runs.
#[derive(Debug, Clone, PartialEq)]
pub enum KaHeader {
    Android(AndroidKaHeader),
    Ios(IosKaHeader),
}

/// Android fields, in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidKaHeader {
    pub os_api_level: u32,
    pub language: String,
    pub country: String,
    /// Signing-key hash of the hosting app.
    pub origin: String,
    /// Raw device model; sanitised when formatted.
    pub device_model: String,
    pub package_name: String,
    pub app_version: String,
}

/// iOS fields, in wire order. Values are reported as the OS gives them.
#[derive(Debug, Clone, PartialEq)]
pub struct IosKaHeader {
    pub os_version: String,
    /// First preferred language tag, e.g. `ko-KR`.
    pub language: String,
    pub screen: ScreenSize,
    pub device_model: String,
    /// Bundle identifier.
    pub origin: String,
    pub app_version: String,
}

impl KaHeader {
    /// Gather every field from the host.
    pub fn collect<H: PlatformHost + ?Sized>(host: &H) -> Result<Self> {
        match host.os_family() {
            OsFamily::Android => AndroidKaHeader::collect(host).map(Self::Android),
            OsFamily::Ios => IosKaHeader::collect(host).map(Self::Ios),
        }
    }
}

impl AndroidKaHeader {
    pub fn collect<H: PlatformHost + ?Sized>(host: &H) -> Result<Self> {
        let locale = host.locale()?;
        Ok(Self {
            os_api_level: host.os_api_level()?,
            language: locale.language,
            country: locale.country,
            origin: key_hash(&host.signing_certificates()?)?,
            device_model: host.device_model()?,
            package_name: host.package_name()?,
            app_version: host.app_version()?,
        })
    }
}

impl IosKaHeader {
    pub fn collect<H: PlatformHost + ?Sized>(host: &H) -> Result<Self> {
        Ok(Self {
            os_version: host.os_version()?,
            language: host.preferred_language()?,
            screen: host.screen_size()?,
            device_model: host.device_model()?,
            origin: host.package_name()?,
            app_version: host.app_version()?,
        })
    }
}

impl fmt::Display for KaHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Android(header) => header.fmt(f),
            Self::Ios(header) => header.fmt(f),
        }
    }
}

impl fmt::Display for AndroidKaHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{OS}/android-{} {LANG}/{}-{} {ORIGIN}/{} {DEVICE}/{} {ANDROID_PKG}/{} {APP_VER}/{}",
            self.os_api_level,
            self.language.to_lowercase(),
            self.country.to_uppercase(),
            self.origin,
            sanitize_model(&self.device_model),
            self.package_name,
            self.app_version,
        )
    }
}

impl fmt::Display for IosKaHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{OS}/ios-{} {LANG}/{} {RES}/{} {DEVICE}/{} {ORIGIN}/{} {APP_VER}/{}",
            self.os_version,
            self.language,
            self.screen,
            self.device_model,
            self.origin,
            self.app_version,
        )
    }
}

/// Non-ASCII characters become `*`, whitespace becomes `-`, then the whole
/// string is uppercased.
pub fn sanitize_model(model: &str) -> String {
    model
        .chars()
        .map(|c| match c {
            c if !c.is_ascii() => '*',
            c if c.is_ascii_whitespace() || c == '\u{0B}' => '-',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}
