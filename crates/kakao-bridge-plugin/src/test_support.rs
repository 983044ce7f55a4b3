// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory host and reply recorder for unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use kakao_bridge_core::error::{BridgeError, Result};
use kakao_bridge_core::{LaunchTarget, LocaleInfo, OsFamily, ScreenSize};
use kakao_bridge_native::traits::*;

use crate::channel::{BoxedReply, ChannelReply};

/// One launch observed by the fake host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    Activity(LaunchTarget),
    ForResult(LaunchTarget, i32),
}

/// A Pixel 5 on API 30 with KakaoTalk and KakaoNavi installed.
pub struct FakeHost {
    pub family: OsFamily,
    pub model: String,
    pub installed: Vec<String>,
    pub app_version: Option<String>,
    pub device_id: Option<String>,
    pub launch_fails: bool,
    pub launches: RefCell<Vec<Launch>>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::with_packages(&["com.kakao.talk", "com.locnall.KimGiSa"])
    }
}

impl FakeHost {
    pub fn with_packages(packages: &[&str]) -> Self {
        Self {
            family: OsFamily::Android,
            model: "Pixel 5".into(),
            installed: packages.iter().map(|p| p.to_string()).collect(),
            app_version: Some("1.2.3".into()),
            device_id: Some("9774d56d682e549c".into()),
            launch_fails: false,
            launches: RefCell::new(Vec::new()),
        }
    }

    /// An iPhone on iOS 17.2; package queries find nothing.
    pub fn iphone() -> Self {
        Self {
            family: OsFamily::Ios,
            model: "iPhone".into(),
            ..Self::with_packages(&[])
        }
    }

    pub fn launches(&self) -> Vec<Launch> {
        self.launches.borrow().clone()
    }

    fn launch(&self, launch: Launch) -> Result<()> {
        if self.launch_fails {
            return Err(BridgeError::not_installed("target activity"));
        }
        self.launches.borrow_mut().push(launch);
        Ok(())
    }
}

impl PlatformHost for FakeHost {
    fn platform_name(&self) -> &str {
        "Fake"
    }

    fn os_family(&self) -> OsFamily {
        self.family
    }
}

impl NativePackages for FakeHost {
    fn is_launchable(&self, package: &str) -> Result<bool> {
        Ok(self.installed.iter().any(|p| p == package))
    }

    fn can_resolve_view(&self, uri: &str) -> Result<bool> {
        Ok(uri.starts_with("kakaolink://") && self.is_launchable("com.kakao.talk")?)
    }
}

impl NativeAppInfo for FakeHost {
    fn package_name(&self) -> Result<String> {
        Ok("com.example.app".into())
    }

    fn app_version(&self) -> Result<String> {
        self.app_version
            .clone()
            .ok_or_else(|| BridgeError::PlatformApiFailure("NameNotFoundException".into()))
    }

    fn signing_certificates(&self) -> Result<Vec<Vec<u8>>> {
        Ok(vec![b"cert-bytes".to_vec()])
    }
}

impl NativeDevice for FakeHost {
    fn os_api_level(&self) -> Result<u32> {
        Ok(30)
    }

    fn os_version(&self) -> Result<String> {
        Ok(match self.family {
            OsFamily::Android => "11".into(),
            OsFamily::Ios => "17.2".into(),
        })
    }

    fn locale(&self) -> Result<LocaleInfo> {
        Ok(LocaleInfo {
            language: "en".into(),
            country: "US".into(),
        })
    }

    fn screen_size(&self) -> Result<ScreenSize> {
        Ok(ScreenSize {
            width: 390.0,
            height: 844.0,
        })
    }

    fn device_model(&self) -> Result<String> {
        Ok(self.model.clone())
    }

    fn device_product(&self) -> Result<String> {
        Ok("redfin".into())
    }

    fn secure_device_id(&self) -> Result<String> {
        self.device_id
            .clone()
            .ok_or_else(|| BridgeError::PlatformApiFailure("ANDROID_ID is not set".into()))
    }
}

impl NativeLauncher for FakeHost {
    fn start_activity(&self, target: &LaunchTarget) -> Result<()> {
        self.launch(Launch::Activity(target.clone()))
    }

    fn start_activity_for_result(&self, target: &LaunchTarget, request_code: i32) -> Result<()> {
        self.launch(Launch::ForResult(target.clone(), request_code))
    }
}

/// Shared view of everything a recorded reply handle received.
#[derive(Clone, Default)]
pub struct Replies(Rc<RefCell<Vec<ChannelReply>>>);

impl Replies {
    pub fn take(&self) -> Vec<ChannelReply> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// A reply handle that records into the returned `Replies`.
pub fn recorder() -> (Replies, BoxedReply) {
    let replies = Replies::default();
    let store = replies.clone();
    let sink: BoxedReply = Box::new(move |reply: ChannelReply| store.0.borrow_mut().push(reply));
    (replies, sink)
}
