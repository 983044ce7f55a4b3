// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Settings for the method channel and the external components it talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Name of the method channel the plugin registers.
    pub channel_name: String,
    /// Request code reserved for the login exchange family.
    pub login_request_code: i32,
    /// Packages that count as an installed KakaoTalk.
    pub talk_packages: Vec<String>,
    /// Packages that count as an installed KakaoNavi.
    pub navi_packages: Vec<String>,
    /// Private scheme of the KakaoNavi app.
    pub navi_scheme: String,
    /// Host of the HTTPS navigation guide.
    pub navi_web_host: String,
    /// Literal sent as `apiver` on navigation requests.
    pub navi_api_version: String,
    /// URI probed to decide whether KakaoTalk sharing is available.
    pub sharing_probe_uri: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_name: "kakao_flutter_sdk".into(),
            login_request_code: 1,
            talk_packages: vec!["com.kakao.talk".into(), "com.kakao.onetalk".into()],
            navi_packages: vec!["com.locnall.KimGiSa".into(), "com.lguplus.navi".into()],
            navi_scheme: "kakaonavi-sdk".into(),
            navi_web_host: "kakaonavi-wguide.kakao.com".into(),
            navi_api_version: "1.0".into(),
            sharing_probe_uri: "kakaolink://send".into(),
        }
    }
}

impl BridgeConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the dispatcher cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.channel_name.trim().is_empty() {
            return Err(BridgeError::Config("channel_name must not be empty".into()));
        }
        if self.talk_packages.is_empty() {
            return Err(BridgeError::Config("talk_packages must not be empty".into()));
        }
        if self.navi_packages.is_empty() {
            return Err(BridgeError::Config("navi_packages must not be empty".into()));
        }
        if self.navi_scheme.is_empty() || self.navi_web_host.is_empty() {
            return Err(BridgeError::Config(
                "navigation scheme and host must be set".into(),
            ));
        }
        Ok(())
    }
}
