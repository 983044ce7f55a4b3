// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Kakao bridge.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants;
use crate::error::{BridgeError, Result};

/// Unique identifier for one pending exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExchangeId(pub Uuid);

impl ExchangeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ExchangeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed set of operations exposed on the method channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    AppVer,
    PackageName,
    GetOrigin,
    GetKaHeader,
    IsKakaoTalkInstalled,
    IsKakaoNaviInstalled,
    IsKakaoTalkSharingAvailable,
    LaunchKakaoTalk,
    Navigate,
    ShareDestination,
    NaviWebGuideUrl,
    PlatformId,
    LaunchBrowserTab,
    AuthorizeWithTalk,
}

impl Operation {
    pub const ALL: [Operation; 14] = [
        Self::AppVer,
        Self::PackageName,
        Self::GetOrigin,
        Self::GetKaHeader,
        Self::IsKakaoTalkInstalled,
        Self::IsKakaoNaviInstalled,
        Self::IsKakaoTalkSharingAvailable,
        Self::LaunchKakaoTalk,
        Self::Navigate,
        Self::ShareDestination,
        Self::NaviWebGuideUrl,
        Self::PlatformId,
        Self::LaunchBrowserTab,
        Self::AuthorizeWithTalk,
    ];

    /// Method name as it appears on the channel.
    pub fn method_name(&self) -> &'static str {
        match self {
            Self::AppVer => "appVer",
            Self::PackageName => "packageName",
            Self::GetOrigin => "getOrigin",
            Self::GetKaHeader => "getKaHeader",
            Self::IsKakaoTalkInstalled => "isKakaoTalkInstalled",
            Self::IsKakaoNaviInstalled => "isKakaoNaviInstalled",
            Self::IsKakaoTalkSharingAvailable => "isKakaoTalkSharingAvailable",
            Self::LaunchKakaoTalk => "launchKakaoTalk",
            Self::Navigate => "navigate",
            Self::ShareDestination => "shareDestination",
            Self::NaviWebGuideUrl => "naviWebGuideUrl",
            Self::PlatformId => "platformId",
            Self::LaunchBrowserTab => "launchBrowserTab",
            Self::AuthorizeWithTalk => "authorizeWithTalk",
        }
    }

    /// Whether the operation resolves through an activity-result callback
    /// rather than replying immediately.
    pub fn expects_callback(&self) -> bool {
        matches!(self, Self::LaunchBrowserTab | Self::AuthorizeWithTalk)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.method_name())
    }
}

impl FromStr for Operation {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.method_name() == s)
            .ok_or_else(|| BridgeError::NotImplemented(s.to_owned()))
    }
}

/// String-keyed arguments of one method call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arguments(pub BTreeMap<String, String>);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, or `InvalidArgument` naming the key.
    pub fn required(&self, key: &str) -> Result<&str> {
        self.optional(key).ok_or_else(|| BridgeError::missing(key))
    }

    pub fn optional(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One invocation arriving on the method channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRequest {
    pub operation: Operation,
    pub arguments: Arguments,
}

impl ExchangeRequest {
    pub fn new(operation: Operation, arguments: Arguments) -> Self {
        Self {
            operation,
            arguments,
        }
    }

    /// Resolve a raw method name. Unknown names yield `NotImplemented`.
    pub fn parse(method: &str, arguments: Arguments) -> Result<Self> {
        Ok(Self::new(method.parse()?, arguments))
    }
}

/// Value replied to the caller on the method channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    Null,
    Bool(bool),
    Text(String),
    Bytes(Vec<u8>),
}

impl From<bool> for Reply {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for Reply {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Option<String>> for Reply {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Text)
    }
}

/// Result status reported by the platform with an activity result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityStatus {
    Ok,
    Canceled,
    /// Any code the platform does not define for this exchange family.
    Other(i32),
}

impl ActivityStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            constants::RESULT_OK => Self::Ok,
            constants::RESULT_CANCELED => Self::Canceled,
            other => Self::Other(other),
        }
    }
}

/// Extras attached to an activity result.
pub type ResultExtras = BTreeMap<String, String>;

/// Terminal outcome of one exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExchangeOutcome {
    /// The external component returned; carries the redirect URL if present.
    Success(Option<String>),
    /// The user or the external component declined.
    Canceled {
        code: String,
        message: Option<String>,
    },
    /// The callback does not belong to this exchange family.
    Unhandled,
}

impl ExchangeOutcome {
    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::Unhandled)
    }
}

/// Locale reported by the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleInfo {
    pub language: String,
    pub country: String,
}

/// Operating system family of a host; selects the KA header layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Android,
    Ios,
}

/// Screen bounds in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl std::fmt::Display for ScreenSize {
    /// `390.0x844.0`: points always carry a fractional part, as CGFloat
    /// prints them.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}x{:?}", self.width, self.height)
    }
}

/// Parameters for the KakaoTalk login activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalkLoginRequest {
    pub sdk_version: String,
    pub client_id: String,
    pub redirect_uri: String,
    /// Nested extras bundle; only keys the caller supplied are present.
    pub extras: BTreeMap<String, String>,
}

/// What the host is asked to start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchTarget {
    /// `ACTION_VIEW` on a deep link.
    View { uri: String, flags: i32 },
    /// `ACTION_SEND` on a KakaoTalk URI.
    Send { uri: String, flags: i32 },
    /// Custom-tabs authorization activity.
    BrowserTab {
        full_uri: String,
        redirect_url: Option<String>,
    },
    /// KakaoTalk login activity.
    TalkLogin(TalkLoginRequest),
}

impl LaunchTarget {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::View { .. } => "view",
            Self::Send { .. } => "send",
            Self::BrowserTab { .. } => "browser-tab",
            Self::TalkLogin(_) => "talk-login",
        }
    }
}
