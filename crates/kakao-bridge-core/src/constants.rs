// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wire-level keys and literal tokens shared by the dispatcher, the result
// interpreter and the native hosts.

// -- KA header tokens --
pub const OS: &str = "os";
pub const LANG: &str = "lang";
pub const ORIGIN: &str = "origin";
pub const DEVICE: &str = "device";
pub const ANDROID_PKG: &str = "android_pkg";
pub const APP_VER: &str = "app_ver";
pub const RES: &str = "res";

// -- Method-call argument keys --
pub const ARG_URL: &str = "url";
pub const ARG_URI: &str = "uri";
pub const ARG_REDIRECT_URI: &str = "redirect_uri";
pub const ARG_SDK_VERSION: &str = "sdk_version";
pub const ARG_CLIENT_ID: &str = "client_id";
pub const ARG_CHANNEL_PUBLIC_IDS: &str = "channel_public_ids";
pub const ARG_SERVICE_TERMS: &str = "service_terms";
pub const ARG_APPROVAL_TYPE: &str = "approval_type";
pub const ARG_CODE_VERIFIER: &str = "code_verifier";
pub const ARG_PROMPT: &str = "prompt";
pub const ARG_STATE: &str = "state";
pub const ARG_NONCE: &str = "nonce";
pub const ARG_APP_KEY: &str = "app_key";
pub const ARG_EXTRAS: &str = "extras";
pub const ARG_NAVI_PARAMS: &str = "navi_params";

// -- Talk login extras bundle --
pub const CHANNEL_PUBLIC_ID: &str = "channel_public_id";
pub const SERVICE_TERMS: &str = "service_terms";
pub const APPROVAL_TYPE: &str = "approval_type";
pub const PROMPT: &str = "prompt";
pub const STATE: &str = "state";
pub const NONCE: &str = "nonce";
pub const CODE_CHALLENGE: &str = "code_challenge";
pub const CODE_CHALLENGE_METHOD: &str = "code_challenge_method";
pub const CODE_CHALLENGE_METHOD_VALUE: &str = "S256";

// -- Navigation query parameters --
pub const PARAM: &str = "param";
pub const APIVER: &str = "apiver";
pub const APPKEY: &str = "appkey";
pub const EXTRAS: &str = "extras";
pub const NAVIGATE: &str = "navigate";
pub const SHARE_POI: &str = "sharePoi";

// -- Activity intent extras --
pub const KEY_RETURN_URL: &str = "key_return_url";
pub const KEY_ERROR_CODE: &str = "key_error_code";
pub const KEY_ERROR_MESSAGE: &str = "key_error_message";
pub const KEY_FULL_URI: &str = "key_full_uri";
pub const KEY_REDIRECT_URL: &str = "key_redirect_url";
pub const KEY_SDK_VERSION: &str = "key_sdk_version";
pub const KEY_CLIENT_ID: &str = "key_client_Id";
pub const KEY_REDIRECT_URI: &str = "key_redirect_uri";
pub const KEY_EXTRAS: &str = "key_extras";

/// Error code reported when a canceled result carries none.
pub const DEFAULT_ERROR_CODE: &str = "ERROR";

/// `Activity.RESULT_OK`.
pub const RESULT_OK: i32 = -1;
/// `Activity.RESULT_CANCELED`.
pub const RESULT_CANCELED: i32 = 0;

/// `Intent.FLAG_ACTIVITY_NEW_TASK | Intent.FLAG_ACTIVITY_CLEAR_TOP`.
pub const FLAGS_NEW_TASK_CLEAR_TOP: i32 = 0x1000_0000 | 0x0400_0000;
