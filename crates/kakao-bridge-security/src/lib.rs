// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// kakao-bridge-security: the digests the bridge computes locally: the PKCE
// code challenge, the app signing-key hash sent as `origin`, and the
// platform id derived from the device identifier.

pub mod pkce;
pub mod platform_id;
pub mod signature;

pub use pkce::{CodeChallenge, code_challenge};
pub use platform_id::{PlatformId, platform_id};
pub use signature::key_hash;
