// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PKCE (RFC 7636) code challenge derivation.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use kakao_bridge_core::constants::CODE_CHALLENGE_METHOD_VALUE;
use sha2::{Digest, Sha256};

/// A derived challenge together with its method identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeChallenge {
    pub challenge: String,
    pub method: &'static str,
}

impl CodeChallenge {
    /// Derive the `S256` challenge for `verifier`.
    pub fn from_verifier(verifier: &str) -> Self {
        Self {
            challenge: code_challenge(verifier.as_bytes()),
            method: CODE_CHALLENGE_METHOD_VALUE,
        }
    }
}

/// `BASE64URL-NOPAD(SHA-256(verifier))`.
pub fn code_challenge(verifier: &[u8]) -> String {
    let digest = Sha256::digest(verifier);
    URL_SAFE_NO_PAD.encode(digest)
}
