// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform id: SHA-256 over the device's secure identifier.

use kakao_bridge_core::error::Result;
use sha2::{Digest, Sha256};

/// Digest bytes identifying the device to the SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformId(pub Vec<u8>);

impl PlatformId {
    /// SHA-256 of `"SDK-"` followed by the identifier with every `0` and
    /// whitespace character removed.
    pub fn from_device_id(device_id: &str) -> Self {
        let stripped: String = device_id
            .chars()
            .filter(|c| *c != '0' && !c.is_whitespace())
            .collect();
        let mut hasher = Sha256::new();
        hasher.update(b"SDK-");
        hasher.update(stripped.as_bytes());
        Self(hasher.finalize().to_vec())
    }

    /// Deterministic stand-in used when the identifier cannot be read.
    pub fn placeholder(product: &str) -> Self {
        Self(format!("xxxx{product}a23456789012345bcdefg").into_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

/// Derive the platform id, falling back to the placeholder when the device
/// identifier lookup fails.
pub fn platform_id(device_id: Result<String>, product: &str) -> PlatformId {
    match device_id {
        Ok(id) => PlatformId::from_device_id(&id),
        Err(e) => {
            tracing::warn!(error = %e, "device id unavailable: using placeholder platform id");
            PlatformId::placeholder(product)
        }
    }
}
