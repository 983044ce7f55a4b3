// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// App signing-key hash, reported to the Kakao API as `origin`.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use kakao_bridge_core::error::{BridgeError, Result};
use ring::digest::{SHA1_FOR_LEGACY_USE_ONLY, digest};

/// Base64 (standard alphabet, padded, no line wraps) of the SHA-1 digest of
/// the first (oldest) signing certificate.
pub fn key_hash(certificates: &[Vec<u8>]) -> Result<String> {
    let first = certificates.first().ok_or_else(|| {
        BridgeError::PlatformApiFailure("package has no signing certificates".into())
    })?;
    let sha1 = digest(&SHA1_FOR_LEGACY_USE_ONLY, first);
    Ok(STANDARD.encode(sha1.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_first_certificate_only() {
        let certs = vec![b"cert-bytes".to_vec(), b"rotated".to_vec()];
        // SHA-1("cert-bytes") via `openssl dgst -sha1 -binary | base64`.
        assert_eq!(key_hash(&certs).unwrap(), "BTrpKFYb0fsczfGWmBrlB30Pm50=");
    }

    #[test]
    fn no_certificates_is_platform_failure() {
        assert!(matches!(
            key_hash(&[]),
            Err(BridgeError::PlatformApiFailure(_))
        ));
    }
}
