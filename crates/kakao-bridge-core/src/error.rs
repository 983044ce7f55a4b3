// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the Kakao bridge.

use thiserror::Error;

/// Top-level error type for all bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    // -- Request validation --
    #[error("{key} is required")]
    InvalidArgument { key: String },

    #[error("method not implemented: {0}")]
    NotImplemented(String),

    // -- External components --
    /// The named companion app (or activity) is absent from the device.
    #[error("{target} is not installed{}", hint_suffix(.hint))]
    TargetNotInstalled { target: String, hint: Option<String> },

    #[error("platform API failed: {0}")]
    PlatformApiFailure(String),

    #[error("exchange canceled ({code}): {}", .message.as_deref().unwrap_or("no message"))]
    Canceled {
        code: String,
        message: Option<String>,
    },

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

impl BridgeError {
    /// Shorthand for a missing required argument.
    pub fn missing(key: &str) -> Self {
        Self::InvalidArgument {
            key: key.to_owned(),
        }
    }

    /// Shorthand for an absent companion app, with no install hint.
    pub fn not_installed(target: &str) -> Self {
        Self::TargetNotInstalled {
            target: target.to_owned(),
            hint: None,
        }
    }

    /// Error code reported across the method channel.
    ///
    /// `Canceled` carries the code chosen by the external component; every
    /// other variant has a fixed code.
    pub fn channel_code(&self) -> &str {
        match self {
            Self::InvalidArgument { .. } => "IllegalArgumentException",
            Self::NotImplemented(_) => "NotImplemented",
            Self::TargetNotInstalled { .. } => "Error",
            Self::PlatformApiFailure(_) => "PlatformApiFailure",
            Self::Canceled { code, .. } => code,
            Self::Config(_) => "ConfigError",
            Self::Io(_) => "IOException",
            Self::Serialization(_) => "SerializationError",
            Self::PlatformUnavailable => "PlatformUnavailable",
        }
    }

    /// Human-readable message reported across the method channel.
    pub fn channel_message(&self) -> Option<String> {
        match self {
            Self::Canceled { message, .. } => message.clone(),
            other => Some(other.to_string()),
        }
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_deref().map(|h| format!(". {h}")).unwrap_or_default()
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;
