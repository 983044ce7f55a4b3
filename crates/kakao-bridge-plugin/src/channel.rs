// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Method-channel boundary: incoming calls and the one-shot reply handle.

use kakao_bridge_core::error::BridgeError;
use kakao_bridge_core::{Arguments, ExchangeRequest, Reply};
use kakao_bridge_native::PlatformHost;
use serde::{Deserialize, Serialize};

use crate::bridge::Bridge;

/// One call as it arrives on the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Arguments,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Arguments) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// What the caller eventually receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChannelReply {
    Success {
        value: Reply,
    },
    Error {
        code: String,
        message: Option<String>,
    },
    NotImplemented,
}

/// Reply handle for one call. Consumed on use, so a call is answered at
/// most once.
pub trait ReplySink {
    fn send(self, reply: ChannelReply);

    fn success(self, value: Reply)
    where
        Self: Sized,
    {
        self.send(ChannelReply::Success { value });
    }

    fn error(self, code: &str, message: Option<&str>)
    where
        Self: Sized,
    {
        self.send(ChannelReply::Error {
            code: code.to_owned(),
            message: message.map(str::to_owned),
        });
    }

    fn fail(self, err: &BridgeError)
    where
        Self: Sized,
    {
        let message = err.channel_message();
        self.error(err.channel_code(), message.as_deref());
    }

    fn not_implemented(self)
    where
        Self: Sized,
    {
        self.send(ChannelReply::NotImplemented);
    }
}

impl<F: FnOnce(ChannelReply)> ReplySink for F {
    fn send(self, reply: ChannelReply) {
        self(reply)
    }
}

/// Type-erased reply handle, for hosts that store replies of mixed origin.
pub type BoxedReply = Box<dyn FnOnce(ChannelReply)>;

impl<H: PlatformHost, S: ReplySink> Bridge<H, S> {
    /// Entry point for the channel: resolve the method name, then dispatch.
    ///
    /// Unknown methods reply `NotImplemented`. Dispatch failures have
    /// already been reported through `reply`; they are only logged here.
    pub fn on_method_call(&mut self, call: MethodCall, reply: S) {
        let request = match ExchangeRequest::parse(&call.method, call.arguments) {
            Ok(request) => request,
            Err(_) => {
                tracing::debug!(method = %call.method, "method not implemented");
                reply.not_implemented();
                return;
            }
        };

        if let Err(e) = self.dispatch(&request, reply) {
            tracing::debug!(method = %call.method, error = %e, "method call failed");
        }
    }
}
