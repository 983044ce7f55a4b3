// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// kakao-bridge-plugin: the method-channel side of the bridge.
//
// `Bridge::dispatch` turns one method call into either an immediate reply
// or a started login activity; `Bridge::on_activity_result` resolves that
// activity's single callback. At most one login exchange is outstanding.

pub mod bridge;
pub mod channel;
pub mod dispatcher;
pub mod interpreter;
pub mod ka_header;
pub mod navi;
pub mod pending;

#[cfg(test)]
mod test_support;

pub use bridge::Bridge;
pub use channel::{BoxedReply, ChannelReply, MethodCall, ReplySink};
pub use dispatcher::Dispatched;
pub use interpreter::interpret;
pub use ka_header::{AndroidKaHeader, IosKaHeader, KaHeader};
pub use navi::NaviRequest;
