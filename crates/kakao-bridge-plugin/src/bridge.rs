// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The bridge: platform host, configuration and the pending-exchange slot.

use kakao_bridge_core::{BridgeConfig, ExchangeId};
use kakao_bridge_native::PlatformHost;

use crate::channel::ReplySink;
use crate::pending::PendingSlot;

/// Owns everything a method call or an activity result needs.
///
/// All entry points take `&mut self`: the host serialises UI callbacks, so
/// calls and results never interleave.
pub struct Bridge<H, S> {
    pub(crate) host: H,
    pub(crate) config: BridgeConfig,
    pub(crate) pending: PendingSlot<S>,
}

impl<H: PlatformHost, S: ReplySink> Bridge<H, S> {
    pub fn new(host: H, config: BridgeConfig) -> Self {
        tracing::info!(
            platform = host.platform_name(),
            channel = %config.channel_name,
            "bridge attached"
        );
        Self {
            host,
            config,
            pending: PendingSlot::default(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Id of the outstanding login exchange, if any.
    pub fn pending_exchange(&self) -> Option<ExchangeId> {
        self.pending.current().map(|p| p.id)
    }

    /// The owning activity is gone: drop any outstanding exchange
    /// unresolved. Its result can no longer be delivered.
    pub fn detach(&mut self) {
        if let Some(discarded) = self.pending.take() {
            tracing::warn!(
                exchange = %discarded.id,
                operation = %discarded.operation,
                "activity detached: discarding pending exchange"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeHost, recorder};
    use kakao_bridge_core::{Arguments, ExchangeRequest, Operation};

    #[test]
    fn detach_discards_pending_without_reply() {
        let mut bridge = Bridge::new(FakeHost::default(), BridgeConfig::default());
        let (replies, sink) = recorder();
        let args: Arguments = [("url", "https://kauth.kakao.com/oauth/authorize")]
            .into_iter()
            .collect();
        bridge
            .dispatch(&ExchangeRequest::new(Operation::LaunchBrowserTab, args), sink)
            .unwrap();
        assert!(bridge.pending_exchange().is_some());

        bridge.detach();
        assert!(bridge.pending_exchange().is_none());
        assert!(replies.take().is_empty());
    }
}
