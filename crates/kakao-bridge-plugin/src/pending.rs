// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The single pending-exchange slot.

use chrono::{DateTime, Utc};
use kakao_bridge_core::{ExchangeId, Operation};

/// A login exchange waiting for its activity result.
#[derive(Debug)]
pub struct PendingExchange<S> {
    pub id: ExchangeId,
    pub operation: Operation,
    pub started_at: DateTime<Utc>,
    /// Handle of the caller that started the exchange.
    pub reply: S,
}

impl<S> PendingExchange<S> {
    pub fn new(operation: Operation, reply: S) -> Self {
        Self {
            id: ExchangeId::new(),
            operation,
            started_at: Utc::now(),
            reply,
        }
    }

    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds()
    }
}

/// Holds at most one outstanding exchange.
///
/// Recording while occupied replaces the occupant (last writer wins); the
/// displaced exchange is returned to the caller and never resolved.
#[derive(Debug)]
pub struct PendingSlot<S> {
    slot: Option<PendingExchange<S>>,
}

impl<S> Default for PendingSlot<S> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<S> PendingSlot<S> {
    pub fn record(&mut self, exchange: PendingExchange<S>) -> Option<PendingExchange<S>> {
        self.slot.replace(exchange)
    }

    pub fn take(&mut self) -> Option<PendingExchange<S>> {
        self.slot.take()
    }

    pub fn current(&self) -> Option<&PendingExchange<S>> {
        self.slot.as_ref()
    }
}
