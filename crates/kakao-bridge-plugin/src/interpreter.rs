// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Result interpreter: turns the login activity's single callback into a
// terminal outcome and hands it to the pending caller.

use kakao_bridge_core::constants::{
    DEFAULT_ERROR_CODE, KEY_ERROR_CODE, KEY_ERROR_MESSAGE, KEY_RETURN_URL,
};
use kakao_bridge_core::{ActivityStatus, ExchangeOutcome, Reply, ResultExtras};
use kakao_bridge_native::PlatformHost;

use crate::bridge::Bridge;
use crate::channel::ReplySink;

/// Map one activity result to an outcome. Pure; touches no state.
///
/// Results tagged with any code other than `reserved_code`, and statuses
/// other than OK / CANCELED, are `Unhandled`.
pub fn interpret(
    reserved_code: i32,
    request_code: i32,
    status: ActivityStatus,
    extras: Option<&ResultExtras>,
) -> ExchangeOutcome {
    if request_code != reserved_code {
        return ExchangeOutcome::Unhandled;
    }
    let field = |key: &str| extras.and_then(|e| e.get(key)).cloned();
    match status {
        ActivityStatus::Ok => ExchangeOutcome::Success(field(KEY_RETURN_URL)),
        ActivityStatus::Canceled => ExchangeOutcome::Canceled {
            code: field(KEY_ERROR_CODE).unwrap_or_else(|| DEFAULT_ERROR_CODE.to_owned()),
            message: field(KEY_ERROR_MESSAGE),
        },
        ActivityStatus::Other(_) => ExchangeOutcome::Unhandled,
    }
}

impl<H: PlatformHost, S: ReplySink> Bridge<H, S> {
    /// Feed an activity result from the host Activity.
    ///
    /// Returns whether the result belonged to the login exchange family, so
    /// the host can route unhandled results elsewhere. A handled result
    /// with no pending exchange is swallowed.
    pub fn on_activity_result(
        &mut self,
        request_code: i32,
        result_code: i32,
        extras: Option<&ResultExtras>,
    ) -> bool {
        let outcome = interpret(
            self.config.login_request_code,
            request_code,
            ActivityStatus::from_code(result_code),
            extras,
        );
        if !outcome.is_handled() {
            return false;
        }

        let Some(pending) = self.pending.take() else {
            tracing::debug!(request_code, "activity result with no pending exchange");
            return true;
        };

        tracing::info!(
            exchange = %pending.id,
            operation = %pending.operation,
            elapsed_ms = pending.elapsed_ms(),
            success = matches!(outcome, ExchangeOutcome::Success(_)),
            "login exchange resolved"
        );
        match outcome {
            ExchangeOutcome::Success(url) => pending.reply.success(Reply::from(url)),
            ExchangeOutcome::Canceled { code, message } => {
                pending.reply.error(&code, message.as_deref())
            }
            ExchangeOutcome::Unhandled => {}
        }
        true
    }
}
