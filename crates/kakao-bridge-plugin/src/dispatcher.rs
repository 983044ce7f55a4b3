// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Request dispatcher.
//
// Synchronous operations are answered on the spot and never touch the
// pending slot. The two login operations start an activity for result and
// park the caller's reply handle until `on_activity_result` resolves it;
// the reply is parked only once the launch succeeded.

use std::collections::BTreeMap;

use kakao_bridge_core::constants::{self, *};
use kakao_bridge_core::error::{BridgeError, Result};
use kakao_bridge_core::{
    ExchangeId, ExchangeRequest, LaunchTarget, Operation, Reply, TalkLoginRequest,
};
use kakao_bridge_native::PlatformHost;
use kakao_bridge_security::{CodeChallenge, key_hash, platform_id};

use crate::bridge::Bridge;
use crate::channel::ReplySink;
use crate::ka_header::KaHeader;
use crate::navi::NaviRequest;
use crate::pending::PendingExchange;

const KAKAO_TALK: &str = "KakaoTalk";
const KAKAO_NAVI: &str = "KakaoNavi";
const TALK_LOGIN_INSTALL_HINT: &str = "If you want KakaoTalk Login, please install KakaoTalk";

/// How a dispatched call was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// Replied synchronously with this value.
    Immediate(Reply),
    /// A login activity was started; the reply waits for its result.
    Pending(ExchangeId),
}

impl<H: PlatformHost, S: ReplySink> Bridge<H, S> {
    /// Dispatch one request. `reply` is answered exactly once: now for
    /// synchronous operations and for every failure, later for a started
    /// login exchange. The returned error mirrors what was sent to `reply`.
    pub fn dispatch(&mut self, request: &ExchangeRequest, reply: S) -> Result<Dispatched> {
        tracing::debug!(operation = %request.operation, "dispatching");

        let outcome = match self.login_target(request) {
            Ok(Some(target)) => self
                .host
                .start_activity_for_result(&target, self.config.login_request_code)
                .map(|()| None),
            Ok(None) => self.answer(request).map(Some),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(Some(value)) => {
                reply.success(value.clone());
                Ok(Dispatched::Immediate(value))
            }
            Ok(None) => Ok(Dispatched::Pending(self.park(request.operation, reply))),
            Err(e) => {
                reply.fail(&e);
                Err(e)
            }
        }
    }

    fn answer(&self, request: &ExchangeRequest) -> Result<Reply> {
        let args = &request.arguments;
        match request.operation {
            Operation::AppVer => Ok(self.host.app_version()?.into()),
            Operation::PackageName => Ok(self.host.package_name()?.into()),
            Operation::GetOrigin => Ok(key_hash(&self.host.signing_certificates()?)?.into()),
            Operation::GetKaHeader => Ok(KaHeader::collect(&self.host)?.to_string().into()),
            Operation::IsKakaoTalkInstalled => Ok(self.talk_installed()?.into()),
            Operation::IsKakaoNaviInstalled => Ok(self.navi_installed()?.into()),
            Operation::IsKakaoTalkSharingAvailable => Ok(self
                .host
                .can_resolve_view(&self.config.sharing_probe_uri)?
                .into()),
            Operation::LaunchKakaoTalk => {
                let uri = args.required(ARG_URI)?;
                if !self.talk_installed()? {
                    return Ok(Reply::Bool(false));
                }
                self.host.start_activity(&LaunchTarget::Send {
                    uri: uri.to_owned(),
                    flags: FLAGS_NEW_TASK_CLEAR_TOP,
                })?;
                Ok(Reply::Bool(true))
            }
            Operation::Navigate => self.open_navi(request, NAVIGATE),
            Operation::ShareDestination => self.open_navi(request, SHARE_POI),
            Operation::NaviWebGuideUrl => {
                let navi = NaviRequest::from_args(args)?;
                Ok(navi.web_guide_url(&self.config)?.to_string().into())
            }
            Operation::PlatformId => {
                let product = self.host.device_product().unwrap_or_default();
                let id = platform_id(self.host.secure_device_id(), &product);
                tracing::debug!(platform_id = %id.to_hex(), "platform id derived");
                Ok(Reply::Bytes(id.0))
            }
            Operation::LaunchBrowserTab | Operation::AuthorizeWithTalk => {
                Err(BridgeError::NotImplemented(format!(
                    "{} has no immediate answer",
                    request.operation
                )))
            }
        }
    }

    /// Deep-link into KakaoNavi. Fails with `TargetNotInstalled` before
    /// anything is launched when no navigation package is present.
    fn open_navi(&self, request: &ExchangeRequest, action: &str) -> Result<Reply> {
        let navi = NaviRequest::from_args(&request.arguments)?;
        if !self.navi_installed()? {
            return Err(BridgeError::not_installed(KAKAO_NAVI));
        }
        let uri = navi.app_uri(&self.config, action)?;
        tracing::info!(operation = %request.operation, %uri, "opening KakaoNavi");
        self.host
            .start_activity(&LaunchTarget::View {
                uri: uri.into(),
                flags: FLAGS_NEW_TASK_CLEAR_TOP,
            })
            .map_err(|e| match e {
                BridgeError::TargetNotInstalled { .. } => BridgeError::not_installed(KAKAO_NAVI),
                other => other,
            })?;
        Ok(Reply::Bool(true))
    }

    /// Target of the login activity for the two login operations, `None`
    /// for everything answered synchronously.
    fn login_target(&self, request: &ExchangeRequest) -> Result<Option<LaunchTarget>> {
        match request.operation {
            Operation::LaunchBrowserTab => browser_tab_target(request).map(Some),
            Operation::AuthorizeWithTalk => {
                let target = talk_login_target(request)?;
                if !self.talk_installed()? {
                    return Err(BridgeError::TargetNotInstalled {
                        target: KAKAO_TALK.to_owned(),
                        hint: Some(TALK_LOGIN_INSTALL_HINT.to_owned()),
                    });
                }
                Ok(Some(target))
            }
            _ => Ok(None),
        }
    }

    /// Record the caller as the pending exchange, displacing any earlier
    /// one.
    fn park(&mut self, operation: Operation, reply: S) -> ExchangeId {
        let exchange = PendingExchange::new(operation, reply);
        let id = exchange.id;
        if let Some(displaced) = self.pending.record(exchange) {
            tracing::warn!(
                displaced = %displaced.id,
                displaced_operation = %displaced.operation,
                waited_ms = displaced.elapsed_ms(),
                replacement = %id,
                "login exchange overwritten before its result arrived"
            );
        }
        tracing::info!(exchange = %id, %operation, "login exchange pending");
        id
    }

    fn talk_installed(&self) -> Result<bool> {
        self.any_launchable(&self.config.talk_packages)
    }

    fn navi_installed(&self) -> Result<bool> {
        self.any_launchable(&self.config.navi_packages)
    }

    fn any_launchable(&self, packages: &[String]) -> Result<bool> {
        for package in packages {
            if self.host.is_launchable(package)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn browser_tab_target(request: &ExchangeRequest) -> Result<LaunchTarget> {
    let args = &request.arguments;
    Ok(LaunchTarget::BrowserTab {
        full_uri: args.required(ARG_URL)?.to_owned(),
        redirect_url: args.optional(ARG_REDIRECT_URI).map(str::to_owned),
    })
}

/// Build the talk-login descriptor. Optional arguments land in the nested
/// extras bundle only when supplied; a code verifier is replaced by its
/// `S256` challenge.
fn talk_login_target(request: &ExchangeRequest) -> Result<LaunchTarget> {
    let args = &request.arguments;
    let sdk_version = args.required(ARG_SDK_VERSION)?;
    let client_id = args.required(ARG_CLIENT_ID)?;
    let redirect_uri = args.required(ARG_REDIRECT_URI)?;

    let mut extras = BTreeMap::new();
    let passthrough = [
        (ARG_CHANNEL_PUBLIC_IDS, CHANNEL_PUBLIC_ID),
        (ARG_SERVICE_TERMS, constants::SERVICE_TERMS),
        (ARG_APPROVAL_TYPE, constants::APPROVAL_TYPE),
        (ARG_PROMPT, constants::PROMPT),
        (ARG_STATE, constants::STATE),
        (ARG_NONCE, constants::NONCE),
    ];
    for (arg, extra) in passthrough {
        if let Some(value) = args.optional(arg) {
            extras.insert(extra.to_owned(), value.to_owned());
        }
    }
    if let Some(verifier) = args.optional(ARG_CODE_VERIFIER) {
        let challenge = CodeChallenge::from_verifier(verifier);
        extras.insert(CODE_CHALLENGE.to_owned(), challenge.challenge);
        extras.insert(CODE_CHALLENGE_METHOD.to_owned(), challenge.method.to_owned());
    }

    Ok(LaunchTarget::TalkLogin(TalkLoginRequest {
        sdk_version: sdk_version.to_owned(),
        client_id: client_id.to_owned(),
        redirect_uri: redirect_uri.to_owned(),
        extras,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelReply;
    use crate::test_support::{FakeHost, Launch, recorder};
    use kakao_bridge_core::{Arguments, BridgeConfig};

    fn bridge(host: FakeHost) -> Bridge<FakeHost, crate::BoxedReply> {
        Bridge::new(host, BridgeConfig::default())
    }

    fn request(op: Operation, pairs: &[(&str, &str)]) -> ExchangeRequest {
        ExchangeRequest::new(op, pairs.iter().copied().collect::<Arguments>())
    }

    fn talk_args() -> Vec<(&'static str, &'static str)> {
        vec![
            ("sdk_version", "1.9.0"),
            ("client_id", "client"),
            ("redirect_uri", "kakaoclient://oauth"),
        ]
    }

    #[test]
    fn synchronous_operations_never_park() {
        let mut bridge = bridge(FakeHost::default());
        let navi_args = [("app_key", "k"), ("navi_params", "{}")];
        let calls = [
            request(Operation::AppVer, &[]),
            request(Operation::PackageName, &[]),
            request(Operation::GetOrigin, &[]),
            request(Operation::GetKaHeader, &[]),
            request(Operation::IsKakaoTalkInstalled, &[]),
            request(Operation::IsKakaoNaviInstalled, &[]),
            request(Operation::IsKakaoTalkSharingAvailable, &[]),
            request(Operation::LaunchKakaoTalk, &[("uri", "kakaolink://send")]),
            request(Operation::Navigate, &navi_args),
            request(Operation::ShareDestination, &navi_args),
            request(Operation::NaviWebGuideUrl, &navi_args),
            request(Operation::PlatformId, &[]),
        ];
        for call in &calls {
            let (replies, sink) = recorder();
            let dispatched = bridge.dispatch(call, sink).unwrap();
            assert!(matches!(dispatched, Dispatched::Immediate(_)), "{}", call.operation);
            assert_eq!(replies.take().len(), 1);
            assert!(bridge.pending_exchange().is_none(), "{}", call.operation);
        }
    }

    #[test]
    fn app_version_and_header() {
        let mut bridge = bridge(FakeHost::default());
        let (replies, sink) = recorder();
        bridge.dispatch(&request(Operation::GetKaHeader, &[]), sink).unwrap();
        assert_eq!(
            replies.take(),
            vec![ChannelReply::Success {
                value: Reply::Text(
                    "os/android-30 lang/en-US origin/BTrpKFYb0fsczfGWmBrlB30Pm50= \
                     device/PIXEL-5 android_pkg/com.example.app app_ver/1.2.3"
                        .into()
                )
            }]
        );
    }

    #[test]
    fn platform_api_failure_is_reported() {
        let host = FakeHost {
            app_version: None,
            ..FakeHost::default()
        };
        let mut bridge = bridge(host);
        let (replies, sink) = recorder();
        let err = bridge.dispatch(&request(Operation::AppVer, &[]), sink).unwrap_err();
        assert!(matches!(err, BridgeError::PlatformApiFailure(_)));
        assert!(matches!(
            &replies.take()[..],
            [ChannelReply::Error { code, .. }] if code == "PlatformApiFailure"
        ));
    }

    #[test]
    fn talk_installed_checks_every_package() {
        let host = FakeHost::with_packages(&["com.kakao.onetalk"]);
        let mut bridge = bridge(host);
        let (_, sink) = recorder();
        let dispatched = bridge
            .dispatch(&request(Operation::IsKakaoTalkInstalled, &[]), sink)
            .unwrap();
        assert_eq!(dispatched, Dispatched::Immediate(Reply::Bool(true)));
        let (_, sink) = recorder();
        let dispatched = bridge
            .dispatch(&request(Operation::IsKakaoNaviInstalled, &[]), sink)
            .unwrap();
        assert_eq!(dispatched, Dispatched::Immediate(Reply::Bool(false)));
    }

    #[test]
    fn launch_kakao_talk_without_talk_is_false() {
        let mut bridge = bridge(FakeHost::with_packages(&[]));
        let (_, sink) = recorder();
        let dispatched = bridge
            .dispatch(&request(Operation::LaunchKakaoTalk, &[("uri", "kakaolink://send")]), sink)
            .unwrap();
        assert_eq!(dispatched, Dispatched::Immediate(Reply::Bool(false)));
        assert!(bridge.host().launches().is_empty());
    }

    #[test]
    fn launch_kakao_talk_sends_uri() {
        let mut bridge = bridge(FakeHost::default());
        let (_, sink) = recorder();
        bridge
            .dispatch(
                &request(Operation::LaunchKakaoTalk, &[("uri", "kakaolink://send?a=1")]),
                sink,
            )
            .unwrap();
        assert_eq!(
            bridge.host().launches(),
            vec![Launch::Activity(LaunchTarget::Send {
                uri: "kakaolink://send?a=1".into(),
                flags: FLAGS_NEW_TASK_CLEAR_TOP,
            })]
        );
    }

    #[test]
    fn navigate_without_navi_fails_before_launch() {
        let mut bridge = bridge(FakeHost::with_packages(&["com.kakao.talk"]));
        let (replies, sink) = recorder();
        let err = bridge
            .dispatch(
                &request(Operation::Navigate, &[("app_key", "k"), ("navi_params", "{}")]),
                sink,
            )
            .unwrap_err();
        assert!(matches!(err, BridgeError::TargetNotInstalled { .. }));
        assert!(bridge.host().launches().is_empty());
        assert!(bridge.pending_exchange().is_none());
        assert!(matches!(
            &replies.take()[..],
            [ChannelReply::Error { code, .. }] if code == "Error"
        ));
    }

    #[test]
    fn navigate_opens_private_scheme() {
        let mut bridge = bridge(FakeHost::default());
        let (_, sink) = recorder();
        bridge
            .dispatch(
                &request(Operation::ShareDestination, &[("app_key", "k"), ("navi_params", "p")]),
                sink,
            )
            .unwrap();
        assert_eq!(
            bridge.host().launches(),
            vec![Launch::Activity(LaunchTarget::View {
                uri: "kakaonavi-sdk://sharePoi?param=p&apiver=1.0&appkey=k".into(),
                flags: FLAGS_NEW_TASK_CLEAR_TOP,
            })]
        );
    }

    #[test]
    fn platform_id_falls_back_when_id_unreadable() {
        let host = FakeHost {
            device_id: None,
            ..FakeHost::default()
        };
        let mut bridge = bridge(host);
        let (_, sink) = recorder();
        let dispatched = bridge.dispatch(&request(Operation::PlatformId, &[]), sink).unwrap();
        assert_eq!(
            dispatched,
            Dispatched::Immediate(Reply::Bytes(b"xxxxredfina23456789012345bcdefg".to_vec()))
        );
    }

    #[test]
    fn missing_login_argument_takes_no_action() {
        for missing in ["sdk_version", "client_id", "redirect_uri"] {
            let mut bridge = bridge(FakeHost::default());
            let pairs: Vec<_> = talk_args().into_iter().filter(|(k, _)| *k != missing).collect();
            let (replies, sink) = recorder();
            let err = bridge
                .dispatch(&request(Operation::AuthorizeWithTalk, &pairs), sink)
                .unwrap_err();
            assert!(matches!(err, BridgeError::InvalidArgument { ref key } if key == missing));
            assert!(bridge.host().launches().is_empty());
            assert!(bridge.pending_exchange().is_none());
            assert_eq!(replies.take().len(), 1);
        }

        let mut bridge = bridge(FakeHost::default());
        let (_, sink) = recorder();
        let err = bridge
            .dispatch(&request(Operation::LaunchBrowserTab, &[]), sink)
            .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidArgument { key } if key == "url"));
        assert!(bridge.host().launches().is_empty());
    }

    #[test]
    fn talk_login_without_talk_is_not_installed() {
        let mut bridge = bridge(FakeHost::with_packages(&[]));
        let (replies, sink) = recorder();
        let err = bridge
            .dispatch(&request(Operation::AuthorizeWithTalk, &talk_args()), sink)
            .unwrap_err();
        assert!(matches!(err, BridgeError::TargetNotInstalled { .. }));
        assert!(bridge.pending_exchange().is_none());
        assert_eq!(
            replies.take(),
            vec![ChannelReply::Error {
                code: "Error".into(),
                message: Some(
                    "KakaoTalk is not installed. If you want KakaoTalk Login, \
                     please install KakaoTalk"
                        .into()
                ),
            }]
        );
    }

    #[test]
    fn navi_launch_failure_names_navi_once() {
        let host = FakeHost {
            launch_fails: true,
            ..FakeHost::default()
        };
        let mut bridge = bridge(host);
        let (replies, sink) = recorder();
        let navi_args = [("app_key", "k"), ("navi_params", "{}")];
        let _ = bridge.dispatch(&request(Operation::Navigate, &navi_args), sink);
        assert_eq!(
            replies.take(),
            vec![ChannelReply::Error {
                code: "Error".into(),
                message: Some("KakaoNavi is not installed".into()),
            }]
        );
    }

    #[test]
    fn talk_login_attaches_pkce_challenge() {
        let mut bridge = bridge(FakeHost::default());
        let mut pairs = talk_args();
        pairs.push(("code_verifier", "test-verifier"));
        pairs.push(("state", "xyz"));
        let (replies, sink) = recorder();
        let dispatched = bridge
            .dispatch(&request(Operation::AuthorizeWithTalk, &pairs), sink)
            .unwrap();

        assert!(matches!(
            dispatched,
            Dispatched::Pending(id) if Some(id) == bridge.pending_exchange()
        ));
        assert!(replies.take().is_empty());

        let launches = bridge.host().launches();
        let [Launch::ForResult(LaunchTarget::TalkLogin(login), 1)] = &launches[..] else {
            panic!("unexpected launches: {launches:?}");
        };
        assert_eq!(login.client_id, "client");
        assert_eq!(
            login.extras.get("code_challenge").map(String::as_str),
            Some("JBbiqONGWPaAmwXk_8bT6UnlPfrn65D32eZlJS-zGG0")
        );
        assert_eq!(login.extras.get("code_challenge_method").map(String::as_str), Some("S256"));
        assert_eq!(login.extras.get("state").map(String::as_str), Some("xyz"));
        assert!(!login.extras.contains_key("nonce"));
        assert!(!login.extras.contains_key("code_verifier"));
    }

    #[test]
    fn browser_tab_parks_reply() {
        let mut bridge = bridge(FakeHost::default());
        let (_, sink) = recorder();
        bridge
            .dispatch(
                &request(
                    Operation::LaunchBrowserTab,
                    &[
                        ("url", "https://kauth.kakao.com/oauth/authorize"),
                        ("redirect_uri", "kakaoclient://oauth"),
                    ],
                ),
                sink,
            )
            .unwrap();
        assert!(bridge.pending_exchange().is_some());
        assert_eq!(
            bridge.host().launches(),
            vec![Launch::ForResult(
                LaunchTarget::BrowserTab {
                    full_uri: "https://kauth.kakao.com/oauth/authorize".into(),
                    redirect_url: Some("kakaoclient://oauth".into()),
                },
                1
            )]
        );
    }

    #[test]
    fn failed_launch_records_nothing() {
        let host = FakeHost {
            launch_fails: true,
            ..FakeHost::default()
        };
        let mut bridge = bridge(host);
        let (replies, sink) = recorder();
        let result = bridge.dispatch(
            &request(Operation::LaunchBrowserTab, &[("url", "https://kauth.kakao.com")]),
            sink,
        );
        assert!(result.is_err());
        assert!(bridge.pending_exchange().is_none());
        assert_eq!(replies.take().len(), 1);
    }

    #[test]
    fn second_login_overwrites_first() {
        let mut bridge = bridge(FakeHost::default());
        let (first_replies, first) = recorder();
        let Dispatched::Pending(first_id) = bridge
            .dispatch(&request(Operation::LaunchBrowserTab, &[("url", "https://a")]), first)
            .unwrap()
        else {
            panic!("expected pending exchange");
        };
        let (_, second) = recorder();
        let Dispatched::Pending(second_id) = bridge
            .dispatch(&request(Operation::AuthorizeWithTalk, &talk_args()), second)
            .unwrap()
        else {
            panic!("expected pending exchange");
        };

        assert_ne!(first_id, second_id);
        assert_eq!(bridge.pending_exchange(), Some(second_id));
        // The displaced caller is never answered.
        assert!(first_replies.take().is_empty());
    }

    #[test]
    fn sync_call_during_login_leaves_exchange_alone() {
        let mut bridge = bridge(FakeHost::default());
        let (login_replies, login) = recorder();
        let Dispatched::Pending(id) = bridge
            .dispatch(&request(Operation::AuthorizeWithTalk, &talk_args()), login)
            .unwrap()
        else {
            panic!("expected pending exchange");
        };

        let (version_replies, version) = recorder();
        bridge.dispatch(&request(Operation::AppVer, &[]), version).unwrap();
        assert_eq!(bridge.pending_exchange(), Some(id));

        let extras: kakao_bridge_core::ResultExtras =
            [("key_return_url".to_owned(), "kakaoclient://oauth?code=abc".to_owned())]
                .into_iter()
                .collect();
        assert!(bridge.on_activity_result(1, -1, Some(&extras)));

        assert_eq!(
            version_replies.take(),
            vec![ChannelReply::Success {
                value: Reply::Text("1.2.3".into())
            }]
        );
        assert_eq!(
            login_replies.take(),
            vec![ChannelReply::Success {
                value: Reply::Text("kakaoclient://oauth?code=abc".into())
            }]
        );
    }
}
