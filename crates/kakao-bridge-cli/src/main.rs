// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Kakao bridge: diagnostic command line.
//
// Entry point. Initialises logging and runs one bridge operation: a method
// call against this platform's host, or one of the pure builders (KA
// header, PKCE challenge, navigation URL).

use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use kakao_bridge_core::constants::{NAVIGATE, SHARE_POI};
use kakao_bridge_core::error::{BridgeError, Result};
use kakao_bridge_core::{Arguments, BridgeConfig, ScreenSize};
use kakao_bridge_plugin::{
    AndroidKaHeader, BoxedReply, Bridge, ChannelReply, IosKaHeader, MethodCall, NaviRequest,
};
use kakao_bridge_security::CodeChallenge;

#[derive(Debug, Parser)]
#[command(name = "kakao-bridge", version, about = "Kakao SDK bridge diagnostics")]
struct Cli {
    /// JSON bridge configuration; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Dispatch one method call and print the reply as JSON.
    Call {
        method: String,
        /// Arguments as key=value pairs.
        #[arg(value_parser = parse_pair)]
        args: Vec<(String, String)>,
    },
    /// Print the KA header for the given device facts.
    Header {
        #[command(subcommand)]
        layout: HeaderLayout,
    },
    /// Print the S256 code challenge for a verifier.
    Challenge { verifier: String },
    /// Print a KakaoNavi link.
    NaviUrl {
        #[arg(long)]
        app_key: String,
        #[arg(long)]
        params: String,
        #[arg(long)]
        extras: Option<String>,
        /// App deep link for this action (`navigate` or `sharePoi`)
        /// instead of the web guide.
        #[arg(long)]
        action: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum HeaderLayout {
    Android {
        #[arg(long)]
        api: u32,
        #[arg(long)]
        lang: String,
        #[arg(long)]
        region: String,
        /// Signing-key hash.
        #[arg(long)]
        origin: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        package: String,
        #[arg(long)]
        app_version: String,
    },
    Ios {
        #[arg(long)]
        os_version: String,
        /// Preferred language tag, e.g. ko-KR.
        #[arg(long)]
        lang: String,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
        #[arg(long)]
        model: String,
        #[arg(long)]
        bundle_id: String,
        #[arg(long)]
        app_version: String,
    },
}

fn header(layout: HeaderLayout) -> String {
    match layout {
        HeaderLayout::Android {
            api,
            lang,
            region,
            origin,
            model,
            package,
            app_version,
        } => AndroidKaHeader {
            os_api_level: api,
            language: lang,
            country: region,
            origin,
            device_model: model,
            package_name: package,
            app_version,
        }
        .to_string(),
        HeaderLayout::Ios {
            os_version,
            lang,
            width,
            height,
            model,
            bundle_id,
            app_version,
        } => IosKaHeader {
            os_version,
            language: lang,
            screen: ScreenSize { width, height },
            device_model: model,
            origin: bundle_id,
            app_version,
        }
        .to_string(),
    }
}

fn parse_pair(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let config = match &cli.config {
        Some(path) => BridgeConfig::from_json_file(path)?,
        None => BridgeConfig::default(),
    };

    match cli.command {
        Command::Call { method, args } => call(config, method, args.into_iter().collect()),
        Command::Header { layout } => Ok(header(layout)),
        Command::Challenge { verifier } => Ok(CodeChallenge::from_verifier(&verifier).challenge),
        Command::NaviUrl {
            app_key,
            params,
            extras,
            action,
        } => {
            let request = NaviRequest {
                app_key: &app_key,
                params: &params,
                extras: extras.as_deref(),
            };
            let url = match action.as_deref() {
                None => request.web_guide_url(&config)?,
                Some(action @ (NAVIGATE | SHARE_POI)) => request.app_uri(&config, action)?,
                Some(other) => {
                    return Err(BridgeError::InvalidArgument {
                        key: format!("action ({other})"),
                    });
                }
            };
            Ok(url.to_string())
        }
    }
}

/// Run one method call through a bridge backed by this platform's host.
///
/// Login operations only start an activity; with no Activity to report
/// back, their pending reply is discarded when the bridge detaches.
fn call(config: BridgeConfig, method: String, arguments: Arguments) -> Result<String> {
    let host = kakao_bridge_native::platform_host();
    let mut bridge: Bridge<_, BoxedReply> = Bridge::new(host, config);

    let captured: Rc<RefCell<Option<ChannelReply>>> = Rc::default();
    let slot = Rc::clone(&captured);
    let reply: BoxedReply = Box::new(move |reply: ChannelReply| {
        slot.borrow_mut().replace(reply);
    });

    bridge.on_method_call(MethodCall::new(method, arguments), reply);
    if let Some(id) = bridge.pending_exchange() {
        tracing::warn!(exchange = %id, "login activity started; no result will arrive here");
        bridge.detach();
    }

    let reply = captured.borrow_mut().take();
    Ok(serde_json::to_string_pretty(&reply)?)
}
