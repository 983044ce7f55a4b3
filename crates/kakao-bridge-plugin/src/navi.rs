// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// KakaoNavi deep links and the HTTPS navigation guide.

use kakao_bridge_core::constants::{
    APIVER, APPKEY, ARG_APP_KEY, ARG_EXTRAS, ARG_NAVI_PARAMS, EXTRAS, PARAM,
};
use kakao_bridge_core::error::{BridgeError, Result};
use kakao_bridge_core::{Arguments, BridgeConfig};
use url::Url;

/// Arguments shared by the navigation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaviRequest<'a> {
    pub app_key: &'a str,
    /// JSON-encoded destination and options, passed through untouched.
    pub params: &'a str,
    pub extras: Option<&'a str>,
}

impl<'a> NaviRequest<'a> {
    pub fn from_args(args: &'a Arguments) -> Result<Self> {
        Ok(Self {
            app_key: args.required(ARG_APP_KEY)?,
            params: args.required(ARG_NAVI_PARAMS)?,
            extras: args.optional(ARG_EXTRAS),
        })
    }

    /// `https://<navi_web_host>/?param=..&apiver=..&appkey=..[&extras=..]`
    pub fn web_guide_url(&self, config: &BridgeConfig) -> Result<Url> {
        let base = format!("https://{}", config.navi_web_host);
        self.with_query(parse(&base)?, config)
    }

    /// `<navi_scheme>://<action>?param=..&apiver=..&appkey=..[&extras=..]`
    pub fn app_uri(&self, config: &BridgeConfig, action: &str) -> Result<Url> {
        let base = format!("{}://{action}", config.navi_scheme);
        self.with_query(parse(&base)?, config)
    }

    /// Appends the query in `application/x-www-form-urlencoded` form: a
    /// space becomes `+` and `!'()~` are percent-escaped, where Android's
    /// `Uri.Builder` writes `%20` and leaves those characters bare. Both
    /// decode to the same values.
    fn with_query(&self, mut url: Url, config: &BridgeConfig) -> Result<Url> {
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair(PARAM, self.params)
                .append_pair(APIVER, &config.navi_api_version)
                .append_pair(APPKEY, self.app_key);
            if let Some(extras) = self.extras {
                query.append_pair(EXTRAS, extras);
            }
        }
        Ok(url)
    }
}

fn parse(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| BridgeError::Config(format!("bad navigation base {raw}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kakao_bridge_core::constants::{NAVIGATE, SHARE_POI};

    fn args(extras: Option<&str>) -> Arguments {
        let mut args: Arguments = [("app_key", "k"), ("navi_params", "p")].into_iter().collect();
        if let Some(extras) = extras {
            args.insert("extras", extras);
        }
        args
    }

    #[test]
    fn app_uri_uses_private_scheme() {
        let args = args(Some("e"));
        let request = NaviRequest::from_args(&args).unwrap();
        let uri = request.app_uri(&BridgeConfig::default(), NAVIGATE).unwrap();
        assert_eq!(
            uri.as_str(),
            "kakaonavi-sdk://navigate?param=p&apiver=1.0&appkey=k&extras=e"
        );
    }

    #[test]
    fn share_uses_share_poi_authority() {
        let args = args(None);
        let request = NaviRequest::from_args(&args).unwrap();
        let uri = request.app_uri(&BridgeConfig::default(), SHARE_POI).unwrap();
        assert_eq!(uri.as_str(), "kakaonavi-sdk://sharePoi?param=p&apiver=1.0&appkey=k");
    }

    #[test]
    fn web_guide_is_https_under_fixed_host() {
        let args = args(None);
        let request = NaviRequest::from_args(&args).unwrap();
        let url = request.web_guide_url(&BridgeConfig::default()).unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("kakaonavi-wguide.kakao.com"));
        let keys: Vec<_> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
        assert_eq!(keys, ["param", "apiver", "appkey"]);
    }

    #[test]
    fn json_params_survive_encoding() {
        let params = r#"{"destination":{"name":"카카오 판교","x":"127.1","y":"37.4"}}"#;
        let args: Arguments = [("app_key", "k"), ("navi_params", params)].into_iter().collect();
        let url = NaviRequest::from_args(&args)
            .unwrap()
            .web_guide_url(&BridgeConfig::default())
            .unwrap();
        let decoded = url
            .query_pairs()
            .find(|(k, _)| k == "param")
            .map(|(_, v)| v.into_owned());
        assert_eq!(decoded.as_deref(), Some(params));
    }

    #[test]
    fn query_is_form_encoded() {
        let args: Arguments = [("app_key", "k"), ("navi_params", "a b(1)")].into_iter().collect();
        let url = NaviRequest::from_args(&args)
            .unwrap()
            .app_uri(&BridgeConfig::default(), NAVIGATE)
            .unwrap();
        assert_eq!(url.query(), Some("param=a+b%281%29&apiver=1.0&appkey=k"));
    }

    #[test]
    fn missing_params_is_invalid_argument() {
        let args: Arguments = [("app_key", "k")].into_iter().collect();
        let err = NaviRequest::from_args(&args).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidArgument { key } if key == "navi_params"));
    }
}
