//! WeChat open platform HTTP client.
//!
//! Every endpoint answers HTTP 200 and reports failure through a non-zero
//! `errcode` in the body, so each response is checked before its payload is used.

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::repository::WeChatPort;
use crate::domain::types::{PhoneInfo, WeChatSession};
use crate::error::MpServiceError;

pub const WECHAT_API_BASE: &str = "https://api.weixin.qq.com";

#[derive(Clone)]
pub struct WeChatClient {
    http: reqwest::Client,
    base_url: String,
    appid: String,
    secret: String,
}

impl std::fmt::Debug for WeChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeChatClient")
            .field("base_url", &self.base_url)
            .field("appid", &self.appid)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct Code2SessionResponse {
    #[serde(default)]
    errcode: i64,
    errmsg: Option<String>,
    openid: Option<String>,
    session_key: Option<String>,
    unionid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    #[serde(default)]
    errcode: i64,
    errmsg: Option<String>,
    access_token: Option<String>,
}

#[derive(Serialize)]
struct PhoneNumberRequest<'a> {
    code: &'a str,
}

#[derive(Debug, Deserialize)]
struct PhoneNumberResponse {
    #[serde(default)]
    errcode: i64,
    errmsg: Option<String>,
    phone_info: Option<PhoneInfo>,
}

fn check(errcode: i64, errmsg: Option<&str>) -> Result<(), MpServiceError> {
    if errcode == 0 {
        return Ok(());
    }
    Err(MpServiceError::WeChat(format!(
        "{errcode}: {}",
        errmsg.unwrap_or("unknown error")
    )))
}

fn transport(e: reqwest::Error) -> MpServiceError {
    MpServiceError::WeChat(format!("request failed: {e}"))
}

impl WeChatClient {
    pub fn new(appid: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: WECHAT_API_BASE.to_owned(),
            appid: appid.into(),
            secret: secret.into(),
        }
    }

    /// Point the client at another host, e.g. a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, MpServiceError> {
        Url::parse_with_params(&format!("{}{path}", self.base_url), params)
            .map_err(|e| {
                MpServiceError::Internal(anyhow::Error::new(e).context("build wechat url"))
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, MpServiceError> {
        self.http
            .get(url)
            .send()
            .await
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)
    }

    /// App-level access token from `cgi-bin/token`.
    async fn access_token(&self) -> Result<String, MpServiceError> {
        let url = self.url(
            "/cgi-bin/token",
            &[
                ("grant_type", "client_credential"),
                ("appid", self.appid.as_str()),
                ("secret", self.secret.as_str()),
            ],
        )?;
        let resp: AccessTokenResponse = self.get_json(url).await?;
        check(resp.errcode, resp.errmsg.as_deref())?;
        resp.access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| MpServiceError::WeChat("access_token missing".into()))
    }
}

impl WeChatPort for WeChatClient {
    async fn code2session(&self, code: &str) -> Result<WeChatSession, MpServiceError> {
        let url = self.url(
            "/sns/jscode2session",
            &[
                ("appid", self.appid.as_str()),
                ("secret", self.secret.as_str()),
                ("js_code", code),
                ("grant_type", "authorization_code"),
            ],
        )?;
        let resp: Code2SessionResponse = self.get_json(url).await?;
        session_from_response(resp)
    }

    async fn phone_number(&self, code: &str) -> Result<PhoneInfo, MpServiceError> {
        let token = self.access_token().await?;
        let url = self.url(
            "/wxa/business/getuserphonenumber",
            &[("access_token", token.as_str())],
        )?;
        let resp: PhoneNumberResponse = self
            .http
            .post(url)
            .json(&PhoneNumberRequest { code })
            .send()
            .await
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)?;
        check(resp.errcode, resp.errmsg.as_deref())?;
        Ok(resp.phone_info.unwrap_or_default())
    }
}

fn session_from_response(resp: Code2SessionResponse) -> Result<WeChatSession, MpServiceError> {
    check(resp.errcode, resp.errmsg.as_deref())?;
    match (resp.openid, resp.session_key) {
        (Some(openid), Some(session_key)) if !openid.is_empty() => Ok(WeChatSession {
            openid,
            session_key,
            unionid: resp.unionid.filter(|u| !u.is_empty()),
        }),
        _ => Err(MpServiceError::WeChat("openid missing from session".into())),
    }
}
