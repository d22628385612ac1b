//! Portal transport session wrapping reqwest.
//!
//! One session owns one cookie jar and serves every page of one logical
//! query run. A fresh session per run avoids stale-cookie hazards; a
//! fresh session per *page* would lose whatever affinity the portal
//! expects, so the engine reuses a single instance.

use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::Value;

use crate::config::PortalConfig;
use crate::error::FetchError;

/// One page of raw portal rows plus the server-reported total for the
/// full result set. Consumed immediately by the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct PageResult {
    /// Server-reported total row count across all pages.
    pub total: u64,
    /// Raw rows for this page window.
    #[serde(rename = "data")]
    pub rows: Vec<Value>,
}

/// HTTP session with portal-shaped headers and a persistent cookie jar.
pub struct PortalSession {
    client: reqwest::Client,
    config: PortalConfig,
}

impl PortalSession {
    /// Build a session for one query run.
    pub fn new(config: &PortalConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Requested-With",
            HeaderValue::from_static("XMLHttpRequest"),
        );
        if let Ok(origin) = HeaderValue::from_str(&config.origin()) {
            headers.insert("Origin", origin);
        }
        if let Ok(referer) = HeaderValue::from_str(&config.referer()) {
            headers.insert("Referer", referer);
        }

        // The portal degrades or rejects requests that do not look like
        // its own browser front end.
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                  AppleWebKit/537.36 (KHTML, like Gecko) \
                  Chrome/142.0.0.0 Safari/537.36";

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(ua)
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .timeout(config.page_timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Best-effort GET against the landing page to pick up session
    /// cookies. Failure is non-fatal; the query proceeds without it.
    pub async fn warm_up(&self) {
        let result = self
            .client
            .get(self.config.landing_url())
            .timeout(self.config.connect_timeout)
            .send()
            .await;
        if let Err(e) = result {
            tracing::debug!("warm-up request failed (continuing): {e}");
        }
    }

    /// Fetch one page window of manifest rows for `call_sign`.
    pub async fn fetch_page(
        &self,
        call_sign: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PageResult, FetchError> {
        let payload = query_payload(call_sign, page, page_size);

        let response = self
            .client
            .post(self.config.query_url())
            .form(&payload)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        serde_json::from_str::<PageResult>(&body).map_err(|e| FetchError::Parse {
            message: e.to_string(),
            snippet: Some(truncate(&body, self.config.snippet_limit)),
        })
    }
}

/// Form body for one page request. Fixed S/O range (full vessel), fixed
/// declarant code, empty optional filters; only the page window and the
/// call sign vary.
fn query_payload(call_sign: &str, page: u32, page_size: u32) -> Vec<(&'static str, String)> {
    vec![
        ("tab0.currentPage", page.to_string()),
        ("tab0.rowNum", page_size.to_string()),
        ("tab0.vslRegNo", call_sign.to_string()),
        // 1 = query by vessel/flight
        ("tab0.choice", "1".to_string()),
        ("tab0.soNoStart", "0000".to_string()),
        ("tab0.soNoEnd", "Z".to_string()),
        ("tab0.declCustCd", "BC".to_string()),
        ("tab0.mawbStart", String::new()),
        ("tab0.mawbEnd", String::new()),
        ("tab0.hawb", String::new()),
        ("tab0.storWareCd", String::new()),
        ("tab0.declNo", String::new()),
    ]
}

/// First `limit` bytes of `body`, trimmed back to a char boundary.
fn truncate(body: &str, limit: usize) -> String {
    if body.len() <= limit {
        return body.to_string();
    }
    let mut end = limit;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}
