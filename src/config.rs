//! Portal endpoints and tuning knobs for the query engine.
//!
//! One `PortalConfig` is shared by every component of a query run. The
//! defaults target the production portal; tests point `base_url` at a
//! local mock server.

use std::time::Duration;

/// Default portal origin.
pub const DEFAULT_BASE_URL: &str = "https://portal.sw.nat.gov.tw";

/// Rows requested per page. Large enough to keep round-trips low, small
/// enough to bound per-request latency and memory.
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// Configuration for one portal query run.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Portal origin, e.g. `https://portal.sw.nat.gov.tw`.
    pub base_url: String,
    /// Rows requested per page.
    pub page_size: u32,
    /// Timeout for connection setup and the warm-up GET.
    pub connect_timeout: Duration,
    /// Timeout for a single page POST. Longer than warm-up since page
    /// payloads can run to hundreds of rows.
    pub page_timeout: Duration,
    /// Pause between consecutive page fetches so the portal does not
    /// mistake the run for abusive traffic.
    pub page_delay: Duration,
    /// Maximum bytes of raw response body kept for diagnostics.
    pub snippet_limit: usize,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            connect_timeout: Duration::from_secs(10),
            page_timeout: Duration::from_secs(20),
            page_delay: Duration::from_millis(200),
            snippet_limit: 200,
        }
    }
}

impl PortalConfig {
    /// Config pointed at a non-default origin (mock servers, staging).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Landing page fetched once per run to pick up session cookies.
    pub fn landing_url(&self) -> String {
        format!("{}/APGQ/GB312", self.base_url)
    }

    /// Paged manifest query endpoint.
    pub fn query_url(&self) -> String {
        format!("{}/APGQ/GB312_query0", self.base_url)
    }

    /// `Origin` header value: scheme + host of the configured base URL.
    pub fn origin(&self) -> String {
        url::Url::parse(&self.base_url)
            .ok()
            .map(|u| u.origin().ascii_serialization())
            .unwrap_or_else(|| self.base_url.clone())
    }

    /// `Referer` header value.
    pub fn referer(&self) -> String {
        format!("{}/", self.origin())
    }
}
