//! Remote fallback source for single-icon fetches
//!
//! Last resort of the resolution cascade: when every local source misses,
//! a single icon can be fetched from the Iconify API. The contract is
//! strictly absorbing: transport errors, non-success statuses, and
//! malformed bodies all surface as `None`, never as an error.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::types::IconRecord;

/// Default Iconify API endpoint
pub const API_BASE: &str = "https://api.iconify.design";

/// Connect and read timeout for API requests
const TIMEOUT: Duration = Duration::from_secs(5);

/// A last-resort icon source queried with `(prefix, name)` when every
/// local source misses.
///
/// Implementations must apply their own timeout and swallow their own
/// failures; nothing from the transport layer may propagate into the
/// resolver.
pub trait FallbackSource: Send + Sync {
    /// Fetch a single icon, or `None` if unavailable for any reason
    fn fetch_icon(&self, prefix: &str, name: &str) -> Option<IconRecord>;
}

/// Response shape of `GET {base}/{prefix}.json?icons={name}`
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    icons: HashMap<String, ApiIcon>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ApiIcon {
    body: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

/// Blocking HTTP client for the Iconify icon API.
///
/// Dimension fallback order: icon entry value, then response top-level
/// value, then 24.
pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    /// Client pointed at the public Iconify API
    pub fn new() -> Self {
        Self::with_base_url(API_BASE)
    }

    /// Client pointed at a custom endpoint (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(TIMEOUT)
            .timeout(TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Falling back to a default HTTP client: {e}");
                reqwest::blocking::Client::new()
            });
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackSource for ApiClient {
    fn fetch_icon(&self, prefix: &str, name: &str) -> Option<IconRecord> {
        let start = Instant::now();
        let url = format!("{}/{prefix}.json?icons={name}", self.base_url);

        let response = match self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
        {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Network error fetching {prefix}:{name}: {e}");
                return None;
            }
        };

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return None;
        }
        if !response.status().is_success() {
            log::warn!("API returned {} for {url}", response.status());
            return None;
        }

        let data: ApiResponse = match response.json() {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Failed to parse API response for {prefix}:{name}: {e}");
                return None;
            }
        };

        let icon = data.icons.get(name)?;
        let body = icon.body.clone()?;

        let elapsed_ms = start.elapsed().as_millis();
        log::debug!(
            "Fetched {prefix}:{name} from the icon API ({elapsed_ms}ms). \
             Vendor this set for offline use."
        );

        Some(IconRecord {
            body,
            width: icon.width.or(data.width).unwrap_or(24),
            height: icon.height.or(data.height).unwrap_or(24),
        })
    }
}
