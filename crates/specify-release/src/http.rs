//! Rate-limit-aware GitHub HTTP client
//!
//! Wraps a `reqwest::Client` that attaches the optional bearer token and
//! turns non-success responses into an [`HttpDiagnostic`]: status, URL and
//! whatever throttling metadata GitHub put in the headers. The diagnostic is
//! only ever shown to the user; nothing here retries.

use crate::error::{Error, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use reqwest::header::{HeaderMap, AUTHORIZATION, RETRY_AFTER};
use specify_core::types::NetworkConfig;
use std::fmt;
use std::time::Duration;
use tracing::debug;

const RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
}

/// Throttling metadata parsed from response headers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub limit: Option<u64>,
    pub remaining: Option<u64>,
    pub reset_epoch: Option<i64>,
    pub retry_after_seconds: Option<u64>,
    /// `Retry-After` value that is not a plain number (an HTTP date)
    pub retry_after_raw: Option<String>,
}

impl RateLimitInfo {
    /// Parse whatever rate-limit headers are present. Unparseable values are skipped.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut info = Self {
            limit: header_str(headers, RATE_LIMIT_LIMIT).and_then(|v| v.parse().ok()),
            remaining: header_str(headers, RATE_LIMIT_REMAINING).and_then(|v| v.parse().ok()),
            reset_epoch: header_str(headers, RATE_LIMIT_RESET)
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|epoch| *epoch != 0),
            ..Default::default()
        };

        if let Some(retry_after) = header_str(headers, RETRY_AFTER.as_str()) {
            match retry_after.parse::<u64>() {
                Ok(secs) => info.retry_after_seconds = Some(secs),
                Err(_) => info.retry_after_raw = Some(retry_after.to_string()),
            }
        }

        info
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn reset_utc(&self) -> Option<DateTime<Utc>> {
        self.reset_epoch
            .and_then(|epoch| Utc.timestamp_opt(epoch, 0).single())
    }

    pub fn reset_local(&self) -> Option<DateTime<Local>> {
        self.reset_utc().map(|t| t.with_timezone(&Local))
    }
}

/// User-facing description of a failed GitHub request
#[derive(Debug, Clone)]
pub struct HttpDiagnostic {
    pub status: u16,
    pub url: String,
    pub rate_limit: RateLimitInfo,
    /// Truncated response body, captured only in debug mode
    pub body_excerpt: Option<String>,
}

impl HttpDiagnostic {
    pub fn new(status: u16, url: impl Into<String>, headers: &HeaderMap) -> Self {
        Self {
            status,
            url: url.into(),
            rate_limit: RateLimitInfo::from_headers(headers),
            body_excerpt: None,
        }
    }

    pub fn with_body_excerpt(mut self, body: &str, max_chars: usize) -> Self {
        self.body_excerpt = Some(body.chars().take(max_chars).collect());
        self
    }

    /// Multi-line text with rate-limit details and troubleshooting tips
    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("GitHub API returned status {} for {}", self.status, self.url),
            String::new(),
        ];

        let info = &self.rate_limit;
        if !info.is_empty() {
            lines.push("Rate Limit Information:".to_string());
            if let Some(limit) = info.limit {
                lines.push(format!("  • Rate Limit: {} requests/hour", limit));
            }
            if let Some(remaining) = info.remaining {
                lines.push(format!("  • Remaining: {}", remaining));
            }
            if let (Some(local), Some(utc)) = (info.reset_local(), info.reset_utc()) {
                lines.push(format!(
                    "  • Resets at: {} ({} UTC)",
                    local.format("%Y-%m-%d %H:%M:%S %Z"),
                    utc.format("%Y-%m-%d %H:%M:%S")
                ));
            }
            if let Some(secs) = info.retry_after_seconds {
                lines.push(format!("  • Retry after: {} seconds", secs));
            } else if let Some(raw) = &info.retry_after_raw {
                lines.push(format!("  • Retry after: {}", raw));
            }
            lines.push(String::new());
        }

        lines.push("Troubleshooting Tips:".to_string());
        lines.push(
            "  • If you're on a shared CI or corporate environment, you may be rate-limited."
                .to_string(),
        );
        lines.push(
            "  • Consider using a GitHub token via --github-token or the GH_TOKEN/GITHUB_TOKEN"
                .to_string(),
        );
        lines.push("    environment variable to increase rate limits.".to_string());
        lines.push(
            "  • Authenticated requests have a limit of 5,000/hour vs 60/hour for unauthenticated."
                .to_string(),
        );

        if let Some(body) = &self.body_excerpt {
            lines.push(String::new());
            lines.push("Response body (truncated):".to_string());
            lines.push(body.clone());
        }

        lines.join("\n")
    }
}

impl fmt::Display for HttpDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Shared HTTP client for the release API and the asset host
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    token: Option<String>,
    debug: bool,
}

impl GitHubClient {
    /// Build a client with the configured user agent.
    ///
    /// `token` should already be resolved; blank tokens are dropped.
    pub fn new(network: &NetworkConfig, token: Option<String>) -> Result<Self> {
        Self::builder(network).token(token).build()
    }

    pub fn builder(network: &NetworkConfig) -> GitHubClientBuilder {
        GitHubClientBuilder {
            user_agent: network.user_agent.clone(),
            token: None,
            skip_tls: false,
            debug: false,
        }
    }

    /// Whether an Authorization header will be sent
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// GET request with the bearer token and a per-request timeout. Redirects are followed.
    pub fn get(&self, url: &str, timeout: Duration) -> reqwest::RequestBuilder {
        debug!("GET {}", url);
        let mut request = self.client.get(url).timeout(timeout);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        request
    }

    /// Consume a non-success response into a diagnostic.
    ///
    /// In debug mode the body is read and truncated to `body_limit` characters.
    pub async fn diagnose(
        &self,
        response: reqwest::Response,
        url: &str,
        body_limit: usize,
    ) -> HttpDiagnostic {
        let diagnostic =
            HttpDiagnostic::new(response.status().as_u16(), url, response.headers());
        if self.debug {
            let body = response.text().await.unwrap_or_default();
            diagnostic.with_body_excerpt(&body, body_limit)
        } else {
            diagnostic
        }
    }
}

/// Builder for [`GitHubClient`]
pub struct GitHubClientBuilder {
    user_agent: String,
    token: Option<String>,
    skip_tls: bool,
    debug: bool,
}

impl GitHubClientBuilder {
    pub fn token(mut self, token: Option<String>) -> Self {
        self.token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }

    /// Accept invalid TLS certificates
    pub fn skip_tls(mut self, skip: bool) -> Self {
        self.skip_tls = skip;
        self
    }

    /// Capture response bodies in diagnostics
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn build(self) -> Result<GitHubClient> {
        let mut builder = reqwest::Client::builder().user_agent(&self.user_agent);
        if self.skip_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder.build().map_err(|e| Error::Client(e.to_string()))?;

        Ok(GitHubClient {
            client,
            token: self.token,
            debug: self.debug,
        })
    }
}
