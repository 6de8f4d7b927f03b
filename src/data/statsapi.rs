//! MLB stats API client
//!
//! Fetches season schedules and game play-by-play from `statsapi.mlb.com` and
//! maps them into our data structures. Transient failures are retried with
//! exponential backoff before an error is handed back to the caller.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::{GameStatus, PlayByPlay, ScheduledGame};

/// Base URL for the MLB stats API
const STATS_API_BASE_URL: &str = "https://statsapi.mlb.com/api/v1";

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur when talking to the stats API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout or body transfer failure
    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body was not the expected JSON
    #[error("failed to parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Retry ceiling reached while the failure was still transient
    #[error("giving up on {url} after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },
}

impl ApiError {
    /// Whether the request is worth repeating
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network { .. } => true,
            ApiError::Status { status, .. } => *status >= 500 || *status == 429,
            ApiError::Parse { .. } | ApiError::RetriesExhausted { .. } => false,
        }
    }
}

/// Exponential backoff settings for transient failures
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
    /// Total attempts before giving up; `None` retries forever
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the `failures`-th consecutive failure (1-based)
    pub fn delay_for(&self, failures: u32) -> Duration {
        let exponent = failures.saturating_sub(1).min(31);
        self.initial_delay
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay)
    }
}

/// Source of schedule and play-by-play data
///
/// Implemented over HTTP by [`StatsApiClient`]; tests substitute in-memory
/// sources.
#[allow(async_fn_in_trait)]
pub trait StatsSource {
    /// Fetches every game scheduled between `start` and `end` inclusive
    async fn fetch_schedule(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduledGame>, ApiError>;

    /// Fetches the full play-by-play record of one game
    async fn fetch_play_by_play(&self, game_id: u64) -> Result<PlayByPlay, ApiError>;
}

/// Schedule endpoint response
#[derive(Debug, Default, Deserialize)]
struct ScheduleResponse {
    #[serde(default)]
    dates: Vec<ScheduleDate>,
}

#[derive(Debug, Default, Deserialize)]
struct ScheduleDate {
    #[serde(default)]
    games: Vec<ScheduleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleEntry {
    game_pk: u64,
    #[serde(default)]
    game_type: String,
    #[serde(default)]
    status: ScheduleStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleStatus {
    detailed_state: Option<String>,
}

impl ScheduleResponse {
    fn into_games(self) -> Vec<ScheduledGame> {
        self.dates
            .into_iter()
            .flat_map(|date| date.games)
            .map(|entry| ScheduledGame {
                game_id: entry.game_pk,
                status: entry
                    .status
                    .detailed_state
                    .as_deref()
                    .map(GameStatus::from_detailed_state)
                    .unwrap_or(GameStatus::Other),
                game_type: entry.game_type,
            })
            .collect()
    }
}

/// Client for the MLB stats API
#[derive(Debug, Clone)]
pub struct StatsApiClient {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl Default for StatsApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsApiClient {
    /// Create a new StatsApiClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("kkoutfinder/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            base_url: STATS_API_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    /// Points the client at a different API root (local test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// GET `url` and decode the JSON body, retrying transient failures
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let mut failures = 0u32;
        loop {
            let error = match self.get_once(url).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => e,
                Err(e) => return Err(e),
            };

            failures += 1;
            if let Some(max) = self.retry.max_attempts {
                if failures >= max {
                    return Err(ApiError::RetriesExhausted {
                        url: url.to_owned(),
                        attempts: failures,
                        last_error: error.to_string(),
                    });
                }
            }

            let backoff = self.retry.delay_for(failures);
            warn!(
                url,
                attempt = failures,
                backoff_ms = backoff.as_millis() as u64,
                error = %error,
                "request failed, retrying"
            );
            tokio::time::sleep(backoff).await;
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|source| ApiError::Network {
                url: url.to_owned(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        response.json::<T>().await.map_err(|source| {
            if source.is_decode() {
                ApiError::Parse {
                    url: url.to_owned(),
                    source,
                }
            } else {
                ApiError::Network {
                    url: url.to_owned(),
                    source,
                }
            }
        })
    }
}

impl StatsSource for StatsApiClient {
    async fn fetch_schedule(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduledGame>, ApiError> {
        let url = format!(
            "{}/schedule?sportId=1&startDate={}&endDate={}",
            self.base_url,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );
        debug!(%start, %end, "fetching schedule");
        let response: ScheduleResponse = self.get(&url).await?;
        Ok(response.into_games())
    }

    async fn fetch_play_by_play(&self, game_id: u64) -> Result<PlayByPlay, ApiError> {
        let url = format!("{}/game/{}/playByPlay", self.base_url, game_id);
        debug!(game_id, "fetching play-by-play");
        self.get(&url).await
    }
}
