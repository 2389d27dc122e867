//! Cached, retrying JSON fetches.
//!
//! `FetchClient` owns its cache and pending-request maps; there is no
//! module-global state, so tests and independent dashboards get isolated
//! instances. Policy:
//!
//! - a fresh cache entry is returned without touching the network
//! - concurrent fetches of the same URL share one network call
//! - otherwise up to `max_retries` attempts, backoff capped at
//!   `backoff_cap`, with timeouts picked by connection-quality tier
//! - request timeouts and HTTP 404/403 never retry
//! - failures are never cached; the next call starts fresh
//!
//! The cache is unbounded for the process lifetime. The working set is a
//! catalog of a few dozen URLs, so eviction beyond TTL expiry on read has
//! not been needed.

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::AppError;

/// Connection-quality tier, normally `Good`. A caller that knows it is on
/// a constrained or absent link can widen/narrow the per-attempt timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionQuality {
    #[default]
    Good,
    Slow,
    /// Quick-fail tier: still tries, but gives up fast.
    Offline,
}

impl ConnectionQuality {
    pub fn timeout(self) -> Duration {
        match self {
            ConnectionQuality::Good => Duration::from_secs(10),
            ConnectionQuality::Slow => Duration::from_secs(15),
            ConnectionQuality::Offline => Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Cache entries older than this are treated as absent on read.
    pub ttl: Duration,
    /// Total attempts per fetch, including the first.
    pub max_retries: u32,
    pub backoff_base: Duration,
    pub backoff_cap: Duration,
    pub quality: ConnectionQuality,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            max_retries: 3,
            backoff_base: Duration::from_millis(1000),
            backoff_cap: Duration::from_millis(5000),
            quality: ConnectionQuality::Good,
        }
    }
}

struct CacheEntry {
    data: Value,
    timestamp: Instant,
}

/// Rendezvous for callers waiting on an in-flight request.
struct Inflight {
    result: Mutex<Option<Result<Value, AppError>>>,
    done: Condvar,
}

impl Inflight {
    fn new() -> Self {
        Self {
            result: Mutex::new(None),
            done: Condvar::new(),
        }
    }

    fn wait(&self) -> Result<Value, AppError> {
        let mut guard = lock(&self.result);
        loop {
            if let Some(result) = guard.as_ref() {
                return result.clone();
            }
            guard = self
                .done
                .wait(guard)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }

    fn complete(&self, result: Result<Value, AppError>) {
        *lock(&self.result) = Some(result);
        self.done.notify_all();
    }
}

/// Cache observability snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub total: usize,
    pub valid: usize,
    pub expired: usize,
    pub pending: usize,
}

pub struct FetchClient {
    http: Client,
    config: FetchConfig,
    cache: Mutex<HashMap<String, CacheEntry>>,
    pending: Mutex<HashMap<String, Arc<Inflight>>>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    pub fn new() -> Self {
        Self::with_config(FetchConfig::default())
    }

    pub fn with_config(config: FetchConfig) -> Self {
        Self {
            http: Client::new(),
            config,
            cache: Mutex::new(HashMap::new()),
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch a URL as JSON, honoring the cache/de-dup/retry policy.
    pub fn fetch(&self, url: &str) -> Result<Value, AppError> {
        if let Some(data) = self.cached(url) {
            return Ok(data);
        }

        // One lock acquisition decides leader vs follower. Splitting the
        // lookup from the insert would let two near-simultaneous callers
        // both observe "nothing pending" and fetch twice.
        enum Role {
            Leader(Arc<Inflight>),
            Follower(Arc<Inflight>),
        }
        let role = {
            let mut pending = lock(&self.pending);
            match pending.get(url) {
                Some(inflight) => Role::Follower(Arc::clone(inflight)),
                None => {
                    let inflight = Arc::new(Inflight::new());
                    pending.insert(url.to_string(), Arc::clone(&inflight));
                    Role::Leader(inflight)
                }
            }
        };

        match role {
            Role::Follower(inflight) => inflight.wait(),
            Role::Leader(inflight) => {
                let result = self.execute(url);

                if let Ok(data) = &result {
                    lock(&self.cache).insert(
                        url.to_string(),
                        CacheEntry {
                            data: data.clone(),
                            timestamp: Instant::now(),
                        },
                    );
                }
                // Cache first, then unregister: a caller arriving in
                // between hits the fresh cache entry instead of fetching.
                lock(&self.pending).remove(url);
                inflight.complete(result.clone());
                result
            }
        }
    }

    pub fn stats(&self) -> CacheStats {
        let cache = lock(&self.cache);
        let valid = cache
            .values()
            .filter(|e| e.timestamp.elapsed() < self.config.ttl)
            .count();
        CacheStats {
            total: cache.len(),
            valid,
            expired: cache.len() - valid,
            pending: lock(&self.pending).len(),
        }
    }

    pub fn clear(&self) {
        lock(&self.cache).clear();
    }

    fn cached(&self, url: &str) -> Option<Value> {
        let mut cache = lock(&self.cache);
        let entry = cache.get(url)?;
        if entry.timestamp.elapsed() >= self.config.ttl {
            cache.remove(url);
            return None;
        }
        Some(entry.data.clone())
    }

    fn execute(&self, url: &str) -> Result<Value, AppError> {
        let mut last_error = String::new();

        for attempt in 1..=self.config.max_retries {
            match self.attempt(url) {
                Ok(data) => return Ok(data),
                Err(Attempt::Permanent(message)) => {
                    return Err(AppError::fetch(format!("Failed to load {url}: {message}")));
                }
                Err(Attempt::Transient(message)) => {
                    last_error = message;
                }
            }

            if attempt < self.config.max_retries {
                std::thread::sleep(self.backoff_delay(attempt));
            }
        }

        Err(AppError::fetch(format!(
            "Failed to load {url} after {} attempts: {last_error}",
            self.config.max_retries
        )))
    }

    fn attempt(&self, url: &str) -> Result<Value, Attempt> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .timeout(self.config.quality.timeout())
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    Attempt::Permanent(format!("request timed out: {e}"))
                } else {
                    Attempt::Transient(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = format!("HTTP {status}");
            return Err(
                if status == StatusCode::NOT_FOUND || status == StatusCode::FORBIDDEN {
                    Attempt::Permanent(message)
                } else {
                    Attempt::Transient(message)
                },
            );
        }

        response
            .json::<Value>()
            .map_err(|e| Attempt::Transient(format!("invalid JSON body: {e}")))
    }

    /// `min(base * 2^(attempt-1), cap)`.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exp = self
            .config
            .backoff_base
            .saturating_mul(1u32 << (attempt - 1).min(16));
        exp.min(self.config.backoff_cap)
    }
}

enum Attempt {
    /// Worth another try (network error, 5xx, bad body).
    Transient(String),
    /// Retrying cannot help (timeout abort, 404, 403).
    Permanent(String),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A poisoned lock only means another thread panicked mid-update of a
    // plain map; the data is still usable.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_then_caps() {
        let client = FetchClient::new();
        assert_eq!(client.backoff_delay(1), Duration::from_millis(1000));
        assert_eq!(client.backoff_delay(2), Duration::from_millis(2000));
        assert_eq!(client.backoff_delay(3), Duration::from_millis(4000));
        assert_eq!(client.backoff_delay(4), Duration::from_millis(5000));
        assert_eq!(client.backoff_delay(10), Duration::from_millis(5000));
    }

    #[test]
    fn quality_timeout_table() {
        assert_eq!(ConnectionQuality::Good.timeout(), Duration::from_secs(10));
        assert_eq!(ConnectionQuality::Slow.timeout(), Duration::from_secs(15));
        assert_eq!(ConnectionQuality::Offline.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn stats_start_empty() {
        let client = FetchClient::new();
        assert_eq!(
            client.stats(),
            CacheStats {
                total: 0,
                valid: 0,
                expired: 0,
                pending: 0
            }
        );
    }
}
