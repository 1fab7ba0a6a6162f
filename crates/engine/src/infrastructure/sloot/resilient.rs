//! Retry wrapper for sloot lookups.
//!
//! Lookups are idempotent, so transient failures are retried with exponential
//! backoff and jitter.

use async_trait::async_trait;
use frame_survivor_domain::{CharacterAttributes, WalletAddress};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::ports::{CharacterProvider, UpstreamError};

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (0 = no retries, just the initial attempt)
    pub max_retries: u32,
    /// Base delay in milliseconds before first retry
    pub base_delay_ms: u64,
    /// Maximum delay in milliseconds (caps exponential growth)
    pub max_delay_ms: u64,
    /// Jitter factor (0.0-1.0) for randomizing delays
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 200,
            max_delay_ms: 2000,
            jitter_factor: 0.2,
        }
    }
}

/// Wrapper that adds retry logic to any sloot provider
pub struct ResilientCharacterProvider {
    inner: Arc<dyn CharacterProvider>,
    config: RetryConfig,
}

impl ResilientCharacterProvider {
    pub fn new(inner: Arc<dyn CharacterProvider>, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    /// Delay before retry number `attempt` (1-based).
    fn calculate_delay(&self, attempt: u32) -> u64 {
        let base = self.config.base_delay_ms;
        let exponential = base.saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)));
        let capped = exponential.min(self.config.max_delay_ms);

        let jitter_range = (capped as f64 * self.config.jitter_factor) as i64;
        if jitter_range > 0 {
            let jitter = rand::thread_rng().gen_range(-jitter_range..=jitter_range);
            (capped as i64 + jitter).max(0) as u64
        } else {
            capped
        }
    }
}

#[async_trait]
impl CharacterProvider for ResilientCharacterProvider {
    async fn fetch_character(
        &self,
        seed: &str,
    ) -> Result<CharacterAttributes, UpstreamError> {
        let mut attempt = 0;
        loop {
            match self.inner.fetch_character(seed).await {
                Ok(attributes) => {
                    if attempt > 0 {
                        tracing::info!(
                            attempt = attempt + 1,
                            seed,
                            "Sloot lookup succeeded after retry"
                        );
                    }
                    return Ok(attributes);
                }
                Err(e) if attempt < self.config.max_retries && e.is_transient() => {
                    attempt += 1;
                    let delay = self.calculate_delay(attempt);
                    tracing::warn!(
                        attempt,
                        max_retries = self.config.max_retries,
                        delay_ms = delay,
                        error = %e,
                        seed,
                        "Sloot lookup failed, retrying..."
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                Err(e) => {
                    tracing::error!(
                        attempts = attempt + 1,
                        transient = e.is_transient(),
                        error = %e,
                        seed,
                        "Sloot lookup failed"
                    );
                    return Err(e);
                }
            }
        }
    }

    fn generate_addresses(&self, count: usize) -> Vec<WalletAddress> {
        self.inner.generate_addresses(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockCharacterProvider;
    use crate::test_fixtures::character;

    fn fast_config(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            base_delay_ms: 1,
            max_delay_ms: 5,
            jitter_factor: 0.0,
        }
    }

    #[tokio::test]
    async fn retries_transient_failures_until_success() {
        let mut inner = MockCharacterProvider::new();
        let mut calls = 0;
        inner.expect_fetch_character().times(3).returning(move |seed| {
            calls += 1;
            if calls < 3 {
                Err(UpstreamError::request_failed("sloot", "503 unavailable"))
            } else {
                Ok(character(seed, 4))
            }
        });

        let provider = ResilientCharacterProvider::new(Arc::new(inner), fast_config(2));
        let result = provider.fetch_character("0xabc").await;

        assert_eq!(result.unwrap().owner(), "0xabc");
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let mut inner = MockCharacterProvider::new();
        inner.expect_fetch_character().times(2).returning(|_| {
            Err(UpstreamError::Timeout {
                operation: "fetch_character",
                after_ms: 10,
            })
        });

        let provider = ResilientCharacterProvider::new(Arc::new(inner), fast_config(1));
        assert!(provider.fetch_character("0xabc").await.is_err());
    }

    #[tokio::test]
    async fn does_not_retry_client_errors() {
        for status in [401, 404] {
            let mut inner = MockCharacterProvider::new();
            inner
                .expect_fetch_character()
                .times(1)
                .returning(move |_| {
                    Err(UpstreamError::rejected("sloot", status, "client error"))
                });

            let provider = ResilientCharacterProvider::new(Arc::new(inner), fast_config(3));
            assert!(provider.fetch_character("0xabc").await.is_err());
        }
    }

    #[tokio::test]
    async fn retries_transport_failures_even_when_the_url_contains_digits() {
        let mut inner = MockCharacterProvider::new();
        let mut calls = 0;
        inner.expect_fetch_character().times(2).returning(move |seed| {
            calls += 1;
            if calls == 1 {
                let url = format!("http://sloot.internal:8080/sloot/{seed}");
                Err(UpstreamError::request_failed(
                    "sloot",
                    format!("error sending request for url ({url})"),
                ))
            } else {
                Ok(character(seed, 4))
            }
        });

        let provider = ResilientCharacterProvider::new(Arc::new(inner), fast_config(2));
        let result = provider
            .fetch_character("0x9a4001bc00000000000000000000000000004000")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn retries_throttled_requests() {
        let mut inner = MockCharacterProvider::new();
        let mut calls = 0;
        inner.expect_fetch_character().times(2).returning(move |seed| {
            calls += 1;
            if calls == 1 {
                Err(UpstreamError::rejected("sloot", 429, "429 slow down"))
            } else {
                Ok(character(seed, 1))
            }
        });

        let provider = ResilientCharacterProvider::new(Arc::new(inner), fast_config(1));
        assert!(provider.fetch_character("0xabc").await.is_ok());
    }

    #[test]
    fn delay_grows_exponentially_and_caps() {
        let provider = ResilientCharacterProvider::new(
            Arc::new(MockCharacterProvider::new()),
            RetryConfig {
                max_retries: 5,
                base_delay_ms: 100,
                max_delay_ms: 350,
                jitter_factor: 0.0,
            },
        );

        assert_eq!(provider.calculate_delay(1), 100);
        assert_eq!(provider.calculate_delay(2), 200);
        assert_eq!(provider.calculate_delay(3), 350);
    }
}
