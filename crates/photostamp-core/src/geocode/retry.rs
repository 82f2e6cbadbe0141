//! Bounded retry for transient geocoding failures.
//!
//! Provides classification of retryable errors, exponential backoff, and
//! the retry loop the processor wraps around each geocoding call. The
//! attempt budget comes from config; exhausting it surfaces
//! [`PipelineError::GeocodeExhausted`] rather than looping forever.

use std::time::Duration;

use crate::config::GeocodeConfig;
use crate::error::PipelineError;

use super::{AddressComponents, ReverseGeocoder};

/// Determine whether a pipeline error is worth retrying.
///
/// Retryable: timeouts, rate limits (429), server errors (5xx), and
/// connection-level failures. Non-retryable: client errors and everything
/// outside the geocoding stage.
pub fn is_retryable(error: &PipelineError) -> bool {
    match error {
        PipelineError::Geocode {
            status_code,
            message,
        } => {
            // Classify by HTTP status code when available (structured)
            if let Some(code) = status_code {
                return *code == 429 || (500..=599).contains(code);
            }
            // Fallback for non-HTTP errors (e.g., connection refused, DNS failure)
            message.contains("timed out") || message.contains("connect")
        }
        _ => false,
    }
}

/// Calculate exponential backoff duration for a given attempt.
///
/// Uses `base_delay * 2^attempt` with a cap at 30 seconds.
pub fn backoff_duration(attempt: u32, base_delay_ms: u64) -> Duration {
    let delay = base_delay_ms.saturating_mul(2u64.saturating_pow(attempt));
    Duration::from_millis(delay.min(30_000))
}

/// Call `geocoder.reverse` with up to `config.retry_attempts` attempts,
/// sleeping an exponential backoff between transient failures.
///
/// A non-retryable error is returned immediately; a transient error on the
/// final attempt becomes [`PipelineError::GeocodeExhausted`].
pub async fn reverse_with_retry(
    geocoder: &dyn ReverseGeocoder,
    latitude: f64,
    longitude: f64,
    config: &GeocodeConfig,
) -> Result<AddressComponents, PipelineError> {
    for attempt in 0..config.retry_attempts {
        match geocoder.reverse(latitude, longitude).await {
            Ok(address) => return Ok(address),
            Err(err) if is_retryable(&err) => {
                tracing::warn!(
                    backend = geocoder.name(),
                    attempt = attempt + 1,
                    max_attempts = config.retry_attempts,
                    error = %err,
                    "transient geocoding failure"
                );
                if attempt + 1 < config.retry_attempts {
                    tokio::time::sleep(backoff_duration(attempt, config.retry_base_delay_ms))
                        .await;
                }
            }
            Err(err) => return Err(err),
        }
    }
    Err(PipelineError::GeocodeExhausted {
        attempts: config.retry_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn geocode_err(status_code: Option<u16>, message: &str) -> PipelineError {
        PipelineError::Geocode {
            message: message.to_string(),
            status_code,
        }
    }

    #[test]
    fn test_rate_limit_is_retryable() {
        assert!(is_retryable(&geocode_err(Some(429), "HTTP 429")));
    }

    #[test]
    fn test_server_error_is_retryable() {
        assert!(is_retryable(&geocode_err(Some(503), "HTTP 503")));
    }

    #[test]
    fn test_client_error_not_retryable() {
        assert!(!is_retryable(&geocode_err(Some(404), "HTTP 404")));
    }

    #[test]
    fn test_timeout_retryable_without_status() {
        assert!(is_retryable(&geocode_err(None, "request timed out")));
        assert!(is_retryable(&geocode_err(None, "failed to connect to host")));
    }

    #[test]
    fn test_parse_failure_not_retryable() {
        assert!(!is_retryable(&geocode_err(
            None,
            "failed to parse geocoder response"
        )));
    }

    #[test]
    fn test_other_stages_not_retryable() {
        let err = PipelineError::Font("no font".into());
        assert!(!is_retryable(&err));
    }

    #[test]
    fn test_backoff_exponential() {
        assert_eq!(backoff_duration(0, 1000), Duration::from_millis(1000));
        assert_eq!(backoff_duration(1, 1000), Duration::from_millis(2000));
        assert_eq!(backoff_duration(2, 1000), Duration::from_millis(4000));
    }

    #[test]
    fn test_backoff_capped_at_30s() {
        assert_eq!(backoff_duration(10, 1000), Duration::from_millis(30_000));
    }

    /// Fails with a transient 503 the first `failures` calls, then succeeds.
    struct FlakyGeocoder {
        failures: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl ReverseGeocoder for FlakyGeocoder {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn reverse(&self, _: f64, _: f64) -> Result<AddressComponents, PipelineError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(geocode_err(Some(503), "HTTP 503"))
            } else {
                let mut addr = AddressComponents::new();
                addr.insert("city".to_string(), "Springfield".to_string());
                Ok(addr)
            }
        }
    }

    /// Always fails with a permanent 404.
    struct PermanentFailure {
        calls: AtomicU32,
    }

    #[async_trait]
    impl ReverseGeocoder for PermanentFailure {
        fn name(&self) -> &str {
            "permanent"
        }

        async fn reverse(&self, _: f64, _: f64) -> Result<AddressComponents, PipelineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(geocode_err(Some(404), "HTTP 404"))
        }
    }

    fn fast_config(attempts: u32) -> GeocodeConfig {
        GeocodeConfig {
            retry_attempts: attempts,
            retry_base_delay_ms: 1,
            ..GeocodeConfig::default()
        }
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_failure() {
        let geocoder = FlakyGeocoder {
            failures: 2,
            calls: AtomicU32::new(0),
        };
        let address = reverse_with_retry(&geocoder, 1.0, 2.0, &fast_config(3))
            .await
            .unwrap();
        assert_eq!(address.get("city").map(String::as_str), Some("Springfield"));
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_exhaustion() {
        let geocoder = FlakyGeocoder {
            failures: 10,
            calls: AtomicU32::new(0),
        };
        let err = reverse_with_retry(&geocoder, 1.0, 2.0, &fast_config(2))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::GeocodeExhausted { attempts: 2 }
        ));
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_permanent_failure_not_retried() {
        let geocoder = PermanentFailure {
            calls: AtomicU32::new(0),
        };
        let err = reverse_with_retry(&geocoder, 1.0, 2.0, &fast_config(3))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Geocode {
                status_code: Some(404),
                ..
            }
        ));
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }
}
