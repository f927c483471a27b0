//! Certificate fallback policy.
//!
//! One strict attempt, then at most one relaxed attempt when the first
//! failure is classified as a certificate fault. Not a retry loop.

use crate::ports::tool_caller::ToolCallError;
use std::fmt::Display;
use std::future::Future;
use tracing::warn;

/// Errors that can say whether they are a certificate/trust failure.
pub trait CertificateFault {
    fn is_certificate_failure(&self) -> bool;
}

impl CertificateFault for ToolCallError {
    fn is_certificate_failure(&self) -> bool {
        ToolCallError::is_certificate_failure(self)
    }
}

/// Run `call`; on a certificate fault run `retry_with` once and return its
/// outcome as final. Any other failure is returned unchanged.
pub async fn with_cert_fallback<T, E, C, CF, R, RF>(call: C, retry_with: R) -> Result<T, E>
where
    E: CertificateFault + Display,
    C: FnOnce() -> CF,
    CF: Future<Output = Result<T, E>>,
    R: FnOnce() -> RF,
    RF: Future<Output = Result<T, E>>,
{
    match call().await {
        Err(e) if e.is_certificate_failure() => {
            warn!(error = %e, "Certificate validation failed, retrying with relaxed verification");
            retry_with().await
        }
        outcome => outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn attempt(
        counter: &AtomicUsize,
        outcome: Result<&'static str, ToolCallError>,
    ) -> Result<&'static str, ToolCallError> {
        counter.fetch_add(1, Ordering::SeqCst);
        outcome
    }

    #[tokio::test]
    async fn test_success_skips_retry() {
        let strict = AtomicUsize::new(0);
        let relaxed = AtomicUsize::new(0);

        let result = with_cert_fallback(
            || attempt(&strict, Ok("page")),
            || attempt(&relaxed, Ok("relaxed page")),
        )
        .await;

        assert_eq!(result.unwrap(), "page");
        assert_eq!(strict.load(Ordering::SeqCst), 1);
        assert_eq!(relaxed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_certificate_fault_retries_once() {
        let strict = AtomicUsize::new(0);
        let relaxed = AtomicUsize::new(0);

        let result = with_cert_fallback(
            || attempt(&strict, Err(ToolCallError::certificate("fetch_url", "expired"))),
            || attempt(&relaxed, Ok("relaxed page")),
        )
        .await;

        assert_eq!(result.unwrap(), "relaxed page");
        assert_eq!(strict.load(Ordering::SeqCst), 1);
        assert_eq!(relaxed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_failure_is_final() {
        let relaxed = AtomicUsize::new(0);

        let result = with_cert_fallback(
            || async { Err::<&str, _>(ToolCallError::certificate("fetch_url", "expired")) },
            || attempt(&relaxed, Err(ToolCallError::certificate("fetch_url", "still bad"))),
        )
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.message(), "still bad");
        assert_eq!(relaxed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_other_faults_propagate_without_retry() {
        let relaxed = AtomicUsize::new(0);

        let result = with_cert_fallback(
            || async { Err::<&str, _>(ToolCallError::unreachable("fetch_url", "refused")) },
            || attempt(&relaxed, Ok("unused")),
        )
        .await;

        assert!(!result.unwrap_err().is_certificate_failure());
        assert_eq!(relaxed.load(Ordering::SeqCst), 0);
    }
}
