//! Cancellable retry while the service reports busy

use dwiz_errors::Error;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Run `op` until it stops failing with a service-busy error
///
/// Busy answers are retried after a fixed `delay`, without an attempt limit.
/// Any other result, success or error, is returned as is. Cancelling `cancel`
/// ends the loop with `Error::Cancelled`, also while a request is in flight.
///
/// # Errors
///
/// Returns the first non-busy error of `op`, or `Error::Cancelled`.
pub async fn retry_while_busy<T, F, Fut>(
    delay: Duration,
    cancel: &CancellationToken,
    op: F,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    retry_while_busy_with(delay, cancel, |_| {}, op).await
}

/// Like [`retry_while_busy`], calling `on_retry` with the attempt number
/// before each wait
///
/// # Errors
///
/// Returns the first non-busy error of `op`, or `Error::Cancelled`.
pub async fn retry_while_busy_with<T, F, Fut, R>(
    delay: Duration,
    cancel: &CancellationToken,
    mut on_retry: R,
    mut op: F,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
    R: FnMut(u32),
{
    let mut attempt: u32 = 0;
    loop {
        attempt = attempt.saturating_add(1);

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Error::Cancelled),
            result = op() => result,
        };

        match result {
            Err(err) if err.is_service_busy() => {
                tracing::debug!(attempt, delay_ms = delay.as_millis(), "service busy, retrying");
                on_retry(attempt);
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => return Err(Error::Cancelled),
                    () = tokio::time::sleep(delay) => {}
                }
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwiz_errors::NetworkError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn busy() -> Error {
        NetworkError::ServiceBusy {
            url: "http://127.0.0.1/api/v1/mirrors".to_string(),
        }
        .into()
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_ready() {
        let calls = Arc::new(AtomicU32::new(0));
        let cancel = CancellationToken::new();
        let started = tokio::time::Instant::now();

        let counter = calls.clone();
        let result = retry_while_busy(Duration::from_secs(1), &cancel, || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 3 {
                    Err(busy())
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let cancel = CancellationToken::new();

        let result: Result<(), Error> = retry_while_busy(Duration::from_secs(1), &cancel, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(NetworkError::HttpError {
                    status: 500,
                    message: "boom".to_string(),
                }
                .into())
            }
        })
        .await;

        assert!(matches!(result, Err(Error::Network(NetworkError::HttpError { .. }))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_the_loop() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            trigger.cancel();
        });

        let mut attempts = Vec::new();
        let result: Result<(), Error> = retry_while_busy_with(
            Duration::from_secs(1),
            &cancel,
            |attempt| attempts.push(attempt),
            || async { Err(busy()) },
        )
        .await;

        assert!(matches!(result, Err(Error::Cancelled)));
        assert_eq!(attempts, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_already_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = retry_while_busy(Duration::from_secs(1), &cancel, || async { Ok(1) }).await;
        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
