// src/fetch/http.rs
// =============================================================================
// Time-boxed HTTP GET requests.
//
// How the time box works:
// 1. The transfer (connect, headers, body) runs in its own tokio task
// 2. The caller races that task against a deadline
// 3. Whoever loses is dropped: on timeout the transfer task is aborted, so a
//    hanging or slow-dripping server can't keep a task alive or hand back a
//    result after the caller has moved on
//
// The abort also happens if the caller itself is cancelled mid-fetch.
// =============================================================================

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use std::future::Future;
use std::time::Duration;
use tokio::task::AbortHandle;
use tracing::trace;

use super::{Fetcher, Page};
use crate::error::FetchError;

/// Sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_5) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/101.0.4951.64 Safari/537.36";

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, limit: Duration) -> Result<Page, FetchError> {
        let request = self.client.get(url).timeout(limit);
        let result = race_deadline(download(request, limit), limit).await;
        if matches!(result, Err(FetchError::Timeout(_))) {
            trace!(url, "fetch deadline passed, transfer abandoned");
        }
        result
    }
}

/// Runs `transfer` in its own task and waits at most `limit` for it. The task
/// is aborted when this returns or is dropped, whichever comes first.
async fn race_deadline<F, T>(transfer: F, limit: Duration) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>> + Send + 'static,
    T: Send + 'static,
{
    let mut transfer = tokio::spawn(transfer);
    let _abort = AbortOnDrop(transfer.abort_handle());

    match tokio::time::timeout(limit, &mut transfer).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(FetchError::TransportFailure(join_error.to_string())),
        Err(_) => Err(FetchError::Timeout(limit)),
    }
}

// Aborting an already finished task is a no-op.
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn download(request: RequestBuilder, limit: Duration) -> Result<Page, FetchError> {
    let response = request
        .send()
        .await
        .map_err(|e| categorize_error(e, limit))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::NonSuccessStatus(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let body = response
        .bytes()
        .await
        .map_err(|e| categorize_error(e, limit))?;

    Ok(Page {
        body: body.to_vec(),
        content_type,
    })
}

fn categorize_error(error: reqwest::Error, limit: Duration) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(limit)
    } else {
        FetchError::TransportFailure(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    // Never finishes; `dropped` resolves with an error once it is torn down
    fn endless_transfer() -> (
        impl Future<Output = Result<(), FetchError>> + Send + 'static,
        oneshot::Receiver<()>,
    ) {
        let (alive, dropped) = oneshot::channel::<()>();
        let transfer = async move {
            let _alive = alive;
            std::future::pending::<()>().await;
            Ok(())
        };
        (transfer, dropped)
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_aborts_the_transfer() {
        let (transfer, dropped) = endless_transfer();

        let result = race_deadline(transfer, Duration::from_millis(100)).await;
        assert!(matches!(result, Err(FetchError::Timeout(_))));

        let teardown = tokio::time::timeout(Duration::from_secs(1), dropped)
            .await
            .expect("transfer task should be dropped after the deadline");
        assert!(teardown.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_caller_aborts_the_transfer() {
        let (transfer, dropped) = endless_transfer();

        let caller = tokio::spawn(race_deadline(transfer, Duration::from_secs(3600)));
        tokio::task::yield_now().await;
        caller.abort();

        let teardown = tokio::time::timeout(Duration::from_secs(1), dropped)
            .await
            .expect("transfer task should be dropped with its caller");
        assert!(teardown.is_err());
    }

    #[tokio::test]
    async fn test_transfer_finishing_in_time_wins() {
        let result = race_deadline(async { Ok(7) }, Duration::from_secs(1)).await;
        assert_eq!(result.unwrap(), 7);

        let result: Result<(), _> = race_deadline(
            async { Err(FetchError::NonSuccessStatus(503)) },
            Duration::from_secs(1),
        )
        .await;
        assert!(matches!(result, Err(FetchError::NonSuccessStatus(503))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_failure() {
        let fetcher = HttpFetcher::new().unwrap();
        // Port 9 (discard) on localhost is closed on any sane test machine
        let result = fetcher
            .fetch("http://127.0.0.1:9/", Duration::from_secs(5))
            .await;
        assert!(matches!(
            result,
            Err(FetchError::TransportFailure(_)) | Err(FetchError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_url_is_transport_failure() {
        let fetcher = HttpFetcher::new().unwrap();
        let result = fetcher.fetch("not a url", Duration::from_secs(1)).await;
        assert!(matches!(result, Err(FetchError::TransportFailure(_))));
    }
}
