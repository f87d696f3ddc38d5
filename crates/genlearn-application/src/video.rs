use genlearn_core::media::{VideoGateway, VideoStatus};
use genlearn_core::{GenlearnError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub const VIDEO_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Polls a cycle's video until it is ready, has failed, or the caller gives up.
pub struct VideoStatusPoller {
    gateway: Arc<dyn VideoGateway>,
    period: Duration,
}

impl VideoStatusPoller {
    pub fn new(gateway: Arc<dyn VideoGateway>) -> Self {
        Self {
            gateway,
            period: VIDEO_POLL_INTERVAL,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Polls immediately, then every period. `on_update` sees every status
    /// received. Returns the terminal status.
    ///
    /// An in-flight status request is dropped as soon as `token` fires.
    ///
    /// Retryable errors (network, 5xx) are logged and the next tick tries
    /// again; anything else ends polling with that error. Cancellation ends it
    /// with [`GenlearnError::Cancelled`].
    pub async fn poll_until_done<F>(
        &self,
        session_id: &str,
        cycle_number: u32,
        token: CancellationToken,
        mut on_update: F,
    ) -> Result<VideoStatus>
    where
        F: FnMut(&VideoStatus) + Send,
    {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let cancelled = || -> Result<VideoStatus> {
            debug!(session_id, cycle_number, "Video polling cancelled");
            Err(GenlearnError::Cancelled("video status polling".into()))
        };

        loop {
            tokio::select! {
                _ = token.cancelled() => return cancelled(),
                _ = ticker.tick() => {}
            }

            let fetched = tokio::select! {
                _ = token.cancelled() => return cancelled(),
                fetched = self.gateway.video_status(session_id, cycle_number) => fetched,
            };
            let status = match fetched {
                Ok(status) => status,
                Err(e) if e.is_retryable() => {
                    warn!(
                        session_id,
                        cycle_number,
                        error = %e,
                        "Video status check failed; retrying"
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };

            on_update(&status);
            if status.status.is_terminal() {
                info!(session_id, cycle_number, state = %status.status, "Video finished");
                return Ok(status);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use genlearn_core::media::VideoState;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedVideo {
        script: Mutex<Vec<Result<VideoState>>>,
        calls: AtomicUsize,
    }

    impl ScriptedVideo {
        fn new(mut script: Vec<Result<VideoState>>) -> Self {
            script.reverse();
            Self {
                script: Mutex::new(script),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl VideoGateway for ScriptedVideo {
        async fn video_status(&self, session_id: &str, cycle_number: u32) -> Result<VideoStatus> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self
                .script
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Ok(VideoState::Generating));
            next.map(|status| VideoStatus {
                session_id: session_id.into(),
                cycle_number,
                status,
                video_url: (status == VideoState::Ready).then(|| "/media/v1.mp4".to_string()),
                progress_percent: None,
                error_message: None,
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_until_ready() {
        let gateway = Arc::new(ScriptedVideo::new(vec![
            Ok(VideoState::NotStarted),
            Ok(VideoState::Generating),
            Err(GenlearnError::Network("reset".into())),
            Ok(VideoState::Ready),
        ]));
        let poller = VideoStatusPoller::new(gateway.clone());

        let mut seen = Vec::new();
        let started = tokio::time::Instant::now();
        let status = poller
            .poll_until_done("SES1", 1, CancellationToken::new(), |s| seen.push(s.status))
            .await
            .unwrap();

        assert_eq!(status.status, VideoState::Ready);
        assert_eq!(
            seen,
            vec![VideoState::NotStarted, VideoState::Generating, VideoState::Ready]
        );
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 4);
        assert_eq!(started.elapsed(), VIDEO_POLL_INTERVAL * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_state_is_terminal() {
        let gateway = Arc::new(ScriptedVideo::new(vec![Ok(VideoState::Failed)]));
        let status = VideoStatusPoller::new(gateway)
            .poll_until_done("SES1", 2, CancellationToken::new(), |_| {})
            .await
            .unwrap();
        assert_eq!(status.status, VideoState::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_stops_polling() {
        let gateway = Arc::new(ScriptedVideo::new(vec![]));
        let token = CancellationToken::new();
        let poller = VideoStatusPoller::new(gateway.clone());

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(7)).await;
            canceller.cancel();
        });

        let err = poller
            .poll_until_done("SES1", 1, token, |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, GenlearnError::Cancelled(_)));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 3);
    }

    struct HangingVideo;

    #[async_trait]
    impl VideoGateway for HangingVideo {
        async fn video_status(&self, _session_id: &str, _cycle_number: u32) -> Result<VideoStatus> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_interrupts_a_hanging_request() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            canceller.cancel();
        });

        let started = tokio::time::Instant::now();
        let err = VideoStatusPoller::new(Arc::new(HangingVideo))
            .poll_until_done("SES1", 1, token, |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, GenlearnError::Cancelled(_)));
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_client_errors_end_polling() {
        let gateway = Arc::new(ScriptedVideo::new(vec![Err(GenlearnError::Api {
            status: 404,
            message: "Video not found".into(),
        })]));
        let err = VideoStatusPoller::new(gateway)
            .poll_until_done("SES1", 9, CancellationToken::new(), |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, GenlearnError::Api { status: 404, .. }));
    }
}
