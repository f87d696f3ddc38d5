use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::{Instant, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub const CAROUSEL_INTERVAL: Duration = Duration::from_secs(10);

/// Auto-advancing slide index for image carousels.
///
/// Clones share the same index, so one clone can run the timer while another
/// reads or moves the position.
#[derive(Debug, Clone)]
pub struct CarouselAutoAdvance {
    index: Arc<AtomicUsize>,
    slide_count: usize,
    period: Duration,
}

impl CarouselAutoAdvance {
    pub fn new(slide_count: usize) -> Self {
        Self {
            index: Arc::new(AtomicUsize::new(0)),
            slide_count,
            period: CAROUSEL_INTERVAL,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn current(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn is_at_end(&self) -> bool {
        self.current() + 1 >= self.slide_count
    }

    /// Jumps to `index`, clamped to the last slide.
    pub fn go_to(&self, index: usize) {
        let last = self.slide_count.saturating_sub(1);
        self.index.store(index.min(last), Ordering::SeqCst);
    }

    /// Moves one slide forward unless another clone already reached the end.
    fn step_forward(&self) -> Option<usize> {
        let last = self.slide_count.saturating_sub(1);
        self.index
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |i| (i < last).then_some(i + 1))
            .ok()
            .map(|previous| previous + 1)
    }

    /// Advances one slide per period until the last slide or cancellation.
    /// Returns the final index.
    pub async fn run<F>(&self, token: CancellationToken, mut on_advance: F) -> usize
    where
        F: FnMut(usize) + Send,
    {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        while !self.is_at_end() {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    let Some(next) = self.step_forward() else {
                        break;
                    };
                    debug!(slide = next, of = self.slide_count, "Carousel advanced");
                    on_advance(next);
                }
            }
        }
        self.current()
    }
}
