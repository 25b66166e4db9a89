//! Rotation clock.
//!
//! A cancellable periodic task that emits [`RotationTick`]s while autoplay is
//! on. Every start opens a new generation; ticks left in the channel by an
//! older generation are rejected, so nothing queued before a pause can move
//! the ring afterwards.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, trace};

/// A single rotation step request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationTick {
    /// Clock generation that produced this tick.
    pub generation: u64,
}

#[derive(Debug)]
struct RotationTask {
    cancel_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// Owner of the periodic rotation task.
#[derive(Debug)]
pub struct Rotator {
    tx: mpsc::UnboundedSender<RotationTick>,
    rx: mpsc::UnboundedReceiver<RotationTick>,
    generation: u64,
    task: Option<RotationTask>,
}

impl Default for Rotator {
    fn default() -> Self {
        Self::new()
    }
}

impl Rotator {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            generation: 0,
            task: None,
        }
    }

    /// Whether the periodic task is running.
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Current clock generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start emitting a tick every `period`, the first one a full period from now.
    ///
    /// Must be called from within a tokio runtime. Returns `false` if the clock
    /// was already running.
    pub fn start(&mut self, period: Duration) -> bool {
        if self.task.is_some() {
            return false;
        }

        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut cancel_rx => break,
                    _ = interval.tick() => {
                        if tx.send(RotationTick { generation }).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        debug!(generation, period_ms = period.as_millis(), "rotation clock started");
        self.task = Some(RotationTask { cancel_tx, handle });
        true
    }

    /// Cancel the periodic task. Returns `false` if it was not running.
    pub fn stop(&mut self) -> bool {
        let Some(task) = self.task.take() else {
            return false;
        };
        let _ = task.cancel_tx.send(());
        task.handle.abort();
        debug!(generation = self.generation, "rotation clock stopped");
        true
    }

    /// Whether `tick` belongs to the running generation.
    pub fn accepts(&self, tick: RotationTick) -> bool {
        self.task.is_some() && tick.generation == self.generation
    }

    /// Wait for the next tick of the running generation.
    ///
    /// Stale ticks are dropped. Pending forever while the clock is stopped,
    /// which makes it safe to use as a `select!` branch.
    pub async fn next(&mut self) -> RotationTick {
        loop {
            if let Some(tick) = self.rx.recv().await {
                if self.accepts(tick) {
                    return tick;
                }
                trace!(
                    stale = tick.generation,
                    current = self.generation,
                    "dropped stale rotation tick"
                );
            }
        }
    }
}

impl Drop for Rotator {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    const PERIOD: Duration = Duration::from_millis(50);

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let mut rotator = Rotator::new();
        let started = Instant::now();
        assert!(rotator.start(PERIOD));

        let tick = rotator.next().await;
        assert_eq!(tick.generation, 1);
        assert_eq!(started.elapsed(), PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_repeat() {
        let mut rotator = Rotator::new();
        let started = Instant::now();
        rotator.start(PERIOD);

        for _ in 0..3 {
            rotator.next().await;
        }
        assert_eq!(started.elapsed(), PERIOD * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_is_noop() {
        let mut rotator = Rotator::new();
        assert!(rotator.start(PERIOD));
        assert!(!rotator.start(PERIOD));
        assert_eq!(rotator.generation(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_clock_is_silent() {
        let mut rotator = Rotator::new();
        rotator.start(PERIOD);
        rotator.next().await;

        assert!(rotator.stop());
        assert!(!rotator.is_running());
        assert!(!rotator.stop());

        let waited = timeout(Duration::from_secs(5), rotator.next()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_ticks_rejected() {
        let mut rotator = Rotator::new();
        rotator.start(PERIOD);
        let old = rotator.next().await;

        rotator.stop();
        assert!(!rotator.accepts(old));

        rotator.start(PERIOD);
        assert!(!rotator.accepts(old));
        let fresh = rotator.next().await;
        assert_eq!(fresh.generation, 2);
        assert!(rotator.accepts(fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_ticks_dropped_after_restart() {
        let mut rotator = Rotator::new();
        rotator.start(PERIOD);

        // Let several ticks pile up in the channel without reading them.
        tokio::time::sleep(PERIOD * 4 + Duration::from_millis(1)).await;
        rotator.stop();

        let restarted = Instant::now();
        rotator.start(PERIOD);
        let tick = rotator.next().await;
        assert_eq!(tick.generation, 2);
        assert_eq!(restarted.elapsed(), PERIOD);
    }
}
