//! Engine lifecycle: couples the state machine with the rotation clock.
//!
//! The clock runs exactly while the controller is mounted and the engine is
//! rotating. Every transition that pauses autoplay stops the clock; every
//! transition that resumes it starts a fresh generation.

use tracing::{debug, info};

use crate::engine::{OrbitalEngine, Transition};
use crate::hit::{hit_test, HitTarget};
use crate::item::ItemId;
use crate::rotator::{RotationTick, Rotator};

/// Mounted instance of the orbital engine.
#[derive(Debug)]
pub struct OrbitalController {
    engine: OrbitalEngine,
    rotator: Rotator,
    mounted: bool,
}

impl OrbitalController {
    pub fn new(engine: OrbitalEngine) -> Self {
        Self {
            engine,
            rotator: Rotator::new(),
            mounted: false,
        }
    }

    pub fn engine(&self) -> &OrbitalEngine {
        &self.engine
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether the rotation clock is currently running.
    pub fn clock_running(&self) -> bool {
        self.rotator.is_running()
    }

    /// Start the lifecycle. Must be called from within a tokio runtime.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        info!(items = self.engine.items().len(), "orbit mounted");
        self.sync_clock();
    }

    /// End the lifecycle and cancel the clock.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.rotator.stop();
        info!(angle = self.engine.angle(), "orbit unmounted");
    }

    pub fn toggle_expansion(&mut self, id: ItemId) -> Transition {
        let transition = self.engine.toggle_expansion(id);
        self.apply(transition)
    }

    pub fn clear_focus(&mut self) -> Transition {
        let transition = self.engine.clear_focus();
        self.apply(transition)
    }

    /// Dispatch a resolved click to the matching handler.
    pub fn click(&mut self, target: HitTarget) -> Transition {
        match target {
            HitTarget::Item(id) => self.toggle_expansion(id),
            HitTarget::Background => self.clear_focus(),
        }
    }

    /// Resolve a press at `(x, y)` in layout units and dispatch it.
    pub fn click_at(&mut self, x: f64, y: f64) -> (HitTarget, Transition) {
        let target = self.hit(x, y);
        (target, self.click(target))
    }

    /// Resolve a press at `(x, y)` without dispatching it.
    pub fn hit(&self, x: f64, y: f64) -> HitTarget {
        hit_test(
            &self.engine.nodes(),
            x,
            y,
            self.engine.config().hit_radius,
        )
    }

    /// Apply a rotation tick. Ticks from a cancelled generation are ignored.
    pub fn on_tick(&mut self, tick: RotationTick) -> bool {
        if !self.mounted || !self.rotator.accepts(tick) {
            return false;
        }
        self.engine.tick()
    }

    /// Wait for the next tick of the running clock.
    pub async fn next_tick(&mut self) -> RotationTick {
        self.rotator.next().await
    }

    fn apply(&mut self, transition: Transition) -> Transition {
        if transition.pauses() || transition.resumes() {
            self.sync_clock();
        }
        transition
    }

    fn sync_clock(&mut self) {
        if !self.mounted {
            return;
        }
        if self.engine.auto_rotate() {
            if self.rotator.start(self.engine.config().tick_interval()) {
                debug!(angle = self.engine.angle(), "autoplay resumed");
            }
        } else if self.rotator.stop() {
            debug!(angle = self.engine.angle(), "autoplay paused");
        }
    }
}

impl Drop for OrbitalController {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrbitalConfig;
    use crate::geometry::advance_angle;
    use crate::item::default_services;
    use std::time::Duration;
    use tokio::time::{timeout, Instant};

    fn controller() -> OrbitalController {
        OrbitalController::new(OrbitalEngine::new(
            default_services(),
            OrbitalConfig::default(),
        )
        .unwrap())
    }

    async fn run_ticks(controller: &mut OrbitalController, count: usize) {
        for _ in 0..count {
            let tick = controller.next_tick().await;
            controller.on_tick(tick);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_starts_clock() {
        let mut controller = controller();
        assert!(!controller.clock_running());

        controller.mount();
        assert!(controller.is_mounted());
        assert!(controller.clock_running());

        run_ticks(&mut controller, 4).await;
        assert!((controller.engine().angle() - 1.2).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_stops_clock() {
        let mut controller = controller();
        controller.mount();
        run_ticks(&mut controller, 2).await;

        let t = controller.toggle_expansion(ItemId(2));
        assert!(t.pauses());
        assert!(!controller.clock_running());

        let angle = controller.engine().angle();
        let waited = timeout(Duration::from_secs(2), controller.next_tick()).await;
        assert!(waited.is_err());
        assert!((controller.engine().angle() - angle).abs() < f64::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn test_switching_focus_keeps_clock_stopped() {
        let mut controller = controller();
        controller.mount();
        controller.toggle_expansion(ItemId(1));
        controller.toggle_expansion(ItemId(5));
        assert!(!controller.clock_running());
        assert!(controller.engine().is_expanded(ItemId(5)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_then_one_interval_advances_one_step() {
        let mut controller = controller();
        controller.mount();
        run_ticks(&mut controller, 3).await;

        controller.click(HitTarget::Item(ItemId(1)));
        assert!(!controller.engine().auto_rotate());

        controller.click(HitTarget::Background);
        let cleared_at = controller.engine().angle();
        let cleared = Instant::now();
        assert!(controller.engine().auto_rotate());
        assert!(controller.clock_running());

        run_ticks(&mut controller, 1).await;
        assert_eq!(cleared.elapsed(), Duration::from_millis(50));
        assert!(controller.engine().auto_rotate());
        let expected = advance_angle(cleared_at, 0.3, 3);
        assert!((controller.engine().angle() - expected).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_tick_ignored_after_pause() {
        let mut controller = controller();
        controller.mount();
        let tick = controller.next_tick().await;

        controller.toggle_expansion(ItemId(3));
        assert!(!controller.on_tick(tick));

        controller.toggle_expansion(ItemId(3));
        assert!(!controller.on_tick(tick));
        assert!(controller.engine().angle().abs() < f64::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_cancels_clock() {
        let mut controller = controller();
        controller.mount();
        let tick = controller.next_tick().await;

        controller.unmount();
        assert!(!controller.clock_running());
        assert!(!controller.on_tick(tick));

        let waited = timeout(Duration::from_secs(2), controller.next_tick()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_at_resolves_single_target() {
        let mut controller = controller();
        controller.mount();

        let (target, t) = controller.click_at(280.0, 0.0);
        assert_eq!(target, HitTarget::Item(ItemId(1)));
        assert!(t.pauses());
        // The background handler did not run in the same dispatch.
        assert!(controller.engine().is_expanded(ItemId(1)));

        let (target, t) = controller.click_at(0.0, 0.0);
        assert_eq!(target, HitTarget::Background);
        assert!(t.resumes());
        assert!(controller.clock_running());
    }

    #[test]
    fn test_unmounted_controller_has_no_clock() {
        let mut controller = controller();
        controller.toggle_expansion(ItemId(1));
        controller.clear_focus();
        assert!(!controller.clock_running());
    }
}
