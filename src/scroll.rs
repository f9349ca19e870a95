//! The scroll-to-scene animation coordinator.
//!
//! [`ScrollCoordinator`] is the control center of the showcase: it maps the
//! continuous page scroll offset to a discrete section index (emitting a
//! one-shot [`RotationImpulse`] on every transition) and to the camera's
//! vertical position, and it smooths the cursor-driven parallax offset of the
//! camera rig.
//!
//! The two camera axes are deliberately asymmetric: vertical position tracks
//! scroll exactly with no lag, while the parallax offset approaches its
//! target with a first-order smoothing step. Collapsing both to the same
//! update rule changes the felt interaction.
//!
//! All state lives on the coordinator instance; input callbacks and the
//! per-frame [`tick`](ScrollCoordinator::tick) run on one thread and never
//! interleave.
//!
//! # Example
//!
//! ```
//! use triptych::{ScrollConfig, ScrollCoordinator};
//!
//! let mut coordinator = ScrollCoordinator::new(ScrollConfig::default(), 800.0);
//!
//! // Scrolling into the second section fires exactly one impulse.
//! let impulse = coordinator.on_scroll(850.0).expect("section changed");
//! assert_eq!(impulse.section, 1);
//! assert!(coordinator.on_scroll(850.0).is_none());
//!
//! // Each frame produces the camera placement to apply to the scene.
//! let frame = coordinator.tick(0.016);
//! assert_eq!(frame.camera_y, -850.0 / 800.0 * 4.0);
//! ```

use glam::{Vec2, Vec3};

use crate::tween::{Easing, RotationImpulse};

/// Configuration constants for the scroll coordinator.
///
/// The defaults reproduce the showcase layout: three sections, one viewport
/// of scroll and four world units of depth per section.
#[derive(Clone, Copy, Debug)]
pub struct ScrollConfig {
    /// Number of page sections. Scroll-derived indices outside
    /// `[0, section_count - 1]` are clamped.
    pub section_count: usize,
    /// Vertical spacing between consecutive section anchors, in world units.
    pub section_distance: f32,
    /// Scale applied to the normalized cursor to get the parallax target.
    pub parallax_amplitude: f32,
    /// Per-second convergence rate of the parallax smoothing step.
    pub parallax_smoothing: f32,
    /// Relative rotation a section mesh receives on entry, radians per axis.
    pub impulse_delta: Vec3,
    /// Duration of the entry rotation animation in seconds.
    pub impulse_duration: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            section_count: 3,
            section_distance: 4.0,
            parallax_amplitude: 0.3,
            parallax_smoothing: 5.0,
            impulse_delta: Vec3::new(6.0, 3.0, 1.5),
            impulse_duration: 1.5,
        }
    }
}

impl ScrollConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of sections.
    pub fn section_count(mut self, count: usize) -> Self {
        self.section_count = count.max(1);
        self
    }

    /// Set the world-unit spacing between section anchors.
    pub fn section_distance(mut self, distance: f32) -> Self {
        self.section_distance = distance;
        self
    }

    /// Set the parallax amplitude and smoothing rate.
    pub fn parallax(mut self, amplitude: f32, smoothing: f32) -> Self {
        self.parallax_amplitude = amplitude;
        self.parallax_smoothing = smoothing;
        self
    }

    /// Set the rotation delta and duration of the section-entry impulse.
    pub fn impulse(mut self, delta: Vec3, duration: f32) -> Self {
        self.impulse_delta = delta;
        self.impulse_duration = duration;
        self
    }

    /// Total scrollable range in pixels for a given viewport height.
    pub fn max_scroll(&self, viewport_height: f32) -> f32 {
        (self.section_count.saturating_sub(1)) as f32 * viewport_height
    }
}

/// Per-frame camera placement produced by [`ScrollCoordinator::tick`].
///
/// The caller applies this to the actual scene-graph nodes: `camera_y` moves
/// the camera inside the rig, `rig_offset` moves the rig itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFrame {
    /// Scroll-driven vertical camera position, world units. Unsmoothed.
    pub camera_y: f32,
    /// Smoothed parallax offset of the camera rig, world units.
    pub rig_offset: Vec2,
}

/// Maps scroll position and cursor movement to camera motion and
/// section-entry rotation impulses.
pub struct ScrollCoordinator {
    config: ScrollConfig,
    viewport_height: f32,
    scroll_px: f32,
    cursor: Vec2,
    rig_offset: Vec2,
    current_section: usize,
    last_time: Option<f32>,
}

impl ScrollCoordinator {
    /// Create a coordinator for a viewport of the given height in pixels.
    pub fn new(config: ScrollConfig, viewport_height: f32) -> Self {
        Self {
            config,
            viewport_height: viewport_height.max(1.0),
            scroll_px: 0.0,
            cursor: Vec2::ZERO,
            rig_offset: Vec2::ZERO,
            current_section: 0,
            last_time: None,
        }
    }

    /// Update the viewport height after a window resize.
    ///
    /// The section index is a pure function of scroll offset and viewport
    /// height; it is recomputed on the next [`on_scroll`](Self::on_scroll)
    /// call, never carried stale across a resize.
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(1.0);
    }

    /// Feed the latest absolute scroll offset in pixels.
    ///
    /// Recomputes the section index as `round(offset / viewport_height)`,
    /// clamped to the valid range. Returns a [`RotationImpulse`] exactly once
    /// per change of the clamped index, `None` while the index is unchanged.
    pub fn on_scroll(&mut self, offset_px: f32) -> Option<RotationImpulse> {
        self.scroll_px = offset_px;

        let raw = (offset_px / self.viewport_height).round() as isize;
        let last = self.config.section_count as isize - 1;
        let section = raw.clamp(0, last) as usize;
        if raw < 0 || raw > last {
            log::warn!(
                "scroll offset {offset_px}px maps to section {raw}, clamping to {section}"
            );
        }

        if section == self.current_section {
            return None;
        }
        self.current_section = section;
        log::debug!("entered section {section}");

        Some(RotationImpulse {
            section,
            delta: self.config.impulse_delta,
            duration: self.config.impulse_duration,
            easing: Easing::EaseInOut,
        })
    }

    /// Feed the latest cursor sample, each axis normalized to [-0.5, 0.5]
    /// relative to the viewport center.
    ///
    /// Takes effect on the next [`tick`](Self::tick), not immediately.
    pub fn on_cursor_move(&mut self, normalized: Vec2) {
        self.cursor = normalized;
    }

    /// Advance the coordinator by one rendered frame.
    ///
    /// `elapsed` is a monotonic clock in seconds; the delta from the previous
    /// call drives the parallax smoothing. The first call observes a zero
    /// delta.
    pub fn tick(&mut self, elapsed: f32) -> CameraFrame {
        let dt = match self.last_time {
            Some(previous) => elapsed - previous,
            None => 0.0,
        };
        self.last_time = Some(elapsed);

        // Camera Y tracks scroll exactly: one viewport of scroll moves the
        // camera one section distance down.
        let camera_y = -self.scroll_px / self.viewport_height * self.config.section_distance;

        let target = Vec2::new(self.cursor.x, -self.cursor.y) * self.config.parallax_amplitude;
        // First-order linear step, per axis. Frame-rate dependent; it
        // overshoots when smoothing * dt exceeds 1.
        self.rig_offset += (target - self.rig_offset) * self.config.parallax_smoothing * dt;

        CameraFrame {
            camera_y,
            rig_offset: self.rig_offset,
        }
    }

    /// The section the view is currently in.
    pub fn current_section(&self) -> usize {
        self.current_section
    }

    /// The most recent scroll offset in pixels.
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_px
    }

    /// The coordinator's configuration.
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator() -> ScrollCoordinator {
        ScrollCoordinator::new(ScrollConfig::default(), 800.0)
    }

    #[test]
    fn impulse_fires_once_per_transition() {
        let mut c = coordinator();
        let impulse = c.on_scroll(850.0).expect("0 -> 1 should fire");
        assert_eq!(impulse.section, 1);
        assert_eq!(impulse.delta, Vec3::new(6.0, 3.0, 1.5));
        assert_eq!(impulse.duration, 1.5);
        assert_eq!(impulse.easing, Easing::EaseInOut);

        // Staying in the section fires nothing, however often we scroll.
        assert!(c.on_scroll(850.0).is_none());
        assert!(c.on_scroll(900.0).is_none());
        assert!(c.on_scroll(1100.0).is_none());
    }

    #[test]
    fn no_impulse_at_startup_for_section_zero() {
        let mut c = coordinator();
        assert!(c.on_scroll(0.0).is_none());
        assert!(c.on_scroll(100.0).is_none());
    }

    #[test]
    fn scrolling_back_up_fires_each_transition() {
        let mut c = coordinator();
        assert_eq!(c.on_scroll(1600.0).unwrap().section, 2);
        // 2 -> 1, then 1 -> 0: one impulse each, in order.
        assert_eq!(c.on_scroll(850.0).unwrap().section, 1);
        assert_eq!(c.on_scroll(0.0).unwrap().section, 0);
    }

    #[test]
    fn out_of_range_index_is_clamped() {
        let mut c = coordinator();
        let impulse = c.on_scroll(10_000.0).expect("clamped transition to 2");
        assert_eq!(impulse.section, 2);
        assert_eq!(c.current_section(), 2);
        // Still out of range, still section 2: no second impulse.
        assert!(c.on_scroll(12_000.0).is_none());

        assert_eq!(c.on_scroll(-5_000.0).unwrap().section, 0);
    }

    #[test]
    fn section_index_recomputed_after_resize() {
        let mut c = coordinator();
        assert_eq!(c.on_scroll(850.0).unwrap().section, 1);

        // Same offset, half the viewport: round(850 / 400) == 2.
        c.set_viewport_height(400.0);
        assert_eq!(c.on_scroll(850.0).unwrap().section, 2);
    }

    #[test]
    fn camera_y_tracks_scroll_exactly() {
        let mut c = coordinator();
        c.on_scroll(850.0);
        let frame = c.tick(0.0);
        assert_eq!(frame.camera_y, -850.0 / 800.0 * 4.0);

        // Idempotent given identical inputs; no smoothing on this axis.
        let again = c.tick(1.0);
        assert_eq!(again.camera_y, frame.camera_y);
    }

    #[test]
    fn first_tick_observes_zero_delta() {
        let mut c = coordinator();
        c.on_cursor_move(Vec2::new(0.5, -0.5));
        let frame = c.tick(12.5);
        assert_eq!(frame.rig_offset, Vec2::ZERO);
    }

    #[test]
    fn parallax_uses_the_literal_linear_step() {
        let mut c = coordinator();
        c.tick(0.0);
        // Viewport corner: target = (0.5, 0.5) * 0.3 = (0.15, 0.15)
        // (cursor y is negated).
        c.on_cursor_move(Vec2::new(0.5, -0.5));
        let frame = c.tick(1.0);
        // offset += (target - 0) * 5 * 1 = target * 5: overshoot, exactly as
        // the linear-step formula specifies for smoothing * dt > 1.
        assert!((frame.rig_offset.x - 0.75).abs() < 1e-6);
        assert!((frame.rig_offset.y - 0.75).abs() < 1e-6);
    }

    #[test]
    fn parallax_converges_monotonically_without_overshoot() {
        let mut c = coordinator();
        c.tick(0.0);
        c.on_cursor_move(Vec2::new(0.5, -0.5));
        let target = Vec2::new(0.15, 0.15);

        let mut elapsed = 0.0;
        let mut previous_distance = target.length();
        for _ in 0..200 {
            elapsed += 0.016; // smoothing * dt = 0.08 < 1
            let frame = c.tick(elapsed);
            let distance = (target - frame.rig_offset).length();
            assert!(distance <= previous_distance + 1e-6);
            assert!(frame.rig_offset.x <= target.x + 1e-6);
            assert!(frame.rig_offset.y <= target.y + 1e-6);
            previous_distance = distance;
        }
        assert!(previous_distance < 1e-3);
    }

    #[test]
    fn latest_cursor_sample_wins() {
        let mut c = coordinator();
        c.tick(0.0);
        c.on_cursor_move(Vec2::new(-0.5, 0.0));
        c.on_cursor_move(Vec2::new(0.25, 0.0));
        let frame = c.tick(0.1);
        // Only the second sample is visible to the tick.
        assert!(frame.rig_offset.x > 0.0);
    }

    #[test]
    fn max_scroll_spans_all_but_the_first_section() {
        let config = ScrollConfig::default();
        assert_eq!(config.max_scroll(800.0), 1600.0);
        assert_eq!(ScrollConfig::new().section_count(1).max_scroll(800.0), 0.0);
    }
}
