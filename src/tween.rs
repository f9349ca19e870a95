//! Rotation impulses and the easing curves that drive them.
//!
//! When the page scrolls into a new section, the scroll coordinator emits a
//! [`RotationImpulse`] for that section's mesh. The impulse is consumed here:
//! a [`RotationTween`] animates the relative rotation delta over a fixed
//! duration, and [`SectionRotation`] composes the tween output with the
//! mesh's continuous idle spin.

use glam::Vec3;

/// Easing functions for time-bounded animations.
///
/// These control the acceleration curve of an animation's progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    /// Constant speed throughout.
    Linear,
    /// Start slow, accelerate.
    EaseIn,
    /// Start fast, decelerate.
    EaseOut,
    /// Start slow, speed up, then slow down.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to a linear progress value (0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// A one-shot rotation event emitted when the view enters a new section.
///
/// The delta is *relative*: it is applied on top of whatever rotation the
/// target mesh has accumulated, so the idle spin keeps running underneath.
#[derive(Clone, Copy, Debug)]
pub struct RotationImpulse {
    /// Index of the section whose mesh should spin.
    pub section: usize,
    /// Relative euler rotation to add, in radians per axis.
    pub delta: Vec3,
    /// Animation duration in seconds.
    pub duration: f32,
    /// Acceleration curve of the animation.
    pub easing: Easing,
}

/// An active, time-bounded rotation animation.
///
/// Advances with frame delta time and reports the eased fraction of its
/// delta. Once `elapsed` reaches `duration` the tween is finished and its
/// full delta should be folded into the mesh's persistent rotation.
#[derive(Clone, Copy, Debug)]
pub struct RotationTween {
    delta: Vec3,
    duration: f32,
    easing: Easing,
    elapsed: f32,
}

impl RotationTween {
    /// Start a tween from an impulse.
    pub fn new(impulse: &RotationImpulse) -> Self {
        Self {
            delta: impulse.delta,
            duration: impulse.duration,
            easing: impulse.easing,
            elapsed: 0.0,
        }
    }

    /// Advance the animation clock.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// The eased rotation contribution at the current point in time.
    pub fn offset(&self) -> Vec3 {
        if self.duration <= 0.0 {
            return self.delta;
        }
        self.delta * self.easing.apply(self.elapsed / self.duration)
    }

    /// Whether the tween has run its full duration.
    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// The full relative delta this tween applies when complete.
    pub fn delta(&self) -> Vec3 {
        self.delta
    }
}

/// Composes a section mesh's rotation from three sources: the continuous
/// idle spin, rotation settled from completed tweens, and any tweens still
/// running.
///
/// Rapid scrolling can start a new tween while an earlier one is mid-flight;
/// both contribute until they finish.
#[derive(Clone, Debug)]
pub struct SectionRotation {
    spin_rate: Vec3,
    spin: Vec3,
    settled: Vec3,
    active: Vec<RotationTween>,
}

impl SectionRotation {
    /// Create a rotation accumulator with the given idle spin rate
    /// (radians per second, per axis).
    pub fn new(spin_rate: Vec3) -> Self {
        Self {
            spin_rate,
            spin: Vec3::ZERO,
            settled: Vec3::ZERO,
            active: Vec::new(),
        }
    }

    /// Start animating an impulse on this section.
    pub fn start(&mut self, impulse: &RotationImpulse) {
        self.active.push(RotationTween::new(impulse));
    }

    /// Advance the idle spin and all running tweens by one frame.
    pub fn advance(&mut self, dt: f32) {
        self.spin += self.spin_rate * dt;

        let mut i = 0;
        while i < self.active.len() {
            self.active[i].advance(dt);
            if self.active[i].finished() {
                let tween = self.active.remove(i);
                self.settled += tween.delta();
            } else {
                i += 1;
            }
        }
    }

    /// The current euler rotation of the section mesh, in radians.
    pub fn current(&self) -> Vec3 {
        let mut rotation = self.spin + self.settled;
        for tween in &self.active {
            rotation += tween.offset();
        }
        rotation
    }

    /// Number of tweens still running.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse(duration: f32) -> RotationImpulse {
        RotationImpulse {
            section: 0,
            delta: Vec3::new(6.0, 3.0, 1.5),
            duration,
            easing: Easing::EaseInOut,
        }
    }

    #[test]
    fn easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            // Out-of-range inputs clamp rather than extrapolate.
            assert_eq!(easing.apply(-1.0), 0.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
    }

    #[test]
    fn ease_in_out_is_quadratic() {
        assert!((Easing::EaseInOut.apply(0.25) - 0.125).abs() < 1e-6);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::EaseInOut.apply(0.75) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn tween_reaches_full_delta() {
        let mut tween = RotationTween::new(&impulse(1.5));
        assert_eq!(tween.offset(), Vec3::ZERO);
        tween.advance(1.5);
        assert!(tween.finished());
        assert_eq!(tween.offset(), Vec3::new(6.0, 3.0, 1.5));
    }

    #[test]
    fn tween_midpoint_is_eased() {
        let mut tween = RotationTween::new(&impulse(1.5));
        tween.advance(0.75);
        assert!(!tween.finished());
        // EaseInOut(0.5) == 0.5, so half the delta.
        let offset = tween.offset();
        assert!((offset.x - 3.0).abs() < 1e-5);
        assert!((offset.y - 1.5).abs() < 1e-5);
        assert!((offset.z - 0.75).abs() < 1e-5);
    }

    #[test]
    fn completed_tween_folds_into_settled_rotation() {
        let mut rotation = SectionRotation::new(Vec3::ZERO);
        rotation.start(&impulse(1.5));
        rotation.advance(2.0);
        assert_eq!(rotation.active_count(), 0);
        assert_eq!(rotation.current(), Vec3::new(6.0, 3.0, 1.5));
        // Further frames leave the settled rotation untouched.
        rotation.advance(1.0);
        assert_eq!(rotation.current(), Vec3::new(6.0, 3.0, 1.5));
    }

    #[test]
    fn overlapping_tweens_both_contribute() {
        let mut rotation = SectionRotation::new(Vec3::ZERO);
        rotation.start(&impulse(1.5));
        rotation.advance(0.5);
        rotation.start(&impulse(1.5));
        assert_eq!(rotation.active_count(), 2);
        rotation.advance(2.0);
        // Both finished; two full deltas settled.
        assert_eq!(rotation.current(), Vec3::new(12.0, 6.0, 3.0));
    }

    #[test]
    fn idle_spin_accumulates_under_tweens() {
        let mut rotation = SectionRotation::new(Vec3::new(0.1, 0.12, 0.0));
        rotation.advance(1.0);
        let spun = rotation.current();
        assert!((spun.x - 0.1).abs() < 1e-6);
        assert!((spun.y - 0.12).abs() < 1e-6);

        rotation.start(&impulse(1.5));
        rotation.advance(1.5);
        let after = rotation.current();
        assert!((after.x - (0.25 + 6.0)).abs() < 1e-5);
        assert!((after.y - (0.3 + 3.0)).abs() < 1e-5);
    }
}
