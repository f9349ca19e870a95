//! # Triptych
//!
//! **A scroll-driven 3D showcase.**
//!
//! Three toon-shaded meshes — a torus, a cone, a torus knot — stacked one
//! viewport apart, an ambient particle field, and a camera on a parallax
//! rig. Scrolling moves the camera down the page; crossing into a new
//! section kicks its mesh with a one-shot rotation impulse; moving the
//! cursor tilts the whole scene with a smoothed parallax offset.
//!
//! The interesting machinery is [`ScrollCoordinator`]: it owns the mapping
//! from raw scroll and cursor input to camera motion and section-entry
//! impulses, and it is plain state + arithmetic, fully testable without a
//! GPU. Everything else — geometry generation, the toon and particle render
//! passes, the winit shell — is the plumbing that puts the coordinator's
//! output on screen.
//!
//! ## Quick Start
//!
//! ```no_run
//! use triptych::{AppConfig, run};
//!
//! fn main() {
//!     run(AppConfig::new().title("Triptych").size(1280, 720));
//! }
//! ```
//!
//! Controls: mouse wheel or touchpad to scroll, cursor for parallax,
//! keys 1-5 to switch the material color, Escape to quit.

mod app;
mod camera;
pub mod geometry;
mod gpu;
mod input;
mod mesh;
mod particle_pass;
pub mod scene;
mod scroll;
mod toon_pass;
mod tween;

pub use app::{AppConfig, run};
pub use camera::{Camera, CameraRig};
pub use gpu::GpuContext;
pub use input::Input;
pub use mesh::{Mesh, Transform, Vertex3d};
pub use particle_pass::ParticlePass;
pub use scene::Showcase;
pub use scroll::{CameraFrame, ScrollConfig, ScrollCoordinator};
pub use toon_pass::{DrawCall, ToonPass};
pub use tween::{Easing, RotationImpulse, RotationTween, SectionRotation};

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3};
