//! The showcase scene: three section meshes, their rotations, the particle
//! field, and the shared toon material color.
//!
//! Layout mirrors the page: sections stack downward one
//! `section_distance` apart, alternating left and right of center. Every
//! mesh shares one material color, switchable at runtime from a small
//! palette (keys 1-5).

use glam::{EulerRot, Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry;
use crate::gpu::GpuContext;
use crate::mesh::{Mesh, Transform};
use crate::scroll::ScrollConfig;
use crate::tween::{RotationImpulse, SectionRotation};

/// Continuous idle spin of every section mesh, radians per second.
const IDLE_SPIN: Vec3 = Vec3::new(0.1, 0.12, 0.0);

/// Horizontal anchor of each section mesh, alternating around center.
const SECTION_X: [f32; 3] = [2.0, -2.0, 2.0];

/// Number of ambient particles.
const PARTICLE_COUNT: usize = 200;

/// Extent of the particle volume on x and z, centered on the camera axis.
const PARTICLE_SPREAD: f32 = 10.0;

/// Selectable material colors; the first entry is the default.
pub const PALETTE: [Vec3; 5] = [
    Vec3::new(1.0, 0.929, 0.929), // warm white
    Vec3::new(0.62, 0.78, 1.0),   // ice blue
    Vec3::new(1.0, 0.72, 0.42),   // amber
    Vec3::new(0.68, 1.0, 0.74),   // mint
    Vec3::new(0.91, 0.62, 1.0),   // orchid
];

/// World positions of the section mesh anchors.
pub fn section_positions(section_distance: f32) -> Vec<Vec3> {
    SECTION_X
        .iter()
        .enumerate()
        .map(|(i, &x)| Vec3::new(x, -(i as f32) * section_distance, 0.0))
        .collect()
}

/// Scatter particle positions through the volume spanning all sections.
///
/// Seeded so the field is identical run to run.
pub fn scatter_particles(
    count: usize,
    section_distance: f32,
    section_count: usize,
    seed: u64,
) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    let depth = section_distance * section_count as f32;
    (0..count)
        .map(|_| {
            Vec3::new(
                (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
                section_distance * 0.5 - rng.random::<f32>() * depth,
                (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
            )
        })
        .collect()
}

/// The renderable showcase: GPU meshes plus the animation state that drives
/// their transforms.
pub struct Showcase {
    meshes: Vec<Mesh>,
    positions: Vec<Vec3>,
    rotations: Vec<SectionRotation>,
    particles: Vec<Vec3>,
    palette_index: usize,
}

impl Showcase {
    /// Build the three section meshes and the particle field.
    pub fn new(gpu: &GpuContext, config: &ScrollConfig) -> Self {
        let meshes = vec![
            Mesh::from_geometry(gpu, &geometry::torus(0.5, 0.4, 16, 60)),
            Mesh::from_geometry(gpu, &geometry::cone(0.5, 1.0, 32)),
            Mesh::from_geometry(gpu, &geometry::torus_knot(0.4, 0.2, 150, 32, 2, 3)),
        ];

        let positions = section_positions(config.section_distance);
        let rotations = (0..meshes.len())
            .map(|_| SectionRotation::new(IDLE_SPIN))
            .collect();
        let particles = scatter_particles(
            PARTICLE_COUNT,
            config.section_distance,
            config.section_count,
            0x7219,
        );

        Self {
            meshes,
            positions,
            rotations,
            particles,
            palette_index: 0,
        }
    }

    /// Route a coordinator impulse to its section's rotation.
    ///
    /// The coordinator clamps the section index, so this never indexes out
    /// of range for impulses it produced.
    pub fn apply_impulse(&mut self, impulse: &RotationImpulse) {
        if let Some(rotation) = self.rotations.get_mut(impulse.section) {
            rotation.start(impulse);
        } else {
            log::warn!("impulse for unknown section {}", impulse.section);
        }
    }

    /// Advance idle spin and running impulse tweens by one frame.
    pub fn update(&mut self, dt: f32) {
        for rotation in &mut self.rotations {
            rotation.advance(dt);
        }
    }

    /// Select a material color from [`PALETTE`]. Out-of-range indices are
    /// ignored.
    pub fn set_palette(&mut self, index: usize) {
        if index < PALETTE.len() {
            self.palette_index = index;
        }
    }

    /// The current shared material color.
    pub fn material_color(&self) -> Vec3 {
        PALETTE[self.palette_index]
    }

    /// Per-section mesh and world transform, in draw order.
    pub fn draws(&self) -> impl Iterator<Item = (&Mesh, Transform)> {
        self.meshes.iter().zip(self.transforms())
    }

    /// World transforms of the section meshes for the current frame.
    pub fn transforms(&self) -> Vec<Transform> {
        self.positions
            .iter()
            .zip(&self.rotations)
            .map(|(&position, rotation)| {
                let euler = rotation.current();
                Transform::new().position(position).rotation(Quat::from_euler(
                    EulerRot::XYZ,
                    euler.x,
                    euler.y,
                    euler.z,
                ))
            })
            .collect()
    }

    /// The static particle positions.
    pub fn particles(&self) -> &[Vec3] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_stack_downward_alternating() {
        let positions = section_positions(4.0);
        assert_eq!(positions[0], Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(positions[1], Vec3::new(-2.0, -4.0, 0.0));
        assert_eq!(positions[2], Vec3::new(2.0, -8.0, 0.0));
    }

    #[test]
    fn particles_fill_the_section_volume() {
        let particles = scatter_particles(200, 4.0, 3, 0x7219);
        assert_eq!(particles.len(), 200);
        for p in &particles {
            assert!(p.x >= -5.0 && p.x <= 5.0);
            assert!(p.z >= -5.0 && p.z <= 5.0);
            // From half a section above the first mesh down past the last.
            assert!(p.y <= 2.0 && p.y >= 2.0 - 12.0);
        }
    }

    #[test]
    fn particle_scatter_is_deterministic() {
        let a = scatter_particles(50, 4.0, 3, 42);
        let b = scatter_particles(50, 4.0, 3, 42);
        assert_eq!(a, b);
    }
}
