//! CPU-side generation of the section mesh primitives.
//!
//! Each page section is anchored to one procedural primitive: a torus, a
//! cone, and a torus knot. The generators here produce [`RawGeometry`] —
//! plain vertex and index data — which [`Mesh`](crate::Mesh) uploads to the
//! GPU. All primitives use counter-clockwise winding and unit-length normals.

use glam::Vec3;

use crate::mesh::Vertex3d;

use std::f32::consts::TAU;

/// Raw vertex and index data before GPU upload.
#[derive(Clone, Debug, Default)]
pub struct RawGeometry {
    pub vertices: Vec<Vertex3d>,
    pub indices: Vec<u32>,
}

impl RawGeometry {
    pub fn new(vertices: Vec<Vertex3d>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Axis-aligned bounding box of the vertex positions.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for vertex in &self.vertices {
            let p = Vec3::from(vertex.position);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    /// Number of triangles described by the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A torus in the XY plane, facing +Z.
///
/// `radius` is the distance from the center to the middle of the tube,
/// `tube` the radius of the tube itself. `radial_segments` subdivides the
/// tube cross-section, `tubular_segments` the ring.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> RawGeometry {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;

            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let position = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let normal = (position - center).normalize();
            let uv = [
                i as f32 / tubular_segments as f32,
                j as f32 / radial_segments as f32,
            ];

            vertices.push(Vertex3d::new(position.to_array(), normal.to_array(), uv));
        }
    }

    for j in 0..radial_segments {
        for i in 0..tubular_segments {
            let a = j * (tubular_segments + 1) + i;
            let b = a + tubular_segments + 1;

            indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }

    RawGeometry::new(vertices, indices)
}

/// A cone on the Y axis: apex at `+height / 2`, capped base at `-height / 2`.
///
/// The apex vertex is duplicated per segment so the slanted side normals stay
/// correct.
pub fn cone(radius: f32, height: f32, segments: u32) -> RawGeometry {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let half = height * 0.5;
    // Slant normal: rotate (height, radius) into each segment's direction.
    let slant = (radius * radius + height * height).sqrt();
    let ny = radius / slant;
    let nr = height / slant;

    // Side: one apex vertex per segment, plus the base ring.
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        let normal = [cos * nr, ny, sin * nr];

        vertices.push(Vertex3d::new(
            [0.0, half, 0.0],
            normal,
            [i as f32 / segments as f32, 0.0],
        ));
        vertices.push(Vertex3d::new(
            [radius * cos, -half, radius * sin],
            normal,
            [i as f32 / segments as f32, 1.0],
        ));
    }
    for i in 0..segments {
        let apex = i * 2;
        let base = apex + 1;
        indices.extend_from_slice(&[apex, base + 2, base]);
    }

    // Base cap, facing -Y.
    let center = vertices.len() as u32;
    vertices.push(Vertex3d::new(
        [0.0, -half, 0.0],
        [0.0, -1.0, 0.0],
        [0.5, 0.5],
    ));
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        vertices.push(Vertex3d::new(
            [radius * cos, -half, radius * sin],
            [0.0, -1.0, 0.0],
            [cos * 0.5 + 0.5, sin * 0.5 + 0.5],
        ));
    }
    for i in 0..segments {
        indices.extend_from_slice(&[center, center + 1 + i, center + 2 + i]);
    }

    RawGeometry::new(vertices, indices)
}

/// A (p, q) torus knot, the signature mesh of the final section.
///
/// The curve winds `p` times around the torus axis and `q` times through its
/// hole; (2, 3) gives the classic trefoil. `radius` scales the knot,
/// `tube` the thickness.
pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> RawGeometry {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let point_on_curve = |u: f32| -> Vec3 {
        let qu = q as f32 / p as f32 * u;
        let r = radius * (2.0 + qu.cos()) * 0.5;
        Vec3::new(r * u.cos(), r * u.sin(), radius * qu.sin() * 0.5)
    };

    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * p as f32 * TAU;

        // Frenet-style frame from two nearby curve points.
        let p1 = point_on_curve(u);
        let p2 = point_on_curve(u + 0.01);
        let tangent = p2 - p1;
        let mut normal = p2 + p1;
        let binormal = tangent.cross(normal).normalize();
        normal = binormal.cross(tangent).normalize();

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();

            let position = p1 + cx * normal + cy * binormal;
            let vertex_normal = (position - p1).normalize();
            let uv = [
                i as f32 / tubular_segments as f32,
                j as f32 / radial_segments as f32,
            ];

            vertices.push(Vertex3d::new(
                position.to_array(),
                vertex_normal.to_array(),
                uv,
            ));
        }
    }

    for i in 0..tubular_segments {
        for j in 0..radial_segments {
            let a = i * (radial_segments + 1) + j;
            let b = a + radial_segments + 1;

            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    RawGeometry::new(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit_normals(geometry: &RawGeometry) {
        for vertex in &geometry.vertices {
            let length = Vec3::from(vertex.normal).length();
            assert!(
                (length - 1.0).abs() < 1e-4,
                "normal {:?} has length {length}",
                vertex.normal
            );
        }
    }

    #[test]
    fn torus_vertex_and_triangle_counts() {
        let geometry = torus(0.5, 0.4, 16, 60);
        assert_eq!(geometry.vertices.len(), 17 * 61);
        assert_eq!(geometry.triangle_count(), 16 * 60 * 2);
        assert_unit_normals(&geometry);
    }

    #[test]
    fn torus_bounds_match_radii() {
        let geometry = torus(0.5, 0.4, 16, 60);
        let (min, max) = geometry.bounds();
        // Extent is radius + tube in the plane, tube along Z.
        assert!((max.x - 0.9).abs() < 1e-3);
        assert!((min.x + 0.9).abs() < 1e-3);
        assert!((max.z - 0.4).abs() < 1e-3);
        assert!((min.z + 0.4).abs() < 1e-3);
    }

    #[test]
    fn cone_spans_height_and_radius() {
        let geometry = cone(0.5, 1.0, 32);
        let (min, max) = geometry.bounds();
        assert_eq!(max.y, 0.5);
        assert_eq!(min.y, -0.5);
        assert!((max.x - 0.5).abs() < 1e-3);
        assert!((min.z + 0.5).abs() < 2e-2);
        assert_unit_normals(&geometry);
    }

    #[test]
    fn cone_side_normals_tilt_upward() {
        let geometry = cone(0.5, 1.0, 32);
        // Side vertices come first; their normals all share the same slant Y.
        let expected_y = 0.5 / (0.5f32 * 0.5 + 1.0).sqrt();
        for vertex in &geometry.vertices[..(33 * 2)] {
            assert!((vertex.normal[1] - expected_y).abs() < 1e-4);
        }
    }

    #[test]
    fn torus_knot_counts_and_normals() {
        let geometry = torus_knot(0.4, 0.2, 150, 32, 2, 3);
        assert_eq!(geometry.vertices.len(), 151 * 33);
        assert_eq!(geometry.triangle_count(), 150 * 32 * 2);
        assert_unit_normals(&geometry);
    }

    #[test]
    fn torus_knot_stays_within_its_radii() {
        let geometry = torus_knot(0.4, 0.2, 150, 32, 2, 3);
        let (min, max) = geometry.bounds();
        // Curve radius tops out at radius * 1.5; the tube adds at most 0.2.
        let limit = 0.4 * 1.5 + 0.2 + 1e-3;
        assert!(max.x <= limit && min.x >= -limit);
        assert!(max.y <= limit && min.y >= -limit);
    }
}
