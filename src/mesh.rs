use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Single interleaved vertex as consumed by the render pipeline.
///
/// The layout matches the vertex buffer attributes registered by the
/// renderer: position, normal, color, texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, color: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color: color.to_array(),
            uv: uv.to_array(),
        }
    }
}

/// CPU-side UV-sphere geometry ready for upload.
///
/// Every index stored in `triangles` references a vertex in `vertices`;
/// `generate_uv_sphere` upholds that invariant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SphereMesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<[u32; 3]>,
}

impl SphereMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of indices submitted to an indexed draw call.
    pub fn index_count(&self) -> u32 {
        (self.triangles.len() * 3) as u32
    }
}

/// Generates a unit UV-sphere with `resolution` steps along each angle.
///
/// The polar angle sweeps `0..=pi` across the inner index and the
/// azimuthal angle sweeps `0..=2pi` across the outer index, producing a
/// `resolution * resolution` latitude/longitude grid of vertices and
/// `2 * (resolution - 1)^2` triangles. The seam at the wrap-around
/// longitude duplicates its vertex column and the pole rows contribute
/// zero-area triangles; both are accepted artifacts of the
/// parameterization. Normals equal positions since the sphere is unit
/// radius, color is plain white and uv spans the full grid.
///
/// A resolution below 2 cannot form a single quad cell, so the result
/// is an empty mesh rather than an error.
pub fn generate_uv_sphere(resolution: u32) -> SphereMesh {
    if resolution < 2 {
        return SphereMesh::default();
    }

    let steps = resolution as usize;
    let inv_resolution = 1.0 / (resolution - 1) as f32;

    let mut vertices = Vec::with_capacity(steps * steps);
    for v_index in 0..resolution {
        let v = v_index as f32 * inv_resolution;
        let phi = TAU * v;
        for u_index in 0..resolution {
            let u = u_index as f32 * inv_resolution;
            let theta = PI * u;

            let position = Vec3::new(
                theta.sin() * phi.cos(),
                theta.sin() * phi.sin(),
                theta.cos(),
            );
            vertices.push(Vertex::new(
                position,
                position.normalize_or_zero(),
                Vec3::ONE,
                Vec2::new(v, u),
            ));
        }
    }

    let mut triangles = Vec::with_capacity(2 * (steps - 1) * (steps - 1));
    for v in 0..resolution - 1 {
        for u in 0..resolution - 1 {
            let p0 = u + v * resolution;
            let p1 = (u + 1) + v * resolution;
            let p2 = (u + 1) + (v + 1) * resolution;
            let p3 = u + (v + 1) * resolution;

            triangles.push([p0, p1, p3]);
            triangles.push([p3, p1, p2]);
        }
    }

    SphereMesh {
        vertices,
        triangles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-5;

    fn assert_vec3_near(actual: [f32; 3], expected: [f32; 3]) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!(
                (a - e).abs() < TOLERANCE,
                "expected {expected:?}, got {actual:?}"
            );
        }
    }

    #[test]
    fn counts_match_resolution() {
        for resolution in 2..=16u32 {
            let mesh = generate_uv_sphere(resolution);
            let r = resolution as usize;
            assert_eq!(mesh.vertex_count(), r * r);
            assert_eq!(mesh.triangle_count(), 2 * (r - 1) * (r - 1));
            assert_eq!(mesh.index_count(), (6 * (r - 1) * (r - 1)) as u32);
        }
    }

    #[test]
    fn low_resolution_yields_empty_mesh() {
        for resolution in 0..2u32 {
            let mesh = generate_uv_sphere(resolution);
            assert!(mesh.vertices.is_empty());
            assert!(mesh.triangles.is_empty());
        }
    }

    #[test]
    fn normals_are_unit_and_equal_positions() {
        let mesh = generate_uv_sphere(12);
        for vertex in &mesh.vertices {
            let normal = Vec3::from_array(vertex.normal);
            assert!((normal.length() - 1.0).abs() < TOLERANCE);
            assert_vec3_near(vertex.normal, vertex.position);
        }
    }

    #[test]
    fn indices_stay_in_range() {
        for resolution in [2u32, 3, 7, 50] {
            let mesh = generate_uv_sphere(resolution);
            let limit = mesh.vertex_count() as u32;
            for triangle in &mesh.triangles {
                for &index in triangle {
                    assert!(index < limit);
                }
            }
        }
    }

    #[test]
    fn resolution_two_matches_analytic_corners() {
        let mesh = generate_uv_sphere(2);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);

        // Inner index walks the polar angle: rows alternate north/south.
        assert_vec3_near(mesh.vertices[0].position, [0.0, 0.0, 1.0]);
        assert_vec3_near(mesh.vertices[1].position, [0.0, 0.0, -1.0]);
        assert_vec3_near(mesh.vertices[2].position, [0.0, 0.0, 1.0]);
        assert_vec3_near(mesh.vertices[3].position, [0.0, 0.0, -1.0]);

        assert_eq!(mesh.triangles[0], [0, 1, 2]);
        assert_eq!(mesh.triangles[1], [2, 1, 3]);
    }

    #[test]
    fn texture_coordinates_cover_the_grid() {
        let mesh = generate_uv_sphere(3);
        assert_eq!(mesh.vertices[0].uv, [0.0, 0.0]);
        assert_eq!(mesh.vertices[4].uv, [0.5, 0.5]);
        assert_eq!(mesh.vertices[8].uv, [1.0, 1.0]);
        for vertex in &mesh.vertices {
            assert_eq!(vertex.color, [1.0, 1.0, 1.0]);
        }
    }
}
