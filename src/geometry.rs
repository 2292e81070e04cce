use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::scene::Primitive;

/// Number of floats per vertex: position.xyz, normal.xyz, uv.
pub const VERTEX_STRIDE: usize = 8;

/// GPU ready mesh buffers for one primitive.
///
/// Vertices are laid out as `position.xyz`, `normal.xyz`, `uv` and indexed
/// as triangle lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of vertices in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    /// Number of triangles in the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Position of the vertex at `index`, in object-local space.
    pub fn position(&self, index: u32) -> Vec3 {
        let base = index as usize * VERTEX_STRIDE;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) {
        self.vertices.extend_from_slice(&[
            position.x, position.y, position.z, normal.x, normal.y, normal.z, uv.x, uv.y,
        ]);
    }
}

/// Builds the triangle mesh for a primitive descriptor.
pub fn build_mesh(primitive: Primitive) -> MeshData {
    match primitive {
        Primitive::Box { size } => build_box(size),
        Primitive::Icosahedron { radius } => build_icosahedron(radius),
        Primitive::Torus { radius, tube } => build_torus(radius, tube, 16, 100),
    }
}

/// Axis-aligned box centered on the origin with per-face normals and UVs.
fn build_box(size: f32) -> MeshData {
    let h = size * 0.5;
    // One entry per face: normal, then the two in-plane axes spanning it.
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    ];

    let mut mesh = MeshData::default();
    for (normal, tangent, bitangent) in faces {
        let base = mesh.vertex_count() as u32;
        let corners = [
            (-1.0f32, -1.0f32),
            (1.0, -1.0),
            (1.0, 1.0),
            (-1.0, 1.0),
        ];
        for (u, v) in corners {
            let position = (normal + tangent * u + bitangent * v) * h;
            mesh.push_vertex(
                position,
                normal,
                Vec2::new(u * 0.5 + 0.5, v * 0.5 + 0.5),
            );
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Regular icosahedron with flat-shaded faces, vertices on a sphere of the
/// given radius.
fn build_icosahedron(radius: f32) -> MeshData {
    let t = (1.0 + 5.0f32.sqrt()) * 0.5;
    let corners: [Vec3; 12] = [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ];
    const FACES: [[usize; 3]; 20] = [
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    let mut mesh = MeshData::default();
    for face in FACES {
        let a = corners[face[0]].normalize() * radius;
        let b = corners[face[1]].normalize() * radius;
        let c = corners[face[2]].normalize() * radius;
        let normal = (b - a).cross(c - a).normalize();
        let base = mesh.vertex_count() as u32;
        for position in [a, b, c] {
            mesh.push_vertex(position, normal, Vec2::ZERO);
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }
    mesh
}

/// Torus in the XY plane with smooth normals.
///
/// `radius` is the distance from the origin to the tube center, `tube` the
/// tube radius.
fn build_torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    use std::f32::consts::TAU;

    let mut mesh = MeshData::default();
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
            mesh.push_vertex(
                position,
                normal,
                Vec2::new(
                    i as f32 / tubular_segments as f32,
                    j as f32 / radial_segments as f32,
                ),
            );
        }
    }

    let ring = tubular_segments + 1;
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = ring * j + i - 1;
            let b = ring * (j - 1) + i - 1;
            let c = ring * (j - 1) + i;
            let d = ring * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}
