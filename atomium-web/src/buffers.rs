/// Flat `f32` layouts handed across the wasm boundary
use atomium_core::{Lattice, Mesh, RenderableSet};
use nalgebra::Matrix4;

/// Column-major, as WebGL expects
pub fn matrix(m: &Matrix4<f32>) -> Vec<f32> {
    m.as_slice().to_vec()
}

pub fn placement_offsets(lattice: &Lattice) -> Vec<f32> {
    lattice
        .placements()
        .iter()
        .flat_map(|p| [p.offset.x, p.offset.y, p.offset.z])
        .collect()
}

pub fn spheres(unit: &RenderableSet) -> Vec<f32> {
    unit.spheres()
        .flat_map(|s| [s.center.x, s.center.y, s.center.z, s.radius])
        .collect()
}

pub fn tubes(unit: &RenderableSet) -> Vec<f32> {
    unit.tubes()
        .flat_map(|t| [t.start.x, t.start.y, t.start.z, t.end.x, t.end.y, t.end.z, t.radius])
        .collect()
}

pub fn mesh(mesh: &Mesh) -> Vec<f32> {
    let mut out = Vec::with_capacity(mesh.len() * 18);
    for triangle in &mesh.triangles {
        for vertex in &triangle.vertices {
            out.extend_from_slice(&[
                vertex.position.x,
                vertex.position.y,
                vertex.position.z,
                vertex.normal.x,
                vertex.normal.y,
                vertex.normal.z,
            ]);
        }
    }
    out
}
