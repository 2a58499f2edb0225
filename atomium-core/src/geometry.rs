/// Triangle meshes used when a renderer needs tessellated primitives
use nalgebra::{Point3, Vector3};
use std::f32::consts::PI;

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Average of the vertex normals, used for flat shading
    pub fn shading_normal(&self) -> Vector3<f32> {
        let sum = self.vertices[0].normal + self.vertices[1].normal + self.vertices[2].normal;
        sum.try_normalize(1e-6).unwrap_or_else(Vector3::z)
    }
}

/// Subdivision counts for spheres and tubes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tessellation {
    pub sphere_width_segments: u32,
    pub sphere_height_segments: u32,
    pub tube_radial_segments: u32,
}

impl Tessellation {
    /// Low triangle count for software rasterizers.
    pub fn coarse() -> Self {
        Self {
            sphere_width_segments: 8,
            sphere_height_segments: 6,
            tube_radial_segments: 6,
        }
    }
}

impl Default for Tessellation {
    fn default() -> Self {
        Self {
            sphere_width_segments: 32,
            sphere_height_segments: 32,
            tube_radial_segments: 16,
        }
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn append(&mut self, other: Mesh) {
        self.triangles.extend(other.triangles);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// UV sphere around `center`.
    ///
    /// Degenerate triangles at the poles are dropped, so the count is
    /// `2 * width * (height - 1)`.
    pub fn uv_sphere(center: Point3<f32>, radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width = width_segments.max(3);
        let height = height_segments.max(2);

        let vertex = |ring: u32, seg: u32| {
            let phi = PI * ring as f32 / height as f32;
            let theta = 2.0 * PI * seg as f32 / width as f32;
            let normal = Vector3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            Vertex::new(center + normal * radius, normal)
        };

        let mut mesh = Self::with_capacity((2 * width * (height - 1)) as usize);
        for ring in 0..height {
            for seg in 0..width {
                let a = vertex(ring, seg);
                let b = vertex(ring + 1, seg);
                let c = vertex(ring, seg + 1);
                let d = vertex(ring + 1, seg + 1);

                if ring != 0 {
                    mesh.add_triangle(Triangle::new(a, b, c));
                }
                if ring != height - 1 {
                    mesh.add_triangle(Triangle::new(c, b, d));
                }
            }
        }
        mesh
    }

    /// Open-ended cylinder from `start` to `end`.
    ///
    /// Returns `None` when the endpoints coincide or are not finite.
    pub fn tube(start: Point3<f32>, end: Point3<f32>, radius: f32, radial_segments: u32) -> Option<Self> {
        let axis = segment_axis(start, end)?;
        let segments = radial_segments.max(3);

        let helper = if axis.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };
        let u = axis.cross(&helper).normalize();
        let v = axis.cross(&u);

        let ring = |seg: u32| {
            let angle = 2.0 * PI * seg as f32 / segments as f32;
            u * angle.cos() + v * angle.sin()
        };

        let mut mesh = Self::with_capacity(segments as usize * 2);
        for seg in 0..segments {
            let n0 = ring(seg);
            let n1 = ring(seg + 1);
            let s0 = Vertex::new(start + n0 * radius, n0);
            let s1 = Vertex::new(start + n1 * radius, n1);
            let e0 = Vertex::new(end + n0 * radius, n0);
            let e1 = Vertex::new(end + n1 * radius, n1);

            mesh.add_triangle(Triangle::new(s0, e0, s1));
            mesh.add_triangle(Triangle::new(s1, e0, e1));
        }
        Some(mesh)
    }
}

/// Unit direction from `start` to `end`.
///
/// `None` only for a zero or non-finite length; short segments are valid at
/// any scale.
pub fn segment_axis(start: Point3<f32>, end: Point3<f32>) -> Option<Vector3<f32>> {
    let delta = end - start;
    let length = delta.norm();
    if length.is_finite() && length > 0.0 {
        Some(delta / length)
    } else {
        None
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_vertices_lie_on_surface() {
        let center = Point3::new(1.0, 2.0, 3.0);
        let sphere = Mesh::uv_sphere(center, 1.2, 8, 6);
        assert_eq!(sphere.len(), 2 * 8 * 5);
        for triangle in &sphere.triangles {
            for vertex in &triangle.vertices {
                assert!(((vertex.position - center).norm() - 1.2).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_tube_spans_endpoints() {
        let start = Point3::new(7.0, 7.0, 7.0);
        let end = Point3::new(7.0, 7.0, -7.0);
        let tube = Mesh::tube(start, end, 0.2, 16).unwrap();
        assert_eq!(tube.len(), 32);
        for triangle in &tube.triangles {
            for vertex in &triangle.vertices {
                let radial = Vector3::new(vertex.position.x - 7.0, vertex.position.y - 7.0, 0.0);
                assert!((radial.norm() - 0.2).abs() < 1e-5);
                assert!(vertex.position.z.abs() <= 7.0 + 1e-5);
            }
        }
    }

    #[test]
    fn test_degenerate_tube() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(Mesh::tube(p, p, 0.2, 16).is_none());
    }

    #[test]
    fn test_tiny_tube_is_built() {
        let start = Point3::new(5e-8, 5e-8, 5e-8);
        let end = Point3::new(5e-8, 5e-8, -5e-8);
        let tube = Mesh::tube(start, end, 1e-9, 6).unwrap();
        assert_eq!(tube.len(), 12);
        for triangle in &tube.triangles {
            for vertex in &triangle.vertices {
                assert!((vertex.normal.norm() - 1.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_segment_axis_rejects_non_finite() {
        let p = Point3::new(0.0, 0.0, 0.0);
        assert!(segment_axis(p, Point3::new(f32::INFINITY, 0.0, 0.0)).is_none());
        assert!(segment_axis(p, Point3::new(f32::NAN, 0.0, 0.0)).is_none());
        assert_eq!(segment_axis(p, Point3::new(0.0, 3.0, 0.0)), Some(Vector3::y()));
    }
}
