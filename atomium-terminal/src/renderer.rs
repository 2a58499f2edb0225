/// ASCII rasterizer for terminal rendering
use atomium_core::config::LightRig;
use atomium_core::projection::project_with;
use atomium_core::{Appearance, Mesh, Triangle};
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Vector3};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Light as seen by the rasterizer: a direction and two scalar intensities
#[derive(Debug, Clone, Copy)]
pub struct Shading {
    light_dir: Vector3<f32>,
    ambient: f32,
    directional: f32,
}

impl Shading {
    pub fn from_rig(rig: &LightRig) -> Self {
        let ambient = (rig.ambient.r + rig.ambient.g + rig.ambient.b) / 3.0;
        let color = (rig.directional.r + rig.directional.g + rig.directional.b) / 3.0;
        Self {
            light_dir: rig.direction.try_normalize(1e-6).unwrap_or_else(Vector3::z),
            ambient,
            directional: color * rig.directional_intensity,
        }
    }

    fn brightness(&self, normal: &Vector3<f32>) -> f32 {
        (self.ambient + self.directional * normal.dot(&self.light_dir).max(0.0)).clamp(0.0, 1.0)
    }
}

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<(char, Color)>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![(' ', Color::Reset); size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill((' ', Color::Reset));
    }

    /// Number of cells covered by geometry
    pub fn covered_cells(&self) -> usize {
        self.depth_buffer.iter().filter(|d| d.is_finite()).count()
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x].0)
    }

    /// Rasterize `mesh` placed by `model` and viewed through `view_projection`
    pub fn render_mesh(
        &mut self,
        mesh: &Mesh,
        model: &Matrix4<f32>,
        view_projection: &Matrix4<f32>,
        shading: &Shading,
        appearance: &Appearance,
    ) {
        let mvp = view_projection * model;
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, model, &mvp, shading, appearance);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        model: &Matrix4<f32>,
        mvp: &Matrix4<f32>,
        shading: &Shading,
        appearance: &Appearance,
    ) {
        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match project_with(mvp, &vertex.position, self.width as u32, self.height as u32) {
                Some(coords) => *slot = coords,
                None => return, // Triangle is clipped
            }
        }

        // Shade with the world-space normal
        let normal = model.transform_vector(&triangle.shading_normal());
        let normal = normal.try_normalize(1e-6).unwrap_or(normal);
        let brightness = shading.brightness(&normal);

        // Map brightness to character
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let char_index = char_index.clamp(1, LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];
        let color = tint(appearance, brightness);

        // Rasterize triangle using scanline algorithm
        self.rasterize_triangle(&screen_coords, character, color);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char, color: Color) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates
                if let Some((w0, w1, w2)) = barycentric(
                    (v0.0, v0.1),
                    (v1.0, v1.1),
                    (v2.0, v2.1),
                    (px, py),
                ) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.char_buffer[idx] = (character, color);
                        }
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let (c, color) = self.char_buffer[y * self.width + x];
                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Surface color dimmed by the shading term
fn tint(appearance: &Appearance, brightness: f32) -> Color {
    // metallic surfaces keep more of their highlight
    let gain = 0.6 + 0.4 * appearance.metalness * (1.0 - appearance.roughness);
    let lit = appearance.color.scaled((brightness * gain * 1.4).min(1.0));
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
    Color::Rgb {
        r: channel(lit.r),
        g: channel(lit.g),
        b: channel(lit.b),
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomium_core::{AtomiumConfig, Camera};
    use nalgebra::Point3;

    #[test]
    fn test_barycentric_inside_and_degenerate() {
        let (w0, w1, w2) = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (1.0, 1.0)).unwrap();
        assert!(w0 > 0.0 && w1 > 0.0 && w2 > 0.0);
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-6);
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 1.0)).is_none());
    }

    #[test]
    fn test_sphere_covers_center_cell() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let mut camera = Camera::new(40, 40);
        camera.position = Point3::new(0.0, 0.0, 5.0);
        let view_projection = camera.view_projection();
        let sphere = Mesh::uv_sphere(Point3::origin(), 1.0, 12, 8);
        let shading = Shading::from_rig(&AtomiumConfig::landmark().lights);

        renderer.render_mesh(
            &sphere,
            &Matrix4::identity(),
            &view_projection,
            &shading,
            &Appearance::silver(),
        );
        assert!(renderer.covered_cells() > 0);
        assert_ne!(renderer.cell(20, 10), Some(' '));

        renderer.clear();
        assert_eq!(renderer.covered_cells(), 0);
    }
}
