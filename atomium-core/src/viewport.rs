/// Viewport reactor: keeps the camera projection in step with the output
/// surface size.

use crate::projection::{aspect_ratio, Camera};

/// What a resize event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeOutcome {
    Resized { aspect: f32 },
    /// Same dimensions as before; nothing touched.
    Unchanged,
    /// Zero-sized surface (minimized window); prior state kept.
    Ignored,
}

/// Output surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        aspect_ratio(self.width, self.height)
    }

    /// Map a pointer position to `[-1, 1]` on each axis, centered on the
    /// viewport, with y pointing up.
    pub fn normalized_pointer(&self, x: f32, y: f32) -> (f32, f32) {
        let half_w = self.width as f32 / 2.0;
        let half_h = self.height as f32 / 2.0;
        (
            ((x - half_w) / half_w).clamp(-1.0, 1.0),
            ((half_h - y) / half_h).clamp(-1.0, 1.0),
        )
    }

    /// Apply new surface dimensions and update the camera's aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32, camera: &mut Camera) -> ResizeOutcome {
        if width == 0 || height == 0 {
            tracing::debug!(width, height, "ignoring zero-sized viewport");
            return ResizeOutcome::Ignored;
        }
        if width == self.width && height == self.height {
            return ResizeOutcome::Unchanged;
        }

        self.width = width;
        self.height = height;
        camera.aspect = self.aspect();
        tracing::debug!(width, height, aspect = camera.aspect, "viewport resized");

        ResizeOutcome::Resized {
            aspect: camera.aspect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_updates_aspect() {
        let mut viewport = Viewport::new(800, 600);
        let mut camera = Camera::new(800, 600);
        let outcome = viewport.resize(1920, 1080, &mut camera);
        assert_eq!(outcome, ResizeOutcome::Resized { aspect: 1920.0 / 1080.0 });
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!((viewport.width(), viewport.height()), (1920, 1080));
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut viewport = Viewport::new(800, 600);
        let mut camera = Camera::new(800, 600);
        viewport.resize(1280, 720, &mut camera);
        let before = camera;
        assert_eq!(viewport.resize(1280, 720, &mut camera), ResizeOutcome::Unchanged);
        assert_eq!(camera, before);
    }

    #[test]
    fn test_zero_size_is_ignored() {
        let mut viewport = Viewport::new(800, 600);
        let mut camera = Camera::new(800, 600);
        assert_eq!(viewport.resize(0, 600, &mut camera), ResizeOutcome::Ignored);
        assert_eq!(viewport.width(), 800);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalized_pointer() {
        let viewport = Viewport::new(800, 600);
        assert_eq!(viewport.normalized_pointer(400.0, 300.0), (0.0, 0.0));
        assert_eq!(viewport.normalized_pointer(800.0, 0.0), (1.0, 1.0));
        assert_eq!(viewport.normalized_pointer(-50.0, 700.0), (-1.0, -1.0));
    }
}
