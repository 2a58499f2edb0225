/// Surface appearance shared by every primitive of a unit
use std::cell::RefCell;
use std::rc::Rc;

/// Linear RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }
}

/// Color plus the two scattering parameters the renderer needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub color: Color,
    /// Metal-like reflectivity in `[0, 1]`
    pub metalness: f32,
    /// Surface roughness in `[0, 1]`
    pub roughness: f32,
}

impl Appearance {
    pub fn new(color: Color, metalness: f32, roughness: f32) -> Self {
        Self {
            color,
            metalness: metalness.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
        }
    }

    /// Polished silver used by the single landmark scene.
    pub fn silver() -> Self {
        Self::new(Color::from_hex(0xc0c0c0), 0.9, 0.2)
    }

    /// Brushed steel used by the background lattice.
    pub fn steel() -> Self {
        Self::new(Color::from_hex(0xaaaaaa), 1.0, 0.3)
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self::silver()
    }
}

/// One appearance referenced by many primitives.
///
/// Cloning the handle shares the underlying value, so an update through any
/// clone is visible to every primitive holding it.
#[derive(Debug, Clone)]
pub struct SharedAppearance(Rc<RefCell<Appearance>>);

impl SharedAppearance {
    pub fn new(appearance: Appearance) -> Self {
        Self(Rc::new(RefCell::new(appearance)))
    }

    pub fn get(&self) -> Appearance {
        *self.0.borrow()
    }

    pub fn set(&self, appearance: Appearance) {
        *self.0.borrow_mut() = appearance;
    }

    pub fn set_color(&self, color: Color) {
        self.0.borrow_mut().color = color;
    }

    /// Whether both handles point at the same appearance
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of live handles
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl Default for SharedAppearance {
    fn default() -> Self {
        Self::new(Appearance::default())
    }
}
