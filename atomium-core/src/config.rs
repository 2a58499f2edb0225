/// Scene constants and the presets built from them.
///
/// Everything here is fixed at build time; hosts pick a preset by name and
/// may adjust fields before creating a [`SceneContext`](crate::SceneContext).

use nalgebra::{Point3, Vector3};

use crate::appearance::{Appearance, Color};
use crate::geometry::Tessellation;
use crate::structure::StrutPattern;
use crate::transform::Axis;

pub const SPHERE_RADIUS: f32 = 1.2;
pub const TUBE_RADIUS: f32 = 0.2;
pub const CORNER_OFFSET: f32 = 7.0;
pub const GRID_SIZE: u32 = 4;
pub const SPACING: f32 = 50.0;
pub const ORBIT_DAMPING: f32 = 0.05;
pub const AXIAL_INCREMENT: f32 = 0.05;

/// Shape and surface of one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConfig {
    pub corner_offset: f32,
    pub sphere_radius: f32,
    pub tube_radius: f32,
    pub pattern: StrutPattern,
    pub appearance: Appearance,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            corner_offset: CORNER_OFFSET,
            sphere_radius: SPHERE_RADIUS,
            tube_radius: TUBE_RADIUS,
            pattern: StrutPattern::CubeEdges,
            appearance: Appearance::silver(),
        }
    }
}

/// How many units are placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Layout {
    Single,
    Grid { grid_size: u32, spacing: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
}

/// Light descriptors passed through to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    pub ambient: Color,
    pub directional: Color,
    pub directional_intensity: f32,
    /// Points from the scene toward the light.
    pub direction: Vector3<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitConfig {
    pub damping: f32,
    pub rotate_speed: f32,
    pub enable_zoom: bool,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            damping: ORBIT_DAMPING,
            rotate_speed: 1.0,
            enable_zoom: true,
            min_distance: 1.0,
            max_distance: 1000.0,
        }
    }
}

/// Bounds of a sawtooth loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopRange {
    /// `[0, limit)`, typically the lattice spacing.
    ZeroTo(f32),
    /// `[-limit, limit)`.
    Symmetric(f32),
}

impl LoopRange {
    pub fn bounds(self) -> (f32, f32) {
        match self {
            LoopRange::ZeroTo(limit) => (0.0, limit),
            LoopRange::Symmetric(limit) => (-limit, limit),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxialConfig {
    pub axis: Axis,
    pub increment: f32,
    pub range: LoopRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinConfig {
    pub rate_x: f32,
    pub rate_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerConfig {
    pub sensitivity_x: f32,
    pub sensitivity_y: f32,
}

/// Animation modes; any combination may be active.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationConfig {
    pub orbit: Option<OrbitConfig>,
    pub axial: Option<AxialConfig>,
    pub spin: Option<SpinConfig>,
    pub pointer: Option<PointerConfig>,
}

/// Complete description of a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomiumConfig {
    pub unit: UnitConfig,
    pub layout: Layout,
    pub camera: CameraConfig,
    pub lights: LightRig,
    pub animation: AnimationConfig,
    pub tessellation: Tessellation,
}

impl AtomiumConfig {
    /// A single unit under a free orbit camera.
    pub fn landmark() -> Self {
        Self {
            unit: UnitConfig::default(),
            layout: Layout::Single,
            camera: CameraConfig {
                fov_degrees: 75.0,
                near: 0.1,
                far: 1000.0,
                position: Point3::new(0.0, 10.0, 25.0),
                target: Point3::origin(),
            },
            lights: LightRig {
                ambient: Color::from_hex(0xcccccc),
                directional: Color::from_hex(0xffffff),
                directional_intensity: 0.8,
                direction: Vector3::new(1.0, 1.0, 1.0),
            },
            animation: AnimationConfig {
                orbit: Some(OrbitConfig::default()),
                ..AnimationConfig::default()
            },
            tessellation: Tessellation::default(),
        }
    }

    /// The page background: a 5×5×5 lattice drifting toward the viewer.
    pub fn background_lattice() -> Self {
        Self {
            unit: UnitConfig {
                appearance: Appearance::steel(),
                ..UnitConfig::default()
            },
            layout: Layout::Grid {
                grid_size: GRID_SIZE,
                spacing: SPACING,
            },
            camera: CameraConfig {
                fov_degrees: 60.0,
                near: 0.1,
                far: 2000.0,
                position: Point3::new(0.0, 0.0, 80.0),
                target: Point3::origin(),
            },
            lights: LightRig {
                ambient: Color::from_hex(0x404040),
                directional: Color::from_hex(0xffffff),
                directional_intensity: 0.7,
                direction: Vector3::new(0.5, 1.0, 1.0),
            },
            animation: AnimationConfig {
                orbit: Some(OrbitConfig {
                    enable_zoom: false,
                    ..OrbitConfig::default()
                }),
                axial: Some(AxialConfig {
                    axis: Axis::Z,
                    increment: AXIAL_INCREMENT,
                    range: LoopRange::ZeroTo(SPACING),
                }),
                ..AnimationConfig::default()
            },
            tessellation: Tessellation::default(),
        }
    }

    /// A single unit tumbling on two axes.
    pub fn spinning() -> Self {
        Self {
            animation: AnimationConfig {
                spin: Some(SpinConfig {
                    rate_x: 0.005,
                    rate_y: 0.01,
                }),
                ..AnimationConfig::default()
            },
            ..Self::landmark()
        }
    }

    /// A single unit that turns to follow the pointer.
    pub fn pointer_reactive() -> Self {
        Self {
            animation: AnimationConfig {
                pointer: Some(PointerConfig {
                    sensitivity_x: 0.5,
                    sensitivity_y: 0.5,
                }),
                ..AnimationConfig::default()
            },
            ..Self::landmark()
        }
    }

    /// Look up a preset by its host-facing name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "landmark" => Some(Self::landmark()),
            "lattice" => Some(Self::background_lattice()),
            "spin" => Some(Self::spinning()),
            "pointer" => Some(Self::pointer_reactive()),
            _ => None,
        }
    }
}

impl Default for AtomiumConfig {
    fn default() -> Self {
        Self::background_lattice()
    }
}
