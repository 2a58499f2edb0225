/// Scene context: the explicit owner of everything a running session needs.
///
/// A host creates one [`SceneContext`] when the surface appears, feeds it
/// input events, calls [`FrameLoop::step`] from its refresh callback and drops
/// the context on teardown.

use std::rc::Rc;

use nalgebra::Matrix4;

use crate::animation::{Animator, TickOutcome};
use crate::appearance::SharedAppearance;
use crate::builder::{build, Primitive, RenderableSet};
use crate::config::{AtomiumConfig, Layout, LightRig};
use crate::error::Result;
use crate::geometry::Mesh;
use crate::lattice::{tile, Lattice, Placement};
use crate::projection::Camera;
use crate::structure::generate_with;
use crate::transform::Pose;
use crate::viewport::{ResizeOutcome, Viewport};

/// One primitive of one placement, ready for the renderer.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    pub placement: &'a Placement,
    pub primitive: &'a Primitive,
    /// Placement-to-world transform including the group pose.
    pub world: Matrix4<f32>,
    pub appearance: &'a SharedAppearance,
}

/// Generated geometry, camera, viewport and animation for one session.
#[derive(Debug)]
pub struct SceneContext {
    config: AtomiumConfig,
    lattice: Lattice,
    unit_mesh: Rc<Mesh>,
    camera: Camera,
    viewport: Viewport,
    animator: Animator,
}

impl SceneContext {
    /// Generate, build and tile the scene described by `config`.
    pub fn new(config: AtomiumConfig, width: u32, height: u32) -> Result<Self> {
        let unit = &config.unit;
        let structure = generate_with(unit.corner_offset, unit.pattern)?;
        let appearance = SharedAppearance::new(unit.appearance);
        let renderables = Rc::new(build(&structure, unit.sphere_radius, unit.tube_radius, appearance)?);
        let unit_mesh = Rc::new(renderables.tessellate(&config.tessellation));

        let lattice = match config.layout {
            Layout::Single => Lattice::single(renderables),
            Layout::Grid { grid_size, spacing } => tile(renderables, grid_size, spacing)?,
        };

        let viewport = Viewport::new(width, height);
        let camera = Camera::from_config(&config.camera, viewport.width(), viewport.height());
        let animator = Animator::new(&config.animation, &camera)?;

        tracing::info!(
            placements = lattice.len(),
            triangles_per_unit = unit_mesh.len(),
            width = viewport.width(),
            height = viewport.height(),
            "scene created"
        );

        Ok(Self {
            config,
            lattice,
            unit_mesh,
            camera,
            viewport,
            animator,
        })
    }

    pub fn config(&self) -> &AtomiumConfig {
        &self.config
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn unit(&self) -> &Rc<RenderableSet> {
        self.lattice.unit()
    }

    /// Tessellated unit, shared by every placement.
    pub fn unit_mesh(&self) -> &Rc<Mesh> {
        &self.unit_mesh
    }

    pub fn appearance(&self) -> &SharedAppearance {
        &self.lattice.unit().appearance
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn lights(&self) -> &LightRig {
        &self.config.lights
    }

    pub fn pose(&self) -> &Pose {
        &self.lattice.pose
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Advance animation by one frame.
    pub fn tick(&mut self) -> TickOutcome {
        self.animator.tick(&mut self.lattice.pose, &mut self.camera)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> ResizeOutcome {
        self.viewport.resize(width, height, &mut self.camera)
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.animator.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.animator
            .pointer_move(x, y, &self.viewport, &mut self.lattice.pose);
    }

    pub fn pointer_up(&mut self) {
        self.animator.pointer_up();
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.animator.wheel(delta_y);
    }

    /// World matrix of each placement, in placement order.
    pub fn placement_matrices(&self) -> impl Iterator<Item = (&Placement, Matrix4<f32>)> + '_ {
        let group = self.lattice.pose.matrix();
        self.lattice
            .placements()
            .iter()
            .map(move |p| (p, group * p.matrix()))
    }

    /// Flatten group → placements → primitives.
    pub fn draw_items(&self) -> impl Iterator<Item = DrawItem<'_>> + '_ {
        self.placement_matrices().flat_map(move |(placement, world)| {
            placement.unit.primitives.iter().map(move |primitive| DrawItem {
                placement,
                primitive,
                world,
                appearance: &placement.unit.appearance,
            })
        })
    }
}

/// Cooperative frame scheduler state.
///
/// The host calls [`step`](Self::step) from each refresh callback and re-arms
/// the callback only while it returns `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLoop {
    running: bool,
    ticks: u64,
    rejected: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            running: true,
            ticks: 0,
            rejected: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn rejected_frames(&self) -> u64 {
        self.rejected
    }

    /// Run one tick if the loop is live. Returns whether to re-arm.
    pub fn step(&mut self, scene: &mut SceneContext) -> bool {
        if !self.running {
            return false;
        }
        if scene.tick() == TickOutcome::Rejected {
            self.rejected += 1;
        }
        self.ticks += 1;
        true
    }

    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!(ticks = self.ticks, "frame loop stopped");
        }
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}
