/// Atomium Web - WASM bindings for the page background
///
/// The page owns the WebGL renderer and the `requestAnimationFrame` loop;
/// this module owns the scene. Each frame the page calls `tick()`, re-arms
/// only while it returns `true`, and reads matrices and geometry back as
/// `Float32Array`s.

use atomium_core::{AtomiumConfig, FrameLoop, ResizeOutcome, SceneContext};
use wasm_bindgen::prelude::*;

pub mod buffers;
pub mod share;

pub use share::share_page;

#[wasm_bindgen]
pub struct AtomiumBackground {
    scene: SceneContext,
    frames: FrameLoop,
}

#[wasm_bindgen]
impl AtomiumBackground {
    /// Build the named preset (`landmark`, `lattice`, `spin`, `pointer`)
    #[wasm_bindgen(constructor)]
    pub fn new(preset: &str, width: u32, height: u32) -> Result<AtomiumBackground, JsValue> {
        let config = AtomiumConfig::preset(preset)
            .ok_or_else(|| JsValue::from_str(&format!("unknown preset: {preset}")))?;
        let scene = SceneContext::new(config, width, height).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(AtomiumBackground {
            scene,
            frames: FrameLoop::new(),
        })
    }

    /// Advance one frame. Returns whether the page should request another.
    pub fn tick(&mut self) -> bool {
        self.frames.step(&mut self.scene)
    }

    /// Stop the loop; the next `tick` returns `false`
    pub fn stop(&mut self) {
        self.frames.stop();
    }

    pub fn resume(&mut self) {
        self.frames.resume();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.frames.is_running()
    }

    #[wasm_bindgen(getter)]
    pub fn ticks(&self) -> f64 {
        self.frames.ticks() as f64
    }

    /// Returns `true` when the projection changed and the canvas must be resized
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        matches!(self.scene.resize(width, height), ResizeOutcome::Resized { .. })
    }

    #[wasm_bindgen(getter)]
    pub fn aspect(&self) -> f32 {
        self.scene.camera().aspect
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.scene.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.scene.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.scene.pointer_up();
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.scene.wheel(delta_y);
    }

    /// Column-major transform of the whole lattice group
    pub fn group_matrix(&self) -> Vec<f32> {
        buffers::matrix(&self.scene.pose().matrix())
    }

    pub fn view_matrix(&self) -> Vec<f32> {
        buffers::matrix(&self.scene.camera().view_matrix())
    }

    pub fn projection_matrix(&self) -> Vec<f32> {
        buffers::matrix(&self.scene.camera().projection_matrix())
    }

    /// `x, y, z` per placement
    pub fn placement_offsets(&self) -> Vec<f32> {
        buffers::placement_offsets(self.scene.lattice())
    }

    /// `x, y, z, radius` per sphere of the unit
    pub fn spheres(&self) -> Vec<f32> {
        buffers::spheres(self.scene.unit())
    }

    /// `start xyz, end xyz, radius` per tube of the unit
    pub fn tubes(&self) -> Vec<f32> {
        buffers::tubes(self.scene.unit())
    }

    /// Interleaved `position xyz, normal xyz` of the tessellated unit
    pub fn unit_mesh(&self) -> Vec<f32> {
        buffers::mesh(self.scene.unit_mesh())
    }

    #[wasm_bindgen(getter)]
    pub fn color(&self) -> u32 {
        self.scene.appearance().get().color.to_hex()
    }

    /// Recolor every primitive at once
    #[wasm_bindgen(setter)]
    pub fn set_color(&mut self, hex: u32) {
        self.scene
            .appearance()
            .set_color(atomium_core::Color::from_hex(hex));
    }

    #[wasm_bindgen(getter)]
    pub fn metalness(&self) -> f32 {
        self.scene.appearance().get().metalness
    }

    #[wasm_bindgen(getter)]
    pub fn roughness(&self) -> f32 {
        self.scene.appearance().get().roughness
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Setup panic hook for better error messages in browser console
    console_error_panic_hook::set_once();

    Ok(())
}
