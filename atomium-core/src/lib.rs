/// Atomium Core Library - procedural lattice generation and animation
///
/// This library derives the node/strut structure of one Atomium unit, builds
/// renderable primitives for it, tiles it into a lattice and drives the
/// per-frame animation. It produces geometry and transforms only; hosts own
/// the rendering and the event loop.

pub mod animation;
pub mod appearance;
pub mod builder;
pub mod config;
pub mod error;
pub mod geometry;
pub mod lattice;
pub mod projection;
pub mod scene;
pub mod share;
pub mod structure;
pub mod transform;
pub mod viewport;

// Re-export commonly used types
pub use animation::{Animator, AxialLoop, OrbitControls, PointerRotation, Spin, TickOutcome};
pub use appearance::{Appearance, Color, SharedAppearance};
pub use builder::{build, Primitive, RenderableSet, SpherePrimitive, TubePrimitive};
pub use config::AtomiumConfig;
pub use error::{AtomiumError, Result};
pub use geometry::{Mesh, Tessellation, Triangle, Vertex};
pub use lattice::{tile, Lattice, Placement};
pub use projection::Camera;
pub use scene::{DrawItem, FrameLoop, SceneContext};
pub use share::{share_or_copy, Clipboard, ShareOutcome, ShareRequest, ShareTarget};
pub use structure::{generate, generate_with, Node, Strut, StrutPattern, Structure};
pub use transform::{Axis, Pose, RotationState, Transform};
pub use viewport::{ResizeOutcome, Viewport};
