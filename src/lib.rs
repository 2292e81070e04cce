//! Interactive 3D primitive scene with a pointer-eased camera and hover
//! picking.
//!
//! The crate exposes the scene description, the per-frame control loop and
//! the wgpu renderer as separate building blocks.  Everything except the
//! renderer is free of GPU and windowing dependencies so the control loop
//! stays testable headless.

pub mod app;
pub mod assets;
pub mod camera;
pub mod geometry;
pub mod input;
pub mod picking;
pub mod render;
pub mod scene;

pub use app::App;
pub use assets::{load_texture, placeholder_texture, AssetError};
pub use camera::{CameraParams, PointerCamera};
pub use geometry::{build_mesh, MeshData};
pub use input::PointerState;
pub use picking::{pick, Hover, HoverTracker, PickHit, Ray};
pub use render::Renderer;
pub use scene::{Light, Primitive, Scene, SceneObject};
