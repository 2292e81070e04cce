use std::collections::HashMap;

use glam::{EulerRot, Quat, Vec3};

use crate::camera::{CameraParams, PointerCamera};
use crate::geometry::{build_mesh, MeshData};
use crate::input::PointerState;
use crate::picking::{pick, HoverTracker};
use crate::scene::Scene;

/// Per-tick rotation increment for the torus (y axis).
pub const TORUS_SPIN: f32 = -0.01;
/// Per-tick rotation increment for the icosahedron (x and y axes).
pub const ICOSAHEDRON_SPIN: f32 = 0.01;
/// Depth of the point the cube turns to face, in front of the pointer.
pub const CUBE_FACE_DEPTH: f32 = 3.0;

/// Owned application state threaded through the event handlers and the
/// render loop; replaces the shared globals of a typical event-callback
/// setup.
pub struct App {
    scene: Scene,
    meshes: HashMap<String, MeshData>,
    camera: PointerCamera,
    pointer: PointerState,
    hover: HoverTracker,
}

impl App {
    /// Builds the demo scene sized to the initial viewport.
    pub fn new(width: u32, height: u32) -> Self {
        let scene = Scene::demo();
        let meshes = scene
            .objects
            .iter()
            .map(|object| (object.name.clone(), build_mesh(object.primitive)))
            .collect();
        Self {
            scene,
            meshes,
            camera: PointerCamera::new(width.max(1) as f32 / height.max(1) as f32),
            pointer: PointerState::new(width, height),
            hover: HoverTracker::new(),
        }
    }

    /// Advances one frame: spins the animated meshes, then eases the camera
    /// toward the latest pointer target.
    pub fn tick(&mut self) {
        if let Some(torus) = self.scene.object_mut("Torus") {
            torus.rotation.y += TORUS_SPIN;
        }
        if let Some(icosahedron) = self.scene.object_mut("Icosahedron") {
            icosahedron.rotation.x += ICOSAHEDRON_SPIN;
            icosahedron.rotation.y += ICOSAHEDRON_SPIN;
        }
        self.camera.ease_toward(self.pointer.camera_target());
    }

    /// Handles a pointer-move event at window coordinates `(x, y)`: updates
    /// the pointer sample, re-aims the cube at the pointer, and runs one
    /// hover transition against the pick ray.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer.moved(x, y);

        let ndc = self.pointer.ndc();
        self.aim_cube_at(Vec3::new(ndc.x, ndc.y, CUBE_FACE_DEPTH));

        let ray = self.camera.pick_ray(ndc);
        let hit = pick(&self.scene, &self.meshes, ray);
        self.hover
            .update(hit.as_ref().map(|hit| hit.name.as_str()), &mut self.scene);
    }

    /// Handles a viewport resize: new center reference point and camera
    /// aspect ratio. The surface itself is resized by the renderer.
    pub fn resized(&mut self, width: u32, height: u32) {
        self.pointer.resized(width, height);
        self.camera.set_viewport(width, height);
    }

    /// Rotates the cube so its +Z axis points from its position toward
    /// `target`.
    fn aim_cube_at(&mut self, target: Vec3) {
        let Some(cube) = self.scene.object_mut("Cube") else {
            return;
        };
        let direction = target - cube.position;
        if direction.length_squared() < f32::EPSILON {
            return;
        }
        let orientation = Quat::from_rotation_arc(Vec3::Z, direction.normalize());
        // Decompose so that Rx * Ry * Rz rebuilds the same orientation.
        let (x, y, z) = orientation.to_euler(EulerRot::XYZ);
        cube.rotation = Vec3::new(x, y, z);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn mesh(&self, name: &str) -> Option<&MeshData> {
        self.meshes.get(name)
    }

    pub fn meshes(&self) -> &HashMap<String, MeshData> {
        &self.meshes
    }

    pub fn camera(&self) -> &PointerCamera {
        &self.camera
    }

    pub fn camera_params(&self) -> CameraParams {
        self.camera.params()
    }

    pub fn hover(&self) -> &HoverTracker {
        &self.hover
    }
}
