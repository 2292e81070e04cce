use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Color applied to a mesh while the pointer hovers it (`0xffff66`).
pub const HIGHLIGHT_COLOR: Vec3 = Vec3::new(1.0, 1.0, 0.4);

/// Background color behind the scene (`0xf2f2f2`).
pub const BACKGROUND_COLOR: Vec3 = Vec3::new(0.949, 0.949, 0.949);

/// Runtime representation of the scene: renderable objects plus lights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub lights: Vec<Light>,
}

impl Scene {
    /// Builds the fixed demo scene: a textured cube at the origin, an
    /// icosahedron to its right, a torus to its left, and a three-point
    /// directional light rig.
    pub fn demo() -> Self {
        let objects = vec![
            SceneObject {
                name: "Cube".to_string(),
                primitive: Primitive::Box { size: 180.0 },
                color: Vec3::ONE,
                textured: true,
                // Texture-mapped material, not affected by the lights.
                lit: false,
                ..SceneObject::default()
            },
            SceneObject {
                name: "Icosahedron".to_string(),
                primitive: Primitive::Icosahedron { radius: 90.0 },
                color: hex_color(0x00ffcc),
                position: Vec3::new(350.0, 0.0, 0.0),
                ..SceneObject::default()
            },
            SceneObject {
                name: "Torus".to_string(),
                primitive: Primitive::Torus {
                    radius: 80.0,
                    tube: 30.0,
                },
                color: hex_color(0xff0066),
                position: Vec3::new(-350.0, 0.0, 0.0),
                // One-time initial pose in radians; the per-frame spin
                // accumulates on top of it.
                rotation: Vec3::new(10.0, 5.0, 15.0),
                ..SceneObject::default()
            },
        ];

        let lights = vec![
            // Key light, hsl(30, 100%, 75%).
            Light {
                position: Vec3::new(-100.0, 0.0, 100.0),
                color: Vec3::new(1.0, 0.75, 0.5),
                intensity: 1.0,
            },
            // Fill light, hsl(240, 100%, 75%).
            Light {
                position: Vec3::new(100.0, 0.0, 100.0),
                color: Vec3::new(0.5, 0.5, 1.0),
                intensity: 0.75,
            },
            // Back light.
            Light {
                position: Vec3::new(100.0, 0.0, -100.0).normalize(),
                color: Vec3::ONE,
                intensity: 1.0,
            },
        ];

        Self { objects, lights }
    }

    /// Returns a reference to the named object.
    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|object| object.name == name)
    }

    /// Returns a mutable reference to the named object.
    pub fn object_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|object| object.name == name)
    }
}

/// A renderable mesh entity in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub primitive: Primitive,
    pub color: Vec3,
    pub position: Vec3,
    /// Euler angles in radians; the model matrix composes Rx * Ry * Rz.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub textured: bool,
    pub lit: bool,
}

impl Default for SceneObject {
    fn default() -> Self {
        Self {
            name: String::new(),
            primitive: Primitive::Box { size: 1.0 },
            color: Vec3::ONE,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            textured: false,
            lit: true,
        }
    }
}

impl SceneObject {
    /// Object-to-world transform: scale, then rotate Rx * Ry * Rz, then
    /// translate.
    pub fn model_matrix(&self) -> Mat4 {
        let translation = Mat4::from_translation(self.position);
        let rotation = Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z);
        let scale = Mat4::from_scale(self.scale);
        translation * rotation * scale
    }
}

/// Geometry descriptor for one of the built-in primitives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    Box { size: f32 },
    Icosahedron { radius: f32 },
    Torus { radius: f32, tube: f32 },
}

/// Directional light source. The position defines the direction the light
/// arrives from; every light is aimed at the scene origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

/// Converts a packed `0xRRGGBB` color to an RGB vector in [0, 1].
pub fn hex_color(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_scene_has_three_meshes_and_three_lights() {
        let scene = Scene::demo();
        assert_eq!(scene.objects.len(), 3);
        assert_eq!(scene.lights.len(), 3);
        assert!(scene.object("Cube").is_some());
        assert!(scene.object("Icosahedron").is_some());
        assert!(scene.object("Torus").is_some());
    }

    #[test]
    fn torus_keeps_its_initial_pose() {
        let scene = Scene::demo();
        let torus = scene.object("Torus").unwrap();
        assert_eq!(torus.rotation, Vec3::new(10.0, 5.0, 15.0));
        assert_eq!(torus.position, Vec3::new(-350.0, 0.0, 0.0));
    }

    #[test]
    fn light_rig_matches_the_hsl_constants() {
        let scene = Scene::demo();
        // Key hsl(30, 100%, 75%), fill hsl(240, 100%, 75%), white back.
        assert_eq!(scene.lights[0].color, Vec3::new(1.0, 0.75, 0.5));
        assert_eq!(scene.lights[0].intensity, 1.0);
        assert_eq!(scene.lights[1].color, Vec3::new(0.5, 0.5, 1.0));
        assert_eq!(scene.lights[1].intensity, 0.75);
        assert_eq!(scene.lights[2].color, Vec3::ONE);
        assert!((scene.lights[2].position.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cube_is_textured_and_unlit() {
        let scene = Scene::demo();
        let cube = scene.object("Cube").unwrap();
        assert!(cube.textured);
        assert!(!cube.lit);
        assert_eq!(cube.position, Vec3::ZERO);
    }

    #[test]
    fn object_mut_edits_in_place() {
        let mut scene = Scene::demo();
        scene.object_mut("Icosahedron").unwrap().color = Vec3::ZERO;
        assert_eq!(scene.object("Icosahedron").unwrap().color, Vec3::ZERO);
    }

    #[test]
    fn hex_color_unpacks_channels() {
        assert_eq!(hex_color(0xff0066), Vec3::new(1.0, 0.0, 0.4));
        assert_eq!(hex_color(0x00ffcc), Vec3::new(0.0, 1.0, 0.8));
    }

    #[test]
    fn model_matrix_rotates_about_z_before_x() {
        use std::f32::consts::FRAC_PI_2;
        let object = SceneObject {
            rotation: Vec3::new(FRAC_PI_2, 0.0, FRAC_PI_2),
            ..SceneObject::default()
        };
        // Rx * Rz: the z quarter-turn sends Y to -X, which the x
        // quarter-turn then leaves in place.
        let rotated = object.model_matrix().transform_vector3(Vec3::Y);
        assert!((rotated - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn model_matrix_applies_translation() {
        let object = SceneObject {
            position: Vec3::new(1.0, 2.0, 3.0),
            ..SceneObject::default()
        };
        let transformed = object.model_matrix().transform_point3(Vec3::ZERO);
        assert_eq!(transformed, Vec3::new(1.0, 2.0, 3.0));
    }
}
