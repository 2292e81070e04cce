use std::collections::HashMap;

use glam::Vec3;
use log::debug;

use crate::geometry::MeshData;
use crate::scene::{Scene, SceneObject, HIGHLIGHT_COLOR};

/// World-space ray cast from the camera through the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Nearest mesh hit by a pick ray.
#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
    pub name: String,
    pub distance: f32,
}

/// Finds the nearest scene object intersected by `ray`, testing the actual
/// mesh triangles in each object's local space.
pub fn pick(scene: &Scene, meshes: &HashMap<String, MeshData>, ray: Ray) -> Option<PickHit> {
    let mut closest: Option<PickHit> = None;
    for object in &scene.objects {
        let Some(mesh) = meshes.get(&object.name) else {
            continue;
        };
        let Some(distance) = intersect_object(object, mesh, ray) else {
            continue;
        };
        if closest
            .as_ref()
            .is_none_or(|best| distance < best.distance)
        {
            closest = Some(PickHit {
                name: object.name.clone(),
                distance,
            });
        }
    }
    closest
}

/// Intersects the ray with one object's mesh. Returns the world-space ray
/// parameter of the nearest front-facing hit, if any.
fn intersect_object(object: &SceneObject, mesh: &MeshData, ray: Ray) -> Option<f32> {
    // Transforming the ray into local space preserves the parameter t as
    // long as the direction is not renormalized.
    let inverse = object.model_matrix().inverse();
    let origin = inverse.transform_point3(ray.origin);
    let direction = inverse.transform_vector3(ray.direction);

    let mut nearest: Option<f32> = None;
    for triangle in mesh.indices.chunks_exact(3) {
        let a = mesh.position(triangle[0]);
        let b = mesh.position(triangle[1]);
        let c = mesh.position(triangle[2]);
        if let Some(t) = ray_triangle_intersect(origin, direction, a, b, c) {
            if nearest.is_none_or(|best| t < best) {
                nearest = Some(t);
            }
        }
    }
    nearest
}

/// Moller-Trumbore ray/triangle intersection. Returns the ray parameter of
/// the hit, or `None` when the ray misses or the triangle is behind it.
fn ray_triangle_intersect(origin: Vec3, direction: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge_ab = b - a;
    let edge_ac = c - a;
    let p = direction.cross(edge_ac);
    let det = edge_ab.dot(p);
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge_ab);
    let v = direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge_ac.dot(q) * inv_det;
    (t > EPSILON).then_some(t)
}

/// Hover highlight state: either nothing is highlighted, or exactly one
/// mesh is, together with the color it had before the highlight.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Hover {
    #[default]
    Idle,
    Highlighting {
        name: String,
        original_color: Vec3,
    },
}

/// State machine that swaps highlight colors as the pointer enters and
/// leaves meshes.
#[derive(Debug, Clone, Default)]
pub struct HoverTracker {
    state: Hover,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Hover {
        &self.state
    }

    /// Name of the currently highlighted mesh, if any.
    pub fn highlighted(&self) -> Option<&str> {
        match &self.state {
            Hover::Idle => None,
            Hover::Highlighting { name, .. } => Some(name),
        }
    }

    /// Applies one pointer-move result to the scene. `hit` is the nearest
    /// intersected mesh name, or `None` when the ray hit empty space
    /// (a normal branch, not an error).
    pub fn update(&mut self, hit: Option<&str>, scene: &mut Scene) {
        match (&self.state, hit) {
            (Hover::Idle, None) => {}
            (Hover::Highlighting { name, .. }, Some(hit)) if name.as_str() == hit => {}
            (Hover::Highlighting { name, original_color }, hit) => {
                restore(scene, name, *original_color);
                self.state = Hover::Idle;
                if let Some(hit) = hit {
                    self.highlight(hit, scene);
                }
            }
            (Hover::Idle, Some(hit)) => self.highlight(hit, scene),
        }
    }

    fn highlight(&mut self, name: &str, scene: &mut Scene) {
        let Some(object) = scene.object_mut(name) else {
            return;
        };
        // Whatever the material shows right now is what gets restored on
        // hover-exit, even if something else recolored it earlier.
        let original_color = object.color;
        object.color = HIGHLIGHT_COLOR;
        debug!("hover enter: {name}");
        self.state = Hover::Highlighting {
            name: name.to_string(),
            original_color,
        };
    }
}

fn restore(scene: &mut Scene, name: &str, color: Vec3) {
    if let Some(object) = scene.object_mut(name) {
        object.color = color;
        debug!("hover leave: {name}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::build_mesh;
    use crate::scene::Primitive;

    fn demo_meshes(scene: &Scene) -> HashMap<String, MeshData> {
        scene
            .objects
            .iter()
            .map(|object| (object.name.clone(), build_mesh(object.primitive)))
            .collect()
    }

    fn toward_cube() -> Ray {
        Ray {
            origin: Vec3::new(0.0, 0.0, 1800.0),
            direction: Vec3::NEG_Z,
        }
    }

    #[test]
    fn ray_through_center_hits_the_cube() {
        let scene = Scene::demo();
        let meshes = demo_meshes(&scene);
        let hit = pick(&scene, &meshes, toward_cube()).unwrap();
        assert_eq!(hit.name, "Cube");
        // Front face of the 180-unit cube sits at z = 90.
        assert!((hit.distance - 1710.0).abs() < 1.0);
    }

    #[test]
    fn ray_past_the_meshes_misses() {
        let scene = Scene::demo();
        let meshes = demo_meshes(&scene);
        let ray = Ray {
            origin: Vec3::new(0.0, 5000.0, 1800.0),
            direction: Vec3::NEG_Z,
        };
        assert!(pick(&scene, &meshes, ray).is_none());
    }

    #[test]
    fn nearest_of_two_overlapping_objects_wins() {
        let mut scene = Scene::demo();
        // Park the torus directly behind the cube on the view axis.
        scene.object_mut("Torus").unwrap().position = Vec3::new(0.0, 0.0, -400.0);
        scene.object_mut("Torus").unwrap().rotation = Vec3::ZERO;
        let meshes = demo_meshes(&scene);
        let hit = pick(&scene, &meshes, toward_cube()).unwrap();
        assert_eq!(hit.name, "Cube");
    }

    #[test]
    fn triangle_hit_reports_distance() {
        let t = ray_triangle_intersect(
            Vec3::new(0.2, 0.2, 5.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert!((t.unwrap() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn triangle_behind_the_ray_is_ignored() {
        let t = ray_triangle_intersect(
            Vec3::new(0.2, 0.2, -5.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn scaled_object_reports_world_distance() {
        let mesh = build_mesh(Primitive::Box { size: 2.0 });
        let object = SceneObject {
            name: "Scaled".to_string(),
            scale: Vec3::splat(10.0),
            ..SceneObject::default()
        };
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 100.0),
            direction: Vec3::NEG_Z,
        };
        // Scaled front face sits at z = 10.
        let t = intersect_object(&object, &mesh, ray).unwrap();
        assert!((t - 90.0).abs() < 1e-3);
    }

    #[test]
    fn first_hover_stores_the_current_color() {
        let mut scene = Scene::demo();
        let original = scene.object("Torus").unwrap().color;
        let mut tracker = HoverTracker::new();

        tracker.update(Some("Torus"), &mut scene);
        assert_eq!(tracker.highlighted(), Some("Torus"));
        assert_eq!(scene.object("Torus").unwrap().color, HIGHLIGHT_COLOR);
        match tracker.state() {
            Hover::Highlighting { original_color, .. } => {
                assert_eq!(*original_color, original);
            }
            Hover::Idle => panic!("expected highlight"),
        }
    }

    #[test]
    fn repeated_hits_on_the_same_mesh_are_idempotent() {
        let mut scene = Scene::demo();
        let mut tracker = HoverTracker::new();
        tracker.update(Some("Cube"), &mut scene);
        let highlighted = scene.clone();
        for _ in 0..5 {
            tracker.update(Some("Cube"), &mut scene);
        }
        assert_eq!(scene, highlighted);
        assert_eq!(tracker.highlighted(), Some("Cube"));
    }

    #[test]
    fn leaving_restores_the_exact_original_color() {
        let mut scene = Scene::demo();
        let original = scene.object("Icosahedron").unwrap().color;
        let mut tracker = HoverTracker::new();
        tracker.update(Some("Icosahedron"), &mut scene);
        tracker.update(None, &mut scene);
        assert_eq!(scene.object("Icosahedron").unwrap().color, original);
        assert_eq!(tracker.state(), &Hover::Idle);
    }

    #[test]
    fn switching_meshes_restores_one_and_highlights_the_other() {
        let mut scene = Scene::demo();
        let torus_color = scene.object("Torus").unwrap().color;
        let mut tracker = HoverTracker::new();

        tracker.update(Some("Torus"), &mut scene);
        tracker.update(Some("Cube"), &mut scene);

        assert_eq!(scene.object("Torus").unwrap().color, torus_color);
        assert_eq!(scene.object("Cube").unwrap().color, HIGHLIGHT_COLOR);
        assert_eq!(tracker.highlighted(), Some("Cube"));
    }

    #[test]
    fn mutated_color_becomes_the_remembered_original() {
        let mut scene = Scene::demo();
        scene.object_mut("Torus").unwrap().color = Vec3::new(0.1, 0.2, 0.3);
        let mut tracker = HoverTracker::new();
        tracker.update(Some("Torus"), &mut scene);
        tracker.update(None, &mut scene);
        assert_eq!(
            scene.object("Torus").unwrap().color,
            Vec3::new(0.1, 0.2, 0.3)
        );
    }

    #[test]
    fn idle_stays_idle_on_empty_space() {
        let mut scene = Scene::demo();
        let before = scene.clone();
        let mut tracker = HoverTracker::new();
        tracker.update(None, &mut scene);
        assert_eq!(scene, before);
        assert_eq!(tracker.state(), &Hover::Idle);
    }
}
