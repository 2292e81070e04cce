use glam::{Mat4, Vec2, Vec3, Vec4, Vec4Swizzles};

use crate::picking::Ray;

/// Fraction of the remaining distance covered per easing step.
pub const DAMPING: f32 = 0.09;

/// Camera parameters consumed by the renderer's uniform buffer.
#[derive(Clone, Debug)]
pub struct CameraParams {
    pub view_proj: Mat4,
    pub position: Vec3,
}

/// Perspective camera that chases the pointer and always looks at the
/// scene origin.
#[derive(Clone, Debug)]
pub struct PointerCamera {
    pub position: Vec3,
    aspect: f32,
    fov_y: f32,
    near: f32,
    far: f32,
}

impl PointerCamera {
    /// Creates the camera used by the demo scene: narrow 20 degree field of
    /// view, pulled back to z = 1800.
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1800.0),
            aspect: aspect.max(0.01),
            fov_y: 20.0f32.to_radians(),
            near: 1.0,
            far: 10_000.0,
        }
    }

    /// Moves the horizontal/vertical position a fixed fraction of the
    /// remaining distance toward `target`, independently per axis. The z
    /// position is untouched.
    pub fn ease_toward(&mut self, target: Vec2) {
        self.position.x += (target.x - self.position.x) * DAMPING;
        self.position.y += (target.y - self.position.y) * DAMPING;
    }

    /// Updates the aspect ratio after a viewport resize.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// View matrix aimed at the scene origin.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    /// Combined view-projection matrix (wgpu 0..1 depth range).
    pub fn view_proj(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far) * self.view()
    }

    /// Snapshot handed to the renderer.
    pub fn params(&self) -> CameraParams {
        CameraParams {
            view_proj: self.view_proj(),
            position: self.position,
        }
    }

    /// Casts a world-space ray through the given normalized device
    /// coordinate by unprojecting points on the near and far planes.
    pub fn pick_ray(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_proj().inverse();
        let near = inverse * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let far = inverse * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let origin = near.xyz() / near.w;
        let through = far.xyz() / far.w;
        Ray {
            origin,
            direction: (through - origin).normalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_moves_strictly_closer_without_overshoot() {
        let mut camera = PointerCamera::new(16.0 / 9.0);
        let target = Vec2::new(240.0, -130.0);
        let mut previous = camera.position.truncate().distance(target);
        for _ in 0..50 {
            camera.ease_toward(target);
            let remaining = camera.position.truncate().distance(target);
            assert!(remaining < previous);
            // A 0.09 step covers 9% of the gap; the rest must remain.
            assert!((previous - remaining) <= previous * DAMPING + 1e-3);
            previous = remaining;
        }
    }

    #[test]
    fn easing_is_a_fixed_point_at_the_target() {
        let mut camera = PointerCamera::new(1.0);
        camera.position.x = 50.0;
        camera.position.y = -20.0;
        camera.ease_toward(Vec2::new(50.0, -20.0));
        assert_eq!(camera.position.x, 50.0);
        assert_eq!(camera.position.y, -20.0);
    }

    #[test]
    fn easing_leaves_depth_untouched() {
        let mut camera = PointerCamera::new(1.0);
        camera.ease_toward(Vec2::new(500.0, 500.0));
        assert_eq!(camera.position.z, 1800.0);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut camera = PointerCamera::new(800.0 / 600.0);
        assert!((camera.aspect() - 800.0 / 600.0).abs() < 1e-6);
        camera.set_viewport(1600, 900);
        assert!((camera.aspect() - 1600.0 / 900.0).abs() < 1e-6);
    }

    #[test]
    fn center_ray_points_at_the_origin() {
        let camera = PointerCamera::new(1.0);
        let ray = camera.pick_ray(Vec2::ZERO);
        // From (0, 0, 1800) looking at the origin the ray runs along -Z.
        assert!(ray.direction.z < -0.999);
        assert!(ray.origin.z < 1800.0);
        assert!(ray.origin.x.abs() < 1e-3);
    }

    #[test]
    fn offset_ray_tilts_with_the_pointer() {
        let camera = PointerCamera::new(1.0);
        let ray = camera.pick_ray(Vec2::new(0.5, 0.0));
        assert!(ray.direction.x > 0.0);
        let ray = camera.pick_ray(Vec2::new(0.0, -0.5));
        assert!(ray.direction.y < 0.0);
    }
}
