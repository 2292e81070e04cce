use glam::Vec2;

/// Latest pointer sample, kept in the three coordinate spaces the rest of
/// the program reads.
///
/// Updated on every pointer-move event; the window-half reference point is
/// refreshed on resize without recomputing the stored sample (the next
/// move overwrites it anyway).
#[derive(Debug, Clone, PartialEq)]
pub struct PointerState {
    half: Vec2,
    viewport: Vec2,
    /// Raw pixel offset from the window center, y down.
    offset: Vec2,
    /// Normalized device coordinates in [-1, 1], y up.
    ndc: Vec2,
}

impl PointerState {
    pub fn new(width: u32, height: u32) -> Self {
        let viewport = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        Self {
            half: viewport * 0.5,
            viewport,
            offset: Vec2::ZERO,
            ndc: Vec2::ZERO,
        }
    }

    /// Records a pointer-move event at window coordinates `(x, y)` pixels.
    pub fn moved(&mut self, x: f32, y: f32) {
        self.offset = Vec2::new(x - self.half.x, y - self.half.y);
        self.ndc = Vec2::new(
            (x / self.viewport.x) * 2.0 - 1.0,
            -(y / self.viewport.y) * 2.0 + 1.0,
        );
    }

    /// Recomputes the center reference point after a viewport resize.
    pub fn resized(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        self.half = self.viewport * 0.5;
    }

    /// Pixel offset from the window center (y grows downward).
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Normalized device coordinates (y grows upward).
    pub fn ndc(&self) -> Vec2 {
        self.ndc
    }

    /// Target the camera eases toward: mirrored horizontally, raw
    /// vertically.
    pub fn camera_target(&self) -> Vec2 {
        Vec2::new(-self.offset.x, self.offset.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_maps_to_zero_offset_and_zero_ndc() {
        let mut pointer = PointerState::new(800, 600);
        pointer.moved(400.0, 300.0);
        assert_eq!(pointer.offset(), Vec2::ZERO);
        assert_eq!(pointer.ndc(), Vec2::ZERO);
        assert_eq!(pointer.camera_target(), Vec2::ZERO);
    }

    #[test]
    fn corners_map_to_unit_ndc() {
        let mut pointer = PointerState::new(800, 600);
        pointer.moved(0.0, 0.0);
        assert_eq!(pointer.ndc(), Vec2::new(-1.0, 1.0));
        pointer.moved(800.0, 600.0);
        assert_eq!(pointer.ndc(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn camera_target_mirrors_horizontally() {
        let mut pointer = PointerState::new(800, 600);
        pointer.moved(500.0, 420.0);
        assert_eq!(pointer.offset(), Vec2::new(100.0, 120.0));
        assert_eq!(pointer.camera_target(), Vec2::new(-100.0, 120.0));
    }

    #[test]
    fn resize_moves_the_center_reference() {
        let mut pointer = PointerState::new(800, 600);
        pointer.resized(1600, 900);
        pointer.moved(800.0, 450.0);
        assert_eq!(pointer.offset(), Vec2::ZERO);
    }

    #[test]
    fn zero_size_viewport_is_clamped() {
        let pointer = PointerState::new(0, 0);
        assert_eq!(pointer.ndc(), Vec2::ZERO);
    }
}
