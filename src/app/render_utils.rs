use eframe::egui::{Color32, Pos2, Rect};
use glam::Vec3;

use super::camera::OrbitCamera;

const FOV_Y_DEGREES: f32 = 60.0;
const NEAR_PLANE: f32 = 1.0;

/// Pinhole projection derived from the camera each frame. The basis is
/// rebuilt from scratch; no state carries over between frames.
pub(super) struct Projection {
    origin: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    focal: f32,
    center: Pos2,
}

impl Projection {
    pub(super) fn new(camera: &OrbitCamera, rect: Rect) -> Self {
        let forward = (camera.look_at - camera.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z);
        // Degenerate when looking straight up or down; any horizontal axis
        // works there.
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);

        let half_fov = FOV_Y_DEGREES.to_radians() * 0.5;
        let focal = (rect.height() * 0.5) / half_fov.tan();

        Self {
            origin: camera.position,
            right,
            up,
            forward,
            focal,
            center: rect.center(),
        }
    }

    /// Screen position, perspective scale and view-space depth for a world
    /// point. Returns None for points behind the near plane.
    pub(super) fn project(&self, world: Vec3) -> Option<(Pos2, f32, f32)> {
        let relative = world - self.origin;
        let depth = relative.dot(self.forward);
        if depth < NEAR_PLANE {
            return None;
        }

        let scale = self.focal / depth;
        let x = relative.dot(self.right) * scale;
        let y = relative.dot(self.up) * scale;
        // Screen y grows downward.
        Some((Pos2::new(self.center.x + x, self.center.y - y), scale, depth))
    }
}

pub(super) fn to_color32(rgb: [u8; 3]) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// World-space node radius from its byte size, normalized against the
/// active dataset's bounds. A dataset where every node has the same size
/// gets a uniform small radius.
pub(super) fn node_world_radius(size: u64, min_size: u64, max_size: u64) -> f32 {
    if max_size <= min_size {
        return 5.0;
    }
    let norm = (size - min_size) as f32 / (max_size - min_size) as f32;
    10.0 + norm * 30.0
}

pub(super) fn draw_background(painter: &eframe::egui::Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(10, 12, 18));
}
