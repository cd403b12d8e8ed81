use glam::Vec3;

use crate::camera::Pose;
use crate::scene::PlacedObject;
use crate::texture::TextureId;

/// Distance the picture is pulled back from the wall toward the camera so it
/// never z-fights the wall quad.
pub const WALL_OFFSET: f32 = 0.1;
/// Size of the picture's longer side, world units.
pub const BASE_SIZE: f32 = 2.0;
/// Panel thickness on the unused depth axis.
pub const PANEL_DEPTH: f32 = 0.1;

const PARALLEL_EPSILON: f32 = 1e-4;

/// The four vertical wall planes: outward unit normal and signed distance
/// from the origin.
const WALLS: [(Vec3, f32); 4] = [
    (Vec3::new(0.0, 0.0, 1.0), 10.0),
    (Vec3::new(0.0, 0.0, -1.0), 10.0),
    (Vec3::new(1.0, 0.0, 0.0), 10.0),
    (Vec3::new(-1.0, 0.0, 0.0), 10.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// The view ray does not reach any wall plane at t >= 0 (e.g. looking
    /// straight up or down).
    NoIntersection,
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementError::NoIntersection => write!(f, "view ray does not intersect any wall"),
        }
    }
}

impl std::error::Error for PlacementError {}

/// Project the camera's view ray onto the wall planes and anchor a new
/// picture at the nearest hit.
///
/// `aspect` is the texture's width/height once its image has loaded; while
/// still unknown the panel keeps the default 1x1 footprint.
pub fn place(
    pose: &Pose,
    texture: TextureId,
    aspect: Option<f32>,
) -> Result<PlacedObject, PlacementError> {
    let dir = pose.view_direction();
    let hit = nearest_wall_hit(pose.position, dir).ok_or(PlacementError::NoIntersection)?;

    // Pull back toward the camera, face it, flip the quad upright.
    let position = hit - dir * WALL_OFFSET;
    let yaw = (-dir.x).atan2(-dir.z);
    let rotation = Vec3::new(std::f32::consts::PI, yaw, 0.0);

    Ok(PlacedObject {
        position,
        rotation,
        scale: panel_scale(aspect),
        texture,
    })
}

/// Nearest intersection of the ray with the four wall planes, or `None`
/// when every plane is behind the ray or parallel to it.
pub fn nearest_wall_hit(origin: Vec3, dir: Vec3) -> Option<Vec3> {
    let mut nearest_t = f32::INFINITY;
    let mut nearest = None;

    for (normal, distance) in WALLS {
        let denominator = normal.dot(dir);
        if denominator.abs() <= PARALLEL_EPSILON {
            continue;
        }
        let t = (distance - normal.dot(origin)) / denominator;
        if t >= 0.0 && t < nearest_t {
            nearest_t = t;
            nearest = Some(origin + dir * t);
        }
    }

    nearest
}

/// Panel extents from the image aspect ratio: the longer side spans
/// `BASE_SIZE`, the shorter shrinks by the ratio.
pub fn panel_scale(aspect: Option<f32>) -> Vec3 {
    match aspect {
        Some(aspect) if aspect > 1.0 => Vec3::new(BASE_SIZE, BASE_SIZE / aspect, PANEL_DEPTH),
        Some(aspect) => Vec3::new(BASE_SIZE * aspect, BASE_SIZE, PANEL_DEPTH),
        None => Vec3::new(1.0, 1.0, PANEL_DEPTH),
    }
}
