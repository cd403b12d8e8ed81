use glam::Vec3;
use gallery_walk::camera::Pose;
use gallery_walk::placement::{nearest_wall_hit, place, panel_scale, PlacementError};
use gallery_walk::texture::TextureId;

#[cfg(test)]
mod placement_tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn pose(position: Vec3, pitch: f32, yaw: f32) -> Pose {
        Pose {
            position,
            pitch,
            yaw,
        }
    }

    fn assert_vec3_near(actual: Vec3, expected: Vec3, context: &str) {
        assert!(
            (actual - expected).length() < EPSILON,
            "{context}: expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_looking_down_negative_z_hits_far_wall() {
        let pose = pose(Vec3::ZERO, 0.0, 0.0);

        let object = place(&pose, TextureId(0), None).expect("ray should hit the z=-10 wall");

        assert_vec3_near(object.position, Vec3::new(0.0, 0.0, -9.9), "anchor");
        assert!(
            object.rotation.y.abs() < EPSILON,
            "picture should face straight back, got yaw {}",
            object.rotation.y
        );
        assert!(
            (object.rotation.x - std::f32::consts::PI).abs() < EPSILON,
            "quad keeps the fixed pi flip"
        );
    }

    #[test]
    fn test_ray_parallel_to_all_walls_fails() {
        // Straight up: pitch = -pi/2 gives direction (0, 1, 0).
        let pose = pose(Vec3::ZERO, -std::f32::consts::FRAC_PI_2, 0.0);

        let result = place(&pose, TextureId(0), None);

        assert_eq!(result.unwrap_err(), PlacementError::NoIntersection);
    }

    #[test]
    fn test_nearest_wall_wins() {
        // Close to the +x wall, looking at it.
        let origin = Vec3::new(5.0, 1.7, 0.0);
        let pose = pose(origin, 0.0, std::f32::consts::FRAC_PI_2);

        let object = place(&pose, TextureId(0), None).expect("should hit x=10 wall");

        assert_vec3_near(object.position, Vec3::new(9.9, 1.7, 0.0), "anchor");
        assert!(
            (object.rotation.y - (-std::f32::consts::FRAC_PI_2)).abs() < EPSILON,
            "picture yaw should face the camera"
        );
    }

    #[test]
    fn test_slanted_ray_anchors_below_eye_height() {
        // Looking down at 45 degrees still intersects a vertical wall.
        let pose = pose(Vec3::new(0.0, 1.7, 5.0), std::f32::consts::FRAC_PI_4, 0.0);

        let object = place(&pose, TextureId(0), None).expect("slanted ray still reaches a wall");

        assert!(
            (object.position.z - (-9.9 + 0.1 * (1.0 - 2.0f32.sqrt() / 2.0))).abs() < 0.1,
            "anchor should sit just inside the far wall, got {:?}",
            object.position
        );
        assert!(
            object.position.y < pose.position.y,
            "looking down should anchor below eye height"
        );
    }

    #[test]
    fn test_nearest_wall_hit_from_origin() {
        let hit = nearest_wall_hit(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
            .expect("axis-aligned ray must hit");
        assert_vec3_near(hit, Vec3::new(0.0, 0.0, -10.0), "hit point");
    }

    #[test]
    fn test_nearest_wall_hit_ignores_walls_behind() {
        // From near the +x wall looking at -x: the +x wall is behind.
        let hit = nearest_wall_hit(Vec3::new(9.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0))
            .expect("should hit the -x wall");
        assert_vec3_near(hit, Vec3::new(-10.0, 0.0, 0.0), "hit point");
    }

    #[test]
    fn test_wide_image_scale() {
        // 800x400 -> aspect 2.0.
        let scale = panel_scale(Some(2.0));
        assert_vec3_near(scale, Vec3::new(2.0, 1.0, 0.1), "wide image");
    }

    #[test]
    fn test_tall_image_scale() {
        // 400x800 -> aspect 0.5.
        let scale = panel_scale(Some(0.5));
        assert_vec3_near(scale, Vec3::new(1.0, 2.0, 0.1), "tall image");
    }

    #[test]
    fn test_square_image_scale() {
        let scale = panel_scale(Some(1.0));
        assert_vec3_near(scale, Vec3::new(2.0, 2.0, 0.1), "square image");
    }

    #[test]
    fn test_unknown_aspect_keeps_default_footprint() {
        let scale = panel_scale(None);
        assert_vec3_near(scale, Vec3::new(1.0, 1.0, 0.1), "unloaded texture");
    }

    #[test]
    fn test_placed_object_carries_texture_id() {
        let pose = pose(Vec3::ZERO, 0.0, 0.0);
        let object = place(&pose, TextureId(7), Some(2.0)).unwrap();
        assert_eq!(object.texture, TextureId(7));
        assert_vec3_near(object.scale, Vec3::new(2.0, 1.0, 0.1), "scale from aspect");
    }
}
