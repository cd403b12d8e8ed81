use glam::{Vec2, Vec3};
use gallery_walk::camera::{
    hits_boundary, step, InputState, Pose, MOUSE_SENSITIVITY, MOVE_SPEED,
};

#[cfg(test)]
mod camera_tests {
    use super::*;

    const FRAC_PI_2: f32 = std::f32::consts::FRAC_PI_2;

    fn pose_at(position: Vec3, yaw: f32) -> Pose {
        Pose {
            position,
            pitch: 0.0,
            yaw,
        }
    }

    #[test]
    fn test_pitch_clamped_looking_down() {
        let pose = Pose::spawn();
        let input = InputState::default();

        let next = step(&pose, &input, Vec2::new(0.0, 100_000.0), false);

        assert_eq!(next.pitch, FRAC_PI_2, "pitch should clamp at +pi/2");
    }

    #[test]
    fn test_pitch_clamped_looking_up() {
        let pose = Pose::spawn();
        let input = InputState::default();

        let next = step(&pose, &input, Vec2::new(0.0, -100_000.0), false);

        assert_eq!(next.pitch, -FRAC_PI_2, "pitch should clamp at -pi/2");
    }

    #[test]
    fn test_yaw_is_unbounded() {
        let mut pose = Pose::spawn();
        let input = InputState::default();

        for _ in 0..100 {
            pose = step(&pose, &input, Vec2::new(1000.0, 0.0), false);
        }

        let expected = 100.0 * 1000.0 * MOUSE_SENSITIVITY;
        assert!(
            (pose.yaw - expected).abs() < 0.01,
            "yaw should accumulate without wrapping, got {}",
            pose.yaw
        );
    }

    #[test]
    fn test_forward_moves_along_negative_z_at_yaw_zero() {
        let pose = pose_at(Vec3::new(0.0, 1.7, 0.0), 0.0);
        let mut input = InputState::default();
        input.movement.forward = true;

        let next = step(&pose, &input, Vec2::ZERO, false);

        assert!((next.position.z - (-MOVE_SPEED)).abs() < 1e-6);
        assert!(next.position.x.abs() < 1e-6);
        assert_eq!(next.position.y, 1.7, "walking should not change height");
    }

    #[test]
    fn test_move_into_wall_is_rejected_wholesale() {
        // One forward step would cross z = -9.8.
        let pose = pose_at(Vec3::new(0.0, 1.7, -9.75), 0.0);
        let mut input = InputState::default();
        input.movement.forward = true;

        let next = step(&pose, &input, Vec2::ZERO, false);

        assert_eq!(
            next.position, pose.position,
            "candidate crossing the boundary must leave the position unchanged"
        );
    }

    #[test]
    fn test_move_into_x_boundary_is_rejected() {
        // yaw = pi/2 faces +x.
        let pose = pose_at(Vec3::new(9.75, 1.7, 0.0), FRAC_PI_2);
        let mut input = InputState::default();
        input.movement.forward = true;

        let next = step(&pose, &input, Vec2::ZERO, false);

        assert_eq!(next.position, pose.position);
    }

    #[test]
    fn test_move_up_to_margin_is_allowed() {
        let pose = pose_at(Vec3::new(0.0, 1.7, -9.65), 0.0);
        let mut input = InputState::default();
        input.movement.forward = true;

        let next = step(&pose, &input, Vec2::ZERO, false);

        assert!(
            (next.position.z - (-9.75)).abs() < 1e-6,
            "moves that stay inside the 9.8 margin should succeed"
        );
    }

    #[test]
    fn test_fly_bypasses_collision() {
        let pose = pose_at(Vec3::new(0.0, 1.7, -9.75), 0.0);
        let mut input = InputState::default();
        input.movement.forward = true;

        let next = step(&pose, &input, Vec2::ZERO, true);

        assert!(
            (next.position.z - (-9.85)).abs() < 1e-6,
            "fly mode should walk through the boundary"
        );
    }

    #[test]
    fn test_fly_vertical_moves_exactly_one_step() {
        let pose = Pose::spawn();
        let mut input = InputState::default();
        input.movement.up = true;

        let up = step(&pose, &input, Vec2::ZERO, true);
        assert!((up.position.y - (pose.position.y + MOVE_SPEED)).abs() < 1e-6);

        input.movement.up = false;
        input.movement.down = true;
        let down = step(&pose, &input, Vec2::ZERO, true);
        assert!((down.position.y - (pose.position.y - MOVE_SPEED)).abs() < 1e-6);
    }

    #[test]
    fn test_vertical_keys_inert_without_fly() {
        let pose = Pose::spawn();
        let mut input = InputState::default();
        input.movement.up = true;

        let next = step(&pose, &input, Vec2::ZERO, false);

        assert_eq!(next.position.y, pose.position.y);
    }

    #[test]
    fn test_joystick_full_deflection_matches_key_speed() {
        let pose = pose_at(Vec3::ZERO, 0.0);
        let mut input = InputState::default();
        // Stick pushed fully up = forward.
        input.joystick = Some(Vec2::new(0.0, -1.0));

        let next = step(&pose, &input, Vec2::ZERO, false);

        assert!((next.position.z - (-MOVE_SPEED)).abs() < 1e-6);
    }

    #[test]
    fn test_joystick_magnitude_scales_speed() {
        let pose = pose_at(Vec3::ZERO, 0.0);
        let mut input = InputState::default();
        input.joystick = Some(Vec2::new(0.5, 0.0));

        let next = step(&pose, &input, Vec2::ZERO, false);

        assert!(
            (next.position.x - 0.5 * MOVE_SPEED).abs() < 1e-6,
            "half deflection should strafe at half speed"
        );
    }

    #[test]
    fn test_look_delta_is_drained_by_update() {
        let mut input = InputState::default();
        input.add_look_delta(100.0, 50.0);

        let first = input.take_look_delta();
        let second = input.take_look_delta();

        assert_eq!(first, Vec2::new(100.0, 50.0));
        assert_eq!(second, Vec2::ZERO, "look delta must not be applied twice");
    }

    #[test]
    fn test_boundary_predicate_margin() {
        assert!(!hits_boundary(Vec3::new(9.8, 0.0, 0.0)));
        assert!(hits_boundary(Vec3::new(9.81, 0.0, 0.0)));
        assert!(hits_boundary(Vec3::new(0.0, 0.0, -9.81)));
        assert!(
            !hits_boundary(Vec3::new(0.0, 100.0, 0.0)),
            "height is never constrained"
        );
    }
}
