use glam::{Vec2, Vec3};
use winit::event::KeyEvent;
use winit::keyboard::{KeyCode, PhysicalKey};

pub const MOVE_SPEED: f32 = 0.1;
pub const MOUSE_SENSITIVITY: f32 = 0.002;

pub const ROOM_HALF_EXTENT: f32 = 10.0;
pub const PLAYER_RADIUS: f32 = 0.1;
pub const WALL_THICKNESS: f32 = 0.1;

/// Camera position and orientation. Positive pitch looks down; yaw is
/// unbounded and only ever consumed through periodic trig functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub pitch: f32,
    pub yaw: f32,
}

impl Pose {
    pub fn spawn() -> Self {
        Self {
            position: Vec3::new(0.0, 1.7, 5.0),
            pitch: 0.0,
            yaw: 0.0,
        }
    }

    /// View direction shared by the placement solver and the view matrix.
    pub fn view_direction(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            -self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
    }
}

#[derive(Default, Clone, Copy)]
pub struct MovementState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MovementState {
    const fn to_direction(positive: bool, negative: bool) -> f32 {
        match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    /// (forward, strafe, vertical) in -1..=1.
    const fn velocity(&self) -> (f32, f32, f32) {
        (
            Self::to_direction(self.forward, self.backward),
            Self::to_direction(self.right, self.left),
            Self::to_direction(self.up, self.down),
        )
    }
}

/// Per-tick input: active movement intents plus the look delta accumulated
/// from pointer motion since the previous tick.
#[derive(Default)]
pub struct InputState {
    pub movement: MovementState,
    pub joystick: Option<Vec2>,
    look_delta: Vec2,
}

impl InputState {
    /// Accumulate raw pointer motion (x drives yaw, y drives pitch).
    /// Sensitivity is applied by the tick, not here.
    pub fn add_look_delta(&mut self, dx: f32, dy: f32) {
        self.look_delta.x += dx;
        self.look_delta.y += dy;
    }

    pub fn take_look_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.look_delta)
    }

    pub fn process_keyboard(&mut self, event: &KeyEvent) {
        let is_pressed = event.state.is_pressed();
        if let PhysicalKey::Code(keycode) = event.physical_key {
            match keycode {
                KeyCode::KeyW | KeyCode::ArrowUp => self.movement.forward = is_pressed,
                KeyCode::KeyS | KeyCode::ArrowDown => self.movement.backward = is_pressed,
                KeyCode::KeyA | KeyCode::ArrowLeft => self.movement.left = is_pressed,
                KeyCode::KeyD | KeyCode::ArrowRight => self.movement.right = is_pressed,
                KeyCode::Space => self.movement.up = is_pressed,
                KeyCode::ShiftLeft => self.movement.down = is_pressed,
                _ => {}
            }
        }
    }
}

/// First-person camera with collision against the room boundary.
pub struct Camera {
    pub pose: Pose,
    pub input: InputState,
    pub fly: bool,
}

impl Camera {
    pub fn new(fly: bool) -> Self {
        Self {
            pose: Pose::spawn(),
            input: InputState::default(),
            fly,
        }
    }

    pub fn update(&mut self) {
        let look = self.input.take_look_delta();
        self.pose = step(&self.pose, &self.input, look, self.fly);
    }
}

/// One camera tick: look update, movement along yaw-derived horizontal axes,
/// then collision. The whole candidate move is discarded on a boundary hit,
/// never resolved per axis.
pub fn step(pose: &Pose, input: &InputState, look_delta: Vec2, fly: bool) -> Pose {
    let pitch = (pose.pitch + look_delta.y * MOUSE_SENSITIVITY)
        .clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
    let yaw = pose.yaw + look_delta.x * MOUSE_SENSITIVITY;

    // Pitch never affects horizontal movement.
    let forward = Vec3::new(yaw.sin(), 0.0, -yaw.cos());
    let right = Vec3::new(yaw.cos(), 0.0, yaw.sin());

    let (fwd, strafe, vertical) = match input.joystick {
        // Stick up is forward; magnitude scales speed.
        Some(stick) => (-stick.y, stick.x, 0.0),
        None => input.movement.velocity(),
    };

    let mut candidate = pose.position + (forward * fwd + right * strafe) * MOVE_SPEED;
    if fly {
        candidate.y += vertical * MOVE_SPEED;
    }

    let position = if fly || !hits_boundary(candidate) {
        candidate
    } else {
        pose.position
    };

    Pose {
        position,
        pitch,
        yaw,
    }
}

/// True when the point is within the collision margin of the ±10 boundary
/// on x or z. Height is unconstrained.
pub fn hits_boundary(position: Vec3) -> bool {
    let margin = ROOM_HALF_EXTENT - (PLAYER_RADIUS + WALL_THICKNESS);
    position.x < -margin || position.x > margin || position.z < -margin || position.z > margin
}
