use glam::Vec3;
use image::{Rgba, RgbaImage};

use crate::texture::{TextureId, TextureStore, WrapMode};

/// A flat textured quad in the room: either one of the six fixed room
/// surfaces or a user-placed picture panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedObject {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub texture: TextureId,
}

/// The room plus the ordered picture sequence. Insertion order is draw
/// order; the six room surfaces always come first and are never serialized.
pub struct Scene {
    objects: Vec<PlacedObject>,
    room_len: usize,
}

impl Scene {
    /// Build the 20x20x5 room: four walls, ceiling, floor. Walls stay on the
    /// white placeholder; floor and ceiling tile `surface_texture` 5x5.
    pub fn with_room(textures: &mut TextureStore, surface_image: RgbaImage) -> Self {
        let wall = textures.white();
        let floor = textures.from_image(surface_image.clone(), WrapMode::Repeat, 5.0, 5.0);
        let ceiling = textures.from_image(surface_image, WrapMode::Repeat, 5.0, 5.0);

        let half_pi = std::f32::consts::FRAC_PI_2;
        let objects = vec![
            PlacedObject {
                position: Vec3::new(0.0, 2.5, -10.0),
                rotation: Vec3::ZERO,
                scale: Vec3::new(20.0, 5.0, 1.0),
                texture: wall,
            },
            PlacedObject {
                position: Vec3::new(0.0, 2.5, 10.0),
                rotation: Vec3::ZERO,
                scale: Vec3::new(20.0, 5.0, 1.0),
                texture: wall,
            },
            PlacedObject {
                position: Vec3::new(10.0, 2.5, 0.0),
                rotation: Vec3::new(0.0, half_pi, 0.0),
                scale: Vec3::new(20.0, 5.0, 1.0),
                texture: wall,
            },
            PlacedObject {
                position: Vec3::new(-10.0, 2.5, 0.0),
                rotation: Vec3::new(0.0, half_pi, 0.0),
                scale: Vec3::new(20.0, 5.0, 1.0),
                texture: wall,
            },
            PlacedObject {
                position: Vec3::ZERO,
                rotation: Vec3::new(half_pi, 0.0, 0.0),
                scale: Vec3::new(20.0, 20.0, 0.0),
                texture: ceiling,
            },
            PlacedObject {
                position: Vec3::new(0.0, 5.0, 0.0),
                rotation: Vec3::new(half_pi, 0.0, 0.0),
                scale: Vec3::new(20.0, 20.0, 0.0),
                texture: floor,
            },
        ];
        let room_len = objects.len();

        Self { objects, room_len }
    }

    /// An empty scene without room geometry. Test hook for the scene-file
    /// round trip.
    pub fn empty() -> Self {
        Self {
            objects: Vec::new(),
            room_len: 0,
        }
    }

    /// All objects in draw order.
    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    /// The user-placed pictures, excluding room geometry.
    pub fn placed(&self) -> &[PlacedObject] {
        &self.objects[self.room_len..]
    }

    pub fn add(&mut self, object: PlacedObject) {
        self.objects.push(object);
    }

    /// Replace the whole user-placed sequence, keeping room geometry.
    pub fn replace_placed(&mut self, objects: Vec<PlacedObject>) {
        self.objects.truncate(self.room_len);
        self.objects.extend(objects);
    }
}

/// Fallback floor/ceiling pattern when no texture file is configured:
/// a two-tone checkerboard. Tiled 5x5 across the surface by the room's
/// texture scale.
pub fn checkerboard_image() -> RgbaImage {
    const SIZE: u32 = 128;
    const CELLS: u32 = 8;
    let light = Rgba([214, 208, 196, 255]);
    let dark = Rgba([168, 160, 148, 255]);

    RgbaImage::from_fn(SIZE, SIZE, |x, y| {
        let cell = SIZE / CELLS;
        if ((x / cell) + (y / cell)) % 2 == 0 {
            light
        } else {
            dark
        }
    })
}
