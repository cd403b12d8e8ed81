use std::path::Path;

use anyhow::Context;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::{PlacedObject, Scene};
use crate::texture::{self, ImageState, TextureStore, WrapMode};

/// One picture panel in the scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedObjectRecord {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    pub texture: TextureRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureRecord {
    /// Base64 PNG data URL (or a remote URL in hand-written files). Absent
    /// when the image could not be encoded at export time.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image: Option<String>,
    #[serde(default)]
    pub repeat: bool,
    #[serde(rename = "scaleS", default = "one")]
    pub scale_s: f32,
    #[serde(rename = "scaleT", default = "one")]
    pub scale_t: f32,
}

fn one() -> f32 {
    1.0
}

/// Serialize the user-placed pictures as the scene-file JSON: an array whose
/// first element is the flat record array. Per-object image encode failures
/// are logged and leave that record's `image` unset; export continues.
pub fn export_scene(scene: &Scene, textures: &TextureStore) -> anyhow::Result<String> {
    let records: Vec<PlacedObjectRecord> = scene
        .placed()
        .iter()
        .map(|object| to_record(object, textures))
        .collect();

    serde_json::to_string(&vec![records]).context("serialize scene")
}

fn to_record(object: &PlacedObject, textures: &TextureStore) -> PlacedObjectRecord {
    let entry = textures.entry(object.texture);
    let image = match &entry.state {
        ImageState::Ready(pixels) => match texture::encode_png_data_url(pixels) {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("skipping image for object at {:?}: {e}", object.position);
                None
            }
        },
        _ => {
            log::warn!(
                "skipping image for object at {:?}: not loaded",
                object.position
            );
            None
        }
    };

    PlacedObjectRecord {
        position: object.position.to_array(),
        rotation: object.rotation.to_array(),
        scale: object.scale.to_array(),
        texture: TextureRecord {
            image,
            repeat: entry.wrap.is_repeat(),
            scale_s: entry.scale_s,
            scale_t: entry.scale_t,
        },
    }
}

/// Parse a scene file and replace the current picture sequence with its
/// records, resolving each image through the texture store. Malformed input
/// fails before the scene is touched. Returns the number of objects loaded.
pub fn import_scene(
    json: &str,
    scene: &mut Scene,
    textures: &mut TextureStore,
) -> anyhow::Result<usize> {
    let mut layers: Vec<Vec<PlacedObjectRecord>> =
        serde_json::from_str(json).context("parse scene file")?;
    if layers.is_empty() {
        anyhow::bail!("scene file contains no object array");
    }
    let records = layers.swap_remove(0);

    let objects: Vec<PlacedObject> = records
        .into_iter()
        .map(|record| from_record(record, textures))
        .collect();

    let count = objects.len();
    scene.replace_placed(objects);
    Ok(count)
}

fn from_record(record: PlacedObjectRecord, textures: &mut TextureStore) -> PlacedObject {
    let wrap = WrapMode::from_repeat(record.texture.repeat);
    let texture = match record.texture.image {
        Some(url) => textures.load_url(&url, wrap, record.texture.scale_s, record.texture.scale_t),
        // Export omitted the image; keep the panel with the placeholder.
        None => textures.white(),
    };

    PlacedObject {
        position: Vec3::from_array(record.position),
        rotation: Vec3::from_array(record.rotation),
        scale: Vec3::from_array(record.scale),
        texture,
    }
}

pub fn save_scene_file(
    path: &Path,
    scene: &Scene,
    textures: &TextureStore,
) -> anyhow::Result<()> {
    let json = export_scene(scene, textures)?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn load_scene_file(
    path: &Path,
    scene: &mut Scene,
    textures: &mut TextureStore,
) -> anyhow::Result<usize> {
    let json =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    import_scene(&json, scene, textures)
}
