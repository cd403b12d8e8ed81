// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "gallery-walk")]
#[command(about = "First-person 3D picture gallery", long_about = None)]
pub struct Cli {
    /// Scene file to load at startup (also reloaded with F9)
    #[arg(long = "scene")]
    pub scene: Option<PathBuf>,

    /// Where F5 exports the scene
    #[arg(long = "save-path", default_value = "gallery.json")]
    pub save_path: PathBuf,

    /// Images (file paths or http(s) URLs) placed in order by right click
    #[arg(long = "image")]
    pub images: Vec<String>,

    /// Texture file tiled over the floor and ceiling
    #[arg(long = "floor-texture")]
    pub floor_texture: Option<PathBuf>,

    /// Start in fly mode: no collision, Space/Shift move vertically
    #[arg(long = "fly", default_value = "false")]
    pub fly: bool,
}
