pub mod camera;
pub mod cli;
pub mod placement;
pub mod renderer;
pub mod scene;
pub mod texture;
pub mod world_io;
