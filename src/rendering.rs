pub mod camera;
pub mod galaxy_resources;
pub mod render_config;
mod render_pass;
pub mod renderer;

pub use camera::{Camera, CameraUniform};
pub use galaxy_resources::{GpuGalaxy, GpuScene};
pub use render_config::RenderConfig;
pub use renderer::Renderer;
