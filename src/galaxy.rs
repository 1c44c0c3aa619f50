pub mod controls;
pub mod generator;
pub mod params;
pub mod scene;
pub mod types;

pub use controls::{ColorSlot, ParamRange, ParameterEditor, ParameterField};
pub use generator::GalaxyGenerator;
pub use params::{Color, GalaxyParameters};
pub use scene::{CurrentGalaxy, GalaxyHandle, GalaxyId, Scene};
pub use types::{GalaxyVertex, Particle, ParticleBuffers, PointCloud};
