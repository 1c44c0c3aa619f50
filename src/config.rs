use glam::Vec3;

/// Settings for the interactive viewer. The galaxy itself is configured
/// through [`crate::galaxy::GalaxyParameters`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window_title: String,
    pub clear_color: wgpu::Color,
    pub camera: CameraConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "Spiral Galaxy".to_string(),
            clear_color: wgpu::Color {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 1.0,
            },
            camera: CameraConfig::default(),
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Fraction of orbit/zoom velocity shed per frame at 60 FPS.
    pub damping: f32,
    pub rotate_speed: f32, // radians per pixel dragged
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(2.0, 2.0, 5.0),
            target: Vec3::ZERO,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            damping: 0.05,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            min_distance: 0.5,
            max_distance: 60.0,
        }
    }
}
