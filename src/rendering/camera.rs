use std::f32::consts::FRAC_PI_2;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

// Keeps the orbit away from the poles where look_at degenerates
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;
// Motion below this is treated as settled
const REST_EPSILON: f32 = 1e-5;

/// Camera data uploaded once per frame
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub viewport: [f32; 2], // physical width, height
    pub point_size: f32,
    pub _padding: f32,
}

// Orbit camera with damped rotation, zoom and pan
pub struct Camera {
    config: CameraConfig,

    // Orbit state
    target: Vec3,
    distance: f32,
    yaw: f32,   // around +Y, 0 looks down -Z
    pitch: f32, // elevation above the XZ plane
    aspect: f32,

    // Motion still to be applied, shed gradually by damping
    yaw_delta: f32,
    pitch_delta: f32,
    zoom_delta: f32, // log scale
    pan_delta: Vec3,

    // Mouse interaction state for camera control
    mouse_pressed: bool,
    last_mouse_position: [f32; 2],
    ctrl_pressed: bool,
    shift_pressed: bool,
}

impl Camera {
    pub fn new(config: CameraConfig, width: u32, height: u32) -> Self {
        let offset = config.position - config.target;
        let distance = offset.length().max(config.min_distance);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        let yaw = offset.x.atan2(offset.z);

        let mut camera = Self {
            config,
            target: config.target,
            distance,
            yaw,
            pitch,
            aspect: 1.0,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
            zoom_delta: 0.0,
            pan_delta: Vec3::ZERO,
            mouse_pressed: false,
            last_mouse_position: [0.0, 0.0],
            ctrl_pressed: false,
            shift_pressed: false,
        };
        camera.resize(width, height);
        camera
    }

    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fov_y_degrees.to_radians(),
            self.aspect,
            self.config.near,
            self.config.far,
        )
    }

    pub fn to_uniform(&self, viewport: [f32; 2], point_size: f32) -> CameraUniform {
        CameraUniform {
            view_proj: (self.projection_matrix() * self.view_matrix()).to_cols_array_2d(),
            viewport,
            point_size,
            _padding: 0.0,
        }
    }

    /// Recomputes the aspect ratio from the new surface width and height.
    /// A minimised window reports a zero size and is ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn reset(&mut self) {
        let aspect = self.aspect;
        *self = Self::new(self.config, 1, 1);
        self.aspect = aspect;
    }

    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw_delta -= delta_x * self.config.rotate_speed;
        self.pitch_delta += delta_y * self.config.rotate_speed;
    }

    pub fn zoom(&mut self, delta: f32) {
        // Positive delta zooms in
        self.zoom_delta += delta * self.config.zoom_speed;
    }

    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let view = self.view_matrix().inverse();
        let right = view.x_axis.truncate();
        let up = view.y_axis.truncate();
        // Scale pan with distance so drags feel the same at any zoom level
        let scale = self.distance * self.config.rotate_speed * 0.5;
        self.pan_delta += (-right * delta_x + up * delta_y) * scale;
    }

    /// Applies a share of the pending motion and decays the rest.
    /// Returns whether the camera moved.
    pub fn update(&mut self, dt: f32) -> bool {
        let frames = (dt * 60.0).max(0.0);
        let remaining = (1.0 - self.config.damping).powf(frames);
        let applied = 1.0 - remaining;

        let moving = self.yaw_delta.abs() > REST_EPSILON
            || self.pitch_delta.abs() > REST_EPSILON
            || self.zoom_delta.abs() > REST_EPSILON
            || self.pan_delta.length_squared() > REST_EPSILON * REST_EPSILON;
        if !moving {
            self.yaw_delta = 0.0;
            self.pitch_delta = 0.0;
            self.zoom_delta = 0.0;
            self.pan_delta = Vec3::ZERO;
            return false;
        }

        self.yaw += self.yaw_delta * applied;
        self.pitch = (self.pitch + self.pitch_delta * applied).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.distance = (self.distance * (-self.zoom_delta * applied).exp())
            .clamp(self.config.min_distance, self.config.max_distance);
        self.target += self.pan_delta * applied;

        self.yaw_delta *= remaining;
        self.pitch_delta *= remaining;
        self.zoom_delta *= remaining;
        self.pan_delta *= remaining;
        true
    }

    // Input handling methods
    pub fn handle_mouse_press(&mut self, position: [f32; 2], ctrl: bool, shift: bool) {
        self.mouse_pressed = true;
        self.last_mouse_position = position;
        self.ctrl_pressed = ctrl;
        self.shift_pressed = shift;
    }

    pub fn handle_mouse_release(&mut self) {
        self.mouse_pressed = false;
    }

    pub fn handle_mouse_move(&mut self, position: [f32; 2]) {
        if !self.mouse_pressed {
            return;
        }
        let delta_x = position[0] - self.last_mouse_position[0];
        let delta_y = position[1] - self.last_mouse_position[1];
        self.last_mouse_position = position;

        if self.ctrl_pressed || self.shift_pressed {
            // Pan with Ctrl/Shift+drag
            self.pan(delta_x, delta_y);
        } else {
            self.rotate(delta_x, delta_y);
        }
    }

    pub fn handle_mouse_wheel(&mut self, delta: f32) {
        self.zoom(delta);
    }

    pub fn handle_key_state(&mut self, ctrl: bool, shift: bool) {
        self.ctrl_pressed = ctrl;
        self.shift_pressed = shift;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(camera: &mut Camera) {
        for _ in 0..2000 {
            if !camera.update(1.0 / 60.0) {
                break;
            }
        }
    }

    #[test]
    fn starts_at_configured_position() {
        let config = CameraConfig::default();
        let camera = Camera::new(config, 1280, 720);
        assert!((camera.position() - config.position).length() < 1e-4);
        assert!((camera.aspect() - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn resize_uses_width_over_height_and_ignores_zero() {
        let mut camera = Camera::new(CameraConfig::default(), 800, 600);
        camera.resize(1000, 500);
        assert_eq!(camera.aspect(), 2.0);
        camera.resize(1000, 0);
        assert_eq!(camera.aspect(), 2.0);
    }

    #[test]
    fn damped_rotation_converges_to_full_input() {
        let config = CameraConfig::default();
        let mut camera = Camera::new(config, 800, 600);
        let start_yaw = camera.yaw;

        camera.rotate(100.0, 0.0);
        assert!(camera.update(1.0 / 60.0));
        let after_one_frame = camera.yaw;
        settle(&mut camera);

        let full = -100.0 * config.rotate_speed;
        assert!((after_one_frame - start_yaw).abs() < full.abs());
        assert!((camera.yaw - start_yaw - full).abs() < 1e-3);
        assert!(!camera.update(1.0 / 60.0));
    }

    #[test]
    fn orbit_keeps_distance_and_clamps_pitch() {
        let mut camera = Camera::new(CameraConfig::default(), 800, 600);
        let distance = (camera.position() - camera.target()).length();

        camera.rotate(0.0, 1.0e6);
        settle(&mut camera);

        assert!(camera.pitch <= PITCH_LIMIT);
        assert!(((camera.position() - camera.target()).length() - distance).abs() < 1e-3);
    }

    #[test]
    fn zoom_stays_within_limits() {
        let config = CameraConfig::default();
        let mut camera = Camera::new(config, 800, 600);

        camera.zoom(1000.0);
        settle(&mut camera);
        assert!((camera.distance - config.min_distance).abs() < 1e-4);

        camera.zoom(-1000.0);
        settle(&mut camera);
        assert!((camera.distance - config.max_distance).abs() < 1e-3);
    }

    #[test]
    fn uniform_matches_shader_layout() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }
}
