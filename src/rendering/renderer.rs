use std::sync::Arc;
use std::time::Instant;

use wgpu::util::DeviceExt;
use winit::window::Window;

use super::camera::{Camera, CameraUniform};
use super::galaxy_resources::GpuScene;
use super::render_config::{RenderConfig, VERTICES_PER_PARTICLE};
use super::render_pass::create_background_render_pass;
use crate::config::AppConfig;
use crate::error::{RenderError, RenderResult};

// Main renderer struct
pub struct Renderer {
    window: Arc<Window>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    size: winit::dpi::PhysicalSize<u32>,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,

    // Rendering configuration
    render_config: RenderConfig,
    clear_color: wgpu::Color,

    // Camera
    camera: Camera,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,

    // Galaxies attached by the generator
    scene: GpuScene,

    last_update: Instant,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, config: &AppConfig) -> RenderResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let size = window.inner_size();
        let cap = surface.get_capabilities(&adapter);
        let surface_format = *cap.formats.first().ok_or(RenderError::NoSurfaceFormat)?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            // Request compatibility with the sRGB-format texture view we're going to create later.
            view_formats: vec![surface_format.add_srgb_suffix()],
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            width: size.width.max(1),
            height: size.height.max(1),
            desired_maximum_frame_latency: 2,
            present_mode: wgpu::PresentMode::AutoVsync,
        };
        surface.configure(&device, &surface_config);

        // Create render configuration (pipelines and bind group layouts)
        let render_config = RenderConfig::new(&device, surface_format);

        let camera = Camera::new(config.camera, size.width, size.height);
        let uniform = camera.to_uniform([size.width as f32, size.height as f32], 0.0);
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group = render_config.create_camera_bind_group(&device, &camera_buffer);

        let scene = GpuScene::new(&device);

        Ok(Self {
            window,
            device,
            queue,
            size,
            surface,
            surface_config,
            render_config,
            clear_color: config.clear_color,
            camera,
            camera_buffer,
            camera_bind_group,
            scene,
            last_update: Instant::now(),
        })
    }

    pub fn get_window(&self) -> &Window {
        &self.window
    }

    pub fn scene_mut(&mut self) -> &mut GpuScene {
        &mut self.scene
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn configure_surface(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        log::debug!("Resizing surface to {}x{}", new_size.width, new_size.height);
        self.size = new_size;
        self.surface_config.width = new_size.width;
        self.surface_config.height = new_size.height;
        self.camera.resize(new_size.width, new_size.height);

        // Reconfigure the surface
        self.configure_surface();
    }

    fn update(&mut self) {
        // Calculate time since last update
        let now = Instant::now();
        let dt = now.duration_since(self.last_update).as_secs_f32();
        self.last_update = now;

        // A long stall (e.g. a large regeneration) must not fling the camera
        self.camera.update(dt.min(0.1));
    }

    fn write_camera(&self, point_size: f32) {
        let uniform: CameraUniform = self
            .camera
            .to_uniform([self.size.width as f32, self.size.height as f32], point_size);
        self.queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    pub fn render(&mut self) -> RenderResult<()> {
        self.update();

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.configure_surface();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring the next frame");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let texture_view = surface_texture.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.render_config.surface_format.add_srgb_suffix()),
            ..Default::default()
        });

        // A single uniform holds the point size, so only the first visible galaxy sets it.
        // The generator never leaves more than one attached.
        let point_size = self.scene.visible().next().map_or(0.0, |galaxy| galaxy.point_size);
        self.write_camera(point_size);

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Galaxy Command Encoder"),
        });

        {
            let mut render_pass =
                create_background_render_pass(&mut encoder, &texture_view, self.clear_color);
            render_pass.set_pipeline(&self.render_config.render_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

            for galaxy in self.scene.visible() {
                render_pass.set_vertex_buffer(0, galaxy.instance_buffer.slice(..));
                // Draw 6 vertices (2 triangles) per particle instance
                render_pass.draw(0..VERTICES_PER_PARTICLE, 0..galaxy.instance_count);
            }
        }

        self.queue.submit([encoder.finish()]);
        self.window.pre_present_notify();
        surface_texture.present();

        Ok(())
    }
}
