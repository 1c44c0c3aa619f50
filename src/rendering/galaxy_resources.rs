use std::collections::HashMap;

use wgpu::util::DeviceExt;

use crate::galaxy::{GalaxyHandle, GalaxyId, Scene};

// GPU side of one attached galaxy
pub struct GpuGalaxy {
    pub instance_buffer: wgpu::Buffer,
    pub instance_count: u32,
    pub point_size: f32,
}

/// The scene the generator installs galaxies into: owns the instance buffer
/// of every attached point cloud until it is released.
pub struct GpuScene {
    device: wgpu::Device,
    visible: Vec<GalaxyId>,
    resources: HashMap<GalaxyId, GpuGalaxy>,
}

impl GpuScene {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            device: device.clone(),
            visible: Vec::new(),
            resources: HashMap::new(),
        }
    }

    /// Galaxies to draw this frame, in attach order
    pub fn visible(&self) -> impl Iterator<Item = &GpuGalaxy> {
        self.visible.iter().filter_map(|id| self.resources.get(id))
    }

    pub fn live_count(&self) -> usize {
        self.resources.len()
    }
}

impl Scene for GpuScene {
    fn attach(&mut self, handle: &GalaxyHandle) {
        let id = handle.id();
        let cloud = handle.cloud();

        let device = &self.device;
        let resource = self.resources.entry(id).or_insert_with(|| {
            let vertices = cloud.buffers.vertices();
            let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Galaxy Instance Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            GpuGalaxy {
                instance_buffer,
                instance_count: vertices.len() as u32,
                point_size: cloud.point_size,
            }
        });
        let bytes = resource.instance_buffer.size();
        log::debug!("Uploaded {} ({} bytes, {} live)", id, bytes, self.live_count());

        if !self.visible.contains(&id) {
            self.visible.push(id);
        }
    }

    fn detach(&mut self, handle: &GalaxyHandle) {
        self.visible.retain(|id| *id != handle.id());
    }

    fn release(&mut self, handle: GalaxyHandle) {
        let id = handle.id();
        self.visible.retain(|visible| *visible != id);
        if let Some(resource) = self.resources.remove(&id) {
            resource.instance_buffer.destroy();
        }
        let cloud = handle.into_cloud();
        log::debug!("Released {} ({} particles, {} live)", id, cloud.len(), self.live_count());
    }
}
