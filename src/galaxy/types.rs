use bytemuck::{Pod, Zeroable};

// One generated particle before it is split into the buffer pair
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Particle {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub radius: f32, // distance drawn from the center, before jitter
}

/// Index-aligned position and color buffers produced by one generation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleBuffers {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
}

impl ParticleBuffers {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn push(&mut self, particle: &Particle) {
        self.positions.push(particle.position);
        self.colors.push(particle.color);
    }

    /// Interleaves both buffers into the layout the GPU instance buffer expects.
    pub fn vertices(&self) -> Vec<GalaxyVertex> {
        self.positions
            .iter()
            .zip(&self.colors)
            .map(|(&position, &color)| GalaxyVertex { position, color })
            .collect()
    }
}

/// The buffer pair plus the material setting the renderer needs to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub buffers: ParticleBuffers,
    pub point_size: f32,
}

impl PointCloud {
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

// Per-instance data uploaded to the GPU
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct GalaxyVertex {
    pub position: [f32; 3], // xyz
    pub color: [f32; 3],    // rgb, sRGB encoded
}

impl GalaxyVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GalaxyVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
