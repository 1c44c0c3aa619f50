use std::f32::consts::TAU;
use std::time::Instant;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{GalaxyError, GalaxyResult};
use crate::galaxy::params::GalaxyParameters;
use crate::galaxy::scene::{CurrentGalaxy, GalaxyHandle, GalaxyId, Scene};
use crate::galaxy::types::{Particle, ParticleBuffers, PointCloud};

/// Builds spiral galaxy point clouds from a [`GalaxyParameters`] snapshot.
///
/// Every particle draws its radius and jitter from the generator's own random
/// source, so two passes with the same parameters give statistically similar
/// but different clouds unless the generator was built with [`Self::with_seed`].
pub struct GalaxyGenerator {
    rng: StdRng,
    next_id: u64,
}

impl Default for GalaxyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl GalaxyGenerator {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// A generator whose passes are reproducible for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self { rng, next_id: 0 }
    }

    /// Generates a new galaxy and installs it in `current`, replacing (and
    /// releasing) whatever galaxy the slot held.
    ///
    /// Both buffers are built before the slot is touched: if validation or
    /// allocation fails the previous galaxy stays attached.
    pub fn generate<'a, S: Scene>(
        &mut self,
        params: &GalaxyParameters,
        current: &'a mut CurrentGalaxy,
        scene: &mut S,
    ) -> GalaxyResult<&'a GalaxyHandle> {
        let params = *params;
        params.validate()?;

        let start = Instant::now();
        let cloud = self.build(&params)?;
        log::info!(
            "Generated {} particles across {} branches in {:.1} ms",
            cloud.len(),
            params.branch_count,
            start.elapsed().as_secs_f64() * 1000.0
        );

        let id = GalaxyId(self.next_id);
        self.next_id += 1;

        Ok(current.replace(GalaxyHandle::new(id, cloud), scene))
    }

    /// Builds the position and color buffers for one pass. Pure apart from
    /// advancing the random source.
    pub fn build(&mut self, params: &GalaxyParameters) -> GalaxyResult<PointCloud> {
        let count = params.count;
        let mut buffers = ParticleBuffers::default();
        reserve(&mut buffers.positions, count)?;
        reserve(&mut buffers.colors, count)?;

        for i in 0..count {
            let particle = self.particle(i, params);
            buffers.push(&particle);
        }

        Ok(PointCloud {
            buffers,
            point_size: params.size,
        })
    }

    /// Places particle `i`: picks its arm from the index residue, draws a
    /// radius, twists it by `spin * radius` and scatters it by the jitter terms.
    pub fn particle(&mut self, i: u32, params: &GalaxyParameters) -> Particle {
        let radius = self.rng.gen_range(0.0..params.radius);
        let angle = branch_angle(i, params.branch_count) + params.spin * radius;

        let jitter = Vec3::new(
            self.jitter(params.randomness_power),
            self.jitter(params.randomness_power),
            self.jitter(params.randomness_power),
        ) * params.randomness;

        // Flat disc: y only ever receives jitter
        let position = Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius) + jitter;

        let t = radius / params.radius;
        let color = params.inward_color.lerp(params.outward_color, t);

        Particle {
            position: position.to_array(),
            color: [color.r, color.g, color.b],
            radius,
        }
    }

    // sign * u^power, u uniform in [0, 1)
    fn jitter(&mut self, power: f32) -> f32 {
        let magnitude = self.rng.gen_range(0.0f32..1.0).powf(power);
        if self.rng.gen_bool(0.5) { magnitude } else { -magnitude }
    }
}

/// Angle of the arm a particle index belongs to.
pub fn branch_angle(i: u32, branch_count: u32) -> f32 {
    (i % branch_count) as f32 / branch_count as f32 * TAU
}

fn reserve<T>(buffer: &mut Vec<T>, count: u32) -> GalaxyResult<()> {
    buffer
        .try_reserve_exact(count as usize)
        .map_err(|source| GalaxyError::Allocation { count, source })
}
