use glam::Vec3;

use crate::error::{GalaxyError, GalaxyResult};

/// Normalised RGB color, each channel in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from a `0xRRGGBB` literal.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    pub fn to_hex(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    /// Per-channel linear blend, `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let mixed = self.to_vec3().lerp(other.to_vec3(), t);
        Color::new(mixed.x, mixed.y, mixed.z)
    }

    fn channels(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// The knobs controlling shape, density and color of one galaxy.
///
/// A generation pass copies the whole set before it starts, so edits made to
/// the live set afterwards never leak into a pass in flight.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GalaxyParameters {
    /// Number of particles to generate.
    pub count: u32,
    /// Render-time point size. Not used by the generation math.
    pub size: f32,
    /// Maximum galaxy radius.
    pub radius: f32,
    /// Number of spiral arms.
    pub branch_count: u32,
    /// Radians of twist per unit radius.
    pub spin: f32,
    /// Jitter magnitude.
    pub randomness: f32,
    /// Exponent biasing jitter toward zero.
    pub randomness_power: f32,
    pub inward_color: Color,
    pub outward_color: Color,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: 100_000,
            size: 0.01,
            radius: 5.0,
            branch_count: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inward_color: Color::from_hex(0xe55e15),
            outward_color: Color::from_hex(0x4848db),
        }
    }
}

impl GalaxyParameters {
    /// Checks every constraint the generator relies on.
    pub fn validate(&self) -> GalaxyResult<()> {
        if self.count < 1 {
            return Err(invalid("count", "must be at least 1"));
        }
        if self.branch_count < 2 {
            let reason = format!("must be at least 2, got {}", self.branch_count);
            return Err(invalid("branch_count", reason));
        }
        positive("size", self.size)?;
        positive("radius", self.radius)?;
        positive("randomness_power", self.randomness_power)?;
        if !self.spin.is_finite() {
            return Err(invalid("spin", "must be finite"));
        }
        if !(self.randomness.is_finite() && self.randomness >= 0.0) {
            return Err(invalid("randomness", format!("must be >= 0, got {}", self.randomness)));
        }
        normalised("inward_color", self.inward_color)?;
        normalised("outward_color", self.outward_color)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> GalaxyError {
    GalaxyError::InvalidParameter {
        field,
        reason: reason.into(),
    }
}

fn positive(field: &'static str, value: f32) -> GalaxyResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be > 0, got {value}")))
    }
}

fn normalised(field: &'static str, color: Color) -> GalaxyResult<()> {
    if color.channels().iter().all(|c| (0.0..=1.0).contains(c)) {
        Ok(())
    } else {
        Err(invalid(field, format!("channels must lie in [0, 1], got {color:?}")))
    }
}
