use std::collections::TryReserveError;

/// Errors raised while building or installing a galaxy.
#[derive(Debug, thiserror::Error)]
pub enum GalaxyError {
    #[error("invalid galaxy parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
    #[error("failed to allocate buffers for {count} particles: {source}")]
    Allocation {
        count: u32,
        #[source]
        source: TryReserveError,
    },
}

impl GalaxyError {
    /// Whether the caller can carry on with the galaxy it already has. A
    /// rejected parameter set is recoverable, running out of memory is not.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GalaxyError::InvalidParameter { .. })
    }
}

pub type GalaxyResult<T> = Result<T, GalaxyError>;

/// Rendering error types
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Surface creation error: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("No suitable adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("Device request error: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("Surface reports no supported texture format")]
    NoSurfaceFormat,
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Top level failures returned from [`crate::app::run`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation error: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Galaxy(#[from] GalaxyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocation_error() -> GalaxyError {
        let source = Vec::<u8>::new().try_reserve_exact(usize::MAX).unwrap_err();
        GalaxyError::Allocation { count: u32::MAX, source }
    }

    #[test]
    fn only_invalid_parameters_are_recoverable() {
        let invalid = GalaxyError::InvalidParameter {
            field: "count",
            reason: "must be at least 1".to_string(),
        };
        assert!(invalid.is_recoverable());
        assert!(!allocation_error().is_recoverable());
    }

    #[test]
    fn allocation_failures_surface_as_app_errors() {
        let err: AppError = allocation_error().into();
        assert!(matches!(err, AppError::Galaxy(GalaxyError::Allocation { count: u32::MAX, .. })));
        assert!(err.to_string().contains("4294967295 particles"));
    }
}
