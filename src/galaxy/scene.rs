use std::fmt;

use crate::galaxy::types::PointCloud;

/// Identifies one generated point cloud for the lifetime of a generator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GalaxyId(pub u64);

impl fmt::Display for GalaxyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "galaxy#{}", self.0)
    }
}

/// A generated point cloud treated as a single unit of ownership.
///
/// Handles are not `Clone`: the only way to get rid of one is to pass it to
/// [`Scene::release`].
#[derive(Debug)]
pub struct GalaxyHandle {
    id: GalaxyId,
    cloud: PointCloud,
}

impl GalaxyHandle {
    pub(crate) fn new(id: GalaxyId, cloud: PointCloud) -> Self {
        Self { id, cloud }
    }

    pub fn id(&self) -> GalaxyId {
        self.id
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn len(&self) -> usize {
        self.cloud.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cloud.is_empty()
    }

    pub(crate) fn into_cloud(self) -> PointCloud {
        self.cloud
    }
}

/// A trait that defines the scene and resource management interface the
/// generator installs its output into
pub trait Scene {
    /// Make the point cloud behind `handle` visible
    fn attach(&mut self, handle: &GalaxyHandle);

    /// Remove the point cloud behind `handle` from what gets drawn
    fn detach(&mut self, handle: &GalaxyHandle);

    /// Free every resource owned by `handle`
    fn release(&mut self, handle: GalaxyHandle);
}

/// The single "current galaxy" slot. Holds at most one live handle.
#[derive(Debug, Default)]
pub struct CurrentGalaxy {
    handle: Option<GalaxyHandle>,
}

impl CurrentGalaxy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&GalaxyHandle> {
        self.handle.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.handle.is_none()
    }

    /// Installs `handle`, detaching and releasing whatever was there first.
    pub(crate) fn replace<S: Scene>(
        &mut self,
        handle: GalaxyHandle,
        scene: &mut S,
    ) -> &GalaxyHandle {
        self.clear(scene);
        scene.attach(&handle);
        log::debug!("Attached {} ({} particles)", handle.id(), handle.len());
        self.handle.insert(handle)
    }

    /// Detaches and releases the current handle, if any.
    pub fn clear<S: Scene>(&mut self, scene: &mut S) {
        if let Some(previous) = self.handle.take() {
            log::debug!("Releasing {}", previous.id());
            scene.detach(&previous);
            scene.release(previous);
        }
    }
}
