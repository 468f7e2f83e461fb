//! The capture context: one per scanning session.

use std::sync::Arc;

use crossbeam_channel::Receiver;
use mesh_fuse::fuse_fragments_detailed;
use mesh_types::{Aabb, MeshBounds};
use tracing::{debug, info};

use crate::anchor::{AnchorEvent, AnchorId, AnchorKind};
use crate::calibration::SharedCalibrator;
use crate::config::CoreConfig;
use crate::error::{CaptureError, CaptureResult};
use crate::store::FragmentStore;
use crate::worker::{FusionWorker, LatestMesh, MeshUpdate};

/// Owns everything a scanning session needs.
///
/// Anchor events go into the [`FragmentStore`]; fusion runs either inline
/// with [`fuse_now`](Self::fuse_now) or on the background worker with
/// [`request_fusion`](Self::request_fusion). Both publish into the same
/// generation-stamped slot, tagged with the store revision they were fused
/// from; a result from an older revision never replaces a newer one.
///
/// # Example
///
/// ```
/// use cf_capture::{AnchorEvent, AnchorId, AnchorKind, CaptureContext, CoreConfig};
/// use mesh_types::{MeshFragment, Point3};
///
/// let mut ctx = CaptureContext::new(CoreConfig::default()).unwrap();
/// let tri = MeshFragment::new(
///     vec![Point3::origin(), Point3::new(2.0, 0.0, 0.0), Point3::new(0.0, 3.0, 0.0)],
///     vec![[0, 1, 2]],
/// );
/// ctx.apply(AnchorEvent::Added(AnchorId(1), AnchorKind::Mesh(tri)));
///
/// let update = ctx.fuse_now().unwrap();
/// assert_eq!(update.generation, 1);
///
/// let room = ctx.room_bounds().unwrap();
/// assert!((room.max.y - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct CaptureContext {
    config: CoreConfig,
    store: FragmentStore,
    calibrator: Arc<SharedCalibrator>,
    latest: Arc<LatestMesh>,
    worker: Option<FusionWorker>,
}

impl CaptureContext {
    /// Creates a context that fuses on the caller's thread only.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: CoreConfig) -> CaptureResult<Self> {
        config.validate()?;
        info!(
            max_vertices = config.fuse.max_vertices,
            distance_threshold = config.fuse.decimation.distance_threshold,
            "Capture context created"
        );
        Ok(Self {
            calibrator: Arc::new(SharedCalibrator::new(config.calibration.clone())),
            config,
            store: FragmentStore::new(),
            latest: Arc::new(LatestMesh::new()),
            worker: None,
        })
    }

    /// Creates a context with a background fusion worker.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the worker thread
    /// cannot be spawned.
    pub fn with_worker(config: CoreConfig) -> CaptureResult<Self> {
        let mut ctx = Self::new(config)?;
        ctx.worker = Some(FusionWorker::spawn(ctx.config.fuse.clone(), Arc::clone(&ctx.latest))?);
        Ok(ctx)
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// The tracked anchors.
    #[must_use]
    pub const fn store(&self) -> &FragmentStore {
        &self.store
    }

    /// The calibrator, shareable with other threads.
    #[must_use]
    pub const fn calibrator(&self) -> &Arc<SharedCalibrator> {
        &self.calibrator
    }

    /// Apply an anchor event from the session.
    pub fn apply(&mut self, event: AnchorEvent) {
        self.store.apply(event);
    }

    /// Track a new anchor.
    pub fn add_anchor(&mut self, id: AnchorId, kind: AnchorKind) {
        self.store.add(id, kind);
    }

    /// Replace an anchor's data.
    pub fn update_anchor(&mut self, id: AnchorId, kind: AnchorKind) {
        self.store.update(id, kind);
    }

    /// Stop tracking an anchor.
    pub fn remove_anchor(&mut self, id: AnchorId) -> Option<AnchorKind> {
        self.store.remove(id)
    }

    /// Fuse the current mesh anchors on this thread and publish the result.
    ///
    /// Returns `None`, publishing nothing, when there is no geometry.
    pub fn fuse_now(&mut self) -> Option<MeshUpdate> {
        let revision = self.store.revision();
        let fragments = self.store.snapshot();
        let result = fuse_fragments_detailed(&fragments, &self.config.fuse)?;
        debug!(revision, %result, "Fused synchronously");
        self.latest.publish(revision, result.mesh)
    }

    /// Hand the current mesh anchors to the background worker.
    ///
    /// Returns `Ok(false)` when the worker's queue is full and the snapshot
    /// was dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::WorkerStopped`] if there is no running worker.
    pub fn request_fusion(&mut self) -> CaptureResult<bool> {
        let Some(worker) = self.worker.as_ref().filter(|w| w.is_running()) else {
            return Err(CaptureError::WorkerStopped);
        };
        Ok(worker.submit(self.store.revision(), self.store.snapshot()))
    }

    /// The most recently published mesh, from either fusion path.
    #[must_use]
    pub fn latest_mesh(&self) -> Option<MeshUpdate> {
        self.latest.get()
    }

    /// Receiver of meshes published by the background worker.
    #[must_use]
    pub fn updates(&self) -> Option<Receiver<MeshUpdate>> {
        self.worker.as_ref().map(FusionWorker::updates)
    }

    /// Bounds of the latest published mesh.
    #[must_use]
    pub fn room_bounds(&self) -> Option<Aabb> {
        self.latest.get().and_then(|update| update.mesh.bounds_opt())
    }
}
