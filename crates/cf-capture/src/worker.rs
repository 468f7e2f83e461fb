//! Background fusion.
//!
//! The session thread hands immutable fragment snapshots to a worker thread
//! through a small bounded queue and never waits on it. Fused meshes come
//! back through [`LatestMesh`] and an update channel.
//!
//! Each snapshot carries the store revision it was taken at. A mesh fused
//! from an older revision than the one already published is discarded, so a
//! slow background job cannot overwrite a newer inline result.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender, TrySendError};
use mesh_fuse::{FuseParams, fuse_fragments_detailed};
use mesh_types::{FusedMesh, MeshFragment};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::{CaptureError, CaptureResult};

/// Snapshots waiting to be fused. Older work is dropped, not queued.
const JOB_QUEUE_CAPACITY: usize = 2;

/// Updates not yet taken by a consumer. Consumers that fall behind can
/// always read [`LatestMesh`].
const UPDATE_QUEUE_CAPACITY: usize = 2;

/// A published fused mesh.
#[derive(Debug, Clone)]
pub struct MeshUpdate {
    /// Increases by one with every publication.
    pub generation: u64,
    /// Store revision the mesh was fused from.
    pub revision: u64,
    /// The mesh.
    pub mesh: Arc<FusedMesh>,
}

/// The most recently published mesh, shared by every producer.
#[derive(Debug, Default)]
pub struct LatestMesh {
    slot: Mutex<Option<MeshUpdate>>,
}

impl LatestMesh {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest update, if anything has been published.
    #[must_use]
    pub fn get(&self) -> Option<MeshUpdate> {
        self.slot.lock().clone()
    }

    /// Generation of the latest update, or 0.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.slot.lock().as_ref().map_or(0, |u| u.generation)
    }

    /// Store `mesh`, fused from store `revision`, under the next generation.
    ///
    /// Returns `None` and keeps the current mesh if it was fused from a newer
    /// revision.
    pub fn publish(&self, revision: u64, mesh: FusedMesh) -> Option<MeshUpdate> {
        let mut slot = self.slot.lock();
        if let Some(current) = slot.as_ref().filter(|u| u.revision > revision) {
            debug!(
                revision,
                published = current.revision,
                "Discarding mesh from an older revision"
            );
            return None;
        }
        let generation = slot.as_ref().map_or(0, |u| u.generation) + 1;
        let update = MeshUpdate {
            generation,
            revision,
            mesh: Arc::new(mesh),
        };
        *slot = Some(update.clone());
        Some(update)
    }
}

/// Fuses fragment snapshots on a dedicated thread.
///
/// Dropping the worker closes its queue and joins the thread.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use cf_capture::{FusionWorker, LatestMesh};
/// use mesh_fuse::FuseParams;
/// use mesh_types::{MeshFragment, Point3};
///
/// let worker = FusionWorker::spawn(FuseParams::default(), Arc::new(LatestMesh::new())).unwrap();
/// let updates = worker.updates();
///
/// let tri = MeshFragment::new(
///     vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
///     vec![[0, 1, 2]],
/// );
/// assert!(worker.submit(1, Arc::from(vec![tri])));
///
/// let update = updates.recv_timeout(Duration::from_secs(5)).unwrap();
/// assert_eq!(update.generation, 1);
/// assert_eq!(update.mesh.faces.len(), 1);
/// ```
pub struct FusionWorker {
    sender: Option<Sender<FusionJob>>,
    updates: Receiver<MeshUpdate>,
    latest: Arc<LatestMesh>,
    running: Arc<AtomicBool>,
    dropped: Arc<AtomicU64>,
    thread_handle: Option<JoinHandle<()>>,
}

impl FusionWorker {
    /// Start the worker thread. Meshes are published into `latest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(params: FuseParams, latest: Arc<LatestMesh>) -> CaptureResult<Self> {
        let (sender, jobs) = crossbeam_channel::bounded::<FusionJob>(JOB_QUEUE_CAPACITY);
        let (update_sender, updates) = crossbeam_channel::bounded::<MeshUpdate>(UPDATE_QUEUE_CAPACITY);
        let running = Arc::new(AtomicBool::new(true));

        let latest_clone = Arc::clone(&latest);
        let running_clone = Arc::clone(&running);

        let thread_handle = std::thread::Builder::new()
            .name("mesh-fusion".to_string())
            .spawn(move || {
                Self::fusion_thread(&params, &jobs, &update_sender, &latest_clone);
                running_clone.store(false, Ordering::Release);
            })
            .map_err(CaptureError::WorkerSpawn)?;

        Ok(Self {
            sender: Some(sender),
            updates,
            latest,
            running,
            dropped: Arc::new(AtomicU64::new(0)),
            thread_handle: Some(thread_handle),
        })
    }

    fn fusion_thread(
        params: &FuseParams,
        jobs: &Receiver<FusionJob>,
        updates: &Sender<MeshUpdate>,
        latest: &LatestMesh,
    ) {
        info!("Fusion worker started");

        while let Ok(FusionJob { revision, fragments }) = jobs.recv() {
            let Some(result) = fuse_fragments_detailed(&fragments, params) else {
                debug!(revision, fragments = fragments.len(), "Snapshot had no geometry");
                continue;
            };
            debug!(
                revision,
                vertices = result.mesh.vertices.len(),
                faces = result.mesh.faces.len(),
                passes = result.decimation_passes,
                "Fused snapshot"
            );
            let Some(update) = latest.publish(revision, result.mesh) else {
                continue;
            };
            // A full update queue means the consumer is behind; it can still
            // read the latest slot.
            let _ = updates.try_send(update);
        }

        info!("Fusion worker stopped");
    }

    /// Queue a snapshot taken at store `revision` for fusion without
    /// blocking.
    ///
    /// Returns `false` if the queue was full (the snapshot is dropped) or the
    /// worker has stopped.
    pub fn submit(&self, revision: u64, fragments: Arc<[MeshFragment]>) -> bool {
        let Some(sender) = &self.sender else {
            return false;
        };
        match enqueue(sender, FusionJob { revision, fragments }) {
            Ok(()) => true,
            Err(EnqueueError::Full) => {
                let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                debug!(dropped, "Fusion queue full, snapshot dropped");
                false
            }
            Err(EnqueueError::Disconnected) => {
                warn!("Fusion worker is gone, snapshot discarded");
                false
            }
        }
    }

    /// Receiver of published meshes.
    #[must_use]
    pub fn updates(&self) -> Receiver<MeshUpdate> {
        self.updates.clone()
    }

    /// The slot meshes are published into.
    #[must_use]
    pub fn latest(&self) -> &Arc<LatestMesh> {
        &self.latest
    }

    /// Snapshots dropped because the queue was full.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Whether the thread is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Close the queue and wait for the thread to finish its current job.
    pub fn stop(&mut self) {
        self.sender = None;
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                warn!("Fusion worker panicked");
            }
        }
    }
}

impl Drop for FusionWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for FusionWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FusionWorker")
            .field("running", &self.is_running())
            .field("dropped", &self.dropped())
            .field("generation", &self.latest.generation())
            .finish_non_exhaustive()
    }
}

struct FusionJob {
    revision: u64,
    fragments: Arc<[MeshFragment]>,
}

#[derive(Debug, PartialEq, Eq)]
enum EnqueueError {
    Full,
    Disconnected,
}

fn enqueue<T>(sender: &Sender<T>, item: T) -> Result<(), EnqueueError> {
    sender.try_send(item).map_err(|err| match err {
        TrySendError::Full(_) => EnqueueError::Full,
        TrySendError::Disconnected(_) => EnqueueError::Disconnected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::Point3;
    use std::time::Duration;

    fn tri(x: f64) -> MeshFragment {
        MeshFragment::new(
            vec![Point3::new(x, 0.0, 0.0), Point3::new(x + 1.0, 0.0, 0.0), Point3::new(x, 1.0, 0.0)],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn test_enqueue_drops_when_full() {
        let (tx, rx) = crossbeam_channel::bounded::<u32>(JOB_QUEUE_CAPACITY);
        assert_eq!(enqueue(&tx, 1), Ok(()));
        assert_eq!(enqueue(&tx, 2), Ok(()));
        assert_eq!(enqueue(&tx, 3), Err(EnqueueError::Full));
        assert_eq!(rx.try_recv(), Ok(1));
        drop(rx);
        assert_eq!(enqueue(&tx, 4), Err(EnqueueError::Disconnected));
    }

    #[test]
    fn test_latest_generations() {
        let latest = LatestMesh::new();
        assert!(latest.get().is_none());
        assert_eq!(latest.generation(), 0);
        assert_eq!(latest.publish(1, FusedMesh::new()).unwrap().generation, 1);
        // Re-fusing the same revision still publishes.
        assert_eq!(latest.publish(1, FusedMesh::new()).unwrap().generation, 2);
        assert_eq!(latest.generation(), 2);
    }

    #[test]
    fn test_older_revision_not_published() {
        let latest = LatestMesh::new();
        let newer = latest.publish(5, FusedMesh::new()).unwrap();
        assert!(latest.publish(3, FusedMesh::new()).is_none());

        let current = latest.get().unwrap();
        assert_eq!(current.generation, newer.generation);
        assert_eq!(current.revision, 5);
        assert!(Arc::ptr_eq(&current.mesh, &newer.mesh));
    }

    #[test]
    fn test_worker_discards_stale_snapshot() {
        let latest = Arc::new(LatestMesh::new());
        // An inline fusion of revision 2 has already been published.
        latest.publish(2, FusedMesh::new()).unwrap();

        let worker = FusionWorker::spawn(FuseParams::default(), Arc::clone(&latest)).unwrap();
        let updates = worker.updates();
        assert!(worker.submit(1, Arc::from(vec![tri(0.0)])));
        assert!(worker.submit(3, Arc::from(vec![tri(0.0), tri(5.0)])));

        let update = updates.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(update.revision, 3);
        assert_eq!(update.generation, 2);
        assert_eq!(update.mesh.vertices.len(), 6);
        drop(worker);
        assert!(updates.try_recv().is_err());
        assert_eq!(latest.get().unwrap().revision, 3);
    }

    #[test]
    fn test_worker_publishes() {
        let latest = Arc::new(LatestMesh::new());
        let worker = FusionWorker::spawn(FuseParams::default(), Arc::clone(&latest)).unwrap();
        let updates = worker.updates();

        assert!(worker.submit(1, Arc::from(vec![tri(0.0), tri(5.0)])));
        let update = updates.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(update.generation, 1);
        assert_eq!(update.mesh.vertices.len(), 6);
        assert!(Arc::ptr_eq(&update.mesh, &latest.get().unwrap().mesh));
        assert!(worker.is_running());
    }

    #[test]
    fn test_empty_snapshot_not_published() {
        let latest = Arc::new(LatestMesh::new());
        let worker = FusionWorker::spawn(FuseParams::default(), Arc::clone(&latest)).unwrap();
        let updates = worker.updates();

        assert!(worker.submit(1, Arc::from(Vec::<MeshFragment>::new())));
        assert!(worker.submit(2, Arc::from(vec![tri(0.0)])));
        let update = updates.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(update.generation, 1);
        assert_eq!(update.mesh.vertices.len(), 3);
    }

    #[test]
    fn test_stop_joins_and_rejects() {
        let latest = Arc::new(LatestMesh::new());
        let mut worker = FusionWorker::spawn(FuseParams::default(), latest).unwrap();
        worker.stop();
        assert!(!worker.is_running());
        assert!(!worker.submit(1, Arc::from(vec![tri(0.0)])));
    }

    #[test]
    fn test_burst_never_blocks() {
        let latest = Arc::new(LatestMesh::new());
        let worker = FusionWorker::spawn(FuseParams::default(), Arc::clone(&latest)).unwrap();
        let snapshot: Arc<[MeshFragment]> = (0..50).map(|i| tri(f64::from(i))).collect();

        let accepted = (0..100).filter(|_| worker.submit(1, Arc::clone(&snapshot))).count();
        assert_eq!(accepted as u64 + worker.dropped(), 100);
        drop(worker);
        // Every accepted snapshot was fused before the thread exited.
        assert_eq!(latest.generation(), accepted as u64);
    }
}
