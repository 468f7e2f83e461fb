//! Bookkeeping for the anchors currently known to the session.

use std::sync::Arc;

use hashbrown::HashMap;
use mesh_types::MeshFragment;
use tracing::debug;

use crate::anchor::{AnchorEvent, AnchorId, AnchorKind};

/// Anchors in first-seen order.
///
/// Fusion output depends on fragment order, so an updated anchor keeps its
/// original position. Mesh snapshots are cached until the next change, and
/// every change bumps [`revision`](Self::revision).
///
/// # Example
///
/// ```
/// use cf_capture::{AnchorId, AnchorKind, FragmentStore};
/// use mesh_types::{MeshFragment, Point3};
///
/// let mut store = FragmentStore::new();
/// let tri = MeshFragment::new(
///     vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
///     vec![[0, 1, 2]],
/// );
/// store.add(AnchorId(1), AnchorKind::Mesh(tri));
/// assert_eq!(store.snapshot().len(), 1);
///
/// store.remove(AnchorId(1));
/// assert!(store.snapshot().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct FragmentStore {
    anchors: Vec<(AnchorId, AnchorKind)>,
    index: HashMap<AnchorId, usize>,
    snapshot: Option<Arc<[MeshFragment]>>,
    revision: u64,
}

impl FragmentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of anchors of any kind.
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// True when no anchors are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Number of mesh anchors.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.anchors.iter().filter(|(_, kind)| kind.as_mesh().is_some()).count()
    }

    /// Counts changes; starts at 0 and never decreases.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Look up an anchor.
    #[must_use]
    pub fn get(&self, id: AnchorId) -> Option<&AnchorKind> {
        self.position(id).map(|idx| &self.anchors[idx].1)
    }

    /// Track a new anchor. An id that is already present is replaced in place.
    pub fn add(&mut self, id: AnchorId, kind: AnchorKind) {
        let inserted = self.upsert(id, kind);
        debug!(%id, inserted, "Anchor added");
    }

    /// Replace an anchor's data, keeping its position. Unknown ids are
    /// appended.
    pub fn update(&mut self, id: AnchorId, kind: AnchorKind) {
        let inserted = self.upsert(id, kind);
        debug!(%id, inserted, "Anchor updated");
    }

    /// Stop tracking an anchor, returning its last data.
    pub fn remove(&mut self, id: AnchorId) -> Option<AnchorKind> {
        let idx = self.index.remove(&id)?;
        self.changed();
        let (_, kind) = self.anchors.remove(idx);
        for (later, _) in &self.anchors[idx..] {
            if let Some(slot) = self.index.get_mut(later) {
                *slot -= 1;
            }
        }
        debug!(%id, kind = kind.label(), "Anchor removed");
        Some(kind)
    }

    /// Apply a session event.
    pub fn apply(&mut self, event: AnchorEvent) {
        match event {
            AnchorEvent::Added(id, kind) => self.add(id, kind),
            AnchorEvent::Updated(id, kind) => self.update(id, kind),
            AnchorEvent::Removed(id) => {
                self.remove(id);
            }
        }
    }

    /// Forget every anchor.
    pub fn clear(&mut self) {
        self.anchors.clear();
        self.index.clear();
        self.changed();
    }

    /// The mesh fragments, in first-seen order, as an immutable snapshot.
    pub fn snapshot(&mut self) -> Arc<[MeshFragment]> {
        if let Some(snapshot) = &self.snapshot {
            return Arc::clone(snapshot);
        }
        let fragments: Arc<[MeshFragment]> = self
            .anchors
            .iter()
            .filter_map(|(_, kind)| kind.as_mesh().cloned())
            .collect();
        self.snapshot = Some(Arc::clone(&fragments));
        fragments
    }

    fn changed(&mut self) {
        self.snapshot = None;
        self.revision += 1;
    }

    fn position(&self, id: AnchorId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    fn upsert(&mut self, id: AnchorId, kind: AnchorKind) -> bool {
        self.changed();
        match self.position(id) {
            Some(idx) => {
                self.anchors[idx].1 = kind;
                false
            }
            None => {
                self.index.insert(id, self.anchors.len());
                self.anchors.push((id, kind));
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::PlaneAnchor;
    use nalgebra::{Matrix4, Point3};

    fn mesh(x: f64) -> AnchorKind {
        AnchorKind::Mesh(MeshFragment::new(
            vec![Point3::new(x, 0.0, 0.0), Point3::new(x, 1.0, 0.0), Point3::new(x, 0.0, 1.0)],
            vec![[0, 1, 2]],
        ))
    }

    fn plane() -> AnchorKind {
        AnchorKind::Plane(PlaneAnchor {
            center: Point3::origin(),
            extent: [1.0, 1.0],
            transform: Matrix4::identity(),
        })
    }

    fn first_x(fragment: &MeshFragment) -> f64 {
        fragment.vertices[0].x
    }

    #[test]
    fn test_first_seen_order() {
        let mut store = FragmentStore::new();
        store.add(AnchorId(2), mesh(2.0));
        store.add(AnchorId(1), mesh(1.0));
        store.add(AnchorId(3), plane());

        let snap = store.snapshot();
        assert_eq!(snap.len(), 2);
        assert!((first_x(&snap[0]) - 2.0).abs() < f64::EPSILON);
        assert!((first_x(&snap[1]) - 1.0).abs() < f64::EPSILON);
        assert_eq!(store.len(), 3);
        assert_eq!(store.mesh_count(), 2);
    }

    #[test]
    fn test_update_keeps_position() {
        let mut store = FragmentStore::new();
        store.add(AnchorId(1), mesh(1.0));
        store.add(AnchorId(2), mesh(2.0));
        store.update(AnchorId(1), mesh(10.0));

        let snap = store.snapshot();
        assert!((first_x(&snap[0]) - 10.0).abs() < f64::EPSILON);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_unknown_appends() {
        let mut store = FragmentStore::new();
        store.update(AnchorId(5), mesh(5.0));
        assert_eq!(store.len(), 1);
        assert!(store.get(AnchorId(5)).is_some());
    }

    #[test]
    fn test_remove() {
        let mut store = FragmentStore::new();
        store.add(AnchorId(1), mesh(1.0));
        store.add(AnchorId(2), plane());
        assert_eq!(store.remove(AnchorId(1)), Some(mesh(1.0)));
        assert!(store.remove(AnchorId(1)).is_none());
        assert!(store.snapshot().is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_from_middle_keeps_lookup() {
        let mut store = FragmentStore::new();
        for id in 1..=4 {
            store.add(AnchorId(id), mesh(f64::from(u32::try_from(id).unwrap())));
        }
        store.remove(AnchorId(2));
        store.update(AnchorId(4), mesh(40.0));

        let snap = store.snapshot();
        let xs: Vec<f64> = snap.iter().map(first_x).collect();
        assert_eq!(xs, vec![1.0, 3.0, 40.0]);
        assert_eq!(store.get(AnchorId(3)), Some(&mesh(3.0)));
    }

    #[test]
    fn test_snapshot_cached_until_change() {
        let mut store = FragmentStore::new();
        store.apply(AnchorEvent::Added(AnchorId(1), mesh(1.0)));

        let a = store.snapshot();
        let b = store.snapshot();
        assert!(Arc::ptr_eq(&a, &b));

        store.apply(AnchorEvent::Updated(AnchorId(1), mesh(2.0)));
        let c = store.snapshot();
        assert!(!Arc::ptr_eq(&a, &c));
        // Earlier snapshots are unaffected.
        assert!((first_x(&a[0]) - 1.0).abs() < f64::EPSILON);

        store.apply(AnchorEvent::Removed(AnchorId(1)));
        assert!(store.snapshot().is_empty());
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_revision_counts_changes() {
        let mut store = FragmentStore::new();
        assert_eq!(store.revision(), 0);
        store.add(AnchorId(1), mesh(1.0));
        store.update(AnchorId(1), mesh(2.0));
        assert_eq!(store.revision(), 2);

        // Reading and removing an unknown id change nothing.
        store.snapshot();
        assert!(store.remove(AnchorId(7)).is_none());
        assert_eq!(store.revision(), 2);

        store.remove(AnchorId(1));
        assert_eq!(store.revision(), 3);
    }
}
