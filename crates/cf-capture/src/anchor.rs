//! Anchors reported by the AR session.

use mesh_types::MeshFragment;
use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};

/// Stable identifier of an anchor across add/update/remove events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnchorId(pub u64);

impl From<u64> for AnchorId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AnchorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "anchor#{}", self.0)
    }
}

/// A detected planar surface. Tracked, but never fused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneAnchor {
    /// Centre in the anchor's local frame.
    pub center: Point3<f64>,
    /// Width and length of the plane, in session units.
    pub extent: [f64; 2],
    /// Local-to-world transform.
    pub transform: Matrix4<f64>,
}

/// What kind of anchor an event carries.
///
/// Classification happens once, where the session hands anchors over; the
/// rest of the crate only matches on the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnchorKind {
    /// Reconstructed geometry.
    Mesh(MeshFragment),
    /// Detected plane.
    Plane(PlaneAnchor),
}

impl AnchorKind {
    /// The mesh fragment, if this is a mesh anchor.
    #[must_use]
    pub const fn as_mesh(&self) -> Option<&MeshFragment> {
        match self {
            Self::Mesh(fragment) => Some(fragment),
            Self::Plane(_) => None,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Mesh(_) => "mesh",
            Self::Plane(_) => "plane",
        }
    }
}

/// A change to the set of anchors.
#[derive(Debug, Clone, PartialEq)]
pub enum AnchorEvent {
    /// A new anchor appeared.
    Added(AnchorId, AnchorKind),
    /// An existing anchor changed.
    Updated(AnchorId, AnchorKind),
    /// An anchor disappeared.
    Removed(AnchorId),
}

impl AnchorEvent {
    /// The anchor this event is about.
    #[must_use]
    pub const fn id(&self) -> AnchorId {
        match self {
            Self::Added(id, _) | Self::Updated(id, _) | Self::Removed(id) => *id,
        }
    }
}
