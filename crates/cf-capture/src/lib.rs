//! Capture-session plumbing for room scanning.
//!
//! Ties the pure crates together for a live AR session:
//!
//! - [`AnchorKind`] classifies session anchors once, at the boundary
//! - [`FragmentStore`] tracks anchors in first-seen order and hands out
//!   immutable mesh snapshots
//! - [`FusionWorker`] fuses snapshots off the session thread
//! - [`SharedCalibrator`] publishes calibration state to any reader
//! - [`CaptureContext`] owns all of the above, built from a [`CoreConfig`]
//!
//! There are no globals: every session constructs its own context.
//!
//! # Threading
//!
//! ```text
//! session thread ──snapshot──▶ [bounded(2)] ──▶ mesh-fusion thread
//!        ▲                                            │
//!        └──────── LatestMesh / updates ◀─────────────┘
//! ```
//!
//! Submitting never blocks; a full queue drops the snapshot since a newer
//! one will follow.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod anchor;
mod calibration;
mod config;
mod context;
mod error;
mod store;
mod worker;

pub use anchor::{AnchorEvent, AnchorId, AnchorKind, PlaneAnchor};
pub use calibration::{CalibrationSnapshot, SharedCalibrator};
pub use config::CoreConfig;
pub use context::CaptureContext;
pub use error::{CaptureError, CaptureResult};
pub use store::FragmentStore;
pub use worker::{FusionWorker, LatestMesh, MeshUpdate};
