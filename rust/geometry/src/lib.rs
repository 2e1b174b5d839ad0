// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floorplan-Lite Geometry
//!
//! Reduces a captured room (walls, doors, windows and openings as oriented
//! 3D boxes) to a consolidated 2D plan in integer millimeters:
//!
//! 1. [`Projector`] flattens each box onto the plan
//! 2. [`PointDeduplicator`] collapses near-duplicate wall endpoints
//! 3. [`WallGraph::build`] rewires walls onto the canonical points
//! 4. [`CollinearMerger`] joins adjacent collinear walls and repairs corners
//! 5. [`reconcile`] assembles the final wall list
//! 6. [`OpeningAttacher`] hangs doors, windows and openings on their walls
//!
//! All working state is owned by the caller and scoped to one room.

pub mod attach;
pub mod dedup;
pub mod error;
pub mod graph;
pub mod intersection;
pub mod merge;
pub mod point;
pub mod projection;
pub mod reconcile;
pub mod wall;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Vector3};

pub use attach::{OpeningAttacher, Unattached, DEFAULT_OFFSET_SCALE, OPEN_DOOR_TYPE};
pub use dedup::{Deduplication, PointDeduplicator, DEFAULT_MERGE_DISTANCE_SQ};
pub use error::{Error, Result};
pub use graph::WallGraph;
pub use intersection::{distance_to_line, line_intersection};
pub use merge::{CollinearMerger, Junction, MergeOutcome, DEFAULT_COLLINEAR_TOLERANCE_DEG};
pub use point::{Point, MAX_COORDINATE_MM};
pub use projection::{FeatureKind, OpeningKind, ProjectedFeature, Projector};
pub use reconcile::{reconcile, FloorPlan, ReconcileStats};
pub use wall::{FeatureRecord, Wall, DEFAULT_WALL_THICKNESS};
