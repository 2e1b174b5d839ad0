// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Final wall list assembly

use crate::graph::WallGraph;
use crate::merge::MergeOutcome;
use crate::point::Point;
use crate::wall::Wall;
use rustc_hash::{FxHashMap, FxHashSet};

/// Consolidated floor plan: canonical points and the walls spanning them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloorPlan {
    pub points: Vec<Point>,
    pub walls: Vec<Wall>,
}

impl FloorPlan {
    pub fn wall(&self, id: &str) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id == id)
    }

    pub fn point(&self, id: &str) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Drop points that no wall starts or ends at. Returns how many were
    /// removed.
    pub fn prune_unreferenced_points(&mut self) -> usize {
        let referenced: FxHashSet<&str> = self
            .walls
            .iter()
            .flat_map(|w| [w.start.id.as_str(), w.end.id.as_str()])
            .collect();
        let before = self.points.len();
        let kept: Vec<Point> = self
            .points
            .iter()
            .filter(|p| referenced.contains(p.id.as_str()))
            .cloned()
            .collect();
        self.points = kept;
        before - self.points.len()
    }
}

/// Statistics from reconciliation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub walls_removed: usize,
    pub walls_added: usize,
    /// Points folded into an earlier point at the same position
    pub points_coalesced: usize,
}

/// Replace superseded walls with their merged walls and make point
/// positions unique.
///
/// Averaging and corner repair can both land two distinct points on the same
/// coordinates. The later point is folded into the earlier one and every wall
/// endpoint naming it is rewired.
pub fn reconcile(graph: WallGraph, outcome: MergeOutcome) -> (FloorPlan, ReconcileStats) {
    let WallGraph { points, walls } = graph;
    let MergeOutcome {
        merged, superseded, ..
    } = outcome;

    let before = walls.len();
    let mut walls: Vec<Wall> = walls
        .into_iter()
        .filter(|wall| !superseded.contains(&wall.id))
        .collect();
    let walls_removed = before - walls.len();
    let walls_added = merged.len();
    walls.extend(merged);

    let mut first_at: FxHashMap<(i64, i64), usize> = FxHashMap::default();
    let mut renamed: FxHashMap<String, Point> = FxHashMap::default();
    let mut unique: Vec<Point> = Vec::with_capacity(points.len());
    for point in points {
        match first_at.get(&point.position()) {
            Some(&index) => {
                renamed.insert(point.id, unique[index].clone());
            }
            None => {
                first_at.insert(point.position(), unique.len());
                unique.push(point);
            }
        }
    }

    if !renamed.is_empty() {
        for wall in &mut walls {
            if let Some(target) = renamed.get(&wall.start.id) {
                wall.start = target.clone();
            }
            if let Some(target) = renamed.get(&wall.end.id) {
                wall.end = target.clone();
            }
        }
    }

    let stats = ReconcileStats {
        walls_removed,
        walls_added,
        points_coalesced: renamed.len(),
    };

    (
        FloorPlan {
            points: unique,
            walls,
        },
        stats,
    )
}
