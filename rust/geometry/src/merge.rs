// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Merging of adjacent collinear walls
//!
//! A physical wall is often captured as two segments meeting at a corner
//! point. Two walls are merged when their directions are within the angle
//! tolerance of parallel or antiparallel *and* they share an endpoint by
//! value. The merged wall spans the two outer endpoints and both sources are
//! marked as superseded.
//!
//! Dropping the shared corner can strand a third wall that also ended there:
//! its endpoint no longer lies on the new, longer wall. Each such wall gets
//! its corner moved to the intersection of its own line with the merged
//! wall's line. Parallel lines leave the corner where it is.

use crate::graph::WallGraph;
use crate::intersection::line_intersection;
use crate::point::Point;
use crate::wall::Wall;
use rustc_hash::FxHashSet;

/// Maximum deviation from 0° or 180° for two walls to count as collinear.
pub const DEFAULT_COLLINEAR_TOLERANCE_DEG: f64 = 10.0;

/// Endpoints of a merged wall and the corner it absorbs.
#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    pub start: Point,
    pub end: Point,
    pub corner: Point,
}

impl Junction {
    /// Find the endpoint two walls share. Checked in priority order
    /// `start/start`, `start/end`, `end/start`, `end/end`; the first match
    /// wins.
    pub fn between(first: &Wall, second: &Wall) -> Option<Self> {
        let (s1, e1) = (&first.start, &first.end);
        let (s2, e2) = (&second.start, &second.end);

        let (start, end, corner) = if s1.coincides_with(s2) {
            (e1, e2, s1)
        } else if s1.coincides_with(e2) {
            (e1, s2, s1)
        } else if e1.coincides_with(s2) {
            (s1, e2, e1)
        } else if e1.coincides_with(e2) {
            (s1, s2, e1)
        } else {
            return None;
        };

        Some(Self {
            start: start.clone(),
            end: end.clone(),
            corner: corner.clone(),
        })
    }
}

/// Result of one merge pass.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// New walls in the order they were created
    pub merged: Vec<Wall>,
    /// Ids of walls replaced by a merged wall
    pub superseded: FxHashSet<String>,
    pub corners_repaired: usize,
    /// Corner repairs skipped because the lines were parallel
    pub parallel_corners: usize,
}

impl MergeOutcome {
    pub fn merge_count(&self) -> usize {
        self.merged.len()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CollinearMerger {
    tolerance_deg: f64,
}

impl CollinearMerger {
    pub fn new(tolerance_deg: f64) -> Self {
        Self { tolerance_deg }
    }

    /// True when the walls point the same or opposite way within tolerance.
    /// Zero-length walls are never collinear.
    pub fn are_collinear(&self, first: &Wall, second: &Wall) -> bool {
        match first.angle_to(second) {
            Some(angle) => {
                angle.abs() < self.tolerance_deg || (180.0 - angle).abs() < self.tolerance_deg
            }
            None => false,
        }
    }

    /// Run one pass over every unordered pair of walls in the graph.
    ///
    /// Walls already consumed by a merge still take part in later pairs;
    /// merged walls are not examined again in the same pass. Corner repairs
    /// are written back into the graph immediately.
    pub fn merge(&self, graph: &mut WallGraph) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        let count = graph.walls.len();

        for i in 0..count {
            for j in (i + 1)..count {
                let (first, second) = (&graph.walls[i], &graph.walls[j]);
                if !self.are_collinear(first, second) {
                    continue;
                }
                let Some(junction) = Junction::between(first, second) else {
                    continue;
                };

                let merged = Wall::merged(first, second, junction.start, junction.end);
                tracing::debug!(
                    first = %first.id,
                    second = %second.id,
                    corner = %junction.corner.id,
                    "Merging collinear walls"
                );

                let sources = [first.id.clone(), second.id.clone()];
                outcome.superseded.extend(sources.iter().cloned());
                outcome.merged.push(merged);

                let merged_index = outcome.merged.len() - 1;
                self.repair_corner(
                    graph,
                    &sources,
                    &junction.corner.id,
                    merged_index,
                    &mut outcome,
                );
            }
        }

        outcome
    }

    /// Snap every other wall ending at `corner_id` onto the line of the
    /// merged wall at `merged_index`.
    fn repair_corner(
        &self,
        graph: &mut WallGraph,
        sources: &[String; 2],
        corner_id: &str,
        merged_index: usize,
        outcome: &mut MergeOutcome,
    ) {
        let touching: Vec<usize> = graph
            .walls
            .iter()
            .enumerate()
            .filter(|(_, wall)| !sources.contains(&wall.id) && wall.touches(corner_id))
            .map(|(index, _)| index)
            .collect();

        for index in touching {
            let fix = &graph.walls[index];
            let merged = &outcome.merged[merged_index];

            match line_intersection(&merged.start, &merged.end, &fix.start, &fix.end) {
                Some((x, y)) => {
                    tracing::debug!(
                        wall = %fix.id,
                        corner = corner_id,
                        x,
                        y,
                        "Moving corner onto merged wall"
                    );
                    graph.relocate_point(corner_id, x, y, &mut outcome.merged);
                    outcome.corners_repaired += 1;
                }
                None => {
                    outcome.parallel_corners += 1;
                }
            }
        }
    }
}

impl Default for CollinearMerger {
    fn default() -> Self {
        Self::new(DEFAULT_COLLINEAR_TOLERANCE_DEG)
    }
}
