// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collapsing of near-duplicate wall endpoints
//!
//! Captured walls almost never share exact corners, so every corner shows up
//! as a small cluster of points. Deduplication runs in two stages:
//!
//! 1. Exact: a point whose coordinates equal an already kept point is dropped.
//! 2. Tolerance: each remaining pair closer than the threshold (squared
//!    distance, strict `<`) is merged into the first point, which keeps its id
//!    and takes the integer average of the pair.
//!
//! The tolerance stage is a single left-to-right sweep over the *original*
//! coordinates and is not transitive: a chain of near points can survive as
//! more than one point, and when several points merge into the same survivor
//! the last average wins.

use crate::point::Point;
use rustc_hash::FxHashMap;

/// Squared distance in mm² below which two points are merged.
pub const DEFAULT_MERGE_DISTANCE_SQ: i64 = 200;

/// Canonical points plus the table mapping every pre-merge coordinate to the
/// canonical point that now stands for it.
#[derive(Debug, Clone, Default)]
pub struct Deduplication {
    pub points: Vec<Point>,
    resolutions: FxHashMap<(i64, i64), usize>,
    pub exact_duplicates: usize,
    pub tolerance_merges: usize,
}

impl Deduplication {
    /// Canonical point for an original (pre-averaging) coordinate.
    pub fn resolve(&self, x: i64, y: i64) -> Option<&Point> {
        self.resolutions
            .get(&(x, y))
            .and_then(|&index| self.points.get(index))
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PointDeduplicator {
    merge_distance_sq: i64,
}

impl PointDeduplicator {
    pub fn new(merge_distance_sq: i64) -> Self {
        Self { merge_distance_sq }
    }

    pub fn deduplicate(&self, candidates: &[Point]) -> Deduplication {
        // Stage 1: exact duplicates. `origin` records, for each distinct
        // coordinate, the index of the kept point that owns it.
        let mut kept: Vec<Point> = Vec::with_capacity(candidates.len());
        let mut origin: FxHashMap<(i64, i64), usize> = FxHashMap::default();
        let mut exact_duplicates = 0;

        for point in candidates {
            if origin.contains_key(&point.position()) {
                exact_duplicates += 1;
                continue;
            }
            origin.insert(point.position(), kept.len());
            kept.push(point.clone());
        }

        // Stage 2: single-pass tolerance merge over the original coordinates.
        let mut merged = kept.clone();
        let mut absorbed_by: Vec<Option<usize>> = vec![None; kept.len()];
        let mut tolerance_merges = 0;

        for i in 0..kept.len() {
            if absorbed_by[i].is_some() {
                continue;
            }
            for j in (i + 1)..kept.len() {
                if absorbed_by[j].is_some() {
                    continue;
                }
                if kept[i].distance_squared(&kept[j]) < self.merge_distance_sq {
                    merged[i] = Point::new(
                        kept[i].id.clone(),
                        (kept[i].x + kept[j].x) / 2,
                        (kept[i].y + kept[j].y) / 2,
                    );
                    absorbed_by[j] = Some(i);
                    tolerance_merges += 1;
                }
            }
        }

        // Compact survivors and remap every original coordinate onto them.
        let mut canonical_index = vec![0usize; kept.len()];
        let mut points = Vec::with_capacity(kept.len() - tolerance_merges);
        for (index, point) in merged.into_iter().enumerate() {
            if absorbed_by[index].is_none() {
                canonical_index[index] = points.len();
                points.push(point);
            }
        }

        let resolutions = origin
            .into_iter()
            .map(|(position, index)| {
                let survivor = absorbed_by[index].unwrap_or(index);
                (position, canonical_index[survivor])
            })
            .collect();

        tracing::debug!(
            candidates = candidates.len(),
            exact_duplicates,
            tolerance_merges,
            canonical = points.len(),
            "Deduplicated plan points"
        );

        Deduplication {
            points,
            resolutions,
            exact_duplicates,
            tolerance_merges,
        }
    }
}

impl Default for PointDeduplicator {
    fn default() -> Self {
        Self::new(DEFAULT_MERGE_DISTANCE_SQ)
    }
}
