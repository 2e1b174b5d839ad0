// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Captured room to floor plan conversion

use crate::capture::{CapturedFeature, CapturedRoom};
use crate::config::ConversionConfig;
use crate::document::GeometryDocument;
use crate::error::Result;
use floorplan_lite_geometry::{
    reconcile, CollinearMerger, OpeningAttacher, OpeningKind, Point, PointDeduplicator,
    ProjectedFeature, Projector, Unattached, Wall, WallGraph,
};
#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use serde::Serialize;

/// Counters collected while converting one room
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionStats {
    pub input_walls: usize,
    pub input_features: usize,
    pub projected_points: usize,
    pub exact_duplicates: usize,
    pub tolerance_merges: usize,
    pub wall_merges: usize,
    pub corners_repaired: usize,
    pub parallel_corners: usize,
    pub points_coalesced: usize,
    pub points_pruned: usize,
    pub unattached_doors: usize,
    pub unattached_windows: usize,
    pub unattached_openings: usize,
    pub output_points: usize,
    pub output_walls: usize,
}

impl ConversionStats {
    pub fn unattached_total(&self) -> usize {
        self.unattached_doors + self.unattached_windows + self.unattached_openings
    }
}

/// Result of converting one room
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub document: GeometryDocument,
    pub stats: ConversionStats,
}

/// Stateless converter. Every call builds its own working state, so one
/// converter can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct FloorPlanConverter {
    config: ConversionConfig,
}

impl FloorPlanConverter {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert a completed capture into its floor plan document.
    pub fn convert(&self, room: &CapturedRoom) -> Result<Conversion> {
        let config = &self.config;
        config.validate()?;
        let mut stats = ConversionStats {
            input_walls: room.walls.len(),
            input_features: room.feature_count(),
            ..Default::default()
        };

        let mut projector = Projector::new(config.default_wall_thickness);
        let walls = room
            .walls
            .iter()
            .map(|w| projector.project_wall(&w.identifier, &w.transform(), &w.dimensions()))
            .collect::<floorplan_lite_geometry::Result<Vec<Wall>>>()?;
        stats.projected_points = projector.points_allocated();

        // Doors, then windows, then openings
        let mut features = Vec::with_capacity(room.feature_count());
        for (kind, captured) in [
            (OpeningKind::Door, &room.doors),
            (OpeningKind::Window, &room.windows),
            (OpeningKind::Opening, &room.openings),
        ] {
            for feature in captured {
                features.push(project_feature(&projector, kind, feature)?);
            }
        }

        let candidates: Vec<Point> = walls
            .iter()
            .flat_map(|w| [w.start.clone(), w.end.clone()])
            .collect();
        let dedup = PointDeduplicator::new(config.merge_distance_sq).deduplicate(&candidates);
        stats.exact_duplicates = dedup.exact_duplicates;
        stats.tolerance_merges = dedup.tolerance_merges;

        let mut graph = WallGraph::build(dedup, walls);
        graph.ensure_no_degenerate_walls()?;
        let outcome =
            CollinearMerger::new(config.collinear_angle_tolerance_deg).merge(&mut graph);
        stats.wall_merges = outcome.merge_count();
        stats.corners_repaired = outcome.corners_repaired;
        stats.parallel_corners = outcome.parallel_corners;

        let (mut plan, reconciled) = reconcile(graph, outcome);
        stats.points_coalesced = reconciled.points_coalesced;
        if config.prune_unreferenced_points {
            stats.points_pruned = plan.prune_unreferenced_points();
        }

        let Unattached {
            doors,
            windows,
            openings,
        } = OpeningAttacher::new(config.offset_scale).attach_all(&mut plan.walls, &features);
        stats.unattached_doors = doors;
        stats.unattached_windows = windows;
        stats.unattached_openings = openings;

        stats.output_points = plan.points.len();
        stats.output_walls = plan.walls.len();

        tracing::info!(
            input_walls = stats.input_walls,
            input_features = stats.input_features,
            tolerance_merges = stats.tolerance_merges,
            wall_merges = stats.wall_merges,
            corners_repaired = stats.corners_repaired,
            parallel_corners = stats.parallel_corners,
            unattached = stats.unattached_total(),
            points = stats.output_points,
            walls = stats.output_walls,
            "Room converted to floor plan"
        );

        Ok(Conversion {
            document: GeometryDocument::from_floor_plan(plan),
            stats,
        })
    }

    /// Parse a captured room, convert it and return the pretty-printed
    /// floor plan document.
    pub fn convert_json(&self, json: &str) -> Result<String> {
        let room = CapturedRoom::from_json(json)?;
        self.convert(&room)?.document.to_json()
    }

    /// Convert independent rooms. Results keep input order.
    pub fn convert_rooms(&self, rooms: &[CapturedRoom]) -> Vec<Result<Conversion>> {
        // No threads on WASM
        #[cfg(not(target_arch = "wasm32"))]
        let results = rooms.par_iter().map(|room| self.convert(room)).collect();
        #[cfg(target_arch = "wasm32")]
        let results = rooms.iter().map(|room| self.convert(room)).collect();

        results
    }
}

fn project_feature(
    projector: &Projector,
    kind: OpeningKind,
    feature: &CapturedFeature,
) -> floorplan_lite_geometry::Result<ProjectedFeature> {
    projector.project_feature(
        kind,
        &feature.identifier,
        feature.parent_identifier.as_deref(),
        &feature.transform(),
        &feature.dimensions(),
        feature.is_open,
    )
}
