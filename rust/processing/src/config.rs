// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tuning knobs for room conversion

use floorplan_lite_geometry::{
    DEFAULT_COLLINEAR_TOLERANCE_DEG, DEFAULT_MERGE_DISTANCE_SQ, DEFAULT_OFFSET_SCALE,
    DEFAULT_WALL_THICKNESS,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the room conversion pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionConfig {
    /// Squared distance (mm²) below which two wall endpoints are merged
    pub merge_distance_sq: i64,
    /// Angle (degrees) within which two walls count as collinear
    pub collinear_angle_tolerance_deg: f64,
    /// Thickness written on every wall (mm)
    pub default_wall_thickness: i64,
    /// Divisor for the squared start-to-feature distance
    pub offset_scale: i64,
    /// Drop points no wall starts or ends at
    pub prune_unreferenced_points: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            merge_distance_sq: DEFAULT_MERGE_DISTANCE_SQ,
            collinear_angle_tolerance_deg: DEFAULT_COLLINEAR_TOLERANCE_DEG,
            default_wall_thickness: DEFAULT_WALL_THICKNESS,
            offset_scale: DEFAULT_OFFSET_SCALE,
            prune_unreferenced_points: false,
        }
    }
}

impl ConversionConfig {
    pub fn with_merge_distance_sq(mut self, merge_distance_sq: i64) -> Self {
        self.merge_distance_sq = merge_distance_sq;
        self
    }

    pub fn with_collinear_angle_tolerance_deg(mut self, degrees: f64) -> Self {
        self.collinear_angle_tolerance_deg = degrees;
        self
    }

    pub fn with_default_wall_thickness(mut self, thickness: i64) -> Self {
        self.default_wall_thickness = thickness;
        self
    }

    pub fn with_offset_scale(mut self, offset_scale: i64) -> Self {
        self.offset_scale = offset_scale;
        self
    }

    pub fn with_prune_unreferenced_points(mut self, prune: bool) -> Self {
        self.prune_unreferenced_points = prune;
        self
    }

    /// Reject settings the pipeline cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.merge_distance_sq < 0 {
            return Err(invalid("mergeDistanceSq", "must not be negative"));
        }
        let tolerance = self.collinear_angle_tolerance_deg;
        if !tolerance.is_finite() || !(0.0..=180.0).contains(&tolerance) {
            return Err(invalid(
                "collinearAngleToleranceDeg",
                format!("must be within 0..=180, got {tolerance}"),
            ));
        }
        if self.default_wall_thickness <= 0 {
            return Err(invalid("defaultWallThickness", "must be positive"));
        }
        if self.offset_scale < 1 {
            return Err(invalid(
                "offsetScale",
                format!("must be at least 1, got {}", self.offset_scale),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidConfig {
        field,
        reason: reason.into(),
    }
}
