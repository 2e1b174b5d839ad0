// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Walls with embedded endpoints and their attached features

use crate::point::Point;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Wall thickness assigned to every captured wall, in millimeters.
pub const DEFAULT_WALL_THICKNESS: i64 = 200;

/// A door, window or opening hosted by a wall.
///
/// `offset` is the squared millimeter distance from the wall start divided by
/// the offset scale, not a true distance. Downstream consumers read it as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRecord {
    pub offset: i64,
    pub width: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door_type: Option<String>,
}

/// Wall segment owning copies of its endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    pub id: String,
    pub start: Point,
    pub end: Point,
    pub thickness: i64,
    pub doors: Vec<FeatureRecord>,
    pub windows: Vec<FeatureRecord>,
    pub openings: Vec<FeatureRecord>,
}

impl Wall {
    pub fn new(id: impl Into<String>, start: Point, end: Point, thickness: i64) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            thickness,
            doors: Vec::new(),
            windows: Vec::new(),
            openings: Vec::new(),
        }
    }

    /// Wall replacing two adjacent collinear walls. The id is the two source
    /// ids joined by a single space, which is why feature lookup matches
    /// parent ids by substring.
    pub fn merged(first: &Wall, second: &Wall, start: Point, end: Point) -> Self {
        Self::new(
            format!("{} {}", first.id, second.id),
            start,
            end,
            first.thickness,
        )
    }

    /// Direction vector `start - end`.
    pub fn direction(&self) -> Vector2<f64> {
        self.start.delta_from(&self.end)
    }

    pub fn is_degenerate(&self) -> bool {
        self.start.coincides_with(&self.end)
    }

    pub fn touches(&self, point_id: &str) -> bool {
        self.start.id == point_id || self.end.id == point_id
    }

    /// Unsigned angle between the direction vectors of two walls, in degrees
    /// within `[0, 180]`. `None` when either wall has zero length.
    pub fn angle_to(&self, other: &Wall) -> Option<f64> {
        let v1 = self.direction();
        let v2 = other.direction();
        let magnitudes = v1.norm() * v2.norm();
        if magnitudes == 0.0 {
            return None;
        }
        let cos_theta = (v1.dot(&v2) / magnitudes).clamp(-1.0, 1.0);
        Some(cos_theta.acos().to_degrees())
    }

    pub fn feature_count(&self) -> usize {
        self.doors.len() + self.windows.len() + self.openings.len()
    }
}
