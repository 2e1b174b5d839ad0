// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Projection of captured 3D boxes onto the 2D plan
//!
//! Every captured feature is an oriented box: a rigid 4x4 transform placing
//! its local frame in the world plus a size vector. The local X axis runs
//! along the wall, so the wall's footprint is the segment
//! `(-width/2, 0, 0) .. (width/2, 0, 0)` in local space. After transforming,
//! the world X/Z plane becomes the plan: meters are scaled to millimeters,
//! X is negated to flip the plan horizontally, and both coordinates are
//! truncated to integers.

use crate::error::{Error, Result};
use crate::point::{Point, MAX_COORDINATE_MM};
use crate::wall::Wall;
use nalgebra::{Matrix4, Vector3, Vector4};
use serde::{Deserialize, Serialize};
use std::fmt;

const MILLIMETERS_PER_METER: f64 = 1000.0;

/// Kind of captured feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureKind {
    Wall,
    Door,
    Window,
    Opening,
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeatureKind::Wall => "wall",
            FeatureKind::Door => "door",
            FeatureKind::Window => "window",
            FeatureKind::Opening => "opening",
        };
        f.write_str(name)
    }
}

/// Kind of feature a wall can host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpeningKind {
    Door,
    Window,
    Opening,
}

impl From<OpeningKind> for FeatureKind {
    fn from(kind: OpeningKind) -> Self {
        match kind {
            OpeningKind::Door => FeatureKind::Door,
            OpeningKind::Window => FeatureKind::Window,
            OpeningKind::Opening => FeatureKind::Opening,
        }
    }
}

impl fmt::Display for OpeningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&FeatureKind::from(*self), f)
    }
}

/// A door, window or opening reduced to a single plan point.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedFeature {
    pub kind: OpeningKind,
    pub identifier: String,
    /// Identifier of the wall the capture placed this feature in.
    pub parent_identifier: Option<String>,
    pub position: Point,
    /// Feature width in millimeters
    pub width: i64,
    pub is_open: bool,
}

/// Projects captured boxes into plan space.
///
/// Wall endpoints get sequential ids `"1"`, `"2"`, ... in projection order,
/// so a projector must not be shared between conversions.
#[derive(Debug, Clone)]
pub struct Projector {
    next_point_id: usize,
    wall_thickness: i64,
}

impl Projector {
    pub fn new(wall_thickness: i64) -> Self {
        Self {
            next_point_id: 1,
            wall_thickness,
        }
    }

    /// Number of point ids handed out so far.
    pub fn points_allocated(&self) -> usize {
        self.next_point_id - 1
    }

    /// Project a wall into a two-point segment.
    pub fn project_wall(
        &mut self,
        identifier: &str,
        transform: &Matrix4<f64>,
        dimensions: &Vector3<f64>,
    ) -> Result<Wall> {
        let half_width = checked_width(FeatureKind::Wall, identifier, dimensions)? / 2.0;

        let (sx, sy) = project_local(FeatureKind::Wall, identifier, transform, -half_width)?;
        let (ex, ey) = project_local(FeatureKind::Wall, identifier, transform, half_width)?;

        if sx == ex && sy == ey {
            return Err(Error::ZeroLengthWall {
                wall_id: identifier.to_string(),
                x: sx,
                y: sy,
            });
        }

        let start = Point::new(self.allocate_id(), sx, sy);
        let end = Point::new(self.allocate_id(), ex, ey);
        Ok(Wall::new(identifier, start, end, self.wall_thickness))
    }

    /// Project a door, window or opening onto the point at its local
    /// `-width/2` edge. Feature points are not part of the plan graph and
    /// carry the feature identifier as their id.
    pub fn project_feature(
        &self,
        kind: OpeningKind,
        identifier: &str,
        parent_identifier: Option<&str>,
        transform: &Matrix4<f64>,
        dimensions: &Vector3<f64>,
        is_open: bool,
    ) -> Result<ProjectedFeature> {
        let width = checked_width(kind.into(), identifier, dimensions)?;
        let (x, y) = project_local(kind.into(), identifier, transform, -width / 2.0)?;

        Ok(ProjectedFeature {
            kind,
            identifier: identifier.to_string(),
            parent_identifier: parent_identifier.map(str::to_string),
            position: Point::new(identifier, x, y),
            width: to_millimeters(width),
            is_open,
        })
    }

    fn allocate_id(&mut self) -> String {
        let id = self.next_point_id.to_string();
        self.next_point_id += 1;
        id
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(crate::wall::DEFAULT_WALL_THICKNESS)
    }
}

fn checked_width(kind: FeatureKind, identifier: &str, dimensions: &Vector3<f64>) -> Result<f64> {
    if let Some(&value) = dimensions.iter().find(|v| !v.is_finite()) {
        return Err(Error::NonFiniteDimension {
            kind,
            feature_id: identifier.to_string(),
            value,
        });
    }
    Ok(dimensions.x)
}

/// Transform the local point `(local_x, 0, 0, 1)` and flatten it to plan
/// millimeters.
fn project_local(
    kind: FeatureKind,
    identifier: &str,
    transform: &Matrix4<f64>,
    local_x: f64,
) -> Result<(i64, i64)> {
    let world = transform * Vector4::new(local_x, 0.0, 0.0, 1.0);
    let x = world.x * MILLIMETERS_PER_METER;
    let z = world.z * MILLIMETERS_PER_METER;

    // `as i64` would silently saturate NaN to 0
    if !x.is_finite() || !z.is_finite() {
        return Err(Error::NonFiniteCoordinate {
            kind,
            feature_id: identifier.to_string(),
        });
    }

    let limit = MAX_COORDINATE_MM as f64;
    if x.abs() > limit || z.abs() > limit {
        return Err(Error::CoordinateOutOfRange {
            kind,
            feature_id: identifier.to_string(),
            limit: MAX_COORDINATE_MM,
        });
    }

    Ok((-(x as i64), z as i64))
}

#[inline]
fn to_millimeters(meters: f64) -> i64 {
    (meters * MILLIMETERS_PER_METER) as i64
}
