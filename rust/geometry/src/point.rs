// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integer-millimeter plan points

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Largest absolute plan coordinate, in millimeters (1000 km). Squared
/// distances between points inside this bound fit in an `i64`.
pub const MAX_COORDINATE_MM: i64 = 1_000_000_000;

/// A named point on the floor plan, in whole millimeters.
///
/// Two notions of sameness are used by the pipeline: [`Point::coincides_with`]
/// compares coordinates only, while corner repair matches on `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub id: String,
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(id: impl Into<String>, x: i64, y: i64) -> Self {
        Self { id: id.into(), x, y }
    }

    /// Same position, regardless of id.
    #[inline]
    pub fn coincides_with(&self, other: &Point) -> bool {
        self.x == other.x && self.y == other.y
    }

    #[inline]
    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    /// True when both coordinates lie within [`MAX_COORDINATE_MM`].
    #[inline]
    pub fn is_in_range(&self) -> bool {
        let limit = MAX_COORDINATE_MM.unsigned_abs();
        self.x.unsigned_abs() <= limit && self.y.unsigned_abs() <= limit
    }

    /// Squared euclidean distance in square millimeters, saturating at
    /// `i64::MAX` for points outside the coordinate range.
    #[inline]
    pub fn distance_squared(&self, other: &Point) -> i64 {
        let dx = self.x as i128 - other.x as i128;
        let dy = self.y as i128 - other.y as i128;
        i64::try_from(dx * dx + dy * dy).unwrap_or(i64::MAX)
    }

    /// Vector from `other` to `self`.
    pub fn delta_from(&self, other: &Point) -> Vector2<f64> {
        Vector2::new(
            self.x as f64 - other.x as f64,
            self.y as f64 - other.y as f64,
        )
    }

    /// Copy of this point moved to a new position, keeping its id.
    pub fn moved_to(&self, x: i64, y: i64) -> Self {
        Self {
            id: self.id.clone(),
            x,
            y,
        }
    }
}
