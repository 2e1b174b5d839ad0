// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Live point/wall graph shared by the merge stages

use crate::dedup::Deduplication;
use crate::error::{Error, Result};
use crate::point::Point;
use crate::wall::Wall;

/// Canonical points and the walls spanning them.
///
/// Walls embed copies of their endpoints. Whenever a point moves, every copy
/// with the same id is updated so all stages observe the new position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallGraph {
    pub points: Vec<Point>,
    pub walls: Vec<Wall>,
}

impl WallGraph {
    /// Rewire projected walls onto deduplicated points.
    ///
    /// Endpoints are matched by their original coordinates against the
    /// deduplication snapshot, so a wall whose endpoint was averaged away
    /// still lands on the canonical point standing in for it.
    pub fn build(dedup: Deduplication, walls: Vec<Wall>) -> Self {
        let walls = walls
            .into_iter()
            .map(|mut wall| {
                if let Some(start) = dedup.resolve(wall.start.x, wall.start.y) {
                    wall.start = start.clone();
                }
                if let Some(end) = dedup.resolve(wall.end.x, wall.end.y) {
                    wall.end = end.clone();
                }
                wall
            })
            .collect();

        Self {
            points: dedup.into_points(),
            walls,
        }
    }

    /// Fail on the first wall whose endpoints collapsed onto one point.
    ///
    /// A wall shorter than the merge distance survives projection but loses
    /// its length once both endpoints resolve to the same canonical point.
    pub fn ensure_no_degenerate_walls(&self) -> Result<()> {
        match self.walls.iter().find(|wall| wall.is_degenerate()) {
            Some(wall) => Err(Error::ZeroLengthWall {
                wall_id: wall.id.clone(),
                x: wall.start.x,
                y: wall.start.y,
            }),
            None => Ok(()),
        }
    }

    pub fn point(&self, id: &str) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Move the point `id` and every wall endpoint copy of it. Walls held
    /// outside the graph (merge results not yet reconciled) are passed in
    /// `pending` so they stay in sync.
    pub fn relocate_point(&mut self, id: &str, x: i64, y: i64, pending: &mut [Wall]) {
        for point in self.points.iter_mut().filter(|p| p.id == id) {
            point.x = x;
            point.y = y;
        }
        for wall in self.walls.iter_mut().chain(pending.iter_mut()) {
            if wall.start.id == id {
                wall.start = wall.start.moved_to(x, y);
            }
            if wall.end.id == id {
                wall.end = wall.end.moved_to(x, y);
            }
        }
    }
}
