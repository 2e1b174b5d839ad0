// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output document: points plus walls referencing them by id.

use crate::error::{Error, Result};
use floorplan_lite_geometry::{FeatureRecord, FloorPlan, Point, Wall};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryDocument {
    pub geometry: RoomGeometry,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomGeometry {
    pub points: Vec<Point>,
    pub walls: Vec<PlanWall>,
}

/// A wall whose endpoints are point ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanWall {
    pub id: String,
    pub start: String,
    pub end: String,
    pub thickness: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub openings: Vec<FeatureRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub doors: Vec<FeatureRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub windows: Vec<FeatureRecord>,
}

impl From<Wall> for PlanWall {
    fn from(wall: Wall) -> Self {
        Self {
            id: wall.id,
            start: wall.start.id,
            end: wall.end.id,
            thickness: wall.thickness,
            openings: wall.openings,
            doors: wall.doors,
            windows: wall.windows,
        }
    }
}

impl GeometryDocument {
    pub fn from_floor_plan(plan: FloorPlan) -> Self {
        Self {
            geometry: RoomGeometry {
                points: plan.points,
                walls: plan.walls.into_iter().map(PlanWall::from).collect(),
            },
        }
    }

    pub fn point(&self, id: &str) -> Option<&Point> {
        self.geometry.points.iter().find(|p| p.id == id)
    }

    pub fn wall(&self, id: &str) -> Option<&PlanWall> {
        self.geometry.walls.iter().find(|w| w.id == id)
    }

    /// Pretty-printed JSON, the form handed to downstream consumers.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::Serialization)
    }

    pub fn to_json_compact(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::Serialization)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::InvalidDocument)
    }
}
