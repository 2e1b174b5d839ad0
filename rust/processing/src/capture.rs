// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Captured room input model
//!
//! A room arrives as four ordered lists of oriented boxes. Each box carries
//! a column-major 4x4 world transform and its size in meters.

use crate::error::{Error, Result};
use floorplan_lite_geometry::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedRoom {
    pub walls: Vec<CapturedWall>,
    #[serde(default)]
    pub doors: Vec<CapturedFeature>,
    #[serde(default)]
    pub windows: Vec<CapturedFeature>,
    #[serde(default)]
    pub openings: Vec<CapturedFeature>,
}

impl CapturedRoom {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::InvalidCapture)
    }

    pub fn feature_count(&self) -> usize {
        self.doors.len() + self.windows.len() + self.openings.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedWall {
    pub identifier: String,
    /// Column-major world transform
    pub transform: [f64; 16],
    /// Width, height and depth in meters
    pub dimensions: [f64; 3],
}

impl CapturedWall {
    pub fn transform(&self) -> Matrix4<f64> {
        Matrix4::from_column_slice(&self.transform)
    }

    pub fn dimensions(&self) -> Vector3<f64> {
        Vector3::from(self.dimensions)
    }
}

/// A door, window or opening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedFeature {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_identifier: Option<String>,
    pub transform: [f64; 16],
    pub dimensions: [f64; 3],
    #[serde(default)]
    pub is_open: bool,
}

impl CapturedFeature {
    pub fn transform(&self) -> Matrix4<f64> {
        Matrix4::from_column_slice(&self.transform)
    }

    pub fn dimensions(&self) -> Vector3<f64> {
        Vector3::from(self.dimensions)
    }
}
