// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for room conversion
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] floorplan_lite_geometry::Error),

    #[error("Invalid captured room: {0}")]
    InvalidCapture(#[source] serde_json::Error),

    #[error("Invalid floor plan document: {0}")]
    InvalidDocument(#[source] serde_json::Error),

    #[error("Invalid conversion config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Failed to serialize floor plan: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl Error {
    /// True when the room itself is unusable, as opposed to an output failure.
    pub fn is_malformed_input(&self) -> bool {
        match self {
            Error::Geometry(err) => err.is_malformed_input(),
            Error::InvalidCapture(_) => true,
            Error::InvalidDocument(_) | Error::InvalidConfig { .. } | Error::Serialization(_) => {
                false
            }
        }
    }
}
