// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::projection::FeatureKind;
use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reducing a captured room to a floor plan.
///
/// Every variant describes malformed input: the room cannot be converted and
/// the caller should report the scan as unprocessable. Parallel lines during
/// corner repair and features without a host wall are not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Zero-length wall {wall_id}: both endpoints project to ({x}, {y})")]
    ZeroLengthWall { wall_id: String, x: i64, y: i64 },

    #[error("Non-finite dimension on {kind} {feature_id}: {value}")]
    NonFiniteDimension {
        kind: FeatureKind,
        feature_id: String,
        value: f64,
    },

    #[error("Transform of {kind} {feature_id} produces a non-finite coordinate")]
    NonFiniteCoordinate { kind: FeatureKind, feature_id: String },

    #[error("Transform of {kind} {feature_id} places it beyond {limit}mm from the origin")]
    CoordinateOutOfRange {
        kind: FeatureKind,
        feature_id: String,
        limit: i64,
    },
}

impl Error {
    /// True for every error that means the captured room itself is unusable.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Error::ZeroLengthWall { .. }
                | Error::NonFiniteDimension { .. }
                | Error::NonFiniteCoordinate { .. }
                | Error::CoordinateOutOfRange { .. }
        )
    }

    /// Identifier of the feature that caused the error.
    pub fn feature_id(&self) -> &str {
        match self {
            Error::ZeroLengthWall { wall_id, .. } => wall_id,
            Error::NonFiniteDimension { feature_id, .. }
            | Error::NonFiniteCoordinate { feature_id, .. }
            | Error::CoordinateOutOfRange { feature_id, .. } => feature_id,
        }
    }
}
