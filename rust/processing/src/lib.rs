// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan conversion pipeline shared by hosts.
//!
//! Takes a completed room capture (JSON or [`CapturedRoom`]), runs it through
//! the geometry crate and produces the `{"geometry": {points, walls}}`
//! document.
//!
//! ```rust,ignore
//! use floorplan_lite_processing::FloorPlanConverter;
//!
//! let converter = FloorPlanConverter::default();
//! let document_json = converter.convert_json(&captured_room_json)?;
//! ```

pub mod capture;
pub mod config;
pub mod converter;
pub mod document;
pub mod error;

pub use capture::{CapturedFeature, CapturedRoom, CapturedWall};
pub use config::ConversionConfig;
pub use converter::{Conversion, ConversionStats, FloorPlanConverter};
pub use document::{GeometryDocument, PlanWall, RoomGeometry};
pub use error::{Error, Result};
