// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attachment of doors, windows and openings to their host walls

use crate::projection::{OpeningKind, ProjectedFeature};
use crate::wall::{FeatureRecord, Wall};

/// Divisor applied to the squared start-to-feature distance.
pub const DEFAULT_OFFSET_SCALE: i64 = 10_000;

/// `doorType` written for doors the capture reports as open.
pub const OPEN_DOOR_TYPE: &str = "doorOpening";

/// Counters for features that found no host wall, by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unattached {
    pub doors: usize,
    pub windows: usize,
    pub openings: usize,
}

impl Unattached {
    pub fn total(&self) -> usize {
        self.doors + self.windows + self.openings
    }

    fn record(&mut self, kind: OpeningKind) {
        match kind {
            OpeningKind::Door => self.doors += 1,
            OpeningKind::Window => self.windows += 1,
            OpeningKind::Opening => self.openings += 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OpeningAttacher {
    offset_scale: i64,
}

impl OpeningAttacher {
    /// A scale below 1 is raised to 1.
    pub fn new(offset_scale: i64) -> Self {
        if offset_scale < 1 {
            tracing::warn!(offset_scale, "Offset scale below 1, using 1");
        }
        Self {
            offset_scale: offset_scale.max(1),
        }
    }

    /// Index of the first wall whose id contains `parent` as a substring.
    ///
    /// Merged walls carry space-joined source ids, so a feature captured in
    /// either source wall still finds the merged wall. An empty parent id
    /// matches nothing.
    pub fn host_index(walls: &[Wall], parent: &str) -> Option<usize> {
        if parent.is_empty() {
            return None;
        }
        walls.iter().position(|wall| wall.id.contains(parent))
    }

    /// Record for a feature hosted by `wall`.
    pub fn record_for(&self, wall: &Wall, feature: &ProjectedFeature) -> FeatureRecord {
        let door_type = (feature.kind == OpeningKind::Door && feature.is_open)
            .then(|| OPEN_DOOR_TYPE.to_string());

        FeatureRecord {
            offset: wall.start.distance_squared(&feature.position) / self.offset_scale,
            width: feature.width,
            door_type,
        }
    }

    /// Attach a feature to its host wall. Returns `false` when no wall
    /// matches, in which case the feature is dropped.
    pub fn attach(&self, walls: &mut [Wall], feature: &ProjectedFeature) -> bool {
        let parent = feature.parent_identifier.as_deref().unwrap_or_default();
        let Some(index) = Self::host_index(walls, parent) else {
            tracing::debug!(
                kind = %feature.kind,
                feature = %feature.identifier,
                parent,
                "No host wall for feature, dropping"
            );
            return false;
        };

        let record = self.record_for(&walls[index], feature);
        let wall = &mut walls[index];
        match feature.kind {
            OpeningKind::Door => wall.doors.push(record),
            OpeningKind::Window => wall.windows.push(record),
            OpeningKind::Opening => wall.openings.push(record),
        }
        true
    }

    /// Attach every feature in order, counting the ones that were dropped.
    pub fn attach_all<'a, I>(&self, walls: &mut [Wall], features: I) -> Unattached
    where
        I: IntoIterator<Item = &'a ProjectedFeature>,
    {
        let mut unattached = Unattached::default();
        for feature in features {
            if !self.attach(walls, feature) {
                unattached.record(feature.kind);
            }
        }
        unattached
    }
}

impl Default for OpeningAttacher {
    fn default() -> Self {
        Self::new(DEFAULT_OFFSET_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;
    use crate::wall::DEFAULT_WALL_THICKNESS;

    fn wall(id: &str, x1: i64, y1: i64, x2: i64, y2: i64) -> Wall {
        Wall::new(
            id,
            Point::new("s", x1, y1),
            Point::new("e", x2, y2),
            DEFAULT_WALL_THICKNESS,
        )
    }

    fn feature(kind: OpeningKind, parent: Option<&str>, x: i64, y: i64) -> ProjectedFeature {
        ProjectedFeature {
            kind,
            identifier: "F".into(),
            parent_identifier: parent.map(str::to_string),
            position: Point::new("F", x, y),
            width: 900,
            is_open: false,
        }
    }

    #[test]
    fn test_offset_at_wall_start_is_zero() {
        let mut walls = vec![wall("W1", 0, 0, 4000, 0)];
        assert!(OpeningAttacher::default().attach(&mut walls, &feature(OpeningKind::Door, Some("W1"), 0, 0)));
        assert_eq!(walls[0].doors[0].offset, 0);
        assert_eq!(walls[0].doors[0].width, 900);
    }

    #[test]
    fn test_offset_is_scaled_squared_distance() {
        let mut walls = vec![wall("W1", 0, 0, 4000, 0)];
        OpeningAttacher::default().attach(&mut walls, &feature(OpeningKind::Window, Some("W1"), 1500, 0));
        // 1500² / 10000, not 1500
        assert_eq!(walls[0].windows[0].offset, 225);

        OpeningAttacher::default().attach(&mut walls, &feature(OpeningKind::Window, Some("W1"), 30, 40));
        // 2500 / 10000 truncates to 0
        assert_eq!(walls[0].windows[1].offset, 0);
    }

    #[test]
    fn test_substring_match_finds_merged_wall() {
        let mut walls = vec![wall("W3", 0, 0, 0, 3000), wall("W1 W2", 0, 0, 2000, 0)];
        OpeningAttacher::default().attach(&mut walls, &feature(OpeningKind::Opening, Some("W2"), 1000, 0));

        assert!(walls[0].openings.is_empty());
        assert_eq!(walls[1].openings[0].offset, 100);
    }

    #[test]
    fn test_first_matching_wall_wins() {
        let walls = vec![wall("W1 W2", 0, 0, 1, 0), wall("W2 W3", 0, 0, 1, 0)];
        assert_eq!(OpeningAttacher::host_index(&walls, "W2"), Some(0));
        assert_eq!(OpeningAttacher::host_index(&walls, "W3"), Some(1));
        assert_eq!(OpeningAttacher::host_index(&walls, ""), None);
    }

    #[test]
    fn test_unmatched_features_are_counted() {
        let mut walls = vec![wall("W1", 0, 0, 4000, 0)];
        let features = vec![
            feature(OpeningKind::Door, Some("W9"), 0, 0),
            feature(OpeningKind::Window, None, 0, 0),
            feature(OpeningKind::Opening, Some(""), 0, 0),
            feature(OpeningKind::Door, Some("W1"), 0, 0),
        ];

        let unattached = OpeningAttacher::default().attach_all(&mut walls, &features);

        assert_eq!(
            unattached,
            Unattached {
                doors: 1,
                windows: 1,
                openings: 1
            }
        );
        assert_eq!(unattached.total(), 3);
        assert_eq!(walls[0].feature_count(), 1);
    }

    #[test]
    fn test_open_door_type() {
        let mut walls = vec![wall("W1", 0, 0, 4000, 0)];
        let mut open = feature(OpeningKind::Door, Some("W1"), 100, 0);
        open.is_open = true;
        let mut open_window = feature(OpeningKind::Window, Some("W1"), 100, 0);
        open_window.is_open = true;

        let attacher = OpeningAttacher::default();
        attacher.attach(&mut walls, &open);
        attacher.attach(&mut walls, &feature(OpeningKind::Door, Some("W1"), 100, 0));
        attacher.attach(&mut walls, &open_window);

        assert_eq!(walls[0].doors[0].door_type.as_deref(), Some(OPEN_DOOR_TYPE));
        assert_eq!(walls[0].doors[1].door_type, None);
        assert_eq!(walls[0].windows[0].door_type, None);
    }

    #[test]
    fn test_each_kind_fills_its_own_list() {
        let mut walls = vec![wall("W1", 0, 0, 4000, 0)];
        let features = [
            feature(OpeningKind::Opening, Some("W1"), 100, 0),
            feature(OpeningKind::Window, Some("W1"), 200, 0),
            feature(OpeningKind::Door, Some("W1"), 300, 0),
        ];

        let unattached = OpeningAttacher::new(1).attach_all(&mut walls, &features);

        assert_eq!(unattached.total(), 0);
        assert_eq!(walls[0].openings[0].offset, 10_000);
        assert_eq!(walls[0].windows[0].offset, 40_000);
        assert_eq!(walls[0].doors[0].offset, 90_000);
    }

    #[test]
    fn test_scale_below_one_is_raised() {
        let mut walls = vec![wall("W1", 0, 0, 4000, 0)];
        OpeningAttacher::new(0).attach(&mut walls, &feature(OpeningKind::Door, Some("W1"), 30, 40));
        OpeningAttacher::new(-5).attach(&mut walls, &feature(OpeningKind::Door, Some("W1"), 30, 40));

        assert_eq!(walls[0].doors[0].offset, 2500);
        assert_eq!(walls[0].doors[1].offset, 2500);
    }
}
