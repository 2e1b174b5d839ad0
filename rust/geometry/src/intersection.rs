// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Intersection of infinite lines through plan points

use crate::point::Point;

/// Intersection of the line through `p1`/`p2` with the line through `p3`/`p4`,
/// truncated to whole millimeters.
///
/// Lines are handled parametrically, so vertical walls need no special case.
/// Returns `None` when the lines are parallel (including coincident lines),
/// when either pair of points is degenerate, or when the hit falls outside
/// [`crate::point::MAX_COORDINATE_MM`]. All arithmetic stays on the integer coordinates, so
/// "parallel" is exact and the result is the true intersection truncated
/// toward zero.
pub fn line_intersection(p1: &Point, p2: &Point, p3: &Point, p4: &Point) -> Option<(i64, i64)> {
    let (x1, y1) = (p1.x as i128, p1.y as i128);
    let (d1x, d1y) = (p2.x as i128 - x1, p2.y as i128 - y1);
    let (d2x, d2y) = (p4.x as i128 - p3.x as i128, p4.y as i128 - p3.y as i128);

    let denom = cross(d1x, d1y, d2x, d2y)?;
    if denom == 0 {
        return None;
    }

    let (wx, wy) = (p3.x as i128 - x1, p3.y as i128 - y1);
    let numer = cross(wx, wy, d2x, d2y)?;

    // p1 + (numer / denom) * d1, kept rational so truncation is exact
    let x = x1.checked_mul(denom)?.checked_add(numer.checked_mul(d1x)?)? / denom;
    let y = y1.checked_mul(denom)?.checked_add(numer.checked_mul(d1y)?)? / denom;

    let hit = Point::new("", i64::try_from(x).ok()?, i64::try_from(y).ok()?);
    hit.is_in_range().then_some((hit.x, hit.y))
}

/// Perpendicular distance from `point` to the infinite line through `a`/`b`.
pub fn distance_to_line(point: &Point, a: &Point, b: &Point) -> f64 {
    let direction = b.delta_from(a);
    let length = direction.norm();
    if length == 0.0 {
        return (point.distance_squared(a) as f64).sqrt();
    }
    direction.perp(&point.delta_from(a)).abs() / length
}

#[inline]
fn cross(ax: i128, ay: i128, bx: i128, by: i128) -> Option<i128> {
    ax.checked_mul(by)?.checked_sub(ay.checked_mul(bx)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: i64, y: i64) -> Point {
        Point::new("", x, y)
    }

    #[test]
    fn test_diagonal_meets_horizontal() {
        let hit = line_intersection(&p(0, 0), &p(2000, 0), &p(500, 500), &p(1000, 0));
        assert_eq!(hit, Some((1000, 0)));
    }

    #[test]
    fn test_vertical_line() {
        let hit = line_intersection(&p(0, 0), &p(2000, 0), &p(1000, 1000), &p(1000, 10));
        assert_eq!(hit, Some((1000, 0)));

        let hit = line_intersection(&p(300, -50), &p(300, 900), &p(0, 100), &p(1000, 100));
        assert_eq!(hit, Some((300, 100)));
    }

    #[test]
    fn test_parallel_lines() {
        assert_eq!(
            line_intersection(&p(0, 0), &p(1000, 0), &p(0, 500), &p(1000, 500)),
            None
        );
        // Antiparallel and coincident count as parallel too
        assert_eq!(
            line_intersection(&p(0, 0), &p(1000, 1000), &p(2000, 2000), &p(1500, 1500)),
            None
        );
    }

    #[test]
    fn test_degenerate_line() {
        assert_eq!(
            line_intersection(&p(5, 5), &p(5, 5), &p(0, 0), &p(0, 100)),
            None
        );
    }

    #[test]
    fn test_intersection_outside_segments() {
        // Lines are infinite; the hit may lie beyond both segments
        let hit = line_intersection(&p(0, 0), &p(10, 0), &p(50, 10), &p(50, 20));
        assert_eq!(hit, Some((50, 0)));
    }

    #[test]
    fn test_truncates_toward_zero() {
        // x = 1000/3
        let hit = line_intersection(&p(0, 0), &p(1000, 0), &p(0, 1000), &p(1000, -2000));
        assert_eq!(hit, Some((333, 0)));
    }

    #[test]
    fn test_far_intersection_is_rejected() {
        // Nearly parallel lines meet about 10^12 mm away
        let hit = line_intersection(
            &p(0, 0),
            &p(1_000_000, 0),
            &p(0, 1_000_000),
            &p(1_000_000, 999_999),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let hit = line_intersection(
            &p(i64::MIN, i64::MIN),
            &p(i64::MAX, 0),
            &p(i64::MAX, i64::MIN),
            &p(0, i64::MAX),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn test_distance_to_line() {
        assert_relative_eq!(distance_to_line(&p(500, 300), &p(0, 0), &p(1000, 0)), 300.0);
        assert_relative_eq!(distance_to_line(&p(2500, 0), &p(0, 0), &p(1000, 0)), 0.0);
        assert_relative_eq!(distance_to_line(&p(3, 4), &p(0, 0), &p(0, 0)), 5.0);
    }
}
