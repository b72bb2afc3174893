//! Three-circle Venn geometry: centers, intersections and label anchors

use super::polar::{distance, polar_to_cartesian};
use super::types::{Point, PolarCoord};

/// Circle centers sit this fraction of the radius away from the diagram center
pub const DEFAULT_OFFSET_RATIO: f64 = 0.6;

/// Angles of the three circle centers: top, lower right, lower left
pub const CENTER_ANGLES: [f64; 3] = [-90.0, 30.0, 150.0];

/// Intersections closer than this collapse into a single tangent point
const TANGENT_EPSILON: f64 = 1e-4;

/// Centers of the three equal circles in an equilateral arrangement
pub fn venn_centers(center: Point, radius: f64, offset_ratio: f64) -> [Point; 3] {
    let offset = radius * offset_ratio;
    CENTER_ANGLES.map(|angle| polar_to_cartesian(center, PolarCoord::new(offset, angle)))
}

/// Intersection points of two circle boundaries.
///
/// Empty when the circles are separate, nested, concentric, or tangent
/// (externally or internally). A crossing whose half-chord is below 1e-4
/// collapses into its single foot point.
pub fn circle_intersections(c1: Point, r1: f64, c2: Point, r2: f64) -> Vec<Point> {
    let d = distance(c1, c2);
    if d == 0.0 || d >= r1 + r2 || d <= (r1 - r2).abs() {
        return vec![];
    }

    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();
    let ux = (c2.x - c1.x) / d;
    let uy = (c2.y - c1.y) / d;
    let foot = Point::new(c1.x + a * ux, c1.y + a * uy);

    if h < TANGENT_EPSILON {
        return vec![foot];
    }

    // perpendicular to the center line
    let (px, py) = (-uy, ux);
    vec![
        Point::new(foot.x + h * px, foot.y + h * py),
        Point::new(foot.x - h * px, foot.y - h * py),
    ]
}

/// Arithmetic mean of a point set, `None` when empty
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

fn inside(point: Point, center: Point, radius: f64) -> bool {
    distance(point, center) < radius
}

/// Anchor for the label of the region inside circles `i` and `j` but outside the third.
///
/// The region is bounded by the `i`/`j` crossing that lies outside the third
/// circle and by the third circle's crossings with `i` and `j` that lie inside
/// `j` and `i` respectively; the anchor is the centroid of those vertices.
/// Falls back to the centroid of all `i`/`j` crossings, then to the midpoint
/// of the two centers.
pub fn pair_region_anchor(centers: &[Point; 3], radius: f64, i: usize, j: usize) -> Point {
    let k = 3 - i - j;
    let (ci, cj, ck) = (centers[i], centers[j], centers[k]);

    let ij = circle_intersections(ci, radius, cj, radius);
    let mut vertices: Vec<Point> = ij
        .iter()
        .copied()
        .filter(|p| !inside(*p, ck, radius))
        .collect();
    vertices.extend(
        circle_intersections(ci, radius, ck, radius)
            .into_iter()
            .filter(|p| inside(*p, cj, radius)),
    );
    vertices.extend(
        circle_intersections(cj, radius, ck, radius)
            .into_iter()
            .filter(|p| inside(*p, ci, radius)),
    );

    centroid(&vertices)
        .or_else(|| centroid(&ij))
        .unwrap_or_else(|| Point::new((ci.x + cj.x) / 2.0, (ci.y + cj.y) / 2.0))
}

/// Anchor for a set's own name: on the ray from the diagram center through
/// the circle center, half a radius beyond the circle center
pub fn set_label_anchor(center: Point, radius: f64, offset_ratio: f64, index: usize) -> Point {
    let angle = CENTER_ANGLES[index % 3];
    polar_to_cartesian(
        center,
        PolarCoord::new(radius * offset_ratio + radius * 0.5, angle),
    )
}

/// Normalize an overlap key such as `"B, A"` to a sorted set of trimmed names
pub fn overlap_key(key: &str) -> Vec<String> {
    let mut names: Vec<String> = key
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    names.sort();
    names
}
