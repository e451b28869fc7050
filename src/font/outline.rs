use glam::Vec2;

use crate::geometry::path::{contains_point, signed_area};
use crate::geometry::{Path2, Shape};

/// Curve subdivisions used only to decide winding and containment
const CLASSIFY_DIVISIONS: u32 = 12;

struct Contour {
    path: Path2,
    points: Vec<Vec2>,
    area: f32,
}

/// Group the contours of one glyph into filled shapes.
///
/// Clockwise contours are solids and counter-clockwise contours are holes.
/// A glyph without any clockwise contour is treated as wound the other way
/// round. Each hole is cut from the smallest solid containing it; a hole
/// that no solid contains becomes a solid of its own.
pub fn shapes_from_paths(paths: Vec<Path2>) -> Vec<Shape> {
    let contours: Vec<Contour> = paths
        .into_iter()
        .filter_map(|path| {
            let points = path.points(CLASSIFY_DIVISIONS);
            let area = signed_area(&points);
            (points.len() >= 3 && area != 0.0).then_some(Contour { path, points, area })
        })
        .collect();

    let solid_sign = if contours.iter().any(|c| c.area < 0.0) {
        -1.0
    } else {
        1.0
    };

    let (solids, holes): (Vec<Contour>, Vec<Contour>) = contours
        .into_iter()
        .partition(|c| c.area.signum() == solid_sign);

    let mut shapes: Vec<Shape> = solids.iter().map(|c| Shape::new(c.path.clone())).collect();

    for hole in holes {
        let probe = hole.points[0];
        let owner = solids
            .iter()
            .enumerate()
            .filter(|(_, solid)| contains_point(&solid.points, probe))
            .min_by(|(_, a), (_, b)| a.area.abs().total_cmp(&b.area.abs()))
            .map(|(i, _)| i);

        match owner {
            Some(i) => shapes[i].holes.push(hole.path),
            None => shapes.push(Shape::new(hole.path)),
        }
    }

    shapes
}
