use glam::Vec2;

use super::path::{is_clockwise, Path2};

/// Filled outline with zero or more holes cut out of it
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub outline: Path2,
    pub holes: Vec<Path2>,
}

/// Sampled polygons of a shape, ready for triangulation
#[derive(Debug, Clone, PartialEq)]
pub struct ShapePoints {
    pub contour: Vec<Vec2>,
    pub holes: Vec<Vec<Vec2>>,
}

impl Shape {
    pub fn new(outline: Path2) -> Self {
        Self {
            outline,
            holes: Vec::new(),
        }
    }

    pub fn with_hole(mut self, hole: Path2) -> Self {
        self.holes.push(hole);
        self
    }

    /// Sample outline and holes, with the outline wound clockwise and holes
    /// counter-clockwise. Holes with fewer than three points are dropped.
    pub fn extract_points(&self, divisions: u32) -> ShapePoints {
        let mut contour = self.outline.points(divisions);
        if !is_clockwise(&contour) {
            contour.reverse();
        }

        let holes = self
            .holes
            .iter()
            .map(|hole| {
                let mut points = hole.points(divisions);
                if is_clockwise(&points) {
                    points.reverse();
                }
                points
            })
            .filter(|points| points.len() >= 3)
            .collect();

        ShapePoints { contour, holes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::path::signed_area;

    fn square(min: f32, max: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(min, min),
            Vec2::new(max, min),
            Vec2::new(max, max),
            Vec2::new(min, max),
        ]
    }

    #[test]
    fn test_extract_points_normalises_winding() {
        // Both given counter-clockwise
        let shape = Shape::new(Path2::polygon(&square(0.0, 3.0)))
            .with_hole(Path2::polygon(&square(1.0, 2.0)));

        let points = shape.extract_points(12);
        assert!(signed_area(&points.contour) < 0.0);
        assert_eq!(points.holes.len(), 1);
        assert!(signed_area(&points.holes[0]) > 0.0);
    }

    #[test]
    fn test_extract_points_drops_degenerate_holes() {
        let shape = Shape::new(Path2::polygon(&square(0.0, 3.0)))
            .with_hole(Path2::polygon(&[Vec2::ONE, Vec2::new(2.0, 2.0)]));
        assert!(shape.extract_points(12).holes.is_empty());
    }
}
