use glam::Vec2;

/// One drawing command of a 2D outline; each starts where the previous ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Vec2),
    Quadratic { control: Vec2, to: Vec2 },
    Cubic { control1: Vec2, control2: Vec2, to: Vec2 },
}

impl Segment {
    pub fn end(&self) -> Vec2 {
        match *self {
            Segment::Line(to) | Segment::Quadratic { to, .. } | Segment::Cubic { to, .. } => to,
        }
    }
}

/// Closed 2D outline made of lines and Bézier curves
#[derive(Debug, Clone, PartialEq)]
pub struct Path2 {
    pub start: Vec2,
    pub segments: Vec<Segment>,
}

impl Path2 {
    pub fn new(start: Vec2) -> Self {
        Self {
            start,
            segments: Vec::new(),
        }
    }

    /// Closed polygon through `points`
    pub fn polygon(points: &[Vec2]) -> Self {
        let mut path = Self::new(points.first().copied().unwrap_or(Vec2::ZERO));
        for &p in points.iter().skip(1) {
            path.line_to(p);
        }
        path
    }

    pub fn line_to(&mut self, to: Vec2) -> &mut Self {
        self.segments.push(Segment::Line(to));
        self
    }

    pub fn quadratic_to(&mut self, control: Vec2, to: Vec2) -> &mut Self {
        self.segments.push(Segment::Quadratic { control, to });
        self
    }

    pub fn cubic_to(&mut self, control1: Vec2, control2: Vec2, to: Vec2) -> &mut Self {
        self.segments.push(Segment::Cubic {
            control1,
            control2,
            to,
        });
        self
    }

    /// Sample the outline into a polygon.
    ///
    /// Lines contribute their end point; curves contribute `divisions`
    /// samples. Repeated points and the closing duplicate of the start
    /// point are dropped.
    pub fn points(&self, divisions: u32) -> Vec<Vec2> {
        let divisions = divisions.max(1);
        let mut points = vec![self.start];
        let mut cursor = self.start;

        for segment in &self.segments {
            match *segment {
                Segment::Line(to) => push_unique(&mut points, to),
                Segment::Quadratic { control, to } => {
                    for d in 1..=divisions {
                        let t = d as f32 / divisions as f32;
                        push_unique(&mut points, quadratic_point(cursor, control, to, t));
                    }
                }
                Segment::Cubic {
                    control1,
                    control2,
                    to,
                } => {
                    for d in 1..=divisions {
                        let t = d as f32 / divisions as f32;
                        push_unique(&mut points, cubic_point(cursor, control1, control2, to, t));
                    }
                }
            }
            cursor = segment.end();
        }

        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        points
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.start += offset;
        for segment in &mut self.segments {
            match segment {
                Segment::Line(to) => *to += offset,
                Segment::Quadratic { control, to } => {
                    *control += offset;
                    *to += offset;
                }
                Segment::Cubic {
                    control1,
                    control2,
                    to,
                } => {
                    *control1 += offset;
                    *control2 += offset;
                    *to += offset;
                }
            }
        }
    }
}

fn push_unique(points: &mut Vec<Vec2>, p: Vec2) {
    if points.last() != Some(&p) {
        points.push(p);
    }
}

pub fn quadratic_point(p0: Vec2, control: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let k = 1.0 - t;
    p0 * (k * k) + control * (2.0 * k * t) + p1 * (t * t)
}

pub fn cubic_point(p0: Vec2, c1: Vec2, c2: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let k = 1.0 - t;
    p0 * (k * k * k) + c1 * (3.0 * k * k * t) + c2 * (3.0 * k * t * t) + p1 * (t * t * t)
}

/// Shoelace area; negative for clockwise polygons in a y-up frame
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f32 = (0..n)
        .map(|i| {
            let p = points[(i + n - 1) % n];
            let q = points[i];
            p.x * q.y - q.x * p.y
        })
        .sum();
    twice * 0.5
}

pub fn is_clockwise(points: &[Vec2]) -> bool {
    signed_area(points) < 0.0
}

/// Even-odd point-in-polygon test
pub fn contains_point(polygon: &[Vec2], point: Vec2) -> bool {
    let n = polygon.len();
    let mut inside = false;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + n - 1) % n];
        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square_cw() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        ]
    }

    #[test]
    fn test_polygon_points_drop_closing_duplicate() {
        let mut square = unit_square_cw();
        square.push(Vec2::ZERO);
        let points = Path2::polygon(&square).points(12);
        assert_eq!(points, unit_square_cw());
    }

    #[test]
    fn test_quadratic_sampling_count() {
        let mut path = Path2::new(Vec2::ZERO);
        path.quadratic_to(Vec2::new(1.0, 2.0), Vec2::new(2.0, 0.0));
        let points = path.points(8);
        // start + 8 samples
        assert_eq!(points.len(), 9);
        assert_eq!(points[8], Vec2::new(2.0, 0.0));
        assert!((points[4] - Vec2::new(1.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_cubic_endpoints() {
        let p0 = Vec2::new(0.0, 0.0);
        let p1 = Vec2::new(3.0, 0.0);
        assert_eq!(cubic_point(p0, Vec2::ONE, Vec2::new(2.0, 1.0), p1, 0.0), p0);
        assert_eq!(cubic_point(p0, Vec2::ONE, Vec2::new(2.0, 1.0), p1, 1.0), p1);
    }

    #[test]
    fn test_zero_divisions_treated_as_one() {
        let mut path = Path2::new(Vec2::ZERO);
        path.quadratic_to(Vec2::new(1.0, 1.0), Vec2::new(2.0, 0.0));
        assert_eq!(path.points(0).len(), 2);
    }

    #[test]
    fn test_signed_area_orientation() {
        let cw = unit_square_cw();
        assert_eq!(signed_area(&cw), -1.0);
        assert!(is_clockwise(&cw));

        let ccw: Vec<Vec2> = cw.into_iter().rev().collect();
        assert_eq!(signed_area(&ccw), 1.0);
        assert!(!is_clockwise(&ccw));
    }

    #[test]
    fn test_contains_point() {
        let square = unit_square_cw();
        assert!(contains_point(&square, Vec2::new(0.5, 0.5)));
        assert!(!contains_point(&square, Vec2::new(1.5, 0.5)));
        assert!(!contains_point(&square, Vec2::new(0.5, -0.1)));
    }

    #[test]
    fn test_translate_moves_every_point() {
        let mut path = Path2::new(Vec2::ZERO);
        path.line_to(Vec2::X).quadratic_to(Vec2::ONE, Vec2::Y);
        path.translate(Vec2::new(2.0, 3.0));
        assert_eq!(path.start, Vec2::new(2.0, 3.0));
        assert_eq!(path.segments[1].end(), Vec2::new(2.0, 4.0));
    }
}
