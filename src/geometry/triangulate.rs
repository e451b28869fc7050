use anyhow::{bail, Context, Result};
use glam::{DVec2, Vec2};

const EPSILON: f64 = 1e-12;

/// Ear-clipping triangulation of a polygon with holes.
///
/// Indices address the concatenation `contour ++ holes[0] ++ holes[1] ...`.
/// Triangles come out counter-clockwise regardless of input winding.
/// Holes are merged into the outer ring through bridge edges, rightmost
/// hole first.
pub fn triangulate(contour: &[Vec2], holes: &[Vec<Vec2>]) -> Result<Vec<[usize; 3]>> {
    if contour.len() < 3 {
        bail!("contour needs at least 3 points, got {}", contour.len());
    }

    let points: Vec<DVec2> = contour
        .iter()
        .chain(holes.iter().flatten())
        .map(|p| p.as_dvec2())
        .collect();

    let mut ring: Vec<usize> = (0..contour.len()).collect();
    if ring_area(&points, &ring) < 0.0 {
        ring.reverse();
    }

    let mut hole_rings = Vec::with_capacity(holes.len());
    let mut offset = contour.len();
    for hole in holes {
        let mut hole_ring: Vec<usize> = (offset..offset + hole.len()).collect();
        offset += hole.len();
        if hole_ring.len() < 3 {
            continue;
        }
        if ring_area(&points, &hole_ring) > 0.0 {
            hole_ring.reverse();
        }
        hole_rings.push(hole_ring);
    }

    hole_rings.sort_by(|a, b| max_x(&points, b).total_cmp(&max_x(&points, a)));
    for hole_ring in &hole_rings {
        bridge_hole(&points, &mut ring, hole_ring)?;
    }

    clip_ears(&points, ring)
}

fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}

fn ring_area(points: &[DVec2], ring: &[usize]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let p = points[ring[(i + n - 1) % n]];
            let q = points[ring[i]];
            p.x * q.y - q.x * p.y
        })
        .sum::<f64>()
        * 0.5
}

fn max_x(points: &[DVec2], ring: &[usize]) -> f64 {
    ring.iter()
        .map(|&i| points[i].x)
        .fold(f64::NEG_INFINITY, f64::max)
}

fn point_in_triangle(a: DVec2, b: DVec2, c: DVec2, p: DVec2) -> bool {
    let d1 = orient(a, b, p);
    let d2 = orient(b, c, p);
    let d3 = orient(c, a, p);
    let has_negative = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_positive = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_negative && has_positive)
}

/// Splice a clockwise hole into the counter-clockwise ring through a
/// mutually visible vertex pair.
fn bridge_hole(points: &[DVec2], ring: &mut Vec<usize>, hole: &[usize]) -> Result<()> {
    let (hole_start, &m_index) = hole
        .iter()
        .enumerate()
        .max_by(|a, b| points[*a.1].x.total_cmp(&points[*b.1].x))
        .context("empty hole")?;
    let m = points[m_index];

    // Nearest boundary crossing of the ray from M towards +x
    let n = ring.len();
    let mut nearest: Option<(f64, usize)> = None;
    for i in 0..n {
        let j = (i + 1) % n;
        let a = points[ring[i]];
        let b = points[ring[j]];
        if a.y == b.y || m.y < a.y.min(b.y) || m.y > a.y.max(b.y) {
            continue;
        }
        let x = a.x + (m.y - a.y) * (b.x - a.x) / (b.y - a.y);
        if x < m.x || nearest.is_some_and(|(best, _)| x >= best) {
            continue;
        }
        let candidate = if a.y == m.y {
            i
        } else if b.y == m.y {
            j
        } else if a.x > b.x {
            i
        } else {
            j
        };
        nearest = Some((x, candidate));
    }
    let (hit_x, mut bridge_pos) = nearest.context("hole is not enclosed by its contour")?;

    // A vertex inside triangle (M, hit, P) would block the bridge; the one
    // closest in angle to the ray is visible from M.
    let hit = DVec2::new(hit_x, m.y);
    let p = points[ring[bridge_pos]];
    if p != hit {
        let mut best_tan = f64::INFINITY;
        let mut best_distance = f64::INFINITY;
        for (pos, &idx) in ring.iter().enumerate() {
            let q = points[idx];
            let dx = q.x - m.x;
            if q == p || dx <= 0.0 || !point_in_triangle(m, hit, p, q) {
                continue;
            }
            let tan = (q.y - m.y).abs() / dx;
            let distance = q.distance_squared(m);
            if tan < best_tan || (tan == best_tan && distance < best_distance) {
                best_tan = tan;
                best_distance = distance;
                bridge_pos = pos;
            }
        }
    }

    let mut bridge = Vec::with_capacity(hole.len() + 2);
    bridge.extend_from_slice(&hole[hole_start..]);
    bridge.extend_from_slice(&hole[..hole_start]);
    bridge.push(m_index);
    bridge.push(ring[bridge_pos]);
    ring.splice(bridge_pos + 1..bridge_pos + 1, bridge);
    Ok(())
}

fn is_ear(points: &[DVec2], ring: &[usize], i: usize) -> bool {
    let n = ring.len();
    let prev = (i + n - 1) % n;
    let next = (i + 1) % n;
    let (a, b, c) = (points[ring[prev]], points[ring[i]], points[ring[next]]);

    if orient(a, b, c) <= EPSILON {
        return false;
    }

    ring.iter().enumerate().all(|(j, &idx)| {
        if j == prev || j == i || j == next {
            return true;
        }
        let p = points[idx];
        p == a || p == b || p == c || !point_in_triangle(a, b, c, p)
    })
}

fn clip_ears(points: &[DVec2], mut ring: Vec<usize>) -> Result<Vec<[usize; 3]>> {
    let mut triangles = Vec::with_capacity(ring.len().saturating_sub(2));

    while ring.len() > 3 {
        let n = ring.len();
        if let Some(i) = (0..n).find(|&i| is_ear(points, &ring, i)) {
            triangles.push([ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n]]);
            ring.remove(i);
            continue;
        }

        // Flat or repeated vertices stall clipping; drop one and retry
        let flat = (0..n).find(|&i| {
            let a = points[ring[(i + n - 1) % n]];
            let b = points[ring[i]];
            let c = points[ring[(i + 1) % n]];
            orient(a, b, c).abs() <= EPSILON
        });
        match flat {
            Some(i) => {
                ring.remove(i);
            }
            None => bail!("no ear found among {} remaining vertices", n),
        }
    }

    if let &[a, b, c] = ring.as_slice() {
        if orient(points[a], points[b], points[c]) > EPSILON {
            triangles.push([a, b, c]);
        }
    }
    Ok(triangles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area2(points: &[Vec2], t: [usize; 3]) -> f32 {
        let (a, b, c) = (points[t[0]], points[t[1]], points[t[2]]);
        (b - a).perp_dot(c - a)
    }

    fn total_area(points: &[Vec2], triangles: &[[usize; 3]]) -> f32 {
        triangles.iter().map(|&t| area2(points, t) * 0.5).sum()
    }

    fn square(min: f32, max: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(min, min),
            Vec2::new(max, min),
            Vec2::new(max, max),
            Vec2::new(min, max),
        ]
    }

    #[test]
    fn test_convex_polygon_yields_n_minus_two() {
        let hexagon: Vec<Vec2> = (0..6)
            .map(|i| {
                let a = i as f32 / 6.0 * std::f32::consts::TAU;
                Vec2::new(a.cos(), a.sin())
            })
            .collect();
        let triangles = triangulate(&hexagon, &[]).unwrap();
        assert_eq!(triangles.len(), 4);
    }

    #[test]
    fn test_triangles_are_counter_clockwise_for_clockwise_input() {
        let mut cw = square(0.0, 1.0);
        cw.reverse();
        let triangles = triangulate(&cw, &[]).unwrap();
        assert_eq!(triangles.len(), 2);
        for t in triangles {
            assert!(area2(&cw, t) > 0.0);
        }
    }

    #[test]
    fn test_concave_polygon_covers_its_area() {
        // L shape, area 3
        let l_shape = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        let triangles = triangulate(&l_shape, &[]).unwrap();
        assert_eq!(triangles.len(), 4);
        assert!((total_area(&l_shape, &triangles) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_square_with_hole() {
        let outer = square(0.0, 3.0);
        let hole = square(1.0, 2.0);
        let triangles = triangulate(&outer, &[hole.clone()]).unwrap();

        assert_eq!(triangles.len(), 8);

        let all: Vec<Vec2> = outer.iter().chain(hole.iter()).copied().collect();
        assert!((total_area(&all, &triangles) - 8.0).abs() < 1e-5);
        assert!(triangles.iter().flatten().all(|&i| i < all.len()));
    }

    #[test]
    fn test_two_holes() {
        let outer = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(5.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        let left = square(0.5, 1.5);
        let right: Vec<Vec2> = square(0.5, 1.5).iter().map(|p| *p + Vec2::new(3.0, 0.0)).collect();
        let triangles = triangulate(&outer, &[left.clone(), right.clone()]).unwrap();

        let all: Vec<Vec2> = outer.iter().chain(&left).chain(&right).copied().collect();
        assert!((total_area(&all, &triangles) - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_too_few_points_is_an_error() {
        assert!(triangulate(&[Vec2::ZERO, Vec2::X], &[]).is_err());
    }

    #[test]
    fn test_hole_outside_contour_is_an_error() {
        let outer = square(0.0, 1.0);
        let far = square(5.0, 6.0);
        assert!(triangulate(&outer, &[far]).is_err());
    }
}
