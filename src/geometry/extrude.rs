use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};

use super::mesh::MeshData;
use super::shape::Shape;
use super::triangulate::triangulate;

/// Extrusion parameters; bevels grow the outline outwards and add rounded
/// layers in front of and behind the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeOptions {
    pub depth: f32,
    pub steps: u32,
    pub curve_segments: u32,
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_offset: f32,
    pub bevel_segments: u32,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            depth: 1.0,
            steps: 1,
            curve_segments: 12,
            bevel_enabled: true,
            bevel_thickness: 0.2,
            bevel_size: 0.1,
            bevel_offset: 0.0,
            bevel_segments: 3,
        }
    }
}

impl ExtrudeOptions {
    /// Options with bevel parameters zeroed when the bevel is disabled
    fn effective(&self) -> Self {
        if self.bevel_enabled {
            *self
        } else {
            Self {
                bevel_thickness: 0.0,
                bevel_size: 0.0,
                bevel_offset: 0.0,
                bevel_segments: 0,
                ..*self
            }
        }
    }

    /// Number of vertex rings stacked along z
    pub fn layer_count(&self) -> usize {
        let options = self.effective();
        options.steps.max(1) as usize + 2 * options.bevel_segments as usize + 1
    }
}

/// Extrude every shape along +z into one triangle mesh
pub fn extrude(shapes: &[Shape], options: &ExtrudeOptions) -> MeshData {
    let options = options.effective();
    let mut mesh = MeshData::new();
    for shape in shapes {
        extrude_shape(shape, &options, &mut mesh);
    }
    mesh
}

fn extrude_shape(shape: &Shape, options: &ExtrudeOptions, mesh: &mut MeshData) {
    let points = shape.extract_points(options.curve_segments);
    if points.contour.len() < 3 {
        log::debug!("Skipping degenerate shape with {} points", points.contour.len());
        return;
    }

    let faces = triangulate(&points.contour, &points.holes).unwrap_or_else(|e| {
        log::warn!("Dropping caps of an untriangulable shape: {:#}", e);
        Vec::new()
    });

    let rings: Vec<&[Vec2]> = std::iter::once(points.contour.as_slice())
        .chain(points.holes.iter().map(Vec::as_slice))
        .collect();
    let outline: Vec<Vec2> = rings.iter().flat_map(|r| r.iter().copied()).collect();
    let movements: Vec<Vec2> = rings.iter().flat_map(|r| ring_movements(r)).collect();
    let vlen = outline.len();

    let steps = options.steps.max(1);
    let bevel_segments = options.bevel_segments;
    let layer = |bevel: f32, z: f32| -> Vec<Vec3> {
        outline
            .iter()
            .zip(&movements)
            .map(|(p, m)| (*p + *m * bevel).extend(z))
            .collect()
    };

    let mut layers: Vec<Vec3> = Vec::with_capacity(vlen * options.layer_count());

    for b in 0..bevel_segments {
        let t = b as f32 / bevel_segments as f32;
        let z = options.bevel_thickness * (t * FRAC_PI_2).cos();
        let bs = options.bevel_size * (t * FRAC_PI_2).sin() + options.bevel_offset;
        layers.extend(layer(bs, -z));
    }

    let body = options.bevel_size + options.bevel_offset;
    for s in 0..=steps {
        layers.extend(layer(body, options.depth / steps as f32 * s as f32));
    }

    for b in (0..bevel_segments).rev() {
        let t = b as f32 / bevel_segments as f32;
        let z = options.bevel_thickness * (t * FRAC_PI_2).cos();
        let bs = options.bevel_size * (t * FRAC_PI_2).sin() + options.bevel_offset;
        layers.extend(layer(bs, options.depth + z));
    }

    let slices = steps as usize + 2 * bevel_segments as usize;

    // Back cap faces -z, front cap faces +z
    let front = vlen * slices;
    for face in &faces {
        mesh.push_triangle(layers[face[2]], layers[face[1]], layers[face[0]]);
        mesh.push_triangle(
            layers[front + face[0]],
            layers[front + face[1]],
            layers[front + face[2]],
        );
    }

    let mut ring_offset = 0;
    for ring in &rings {
        let len = ring.len();
        for j in (0..len).rev() {
            let k = if j == 0 { len - 1 } else { j - 1 };
            for s in 0..slices {
                let a = layers[ring_offset + j + vlen * s];
                let b = layers[ring_offset + k + vlen * s];
                let c = layers[ring_offset + k + vlen * (s + 1)];
                let d = layers[ring_offset + j + vlen * (s + 1)];
                mesh.push_triangle(a, b, d);
                mesh.push_triangle(b, c, d);
            }
        }
        ring_offset += len;
    }
}

/// Unit-edge offset direction for every vertex of a closed ring.
///
/// Each vector shifts the vertex so both adjacent edges move one unit to
/// their left; for a clockwise outline that is outwards. Sharp corners are
/// capped at a length of √2.
fn ring_movements(ring: &[Vec2]) -> Vec<Vec2> {
    let n = ring.len();
    (0..n)
        .map(|i| bevel_vector(ring[i], ring[(i + n - 1) % n], ring[(i + 1) % n]))
        .collect()
}

fn bevel_vector(point: Vec2, prev: Vec2, next: Vec2) -> Vec2 {
    let v_prev = point - prev;
    let v_next = next - point;
    let v_prev_len_sq = v_prev.length_squared();
    let collinear = v_prev.perp_dot(v_next);

    let (translation, shrink_by) = if collinear.abs() > f32::EPSILON {
        let v_prev_len = v_prev_len_sq.sqrt();
        let v_next_len = v_next.length();

        let prev_shift = prev + v_prev.perp() / v_prev_len;
        let next_shift = next + v_next.perp() / v_next_len;

        let sf = (next_shift - prev_shift).perp_dot(v_next) / collinear;
        let translation = prev_shift + v_prev * sf - point;

        let len_sq = translation.length_squared();
        if len_sq <= 2.0 {
            return translation;
        }
        (translation, (len_sq / 2.0).sqrt())
    } else {
        let same_direction = if v_prev.x > f32::EPSILON {
            v_next.x > f32::EPSILON
        } else if v_prev.x < -f32::EPSILON {
            v_next.x < -f32::EPSILON
        } else {
            v_prev.y.signum() == v_next.y.signum()
        };

        if same_direction {
            (v_prev.perp(), v_prev_len_sq.sqrt())
        } else {
            (v_prev, (v_prev_len_sq / 2.0).sqrt())
        }
    };

    translation / shrink_by
}
