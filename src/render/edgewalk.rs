//! Integer line walking and scanline filling.
//!
//! [`EdgeWalk`] is a Bresenham traversal between two fragments that carries
//! the interpolated attributes along; [`fill_spans`] closes the interior of
//! a convex boundary row by row. Splitting the walk out as an iterator
//! keeps the stepping logic testable without a framebuffer.

use std::collections::HashMap;

use crate::math::Vec3;
use crate::render::Fragment;

/// Per-step attribute increments for one edge.
#[derive(Clone, Copy, Debug, Default)]
struct Delta {
    z: f32,
    inv_w: f32,
    normal: Vec3,
    texel: Vec3,
}

/// Bresenham walk from one fragment to another, inclusive of both
/// endpoints.
///
/// Carried attributes (depth, 1/w, normal, texel) advance by a fixed
/// increment of `(end - start) / steps` where `steps` is the span along the
/// dominant axis, so the values at the final pixel land exactly on the end
/// fragment's attributes up to rounding. A walk whose endpoints share a
/// pixel yields that pixel exactly once.
pub struct EdgeWalk {
    current: Fragment,
    end_x: i32,
    end_y: i32,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    delta: Delta,
    done: bool,
}

impl EdgeWalk {
    pub fn new(start: Fragment, end: Fragment) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = (end.y - start.y).abs();
        let steps = dx.max(dy);

        let delta = if steps > 0 {
            let n = steps as f32;
            Delta {
                z: (end.z - start.z) / n,
                inv_w: (end.inv_w - start.inv_w) / n,
                normal: (end.normal - start.normal) / n,
                texel: (end.texel - start.texel) / n,
            }
        } else {
            Delta::default()
        };

        Self {
            current: start,
            end_x: end.x,
            end_y: end.y,
            dx,
            dy,
            sx: if start.x < end.x { 1 } else { -1 },
            sy: if start.y < end.y { 1 } else { -1 },
            err: dx - dy,
            delta,
            done: false,
        }
    }
}

impl Iterator for EdgeWalk {
    type Item = Fragment;

    fn next(&mut self) -> Option<Fragment> {
        if self.done {
            return None;
        }
        let out = self.current;
        if self.current.x == self.end_x && self.current.y == self.end_y {
            self.done = true;
            return Some(out);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.current.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.current.y += self.sy;
        }

        self.current.z += self.delta.z;
        self.current.inv_w += self.delta.inv_w;
        self.current.normal = self.current.normal + self.delta.normal;
        self.current.texel = self.current.texel + self.delta.texel;

        Some(out)
    }
}

/// Walk the boundary of a triangle: the three edges in corner order, each
/// inclusive of both endpoints (shared corners appear once per adjacent
/// edge).
pub fn triangle_boundary(corners: [Fragment; 3]) -> impl Iterator<Item = Fragment> {
    EdgeWalk::new(corners[0], corners[1])
        .chain(EdgeWalk::new(corners[1], corners[2]))
        .chain(EdgeWalk::new(corners[2], corners[0]))
}

/// Fill the interior of a convex boundary.
///
/// Boundary fragments are grouped by row; for each row the fragments with
/// the smallest and largest x bound a span, and pixels strictly between
/// them are emitted with linearly interpolated attributes. A row covered
/// by a horizontal edge re-emits that edge's intermediate pixels with the
/// same attributes, which the depth test absorbs. Correct only for convex
/// outlines, which fan triangulation guarantees.
pub fn fill_spans(boundary: &[Fragment]) -> Vec<Fragment> {
    let mut rows: HashMap<i32, (Fragment, Fragment)> = HashMap::new();
    for &frag in boundary {
        rows.entry(frag.y)
            .and_modify(|(min, max)| {
                if frag.x < min.x {
                    *min = frag;
                }
                if frag.x > max.x {
                    *max = frag;
                }
            })
            .or_insert((frag, frag));
    }

    let mut interior = Vec::new();
    for (&y, &(min, max)) in &rows {
        let width = max.x - min.x;
        if width < 2 {
            continue;
        }
        let span = width as f32;
        for x in (min.x + 1)..max.x {
            let t = (x - min.x) as f32 / span;
            interior.push(Fragment {
                x,
                y,
                z: min.z + (max.z - min.z) * t,
                inv_w: min.inv_w + (max.inv_w - min.inv_w) * t,
                normal: min.normal.lerp(max.normal, t),
                texel: min.texel.lerp(max.texel, t),
            });
        }
    }
    interior
}
