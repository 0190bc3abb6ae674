// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation utilities
//!
//! Wrapper around earcutr for 2D polygon triangulation. Every triangle
//! returned here is counter-clockwise in the polygon's 2D space, whatever the
//! input orientation.

use crate::{Error, Point2, Result};

/// Check if a polygon is convex (all cross products have same sign)
#[inline]
fn is_convex(points: &[Point2<f64>]) -> bool {
    if points.len() < 3 {
        return false;
    }

    let n = points.len();
    let mut sign = 0i8;

    for i in 0..n {
        let p0 = &points[i];
        let p1 = &points[(i + 1) % n];
        let p2 = &points[(i + 2) % n];

        let cross = (p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x);

        if cross.abs() > 1e-10 {
            let current_sign = if cross > 0.0 { 1i8 } else { -1i8 };
            if sign == 0 {
                sign = current_sign;
            } else if sign != current_sign {
                return false;
            }
        }
    }

    sign != 0
}

/// Simple fan triangulation for convex polygons
#[inline]
fn fan_triangulate(n: usize) -> Vec<usize> {
    let mut indices = Vec::with_capacity((n - 2) * 3);
    for i in 1..n - 1 {
        indices.push(0);
        indices.push(i);
        indices.push(i + 1);
    }
    indices
}

/// Swap the last two corners of every clockwise triangle
fn orient_counter_clockwise(points: &[Point2<f64>], indices: &mut [usize]) {
    for triangle in indices.chunks_exact_mut(3) {
        let a = &points[triangle[0]];
        let b = &points[triangle[1]];
        let c = &points[triangle[2]];
        let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
        if cross < 0.0 {
            triangle.swap(1, 2);
        }
    }
}

/// Ear-clip a flattened coordinate list `[x0, y0, x1, y1, ...]`
///
/// `hole_indices` holds the starting vertex of each hole ring. Returns
/// triangle vertex indices, three per triangle.
#[inline]
pub fn earcut_flat(coords: &[f64], hole_indices: &[usize]) -> Result<Vec<usize>> {
    earcutr::earcut(coords, hole_indices, 2).map_err(|e| Error::triangulation(format!("{:?}", e)))
}

/// Triangulate a simple polygon (no holes)
/// Returns counter-clockwise triangle indices into the input points
#[inline]
pub fn triangulate_polygon(points: &[Point2<f64>]) -> Result<Vec<usize>> {
    let n = points.len();

    if n < 3 {
        return Err(Error::triangulation(
            "Need at least 3 points to triangulate",
        ));
    }

    let mut indices = if n == 3 {
        vec![0, 1, 2]
    } else if n <= 8 && is_convex(points) {
        fan_triangulate(n)
    } else {
        let mut vertices = Vec::with_capacity(n * 2);
        for p in points {
            vertices.push(p.x);
            vertices.push(p.y);
        }
        earcut_flat(&vertices, &[])?
    };

    orient_counter_clockwise(points, &mut indices);
    Ok(indices)
}
