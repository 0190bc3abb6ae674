// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle and polygon winding order

use crate::{Point2, Point3, Vector3};

/// Traversal direction of a polygon in its own plane
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindingOrder {
    Clockwise,
    CounterClockwise,
}

/// Signed area of a 2D polygon (shoelace formula), positive when
/// counter-clockwise
pub fn signed_area_2d(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    let mut area = 0.0;
    for i in 0..n {
        let v0 = &points[(i + n - 1) % n];
        let v1 = &points[i];
        area += v0.x * v1.y - v1.x * v0.y;
    }
    area * 0.5
}

/// Winding of a 2D polygon; zero-area polygons count as clockwise
pub fn winding_order_2d(points: &[Point2<f64>]) -> WindingOrder {
    if signed_area_2d(points) > 0.0 {
        WindingOrder::CounterClockwise
    } else {
        WindingOrder::Clockwise
    }
}

/// Check whether `(a, b, c)` agrees with a face normal
///
/// Without a normal there is nothing to check against and the order is
/// accepted as is.
#[inline]
pub fn is_winding_correct(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    normal: Option<&Vector3<f64>>,
) -> bool {
    let Some(normal) = normal else {
        return true;
    };
    let cross = (b - a).cross(&(c - a));
    normal.dot(&cross) >= 0.0
}

/// Emit `(i0, i1, i2)` when `correct`, `(i0, i2, i1)` otherwise
#[inline]
pub fn orient_triangle<T: Copy>(triangle: [T; 3], correct: bool) -> [T; 3] {
    if correct {
        triangle
    } else {
        [triangle[0], triangle[2], triangle[1]]
    }
}

/// Corner order of a triangle that agrees with `normal`
pub fn sanitize_winding(positions: &[Point3<f64>; 3], normal: Option<&Vector3<f64>>) -> [usize; 3] {
    let correct = is_winding_correct(&positions[0], &positions[1], &positions[2], normal);
    orient_triangle([0, 1, 2], correct)
}
