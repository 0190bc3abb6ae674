// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flattening of roughly planar 3D polygons for triangulation

use crate::obb::OrientedBoundingBox;
use crate::triangulation::triangulate_polygon;
use crate::winding::{orient_triangle, winding_order_2d, WindingOrder};
use crate::{Error, Point2, Point3, Result, Vector3};

/// Projection onto the plane spanned by a point set's two widest principal
/// axes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneProjection {
    pub center: Point3<f64>,
    pub axis1: Vector3<f64>,
    pub axis2: Vector3<f64>,
}

impl PlaneProjection {
    /// Build the projection for `points`, or `None` when they are collinear
    ///
    /// The box axis with the smallest extent is the flattest direction and is
    /// dropped; the other two are kept in box order.
    pub fn from_points(points: &[Point3<f64>]) -> Option<Self> {
        let obb = OrientedBoundingBox::from_points(points);
        let magnitudes = obb.half_extents();

        if magnitudes.iter().filter(|m| **m == 0.0).count() >= 2 {
            return None;
        }

        let dropped = (1..3).fold(0, |min, i| {
            if magnitudes[i] < magnitudes[min] {
                i
            } else {
                min
            }
        });
        let mut kept = (0..3).filter(|&i| i != dropped);
        let first = kept.next()?;
        let second = kept.next()?;

        Some(Self {
            center: obb.center,
            axis1: obb.axis(first).normalize(),
            axis2: obb.axis(second).normalize(),
        })
    }

    /// Coordinates of `p` in the projection plane
    #[inline]
    pub fn project(&self, p: &Point3<f64>) -> Point2<f64> {
        let v = p - self.center;
        Point2::new(self.axis1.dot(&v), self.axis2.dot(&v))
    }

    pub fn project_all(&self, points: &[Point3<f64>]) -> Vec<Point2<f64>> {
        points.iter().map(|p| self.project(p)).collect()
    }
}

/// Triangles of one polygonal face
#[derive(Clone, Debug, PartialEq)]
pub struct FaceTriangulation {
    /// Three indices per triangle into the face's corner list, counter-clockwise
    /// in the projection plane
    pub indices: Vec<usize>,
    /// Winding of the face itself in the projection plane
    pub winding: WindingOrder,
}

impl FaceTriangulation {
    /// Triangles oriented like the source polygon
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        let keep = self.winding == WindingOrder::CounterClockwise;
        self.indices
            .chunks_exact(3)
            .map(move |t| orient_triangle([t[0], t[1], t[2]], keep))
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Triangulate a polygonal face given its corner positions
///
/// Succeeds only with exactly `n - 2` triangles. Non-finite corners, and
/// polygons the ear clipper cannot fully cover, are rejected.
pub fn triangulate_face(points: &[Point3<f64>]) -> Result<FaceTriangulation> {
    if !points.iter().all(|p| p.coords.iter().all(|c| c.is_finite())) {
        return Err(Error::geometry("non-finite corner coordinates"));
    }

    let projection = PlaneProjection::from_points(points).ok_or(Error::DegeneratePolygon)?;
    let points_2d = projection.project_all(points);
    if !points_2d.iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
        return Err(Error::geometry("projection produced non-finite coordinates"));
    }

    let indices = triangulate_polygon(&points_2d)?;
    let expected = points.len().saturating_sub(2);
    if indices.len() != expected * 3 {
        return Err(Error::triangulation(format!(
            "expected {} triangles, got {}",
            expected,
            indices.len() / 3
        )));
    }

    Ok(FaceTriangulation {
        indices,
        winding: winding_order_2d(&points_2d),
    })
}
