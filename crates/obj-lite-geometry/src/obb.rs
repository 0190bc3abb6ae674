// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Oriented bounding boxes fitted to a point set's principal axes

use crate::eigen::eigen_decomposition;
use crate::math::scale_columns;
use crate::{Matrix3, Point3, Vector3};

/// Box aligned to the principal directions of a point set
///
/// `half_axes` holds three mutually orthogonal axis vectors as columns, each
/// scaled to the box's half-extent along it. Equivalently, the transform that
/// maps the cube `[-1, 1]³` onto the box after translating by `center`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedBoundingBox {
    pub center: Point3<f64>,
    pub half_axes: Matrix3<f64>,
}

impl Default for OrientedBoundingBox {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            half_axes: Matrix3::zeros(),
        }
    }
}

impl OrientedBoundingBox {
    /// Fit a box to `points` using their covariance eigenvectors
    ///
    /// An empty slice yields a degenerate box at the origin.
    pub fn from_points(points: &[Point3<f64>]) -> Self {
        if points.is_empty() {
            return Self::default();
        }

        let inv_len = 1.0 / points.len() as f64;
        let mean = points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords)
            * inv_len;

        let (mut exx, mut exy, mut exz, mut eyy, mut eyz, mut ezz) =
            (0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        for p in points {
            let d = p.coords - mean;
            exx += d.x * d.x;
            exy += d.x * d.y;
            exz += d.x * d.z;
            eyy += d.y * d.y;
            eyz += d.y * d.z;
            ezz += d.z * d.z;
        }

        #[rustfmt::skip]
        let covariance = Matrix3::new(
            exx, exy, exz,
            exy, eyy, eyz,
            exz, eyz, ezz,
        ) * inv_len;

        let rotation = eigen_decomposition(&covariance).unitary;

        let mut upper = Vector3::repeat(f64::MIN);
        let mut lower = Vector3::repeat(f64::MAX);
        for p in points {
            for axis in 0..3 {
                let projected = rotation.column(axis).dot(&p.coords);
                upper[axis] = upper[axis].max(projected);
                lower[axis] = lower[axis].min(projected);
            }
        }

        let mut center = Vector3::zeros();
        for axis in 0..3 {
            center += rotation.column(axis) * (0.5 * (lower[axis] + upper[axis]));
        }

        let half_extents = (upper - lower) * 0.5;

        Self {
            center: Point3::from(center),
            half_axes: scale_columns(&rotation, &half_extents),
        }
    }

    /// Scaled axis `i` (0, 1 or 2)
    #[inline]
    pub fn axis(&self, i: usize) -> Vector3<f64> {
        self.half_axes.column(i).into_owned()
    }

    /// Half-extent along each axis
    #[inline]
    pub fn half_extents(&self) -> Vector3<f64> {
        Vector3::new(
            self.half_axes.column(0).norm(),
            self.half_axes.column(1).norm(),
            self.half_axes.column(2).norm(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sorted(v: Vector3<f64>) -> [f64; 3] {
        let mut values = [v.x, v.y, v.z];
        values.sort_by(|a, b| a.total_cmp(b));
        values
    }

    #[test]
    fn test_empty_points() {
        let obb = OrientedBoundingBox::from_points(&[]);
        assert_eq!(obb.center, Point3::origin());
        assert_eq!(obb.half_axes, Matrix3::zeros());
    }

    #[test]
    fn test_axis_aligned_box() {
        let mut points = Vec::new();
        for &x in &[1.0, 5.0] {
            for &y in &[-1.0, 1.0] {
                for &z in &[2.0, 2.5] {
                    points.push(Point3::new(x, y, z));
                }
            }
        }

        let obb = OrientedBoundingBox::from_points(&points);
        assert_relative_eq!(obb.center.x, 3.0, epsilon = 1e-9);
        assert_relative_eq!(obb.center.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(obb.center.z, 2.25, epsilon = 1e-9);

        let extents = sorted(obb.half_extents());
        assert_relative_eq!(extents[0], 0.25, epsilon = 1e-9);
        assert_relative_eq!(extents[1], 1.0, epsilon = 1e-9);
        assert_relative_eq!(extents[2], 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_axes_are_orthogonal() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 3.0, 1.0),
            Point3::new(-1.0, 2.0, 0.5),
        ];
        let obb = OrientedBoundingBox::from_points(&points);
        for (a, b) in [(0, 1), (0, 2), (1, 2)] {
            assert!(obb.axis(a).dot(&obb.axis(b)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_planar_points_have_flat_axis() {
        let points = vec![
            Point3::new(0.0, 0.0, 4.0),
            Point3::new(2.0, 0.0, 4.0),
            Point3::new(2.0, 1.0, 4.0),
            Point3::new(0.0, 1.0, 4.0),
        ];
        let obb = OrientedBoundingBox::from_points(&points);
        let extents = sorted(obb.half_extents());
        assert!(extents[0].abs() < 1e-9);
        assert_relative_eq!(extents[1], 0.5, epsilon = 1e-9);
        assert_relative_eq!(extents[2], 1.0, epsilon = 1e-9);
        assert_relative_eq!(obb.center.z, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_single_point() {
        let obb = OrientedBoundingBox::from_points(&[Point3::new(1.0, 2.0, 3.0)]);
        assert_eq!(obb.half_extents(), Vector3::zeros());
        assert_relative_eq!(obb.center.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(obb.center.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(obb.center.z, 3.0, epsilon = 1e-12);
    }
}
