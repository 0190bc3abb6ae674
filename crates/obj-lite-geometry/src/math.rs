// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Small vector and matrix helpers on top of nalgebra
//!
//! Arithmetic, dot/cross products, transposes and products come straight
//! from nalgebra; these are the extra pieces the solvers need.

use crate::{Matrix3, Vector3};

/// Off-diagonal pairs `(row, column)` of a symmetric 3x3 matrix
pub(crate) const OFF_DIAGONAL: [(usize, usize); 3] = [(1, 2), (0, 2), (0, 1)];

/// Normalize a vector, mapping the exact zero vector to +Z
#[inline]
pub fn normalize_or_unit_z(v: Vector3<f64>) -> Vector3<f64> {
    if v == Vector3::zeros() {
        Vector3::z()
    } else {
        v.normalize()
    }
}

/// Frobenius norm over all nine entries
#[inline]
pub fn frobenius_norm(m: &Matrix3<f64>) -> f64 {
    m.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Frobenius norm of the off-diagonal part, assuming `m` is symmetric
#[inline]
pub fn off_diagonal_norm(m: &Matrix3<f64>) -> f64 {
    OFF_DIAGONAL
        .iter()
        .map(|&(row, col)| 2.0 * m[(row, col)] * m[(row, col)])
        .sum::<f64>()
        .sqrt()
}

/// Scale each column of `m` by the matching component of `scale`
#[inline]
pub fn scale_columns(m: &Matrix3<f64>, scale: &Vector3<f64>) -> Matrix3<f64> {
    let mut out = *m;
    for (i, s) in scale.iter().enumerate() {
        out.column_mut(i).scale_mut(*s);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_zero_is_unit_z() {
        assert_eq!(normalize_or_unit_z(Vector3::zeros()), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_normalize_nonzero() {
        let n = normalize_or_unit_z(Vector3::new(3.0, 0.0, 4.0));
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.x, 0.6, epsilon = 1e-12);
        assert_relative_eq!(n.z, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_norms() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 2.0, 4.0, 5.0, 3.0, 5.0, 6.0);
        assert_relative_eq!(frobenius_norm(&m), 129.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(off_diagonal_norm(&m), 76.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(off_diagonal_norm(&Matrix3::identity()), 0.0);
    }

    #[test]
    fn test_scale_columns() {
        let scaled = scale_columns(&Matrix3::identity(), &Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(scaled, Matrix3::from_diagonal(&Vector3::new(2.0, 3.0, 4.0)));
    }
}
