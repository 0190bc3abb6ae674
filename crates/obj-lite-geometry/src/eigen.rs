// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Symmetric 3x3 eigen-decomposition using the classical Jacobi method
//!
//! Follows Golub & Van Loan, *Matrix Computations* (3rd ed.), sections 8.4.2
//! (2x2 symmetric Schur decomposition) and 8.4.3 (classical Jacobi). The
//! iteration count is hard-capped, so the result is an approximation on
//! badly conditioned input but the routine always returns.

use crate::math::{frobenius_norm, off_diagonal_norm, OFF_DIAGONAL};
use crate::Matrix3;

/// Convergence threshold relative to the input's Frobenius norm
const CONVERGENCE_TOLERANCE: f64 = 1e-20;

/// Off-diagonal magnitude below which no rotation is applied
const ROTATION_TOLERANCE: f64 = 1e-15;

/// Upper bound on sweeps; one sweep is one rotation per off-diagonal pair
const MAX_SWEEPS: usize = 10;

/// Result of [`eigen_decomposition`]
///
/// `unitary` holds the eigenvectors as columns, `diagonal` the eigenvalues on
/// its diagonal, with `unitaryᵀ · M · unitary ≈ diagonal`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EigenDecomposition {
    pub unitary: Matrix3<f64>,
    pub diagonal: Matrix3<f64>,
}

impl EigenDecomposition {
    /// Eigenvalue paired with column `i` of `unitary`
    #[inline]
    pub fn eigenvalue(&self, i: usize) -> f64 {
        self.diagonal[(i, i)]
    }
}

/// Jacobi rotation that zeroes the largest off-diagonal entry of `m`
fn schur_rotation(m: &Matrix3<f64>) -> Matrix3<f64> {
    let mut max_off_diagonal = 0.0;
    let mut pivot = 1;
    for (i, &(row, col)) in OFF_DIAGONAL.iter().enumerate() {
        let magnitude = m[(row, col)].abs();
        if magnitude > max_off_diagonal {
            pivot = i;
            max_off_diagonal = magnitude;
        }
    }

    let (p, q) = OFF_DIAGONAL[pivot];
    let mut c = 1.0;
    let mut s = 0.0;

    let pq = m[(p, q)];
    if pq.abs() > ROTATION_TOLERANCE {
        let tau = (m[(q, q)] - m[(p, p)]) / 2.0 / pq;
        let t = if tau < 0.0 {
            -1.0 / (-tau + (1.0 + tau * tau).sqrt())
        } else {
            1.0 / (tau + (1.0 + tau * tau).sqrt())
        };
        c = 1.0 / (1.0 + t * t).sqrt();
        s = t * c;
    }

    let mut rotation = Matrix3::identity();
    rotation[(p, p)] = c;
    rotation[(q, q)] = c;
    rotation[(p, q)] = s;
    rotation[(q, p)] = -s;
    rotation
}

/// Diagonalize a symmetric matrix
///
/// Only the symmetric part of `m` is meaningful; the caller guarantees
/// symmetry.
pub fn eigen_decomposition(m: &Matrix3<f64>) -> EigenDecomposition {
    let mut unitary = Matrix3::identity();
    let mut diagonal = *m;

    let epsilon = CONVERGENCE_TOLERANCE * frobenius_norm(m);

    let mut rotations = 0;
    let mut sweep = 0;
    while sweep < MAX_SWEEPS && off_diagonal_norm(&diagonal) > epsilon {
        let rotation = schur_rotation(&diagonal);
        diagonal = rotation.transpose() * diagonal * rotation;
        unitary *= rotation;

        rotations += 1;
        if rotations == OFF_DIAGONAL.len() {
            sweep += 1;
            rotations = 0;
        }
    }

    EigenDecomposition { unitary, diagonal }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sorted_eigenvalues(result: &EigenDecomposition) -> Vec<f64> {
        let mut values: Vec<f64> = (0..3).map(|i| result.eigenvalue(i)).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values
    }

    #[test]
    fn test_diagonal_matrix_is_untouched() {
        let m = Matrix3::new(3.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0);
        let result = eigen_decomposition(&m);
        assert_eq!(result.unitary, Matrix3::identity());
        assert_eq!(result.diagonal, m);
    }

    #[test]
    fn test_known_eigenvalues() {
        let m = Matrix3::new(2.0, 1.0, 0.0, 1.0, 2.0, 0.0, 0.0, 0.0, 3.0);
        let result = eigen_decomposition(&m);
        let values = sorted_eigenvalues(&result);
        assert_relative_eq!(values[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(values[1], 3.0, epsilon = 1e-9);
        assert_relative_eq!(values[2], 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_reconstruction_and_orthonormality() {
        let m = Matrix3::new(4.0, -2.0, 1.5, -2.0, 3.0, 0.5, 1.5, 0.5, 1.0);
        let result = eigen_decomposition(&m);
        let u = result.unitary;

        let identity = u.transpose() * u;
        for row in 0..3 {
            for col in 0..3 {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_relative_eq!(identity[(row, col)], expected, epsilon = 1e-9);
            }
        }

        let diagonalized = u.transpose() * m * u;
        for row in 0..3 {
            for col in 0..3 {
                assert_relative_eq!(
                    diagonalized[(row, col)],
                    result.diagonal[(row, col)],
                    epsilon = 1e-9
                );
                if row != col {
                    assert!(result.diagonal[(row, col)].abs() < 1e-9);
                }
            }
        }

        // Trace is preserved by similarity transforms
        assert_relative_eq!(result.diagonal.trace(), m.trace(), epsilon = 1e-9);
    }

    #[test]
    fn test_zero_matrix() {
        let result = eigen_decomposition(&Matrix3::zeros());
        assert_eq!(result.unitary, Matrix3::identity());
        assert_eq!(result.diagonal, Matrix3::zeros());
    }

    #[test]
    fn test_terminates_on_non_finite_input() {
        let m = Matrix3::new(f64::NAN, 1.0, 0.0, 1.0, f64::INFINITY, 2.0, 0.0, 2.0, 1.0);
        // Must return rather than spin; values are meaningless here
        let _ = eigen_decomposition(&m);
    }
}
