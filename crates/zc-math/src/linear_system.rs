//! Dense linear-system solving.
//!
//! The cubic-spline model produces one N×N system per curve fit, with N the
//! number of curve knots. The systems are small and dense, so classic
//! Gaussian elimination with partial pivoting is used directly.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};

/// Pivots smaller than this are treated as zero during elimination.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Solves `A·x = b` by Gaussian elimination with partial pivoting.
///
/// Both inputs are consumed and overwritten in place during elimination.
/// For each pivot column the row with the largest absolute coefficient (at
/// or below the diagonal) is swapped into pivot position, the column is
/// eliminated from all rows below, the same row operations are applied to
/// the constants vector, and the solution is recovered by back-substitution.
///
/// # Errors
///
/// Returns [`MathError::DimensionMismatch`] when the matrix is not square or
/// does not match the vector length, and [`MathError::SingularSystem`] when
/// a pivot falls below tolerance, which would otherwise surface as `NaN` in
/// the solution.
///
/// # Example
///
/// ```rust
/// use nalgebra::{DMatrix, DVector};
/// use zc_math::solve_gaussian;
///
/// let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
/// let b = DVector::from_vec(vec![5.0, 5.0]);
///
/// let x = solve_gaussian(a, b).unwrap();
/// assert!((x[0] - 2.0).abs() < 1e-10);
/// assert!((x[1] - 1.0).abs() < 1e-10);
/// ```
pub fn solve_gaussian(mut a: DMatrix<f64>, mut b: DVector<f64>) -> MathResult<DVector<f64>> {
    let n = a.nrows();
    if a.ncols() != n || b.len() != n {
        return Err(MathError::dimension_mismatch(a.nrows(), a.ncols(), b.len()));
    }
    if n == 0 {
        return Err(MathError::invalid_input("empty system"));
    }

    // Forward elimination with partial pivoting.
    for pivot_row in 0..n {
        let mut largest = a[(pivot_row, pivot_row)].abs();
        let mut largest_row = pivot_row;
        for row in pivot_row + 1..n {
            if a[(row, pivot_row)].abs() > largest {
                largest = a[(row, pivot_row)].abs();
                largest_row = row;
            }
        }

        if largest < PIVOT_TOLERANCE {
            return Err(MathError::singular_system(largest, pivot_row));
        }

        if largest_row != pivot_row {
            a.swap_rows(pivot_row, largest_row);
            b.swap_rows(pivot_row, largest_row);
        }

        for row in pivot_row + 1..n {
            let factor = a[(row, pivot_row)] / a[(pivot_row, pivot_row)];
            for col in pivot_row..n {
                a[(row, col)] -= factor * a[(pivot_row, col)];
            }
            b[row] -= factor * b[pivot_row];
        }
    }

    // Back-substitution.
    let mut x = DVector::zeros(n);
    for row in (0..n).rev() {
        let mut sum = b[row];
        for col in row + 1..n {
            sum -= a[(row, col)] * x[col];
        }
        x[row] = sum / a[(row, row)];
    }

    Ok(x)
}
