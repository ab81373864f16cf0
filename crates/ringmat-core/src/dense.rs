//! Dense reference kernels over semirings
//!
//! These are the dense collaborators of the sparse containers: zero and identity
//! construction, and plain matrix/vector products evaluated with [`Semiring`] arithmetic.
//!
//! Products accumulate in `i, k, j` order and skip zero left entries, which matches the
//! visitation order of the sparse kernels. For floating point operands this makes a sparse
//! product and the dense product of the same operands agree exactly.
//!
//! # Examples
//!
//! ```
//! use ringmat_core::dense;
//! use scirs2_core::ndarray_ext::array;
//!
//! let a = array![[1.0, 2.0], [0.0, 1.0]];
//! let b = array![[1.0, 0.0], [3.0, 1.0]];
//! let c = dense::matmul(&a.view(), &b.view()).unwrap();
//! assert_eq!(c, array![[7.0, 2.0], [3.0, 1.0]]);
//! ```

use scirs2_core::ndarray_ext::{Array1, Array2, ArrayView1, ArrayView2};

use crate::algebra::Semiring;
use crate::error::{CoreResult, ShapeError};

/// Zero-filled `nrows × ncols` matrix
pub fn zeros<T: Semiring>(nrows: usize, ncols: usize) -> Array2<T> {
    Array2::from_elem((nrows, ncols), T::zero())
}

/// `size × size` identity matrix
pub fn identity<T: Semiring>(size: usize) -> Array2<T> {
    let mut eye = zeros(size, size);
    for i in 0..size {
        eye[[i, i]] = T::one();
    }
    eye
}

/// Dense matrix product `a · b`
///
/// # Errors
///
/// `ShapeError::MatMul` if `a.ncols() != b.nrows()`.
///
/// # Complexity
///
/// O(m × k × n) in the worst case; zero entries of `a` are skipped.
pub fn matmul<T: Semiring>(a: &ArrayView2<T>, b: &ArrayView2<T>) -> CoreResult<Array2<T>> {
    let (m, k) = a.dim();
    let (k2, n) = b.dim();
    if k != k2 {
        return Err(ShapeError::MatMul {
            m1: m,
            n1: k,
            m2: k2,
            n2: n,
        }
        .into());
    }

    let mut c = zeros::<T>(m, n);
    for i in 0..m {
        for p in 0..k {
            let a_ip = &a[[i, p]];
            if a_ip.is_zero() {
                continue;
            }
            for j in 0..n {
                let prod = a_ip.mul(&b[[p, j]]);
                c[[i, j]] = c[[i, j]].add(&prod);
            }
        }
    }
    Ok(c)
}

/// Dense matrix-vector product `a · x`
///
/// # Errors
///
/// `ShapeError::MatVec` if `a.ncols() != x.len()`.
pub fn matvec<T: Semiring>(a: &ArrayView2<T>, x: &ArrayView1<T>) -> CoreResult<Array1<T>> {
    let (m, n) = a.dim();
    if n != x.len() {
        return Err(ShapeError::MatVec { m, n, v: x.len() }.into());
    }

    let mut y = Array1::from_elem(m, T::zero());
    for i in 0..m {
        for j in 0..n {
            let a_ij = &a[[i, j]];
            if a_ij.is_zero() {
                continue;
            }
            y[i] = y[i].add(&a_ij.mul(&x[j]));
        }
    }
    Ok(y)
}

/// Entries of `a` that are not zero, in row-major order
pub fn nonzeros<T: Semiring>(a: &ArrayView2<T>) -> Vec<(usize, usize, T)> {
    a.indexed_iter()
        .filter(|(_, v)| !v.is_zero())
        .map(|((i, j), v)| (i, j, v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_zeros_and_identity() {
        let z: Array2<i32> = zeros(2, 3);
        assert_eq!(z, array![[0, 0, 0], [0, 0, 0]]);

        let eye: Array2<f64> = identity(3);
        assert_eq!(eye, array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    }

    #[test]
    fn test_matmul_integers() {
        let a = array![[1, 2, 3], [4, 5, 6]];
        let b = array![[7, 8], [9, 10], [11, 12]];
        let c = matmul(&a.view(), &b.view()).unwrap();
        assert_eq!(c, array![[58, 64], [139, 154]]);
    }

    #[test]
    fn test_matmul_bool_semiring() {
        let a = array![[true, false], [false, false]];
        let b = array![[false, true], [true, false]];
        let c = matmul(&a.view(), &b.view()).unwrap();
        assert_eq!(c, array![[false, true], [false, false]]);
    }

    #[test]
    fn test_matmul_shape_error() {
        let a = array![[1.0, 2.0]];
        let b = array![[1.0, 2.0]];
        let err = matmul(&a.view(), &b.view()).unwrap_err();
        assert_eq!(
            err,
            CoreError::Shape(ShapeError::MatMul {
                m1: 1,
                n1: 2,
                m2: 1,
                n2: 2
            })
        );
    }

    #[test]
    fn test_matvec() {
        let a = array![[1.0, 0.0], [2.0, 3.0]];
        let x = array![4.0, 5.0];
        assert_eq!(matvec(&a.view(), &x.view()).unwrap(), array![4.0, 23.0]);

        let bad = array![1.0];
        assert!(matvec(&a.view(), &bad.view()).is_err());
    }

    #[test]
    fn test_nonzeros_row_major() {
        let a = array![[0, 2], [3, 0]];
        assert_eq!(nonzeros(&a.view()), vec![(0, 1, 2), (1, 0, 3)]);
    }
}
