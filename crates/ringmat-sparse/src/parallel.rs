//! Row-parallel variants of the sorting, conversion and product kernels
//!
//! Every function here has a sequential fallback of the same name that is compiled when the
//! `parallel` feature is disabled, so callers never need to feature-gate their own code.
//!
//! Rows are independent in all of these kernels and each output row is accumulated in the
//! same order as the sequential kernel, so parallel and sequential results are identical,
//! including for floating point values.
//!
//! # Performance
//!
//! Parallel versions typically pay off for matrices with more than a few thousand rows.
//! [`crate::matmul::MatMulHints::parallel_row_threshold`] controls when
//! [`crate::matmul::mult_with_hints`] switches to them.
//!
//! # Examples
//!
//! ```rust
//! use ringmat_sparse::{CooMatrix, parallel::par_csr_mult_csr};
//!
//! let a = CooMatrix::new(vec![0, 1, 2], vec![0, 2, 1], vec![2.0, 3.0, 4.0], (3, 3))
//!     .unwrap()
//!     .to_csr();
//! let c = par_csr_mult_csr(&a, &a).unwrap();
//! assert_eq!(c.to_dense(), a.mult(&a).unwrap());
//! ```

use ringmat_core::Semiring;
use scirs2_core::ndarray_ext::{Array1, Array2, ArrayView1, ArrayView2};

use crate::coo::CooMatrix;
use crate::csr::CsrMatrix;
use crate::error::SparseResult;

#[cfg(feature = "parallel")]
use crate::error::SparseError;
#[cfg(feature = "parallel")]
use crate::matmul::{csr_row_product, SparseAccumulator};
#[cfg(feature = "parallel")]
use scirs2_core::parallel_ops::*;

/// Parallel row-major sort of a COO matrix
///
/// Uses a stable parallel sort of the entry permutation, so duplicates keep their relative
/// order exactly as [`CooMatrix::sort_indices`] does.
///
/// # Complexity
///
/// O(nnz × log(nnz))
#[cfg(feature = "parallel")]
pub fn par_sort_coo<T>(coo: &CooMatrix<T>) -> CooMatrix<T>
where
    T: Clone + Send + Sync,
{
    if coo.is_sorted() {
        return coo.clone();
    }

    let rows = coo.row_indices();
    let cols = coo.col_indices();
    let mut perm: Vec<usize> = (0..coo.nnz()).collect();
    perm.par_sort_by(|&i, &j| (rows[i], cols[i]).cmp(&(rows[j], cols[j])));

    let new_rows: Vec<usize> = perm.par_iter().map(|&old| rows[old]).collect();
    let new_cols: Vec<usize> = perm.par_iter().map(|&old| cols[old]).collect();
    let new_values: Vec<T> = perm
        .par_iter()
        .map(|&old| coo.values()[old].clone())
        .collect();

    CooMatrix::from_parts_unchecked(new_rows, new_cols, new_values, coo.shape())
}

/// Sequential fallback for par_sort_coo when parallel feature is disabled
#[cfg(not(feature = "parallel"))]
pub fn par_sort_coo<T>(coo: &CooMatrix<T>) -> CooMatrix<T>
where
    T: Clone,
{
    coo.sort_indices()
}

/// Parallel COO → CSR conversion
///
/// Sorts in parallel, then builds the row pointers from a histogram of row indices.
#[cfg(feature = "parallel")]
pub fn par_coo_to_csr<T>(coo: &CooMatrix<T>) -> CsrMatrix<T>
where
    T: Clone + Send + Sync,
{
    let sorted = par_sort_coo(coo);
    let (rows, cols, values, shape) = sorted.into_parts();

    let mut row_pointers = vec![0; shape.0 + 1];
    for &r in &rows {
        row_pointers[r + 1] += 1;
    }
    // Prefix sum must be sequential
    for i in 0..shape.0 {
        row_pointers[i + 1] += row_pointers[i];
    }

    CsrMatrix::from_parts_unchecked(row_pointers, cols, values, shape)
}

/// Sequential fallback for par_coo_to_csr when parallel feature is disabled
#[cfg(not(feature = "parallel"))]
pub fn par_coo_to_csr<T>(coo: &CooMatrix<T>) -> CsrMatrix<T>
where
    T: Clone,
{
    CsrMatrix::from_coo(coo)
}

/// Parallel CSR × dense vector
///
/// # Complexity
///
/// O(nnz) with parallel row processing
#[cfg(feature = "parallel")]
pub fn par_csr_mult_vec<T>(csr: &CsrMatrix<T>, x: &ArrayView1<T>) -> SparseResult<Array1<T>>
where
    T: Semiring + Send + Sync,
{
    if x.len() != csr.ncols() {
        return Err(SparseError::matvec(csr.shape(), x.len()));
    }

    let result: Vec<T> = (0..csr.nrows())
        .into_par_iter()
        .map(|row| {
            let start = csr.row_pointers()[row];
            let end = csr.row_pointers()[row + 1];
            csr.col_indices()[start..end]
                .iter()
                .zip(&csr.values()[start..end])
                .fold(T::zero(), |sum, (&col, val)| sum.add(&val.mul(&x[col])))
        })
        .collect();

    Ok(Array1::from(result))
}

/// Sequential fallback for par_csr_mult_vec when parallel feature is disabled
#[cfg(not(feature = "parallel"))]
pub fn par_csr_mult_vec<T>(csr: &CsrMatrix<T>, x: &ArrayView1<T>) -> SparseResult<Array1<T>>
where
    T: Semiring,
{
    csr.mult_vec(x)
}

/// Parallel CSR × dense matrix
///
/// # Complexity
///
/// O(nnz × k) where k is the number of columns in `b`, with parallel row processing
#[cfg(feature = "parallel")]
pub fn par_csr_mult_dense<T>(csr: &CsrMatrix<T>, b: &ArrayView2<T>) -> SparseResult<Array2<T>>
where
    T: Semiring + Send + Sync,
{
    let (b_rows, b_cols) = b.dim();
    if csr.ncols() != b_rows {
        return Err(SparseError::matmul(csr.shape(), b.dim()));
    }

    let nrows = csr.nrows();
    let result_data: Vec<T> = (0..nrows)
        .into_par_iter()
        .flat_map(|row| {
            let start = csr.row_pointers()[row];
            let end = csr.row_pointers()[row + 1];

            let mut c_row = vec![T::zero(); b_cols];
            for idx in start..end {
                let k = csr.col_indices()[idx];
                let a_val = &csr.values()[idx];
                for (j, c) in c_row.iter_mut().enumerate() {
                    *c = c.add(&a_val.mul(&b[[k, j]]));
                }
            }
            c_row
        })
        .collect();

    Array2::from_shape_vec((nrows, b_cols), result_data)
        .map_err(|e| SparseError::invalid_argument(e.to_string()))
}

/// Sequential fallback for par_csr_mult_dense when parallel feature is disabled
#[cfg(not(feature = "parallel"))]
pub fn par_csr_mult_dense<T>(csr: &CsrMatrix<T>, b: &ArrayView2<T>) -> SparseResult<Array2<T>>
where
    T: Semiring,
{
    csr.mult_dense(b)
}

/// Parallel CSR × CSR with a CSR result
///
/// Each worker keeps its own sparse accumulator; rows are computed independently and
/// concatenated in order.
#[cfg(feature = "parallel")]
pub fn par_csr_mult_csr<T>(a: &CsrMatrix<T>, b: &CsrMatrix<T>) -> SparseResult<CsrMatrix<T>>
where
    T: Semiring + Send + Sync,
{
    if a.ncols() != b.nrows() {
        return Err(SparseError::matmul(a.shape(), b.shape()));
    }

    let ncols = b.ncols();
    let rows: Vec<(Vec<usize>, Vec<T>)> = (0..a.nrows())
        .into_par_iter()
        .map_init(
            || SparseAccumulator::new(ncols),
            |acc, i| csr_row_product(a, b, i, acc),
        )
        .collect();

    let nnz: usize = rows.iter().map(|(cols, _)| cols.len()).sum();
    let mut row_pointers = Vec::with_capacity(rows.len() + 1);
    let mut col_indices = Vec::with_capacity(nnz);
    let mut values = Vec::with_capacity(nnz);
    row_pointers.push(0);
    for (cols, vals) in rows {
        col_indices.extend(cols);
        values.extend(vals);
        row_pointers.push(values.len());
    }

    Ok(CsrMatrix::from_parts_unchecked(
        row_pointers,
        col_indices,
        values,
        (a.nrows(), ncols),
    ))
}

/// Sequential fallback for par_csr_mult_csr when parallel feature is disabled
#[cfg(not(feature = "parallel"))]
pub fn par_csr_mult_csr<T>(a: &CsrMatrix<T>, b: &CsrMatrix<T>) -> SparseResult<CsrMatrix<T>>
where
    T: Semiring,
{
    log::trace!("parallel feature disabled, CSR × CSR runs sequentially");
    a.mult_to_sparse(b)
}

/// Parallel CSR × CSR with a dense result
#[cfg(feature = "parallel")]
pub fn par_csr_mult_csr_dense<T>(a: &CsrMatrix<T>, b: &CsrMatrix<T>) -> SparseResult<Array2<T>>
where
    T: Semiring + Send + Sync,
{
    if a.ncols() != b.nrows() {
        return Err(SparseError::matmul(a.shape(), b.shape()));
    }

    let (nrows, ncols) = (a.nrows(), b.ncols());
    let result_data: Vec<T> = (0..nrows)
        .into_par_iter()
        .flat_map(|i| {
            let mut c_row = vec![T::zero(); ncols];
            let (a_start, a_end) = (a.row_pointers()[i], a.row_pointers()[i + 1]);
            for idx in a_start..a_end {
                let k = a.col_indices()[idx];
                let a_val = &a.values()[idx];
                let (b_start, b_end) = (b.row_pointers()[k], b.row_pointers()[k + 1]);
                for (&j, b_val) in b.col_indices()[b_start..b_end]
                    .iter()
                    .zip(&b.values()[b_start..b_end])
                {
                    c_row[j] = c_row[j].add(&a_val.mul(b_val));
                }
            }
            c_row
        })
        .collect();

    Array2::from_shape_vec((nrows, ncols), result_data)
        .map_err(|e| SparseError::invalid_argument(e.to_string()))
}

/// Sequential fallback for par_csr_mult_csr_dense when parallel feature is disabled
#[cfg(not(feature = "parallel"))]
pub fn par_csr_mult_csr_dense<T>(a: &CsrMatrix<T>, b: &CsrMatrix<T>) -> SparseResult<Array2<T>>
where
    T: Semiring,
{
    log::trace!("parallel feature disabled, CSR × CSR (dense) runs sequentially");
    a.mult(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;

    fn banded(n: usize) -> CooMatrix<f64> {
        let mut triplets = Vec::new();
        for i in 0..n {
            triplets.push((i, i, 2.0));
            if i + 1 < n {
                triplets.push((i, i + 1, -1.0));
                triplets.push((i + 1, i, -1.0));
            }
        }
        // Reverse so the input is unsorted
        triplets.reverse();
        CooMatrix::from_triplets(triplets, (n, n)).unwrap()
    }

    #[test]
    fn test_par_sort_coo() {
        let coo = CooMatrix::new(vec![2, 0, 1, 0], vec![0, 1, 2, 1], vec![3, 1, 2, 5], (3, 4))
            .unwrap();
        let sorted = par_sort_coo(&coo);
        assert!(sorted.is_sorted());
        assert_eq!(sorted.row_indices(), &[0, 0, 1, 2]);
        assert_eq!(sorted.col_indices(), &[1, 1, 2, 0]);
        // stable for duplicates
        assert_eq!(sorted.values(), &[1, 5, 2, 3]);
        assert_eq!(sorted, coo.sort_indices());
    }

    #[test]
    fn test_par_coo_to_csr() {
        let coo = banded(200);
        let par = par_coo_to_csr(&coo);
        let seq = CsrMatrix::from_coo(&coo);
        assert_eq!(par.row_pointers(), seq.row_pointers());
        assert_eq!(par.col_indices(), seq.col_indices());
        assert_eq!(par.values(), seq.values());
    }

    #[test]
    fn test_par_csr_mult_vec() {
        let csr = banded(50).to_csr();
        let x = Array1::from_iter((0..50).map(|i| i as f64));
        assert_eq!(
            par_csr_mult_vec(&csr, &x.view()).unwrap(),
            csr.mult_vec(&x.view()).unwrap()
        );
        assert!(par_csr_mult_vec(&csr, &array![1.0].view()).is_err());
    }

    #[test]
    fn test_par_csr_mult_dense() {
        let csr = banded(40).to_csr();
        let b = Array2::from_shape_fn((40, 3), |(i, j)| (i * 3 + j) as f64);
        assert_eq!(
            par_csr_mult_dense(&csr, &b.view()).unwrap(),
            csr.mult_dense(&b.view()).unwrap()
        );
        assert!(par_csr_mult_dense(&csr, &Array2::zeros((3, 3)).view()).is_err());
    }

    #[test]
    fn test_par_csr_mult_csr() {
        let csr = banded(120).to_csr();
        let par = par_csr_mult_csr(&csr, &csr).unwrap();
        let seq = csr.mult_to_sparse(&csr).unwrap();
        assert_eq!(par.row_pointers(), seq.row_pointers());
        assert_eq!(par.col_indices(), seq.col_indices());
        assert_eq!(par.values(), seq.values());

        assert_eq!(
            par_csr_mult_csr_dense(&csr, &csr).unwrap(),
            csr.mult(&csr).unwrap()
        );
    }

    #[test]
    fn test_par_shape_mismatch() {
        let a = banded(3).to_csr();
        let b = CsrMatrix::<f64>::zeros((2, 2));
        assert!(par_csr_mult_csr(&a, &b).is_err());
        assert!(par_csr_mult_csr_dense(&a, &b).is_err());
    }
}
