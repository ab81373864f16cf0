//! Reduction operations for sparse matrices
//!
//! Global sums, per-row and per-column sums and the trace, for [`CooMatrix`] and
//! [`CsrMatrix`]. Reductions fold with the semiring's `add`, visiting entries in storage
//! order. Duplicate coordinates all contribute.
//!
//! # Complexity
//!
//! - Global reductions: O(nnz)
//! - Axis-wise reductions: O(nnz + result length)
//!
//! # Examples
//!
//! ```
//! use ringmat_sparse::CooMatrix;
//! use scirs2_core::ndarray_ext::array;
//!
//! // [2 0 1]
//! // [0 3 0]
//! let a = CooMatrix::new(vec![0, 0, 1], vec![0, 2, 1], vec![2, 1, 3], (2, 3)).unwrap();
//!
//! assert_eq!(a.sum(), 6);
//! assert_eq!(a.row_sums(), array![3, 3]);
//! assert_eq!(a.col_sums(), array![2, 3, 1]);
//!
//! // Sparse result: positions without stored entries are absent
//! let cols = a.sum_axis(0).unwrap();
//! assert_eq!(cols.nnz(), 3);
//! ```

use ringmat_core::Semiring;
use scirs2_core::ndarray_ext::Array1;

use crate::coo::CooMatrix;
use crate::csr::CsrMatrix;
use crate::error::{SparseError, SparseResult};
use crate::vector::CooVector;

fn fold_axis<'a, T, I>(entries: I, len: usize, key: impl Fn(usize, usize) -> usize) -> Array1<T>
where
    T: Semiring + 'a,
    I: Iterator<Item = (usize, usize, &'a T)>,
{
    let mut out = Array1::from_elem(len, T::zero());
    for (r, c, v) in entries {
        let i = key(r, c);
        out[i] = out[i].add(v);
    }
    out
}

/// Sparse sums along `axis`: `0` sums each column, `1` sums each row
///
/// Only positions with at least one stored entry appear in the result.
fn sparse_axis_sum<'a, T, I>(
    entries: I,
    shape: (usize, usize),
    axis: usize,
) -> SparseResult<CooVector<T>>
where
    T: Semiring + 'a,
    I: Iterator<Item = (usize, usize, &'a T)>,
{
    let len = match axis {
        0 => shape.1,
        1 => shape.0,
        _ => {
            return Err(SparseError::invalid_argument(format!(
                "Invalid axis: {} for a matrix",
                axis
            )))
        }
    };
    let mut slots: Vec<Option<T>> = vec![None; len];
    for (r, c, v) in entries {
        let i = if axis == 0 { c } else { r };
        slots[i] = Some(match slots[i].take() {
            Some(acc) => acc.add(v),
            None => v.clone(),
        });
    }
    let (indices, values) = slots
        .into_iter()
        .enumerate()
        .filter_map(|(i, s)| s.map(|v| (i, v)))
        .unzip();
    Ok(CooVector::from_parts_unchecked(indices, values, len))
}

fn diagonal_sum<'a, T, I>(entries: I, shape: (usize, usize)) -> SparseResult<T>
where
    T: Semiring + 'a,
    I: Iterator<Item = (usize, usize, &'a T)>,
{
    if shape.0 != shape.1 {
        return Err(SparseError::not_square(shape));
    }
    Ok(entries
        .filter(|&(r, c, _)| r == c)
        .fold(T::zero(), |acc, (_, _, v)| acc.add(v)))
}

impl<T: Semiring> CooMatrix<T> {
    /// Sum of all stored entries
    pub fn sum(&self) -> T {
        self.values().iter().fold(T::zero(), |acc, v| acc.add(v))
    }

    /// Dense vector of row sums, length `nrows`
    pub fn row_sums(&self) -> Array1<T> {
        fold_axis(self.iter(), self.nrows(), |r, _| r)
    }

    /// Dense vector of column sums, length `ncols`
    pub fn col_sums(&self) -> Array1<T> {
        fold_axis(self.iter(), self.ncols(), |_, c| c)
    }

    /// Sparse sums along `axis` (`0` collapses rows, `1` collapses columns)
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an axis other than 0 or 1.
    pub fn sum_axis(&self, axis: usize) -> SparseResult<CooVector<T>> {
        sparse_axis_sum(self.iter(), self.shape(), axis)
    }

    /// Sum of the main diagonal
    ///
    /// # Errors
    ///
    /// `ShapeError::NotSquare` if the matrix is not square.
    pub fn trace(&self) -> SparseResult<T> {
        diagonal_sum(self.iter(), self.shape())
    }
}

impl<T: Semiring> CsrMatrix<T> {
    /// Sum of all stored entries
    pub fn sum(&self) -> T {
        self.values().iter().fold(T::zero(), |acc, v| acc.add(v))
    }

    /// Dense vector of row sums, computed per row segment
    pub fn row_sums(&self) -> Array1<T> {
        self.row_pointers()
            .windows(2)
            .map(|w| {
                self.values()[w[0]..w[1]]
                    .iter()
                    .fold(T::zero(), |acc, v| acc.add(v))
            })
            .collect()
    }

    /// Dense vector of column sums
    pub fn col_sums(&self) -> Array1<T> {
        fold_axis(self.iter(), self.ncols(), |_, c| c)
    }

    /// Sparse sums along `axis` (`0` collapses rows, `1` collapses columns)
    pub fn sum_axis(&self, axis: usize) -> SparseResult<CooVector<T>> {
        sparse_axis_sum(self.iter(), self.shape(), axis)
    }

    /// Sum of the main diagonal
    ///
    /// Binary search per row; O(nrows × log(avg_nnz_row)).
    pub fn trace(&self) -> SparseResult<T> {
        if self.nrows() != self.ncols() {
            return Err(SparseError::not_square(self.shape()));
        }
        let mut total = T::zero();
        for i in 0..self.nrows() {
            if let Some((cols, vals)) = self.row(i) {
                let start = cols.partition_point(|&c| c < i);
                for (_, v) in cols[start..]
                    .iter()
                    .zip(&vals[start..])
                    .take_while(|&(&c, _)| c == i)
                {
                    total = total.add(v);
                }
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;

    fn sample() -> CooMatrix<f64> {
        // [1 0 2]
        // [0 3 0]
        // [4 0 5]   plus a duplicate (0, 0) = 0.5
        CooMatrix::new(
            vec![0, 0, 1, 2, 2, 0],
            vec![0, 2, 1, 0, 2, 0],
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 0.5],
            (3, 3),
        )
        .unwrap()
    }

    #[test]
    fn test_sum() {
        let a = sample();
        assert_eq!(a.sum(), 15.5);
        assert_eq!(a.to_csr().sum(), 15.5);
        assert_eq!(CooMatrix::<f64>::zeros((2, 2)).sum(), 0.0);
    }

    #[test]
    fn test_row_and_col_sums() {
        let a = sample();
        assert_eq!(a.row_sums(), array![3.5, 3.0, 9.0]);
        assert_eq!(a.col_sums(), array![5.5, 3.0, 7.0]);

        let csr = a.to_csr();
        assert_eq!(csr.row_sums(), array![3.5, 3.0, 9.0]);
        assert_eq!(csr.col_sums(), array![5.5, 3.0, 7.0]);
    }

    #[test]
    fn test_sum_axis() {
        let a = CooMatrix::new(vec![0, 2], vec![1, 1], vec![2, 3], (3, 3)).unwrap();
        let cols = a.sum_axis(0).unwrap();
        assert_eq!(cols.size(), 3);
        assert_eq!(cols.indices(), &[1]);
        assert_eq!(cols.values(), &[5]);

        let rows = a.to_csr().sum_axis(1).unwrap();
        assert_eq!(rows.indices(), &[0, 2]);
        assert_eq!(rows.values(), &[2, 3]);

        assert!(a.sum_axis(2).is_err());
    }

    #[test]
    fn test_trace() {
        let a = sample();
        assert_eq!(a.trace().unwrap(), 9.5);
        assert_eq!(a.to_csr().trace().unwrap(), 9.5);

        let rect = CooMatrix::<f64>::zeros((2, 3));
        assert_eq!(rect.trace().unwrap_err(), SparseError::not_square((2, 3)));
        assert!(rect.to_csr().trace().is_err());
    }
}
