//! COO (Coordinate) sparse matrix format
//!
//! The Coordinate format stores a sparse matrix as three parallel arrays: row indices,
//! column indices and values. It is the most flexible format (entries can be appended in any
//! order, duplicates and explicit zeros are allowed) and serves as the entry point for
//! building matrices and converting to CSR.
//!
//! # Format
//!
//! For an `nrows × ncols` matrix with `nnz` stored entries:
//! - `row_indices`: `Vec<usize>` of length `nnz`
//! - `col_indices`: `Vec<usize>` of length `nnz`
//! - `values`: `Vec<T>` of length `nnz`
//!
//! Every coordinate lies inside the shape. Row-major order is the convention: operations
//! preserve it when it holds on input, and [`CooMatrix::sort_indices`] restores it.
//! Duplicates remain until [`CooMatrix::coalesce`], explicit zeros until
//! [`CooMatrix::drop_zeros`].
//!
//! # Examples
//!
//! ```
//! use ringmat_sparse::CooMatrix;
//!
//! // 3x3 matrix with 3 stored entries
//! let coo = CooMatrix::new(vec![0, 1, 2], vec![0, 2, 1], vec![2.0, 3.0, 4.0], (3, 3)).unwrap();
//! assert_eq!(coo.nnz(), 3);
//! assert_eq!(coo.shape(), (3, 3));
//! assert_eq!(coo.get(1, 2).unwrap(), 3.0);
//! assert_eq!(coo.get(1, 1).unwrap(), 0.0);
//! ```

use std::borrow::Cow;

use ringmat_core::{Semiring, Shape};
use scirs2_core::ndarray_ext::{Array2, ArrayView2};

use crate::error::{SparseError, SparseResult};
use crate::iterators::CooEntries;
use crate::sort;

/// COO (Coordinate) sparse matrix
///
/// Cheap to build and to append to. Convert to [`CsrMatrix`](crate::CsrMatrix) for repeated
/// row access or products.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CooParts<T>"))]
pub struct CooMatrix<T> {
    /// Row index of each stored entry
    row_indices: Vec<usize>,

    /// Column index of each stored entry
    col_indices: Vec<usize>,

    /// Stored values
    values: Vec<T>,

    /// (nrows, ncols)
    shape: (usize, usize),

    /// Entries are known to be in row-major order
    #[cfg_attr(feature = "serde", serde(skip))]
    sorted: bool,
}

/// Serialized fields of a [`CooMatrix`], validated by [`CooMatrix::new`] when deserializing
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CooParts<T> {
    row_indices: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<T>,
    shape: (usize, usize),
}

#[cfg(feature = "serde")]
impl<T> TryFrom<CooParts<T>> for CooMatrix<T> {
    type Error = SparseError;

    fn try_from(parts: CooParts<T>) -> SparseResult<Self> {
        Self::new(parts.row_indices, parts.col_indices, parts.values, parts.shape)
    }
}

impl<T> CooMatrix<T> {
    /// Create a new COO matrix
    ///
    /// # Arguments
    ///
    /// * `row_indices` - Row of each entry
    /// * `col_indices` - Column of each entry
    /// * `values` - Value of each entry
    /// * `shape` - (nrows, ncols)
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the three arrays differ in length
    /// - `IndexOutOfRange` if any coordinate lies outside `shape`
    pub fn new(
        row_indices: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
        shape: (usize, usize),
    ) -> SparseResult<Self> {
        if row_indices.len() != values.len() || col_indices.len() != values.len() {
            return Err(SparseError::invalid_argument(format!(
                "COO arrays must have equal lengths: {} rows, {} cols, {} values",
                row_indices.len(),
                col_indices.len(),
                values.len()
            )));
        }

        if let Some((&r, &c)) = row_indices
            .iter()
            .zip(col_indices.iter())
            .find(|&(&r, &c)| r >= shape.0 || c >= shape.1)
        {
            return Err(SparseError::index_out_of_range(&[r, c], shape));
        }

        Ok(Self::from_parts_unchecked(
            row_indices,
            col_indices,
            values,
            shape,
        ))
    }

    /// Create a new COO matrix from a [`Shape`]
    ///
    /// # Errors
    ///
    /// `ShapeError::Rank` if `shape` is not rank 2, otherwise as [`CooMatrix::new`].
    pub fn from_shape(
        shape: &Shape,
        row_indices: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
    ) -> SparseResult<Self> {
        let shape = shape.as_matrix()?;
        Self::new(row_indices, col_indices, values, shape)
    }

    /// Build from `(row, col, value)` triplets
    pub fn from_triplets<I>(triplets: I, shape: (usize, usize)) -> SparseResult<Self>
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let mut rows = Vec::new();
        let mut cols = Vec::new();
        let mut values = Vec::new();
        for (r, c, v) in triplets {
            rows.push(r);
            cols.push(c);
            values.push(v);
        }
        Self::new(rows, cols, values, shape)
    }

    /// Construct without validation
    ///
    /// Callers guarantee equal lengths and in-bounds coordinates.
    pub(crate) fn from_parts_unchecked(
        row_indices: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
        shape: (usize, usize),
    ) -> Self {
        debug_assert_eq!(row_indices.len(), values.len());
        debug_assert_eq!(col_indices.len(), values.len());
        let sorted = sort::is_sorted_matrix(&row_indices, &col_indices);
        Self {
            row_indices,
            col_indices,
            values,
            shape,
            sorted,
        }
    }

    /// Empty matrix of the given shape
    pub fn zeros(shape: (usize, usize)) -> Self {
        Self {
            row_indices: Vec::new(),
            col_indices: Vec::new(),
            values: Vec::new(),
            shape,
            sorted: true,
        }
    }

    /// Append an entry
    ///
    /// Does not check for duplicates; use [`CooMatrix::coalesce`] afterwards.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `(row, col)` lies outside the shape.
    pub fn push(&mut self, row: usize, col: usize, value: T) -> SparseResult<()> {
        self.check_index(row, col)?;
        if let (Some(&last_r), Some(&last_c)) = (self.row_indices.last(), self.col_indices.last())
        {
            self.sorted &= (last_r, last_c) <= (row, col);
        }
        self.row_indices.push(row);
        self.col_indices.push(col);
        self.values.push(value);
        Ok(())
    }

    /// Number of stored entries (including duplicates and explicit zeros)
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.shape.0
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.shape.1
    }

    #[inline]
    pub fn row_indices(&self) -> &[usize] {
        &self.row_indices
    }

    #[inline]
    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Mutable access to the stored values
    ///
    /// Coordinates cannot be changed this way, so sortedness is unaffected.
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Decompose into `(row_indices, col_indices, values, shape)`
    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>, Vec<T>, (usize, usize)) {
        (self.row_indices, self.col_indices, self.values, self.shape)
    }

    /// Whether entries are stored in row-major order
    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Fraction of the shape covered by stored entries, `nnz / (nrows * ncols)`
    ///
    /// Zero for an empty shape.
    pub fn density(&self) -> f64 {
        let total = self.shape.0 as f64 * self.shape.1 as f64;
        if total == 0.0 {
            0.0
        } else {
            self.nnz() as f64 / total
        }
    }

    /// `1 - density`
    pub fn sparsity(&self) -> f64 {
        1.0 - self.density()
    }

    /// Iterate over stored entries as `(row, col, &value)`
    pub fn iter(&self) -> CooEntries<'_, T> {
        CooEntries::new(&self.row_indices, &self.col_indices, &self.values)
    }

    pub(crate) fn check_index(&self, row: usize, col: usize) -> SparseResult<()> {
        if row >= self.shape.0 || col >= self.shape.1 {
            return Err(SparseError::index_out_of_range(&[row, col], self.shape));
        }
        Ok(())
    }

    /// Position range of the entries stored at `(row, col)`, on sorted storage
    pub(crate) fn sorted_range(&self, row: usize, col: usize) -> std::ops::Range<usize> {
        debug_assert!(self.sorted);
        let key = (row, col);
        let coord = |i: usize| (self.row_indices[i], self.col_indices[i]);
        let lower = partition_point(self.nnz(), |i| coord(i) < key);
        let upper = lower + partition_point(self.nnz() - lower, |i| coord(lower + i) <= key);
        lower..upper
    }

    /// Position range of the entries stored in `row`, on sorted storage
    pub(crate) fn sorted_row_range(&self, row: usize) -> std::ops::Range<usize> {
        debug_assert!(self.sorted);
        let lower = partition_point(self.nnz(), |i| self.row_indices[i] < row);
        let upper = lower
            + partition_point(self.nnz() - lower, |i| self.row_indices[lower + i] <= row);
        lower..upper
    }
}

/// First `i` in `0..len` where `pred(i)` is false, assuming `pred` is monotone
fn partition_point(len: usize, mut pred: impl FnMut(usize) -> bool) -> usize {
    let (mut lo, mut hi) = (0, len);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

impl<T: Clone> CooMatrix<T> {
    /// Copy with entries in row-major order
    ///
    /// The sort is stable, so duplicate coordinates keep their relative order.
    pub fn sort_indices(&self) -> Self {
        self.ensure_sorted().into_owned()
    }

    /// Borrow `self` if already sorted, otherwise a sorted copy
    pub fn ensure_sorted(&self) -> Cow<'_, Self> {
        if self.sorted {
            return Cow::Borrowed(self);
        }
        let (values, rows, cols) = sort::sort_matrix_entries(
            self.values.clone(),
            self.row_indices.clone(),
            self.col_indices.clone(),
        );
        Cow::Owned(Self {
            row_indices: rows,
            col_indices: cols,
            values,
            shape: self.shape,
            sorted: true,
        })
    }

    /// Transpose: swap the index arrays and re-sort
    pub fn transpose(&self) -> Self {
        let (values, rows, cols) = sort::sort_matrix_entries(
            self.values.clone(),
            self.col_indices.clone(),
            self.row_indices.clone(),
        );
        Self {
            row_indices: rows,
            col_indices: cols,
            values,
            shape: (self.shape.1, self.shape.0),
            sorted: true,
        }
    }

    /// Short alias for [`CooMatrix::transpose`]
    #[inline]
    pub fn t(&self) -> Self {
        self.transpose()
    }

    /// Merge duplicate coordinates with `combine`, folding left to right in stored order
    ///
    /// The result is sorted.
    pub fn coalesce_with<F>(&self, combine: F) -> Self
    where
        F: FnMut(&T, &T) -> T,
    {
        let (values, rows, cols) = sort::coalesce_matrix_entries(
            self.values.clone(),
            self.row_indices.clone(),
            self.col_indices.clone(),
            combine,
        );
        Self {
            row_indices: rows,
            col_indices: cols,
            values,
            shape: self.shape,
            sorted: true,
        }
    }
}

impl<T: Semiring> CooMatrix<T> {
    /// `size × size` identity
    pub fn identity(size: usize) -> Self {
        Self {
            row_indices: (0..size).collect(),
            col_indices: (0..size).collect(),
            values: vec![T::one(); size],
            shape: (size, size),
            sorted: true,
        }
    }

    /// Merge duplicate coordinates by addition
    ///
    /// # Complexity
    ///
    /// O(nnz log nnz)
    pub fn coalesce(&self) -> Self {
        self.coalesce_with(|a, b| a.add(b))
    }

    /// Copy without explicit zeros
    pub fn drop_zeros(&self) -> Self {
        let keep: Vec<usize> = (0..self.nnz())
            .filter(|&i| !self.values[i].is_zero())
            .collect();
        Self {
            row_indices: keep.iter().map(|&i| self.row_indices[i]).collect(),
            col_indices: keep.iter().map(|&i| self.col_indices[i]).collect(),
            values: keep.iter().map(|&i| self.values[i].clone()).collect(),
            shape: self.shape,
            sorted: self.sorted,
        }
    }

    /// Value at `(row, col)`
    ///
    /// Duplicate entries at the coordinate are summed; an absent coordinate reads as zero.
    /// Sorted storage is searched by bisection, unsorted storage is scanned.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `(row, col)` lies outside the shape.
    pub fn get(&self, row: usize, col: usize) -> SparseResult<T> {
        self.check_index(row, col)?;
        let sum = if self.sorted {
            self.values[self.sorted_range(row, col)]
                .iter()
                .fold(T::zero(), |acc, v| acc.add(v))
        } else {
            self.iter()
                .filter(|&(r, c, _)| r == row && c == col)
                .fold(T::zero(), |acc, (_, _, v)| acc.add(v))
        };
        Ok(sum)
    }

    /// Copy with `(row, col)` set to `value`
    ///
    /// Every entry previously stored at the coordinate is replaced. Setting zero removes the
    /// coordinate. The result is sorted.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `(row, col)` lies outside the shape.
    pub fn set(&self, value: T, row: usize, col: usize) -> SparseResult<Self> {
        self.check_index(row, col)?;
        let sorted = self.ensure_sorted();
        let range = sorted.sorted_range(row, col);
        let new_entry = if value.is_zero() { 0 } else { 1 };
        let nnz = sorted.nnz() - range.len() + new_entry;

        let mut rows = Vec::with_capacity(nnz);
        let mut cols = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        rows.extend_from_slice(&sorted.row_indices[..range.start]);
        cols.extend_from_slice(&sorted.col_indices[..range.start]);
        values.extend_from_slice(&sorted.values[..range.start]);
        if new_entry == 1 {
            rows.push(row);
            cols.push(col);
            values.push(value);
        }
        rows.extend_from_slice(&sorted.row_indices[range.end..]);
        cols.extend_from_slice(&sorted.col_indices[range.end..]);
        values.extend_from_slice(&sorted.values[range.end..]);

        Ok(Self {
            row_indices: rows,
            col_indices: cols,
            values,
            shape: self.shape,
            sorted: true,
        })
    }

    /// Multiply every stored value by `factor`
    pub fn scale(&self, factor: &T) -> Self {
        let mut out = self.clone();
        for v in out.values.iter_mut() {
            *v = v.mul(factor);
        }
        out
    }

    /// Dense image of the matrix
    ///
    /// Entries are scattered in stored order, so when a coordinate is stored more than once
    /// the last stored value wins. Coalesce first to sum duplicates instead.
    ///
    /// # Complexity
    ///
    /// Time: O(nnz + nrows × ncols)
    pub fn to_dense(&self) -> Array2<T> {
        let mut dense = Array2::from_elem(self.shape, T::zero());
        for (r, c, v) in self.iter() {
            dense[[r, c]] = v.clone();
        }
        dense
    }

    /// Sparse copy of a dense matrix, keeping every entry that is not zero
    ///
    /// The result is sorted.
    pub fn from_dense(dense: &ArrayView2<T>) -> Self {
        let mut rows = Vec::new();
        let mut cols = Vec::new();
        let mut values = Vec::new();
        for (r, c, v) in ringmat_core::dense::nonzeros(dense) {
            rows.push(r);
            cols.push(c);
            values.push(v);
        }
        Self {
            row_indices: rows,
            col_indices: cols,
            values,
            shape: dense.dim(),
            sorted: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;

    fn scenario() -> CooMatrix<f64> {
        CooMatrix::new(vec![0, 1, 2], vec![0, 2, 1], vec![2.0, 3.0, 4.0], (3, 3)).unwrap()
    }

    #[test]
    fn test_coo_creation() {
        let coo = scenario();
        assert_eq!(coo.nnz(), 3);
        assert_eq!(coo.shape(), (3, 3));
        assert!(coo.is_sorted());
        assert!((coo.density() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_coo_validation() {
        assert!(matches!(
            CooMatrix::new(vec![0], vec![0, 1], vec![1.0], (2, 2)),
            Err(SparseError::InvalidArgument(_))
        ));
        assert_eq!(
            CooMatrix::new(vec![0, 2], vec![0, 0], vec![1.0, 1.0], (2, 2)).unwrap_err(),
            SparseError::index_out_of_range(&[2, 0], (2, 2))
        );
    }

    #[test]
    fn test_from_shape_rank_check() {
        let err =
            CooMatrix::<f64>::from_shape(&Shape::vector(3), vec![], vec![], vec![]).unwrap_err();
        assert!(matches!(err, SparseError::Shape(_)));

        let ok = CooMatrix::<f64>::from_shape(&Shape::matrix(2, 3), vec![1], vec![2], vec![5.0]);
        assert_eq!(ok.unwrap().shape(), (2, 3));
    }

    #[test]
    fn test_zero_sized_shape() {
        let coo = CooMatrix::<i32>::zeros((0, 4));
        assert_eq!(coo.density(), 0.0);
        assert_eq!(coo.to_dense().dim(), (0, 4));
    }

    #[test]
    fn test_push_tracks_sortedness() {
        let mut coo = CooMatrix::zeros((3, 3));
        coo.push(0, 1, 1.0).unwrap();
        coo.push(1, 0, 2.0).unwrap();
        assert!(coo.is_sorted());
        coo.push(0, 2, 3.0).unwrap();
        assert!(!coo.is_sorted());
        assert!(coo.push(3, 0, 1.0).is_err());
        assert_eq!(coo.nnz(), 3);
    }

    #[test]
    fn test_to_dense_scenario() {
        let dense = scenario().to_dense();
        assert_eq!(
            dense,
            array![[2.0, 0.0, 0.0], [0.0, 0.0, 3.0], [0.0, 4.0, 0.0]]
        );
    }

    #[test]
    fn test_to_dense_last_duplicate_wins() {
        let coo = CooMatrix::new(vec![0, 0], vec![1, 1], vec![1, 5], (1, 2)).unwrap();
        assert_eq!(coo.to_dense(), array![[0, 5]]);
        assert_eq!(coo.get(0, 1).unwrap(), 6);
    }

    #[test]
    fn test_transpose_scenario() {
        let t = scenario().t();
        let entries: Vec<_> = t.iter().map(|(r, c, &v)| (r, c, v)).collect();
        assert_eq!(entries, vec![(0, 0, 2.0), (1, 2, 4.0), (2, 1, 3.0)]);
        assert!(t.is_sorted());
    }

    #[test]
    fn test_get_unsorted_and_duplicates() {
        let coo =
            CooMatrix::new(vec![2, 0, 2], vec![1, 0, 1], vec![1.0, 7.0, 2.5], (3, 3)).unwrap();
        assert!(!coo.is_sorted());
        assert_eq!(coo.get(2, 1).unwrap(), 3.5);
        assert_eq!(coo.get(0, 0).unwrap(), 7.0);
        assert_eq!(coo.get(1, 1).unwrap(), 0.0);
        assert!(coo.get(0, 3).is_err());

        let sorted = coo.sort_indices();
        assert_eq!(sorted.get(2, 1).unwrap(), 3.5);
    }

    #[test]
    fn test_set_insert_update_remove() {
        let coo = scenario();

        let inserted = coo.set(9.0, 1, 1).unwrap();
        assert_eq!(inserted.nnz(), 4);
        assert_eq!(inserted.get(1, 1).unwrap(), 9.0);
        assert!(inserted.is_sorted());

        let updated = coo.set(-1.0, 1, 2).unwrap();
        assert_eq!(updated.nnz(), 3);
        assert_eq!(updated.get(1, 2).unwrap(), -1.0);

        let removed = coo.set(0.0, 0, 0).unwrap();
        assert_eq!(removed.nnz(), 2);
        assert_eq!(removed.get(0, 0).unwrap(), 0.0);

        // the original is untouched
        assert_eq!(coo.get(0, 0).unwrap(), 2.0);
        assert!(coo.set(1.0, 5, 5).is_err());
    }

    #[test]
    fn test_set_replaces_duplicates() {
        let coo = CooMatrix::new(vec![0, 0, 1], vec![0, 0, 0], vec![1, 2, 3], (2, 2)).unwrap();
        let out = coo.set(10, 0, 0).unwrap();
        assert_eq!(out.nnz(), 2);
        assert_eq!(out.get(0, 0).unwrap(), 10);
    }

    #[test]
    fn test_coalesce_and_drop_zeros() {
        let coo = CooMatrix::new(
            vec![1, 0, 1, 0],
            vec![0, 1, 0, 0],
            vec![1.0, 0.0, 2.0, 4.0],
            (2, 2),
        )
        .unwrap();
        let c = coo.coalesce();
        assert_eq!(c.nnz(), 3);
        assert_eq!(c.row_indices(), &[0, 0, 1]);
        assert_eq!(c.col_indices(), &[0, 1, 0]);
        assert_eq!(c.values(), &[4.0, 0.0, 3.0]);

        let d = c.drop_zeros();
        assert_eq!(d.nnz(), 2);
        assert_eq!(d.values(), &[4.0, 3.0]);
        assert!(d.is_sorted());
    }

    #[test]
    fn test_from_dense_drops_zeros() {
        let dense = array![[0, 1], [2, 0]];
        let coo = CooMatrix::from_dense(&dense.view());
        assert_eq!(coo.nnz(), 2);
        assert_eq!(coo.row_indices(), &[0, 1]);
        assert_eq!(coo.col_indices(), &[1, 0]);
        assert_eq!(coo.to_dense(), dense);
    }

    #[test]
    fn test_identity_and_scale() {
        let eye = CooMatrix::<i64>::identity(3);
        assert_eq!(eye.nnz(), 3);
        let scaled = eye.scale(&4);
        assert_eq!(scaled.get(2, 2).unwrap(), 4);
    }

    #[test]
    fn test_from_triplets() {
        let coo =
            CooMatrix::from_triplets(vec![(1, 1, true), (0, 0, true)], (2, 2)).unwrap();
        assert!(!coo.is_sorted());
        assert_eq!(coo.sort_indices().row_indices(), &[0, 1]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_validates_on_deserialize() {
        let coo = CooMatrix::new(vec![1, 0], vec![0, 1], vec![2.0, 3.0], (2, 2)).unwrap();
        let back: CooMatrix<f64> =
            serde_json::from_value(serde_json::to_value(&coo).unwrap()).unwrap();
        assert_eq!(back, coo);
        assert!(!back.is_sorted());
        assert!(back.sort_indices().is_sorted());

        let out_of_range = serde_json::json!({
            "row_indices": [0, 2],
            "col_indices": [0, 0],
            "values": [1.0, 1.0],
            "shape": [2, 2],
        });
        assert!(serde_json::from_value::<CooMatrix<f64>>(out_of_range).is_err());

        let ragged = serde_json::json!({
            "row_indices": [0],
            "col_indices": [0, 1],
            "values": [1.0],
            "shape": [2, 2],
        });
        assert!(serde_json::from_value::<CooMatrix<f64>>(ragged).is_err());
    }
}
