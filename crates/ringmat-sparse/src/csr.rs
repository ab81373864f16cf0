//! CSR (Compressed Sparse Row) format for 2D matrices
//!
//! CSR is optimized for row-wise access and is the preferred operand for products.
//!
//! # Format
//!
//! For an m×n sparse matrix with nnz stored entries:
//! - `row_pointers`: `Vec<usize>` of length m+1, `row_pointers[i]..row_pointers[i+1]` is the
//!   segment of row i
//! - `col_indices`: `Vec<usize>` of length nnz, ascending within each row segment
//! - `values`: `Vec<T>` of length nnz
//! - `shape`: (m, n)
//!
//! Equal column indices inside a segment are duplicate entries; they are kept as stored until
//! [`CsrMatrix::coalesce`].
//!
//! # Examples
//!
//! ```
//! use ringmat_sparse::{CooMatrix, CsrMatrix};
//!
//! // [1.0  0   2.0  0  ]
//! // [0    3.0 0    0  ]
//! // [4.0  0   0    5.0]
//! let csr = CsrMatrix::new(
//!     vec![0, 2, 3, 5],
//!     vec![0, 2, 1, 0, 3],
//!     vec![1.0, 2.0, 3.0, 4.0, 5.0],
//!     (3, 4),
//! )
//! .unwrap();
//! assert_eq!(csr.nnz(), 5);
//! assert_eq!(csr.row(2), Some((&[0, 3][..], &[4.0, 5.0][..])));
//!
//! let coo = CooMatrix::new(vec![0, 1, 2], vec![0, 2, 1], vec![2.0, 3.0, 4.0], (3, 3)).unwrap();
//! assert_eq!(coo.to_csr().row_pointers(), &[0, 1, 2, 3]);
//! ```

use ringmat_core::Semiring;
use scirs2_core::ndarray_ext::{Array2, ArrayView2};

use crate::coo::CooMatrix;
use crate::error::{SparseError, SparseResult};
use crate::iterators::CsrEntries;
use crate::sort;

/// CSR (Compressed Sparse Row) matrix
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CsrParts<T>"))]
pub struct CsrMatrix<T> {
    /// Row pointers: `row_pointers[i]` = start of row i in `col_indices`/`values`
    /// Length: nrows + 1, with `row_pointers[nrows] = nnz`
    row_pointers: Vec<usize>,

    /// Column index of each stored entry
    col_indices: Vec<usize>,

    /// Stored values
    values: Vec<T>,

    /// Shape: (nrows, ncols)
    shape: (usize, usize),
}

/// Serialized fields of a [`CsrMatrix`], validated by [`CsrMatrix::new`] when deserializing
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CsrParts<T> {
    row_pointers: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<T>,
    shape: (usize, usize),
}

#[cfg(feature = "serde")]
impl<T> TryFrom<CsrParts<T>> for CsrMatrix<T> {
    type Error = SparseError;

    fn try_from(parts: CsrParts<T>) -> SparseResult<Self> {
        Self::new(parts.row_pointers, parts.col_indices, parts.values, parts.shape)
    }
}

impl<T> CsrMatrix<T> {
    /// Create a new CSR matrix from validated parts
    ///
    /// # Arguments
    ///
    /// * `row_pointers` - Row pointers (length nrows+1)
    /// * `col_indices` - Column index of each entry
    /// * `values` - Value of each entry
    /// * `shape` - (nrows, ncols)
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if:
    /// - `row_pointers` does not have length nrows+1, start at 0 and end at nnz
    /// - `row_pointers` decreases anywhere
    /// - `col_indices` and `values` differ in length
    /// - column indices decrease within a row
    ///
    /// `IndexOutOfRange` if a column index is `>= ncols`.
    pub fn new(
        row_pointers: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
        shape: (usize, usize),
    ) -> SparseResult<Self> {
        let (nrows, ncols) = shape;

        if row_pointers.len() != nrows + 1 {
            return Err(SparseError::invalid_argument(format!(
                "row pointers have length {} for {} rows (expected {})",
                row_pointers.len(),
                nrows,
                nrows + 1
            )));
        }

        if col_indices.len() != values.len() {
            return Err(SparseError::invalid_argument(format!(
                "{} column indices but {} values",
                col_indices.len(),
                values.len()
            )));
        }

        let nnz = values.len();
        if row_pointers[0] != 0 || row_pointers[nrows] != nnz {
            return Err(SparseError::invalid_argument(format!(
                "row pointers must run from 0 to nnz = {}, got {}..{}",
                nnz, row_pointers[0], row_pointers[nrows]
            )));
        }

        if let Some(i) = row_pointers.windows(2).position(|w| w[0] > w[1]) {
            return Err(SparseError::invalid_argument(format!(
                "row pointers decrease at row {}: {} > {}",
                i,
                row_pointers[i],
                row_pointers[i + 1]
            )));
        }

        for row in 0..nrows {
            let cols = &col_indices[row_pointers[row]..row_pointers[row + 1]];
            if let Some(&col) = cols.iter().find(|&&c| c >= ncols) {
                return Err(SparseError::index_out_of_range(&[row, col], shape));
            }
            if !sort::is_sorted_vector(cols) {
                return Err(SparseError::invalid_argument(format!(
                    "column indices of row {} are not sorted",
                    row
                )));
            }
        }

        Ok(Self::from_parts_unchecked(
            row_pointers,
            col_indices,
            values,
            shape,
        ))
    }

    /// Construct without validation
    pub(crate) fn from_parts_unchecked(
        row_pointers: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
        shape: (usize, usize),
    ) -> Self {
        debug_assert_eq!(row_pointers.len(), shape.0 + 1);
        debug_assert_eq!(col_indices.len(), values.len());
        Self {
            row_pointers,
            col_indices,
            values,
            shape,
        }
    }

    /// Empty matrix with the given shape
    pub fn zeros(shape: (usize, usize)) -> Self {
        Self {
            row_pointers: vec![0; shape.0 + 1],
            col_indices: Vec::new(),
            values: Vec::new(),
            shape,
        }
    }

    /// Number of stored entries
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
    pub fn row_pointers(&self) -> &[usize] {
        &self.row_pointers
    }

    #[inline]
    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Decompose into `(row_pointers, col_indices, values, shape)`
    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>, Vec<T>, (usize, usize)) {
        (self.row_pointers, self.col_indices, self.values, self.shape)
    }

    /// Compute density (nnz / total_elements); zero for an empty shape
    pub fn density(&self) -> f64 {
        let total = self.shape.0 as f64 * self.shape.1 as f64;
        if total == 0.0 {
            0.0
        } else {
            self.nnz() as f64 / total
        }
    }

    /// Get a row as (col_indices, values) slices
    pub fn row(&self, i: usize) -> Option<(&[usize], &[T])> {
        if i >= self.nrows() {
            return None;
        }

        let start = self.row_pointers[i];
        let end = self.row_pointers[i + 1];

        Some((&self.col_indices[start..end], &self.values[start..end]))
    }

    /// Number of stored entries in each row
    pub fn nnz_per_row(&self) -> Vec<usize> {
        self.row_pointers.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Iterate over stored entries as `(row, col, &value)` in row-major order
    pub fn iter(&self) -> CsrEntries<'_, T> {
        CsrEntries::new(&self.row_pointers, &self.col_indices, &self.values)
    }

    pub(crate) fn check_index(&self, row: usize, col: usize) -> SparseResult<()> {
        if row >= self.shape.0 || col >= self.shape.1 {
            return Err(SparseError::index_out_of_range(&[row, col], self.shape));
        }
        Ok(())
    }

    /// Position range of the entries at `(row, col)`
    fn entry_range(&self, row: usize, col: usize) -> std::ops::Range<usize> {
        let start = self.row_pointers[row];
        let cols = &self.col_indices[start..self.row_pointers[row + 1]];
        let lower = cols.partition_point(|&c| c < col);
        let upper = cols.partition_point(|&c| c <= col);
        start + lower..start + upper
    }
}

impl<T: Clone> CsrMatrix<T> {
    /// Convert from COO format
    ///
    /// Sorts a copy of `coo` if needed, then builds row pointers from a row histogram and
    /// its prefix sum. Duplicates are carried over.
    ///
    /// # Complexity
    ///
    /// O(nnz + nrows) on sorted input, plus O(nnz log nnz) otherwise.
    pub fn from_coo(coo: &CooMatrix<T>) -> Self {
        let sorted = coo.ensure_sorted();
        let (nrows, ncols) = sorted.shape();

        // Count elements per row
        let mut row_pointers = vec![0; nrows + 1];
        for &row in sorted.row_indices() {
            row_pointers[row + 1] += 1;
        }

        // Cumulative sum to get row starts
        for i in 0..nrows {
            row_pointers[i + 1] += row_pointers[i];
        }

        Self::from_parts_unchecked(
            row_pointers,
            sorted.col_indices().to_vec(),
            sorted.values().to_vec(),
            (nrows, ncols),
        )
    }

    /// Convert to COO format
    ///
    /// The result is sorted.
    pub fn to_coo(&self) -> CooMatrix<T> {
        let mut row_indices = Vec::with_capacity(self.nnz());
        for row in 0..self.nrows() {
            let count = self.row_pointers[row + 1] - self.row_pointers[row];
            row_indices.extend(std::iter::repeat(row).take(count));
        }

        CooMatrix::from_parts_unchecked(
            row_indices,
            self.col_indices.clone(),
            self.values.clone(),
            self.shape,
        )
    }

    /// Transpose by counting sort on the column indices
    ///
    /// Entries of each output row come out in ascending original row order, so the result is
    /// valid CSR without a further sort.
    ///
    /// # Complexity
    ///
    /// O(nnz + nrows + ncols)
    pub fn transpose(&self) -> Self {
        let (nrows, ncols) = self.shape;
        let nnz = self.nnz();

        let mut row_pointers = vec![0; ncols + 1];
        for &c in &self.col_indices {
            row_pointers[c + 1] += 1;
        }
        for i in 0..ncols {
            row_pointers[i + 1] += row_pointers[i];
        }

        let mut next = row_pointers.clone();
        let mut col_indices = vec![0; nnz];
        let mut slots: Vec<Option<T>> = vec![None; nnz];
        for (r, c, v) in self.iter() {
            let dest = next[c];
            col_indices[dest] = r;
            slots[dest] = Some(v.clone());
            next[c] += 1;
        }

        Self::from_parts_unchecked(
            row_pointers,
            col_indices,
            slots.into_iter().flatten().collect(),
            (ncols, nrows),
        )
    }

    /// Short alias for [`CsrMatrix::transpose`]
    #[inline]
    pub fn t(&self) -> Self {
        self.transpose()
    }

    /// Merge duplicate entries within each row using `combine`
    pub fn coalesce_with<F>(&self, mut combine: F) -> Self
    where
        F: FnMut(&T, &T) -> T,
    {
        let mut row_pointers = Vec::with_capacity(self.nrows() + 1);
        let mut col_indices: Vec<usize> = Vec::with_capacity(self.nnz());
        let mut values: Vec<T> = Vec::with_capacity(self.nnz());
        row_pointers.push(0);

        for row in 0..self.nrows() {
            let row_start = values.len();
            for k in self.row_pointers[row]..self.row_pointers[row + 1] {
                let col = self.col_indices[k];
                let duplicate = values.len() > row_start && col_indices.last() == Some(&col);
                match values.last_mut() {
                    Some(acc) if duplicate => *acc = combine(acc, &self.values[k]),
                    _ => {
                        col_indices.push(col);
                        values.push(self.values[k].clone());
                    }
                }
            }
            row_pointers.push(values.len());
        }

        Self::from_parts_unchecked(row_pointers, col_indices, values, self.shape)
    }
}

impl<T: Semiring> CsrMatrix<T> {
    /// `size × size` identity
    pub fn identity(size: usize) -> Self {
        Self::from_parts_unchecked(
            (0..=size).collect(),
            (0..size).collect(),
            vec![T::one(); size],
            (size, size),
        )
    }

    /// Merge duplicate entries by addition
    pub fn coalesce(&self) -> Self {
        self.coalesce_with(|a, b| a.add(b))
    }

    /// Copy without explicit zeros
    pub fn drop_zeros(&self) -> Self {
        let mut row_pointers = Vec::with_capacity(self.nrows() + 1);
        let mut col_indices = Vec::with_capacity(self.nnz());
        let mut values = Vec::with_capacity(self.nnz());
        row_pointers.push(0);
        for row in 0..self.nrows() {
            for k in self.row_pointers[row]..self.row_pointers[row + 1] {
                if !self.values[k].is_zero() {
                    col_indices.push(self.col_indices[k]);
                    values.push(self.values[k].clone());
                }
            }
            row_pointers.push(values.len());
        }
        Self::from_parts_unchecked(row_pointers, col_indices, values, self.shape)
    }

    /// Value at `(row, col)`; duplicates are summed, absent entries read as zero
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `(row, col)` lies outside the shape.
    ///
    /// # Complexity
    ///
    /// O(log nnz_row)
    pub fn get(&self, row: usize, col: usize) -> SparseResult<T> {
        self.check_index(row, col)?;
        Ok(self.values[self.entry_range(row, col)]
            .iter()
            .fold(T::zero(), |acc, v| acc.add(v)))
    }

    /// Copy with `(row, col)` set to `value`
    ///
    /// Replaces every entry stored at the coordinate; setting zero removes it.
    pub fn set(&self, value: T, row: usize, col: usize) -> SparseResult<Self> {
        self.check_index(row, col)?;
        let range = self.entry_range(row, col);
        let inserted = usize::from(!value.is_zero());
        let removed = range.len();

        let mut col_indices = Vec::with_capacity(self.nnz() + inserted - removed);
        let mut values = Vec::with_capacity(self.nnz() + inserted - removed);
        col_indices.extend_from_slice(&self.col_indices[..range.start]);
        values.extend_from_slice(&self.values[..range.start]);
        if inserted == 1 {
            col_indices.push(col);
            values.push(value);
        }
        col_indices.extend_from_slice(&self.col_indices[range.end..]);
        values.extend_from_slice(&self.values[range.end..]);

        let row_pointers = self
            .row_pointers
            .iter()
            .enumerate()
            .map(|(i, &p)| if i <= row { p } else { p + inserted - removed })
            .collect();

        Ok(Self::from_parts_unchecked(
            row_pointers,
            col_indices,
            values,
            self.shape,
        ))
    }

    /// Multiply every stored value by `factor`
    pub fn scale(&self, factor: &T) -> Self {
        let mut out = self.clone();
        for v in out.values.iter_mut() {
            *v = v.mul(factor);
        }
        out
    }

    /// Convert to dense matrix
    ///
    /// Like [`CooMatrix::to_dense`], a later duplicate overwrites an earlier one.
    pub fn to_dense(&self) -> Array2<T> {
        let mut dense = Array2::from_elem(self.shape, T::zero());
        for (r, c, v) in self.iter() {
            dense[[r, c]] = v.clone();
        }
        dense
    }

    /// Sparse copy of a dense matrix keeping entries that are not zero
    pub fn from_dense(dense: &ArrayView2<T>) -> Self {
        let (nrows, ncols) = dense.dim();
        let mut row_pointers = Vec::with_capacity(nrows + 1);
        let mut col_indices = Vec::new();
        let mut values = Vec::new();
        row_pointers.push(0);

        for row in dense.rows() {
            for (c, v) in row.iter().enumerate() {
                if !v.is_zero() {
                    col_indices.push(c);
                    values.push(v.clone());
                }
            }
            row_pointers.push(values.len());
        }

        Self::from_parts_unchecked(row_pointers, col_indices, values, (nrows, ncols))
    }

    /// Elementwise division by another sparse matrix
    ///
    /// # Errors
    ///
    /// Always `UnsupportedOperation`: the quotient is undefined wherever the divisor stores
    /// no entry.
    pub fn div(&self, _other: &Self) -> SparseResult<Self> {
        Err(SparseError::unsupported("div", "CsrMatrix"))
    }
}

impl<T: Clone> CooMatrix<T> {
    /// Convert to CSR format, see [`CsrMatrix::from_coo`]
    pub fn to_csr(&self) -> CsrMatrix<T> {
        CsrMatrix::from_coo(self)
    }
}
