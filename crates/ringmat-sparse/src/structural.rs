//! # Structural operations
//!
//! Row/column extraction, slicing, concatenation, row and column replacement or removal,
//! triangular parts, reshaping and structural predicates for [`CooMatrix`], plus the
//! extraction and concatenation subset for [`CsrMatrix`].
//!
//! All operations return new containers. COO results are sorted row-major: entries are
//! gathered (with an index shift for appended operands) and then sorted.
//!
//! ## Examples
//!
//! ```
//! use ringmat_sparse::CooMatrix;
//!
//! let a = CooMatrix::new(vec![0, 1], vec![0, 1], vec![1, 2], (2, 2)).unwrap();
//! let b = CooMatrix::new(vec![0], vec![1], vec![3], (1, 2)).unwrap();
//!
//! let stacked = a.stack(&b).unwrap();
//! assert_eq!(stacked.shape(), (3, 2));
//! assert_eq!(stacked.get(2, 1).unwrap(), 3);
//!
//! let row = stacked.get_row(1).unwrap();
//! assert_eq!(row.indices(), &[1]);
//! ```

use std::ops::Range;

use ringmat_core::{Semiring, Shape, ShapeError};

use crate::coo::CooMatrix;
use crate::csr::CsrMatrix;
use crate::error::{SparseError, SparseResult};
use crate::sort;
use crate::vector::CooVector;

fn concat_error(axis: usize, expected: usize, got: usize) -> SparseError {
    SparseError::Shape(ShapeError::Concat {
        axis,
        expected,
        got,
    })
}

fn check_range(range: &Range<usize>, bound: usize, shape: (usize, usize)) -> SparseResult<()> {
    if range.start > range.end {
        return Err(SparseError::invalid_argument(format!(
            "invalid range {}..{}",
            range.start, range.end
        )));
    }
    if range.end > bound {
        return Err(SparseError::index_out_of_range(&[range.end], shape));
    }
    Ok(())
}

/// `a + b` for dimension sizes
fn checked_extent(a: usize, b: usize) -> SparseResult<usize> {
    a.checked_add(b).ok_or_else(|| {
        SparseError::invalid_argument(format!("dimension {} + {} overflows usize", a, b))
    })
}

/// `nrows * ncols`
fn checked_entries(shape: (usize, usize)) -> SparseResult<usize> {
    Shape::from(shape).total_entries().ok_or_else(|| {
        SparseError::invalid_argument(format!(
            "shape {}x{} has more entries than usize can index",
            shape.0, shape.1
        ))
    })
}

/// Sort gathered entries and wrap them as a matrix
fn sorted_coo<T>(
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<T>,
    shape: (usize, usize),
) -> CooMatrix<T> {
    let (values, rows, cols) = sort::sort_matrix_entries(values, rows, cols);
    CooMatrix::from_parts_unchecked(rows, cols, values, shape)
}

/// Sort gathered entries and wrap them as a vector
fn sorted_vector<T>(indices: Vec<usize>, values: Vec<T>, size: usize) -> CooVector<T> {
    let (values, indices) = sort::sort_vector_entries(values, indices);
    CooVector::from_parts_unchecked(indices, values, size)
}

// ============================================================================
// COO
// ============================================================================

impl<T: Clone> CooMatrix<T> {
    /// Entries selected by `keep`, with coordinates remapped by `map`
    fn filter_map_entries<F>(&self, shape: (usize, usize), mut f: F) -> CooMatrix<T>
    where
        F: FnMut(usize, usize) -> Option<(usize, usize)>,
    {
        let mut rows = Vec::new();
        let mut cols = Vec::new();
        let mut values = Vec::new();
        for (r, c, v) in self.iter() {
            if let Some((nr, nc)) = f(r, c) {
                rows.push(nr);
                cols.push(nc);
                values.push(v.clone());
            }
        }
        sorted_coo(rows, cols, values, shape)
    }

    /// Row `row` as a sparse vector of length `ncols`
    pub fn get_row(&self, row: usize) -> SparseResult<CooVector<T>> {
        if row >= self.nrows() {
            return Err(SparseError::index_out_of_range(&[row], self.shape()));
        }
        let (indices, values) = self
            .iter()
            .filter(|&(r, _, _)| r == row)
            .map(|(_, c, v)| (c, v.clone()))
            .unzip();
        Ok(sorted_vector(indices, values, self.ncols()))
    }

    /// Column `col` as a sparse vector of length `nrows`
    pub fn get_col(&self, col: usize) -> SparseResult<CooVector<T>> {
        if col >= self.ncols() {
            return Err(SparseError::index_out_of_range(&[0, col], self.shape()));
        }
        let (indices, values) = self
            .iter()
            .filter(|&(_, c, _)| c == col)
            .map(|(r, _, v)| (r, v.clone()))
            .unzip();
        Ok(sorted_vector(indices, values, self.nrows()))
    }

    /// Sub-matrix covering `rows × cols` (half-open ranges)
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a reversed range, `IndexOutOfRange` if a range ends past the
    /// matrix.
    pub fn get_slice(&self, rows: Range<usize>, cols: Range<usize>) -> SparseResult<Self> {
        check_range(&rows, self.nrows(), self.shape())?;
        check_range(&cols, self.ncols(), self.shape())?;
        let shape = (rows.end - rows.start, cols.end - cols.start);
        Ok(self.filter_map_entries(shape, |r, c| {
            (rows.contains(&r) && cols.contains(&c)).then(|| (r - rows.start, c - cols.start))
        }))
    }

    /// Main diagonal as a sparse vector of length `min(nrows, ncols)`
    pub fn get_diag(&self) -> CooVector<T> {
        let (indices, values) = self
            .iter()
            .filter(|&(r, c, _)| r == c)
            .map(|(r, _, v)| (r, v.clone()))
            .unzip();
        sorted_vector(indices, values, self.nrows().min(self.ncols()))
    }

    /// Stack `other` below `self`
    ///
    /// # Errors
    ///
    /// `ShapeError::Concat` if the column counts differ.
    pub fn stack(&self, other: &Self) -> SparseResult<Self> {
        if self.ncols() != other.ncols() {
            return Err(concat_error(0, self.ncols(), other.ncols()));
        }
        let shift = self.nrows();
        let rows = self
            .row_indices()
            .iter()
            .copied()
            .chain(other.row_indices().iter().map(|&r| r + shift))
            .collect();
        let cols = [self.col_indices(), other.col_indices()].concat();
        let values = [self.values(), other.values()].concat();
        let nrows = checked_extent(self.nrows(), other.nrows())?;
        Ok(sorted_coo(rows, cols, values, (nrows, self.ncols())))
    }

    /// Append `other` to the right of `self`
    ///
    /// # Errors
    ///
    /// `ShapeError::Concat` if the row counts differ.
    pub fn augment(&self, other: &Self) -> SparseResult<Self> {
        if self.nrows() != other.nrows() {
            return Err(concat_error(1, self.nrows(), other.nrows()));
        }
        let shift = self.ncols();
        let rows = [self.row_indices(), other.row_indices()].concat();
        let cols = self
            .col_indices()
            .iter()
            .copied()
            .chain(other.col_indices().iter().map(|&c| c + shift))
            .collect();
        let values = [self.values(), other.values()].concat();
        let ncols = checked_extent(self.ncols(), other.ncols())?;
        Ok(sorted_coo(rows, cols, values, (self.nrows(), ncols)))
    }

    /// Append `column` as a new last column
    pub fn augment_vector(&self, column: &CooVector<T>) -> SparseResult<Self> {
        if self.nrows() != column.size() {
            return Err(concat_error(1, self.nrows(), column.size()));
        }
        let new_col = self.ncols();
        let rows = [self.row_indices(), column.indices()].concat();
        let cols = self
            .col_indices()
            .iter()
            .copied()
            .chain(std::iter::repeat(new_col).take(column.nnz()))
            .collect();
        let values = [self.values(), column.values()].concat();
        let ncols = checked_extent(new_col, 1)?;
        Ok(sorted_coo(rows, cols, values, (self.nrows(), ncols)))
    }

    /// Block-diagonal matrix with `self` in the top-left and `other` in the bottom-right
    ///
    /// The result has shape `(m1 + m2, n1 + n2)`; both off-diagonal blocks are empty.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if a combined dimension overflows `usize`.
    pub fn direct_sum(&self, other: &Self) -> SparseResult<Self> {
        let shape = (
            checked_extent(self.nrows(), other.nrows())?,
            checked_extent(self.ncols(), other.ncols())?,
        );
        let (row_shift, col_shift) = self.shape();
        let rows = self
            .row_indices()
            .iter()
            .copied()
            .chain(other.row_indices().iter().map(|&r| r + row_shift))
            .collect();
        let cols = self
            .col_indices()
            .iter()
            .copied()
            .chain(other.col_indices().iter().map(|&c| c + col_shift))
            .collect();
        let values = [self.values(), other.values()].concat();
        Ok(sorted_coo(rows, cols, values, shape))
    }

    /// Replace row `row` with the entries of `values`
    ///
    /// Every stored entry of the old row is discarded, including explicit zeros.
    pub fn set_row(&self, row: usize, values: &CooVector<T>) -> SparseResult<Self> {
        if row >= self.nrows() {
            return Err(SparseError::index_out_of_range(&[row], self.shape()));
        }
        if values.size() != self.ncols() {
            return Err(SparseError::elementwise(
                Shape::vector(self.ncols()),
                Shape::vector(values.size()),
            ));
        }
        let kept = self.iter().filter(|&(r, _, _)| r != row);
        let (mut rows, mut cols, mut vals) = unzip3(kept);
        for (c, v) in values.iter() {
            rows.push(row);
            cols.push(c);
            vals.push(v.clone());
        }
        Ok(sorted_coo(rows, cols, vals, self.shape()))
    }

    /// Replace column `col` with the entries of `values`
    pub fn set_col(&self, col: usize, values: &CooVector<T>) -> SparseResult<Self> {
        if col >= self.ncols() {
            return Err(SparseError::index_out_of_range(&[0, col], self.shape()));
        }
        if values.size() != self.nrows() {
            return Err(SparseError::elementwise(
                Shape::vector(self.nrows()),
                Shape::vector(values.size()),
            ));
        }
        let kept = self.iter().filter(|&(_, c, _)| c != col);
        let (mut rows, mut cols, mut vals) = unzip3(kept);
        for (r, v) in values.iter() {
            rows.push(r);
            cols.push(col);
            vals.push(v.clone());
        }
        Ok(sorted_coo(rows, cols, vals, self.shape()))
    }

    /// Overwrite the block starting at `(row, col)` with `block`
    ///
    /// Entries of `self` inside the block are discarded.
    pub fn set_slice(&self, block: &Self, row: usize, col: usize) -> SparseResult<Self> {
        let ends = (
            row.checked_add(block.nrows()),
            col.checked_add(block.ncols()),
        );
        let (row_end, col_end) = match ends {
            (Some(r), Some(c)) if r <= self.nrows() && c <= self.ncols() => (r, c),
            _ => return Err(SparseError::index_out_of_range(&[row, col], self.shape())),
        };
        let inside =
            |r: usize, c: usize| (row..row_end).contains(&r) && (col..col_end).contains(&c);
        let kept = self.iter().filter(|&(r, c, _)| !inside(r, c));
        let (mut rows, mut cols, mut vals) = unzip3(kept);
        for (r, c, v) in block.iter() {
            rows.push(r + row);
            cols.push(c + col);
            vals.push(v.clone());
        }
        Ok(sorted_coo(rows, cols, vals, self.shape()))
    }

    /// Remove row `row`, shifting later rows up
    pub fn remove_row(&self, row: usize) -> SparseResult<Self> {
        self.remove_rows(&[row])
    }

    /// Remove every row listed in `rows`
    ///
    /// Repeated indices are removed once.
    pub fn remove_rows(&self, rows: &[usize]) -> SparseResult<Self> {
        let shift = removal_map(rows, self.nrows(), self.shape())?;
        let removed = self.nrows() - shift.iter().filter(|s| s.is_some()).count();
        let shape = (self.nrows() - removed, self.ncols());
        Ok(self.filter_map_entries(shape, |r, c| shift[r].map(|nr| (nr, c))))
    }

    /// Remove column `col`, shifting later columns left
    pub fn remove_col(&self, col: usize) -> SparseResult<Self> {
        self.remove_cols(&[col])
    }

    /// Remove every column listed in `cols`
    pub fn remove_cols(&self, cols: &[usize]) -> SparseResult<Self> {
        let shift = removal_map(cols, self.ncols(), self.shape())?;
        let removed = self.ncols() - shift.iter().filter(|s| s.is_some()).count();
        let shape = (self.nrows(), self.ncols() - removed);
        Ok(self.filter_map_entries(shape, |r, c| shift[c].map(|nc| (r, nc))))
    }

    /// Exchange rows `a` and `b`
    pub fn swap_rows(&self, a: usize, b: usize) -> SparseResult<Self> {
        if a >= self.nrows() || b >= self.nrows() {
            return Err(SparseError::index_out_of_range(&[a.max(b)], self.shape()));
        }
        let swap = |i: usize| if i == a { b } else if i == b { a } else { i };
        Ok(self.filter_map_entries(self.shape(), |r, c| Some((swap(r), c))))
    }

    /// Exchange columns `a` and `b`
    pub fn swap_cols(&self, a: usize, b: usize) -> SparseResult<Self> {
        if a >= self.ncols() || b >= self.ncols() {
            return Err(SparseError::index_out_of_range(&[0, a.max(b)], self.shape()));
        }
        let swap = |i: usize| if i == a { b } else if i == b { a } else { i };
        Ok(self.filter_map_entries(self.shape(), |r, c| Some((r, swap(c)))))
    }

    /// Upper triangular part on or above diagonal `k`
    ///
    /// `k = 0` is the main diagonal, `k > 0` above it, `k < 0` below it.
    pub fn tri_u(&self, k: isize) -> Self {
        self.filter_map_entries(self.shape(), |r, c| {
            (c as isize - r as isize >= k).then_some((r, c))
        })
    }

    /// Lower triangular part on or below diagonal `k`
    pub fn tri_l(&self, k: isize) -> Self {
        self.filter_map_entries(self.shape(), |r, c| {
            (c as isize - r as isize <= k).then_some((r, c))
        })
    }

    /// Reinterpret the row-major layout with a new shape
    ///
    /// # Errors
    ///
    /// `ShapeError::Reshape` if the total entry count changes.
    pub fn reshape(&self, shape: (usize, usize)) -> SparseResult<Self> {
        let from = Shape::from(self.shape());
        let to = Shape::from(shape);
        if from.total_entries().is_none() || from.total_entries() != to.total_entries() {
            return Err(SparseError::Shape(ShapeError::Reshape { from, to }));
        }
        let strides = from.strides();
        Ok(self.filter_map_entries(shape, |r, c| {
            let flat = r * strides[0] + c * strides[1];
            Some((flat / shape.1, flat % shape.1))
        }))
    }

    /// Flatten to a single row
    pub fn flatten(&self) -> SparseResult<Self> {
        self.flatten_axis(1)
    }

    /// Flatten to a single column (`axis = 0`) or a single row (`axis = 1`)
    pub fn flatten_axis(&self, axis: usize) -> SparseResult<Self> {
        let total = checked_entries(self.shape())?;
        match axis {
            0 => self.reshape((total, 1)),
            1 => self.reshape((1, total)),
            _ => Err(SparseError::invalid_argument(format!(
                "axis must be 0 or 1, got {}",
                axis
            ))),
        }
    }

    /// Row-major flattening into a sparse vector of length `nrows * ncols`
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `nrows * ncols` overflows `usize`.
    pub fn to_vector(&self) -> SparseResult<CooVector<T>> {
        let size = checked_entries(self.shape())?;
        let shape = Shape::from(self.shape());
        let mut indices = Vec::with_capacity(self.nnz());
        let mut values = Vec::with_capacity(self.nnz());
        for (r, c, v) in self.iter() {
            indices.push(shape.flat_index(&[r, c])?);
            values.push(v.clone());
        }
        Ok(sorted_vector(indices, values, size))
    }
}

impl<T: Semiring> CooMatrix<T> {
    /// True if every non-zero lies on or above the main diagonal
    pub fn is_tri_u(&self) -> bool {
        self.iter().all(|(r, c, v)| r <= c || v.is_zero())
    }

    /// True if every non-zero lies on or below the main diagonal
    pub fn is_tri_l(&self) -> bool {
        self.iter().all(|(r, c, v)| r >= c || v.is_zero())
    }

    /// True for a square matrix equal to the identity
    ///
    /// Duplicates are summed before the check.
    pub fn is_identity(&self) -> bool {
        if self.nrows() != self.ncols() {
            return false;
        }
        let coalesced = self.coalesce();
        let mut ones = 0;
        for (r, c, v) in coalesced.iter() {
            if r == c && v.is_one() {
                ones += 1;
            } else if !v.is_zero() {
                return false;
            }
        }
        ones == self.nrows()
    }

    /// True for a square matrix equal to its transpose
    ///
    /// Duplicates are summed before the check.
    pub fn is_symmetric(&self) -> bool {
        if self.nrows() != self.ncols() {
            return false;
        }
        let coalesced = self.coalesce();
        coalesced == coalesced.transpose()
    }
}

fn unzip3<'a, T: Clone + 'a>(
    entries: impl Iterator<Item = (usize, usize, &'a T)>,
) -> (Vec<usize>, Vec<usize>, Vec<T>) {
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    let mut vals = Vec::new();
    for (r, c, v) in entries {
        rows.push(r);
        cols.push(c);
        vals.push(v.clone());
    }
    (rows, cols, vals)
}

/// For each index in `0..len`, its new position after removing `removed`, or `None`
fn removal_map(
    removed: &[usize],
    len: usize,
    shape: (usize, usize),
) -> SparseResult<Vec<Option<usize>>> {
    let mut keep = vec![true; len];
    for &i in removed {
        if i >= len {
            return Err(SparseError::index_out_of_range(&[i], shape));
        }
        keep[i] = false;
    }
    let mut next = 0;
    Ok(keep
        .into_iter()
        .map(|k| {
            k.then(|| {
                next += 1;
                next - 1
            })
        })
        .collect())
}

// ============================================================================
// CSR
// ============================================================================

impl<T: Clone> CsrMatrix<T> {
    /// Row `row` as a sparse vector of length `ncols`
    pub fn get_row(&self, row: usize) -> SparseResult<CooVector<T>> {
        let (cols, values) = self
            .row(row)
            .ok_or_else(|| SparseError::index_out_of_range(&[row], self.shape()))?;
        Ok(CooVector::from_parts_unchecked(
            cols.to_vec(),
            values.to_vec(),
            self.ncols(),
        ))
    }

    /// Column `col` as a sparse vector of length `nrows`
    ///
    /// Binary search within each row; O(nrows × log(avg_nnz_row)).
    pub fn get_col(&self, col: usize) -> SparseResult<CooVector<T>> {
        if col >= self.ncols() {
            return Err(SparseError::index_out_of_range(&[0, col], self.shape()));
        }
        let mut indices = Vec::new();
        let mut values = Vec::new();
        for r in 0..self.nrows() {
            let (cols, vals) = self.row_slices(r);
            let start = cols.partition_point(|&c| c < col);
            for (&c, v) in cols[start..].iter().zip(&vals[start..]) {
                if c != col {
                    break;
                }
                indices.push(r);
                values.push(v.clone());
            }
        }
        Ok(CooVector::from_parts_unchecked(indices, values, self.nrows()))
    }

    /// Sub-matrix covering `rows × cols` (half-open ranges)
    pub fn get_slice(&self, rows: Range<usize>, cols: Range<usize>) -> SparseResult<Self> {
        check_range(&rows, self.nrows(), self.shape())?;
        check_range(&cols, self.ncols(), self.shape())?;

        let mut row_pointers = Vec::with_capacity(rows.len() + 1);
        let mut col_indices = Vec::new();
        let mut values = Vec::new();
        row_pointers.push(0);
        for r in rows.clone() {
            let (row_cols, row_vals) = self.row_slices(r);
            let start = row_cols.partition_point(|&c| c < cols.start);
            let end = row_cols.partition_point(|&c| c < cols.end);
            col_indices.extend(row_cols[start..end].iter().map(|&c| c - cols.start));
            values.extend_from_slice(&row_vals[start..end]);
            row_pointers.push(values.len());
        }
        Ok(Self::from_parts_unchecked(
            row_pointers,
            col_indices,
            values,
            (rows.len(), cols.len()),
        ))
    }

    /// Stack `other` below `self`
    pub fn stack(&self, other: &Self) -> SparseResult<Self> {
        if self.ncols() != other.ncols() {
            return Err(concat_error(0, self.ncols(), other.ncols()));
        }
        let offset = self.nnz();
        let row_pointers = self
            .row_pointers()
            .iter()
            .copied()
            .chain(other.row_pointers()[1..].iter().map(|&p| p + offset))
            .collect();
        let nrows = checked_extent(self.nrows(), other.nrows())?;
        Ok(Self::from_parts_unchecked(
            row_pointers,
            [self.col_indices(), other.col_indices()].concat(),
            [self.values(), other.values()].concat(),
            (nrows, self.ncols()),
        ))
    }

    /// Append `other` to the right of `self`
    ///
    /// Rows stay sorted since every shifted column of `other` exceeds the columns of `self`.
    pub fn augment(&self, other: &Self) -> SparseResult<Self> {
        if self.nrows() != other.nrows() {
            return Err(concat_error(1, self.nrows(), other.nrows()));
        }
        let ncols = checked_extent(self.ncols(), other.ncols())?;
        let shift = self.ncols();
        let mut row_pointers = Vec::with_capacity(self.nrows() + 1);
        let mut col_indices = Vec::with_capacity(self.nnz() + other.nnz());
        let mut values = Vec::with_capacity(self.nnz() + other.nnz());
        row_pointers.push(0);
        for r in 0..self.nrows() {
            let (a_cols, a_vals) = self.row_slices(r);
            let (b_cols, b_vals) = other.row_slices(r);
            col_indices.extend_from_slice(a_cols);
            col_indices.extend(b_cols.iter().map(|&c| c + shift));
            values.extend_from_slice(a_vals);
            values.extend_from_slice(b_vals);
            row_pointers.push(values.len());
        }
        Ok(Self::from_parts_unchecked(
            row_pointers,
            col_indices,
            values,
            (self.nrows(), ncols),
        ))
    }

    /// Block-diagonal matrix with `self` in the top-left and `other` in the bottom-right
    ///
    /// Rows of `self` keep their segments; rows of `other` follow with shifted pointers and
    /// columns.
    pub fn direct_sum(&self, other: &Self) -> SparseResult<Self> {
        let shape = (
            checked_extent(self.nrows(), other.nrows())?,
            checked_extent(self.ncols(), other.ncols())?,
        );
        let offset = self.nnz();
        let col_shift = self.ncols();
        let row_pointers = self
            .row_pointers()
            .iter()
            .copied()
            .chain(other.row_pointers()[1..].iter().map(|&p| p + offset))
            .collect();
        let col_indices = self
            .col_indices()
            .iter()
            .copied()
            .chain(other.col_indices().iter().map(|&c| c + col_shift))
            .collect();
        Ok(Self::from_parts_unchecked(
            row_pointers,
            col_indices,
            [self.values(), other.values()].concat(),
            shape,
        ))
    }

    fn row_slices(&self, r: usize) -> (&[usize], &[T]) {
        let range = self.row_pointers()[r]..self.row_pointers()[r + 1];
        (&self.col_indices()[range.clone()], &self.values()[range])
    }
}
