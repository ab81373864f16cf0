//! Zero-copy iterators over sparse containers
//!
//! Named iterator types back the `iter()` methods of [`CooMatrix`], [`CsrMatrix`] and
//! [`CooVector`], and the [`SparseIterator`] / [`RowIterator`] traits give generic code one
//! way to walk any sparse matrix.
//!
//! All iterators yield *stored* entries, explicit zeros and duplicates included, in storage
//! order. CSR storage order is row-major.
//!
//! # Examples
//!
//! ```
//! use ringmat_sparse::{CooMatrix, iterators::{RowIterator, SparseIterator}};
//!
//! let coo = CooMatrix::new(vec![0, 0, 1], vec![0, 2, 1], vec![1.0, 2.0, 3.0], (2, 3)).unwrap();
//! let csr = coo.to_csr();
//!
//! let total: f64 = csr.iter_entries().map(|(_, _, v)| *v).sum();
//! assert_eq!(total, 6.0);
//!
//! for (row, entries) in csr.iter_rows() {
//!     for (col, value) in entries {
//!         assert_eq!(coo.get(row, col).unwrap(), *value);
//!     }
//! }
//! ```

use crate::{CooMatrix, CooVector, CsrMatrix};

// ============================================================================
// Traits
// ============================================================================

/// Iteration over the stored entries of a sparse matrix
pub trait SparseIterator<T> {
    /// Iterator type that yields (row, col, value) tuples
    type Iter<'a>: Iterator<Item = (usize, usize, &'a T)>
    where
        T: 'a,
        Self: 'a;

    /// Iterate over all stored entries
    ///
    /// # Complexity
    /// - Iteration: O(nnz)
    /// - Memory: O(1) per step
    fn iter_entries(&self) -> Self::Iter<'_>;
}

/// Row-wise iteration over a sparse matrix
pub trait RowIterator<T> {
    /// Row view type
    type RowView<'a>: Iterator<Item = (usize, &'a T)>
    where
        T: 'a,
        Self: 'a;

    /// Iterator over rows
    type Rows<'a>: Iterator<Item = (usize, Self::RowView<'a>)>
    where
        T: 'a,
        Self: 'a;

    /// Iterate over all rows as `(row_index, (col, value) iterator)`
    fn iter_rows(&self) -> Self::Rows<'_>;

    /// Iterator over one row, `None` if `row` is out of range
    fn row_iter(&self, row: usize) -> Option<Self::RowView<'_>>;
}

// ============================================================================
// COO
// ============================================================================

/// Stored entries of a [`CooMatrix`]
#[derive(Clone)]
pub struct CooEntries<'a, T> {
    rows: &'a [usize],
    cols: &'a [usize],
    values: &'a [T],
    current_idx: usize,
}

impl<'a, T> CooEntries<'a, T> {
    pub(crate) fn new(rows: &'a [usize], cols: &'a [usize], values: &'a [T]) -> Self {
        Self {
            rows,
            cols,
            values,
            current_idx: 0,
        }
    }
}

impl<'a, T> Iterator for CooEntries<'a, T> {
    type Item = (usize, usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current_idx;
        let value = self.values.get(idx)?;
        self.current_idx += 1;
        Some((self.rows[idx], self.cols[idx], value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.values.len() - self.current_idx;
        (remaining, Some(remaining))
    }
}

impl<'a, T> ExactSizeIterator for CooEntries<'a, T> {}

impl<T> SparseIterator<T> for CooMatrix<T> {
    type Iter<'a>
        = CooEntries<'a, T>
    where
        T: 'a;

    fn iter_entries(&self) -> Self::Iter<'_> {
        self.iter()
    }
}

/// Stored entries of a [`CooVector`]
#[derive(Clone)]
pub struct CooVectorEntries<'a, T> {
    indices: &'a [usize],
    values: &'a [T],
}

impl<'a, T> CooVectorEntries<'a, T> {
    pub(crate) fn new(indices: &'a [usize], values: &'a [T]) -> Self {
        Self { indices, values }
    }
}

impl<'a, T> Iterator for CooVectorEntries<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let (&index, indices) = self.indices.split_first()?;
        let (value, values) = self.values.split_first()?;
        self.indices = indices;
        self.values = values;
        Some((index, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.indices.len(), Some(self.indices.len()))
    }
}

impl<'a, T> ExactSizeIterator for CooVectorEntries<'a, T> {}

// ============================================================================
// CSR
// ============================================================================

/// Stored entries of a [`CsrMatrix`] in row-major order
#[derive(Clone)]
pub struct CsrEntries<'a, T> {
    row_pointers: &'a [usize],
    col_indices: &'a [usize],
    values: &'a [T],
    current_row: usize,
    current_idx: usize,
}

impl<'a, T> CsrEntries<'a, T> {
    pub(crate) fn new(
        row_pointers: &'a [usize],
        col_indices: &'a [usize],
        values: &'a [T],
    ) -> Self {
        Self {
            row_pointers,
            col_indices,
            values,
            current_row: 0,
            current_idx: 0,
        }
    }
}

impl<'a, T> Iterator for CsrEntries<'a, T> {
    type Item = (usize, usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_row + 1 < self.row_pointers.len() {
            if self.current_idx < self.row_pointers[self.current_row + 1] {
                let idx = self.current_idx;
                self.current_idx += 1;
                return Some((self.current_row, self.col_indices[idx], &self.values[idx]));
            }
            self.current_row += 1;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.values.len() - self.current_idx;
        (remaining, Some(remaining))
    }
}

impl<'a, T> ExactSizeIterator for CsrEntries<'a, T> {}

/// Entries of a single CSR row as `(col, &value)`
#[derive(Clone)]
pub struct CsrRowIter<'a, T> {
    inner: CooVectorEntries<'a, T>,
}

impl<'a, T> Iterator for CsrRowIter<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for CsrRowIter<'a, T> {}

/// All rows of a CSR matrix, empty rows included
pub struct CsrRowsIter<'a, T> {
    matrix: &'a CsrMatrix<T>,
    current_row: usize,
}

impl<'a, T> Iterator for CsrRowsIter<'a, T> {
    type Item = (usize, CsrRowIter<'a, T>);

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.current_row;
        let iter = self.matrix.row_iter(row)?;
        self.current_row += 1;
        Some((row, iter))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.matrix.nrows() - self.current_row;
        (remaining, Some(remaining))
    }
}

impl<'a, T> ExactSizeIterator for CsrRowsIter<'a, T> {}

impl<T> SparseIterator<T> for CsrMatrix<T> {
    type Iter<'a>
        = CsrEntries<'a, T>
    where
        T: 'a;

    fn iter_entries(&self) -> Self::Iter<'_> {
        self.iter()
    }
}

impl<T> RowIterator<T> for CsrMatrix<T> {
    type RowView<'a>
        = CsrRowIter<'a, T>
    where
        T: 'a;
    type Rows<'a>
        = CsrRowsIter<'a, T>
    where
        T: 'a;

    fn iter_rows(&self) -> Self::Rows<'_> {
        CsrRowsIter {
            matrix: self,
            current_row: 0,
        }
    }

    fn row_iter(&self, row: usize) -> Option<Self::RowView<'_>> {
        let (cols, values) = self.row(row)?;
        Some(CsrRowIter {
            inner: CooVectorEntries::new(cols, values),
        })
    }
}
