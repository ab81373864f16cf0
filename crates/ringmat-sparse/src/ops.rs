//! Element-wise arithmetic for sparse containers
//!
//! # Operations
//!
//! - **Union merges**: `add`, `sub` between two sparse operands of equal shape. Entries
//!   present in one operand only are carried over (negated on the right of `sub`).
//! - **Intersection merges**: `elem_mult` (Hadamard product). Operands are coalesced first,
//!   so only coordinates stored in both survive.
//! - **Dense operands**: `add_dense` / `sub_dense` produce dense results; `elem_mult_dense`
//!   and `elem_div_dense` keep the sparse structure.
//!
//! Merges walk both operands in row-major order and emit row-major output. Duplicate
//! coordinates are paired off one at a time, so sums of duplicates are preserved.
//!
//! Subtraction requires [`Ring`] and division [`Field`]; element-wise division between two
//! sparse matrices is rejected at run time because it is undefined off the divisor's support.
//!
//! # Examples
//!
//! ```
//! use ringmat_sparse::CooMatrix;
//!
//! let a = CooMatrix::new(vec![0, 1], vec![0, 1], vec![1, 2], (2, 2)).unwrap();
//! let b = CooMatrix::new(vec![0, 1], vec![1, 1], vec![5, 3], (2, 2)).unwrap();
//!
//! let sum = a.add(&b).unwrap();
//! assert_eq!(sum.get(1, 1).unwrap(), 5);
//! assert_eq!(sum.nnz(), 3);
//!
//! let diff = a.sub(&b).unwrap();
//! assert_eq!(diff.get(0, 1).unwrap(), -5);
//!
//! let prod = a.elem_mult(&b).unwrap();
//! assert_eq!(prod.nnz(), 1);
//! assert_eq!(prod.get(1, 1).unwrap(), 6);
//! ```

use std::cmp::Ordering;

use ringmat_core::{Field, Ring, Semiring};
use scirs2_core::ndarray_ext::{Array1, Array2, ArrayView1, ArrayView2};

use crate::coo::CooMatrix;
use crate::csr::CsrMatrix;
use crate::error::{SparseError, SparseResult};
use crate::vector::CooVector;

/// Merge two key-sorted entry lists, keeping keys present in either
///
/// `both` combines a pair sharing a key, `left` and `right` map entries present on one side.
fn merge_union<K, T, F, L, R>(
    a: (&[K], &[T]),
    b: (&[K], &[T]),
    out: (&mut Vec<K>, &mut Vec<T>),
    mut both: F,
    mut left: L,
    mut right: R,
) where
    K: Ord + Copy,
    F: FnMut(&T, &T) -> T,
    L: FnMut(&T) -> T,
    R: FnMut(&T) -> T,
{
    let (a_keys, a_vals) = a;
    let (b_keys, b_vals) = b;
    let (out_keys, out_vals) = out;
    let (mut i, mut j) = (0, 0);

    while i < a_keys.len() || j < b_keys.len() {
        let order = match (a_keys.get(i), b_keys.get(j)) {
            (Some(ka), Some(kb)) => ka.cmp(kb),
            (Some(_), None) => Ordering::Less,
            _ => Ordering::Greater,
        };
        match order {
            Ordering::Less => {
                out_keys.push(a_keys[i]);
                out_vals.push(left(&a_vals[i]));
                i += 1;
            }
            Ordering::Greater => {
                out_keys.push(b_keys[j]);
                out_vals.push(right(&b_vals[j]));
                j += 1;
            }
            Ordering::Equal => {
                out_keys.push(a_keys[i]);
                out_vals.push(both(&a_vals[i], &b_vals[j]));
                i += 1;
                j += 1;
            }
        }
    }
}

/// Merge two key-sorted entry lists, keeping keys present in both
fn merge_intersection<K, T, F>(
    a: (&[K], &[T]),
    b: (&[K], &[T]),
    out: (&mut Vec<K>, &mut Vec<T>),
    mut both: F,
) where
    K: Ord + Copy,
    F: FnMut(&T, &T) -> T,
{
    let (a_keys, a_vals) = a;
    let (b_keys, b_vals) = b;
    let (out_keys, out_vals) = out;
    let (mut i, mut j) = (0, 0);

    while i < a_keys.len() && j < b_keys.len() {
        match a_keys[i].cmp(&b_keys[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out_keys.push(a_keys[i]);
                out_vals.push(both(&a_vals[i], &b_vals[j]));
                i += 1;
                j += 1;
            }
        }
    }
}

// ============================================================================
// COO matrices
// ============================================================================

fn coo_keys<T>(m: &CooMatrix<T>) -> Vec<(usize, usize)> {
    m.row_indices()
        .iter()
        .copied()
        .zip(m.col_indices().iter().copied())
        .collect()
}

fn coo_from_keys<T>(
    keys: Vec<(usize, usize)>,
    values: Vec<T>,
    shape: (usize, usize),
) -> CooMatrix<T> {
    let (rows, cols) = keys.into_iter().unzip();
    CooMatrix::from_parts_unchecked(rows, cols, values, shape)
}

impl<T: Semiring> CooMatrix<T> {
    fn check_same_shape(&self, other_shape: (usize, usize)) -> SparseResult<()> {
        if self.shape() != other_shape {
            return Err(SparseError::elementwise(self.shape(), other_shape));
        }
        Ok(())
    }

    fn union_with<F, R>(&self, other: &Self, both: F, right: R) -> SparseResult<Self>
    where
        F: FnMut(&T, &T) -> T,
        R: FnMut(&T) -> T,
    {
        self.check_same_shape(other.shape())?;
        let a = self.ensure_sorted();
        let b = other.ensure_sorted();
        let (a_keys, b_keys) = (coo_keys(&*a), coo_keys(&*b));

        let mut keys = Vec::with_capacity(a.nnz() + b.nnz());
        let mut values = Vec::with_capacity(a.nnz() + b.nnz());
        merge_union(
            (a_keys.as_slice(), a.values()),
            (b_keys.as_slice(), b.values()),
            (&mut keys, &mut values),
            both,
            T::clone,
            right,
        );
        Ok(coo_from_keys(keys, values, self.shape()))
    }

    /// Element-wise sum with another sparse matrix of the same shape
    ///
    /// # Errors
    ///
    /// `ShapeError::Elementwise` if the shapes differ.
    ///
    /// # Complexity
    ///
    /// O(nnz_a + nnz_b) on sorted operands.
    pub fn add(&self, other: &Self) -> SparseResult<Self> {
        self.union_with(other, |a, b| a.add(b), T::clone)
    }

    /// Element-wise (Hadamard) product with another sparse matrix
    ///
    /// Both operands are coalesced first; the result stores only coordinates present in
    /// both.
    pub fn elem_mult(&self, other: &Self) -> SparseResult<Self> {
        self.check_same_shape(other.shape())?;
        let a = self.coalesce();
        let b = other.coalesce();
        let (a_keys, b_keys) = (coo_keys(&a), coo_keys(&b));

        let mut keys = Vec::new();
        let mut values = Vec::new();
        merge_intersection(
            (a_keys.as_slice(), a.values()),
            (b_keys.as_slice(), b.values()),
            (&mut keys, &mut values),
            |x, y| x.mul(y),
        );
        Ok(coo_from_keys(keys, values, self.shape()))
    }

    /// Element-wise sum with a dense matrix, as a dense matrix
    pub fn add_dense(&self, other: &ArrayView2<T>) -> SparseResult<Array2<T>> {
        self.check_same_shape(other.dim())?;
        let mut out = other.to_owned();
        for (r, c, v) in self.iter() {
            out[[r, c]] = v.add(&out[[r, c]]);
        }
        Ok(out)
    }

    /// Element-wise product with a dense matrix
    ///
    /// Keeps the sparse structure of `self`, including duplicates.
    pub fn elem_mult_dense(&self, other: &ArrayView2<T>) -> SparseResult<Self> {
        self.check_same_shape(other.dim())?;
        let mut out = self.clone();
        for ((&r, &c), v) in self
            .row_indices()
            .iter()
            .zip(self.col_indices())
            .zip(out.values_mut().iter_mut())
        {
            *v = v.mul(&other[[r, c]]);
        }
        Ok(out)
    }
}

impl<T: Ring> CooMatrix<T> {
    /// Element-wise difference `self - other`
    ///
    /// # Errors
    ///
    /// `ShapeError::Elementwise` if the shapes differ.
    pub fn sub(&self, other: &Self) -> SparseResult<Self> {
        self.union_with(other, |a, b| a.sub(b), |b| b.neg())
    }

    /// Element-wise difference with a dense matrix, as a dense matrix
    pub fn sub_dense(&self, other: &ArrayView2<T>) -> SparseResult<Array2<T>> {
        self.check_same_shape(other.dim())?;
        let mut out = other.map(|v| v.neg());
        for (r, c, v) in self.iter() {
            out[[r, c]] = v.add(&out[[r, c]]);
        }
        Ok(out)
    }

    /// Negate every stored value
    pub fn neg(&self) -> Self {
        let mut out = self.clone();
        for v in out.values_mut() {
            *v = v.neg();
        }
        out
    }
}

impl<T: Field> CooMatrix<T> {
    /// Element-wise quotient by a dense matrix
    ///
    /// Only stored entries are divided; division by a zero entry of `other` follows the
    /// value type's convention.
    pub fn elem_div_dense(&self, other: &ArrayView2<T>) -> SparseResult<Self> {
        self.check_same_shape(other.dim())?;
        let mut out = self.clone();
        for ((&r, &c), v) in self
            .row_indices()
            .iter()
            .zip(self.col_indices())
            .zip(out.values_mut().iter_mut())
        {
            *v = v.div(&other[[r, c]]);
        }
        Ok(out)
    }

    /// Element-wise division by another sparse matrix
    ///
    /// # Errors
    ///
    /// Always `InvalidArgument`: the quotient is undefined wherever `other` stores nothing.
    pub fn div(&self, _other: &Self) -> SparseResult<Self> {
        Err(SparseError::invalid_argument(
            "element-wise division by a sparse matrix is undefined off its support",
        ))
    }
}

// ============================================================================
// CSR matrices
// ============================================================================

impl<T: Semiring> CsrMatrix<T> {
    fn check_same_shape(&self, other_shape: (usize, usize)) -> SparseResult<()> {
        if self.shape() != other_shape {
            return Err(SparseError::elementwise(self.shape(), other_shape));
        }
        Ok(())
    }

    /// Row-by-row merge of two CSR matrices of the same shape
    fn merge_rows<M>(&self, other: &Self, mut merge_row: M) -> SparseResult<Self>
    where
        M: FnMut((&[usize], &[T]), (&[usize], &[T]), (&mut Vec<usize>, &mut Vec<T>)),
    {
        self.check_same_shape(other.shape())?;
        let mut row_pointers = Vec::with_capacity(self.nrows() + 1);
        let mut col_indices = Vec::with_capacity(self.nnz() + other.nnz());
        let mut values = Vec::with_capacity(self.nnz() + other.nnz());
        row_pointers.push(0);

        for i in 0..self.nrows() {
            let a = row_parts(self, i);
            let b = row_parts(other, i);
            merge_row(a, b, (&mut col_indices, &mut values));
            row_pointers.push(values.len());
        }

        Ok(CsrMatrix::from_parts_unchecked(
            row_pointers,
            col_indices,
            values,
            self.shape(),
        ))
    }

    /// Element-wise sum by row merge
    ///
    /// # Errors
    ///
    /// `ShapeError::Elementwise` if the shapes differ.
    pub fn add(&self, other: &Self) -> SparseResult<Self> {
        self.merge_rows(other, |a, b, out| {
            merge_union(a, b, out, |x, y| x.add(y), T::clone, T::clone)
        })
    }

    /// Element-wise (Hadamard) product by row merge
    ///
    /// Both operands are coalesced first.
    pub fn elem_mult(&self, other: &Self) -> SparseResult<Self> {
        let a = self.coalesce();
        let b = other.coalesce();
        a.merge_rows(&b, |a, b, out| merge_intersection(a, b, out, |x, y| x.mul(y)))
    }

    /// Element-wise sum with a dense matrix, as a dense matrix
    pub fn add_dense(&self, other: &ArrayView2<T>) -> SparseResult<Array2<T>> {
        self.check_same_shape(other.dim())?;
        let mut out = other.to_owned();
        for (r, c, v) in self.iter() {
            out[[r, c]] = v.add(&out[[r, c]]);
        }
        Ok(out)
    }
}

fn row_parts<T>(m: &CsrMatrix<T>, i: usize) -> (&[usize], &[T]) {
    let start = m.row_pointers()[i];
    let end = m.row_pointers()[i + 1];
    (&m.col_indices()[start..end], &m.values()[start..end])
}

impl<T: Ring> CsrMatrix<T> {
    /// Element-wise difference `self - other` by row merge
    pub fn sub(&self, other: &Self) -> SparseResult<Self> {
        self.merge_rows(other, |a, b, out| {
            merge_union(a, b, out, |x, y| x.sub(y), T::clone, |y| y.neg())
        })
    }
}

// ============================================================================
// COO vectors
// ============================================================================

impl<T: Semiring> CooVector<T> {
    fn check_same_size(&self, other_size: usize) -> SparseResult<()> {
        if self.size() != other_size {
            return Err(SparseError::elementwise(self.size(), other_size));
        }
        Ok(())
    }

    fn union_with<F, R>(&self, other: &Self, both: F, right: R) -> SparseResult<Self>
    where
        F: FnMut(&T, &T) -> T,
        R: FnMut(&T) -> T,
    {
        self.check_same_size(other.size())?;
        let a = self.ensure_sorted();
        let b = other.ensure_sorted();
        let mut indices = Vec::with_capacity(a.nnz() + b.nnz());
        let mut values = Vec::with_capacity(a.nnz() + b.nnz());
        merge_union(
            (a.indices(), a.values()),
            (b.indices(), b.values()),
            (&mut indices, &mut values),
            both,
            T::clone,
            right,
        );
        Ok(CooVector::from_parts_unchecked(indices, values, self.size()))
    }

    /// Element-wise sum with another sparse vector of the same size
    pub fn add(&self, other: &Self) -> SparseResult<Self> {
        self.union_with(other, |a, b| a.add(b), T::clone)
    }

    /// Element-wise product; operands are coalesced first
    pub fn elem_mult(&self, other: &Self) -> SparseResult<Self> {
        self.check_same_size(other.size())?;
        let a = self.coalesce();
        let b = other.coalesce();
        let mut indices = Vec::new();
        let mut values = Vec::new();
        merge_intersection(
            (a.indices(), a.values()),
            (b.indices(), b.values()),
            (&mut indices, &mut values),
            |x, y| x.mul(y),
        );
        Ok(CooVector::from_parts_unchecked(indices, values, self.size()))
    }

    /// Element-wise sum with a dense vector, as a dense vector
    pub fn add_dense(&self, other: &ArrayView1<T>) -> SparseResult<Array1<T>> {
        self.check_same_size(other.len())?;
        let mut out = other.to_owned();
        for (i, v) in self.iter() {
            out[i] = v.add(&out[i]);
        }
        Ok(out)
    }

    /// Element-wise product with a dense vector, keeping the sparse structure
    pub fn elem_mult_dense(&self, other: &ArrayView1<T>) -> SparseResult<Self> {
        self.check_same_size(other.len())?;
        let (indices, values) = self.iter().map(|(i, v)| (i, v.mul(&other[i]))).unzip();
        Ok(CooVector::from_parts_unchecked(indices, values, self.size()))
    }
}

impl<T: Ring> CooVector<T> {
    /// Element-wise difference `self - other`
    pub fn sub(&self, other: &Self) -> SparseResult<Self> {
        self.union_with(other, |a, b| a.sub(b), |b| b.neg())
    }

    /// Element-wise difference with a dense vector, as a dense vector
    pub fn sub_dense(&self, other: &ArrayView1<T>) -> SparseResult<Array1<T>> {
        self.check_same_size(other.len())?;
        let mut out = other.map(|v| v.neg());
        for (i, v) in self.iter() {
            out[i] = v.add(&out[i]);
        }
        Ok(out)
    }
}

// ============================================================================
// Row and column broadcasts
// ============================================================================

/// Which axis a vector is repeated along
#[derive(Clone, Copy)]
enum Broadcast {
    EachRow,
    EachCol,
}

/// Dense `entries + broadcast(vector)` for a matrix of `shape`
///
/// Duplicate entries on either side are summed.
fn add_broadcast<'a, T, I>(
    shape: (usize, usize),
    entries: I,
    vector: &CooVector<T>,
    axis: Broadcast,
) -> SparseResult<Array2<T>>
where
    T: Semiring + 'a,
    I: Iterator<Item = (usize, usize, &'a T)>,
{
    let expected = match axis {
        Broadcast::EachRow => shape.1,
        Broadcast::EachCol => shape.0,
    };
    if vector.size() != expected {
        return Err(SparseError::elementwise(expected, vector.size()));
    }

    let mut out = Array2::from_elem(shape, T::zero());
    for (i, v) in vector.iter() {
        let mut lane = match axis {
            Broadcast::EachRow => out.column_mut(i),
            Broadcast::EachCol => out.row_mut(i),
        };
        lane.mapv_inplace(|x| x.add(v));
    }
    for (r, c, v) in entries {
        out[[r, c]] = out[[r, c]].add(v);
    }
    Ok(out)
}

impl<T: Semiring> CooMatrix<T> {
    /// Add `row` to every row, as a dense matrix
    ///
    /// # Errors
    ///
    /// `ShapeError::Elementwise` unless `row.size() == ncols`.
    pub fn add_to_each_row(&self, row: &CooVector<T>) -> SparseResult<Array2<T>> {
        add_broadcast(self.shape(), self.iter(), row, Broadcast::EachRow)
    }

    /// Add `col` to every column, as a dense matrix
    ///
    /// # Errors
    ///
    /// `ShapeError::Elementwise` unless `col.size() == nrows`.
    pub fn add_to_each_col(&self, col: &CooVector<T>) -> SparseResult<Array2<T>> {
        add_broadcast(self.shape(), self.iter(), col, Broadcast::EachCol)
    }
}

impl<T: Semiring> CsrMatrix<T> {
    /// Add `row` to every row, as a dense matrix
    pub fn add_to_each_row(&self, row: &CooVector<T>) -> SparseResult<Array2<T>> {
        add_broadcast(self.shape(), self.iter(), row, Broadcast::EachRow)
    }

    /// Add `col` to every column, as a dense matrix
    pub fn add_to_each_col(&self, col: &CooVector<T>) -> SparseResult<Array2<T>> {
        add_broadcast(self.shape(), self.iter(), col, Broadcast::EachCol)
    }
}
