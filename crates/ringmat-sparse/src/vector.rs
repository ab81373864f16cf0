//! COO sparse vector
//!
//! The one-dimensional counterpart of [`CooMatrix`]: parallel arrays of indices and values
//! with the same conventions (sorted order is conventional, duplicates are allowed until
//! coalescing, explicit zeros until [`CooVector::drop_zeros`]).
//!
//! # Examples
//!
//! ```
//! use ringmat_sparse::CooVector;
//!
//! let a = CooVector::new(vec![0, 3], vec![1.0, 2.0], 5).unwrap();
//! let b = CooVector::new(vec![3, 4], vec![4.0, 9.0], 5).unwrap();
//! assert_eq!(a.dot(&b).unwrap(), 8.0);
//!
//! let outer = a.outer(&b);
//! assert_eq!(outer.shape(), (5, 5));
//! assert_eq!(outer.get(3, 4).unwrap(), 18.0);
//! ```

use std::borrow::Cow;

use ringmat_core::{Semiring, Shape};
use scirs2_core::ndarray_ext::{Array1, ArrayView1};

use crate::coo::CooMatrix;
use crate::error::{SparseError, SparseResult};
use crate::iterators::CooVectorEntries;
use crate::sort;

/// COO sparse vector
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CooVectorParts<T>"))]
pub struct CooVector<T> {
    indices: Vec<usize>,
    values: Vec<T>,
    size: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    sorted: bool,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CooVectorParts<T> {
    indices: Vec<usize>,
    values: Vec<T>,
    size: usize,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<CooVectorParts<T>> for CooVector<T> {
    type Error = SparseError;

    fn try_from(parts: CooVectorParts<T>) -> SparseResult<Self> {
        Self::new(parts.indices, parts.values, parts.size)
    }
}

impl<T> CooVector<T> {
    /// Create a new sparse vector
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `indices` and `values` differ in length
    /// - `IndexOutOfRange` if any index is `>= size`
    pub fn new(indices: Vec<usize>, values: Vec<T>, size: usize) -> SparseResult<Self> {
        if indices.len() != values.len() {
            return Err(SparseError::invalid_argument(format!(
                "vector arrays must have equal lengths: {} indices, {} values",
                indices.len(),
                values.len()
            )));
        }
        if let Some(&i) = indices.iter().find(|&&i| i >= size) {
            return Err(SparseError::index_out_of_range(&[i], size));
        }
        Ok(Self::from_parts_unchecked(indices, values, size))
    }

    /// Create a new sparse vector from a rank-1 [`Shape`]
    pub fn from_shape(shape: &Shape, indices: Vec<usize>, values: Vec<T>) -> SparseResult<Self> {
        let size = shape.as_vector()?;
        Self::new(indices, values, size)
    }

    pub(crate) fn from_parts_unchecked(indices: Vec<usize>, values: Vec<T>, size: usize) -> Self {
        debug_assert_eq!(indices.len(), values.len());
        let sorted = sort::is_sorted_vector(&indices);
        Self {
            indices,
            values,
            size,
            sorted,
        }
    }

    /// Empty vector of length `size`
    pub fn zeros(size: usize) -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
            size,
            sorted: true,
        }
    }

    /// Append an entry
    pub fn push(&mut self, index: usize, value: T) -> SparseResult<()> {
        self.check_index(index)?;
        if let Some(&last) = self.indices.last() {
            self.sorted &= last <= index;
        }
        self.indices.push(index);
        self.values.push(value);
        Ok(())
    }

    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Length of the vector
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn into_parts(self) -> (Vec<usize>, Vec<T>, usize) {
        (self.indices, self.values, self.size)
    }

    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    pub fn density(&self) -> f64 {
        if self.size == 0 {
            0.0
        } else {
            self.nnz() as f64 / self.size as f64
        }
    }

    /// Iterate over stored entries as `(index, &value)`
    pub fn iter(&self) -> CooVectorEntries<'_, T> {
        CooVectorEntries::new(&self.indices, &self.values)
    }

    pub(crate) fn check_index(&self, index: usize) -> SparseResult<()> {
        if index >= self.size {
            return Err(SparseError::index_out_of_range(&[index], self.size));
        }
        Ok(())
    }

    fn sorted_range(&self, index: usize) -> std::ops::Range<usize> {
        debug_assert!(self.sorted);
        let lower = self.indices.partition_point(|&i| i < index);
        let upper = lower + self.indices[lower..].partition_point(|&i| i <= index);
        lower..upper
    }
}

impl<T: Clone> CooVector<T> {
    /// Copy with indices in ascending order (stable)
    pub fn sort_indices(&self) -> Self {
        self.ensure_sorted().into_owned()
    }

    /// Borrow `self` if already sorted, otherwise a sorted copy
    pub fn ensure_sorted(&self) -> Cow<'_, Self> {
        if self.sorted {
            return Cow::Borrowed(self);
        }
        let (values, indices) =
            sort::sort_vector_entries(self.values.clone(), self.indices.clone());
        Cow::Owned(Self {
            indices,
            values,
            size: self.size,
            sorted: true,
        })
    }

    /// Merge duplicate indices with `combine`
    pub fn coalesce_with<F>(&self, combine: F) -> Self
    where
        F: FnMut(&T, &T) -> T,
    {
        let (values, indices) =
            sort::coalesce_vector_entries(self.values.clone(), self.indices.clone(), combine);
        Self {
            indices,
            values,
            size: self.size,
            sorted: true,
        }
    }

    /// Concatenate `other` after `self`
    ///
    /// The result has length `self.size() + other.size()`; indices of `other` are shifted.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the combined length overflows `usize`.
    pub fn join(&self, other: &Self) -> SparseResult<Self> {
        let size = self.size.checked_add(other.size).ok_or_else(|| {
            SparseError::invalid_argument(format!(
                "joined length {} + {} overflows usize",
                self.size, other.size
            ))
        })?;
        let mut indices = self.indices.clone();
        indices.extend(other.indices.iter().map(|&i| i + self.size));
        let mut values = self.values.clone();
        values.extend_from_slice(&other.values);
        Ok(Self {
            indices,
            values,
            size,
            sorted: self.sorted && other.sorted,
        })
    }

    /// View as a `1 × size` row matrix, or a `size × 1` column matrix
    pub fn to_matrix(&self, column: bool) -> CooMatrix<T> {
        let zeros = vec![0; self.nnz()];
        if column {
            CooMatrix::from_parts_unchecked(
                self.indices.clone(),
                zeros,
                self.values.clone(),
                (self.size, 1),
            )
        } else {
            CooMatrix::from_parts_unchecked(
                zeros,
                self.indices.clone(),
                self.values.clone(),
                (1, self.size),
            )
        }
    }

    /// Stack `self` and `other` as the two rows of a `2 × size` matrix
    ///
    /// # Errors
    ///
    /// `ShapeError::Elementwise` if the sizes differ.
    pub fn stack(&self, other: &Self) -> SparseResult<CooMatrix<T>> {
        if self.size != other.size {
            return Err(SparseError::elementwise(self.size, other.size));
        }
        let mut rows = vec![0; self.nnz()];
        rows.resize(self.nnz() + other.nnz(), 1);
        let mut cols = self.indices.clone();
        cols.extend_from_slice(&other.indices);
        let mut values = self.values.clone();
        values.extend_from_slice(&other.values);
        Ok(CooMatrix::from_parts_unchecked(
            rows,
            cols,
            values,
            (2, self.size),
        ))
    }

    /// Repeat the vector `n` times as the rows (`axis == 0`) or columns (`axis == 1`) of a
    /// matrix
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for any other axis.
    pub fn repeat(&self, n: usize, axis: usize) -> SparseResult<CooMatrix<T>> {
        let nnz = self.nnz();
        let capacity = n.checked_mul(nnz).ok_or_else(|| {
            SparseError::invalid_argument(format!(
                "{} copies of {} entries overflow usize",
                n, nnz
            ))
        })?;
        let mut rows = Vec::with_capacity(capacity);
        let mut cols = Vec::with_capacity(capacity);
        let mut values = Vec::with_capacity(capacity);

        match axis {
            0 => {
                for copy in 0..n {
                    rows.extend(std::iter::repeat(copy).take(nnz));
                    cols.extend_from_slice(&self.indices);
                    values.extend_from_slice(&self.values);
                }
                Ok(CooMatrix::from_parts_unchecked(
                    rows,
                    cols,
                    values,
                    (n, self.size),
                ))
            }
            1 => {
                let sorted = self.ensure_sorted();
                for (i, v) in sorted.iter() {
                    for copy in 0..n {
                        rows.push(i);
                        cols.push(copy);
                        values.push(v.clone());
                    }
                }
                Ok(CooMatrix::from_parts_unchecked(
                    rows,
                    cols,
                    values,
                    (self.size, n),
                ))
            }
            _ => Err(SparseError::invalid_argument(format!(
                "axis must be 0 or 1, got {}",
                axis
            ))),
        }
    }
}

impl<T: Semiring> CooVector<T> {
    /// Merge duplicate indices by addition
    pub fn coalesce(&self) -> Self {
        self.coalesce_with(|a, b| a.add(b))
    }

    /// Copy without explicit zeros
    pub fn drop_zeros(&self) -> Self {
        let (indices, values) = self
            .iter()
            .filter(|(_, v)| !v.is_zero())
            .map(|(i, v)| (i, v.clone()))
            .unzip();
        Self {
            indices,
            values,
            size: self.size,
            sorted: self.sorted,
        }
    }

    /// Value at `index`; duplicates are summed and absent indices read as zero
    pub fn get(&self, index: usize) -> SparseResult<T> {
        self.check_index(index)?;
        let sum = if self.sorted {
            self.values[self.sorted_range(index)]
                .iter()
                .fold(T::zero(), |acc, v| acc.add(v))
        } else {
            self.iter()
                .filter(|&(i, _)| i == index)
                .fold(T::zero(), |acc, (_, v)| acc.add(v))
        };
        Ok(sum)
    }

    /// Copy with `index` set to `value`; setting zero removes the index
    pub fn set(&self, value: T, index: usize) -> SparseResult<Self> {
        self.check_index(index)?;
        let sorted = self.ensure_sorted();
        let range = sorted.sorted_range(index);

        let mut indices = sorted.indices[..range.start].to_vec();
        let mut values = sorted.values[..range.start].to_vec();
        if !value.is_zero() {
            indices.push(index);
            values.push(value);
        }
        indices.extend_from_slice(&sorted.indices[range.end..]);
        values.extend_from_slice(&sorted.values[range.end..]);

        Ok(Self {
            indices,
            values,
            size: self.size,
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

    /// Sum of all stored values
    pub fn sum(&self) -> T {
        self.values.iter().fold(T::zero(), |acc, v| acc.add(v))
    }

    /// Dense image; later duplicates overwrite earlier ones
    pub fn to_dense(&self) -> Array1<T> {
        let mut dense = Array1::from_elem(self.size, T::zero());
        for (i, v) in self.iter() {
            dense[i] = v.clone();
        }
        dense
    }

    /// Sparse copy of a dense vector, keeping entries that are not zero
    pub fn from_dense(dense: &ArrayView1<T>) -> Self {
        let (indices, values) = dense
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_zero())
            .map(|(i, v)| (i, v.clone()))
            .unzip();
        Self {
            indices,
            values,
            size: dense.len(),
            sorted: true,
        }
    }

    /// Dot product `Σ self[i] · other[i]`
    ///
    /// # Errors
    ///
    /// `ShapeError::Elementwise` if the sizes differ.
    ///
    /// # Complexity
    ///
    /// O(nnz) merge on coalesced operands.
    pub fn dot(&self, other: &Self) -> SparseResult<T> {
        if self.size != other.size {
            return Err(SparseError::elementwise(self.size, other.size));
        }
        let a = self.coalesce();
        let b = other.coalesce();

        let (mut i, mut j) = (0, 0);
        let mut acc = T::zero();
        while i < a.nnz() && j < b.nnz() {
            match a.indices[i].cmp(&b.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc = acc.add(&a.values[i].mul(&b.values[j]));
                    i += 1;
                    j += 1;
                }
            }
        }
        Ok(acc)
    }

    /// Inner product
    ///
    /// Entries carry no conjugation, so this equals [`CooVector::dot`].
    pub fn inner(&self, other: &Self) -> SparseResult<T> {
        self.dot(other)
    }

    /// Dot product with a dense vector
    pub fn dot_dense(&self, other: &ArrayView1<T>) -> SparseResult<T> {
        if self.size != other.len() {
            return Err(SparseError::elementwise(self.size, other.len()));
        }
        Ok(self
            .iter()
            .fold(T::zero(), |acc, (i, v)| acc.add(&v.mul(&other[i]))))
    }

    /// Outer product `self · otherᵀ`, a `self.size() × other.size()` matrix
    pub fn outer(&self, other: &Self) -> CooMatrix<T> {
        let a = self.ensure_sorted();
        let b = other.ensure_sorted();
        let nnz = a.nnz() * b.nnz();
        let mut rows = Vec::with_capacity(nnz);
        let mut cols = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);
        for (i, x) in a.iter() {
            for (j, y) in b.iter() {
                rows.push(i);
                cols.push(j);
                values.push(x.mul(y));
            }
        }
        CooMatrix::from_parts_unchecked(rows, cols, values, (self.size, other.size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_vector_creation() {
        let v = CooVector::new(vec![1, 4], vec![2, 3], 5).unwrap();
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.size(), 5);
        assert!(v.is_sorted());
        assert_eq!(v.to_dense(), array![0, 2, 0, 0, 3]);

        assert!(CooVector::new(vec![5], vec![1], 5).is_err());
        assert!(CooVector::new(vec![0, 1], vec![1], 5).is_err());
        assert!(CooVector::<i32>::from_shape(&Shape::matrix(1, 5), vec![], vec![]).is_err());
    }

    #[test]
    fn test_get_set() {
        let v = CooVector::new(vec![3, 1, 3], vec![1.0, 2.0, 0.5], 4).unwrap();
        assert_eq!(v.get(3).unwrap(), 1.5);
        assert_eq!(v.get(0).unwrap(), 0.0);
        assert!(v.get(4).is_err());

        let w = v.set(7.0, 3).unwrap();
        assert_eq!(w.indices(), &[1, 3]);
        assert_eq!(w.values(), &[2.0, 7.0]);

        let removed = w.set(0.0, 1).unwrap();
        assert_eq!(removed.indices(), &[3]);
    }

    #[test]
    fn test_coalesce_and_drop_zeros() {
        let v = CooVector::new(vec![2, 0, 2], vec![1, 0, 4], 3).unwrap();
        let c = v.coalesce();
        assert_eq!(c.indices(), &[0, 2]);
        assert_eq!(c.values(), &[0, 5]);
        assert_eq!(c.drop_zeros().indices(), &[2]);
    }

    #[test]
    fn test_join() {
        let a = CooVector::new(vec![1], vec![1], 2).unwrap();
        let b = CooVector::new(vec![0, 2], vec![2, 3], 3).unwrap();
        let j = a.join(&b).unwrap();
        assert_eq!(j.size(), 5);
        assert_eq!(j.indices(), &[1, 2, 4]);
        assert_eq!(j.to_dense(), array![0, 1, 2, 0, 3]);

        let long = CooVector::<i64>::zeros(usize::MAX);
        assert!(long.join(&CooVector::zeros(1)).is_err());
    }

    #[test]
    fn test_dot_and_inner() {
        let a = CooVector::new(vec![0, 2, 2], vec![1, 2, 3], 4).unwrap();
        let b = CooVector::new(vec![2, 3], vec![10, 1], 4).unwrap();
        assert_eq!(a.dot(&b).unwrap(), 50);
        assert_eq!(a.inner(&b).unwrap(), 50);
        assert_eq!(a.dot_dense(&array![1, 1, 1, 1].view()).unwrap(), 6);

        let c = CooVector::new(vec![], Vec::<i32>::new(), 3).unwrap();
        assert!(a.dot(&c).is_err());
    }

    #[test]
    fn test_outer() {
        let a = CooVector::new(vec![0, 1], vec![true, true], 2).unwrap();
        let b = CooVector::new(vec![1], vec![true], 3).unwrap();
        let m = a.outer(&b);
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.to_dense(), array![[false, true, false], [false, true, false]]);
    }

    #[test]
    fn test_stack_and_to_matrix() {
        let a = CooVector::new(vec![0], vec![1.0], 3).unwrap();
        let b = CooVector::new(vec![2], vec![2.0], 3).unwrap();
        let s = a.stack(&b).unwrap();
        assert_eq!(s.to_dense(), array![[1.0, 0.0, 0.0], [0.0, 0.0, 2.0]]);

        let col = b.to_matrix(true);
        assert_eq!(col.shape(), (3, 1));
        assert_eq!(col.get(2, 0).unwrap(), 2.0);
        let row = b.to_matrix(false);
        assert_eq!(row.shape(), (1, 3));
        assert_eq!(row.get(0, 2).unwrap(), 2.0);

        let short = CooVector::new(vec![], Vec::<f64>::new(), 2).unwrap();
        assert!(a.stack(&short).is_err());
    }

    #[test]
    fn test_repeat() {
        let v = CooVector::new(vec![1], vec![5], 2).unwrap();
        let rows = v.repeat(3, 0).unwrap();
        assert_eq!(rows.to_dense(), array![[0, 5], [0, 5], [0, 5]]);
        let cols = v.repeat(2, 1).unwrap();
        assert_eq!(cols.to_dense(), array![[0, 0], [5, 5]]);
        assert!(cols.is_sorted());
        assert!(v.repeat(2, 2).is_err());
        let pair = CooVector::new(vec![0, 1], vec![1, 1], 2).unwrap();
        assert!(matches!(
            pair.repeat(usize::MAX, 0),
            Err(SparseError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_sum_and_scale() {
        let v = CooVector::new(vec![0, 1], vec![1.5, 2.5], 2).unwrap();
        assert_eq!(v.sum(), 4.0);
        assert_eq!(v.scale(&2.0).values(), &[3.0, 5.0]);
    }

    #[test]
    fn test_from_dense() {
        let v = CooVector::from_dense(&array![0.0, 1.0, 0.0, 2.0].view());
        assert_eq!(v.indices(), &[1, 3]);
        assert_eq!(v.size(), 4);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_validates_on_deserialize() {
        let v = CooVector::new(vec![3, 1], vec![1_i64, 2], 4).unwrap();
        let back: CooVector<i64> =
            serde_json::from_value(serde_json::to_value(&v).unwrap()).unwrap();
        assert_eq!(back, v);

        let out_of_range = serde_json::json!({ "indices": [4], "values": [1], "size": 4 });
        assert!(serde_json::from_value::<CooVector<i64>>(out_of_range).is_err());
    }
}
