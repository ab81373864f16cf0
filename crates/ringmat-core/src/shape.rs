//! Dimension sizes of a container
//!
//! A [`Shape`] is an ordered list of dimension sizes. Sparse matrices use rank-2 shapes and
//! sparse vectors rank-1 shapes; zero-sized dimensions are allowed.

use std::fmt;

use smallvec::SmallVec;

use crate::error::{CoreError, CoreResult, ShapeError};

/// Ordered dimension sizes
///
/// Stored inline for ranks up to two, which covers every container in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    dims: SmallVec<[usize; 2]>,
}

impl Shape {
    /// Create a shape from dimension sizes
    pub fn new(dims: &[usize]) -> Self {
        Self {
            dims: SmallVec::from_slice(dims),
        }
    }

    /// Rank-2 shape `(nrows, ncols)`
    pub fn matrix(nrows: usize, ncols: usize) -> Self {
        Self::new(&[nrows, ncols])
    }

    /// Rank-1 shape `(size,)`
    pub fn vector(size: usize) -> Self {
        Self::new(&[size])
    }

    /// Number of dimensions
    #[inline]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Size of dimension `axis`, if it exists
    #[inline]
    pub fn get(&self, axis: usize) -> Option<usize> {
        self.dims.get(axis).copied()
    }

    /// Product of all dimension sizes
    ///
    /// Returns `None` on overflow.
    pub fn total_entries(&self) -> Option<usize> {
        self.dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    /// Row-major strides
    pub fn strides(&self) -> SmallVec<[usize; 2]> {
        let mut strides: SmallVec<[usize; 2]> = SmallVec::from_elem(1, self.rank());
        for axis in (0..self.rank().saturating_sub(1)).rev() {
            strides[axis] = strides[axis + 1] * self.dims[axis + 1];
        }
        strides
    }

    /// Row-major flat offset of `index`
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index` has the wrong length or any component is out of bounds.
    pub fn flat_index(&self, index: &[usize]) -> CoreResult<usize> {
        if index.len() != self.rank() || index.iter().zip(self.dims.iter()).any(|(&i, &d)| i >= d)
        {
            return Err(CoreError::index_out_of_range(index, self.clone()));
        }
        Ok(index
            .iter()
            .zip(self.strides().iter())
            .map(|(&i, &s)| i * s)
            .sum())
    }

    /// Interpret as a matrix shape
    ///
    /// # Errors
    ///
    /// `ShapeError::Rank` unless the rank is 2.
    pub fn as_matrix(&self) -> CoreResult<(usize, usize)> {
        match self.dims.as_slice() {
            &[nrows, ncols] => Ok((nrows, ncols)),
            _ => Err(ShapeError::Rank {
                expected: 2,
                got: self.clone(),
            }
            .into()),
        }
    }

    /// Interpret as a vector shape
    ///
    /// # Errors
    ///
    /// `ShapeError::Rank` unless the rank is 1.
    pub fn as_vector(&self) -> CoreResult<usize> {
        match self.dims.as_slice() {
            &[size] => Ok(size),
            _ => Err(ShapeError::Rank {
                expected: 1,
                got: self.clone(),
            }
            .into()),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (axis, dim) in self.dims.iter().enumerate() {
            if axis > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", dim)?;
        }
        write!(f, ")")
    }
}

impl From<(usize, usize)> for Shape {
    fn from((nrows, ncols): (usize, usize)) -> Self {
        Shape::matrix(nrows, ncols)
    }
}

impl From<usize> for Shape {
    fn from(size: usize) -> Self {
        Shape::vector(size)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape::new(dims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_basics() {
        let s = Shape::matrix(3, 4);
        assert_eq!(s.rank(), 2);
        assert_eq!(s.dims(), &[3, 4]);
        assert_eq!(s.get(1), Some(4));
        assert_eq!(s.get(2), None);
        assert_eq!(s.total_entries(), Some(12));
    }

    #[test]
    fn test_zero_sized() {
        let s = Shape::matrix(0, 5);
        assert_eq!(s.total_entries(), Some(0));
        assert_eq!(s.as_matrix().unwrap(), (0, 5));
    }

    #[test]
    fn test_total_entries_overflow() {
        let s = Shape::matrix(usize::MAX, 2);
        assert_eq!(s.total_entries(), None);
    }

    #[test]
    fn test_strides_and_flat_index() {
        let s = Shape::matrix(3, 4);
        assert_eq!(s.strides().as_slice(), &[4, 1]);
        assert_eq!(s.flat_index(&[2, 1]).unwrap(), 9);
        assert!(s.flat_index(&[3, 0]).is_err());
        assert!(s.flat_index(&[0]).is_err());
    }

    #[test]
    fn test_rank_checks() {
        assert_eq!(Shape::vector(7).as_vector().unwrap(), 7);
        let err = Shape::vector(7).as_matrix().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Shape(ShapeError::Rank { expected: 2, .. })
        ));
        assert!(Shape::matrix(2, 2).as_vector().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Shape::matrix(2, 3).to_string(), "(2, 3)");
        assert_eq!(Shape::vector(4).to_string(), "(4)");
        assert_eq!(Shape::from((1, 1)), Shape::matrix(1, 1));
    }
}
