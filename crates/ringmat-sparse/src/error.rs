//! Unified error type for sparse matrix operations
//!
//! Every fallible operation in this crate returns [`SparseResult`]. Errors are detected before
//! any output is built, so operands are never left half-modified.
//!
//! # Design
//!
//! - **`Shape`**: operand shapes incompatible with the operation (elementwise mismatch, inner
//!   dimension mismatch, non-square, rank mismatch). Wraps [`ShapeError`] from `ringmat-core`.
//! - **`IndexOutOfRange`**: a coordinate outside the container's shape.
//! - **`InvalidArgument`**: malformed input such as mismatched parallel-array lengths, a
//!   negative exponent, broken CSR pointers or a bad slice range.
//! - **`UnsupportedOperation`**: an operation valid for the algebra but not provided by the
//!   container variant.
//!
//! # Examples
//!
//! ```
//! use ringmat_sparse::{CooMatrix, SparseError};
//!
//! let err = CooMatrix::new(vec![0, 1], vec![0], vec![1.0, 2.0], (2, 2)).unwrap_err();
//! assert!(matches!(err, SparseError::InvalidArgument(_)));
//! ```

use ringmat_core::{CoreError, Shape, ShapeError};
use thiserror::Error;

/// Top-level error type for all sparse matrix operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SparseError {
    /// Shape mismatch errors
    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    /// Coordinate outside the container
    #[error("Index out of range: index {index:?} exceeds shape {shape}")]
    IndexOutOfRange { index: Vec<usize>, shape: Shape },

    /// Malformed argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation not provided for this container
    #[error("Unsupported operation: {operation} is not supported for {container}")]
    UnsupportedOperation {
        operation: &'static str,
        container: &'static str,
    },
}

/// Result type alias for sparse operations
pub type SparseResult<T> = Result<T, SparseError>;

impl SparseError {
    /// Create an index out of range error
    pub fn index_out_of_range(index: &[usize], shape: impl Into<Shape>) -> Self {
        SparseError::IndexOutOfRange {
            index: index.to_vec(),
            shape: shape.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        SparseError::InvalidArgument(msg.into())
    }

    /// Create an unsupported operation error
    pub fn unsupported(operation: &'static str, container: &'static str) -> Self {
        SparseError::UnsupportedOperation {
            operation,
            container,
        }
    }

    /// Elementwise shape mismatch between two operands
    pub fn elementwise(left: impl Into<Shape>, right: impl Into<Shape>) -> Self {
        SparseError::Shape(ShapeError::Elementwise {
            left: left.into(),
            right: right.into(),
        })
    }

    /// Inner dimension mismatch in a matrix product
    pub fn matmul(left: (usize, usize), right: (usize, usize)) -> Self {
        SparseError::Shape(ShapeError::MatMul {
            m1: left.0,
            n1: left.1,
            m2: right.0,
            n2: right.1,
        })
    }

    /// Length mismatch in a matrix-vector product
    pub fn matvec(matrix: (usize, usize), len: usize) -> Self {
        SparseError::Shape(ShapeError::MatVec {
            m: matrix.0,
            n: matrix.1,
            v: len,
        })
    }

    /// Operation requires a square matrix
    pub fn not_square(shape: (usize, usize)) -> Self {
        SparseError::Shape(ShapeError::NotSquare {
            nrows: shape.0,
            ncols: shape.1,
        })
    }
}

impl From<CoreError> for SparseError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Shape(e) => SparseError::Shape(e),
            CoreError::IndexOutOfRange { index, shape } => {
                SparseError::IndexOutOfRange { index, shape }
            }
            CoreError::InvalidArgument(msg) => SparseError::InvalidArgument(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SparseError::matmul((2, 3), (4, 5));
        assert_eq!(
            err.to_string(),
            "Shape error: Matrix multiplication dimension mismatch: (2×3) × (4×5)"
        );

        let err = SparseError::unsupported("div", "CsrMatrix");
        assert_eq!(
            err.to_string(),
            "Unsupported operation: div is not supported for CsrMatrix"
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let err = SparseError::index_out_of_range(&[5, 1], (3, 3));
        assert_eq!(
            err.to_string(),
            "Index out of range: index [5, 1] exceeds shape (3, 3)"
        );
    }

    #[test]
    fn test_from_core_error() {
        let core: CoreError = ShapeError::NotSquare { nrows: 1, ncols: 2 }.into();
        let err: SparseError = core.into();
        assert_eq!(err, SparseError::not_square((1, 2)));

        let core = CoreError::invalid_argument("bad");
        assert_eq!(
            SparseError::from(core),
            SparseError::InvalidArgument("bad".to_string())
        );
    }

    #[test]
    fn test_question_mark_conversion() {
        fn inner() -> SparseResult<(usize, usize)> {
            Ok(Shape::vector(3).as_matrix()?)
        }
        assert!(matches!(inner(), Err(SparseError::Shape(ShapeError::Rank { .. }))));
    }
}
