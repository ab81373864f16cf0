//! Error types shared by the dense helpers and the sparse containers
//!
//! [`ShapeError`] is the shape taxonomy used across the workspace: the sparse crate wraps it
//! in its own top-level error, so a mismatched inner dimension reads the same whether it was
//! detected by a dense kernel or by a sparse one.

use thiserror::Error;

use crate::shape::Shape;

/// Operand shapes incompatible with the requested operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Matrix multiplication dimension mismatch: ({m1}×{n1}) × ({m2}×{n2})")]
    MatMul {
        m1: usize,
        n1: usize,
        m2: usize,
        n2: usize,
    },

    #[error("Matrix-vector multiplication dimension mismatch: ({m}×{n}) × ({v},)")]
    MatVec { m: usize, n: usize, v: usize },

    #[error("Elementwise shape mismatch: {left} vs {right}")]
    Elementwise { left: Shape, right: Shape },

    #[error("Matrix must be square, got {nrows}×{ncols}")]
    NotSquare { nrows: usize, ncols: usize },

    #[error("Rank mismatch: expected rank {expected}, got shape {got}")]
    Rank { expected: usize, got: Shape },

    #[error("Cannot concatenate along axis {axis}: expected extent {expected}, got {got}")]
    Concat {
        axis: usize,
        expected: usize,
        got: usize,
    },

    #[error("Cannot reshape {from} into {to}: total entries differ")]
    Reshape { from: Shape, to: Shape },
}

/// Top-level error for `ringmat-core`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("Index out of range: index {index:?} exceeds shape {shape}")]
    IndexOutOfRange { index: Vec<usize>, shape: Shape },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for `ringmat-core`
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create an index out of range error
    pub fn index_out_of_range(index: &[usize], shape: Shape) -> Self {
        CoreError::IndexOutOfRange {
            index: index.to_vec(),
            shape,
        }
    }

    /// Create an invalid argument error with a message
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        CoreError::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matmul_message() {
        let err = ShapeError::MatMul {
            m1: 3,
            n1: 4,
            m2: 5,
            n2: 6,
        };
        assert_eq!(
            err.to_string(),
            "Matrix multiplication dimension mismatch: (3×4) × (5×6)"
        );
    }

    #[test]
    fn test_rank_message_uses_shape_display() {
        let err = ShapeError::Rank {
            expected: 2,
            got: Shape::new(&[4]),
        };
        assert_eq!(err.to_string(), "Rank mismatch: expected rank 2, got shape (4)");
    }

    #[test]
    fn test_core_error_from_shape() {
        let err: CoreError = ShapeError::NotSquare { nrows: 2, ncols: 3 }.into();
        assert!(matches!(err, CoreError::Shape(ShapeError::NotSquare { .. })));
    }

    #[test]
    fn test_index_out_of_range() {
        let err = CoreError::index_out_of_range(&[3, 0], Shape::matrix(2, 2));
        assert_eq!(
            err.to_string(),
            "Index out of range: index [3, 0] exceeds shape (2, 2)"
        );
    }
}
