//! # ringmat-sparse
//!
//! Sparse matrices and vectors over generic algebraic structures.
//!
//! This crate provides:
//! - [`CooMatrix`] and [`CooVector`] coordinate-list containers
//! - [`CsrMatrix`] compressed sparse row matrices
//! - Index sorting and duplicate coalescing ([`sort`])
//! - COO ↔ CSR ↔ dense conversions
//! - Elementwise arithmetic ([`ops`])
//! - Sparse × sparse, sparse × dense and sparse × vector products ([`matmul`]), with
//!   row-parallel variants behind the `parallel` feature ([`parallel`])
//! - Zero-agnostic equality and order-independent hashing ([`equality`])
//! - Structural operations, reductions and iterators
//!
//! Values are any [`Semiring`](ringmat_core::Semiring). Subtraction needs a
//! [`Ring`](ringmat_core::Ring) and division a [`Field`](ringmat_core::Field); the methods
//! simply do not exist for weaker structures.
//!
//! # Quick Start
//!
//! ```
//! use ringmat_sparse::{CooMatrix, SparseResult};
//! use scirs2_core::ndarray_ext::array;
//!
//! fn main() -> SparseResult<()> {
//!     let a = CooMatrix::new(vec![0, 1, 2], vec![0, 2, 1], vec![2.0, 3.0, 4.0], (3, 3))?;
//!     assert_eq!(a.to_dense(), array![[2.0, 0.0, 0.0], [0.0, 0.0, 3.0], [0.0, 4.0, 0.0]]);
//!
//!     let csr = a.to_csr();
//!     assert_eq!(csr.row_pointers(), &[0, 1, 2, 3]);
//!
//!     let product = csr.mult_to_sparse(&csr)?;
//!     assert_eq!(product.get(1, 1)?, 12.0);
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `parallel`: row-parallel kernels in [`parallel`] through `scirs2_core::parallel_ops`
//! - `serde`: `Serialize`/`Deserialize` for the containers, with deserialized data
//!   checked like `new`

pub mod coo;
pub mod csr;
pub mod equality;
pub mod error;
pub mod iterators;
pub mod matmul;
pub mod ops;
pub mod parallel;
pub mod reductions;
pub mod sort;
pub mod structural;
pub mod vector;

// Re-exports
pub use coo::CooMatrix;
pub use csr::CsrMatrix;
pub use error::{SparseError, SparseResult};
pub use iterators::{RowIterator, SparseIterator};
pub use matmul::{mult_with_hints, MatMulHints, Product, ResultFormat};
pub use vector::CooVector;
