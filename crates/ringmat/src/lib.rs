//! # ringmat
//!
//! Sparse matrices over generic algebraic structures.
//!
//! This is the **meta crate** that re-exports the ringmat components for convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use ringmat::prelude::*;
//!
//! let a = CooMatrix::new(vec![0, 1, 2], vec![0, 2, 1], vec![2.0, 3.0, 4.0], (3, 3))?;
//! let square = a.to_csr().mult(&a.to_csr())?;
//! assert_eq!(square[[1, 1]], 12.0);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Algebra and Dense Kernels ([`core`])
//!
//! The [`Semiring`](core::Semiring) / [`Ring`](core::Ring) / [`Field`](core::Field)
//! capability traits, [`Shape`](core::Shape), shape errors and the dense reference
//! kernels that sparse products are checked against.
//!
//! ```
//! use ringmat::core::dense;
//! use scirs2_core::ndarray_ext::array;
//!
//! let a = array![[true, false], [true, true]];
//! let reach = dense::matmul(&a.view(), &a.view()).unwrap();
//! assert_eq!(reach, array![[true, false], [true, true]]);
//! ```
//!
//! ### Sparse Matrices ([`sparse`])
//!
//! COO and CSR matrices, sparse vectors, conversions, elementwise arithmetic and
//! multiplication kernels.
//!
//! ```
//! use ringmat::sparse::{CooMatrix, CsrMatrix};
//!
//! let coo = CooMatrix::new(vec![1, 0], vec![1, 0], vec![5_i64, 7], (2, 2)).unwrap();
//! let csr = CsrMatrix::from_coo(&coo);
//! assert_eq!(csr.row_pointers(), &[0, 1, 2]);
//! assert!(csr == coo);
//! ```
//!
//! ## Features
//!
//! - `parallel`: row-parallel sparse kernels
//! - `serde`: serialization of shapes and sparse containers

pub use ringmat_core as core;
pub use ringmat_sparse as sparse;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use ringmat::prelude::*;
    //!
    //! let v = CooVector::new(vec![0, 3], vec![1.0, 2.0], 4).unwrap();
    //! assert_eq!(v.dot(&v).unwrap(), 5.0);
    //! ```

    // Algebra
    pub use crate::core::{Field, Ring, Semiring, Shape, ShapeError};

    // Sparse types
    pub use crate::sparse::{CooMatrix, CooVector, CsrMatrix, SparseError, SparseResult};

    // Products
    pub use crate::sparse::{mult_with_hints, MatMulHints, Product, ResultFormat};

    // Iteration
    pub use crate::sparse::{RowIterator, SparseIterator};
}
