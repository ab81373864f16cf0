//! # ringmat-core
//!
//! Foundations shared by the ringmat sparse containers:
//!
//! - **Algebraic capability traits** ([`Semiring`], [`Ring`], [`Field`]) describing what
//!   arithmetic a matrix entry supports, plus [`ValueHash`] for hashing entries
//! - **Shapes** ([`Shape`]) with rank checks for matrices and vectors
//! - **Dense reference kernels** ([`dense`]) over `Array2`/`Array1`
//! - **Errors** ([`CoreError`], [`ShapeError`])
//!
//! ## SciRS2 Integration
//!
//! Dense arrays and complex numbers come from `scirs2-core` (`ndarray_ext`, `num_complex`).
//! Row-parallel kernels live in `ringmat-sparse` behind its `parallel` feature.
//!
//! ## Quick Start
//!
//! ```
//! use ringmat_core::{dense, Semiring, Shape};
//!
//! let shape = Shape::matrix(2, 2);
//! assert_eq!(shape.as_matrix().unwrap(), (2, 2));
//!
//! let eye = dense::identity::<i64>(2);
//! let sq = dense::matmul(&eye.view(), &eye.view()).unwrap();
//! assert_eq!(sq, eye);
//! assert!(i64::zero().is_zero());
//! ```

pub mod algebra;
pub mod dense;
pub mod error;
pub mod shape;

mod property_tests;

pub use algebra::{Field, Ring, Semiring, ValueHash};
pub use error::{CoreError, CoreResult, ShapeError};
pub use shape::Shape;
