//! Integration tests for ringmat-core
//!
//! These tests exercise the public surface across modules: traits, shapes, dense kernels and
//! error conversions.

use ringmat_core::{dense, CoreError, Field, Ring, Semiring, Shape, ShapeError};
use scirs2_core::ndarray_ext::array;
use scirs2_core::num_complex::Complex;

#[test]
fn test_generic_kernel_over_tiers() {
    fn trace<T: Semiring>(a: &scirs2_core::ndarray_ext::Array2<T>) -> T {
        (0..a.nrows().min(a.ncols())).fold(T::zero(), |acc, i| acc.add(&a[[i, i]]))
    }

    assert_eq!(trace(&array![[1u8, 2], [3, 4]]), 5);
    assert_eq!(trace(&array![[true, false], [false, false]]), true);
    assert_eq!(trace(&array![[1.5f64, 0.0], [0.0, 2.5]]), 4.0);
}

#[test]
fn test_ring_and_field_only_where_available() {
    fn difference<T: Ring>(a: &T, b: &T) -> T {
        a.sub(b)
    }
    fn ratio<T: Field>(a: &T, b: &T) -> T {
        a.div(b)
    }

    assert_eq!(difference(&3i16, &5), -2);
    assert_eq!(ratio(&1.0f32, &4.0), 0.25);

    let z = ratio(&Complex::new(0.0f64, 2.0), &Complex::new(0.0, 1.0));
    assert!((z.re - 2.0).abs() < 1e-12);
    assert!(z.im.abs() < 1e-12);
}

#[test]
fn test_complex_dense_product() {
    let i = Complex::new(0.0f64, 1.0);
    let one = Complex::new(1.0f64, 0.0);
    let zero = Complex::new(0.0f64, 0.0);

    let a = array![[i, zero], [zero, one]];
    let sq = dense::matmul(&a.view(), &a.view()).unwrap();
    assert_eq!(sq, array![[-one, zero], [zero, one]]);
}

#[test]
fn test_shape_errors_surface_through_core_error() {
    let a = dense::zeros::<i32>(2, 3);
    let x = array![1, 2];
    match dense::matvec(&a.view(), &x.view()) {
        Err(CoreError::Shape(ShapeError::MatVec { m, n, v })) => {
            assert_eq!((m, n, v), (2, 3, 2));
        }
        other => panic!("expected MatVec error, got {:?}", other),
    }

    match Shape::new(&[2, 2, 2]).as_matrix() {
        Err(CoreError::Shape(ShapeError::Rank { expected, got })) => {
            assert_eq!(expected, 2);
            assert_eq!(got.rank(), 3);
        }
        other => panic!("expected Rank error, got {:?}", other),
    }
}

#[test]
fn test_zero_sized_dense() {
    let a = dense::zeros::<f64>(0, 3);
    let b = dense::zeros::<f64>(3, 2);
    let c = dense::matmul(&a.view(), &b.view()).unwrap();
    assert_eq!(c.dim(), (0, 2));
}
