//! Property-based tests for the algebra traits and dense kernels
//!
//! Uses proptest to check semiring laws and product identities over randomly generated
//! operands.

#[cfg(test)]
mod tests {
    use crate::dense;
    use crate::{Ring, Semiring, Shape};
    use proptest::prelude::*;
    use scirs2_core::ndarray_ext::Array2;

    // Small integer matrices keep products exact
    fn matrix_strategy(
        rows: std::ops::Range<usize>,
        cols: std::ops::Range<usize>,
    ) -> impl Strategy<Value = Array2<i64>> {
        (rows, cols).prop_flat_map(|(m, n)| {
            prop::collection::vec(-5i64..5, m * n).prop_map(move |data| {
                Array2::from_shape_vec((m, n), data).expect("length matches shape")
            })
        })
    }

    proptest! {
        #[test]
        fn prop_bool_semiring_laws(a: bool, b: bool, c: bool) {
            prop_assert_eq!(a.add(&b), b.add(&a));
            prop_assert_eq!(a.mul(&b.add(&c)), a.mul(&b).add(&a.mul(&c)));
            prop_assert_eq!(a.add(&bool::zero()), a);
            prop_assert_eq!(a.mul(&bool::one()), a);
        }

        #[test]
        fn prop_integer_ring_inverse(a: i32, b: i32) {
            prop_assert!(a.add(&a.neg()).is_zero());
            prop_assert_eq!(a.sub(&b).add(&b), a);
        }

        #[test]
        fn prop_identity_is_neutral(a in matrix_strategy(1..6, 1..6)) {
            let (m, n) = a.dim();
            let left = dense::matmul(&dense::identity::<i64>(m).view(), &a.view()).unwrap();
            let right = dense::matmul(&a.view(), &dense::identity::<i64>(n).view()).unwrap();
            prop_assert_eq!(&left, &a);
            prop_assert_eq!(&right, &a);
        }

        #[test]
        fn prop_matmul_shape_law(
            m in 1usize..5,
            k in 1usize..5,
            n in 1usize..5,
        ) {
            let a = dense::zeros::<f64>(m, k);
            let b = dense::zeros::<f64>(k, n);
            let c = dense::matmul(&a.view(), &b.view()).unwrap();
            prop_assert_eq!(c.dim(), (m, n));

            let bad = dense::zeros::<f64>(k + 1, n);
            prop_assert!(dense::matmul(&a.view(), &bad.view()).is_err());
        }

        #[test]
        fn prop_matvec_matches_matmul_column(a in matrix_strategy(1..5, 1..5)) {
            let n = a.ncols();
            let x: Vec<i64> = (0..n as i64).collect();
            let xv = scirs2_core::ndarray_ext::Array1::from(x.clone());
            let xm = Array2::from_shape_vec((n, 1), x).unwrap();
            let y = dense::matvec(&a.view(), &xv.view()).unwrap();
            let ym = dense::matmul(&a.view(), &xm.view()).unwrap();
            for i in 0..a.nrows() {
                prop_assert_eq!(y[i], ym[[i, 0]]);
            }
        }

        #[test]
        fn prop_flat_index_in_bounds(m in 1usize..8, n in 1usize..8, i in 0usize..8, j in 0usize..8) {
            let shape = Shape::matrix(m, n);
            match shape.flat_index(&[i, j]) {
                Ok(offset) => {
                    prop_assert!(i < m && j < n);
                    prop_assert_eq!(offset, i * n + j);
                }
                Err(_) => prop_assert!(i >= m || j >= n),
            }
        }
    }
}
