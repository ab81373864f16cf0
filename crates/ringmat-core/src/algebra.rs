//! Algebraic capability traits for matrix entries
//!
//! Sparse containers are generic over the algebra their entries live in. The traits form a
//! small hierarchy:
//!
//! - [`Semiring`]: zero, one, addition, multiplication. Enough for storage, products and sums.
//! - [`Ring`]: adds negation, so subtraction is available.
//! - [`Field`]: adds multiplicative inverses, so division is available.
//!
//! Operations that need subtraction or division are only defined under the matching bound, so
//! dividing two matrices of integers is rejected at compile time.
//!
//! # Implementations
//!
//! | type                          | tier     | notes                              |
//! |-------------------------------|----------|------------------------------------|
//! | `f32`, `f64`                  | field    | IEEE arithmetic                    |
//! | `Complex<f32>`, `Complex<f64>`| field    |                                    |
//! | `i8` .. `i64`, `isize`        | ring     | wrapping (two's complement) arithmetic |
//! | `u8` .. `u64`, `usize`        | semiring | wrapping arithmetic                |
//! | `bool`                        | semiring | OR as addition, AND as multiplication |
//!
//! # Examples
//!
//! ```
//! use ringmat_core::{Field, Ring, Semiring};
//!
//! assert_eq!(true.add(&false), true);
//! assert_eq!(true.mul(&false), false);
//! assert_eq!(7i32.sub(&9), -2);
//! assert_eq!(3.0f64.div(&2.0), 1.5);
//! assert!(0u8.is_zero());
//! ```

use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use scirs2_core::num_complex::Complex;

/// Values with an additive identity, a multiplicative identity, addition and multiplication
pub trait Semiring: Clone + PartialEq + Debug {
    /// Additive identity
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Addition
    fn add(&self, rhs: &Self) -> Self;

    /// Multiplication
    fn mul(&self, rhs: &Self) -> Self;

    /// Whether this value equals the additive identity
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Whether this value equals the multiplicative identity
    fn is_one(&self) -> bool {
        *self == Self::one()
    }
}

/// A [`Semiring`] with additive inverses
pub trait Ring: Semiring {
    /// Additive inverse
    fn neg(&self) -> Self;

    /// Subtraction, `self + (-rhs)` unless overridden
    fn sub(&self, rhs: &Self) -> Self {
        self.add(&rhs.neg())
    }
}

/// A [`Ring`] with multiplicative inverses
pub trait Field: Ring {
    /// Multiplicative inverse
    ///
    /// Inverting zero follows the type's own convention (infinity or NaN for floats).
    fn inv(&self) -> Self;

    /// Division, `self * rhs⁻¹` unless overridden
    fn div(&self, rhs: &Self) -> Self {
        self.mul(&rhs.inv())
    }
}

/// Hashing for entry values
///
/// Floating point and complex values are not `std::hash::Hash`. This trait fills the gap so
/// containers can hash their entries: floats hash their bit pattern with `-0.0` folded onto
/// `0.0`, so values that compare equal hash equally.
pub trait ValueHash {
    fn hash_value<H: Hasher>(&self, state: &mut H);
}

macro_rules! impl_float {
    ($($t:ty),*) => {$(
        impl Semiring for $t {
            #[inline]
            fn zero() -> Self {
                0.0
            }

            #[inline]
            fn one() -> Self {
                1.0
            }

            #[inline]
            fn add(&self, rhs: &Self) -> Self {
                self + rhs
            }

            #[inline]
            fn mul(&self, rhs: &Self) -> Self {
                self * rhs
            }

            #[inline]
            fn is_zero(&self) -> bool {
                *self == 0.0
            }
        }

        impl Ring for $t {
            #[inline]
            fn neg(&self) -> Self {
                -self
            }

            #[inline]
            fn sub(&self, rhs: &Self) -> Self {
                self - rhs
            }
        }

        impl Field for $t {
            #[inline]
            fn inv(&self) -> Self {
                1.0 / self
            }

            #[inline]
            fn div(&self, rhs: &Self) -> Self {
                self / rhs
            }
        }

        impl ValueHash for $t {
            fn hash_value<H: Hasher>(&self, state: &mut H) {
                let normalized = if *self == 0.0 { 0.0 } else { *self };
                normalized.to_bits().hash(state);
            }
        }
    )*};
}

macro_rules! impl_integer_semiring {
    ($($t:ty),*) => {$(
        impl Semiring for $t {
            #[inline]
            fn zero() -> Self {
                0
            }

            #[inline]
            fn one() -> Self {
                1
            }

            #[inline]
            fn add(&self, rhs: &Self) -> Self {
                self.wrapping_add(*rhs)
            }

            #[inline]
            fn mul(&self, rhs: &Self) -> Self {
                self.wrapping_mul(*rhs)
            }

            #[inline]
            fn is_zero(&self) -> bool {
                *self == 0
            }
        }

        impl ValueHash for $t {
            fn hash_value<H: Hasher>(&self, state: &mut H) {
                self.hash(state);
            }
        }
    )*};
}

macro_rules! impl_integer_ring {
    ($($t:ty),*) => {$(
        impl_integer_semiring!($t);

        impl Ring for $t {
            #[inline]
            fn neg(&self) -> Self {
                self.wrapping_neg()
            }

            #[inline]
            fn sub(&self, rhs: &Self) -> Self {
                self.wrapping_sub(*rhs)
            }
        }
    )*};
}

impl_float!(f32, f64);
impl_integer_ring!(i8, i16, i32, i64, isize);
impl_integer_semiring!(u8, u16, u32, u64, usize);

impl Semiring for bool {
    #[inline]
    fn zero() -> Self {
        false
    }

    #[inline]
    fn one() -> Self {
        true
    }

    #[inline]
    fn add(&self, rhs: &Self) -> Self {
        *self || *rhs
    }

    #[inline]
    fn mul(&self, rhs: &Self) -> Self {
        *self && *rhs
    }

    #[inline]
    fn is_zero(&self) -> bool {
        !*self
    }
}

impl ValueHash for bool {
    fn hash_value<H: Hasher>(&self, state: &mut H) {
        self.hash(state);
    }
}

macro_rules! impl_complex {
    ($($t:ty),*) => {$(
        impl Semiring for Complex<$t> {
            #[inline]
            fn zero() -> Self {
                Complex::new(0.0, 0.0)
            }

            #[inline]
            fn one() -> Self {
                Complex::new(1.0, 0.0)
            }

            #[inline]
            fn add(&self, rhs: &Self) -> Self {
                self + rhs
            }

            #[inline]
            fn mul(&self, rhs: &Self) -> Self {
                self * rhs
            }

            #[inline]
            fn is_zero(&self) -> bool {
                self.re == 0.0 && self.im == 0.0
            }
        }

        impl Ring for Complex<$t> {
            #[inline]
            fn neg(&self) -> Self {
                -self
            }

            #[inline]
            fn sub(&self, rhs: &Self) -> Self {
                self - rhs
            }
        }

        impl Field for Complex<$t> {
            #[inline]
            fn inv(&self) -> Self {
                Complex::new(1.0, 0.0) / self
            }

            #[inline]
            fn div(&self, rhs: &Self) -> Self {
                self / rhs
            }
        }

        impl ValueHash for Complex<$t> {
            fn hash_value<H: Hasher>(&self, state: &mut H) {
                self.re.hash_value(state);
                self.im.hash_value(state);
            }
        }
    )*};
}

impl_complex!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: ValueHash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash_value(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_float_identities() {
        assert_eq!(f64::zero(), 0.0);
        assert_eq!(f64::one(), 1.0);
        assert!(0.0f64.is_zero());
        assert!((-0.0f64).is_zero());
        assert!(!1e-300f64.is_zero());
    }

    #[test]
    fn test_float_field_ops() {
        assert_eq!(6.0f64.div(&4.0), 1.5);
        assert_eq!(4.0f32.inv(), 0.25);
        assert_eq!(2.0f64.sub(&5.0), -3.0);
    }

    #[test]
    fn test_integer_ring_wraps() {
        assert_eq!(i8::MAX.add(&1), i8::MIN);
        assert_eq!(5i64.neg(), -5);
        assert_eq!(3i32.sub(&10), -7);
    }

    #[test]
    fn test_unsigned_semiring() {
        assert_eq!(u8::MAX.add(&1), 0);
        assert_eq!(3u32.mul(&4), 12);
        assert!(u16::one().is_one());
    }

    #[test]
    fn test_bool_semiring() {
        assert!(bool::one().add(&bool::zero()));
        assert!(!bool::one().mul(&bool::zero()));
        assert!(false.is_zero());
    }

    #[test]
    fn test_complex_field() {
        let a = Complex::new(1.0f64, 2.0);
        let b = Complex::new(3.0f64, -1.0);
        assert_eq!(a.mul(&b), Complex::new(5.0, 5.0));
        let q = a.mul(&b).div(&b);
        assert!((q.re - 1.0).abs() < 1e-12);
        assert!((q.im - 2.0).abs() < 1e-12);
        assert!(Complex::<f32>::zero().is_zero());
    }

    #[test]
    fn test_value_hash_folds_negative_zero() {
        assert_eq!(hash_of(&0.0f64), hash_of(&-0.0f64));
        assert_ne!(hash_of(&1.0f64), hash_of(&2.0f64));
        assert_eq!(
            hash_of(&Complex::new(0.0f32, -0.0)),
            hash_of(&Complex::new(-0.0f32, 0.0))
        );
    }
}
