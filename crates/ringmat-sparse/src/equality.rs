//! Equality and hashing for sparse containers
//!
//! Two containers are equal when their shapes match and their non-zero entries, viewed as a
//! multiset of `(coordinate, value)` pairs, are identical. Explicit zeros are ignored and
//! storage order does not matter.
//!
//! Duplicate coordinates are *not* summed: `{(0,0): 1, (0,0): 1}` is not equal to
//! `{(0,0): 2}`. Coalesce both sides first when that is the intended comparison.
//!
//! Hashing combines per-entry hashes with a wrapping sum, so it is consistent with this
//! equality.
//!
//! ```
//! use ringmat_sparse::CooMatrix;
//!
//! let a = CooMatrix::new(vec![0, 1], vec![0, 1], vec![0.0, 5.0], (2, 2)).unwrap();
//! let b = CooMatrix::new(vec![1], vec![1], vec![5.0], (2, 2)).unwrap();
//! assert_eq!(a, b);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use ringmat_core::{Semiring, ValueHash};

use crate::coo::CooMatrix;
use crate::csr::CsrMatrix;
use crate::vector::CooVector;

/// Compare two entry streams as multisets of non-zero `(key, value)` pairs
fn nonzero_entries_eq<'a, K, T, A, B>(a: A, b: B) -> bool
where
    K: Ord + Copy,
    T: Semiring + 'a,
    A: Iterator<Item = (K, &'a T)>,
    B: Iterator<Item = (K, &'a T)>,
{
    let mut left: Vec<(K, &T)> = a.filter(|(_, v)| !v.is_zero()).collect();
    let mut right: Vec<(K, &T)> = b.filter(|(_, v)| !v.is_zero()).collect();
    if left.len() != right.len() {
        return false;
    }
    left.sort_by_key(|&(k, _)| k);
    right.sort_by_key(|&(k, _)| k);

    let mut start = 0;
    while start < left.len() {
        let key = left[start].0;
        let end = start + left[start..].iter().take_while(|(k, _)| *k == key).count();
        if right[start..end].iter().any(|(k, _)| *k != key) {
            return false;
        }
        if !same_values(&left[start..end], &right[start..end]) {
            return false;
        }
        start = end;
    }
    true
}

/// Values of one coordinate group, compared as a multiset
fn same_values<K, T: PartialEq>(left: &[(K, &T)], right: &[(K, &T)]) -> bool {
    if let ([(_, l)], [(_, r)]) = (left, right) {
        return l == r;
    }
    let mut used = vec![false; right.len()];
    left.iter().all(|(_, l)| {
        match right
            .iter()
            .enumerate()
            .position(|(i, (_, r))| !used[i] && l == r)
        {
            Some(i) => {
                used[i] = true;
                true
            }
            None => false,
        }
    })
}

/// Order-independent hash of the non-zero entries
fn hash_nonzero_entries<'a, K, T, I, H>(entries: I, state: &mut H)
where
    K: Hash,
    T: Semiring + ValueHash + 'a,
    I: Iterator<Item = (K, &'a T)>,
    H: Hasher,
{
    let mut count = 0usize;
    let mut combined = 0u64;
    for (key, value) in entries.filter(|(_, v)| !v.is_zero()) {
        let mut entry = DefaultHasher::new();
        key.hash(&mut entry);
        value.hash_value(&mut entry);
        combined = combined.wrapping_add(entry.finish());
        count += 1;
    }
    count.hash(state);
    combined.hash(state);
}

impl<T: Semiring> PartialEq for CooMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape()
            && nonzero_entries_eq(
                self.iter().map(|(r, c, v)| ((r, c), v)),
                other.iter().map(|(r, c, v)| ((r, c), v)),
            )
    }
}

impl<T: Semiring + Eq> Eq for CooMatrix<T> {}

impl<T: Semiring + ValueHash> Hash for CooMatrix<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shape().hash(state);
        hash_nonzero_entries(self.iter().map(|(r, c, v)| ((r, c), v)), state);
    }
}

impl<T: Semiring> PartialEq for CsrMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape()
            && nonzero_entries_eq(
                self.iter().map(|(r, c, v)| ((r, c), v)),
                other.iter().map(|(r, c, v)| ((r, c), v)),
            )
    }
}

impl<T: Semiring + Eq> Eq for CsrMatrix<T> {}

impl<T: Semiring + ValueHash> Hash for CsrMatrix<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shape().hash(state);
        hash_nonzero_entries(self.iter().map(|(r, c, v)| ((r, c), v)), state);
    }
}

impl<T: Semiring> PartialEq for CooVector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && nonzero_entries_eq(self.iter(), other.iter())
    }
}

impl<T: Semiring + Eq> Eq for CooVector<T> {}

impl<T: Semiring + ValueHash> Hash for CooVector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size().hash(state);
        hash_nonzero_entries(self.iter(), state);
    }
}

impl<T: Semiring> PartialEq<CsrMatrix<T>> for CooMatrix<T> {
    fn eq(&self, other: &CsrMatrix<T>) -> bool {
        self.shape() == other.shape()
            && nonzero_entries_eq(
                self.iter().map(|(r, c, v)| ((r, c), v)),
                other.iter().map(|(r, c, v)| ((r, c), v)),
            )
    }
}

impl<T: Semiring> PartialEq<CooMatrix<T>> for CsrMatrix<T> {
    fn eq(&self, other: &CooMatrix<T>) -> bool {
        other == self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut h = DefaultHasher::new();
        value.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_explicit_zero_ignored() {
        let with_zero = CooMatrix::new(vec![0, 1], vec![0, 2], vec![0.0, 3.0], (3, 3)).unwrap();
        let without = CooMatrix::new(vec![1], vec![2], vec![3.0], (3, 3)).unwrap();
        assert_eq!(with_zero, without);
        assert_eq!(hash_of(&with_zero), hash_of(&without));
    }

    #[test]
    fn test_storage_order_ignored() {
        let a = CooMatrix::new(vec![2, 0, 1], vec![1, 0, 2], vec![4, 2, 3], (3, 3)).unwrap();
        let b = CooMatrix::new(vec![0, 1, 2], vec![0, 2, 1], vec![2, 3, 4], (3, 3)).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_shape_and_value_differences() {
        let a = CooMatrix::new(vec![0], vec![0], vec![1], (2, 2)).unwrap();
        let b = CooMatrix::new(vec![0], vec![0], vec![1], (2, 3)).unwrap();
        let c = CooMatrix::new(vec![0], vec![0], vec![2], (2, 2)).unwrap();
        let d = CooMatrix::new(vec![0], vec![1], vec![1], (2, 2)).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_duplicates_not_summed() {
        let dup = CooMatrix::new(vec![0, 0], vec![0, 0], vec![1, 1], (1, 1)).unwrap();
        let single = CooMatrix::new(vec![0], vec![0], vec![2], (1, 1)).unwrap();
        assert_ne!(dup, single);
        assert_eq!(dup.coalesce(), single);

        let swapped = CooMatrix::new(vec![0, 0, 0], vec![0, 0, 0], vec![3, 1, 1], (1, 1)).unwrap();
        let other = CooMatrix::new(vec![0, 0, 0], vec![0, 0, 0], vec![1, 3, 1], (1, 1)).unwrap();
        assert_eq!(swapped, other);
        assert_eq!(hash_of(&swapped), hash_of(&other));
    }

    #[test]
    fn test_csr_and_cross_format() {
        let coo =
            CooMatrix::new(vec![0, 1, 2], vec![0, 2, 1], vec![2.0, 3.0, 4.0], (3, 3)).unwrap();
        let csr = coo.to_csr();
        assert_eq!(csr, csr.clone());
        assert!(coo == csr);
        assert!(csr == coo);
        assert_eq!(csr, coo.set(2.0, 0, 0).unwrap().to_csr());
        assert_ne!(csr, coo.set(1.0, 0, 0).unwrap().to_csr());
    }

    #[test]
    fn test_vector_equality_and_hash() {
        let a = CooVector::new(vec![3, 1, 0], vec![7, 5, 0], 4).unwrap();
        let b = CooVector::new(vec![1, 3], vec![5, 7], 4).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(b, CooVector::new(vec![1, 3], vec![5, 7], 5).unwrap());
    }

    #[test]
    fn test_negative_zero_hash() {
        let a = CooVector::new(vec![0], vec![-0.0], 2).unwrap();
        let b = CooVector::<f64>::zeros(2);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }
}
