//! Lexicographic sorting and coalescing of sparse entries
//!
//! Sparse containers keep their entries in parallel arrays (values plus one index array per
//! dimension). This module sorts those arrays together by coordinate and merges entries that
//! share a coordinate.
//!
//! - [`sort_matrix_entries`] / [`sort_vector_entries`]: stable sort by `(row, col)` / index.
//!   Entries with equal coordinates keep their relative order.
//! - [`coalesce_matrix_entries`] / [`coalesce_vector_entries`]: sort, then fold each run of
//!   equal coordinates left to right with a combiner.
//!
//! Bounds checking is the caller's job; these functions accept any indices.
//!
//! # Examples
//!
//! ```
//! use ringmat_sparse::sort::{coalesce_matrix_entries, sort_matrix_entries};
//!
//! let (values, rows, cols) = sort_matrix_entries(vec![3, 1, 2], vec![1, 0, 0], vec![0, 1, 0]);
//! assert_eq!(rows, vec![0, 0, 1]);
//! assert_eq!(cols, vec![0, 1, 0]);
//! assert_eq!(values, vec![2, 1, 3]);
//!
//! let (values, rows, cols) =
//!     coalesce_matrix_entries(vec![1, 5, 2], vec![0, 0, 0], vec![1, 0, 1], |a, b| a + b);
//! assert_eq!((values, rows, cols), (vec![5, 3], vec![0, 0], vec![0, 1]));
//! ```

/// Whether `(rows[i], cols[i])` is non-decreasing in row-major order
pub fn is_sorted_matrix(rows: &[usize], cols: &[usize]) -> bool {
    rows.iter()
        .zip(cols.iter())
        .zip(rows.iter().zip(cols.iter()).skip(1))
        .all(|(prev, next)| prev <= next)
}

/// Whether `indices` is non-decreasing
pub fn is_sorted_vector(indices: &[usize]) -> bool {
    indices.windows(2).all(|w| w[0] <= w[1])
}

/// Reorder `data` so that position `i` holds `data[perm[i]]`
///
/// `perm` must be a permutation of `0..data.len()`.
pub(crate) fn apply_permutation<T>(data: Vec<T>, perm: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = data.into_iter().map(Some).collect();
    perm.iter().filter_map(|&p| slots[p].take()).collect()
}

/// Stable sort of matrix entries by `(row, col)`
///
/// Already sorted input is returned unchanged without allocating.
///
/// # Complexity
///
/// O(nnz log nnz) time, O(nnz) extra space.
pub fn sort_matrix_entries<T>(
    values: Vec<T>,
    rows: Vec<usize>,
    cols: Vec<usize>,
) -> (Vec<T>, Vec<usize>, Vec<usize>) {
    if is_sorted_matrix(&rows, &cols) {
        return (values, rows, cols);
    }

    let mut perm: Vec<usize> = (0..values.len()).collect();
    perm.sort_by_key(|&i| (rows[i], cols[i]));

    let rows = perm.iter().map(|&p| rows[p]).collect();
    let cols = perm.iter().map(|&p| cols[p]).collect();
    (apply_permutation(values, &perm), rows, cols)
}

/// Stable sort of vector entries by index
pub fn sort_vector_entries<T>(values: Vec<T>, indices: Vec<usize>) -> (Vec<T>, Vec<usize>) {
    if is_sorted_vector(&indices) {
        return (values, indices);
    }

    let mut perm: Vec<usize> = (0..values.len()).collect();
    perm.sort_by_key(|&i| indices[i]);

    let indices = perm.iter().map(|&p| indices[p]).collect();
    (apply_permutation(values, &perm), indices)
}

/// Sort matrix entries, then merge entries with equal coordinates
///
/// Each run of equal `(row, col)` collapses to `combine(combine(v0, v1), v2)...` in stored
/// order. The output is sorted and has no duplicate coordinates.
pub fn coalesce_matrix_entries<T, F>(
    values: Vec<T>,
    rows: Vec<usize>,
    cols: Vec<usize>,
    mut combine: F,
) -> (Vec<T>, Vec<usize>, Vec<usize>)
where
    F: FnMut(&T, &T) -> T,
{
    let input_len = values.len();
    let (values, rows, cols) = sort_matrix_entries(values, rows, cols);

    let mut out_values: Vec<T> = Vec::with_capacity(input_len);
    let mut out_rows = Vec::with_capacity(input_len);
    let mut out_cols = Vec::with_capacity(input_len);

    for ((value, row), col) in values.into_iter().zip(rows).zip(cols) {
        let duplicate = out_rows.last() == Some(&row) && out_cols.last() == Some(&col);
        match out_values.last_mut() {
            Some(acc) if duplicate => *acc = combine(acc, &value),
            _ => {
                out_values.push(value);
                out_rows.push(row);
                out_cols.push(col);
            }
        }
    }

    log::trace!(
        "coalesced {} matrix entries into {}",
        input_len,
        out_values.len()
    );
    (out_values, out_rows, out_cols)
}

/// Sort vector entries, then merge entries with equal indices
pub fn coalesce_vector_entries<T, F>(
    values: Vec<T>,
    indices: Vec<usize>,
    mut combine: F,
) -> (Vec<T>, Vec<usize>)
where
    F: FnMut(&T, &T) -> T,
{
    let input_len = values.len();
    let (values, indices) = sort_vector_entries(values, indices);

    let mut out_values: Vec<T> = Vec::with_capacity(input_len);
    let mut out_indices = Vec::with_capacity(input_len);

    for (value, index) in values.into_iter().zip(indices) {
        match out_values.last_mut() {
            Some(acc) if out_indices.last() == Some(&index) => *acc = combine(acc, &value),
            _ => {
                out_values.push(value);
                out_indices.push(index);
            }
        }
    }

    log::trace!(
        "coalesced {} vector entries into {}",
        input_len,
        out_values.len()
    );
    (out_values, out_indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_sorted_matrix() {
        assert!(is_sorted_matrix(&[], &[]));
        assert!(is_sorted_matrix(&[0, 0, 1], &[0, 2, 0]));
        assert!(is_sorted_matrix(&[0, 0], &[1, 1]));
        assert!(!is_sorted_matrix(&[0, 0], &[2, 1]));
        assert!(!is_sorted_matrix(&[1, 0], &[0, 5]));
    }

    #[test]
    fn test_sort_is_stable() {
        let (values, rows, cols) =
            sort_matrix_entries(vec!["b", "a", "c"], vec![1, 0, 1], vec![0, 0, 0]);
        assert_eq!(values, vec!["a", "b", "c"]);
        assert_eq!(rows, vec![0, 1, 1]);
        assert_eq!(cols, vec![0, 0, 0]);
    }

    #[test]
    fn test_sort_vector_entries() {
        let (values, indices) = sort_vector_entries(vec![10, 20, 30], vec![4, 0, 2]);
        assert_eq!(values, vec![20, 30, 10]);
        assert_eq!(indices, vec![0, 2, 4]);
    }

    #[test]
    fn test_apply_permutation_moves_values() {
        let data = vec![String::from("x"), String::from("y"), String::from("z")];
        assert_eq!(apply_permutation(data, &[2, 0, 1]), vec!["z", "x", "y"]);
    }

    #[test]
    fn test_coalesce_folds_left_to_right() {
        let (values, rows, cols) = coalesce_matrix_entries(
            vec![1, 2, 3, 4],
            vec![0, 1, 0, 0],
            vec![0, 0, 0, 0],
            |acc, next| acc * 10 + next,
        );
        assert_eq!(values, vec![134, 2]);
        assert_eq!(rows, vec![0, 1]);
        assert_eq!(cols, vec![0, 0]);
    }

    #[test]
    fn test_coalesce_empty() {
        let (values, indices) = coalesce_vector_entries(Vec::<f64>::new(), vec![], |a, b| a + b);
        assert!(values.is_empty());
        assert!(indices.is_empty());
    }

    #[test]
    fn test_coalesce_vector_entries() {
        let (values, indices) =
            coalesce_vector_entries(vec![1.0, 2.0, 4.0], vec![3, 1, 3], |a, b| a + b);
        assert_eq!(values, vec![2.0, 5.0]);
        assert_eq!(indices, vec![1, 3]);
    }
}
