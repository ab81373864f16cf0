//! Sparse matrix multiplication kernels
//!
//! # Kernels
//!
//! | left  | right          | result        | function                      |
//! |-------|----------------|---------------|-------------------------------|
//! | COO   | COO            | dense         | [`coo_mult_coo`]              |
//! | COO   | COO            | COO           | [`coo_mult_coo_to_sparse`]    |
//! | CSR   | CSR            | dense         | [`csr_mult_csr`]              |
//! | CSR   | CSR            | CSR           | [`csr_mult_csr_to_sparse`]    |
//! | COO   | dense          | dense         | [`coo_mult_dense`]            |
//! | CSR   | dense          | dense         | [`csr_mult_dense`]            |
//! | dense | CSR            | dense         | [`dense_mult_csr`]            |
//! | CSR   | dense vector   | dense vector  | [`csr_mult_vec`]              |
//! | CSR   | sparse vector  | dense / COO   | [`csr_mult_sparse_vec`], [`csr_mult_sparse_vec_to_sparse`] |
//!
//! The container methods (`mult`, `mult_to_sparse`, `mult_dense`, `mult_vec`,
//! `mult_sparse_vec`, `mult_transpose`, `pow`) delegate to these.
//!
//! # Accumulation order
//!
//! Every kernel visits the left operand in row-major order and, for each left entry
//! `(i, k)`, the right operand's row `k` in ascending column order. Each output entry is
//! therefore a left-to-right sum over ascending `k`, the same order as
//! [`ringmat_core::dense::matmul`]. For floating point values the sparse and dense products
//! of the same operands agree exactly.
//!
//! # Errors
//!
//! Inner-dimension mismatches are reported as `ShapeError` before any work is done.
//!
//! # Examples
//!
//! ```
//! use ringmat_sparse::CooMatrix;
//! use scirs2_core::ndarray_ext::array;
//!
//! let a = CooMatrix::new(vec![0, 1, 2], vec![0, 2, 1], vec![2.0, 3.0, 4.0], (3, 3)).unwrap();
//! let sq = a.mult(&a).unwrap();
//! assert_eq!(sq, array![[4.0, 0.0, 0.0], [0.0, 12.0, 0.0], [0.0, 0.0, 12.0]]);
//!
//! let cube = a.pow(3).unwrap();
//! assert_eq!(cube[[0, 0]], 8.0);
//! ```

use ringmat_core::Semiring;
use scirs2_core::ndarray_ext::{Array1, Array2, ArrayView1, ArrayView2};

use crate::coo::CooMatrix;
use crate::csr::CsrMatrix;
use crate::error::{SparseError, SparseResult};
use crate::vector::CooVector;

// ============================================================================
// Shape checks
// ============================================================================

fn check_inner(left: (usize, usize), right: (usize, usize)) -> SparseResult<()> {
    if left.1 != right.0 {
        return Err(SparseError::matmul(left, right));
    }
    Ok(())
}

fn check_vec(matrix: (usize, usize), len: usize) -> SparseResult<()> {
    if matrix.1 != len {
        return Err(SparseError::matvec(matrix, len));
    }
    Ok(())
}

// ============================================================================
// Sparse accumulator
// ============================================================================

/// Dense-indexed accumulator for one output row
///
/// Holds a slot per output column plus the list of touched columns, so clearing between
/// rows costs O(touched) rather than O(ncols).
pub(crate) struct SparseAccumulator<T> {
    slots: Vec<Option<T>>,
    touched: Vec<usize>,
}

impl<T: Semiring> SparseAccumulator<T> {
    pub(crate) fn new(ncols: usize) -> Self {
        Self {
            slots: vec![None; ncols],
            touched: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn accumulate(&mut self, col: usize, value: T) {
        let slot = &mut self.slots[col];
        match slot {
            Some(acc) => *acc = acc.add(&value),
            None => {
                *slot = Some(value);
                self.touched.push(col);
            }
        }
    }

    /// Accumulate `a_val * B[k, :]` for one left entry
    #[inline]
    pub(crate) fn scatter_row(&mut self, a_val: &T, b: &CsrMatrix<T>, k: usize) {
        let start = b.row_pointers()[k];
        let end = b.row_pointers()[k + 1];
        for (&j, b_val) in b.col_indices()[start..end]
            .iter()
            .zip(&b.values()[start..end])
        {
            self.accumulate(j, a_val.mul(b_val));
        }
    }

    /// Move the accumulated row into `cols`/`vals` in ascending column order, dropping zero
    /// sums, and reset
    pub(crate) fn drain_into(&mut self, cols: &mut Vec<usize>, vals: &mut Vec<T>) {
        self.touched.sort_unstable();
        for &j in &self.touched {
            if let Some(v) = self.slots[j].take() {
                if !v.is_zero() {
                    cols.push(j);
                    vals.push(v);
                }
            }
        }
        self.touched.clear();
    }
}

/// Compute one row of `A · B` as sorted `(cols, vals)`
#[cfg_attr(not(feature = "parallel"), allow(dead_code))]
pub(crate) fn csr_row_product<T: Semiring>(
    a: &CsrMatrix<T>,
    b: &CsrMatrix<T>,
    i: usize,
    acc: &mut SparseAccumulator<T>,
) -> (Vec<usize>, Vec<T>) {
    let start = a.row_pointers()[i];
    let end = a.row_pointers()[i + 1];
    for (&k, a_val) in a.col_indices()[start..end]
        .iter()
        .zip(&a.values()[start..end])
    {
        acc.scatter_row(a_val, b, k);
    }
    let mut cols = Vec::new();
    let mut vals = Vec::new();
    acc.drain_into(&mut cols, &mut vals);
    (cols, vals)
}

// ============================================================================
// Sparse × sparse
// ============================================================================

/// COO × COO with a dense result
///
/// The right operand's entries are grouped by row (contraction index) first; each left
/// entry `(i, k, v)` then scans row `k` of the right operand.
///
/// # Complexity
///
/// O(nnz_a × avg_nnz_row_b + nrows_a × ncols_b)
pub fn coo_mult_coo<T: Semiring>(a: &CooMatrix<T>, b: &CooMatrix<T>) -> SparseResult<Array2<T>> {
    check_inner(a.shape(), b.shape())?;
    let a = a.ensure_sorted();
    let b_rows = CsrMatrix::from_coo(b);
    Ok(scatter_dense(a.iter(), &b_rows, (a.nrows(), b.ncols())))
}

/// COO × COO with a COO result
///
/// Partial products are collected as `(i, j, partial)` triples, coalesced by addition and
/// stripped of zero sums. The result is sorted.
pub fn coo_mult_coo_to_sparse<T: Semiring>(
    a: &CooMatrix<T>,
    b: &CooMatrix<T>,
) -> SparseResult<CooMatrix<T>> {
    check_inner(a.shape(), b.shape())?;
    let a = a.ensure_sorted();
    let b_rows = CsrMatrix::from_coo(b);

    let mut rows = Vec::new();
    let mut cols = Vec::new();
    let mut vals = Vec::new();
    for (i, k, a_val) in a.iter() {
        let (b_cols, b_vals) = row_slices(&b_rows, k);
        for (&j, b_val) in b_cols.iter().zip(b_vals) {
            rows.push(i);
            cols.push(j);
            vals.push(a_val.mul(b_val));
        }
    }

    let partials = CooMatrix::from_parts_unchecked(rows, cols, vals, (a.nrows(), b.ncols()));
    Ok(partials.coalesce().drop_zeros())
}

/// CSR × CSR with a dense result
pub fn csr_mult_csr<T: Semiring>(a: &CsrMatrix<T>, b: &CsrMatrix<T>) -> SparseResult<Array2<T>> {
    check_inner(a.shape(), b.shape())?;
    Ok(scatter_dense(a.iter(), b, (a.nrows(), b.ncols())))
}

/// CSR × CSR with a CSR result
///
/// Row-by-row Gustavson product with a sparse accumulator reused across rows. Zero sums
/// are not stored.
///
/// # Complexity
///
/// O(flops + Σ touched_row log touched_row)
pub fn csr_mult_csr_to_sparse<T: Semiring>(
    a: &CsrMatrix<T>,
    b: &CsrMatrix<T>,
) -> SparseResult<CsrMatrix<T>> {
    check_inner(a.shape(), b.shape())?;
    let mut acc = SparseAccumulator::new(b.ncols());
    let mut row_pointers = Vec::with_capacity(a.nrows() + 1);
    let mut col_indices = Vec::new();
    let mut values = Vec::new();
    row_pointers.push(0);

    for i in 0..a.nrows() {
        let (start, end) = (a.row_pointers()[i], a.row_pointers()[i + 1]);
        for (&k, a_val) in a.col_indices()[start..end]
            .iter()
            .zip(&a.values()[start..end])
        {
            acc.scatter_row(a_val, b, k);
        }
        acc.drain_into(&mut col_indices, &mut values);
        row_pointers.push(values.len());
    }

    Ok(CsrMatrix::from_parts_unchecked(
        row_pointers,
        col_indices,
        values,
        (a.nrows(), b.ncols()),
    ))
}

fn row_slices<T>(m: &CsrMatrix<T>, k: usize) -> (&[usize], &[T]) {
    let start = m.row_pointers()[k];
    let end = m.row_pointers()[k + 1];
    (&m.col_indices()[start..end], &m.values()[start..end])
}

/// Accumulate `Σ a_ik · B[k, :]` into a dense output, visiting `a_entries` in order
fn scatter_dense<'a, T, I>(a_entries: I, b: &CsrMatrix<T>, shape: (usize, usize)) -> Array2<T>
where
    T: Semiring + 'a,
    I: Iterator<Item = (usize, usize, &'a T)>,
{
    let mut c = Array2::from_elem(shape, T::zero());
    for (i, k, a_val) in a_entries {
        let (b_cols, b_vals) = row_slices(b, k);
        for (&j, b_val) in b_cols.iter().zip(b_vals) {
            c[[i, j]] = c[[i, j]].add(&a_val.mul(b_val));
        }
    }
    c
}

// ============================================================================
// Sparse × dense and dense × sparse
// ============================================================================

/// COO × dense matrix
pub fn coo_mult_dense<T: Semiring>(
    a: &CooMatrix<T>,
    b: &ArrayView2<T>,
) -> SparseResult<Array2<T>> {
    check_inner(a.shape(), b.dim())?;
    let a = a.ensure_sorted();
    Ok(scatter_dense_rows(a.iter(), b, (a.nrows(), b.ncols())))
}

/// CSR × dense matrix
///
/// # Complexity
///
/// O(nnz × ncols_b)
pub fn csr_mult_dense<T: Semiring>(
    a: &CsrMatrix<T>,
    b: &ArrayView2<T>,
) -> SparseResult<Array2<T>> {
    check_inner(a.shape(), b.dim())?;
    Ok(scatter_dense_rows(a.iter(), b, (a.nrows(), b.ncols())))
}

fn scatter_dense_rows<'a, T, I>(a_entries: I, b: &ArrayView2<T>, shape: (usize, usize)) -> Array2<T>
where
    T: Semiring + 'a,
    I: Iterator<Item = (usize, usize, &'a T)>,
{
    let mut c = Array2::from_elem(shape, T::zero());
    for (i, k, a_val) in a_entries {
        for j in 0..shape.1 {
            c[[i, j]] = c[[i, j]].add(&a_val.mul(&b[[k, j]]));
        }
    }
    c
}

/// Dense × CSR
///
/// For each dense row `i` and each non-zero `a_ik`, row `k` of the sparse operand is
/// scattered into output row `i`.
pub fn dense_mult_csr<T: Semiring>(
    a: &ArrayView2<T>,
    b: &CsrMatrix<T>,
) -> SparseResult<Array2<T>> {
    check_inner(a.dim(), b.shape())?;
    let (m, inner) = a.dim();
    let mut c = Array2::from_elem((m, b.ncols()), T::zero());
    for i in 0..m {
        for k in 0..inner {
            let a_val = &a[[i, k]];
            if a_val.is_zero() {
                continue;
            }
            let (b_cols, b_vals) = row_slices(b, k);
            for (&j, b_val) in b_cols.iter().zip(b_vals) {
                c[[i, j]] = c[[i, j]].add(&a_val.mul(b_val));
            }
        }
    }
    Ok(c)
}

/// Dense × COO, see [`dense_mult_csr`]
pub fn dense_mult_coo<T: Semiring>(
    a: &ArrayView2<T>,
    b: &CooMatrix<T>,
) -> SparseResult<Array2<T>> {
    check_inner(a.dim(), b.shape())?;
    dense_mult_csr(a, &CsrMatrix::from_coo(b))
}

// ============================================================================
// Sparse × vector
// ============================================================================

/// CSR × dense vector
pub fn csr_mult_vec<T: Semiring>(a: &CsrMatrix<T>, x: &ArrayView1<T>) -> SparseResult<Array1<T>> {
    check_vec(a.shape(), x.len())?;
    let mut y = Array1::from_elem(a.nrows(), T::zero());
    for (i, j, v) in a.iter() {
        y[i] = y[i].add(&v.mul(&x[j]));
    }
    Ok(y)
}

/// COO × dense vector
pub fn coo_mult_vec<T: Semiring>(a: &CooMatrix<T>, x: &ArrayView1<T>) -> SparseResult<Array1<T>> {
    check_vec(a.shape(), x.len())?;
    let a = a.ensure_sorted();
    let mut y = Array1::from_elem(a.nrows(), T::zero());
    for (i, j, v) in a.iter() {
        y[i] = y[i].add(&v.mul(&x[j]));
    }
    Ok(y)
}

/// Per-row sums `Σ_j a_ij · x_j` over the vector's non-zeros, `None` for rows with no
/// matching column
fn sparse_vec_row_sums<T: Semiring>(a: &CsrMatrix<T>, x: &CooVector<T>) -> Vec<Option<T>> {
    let x = x.coalesce();
    (0..a.nrows())
        .map(|i| {
            let (cols, vals) = row_slices(a, i);
            cols.iter().zip(vals).fold(None, |acc: Option<T>, (&j, v)| {
                match x.indices().binary_search(&j) {
                    Ok(pos) => {
                        let prod = v.mul(&x.values()[pos]);
                        Some(match acc {
                            Some(sum) => sum.add(&prod),
                            None => prod,
                        })
                    }
                    Err(_) => acc,
                }
            })
        })
        .collect()
}

/// CSR × sparse vector with a dense result
pub fn csr_mult_sparse_vec<T: Semiring>(
    a: &CsrMatrix<T>,
    x: &CooVector<T>,
) -> SparseResult<Array1<T>> {
    check_vec(a.shape(), x.size())?;
    Ok(sparse_vec_row_sums(a, x)
        .into_iter()
        .map(|s| s.unwrap_or_else(T::zero))
        .collect())
}

/// CSR × sparse vector with a sparse result
///
/// Rows whose sum is zero are not stored.
pub fn csr_mult_sparse_vec_to_sparse<T: Semiring>(
    a: &CsrMatrix<T>,
    x: &CooVector<T>,
) -> SparseResult<CooVector<T>> {
    check_vec(a.shape(), x.size())?;
    let (indices, values) = sparse_vec_row_sums(a, x)
        .into_iter()
        .enumerate()
        .filter_map(|(i, s)| s.filter(|v| !v.is_zero()).map(|v| (i, v)))
        .unzip();
    Ok(CooVector::from_parts_unchecked(indices, values, a.nrows()))
}

// ============================================================================
// Matrix power
// ============================================================================

fn check_pow(shape: (usize, usize), exponent: i32) -> SparseResult<()> {
    if shape.0 != shape.1 {
        return Err(SparseError::not_square(shape));
    }
    if exponent < 0 {
        return Err(SparseError::invalid_argument(format!(
            "exponent must be non-negative, got {}",
            exponent
        )));
    }
    Ok(())
}

/// `A^exponent` as a dense matrix
///
/// `A^0` is the identity and `A^1` the dense image of `A`. Higher powers take one
/// sparse × sparse product followed by dense × sparse products.
///
/// # Errors
///
/// - `ShapeError::NotSquare` if `A` is not square
/// - `InvalidArgument` if `exponent` is negative
pub fn csr_pow<T: Semiring>(a: &CsrMatrix<T>, exponent: i32) -> SparseResult<Array2<T>> {
    check_pow(a.shape(), exponent)?;
    match exponent {
        0 => {
            log::debug!("matrix power: exponent 0, returning identity");
            Ok(ringmat_core::dense::identity(a.nrows()))
        }
        1 => Ok(a.to_dense()),
        _ => {
            log::debug!(
                "matrix power: exponent {} on {}x{} with nnz {}, one sparse product then {} dense x sparse products",
                exponent,
                a.nrows(),
                a.ncols(),
                a.nnz(),
                exponent - 2
            );
            let mut result = csr_mult_csr(a, a)?;
            for _ in 2..exponent {
                result = dense_mult_csr(&result.view(), a)?;
            }
            Ok(result)
        }
    }
}

// ============================================================================
// Hints
// ============================================================================

/// Preferred result format for [`mult_with_hints`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResultFormat {
    /// Always a dense result
    Dense,
    /// Always a CSR result
    Sparse,
    /// Pick by estimated output density
    #[default]
    Auto,
}

/// Runtime configuration for CSR × CSR products
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatMulHints {
    /// Result format preference
    pub result_format: ResultFormat,
    /// With `ResultFormat::Auto`, a dense result is chosen when the estimated output
    /// density reaches this value
    pub dense_threshold: f64,
    /// Row-parallel kernels are used when the left operand has at least this many rows
    pub parallel_row_threshold: usize,
}

impl Default for MatMulHints {
    fn default() -> Self {
        Self {
            result_format: ResultFormat::Auto,
            dense_threshold: 0.1,
            parallel_row_threshold: 1024,
        }
    }
}

impl MatMulHints {
    pub fn dense() -> Self {
        Self {
            result_format: ResultFormat::Dense,
            ..Self::default()
        }
    }

    pub fn sparse() -> Self {
        Self {
            result_format: ResultFormat::Sparse,
            ..Self::default()
        }
    }

    pub fn with_parallel_row_threshold(mut self, rows: usize) -> Self {
        self.parallel_row_threshold = rows;
        self
    }
}

/// Output of [`mult_with_hints`]
#[derive(Debug, Clone)]
pub enum Product<T> {
    Dense(Array2<T>),
    Sparse(CsrMatrix<T>),
}

impl<T: Semiring> Product<T> {
    /// Dense image regardless of format
    pub fn into_dense(self) -> Array2<T> {
        match self {
            Product::Dense(d) => d,
            Product::Sparse(s) => s.to_dense(),
        }
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, Product::Sparse(_))
    }
}

/// Estimated number of stored entries in `A · B`
///
/// Counts the products the Gustavson kernel would form, capped by the output size.
pub fn estimate_output_nnz<T>(a: &CsrMatrix<T>, b: &CsrMatrix<T>) -> usize {
    let b_row_nnz = b.nnz_per_row();
    let flops: usize = a.col_indices().iter().map(|&k| b_row_nnz[k]).sum();
    flops.min(a.nrows().saturating_mul(b.ncols()))
}

/// CSR × CSR product with result format and parallelism chosen by `hints`
pub fn mult_with_hints<T>(
    a: &CsrMatrix<T>,
    b: &CsrMatrix<T>,
    hints: &MatMulHints,
) -> SparseResult<Product<T>>
where
    T: Semiring + Send + Sync,
{
    check_inner(a.shape(), b.shape())?;
    let parallel = a.nrows() >= hints.parallel_row_threshold;

    let sparse = match hints.result_format {
        ResultFormat::Dense => false,
        ResultFormat::Sparse => true,
        ResultFormat::Auto => {
            let total = a.nrows() as f64 * b.ncols() as f64;
            let density = if total == 0.0 {
                0.0
            } else {
                estimate_output_nnz(a, b) as f64 / total
            };
            log::debug!(
                "mult_with_hints: estimated output density {:.4} (dense threshold {})",
                density,
                hints.dense_threshold
            );
            density < hints.dense_threshold
        }
    };

    log::trace!(
        "mult_with_hints: {}x{} * {}x{}, sparse result: {}, parallel: {}",
        a.nrows(),
        a.ncols(),
        b.nrows(),
        b.ncols(),
        sparse,
        parallel
    );

    match (sparse, parallel) {
        (true, true) => Ok(Product::Sparse(crate::parallel::par_csr_mult_csr(a, b)?)),
        (true, false) => Ok(Product::Sparse(csr_mult_csr_to_sparse(a, b)?)),
        (false, true) => Ok(Product::Dense(crate::parallel::par_csr_mult_csr_dense(a, b)?)),
        (false, false) => Ok(Product::Dense(csr_mult_csr(a, b)?)),
    }
}

// ============================================================================
// Container methods
// ============================================================================

impl<T: Semiring> CooMatrix<T> {
    /// Matrix product `self · b` with a dense result
    ///
    /// # Errors
    ///
    /// `ShapeError::MatMul` if `self.ncols() != b.nrows()`.
    pub fn mult(&self, b: &Self) -> SparseResult<Array2<T>> {
        coo_mult_coo(self, b)
    }

    /// Matrix product `self · b` with a sorted, coalesced COO result
    pub fn mult_to_sparse(&self, b: &Self) -> SparseResult<Self> {
        coo_mult_coo_to_sparse(self, b)
    }

    /// Matrix product with a CSR right operand
    pub fn mult_csr(&self, b: &CsrMatrix<T>) -> SparseResult<Array2<T>> {
        check_inner(self.shape(), b.shape())?;
        let a = self.ensure_sorted();
        Ok(scatter_dense(a.iter(), b, (self.nrows(), b.ncols())))
    }

    /// Matrix product with a dense right operand
    pub fn mult_dense(&self, b: &ArrayView2<T>) -> SparseResult<Array2<T>> {
        coo_mult_dense(self, b)
    }

    /// `self · bᵀ` with a dense result
    pub fn mult_transpose(&self, b: &Self) -> SparseResult<Array2<T>> {
        coo_mult_coo(self, &b.transpose())
    }

    /// Matrix-vector product with a dense vector
    pub fn mult_vec(&self, x: &ArrayView1<T>) -> SparseResult<Array1<T>> {
        coo_mult_vec(self, x)
    }

    /// Matrix-vector product with a sparse vector, as a dense vector
    pub fn mult_sparse_vec(&self, x: &CooVector<T>) -> SparseResult<Array1<T>> {
        check_vec(self.shape(), x.size())?;
        csr_mult_sparse_vec(&self.to_csr(), x)
    }

    /// Matrix-vector product with a sparse vector, as a sparse vector
    pub fn mult_sparse_vec_to_sparse(&self, x: &CooVector<T>) -> SparseResult<CooVector<T>> {
        check_vec(self.shape(), x.size())?;
        csr_mult_sparse_vec_to_sparse(&self.to_csr(), x)
    }

    /// `self^exponent` as a dense matrix, see [`csr_pow`]
    pub fn pow(&self, exponent: i32) -> SparseResult<Array2<T>> {
        check_pow(self.shape(), exponent)?;
        csr_pow(&self.to_csr(), exponent)
    }
}

impl<T: Semiring> CsrMatrix<T> {
    /// Matrix product `self · b` with a dense result
    pub fn mult(&self, b: &Self) -> SparseResult<Array2<T>> {
        csr_mult_csr(self, b)
    }

    /// Matrix product `self · b` with a CSR result
    pub fn mult_to_sparse(&self, b: &Self) -> SparseResult<Self> {
        csr_mult_csr_to_sparse(self, b)
    }

    /// Matrix product with a COO right operand
    pub fn mult_coo(&self, b: &CooMatrix<T>) -> SparseResult<Array2<T>> {
        check_inner(self.shape(), b.shape())?;
        csr_mult_csr(self, &b.to_csr())
    }

    /// Matrix product with a dense right operand
    pub fn mult_dense(&self, b: &ArrayView2<T>) -> SparseResult<Array2<T>> {
        csr_mult_dense(self, b)
    }

    /// `self · bᵀ` with a dense result
    pub fn mult_transpose(&self, b: &Self) -> SparseResult<Array2<T>> {
        csr_mult_csr(self, &b.transpose())
    }

    /// Matrix-vector product with a dense vector
    pub fn mult_vec(&self, x: &ArrayView1<T>) -> SparseResult<Array1<T>> {
        csr_mult_vec(self, x)
    }

    /// Matrix-vector product with a sparse vector, as a dense vector
    pub fn mult_sparse_vec(&self, x: &CooVector<T>) -> SparseResult<Array1<T>> {
        csr_mult_sparse_vec(self, x)
    }

    /// Matrix-vector product with a sparse vector, as a sparse vector
    pub fn mult_sparse_vec_to_sparse(&self, x: &CooVector<T>) -> SparseResult<CooVector<T>> {
        csr_mult_sparse_vec_to_sparse(self, x)
    }

    /// `self^exponent` as a dense matrix, see [`csr_pow`]
    pub fn pow(&self, exponent: i32) -> SparseResult<Array2<T>> {
        csr_pow(self, exponent)
    }
}
