//! Basic Sparse Matrix Operations Example
//!
//! This example demonstrates fundamental sparse matrix operations including:
//! - Building COO matrices from unsorted triplets with duplicates
//! - Coalescing and converting between COO, CSR and dense
//! - Sparse matrix-vector and matrix-matrix products
//! - Products over a non-numeric semiring
//!
//! Run with: cargo run --example basic_sparse_ops

use ringmat_sparse::{mult_with_hints, CooMatrix, CooVector, CsrMatrix, MatMulHints, Product};
use scirs2_core::ndarray_ext::array;

fn main() -> anyhow::Result<()> {
    println!("=== ringmat-sparse: Basic Operations Example ===\n");

    // 1. Create a sparse matrix using COO format
    println!("1. Creating a 5x5 sparse matrix from unsorted triplets...");
    let rows = vec![2, 0, 1, 0, 2, 3, 4, 0];
    let cols = vec![3, 2, 1, 0, 0, 4, 2, 0];
    let values = vec![6.0, 3.0, 8.0, 5.0, 2.0, 1.0, 4.0, 0.5];

    let coo = CooMatrix::new(rows, cols, values, (5, 5))?;
    println!(
        "   COO matrix: {} stored entries, sorted: {}, density: {:.1}%",
        coo.nnz(),
        coo.is_sorted(),
        coo.density() * 100.0
    );
    println!("   A[0, 0] sums the duplicates: {}\n", coo.get(0, 0)?);

    // 2. Coalesce and convert to CSR for efficient row operations
    println!("2. Coalescing and converting to CSR...");
    let coalesced = coo.coalesce();
    let csr = CsrMatrix::from_coo(&coalesced);
    println!(
        "   CSR matrix: {}x{}, {} non-zeros, row pointers {:?}",
        csr.nrows(),
        csr.ncols(),
        csr.nnz(),
        csr.row_pointers()
    );
    println!("   Equal to the raw COO input: {}\n", csr == coo);

    // 3. Sparse Matrix-Vector Multiplication
    println!("3. Performing SpMV (y = A * x)...");
    let x = array![1.0, 2.0, 3.0, 4.0, 5.0];
    let y = csr.mult_vec(&x.view())?;
    println!("   Input vector:  {}", x);
    println!("   Output vector: {}", y);

    let sparse_x = CooVector::new(vec![0, 4], vec![1.0, 1.0], 5)?;
    let sparse_y = csr.mult_sparse_vec_to_sparse(&sparse_x)?;
    println!(
        "   Sparse input touches {} rows: {:?}\n",
        sparse_y.nnz(),
        sparse_y.indices()
    );

    // 4. Sparse Matrix-Matrix Multiplication
    println!("4. Performing SpMM (C = A * B) with dense B...");
    let b = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 1.0], [1.0, 0.0]];
    let c = csr.mult_dense(&b.view())?;
    println!("   Result shape: {}x{}", c.nrows(), c.ncols());
    println!("   Result:\n{}\n", c);

    // 5. Sparse x sparse with automatic result format
    println!("5. Squaring A with automatic result format...");
    match mult_with_hints(&csr, &csr, &MatMulHints::default())? {
        Product::Sparse(p) => println!("   Sparse result with {} non-zeros", p.nnz()),
        Product::Dense(p) => println!("   Dense result:\n{}", p),
    }
    println!("   A^3 trace: {}\n", csr.pow(3)?.diag().sum());

    // 6. Boolean semiring: reachability in two steps
    println!("6. Reachability over the boolean semiring...");
    let adjacency = CooMatrix::new(vec![0, 1, 2], vec![1, 2, 3], vec![true; 3], (4, 4))?;
    let two_steps = adjacency.mult_to_sparse(&adjacency)?;
    for (from, to, _) in two_steps.iter() {
        println!("   {} reaches {} in two steps", from, to);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
