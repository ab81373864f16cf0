//! Reachability with the boolean semiring
//!
//! Squaring an adjacency matrix over (OR, AND) gives the pairs connected by a walk of length
//! two. The same `dense::matmul` over `u64` counts those walks instead.
//!
//! Run with: cargo run --example semiring_paths

use ringmat_core::{dense, CoreResult};
use scirs2_core::ndarray_ext::Array2;

fn main() -> CoreResult<()> {
    // 0 -> 1 -> 2 -> 3, plus 0 -> 2
    let edges = [(0, 1), (1, 2), (2, 3), (0, 2)];
    let n = 4;

    let mut reach = dense::zeros::<bool>(n, n);
    let mut count = dense::zeros::<u64>(n, n);
    for &(from, to) in &edges {
        reach[[from, to]] = true;
        count[[from, to]] = 1;
    }

    let reach2 = dense::matmul(&reach.view(), &reach.view())?;
    let count2 = dense::matmul(&count.view(), &count.view())?;

    println!("Pairs joined by a walk of length 2:");
    print_pairs(&reach2, &count2);
    Ok(())
}

fn print_pairs(reach: &Array2<bool>, count: &Array2<u64>) {
    for ((i, j), &connected) in reach.indexed_iter() {
        if connected {
            println!("  {} -> {} ({} walks)", i, j, count[[i, j]]);
        }
    }
}
