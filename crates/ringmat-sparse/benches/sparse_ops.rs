//! Benchmarks for sparse matrix operations
//!
//! Compares the COO and CSR kernels against dense baselines, and the row-parallel
//! kernels against their sequential counterparts.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ringmat_core::dense;
use ringmat_sparse::{matmul, parallel, CooMatrix, CsrMatrix};
use scirs2_core::ndarray_ext::{Array1, Array2};
use std::hint::black_box;

/// Generate a random unsorted COO matrix with specified density
///
/// Coordinates may repeat, which exercises coalescing.
fn random_coo(nrows: usize, ncols: usize, density: f64) -> CooMatrix<f64> {
    let nnz = ((nrows * ncols) as f64 * density).max(1.0) as usize;

    let mut rows = Vec::with_capacity(nnz);
    let mut cols = Vec::with_capacity(nnz);
    let mut values = Vec::with_capacity(nnz);

    // Simple pseudo-random generation for reproducibility
    let mut seed = 12345u64;
    for _ in 0..nnz {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        rows.push((seed % nrows as u64) as usize);
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        cols.push((seed % ncols as u64) as usize);
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        values.push((seed % 10000) as f64 / 10000.0);
    }

    CooMatrix::new(rows, cols, values, (nrows, ncols)).expect("Failed to create COO")
}

fn random_csr(nrows: usize, ncols: usize, density: f64) -> CsrMatrix<f64> {
    random_coo(nrows, ncols, density).coalesce().to_csr()
}

/// Generate a random dense matrix
fn random_dense_matrix(nrows: usize, ncols: usize) -> Array2<f64> {
    let mut seed = 54321u64;
    Array2::from_shape_fn((nrows, ncols), |_| {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        (seed % 10000) as f64 / 10000.0
    })
}

/// Generate a random dense vector
fn random_dense_vector(size: usize) -> Array1<f64> {
    let mut seed = 98765u64;
    Array1::from_shape_fn(size, |_| {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        (seed % 10000) as f64 / 10000.0
    })
}

/// Benchmark sorting and coalescing of unsorted COO input
fn bench_sort_coalesce(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_coalesce");

    for size in [100, 500, 1000].iter() {
        for density in [0.01, 0.05].iter() {
            let coo = random_coo(*size, *size, *density);
            group.throughput(Throughput::Elements(coo.nnz() as u64));
            let id = format!("{}x{}_d{}", size, size, density);

            group.bench_with_input(BenchmarkId::new("sort", &id), &coo, |b, coo| {
                b.iter(|| black_box(coo.sort_indices()));
            });
            group.bench_with_input(BenchmarkId::new("coalesce", &id), &coo, |b, coo| {
                b.iter(|| black_box(coo.coalesce()));
            });
            group.bench_with_input(BenchmarkId::new("par_sort", &id), &coo, |b, coo| {
                b.iter(|| black_box(parallel::par_sort_coo(coo)));
            });
        }
    }

    group.finish();
}

/// Benchmark format conversions
fn bench_format_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_conversion");

    for size in [100, 500, 1000].iter() {
        for density in [0.01, 0.05, 0.1].iter() {
            let coo = random_coo(*size, *size, *density);
            let csr = coo.to_csr();
            let id = format!("{}x{}_d{}", size, size, density);

            group.throughput(Throughput::Elements(coo.nnz() as u64));

            // COO -> CSR
            group.bench_with_input(BenchmarkId::new("coo_to_csr", &id), &coo, |b, coo| {
                b.iter(|| black_box(CsrMatrix::from_coo(black_box(coo))));
            });

            // CSR -> COO
            group.bench_with_input(BenchmarkId::new("csr_to_coo", &id), &csr, |b, csr| {
                b.iter(|| black_box(csr.to_coo()));
            });

            // CSR -> dense
            group.bench_with_input(BenchmarkId::new("csr_to_dense", &id), &csr, |b, csr| {
                b.iter(|| black_box(csr.to_dense()));
            });
        }
    }

    group.finish();
}

/// Benchmark SpMV (Sparse Matrix-Vector) operations
fn bench_spmv(c: &mut Criterion) {
    let mut group = c.benchmark_group("spmv");

    for size in [100, 500, 1000].iter() {
        for density in [0.01, 0.05, 0.1].iter() {
            let csr = random_csr(*size, *size, *density);
            let x = random_dense_vector(*size);

            group.throughput(Throughput::Elements(csr.nnz() as u64));

            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}x{}_d{}", size, size, density)),
                &(csr, x),
                |b, (csr, x)| {
                    b.iter(|| {
                        let result = csr.mult_vec(black_box(&x.view()));
                        let _ = black_box(result);
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark sparse × dense products against the dense baseline
fn bench_spmm(c: &mut Criterion) {
    let mut group = c.benchmark_group("spmm");

    for size in [100, 300].iter() {
        for k in [10, 50].iter() {
            for density in [0.01, 0.1].iter() {
                let csr = random_csr(*size, *size, *density);
                let b = random_dense_matrix(*size, *k);
                let id = format!("{}x{}_k{}_d{}", size, size, k, density);

                group.throughput(Throughput::Elements((csr.nnz() * k) as u64));

                group.bench_with_input(
                    BenchmarkId::new("csr", &id),
                    &(&csr, &b),
                    |bench, (csr, b)| {
                        bench.iter(|| black_box(csr.mult_dense(&b.view()).expect("SpMM failed")));
                    },
                );

                let a_dense = csr.to_dense();
                group.bench_with_input(
                    BenchmarkId::new("dense", &id),
                    &(a_dense, &b),
                    |bench, (a, b)| {
                        bench.iter(|| {
                            black_box(dense::matmul(&a.view(), &b.view()).expect("matmul failed"))
                        });
                    },
                );
            }
        }
    }

    group.finish();
}

/// Benchmark sparse × sparse products with dense and sparse results
fn bench_spspmm(c: &mut Criterion) {
    let mut group = c.benchmark_group("spspmm");

    for size in [100, 500].iter() {
        for density in [0.01, 0.05].iter() {
            let a = random_csr(*size, *size, *density);
            let b = random_csr(*size, *size, *density);
            let id = format!("{}x{}_d{}", size, size, density);

            let ops = (a.nnz() * b.nnz() / size) as u64;
            group.throughput(Throughput::Elements(ops.max(1)));

            group.bench_with_input(BenchmarkId::new("csr_sparse", &id), &(&a, &b), |bench, (a, b)| {
                bench.iter(|| black_box(a.mult_to_sparse(black_box(b)).expect("SpSpMM failed")));
            });
            group.bench_with_input(BenchmarkId::new("csr_dense", &id), &(&a, &b), |bench, (a, b)| {
                bench.iter(|| black_box(a.mult(black_box(b)).expect("SpSpMM failed")));
            });

            let (ca, cb) = (a.to_coo(), b.to_coo());
            group.bench_with_input(BenchmarkId::new("coo_sparse", &id), &(ca, cb), |bench, (a, b)| {
                bench.iter(|| black_box(a.mult_to_sparse(black_box(b)).expect("SpSpMM failed")));
            });
        }
    }

    group.finish();
}

/// Benchmark automatic result-format selection
fn bench_hints(c: &mut Criterion) {
    let mut group = c.benchmark_group("mult_with_hints");

    for density in [0.001, 0.01, 0.1].iter() {
        let a = random_csr(400, 400, *density);
        let hints = matmul::MatMulHints::default();

        group.bench_with_input(BenchmarkId::from_parameter(density), &a, |bench, a| {
            bench.iter(|| {
                black_box(matmul::mult_with_hints(a, a, &hints).expect("product failed"))
            });
        });
    }

    group.finish();
}

/// Benchmark elementwise operations
fn bench_element_wise_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("element_wise");

    for size in [100, 500].iter() {
        let a = random_coo(*size, *size, 0.05).coalesce();
        let b = random_coo(*size, *size, 0.05).t();
        group.throughput(Throughput::Elements((a.nnz() + b.nnz()) as u64));

        group.bench_with_input(BenchmarkId::new("add", size), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(a.add(b).expect("add failed")));
        });
        group.bench_with_input(BenchmarkId::new("elem_mult", size), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(a.elem_mult(b).expect("elem_mult failed")));
        });
    }

    group.finish();
}

/// Benchmark sequential vs parallel kernels
fn bench_seq_vs_par(c: &mut Criterion) {
    let mut group = c.benchmark_group("seq_vs_par");

    for size in [500, 2000].iter() {
        let csr = random_csr(*size, *size, 0.01);
        let x = random_dense_vector(*size);

        group.bench_with_input(BenchmarkId::new("spmv_seq", size), &(&csr, &x), |b, (csr, x)| {
            b.iter(|| black_box(csr.mult_vec(&x.view()).expect("SpMV failed")));
        });
        group.bench_with_input(BenchmarkId::new("spmv_par", size), &(&csr, &x), |b, (csr, x)| {
            b.iter(|| black_box(parallel::par_csr_mult_vec(csr, &x.view()).expect("SpMV failed")));
        });

        group.bench_with_input(BenchmarkId::new("spspmm_seq", size), &csr, |b, csr| {
            b.iter(|| black_box(csr.mult_to_sparse(csr).expect("SpSpMM failed")));
        });
        group.bench_with_input(BenchmarkId::new("spspmm_par", size), &csr, |b, csr| {
            b.iter(|| black_box(parallel::par_csr_mult_csr(csr, csr).expect("SpSpMM failed")));
        });

        let coo = csr.to_coo();
        group.bench_with_input(BenchmarkId::new("coo_to_csr_par", size), &coo, |b, coo| {
            b.iter(|| black_box(parallel::par_coo_to_csr(coo)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sort_coalesce,
    bench_format_conversion,
    bench_spmv,
    bench_spmm,
    bench_spspmm,
    bench_hints,
    bench_element_wise_ops,
    bench_seq_vs_par
);
criterion_main!(benches);
