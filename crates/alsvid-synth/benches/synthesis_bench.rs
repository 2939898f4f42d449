//! Benchmarks for evolution synthesis
//!
//! Run with: cargo bench -p alsvid-synth

use alsvid_pauli::SparseHamiltonian;
use alsvid_synth::{EvolutionRequest, Layout, synthesize};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use num_complex::Complex64;

/// A 1-D transverse-field Ising Hamiltonian: nearest-neighbor ZZ plus a
/// transverse X on every site.
fn ising(num_qubits: u32) -> SparseHamiltonian {
    let couplings = (0..num_qubits - 1)
        .map(|i| ("ZZ".to_string(), vec![i, i + 1], Complex64::new(1.0, 0.0)));
    let fields = (0..num_qubits).map(|i| ("X".to_string(), vec![i], Complex64::new(0.5, 0.0)));
    SparseHamiltonian::from_sparse_list(couplings.chain(fields), num_qubits).unwrap()
}

/// Benchmark first-order synthesis as the register grows.
fn bench_order1_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("order1_scaling");

    for num_qubits in &[10_u32, 50, 100, 200] {
        let ham = ising(*num_qubits);
        let layout = Layout::identity(*num_qubits);
        group.bench_with_input(
            BenchmarkId::new("ising", num_qubits),
            num_qubits,
            |b, _| {
                let request = EvolutionRequest::new(1.0).with_reps(10);
                b.iter(|| synthesize(black_box(&ham), black_box(&request), &layout).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark the cost of higher product-formula orders.
fn bench_order_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_growth");

    let ham = ising(20);
    let layout = Layout::identity(20);
    for order in &[1_u32, 2, 4, 6] {
        group.bench_with_input(BenchmarkId::new("order", order), order, |b, &order| {
            let request = EvolutionRequest::new(1.0).with_order(order);
            b.iter(|| synthesize(black_box(&ham), black_box(&request), &layout).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the commuting-group plugin against the default.
fn bench_plugins(c: &mut Criterion) {
    let mut group = c.benchmark_group("plugins");

    let ham = ising(50);
    let layout = Layout::identity(50);

    group.bench_function("product_formula", |b| {
        let request = EvolutionRequest::new(1.0);
        b.iter(|| synthesize(black_box(&ham), black_box(&request), &layout).unwrap());
    });

    group.bench_function("commuting_groups", |b| {
        let request = EvolutionRequest::new(1.0)
            .with_plugin("commuting-groups")
            .with_option("upto_phase", true);
        b.iter(|| synthesize(black_box(&ham), black_box(&request), &layout).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_order1_scaling, bench_order_growth, bench_plugins);
criterion_main!(benches);
