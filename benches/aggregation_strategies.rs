//! Benchmark suite for comparing query strategies
//!
//! This benchmark compares the sequential scan with the parallel partitioned
//! aggregation using the divan benchmarking framework. The parallel strategy
//! runs with four workers.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```
//!
//! Each benchmark runs over a ledger of 1,000 and 100,000 payments spread over
//! a handful of accounts and three categories.

use divan::Bencher;
use std::sync::Arc;
use wallet_ledger::cli::StrategyType;
use wallet_ledger::core::SequentialIds;
use wallet_ledger::strategy::{create_strategy, PaymentPredicate, QueryStrategy, WorkerConfig};
use wallet_ledger::Ledger;

const SIZES: [usize; 2] = [1_000, 100_000];
const WORKERS: usize = 4;

fn main() {
    divan::main();
}

fn build_ledger(payments: usize) -> Ledger {
    let mut ledger = Ledger::new().with_id_source(SequentialIds::new("bench"));
    let accounts: Vec<_> = (0..8)
        .map(|i| {
            let id = ledger
                .register_account(&format!("+99200000000{}", i))
                .expect("register failed")
                .id;
            ledger.deposit(id, i64::MAX / 16).expect("deposit failed");
            id
        })
        .collect();

    for i in 0..payments {
        let category = ["auto", "food", "mobile"][i % 3];
        ledger
            .pay(accounts[i % accounts.len()], 1_000_00, category)
            .expect("payment failed");
    }
    ledger
}

fn strategy(strategy_type: StrategyType) -> Box<dyn QueryStrategy> {
    create_strategy(strategy_type, Some(WorkerConfig::new(WORKERS))).expect("strategy failed")
}

fn by_category() -> PaymentPredicate {
    Arc::new(|payment| payment.category == "food")
}

/// Sum of all payments, sequential scan
#[divan::bench(args = SIZES)]
fn sequential_sum(bencher: Bencher, payments: usize) {
    let ledger = build_ledger(payments);
    let strategy = strategy(StrategyType::Sequential);
    bencher.bench_local(|| strategy.sum_payments(&ledger));
}

/// Sum of all payments, four partitions
#[divan::bench(args = SIZES)]
fn parallel_sum(bencher: Bencher, payments: usize) {
    let ledger = build_ledger(payments);
    let strategy = strategy(StrategyType::Parallel);
    bencher.bench_local(|| strategy.sum_payments(&ledger));
}

/// Payments of one account, sequential scan
#[divan::bench(args = SIZES)]
fn sequential_filter(bencher: Bencher, payments: usize) {
    let ledger = build_ledger(payments);
    let strategy = strategy(StrategyType::Sequential);
    bencher.bench_local(|| strategy.filter_payments(&ledger, 1));
}

/// Payments of one account, four partitions
#[divan::bench(args = SIZES)]
fn parallel_filter(bencher: Bencher, payments: usize) {
    let ledger = build_ledger(payments);
    let strategy = strategy(StrategyType::Parallel);
    bencher.bench_local(|| strategy.filter_payments(&ledger, 1));
}

/// Payments matching a predicate, sequential scan
#[divan::bench(args = SIZES)]
fn sequential_filter_by_fn(bencher: Bencher, payments: usize) {
    let ledger = build_ledger(payments);
    let strategy = strategy(StrategyType::Sequential);
    bencher.bench_local(|| strategy.filter_payments_by_fn(&ledger, by_category()));
}

/// Payments matching a predicate, four partitions
#[divan::bench(args = SIZES)]
fn parallel_filter_by_fn(bencher: Bencher, payments: usize) {
    let ledger = build_ledger(payments);
    let strategy = strategy(StrategyType::Parallel);
    bencher.bench_local(|| strategy.filter_payments_by_fn(&ledger, by_category()));
}
