//! Benchmark utilities for Signet.
//!
//! This crate provides benchmarking and workload infrastructure for the ECS:
//!
//! - **Microbenchmarks**: Individual operation cost (create, destroy, add, remove, get, query)
//! - **Scenario benchmarks**: Frame-shaped workloads (particles, random churn)
//! - **Shadow checking**: The churn scenario mirrors every operation in a plain model and can
//!   verify the world against it at any point
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p signet_bench
//!
//! # Run specific benchmark group
//! cargo bench -p signet_bench -- query
//! ```
//!
//! # Benchmark Results
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.

pub mod components;
pub mod scenarios;
