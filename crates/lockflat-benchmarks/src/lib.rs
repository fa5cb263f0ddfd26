//! Lockflat benchmarking suite
//!
//! Benchmarks for lockfile decoding and tree flattening over synthetic
//! lockfiles of increasing size.

pub mod common;

pub use common::*;
