//! Common utilities for benchmarks

use criterion::Criterion;
use indexmap::IndexMap;
use lockflat_core::types::{DependencyNode, LockTree};
use pprof::criterion::{Output, PProfProfiler};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Build a lockfile tree with `width` top-level packages.
///
/// Every package requires the next three siblings, and every fourth
/// package carries a nested copy of its first requirement, `depth` levels
/// deep, so the walk exercises shadowing as well as sibling lookups.
pub fn synthetic_tree(width: usize, depth: usize) -> LockTree {
    LockTree::new(level(width, depth, 0))
}

fn level(width: usize, depth: usize, generation: usize) -> IndexMap<String, DependencyNode> {
    let mut nodes = IndexMap::with_capacity(width);
    for i in 0..width {
        let mut node = DependencyNode::new(format!("{}.{}.0", generation + 1, i % 7));
        for offset in 1..=3 {
            let target = (i + offset) % width;
            node = node.with_require(package_name(target), format!("^{}.0.0", generation + 1));
        }
        if depth > 0 && i % 4 == 0 {
            let nested = level(width.min(8), depth - 1, generation + 1);
            for (name, child) in nested {
                node = node.with_nested(name, child);
            }
        }
        if i % 10 == 9 {
            node = node.dev();
        }
        nodes.insert(package_name(i), node);
    }
    nodes
}

fn package_name(index: usize) -> String {
    if index % 5 == 0 {
        format!("@scope/pkg-{}", index)
    } else {
        format!("pkg-{}", index)
    }
}

/// Render a synthetic tree as lockfile JSON
pub fn synthetic_lockfile(width: usize, depth: usize) -> String {
    lockflat_lockfile::serialize_lockfile(&synthetic_tree(width, depth))
        .unwrap_or_else(|e| panic!("synthetic lockfile must serialize: {}", e))
}
