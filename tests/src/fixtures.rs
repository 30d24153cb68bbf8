//! Shared fixtures for tests and benchmarks.

use declarative_order::DeclarationSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Item name used by the generators.
pub fn item_name(index: usize) -> String {
    format!("Item{:04}", index)
}

/// Random acyclic declaration set over `size` items.
///
/// Edges only ever point from a lower index to a higher one, so the result
/// is always orderable. Declarations alternate between RunAfter and
/// RunBefore to exercise both directions.
pub fn make_random_dag(seed: u64, size: usize, edge_chance: f64) -> DeclarationSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut set = DeclarationSet::new();

    for to in 0..size {
        set = set.register(item_name(to));
        for from in 0..to {
            if !rng.gen_bool(edge_chance) {
                continue;
            }
            set = if rng.gen_bool(0.5) {
                set.run_after(item_name(to), [item_name(from)])
            } else {
                set.run_before(item_name(from), [item_name(to)])
            };
        }
    }

    set
}

/// Chain of `size` items where each runs after the previous one.
pub fn make_chain(size: usize) -> DeclarationSet {
    (1..size).fold(DeclarationSet::new().register(item_name(0)), |set, i| {
        set.run_after(item_name(i), [item_name(i - 1)])
    })
}

/// JSON manifest text for a list of `(name, after)` pairs.
pub fn make_manifest(items: &[(&str, &[&str])]) -> String {
    let items: Vec<serde_json::Value> = items
        .iter()
        .map(|(name, after)| serde_json::json!({ "name": name, "after": after }))
        .collect();
    serde_json::json!({ "items": items }).to_string()
}
