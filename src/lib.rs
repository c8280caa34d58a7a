//! # arith-reach: which integers can a handful of numbers make?
//!
//! Given a pool `1..=N`, draw `k` distinct numbers and combine them with `+`,
//! `-`, `*` and `/`, using every number exactly once, in any order, under any
//! bracketing. **`arith-reach`** determines exhaustively, for every such
//! combination, which integer targets in `[0, max)` are reachable, and
//! tallies per target how many combinations succeed and how many fail.
//!
//! ## Basic Usage
//!
//! ```rust
//! use arith_reach::search::{Search, SearchConfig};
//!
//! // Pairs from {1, 2, 3, 4}, targets 0..10.
//! let search = Search::new(SearchConfig::new(4, 2, 10).with_witnesses(true));
//!
//! let outcome = search.solve(&[2, 3]);
//! let reached: Vec<usize> = outcome.found().collect();
//! assert_eq!(reached, vec![1, 5, 6]);
//! assert_eq!(outcome.witness(6).unwrap().to_string(), "2 3 *");
//!
//! let report = search.run();
//! assert_eq!(report.stats.combinations, 6);
//! ```
//!
//! ## Core Components
//!
//! - **[`rational`]**: exact fractions that postpone reduction to the very end.
//! - **[`index`]**: in-place successors for combinations, operator
//!   assignments and permutations.
//! - **[`shape`]**: all full binary tree shapes with a given number of leaves,
//!   as postfix token sequences.
//! - **[`expr`]**: stack evaluation and rendering of a shape filled with
//!   operands and operators.
//! - **[`search`]**: the driver nesting all of the above, and the
//!   per-target tallies.
//! - **[`space`]**: exact size of the search space.
//! - **[`report`]**: record lines and the summary table.

pub mod expr;
pub mod index;
pub mod rational;
pub mod report;
pub mod search;
pub mod shape;
pub mod space;
pub mod targets;
