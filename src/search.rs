//! Exhaustive reachability search.
//!
//! For every `choose`-subset of the pool `1..=pool_size`, the search tries
//! every ordering of the chosen values, every assignment of the four
//! operators to the branches, and every tree shape. A target in
//! `[0, max_target)` is *reached* by a combination if at least one of those
//! expressions evaluates exactly to it.
//!
//! The nesting, from outermost to innermost:
//!
//! 1. combinations ([`Combination`]),
//! 2. permutations of the combination ([`next_permutation`]),
//! 3. operator assignments ([`Composition`] over [`Operator::ALL`]),
//! 4. tree shapes (enumerated once per search and shared).
//!
//! Every level has a fixed order, so results (including which witness is
//! recorded first) are fully deterministic.
//!
//! ```
//! use arith_reach::search::{Search, SearchConfig};
//!
//! let search = Search::new(SearchConfig::new(4, 2, 10));
//! let report = search.run();
//!
//! // Target 0 needs two equal numbers, which a combination never has.
//! assert_eq!(report.tally.succeeded(0), 0);
//! assert_eq!(report.tally.failed(0), 6);
//! ```

use std::convert::Infallible;
use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;

use log::{debug, info};

use crate::expr::{render, EvalFault, Evaluator, Operator};
use crate::index::{next_permutation, Combination, Composition};
use crate::rational::Rational;
use crate::shape::{Shape, ShapeCatalog};
use crate::targets::TargetSet;

/// Parameters of a search run.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SearchConfig {
    /// The pool is `1..=pool_size`.
    pub pool_size: usize,
    /// Number of values drawn per combination.
    pub choose: usize,
    /// Targets are `0..max_target`.
    pub max_target: usize,
    /// Keep one witness expression per reached target.
    pub record_witnesses: bool,
}

impl SearchConfig {
    /// # Panics
    ///
    /// Panics unless `1 <= choose <= pool_size` and `max_target >= 1`.
    pub fn new(pool_size: usize, choose: usize, max_target: usize) -> Self {
        assert!(choose >= 1, "Must choose at least one value");
        assert!(
            choose <= pool_size,
            "Cannot choose {} values from a pool of {}",
            choose,
            pool_size
        );
        assert!(max_target >= 1, "Target range must not be empty");
        Self {
            pool_size,
            choose,
            max_target,
            record_witnesses: false,
        }
    }

    pub fn with_witnesses(mut self, record: bool) -> Self {
        self.record_witnesses = record;
        self
    }

    pub fn pool(&self) -> Vec<i64> {
        (1..=self.pool_size as i64).collect()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig::new(25, 5, 100)
    }
}

/// One concrete expression reaching a target.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Witness {
    pub operands: Vec<i64>,
    pub ops: Vec<Operator>,
    pub shape: Shape,
}

impl Witness {
    /// Postfix rendering, see [`render`].
    pub fn render(&self) -> String {
        render(&self.shape, &self.operands, &self.ops)
    }

    /// Re-evaluates the expression (reduced).
    pub fn value(&self) -> Rational {
        Evaluator::new()
            .evaluate(&self.shape, &self.operands, &self.ops)
            .reduced()
    }
}

impl fmt::Display for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render().trim_start())
    }
}

/// Result of exploring a single combination.
#[derive(Debug, Clone)]
pub struct CombinationOutcome {
    /// The chosen values, ascending.
    pub values: Vec<i64>,
    found: TargetSet,
    witnesses: Vec<Option<Witness>>,
}

impl CombinationOutcome {
    fn new(values: Vec<i64>, max_target: usize, record_witnesses: bool) -> Self {
        let witnesses = if record_witnesses {
            vec![None; max_target]
        } else {
            Vec::new()
        };
        Self {
            values,
            found: TargetSet::new(max_target),
            witnesses,
        }
    }

    /// Forgets everything found so far and switches to `values`.
    fn reset(&mut self, values: &[i64]) {
        self.values.clear();
        self.values.extend_from_slice(values);
        self.values.sort_unstable();
        self.found.clear();
        self.witnesses.fill(None);
    }

    pub fn max_target(&self) -> usize {
        self.found.universe()
    }

    pub fn is_found(&self, target: usize) -> bool {
        self.found.contains(target)
    }

    pub fn found(&self) -> impl Iterator<Item = usize> + '_ {
        self.found.iter()
    }

    pub fn missing(&self) -> impl Iterator<Item = usize> + '_ {
        self.found.missing()
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    /// The first expression found for `target`, if witnesses were recorded.
    pub fn witness(&self, target: usize) -> Option<&Witness> {
        self.witnesses.get(target).and_then(Option::as_ref)
    }
}

/// Per-target success and failure counters, accumulated over combinations.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tally {
    succeeded: Vec<u64>,
    failed: Vec<u64>,
}

impl Tally {
    pub fn new(max_target: usize) -> Self {
        Self {
            succeeded: vec![0; max_target],
            failed: vec![0; max_target],
        }
    }

    pub fn max_target(&self) -> usize {
        self.succeeded.len()
    }

    pub fn succeeded(&self, target: usize) -> u64 {
        self.succeeded[target]
    }

    pub fn failed(&self, target: usize) -> u64 {
        self.failed[target]
    }

    /// Share of combinations reaching `target`; NaN if nothing was tallied.
    pub fn success_fraction(&self, target: usize) -> f64 {
        let s = self.succeeded[target] as f64;
        s / (s + self.failed[target] as f64)
    }

    /// Sums over all targets, as `(succeeded, failed)`.
    pub fn totals(&self) -> (u64, u64) {
        (self.succeeded.iter().sum(), self.failed.iter().sum())
    }

    pub fn record(&mut self, outcome: &CombinationOutcome) {
        assert_eq!(outcome.max_target(), self.max_target());
        for target in 0..self.max_target() {
            if outcome.is_found(target) {
                self.succeeded[target] += 1;
            } else {
                self.failed[target] += 1;
            }
        }
    }

    /// Element-wise sum, for combining independently computed tallies.
    pub fn merge(&mut self, other: &Tally) {
        assert_eq!(other.max_target(), self.max_target());
        for (a, b) in self.succeeded.iter_mut().zip(&other.succeeded) {
            *a += b;
        }
        for (a, b) in self.failed.iter_mut().zip(&other.failed) {
            *a += b;
        }
    }
}

/// Counters describing the work performed by a run.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RunStats {
    pub combinations: u64,
    pub evaluations: u64,
    /// Evaluations landing on an integer target.
    pub hits: u64,
    pub division_by_zero: u64,
    pub overflows: u64,
}

impl RunStats {
    fn count_fault(&mut self, fault: EvalFault) {
        match fault {
            EvalFault::DivisionByZero => self.division_by_zero += 1,
            EvalFault::Overflow => self.overflows += 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub tally: Tally,
    pub stats: RunStats,
}

/// The search driver.
///
/// Tree shapes are enumerated once at construction and shared read-only by
/// every combination.
#[derive(Debug, Clone)]
pub struct Search {
    config: SearchConfig,
    shapes: Arc<[Shape]>,
}

impl Search {
    pub fn new(config: SearchConfig) -> Self {
        let shapes = ShapeCatalog::new().shapes(config.choose);
        Self { config, shapes }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Runs the full search, discarding per-combination outcomes.
    pub fn run(&self) -> SearchReport {
        self.for_each(|_| {})
    }

    /// Runs the full search, passing every combination's outcome to `f`.
    pub fn for_each(&self, mut f: impl FnMut(&CombinationOutcome)) -> SearchReport {
        // A wrapper that cannot fail.
        self.try_for_each(|outcome| {
            f(outcome);
            Ok(())
        })
        .unwrap_or_else(|never: Infallible| match never {})
    }

    /// Like [`for_each`][Search::for_each], but stops at the first error
    /// returned by `f`.
    pub fn try_for_each<E>(
        &self,
        mut f: impl FnMut(&CombinationOutcome) -> Result<(), E>,
    ) -> Result<SearchReport, E> {
        let pool = self.config.pool();
        let mut tally = Tally::new(self.config.max_target);
        let mut stats = RunStats::default();
        let mut evaluator = Evaluator::new();

        let mut outcome = CombinationOutcome::new(
            Vec::with_capacity(self.config.choose),
            self.config.max_target,
            self.config.record_witnesses,
        );

        let mut combo = Combination::new(self.config.pool_size, self.config.choose);
        while combo.is_valid() {
            let values = combo.extract(&pool);
            self.solve_into(&values, &mut outcome, &mut evaluator, &mut stats);
            tally.record(&outcome);
            f(&outcome)?;

            stats.combinations += 1;
            if stats.combinations % 100 == 0 {
                info!("Processed {} combinations", stats.combinations);
            }
            combo.advance();
        }

        debug!("Search finished: {:?}", stats);
        Ok(SearchReport { tally, stats })
    }

    /// Explores a single combination of values.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` differs from the configured width.
    pub fn solve(&self, values: &[i64]) -> CombinationOutcome {
        let mut outcome = CombinationOutcome::new(
            Vec::with_capacity(values.len()),
            self.config.max_target,
            self.config.record_witnesses,
        );
        let mut stats = RunStats::default();
        self.solve_into(values, &mut outcome, &mut Evaluator::new(), &mut stats);
        outcome
    }

    /// Returns the first expression over `values` that evaluates to `target`.
    ///
    /// Unlike the full search, `target` is not limited to `[0, max_target)`.
    pub fn first_witness(&self, values: &[i64], target: i64) -> Option<Witness> {
        let mut evaluator = Evaluator::new();
        let found = self.explore(values, &mut evaluator, |operands, ops, shape, value| {
            match value {
                Ok(v) if v.as_integer() == Some(target) => ControlFlow::Break(Witness {
                    operands: operands.to_vec(),
                    ops: ops.to_vec(),
                    shape: shape.clone(),
                }),
                _ => ControlFlow::Continue(()),
            }
        });
        match found {
            ControlFlow::Break(witness) => Some(witness),
            ControlFlow::Continue(()) => None,
        }
    }

    fn solve_into(
        &self,
        values: &[i64],
        outcome: &mut CombinationOutcome,
        evaluator: &mut Evaluator,
        stats: &mut RunStats,
    ) {
        outcome.reset(values);
        let max_target = self.config.max_target;
        let record = self.config.record_witnesses;

        let _: ControlFlow<Infallible> = self.explore(values, evaluator, |operands, ops, shape, value| {
            stats.evaluations += 1;
            let value = match value {
                Ok(value) => value,
                Err(fault) => {
                    stats.count_fault(fault);
                    if fault == EvalFault::Overflow {
                        debug!("Overflow in {}", render(shape, operands, ops));
                    }
                    return ControlFlow::Continue(());
                }
            };
            let target = match value.as_integer() {
                Some(t) if (0..max_target as i64).contains(&t) => t as usize,
                _ => return ControlFlow::Continue(()),
            };

            stats.hits += 1;
            if outcome.found.insert(target) && record {
                outcome.witnesses[target] = Some(Witness {
                    operands: operands.to_vec(),
                    ops: ops.to_vec(),
                    shape: shape.clone(),
                });
            }
            ControlFlow::Continue(())
        });
    }

    /// Evaluates every expression over `values` in search order, calling `f`
    /// with the operand order, operators, shape and checked, reduced result.
    fn explore<B>(
        &self,
        values: &[i64],
        evaluator: &mut Evaluator,
        mut f: impl FnMut(&[i64], &[Operator], &Shape, Result<Rational, EvalFault>) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        assert_eq!(
            values.len(),
            self.config.choose,
            "Expected a combination of {} values, got {:?}",
            self.config.choose,
            values
        );

        let mut operands = values.to_vec();
        operands.sort_unstable();
        let mut ops = Vec::with_capacity(operands.len() - 1);

        loop {
            let mut assignment = Composition::new(Operator::ALL.len(), operands.len() - 1);
            while assignment.is_valid() {
                assignment.extract_into(&Operator::ALL, &mut ops);
                for shape in self.shapes.iter() {
                    let value = evaluator.evaluate_reduced(shape, &operands, &ops);
                    if let ControlFlow::Break(b) = f(&operands, &ops, shape, value) {
                        return ControlFlow::Break(b);
                    }
                }
                assignment.advance();
            }

            if !next_permutation(&mut operands) {
                break;
            }
        }

        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn small() -> Search {
        Search::new(SearchConfig::new(4, 2, 10).with_witnesses(true))
    }

    #[test]
    fn test_pair_two_three() {
        let outcome = small().solve(&[2, 3]);
        let found: Vec<usize> = outcome.found().collect();
        // 3-2, 2+3, 2*3
        assert_eq!(found, vec![1, 5, 6]);
        assert!(!outcome.is_found(0));
        assert_eq!(outcome.missing().count(), 7);
    }

    #[test]
    fn test_witnesses_evaluate_to_target() {
        let outcome = small().solve(&[2, 3]);
        for target in outcome.found() {
            let witness = outcome.witness(target).expect("witness recorded");
            assert_eq!(witness.value().as_integer(), Some(target as i64));
        }
        assert_eq!(outcome.witness(0), None);
        assert_eq!(outcome.witness(5).unwrap().render(), " 2 3 +");
        assert_eq!(outcome.witness(1).unwrap().render(), " 3 2 -");
        assert_eq!(outcome.witness(6).unwrap().to_string(), "2 3 *");
    }

    #[test]
    fn test_no_witnesses_by_default() {
        let search = Search::new(SearchConfig::new(4, 2, 10));
        let outcome = search.solve(&[2, 3]);
        assert!(outcome.is_found(5));
        assert_eq!(outcome.witness(5), None);
    }

    #[test]
    fn test_divisions_reach_integers() {
        let outcome = small().solve(&[2, 4]);
        assert!(outcome.is_found(2)); // 4 / 2
        assert!(outcome.is_found(8)); // 2 * 4
        assert!(outcome.is_found(6)); // 2 + 4
    }

    #[test]
    fn test_order_of_input_does_not_matter() {
        let a = small().solve(&[3, 1]);
        let b = small().solve(&[1, 3]);
        assert_eq!(a.values, vec![1, 3]);
        assert_eq!(a.found().collect::<Vec<_>>(), b.found().collect::<Vec<_>>());
    }

    #[test]
    fn test_four_values() {
        let search = Search::new(SearchConfig::new(4, 4, 30).with_witnesses(true));
        let outcome = search.solve(&[1, 2, 3, 4]);
        assert!(outcome.is_found(0)); // (1 + 2 - 3) * 4
        assert!(outcome.is_found(10)); // 1 + 2 + 3 + 4
        assert!(outcome.is_found(24)); // 1 * 2 * 3 * 4
        for target in outcome.found() {
            let witness = outcome.witness(target).unwrap();
            assert_eq!(witness.value().as_integer(), Some(target as i64));
            assert_eq!(witness.shape.width(), 4);
        }
    }

    #[test]
    fn test_first_witness() {
        let search = small();
        let witness = search.first_witness(&[2, 3], 6).unwrap();
        assert_eq!(witness.render(), " 2 3 *");
        assert_eq!(search.first_witness(&[2, 3], -1).unwrap().render(), " 2 3 -");
        assert_eq!(search.first_witness(&[2, 3], 7), None);
    }

    #[test]
    fn test_first_witness_avoids_zero_divisors() {
        let search = Search::new(SearchConfig::new(4, 4, 10));
        for values in [[1, 2, 3, 4], [1, 1, 2, 2]] {
            let witness = search.first_witness(&values, 0).unwrap();
            let value = Evaluator::new().evaluate_reduced(&witness.shape, &witness.operands, &witness.ops);
            assert_eq!(value.map(|v| v.as_integer()), Ok(Some(0)), "witness {}", witness);
        }
        // 1 / (1 / (2 - 2)) is 0 only with unchecked arithmetic.
        let search = Search::new(SearchConfig::new(4, 2, 10));
        assert_eq!(search.first_witness(&[2, 2], 0).unwrap().render(), " 2 2 -");
        assert_eq!(search.first_witness(&[3, 5], 0), None);
    }

    #[test]
    fn test_single_value() {
        let search = Search::new(SearchConfig::new(3, 1, 5));
        let report = search.run();
        assert_eq!(report.stats.combinations, 3);
        assert_eq!(report.stats.evaluations, 3);
        for t in 1..=3 {
            assert_eq!(report.tally.succeeded(t), 1);
            assert_eq!(report.tally.failed(t), 2);
        }
        assert_eq!(report.tally.succeeded(0), 0);
        assert_eq!(report.tally.succeeded(4), 0);
    }

    #[test]
    fn test_run_counts() {
        let report = small().run();
        assert_eq!(report.stats.combinations, 6);
        // C(4,2) * 2! * 4 * 1
        assert_eq!(report.stats.evaluations, 48);
        assert_eq!(report.stats.division_by_zero, 0);
        assert_eq!(report.stats.overflows, 0);
        for t in 0..10 {
            assert_eq!(report.tally.succeeded(t) + report.tally.failed(t), 6);
        }
        // 1: {1,2} {2,3} {3,4}
        // 2: {1,2} {1,3} {2,4}
        // 3: {1,2} {1,3} {1,4}
        assert_eq!(report.tally.succeeded(1), 3);
        assert_eq!(report.tally.succeeded(2), 3);
        assert_eq!(report.tally.succeeded(3), 3);
    }

    #[test]
    fn test_for_each_sees_every_combination() {
        let mut seen = Vec::new();
        let report = small().for_each(|outcome| seen.push(outcome.values.clone()));
        assert_eq!(seen, vec![vec![1, 2], vec![1, 3], vec![1, 4], vec![2, 3], vec![2, 4], vec![3, 4]]);
        assert_eq!(report.stats.combinations, 6);
    }

    #[test]
    fn test_try_for_each_stops_early() {
        let mut calls = 0;
        let res: Result<SearchReport, &str> = small().try_for_each(|_| {
            calls += 1;
            if calls == 2 {
                Err("stop")
            } else {
                Ok(())
            }
        });
        assert_eq!(res.unwrap_err(), "stop");
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_tally_merge() {
        let search = small();
        let mut left = Tally::new(10);
        let mut right = Tally::new(10);
        left.record(&search.solve(&[1, 2]));
        left.record(&search.solve(&[1, 3]));
        right.record(&search.solve(&[2, 3]));

        left.merge(&right);
        assert_eq!(left.succeeded(1), 2);
        assert_eq!(left.failed(0), 3);
        assert_eq!(left.totals().0 + left.totals().1, 30);
    }

    #[test]
    fn test_tally_fraction() {
        let mut tally = Tally::new(2);
        assert!(tally.success_fraction(0).is_nan());
        let outcome = Search::new(SearchConfig::new(4, 2, 2)).solve(&[1, 2]);
        tally.record(&outcome);
        assert_eq!(tally.success_fraction(1), 1.0);
        assert_eq!(tally.success_fraction(0), 0.0);
    }

    #[test]
    #[should_panic(expected = "Cannot choose 3 values from a pool of 2")]
    fn test_config_too_wide() {
        SearchConfig::new(2, 3, 10);
    }

    #[test]
    #[should_panic(expected = "Expected a combination of 2 values")]
    fn test_solve_wrong_width() {
        small().solve(&[1, 2, 3]);
    }
}
