//! Successor-based index tuples for walking combinatorial spaces.
//!
//! Both tuples hold `m` indices into a pool of size `n` and are advanced in
//! place, so a single allocation serves a whole enumeration:
//!
//! - [`Composition`] counts through all `n^m` tuples with repetition, like an
//!   odometer whose least-significant digit is position 0.
//! - [`Combination`] walks all `C(n, m)` strictly decreasing tuples, each
//!   standing for one unordered `m`-subset of the pool.
//!
//! Both also implement [`Iterator`], yielding a copy of the indices.
//!
//! ```
//! use arith_reach::index::Combination;
//!
//! let pool = ['a', 'b', 'c'];
//! let mut subsets = Vec::new();
//! let mut combo = Combination::new(3, 2);
//! while combo.is_valid() {
//!     subsets.push(combo.extract(&pool));
//!     combo.advance();
//! }
//! assert_eq!(subsets, vec![vec!['a', 'b'], vec!['a', 'c'], vec!['b', 'c']]);
//! ```

/// Tuple of `m` indices in `[0, n)`, each chosen independently.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Composition {
    n: usize,
    inds: Vec<usize>,
    valid: bool,
}

impl Composition {
    /// Creates the all-zero tuple.
    ///
    /// A zero-width tuple is valid exactly once (there is one empty
    /// assignment). With `n == 0` and `m > 0` there is nothing to enumerate.
    pub fn new(n: usize, m: usize) -> Self {
        Self {
            n,
            inds: vec![0; m],
            valid: n > 0 || m == 0,
        }
    }

    pub fn alphabet_size(&self) -> usize {
        self.n
    }

    pub fn width(&self) -> usize {
        self.inds.len()
    }

    pub fn indices(&self) -> &[usize] {
        &self.inds
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Moves to the next tuple in counting order.
    pub fn advance(&mut self) {
        assert!(self.valid, "Cannot advance an exhausted composition");
        for ind in self.inds.iter_mut() {
            *ind += 1;
            if *ind < self.n {
                return;
            }
            *ind = 0;
        }
        // Carry went past the most significant position.
        self.valid = false;
    }

    /// Picks `vals[inds[i]]` for every position `i`.
    pub fn extract<T: Clone>(&self, vals: &[T]) -> Vec<T> {
        self.inds.iter().map(|&i| vals[i].clone()).collect()
    }

    /// Like [`extract`][Composition::extract], but writes into `out`.
    pub fn extract_into<T: Clone>(&self, vals: &[T], out: &mut Vec<T>) {
        out.clear();
        out.extend(self.inds.iter().map(|&i| vals[i].clone()));
    }
}

impl Iterator for Composition {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.valid {
            return None;
        }
        let current = self.inds.clone();
        self.advance();
        Some(current)
    }
}

/// Tuple of `m` distinct indices in `[0, n)`, stored in strictly decreasing
/// order (position 0 holds the largest index).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Combination {
    n: usize,
    inds: Vec<usize>,
}

impl Combination {
    /// Creates the first combination, `[m-1, m-2, ..., 0]`.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= m <= n`.
    pub fn new(n: usize, m: usize) -> Self {
        assert!(m >= 1, "Combination width must be >= 1");
        assert!(m <= n, "Combination width {} exceeds pool size {}", m, n);
        Self {
            n,
            inds: (0..m).rev().collect(),
        }
    }

    pub fn pool_size(&self) -> usize {
        self.n
    }

    pub fn width(&self) -> usize {
        self.inds.len()
    }

    pub fn indices(&self) -> &[usize] {
        &self.inds
    }

    /// The most significant index ran past its last admissible value.
    pub fn is_valid(&self) -> bool {
        let m = self.inds.len();
        self.inds[m - 1] < self.n - (m - 1)
    }

    /// Moves to the next combination.
    ///
    /// Position `i` may hold values below `n - i`. The first position that
    /// can still be incremented is bumped, and every less significant
    /// position restarts right above it, keeping the tuple strictly
    /// decreasing.
    pub fn advance(&mut self) {
        assert!(self.is_valid(), "Cannot advance an exhausted combination");
        let m = self.inds.len();
        for i in 0..m {
            self.inds[i] += 1;
            if self.inds[i] < self.n - i {
                for j in (1..=i).rev() {
                    self.inds[j - 1] = self.inds[j] + 1;
                }
                return;
            }
        }
        // The top position now equals `n - (m - 1)`, which `is_valid` rejects.
    }

    /// Picks the chosen pool values in ascending index order.
    pub fn extract<T: Clone>(&self, vals: &[T]) -> Vec<T> {
        self.inds.iter().rev().map(|&i| vals[i].clone()).collect()
    }
}

impl Iterator for Combination {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.is_valid() {
            return None;
        }
        let current = self.inds.clone();
        self.advance();
        Some(current)
    }
}

/// Rearranges `items` into the next lexicographically greater permutation.
///
/// Returns `false` (leaving `items` sorted ascending) once the last
/// permutation has been passed. Starting from a sorted slice, the loop
/// `loop { ...; if !next_permutation(&mut xs) { break } }` visits every
/// distinct permutation exactly once.
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    if items.len() < 2 {
        return false;
    }

    // Longest non-increasing suffix starts at `i`.
    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        items.reverse();
        return false;
    }

    // Swap the pivot with the rightmost element exceeding it.
    let mut j = items.len() - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn binomial(n: usize, k: usize) -> usize {
        (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
    }

    #[test]
    fn test_composition_counting_order() {
        let all: Vec<_> = Composition::new(3, 2).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 0],
                vec![1, 0],
                vec![2, 0],
                vec![0, 1],
                vec![1, 1],
                vec![2, 1],
                vec![0, 2],
                vec![1, 2],
                vec![2, 2],
            ]
        );
    }

    #[test]
    fn test_composition_count() {
        for n in 1..=4 {
            for m in 0..=4 {
                let all: Vec<_> = Composition::new(n, m).collect();
                let distinct: HashSet<_> = all.iter().cloned().collect();
                assert_eq!(all.len(), n.pow(m as u32), "n={}, m={}", n, m);
                assert_eq!(distinct.len(), all.len());
                assert!(all.iter().flatten().all(|&i| i < n));
            }
        }
    }

    #[test]
    fn test_composition_empty_alphabet() {
        assert_eq!(Composition::new(0, 2).count(), 0);
        assert_eq!(Composition::new(0, 0).count(), 1);
    }

    #[test]
    fn test_composition_extract() {
        let mut comp = Composition::new(4, 3);
        comp.advance();
        comp.advance();
        assert_eq!(comp.indices(), &[2, 0, 0]);
        assert_eq!(comp.extract(&["+", "-", "*", "/"]), vec!["*", "+", "+"]);

        let mut out = Vec::new();
        comp.extract_into(&[10, 20, 30, 40], &mut out);
        assert_eq!(out, vec![30, 10, 10]);
    }

    #[test]
    #[should_panic(expected = "exhausted composition")]
    fn test_composition_advance_past_end() {
        let mut comp = Composition::new(1, 1);
        comp.advance();
        comp.advance();
    }

    #[test]
    fn test_combination_first() {
        let combo = Combination::new(5, 3);
        assert_eq!(combo.indices(), &[2, 1, 0]);
        assert!(combo.is_valid());
    }

    #[test]
    fn test_combination_order() {
        let all: Vec<_> = Combination::new(4, 2).collect();
        assert_eq!(
            all,
            vec![
                vec![1, 0],
                vec![2, 0],
                vec![3, 0],
                vec![2, 1],
                vec![3, 1],
                vec![3, 2],
            ]
        );
    }

    #[test]
    fn test_combination_count() {
        for n in 1..=7 {
            for m in 1..=n {
                let all: Vec<_> = Combination::new(n, m).collect();
                let distinct: HashSet<_> = all.iter().cloned().collect();
                assert_eq!(all.len(), binomial(n, m), "n={}, m={}", n, m);
                assert_eq!(distinct.len(), all.len());
                for inds in &all {
                    assert!(inds.windows(2).all(|w| w[0] > w[1]), "{:?}", inds);
                    assert!(inds[0] < n);
                }
            }
        }
    }

    #[test]
    fn test_combination_extract_ascending() {
        let pool: Vec<i64> = (1..=6).collect();
        let subsets: Vec<Vec<i64>> = {
            let mut combo = Combination::new(6, 3);
            let mut res = Vec::new();
            while combo.is_valid() {
                res.push(combo.extract(&pool));
                combo.advance();
            }
            res
        };
        assert_eq!(subsets[0], vec![1, 2, 3]);
        assert_eq!(subsets[1], vec![1, 2, 4]);
        assert_eq!(subsets.last().unwrap(), &vec![4, 5, 6]);
        let mut sorted = subsets.clone();
        sorted.sort();
        assert_eq!(sorted, subsets);
    }

    #[test]
    fn test_combination_full_width() {
        let all: Vec<_> = Combination::new(3, 3).collect();
        assert_eq!(all, vec![vec![2, 1, 0]]);
    }

    #[test]
    #[should_panic(expected = "exceeds pool size")]
    fn test_combination_too_wide() {
        Combination::new(2, 3);
    }

    #[test]
    fn test_next_permutation() {
        let mut xs = vec![1, 2, 3];
        let mut seen = vec![xs.clone()];
        while next_permutation(&mut xs) {
            seen.push(xs.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1],
            ]
        );
        // Wraps back to sorted order.
        assert_eq!(xs, vec![1, 2, 3]);
    }

    #[test]
    fn test_next_permutation_trivial() {
        let mut empty: [i32; 0] = [];
        assert!(!next_permutation(&mut empty));
        let mut one = [7];
        assert!(!next_permutation(&mut one));
        assert_eq!(one, [7]);
    }

    #[test]
    fn test_next_permutation_count() {
        let mut xs: Vec<u32> = (0..5).collect();
        let mut count = 1;
        while next_permutation(&mut xs) {
            count += 1;
        }
        assert_eq!(count, 120);
    }
}
