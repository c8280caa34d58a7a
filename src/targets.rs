//! Fixed-size set of target values.
//!
//! Holds the per-combination "found" flags of a search: one bit per target in
//! `[0, universe)`, packed into `u64` words, cleared whenever the next
//! combination starts.

/// A bit set over the fixed universe `[0, universe)`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TargetSet {
    words: Vec<u64>,
    universe: usize,
    /// Number of set bits (cached for O(1) `len()`).
    count: usize,
}

impl TargetSet {
    const BITS_PER_WORD: usize = 64;

    /// Creates an empty set over `[0, universe)`.
    pub fn new(universe: usize) -> Self {
        let num_words = universe.div_ceil(Self::BITS_PER_WORD);
        Self {
            words: vec![0; num_words],
            universe,
            count: 0,
        }
    }

    pub fn universe(&self) -> usize {
        self.universe
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    fn word_and_bit(index: usize) -> (usize, usize) {
        (index / Self::BITS_PER_WORD, index % Self::BITS_PER_WORD)
    }

    #[inline]
    pub fn contains(&self, target: usize) -> bool {
        if target >= self.universe {
            return false;
        }
        let (word, bit) = Self::word_and_bit(target);
        self.words[word] & (1u64 << bit) != 0
    }

    /// Adds `target`. Returns true if it was not present before.
    ///
    /// # Panics
    ///
    /// Panics if `target` is outside the universe.
    #[inline]
    pub fn insert(&mut self, target: usize) -> bool {
        assert!(
            target < self.universe,
            "Target {} is outside the universe [0, {})",
            target,
            self.universe
        );
        let (word, bit) = Self::word_and_bit(target);
        let mask = 1u64 << bit;
        let was_clear = self.words[word] & mask == 0;
        if was_clear {
            self.words[word] |= mask;
            self.count += 1;
        }
        was_clear
    }

    pub fn clear(&mut self) {
        self.words.fill(0);
        self.count = 0;
    }

    /// Iterates over present targets in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(word_idx, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1; // Clear lowest set bit
                Some(word_idx * Self::BITS_PER_WORD + bit)
            })
        })
    }

    /// Iterates over absent targets in ascending order.
    pub fn missing(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.universe).filter(move |&t| !self.contains(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let set = TargetSet::new(100);
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(!set.contains(0));
        assert!(!set.contains(1000));
    }

    #[test]
    fn test_insert_contains() {
        let mut set = TargetSet::new(100);
        assert!(set.insert(42));
        assert!(set.contains(42));
        assert!(!set.insert(42)); // Already set
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_full() {
        let mut set = TargetSet::new(70);
        for t in 0..70 {
            assert_eq!(set.missing().count(), 70 - t);
            set.insert(t);
        }
        assert_eq!(set.len(), 70);
        assert_eq!(set.missing().count(), 0);
    }

    #[test]
    fn test_iter_and_missing() {
        let mut set = TargetSet::new(130);
        for t in [3, 5, 10, 64, 65, 129] {
            set.insert(t);
        }
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![3, 5, 10, 64, 65, 129]);
        assert_eq!(set.missing().take(4).collect::<Vec<_>>(), vec![0, 1, 2, 4]);
        assert_eq!(set.missing().count(), 124);
    }

    #[test]
    fn test_clear() {
        let mut set = TargetSet::new(100);
        set.insert(1);
        set.insert(99);
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(1));
        assert!(!set.contains(99));
    }

    #[test]
    #[should_panic(expected = "outside the universe")]
    fn test_insert_outside() {
        let mut set = TargetSet::new(10);
        set.insert(10);
    }
}
