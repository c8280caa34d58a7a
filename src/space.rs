//! Exact size of the search space.
//!
//! A full run evaluates
//!
//! ```text
//! C(pool, k) * k! * 4^(k-1) * Catalan(k-1)
//! ```
//!
//! expressions. The factors grow fast enough that `u64` is not a comfortable
//! home for them, so everything here is computed with [`BigUint`].

use num_bigint::BigUint;
use num_traits::One;

use crate::expr::Operator;

/// Binomial coefficient `C(n, k)`, zero when `k > n`.
pub fn binomial(n: u64, k: u64) -> BigUint {
    if k > n {
        return BigUint::ZERO;
    }
    let k = k.min(n - k);
    let mut res = BigUint::one();
    for i in 0..k {
        // Exact at every step: the running value is C(n, i + 1).
        res = res * (n - i) / (i + 1);
    }
    res
}

pub fn factorial(n: u64) -> BigUint {
    (1..=n).fold(BigUint::one(), |acc, i| acc * i)
}

/// The `n`-th Catalan number, `C(2n, n) / (n + 1)`.
pub fn catalan(n: u64) -> BigUint {
    binomial(2 * n, n) / (n + 1)
}

/// Number of tree shapes with `width` leaves.
pub fn shape_count(width: u64) -> BigUint {
    assert!(width >= 1, "Tree width must be >= 1");
    catalan(width - 1)
}

/// Total number of expressions evaluated when choosing `choose` values from a
/// pool of `pool_size`.
pub fn search_space_size(pool_size: u64, choose: u64) -> BigUint {
    assert!(choose >= 1, "Combination width must be >= 1");
    let operators = BigUint::from(Operator::ALL.len()).pow((choose - 1) as u32);
    binomial(pool_size, choose) * factorial(choose) * operators * shape_count(choose)
}
