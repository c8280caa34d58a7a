//! Lazy rational numbers.
//!
//! A [`Rational`] is a plain `(numerator, denominator)` pair. Arithmetic never
//! reduces the result: every operation is a couple of multiplications, and the
//! division needed for a gcd is paid only once, when [`Rational::reduce`] is
//! called explicitly at the end of a computation.
//!
//! The price is range. Unreduced terms grow with every operation, so callers
//! must keep operand magnitudes small enough for `i64`. The plain operators
//! (`+`, `-`, `*`, `/`) follow Rust's integer semantics on overflow (panic in
//! debug builds, wrap in release); the `checked_*` variants report it instead.
//!
//! # Example
//!
//! ```
//! use arith_reach::rational::Rational;
//!
//! let x = Rational::new(1, 2) + Rational::new(1, 3);
//! assert_eq!((x.numer(), x.denom()), (5, 6));
//!
//! let y = Rational::new(2, 4) * Rational::new(3, 1);
//! assert_eq!((y.numer(), y.denom()), (6, 4)); // not reduced
//! assert_eq!(y.reduced().as_integer(), None);
//! assert_eq!(y, Rational::new(3, 2));
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_integer::Integer;

/// Fraction with deferred reduction.
///
/// # Invariants
///
/// None are enforced: the denominator may be negative, may share factors with
/// the numerator, and may even be zero after dividing by a zero-valued
/// fraction with the unchecked `/`. Use [`Rational::is_defined`] to detect the
/// latter.
#[derive(Debug, Copy, Clone)]
pub struct Rational {
    num: i64,
    denom: i64,
}

impl Rational {
    pub const fn new(num: i64, denom: i64) -> Self {
        Self { num, denom }
    }

    pub const fn from_integer(value: i64) -> Self {
        Self { num: value, denom: 1 }
    }

    pub const fn numer(&self) -> i64 {
        self.num
    }

    pub const fn denom(&self) -> i64 {
        self.denom
    }

    /// Returns `false` if the denominator is zero.
    pub const fn is_defined(&self) -> bool {
        self.denom != 0
    }

    /// Brings the fraction to lowest terms with a positive denominator.
    ///
    /// Idempotent. A fraction with a zero denominator keeps it (`n/0` becomes
    /// `±1/0`, `0/0` is left alone). Overflows like the plain operators when
    /// `i64::MIN` is involved; use [`checked_reduce`][Rational::checked_reduce]
    /// on untrusted values.
    pub fn reduce(&mut self) {
        let gcd = self.num.gcd(&self.denom);
        if gcd == 0 {
            return;
        }
        self.num /= gcd;
        self.denom /= gcd;
        if self.denom < 0 {
            self.num = -self.num;
            self.denom = -self.denom;
        }
    }

    /// Returns a reduced copy, see [`Rational::reduce`].
    pub fn reduced(mut self) -> Self {
        self.reduce();
        self
    }

    /// Reduction that reports overflow instead of panicking or wrapping.
    ///
    /// Returns `None` when the lowest-terms form does not fit, e.g.
    /// `i64::MIN / -1`, whose sign flip gives `-i64::MIN`.
    pub fn checked_reduce(self) -> Option<Self> {
        let gcd = self.num.unsigned_abs().gcd(&self.denom.unsigned_abs());
        if gcd == 0 {
            return Some(self);
        }
        let gcd = i128::from(gcd);
        let mut num = i128::from(self.num) / gcd;
        let mut denom = i128::from(self.denom) / gcd;
        if denom < 0 {
            num = -num;
            denom = -denom;
        }
        Some(Rational {
            num: i64::try_from(num).ok()?,
            denom: i64::try_from(denom).ok()?,
        })
    }

    /// Returns the integer value if this fraction is a *reduced* integer.
    ///
    /// Unreduced values such as `4/2` yield `None`, so call
    /// [`reduce`][Rational::reduce] first.
    pub const fn as_integer(&self) -> Option<i64> {
        if self.denom == 1 {
            Some(self.num)
        } else {
            None
        }
    }
}

// Checked arithmetic
impl Rational {
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        let num = self.num.checked_mul(rhs.denom)?.checked_add(rhs.num.checked_mul(self.denom)?)?;
        let denom = self.denom.checked_mul(rhs.denom)?;
        Some(Self { num, denom })
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        let num = self.num.checked_mul(rhs.denom)?.checked_sub(rhs.num.checked_mul(self.denom)?)?;
        let denom = self.denom.checked_mul(rhs.denom)?;
        Some(Self { num, denom })
    }

    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        let num = self.num.checked_mul(rhs.num)?;
        let denom = self.denom.checked_mul(rhs.denom)?;
        Some(Self { num, denom })
    }

    /// Checked division. Returns `None` on overflow **and** when `rhs` is zero.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.num == 0 {
            return None;
        }
        let num = self.num.checked_mul(rhs.denom)?;
        let denom = self.denom.checked_mul(rhs.num)?;
        Some(Self { num, denom })
    }
}

impl Add for Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Self::Output {
        Rational {
            num: self.num * rhs.denom + rhs.num * self.denom,
            denom: self.denom * rhs.denom,
        }
    }
}

impl Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Self::Output {
        Rational {
            num: self.num * rhs.denom - rhs.num * self.denom,
            denom: self.denom * rhs.denom,
        }
    }
}

impl Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Self::Output {
        Rational {
            num: self.num * rhs.num,
            denom: self.denom * rhs.denom,
        }
    }
}

/// Unchecked division: a zero-valued `rhs` produces a zero denominator.
impl Div for Rational {
    type Output = Rational;

    fn div(self, rhs: Self) -> Self::Output {
        Rational {
            num: self.num * rhs.denom,
            denom: self.denom * rhs.num,
        }
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational {
            num: -self.num,
            denom: self.denom,
        }
    }
}

/// Compares by cross-multiplication, so unreduced values compare correctly.
/// The products are taken in `i128` and cannot overflow.
impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        if self.num == other.num && self.denom == other.denom {
            return true;
        }
        i128::from(self.num) * i128::from(other.denom) == i128::from(other.num) * i128::from(self.denom)
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Rational::from_integer(value)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.denom)
    }
}
