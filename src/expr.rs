//! Stack evaluation of postfix expressions.
//!
//! An expression is described by three independent parts: a [`Shape`] (where
//! the leaves and branches go), the operands filling the leaves from left to
//! right, and the operators filling the branches from left to right.
//!
//! ```
//! use arith_reach::expr::{render, Evaluator, Operator};
//! use arith_reach::shape::Shape;
//!
//! let shape: Shape = "lllbb".parse().unwrap();
//! let ops = [Operator::Sub, Operator::Mul];
//!
//! let mut evaluator = Evaluator::new();
//! let value = evaluator.evaluate(&shape, &[2, 7, 4], &ops).reduced();
//! assert_eq!(value.as_integer(), Some(6)); // 2 * (7 - 4)
//! assert_eq!(render(&shape, &[2, 7, 4], &ops), " 2 7 4 - *");
//! ```

use std::fmt;

use crate::rational::Rational;
use crate::shape::{Shape, Token};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// All operators, in the order used for enumeration.
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Applies the operator with lazy arithmetic. `lhs` is the minuend/dividend.
    pub fn apply(self, lhs: Rational, rhs: Rational) -> Rational {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
            Operator::Div => lhs / rhs,
        }
    }

    pub fn checked_apply(self, lhs: Rational, rhs: Rational) -> Result<Rational, EvalFault> {
        match self {
            Operator::Add => lhs.checked_add(rhs).ok_or(EvalFault::Overflow),
            Operator::Sub => lhs.checked_sub(rhs).ok_or(EvalFault::Overflow),
            Operator::Mul => lhs.checked_mul(rhs).ok_or(EvalFault::Overflow),
            Operator::Div => {
                if rhs.numer() == 0 {
                    Err(EvalFault::DivisionByZero)
                } else {
                    lhs.checked_div(rhs).ok_or(EvalFault::Overflow)
                }
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Reason a checked evaluation produced no value.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EvalFault {
    /// Some branch divided by a zero-valued subexpression.
    DivisionByZero,
    /// An intermediate numerator or denominator left the `i64` range.
    Overflow,
}

impl fmt::Display for EvalFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalFault::DivisionByZero => write!(f, "division by zero"),
            EvalFault::Overflow => write!(f, "integer overflow"),
        }
    }
}

impl std::error::Error for EvalFault {}

fn check_arity(shape: &Shape, operands: &[i64], ops: &[Operator]) {
    assert_eq!(
        operands.len(),
        shape.width(),
        "Shape {} needs {} operands, got {}",
        shape,
        shape.width(),
        operands.len()
    );
    assert_eq!(
        ops.len() + 1,
        operands.len(),
        "Expected {} operators for {} operands, got {}",
        operands.len() - 1,
        operands.len(),
        ops.len()
    );
}

/// Postfix evaluator with a reusable work stack.
///
/// Mismatched operand or operator counts are programming errors and panic.
#[derive(Debug, Default)]
pub struct Evaluator {
    work: Vec<Rational>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates with unchecked lazy arithmetic.
    ///
    /// The result is *not* reduced. A division by a zero-valued subexpression
    /// leaves a zero denominator somewhere; since later operations may hide
    /// it, prefer [`evaluate_checked`][Evaluator::evaluate_checked] unless the
    /// operator assignment is known to avoid that.
    pub fn evaluate(&mut self, shape: &Shape, operands: &[i64], ops: &[Operator]) -> Rational {
        self.run(shape, operands, ops, |op, lhs, rhs| Ok(op.apply(lhs, rhs)))
            .unwrap_or_else(|fault| unreachable!("unchecked evaluation faulted: {}", fault))
    }

    /// Evaluates with checked arithmetic, stopping at the first fault.
    pub fn evaluate_checked(
        &mut self,
        shape: &Shape,
        operands: &[i64],
        ops: &[Operator],
    ) -> Result<Rational, EvalFault> {
        self.run(shape, operands, ops, Operator::checked_apply)
    }

    /// Checked evaluation followed by checked reduction to lowest terms.
    ///
    /// A result that does not fit once reduced is an [`EvalFault::Overflow`].
    pub fn evaluate_reduced(
        &mut self,
        shape: &Shape,
        operands: &[i64],
        ops: &[Operator],
    ) -> Result<Rational, EvalFault> {
        let value = self.evaluate_checked(shape, operands, ops)?;
        value.checked_reduce().ok_or(EvalFault::Overflow)
    }

    fn run<F>(&mut self, shape: &Shape, operands: &[i64], ops: &[Operator], mut apply: F) -> Result<Rational, EvalFault>
    where
        F: FnMut(Operator, Rational, Rational) -> Result<Rational, EvalFault>,
    {
        check_arity(shape, operands, ops);

        self.work.clear();
        let mut operands = operands.iter();
        let mut ops = ops.iter();

        for &token in shape.tokens() {
            match token {
                Token::Leaf => {
                    let &value = operands.next().expect("operand count checked above");
                    self.work.push(Rational::from_integer(value));
                }
                Token::Branch => {
                    let rhs = self.work.pop().expect("stack underflow in well-formed shape");
                    let lhs = self.work.pop().expect("stack underflow in well-formed shape");
                    let &op = ops.next().expect("operator count checked above");
                    self.work.push(apply(op, lhs, rhs)?);
                }
            }
        }

        assert_eq!(self.work.len(), 1, "Evaluation of {} left {} values", shape, self.work.len());
        Ok(self.work.pop().unwrap())
    }
}

/// Flattens an expression into postfix text, e.g. `" 2 3 + 4 *"`.
///
/// Every token is preceded by a single space. No arithmetic is performed.
pub fn render(shape: &Shape, operands: &[i64], ops: &[Operator]) -> String {
    check_arity(shape, operands, ops);

    let mut operands = operands.iter();
    let mut ops = ops.iter();
    let mut res = String::new();

    for &token in shape.tokens() {
        res.push(' ');
        match token {
            Token::Leaf => {
                let value = operands.next().expect("operand count checked above");
                res.push_str(&value.to_string());
            }
            Token::Branch => {
                let op = ops.next().expect("operator count checked above");
                res.push(op.symbol());
            }
        }
    }

    res
}
