//! Shapes of full binary trees in postfix form.
//!
//! A shape with `m` leaves is a sequence of `2m - 1` tokens: `m` leaves and
//! `m - 1` branches, listed in postfix order. Reading it with a virtual stack
//! (push on leaf, pop two and push one on branch) never underflows and ends
//! with exactly one element.
//!
//! The shapes of a given width are counted by the Catalan numbers:
//! `1, 1, 2, 5, 14, 42, ...` for `m = 1, 2, 3, ...`.
//!
//! ```
//! use arith_reach::shape::enumerate;
//!
//! let shapes: Vec<String> = enumerate(3).iter().map(|s| s.to_string()).collect();
//! assert_eq!(shapes, vec!["llblb", "lllbb"]);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Token {
    Leaf,
    Branch,
}

impl Token {
    pub fn to_char(self) -> char {
        match self {
            Token::Leaf => 'l',
            Token::Branch => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'l' => Some(Token::Leaf),
            'b' => Some(Token::Branch),
            _ => None,
        }
    }
}

/// Postfix token sequence of a full binary tree.
///
/// # Invariants
///
/// - Contains `width` leaves and `width - 1` branches, `width >= 1`.
/// - Every prefix has strictly more leaves than branches.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Shape {
    tokens: Box<[Token]>,
}

impl Shape {
    /// The single one-leaf shape.
    pub fn leaf() -> Self {
        Self {
            tokens: Box::new([Token::Leaf]),
        }
    }

    /// Joins two subtrees under a new root: `left ++ right ++ branch`.
    pub fn join(left: &Shape, right: &Shape) -> Self {
        let mut tokens = Vec::with_capacity(left.len() + right.len() + 1);
        tokens.extend_from_slice(&left.tokens);
        tokens.extend_from_slice(&right.tokens);
        tokens.push(Token::Branch);
        Self {
            tokens: tokens.into_boxed_slice(),
        }
    }

    /// Validates a raw token sequence.
    pub fn from_tokens(tokens: Vec<Token>) -> Option<Self> {
        if is_well_formed(&tokens) {
            Some(Self {
                tokens: tokens.into_boxed_slice(),
            })
        } else {
            None
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of leaves.
    pub fn width(&self) -> usize {
        (self.tokens.len() + 1) / 2
    }
}

/// Checks the stack discipline of a token sequence.
pub fn is_well_formed(tokens: &[Token]) -> bool {
    let mut depth: usize = 0;
    for &token in tokens {
        match token {
            Token::Leaf => depth += 1,
            Token::Branch => {
                if depth < 2 {
                    return false;
                }
                depth -= 1;
            }
        }
    }
    depth == 1
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in self.tokens.iter() {
            write!(f, "{}", token.to_char())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseShapeError {
    InvalidChar(char),
    IllFormed,
}

impl fmt::Display for ParseShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseShapeError::InvalidChar(c) => write!(f, "invalid shape token '{}'", c),
            ParseShapeError::IllFormed => write!(f, "token sequence is not a full binary tree"),
        }
    }
}

impl std::error::Error for ParseShapeError {}

/// Parses `l`/`b` characters; whitespace is ignored.
impl FromStr for Shape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Token::from_char(c).ok_or(ParseShapeError::InvalidChar(c)))
            .collect::<Result<Vec<_>, _>>()?;
        Shape::from_tokens(tokens).ok_or(ParseShapeError::IllFormed)
    }
}

/// Enumerates all shapes with `m` leaves.
///
/// For every split `n` in `1..m`, each shape of width `m - n` is joined with
/// each shape of width `n`. Different splits never produce the same sequence,
/// so no deduplication is needed.
///
/// This recomputes the subproblems on every call; use [`ShapeCatalog`] to
/// enumerate once and share the result.
///
/// # Panics
///
/// Panics if `m == 0`.
pub fn enumerate(m: usize) -> Vec<Shape> {
    assert!(m >= 1, "Tree width must be >= 1");

    if m == 1 {
        return vec![Shape::leaf()];
    }

    let mut res = Vec::new();
    for n in 1..m {
        let lefts = enumerate(m - n);
        let rights = enumerate(n);
        for left in &lefts {
            for right in &rights {
                res.push(Shape::join(left, right));
            }
        }
    }
    res
}

/// Memoized shape enumeration, indexed by width.
///
/// Results are handed out as `Arc<[Shape]>`, so all consumers share one
/// read-only copy.
#[derive(Debug, Default)]
pub struct ShapeCatalog {
    /// `by_width[m - 1]` holds the shapes with `m` leaves.
    by_width: Vec<Arc<[Shape]>>,
}

impl ShapeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all shapes with `m` leaves, in the same order as [`enumerate`].
    pub fn shapes(&mut self, m: usize) -> Arc<[Shape]> {
        assert!(m >= 1, "Tree width must be >= 1");

        while self.by_width.len() < m {
            let width = self.by_width.len() + 1;
            let shapes: Vec<Shape> = if width == 1 {
                vec![Shape::leaf()]
            } else {
                let mut res = Vec::new();
                for n in 1..width {
                    let lefts = &self.by_width[width - n - 1];
                    let rights = &self.by_width[n - 1];
                    for left in lefts.iter() {
                        for right in rights.iter() {
                            res.push(Shape::join(left, right));
                        }
                    }
                }
                res
            };
            log::debug!("Enumerated {} tree shapes of width {}", shapes.len(), width);
            self.by_width.push(shapes.into());
        }

        Arc::clone(&self.by_width[m - 1])
    }
}
