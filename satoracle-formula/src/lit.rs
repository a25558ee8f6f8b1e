//! Literals and variables.
use std::{fmt, ops};

use thiserror::Error;

/// The backing type used to represent variable numbers.
pub type LitIdx = u32;

/// Reasons for rejecting an integer as a literal.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
pub enum LiteralError {
    #[error("0 is not a valid literal")]
    Zero,
    #[error("literal {number} exceeds the largest supported variable {max}")]
    TooLarge { number: isize, max: usize },
}

/// A boolean variable.
///
/// Variables are numbered starting at 1, the same numbering used by the DIMACS CNF format and by
/// the signed integer encoding of literals. The number 0 never denotes a variable, so vectors
/// indexed by [`Var::number`] keep slot 0 unused.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Var {
    number: LitIdx,
}

impl Var {
    /// Creates a variable from its 1-based number.
    ///
    /// Panics unless the number is in `1..=Var::max_count()`. Use [`Lit::try_from_dimacs`] for
    /// unchecked input.
    #[inline]
    pub fn from_dimacs(number: isize) -> Var {
        assert!(number > 0, "variable number {} is not positive", number);
        Var::from_number(number as usize)
    }

    /// Creates a variable from its 1-based number as `usize`.
    ///
    /// Panics unless the number is in `1..=Var::max_count()`.
    #[inline]
    pub fn from_number(number: usize) -> Var {
        assert!(
            number > 0 && number <= Var::max_count(),
            "variable number {} out of range",
            number
        );
        Var {
            number: number as LitIdx,
        }
    }

    /// The 1-based number of this variable.
    ///
    /// Can be used directly as index into vectors of length `var_count + 1`.
    #[inline]
    pub const fn number(self) -> usize {
        self.number as usize
    }

    /// The 1-based number as used in the DIMACS CNF encoding.
    #[inline]
    pub fn to_dimacs(self) -> isize {
        self.number as isize
    }

    /// The variable with the largest supported number.
    ///
    /// Literals store the negation in the sign of an `i32`, which limits the range.
    pub const fn max_var() -> Var {
        Var {
            number: i32::max_value() as LitIdx,
        }
    }

    /// Largest number of variables supported.
    pub const fn max_count() -> usize {
        Self::max_var().number()
    }

    /// Creates a literal from this var and a `bool` that is `true` when the literal is positive.
    #[inline]
    pub fn lit(self, polarity: bool) -> Lit {
        Lit::from_var(self, polarity)
    }

    #[inline]
    pub fn positive(self) -> Lit {
        Lit::from_var(self, true)
    }

    #[inline]
    pub fn negative(self) -> Lit {
        Lit::from_var(self, false)
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.number)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A boolean literal.
///
/// A literal is stored as a signed integer: its magnitude is the number of its variable and a
/// negative sign denotes the negated variable. The value 0 cannot be constructed.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Lit {
    value: i32,
}

impl Lit {
    /// Creates a literal from a `Var` and a `bool` that is `true` when the literal is positive.
    #[inline]
    pub fn from_var(var: Var, polarity: bool) -> Lit {
        let magnitude = var.number as i32;
        Lit {
            value: if polarity { magnitude } else { -magnitude },
        }
    }

    /// Creates a literal from a signed integer.
    ///
    /// The absolute value is the variable number, the sign is the polarity. Fails for 0 and for
    /// magnitudes past `Var::max_count()`.
    pub fn try_from_dimacs(number: isize) -> Result<Lit, LiteralError> {
        if number == 0 {
            return Err(LiteralError::Zero);
        }
        let magnitude = number.wrapping_abs() as usize;
        if magnitude > Var::max_count() {
            return Err(LiteralError::TooLarge {
                number,
                max: Var::max_count(),
            });
        }
        Ok(Lit::from_var(Var::from_number(magnitude), number > 0))
    }

    /// Integer representation of the literal, opposite of `try_from_dimacs`.
    #[inline]
    pub fn to_dimacs(self) -> isize {
        self.value as isize
    }

    /// The literal's variable.
    #[inline]
    pub fn var(self) -> Var {
        Var {
            number: self.value.abs() as LitIdx,
        }
    }

    /// Whether the literal is negative, i.e. a negated variable.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.value < 0
    }

    /// Whether the literal is positive, i.e. a non-negated variable.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.value > 0
    }
}

impl ops::Not for Lit {
    type Output = Lit;

    #[inline]
    fn not(self) -> Lit {
        Lit { value: -self.value }
    }
}

/// Negates the literal when the right hand side is `true`.
impl ops::BitXor<bool> for Lit {
    type Output = Lit;

    #[inline]
    fn bitxor(self, rhs: bool) -> Lit {
        if rhs {
            !self
        } else {
            self
        }
    }
}

impl From<Var> for Lit {
    #[inline]
    fn from(var: Var) -> Lit {
        var.positive()
    }
}

impl fmt::Debug for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(any(test, feature = "proptest-strategies"))]
#[doc(hidden)]
pub mod strategy {
    use super::*;
    use proptest::{prelude::*, *};

    /// Variables with numbers drawn from `number`, which must not produce 0.
    pub fn var(number: impl Strategy<Value = usize>) -> impl Strategy<Value = Var> {
        number.prop_map(Var::from_number)
    }

    pub fn lit(number: impl Strategy<Value = usize>) -> impl Strategy<Value = Lit> {
        (var(number), bool::ANY).prop_map(|(var, polarity)| var.lit(polarity))
    }
}
