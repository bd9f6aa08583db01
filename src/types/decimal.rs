//! Exact fixed-point decimal numbers.
//!
//! A decimal is a sign, an ordered digit sequence, and a scale marking the
//! boundary between the integer and fractional digits: the digits before
//! index `scale` form the integer part. Values are kept normalized: no
//! leading zero integer digits, no trailing zero fractional digits, and
//! zero itself is the empty digit sequence with scale 0.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// An exact base-10 number. Unlike a binary float, parsing and comparing
/// never round.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Decimal {
    negative: bool,
    digits: Vec<u8>,
    /// Number of digits belonging to the integer part.
    scale: usize,
}

impl Decimal {
    /// The canonical zero: empty digits, scale 0, non-negative.
    pub fn zero() -> Self {
        Decimal::default()
    }

    /// Number of digits to the left of the decimal point.
    pub fn scale(&self) -> usize {
        self.scale
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Builds a normalized decimal from raw parts: leading zero integer
    /// digits are stripped (decreasing the scale with them), trailing zero
    /// fractional digits are dropped, and an all-zero value collapses to
    /// the canonical zero.
    fn normalize(negative: bool, mut digits: Vec<u8>, mut scale: usize) -> Self {
        let mut strip = 0;
        while scale > 0 && strip < digits.len() && digits[strip] == 0 {
            scale -= 1;
            strip += 1;
        }
        digits.drain(..strip);
        while digits.len() > scale && digits.last() == Some(&0) {
            digits.pop();
        }
        if digits.is_empty() {
            return Decimal::zero();
        }
        Decimal {
            negative,
            digits,
            scale,
        }
    }
}

impl FromStr for Decimal {
    type Err = Error;

    /// Parses an optionally signed digit sequence with at most one `.`.
    fn from_str(input: &str) -> Result<Self> {
        let (negative, rest) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        if rest.is_empty() {
            return Err(Error::InvalidValue("empty number".into()));
        }

        let mut digits = Vec::new();
        let mut scale = None;
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c as u8 - b'0'),
                '.' if scale.is_none() => scale = Some(digits.len()),
                '.' => {
                    return Err(Error::InvalidValue(format!(
                        "multiple decimal points in {input:?}"
                    )));
                }
                c => {
                    return Err(Error::InvalidValue(format!(
                        "unexpected character {c:?} in number {input:?}"
                    )));
                }
            }
        }
        let scale = scale.unwrap_or(digits.len());
        Ok(Decimal::normalize(negative, digits, scale))
    }
}

impl Ord for Decimal {
    /// Orders by sign, then scale, then the digit sequences. The scale acts
    /// as an order of magnitude because a normalized nonzero value has a
    /// nonzero leading digit; the digit sequences then compare
    /// lexicographically with ties broken by length, which the slice
    /// ordering already does.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => return Ordering::Greater,
            (true, false) => return Ordering::Less,
            _ => {}
        }
        let ordering = self
            .scale
            .cmp(&other.scale)
            .then_with(|| self.digits.cmp(&other.digits));
        if self.negative {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        if self.scale == 0 {
            write!(f, "0")?;
        }
        for (i, digit) in self.digits.iter().enumerate() {
            if i == self.scale {
                write!(f, ".")?;
            }
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}
