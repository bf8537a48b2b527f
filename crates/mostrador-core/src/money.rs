//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Storing prices as REAL invites rounding drift:                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    price 2.50 is stored as 250 cents                                    │
//! │    sale total = quantity × price_cents, exact every time                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mostrador_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(250); // 2.50
//!
//! // Parse decimal form input ("precio" fields arrive as strings)
//! let parsed = Money::parse("2.50").unwrap();
//! assert_eq!(parsed, price);
//!
//! // Sale total
//! let total = price.multiply_quantity(3);
//! assert_eq!(total.cents(), 750);
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: leaves headroom for corrections/adjustments
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serde**: serializes as a bare integer (cents) in JSON payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use mostrador_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parses a decimal amount as typed into a form field.
    ///
    /// ## Accepted Formats
    /// - `"12"` → 1200 cents
    /// - `"12.5"` → 1250 cents
    /// - `"12.50"` → 1250 cents
    /// - `"0.99"` → 99 cents
    ///
    /// Anything else (more than two decimal places, signs in the wrong
    /// place, empty input, non-digits) is rejected with the field name so
    /// the caller can surface a precise message.
    ///
    /// ## Example
    /// ```rust
    /// use mostrador_core::money::Money;
    ///
    /// assert_eq!(Money::parse("2.50").unwrap().cents(), 250);
    /// assert!(Money::parse("abc").is_err());
    /// assert!(Money::parse("1.234").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (major, minor) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if major.is_empty() || !major.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::invalid_format("amount", "not a number"));
        }

        if minor.len() > 2 || !minor.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "amount",
                "at most two decimal places",
            ));
        }

        let major: i64 = major
            .parse()
            .map_err(|_| ValidationError::invalid_format("amount", "too large"))?;

        // "12.5" means 12.50, not 12.05
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().unwrap_or(0) * 10,
            _ => minor.parse::<i64>().unwrap_or(0),
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| ValidationError::invalid_format("amount", "too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Multiplies money by a quantity (the sale-total rule).
    ///
    /// ## Example
    /// ```rust
    /// use mostrador_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(200); // 2.00
    /// let total = unit_price.multiply_quantity(3);
    /// assert_eq!(total.cents(), 600); // 6.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and messages. Clients format cents themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Summing an iterator of Money values (daily totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
    }

    #[test]
    fn test_parse_whole_number() {
        assert_eq!(Money::parse("12").unwrap().cents(), 1200);
        assert_eq!(Money::parse("0").unwrap().cents(), 0);
    }

    #[test]
    fn test_parse_decimals() {
        assert_eq!(Money::parse("12.50").unwrap().cents(), 1250);
        assert_eq!(Money::parse("12.5").unwrap().cents(), 1250);
        assert_eq!(Money::parse("0.99").unwrap().cents(), 99);
        assert_eq!(Money::parse(" 2.00 ").unwrap().cents(), 200);
    }

    #[test]
    fn test_parse_negative() {
        assert_eq!(Money::parse("-5.50").unwrap().cents(), -550);
        assert!(Money::parse("-5.50").unwrap().is_negative());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.234").is_err());
        assert!(Money::parse("1,50").is_err());
        assert!(Money::parse(".50").is_err());
        assert!(Money::parse("1.-5").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
    }

    #[test]
    fn test_multiply_quantity() {
        // Price 2.00, sell 3 → total 6.00
        let unit_price = Money::from_cents(200);
        assert_eq!(unit_price.multiply_quantity(3).cents(), 600);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 50].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 400);

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }
}
