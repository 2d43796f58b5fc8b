//! # Price Module
//!
//! Provides the `Price` type for handling product prices safely.
//!
//! ## Why Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    The database, comparisons, and sorting all use i64 cents.            │
//! │    JSON carries a fixed-point decimal string ("19.99"), so a price      │
//! │    round-trips exactly: create with 19.99, read back 19.99.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! - Serialized as a decimal string with exactly two fractional digits.
//! - Deserialized from either a decimal string (`"19.99"`) or a JSON number
//!   (`19.99`). Numbers with more than two decimal places are rejected.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Largest representable price in cents.
///
/// The catalog allows at most 12 total digits with exactly 2 fractional
/// digits, i.e. 9,999,999,999.99.
pub const MAX_PRICE_CENTS: i64 = 999_999_999_999;

// =============================================================================
// Price Type
// =============================================================================

/// A product price in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 cents**: exact fixed-point arithmetic, no binary floats
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Custom serde**: decimal string on the wire, never a lossy float
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    /// Creates a price from cents.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::price::Price;
    ///
    /// let price = Price::from_cents(1999); // 19.99
    /// assert_eq!(price.cents(), 1999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Price(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99 for non-negative prices).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Checks if the price is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Checks if the price fits the catalog's 12-digit budget.
    #[inline]
    pub const fn in_range(&self) -> bool {
        self.0 >= 0 && self.0 <= MAX_PRICE_CENTS
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Error parsing a decimal price literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceParseError {
    /// Not a decimal number at all.
    #[error("invalid price literal: {0:?}")]
    Invalid(String),

    /// More than two fractional digits supplied.
    #[error("price must have at most 2 decimal places")]
    TooPrecise,

    /// Magnitude exceeds the 12-digit budget.
    #[error("price exceeds the maximum of 9999999999.99")]
    OutOfRange,
}

impl FromStr for Price {
    type Err = PriceParseError;

    /// Parses a fixed-point decimal literal, e.g. `"19.99"`, `"5"`, `"0.50"`.
    ///
    /// Pure integer math: the text is split on the decimal point and the
    /// fractional part is scaled to cents, so no float is ever involved.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(PriceParseError::Invalid(s.to_string()));
        }
        if frac.len() > 2 {
            return Err(PriceParseError::TooPrecise);
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) && !whole.is_empty() {
            return Err(PriceParseError::Invalid(s.to_string()));
        }
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(PriceParseError::Invalid(s.to_string()));
        }

        let whole_units: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| PriceParseError::OutOfRange)?
        };

        // Scale the fractional part: "9" means 90 cents, "99" means 99.
        let mut frac_cents: i64 = if frac.is_empty() {
            0
        } else {
            frac.parse()
                .map_err(|_| PriceParseError::Invalid(s.to_string()))?
        };
        if frac.len() == 1 {
            frac_cents *= 10;
        }

        let cents = whole_units
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or(PriceParseError::OutOfRange)?;

        Ok(Price(cents))
    }
}

/// Display as a fixed-point decimal with two fractional digits.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a decimal price with at most 2 decimal places")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map_err(de::Error::custom)
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        i64::try_from(v)
            .ok()
            .and_then(|units| units.checked_mul(100))
            .map(Price)
            .ok_or_else(|| de::Error::custom(PriceParseError::OutOfRange))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.checked_mul(100)
            .map(Price)
            .ok_or_else(|| de::Error::custom(PriceParseError::OutOfRange))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if !v.is_finite() || v.abs() > 1e13 {
            return Err(de::Error::custom(PriceParseError::OutOfRange));
        }
        let cents = (v * 100.0).round() as i64;
        // Every 2-decimal value in range survives f64 -> cents -> f64
        // exactly, so a failed round-trip means extra decimal places.
        if cents as f64 / 100.0 != v {
            return Err(de::Error::custom(PriceParseError::TooPrecise));
        }
        Ok(Price(cents))
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PriceVisitor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_decimals() {
        assert_eq!("19.99".parse::<Price>().unwrap().cents(), 1999);
        assert_eq!("0.50".parse::<Price>().unwrap().cents(), 50);
        assert_eq!("10.00".parse::<Price>().unwrap().cents(), 1000);
    }

    #[test]
    fn test_parse_short_forms() {
        assert_eq!("5".parse::<Price>().unwrap().cents(), 500);
        assert_eq!("5.9".parse::<Price>().unwrap().cents(), 590);
        assert_eq!(".99".parse::<Price>().unwrap().cents(), 99);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Price>().is_err());
        assert!(".".parse::<Price>().is_err());
        assert!("abc".parse::<Price>().is_err());
        assert!("1.2.3".parse::<Price>().is_err());
        assert!("-1.00".parse::<Price>().is_err());
    }

    #[test]
    fn test_parse_rejects_three_decimals() {
        assert_eq!(
            "19.999".parse::<Price>().unwrap_err(),
            PriceParseError::TooPrecise
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_cents(1999).to_string(), "19.99");
        assert_eq!(Price::from_cents(500).to_string(), "5.00");
        assert_eq!(Price::from_cents(9).to_string(), "0.09");
        assert_eq!(Price::from_cents(0).to_string(), "0.00");
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&Price::from_cents(1999)).unwrap();
        assert_eq!(json, "\"19.99\"");
    }

    #[test]
    fn test_deserialize_from_string() {
        let price: Price = serde_json::from_str("\"19.99\"").unwrap();
        assert_eq!(price.cents(), 1999);
    }

    #[test]
    fn test_deserialize_from_number() {
        let price: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(price.cents(), 1999);

        let price: Price = serde_json::from_str("10").unwrap();
        assert_eq!(price.cents(), 1000);
    }

    #[test]
    fn test_deserialize_rejects_extra_precision() {
        assert!(serde_json::from_str::<Price>("19.999").is_err());
        assert!(serde_json::from_str::<Price>("\"19.999\"").is_err());
    }

    /// Critical round-trip: 19.99 in, exactly 19.99 out.
    #[test]
    fn test_exact_round_trip() {
        let price: Price = serde_json::from_str("19.99").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"19.99\"");
    }

    #[test]
    fn test_range_check() {
        assert!(Price::from_cents(0).in_range());
        assert!(Price::from_cents(MAX_PRICE_CENTS).in_range());
        assert!(!Price::from_cents(MAX_PRICE_CENTS + 1).in_range());
        assert!(!Price::from_cents(-1).in_range());
    }

    #[test]
    fn test_ordering_is_numeric() {
        assert!(Price::from_cents(999) < Price::from_cents(1000));
        assert!(Price::from_cents(100_000) > Price::from_cents(99_999));
    }
}
