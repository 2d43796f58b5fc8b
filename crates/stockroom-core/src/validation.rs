//! # Validation Module
//!
//! Field validation rules for catalog input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Type checks, price precision                                      │
//! │  └── Rejects malformed JSON before a handler runs                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Field rules: lengths, ranges                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE constraint on sku (authoritative under races)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::price::{Price, MAX_PRICE_CENTS};
use crate::types::{NewProduct, ProductPatch};
use crate::{MAX_PAGE_LIMIT, NAME_MAX_LEN, NAME_MIN_LEN, SKU_MAX_LEN, SKU_MIN_LEN};

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a SKU: 2-64 characters.
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    validate_len("sku", sku, SKU_MIN_LEN, SKU_MAX_LEN)
}

/// Validates a product name: 2-200 characters.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    validate_len("name", name, NAME_MIN_LEN, NAME_MAX_LEN)
}

/// Validates a price: non-negative, at most 12 total digits.
///
/// Decimal precision is already enforced at the `Price` parsing boundary;
/// this check covers the magnitude budget.
pub fn validate_price(price: Price) -> ValidationResult<()> {
    if !price.in_range() {
        return Err(ValidationError::OutOfRange {
            field: "price",
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

/// Validates pagination parameters: `skip >= 0`, `limit` in [1, 100].
pub fn validate_page(skip: i64, limit: i64) -> ValidationResult<()> {
    if skip < 0 {
        return Err(ValidationError::OutOfRange {
            field: "skip",
            min: 0,
            max: i64::MAX,
        });
    }
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(ValidationError::OutOfRange {
            field: "limit",
            min: 1,
            max: MAX_PAGE_LIMIT,
        });
    }
    Ok(())
}

fn validate_len(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> ValidationResult<()> {
    let len = value.chars().count();
    if len == 0 {
        return Err(ValidationError::Required { field });
    }
    if len < min {
        return Err(ValidationError::TooShort { field, min });
    }
    if len > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

impl NewProduct {
    /// Validates all fields of a creation payload.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_sku(&self.sku)?;
        validate_name(&self.name)?;
        validate_price(self.price)?;
        Ok(())
    }
}

impl ProductPatch {
    /// Validates every field that was supplied; absent fields are skipped.
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(sku) = &self.sku {
            validate_sku(sku)?;
        }
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku_bounds() {
        assert!(validate_sku("A1").is_ok());
        assert!(validate_sku(&"A".repeat(64)).is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("A").is_err());
        assert!(validate_sku(&"A".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_name_bounds() {
        assert!(validate_name("Widget").is_ok());
        assert!(validate_name(&"n".repeat(200)).is_ok());

        assert!(validate_name("W").is_err());
        assert!(validate_name(&"n".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_price_bounds() {
        assert!(validate_price(Price::from_cents(0)).is_ok());
        assert!(validate_price(Price::from_cents(MAX_PRICE_CENTS)).is_ok());

        assert!(validate_price(Price::from_cents(-1)).is_err());
        assert!(validate_price(Price::from_cents(MAX_PRICE_CENTS + 1)).is_err());
    }

    #[test]
    fn test_validate_page() {
        assert!(validate_page(0, 10).is_ok());
        assert!(validate_page(500, 100).is_ok());
        assert!(validate_page(0, 1).is_ok());

        assert!(validate_page(-1, 10).is_err());
        assert!(validate_page(0, 0).is_err());
        assert!(validate_page(0, 101).is_err());
    }

    #[test]
    fn test_patch_validates_only_supplied_fields() {
        let patch = ProductPatch::default();
        assert!(patch.validate().is_ok());

        let patch = ProductPatch {
            sku: Some("X".to_string()),
            ..ProductPatch::default()
        };
        assert!(patch.validate().is_err());
    }
}
