//! # Validation Module
//!
//! Input validation utilities for the EcoStore client.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust, before any state change)                  │
//! │  ├── Required-field checks (address, coupon code)                      │
//! │  └── Range checks (quantity, price)                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Authoritative validation on every write                           │
//! │                                                                         │
//! │  Defense in depth: validation errors here never reach the network.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::ShippingAddress;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed for free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns all/default results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates a coupon code as typed into the checkout form.
///
/// ## Rules
/// - Must not be empty
/// - Maximum 32 characters
/// - Letters, digits, and hyphens only (case is normalized later)
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "coupon code".to_string(),
        });
    }

    if code.len() > 32 {
        return Err(ValidationError::TooLong {
            field: "coupon code".to_string(),
            max: 32,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "coupon code".to_string(),
            reason: "must contain only letters, numbers, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates an email address for login/signup forms.
///
/// Intentionally shallow: the backend is authoritative; this only catches
/// obvious typos before a round-trip.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let well_formed = email
        .split_once('@')
        .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
        .unwrap_or(false);

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Address Validator
// =============================================================================

/// Validates a shipping address before checkout can advance to payment.
///
/// ## Rules
/// All four fields (street, city, state, zip) must be non-empty. The first
/// missing field is reported, matching the inline-error UX of the checkout
/// form.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Checkout: Shipping Address                                             │
/// │                                                                         │
/// │  submit_address(addr)                                                   │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_address(addr) ← THIS FUNCTION                                 │
/// │       │                                                                 │
/// │       ├── any field empty? → Error surfaced inline, stage unchanged     │
/// │       │                                                                 │
/// │       └── OK → stage advances to ReadyToPay                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_address(address: &ShippingAddress) -> ValidationResult<()> {
    let fields = [
        ("street address", &address.street_address),
        ("city", &address.city),
        ("state", &address.state),
        ("zip code", &address.zip_code),
    ];

    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(ValidationError::Required {
                field: name.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn full_address() -> ShippingAddress {
        ShippingAddress {
            street_address: "12 Banyan Road".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            zip_code: "411001".to_string(),
        }
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_rupees(199)).is_ok());
        assert!(validate_price(Money::from_paise(-1)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  bamboo  ").unwrap(), "bamboo");
        assert!(validate_search_query(&"a".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_coupon_code() {
        assert!(validate_coupon_code("ECO150-7GQ2ZK").is_ok());
        assert!(validate_coupon_code("eco50-ab12cd").is_ok());

        assert!(validate_coupon_code("").is_err());
        assert!(validate_coupon_code("   ").is_err());
        assert!(validate_coupon_code("has space").is_err());
        assert!(validate_coupon_code(&"A".repeat(40)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("asha@example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("asha@nodot").is_err());
    }

    #[test]
    fn test_validate_address_requires_all_fields() {
        assert!(validate_address(&full_address()).is_ok());

        for field in 0..4 {
            let mut addr = full_address();
            match field {
                0 => addr.street_address.clear(),
                1 => addr.city.clear(),
                2 => addr.state = "   ".to_string(),
                _ => addr.zip_code.clear(),
            }
            assert!(validate_address(&addr).is_err(), "field {} accepted empty", field);
        }
    }
}
