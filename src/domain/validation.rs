use rust_decimal::Decimal;
use thiserror::Error;

pub const ITEM_NAME_MAX_LEN: usize = 2048;
pub const ITEM_DESCRIPTION_MAX_LEN: usize = 4000;
pub const TRANSACTION_ID_MAX_LEN: usize = 32;
pub const RELATED_TYPE_MAX_LEN: usize = 100;

/// Money columns are NUMERIC(8, 2).
pub const MONEY_MAX_DIGITS: u32 = 8;
pub const MONEY_DECIMAL_PLACES: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} is longer than {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} has more than {max} decimal places")]
    TooManyDecimalPlaces { field: &'static str, max: u32 },

    #[error("{field} has more than {max} digits before the decimal point")]
    TooManyIntegerDigits { field: &'static str, max: u32 },

    #[error("quantity {0} is out of range")]
    QuantityOutOfRange(u32),

    #[error("unknown transaction status '{0}'")]
    UnknownStatus(String),

    #[error("related object id {0} is negative")]
    NegativeObjectId(i64),

    #[error("related object needs both a type and an id")]
    IncompleteRelatedObject,

    #[error("checkout has no lines")]
    EmptyCheckout,

    #[error("a checkout cannot be confirmed as '{0}'")]
    UnsupportedOutcome(String),

    #[error("lines total {actual} but the transaction was opened for {expected}")]
    TotalMismatch { expected: Decimal, actual: Decimal },

    #[error("checkout total overflowed")]
    TotalOverflow,
}

pub fn require_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

pub fn validate_money(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    // 12.500 fits NUMERIC(8, 2); trailing zeros don't count.
    let normalized = value.normalize();
    if normalized.scale() > MONEY_DECIMAL_PLACES {
        return Err(ValidationError::TooManyDecimalPlaces {
            field,
            max: MONEY_DECIMAL_PLACES,
        });
    }

    let integer_digits = MONEY_MAX_DIGITS - MONEY_DECIMAL_PLACES;
    let limit = Decimal::from(10_i64.pow(integer_digits));
    if normalized.abs() >= limit {
        return Err(ValidationError::TooManyIntegerDigits {
            field,
            max: integer_digits,
        });
    }
    Ok(())
}

/// Quantities are stored in an INTEGER column.
pub fn validate_quantity(quantity: u32) -> Result<i32, ValidationError> {
    i32::try_from(quantity).map_err(|_| ValidationError::QuantityOutOfRange(quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_accepts_two_places_and_trailing_zeros() {
        assert!(validate_money("value", dec!(999999.99)).is_ok());
        assert!(validate_money("value", dec!(12.500)).is_ok());
        assert!(validate_money("value", dec!(-5)).is_ok());
    }

    #[test]
    fn money_rejects_precision_and_magnitude() {
        assert_eq!(
            validate_money("value", dec!(1.234)),
            Err(ValidationError::TooManyDecimalPlaces { field: "value", max: 2 })
        );
        assert_eq!(
            validate_money("value", dec!(1000000)),
            Err(ValidationError::TooManyIntegerDigits { field: "value", max: 6 })
        );
    }

    #[test]
    fn text_length_counts_chars() {
        let name = "é".repeat(ITEM_NAME_MAX_LEN);
        assert!(require_text("name", &name, ITEM_NAME_MAX_LEN).is_ok());
        assert!(require_text("name", "   ", ITEM_NAME_MAX_LEN).is_err());
    }

    #[test]
    fn quantity_must_fit_column() {
        assert_eq!(validate_quantity(3), Ok(3));
        assert!(validate_quantity(u32::MAX).is_err());
    }
}
