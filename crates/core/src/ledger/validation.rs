//! Structural validation of transaction payloads.
//!
//! Pure functions with no I/O: account ownership and currency resolution are
//! the service's job and happen only after a payload passes here.

use rust_decimal::Decimal;

use super::types::TransactionInput;
use crate::fields::FieldErrors;

/// Maximum description length, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Returns true for a three-letter uppercase ASCII code such as `USD`.
#[must_use]
pub fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Validates a transaction payload, reporting every violation at once.
///
/// # Errors
///
/// Returns the full set of field errors if any rule is violated.
pub fn validate_transaction(input: &TransactionInput) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    let from = input.from_account_id.filter(|id| !id.is_nil());
    if from.is_none() {
        errors.add("from_account_id", "is required");
    }

    if input.amount <= Decimal::ZERO {
        errors.add("amount", "must be greater than zero");
    }

    if let (Some(from), Some(to)) = (from, input.counter_account())
        && from == to
    {
        errors.add("to_account_id", "must differ from from_account_id");
    }

    if let Some(currency) = input.requested_currency()
        && !is_currency_code(currency)
    {
        errors.add("currency", "must be a three-letter uppercase code");
    }

    if input
        .description
        .as_deref()
        .is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LEN)
    {
        errors.add(
            "description",
            format!("must be at most {MAX_DESCRIPTION_LEN} characters"),
        );
    }

    errors.into_result()
}
