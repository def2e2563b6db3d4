//! Property-based tests for transaction validation.

use chrono::NaiveDate;
use fintrack_shared::types::AccountId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::types::TransactionInput;
use super::validation::validate_transaction;

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate zero or negative amounts.
fn non_positive_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..=0i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn make_input(
    from: Option<AccountId>,
    to: Option<AccountId>,
    amount: Decimal,
    currency: Option<String>,
) -> TransactionInput {
    TransactionInput {
        from_account_id: from,
        to_account_id: to,
        amount,
        currency,
        transaction_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        description: None,
        category_id: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any positive amount between distinct accounts with a well-formed code passes.
    #[test]
    fn prop_well_formed_payload_accepted(
        amount in positive_amount(),
        currency in "[A-Z]{3}",
        has_counter in any::<bool>(),
    ) {
        let to = has_counter.then(AccountId::new);
        let input = make_input(Some(AccountId::new()), to, amount, Some(currency));
        prop_assert!(validate_transaction(&input).is_ok());
    }

    /// Non-positive amounts are always reported on the `amount` field.
    #[test]
    fn prop_non_positive_amount_rejected(amount in non_positive_amount()) {
        let input = make_input(Some(AccountId::new()), None, amount, None);
        let errors = validate_transaction(&input).unwrap_err();
        prop_assert!(errors.contains("amount"));
        prop_assert_eq!(errors.len(), 1);
    }

    /// Violations on independent fields are all reported together.
    #[test]
    fn prop_independent_violations_accumulate(
        amount in non_positive_amount(),
        currency in "[a-z]{1,6}",
    ) {
        let input = make_input(None, None, amount, Some(currency));
        let errors = validate_transaction(&input).unwrap_err();
        prop_assert_eq!(errors.len(), 3);
    }
}
