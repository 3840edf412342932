// Property-based tests for splitting purchases into installments

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use spendwise::core::{AppError, Currency};
use spendwise::installments::services::{InstallmentCalculator, MAX_INSTALLMENTS};
use spendwise::installments::BillingCycle;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 100.00 in 3x bought 2024-01-15 on a 4/11 card
#[test]
fn test_notebook_scenario() {
    let installments = InstallmentCalculator::split(
        dec!(100.00),
        3,
        Currency::BRL,
        date(2024, 1, 15),
        &BillingCycle::default(),
    )
    .expect("Failed to split purchase");

    let amounts: Vec<Decimal> = installments.iter().map(|i| i.amount.unwrap()).collect();
    let due_dates: Vec<NaiveDate> = installments.iter().map(|i| i.due_date).collect();
    let numbers: Vec<u32> = installments.iter().map(|i| i.installment_number).collect();

    assert_eq!(amounts, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
    assert_eq!(
        due_dates,
        vec![date(2024, 2, 11), date(2024, 3, 11), date(2024, 4, 11)]
    );
    assert_eq!(numbers, vec![1, 2, 3]);
}

/// The rounding remainder can also be negative; it still lands on the first installment
#[test]
fn test_negative_remainder_on_first_installment() {
    let installments = InstallmentCalculator::split(
        dec!(200.00),
        3,
        Currency::BRL,
        date(2024, 1, 2),
        &BillingCycle::default(),
    )
    .expect("Failed to split purchase");

    let amounts: Vec<Decimal> = installments.iter().map(|i| i.amount.unwrap()).collect();
    assert_eq!(amounts, vec![dec!(66.66), dec!(66.67), dec!(66.67)]);
}

#[test]
fn test_count_outside_bounds_rejected() {
    for count in [0, MAX_INSTALLMENTS + 1] {
        let result = InstallmentCalculator::split(
            dec!(100),
            count,
            Currency::BRL,
            date(2024, 1, 15),
            &BillingCycle::default(),
        );
        assert!(
            matches!(result, Err(AppError::InvalidInstallmentCount(_))),
            "count {} should be rejected",
            count
        );
    }
}

proptest! {
    /// Property: installment amounts sum exactly to the purchase amount
    #[test]
    fn prop_installment_sum_equals_total(
        cents in 1u64..10_000_000u64,
        count in 1u32..=12,
    ) {
        let amount = Decimal::from(cents) / Decimal::from(100);

        let installments = InstallmentCalculator::split(
            amount,
            count,
            Currency::BRL,
            date(2024, 5, 20),
            &BillingCycle::default(),
        ).expect("Failed to split purchase");

        let total: Decimal = installments.iter().map(|i| i.amount.unwrap()).sum();

        prop_assert_eq!(installments.len(), count as usize);
        prop_assert_eq!(total, amount, "Installments must sum exactly to total");
    }

    /// Property: every installment after the first carries the same base amount
    #[test]
    fn prop_tail_installments_equal(
        cents in 100u64..10_000_000u64,
        count in 2u32..=12,
    ) {
        let amount = Decimal::from(cents) / Decimal::from(100);

        let installments = InstallmentCalculator::split(
            amount,
            count,
            Currency::USD,
            date(2024, 5, 20),
            &BillingCycle::default(),
        ).expect("Failed to split purchase");

        let base = installments[1].amount.unwrap();
        for installment in &installments[1..] {
            prop_assert_eq!(installment.amount.unwrap(), base);
        }
        prop_assert_eq!(base.scale() <= 2, true);
    }
}
