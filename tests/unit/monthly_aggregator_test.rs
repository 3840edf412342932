// Property-based tests for attributing spending to months

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use spendwise::core::YearMonth;
use spendwise::payment_methods::default_payment_methods;
use spendwise::reports::MonthlyAggregator;
use spendwise::transactions::{Category, Transaction, TransactionMaterializer, TransactionRequest};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn request(amount: Decimal, on: NaiveDate, method: &str, installments: Option<u32>) -> TransactionRequest {
    TransactionRequest {
        description: "Purchase".to_string(),
        amount,
        date: on,
        category: Category::Shopping,
        payment_method: Some(method.to_string()),
        total_installments: installments,
    }
}

fn materialize(id: usize, request: TransactionRequest) -> Transaction {
    let methods = default_payment_methods();
    let method = methods
        .iter()
        .find(|m| Some(&m.id) == request.payment_method.as_ref());
    TransactionMaterializer::default()
        .materialize(format!("tr-{}", id), request, method)
        .expect("Failed to materialize transaction")
}

/// Every month an installment series touches gets exactly its share
#[test]
fn test_installment_purchase_spread_over_due_months() {
    let transactions = vec![materialize(
        1,
        request(dec!(100.00), date(2024, 1, 15), "credit", Some(3)),
    )];

    let totals: Vec<Decimal> = ["2024-01", "2024-02", "2024-03", "2024-04", "2024-05"]
        .iter()
        .map(|m| MonthlyAggregator::aggregate_for_month(&transactions, m.parse().unwrap()))
        .collect();

    assert_eq!(
        totals,
        vec![dec!(0), dec!(33.34), dec!(33.33), dec!(33.33), dec!(0)]
    );
}

/// A stored record whose installment amount is unreadable contributes zero
#[test]
fn test_malformed_installment_from_storage_counts_zero() {
    let json = r#"{
        "id": "tr-broken",
        "description": "TV",
        "amount": "300.00",
        "date": "2024-01-15",
        "category": "shopping",
        "paymentMethod": "credit",
        "dueMonth": "2024-02",
        "installments": [
            {"installmentNumber": 1, "amount": "100.00", "dueDate": "2024-02-11"},
            {"installmentNumber": 2, "amount": "not a number", "dueDate": "2024-03-11"},
            {"installmentNumber": 3, "dueDate": "2024-04-11"}
        ],
        "installmentAmount": "100.00",
        "totalAmount": "300.00",
        "totalInstallments": 3
    }"#;
    let transaction: Transaction = serde_json::from_str(json).expect("Failed to parse record");
    let transactions = vec![transaction];

    let feb: YearMonth = "2024-02".parse().unwrap();
    let mar: YearMonth = "2024-03".parse().unwrap();
    let apr: YearMonth = "2024-04".parse().unwrap();

    assert_eq!(MonthlyAggregator::aggregate_for_month(&transactions, feb), dec!(100.00));
    assert_eq!(MonthlyAggregator::aggregate_for_month(&transactions, mar), dec!(0));
    assert_eq!(MonthlyAggregator::aggregate_for_month(&transactions, apr), dec!(0));
}

fn purchase_strategy() -> impl Strategy<Value = (u64, u32, u32, &'static str, Option<u32>)> {
    (
        1u64..1_000_000u64,
        1u32..=12,
        1u32..=28,
        prop::sample::select(vec!["cash", "debit", "credit"]),
        prop::option::of(1u32..=12),
    )
}

proptest! {
    /// Property: summing every touched month recovers the total of all purchases
    #[test]
    fn prop_months_partition_total(
        purchases in prop::collection::vec(purchase_strategy(), 1..20),
    ) {
        let transactions: Vec<Transaction> = purchases
            .iter()
            .enumerate()
            .map(|(i, &(cents, month, day, method, installments))| {
                let amount = Decimal::from(cents) / Decimal::from(100);
                materialize(i, request(amount, date(2024, month, day), method, installments))
            })
            .collect();

        let expected: Decimal = transactions.iter().map(|t| t.amount).sum();

        let span = MonthlyAggregator::monthly_totals(
            &transactions,
            "2024-01".parse().unwrap(),
            "2026-01".parse().unwrap(),
        ).unwrap();
        let partitioned: Decimal = span.iter().map(|m| m.total).sum();

        prop_assert_eq!(span.len(), 25);
        prop_assert_eq!(partitioned, expected);
    }
}
