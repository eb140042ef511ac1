use checkout_payments::domain::status::TransactionStatus;
use checkout_payments::domain::transaction::{sort_default, PaymentTransaction};
use chrono::{Duration, TimeZone, Utc};
use rust_decimal_macros::dec;
use uuid::Uuid;

fn tx(minutes: i64, transaction_id: &str) -> PaymentTransaction {
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    PaymentTransaction {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        related: None,
        date: base + Duration::minutes(minutes),
        transaction_id: transaction_id.to_string(),
        value: dec!(1.00),
        status: TransactionStatus::Pending,
    }
}

#[test]
fn newest_first_then_transaction_id() {
    let mut txs = vec![
        tx(0, "B"),
        tx(5, "Z"),
        tx(0, "A"),
        tx(10, "M"),
        tx(5, "C"),
    ];
    sort_default(&mut txs);

    let ids: Vec<&str> = txs.iter().map(|t| t.transaction_id.as_str()).collect();
    assert_eq!(ids, vec!["M", "C", "Z", "A", "B"]);
}

#[test]
fn ordering_holds_pairwise_for_any_input() {
    let mut txs: Vec<PaymentTransaction> = (0..40)
        .map(|i| tx((i * 7) % 5, &format!("T{:02}", (i * 13) % 17)))
        .collect();
    sort_default(&mut txs);

    for pair in txs.windows(2) {
        assert!(pair[0].date >= pair[1].date);
        if pair[0].date == pair[1].date {
            assert!(pair[0].transaction_id <= pair[1].transaction_id);
        }
    }
}

#[test]
fn purchased_lines_follow_their_transactions() {
    use checkout_payments::domain::item::Item;
    use checkout_payments::domain::purchased_item::{default_ordering, PurchasedItem, PurchasedItemDetail};

    let line = |t: &PaymentTransaction| PurchasedItemDetail {
        purchase: PurchasedItem {
            id: Uuid::new_v4(),
            user_id: t.user_id,
            payment_transaction_id: t.id,
            item_id: Uuid::nil(),
            quantity: 1,
        },
        item: Item {
            id: Uuid::nil(),
            name: "Widget".to_string(),
            description: String::new(),
            value: dec!(1.00),
        },
        user_email: "buyer@example.com".to_string(),
        transaction_id: t.transaction_id.clone(),
        transaction_date: t.date,
    };

    let older = tx(0, "A");
    let newer_b = tx(3, "B");
    let newer_a = tx(3, "AA");
    let mut lines = vec![line(&older), line(&newer_b), line(&newer_a)];
    lines.sort_by(default_ordering);

    let ids: Vec<&str> = lines.iter().map(|l| l.transaction_id.as_str()).collect();
    assert_eq!(ids, vec!["AA", "B", "A"]);
}
