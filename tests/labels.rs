use checkout_payments::domain::item::Item;
use checkout_payments::domain::purchased_item::{PurchasedItem, PurchasedItemDetail};
use checkout_payments::domain::status::TransactionStatus;
use checkout_payments::domain::transaction::PaymentTransaction;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn widget() -> Item {
    Item {
        id: Uuid::new_v4(),
        name: "Widget".to_string(),
        description: "A small widget".to_string(),
        value: dec!(12.5),
    }
}

#[test]
fn item_label_shows_name_and_two_place_value() {
    assert_eq!(widget().to_string(), "Widget - 12.50 $");
}

#[test]
fn transaction_label_is_provider_id() {
    let tx = PaymentTransaction {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        related: None,
        date: chrono::Utc::now(),
        transaction_id: "EC-4JX09876".to_string(),
        value: dec!(25.00),
        status: TransactionStatus::Checkout,
    };
    assert_eq!(tx.to_string(), "EC-4JX09876");
}

#[test]
fn purchased_item_label_combines_quantity_item_user_and_transaction() {
    let item = widget();
    let detail = PurchasedItemDetail {
        purchase: PurchasedItem {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            payment_transaction_id: Uuid::new_v4(),
            item_id: item.id,
            quantity: 3,
        },
        item,
        user_email: "buyer@example.com".to_string(),
        transaction_id: "EC-4JX09876".to_string(),
        transaction_date: chrono::Utc::now(),
    };

    assert_eq!(
        detail.to_string(),
        "3 Widget - 12.50 $ of buyer@example.com [EC-4JX09876]"
    );
}
