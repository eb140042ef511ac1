use checkout_payments::domain::item::NewItem;
use checkout_payments::domain::related::RelatedObject;
use checkout_payments::domain::status::TransactionStatus;
use checkout_payments::domain::transaction::NewPaymentTransaction;
use checkout_payments::domain::validation::ValidationError;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn new_tx(transaction_id: &str) -> NewPaymentTransaction {
    NewPaymentTransaction {
        user_id: Uuid::new_v4(),
        related: Some(RelatedObject::Order { id: 12 }),
        transaction_id: transaction_id.to_string(),
        value: dec!(10.00),
        status: TransactionStatus::Checkout,
    }
}

#[test]
fn item_fields_are_bounded() {
    let ok = NewItem {
        name: "Widget".to_string(),
        description: "Blue, medium".to_string(),
        value: dec!(19.99),
    };
    assert!(ok.validate().is_ok());

    let long_name = NewItem {
        name: "x".repeat(2049),
        ..ok.clone()
    };
    assert_eq!(
        long_name.validate(),
        Err(ValidationError::TooLong { field: "name", max: 2048 })
    );

    let long_description = NewItem {
        description: "x".repeat(4001),
        ..ok.clone()
    };
    assert!(long_description.validate().is_err());

    let blank_description = NewItem {
        description: " \n ".to_string(),
        ..ok.clone()
    };
    assert_eq!(
        blank_description.validate(),
        Err(ValidationError::Empty { field: "description" })
    );

    let fine_value = NewItem {
        value: dec!(0.001),
        ..ok
    };
    assert!(fine_value.validate().is_err());
}

#[test]
fn transaction_id_fits_thirty_two_chars() {
    assert!(new_tx(&"A".repeat(32)).validate().is_ok());
    assert_eq!(
        new_tx(&"A".repeat(33)).validate(),
        Err(ValidationError::TooLong { field: "transaction_id", max: 32 })
    );
    assert_eq!(
        new_tx("").validate(),
        Err(ValidationError::Empty { field: "transaction_id" })
    );
}

#[test]
fn related_object_json_is_tagged() {
    let related: RelatedObject =
        serde_json::from_str(r#"{"type":"other","content_type":"invoice","object_id":9}"#).unwrap();
    assert_eq!(related.content_type(), "invoice");
    assert_eq!(related.object_id(), 9);

    let order = serde_json::to_value(RelatedObject::Order { id: 3 }).unwrap();
    assert_eq!(order, serde_json::json!({"type": "order", "id": 3}));
}
