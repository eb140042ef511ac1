use crate::domain::validation::{
    require_text, validate_money, ValidationError, ITEM_DESCRIPTION_MAX_LEN, ITEM_NAME_MAX_LEN,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A product on sale. Rows referenced by a purchase are left alone by
/// convention; nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub value: Decimal,
}

impl NewItem {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name, ITEM_NAME_MAX_LEN)?;
        require_text("description", &self.description, ITEM_DESCRIPTION_MAX_LEN)?;
        validate_money("value", self.value)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.value;
        value.rescale(2);
        write!(f, "{} - {} $", self.name, value)
    }
}
