use crate::domain::validation::{require_text, ValidationError, RELATED_TYPE_MAX_LEN};
use serde::{Deserialize, Serialize};

const ORDER_TYPE: &str = "order";

/// Host-application entity a transaction is attached to.
///
/// Stored as the `related_type` / `related_id` column pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelatedObject {
    Order { id: i64 },
    Other { content_type: String, object_id: i64 },
}

impl RelatedObject {
    pub fn content_type(&self) -> &str {
        match self {
            RelatedObject::Order { .. } => ORDER_TYPE,
            RelatedObject::Other { content_type, .. } => content_type,
        }
    }

    pub fn object_id(&self) -> i64 {
        match self {
            RelatedObject::Order { id } => *id,
            RelatedObject::Other { object_id, .. } => *object_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("related_type", self.content_type(), RELATED_TYPE_MAX_LEN)?;
        if self.object_id() < 0 {
            return Err(ValidationError::NegativeObjectId(self.object_id()));
        }
        Ok(())
    }

    /// Builds the reference from its stored column pair. `Other` tagged as
    /// "order" collapses into `Order` so both spellings compare equal.
    pub fn from_columns(
        content_type: Option<String>,
        object_id: Option<i64>,
    ) -> Result<Option<Self>, ValidationError> {
        match (content_type, object_id) {
            (None, None) => Ok(None),
            (Some(content_type), Some(id)) if content_type == ORDER_TYPE => {
                Ok(Some(RelatedObject::Order { id }))
            }
            (Some(content_type), Some(object_id)) => Ok(Some(RelatedObject::Other {
                content_type,
                object_id,
            })),
            _ => Err(ValidationError::IncompleteRelatedObject),
        }
    }

    pub fn to_columns(related: Option<&Self>) -> (Option<String>, Option<i64>) {
        match related {
            Some(r) => (Some(r.content_type().to_string()), Some(r.object_id())),
            None => (None, None),
        }
    }
}
