use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The slice of the host application's user record this crate reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
}
