use crate::domain::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Provider-reported state of a payment transaction.
///
/// The string form is what lands in `payment_transactions.status`; the
/// migration's CHECK constraint lists the same four values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Checkout,
    Canceled,
    Pending,
    Completed,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 4] = [
        TransactionStatus::Checkout,
        TransactionStatus::Canceled,
        TransactionStatus::Pending,
        TransactionStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Checkout => "checkout",
            TransactionStatus::Canceled => "canceled",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
        }
    }

    /// Statuses a provider may report when it accepts a payment.
    pub fn is_confirmation(&self) -> bool {
        matches!(self, TransactionStatus::Pending | TransactionStatus::Completed)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownStatus(s.to_string()))
    }
}
