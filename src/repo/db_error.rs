use sqlx::error::ErrorKind;

/// Finds the database error kind inside an `anyhow` chain, if the failure
/// came from Postgres at all.
fn database_error_kind(err: &anyhow::Error) -> Option<ErrorKind> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<sqlx::Error>())
        .and_then(|e| match e {
            sqlx::Error::Database(db) => Some(db.kind()),
            _ => None,
        })
}

pub fn is_foreign_key_violation(err: &anyhow::Error) -> bool {
    matches!(database_error_kind(err), Some(ErrorKind::ForeignKeyViolation))
}

pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(database_error_kind(err), Some(ErrorKind::UniqueViolation))
}

pub fn is_check_violation(err: &anyhow::Error) -> bool {
    matches!(database_error_kind(err), Some(ErrorKind::CheckViolation))
}
