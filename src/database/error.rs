use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use std::fmt;

/// A write was refused because a column value is already used by another record.
///
/// raised both by the postgres unique constraints and by the in memory backend,
/// so callers can turn it into a field error without knowing the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueViolation {
    /// snake cased column name, eg: `email`
    pub column: String,
}

impl fmt::Display for UniqueViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unique constraint violated on column {}", self.column)
    }
}

impl std::error::Error for UniqueViolation {}

/// Converts a diesel error into a `anyhow::Error`, replacing unique violations
/// whose column can be determined by a `UniqueViolation`
pub fn from_diesel(err: DieselError) -> anyhow::Error {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &err {
        if let Some(column) = get_column_name_from_db_error_info(info.as_ref()) {
            return anyhow::Error::new(UniqueViolation {
                column: String::from(column),
            });
        }
    }

    anyhow::Error::new(err)
}

/// Extracts the column name from the name of a database unique constraint.
/// assuming the naming pattern: `<table_name>_<column>_unique`.
///
/// returns `Some(<column>)` if the pattern is ok otherwise `None`.
fn get_column_name_from_unique_constraint_name(unique_constraint_name: &str) -> Option<&str> {
    unique_constraint_name
        .strip_suffix("_unique")
        .and_then(|name| name.split('_').last())
}

/// Returns the column name from the database error information
///
/// - if the error contains the column name, returns it.
///
/// - if the error is from a unique constraint, returns the column name
/// inside the unique constraint.
///
/// otherwise returns `None`
fn get_column_name_from_db_error_info(info: &dyn DatabaseErrorInformation) -> Option<&str> {
    info.column_name().or_else(|| {
        info.constraint_name()
            .and_then(get_column_name_from_unique_constraint_name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_column_from_constraint_name() {
        assert_eq!(
            get_column_name_from_unique_constraint_name("user_email_unique"),
            Some("email")
        );
        assert_eq!(
            get_column_name_from_unique_constraint_name("user_login_unique"),
            Some("login")
        );
        assert_eq!(get_column_name_from_unique_constraint_name("user_pkey"), None);
    }

    #[test]
    fn other_diesel_errors_pass_through() {
        let err = from_diesel(DieselError::NotFound);

        assert!(err.downcast_ref::<UniqueViolation>().is_none());
        assert!(err.downcast_ref::<DieselError>().is_some());
    }
}
