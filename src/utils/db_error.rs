//! Classification of datastore errors.

/// Returns true when the datastore reported that the targeted record does not
/// exist.
///
/// Statements using `fetch_one` (e.g. `DELETE ... RETURNING`) surface a
/// missing row as [`sqlx::Error::RowNotFound`]. This is the only error kind the
/// persistence layer translates into an absent result; all others propagate.
pub fn is_record_not_found(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::RowNotFound)
}
