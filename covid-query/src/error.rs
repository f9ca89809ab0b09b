/// Error raised when raw query string values cannot be turned into [`QueryParams`].
///
/// Every variant is a client mistake and is detected before any database work.
///
/// [`QueryParams`]: crate::QueryParams
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Only one of `orderBy` and `order` was supplied.
    #[error("Query parameters order and orderBy must both be included")]
    MismatchedOrder,

    /// `orderBy` names a column outside the sortable set.
    #[error("Invalid query parameter orderBy value \"{0}\"")]
    InvalidOrderBy(String),

    /// `order` is neither `asc` nor `desc`.
    #[error("Invalid query parameter order value \"{0}\"")]
    InvalidOrder(String),
}
