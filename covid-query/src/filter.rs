use crate::params::{Order, OrderBy};

/// Structured `WHERE` / `ORDER BY` fragment built from [`QueryParams`].
///
/// The country value is only ever bound as a parameter and the sort column
/// comes from the fixed [`OrderBy`] set, so nothing from the request is
/// spliced into the statement text.
///
/// [`QueryParams`]: crate::QueryParams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterClause<'a> {
    pub where_country: Option<&'a str>,
    pub order_by: Option<OrderBy>,
    pub direction: Option<Order>,
}

impl FilterClause<'_> {
    pub fn is_empty(&self) -> bool {
        self.where_country.is_none() && self.sort().is_none()
    }

    pub fn sort(&self) -> Option<(OrderBy, Order)> {
        self.order_by.zip(self.direction)
    }
}

#[cfg(feature = "pg")]
mod pg {
    use sqlx::{Postgres, QueryBuilder};

    use super::FilterClause;

    impl<'a> FilterClause<'a> {
        /// Appends the clause to a `SELECT ... FROM record` statement.
        pub fn push_to(&self, builder: &mut QueryBuilder<'a, Postgres>) {
            if let Some(country) = self.where_country {
                builder.push(" WHERE LOWER(country) = ");
                builder.push_bind(country.to_lowercase());
            }

            if let Some((order_by, order)) = self.sort() {
                builder.push(format!(" ORDER BY {} {}", order_by.column(), order.keyword()));
            }
        }
    }

}
