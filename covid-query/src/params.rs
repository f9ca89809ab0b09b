use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{error::QueryError, filter::FilterClause};

/// Column a record listing can be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    Date,
    CasesWeekly,
    DeathsWeekly,
    Country,
    Population,
}

impl OrderBy {
    pub const ALL: [OrderBy; 5] = [
        OrderBy::Date,
        OrderBy::CasesWeekly,
        OrderBy::DeathsWeekly,
        OrderBy::Country,
        OrderBy::Population,
    ];

    /// Column name in the `record` table. Never derived from request input.
    pub fn column(&self) -> &'static str {
        match self {
            OrderBy::Date => "date",
            OrderBy::CasesWeekly => "cases_weekly",
            OrderBy::DeathsWeekly => "deaths_weekly",
            OrderBy::Country => "country",
            OrderBy::Population => "population",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for OrderBy {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        OrderBy::ALL
            .into_iter()
            .find(|order_by| order_by.column() == value)
            .ok_or_else(|| QueryError::InvalidOrderBy(value.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn keyword(&self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Asc => f.write_str("asc"),
            Order::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for Order {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(Order::Asc),
            "desc" => Ok(Order::Desc),
            _ => Err(QueryError::InvalidOrder(value.to_owned())),
        }
    }
}

/// Query string of `GET /api/v1/records` exactly as the client sent it.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQueryParams {
    pub country: Option<String>,
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
    pub order: Option<String>,
}

impl RawQueryParams {
    pub fn country(mut self, value: impl Into<String>) -> Self {
        self.country = Some(value.into());
        self
    }

    pub fn order_by(mut self, value: impl Into<String>) -> Self {
        self.order_by = Some(value.into());
        self
    }

    pub fn order(mut self, value: impl Into<String>) -> Self {
        self.order = Some(value.into());
        self
    }

    /// Lowercases every value, treats empty values as absent and checks the
    /// sort pair. Whether `country` exists is left to the caller since it
    /// needs the database.
    pub fn parse(&self) -> Result<QueryParams, QueryError> {
        let country = normalize(self.country.as_deref());
        let order_by = normalize(self.order_by.as_deref());
        let order = normalize(self.order.as_deref());

        let sort = match (order_by, order) {
            (None, None) => None,
            (Some(order_by), Some(order)) => Some((order_by.parse()?, order.parse()?)),
            _ => return Err(QueryError::MismatchedOrder),
        };

        Ok(QueryParams { country, sort })
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

/// Validated filter and sort request.
///
/// `country` is already lowercased; sorting is either fully specified or absent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    country: Option<String>,
    sort: Option<(OrderBy, Order)>,
}

impl QueryParams {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_country(mut self, country: impl AsRef<str>) -> Self {
        self.country = Some(country.as_ref().to_lowercase());
        self
    }

    pub fn sorted(mut self, order_by: OrderBy, order: Order) -> Self {
        self.sort = Some((order_by, order));
        self
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn sort(&self) -> Option<(OrderBy, Order)> {
        self.sort
    }

    pub fn clause(&self) -> FilterClause<'_> {
        FilterClause {
            where_country: self.country(),
            order_by: self.sort.map(|(order_by, _)| order_by),
            direction: self.sort.map(|(_, order)| order),
        }
    }
}
