use async_trait::async_trait;
use covid_query::{Order, OrderBy, QueryParams};
use parking_lot::RwLock;
use std::{cmp::Ordering, collections::BTreeSet, sync::Arc};

use crate::{
    engine::Engine,
    error::Result,
    record::Record,
    store::Store,
};

/// Keeps records in insertion order behind a lock, for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(Arc<RwLock<Vec<Record>>>);

impl MemoryStore {
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> Store {
        Store::new(Self::default())
    }
}

#[async_trait]
impl Engine for MemoryStore {
    async fn countries(&self) -> Result<Vec<String>> {
        let countries = self
            .0
            .read()
            .iter()
            .map(|record| record.country.to_lowercase())
            .collect::<BTreeSet<_>>();

        Ok(countries.into_iter().collect())
    }

    async fn read(&self, params: &QueryParams) -> Result<Vec<Record>> {
        let clause = params.clause();

        let mut records = self
            .0
            .read()
            .iter()
            .filter(|record| match clause.where_country {
                Some(country) => record.country.to_lowercase() == country,
                None => true,
            })
            .cloned()
            .collect::<Vec<_>>();

        // Stable sort so ties keep insertion order.
        if let Some((order_by, order)) = clause.sort() {
            records.sort_by(|a, b| {
                let cmp = compare(a, b, order_by);

                match order {
                    Order::Asc => cmp,
                    Order::Desc => cmp.reverse(),
                }
            });
        }

        Ok(records)
    }

    async fn insert(&self, records: &[Record]) -> Result<u64> {
        let mut data = self.0.write();
        data.extend_from_slice(records);

        Ok(records.len() as u64)
    }
}

fn compare(a: &Record, b: &Record, order_by: OrderBy) -> Ordering {
    match order_by {
        OrderBy::Date => a.date.cmp(&b.date),
        OrderBy::CasesWeekly => a.cases_weekly.cmp(&b.cases_weekly),
        OrderBy::DeathsWeekly => a.deaths_weekly.cmp(&b.deaths_weekly),
        OrderBy::Country => a.country.cmp(&b.country),
        OrderBy::Population => a.population.cmp(&b.population),
    }
}
