use async_trait::async_trait;
use covid_query::QueryParams;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    engine::Engine,
    error::Result,
    record::Record,
    store::Store,
};

const RECORD_COLUMNS: &str = "date, year_week, cases_weekly, deaths_weekly, country, geo_id, country_code, population, continent, notification_rate";

// Ten binds per row and postgres accepts at most 65535 binds per statement.
const INSERT_CHUNK_SIZE: usize = 1000;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(pool: &PgPool) -> Store {
        Store::new(Self { pool: pool.clone() })
    }
}

#[async_trait]
impl Engine for PgStore {
    async fn countries(&self) -> Result<Vec<String>> {
        let countries =
            sqlx::query_scalar::<_, String>("SELECT DISTINCT LOWER(country) FROM record")
                .fetch_all(&self.pool)
                .await?;

        Ok(countries)
    }

    async fn read(&self, params: &QueryParams) -> Result<Vec<Record>> {
        let mut query_builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {RECORD_COLUMNS} FROM record"));

        params.clause().push_to(&mut query_builder);

        let records = query_builder
            .build_query_as::<Record>()
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn insert(&self, records: &[Record]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for records in records.chunks(INSERT_CHUNK_SIZE) {
            let mut query_builder: QueryBuilder<Postgres> =
                QueryBuilder::new(format!("INSERT INTO record ({RECORD_COLUMNS}) "));

            query_builder.push_values(records, |mut b, record| {
                b.push_bind(record.date)
                    .push_bind(record.year_week.to_owned())
                    .push_bind(record.cases_weekly)
                    .push_bind(record.deaths_weekly)
                    .push_bind(record.country.to_owned())
                    .push_bind(record.geo_id.to_owned())
                    .push_bind(record.country_code.to_owned())
                    .push_bind(record.population)
                    .push_bind(record.continent.to_owned())
                    .push_bind(record.notification_rate.clone());
            });

            inserted += query_builder
                .build()
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        tx.commit().await?;

        Ok(inserted)
    }
}
