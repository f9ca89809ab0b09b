use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// One weekly observation for a country, named after the ECDC open-data export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "pg", derive(sqlx::FromRow))]
pub struct Record {
    #[serde(rename = "dateRep", with = "date_rep")]
    pub date: NaiveDate,

    #[validate(length(min = 1, max = 8))]
    pub year_week: String,

    /// Negative values are corrections and are kept as sent.
    #[validate(required)]
    pub cases_weekly: Option<i32>,

    #[validate(required)]
    pub deaths_weekly: Option<i32>,

    #[serde(rename = "countriesAndTerritories")]
    #[validate(length(min = 1, max = 256))]
    pub country: String,

    #[serde(rename = "geoId")]
    #[validate(length(min = 1, max = 16))]
    pub geo_id: String,

    #[serde(
        rename = "countryterritoryCode",
        default,
        deserialize_with = "null_as_default"
    )]
    #[validate(length(max = 16))]
    pub country_code: String,

    #[serde(rename = "popData2019", default, deserialize_with = "null_as_default")]
    pub population: i64,

    #[serde(rename = "continentExp")]
    #[validate(length(min = 1, max = 64))]
    pub continent: String,

    #[serde(
        rename = "notification_rate_per_100000_population_14-days",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(max = 64))]
    pub notification_rate: Option<String>,
}

/// Body of `POST /api/v1/records`. A missing `records` key is an empty batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordBatch {
    #[serde(default)]
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub record_amount: usize,
}

/// Result of a record listing: the rows plus how many there are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPage {
    pub records: Vec<Record>,
    pub metadata: Metadata,
}

impl From<Vec<Record>> for RecordPage {
    fn from(records: Vec<Record>) -> Self {
        Self {
            metadata: Metadata {
                record_amount: records.len(),
            },
            records,
        }
    }
}

/// Exports carry `null` for unknown codes and populations.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `dateRep` travels as `dd/mm/yyyy`.
mod date_rep {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%d/%m/%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let value = String::deserialize(deserializer)?;

        NaiveDate::parse_from_str(&value, FORMAT).map_err(D::Error::custom)
    }
}
