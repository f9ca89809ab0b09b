use chrono::NaiveDate;
use covid_store::{Order, OrderBy, QueryParams, Record, Store};

pub fn record(country: &str, day: u32, cases: i32, deaths: i32, population: i64) -> Record {
    Record {
        date: NaiveDate::from_ymd_opt(2020, 11, day).unwrap(),
        year_week: format!("2020-{}", 44 + day / 7),
        cases_weekly: Some(cases),
        deaths_weekly: Some(deaths),
        country: country.to_owned(),
        geo_id: country.chars().take(2).collect::<String>().to_uppercase(),
        country_code: String::new(),
        population,
        continent: "Europe".to_owned(),
        notification_rate: Some("12.5".to_owned()),
    }
}

pub async fn test_insert(store: &Store, country: &str) -> anyhow::Result<()> {
    let inserted = store
        .insert(&[
            record(country, 2, 10, 1, 1000),
            record(country, 9, 20, 2, 1000),
            record(country, 16, 30, 3, 1000),
            record(country, 23, 40, 4, 1000),
        ])
        .await?;

    assert_eq!(inserted, 4);

    let page = store
        .read(&QueryParams::all().with_country(country))
        .await?;

    assert_eq!(page.records.len(), 4);
    assert_eq!(page.metadata.record_amount, 4);

    Ok(())
}

pub async fn test_insert_empty(store: &Store) -> anyhow::Result<()> {
    assert_eq!(store.insert(&[]).await?, 0);

    Ok(())
}

pub async fn test_filter_country(store: &Store, country: &str, other: &str) -> anyhow::Result<()> {
    store
        .insert(&[
            record(country, 2, 5, 0, 500),
            record(other, 2, 7, 1, 700),
            record(country, 9, 6, 0, 500),
        ])
        .await?;

    let page = store
        .read(&QueryParams::all().with_country(country.to_uppercase()))
        .await?;

    assert_eq!(page.records.len(), 2);
    assert!(page.records.iter().all(|r| r.country == country));

    let page = store
        .read(&QueryParams::all().with_country(other.to_lowercase()))
        .await?;

    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0].country, other);

    Ok(())
}

pub async fn test_sort(store: &Store, country: &str) -> anyhow::Result<()> {
    store
        .insert(&[
            record(country, 2, 30, 3, 100),
            record(country, 9, 10, 9, 100),
            record(country, 16, 20, 1, 100),
        ])
        .await?;

    let page = store
        .read(
            &QueryParams::all()
                .with_country(country)
                .sorted(OrderBy::CasesWeekly, Order::Asc),
        )
        .await?;

    let cases = page
        .records
        .iter()
        .map(|r| r.cases_weekly.unwrap())
        .collect::<Vec<_>>();
    assert_eq!(cases, vec![10, 20, 30]);

    let page = store
        .read(
            &QueryParams::all()
                .with_country(country)
                .sorted(OrderBy::DeathsWeekly, Order::Desc),
        )
        .await?;

    let deaths = page
        .records
        .iter()
        .map(|r| r.deaths_weekly.unwrap())
        .collect::<Vec<_>>();
    assert_eq!(deaths, vec![9, 3, 1]);

    let page = store
        .read(
            &QueryParams::all()
                .with_country(country)
                .sorted(OrderBy::Date, Order::Desc),
        )
        .await?;

    assert!(page.records.windows(2).all(|w| w[0].date >= w[1].date));

    Ok(())
}

pub async fn test_countries(store: &Store, country: &str) -> anyhow::Result<()> {
    assert!(!store.has_country(country).await?);

    store.insert(&[record(country, 2, 1, 0, 10)]).await?;

    assert!(store.has_country(country).await?);
    assert!(store.has_country(&country.to_uppercase()).await?);
    assert!(store
        .countries()
        .await?
        .contains(&country.to_lowercase()));

    Ok(())
}

pub async fn test_unknown_country_reads_empty(store: &Store) -> anyhow::Result<()> {
    let page = store
        .read(&QueryParams::all().with_country("atlantis"))
        .await?;

    assert!(page.records.is_empty());
    assert_eq!(page.metadata.record_amount, 0);

    Ok(())
}
