use chrono::NaiveDate;
use covid::{ErrorKind, RawQueryParams, Record, RecordService};

pub fn record(country: &str, day: u32, cases: i32) -> Record {
    Record {
        date: NaiveDate::from_ymd_opt(2020, 11, day).unwrap(),
        year_week: "2020-47".to_owned(),
        cases_weekly: Some(cases),
        deaths_weekly: Some(0),
        country: country.to_owned(),
        geo_id: country.chars().take(2).collect::<String>().to_uppercase(),
        country_code: String::new(),
        population: 1_000,
        continent: "Europe".to_owned(),
        notification_rate: None,
    }
}

pub async fn test_atomic_batch(service: &RecordService, country: &str) -> anyhow::Result<()> {
    let mut invalid = record(country, 23, 4);
    invalid.cases_weekly = None;

    let err = service
        .save_records(vec![
            record(country, 2, 1),
            record(country, 9, 2),
            record(country, 16, 3),
            invalid,
        ])
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.status_code(), 400);
    assert!(err.message.starts_with("Record #3"), "{}", err.message);
    assert!(!service.store().has_country(country).await?);

    let saved = service
        .save_records(vec![
            record(country, 2, 1),
            record(country, 9, 2),
            record(country, 16, 3),
            record(country, 23, 4),
        ])
        .await?;

    assert_eq!(saved, 4);

    let page = service
        .get_records(&RawQueryParams::default().country(country))
        .await?;

    assert_eq!(page.metadata.record_amount, 4);

    Ok(())
}

pub async fn test_country_filter_ignores_case(
    service: &RecordService,
    country: &str,
    other: &str,
) -> anyhow::Result<()> {
    service
        .save_records(vec![record(country, 2, 1), record(other, 2, 1)])
        .await?;

    for value in [
        country.to_lowercase(),
        country.to_uppercase(),
        country.to_owned(),
    ] {
        let page = service
            .get_records(&RawQueryParams::default().country(value))
            .await?;

        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].country, country);
    }

    Ok(())
}

pub async fn test_sorted_ascending(service: &RecordService, country: &str) -> anyhow::Result<()> {
    service
        .save_records(vec![
            record(country, 2, 30),
            record(country, 9, 10),
            record(country, 16, 20),
        ])
        .await?;

    let page = service
        .get_records(
            &RawQueryParams::default()
                .country(country)
                .order_by("cases_weekly")
                .order("asc"),
        )
        .await?;

    let cases = page
        .records
        .iter()
        .filter_map(|r| r.cases_weekly)
        .collect::<Vec<_>>();

    assert_eq!(cases, vec![10, 20, 30]);

    Ok(())
}

pub async fn test_unknown_country(service: &RecordService) -> anyhow::Result<()> {
    let err = service
        .get_records(&RawQueryParams::default().country("Atlantis"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, "Query parameter country value \"atlantis\" not found");

    Ok(())
}

pub async fn test_invalid_params(service: &RecordService) -> anyhow::Result<()> {
    let bogus = service
        .get_records(&RawQueryParams::default().order_by("bogus").order("asc"))
        .await
        .unwrap_err();

    assert_eq!(bogus.status_code(), 400);
    assert_eq!(bogus.message, "Invalid query parameter orderBy value \"bogus\"");

    let missing = service
        .get_records(&RawQueryParams::default().order_by("date"))
        .await
        .unwrap_err();

    assert_eq!(missing.status_code(), 400);

    Ok(())
}
