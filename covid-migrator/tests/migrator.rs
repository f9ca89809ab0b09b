#![cfg(feature = "memory")]

use covid_migrator::{
    DirectorySource, MemoryMetadataStore, MetadataStore, MigrateError, MigrationScript,
    MigrationSource, Migrator,
};
use tracing_test::traced_test;

fn scripts() -> Vec<MigrationScript> {
    vec![
        MigrationScript::new("003", "third", "SELECT 3"),
        MigrationScript::new("001", "first", "SELECT 1"),
        MigrationScript::new("002", "second", "SELECT 2"),
    ]
}

#[tokio::test]
#[traced_test]
async fn applies_in_version_order() {
    let store = MemoryMetadataStore::new();
    let report = Migrator::new(scripts()).run(&store).await.unwrap();

    let versions = report
        .applied
        .iter()
        .map(|r| r.version.as_str())
        .collect::<Vec<_>>();

    assert_eq!(versions, vec!["001", "002", "003"]);
    assert_eq!(store.executed(), vec!["SELECT 1", "SELECT 2", "SELECT 3"]);
    assert!(logs_contain("Running migration 001_first.sql"));
    assert!(logs_contain("Completed migration 003_third.sql"));
    assert!(logs_contain("3 migration(s) completed"));
}

#[tokio::test]
#[traced_test]
async fn second_run_is_a_noop() {
    let store = MemoryMetadataStore::new();
    let migrator = Migrator::new(scripts());

    migrator.run(&store).await.unwrap();
    let report = migrator.run(&store).await.unwrap();

    assert!(report.is_empty());
    assert_eq!(store.executed().len(), 3);
    assert_eq!(store.records().await.unwrap().len(), 3);
    assert!(logs_contain("No migrations to run"));
}

#[tokio::test]
async fn only_pending_versions_run() {
    let store = MemoryMetadataStore::new();
    store.seed(&MigrationScript::new("001", "first", "SELECT 1"));

    let migrator = Migrator::new(scripts());
    let pending = migrator
        .pending(&store)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.version)
        .collect::<Vec<_>>();

    assert_eq!(pending, vec!["002", "003"]);

    migrator.run(&store).await.unwrap();

    assert_eq!(store.executed(), vec!["SELECT 2", "SELECT 3"]);
}

#[tokio::test]
async fn edited_script_with_recorded_version_is_skipped() {
    let store = MemoryMetadataStore::new();
    Migrator::new(scripts()).run(&store).await.unwrap();

    let edited = vec![MigrationScript::new("002", "second", "DROP TABLE record")];
    let report = Migrator::new(edited).run(&store).await.unwrap();

    assert!(report.is_empty());
    assert!(!store.executed().contains(&"DROP TABLE record".to_owned()));
}

#[tokio::test]
#[traced_test]
async fn failure_stops_the_run() {
    let store = MemoryMetadataStore::new().fail_on("002");
    let result = Migrator::new(scripts()).run(&store).await;

    assert!(matches!(
        result,
        Err(MigrateError::Execute { ref version, .. }) if version == "002"
    ));

    let versions = store
        .records()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.version)
        .collect::<Vec<_>>();

    assert_eq!(versions, vec!["001"]);
    assert_eq!(store.executed(), vec!["SELECT 1"]);
    assert!(logs_contain("needs manual attention"));
}

#[tokio::test]
async fn empty_source_reports_nothing() {
    let store = MemoryMetadataStore::new();
    let report = Migrator::new(Vec::<MigrationScript>::new())
        .run(&store)
        .await
        .unwrap();

    assert!(report.is_empty());
}

#[tokio::test]
async fn duplicate_versions_are_rejected() {
    let store = MemoryMetadataStore::new();
    let source = vec![
        MigrationScript::new("001", "first", "SELECT 1"),
        MigrationScript::new("001", "again", "SELECT 1"),
    ];

    let result = Migrator::new(source).run(&store).await;

    assert!(matches!(result, Err(MigrateError::DuplicateVersion(v)) if v == "001"));
    assert!(store.executed().is_empty());
}

#[tokio::test]
async fn directory_source_reads_sql_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("002_add_index.sql"), "SELECT 2").unwrap();
    std::fs::write(dir.path().join("001_create.sql"), "SELECT 1").unwrap();
    std::fs::write(dir.path().join("README.md"), "not a migration").unwrap();

    let source = DirectorySource::new(dir.path());
    assert_eq!(source.scripts().unwrap().len(), 2);

    let store = MemoryMetadataStore::new();
    Migrator::new(source).run(&store).await.unwrap();

    assert_eq!(store.executed(), vec!["SELECT 1", "SELECT 2"]);
}

#[tokio::test]
async fn directory_source_rejects_bad_names() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("create.sql"), "SELECT 1").unwrap();

    let result = DirectorySource::new(dir.path()).scripts();

    assert!(matches!(result, Err(MigrateError::InvalidScriptName(name)) if name == "create.sql"));
}

#[tokio::test]
async fn missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = DirectorySource::new(dir.path().join("missing")).scripts();

    assert!(matches!(result, Err(MigrateError::Io { .. })));
}

#[tokio::test]
async fn embedded_migrations_apply_cleanly() {
    let store = MemoryMetadataStore::new();
    let report = covid_migrator::new().run(&store).await.unwrap();

    assert_eq!(report.applied.len(), 4);
    assert_eq!(report.applied[0].summary, "create_record_table");
}
