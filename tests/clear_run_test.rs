use anyhow::Result;
use icup_maintenance::clear::clear_all;
use icup_maintenance::config::Config;
use icup_maintenance::constants::{PAIRINGS_TABLE, PLAYERS_TABLE, REVEAL_STATE_TABLE};
use icup_maintenance::storage::InMemoryStore;

#[tokio::test]
async fn test_run_totals_across_all_three_tables() -> Result<()> {
    let config = Config::pairing_system();
    let store = InMemoryStore::new(10);
    store.insert_keys(PLAYERS_TABLE, &["p1", "p2", "p3"]);
    store.insert_keys(REVEAL_STATE_TABLE, &["round-1"]);

    let summary = clear_all(&store, &config.tables).await;

    assert_eq!(summary.tables.len(), 3);
    assert_eq!(summary.tables[0].table, PLAYERS_TABLE);
    assert_eq!(summary.tables[0].deleted, 3);
    assert_eq!(summary.tables[1].table, PAIRINGS_TABLE);
    assert_eq!(summary.tables[1].deleted, 0);
    assert_eq!(summary.tables[2].table, REVEAL_STATE_TABLE);
    assert_eq!(summary.tables[2].deleted, 1);
    assert_eq!(summary.total_deleted(), 4);
    assert!(summary.tables.iter().all(|outcome| outcome.error.is_none()));

    Ok(())
}

#[tokio::test]
async fn test_failed_table_contributes_zero_and_run_continues() -> Result<()> {
    let config = Config::pairing_system();
    let store = InMemoryStore::new(10);
    store.insert_keys(PLAYERS_TABLE, &["p1", "p2"]);
    store.insert_keys(PAIRINGS_TABLE, &["m1"]);
    store.insert_keys(REVEAL_STATE_TABLE, &["round-1", "round-2"]);
    store.fail_table(PAIRINGS_TABLE);

    let summary = clear_all(&store, &config.tables).await;

    assert_eq!(summary.tables[0].deleted, 2);
    assert_eq!(summary.tables[1].deleted, 0);
    assert!(summary.tables[1].error.is_some());
    assert_eq!(summary.tables[2].deleted, 2);
    assert_eq!(summary.total_deleted(), 4);

    // The failed table keeps its data; the others are drained
    assert_eq!(store.remaining_keys(PAIRINGS_TABLE), 1);
    assert_eq!(store.remaining_keys(PLAYERS_TABLE), 0);
    assert_eq!(store.remaining_keys(REVEAL_STATE_TABLE), 0);

    Ok(())
}

#[tokio::test]
async fn test_total_equals_sum_of_per_table_counts_across_pages() -> Result<()> {
    let config = Config::pairing_system();
    let store = InMemoryStore::new(2);
    store.insert_keys(PLAYERS_TABLE, &["p1", "p2", "p3", "p4", "p5"]);
    store.insert_keys(PAIRINGS_TABLE, &["m1", "m2", "m3"]);

    let summary = clear_all(&store, &config.tables).await;

    let per_table_sum: u64 = summary.tables.iter().map(|outcome| outcome.deleted).sum();
    assert_eq!(summary.total_deleted(), per_table_sum);
    assert_eq!(summary.total_deleted(), 8);
    for target in &config.tables {
        assert_eq!(store.remaining_keys(&target.name), 0);
    }

    Ok(())
}
