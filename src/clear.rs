use crate::config::TableTarget;
use crate::error::Result;
use crate::storage::TableStore;
use tracing::{debug, error, info};

/// Outcome of clearing a single table.
#[derive(Debug, Clone)]
pub struct TableOutcome {
    pub table: String,
    pub deleted: u64,
    pub error: Option<String>,
}

/// Per-table outcomes for one run, in clearing order.
#[derive(Debug, Clone)]
pub struct ClearRunSummary {
    pub tables: Vec<TableOutcome>,
}

impl ClearRunSummary {
    /// Total items deleted across all tables; failed tables contribute zero.
    pub fn total_deleted(&self) -> u64 {
        self.tables.iter().map(|outcome| outcome.deleted).sum()
    }
}

/// Remove every item from `table`, returning how many were deleted.
///
/// Scans a page of keys, deletes them in a batched request, and follows the
/// continuation token until the service reports no further pages. A page
/// with zero keys ends the loop without a delete call.
pub async fn clear_table(store: &dyn TableStore, table: &str) -> Result<u64> {
    let mut deleted: u64 = 0;
    let mut start_after: Option<String> = None;

    loop {
        let page = store.scan_page(table, start_after.as_deref()).await?;
        if page.keys.is_empty() {
            break;
        }

        store.delete_keys(table, &page.keys).await?;
        deleted += page.keys.len() as u64;
        debug!("Deleted {} items from {} so far", deleted, table);

        match page.next_token {
            Some(token) => start_after = Some(token),
            None => break,
        }
    }

    Ok(deleted)
}

/// Clear each target in order, reporting progress and collecting outcomes.
///
/// A failure is local to its table: it is reported with the service's own
/// message and recorded as zero deleted, and the remaining tables are still
/// cleared.
pub async fn clear_all(store: &dyn TableStore, targets: &[TableTarget]) -> ClearRunSummary {
    let mut outcomes = Vec::with_capacity(targets.len());

    for target in targets {
        println!("\n{}...", target.label);
        println!("Clearing table: {}", target.name);

        match clear_table(store, &target.name).await {
            Ok(deleted) => {
                if deleted > 0 {
                    println!("  ✓ Deleted {} items", deleted);
                } else {
                    println!("  ✓ Table is already empty");
                }
                info!("Cleared table {} ({} items)", target.name, deleted);
                outcomes.push(TableOutcome {
                    table: target.name.clone(),
                    deleted,
                    error: None,
                });
            }
            Err(e) => {
                println!("  ✗ Error: {}", e);
                error!("Failed to clear table {}: {}", target.name, e);
                outcomes.push(TableOutcome {
                    table: target.name.clone(),
                    deleted: 0,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    ClearRunSummary { tables: outcomes }
}
