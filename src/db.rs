use crate::config::Config;
use crate::constants::PRIMARY_KEY;
use crate::error::{MaintenanceError, Result};
use crate::storage::{ScanPage, TableStore};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::types::{AttributeValue, DeleteRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

// BatchWriteItem accepts at most 25 operations per request
const BATCH_WRITE_MAX_ITEMS: usize = 25;

// Pause before resubmitting keys the service returned as unprocessed
const UNPROCESSED_RETRY_DELAY: Duration = Duration::from_millis(100);

/// DynamoDB-backed table store for the pairing system deployment.
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    /// Build a client for the deployment's named profile and region.
    pub async fn connect(config: &Config) -> Self {
        info!(
            "Connecting to DynamoDB in {} using profile {}",
            config.region, config.profile
        );

        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(&config.profile)
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        Self {
            client: Client::new(&aws_config),
        }
    }
}

#[async_trait]
impl TableStore for DynamoDbStore {
    async fn scan_page(&self, table: &str, start_after: Option<&str>) -> Result<ScanPage> {
        let mut request = self
            .client
            .scan()
            .table_name(table)
            .projection_expression(PRIMARY_KEY);

        if let Some(token) = start_after {
            request =
                request.exclusive_start_key(PRIMARY_KEY, AttributeValue::S(token.to_string()));
        }

        let output = request.send().await.map_err(|e| MaintenanceError::Storage {
            message: e.into_service_error().to_string(),
        })?;

        let keys: Vec<String> = output
            .items()
            .iter()
            .filter_map(|item| item.get(PRIMARY_KEY).and_then(|v| v.as_s().ok()).cloned())
            .collect();

        // The key schema is exactly `id`, so the last evaluated key reduces
        // to that one attribute
        let next_token = output
            .last_evaluated_key()
            .and_then(|key| key.get(PRIMARY_KEY))
            .and_then(|v| v.as_s().ok())
            .cloned();

        debug!("Scanned {} keys from {}", keys.len(), table);
        Ok(ScanPage { keys, next_token })
    }

    async fn delete_keys(&self, table: &str, keys: &[String]) -> Result<()> {
        for chunk in keys.chunks(BATCH_WRITE_MAX_ITEMS) {
            let mut requests = Vec::with_capacity(chunk.len());
            for key in chunk {
                let delete = DeleteRequest::builder()
                    .key(PRIMARY_KEY, AttributeValue::S(key.clone()))
                    .build()
                    .map_err(|e| MaintenanceError::Storage {
                        message: format!("Failed to build delete request for {key}: {e}"),
                    })?;
                requests.push(WriteRequest::builder().delete_request(delete).build());
            }

            let mut pending: HashMap<String, Vec<WriteRequest>> =
                HashMap::from([(table.to_string(), requests)]);

            // The service may hand a subset back as unprocessed; resubmit
            // until the batch is drained
            while !pending.is_empty() {
                let output = self
                    .client
                    .batch_write_item()
                    .set_request_items(Some(pending))
                    .send()
                    .await
                    .map_err(|e| MaintenanceError::Storage {
                        message: e.into_service_error().to_string(),
                    })?;

                pending = output.unprocessed_items().cloned().unwrap_or_default();
                pending.retain(|_, unprocessed| !unprocessed.is_empty());

                if !pending.is_empty() {
                    debug!("Resubmitting unprocessed deletes for {}", table);
                    tokio::time::sleep(UNPROCESSED_RETRY_DELAY).await;
                }
            }
        }

        debug!("Deleted {} keys from {}", keys.len(), table);
        Ok(())
    }
}
