//! Block-storage service calls: volumes, snapshots, quota.
//!
//! Block-storage paths are project-prefixed, so every call here takes the
//! tenant explicitly.

use super::service::{resource_from_value, Resource};
use crate::cloud::ApiClient;
use anyhow::Result;
use serde_json::Value;

fn items<'a>(response: &'a Value, key: &str) -> Vec<&'a Value> {
    response
        .get(key)
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().collect())
        .unwrap_or_default()
}

pub async fn list_volumes(client: &ApiClient, tenant_id: &str) -> Result<Vec<Resource>> {
    let response = client
        .get(&client.volume_url(tenant_id, "volumes/detail"))
        .await?;
    Ok(items(&response, "volumes")
        .into_iter()
        .map(|v| resource_from_value(v, "name"))
        .collect())
}

pub async fn delete_volume(client: &ApiClient, tenant_id: &str, id: &str) -> Result<()> {
    client
        .delete(&client.volume_url(tenant_id, &format!("volumes/{}", id)))
        .await?;
    Ok(())
}

pub async fn list_snapshots(client: &ApiClient, tenant_id: &str) -> Result<Vec<Resource>> {
    let response = client
        .get(&client.volume_url(tenant_id, "snapshots/detail"))
        .await?;
    Ok(items(&response, "snapshots")
        .into_iter()
        .map(|v| resource_from_value(v, "name"))
        .collect())
}

pub async fn delete_snapshot(client: &ApiClient, tenant_id: &str, id: &str) -> Result<()> {
    client
        .delete(&client.volume_url(tenant_id, &format!("snapshots/{}", id)))
        .await?;
    Ok(())
}

/// Reset a tenant's block-storage quota to the defaults. Idempotent.
pub async fn reset_quota(client: &ApiClient, tenant_id: &str) -> Result<()> {
    client
        .delete(&client.volume_url(tenant_id, &format!("os-quota-sets/{}", tenant_id)))
        .await?;
    Ok(())
}

/// Fetch a tenant's current block-storage quota and usage
pub async fn show_quota(client: &ApiClient, tenant_id: &str) -> Result<Value> {
    let response = client
        .get(&client.volume_url(tenant_id, &format!("os-quota-sets/{}?usage=true", tenant_id)))
        .await?;
    Ok(response.get("quota_set").cloned().unwrap_or(Value::Null))
}
