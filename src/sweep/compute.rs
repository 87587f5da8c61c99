//! Compute service calls: servers, keypairs, server groups, flavors, quota.

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

/// List servers; admin-wide with an ownership filter when scoped
pub async fn list_servers(client: &ApiClient) -> Result<Vec<Resource>> {
    let url = client.with_tenant_filter(&client.compute_url("servers/detail?all_tenants=1"));
    let response = client.get(&url).await?;
    Ok(items(&response, "servers")
        .into_iter()
        .map(|v| resource_from_value(v, "name"))
        .collect())
}

pub async fn delete_server(client: &ApiClient, id: &str) -> Result<()> {
    client
        .delete(&client.compute_url(&format!("servers/{}", id)))
        .await?;
    Ok(())
}

/// List keypairs. Keypair identity is the name, not a uuid.
pub async fn list_keypairs(client: &ApiClient) -> Result<Vec<Resource>> {
    let response = client.get(&client.compute_url("os-keypairs")).await?;
    Ok(items(&response, "keypairs")
        .into_iter()
        .filter_map(|entry| entry.get("keypair"))
        .map(|kp| {
            let name = kp
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("-")
                .to_string();
            Resource {
                id: name.clone(),
                name,
                tenant_id: None,
            }
        })
        .collect())
}

pub async fn delete_keypair(client: &ApiClient, name: &str) -> Result<()> {
    client
        .delete(&client.compute_url(&format!("os-keypairs/{}", urlencoding::encode(name))))
        .await?;
    Ok(())
}

pub async fn list_server_groups(client: &ApiClient) -> Result<Vec<Resource>> {
    let url = client.with_tenant_filter(&client.compute_url("os-server-groups?all_projects=1"));
    let response = client.get(&url).await?;
    Ok(items(&response, "server_groups")
        .into_iter()
        .map(|v| resource_from_value(v, "name"))
        .collect())
}

pub async fn delete_server_group(client: &ApiClient, id: &str) -> Result<()> {
    client
        .delete(&client.compute_url(&format!("os-server-groups/{}", id)))
        .await?;
    Ok(())
}

pub async fn list_flavors(client: &ApiClient) -> Result<Vec<Resource>> {
    let response = client
        .get(&client.compute_url("flavors/detail?is_public=None"))
        .await?;
    Ok(items(&response, "flavors")
        .into_iter()
        .map(|v| resource_from_value(v, "name"))
        .collect())
}

pub async fn delete_flavor(client: &ApiClient, id: &str) -> Result<()> {
    client
        .delete(&client.compute_url(&format!("flavors/{}", id)))
        .await?;
    Ok(())
}

/// Reset a tenant's compute quota to the defaults. Idempotent.
pub async fn reset_quota(client: &ApiClient, tenant_id: &str) -> Result<()> {
    client
        .delete(&client.compute_url(&format!("os-quota-sets/{}", tenant_id)))
        .await?;
    Ok(())
}

/// Fetch a tenant's current compute quota and usage
pub async fn show_quota(client: &ApiClient, tenant_id: &str) -> Result<Value> {
    let response = client
        .get(&client.compute_url(&format!("os-quota-sets/{}/detail", tenant_id)))
        .await?;
    Ok(response.get("quota_set").cloned().unwrap_or(Value::Null))
}
