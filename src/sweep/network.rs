//! Network service calls: networks, subnets, routers, ports, floating IPs,
//! security groups, metering labels, subnet pools, quota.
//!
//! Router deletion is the one place with intra-type ordering: attached
//! interface ports are detached before the router itself is removed.

use super::service::{resource_from_value, Resource};
use crate::cloud::ApiClient;
use anyhow::Result;
use serde_json::{json, Value};
use tracing::debug;

/// Device-owner prefix marking ports attached as router interfaces.
/// A string-prefix convention shared by the supported network backends;
/// do not generalize without confirming a target backend matches it.
pub const ROUTER_INTERFACE_OWNER_PREFIX: &str = "network:router_interface";

fn items<'a>(response: &'a Value, key: &str) -> Vec<&'a Value> {
    response
        .get(key)
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().collect())
        .unwrap_or_default()
}

async fn list_collection(
    client: &ApiClient,
    path: &str,
    key: &str,
    name_field: &str,
) -> Result<Vec<Resource>> {
    let url = client.with_tenant_filter(&client.network_url(path));
    let response = client.get(&url).await?;
    Ok(items(&response, key)
        .into_iter()
        .map(|v| resource_from_value(v, name_field))
        .collect())
}

pub async fn list_networks(client: &ApiClient) -> Result<Vec<Resource>> {
    list_collection(client, "networks", "networks", "name").await
}

pub async fn delete_network(client: &ApiClient, id: &str) -> Result<()> {
    client
        .delete(&client.network_url(&format!("networks/{}", id)))
        .await?;
    Ok(())
}

pub async fn list_subnets(client: &ApiClient) -> Result<Vec<Resource>> {
    list_collection(client, "subnets", "subnets", "name").await
}

pub async fn delete_subnet(client: &ApiClient, id: &str) -> Result<()> {
    client
        .delete(&client.network_url(&format!("subnets/{}", id)))
        .await?;
    Ok(())
}

pub async fn list_subnet_pools(client: &ApiClient) -> Result<Vec<Resource>> {
    list_collection(client, "subnetpools", "subnetpools", "name").await
}

pub async fn delete_subnet_pool(client: &ApiClient, id: &str) -> Result<()> {
    client
        .delete(&client.network_url(&format!("subnetpools/{}", id)))
        .await?;
    Ok(())
}

pub async fn list_ports(client: &ApiClient) -> Result<Vec<Resource>> {
    list_collection(client, "ports", "ports", "name").await
}

pub async fn delete_port(client: &ApiClient, id: &str) -> Result<()> {
    client
        .delete(&client.network_url(&format!("ports/{}", id)))
        .await?;
    Ok(())
}

/// Floating IPs have no display name; the address stands in for one.
pub async fn list_floating_ips(client: &ApiClient) -> Result<Vec<Resource>> {
    list_collection(client, "floatingips", "floatingips", "floating_ip_address").await
}

pub async fn delete_floating_ip(client: &ApiClient, id: &str) -> Result<()> {
    client
        .delete(&client.network_url(&format!("floatingips/{}", id)))
        .await?;
    Ok(())
}

pub async fn list_security_groups(client: &ApiClient) -> Result<Vec<Resource>> {
    list_collection(client, "security-groups", "security_groups", "name").await
}

pub async fn delete_security_group(client: &ApiClient, id: &str) -> Result<()> {
    client
        .delete(&client.network_url(&format!("security-groups/{}", id)))
        .await?;
    Ok(())
}

pub async fn list_metering_labels(client: &ApiClient) -> Result<Vec<Resource>> {
    list_collection(client, "metering/metering-labels", "metering_labels", "name").await
}

pub async fn delete_metering_label(client: &ApiClient, id: &str) -> Result<()> {
    client
        .delete(&client.network_url(&format!("metering/metering-labels/{}", id)))
        .await?;
    Ok(())
}

pub async fn list_metering_label_rules(client: &ApiClient) -> Result<Vec<Resource>> {
    list_collection(
        client,
        "metering/metering-label-rules",
        "metering_label_rules",
        "remote_ip_prefix",
    )
    .await
}

pub async fn delete_metering_label_rule(client: &ApiClient, id: &str) -> Result<()> {
    client
        .delete(&client.network_url(&format!("metering/metering-label-rules/{}", id)))
        .await?;
    Ok(())
}

pub async fn list_routers(client: &ApiClient) -> Result<Vec<Resource>> {
    list_collection(client, "routers", "routers", "name").await
}

/// Ports attached to a router as interfaces, by the device-owner convention.
pub async fn list_router_interface_ports(
    client: &ApiClient,
    router_id: &str,
) -> Result<Vec<Resource>> {
    let url = client.network_url(&format!(
        "ports?device_id={}",
        urlencoding::encode(router_id)
    ));
    let response = client.get(&url).await?;
    Ok(items(&response, "ports")
        .into_iter()
        .filter(|port| {
            port.get("device_owner")
                .and_then(|v| v.as_str())
                .is_some_and(|owner| owner.starts_with(ROUTER_INTERFACE_OWNER_PREFIX))
        })
        .map(|v| resource_from_value(v, "name"))
        .collect())
}

/// Detach one interface port from a router
pub async fn remove_router_interface(
    client: &ApiClient,
    router_id: &str,
    port_id: &str,
) -> Result<()> {
    debug!("Detaching port {} from router {}", port_id, router_id);
    let url = client.network_url(&format!("routers/{}/remove_router_interface", router_id));
    client.put(&url, Some(&json!({ "port_id": port_id }))).await?;
    Ok(())
}

pub async fn delete_router(client: &ApiClient, id: &str) -> Result<()> {
    client
        .delete(&client.network_url(&format!("routers/{}", id)))
        .await?;
    Ok(())
}

/// Reset a tenant's network quota to the defaults. Idempotent.
pub async fn reset_quota(client: &ApiClient, tenant_id: &str) -> Result<()> {
    client
        .delete(&client.network_url(&format!("quotas/{}", tenant_id)))
        .await?;
    Ok(())
}

/// Fetch a tenant's current network quota
pub async fn show_quota(client: &ApiClient, tenant_id: &str) -> Result<Value> {
    let response = client
        .get(&client.network_url(&format!("quotas/{}", tenant_id)))
        .await?;
    Ok(response.get("quota").cloned().unwrap_or(Value::Null))
}
