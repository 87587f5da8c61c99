//! The resource service contract.
//!
//! One `SweepService` instance handles one resource type for one scope
//! (a tenant, or admin-wide for global types). The contract is the same for
//! every type: list candidates through the filter chain, then delete,
//! report, or snapshot them depending on the run mode.

use super::baseline::BaselineSnapshot;
use super::mode::Mode;
use super::report::DryRunReport;
use super::types::ResourceType;
use super::{compute, image, network, volume};
use crate::cloud::{identity, ApiClient};
use crate::config::Config;
use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, warn};

/// A single cloud resource as seen by the sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: String,
    pub name: String,
    /// Owning tenant, when the API reports one.
    pub tenant_id: Option<String>,
}

/// Build a `Resource` from a raw API object.
///
/// Ownership fields vary across services; the known spellings are tried in
/// order.
pub(crate) fn resource_from_value(value: &Value, name_field: &str) -> Resource {
    let tenant_id = ["tenant_id", "project_id", "os-vol-tenant-attr:tenant_id"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(|s| s.to_string());

    Resource {
        id: value
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or("-")
            .to_string(),
        name: value
            .get(name_field)
            .and_then(|v| v.as_str())
            .unwrap_or("-")
            .to_string(),
        tenant_id,
    }
}

/// The tenant a service instance acts for.
#[derive(Debug, Clone)]
pub struct TenantScope {
    pub id: String,
    pub name: String,
}

impl From<&identity::Project> for TenantScope {
    fn from(project: &identity::Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
        }
    }
}

/// One resource type bound to one scope and run mode.
pub struct SweepService<'a> {
    pub kind: ResourceType,
    pub client: &'a ApiClient,
    pub mode: Mode,
    pub tenant: Option<&'a TenantScope>,
    /// Protect the harness's own fixtures (config-pinned ids).
    pub preserve: bool,
    pub baseline: &'a BaselineSnapshot,
    pub config: &'a Config,
}

impl SweepService<'_> {
    /// Dispatch on the run mode.
    pub async fn run(
        &self,
        report: &mut DryRunReport,
        snapshot: &mut BaselineSnapshot,
    ) -> Result<()> {
        match self.mode {
            Mode::InitState => self.save_state(snapshot).await,
            Mode::DryRun => self.dry_run(report).await,
            Mode::Delete => self.delete().await,
        }
    }

    /// List delete candidates: one fetch, then the filter chain.
    /// Listing failures propagate to the caller.
    pub async fn list(&self) -> Result<Vec<Resource>> {
        let resources = self.list_raw().await?;
        Ok(self.apply_filters(resources))
    }

    /// Delete every candidate, best-effort per item. A failed delete is
    /// logged and the loop moves on; only the initial listing can fail
    /// the call.
    pub async fn delete(&self) -> Result<()> {
        if self.kind.is_quota() {
            return self.reset_quota().await;
        }

        let resources = self.list().await?;
        for resource in &resources {
            match self.delete_one(resource).await {
                Ok(()) => {
                    info!(
                        "Deleted {} {} ({})",
                        self.kind.key(),
                        resource.id,
                        resource.name
                    );
                }
                Err(e) => {
                    warn!(
                        "Failed to delete {} {} ({}): {:#}",
                        self.kind.key(),
                        resource.id,
                        resource.name,
                        e
                    );
                }
            }
        }
        Ok(())
    }

    /// Record candidates into the shared report. No mutation.
    pub async fn dry_run(&self, report: &mut DryRunReport) -> Result<()> {
        if self.kind.is_quota() {
            let tenant = self.tenant_scope()?;
            let quota = self.show_quota(&tenant.id).await?;
            report.record_tenant_value(&tenant.id, &tenant.name, self.kind.key(), quota);
            return Ok(());
        }

        let resources = self.list().await?;
        if self.kind.is_global() {
            report.record_global(self.kind.key(), &resources);
        } else {
            let tenant = self.tenant_scope()?;
            report.record_tenant(&tenant.id, &tenant.name, self.kind.key(), &resources);
        }
        Ok(())
    }

    /// Record every currently visible resource into the baseline snapshot.
    /// Global types only.
    pub async fn save_state(&self, snapshot: &mut BaselineSnapshot) -> Result<()> {
        let resources = self.list().await?;
        for resource in &resources {
            snapshot.record(self.kind, &resource.id, &resource.name);
        }
        Ok(())
    }

    fn tenant_scope(&self) -> Result<&TenantScope> {
        self.tenant
            .with_context(|| format!("{} requires a tenant scope", self.kind.key()))
    }

    // =========================================================================
    // Filter chain
    // =========================================================================

    /// Apply the fixed filter order: tenant scope, baseline exclusion,
    /// config-pinned preservation, intrinsic built-ins.
    fn apply_filters(&self, mut resources: Vec<Resource>) -> Vec<Resource> {
        if let Some(tenant) = self.tenant {
            resources.retain(|r| r.tenant_id.as_deref().is_none_or(|t| t == tenant.id));
        }

        if self.kind.is_global() && self.mode != Mode::InitState {
            resources.retain(|r| !self.baseline.contains(self.kind, &r.id));
        }

        if self.preserve {
            let pinned = self.pinned_ids();
            resources.retain(|r| !pinned.contains(&r.id));
        }

        resources.retain(|r| !self.is_intrinsic(r));
        resources
    }

    /// Ids pinned by the harness config for this type.
    fn pinned_ids(&self) -> &[String] {
        let preserved = &self.config.preserved;
        match self.kind {
            ResourceType::Image => &preserved.images,
            ResourceType::Flavor => &preserved.flavors,
            ResourceType::Network => &preserved.networks,
            ResourceType::Project => &preserved.projects,
            ResourceType::User => &preserved.users,
            _ => &[],
        }
    }

    /// Built-ins that are never deletable, regardless of flags.
    fn is_intrinsic(&self, resource: &Resource) -> bool {
        match self.kind {
            // Every tenant carries an implicit default security group
            ResourceType::SecurityGroup => resource.name == "default",
            ResourceType::User => resource.name == self.config.auth.admin_username,
            ResourceType::Role => resource.name == self.config.auth.admin_role,
            ResourceType::Project => resource.name == self.config.auth.admin_project,
            // The default identity domain rejects deletion
            ResourceType::Domain => resource.id == "default",
            _ => false,
        }
    }

    // =========================================================================
    // Per-type dispatch
    // =========================================================================

    async fn list_raw(&self) -> Result<Vec<Resource>> {
        let client = self.client;
        match self.kind {
            ResourceType::Server => compute::list_servers(client).await,
            ResourceType::Keypair => compute::list_keypairs(client).await,
            ResourceType::ServerGroup => compute::list_server_groups(client).await,
            ResourceType::FloatingIp => network::list_floating_ips(client).await,
            ResourceType::MeteringLabelRule => network::list_metering_label_rules(client).await,
            ResourceType::MeteringLabel => network::list_metering_labels(client).await,
            ResourceType::Router => network::list_routers(client).await,
            ResourceType::Port => network::list_ports(client).await,
            ResourceType::Subnet => network::list_subnets(client).await,
            ResourceType::Network => network::list_networks(client).await,
            ResourceType::SubnetPool => network::list_subnet_pools(client).await,
            ResourceType::SecurityGroup => network::list_security_groups(client).await,
            ResourceType::VolumeSnapshot => {
                volume::list_snapshots(client, &self.tenant_scope()?.id).await
            }
            ResourceType::Volume => volume::list_volumes(client, &self.tenant_scope()?.id).await,
            ResourceType::Flavor => compute::list_flavors(client).await,
            ResourceType::Image => image::list_images(client).await,
            ResourceType::User => Ok(identity::list_users(client)
                .await?
                .into_iter()
                .map(|u| Resource {
                    id: u.id,
                    name: u.name,
                    tenant_id: None,
                })
                .collect()),
            ResourceType::Project => Ok(identity::list_projects(client)
                .await?
                .into_iter()
                .map(|p| Resource {
                    id: p.id,
                    name: p.name,
                    tenant_id: None,
                })
                .collect()),
            ResourceType::Domain => Ok(identity::list_domains(client)
                .await?
                .into_iter()
                .map(|d| Resource {
                    id: d.id,
                    name: d.name,
                    tenant_id: None,
                })
                .collect()),
            ResourceType::Role => Ok(identity::list_roles(client)
                .await?
                .into_iter()
                .map(|r| Resource {
                    id: r.id,
                    name: r.name,
                    tenant_id: None,
                })
                .collect()),
            ResourceType::ComputeQuota | ResourceType::NetworkQuota | ResourceType::VolumeQuota => {
                Ok(Vec::new())
            }
        }
    }

    async fn delete_one(&self, resource: &Resource) -> Result<()> {
        let client = self.client;
        let id = resource.id.as_str();
        match self.kind {
            ResourceType::Server => compute::delete_server(client, id).await,
            ResourceType::Keypair => compute::delete_keypair(client, id).await,
            ResourceType::ServerGroup => compute::delete_server_group(client, id).await,
            ResourceType::FloatingIp => network::delete_floating_ip(client, id).await,
            ResourceType::MeteringLabelRule => {
                network::delete_metering_label_rule(client, id).await
            }
            ResourceType::MeteringLabel => network::delete_metering_label(client, id).await,
            ResourceType::Router => self.delete_router_cascade(id).await,
            ResourceType::Port => network::delete_port(client, id).await,
            ResourceType::Subnet => network::delete_subnet(client, id).await,
            ResourceType::Network => network::delete_network(client, id).await,
            ResourceType::SubnetPool => network::delete_subnet_pool(client, id).await,
            ResourceType::SecurityGroup => network::delete_security_group(client, id).await,
            ResourceType::VolumeSnapshot => {
                volume::delete_snapshot(client, &self.tenant_scope()?.id, id).await
            }
            ResourceType::Volume => volume::delete_volume(client, &self.tenant_scope()?.id, id).await,
            ResourceType::Flavor => compute::delete_flavor(client, id).await,
            ResourceType::Image => image::delete_image(client, id).await,
            ResourceType::User => identity::delete_user(client, id).await,
            ResourceType::Project => identity::delete_project(client, id).await,
            ResourceType::Domain => {
                // Enabled domains cannot be deleted directly
                identity::disable_domain(client, id).await?;
                identity::delete_domain(client, id).await
            }
            ResourceType::Role => identity::delete_role(client, id).await,
            ResourceType::ComputeQuota | ResourceType::NetworkQuota | ResourceType::VolumeQuota => {
                Err(anyhow::anyhow!("quota types have no per-resource delete"))
            }
        }
    }

    /// Router deletion: detach every attached interface port first.
    async fn delete_router_cascade(&self, router_id: &str) -> Result<()> {
        let ports = network::list_router_interface_ports(self.client, router_id).await?;
        for port in &ports {
            network::remove_router_interface(self.client, router_id, &port.id).await?;
        }
        network::delete_router(self.client, router_id).await
    }

    /// Quota "deletion" resets the tenant's quota to the defaults. The call
    /// is idempotent; a failure is logged and never fatal.
    async fn reset_quota(&self) -> Result<()> {
        let tenant = self.tenant_scope()?;
        let result = match self.kind {
            ResourceType::ComputeQuota => compute::reset_quota(self.client, &tenant.id).await,
            ResourceType::NetworkQuota => network::reset_quota(self.client, &tenant.id).await,
            ResourceType::VolumeQuota => volume::reset_quota(self.client, &tenant.id).await,
            _ => return Ok(()),
        };
        match result {
            Ok(()) => info!("Reset {} for tenant {}", self.kind.key(), tenant.id),
            Err(e) => warn!(
                "Failed to reset {} for tenant {}: {:#}",
                self.kind.key(),
                tenant.id,
                e
            ),
        }
        Ok(())
    }

    async fn show_quota(&self, tenant_id: &str) -> Result<Value> {
        match self.kind {
            ResourceType::ComputeQuota => compute::show_quota(self.client, tenant_id).await,
            ResourceType::NetworkQuota => network::show_quota(self.client, tenant_id).await,
            ResourceType::VolumeQuota => volume::show_quota(self.client, tenant_id).await,
            _ => Ok(Value::Null),
        }
    }
}
