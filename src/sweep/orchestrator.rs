//! End-to-end cleanup orchestration.
//!
//! Drives the run state machine: resolve the harness admin, then either
//! capture the baseline (init-state) or load it and sweep every tenant,
//! the global types, the dry-run report, and finally the self-granted
//! role revocations.

use super::baseline::BaselineSnapshot;
use super::catalog::{self, Catalog, ServiceFlags};
use super::ledger::AdminPrivilegeLedger;
use super::mode::Mode;
use super::report::DryRunReport;
use super::service::{SweepService, TenantScope};
use super::types::ResourceType;
use crate::cloud::{identity, ApiClient};
use crate::config::Config;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Resolved ids of the account the sweep acts as.
#[derive(Debug, Clone)]
struct AdminIdentity {
    user_id: String,
    project_id: String,
    role_id: String,
}

/// Accumulators shared by every service instance in one run.
#[derive(Default)]
struct SweepState {
    report: DryRunReport,
    snapshot: BaselineSnapshot,
}

/// Drives one cleanup run.
pub struct CleanupOrchestrator {
    config: Config,
    mode: Mode,
    preserve: bool,
    client: ApiClient,
}

impl CleanupOrchestrator {
    pub fn new(config: Config, mode: Mode, preserve: bool) -> Result<Self> {
        let token = config.token()?;
        let client = ApiClient::new(config.endpoints.clone(), token)?;
        Ok(Self {
            config,
            mode,
            preserve,
            client,
        })
    }

    /// Execute the run. Any error returned here is fatal and ends the
    /// process with a non-zero exit.
    pub async fn run(&self) -> Result<()> {
        // The sweep must know who the harness admin is before doing
        // anything destructive.
        let admin = self.resolve_admin().await?;

        match self.mode {
            Mode::InitState => self.capture_baseline().await,
            Mode::DryRun | Mode::Delete => self.sweep(&admin).await,
        }
    }

    async fn resolve_admin(&self) -> Result<AdminIdentity> {
        let auth = &self.config.auth;

        let user = identity::find_user_by_name(&self.client, &auth.admin_username)
            .await
            .context("Failed to look up the admin user")?
            .with_context(|| format!("Admin user {} not found", auth.admin_username))?;
        let project = identity::find_project_by_name(&self.client, &auth.admin_project)
            .await
            .context("Failed to look up the admin project")?
            .with_context(|| format!("Admin project {} not found", auth.admin_project))?;
        let role = identity::find_role_by_name(&self.client, &auth.admin_role)
            .await
            .context("Failed to look up the admin role")?
            .with_context(|| format!("Admin role {} not found", auth.admin_role))?;

        debug!(
            "Resolved harness admin: user={} project={} role={}",
            user.id, project.id, role.id
        );

        Ok(AdminIdentity {
            user_id: user.id,
            project_id: project.id,
            role_id: role.id,
        })
    }

    fn catalog(&self) -> Catalog {
        let toggles = &self.config.services;
        catalog::resolve(ServiceFlags {
            compute: toggles.compute,
            network: toggles.network,
            volume: toggles.volume,
            image: toggles.image,
            metering: toggles.network && self.config.has_network_extension("metering"),
        })
    }

    fn service<'a>(
        &'a self,
        kind: ResourceType,
        client: &'a ApiClient,
        tenant: Option<&'a TenantScope>,
        baseline: &'a BaselineSnapshot,
    ) -> SweepService<'a> {
        SweepService {
            kind,
            client,
            mode: self.mode,
            tenant,
            preserve: self.preserve,
            baseline,
            config: &self.config,
        }
    }

    /// Init-state branch: snapshot every global type and stop. No deletion.
    async fn capture_baseline(&self) -> Result<()> {
        let catalog = self.catalog();
        let empty = BaselineSnapshot::new();
        let mut state = SweepState::default();

        for kind in &catalog.global {
            self.service(*kind, &self.client, None, &empty)
                .run(&mut state.report, &mut state.snapshot)
                .await?;
            info!("Captured baseline for {}", kind.key());
        }

        state.snapshot.save(&self.config.baseline_file)?;
        info!(
            "Baseline snapshot written to {}",
            self.config.baseline_file.display()
        );
        Ok(())
    }

    /// Cleanup branch: load the baseline, sweep tenants then global types,
    /// write the dry-run report if requested, and always attempt to revoke
    /// the grants this run created.
    async fn sweep(&self, admin: &AdminIdentity) -> Result<()> {
        debug!("Acting as user {} from project {}", admin.user_id, admin.project_id);

        let baseline = BaselineSnapshot::load(&self.config.baseline_file)
            .context("Refusing to run without a baseline snapshot (use --capture-baseline first)")?;

        let mut ledger = AdminPrivilegeLedger::new();
        let result = self.clean_all(admin, &baseline, &mut ledger).await;

        // Revocation runs even when the sweep failed midway, so the run
        // never leaves behind a grant it created.
        self.revoke_grants(admin, &mut ledger).await;

        result
    }

    async fn clean_all(
        &self,
        admin: &AdminIdentity,
        baseline: &BaselineSnapshot,
        ledger: &mut AdminPrivilegeLedger,
    ) -> Result<()> {
        let catalog = self.catalog();
        let mut state = SweepState::default();

        let tenants = identity::list_projects(&self.client)
            .await
            .context("Failed to enumerate tenants")?;
        info!(
            "Sweeping {} tenants in {} mode",
            tenants.len(),
            self.mode.as_str()
        );

        for project in &tenants {
            let tenant = TenantScope::from(project);
            self.escalate(admin, &tenant, ledger).await;

            let scoped = self.client.scoped_to(&tenant.id);
            info!("Sweeping tenant {} ({})", tenant.name, tenant.id);
            for kind in &catalog.tenant {
                self.service(*kind, &scoped, Some(&tenant), baseline)
                    .run(&mut state.report, &mut state.snapshot)
                    .await?;
                debug!("Processed {} for tenant {}", kind.key(), tenant.id);
            }
        }

        info!("Sweeping global resources");
        for kind in &catalog.global {
            self.service(*kind, &self.client, None, baseline)
                .run(&mut state.report, &mut state.snapshot)
                .await?;
            debug!("Processed {}", kind.key());
        }

        if self.mode == Mode::DryRun {
            state.report.write(&self.config.report_file)?;
            info!(
                "Dry-run report written to {}",
                self.config.report_file.display()
            );
        }

        info!(
            "Sweep complete: {} tenants, {} global types",
            tenants.len(),
            catalog.global.len()
        );
        Ok(())
    }

    /// Grant the admin role on a tenant unless it is already held.
    /// Failures are logged and the tenant is still swept; only grants this
    /// run created enter the ledger.
    async fn escalate(
        &self,
        admin: &AdminIdentity,
        tenant: &TenantScope,
        ledger: &mut AdminPrivilegeLedger,
    ) {
        let existing = identity::has_role_on_project(
            &self.client,
            &tenant.id,
            &admin.user_id,
            &admin.role_id,
        )
        .await;

        match existing {
            Ok(true) => {
                debug!("Admin role already present on tenant {}", tenant.id);
            }
            Ok(false) => {
                match identity::grant_role_on_project(
                    &self.client,
                    &tenant.id,
                    &admin.user_id,
                    &admin.role_id,
                )
                .await
                {
                    Ok(()) => {
                        debug!("Granted admin role on tenant {}", tenant.id);
                        ledger.record_grant(&tenant.id);
                    }
                    Err(e) => {
                        warn!("Failed to grant admin role on tenant {}: {:#}", tenant.id, e);
                    }
                }
            }
            Err(e) => {
                warn!(
                    "Failed to check role assignment on tenant {}: {:#}",
                    tenant.id, e
                );
            }
        }
    }

    /// Drain the ledger, revoking every grant this run created. A tenant
    /// that disappeared mid-run (global project cleanup) is skipped
    /// silently; revoke failures are logged, never fatal.
    async fn revoke_grants(&self, admin: &AdminIdentity, ledger: &mut AdminPrivilegeLedger) {
        for tenant_id in ledger.drain() {
            match identity::show_project(&self.client, &tenant_id).await {
                Ok(None) => {
                    debug!("Tenant {} no longer exists, skipping revoke", tenant_id);
                }
                Ok(Some(_)) => {
                    match identity::revoke_role_on_project(
                        &self.client,
                        &tenant_id,
                        &admin.user_id,
                        &admin.role_id,
                    )
                    .await
                    {
                        Ok(()) => {
                            info!("Revoked self-granted admin role on tenant {}", tenant_id);
                        }
                        Err(e) => {
                            warn!(
                                "Failed to revoke admin role on tenant {}: {:#}",
                                tenant_id, e
                            );
                        }
                    }
                }
                Err(e) => {
                    warn!("Failed to check tenant {} before revoke: {:#}", tenant_id, e);
                }
            }
        }
    }
}
