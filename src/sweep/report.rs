//! Dry-run report accumulator.
//!
//! Built fresh on every dry-run invocation, written once at the end, never
//! read back programmatically. The file carries no timestamps and orders all
//! keys deterministically, so two passes over unchanged cloud state produce
//! byte-identical reports.

use super::service::Resource;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Candidates recorded for one tenant.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TenantSection {
    pub name: String,
    pub resources: BTreeMap<String, Value>,
}

/// Full dry-run report: per-tenant sections plus global candidate lists.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DryRunReport {
    pub tenants: BTreeMap<String, TenantSection>,
    pub global: BTreeMap<String, Value>,
}

fn candidates_json(resources: &[Resource]) -> Value {
    Value::Array(
        resources
            .iter()
            .map(|r| serde_json::json!({ "id": r.id, "name": r.name }))
            .collect(),
    )
}

impl DryRunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record delete candidates for a tenant-scoped type.
    pub fn record_tenant(
        &mut self,
        tenant_id: &str,
        tenant_name: &str,
        type_key: &str,
        resources: &[Resource],
    ) {
        let section = self
            .tenants
            .entry(tenant_id.to_string())
            .or_insert_with(|| TenantSection {
                name: tenant_name.to_string(),
                resources: BTreeMap::new(),
            });
        section
            .resources
            .insert(type_key.to_string(), candidates_json(resources));
    }

    /// Record a raw per-tenant value (quota/usage snapshots).
    pub fn record_tenant_value(
        &mut self,
        tenant_id: &str,
        tenant_name: &str,
        type_key: &str,
        value: Value,
    ) {
        let section = self
            .tenants
            .entry(tenant_id.to_string())
            .or_insert_with(|| TenantSection {
                name: tenant_name.to_string(),
                resources: BTreeMap::new(),
            });
        section.resources.insert(type_key.to_string(), value);
    }

    /// Record delete candidates for a global type.
    pub fn record_global(&mut self, type_key: &str, resources: &[Resource]) {
        self.global
            .insert(type_key.to_string(), candidates_json(resources));
    }

    /// Serialize the report to disk.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write dry-run report {}", path.display()))?;
        Ok(())
    }
}
