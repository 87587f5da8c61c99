//! Cleanup/reaper subsystem.
//!
//! Reclaims every resource a test run left behind across the tenants of a
//! multi-tenant cloud, guarded by the baseline snapshot (pre-existing global
//! resources) and the preserve list (the harness's own fixtures).

pub mod baseline;
pub mod catalog;
pub mod compute;
pub mod image;
pub mod ledger;
pub mod mode;
pub mod network;
pub mod orchestrator;
pub mod report;
pub mod service;
pub mod types;
pub mod volume;

pub use baseline::BaselineSnapshot;
pub use catalog::{Catalog, ServiceFlags};
pub use ledger::AdminPrivilegeLedger;
pub use mode::Mode;
pub use orchestrator::CleanupOrchestrator;
pub use report::DryRunReport;
pub use service::{Resource, SweepService, TenantScope};
pub use types::ResourceType;
