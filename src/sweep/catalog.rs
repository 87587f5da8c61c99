//! Service catalog resolution.
//!
//! Maps the "which services are enabled" flags onto the two ordered lists of
//! resource types a run processes: tenant-scoped types (run once per tenant)
//! and global types (run once per sweep). Ordering only affects report key
//! order; the router interface detach is the single intra-type dependency
//! and lives inside the router service itself.

use super::types::ResourceType;

/// Capability flags describing the target cloud.
#[derive(Debug, Clone, Copy)]
pub struct ServiceFlags {
    pub compute: bool,
    pub network: bool,
    pub volume: bool,
    pub image: bool,
    /// The network metering extension is optional on most deployments.
    pub metering: bool,
}

impl Default for ServiceFlags {
    fn default() -> Self {
        Self {
            compute: true,
            network: true,
            volume: true,
            image: true,
            metering: false,
        }
    }
}

/// The resolved set of active services for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub tenant: Vec<ResourceType>,
    pub global: Vec<ResourceType>,
}

/// Resolve the active service catalog from capability flags.
pub fn resolve(flags: ServiceFlags) -> Catalog {
    let mut tenant = Vec::new();
    let mut global = Vec::new();

    if flags.compute {
        tenant.extend([
            ResourceType::Server,
            ResourceType::Keypair,
            ResourceType::ServerGroup,
            ResourceType::ComputeQuota,
        ]);
    }
    if flags.network {
        tenant.push(ResourceType::FloatingIp);
        if flags.metering {
            tenant.extend([ResourceType::MeteringLabelRule, ResourceType::MeteringLabel]);
        }
        tenant.extend([
            ResourceType::Router,
            ResourceType::Port,
            ResourceType::Subnet,
            ResourceType::Network,
            ResourceType::SubnetPool,
            ResourceType::SecurityGroup,
            ResourceType::NetworkQuota,
        ]);
    }
    if flags.volume {
        tenant.extend([
            ResourceType::VolumeSnapshot,
            ResourceType::Volume,
            ResourceType::VolumeQuota,
        ]);
    }

    if flags.compute {
        global.push(ResourceType::Flavor);
    }
    if flags.image {
        global.push(ResourceType::Image);
    }
    global.extend([
        ResourceType::User,
        ResourceType::Project,
        ResourceType::Domain,
        ResourceType::Role,
    ]);

    Catalog { tenant, global }
}
