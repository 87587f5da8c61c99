//! Resource types handled by the sweep and their family grouping.
//!
//! The sweep only recognizes types it is explicitly told about; there is no
//! discovery of unknown resource kinds.

/// Service family a resource type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Compute resources owned by a single tenant.
    ComputeTenant,
    /// Network resources owned by a single tenant.
    NetworkTenant,
    /// Block-storage resources owned by a single tenant.
    VolumeTenant,
    /// Compute/image resources visible across tenants.
    ComputeImageGlobal,
    /// Identity resources visible across tenants.
    IdentityGlobal,
}

/// Concrete resource types the sweep knows how to list and delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    // Compute, tenant-scoped
    Server,
    Keypair,
    ServerGroup,
    ComputeQuota,
    // Network, tenant-scoped
    FloatingIp,
    MeteringLabelRule,
    MeteringLabel,
    Router,
    Port,
    Subnet,
    Network,
    SubnetPool,
    SecurityGroup,
    NetworkQuota,
    // Block storage, tenant-scoped
    VolumeSnapshot,
    Volume,
    VolumeQuota,
    // Global
    Flavor,
    Image,
    User,
    Project,
    Domain,
    Role,
}

impl ResourceType {
    /// Key used for baseline and dry-run report sections.
    pub fn key(self) -> &'static str {
        match self {
            ResourceType::Server => "servers",
            ResourceType::Keypair => "keypairs",
            ResourceType::ServerGroup => "server_groups",
            ResourceType::ComputeQuota => "compute_quota",
            ResourceType::FloatingIp => "floating_ips",
            ResourceType::MeteringLabelRule => "metering_label_rules",
            ResourceType::MeteringLabel => "metering_labels",
            ResourceType::Router => "routers",
            ResourceType::Port => "ports",
            ResourceType::Subnet => "subnets",
            ResourceType::Network => "networks",
            ResourceType::SubnetPool => "subnet_pools",
            ResourceType::SecurityGroup => "security_groups",
            ResourceType::NetworkQuota => "network_quota",
            ResourceType::VolumeSnapshot => "volume_snapshots",
            ResourceType::Volume => "volumes",
            ResourceType::VolumeQuota => "volume_quota",
            ResourceType::Flavor => "flavors",
            ResourceType::Image => "images",
            ResourceType::User => "users",
            ResourceType::Project => "projects",
            ResourceType::Domain => "domains",
            ResourceType::Role => "roles",
        }
    }

    pub fn family(self) -> Family {
        match self {
            ResourceType::Server
            | ResourceType::Keypair
            | ResourceType::ServerGroup
            | ResourceType::ComputeQuota => Family::ComputeTenant,
            ResourceType::FloatingIp
            | ResourceType::MeteringLabelRule
            | ResourceType::MeteringLabel
            | ResourceType::Router
            | ResourceType::Port
            | ResourceType::Subnet
            | ResourceType::Network
            | ResourceType::SubnetPool
            | ResourceType::SecurityGroup
            | ResourceType::NetworkQuota => Family::NetworkTenant,
            ResourceType::VolumeSnapshot | ResourceType::Volume | ResourceType::VolumeQuota => {
                Family::VolumeTenant
            }
            ResourceType::Flavor | ResourceType::Image => Family::ComputeImageGlobal,
            ResourceType::User
            | ResourceType::Project
            | ResourceType::Domain
            | ResourceType::Role => Family::IdentityGlobal,
        }
    }

    /// Global types run once per sweep; everything else runs per tenant.
    pub fn is_global(self) -> bool {
        matches!(
            self.family(),
            Family::ComputeImageGlobal | Family::IdentityGlobal
        )
    }

    /// Quota types have no listable resources; delete() resets to defaults.
    pub fn is_quota(self) -> bool {
        matches!(
            self,
            ResourceType::ComputeQuota | ResourceType::NetworkQuota | ResourceType::VolumeQuota
        )
    }
}
