use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::catalog::TierPolicy;
use crate::models::{
    vlan_id, vlan_name, Department, DhcpRange, OnPremServices, ServerRecord, Tier, VlanRecord,
};
use crate::utils::strip_non_alphanumeric;

const MANAGEMENT_PREFIX: &str = "192.168.10";
const DMZ_SUPERNET: &str = "172.16";
const SOHO_SUPERNET: &str = "192.168";
const POOL_FIRST_HOST: u8 = 10;
const POOL_LAST_HOST: u8 = 254;
const ROUTED_MAX_OCTET: u8 = 250;
const SOHO_MAX_OCTET: u8 = 254;

/// BaseNetwork holds the octets that vary between generation passes:
/// `octet` is R in `10.R.x.0/24` (or `192.168.R.0/24` for SOHO) and
/// `dmz_octet` is D in the DMZ's `172.16.D.0/24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseNetwork {
    pub octet: u8,
    pub dmz_octet: u8,
}

impl Default for BaseNetwork {
    fn default() -> Self {
        Self { octet: 1, dmz_octet: 0 }
    }
}

impl BaseNetwork {
    pub fn new(octet: u8, dmz_octet: u8) -> Self {
        Self { octet, dmz_octet }
    }

    /// Reproducible draw for a given seed
    pub fn from_seed(seed: u64, tier: Tier) -> Self {
        Self::from_rng(&mut StdRng::seed_from_u64(seed), tier)
    }

    /// Fresh draw from the thread RNG
    pub fn random(tier: Tier) -> Self {
        Self::from_rng(&mut rand::thread_rng(), tier)
    }

    /// SOHO draws its third octet from 1..=254; the routed tiers keep
    /// the second octet within 1..=250.
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R, tier: Tier) -> Self {
        let max_octet = match tier {
            Tier::Soho => SOHO_MAX_OCTET,
            Tier::Standard | Tier::Enterprise => ROUTED_MAX_OCTET,
        };
        Self {
            octet: rng.gen_range(1..=max_octet),
            dmz_octet: rng.gen_range(0..10),
        }
    }

    /// Two- or three-octet prefix that every internal subnet extends
    pub fn prefix(&self, tier: Tier) -> String {
        match tier {
            Tier::Soho => format!("{}.{}", SOHO_SUPERNET, self.octet),
            Tier::Standard | Tier::Enterprise => format!("10.{}", self.octet),
        }
    }

    pub fn dmz_prefix(&self) -> String {
        format!("{}.{}", DMZ_SUPERNET, self.dmz_octet)
    }
}

/// Build a /24 VLAN record from its three-octet network prefix
fn vlan(id: u16, name: &str, net: &str, dhcp: Dhcp) -> VlanRecord {
    let dhcp_range = match dhcp {
        Dhcp::Pool => DhcpRange::Pool {
            first: format!("{}.{}", net, POOL_FIRST_HOST),
            last_octet: POOL_LAST_HOST,
        },
        Dhcp::Static => DhcpRange::Static,
        Dhcp::None => DhcpRange::NotApplicable,
    };
    VlanRecord {
        vlan_id: id,
        name: name.to_string(),
        subnet: format!("{}.0/24", net),
        gateway: format!("{}.1", net),
        dhcp_range,
    }
}

enum Dhcp {
    Pool,
    Static,
    None,
}

/// VLAN name for a department: "Data_" plus the upper-cased alphanumerics
pub fn department_vlan_name(department: &str) -> String {
    format!("Data_{}", strip_non_alphanumeric(department).to_uppercase())
}

/// Allocate the ordered VLAN table for a design.
///
/// Department subnets take their third octet straight from the department's
/// VLAN id under the shared base prefix, so distinct VLAN ids can never
/// produce overlapping subnets.
pub fn allocate_vlans(policy: &TierPolicy, departments: &[Department], base: &BaseNetwork) -> Vec<VlanRecord> {
    let prefix = base.prefix(policy.tier);

    if policy.vlans.flat_lan {
        // Same .10 - .254 pool as every other dynamic VLAN
        return vec![vlan(vlan_id::LAN, vlan_name::LAN, &prefix, Dhcp::Pool)];
    }

    let mut vlans = Vec::with_capacity(departments.len() + 4);

    if policy.vlans.management {
        vlans.push(vlan(vlan_id::MANAGEMENT, vlan_name::MANAGEMENT, MANAGEMENT_PREFIX, Dhcp::None));
    }

    for dept in departments {
        let net = format!("{}.{}", prefix, dept.vlan_id);
        vlans.push(vlan(dept.vlan_id, &department_vlan_name(&dept.name), &net, Dhcp::Pool));
    }

    if policy.vlans.voice {
        let net = format!("{}.{}", prefix, vlan_id::VOICE);
        vlans.push(vlan(vlan_id::VOICE, vlan_name::VOICE, &net, Dhcp::Pool));
    }
    if policy.vlans.servers {
        let net = format!("{}.{}", prefix, vlan_id::SERVERS);
        vlans.push(vlan(vlan_id::SERVERS, vlan_name::SERVERS, &net, Dhcp::Static));
    }
    if policy.vlans.dmz {
        vlans.push(vlan(vlan_id::DMZ, vlan_name::DMZ, &base.dmz_prefix(), Dhcp::Static));
    }

    tracing::debug!("Allocated {} VLANs under {}", vlans.len(), prefix);
    vlans
}

/// Provision server records for the enabled services.
/// Internal servers get fixed host addresses on the SERVERS VLAN; the web
/// server lives in the DMZ.
pub fn allocate_servers(policy: &TierPolicy, services: &OnPremServices, base: &BaseNetwork) -> Vec<ServerRecord> {
    let servers_net = format!("{}.{}", base.prefix(policy.tier), vlan_id::SERVERS);
    let mut servers = Vec::new();

    let internal = |name: &str, host: u8| ServerRecord {
        name: name.to_string(),
        ip: format!("{}.{}", servers_net, host),
        vlan_name: vlan_name::SERVERS.to_string(),
    };

    if policy.servers.internal && services.dhcp {
        servers.push(internal("DHCP_Server", 10));
    }
    if policy.servers.internal && services.dns {
        servers.push(internal("DNS_Server", 11));
    }
    if policy.servers.aaa {
        servers.push(internal("AAA_RADIUS", 12));
    }
    if policy.servers.dmz_web && services.web {
        servers.push(ServerRecord {
            name: "Web_Server".to_string(),
            ip: format!("{}.10", base.dmz_prefix()),
            vlan_name: vlan_name::DMZ.to_string(),
        });
    }

    servers
}
