//! Per-tier device catalog, price table and layout policy.
//!
//! Every tier-dependent constant the pipeline needs lives in a `TierPolicy`
//! so the allocator, topology builder, config synthesizer and cost estimator
//! share one parameterised code path.

use crate::models::{node_id, DeviceCatalog, DeviceModel, MediaType, NodeKind, Tier};

/// Hardware price table
pub mod models {
    use crate::models::DeviceModel;

    pub const ISR_1941: DeviceModel = DeviceModel { name: "1941 ISR", price: 25_000.0 };
    pub const CATALYST_2960: DeviceModel = DeviceModel { name: "2960-24TT", price: 6_000.0 };
    pub const ISR_4321: DeviceModel = DeviceModel { name: "4321 ISR", price: 38_000.0 };
    pub const CATALYST_3650: DeviceModel = DeviceModel { name: "3650-24PS", price: 35_000.0 };
    pub const ASA_5506: DeviceModel = DeviceModel { name: "ASA 5506-X", price: 30_000.0 };
    pub const ISR_2911: DeviceModel = DeviceModel { name: "2911 Router", price: 25_000.0 };
}

/// A fixed backbone device placed at a tier-specific coordinate
#[derive(Debug, Clone, Copy)]
pub struct BackboneNode {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct BackboneLink {
    pub source: &'static str,
    pub target: &'static str,
    pub media: MediaType,
}

/// Which VLANs the address plan contains
#[derive(Debug, Clone, Copy)]
pub struct VlanPolicy {
    /// One flat LAN instead of per-department segmentation
    pub flat_lan: bool,
    pub management: bool,
    pub voice: bool,
    pub servers: bool,
    pub dmz: bool,
}

/// Which server records the tier provisions
#[derive(Debug, Clone, Copy)]
pub struct ServerPolicy {
    /// DHCP/DNS servers on the SERVERS VLAN when their flags are set
    pub internal: bool,
    /// AAA/RADIUS server, provisioned regardless of flags
    pub aaa: bool,
    /// Web server in the DMZ when the web flag is set
    pub dmz_web: bool,
}

/// Diagram layout constants
#[derive(Debug, Clone, Copy)]
pub struct LayoutPolicy {
    pub access_row_y: f64,
    pub access_start_x: f64,
    pub switch_pitch: f64,
    pub end_device_dy: f64,
    pub end_device_dx: [f64; 4],
    pub server_row_y: f64,
    pub server_start_x: f64,
    pub server_pitch: f64,
    pub dmz_server: (f64, f64),
    pub voice_gateway: (f64, f64),
    pub min_width: f64,
    pub width_margin: f64,
    pub height: f64,
}

const DEFAULT_LAYOUT: LayoutPolicy = LayoutPolicy {
    access_row_y: 600.0,
    access_start_x: 100.0,
    switch_pitch: 250.0,
    end_device_dy: 100.0,
    end_device_dx: [-75.0, -25.0, 25.0, 75.0],
    server_row_y: 450.0,
    server_start_x: 150.0,
    server_pitch: 120.0,
    dmz_server: (600.0, 250.0),
    voice_gateway: (150.0, 320.0),
    min_width: 1200.0,
    width_margin: 100.0,
    height: 800.0,
};

/// TierPolicy bundles everything that differs between tiers
#[derive(Debug, Clone)]
pub struct TierPolicy {
    pub tier: Tier,
    pub catalog: DeviceCatalog,
    pub install_rate: f64,
    pub vlans: VlanPolicy,
    pub servers: ServerPolicy,
    pub backbone: &'static [BackboneNode],
    pub backbone_links: &'static [BackboneLink],
    /// Nodes access switches uplink to, alternated round-robin
    pub uplinks: &'static [&'static str],
    /// Node the internal servers attach to
    pub server_uplink: &'static str,
    /// Whether each department gets its own access switches; when false all
    /// end devices share the single LAN switch
    pub per_department_switches: bool,
    pub voice_gateway_enabled: bool,
    pub layout: LayoutPolicy,
}

const ENTERPRISE_BACKBONE: &[BackboneNode] = &[
    BackboneNode { id: node_id::INTERNET, label: "Internet", kind: NodeKind::Cloud, x: 600.0, y: 80.0 },
    BackboneNode { id: node_id::FIREWALL, label: "ASA-FW", kind: NodeKind::Firewall, x: 600.0, y: 180.0 },
    BackboneNode { id: node_id::CORE1, label: "Core-SW1", kind: NodeKind::Mlswitch, x: 400.0, y: 320.0 },
    BackboneNode { id: node_id::CORE2, label: "Core-SW2", kind: NodeKind::Mlswitch, x: 800.0, y: 320.0 },
];

const ENTERPRISE_LINKS: &[BackboneLink] = &[
    BackboneLink { source: node_id::INTERNET, target: node_id::FIREWALL, media: MediaType::Copper },
    BackboneLink { source: node_id::FIREWALL, target: node_id::CORE1, media: MediaType::Fiber },
    BackboneLink { source: node_id::FIREWALL, target: node_id::CORE2, media: MediaType::Fiber },
    BackboneLink { source: node_id::CORE1, target: node_id::CORE2, media: MediaType::Fiber },
];

const STANDARD_BACKBONE: &[BackboneNode] = &[
    BackboneNode { id: node_id::INTERNET, label: "Internet", kind: NodeKind::Cloud, x: 450.0, y: 80.0 },
    BackboneNode { id: node_id::ROUTER, label: "Edge-RTR", kind: NodeKind::Router, x: 450.0, y: 180.0 },
    BackboneNode { id: node_id::CORE1, label: "Core-L3-SW", kind: NodeKind::Mlswitch, x: 450.0, y: 320.0 },
];

const STANDARD_LINKS: &[BackboneLink] = &[
    BackboneLink { source: node_id::INTERNET, target: node_id::ROUTER, media: MediaType::Copper },
    BackboneLink { source: node_id::ROUTER, target: node_id::CORE1, media: MediaType::Copper },
];

const SOHO_BACKBONE: &[BackboneNode] = &[
    BackboneNode { id: node_id::INTERNET, label: "Internet", kind: NodeKind::Cloud, x: 300.0, y: 80.0 },
    BackboneNode { id: node_id::ROUTER, label: "SOHO-RTR", kind: NodeKind::Router, x: 300.0, y: 180.0 },
    BackboneNode { id: node_id::LAN_SWITCH, label: "LAN-SW", kind: NodeKind::Switch, x: 300.0, y: 280.0 },
];

const SOHO_LINKS: &[BackboneLink] = &[
    BackboneLink { source: node_id::INTERNET, target: node_id::ROUTER, media: MediaType::Copper },
    BackboneLink { source: node_id::ROUTER, target: node_id::LAN_SWITCH, media: MediaType::Copper },
];

impl TierPolicy {
    pub fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::Enterprise => Self {
                tier,
                catalog: DeviceCatalog {
                    firewall: Some(models::ASA_5506),
                    router: None,
                    core_switch: Some(models::CATALYST_3650),
                    core_switch_count: 2,
                    access_switch: models::CATALYST_2960,
                    voice_gateway: Some(models::ISR_2911),
                },
                install_rate: 0.30,
                vlans: VlanPolicy {
                    flat_lan: false,
                    management: true,
                    voice: true,
                    servers: true,
                    dmz: true,
                },
                servers: ServerPolicy { internal: true, aaa: true, dmz_web: true },
                backbone: ENTERPRISE_BACKBONE,
                backbone_links: ENTERPRISE_LINKS,
                uplinks: &[node_id::CORE1, node_id::CORE2],
                server_uplink: node_id::CORE1,
                per_department_switches: true,
                voice_gateway_enabled: true,
                layout: DEFAULT_LAYOUT,
            },
            Tier::Standard => Self {
                tier,
                catalog: DeviceCatalog {
                    firewall: None,
                    router: Some(models::ISR_4321),
                    core_switch: Some(models::CATALYST_3650),
                    core_switch_count: 1,
                    access_switch: models::CATALYST_2960,
                    voice_gateway: None,
                },
                install_rate: 0.25,
                vlans: VlanPolicy {
                    flat_lan: false,
                    management: false,
                    voice: false,
                    servers: true,
                    dmz: false,
                },
                servers: ServerPolicy { internal: true, aaa: false, dmz_web: false },
                backbone: STANDARD_BACKBONE,
                backbone_links: STANDARD_LINKS,
                uplinks: &[node_id::CORE1],
                server_uplink: node_id::CORE1,
                per_department_switches: true,
                voice_gateway_enabled: false,
                layout: DEFAULT_LAYOUT,
            },
            Tier::Soho => Self {
                tier,
                catalog: DeviceCatalog {
                    firewall: None,
                    router: Some(models::ISR_1941),
                    core_switch: None,
                    core_switch_count: 0,
                    access_switch: models::CATALYST_2960,
                    voice_gateway: None,
                },
                install_rate: 0.20,
                vlans: VlanPolicy {
                    flat_lan: true,
                    management: false,
                    voice: false,
                    servers: false,
                    dmz: false,
                },
                servers: ServerPolicy { internal: false, aaa: false, dmz_web: false },
                backbone: SOHO_BACKBONE,
                backbone_links: SOHO_LINKS,
                uplinks: &[node_id::LAN_SWITCH],
                server_uplink: node_id::LAN_SWITCH,
                per_department_switches: false,
                voice_gateway_enabled: false,
                layout: LayoutPolicy {
                    access_row_y: 400.0,
                    ..DEFAULT_LAYOUT
                },
            },
        }
    }

    /// Pick the uplink for the n-th access switch of the design
    pub fn uplink_for(&self, switch_index: usize) -> &'static str {
        self.uplinks[switch_index % self.uplinks.len()]
    }

    /// Label of the backbone node with the given id
    pub fn backbone_label(&self, id: &str) -> Option<&'static str> {
        self.backbone.iter().find(|n| n.id == id).map(|n| n.label)
    }

    /// Voice is carried on access ports only where a voice VLAN exists
    pub fn carries_voice(&self, voip: bool) -> bool {
        voip && self.vlans.voice
    }
}

/// Look up the hardware model for a role in the catalog
pub fn require_model(model: Option<DeviceModel>, role: &str, tier: Tier) -> anyhow::Result<DeviceModel> {
    model.ok_or_else(|| {
        anyhow::Error::new(crate::design::InvariantViolation::new(format!(
            "{} tier has no {} in its device catalog",
            tier, role
        )))
    })
}
