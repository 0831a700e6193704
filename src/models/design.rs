use serde::{Serialize, Serializer};

use super::{CloudServices, NodeKind, Tier, Topology, TopologyNode};

/// Hardware model with its list price
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeviceModel {
    pub name: &'static str,
    pub price: f64,
}

/// Hardware roles selected for a tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceCatalog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall: Option<DeviceModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub router: Option<DeviceModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_switch: Option<DeviceModel>,
    pub core_switch_count: usize,
    pub access_switch: DeviceModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_gateway: Option<DeviceModel>,
}

/// How hosts on a VLAN get their addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DhcpRange {
    /// Dynamic pool, rendered as "a.b.c.first - .last"
    Pool { first: String, last_octet: u8 },
    Static,
    NotApplicable,
}

impl std::fmt::Display for DhcpRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DhcpRange::Pool { first, last_octet } => write!(f, "{} - .{}", first, last_octet),
            DhcpRange::Static => f.write_str("Static"),
            DhcpRange::NotApplicable => f.write_str("N/A"),
        }
    }
}

impl Serialize for DhcpRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VlanRecord {
    pub vlan_id: u16,
    pub name: String,
    pub subnet: String,
    pub gateway: String,
    pub dhcp_range: DhcpRange,
}

/// Well-known VLAN names
pub mod vlan_name {
    pub const MANAGEMENT: &str = "Management";
    pub const VOICE: &str = "VoIP";
    pub const SERVERS: &str = "SERVERS";
    pub const DMZ: &str = "DMZ";
    pub const LAN: &str = "LAN";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpSchema {
    pub vlans: Vec<VlanRecord>,
}

impl IpSchema {
    pub fn by_id(&self, vlan_id: u16) -> Option<&VlanRecord> {
        self.vlans.iter().find(|v| v.vlan_id == vlan_id)
    }

    pub fn by_name(&self, name: &str) -> Option<&VlanRecord> {
        self.vlans.iter().find(|v| v.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerRecord {
    pub name: String,
    pub ip: String,
    pub vlan_name: String,
}

impl ServerRecord {
    pub fn is_dmz(&self) -> bool {
        self.vlan_name == vlan_name::DMZ
    }
}

/// Configuration script for one infrastructure device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceConfig {
    pub device_name: String,
    pub script: String,
}

/// Device configs in generation order, looked up by device name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DeviceConfigs(Vec<DeviceConfig>);

impl DeviceConfigs {
    pub fn insert(&mut self, device_name: &str, script: String) {
        self.0.push(DeviceConfig {
            device_name: device_name.to_string(),
            script,
        });
    }

    pub fn get(&self, device_name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|c| c.device_name == device_name)
            .map(|c| c.script.as_str())
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|c| c.device_name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceConfig> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CableType {
    #[serde(rename = "Fiber Optic")]
    FiberOptic,
    #[serde(rename = "Copper Straight-Through")]
    CopperStraightThrough,
}

impl CableType {
    pub fn as_str(self) -> &'static str {
        match self {
            CableType::FiberOptic => "Fiber Optic",
            CableType::CopperStraightThrough => "Copper Straight-Through",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CablingEntry {
    pub from: String,
    pub to: String,
    pub cable_type: CableType,
}

/// One bill-of-materials line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostLine {
    pub model: &'static str,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEstimate {
    pub hardware_cost: f64,
    pub install_rate: f64,
    pub installation_cost: f64,
    pub total: f64,
    pub items: Vec<CostLine>,
}

/// Design is the complete output of one generation pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Design {
    pub tier: Tier,
    pub base_prefix: String,
    pub devices: DeviceCatalog,
    pub ip_schema: IpSchema,
    pub servers: Vec<ServerRecord>,
    pub topology: Topology,
    pub configs: DeviceConfigs,
    pub cabling_guide: Vec<CablingEntry>,
    pub cost: CostEstimate,
    pub cloud: CloudServices,
    pub voip: bool,
}

impl Design {
    /// Hardware model shown for a node, e.g. on hover
    pub fn device_model(&self, node: &TopologyNode) -> &'static str {
        match node.kind {
            NodeKind::Firewall => self.devices.firewall.map_or("Firewall", |m| m.name),
            NodeKind::Mlswitch => self.devices.core_switch.map_or("Multilayer Switch", |m| m.name),
            NodeKind::Switch => self.devices.access_switch.name,
            NodeKind::Router => {
                let model = if self.tier == Tier::Enterprise {
                    self.devices.voice_gateway
                } else {
                    self.devices.router
                };
                model.map_or("Router", |m| m.name)
            }
            NodeKind::Server => "Generic Server",
            NodeKind::Pc => "PC-PT",
            NodeKind::Laptop => "Laptop-PT",
            NodeKind::Ipphone => "7960 IP Phone",
            NodeKind::Printer => "Printer-PT",
            NodeKind::Cloud => "Internet",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dhcp_range_rendering() {
        let pool = DhcpRange::Pool {
            first: "10.4.20.10".to_string(),
            last_octet: 254,
        };
        assert_eq!(pool.to_string(), "10.4.20.10 - .254");
        assert_eq!(DhcpRange::Static.to_string(), "Static");
        assert_eq!(serde_json::to_string(&DhcpRange::NotApplicable).unwrap(), "\"N/A\"");
    }

    #[test]
    fn test_device_configs_keep_insertion_order() {
        let mut configs = DeviceConfigs::default();
        configs.insert("Core-SW1", "a".to_string());
        configs.insert("ASA-FW", "b".to_string());
        assert_eq!(configs.names(), vec!["Core-SW1", "ASA-FW"]);
        assert_eq!(configs.get("ASA-FW"), Some("b"));
        assert_eq!(configs.get("missing"), None);
    }

    #[test]
    fn test_cable_type_serialization() {
        assert_eq!(
            serde_json::to_string(&CableType::FiberOptic).unwrap(),
            "\"Fiber Optic\""
        );
        assert_eq!(CableType::CopperStraightThrough.as_str(), "Copper Straight-Through");
    }
}
