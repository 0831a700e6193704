use serde::{Deserialize, Serialize};

/// Canonical node ids of the backbone devices
pub mod node_id {
    pub const INTERNET: &str = "cloud";
    pub const FIREWALL: &str = "firewall";
    pub const ROUTER: &str = "router";
    pub const CORE1: &str = "core1";
    pub const CORE2: &str = "core2";
    pub const LAN_SWITCH: &str = "switch";
    pub const VOICE_GATEWAY: &str = "voipgw";
}

/// Kind of device a topology node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Cloud,
    Firewall,
    Router,
    Mlswitch,
    Switch,
    Server,
    Pc,
    Laptop,
    Printer,
    Ipphone,
}

impl NodeKind {
    /// Icon key used by renderers
    pub fn glyph(self) -> &'static str {
        match self {
            NodeKind::Cloud => "cloud",
            NodeKind::Firewall => "shield",
            NodeKind::Router => "router",
            NodeKind::Mlswitch => "layer3-switch",
            NodeKind::Switch => "switch",
            NodeKind::Server => "server",
            NodeKind::Pc => "desktop",
            NodeKind::Laptop => "laptop",
            NodeKind::Printer => "printer",
            NodeKind::Ipphone => "phone",
        }
    }

    /// End devices hang off access switches and never get a config script
    pub fn is_end_device(self) -> bool {
        matches!(
            self,
            NodeKind::Pc | NodeKind::Laptop | NodeKind::Printer | NodeKind::Ipphone
        )
    }
}

/// Physical medium of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Copper,
    Fiber,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<u16>,
}

impl TopologyNode {
    pub fn new(id: &str, label: &str, kind: NodeKind, x: f64, y: f64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            x,
            y,
            vlan_id: None,
        }
    }

    /// Access switches are the only switches tagged with a department VLAN
    pub fn is_access_switch(&self) -> bool {
        self.kind == NodeKind::Switch && self.vlan_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyLink {
    pub source_id: String,
    pub target_id: String,
    pub media_type: MediaType,
}

impl TopologyLink {
    pub fn new(source_id: &str, target_id: &str, media_type: MediaType) -> Self {
        Self {
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
            media_type,
        }
    }
}

/// Topology is the node/link graph plus the canvas size it was laid out for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub nodes: Vec<TopologyNode>,
    pub links: Vec<TopologyLink>,
    pub width: f64,
    pub height: f64,
}

impl Topology {
    pub fn node(&self, id: &str) -> Option<&TopologyNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn access_switches(&self) -> impl Iterator<Item = &TopologyNode> {
        self.nodes.iter().filter(|n| n.is_access_switch())
    }

    pub fn access_switch_count(&self) -> usize {
        self.access_switches().count()
    }

    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    /// Links that touch the given node, in either direction
    pub fn links_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a TopologyLink> + 'a {
        self.links
            .iter()
            .filter(move |l| l.source_id == id || l.target_id == id)
    }
}
