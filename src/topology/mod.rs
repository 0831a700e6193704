mod layout;

pub use layout::*;

use std::collections::HashSet;

use crate::catalog::TierPolicy;
use crate::models::{
    node_id, Department, MediaType, NodeKind, ServerRecord, Topology, TopologyLink, TopologyNode,
};
use crate::utils::strip_non_alphanumeric;

/// End devices attached to every access switch: kind, id prefix, label
const END_DEVICES: [(NodeKind, &str, &str); 4] = [
    (NodeKind::Pc, "pc", "PC"),
    (NodeKind::Ipphone, "phone", "IP Phone"),
    (NodeKind::Laptop, "laptop", "Laptop"),
    (NodeKind::Printer, "printer", "Printer"),
];

const SWITCH_TAG_LEN: usize = 4;

/// Accumulates nodes and links for one generation pass
#[derive(Default)]
struct GraphBuilder {
    nodes: Vec<TopologyNode>,
    links: Vec<TopologyLink>,
}

impl GraphBuilder {
    fn node(&mut self, node: TopologyNode) {
        self.nodes.push(node);
    }

    fn link(&mut self, source: &str, target: &str, media: MediaType) {
        self.links.push(TopologyLink::new(source, target, media));
    }
}

/// Short upper-case tag naming a department's access switches, e.g. "SALE"
/// for "Sales & Marketing". A taken tag gets "-{id}" appended, then a
/// counter, until it is unique. Plain tags are alphanumeric only, so a
/// suffixed tag never matches one.
fn switch_tag(dept: &Department, used: &mut HashSet<String>) -> String {
    let clean = strip_non_alphanumeric(&dept.name).to_uppercase();
    let mut base: String = clean.chars().take(SWITCH_TAG_LEN).collect();
    if base.is_empty() {
        base = "DEPT".to_string();
    }

    let mut tag = base.clone();
    let mut attempt = 1u32;
    while !used.insert(tag.clone()) {
        tag = match attempt {
            1 => format!("{}-{}", base, dept.id),
            n => format!("{}-{}-{}", base, dept.id, n),
        };
        attempt += 1;
    }
    tag
}

/// Access switch id for the n-th (zero-based) switch of a department
pub fn access_switch_id(tag: &str, index: u32) -> String {
    format!("Access-{}-SW{}", tag, index + 1)
}

/// Build the node/link graph and its 2-D layout.
///
/// Backbone nodes come from the tier policy at fixed coordinates. Every
/// department then gets `ceil(employees / 20)` access switches in one row,
/// each carrying four end devices. Tiers without per-department switches
/// hang all end-device groups off the shared LAN switch.
pub fn build(
    policy: &TierPolicy,
    departments: &[Department],
    servers: &[ServerRecord],
    voip: bool,
) -> Topology {
    let layout = &policy.layout;
    let mut graph = GraphBuilder::default();

    for n in policy.backbone {
        graph.node(TopologyNode::new(n.id, n.label, n.kind, n.x, n.y));
    }
    for l in policy.backbone_links {
        graph.link(l.source, l.target, l.media);
    }

    if voip && policy.voice_gateway_enabled {
        let (x, y) = layout.voice_gateway;
        graph.node(TopologyNode::new(node_id::VOICE_GATEWAY, "Voice-GW", NodeKind::Router, x, y));
        graph.link(node_id::VOICE_GATEWAY, policy.uplinks[0], MediaType::Copper);
    }

    let mut server_x = layout.server_start_x;
    for server in servers {
        if server.is_dmz() {
            let (x, y) = layout.dmz_server;
            graph.node(TopologyNode::new(&server.name, &server.name, NodeKind::Server, x, y));
            graph.link(node_id::FIREWALL, &server.name, MediaType::Copper);
        } else {
            graph.node(TopologyNode::new(
                &server.name,
                &server.name,
                NodeKind::Server,
                server_x,
                layout.server_row_y,
            ));
            graph.link(policy.server_uplink, &server.name, MediaType::Copper);
            server_x += layout.server_pitch;
        }
    }

    let total_switches: u32 = departments.iter().map(|d| d.access_switch_count()).sum();
    let mut used_tags = HashSet::new();
    let mut access_x = layout.access_start_x;
    let mut switch_index = 0usize;
    let y = layout.access_row_y;

    for dept in departments {
        let tag = switch_tag(dept, &mut used_tags);

        for j in 0..dept.access_switch_count() {
            let switch_id = access_switch_id(&tag, j);

            let parent = if policy.per_department_switches {
                let mut node = TopologyNode::new(&switch_id, &switch_id, NodeKind::Switch, access_x, y);
                node.vlan_id = Some(dept.vlan_id);
                graph.node(node);
                graph.link(policy.uplink_for(switch_index), &switch_id, MediaType::Fiber);
                switch_id.clone()
            } else {
                policy.uplinks[0].to_string()
            };

            for ((kind, prefix, label), dx) in END_DEVICES.iter().zip(layout.end_device_dx) {
                let device_id = format!("{}-{}", prefix, switch_id);
                graph.node(TopologyNode::new(
                    &device_id,
                    label,
                    *kind,
                    access_x + dx,
                    y + layout.end_device_dy,
                ));
                graph.link(&parent, &device_id, MediaType::Copper);
            }

            access_x += layout.switch_pitch;
            switch_index += 1;
        }
    }

    let width = layout
        .min_width
        .max(f64::from(total_switches) * layout.switch_pitch + layout.width_margin);

    tracing::debug!(
        "Built {} topology: {} nodes, {} links, {} access groups",
        policy.tier,
        graph.nodes.len(),
        graph.links.len(),
        total_switches
    );

    Topology {
        nodes: graph.nodes,
        links: graph.links,
        width,
        height: layout.height,
    }
}
