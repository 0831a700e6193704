mod templates;

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::catalog::{models, require_model, TierPolicy};
use crate::design::violation;
use crate::ipam::BaseNetwork;
use crate::models::{
    node_id, vlan_id, vlan_name, DeviceConfigs, DeviceModel, IpSchema, ServerRecord, Topology,
    TopologyNode, VlanRecord,
};
use crate::utils::{netmask, parse_cidr, subnet_host, vlan_database_name, wildcard};

/// Host octet of the edge router on the transit subnet
const TRANSIT_ROUTER_HOST: u32 = 254;
/// Host octet of the firewall's inside link on the transit subnet
const TRANSIT_FIREWALL_HOST: u32 = 253;
/// Core switch n answers on host `.252 + n` behind the shared standby address
const CORE_SVI_FIRST_HOST: u32 = 252;
const PRIMARY_PRIORITY: u8 = 110;
const SECONDARY_PRIORITY: u8 = 100;
/// Internal addressing is summarised as one /16 under the base prefix
const SUMMARY_PREFIX_LEN: u8 = 16;
const PUBLIC_DNS: &str = "8.8.8.8";
const MAX_EPHONES: u32 = 20;
const SKINNY_PORT: u16 = 2000;
const SAMPLE_EXTENSIONS: [(u32, u32); 2] = [(1, 1001), (2, 1002)];

#[derive(Serialize)]
struct VlanEntry {
    id: u16,
    name: String,
}

#[derive(Serialize)]
struct Svi {
    id: u16,
    name: String,
    address: String,
    netmask: String,
    virtual_ip: String,
}

#[derive(Serialize)]
struct DhcpPool {
    name: String,
    network: String,
    netmask: String,
    gateway: String,
    excluded_first: String,
    excluded_last: String,
    dns_server: &'static str,
}

#[derive(Serialize)]
struct DirectoryNumber {
    tag: u32,
    number: u32,
}

/// Fresh template engine with every device template registered
fn engine() -> Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(templates::ALL.to_vec())
        .map_err(|e| anyhow::anyhow!("Invalid device template: {}", e))?;
    Ok(tera)
}

fn render(tera: &Tera, template: &str, hostname: &str, context: &Context) -> Result<String> {
    tera.render(template, context)
        .map_err(|e| anyhow::anyhow!("Template rendering failed for {}: {}", hostname, e))
}

fn device_context(node: &TopologyNode, model: DeviceModel) -> Context {
    let mut context = Context::new();
    context.insert("hostname", &node.label);
    context.insert("model", model.name);
    context
}

/// Network address and dotted netmask of a VLAN subnet
fn subnet_parts(vlan: &VlanRecord) -> Result<(String, String)> {
    let (addr, len) = parse_cidr(&vlan.subnet)
        .ok_or_else(|| violation(format!("VLAN {} has malformed subnet {}", vlan.vlan_id, vlan.subnet)))?;
    Ok((addr.to_string(), netmask(len)))
}

fn host_in(vlan: &VlanRecord, host: u32) -> Result<String> {
    subnet_host(&vlan.subnet, host)
        .ok_or_else(|| violation(format!("host .{} does not fit VLAN {} ({})", host, vlan.vlan_id, vlan.subnet)))
}

/// Address `host` on the transit /24 under `prefix`
fn transit_host(prefix: &str, host: u32) -> Result<String> {
    let transit = format!("{}.{}.0/24", prefix, vlan_id::TRANSIT);
    subnet_host(&transit, host)
        .ok_or_else(|| violation(format!("host .{} does not fit transit subnet {}", host, transit)))
}

fn require_node<'a>(topology: &'a Topology, id: &str) -> Result<&'a TopologyNode> {
    topology
        .node(id)
        .ok_or_else(|| violation(format!("topology has no '{}' node", id)))
}

fn require_vlan<'a>(ip_schema: &'a IpSchema, id: u16, name: &str) -> Result<&'a VlanRecord> {
    ip_schema
        .by_id(id)
        .ok_or_else(|| violation(format!("address plan has no {} VLAN ({})", name, id)))
}

/// Pair a catalog role with its topology node. A role present on only one
/// side is a contract failure; absent on both means the tier has no such device.
fn role<'a>(
    policy: &TierPolicy,
    model: Option<DeviceModel>,
    topology: &'a Topology,
    id: &str,
    what: &str,
) -> Result<Option<(DeviceModel, &'a TopologyNode)>> {
    match (model, topology.node(id)) {
        (Some(model), Some(node)) => Ok(Some((model, node))),
        (None, None) => Ok(None),
        (Some(_), None) => Err(violation(format!(
            "{} tier lists a {} but the topology has no '{}' node",
            policy.tier, what, id
        ))),
        (None, Some(_)) => require_model(None, what, policy.tier).map(|_| None),
    }
}

/// Emit one configuration script per infrastructure node.
///
/// Scripts come out in a fixed order: firewall, core switches, edge router,
/// voice gateway, LAN switch, then access switches in topology order.
/// Missing roles, nodes or VLANs fail the whole call; no partial output is
/// returned.
pub fn synthesize(
    policy: &TierPolicy,
    ip_schema: &IpSchema,
    servers: &[ServerRecord],
    topology: &Topology,
    base: &BaseNetwork,
    voip: bool,
) -> Result<DeviceConfigs> {
    let tera = engine()?;
    let prefix = base.prefix(policy.tier);
    let catalog = &policy.catalog;
    let mut configs = DeviceConfigs::default();

    if let Some((model, node)) = role(policy, catalog.firewall, topology, node_id::FIREWALL, "firewall")? {
        let script = firewall(&tera, model, node, ip_schema, servers, &prefix)?;
        configs.insert(&node.label, script);
    }

    match catalog.core_switch {
        Some(model) => {
            let ids = [node_id::CORE1, node_id::CORE2];
            if catalog.core_switch_count > ids.len() {
                return Err(violation(format!(
                    "{} tier asks for {} core switches",
                    policy.tier, catalog.core_switch_count
                )));
            }
            let redundant = catalog.core_switch_count > 1;
            for (index, id) in ids.iter().take(catalog.core_switch_count).enumerate() {
                let node = require_node(topology, id)?;
                let script = core_switch(&tera, model, node, index, redundant, ip_schema, &prefix)?;
                configs.insert(&node.label, script);
            }
        }
        None if topology.node(node_id::CORE1).is_some() => {
            require_model(None, "core switch", policy.tier)?;
        }
        None => {}
    }

    if let Some((model, node)) = role(policy, catalog.router, topology, node_id::ROUTER, "router")? {
        let script = router(&tera, policy, model, node, ip_schema, &prefix)?;
        configs.insert(&node.label, script);
    }

    if let Some(node) = topology.node(node_id::VOICE_GATEWAY) {
        let model = require_model(catalog.voice_gateway, "voice gateway", policy.tier)?;
        let script = voice_gateway(&tera, model, node, ip_schema)?;
        configs.insert(&node.label, script);
    }

    if let Some(node) = topology.node(node_id::LAN_SWITCH) {
        let lan = require_vlan(ip_schema, vlan_id::LAN, vlan_name::LAN)?;
        let script = access_switch(&tera, catalog.access_switch, node, lan, None, false)?;
        configs.insert(&node.label, script);
    }

    let voice = if policy.carries_voice(voip) {
        Some(require_vlan(ip_schema, vlan_id::VOICE, vlan_name::VOICE)?)
    } else {
        None
    };
    for node in topology.access_switches() {
        let vlan = node
            .vlan_id
            .and_then(|id| ip_schema.by_id(id))
            .ok_or_else(|| violation(format!("access switch {} has no VLAN in the address plan", node.id)))?;
        let script = access_switch(&tera, catalog.access_switch, node, vlan, voice, true)?;
        configs.insert(&node.label, script);
    }

    tracing::debug!("Synthesized {} device configs", configs.len());
    Ok(configs)
}

fn firewall(
    tera: &Tera,
    model: DeviceModel,
    node: &TopologyNode,
    ip_schema: &IpSchema,
    servers: &[ServerRecord],
    prefix: &str,
) -> Result<String> {
    let dmz = require_vlan(ip_schema, vlan_id::DMZ, vlan_name::DMZ)?;
    let (_, dmz_netmask) = subnet_parts(dmz)?;
    let inside_ip = transit_host(prefix, TRANSIT_FIREWALL_HOST)?;

    let mut context = device_context(node, model);
    context.insert("inside_vlan", &vlan_id::MANAGEMENT);
    context.insert("inside_ip", &inside_ip);
    context.insert("inside_netmask", &netmask(24));
    context.insert("dmz_gateway", &dmz.gateway);
    context.insert("dmz_netmask", &dmz_netmask);
    context.insert("inside_network", &format!("{}.0.0", prefix));
    context.insert("inside_network_mask", &netmask(SUMMARY_PREFIX_LEN));

    match servers.iter().find(|s| s.is_dmz()) {
        Some(web) => {
            context.insert("has_web_server", &true);
            context.insert("web_server", &web.ip);
        }
        None => context.insert("has_web_server", &false),
    }

    render(tera, templates::FIREWALL, &node.label, &context)
}

fn core_switch(
    tera: &Tera,
    model: DeviceModel,
    node: &TopologyNode,
    index: usize,
    redundant: bool,
    ip_schema: &IpSchema,
    prefix: &str,
) -> Result<String> {
    let vlans: Vec<VlanEntry> = ip_schema
        .vlans
        .iter()
        .map(|v| VlanEntry {
            id: v.vlan_id,
            name: vlan_database_name(&v.name),
        })
        .collect();

    let mut svis = Vec::new();
    for v in ip_schema.vlans.iter().filter(|v| v.vlan_id != vlan_id::DMZ) {
        let (_, mask) = subnet_parts(v)?;
        let address = if redundant {
            host_in(v, CORE_SVI_FIRST_HOST + index as u32)?
        } else {
            v.gateway.clone()
        };
        svis.push(Svi {
            id: v.vlan_id,
            name: v.name.clone(),
            address,
            netmask: mask,
            virtual_ip: v.gateway.clone(),
        });
    }

    let priority = if index == 0 { PRIMARY_PRIORITY } else { SECONDARY_PRIORITY };

    let mut context = device_context(node, model);
    context.insert("vlans", &vlans);
    context.insert("svis", &svis);
    context.insert("hsrp", &redundant);
    context.insert("priority", &priority);
    context.insert("router_id", &format!("1.1.1.{}", index + 1));
    context.insert("ospf_network", &format!("{}.0.0", prefix));
    context.insert("ospf_wildcard", &wildcard(SUMMARY_PREFIX_LEN));

    // Without a firewall in front the core defaults to the edge router
    if redundant {
        context.insert("has_default_route", &false);
    } else {
        context.insert("has_default_route", &true);
        context.insert("default_route", &transit_host(prefix, TRANSIT_ROUTER_HOST)?);
    }

    render(tera, templates::CORE_SWITCH, &node.label, &context)
}

/// WAN and LAN port names for a router model
fn router_ports(model: DeviceModel) -> (&'static str, &'static str) {
    if model.name == models::ISR_4321.name {
        ("GigabitEthernet0/0/0", "GigabitEthernet0/0/1")
    } else {
        ("GigabitEthernet0/0", "GigabitEthernet0/1")
    }
}

fn router(
    tera: &Tera,
    policy: &TierPolicy,
    model: DeviceModel,
    node: &TopologyNode,
    ip_schema: &IpSchema,
    prefix: &str,
) -> Result<String> {
    let (wan_port, lan_port) = router_ports(model);
    let mut context = device_context(node, model);
    context.insert("wan_port", wan_port);
    context.insert("lan_port", lan_port);

    if policy.vlans.flat_lan {
        // Flat LAN: the router is the gateway and hands out addresses itself
        let lan = require_vlan(ip_schema, vlan_id::LAN, vlan_name::LAN)?;
        let (network, mask) = subnet_parts(lan)?;
        let pool = DhcpPool {
            name: format!("SOHO_{}", lan.name),
            network: network.clone(),
            netmask: mask.clone(),
            gateway: lan.gateway.clone(),
            excluded_first: host_in(lan, 1)?,
            excluded_last: host_in(lan, 9)?,
            dns_server: PUBLIC_DNS,
        };
        context.insert("lan_ip", &lan.gateway);
        context.insert("lan_netmask", &mask);
        context.insert("has_dhcp_pool", &true);
        context.insert("pool", &pool);
        context.insert("nat_network", &network);
        context.insert("nat_wildcard", &wildcard(24));
    } else {
        context.insert("lan_ip", &transit_host(prefix, TRANSIT_ROUTER_HOST)?);
        context.insert("lan_netmask", &netmask(24));
        context.insert("has_dhcp_pool", &false);
        context.insert("nat_network", &format!("{}.0.0", prefix));
        context.insert("nat_wildcard", &wildcard(SUMMARY_PREFIX_LEN));
    }

    render(tera, templates::ROUTER, &node.label, &context)
}

fn voice_gateway(tera: &Tera, model: DeviceModel, node: &TopologyNode, ip_schema: &IpSchema) -> Result<String> {
    let voice = require_vlan(ip_schema, vlan_id::VOICE, vlan_name::VOICE)?;
    let numbers: Vec<DirectoryNumber> = SAMPLE_EXTENSIONS
        .iter()
        .map(|&(tag, number)| DirectoryNumber { tag, number })
        .collect();

    let mut context = device_context(node, model);
    context.insert("max_ephones", &MAX_EPHONES);
    context.insert("max_dn", &MAX_EPHONES);
    context.insert("source_address", &voice.gateway);
    context.insert("skinny_port", &SKINNY_PORT);
    context.insert("directory_numbers", &numbers);

    render(tera, templates::VOICE_GATEWAY, &node.label, &context)
}

fn access_switch(
    tera: &Tera,
    model: DeviceModel,
    node: &TopologyNode,
    vlan: &VlanRecord,
    voice: Option<&VlanRecord>,
    trunk_uplink: bool,
) -> Result<String> {
    let mut context = device_context(node, model);
    context.insert("vlan_id", &vlan.vlan_id);
    context.insert("vlan_name", &vlan_database_name(&vlan.name));
    context.insert("trunk_uplink", &trunk_uplink);
    match voice {
        Some(voice) => {
            context.insert("has_voice", &true);
            context.insert("voice_vlan", &voice.vlan_id);
            context.insert("voice_name", &vlan_database_name(&voice.name));
        }
        None => context.insert("has_voice", &false),
    }

    render(tera, templates::ACCESS_SWITCH, &node.label, &context)
}
