//! The generation pipeline: allocate addresses, build the graph, render
//! configs, derive cabling and cost, all from one request snapshot.

use std::collections::HashSet;

use anyhow::Result;

use crate::catalog::TierPolicy;
use crate::ipam::{allocate_servers, allocate_vlans, BaseNetwork};
use crate::models::{Design, DesignRequest, IpSchema, ServerRecord, Topology, VlanRecord};
use crate::utils::{is_valid_hostname, is_valid_ipv4};
use crate::{cabling, configs, cost, topology};

/// A programming-contract failure inside the engine: the pipeline produced
/// or was handed something that can never be rendered correctly.
#[derive(Debug)]
pub struct InvariantViolation {
    pub message: String,
}

impl InvariantViolation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "design invariant violated: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Shorthand for an `InvariantViolation` wrapped in `anyhow::Error`
pub fn violation(message: impl Into<String>) -> anyhow::Error {
    anyhow::Error::new(InvariantViolation::new(message))
}

fn check_vlans(vlans: &[VlanRecord]) -> Result<()> {
    let mut ids = HashSet::new();
    let mut subnets = HashSet::new();
    for vlan in vlans {
        if !ids.insert(vlan.vlan_id) {
            return Err(violation(format!("VLAN {} allocated twice", vlan.vlan_id)));
        }
        if !subnets.insert(vlan.subnet.as_str()) {
            return Err(violation(format!("subnet {} allocated twice", vlan.subnet)));
        }
        if !is_valid_ipv4(&vlan.gateway) {
            return Err(violation(format!("VLAN {} has gateway '{}'", vlan.vlan_id, vlan.gateway)));
        }
    }
    Ok(())
}

fn check_servers(servers: &[ServerRecord]) -> Result<()> {
    match servers.iter().find(|s| !is_valid_ipv4(&s.ip)) {
        Some(server) => Err(violation(format!("server {} has address '{}'", server.name, server.ip))),
        None => Ok(()),
    }
}

/// Node ids are unique, every link endpoint resolves to a node, and every
/// configurable device carries a usable hostname
pub fn check_topology(topology: &Topology) -> Result<()> {
    let mut ids = HashSet::new();
    for node in &topology.nodes {
        if !ids.insert(node.id.as_str()) {
            return Err(violation(format!("node id '{}' used twice", node.id)));
        }
        if !node.kind.is_end_device() && !is_valid_hostname(&node.label) {
            return Err(violation(format!("node '{}' has label '{}', not a hostname", node.id, node.label)));
        }
    }
    for link in &topology.links {
        for end in [&link.source_id, &link.target_id] {
            if !ids.contains(end.as_str()) {
                return Err(violation(format!(
                    "link {} -> {} references unknown node '{}'",
                    link.source_id, link.target_id, end
                )));
            }
        }
    }
    Ok(())
}

/// Run the whole pipeline for one request.
///
/// The request is validated first; a `ValidationError` comes back wrapped in
/// `anyhow` without any generation work done. The same request and base
/// network always produce the same design.
pub fn generate(request: &DesignRequest, base: BaseNetwork) -> Result<Design> {
    request.validate()?;

    let policy = TierPolicy::for_tier(request.tier);
    let voip = request.on_prem.voip;
    tracing::info!(
        "Generating {} design: {} departments, {} employees, base {}",
        policy.tier,
        request.departments.len(),
        request.departments.iter().map(|d| d.employees).sum::<u32>(),
        base.prefix(policy.tier)
    );

    let vlans = allocate_vlans(&policy, &request.departments, &base);
    check_vlans(&vlans)?;
    let ip_schema = IpSchema { vlans };

    let servers = allocate_servers(&policy, &request.on_prem, &base);
    check_servers(&servers)?;
    let topology = topology::build(&policy, &request.departments, &servers, voip);
    check_topology(&topology)?;

    let configs = configs::synthesize(&policy, &ip_schema, &servers, &topology, &base, voip)?;
    let cabling_guide = cabling::derive(&topology.links);
    let cost = cost::estimate(&policy, topology.access_switch_count() as u32, voip);

    tracing::info!(
        "Design ready: {} VLANs, {} nodes, {} links, {} configs, total cost {:.2}",
        ip_schema.vlans.len(),
        topology.nodes.len(),
        topology.links.len(),
        configs.len(),
        cost.total
    );

    Ok(Design {
        tier: request.tier,
        base_prefix: base.prefix(request.tier),
        devices: policy.catalog.clone(),
        ip_schema,
        servers,
        topology,
        configs,
        cabling_guide,
        cost,
        cloud: request.cloud,
        voip,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        node_id, CableType, CloudServices, Department, DhcpRange, MediaType, NodeKind, OnPremServices,
        Tier, TopologyLink, ValidationError,
    };

    fn request(tier: Tier, departments: Vec<Department>, on_prem: OnPremServices) -> DesignRequest {
        DesignRequest {
            tier,
            floors: 1,
            departments,
            on_prem,
            cloud: CloudServices::default(),
        }
    }

    fn four_departments() -> Vec<Department> {
        vec![
            Department::new(1, "Sales", 18, 20),
            Department::new(2, "Finance", 12, 30),
            Department::new(3, "HR", 10, 40),
            Department::new(4, "ICT", 15, 50),
        ]
    }

    #[test]
    fn test_soho_example() {
        let req = request(Tier::Soho, vec![Department::new(1, "Home", 5, 10)], OnPremServices::default());
        let design = generate(&req, BaseNetwork::new(33, 0)).unwrap();

        assert_eq!(design.ip_schema.vlans.len(), 1);
        let lan = &design.ip_schema.vlans[0];
        assert_eq!(lan.vlan_id, 1);
        assert_eq!(lan.subnet, "192.168.33.0/24");

        let infrastructure = design
            .topology
            .nodes
            .iter()
            .filter(|n| n.kind != NodeKind::Cloud && !n.kind.is_end_device())
            .count();
        assert_eq!(infrastructure, 2);
        assert_eq!(design.topology.nodes.iter().filter(|n| n.kind.is_end_device()).count(), 4);
        assert!(design.servers.is_empty());
        assert!((design.cost.total - (25_000.0 + 6_000.0) * 1.20).abs() < 1e-6);
    }

    #[test]
    fn test_enterprise_example() {
        let req = request(Tier::Enterprise, four_departments(), OnPremServices::default());
        let design = generate(&req, BaseNetwork::new(12, 4)).unwrap();

        assert_eq!(design.ip_schema.vlans.len(), 8);
        assert_eq!(design.topology.access_switch_count(), 4);

        let gw = design.topology.node(node_id::VOICE_GATEWAY).unwrap();
        assert_eq!(gw.label, "Voice-GW");
        assert!(design
            .topology
            .links
            .iter()
            .any(|l| l.source_id == node_id::VOICE_GATEWAY && l.target_id == node_id::CORE1));

        assert_eq!(design.configs.len(), 4 + 4);
        assert_eq!(design.base_prefix, "10.12");
    }

    #[test]
    fn test_standard_without_services() {
        let req = request(Tier::Standard, four_departments(), OnPremServices::none());
        let design = generate(&req, BaseNetwork::new(12, 4)).unwrap();

        assert!(design.servers.is_empty());
        let servers = design.ip_schema.by_id(90).unwrap();
        assert_eq!(servers.dhcp_range, DhcpRange::Static);
        assert_eq!(design.topology.count_kind(NodeKind::Server), 0);
    }

    #[test]
    fn test_enterprise_vlan_count_for_any_roster() {
        for n in 1..=6u32 {
            let departments = (1..=n)
                .map(|i| Department::new(i, &format!("Team {}", i), i * 7, (i as u16 + 1) * 10 + 100))
                .collect();
            let req = request(Tier::Enterprise, departments, OnPremServices::default());
            let design = generate(&req, BaseNetwork::default()).unwrap();
            assert_eq!(design.ip_schema.vlans.len(), 1 + n as usize + 3);
        }
    }

    #[test]
    fn test_cabling_matches_links() {
        for tier in Tier::ALL {
            let req = request(tier, four_departments(), OnPremServices::default());
            let design = generate(&req, BaseNetwork::default()).unwrap();
            assert_eq!(design.cabling_guide.len(), design.topology.links.len());
            for (entry, link) in design.cabling_guide.iter().zip(&design.topology.links) {
                let expected = match link.media_type {
                    MediaType::Fiber => CableType::FiberOptic,
                    MediaType::Copper => CableType::CopperStraightThrough,
                };
                assert_eq!(entry.cable_type, expected);
                assert_eq!(entry.from, link.source_id);
            }
        }
    }

    #[test]
    fn test_prefix_sharing_department_names_generate() {
        let departments = vec![
            Department::new(1, "X12", 5, 20),
            Department::new(2, "X", 5, 30),
            Department::new(12, "X", 5, 40),
        ];
        let req = request(Tier::Standard, departments, OnPremServices::default());
        let design = generate(&req, BaseNetwork::new(20, 1)).unwrap();

        let mut ids: Vec<&str> = design.topology.nodes.iter().map(|n| n.id.as_str()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(design.cabling_guide.len(), design.topology.links.len());
    }

    #[test]
    fn test_generation_is_idempotent() {
        let req = DesignRequest::default();
        let base = BaseNetwork::from_seed(99, Tier::Enterprise);
        let first = generate(&req, base).unwrap();
        let second = generate(&req, base).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_concurrent_generations_do_not_interfere() {
        let handles: Vec<_> = Tier::ALL
            .into_iter()
            .map(|tier| {
                std::thread::spawn(move || {
                    let req = request(tier, four_departments(), OnPremServices::default());
                    generate(&req, BaseNetwork::new(20, 1)).unwrap()
                })
            })
            .collect();

        for (handle, tier) in handles.into_iter().zip(Tier::ALL) {
            let design = handle.join().unwrap();
            let req = request(tier, four_departments(), OnPremServices::default());
            assert_eq!(design, generate(&req, BaseNetwork::new(20, 1)).unwrap());
        }
    }

    #[test]
    fn test_invalid_request_is_rejected_before_generation() {
        let req = request(Tier::Standard, vec![Department::new(1, "", 5, 20)], OnPremServices::default());
        let err = generate(&req, BaseNetwork::default()).unwrap_err();
        assert!(err.downcast_ref::<ValidationError>().is_some());
    }

    #[test]
    fn test_dangling_link_is_an_invariant_violation() {
        let req = request(Tier::Standard, four_departments(), OnPremServices::default());
        let mut topology = generate(&req, BaseNetwork::default()).unwrap().topology;
        assert!(check_topology(&topology).is_ok());

        topology.links.push(TopologyLink::new(node_id::CORE1, "ghost", MediaType::Copper));
        let err = check_topology(&topology).unwrap_err();
        assert!(err.downcast_ref::<InvariantViolation>().is_some());
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_device_model_lookup() {
        let ent = generate(
            &request(Tier::Enterprise, four_departments(), OnPremServices::default()),
            BaseNetwork::default(),
        )
        .unwrap();
        let gw = ent.topology.node(node_id::VOICE_GATEWAY).unwrap();
        assert_eq!(ent.device_model(gw), "2911 Router");
        let fw = ent.topology.node(node_id::FIREWALL).unwrap();
        assert_eq!(ent.device_model(fw), "ASA 5506-X");

        let std = generate(
            &request(Tier::Standard, four_departments(), OnPremServices::default()),
            BaseNetwork::default(),
        )
        .unwrap();
        let router = std.topology.node(node_id::ROUTER).unwrap();
        assert_eq!(std.device_model(router), "4321 ISR");
        let pc = std.topology.nodes.iter().find(|n| n.kind == NodeKind::Pc).unwrap();
        assert_eq!(std.device_model(pc), "PC-PT");
    }

    #[test]
    fn test_cloud_flags_are_carried_but_inert() {
        let mut req = request(Tier::Enterprise, four_departments(), OnPremServices::default());
        let with_cloud = generate(&req, BaseNetwork::default()).unwrap();
        req.cloud = CloudServices { m365: false, aws: false };
        let without = generate(&req, BaseNetwork::default()).unwrap();

        assert_eq!(without.cloud, req.cloud);
        assert_eq!(with_cloud.topology, without.topology);
        assert_eq!(with_cloud.configs, without.configs);
        assert_eq!(with_cloud.cost, without.cost);
    }
}
