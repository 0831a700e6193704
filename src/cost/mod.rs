use crate::catalog::TierPolicy;
use crate::models::{CostEstimate, CostLine, DeviceModel};

fn line(model: DeviceModel, quantity: u32) -> CostLine {
    CostLine {
        model: model.name,
        quantity,
        unit_price: model.price,
        subtotal: model.price * f64::from(quantity),
    }
}

/// Bill of materials for a design.
///
/// SOHO buys its router and the one LAN switch. Larger tiers buy the
/// backbone plus one switch per access switch in the topology; the voice
/// gateway is only bought when VoIP is on.
pub fn bill_of_materials(policy: &TierPolicy, access_switches: u32, voip: bool) -> Vec<CostLine> {
    let catalog = &policy.catalog;
    let mut items = Vec::new();

    if let Some(firewall) = catalog.firewall {
        items.push(line(firewall, 1));
    }
    if let Some(router) = catalog.router {
        items.push(line(router, 1));
    }
    if let Some(core) = catalog.core_switch {
        items.push(line(core, catalog.core_switch_count as u32));
    }

    let switches = if policy.per_department_switches { access_switches } else { 1 };
    items.push(line(catalog.access_switch, switches));

    if let Some(gateway) = catalog.voice_gateway {
        if voip && policy.voice_gateway_enabled {
            items.push(line(gateway, 1));
        }
    }

    items.retain(|item| item.quantity > 0);
    items
}

/// Hardware plus installation cost at the tier's install rate
pub fn estimate(policy: &TierPolicy, access_switches: u32, voip: bool) -> CostEstimate {
    let items = bill_of_materials(policy, access_switches, voip);
    let hardware_cost: f64 = items.iter().map(|item| item.subtotal).sum();
    let installation_cost = hardware_cost * policy.install_rate;

    tracing::debug!(
        "{} hardware {:.2} + installation {:.2}",
        policy.tier,
        hardware_cost,
        installation_cost
    );

    CostEstimate {
        hardware_cost,
        install_rate: policy.install_rate,
        installation_cost,
        total: hardware_cost + installation_cost,
        items,
    }
}
