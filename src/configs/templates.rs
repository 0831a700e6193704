//! Raw Tera templates for device configuration scripts.
//!
//! Control tags sit at the start of the line they guard and the closing tag
//! starts the line that follows, so disabled sections leave no blank lines.

pub const BASELINE: &str = "baseline";
pub const FIREWALL: &str = "firewall";
pub const CORE_SWITCH: &str = "core_switch";
pub const ROUTER: &str = "router";
pub const VOICE_GATEWAY: &str = "voice_gateway";
pub const ACCESS_SWITCH: &str = "access_switch";

/// Security stanza shared by every device
pub const BASELINE_TEMPLATE: &str = "enable secret class
service password-encryption
";

pub const FIREWALL_TEMPLATE: &str = r#"! {{ hostname }} ({{ model }}) Configuration
enable
conf t
hostname {{ hostname }}
{% include "baseline" %}! Interfaces
interface GigabitEthernet1/1
 nameif outside
 security-level 0
 ip address dhcp
 no shutdown
interface GigabitEthernet1/2
 nameif inside
 security-level 100
 no ip address
 no shutdown
interface GigabitEthernet1/2.{{ inside_vlan }}
 vlan {{ inside_vlan }}
 nameif inside_link
 ip address {{ inside_ip }} {{ inside_netmask }}
 no shutdown
interface GigabitEthernet1/3
 nameif dmz
 security-level 50
 ip address {{ dmz_gateway }} {{ dmz_netmask }}
 no shutdown
! NAT & PAT
object network INSIDE_SUBNETS
 subnet {{ inside_network }} {{ inside_network_mask }}
nat (inside,outside) after-auto source dynamic INSIDE_SUBNETS interface
{% if has_web_server %}object network WEB_SERVER
 host {{ web_server }}
 nat (dmz,outside) static interface service tcp www www
! Access Rules
access-list outside_access_in extended permit tcp any object WEB_SERVER eq www
access-group outside_access_in in interface outside
{% endif %}! Default Route
route outside 0.0.0.0 0.0.0.0 [YOUR_ISP_GATEWAY_IP] 1
exit
"#;

pub const CORE_SWITCH_TEMPLATE: &str = r#"! {{ hostname }} ({{ model }}) Configuration
enable
conf t
hostname {{ hostname }}
{% include "baseline" %}{% for v in vlans %}vlan {{ v.id }}
 name {{ v.name }}
exit
{% endfor %}ip routing
{% for s in svis %}interface Vlan{{ s.id }}
 description {{ s.name }} SVI
 ip address {{ s.address }} {{ s.netmask }}
{% if hsrp %} standby {{ s.id }} ip {{ s.virtual_ip }}
 standby {{ s.id }} priority {{ priority }}
 standby {{ s.id }} preempt
{% endif %} no shutdown
exit
{% endfor %}! OSPF Routing
router ospf 1
 router-id {{ router_id }}
 network {{ ospf_network }} {{ ospf_wildcard }} area 0
 default-information originate
exit
{% if has_default_route %}ip route 0.0.0.0 0.0.0.0 {{ default_route }}
{% endif %}"#;

pub const ROUTER_TEMPLATE: &str = r#"! {{ hostname }} ({{ model }}) Configuration
enable
conf t
hostname {{ hostname }}
{% include "baseline" %}! WAN Interface
interface {{ wan_port }}
 ip address dhcp
 ip nat outside
 no shutdown
! LAN Interface
interface {{ lan_port }}
 ip address {{ lan_ip }} {{ lan_netmask }}
 ip nat inside
 no shutdown
{% if has_dhcp_pool %}! DHCP Pool
ip dhcp excluded-address {{ pool.excluded_first }} {{ pool.excluded_last }}
ip dhcp pool {{ pool.name }}
 network {{ pool.network }} {{ pool.netmask }}
 default-router {{ pool.gateway }}
 dns-server {{ pool.dns_server }}
exit
{% endif %}! NAT Overload
ip nat inside source list 1 interface {{ wan_port }} overload
access-list 1 permit {{ nat_network }} {{ nat_wildcard }}
! Default Route
ip route 0.0.0.0 0.0.0.0 {{ wan_port }}
exit
"#;

pub const VOICE_GATEWAY_TEMPLATE: &str = r#"! {{ hostname }} ({{ model }}) Configuration
enable
conf t
hostname {{ hostname }}
{% include "baseline" %}! CME Config
telephony-service
 max-ephones {{ max_ephones }}
 max-dn {{ max_dn }}
 ip source-address {{ source_address }} port {{ skinny_port }}
 auto assign 1 to {{ max_ephones }}
exit
! Ephone-DNs
{% for dn in directory_numbers %}ephone-dn {{ dn.tag }}
 number {{ dn.number }}
exit
{% endfor %}"#;

pub const ACCESS_SWITCH_TEMPLATE: &str = r#"! {{ hostname }} ({{ model }}) Configuration
enable
conf t
hostname {{ hostname }}
{% include "baseline" %}vlan {{ vlan_id }}
 name {{ vlan_name }}
exit
{% if has_voice %}vlan {{ voice_vlan }}
 name {{ voice_name }}
exit
{% endif %}! Interface Configs
interface range FastEthernet0/1 - 24
 switchport mode access
 switchport access vlan {{ vlan_id }}
{% if has_voice %} switchport voice vlan {{ voice_vlan }}
{% endif %} spanning-tree portfast
 spanning-tree bpduguard enable
exit
{% if trunk_uplink %}! Uplink Config
interface GigabitEthernet0/1
 switchport mode trunk
exit
{% endif %}"#;

/// Every template, registered together so includes resolve
pub const ALL: [(&str, &str); 6] = [
    (BASELINE, BASELINE_TEMPLATE),
    (FIREWALL, FIREWALL_TEMPLATE),
    (CORE_SWITCH, CORE_SWITCH_TEMPLATE),
    (ROUTER, ROUTER_TEMPLATE),
    (VOICE_GATEWAY, VOICE_GATEWAY_TEMPLATE),
    (ACCESS_SWITCH, ACCESS_SWITCH_TEMPLATE),
];
