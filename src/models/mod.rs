mod department;
mod design;
mod topology;

pub use department::*;
pub use design::*;
pub use topology::*;

use serde::{Deserialize, Serialize};

/// Design tier selecting the device catalog, VLAN policy and layout policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Soho,
    Standard,
    Enterprise,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Soho, Tier::Standard, Tier::Enterprise];

    /// Human-readable tier name as shown in reports
    pub fn display_name(self) -> &'static str {
        match self {
            Tier::Soho => "SOHO",
            Tier::Standard => "Standard Business",
            Tier::Enterprise => "Enterprise",
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Enterprise
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// On-premise services hosted inside the designed network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnPremServices {
    #[serde(default)]
    pub voip: bool,
    #[serde(default)]
    pub file: bool,
    #[serde(default)]
    pub web: bool,
    #[serde(default)]
    pub dhcp: bool,
    #[serde(default)]
    pub dns: bool,
}

impl OnPremServices {
    pub fn none() -> Self {
        Self {
            voip: false,
            file: false,
            web: false,
            dhcp: false,
            dns: false,
        }
    }
}

impl Default for OnPremServices {
    fn default() -> Self {
        Self {
            voip: true,
            file: true,
            web: true,
            dhcp: true,
            dns: true,
        }
    }
}

/// Cloud services in use. Carried through to the design as metadata only;
/// they do not change topology, configs or cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudServices {
    #[serde(default)]
    pub m365: bool,
    #[serde(default)]
    pub aws: bool,
}

impl Default for CloudServices {
    fn default() -> Self {
        Self { m365: true, aws: true }
    }
}

/// Input rejected before generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// DesignRequest is the full input snapshot for one generation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRequest {
    #[serde(default)]
    pub tier: Tier,
    #[serde(default = "default_floors")]
    pub floors: u32,
    pub departments: Vec<Department>,
    #[serde(default)]
    pub on_prem: OnPremServices,
    #[serde(default)]
    pub cloud: CloudServices,
}

fn default_floors() -> u32 {
    1
}

impl Default for DesignRequest {
    fn default() -> Self {
        Self {
            tier: Tier::default(),
            floors: 3,
            departments: Roster::default().into_departments(),
            on_prem: OnPremServices::default(),
            cloud: CloudServices::default(),
        }
    }
}

impl DesignRequest {
    /// Reject input the engine must never see: zero floors, an empty or
    /// malformed roster, and department VLANs that clash with each other or
    /// with the tier's infrastructure VLANs.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.floors == 0 {
            return Err(ValidationError::new("floors", "must be at least 1"));
        }
        if self.departments.is_empty() {
            return Err(ValidationError::new("departments", "at least one department is required"));
        }

        let reserved = reserved_vlans(self.tier);
        let mut ids = std::collections::HashSet::new();
        let mut vlans = std::collections::HashSet::new();

        for dept in &self.departments {
            if dept.name.trim().is_empty() {
                return Err(ValidationError::new(
                    "departments",
                    format!("department {} has an empty name", dept.id),
                ));
            }
            if dept.employees == 0 {
                return Err(ValidationError::new(
                    "departments",
                    format!("department '{}' must have at least one employee", dept.name),
                ));
            }
            if !ids.insert(dept.id) {
                return Err(ValidationError::new(
                    "departments",
                    format!("duplicate department id {}", dept.id),
                ));
            }

            // SOHO collapses every department into one flat LAN, so their
            // VLAN ids never reach the address plan.
            if self.tier == Tier::Soho {
                continue;
            }
            if !(MIN_DEPARTMENT_VLAN..=MAX_DEPARTMENT_VLAN).contains(&dept.vlan_id) {
                return Err(ValidationError::new(
                    "departments",
                    format!(
                        "VLAN {} of '{}' is outside {}..={}",
                        dept.vlan_id, dept.name, MIN_DEPARTMENT_VLAN, MAX_DEPARTMENT_VLAN
                    ),
                ));
            }
            if reserved.contains(&dept.vlan_id) {
                return Err(ValidationError::new(
                    "departments",
                    format!("VLAN {} of '{}' is reserved for infrastructure", dept.vlan_id, dept.name),
                ));
            }
            if !vlans.insert(dept.vlan_id) {
                return Err(ValidationError::new(
                    "departments",
                    format!("VLAN {} is assigned to more than one department", dept.vlan_id),
                ));
            }
        }

        Ok(())
    }
}

/// Lowest VLAN id a department may use; VLAN 1 doubles as the transit subnet
pub const MIN_DEPARTMENT_VLAN: u16 = 2;
/// Department VLAN ids become the third subnet octet
pub const MAX_DEPARTMENT_VLAN: u16 = 254;

/// Well-known infrastructure VLAN ids
pub mod vlan_id {
    /// Native VLAN; the flat SOHO LAN, and the transit subnet elsewhere
    pub const LAN: u16 = 1;
    pub const TRANSIT: u16 = 1;
    pub const MANAGEMENT: u16 = 10;
    pub const VOICE: u16 = 70;
    pub const SERVERS: u16 = 90;
    pub const DMZ: u16 = 102;
}

/// VLAN ids a department may not take in the given tier
pub fn reserved_vlans(tier: Tier) -> &'static [u16] {
    match tier {
        Tier::Soho => &[],
        Tier::Standard => &[vlan_id::TRANSIT, vlan_id::SERVERS],
        Tier::Enterprise => &[
            vlan_id::TRANSIT,
            vlan_id::MANAGEMENT,
            vlan_id::VOICE,
            vlan_id::SERVERS,
            vlan_id::DMZ,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(tier: Tier, departments: Vec<Department>) -> DesignRequest {
        DesignRequest {
            tier,
            floors: 2,
            departments,
            on_prem: OnPremServices::default(),
            cloud: CloudServices::default(),
        }
    }

    #[test]
    fn test_default_request_is_valid() {
        assert!(DesignRequest::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_floors() {
        let mut req = DesignRequest::default();
        req.floors = 0;
        let err = req.validate().unwrap_err();
        assert_eq!(err.field, "floors");
    }

    #[test]
    fn test_rejects_blank_name_and_zero_employees() {
        let req = request(Tier::Standard, vec![Department::new(1, "  ", 5, 20)]);
        assert!(req.validate().is_err());

        let req = request(Tier::Standard, vec![Department::new(1, "Ops", 0, 20)]);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rejects_reserved_and_duplicate_vlans() {
        let req = request(Tier::Enterprise, vec![Department::new(1, "Ops", 5, 70)]);
        assert!(req.validate().unwrap_err().message.contains("reserved"));

        // VLAN 70 is free in Standard
        let req = request(Tier::Standard, vec![Department::new(1, "Ops", 5, 70)]);
        assert!(req.validate().is_ok());

        let req = request(
            Tier::Standard,
            vec![Department::new(1, "Ops", 5, 20), Department::new(2, "Dev", 5, 20)],
        );
        assert!(req.validate().unwrap_err().message.contains("more than one"));
    }

    #[test]
    fn test_soho_ignores_department_vlans() {
        let req = request(
            Tier::Soho,
            vec![Department::new(1, "Home", 3, 0), Department::new(2, "Lab", 2, 0)],
        );
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_tier_serde_names() {
        assert_eq!(serde_json::to_string(&Tier::Soho).unwrap(), "\"soho\"");
        let tier: Tier = serde_json::from_str("\"enterprise\"").unwrap();
        assert_eq!(tier, Tier::Enterprise);
        assert_eq!(Tier::Standard.to_string(), "Standard Business");
    }
}
