use serde::{Deserialize, Serialize};

use super::{vlan_id, ValidationError, MAX_DEPARTMENT_VLAN};

/// Employees served by one access switch
pub const EMPLOYEES_PER_ACCESS_SWITCH: u32 = 20;

const DEFAULT_NEW_EMPLOYEES: u32 = 5;
const VLAN_STEP: u16 = 10;

/// Department is one roster entry; its VLAN id is fixed when it is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: u32,
    pub name: String,
    pub employees: u32,
    pub vlan_id: u16,
}

impl Department {
    pub fn new(id: u32, name: &str, employees: u32, vlan_id: u16) -> Self {
        Self {
            id,
            name: name.to_string(),
            employees,
            vlan_id,
        }
    }

    /// Number of access switches needed for this department's headcount
    pub fn access_switch_count(&self) -> u32 {
        self.employees.div_ceil(EMPLOYEES_PER_ACCESS_SWITCH).max(1)
    }
}

/// Roster owns the department list edited by the caller before generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    departments: Vec<Department>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            departments: vec![
                Department::new(1, "Sales & Marketing", 18, 20),
                Department::new(2, "Finance & Acc", 12, 30),
                Department::new(3, "HR & Logistics", 10, 40),
                Department::new(4, "ICT", 15, 50),
            ],
        }
    }
}

impl Roster {
    pub fn new(departments: Vec<Department>) -> Self {
        Self { departments }
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn into_departments(self) -> Vec<Department> {
        self.departments
    }

    pub fn total_employees(&self) -> u32 {
        self.departments.iter().map(|d| d.employees).sum()
    }

    /// Append a department. The id is one past the highest id and the VLAN
    /// steps by 10 past the highest VLAN, skipping infrastructure VLAN ids.
    /// Fails once the next VLAN would pass `MAX_DEPARTMENT_VLAN`.
    pub fn add(&mut self, name: Option<&str>, employees: Option<u32>) -> Result<&Department, ValidationError> {
        let exhausted = || {
            ValidationError::new(
                "departments",
                format!("no department VLAN id left up to {}", MAX_DEPARTMENT_VLAN),
            )
        };

        let id = match self.departments.iter().map(|d| d.id).max() {
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| ValidationError::new("departments", "department ids exhausted"))?,
            None => 1,
        };

        let mut vlan = match self.departments.iter().map(|d| d.vlan_id).max() {
            Some(max) => max.checked_add(VLAN_STEP).ok_or_else(exhausted)?,
            None => VLAN_STEP,
        };
        while is_infrastructure_vlan(vlan) {
            vlan = vlan.checked_add(VLAN_STEP).ok_or_else(exhausted)?;
        }
        if vlan > MAX_DEPARTMENT_VLAN {
            return Err(exhausted());
        }

        self.departments.push(Department::new(
            id,
            name.unwrap_or(""),
            employees.unwrap_or(DEFAULT_NEW_EMPLOYEES),
            vlan,
        ));
        Ok(&self.departments[self.departments.len() - 1])
    }

    pub fn rename(&mut self, id: u32, name: &str) -> Result<(), ValidationError> {
        let dept = self.find_mut(id)?;
        dept.name = name.to_string();
        Ok(())
    }

    /// Set the headcount of a department; counts below one are raised to one
    pub fn set_employees(&mut self, id: u32, employees: u32) -> Result<(), ValidationError> {
        let dept = self.find_mut(id)?;
        dept.employees = employees.max(1);
        Ok(())
    }

    /// Case-insensitive variant of `set_employees`. Returns how many
    /// departments matched.
    pub fn set_employees_by_name(&mut self, name: &str, employees: u32) -> usize {
        let mut matched = 0;
        for dept in self.departments.iter_mut().filter(|d| d.name.eq_ignore_ascii_case(name)) {
            dept.employees = employees.max(1);
            matched += 1;
        }
        matched
    }

    /// Remove a department by id. The last department cannot be removed.
    pub fn remove(&mut self, id: u32) -> bool {
        if self.departments.len() <= 1 {
            return false;
        }
        let before = self.departments.len();
        self.departments.retain(|d| d.id != id);
        before != self.departments.len()
    }

    /// Remove every department whose name matches case-insensitively, unless
    /// only one department is left.
    pub fn remove_by_name(&mut self, name: &str) -> bool {
        if self.departments.len() <= 1 {
            return false;
        }
        let before = self.departments.len();
        self.departments.retain(|d| !d.name.eq_ignore_ascii_case(name));
        before != self.departments.len()
    }

    fn find_mut(&mut self, id: u32) -> Result<&mut Department, ValidationError> {
        self.departments
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| ValidationError::new("departments", format!("department {} not found", id)))
    }
}

fn is_infrastructure_vlan(vlan: u16) -> bool {
    matches!(
        vlan,
        vlan_id::MANAGEMENT | vlan_id::VOICE | vlan_id::SERVERS | vlan_id::DMZ
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_switch_count() {
        assert_eq!(Department::new(1, "A", 1, 20).access_switch_count(), 1);
        assert_eq!(Department::new(1, "A", 20, 20).access_switch_count(), 1);
        assert_eq!(Department::new(1, "A", 21, 20).access_switch_count(), 2);
        assert_eq!(Department::new(1, "A", 45, 20).access_switch_count(), 3);
    }

    #[test]
    fn test_add_assigns_next_id_and_vlan() {
        let mut roster = Roster::default();
        let dept = roster.add(Some("Legal"), None).unwrap();
        assert_eq!(dept.id, 5);
        assert_eq!(dept.vlan_id, 60);
        assert_eq!(dept.employees, 5);

        // 70 is the voice VLAN, so the next department lands on 80
        let dept = roster.add(Some("Ops"), Some(30)).unwrap();
        assert_eq!(dept.vlan_id, 80);

        // 90 (servers) is skipped as well
        let dept = roster.add(None, None).unwrap();
        assert_eq!(dept.vlan_id, 100);
        assert_eq!(dept.name, "");
    }

    #[test]
    fn test_add_to_empty_roster() {
        let mut roster = Roster::new(Vec::new());
        let dept = roster.add(Some("Solo"), Some(3)).unwrap();
        assert_eq!(dept.id, 1);
        assert_eq!(dept.vlan_id, 20);
    }

    #[test]
    fn test_add_stops_at_highest_department_vlan() {
        let mut roster = Roster::new(vec![Department::new(1, "A", 5, 240)]);
        assert_eq!(roster.add(Some("B"), None).unwrap().vlan_id, 250);

        let err = roster.add(Some("C"), None).unwrap_err();
        assert_eq!(err.field, "departments");
        assert_eq!(roster.departments().len(), 2);
    }

    #[test]
    fn test_add_after_out_of_range_vlan_does_not_overflow() {
        let mut roster = Roster::new(vec![Department::new(1, "A", 5, 65530)]);
        assert!(roster.add(Some("B"), None).is_err());
        assert_eq!(roster.departments().len(), 1);

        let mut roster = Roster::new(vec![Department::new(u32::MAX, "A", 5, 20)]);
        assert!(roster.add(Some("B"), None).is_err());
    }

    #[test]
    fn test_remove_keeps_last_department() {
        let mut roster = Roster::new(vec![Department::new(1, "A", 5, 20), Department::new(2, "B", 5, 30)]);
        assert!(roster.remove(1));
        assert!(!roster.remove(2));
        assert_eq!(roster.departments().len(), 1);
    }

    #[test]
    fn test_edit_by_name_is_case_insensitive() {
        let mut roster = Roster::default();
        assert_eq!(roster.set_employees_by_name("ict", 40), 1);
        assert_eq!(roster.departments()[3].employees, 40);
        assert!(roster.remove_by_name("FINANCE & ACC"));
        assert_eq!(roster.departments().len(), 3);
        assert_eq!(roster.total_employees(), 18 + 10 + 40);
    }

    #[test]
    fn test_set_employees_clamps_and_reports_missing() {
        let mut roster = Roster::default();
        roster.set_employees(2, 0).unwrap();
        assert_eq!(roster.departments()[1].employees, 1);
        assert!(roster.rename(99, "x").is_err());
    }
}
