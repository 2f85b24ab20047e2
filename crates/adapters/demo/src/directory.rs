//! Sample employees and department tree, already in canonical form.

use fleetdash_domain::department::Department;
use fleetdash_domain::employee::{Employee, Role};
use fleetdash_domain::id::{DepartmentId, EmployeeId};

const EMPLOYEES: [(u64, &str, &str, &str, Role); 8] = [
    (1, "John Smith", "john.smith@fleetflow.com", "Management", Role::Admin),
    (2, "Maria Silva", "maria.silva@fleetflow.com", "Engineering - Design", Role::User),
    (3, "Carlos Santos", "carlos.santos@fleetflow.com", "Engineering - Construction", Role::User),
    (4, "Ana Costa", "ana.costa@fleetflow.com", "Asset Management & Logistics - AM", Role::User),
    (5, "Pedro Alves", "pedro.alves@fleetflow.com", "Development", Role::User),
    (6, "Sofia Lima", "sofia.lima@fleetflow.com", "Asset Management & Logistics - Logistics", Role::User),
    (7, "Ricardo Mendes", "ricardo.mendes@fleetflow.com", "Engineering - Permitting", Role::User),
    (8, "Luisa Torres", "luisa.torres@fleetflow.com", "Management", Role::User),
];

/// `(slug, name, parent slug)`
const DEPARTMENTS: [(&str, &str, Option<&str>); 10] = [
    ("management", "Management", None),
    ("development", "Development", None),
    ("engineering", "Engineering", None),
    ("design", "Design", Some("engineering")),
    ("permitting", "Permitting", Some("engineering")),
    ("construction", "Construction", Some("engineering")),
    ("am-logistics", "Asset Management & Logistics", None),
    ("am", "AM", Some("am-logistics")),
    ("logistics", "Logistics", Some("am-logistics")),
    ("finance", "Finance and Administration", None),
];

/// The sample staff; employee `1` is the administrator.
#[must_use]
pub fn demo_employees() -> Vec<Employee> {
    EMPLOYEES
        .iter()
        .map(|&(id, name, email, sector, role)| Employee {
            id: EmployeeId::new(id),
            name: name.to_string(),
            email: email.to_string(),
            sector: sector.to_string(),
            role,
        })
        .collect()
}

#[must_use]
pub fn demo_departments() -> Vec<Department> {
    DEPARTMENTS
        .iter()
        .map(|&(id, name, parent)| Department {
            id: DepartmentId::new(id),
            name: name.to_string(),
            parent: parent.map(DepartmentId::new),
        })
        .collect()
}
