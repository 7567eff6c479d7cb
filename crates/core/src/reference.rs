//! Built-in reference data: departments and the complaint categories routed
//! to them.
//!
//! Must stay in sync with the seed rows in
//! `20240301000001_create_reference_tables.sql`.

/// A department and the category names routed to it.
#[derive(Debug, Clone, Copy)]
pub struct DepartmentSeed {
    pub name: &'static str,
    pub categories: &'static [&'static str],
}

pub const CATEGORY_INFRASTRUCTURE: &str = "Infrastructure";
pub const CATEGORY_PUBLIC_SAFETY: &str = "Public Safety";
pub const CATEGORY_ENVIRONMENTAL: &str = "Environmental";
pub const CATEGORY_SOCIAL_SERVICES: &str = "Social Services";
pub const CATEGORY_OTHER: &str = "Other";

/// Every category offered on the submission form, in display order.
pub const CATEGORIES: &[&str] = &[
    CATEGORY_INFRASTRUCTURE,
    CATEGORY_PUBLIC_SAFETY,
    CATEGORY_ENVIRONMENTAL,
    CATEGORY_SOCIAL_SERVICES,
    CATEGORY_OTHER,
];

pub const DEPARTMENTS: &[DepartmentSeed] = &[
    DepartmentSeed {
        name: "Public Works",
        categories: &[CATEGORY_INFRASTRUCTURE],
    },
    DepartmentSeed {
        name: "Police Department",
        categories: &[CATEGORY_PUBLIC_SAFETY],
    },
    DepartmentSeed {
        name: "Environmental Services",
        categories: &[CATEGORY_ENVIRONMENTAL],
    },
    DepartmentSeed {
        name: "Social Services",
        categories: &[CATEGORY_SOCIAL_SERVICES],
    },
];

/// Name of the department a category is routed to, if any.
///
/// `Other` has no department.
pub fn department_for_category(category: &str) -> Option<&'static str> {
    DEPARTMENTS
        .iter()
        .find(|d| d.categories.contains(&category))
        .map(|d| d.name)
}
