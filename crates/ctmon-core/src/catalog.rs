//! Equipment catalog: pit locations and the loader units assigned to
//! them. Free-text entries are still accepted at commit; the catalog
//! only drives listings and advisory checks.

/// Pit locations currently covered by the monitor.
pub fn pit_locations() -> &'static [&'static str] {
    &["Pit 13HW", "Pit 24"]
}

/// Loader units assigned to a pit. Unknown pits have no assignments.
pub fn loader_units(pit: &str) -> &'static [&'static str] {
    match pit {
        "Pit 13HW" => &["EX1827", "EX1848", "EX1873", "EX1875"],
        // TODO: Pit 24 unit assignments pending from the field team.
        _ => &[],
    }
}

/// Whether `unit` is a cataloged loader for `pit`.
pub fn is_cataloged(pit: &str, unit: &str) -> bool {
    loader_units(pit).contains(&unit)
}
