//! Ordered name scanning shared by every setting.
//!
//! # Design Decisions
//! - Within one source the first name whose value is accepted wins
//! - Sources are consulted in a fixed priority order
//! - Lookups decide acceptance, so a rejected value keeps the scan going

/// Where a setting value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    CommandLine,
    Environment,
}

/// Scan `names` in order and return the first value `lookup` accepts.
pub fn first_match<T>(names: &[String], mut lookup: impl FnMut(&str) -> Option<T>) -> Option<T> {
    names.iter().find_map(|name| lookup(name))
}

/// Resolve a single-valued setting.
///
/// `candidates` lists the sources in priority order together with the names to scan
/// in each. Returns the winning source and its value.
pub fn resolve_setting<T>(
    candidates: &[(Source, &[String])],
    mut lookup: impl FnMut(Source, &str) -> Option<T>,
) -> Option<(Source, T)> {
    candidates.iter().find_map(|&(source, names)| {
        first_match(names, |name| lookup(source, name)).map(|value| (source, value))
    })
}
