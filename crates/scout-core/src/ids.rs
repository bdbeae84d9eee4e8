//! ID prefix constants.
//!
//! Store-assigned identifiers are `{prefix}-{8 hex chars}`, e.g. `pap-a3f8b2c1`.

pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_PAPER: &str = "pap";

/// Every prefix the store may hand out.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_PROJECT, PREFIX_PAPER];

/// Return the prefix portion of an ID, if it has one.
#[must_use]
pub fn prefix_of(id: &str) -> Option<&str> {
    id.split_once('-').map(|(prefix, _)| prefix)
}
