// src/roles.rs
//
// Post-extraction role structuring: flatten the agenda into a
// role-key → presenter lookup for slide templates. Speakers are covered
// by the dedicated speakers list and stay out of here.

use std::collections::BTreeMap;

use crate::core::sanitize::strip_role_key;
use crate::record::{AgendaItem, RoleEntry};

pub fn structure(items: &[AgendaItem]) -> BTreeMap<String, RoleEntry> {
    let mut roles = BTreeMap::new();
    for item in items {
        if item.role.is_empty() || item.role == "Break" {
            continue;
        }
        if item.presenter.is_empty() || item.presenter.eq_ignore_ascii_case("tba") {
            continue;
        }
        if item.role.contains("Speaker") {
            continue;
        }
        roles.insert(
            strip_role_key(&item.role),
            RoleEntry { presenter: item.presenter.clone() },
        );
    }
    roles
}
