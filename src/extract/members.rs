// src/extract/members.rs
//
// The two heading-anchored sections at the bottom of the page:
// "Attending" (member list) and "Next Meeting" (free text).

use crate::core::{Dom, NodeId, Selector};
use crate::core::sanitize::normalize_ws;

fn heading(dom: &Dom, literal: &str) -> Option<NodeId> {
    dom.find_all(dom.root(), &Selector::tag("span").class("cattitle"))
        .into_iter()
        .find(|&n| dom.text(n) == literal)
}

/// Member names from the row following the "Attending" heading row.
/// The cell is free text separated by commas, semicolons or line breaks;
/// the literal "Member" is the page's empty-slot placeholder.
pub fn attending(dom: &Dom) -> Vec<String> {
    let mut members = Vec::new();

    let Some(head) = heading(dom, "Attending") else { return members };
    let Some(head_row) = dom.ancestor_with_tag(head, "tr") else { return members };
    let Some(list_row) = dom.next_sibling_element(head_row) else { return members };

    for cell in dom.find_all(list_row, &Selector::tag("td").class("gensmall")) {
        // Raw text: the separators include literal newlines.
        for name in dom.text_raw(cell).split([',', ';', '\n', '\r']) {
            let name = normalize_ws(name);
            if !name.is_empty() && name != "Member" {
                members.push(name);
            }
        }
    }
    members
}

/// Verbatim page text under the "Next Meeting" heading. Deliberately not
/// date-projected; this is whatever the club typed in.
pub fn next_meeting(dom: &Dom) -> String {
    heading(dom, "Next Meeting")
        .and_then(|head| dom.next_sibling_element(head))
        .map(|sib| dom.text(sib))
        .unwrap_or_default()
}
