// src/extract/details.rs
//
// Speaker project/description extraction. The page has produced two
// markup shapes over the years, so this is two strategies behind one
// call, selected by a structural probe:
//
//  1. in-row emphasis (newer pages): the speaker row itself carries the
//     project title in an <i>; the descriptive text follows in the next
//     row, recognizable by a known set of sentence starters.
//  2. forward-scan detail row (older pages): the first later row owning
//     a td[colspan=3][align=left] holds a top-aligned gensmall span with
//     the project line.
//
// When neither shape is present the speaker keeps the TBA sentinel;
// nothing here ever fails the extraction.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::{Dom, NodeId, Selector};
use crate::params;

/// Words the Pathways curriculum starts its objective sentences with.
/// Used to find where a project title ends and its description begins.
const DESCRIPTION_STARTERS: &[&str] = &[
    "Deliver",
    "Demonstrate",
    "Demonstrates",
    "Provides",
    "Learn",
    "Learners",
    "Participants",
    "This project",
    "By the end",
    "Tell",
    "Use",
    "Explain",
    "Discuss",
];

/// Earliest starter occurrence past byte position 10; anything closer to
/// the front is part of the title itself, not the description.
fn starter_index(text: &str) -> Option<usize> {
    DESCRIPTION_STARTERS
        .iter()
        .filter_map(|starter| {
            text.match_indices(starter).map(|(i, _)| i).find(|&i| i > 10)
        })
        .min()
}

/// Resolve project and description for the speaker row at `rows[i]`.
pub fn project_and_description(dom: &Dom, rows: &[NodeId], i: usize) -> (String, String) {
    if let Some(found) = in_row_emphasis(dom, rows, i) {
        return found;
    }
    if let Some(found) = detail_row_scan(dom, rows, i) {
        return found;
    }
    if let Some(found) = next_row_truncation(dom, rows, i) {
        return found;
    }
    (s!(params::TBA), s!())
}

/// Strategy 1 probe + extraction: an emphasized project title inside the
/// speaker row itself.
fn in_row_emphasis(dom: &Dom, rows: &[NodeId], i: usize) -> Option<(String, String)> {
    let em = dom.find(rows[i], &Selector::tag("i"))?;
    let project = dom.text(em);
    if project.is_empty() {
        return None;
    }
    let description = rows
        .get(i + 1)
        .map(|&next| {
            let text = dom.text(next);
            starter_index(&text)
                .map(|at| s!(text[at..].trim()))
                .unwrap_or_default()
        })
        .unwrap_or_default();
    Some((project, description))
}

/// Strategy 2: scan forward for the detail row and read its project span.
/// Returns None only when no detail row exists at all; a detail row with
/// degenerate innards still resolves (to sentinels or empties).
fn detail_row_scan(dom: &Dom, rows: &[NodeId], i: usize) -> Option<(String, String)> {
    let detail_cell = rows[i + 1..].iter().find_map(|&r| {
        dom.find(r, &Selector::tag("td").attr("colspan", "3").attr("align", "left"))
    })?;

    let Some(span) = dom.find(
        detail_cell,
        &Selector::tag("span").class("gensmall").attr("valign", "top"),
    ) else {
        return Some((s!(params::TBA), s!()));
    };

    if let Some(em) = dom.find(span, &Selector::tag("i")) {
        // "Project Title - objective text": head is the project, the
        // remainder (further " - " segments intact) is the description.
        let line = dom.text(em);
        let mut parts = line.splitn(2, " - ");
        let project = s!(parts.next().unwrap_or("").trim());
        let description = s!(parts.next().unwrap_or("").trim());
        return Some((project, description));
    }

    let texts = dom.own_texts(span);
    if texts.is_empty() {
        Some((s!(), s!()))
    } else {
        Some((s!(params::NO_PATHWAYS), texts.join(" ")))
    }
}

/// Last resort (newer pages without the emphasis element): cut the next
/// row's text at the first description starter; the head is the title.
fn next_row_truncation(dom: &Dom, rows: &[NodeId], i: usize) -> Option<(String, String)> {
    let &next = rows.get(i + 1)?;
    let text = dom.text(next);
    let at = starter_index(&text)?;
    Some((s!(text[..at].trim()), s!(text[at..].trim())))
}

/* ---------- speech timing ---------- */

fn time_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{1,2}:\d{2}\b|\b\d+\s*min\b").unwrap())
}

/// Best-effort speech time for a speaker row: one or two clock / "N min"
/// tokens from the row's cells (cells wrapping a nested table first),
/// else a time pattern fished out of the slot's own text. None means the
/// caller should keep the carried-forward slot time.
pub fn speaker_time(
    dom: &Dom,
    row: NodeId,
    event: &str,
    project: &str,
    description: &str,
) -> Option<String> {
    let cells = dom.find_all(row, &Selector::tag("td"));
    let (tabled, plain): (Vec<NodeId>, Vec<NodeId>) = cells
        .into_iter()
        .partition(|&c| dom.find(c, &Selector::tag("table")).is_some());

    for cell in tabled.into_iter().chain(plain) {
        let text = dom.text(cell);
        let tokens: Vec<&str> = time_token_re()
            .find_iter(&text)
            .take(2)
            .map(|m| m.as_str())
            .collect();
        match tokens.as_slice() {
            [one] => return Some(s!(*one)),
            [from, to] => return Some(format!("{from} to {to}")),
            _ => {}
        }
    }

    let joined = format!("{event} {project} {description}");
    time_token_re().find(&joined).map(|m| s!(m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_of(dom: &Dom) -> Vec<NodeId> {
        dom.find_all(dom.root(), &Selector::tag("tr"))
    }

    fn speaker_row() -> &'static str {
        r#"<tr><td><span class="gensmall">10:00</span></td><td><span class="gen">1st Speaker</span></td><td><span class="gen">Jane</span></td><td><span class="gensmall">My Speech</span></td><td><span class="gensmall">5 6 7</span></td></tr>"#
    }

    #[test]
    fn detail_row_with_pathways_line() {
        let html = format!(
            r#"<table>{}<tr><td colspan="3" align="left"><span class="gensmall" valign="top"><i>Ice Breaker - Deliver your first speech - with notes</i></span></td></tr></table>"#,
            speaker_row(),
        );
        let dom = Dom::parse(&html).unwrap();
        let rows = rows_of(&dom);
        let (project, description) = project_and_description(&dom, &rows, 0);
        assert_eq!(project, "Ice Breaker");
        // remaining " - " segments stay joined
        assert_eq!(description, "Deliver your first speech - with notes");
    }

    #[test]
    fn detail_row_without_emphasis_is_non_pathways() {
        let html = format!(
            r#"<table>{}<tr><td colspan="3" align="left"><span class="gensmall" valign="top">A custom speech about knots <br> and their history</span></td></tr></table>"#,
            speaker_row(),
        );
        let dom = Dom::parse(&html).unwrap();
        let rows = rows_of(&dom);
        let (project, description) = project_and_description(&dom, &rows, 0);
        assert_eq!(project, "N/A (No Pathways Info)");
        assert_eq!(description, "A custom speech about knots and their history");
    }

    #[test]
    fn empty_detail_span_yields_empty_pair() {
        let html = format!(
            r#"<table>{}<tr><td colspan="3" align="left"><span class="gensmall" valign="top">  </span></td></tr></table>"#,
            speaker_row(),
        );
        let dom = Dom::parse(&html).unwrap();
        let rows = rows_of(&dom);
        assert_eq!(project_and_description(&dom, &rows, 0), (s!(), s!()));
    }

    #[test]
    fn detail_cell_without_span_keeps_tba() {
        let html = format!(
            r#"<table>{}<tr><td colspan="3" align="left"><b>nothing useful</b></td></tr></table>"#,
            speaker_row(),
        );
        let dom = Dom::parse(&html).unwrap();
        let rows = rows_of(&dom);
        assert_eq!(project_and_description(&dom, &rows, 0), (s!("TBA"), s!()));
    }

    #[test]
    fn no_detail_row_at_all_keeps_tba() {
        let html = format!("<table>{}</table>", speaker_row());
        let dom = Dom::parse(&html).unwrap();
        let rows = rows_of(&dom);
        assert_eq!(project_and_description(&dom, &rows, 0), (s!("TBA"), s!()));
    }

    #[test]
    fn in_row_emphasis_wins_over_forward_scan() {
        let html = r#"<table><tr><td><span class="gensmall">10:00</span></td><td><span class="gen">1st Speaker</span></td><td><span class="gen">Jane</span></td><td><span class="gensmall">My Speech <i>Engaging Humor</i></span></td><td><span class="gensmall">5 6 7</span></td></tr><tr><td colspan="3" align="left">Engaging Humor Deliver a speech that relies on humor</td></tr></table>"#;
        let dom = Dom::parse(html).unwrap();
        let rows = rows_of(&dom);
        let (project, description) = project_and_description(&dom, &rows, 0);
        assert_eq!(project, "Engaging Humor");
        assert_eq!(description, "Deliver a speech that relies on humor");
    }

    #[test]
    fn truncation_fallback_splits_on_first_starter() {
        let html = format!(
            r#"<table>{}<tr><td>Persuasive Influence This project addresses how to lead a group</td></tr></table>"#,
            speaker_row(),
        );
        let dom = Dom::parse(&html).unwrap();
        let rows = rows_of(&dom);
        let (project, description) = project_and_description(&dom, &rows, 0);
        assert_eq!(project, "Persuasive Influence");
        assert_eq!(description, "This project addresses how to lead a group");
    }

    #[test]
    fn starters_inside_the_first_ten_bytes_are_ignored() {
        // "Use" at position 0 is the title itself, not a description.
        assert_eq!(starter_index("Use of Props Demonstrates stagecraft"), Some(13));
        assert_eq!(starter_index("short text"), None);
    }

    #[test]
    fn speaker_time_prefers_nested_table_cell() {
        let html = r#"<table><tr><td><span class="gensmall">10:00</span></td><td><table><tr><td>10:15 to be confirmed 10:22</td></tr></table></td></tr></table>"#;
        let dom = Dom::parse(html).unwrap();
        let row = dom.find(dom.root(), &Selector::tag("tr")).unwrap();
        assert_eq!(speaker_time(&dom, row, "", "", ""), Some(s!("10:15 to 10:22")));
    }

    #[test]
    fn speaker_time_falls_back_to_slot_text() {
        let dom = Dom::parse("<table><tr><td>no times here</td></tr></table>").unwrap();
        let row = dom.find(dom.root(), &Selector::tag("tr")).unwrap();
        assert_eq!(
            speaker_time(&dom, row, "My Speech", "", "runs about 7 min overall"),
            Some(s!("7 min"))
        );
        assert_eq!(speaker_time(&dom, row, "My Speech", "TBA", ""), None);
    }
}
