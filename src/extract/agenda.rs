// src/extract/agenda.rs
//
// The agenda table: fixed cell positions 0..4 with nested marker-class
// spans. Rows with fewer than five cells are separators and produce
// nothing; every qualifying row produces exactly one item.

use log::debug;

use crate::core::{Dom, NodeId, Selector};
use crate::params;
use crate::record::{AgendaItem, Speaker};

use super::details;

/// The agenda table's structural signature, stable across page versions.
fn agenda_table(dom: &Dom) -> Option<NodeId> {
    dom.find(
        dom.root(),
        &Selector::tag("table")
            .attr("border", "0")
            .attr("cellpadding", "1")
            .attr("cellspacing", "2"),
    )
}

pub fn extract(dom: &Dom) -> (Vec<AgendaItem>, Vec<Speaker>) {
    let mut items: Vec<AgendaItem> = Vec::new();
    let mut speakers: Vec<Speaker> = Vec::new();

    let Some(table) = agenda_table(dom) else {
        debug!("no agenda table in document; skipping agenda/speakers");
        return (items, speakers);
    };

    let rows = dom.find_all(table, &Selector::tag("tr"));
    for (i, &row) in rows.iter().enumerate() {
        let cells = dom.find_all(row, &Selector::tag("td"));
        if cells.len() < 5 {
            continue;
        }

        let cell_span = |ix: usize, class: &str| -> String {
            dom.find(cells[ix], &Selector::tag("span").class(class))
                .map(|n| dom.text(n))
                .unwrap_or_default()
        };

        // Carry-forward: a blank time cell groups the row under the
        // previous slot; the very first row falls back to TBA.
        let mut time = cell_span(0, "gensmall");
        if time.is_empty() {
            time = items
                .last()
                .map(|it| it.time.clone())
                .unwrap_or_else(|| s!(params::TBA));
        }

        let role = cell_span(1, "gen");
        let presenter = cell_span(2, "gen");
        let event = cell_span(3, "gensmall");

        let durations = cell_span(4, "gensmall");
        let mut parts = durations.split_whitespace();
        let duration_green = s!(parts.next().unwrap_or(""));
        let duration_amber = s!(parts.next().unwrap_or(""));
        let duration_red = s!(parts.next().unwrap_or(""));

        items.push(AgendaItem {
            time: time.clone(),
            role: role.clone(),
            presenter: presenter.clone(),
            event: event.clone(),
            duration_green: duration_green.clone(),
            duration_amber: duration_amber.clone(),
            duration_red: duration_red.clone(),
        });

        if role.contains("Speaker") {
            let (project, description) = details::project_and_description(dom, &rows, i);
            let speech_time = details::speaker_time(dom, row, &event, &project, &description)
                .unwrap_or_else(|| time.clone());
            speakers.push(Speaker {
                position: role,
                name: presenter,
                project,
                title: event,
                description,
                time: speech_time,
                duration_green,
                duration_amber,
                duration_red,
                evaluator: None,
            });
        }
    }

    debug!("agenda table: {} items, {} speakers", items.len(), speakers.len());
    (items, speakers)
}
