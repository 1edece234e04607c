// src/notify.rs
//
// Push the week's speaker and evaluator names to the club's Google
// Apps Script form endpoints so the feedback dropdowns stay current.
// Delivery is fire-and-forget: the endpoints answer with an HTML shim
// we never read, and a dead endpoint must not fail the run.

use std::{collections::HashSet, thread, time::Duration};

use log::{debug, warn};
use reqwest::blocking::Client;
use serde_json::json;

use crate::params::{
    EVALUATOR_FORM, FEEDBACK_FORM, HTTP_TIMEOUT_SECS, SPEAKER_FORM, TABLE_TOPICS_FORM,
};
use crate::record::AgendaRecord;

pub struct FormTargets {
    pub feedback: String,
    pub speaker: String,
    pub evaluator: String,
    pub table_topics: String,
}

impl Default for FormTargets {
    fn default() -> Self {
        FormTargets {
            feedback: s!(FEEDBACK_FORM),
            speaker: s!(SPEAKER_FORM),
            evaluator: s!(EVALUATOR_FORM),
            table_topics: s!(TABLE_TOPICS_FORM),
        }
    }
}

/// Speaker names in agenda order, blanks and "TBA" dropped, deduplicated.
pub fn speaker_options(record: &AgendaRecord) -> Vec<String> {
    let mut seen = HashSet::new();
    record
        .speakers
        .iter()
        .map(|sp| sp.name.clone())
        .filter(|name| !name.is_empty() && name != "TBA")
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Evaluator names: presenters of evaluation slots, plus any evaluators
/// the editor attached to speakers; deduplicated in encounter order.
pub fn evaluator_options(record: &AgendaRecord) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    let from_items = record
        .agenda_items
        .iter()
        .filter(|item| {
            item.event.contains("Evaluate speech") || item.event.contains("Table Topics Evaluator")
        })
        .map(|item| item.presenter.clone());
    let from_speakers = record
        .speakers
        .iter()
        .filter_map(|sp| sp.evaluator.clone());

    for name in from_items.chain(from_speakers) {
        if !name.is_empty() && name != "TBA" && seen.insert(name.clone()) {
            out.push(name);
        }
    }
    out
}

pub fn update_forms(record: &AgendaRecord) {
    update_forms_at(&FormTargets::default(), record);
}

/// One POST per endpoint, each on its own thread; joined so the CLI can
/// report completion, but individual failures are only logged.
pub fn update_forms_at(targets: &FormTargets, record: &AgendaRecord) {
    let speakers = speaker_options(record);
    let evaluators = evaluator_options(record);

    let jobs = vec![
        (targets.feedback.clone(), speakers.clone()),
        (targets.speaker.clone(), speakers),
        (targets.evaluator.clone(), evaluators),
        (targets.table_topics.clone(), vec![s!("None")]),
    ];

    let handles: Vec<_> = jobs
        .into_iter()
        .map(|(url, options)| thread::spawn(move || post_options(&url, &options)))
        .collect();
    for h in handles {
        let _ = h.join();
    }
}

fn post_options(url: &str, options: &[String]) {
    let client = match Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            warn!("form client build failed: {e}");
            return;
        }
    };
    match client.post(url).json(&json!({ "options": options })).send() {
        Ok(resp) => debug!("form update {url}: HTTP {}", resp.status()),
        Err(e) => warn!("form update {url} failed: {e}"),
    }
}
