// src/record.rs
//
// The normalized agenda record: what extraction produces and what the
// editor, JSON exporter and form notifier consume. Field names and order
// are the wire format of agenda.json; downstream slide templates key off
// them, so they are not free to change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetingInfo {
    pub club_name: String,
    pub district: String,
    pub division: String,
    pub area: String,
    pub club_number: String,
    pub meeting_date: String,
    /// Computed from `meeting_date` (+7 days), never scraped.
    pub next_meeting_date: String,
    pub word_of_the_day: String,
    pub venue: String,
    pub meeting_time: String,
    pub schedule: String,
    pub meeting_theme: String,
}

/// One row of the meeting schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgendaItem {
    pub time: String,
    pub role: String,
    pub presenter: String,
    pub event: String,
    pub duration_green: String,
    pub duration_amber: String,
    pub duration_red: String,
}

/// A prepared speech slot, derived from an agenda item whose role
/// mentions "Speaker". `evaluator` only exists after editor enrichment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub position: String,
    pub name: String,
    pub project: String,
    pub title: String,
    pub description: String,
    pub time: String,
    pub duration_green: String,
    pub duration_amber: String,
    pub duration_red: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluator: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub presenter: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgendaRecord {
    pub meeting_info: MeetingInfo,
    pub agenda_items: Vec<AgendaItem>,
    pub speakers: Vec<Speaker>,
    pub attending_members: Vec<String>,
    /// Page-supplied free text under the "Next Meeting" heading;
    /// independent of the computed next_meeting_date.
    pub next_meeting: String,
    pub structured_roles: BTreeMap<String, RoleEntry>,
}

/// The subset the editor hands back. Whole-field replacement only;
/// anything left as None keeps the extracted value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgendaEdits {
    #[serde(default)]
    pub speakers: Option<Vec<Speaker>>,
    #[serde(default)]
    pub structured_roles: Option<BTreeMap<String, RoleEntry>>,
}

impl AgendaRecord {
    /// Merge user edits by field-level replacement. meeting_info,
    /// agenda_items and attendance always survive as extracted.
    pub fn apply_edits(&mut self, edits: AgendaEdits) {
        if let Some(speakers) = edits.speakers {
            self.speakers = speakers;
        }
        if let Some(roles) = edits.structured_roles {
            self.structured_roles = roles;
        }
    }
}
