// src/extract/mod.rs
//
// HTML → AgendaRecord. One hard failure mode (the input is not HTML);
// every other lookup defaults to an empty string or sentinel so a
// half-filled agenda page still yields a usable record.

mod agenda;
mod details;
mod meeting;
mod members;

use thiserror::Error;

use crate::core::{Dom, DomError};
use crate::record::AgendaRecord;
use crate::roles;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document is not parseable as HTML")]
    Document(#[from] DomError),
}

/// Extract a full agenda record from a saved easySpeak agenda page.
/// Pure and idempotent: same markup in, same record out.
pub fn agenda_record(html: &str) -> Result<AgendaRecord, ExtractError> {
    let dom = Dom::parse(html)?;

    let meeting_info = meeting::extract(&dom);
    let (agenda_items, speakers) = agenda::extract(&dom);
    let attending_members = members::attending(&dom);
    let next_meeting = members::next_meeting(&dom);
    let structured_roles = roles::structure(&agenda_items);

    Ok(AgendaRecord {
        meeting_info,
        agenda_items,
        speakers,
        attending_members,
        next_meeting,
        structured_roles,
    })
}
