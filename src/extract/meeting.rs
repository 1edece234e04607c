// src/extract/meeting.rs
//
// Meeting header fields. All lookups are first-match-wins over the page's
// marker classes; anything absent stays an empty string.

use std::sync::OnceLock;

use log::{debug, warn};
use regex::Regex;

use crate::core::{Dom, Selector};
use crate::record::MeetingInfo;
use crate::{dates, params};

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)\s+\d+\w*\s+\w+\s+\d{4}",
        )
        .unwrap()
    })
}

fn time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{1,2}:\d{2}").unwrap())
}

pub fn extract(dom: &Dom) -> MeetingInfo {
    let mut info = MeetingInfo { meeting_theme: s!(params::NA), ..Default::default() };
    let root = dom.root();

    // Club identity: the page's main title link.
    if let Some(a) = dom.find(root, &Selector::tag("a").class("maintitle")) {
        info.club_name = dom.text(a);
    }

    let small_spans = dom.find_all(root, &Selector::tag("span").class("gensmall"));

    // District line: "District 107, Division J, Area 13, Club Number 1234567".
    // Positional split; a short line just leaves the tail fields empty.
    if let Some(&span) = small_spans.iter().find(|&&s| dom.text(s).contains("District")) {
        let text = dom.text(span);
        let parts: Vec<&str> = text.split(", ").collect();
        info.district = label_stripped(parts.first(), "District ");
        info.division = label_stripped(parts.get(1), "Division ");
        info.area = label_stripped(parts.get(2), "Area ");
        info.club_number = label_stripped(parts.get(3), "Club Number ");
    }

    // One pass over the post-body spans covers date, word of the day
    // and venue. The first span matching each wins.
    for &span in &dom.find_all(root, &Selector::tag("span").class("postbody")) {
        let text = dom.text(span);

        if info.meeting_date.is_empty() {
            if let Some(m) = date_re().find(&text) {
                info.meeting_date = s!(m.as_str());
                info.next_meeting_date = match dates::next_week(&info.meeting_date) {
                    Ok(d) => d,
                    Err(e) => {
                        // Non-fatal by contract: a bad date must not sink
                        // the rest of the extraction.
                        warn!("next meeting date projection failed: {e}");
                        s!(params::NA)
                    }
                };
            }
        }
        if info.word_of_the_day.is_empty() {
            if let Some((_, tail)) = text.split_once("Word of the Day") {
                info.word_of_the_day = s!(tail.trim());
            }
        }
        if info.venue.is_empty() && text.contains("Venue ") {
            info.venue = s!(text.replacen("Venue ", "", 1).trim());
        }
    }

    // Meeting time: first bold element carrying a clock time.
    for &b in &dom.find_all(root, &Selector::tag("b")) {
        let text = dom.text(b);
        if let Some(m) = time_re().find(&text) {
            info.meeting_time = s!(m.as_str());
            break;
        }
    }

    // Schedule line ("Every Tuesday ...").
    if let Some(&span) = small_spans.iter().find(|&&s| dom.text(s).contains("Every")) {
        info.schedule = dom.text(span);
    }

    debug!(
        "meeting header: club='{}' date='{}' time='{}'",
        info.club_name, info.meeting_date, info.meeting_time
    );
    info
}

/// Strip a label prefix off one positional part, first occurrence only.
/// A missing part is an empty string, never an index failure.
fn label_stripped(part: Option<&&str>, label: &str) -> String {
    part.map(|p| p.replacen(label, "", 1).trim().to_string())
        .unwrap_or_default()
}
