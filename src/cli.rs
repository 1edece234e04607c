// src/cli.rs

use std::{
    env,
    error::Error,
    fs,
    io::Read,
    path::PathBuf,
};

use crate::params::{DEFAULT_OUT_FILE, NA};
use crate::record::{AgendaEdits, AgendaRecord};
use crate::{export, extract, notify};

pub struct Params {
    pub input: Option<PathBuf>, // None = read stdin
    pub out: PathBuf,
    pub theme: Option<String>,
    pub edits: Option<PathBuf>,
    pub notify: bool,
    pub print_roles: bool,
}

impl Params {
    pub fn new() -> Self {
        Self {
            input: None,
            out: PathBuf::from(DEFAULT_OUT_FILE),
            theme: None,
            edits: None,
            notify: false,
            print_roles: false,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let params = parse_cli(env::args().skip(1))?;

    let html = match &params.input {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("could not read {}: {}", path.display(), e))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    if html.trim().is_empty() {
        return Err("no HTML content provided".into());
    }

    let mut record = extract::agenda_record(&html)?;
    record.meeting_info.meeting_theme = params
        .theme
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| s!(NA));

    if let Some(edits_path) = &params.edits {
        let raw = fs::read_to_string(edits_path)
            .map_err(|e| format!("could not read {}: {}", edits_path.display(), e))?;
        let edits: AgendaEdits = serde_json::from_str(&raw)?;
        record.apply_edits(edits);
    }

    if params.print_roles {
        print_summary(&record);
    }

    let written = export::write_json(&params.out, &record)?;
    println!("Wrote {}", written.display());

    if params.notify {
        println!("Updating forms…");
        notify::update_forms(&record);
    }
    Ok(())
}

pub fn parse_cli(args: impl Iterator<Item = String>) -> Result<Params, Box<dyn Error>> {
    let mut params = Params::new();
    let mut args = args;
    while let Some(a) = args.next() {
        match a.as_str() {
            "-o" | "--out" => {
                params.out = PathBuf::from(args.next().ok_or("Missing output path")?);
            }
            "--theme" => params.theme = Some(args.next().ok_or("Missing value for --theme")?),
            "--edits" => {
                params.edits = Some(PathBuf::from(args.next().ok_or("Missing value for --edits")?));
            }
            "--notify" => params.notify = true,
            "--print-roles" => params.print_roles = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            other if !other.starts_with('-') => {
                if params.input.is_some() {
                    return Err(format!("Unexpected extra input: {}", other).into());
                }
                params.input = Some(PathBuf::from(other));
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }
    Ok(params)
}

fn print_summary(record: &AgendaRecord) {
    println!("--- Roles and Presenters ---");
    for (role, entry) in &record.structured_roles {
        println!("{}: {}", role, entry.presenter);
    }

    println!("--- Speakers ---");
    for (i, sp) in record.speakers.iter().enumerate() {
        println!(
            "Speaker {}: {}, Project: '{}', Title: '{}', Description: '{}'",
            i + 1,
            sp.name,
            sp.project,
            sp.title,
            sp.description
        );
    }

    println!("Meeting Date: {}", record.meeting_info.meeting_date);
    println!("Next Meeting Date: {}", record.meeting_info.next_meeting_date);
    println!("Word of the Day: {}", record.meeting_info.word_of_the_day);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> std::vec::IntoIter<String> {
        args.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn defaults_are_stdin_to_agenda_json() {
        let p = parse_cli(argv(&[])).unwrap();
        assert!(p.input.is_none());
        assert_eq!(p.out, PathBuf::from("agenda.json"));
        assert!(!p.notify);
    }

    #[test]
    fn positional_input_and_flags() {
        let p = parse_cli(argv(&[
            "page.html", "-o", "out/agenda.json", "--theme", "Gratitude", "--notify",
        ]))
        .unwrap();
        assert_eq!(p.input, Some(PathBuf::from("page.html")));
        assert_eq!(p.out, PathBuf::from("out/agenda.json"));
        assert_eq!(p.theme.as_deref(), Some("Gratitude"));
        assert!(p.notify);
    }

    #[test]
    fn rejects_unknown_and_duplicate_args() {
        assert!(parse_cli(argv(&["--bogus"])).is_err());
        assert!(parse_cli(argv(&["a.html", "b.html"])).is_err());
        assert!(parse_cli(argv(&["--out"])).is_err());
    }
}
