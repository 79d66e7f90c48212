//! Line-driven command front end: each stdin line becomes a message for the
//! core, mirroring how upload submissions and connectivity flips arrive from
//! the host environment.

use std::io::{self, BufRead};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use docwatch_backend::{file_kind, format_file_size, FileKind, UploadPolicy};
use docwatch_core::Msg;

pub enum Input {
    Msg(Msg),
    /// Print the cached statistics on demand.
    ShowStats,
    Quit,
}

pub fn spawn_reader(tx: mpsc::Sender<Input>, policy: UploadPolicy) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let input = match parse_command(&line) {
                Command::Track(doc_id) => Input::Msg(Msg::DocumentSubmitted { doc_id }),
                Command::Check(path) => {
                    run_check(&policy, Path::new(&path));
                    continue;
                }
                Command::Online => Input::Msg(Msg::ConnectivityChanged { online: true }),
                Command::Offline => Input::Msg(Msg::ConnectivityChanged { online: false }),
                Command::Stats => Input::ShowStats,
                Command::Quit => Input::Quit,
                Command::Blank => Input::Msg(Msg::NoOp),
                Command::Unknown => {
                    println!("commands: track <id>, check <path>, stats, online, offline, quit");
                    continue;
                }
            };
            if tx.send(input).is_err() {
                break;
            }
        }
        // Stdin closed; treat it as a quit request.
        let _ = tx.send(Input::Quit);
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Track(String),
    Check(String),
    Online,
    Offline,
    Stats,
    Quit,
    Blank,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Blank;
    }
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };
    match (word, rest) {
        ("track", doc_id) if !doc_id.is_empty() => Command::Track(doc_id.to_string()),
        ("check", path) if !path.is_empty() => Command::Check(path.to_string()),
        ("online", "") => Command::Online,
        ("offline", "") => Command::Offline,
        ("stats", "") => Command::Stats,
        ("quit", "") | ("exit", "") => Command::Quit,
        _ => Command::Unknown,
    }
}

fn run_check(policy: &UploadPolicy, path: &Path) {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let size = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(err) => {
            println!("check: cannot read {}: {}", path.display(), err);
            return;
        }
    };

    let violations = policy.check(name, size);
    if violations.is_empty() {
        println!(
            "{name}: ok ({}, {})",
            format_file_size(size),
            kind_label(file_kind(name))
        );
    } else {
        for violation in violations {
            println!("{name}: {violation}");
        }
    }
}

fn kind_label(kind: FileKind) -> &'static str {
    match kind {
        FileKind::Pdf => "pdf",
        FileKind::Image => "image",
        FileKind::Text => "text",
        FileKind::Other => "file",
    }
}
