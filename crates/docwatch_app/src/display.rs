//! Console implementations of the notification and status-panel sinks.

use std::io::Write;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::Local;
use docwatch_core::{
    AppViewModel, CounterChange, DocumentOutcome, Notice, NoticeKind, StatCounter, TerminalStatus,
};

/// Fire-and-forget notification surface.
pub trait NotificationSink: Send {
    fn notify(&self, notice: &Notice);
}

/// Side-effecting display surface the watcher reports into.
pub trait StatusPanel: Send {
    fn document_settled(&self, outcome: &DocumentOutcome);
    fn roll_counter(&self, change: CounterChange);
    fn render(&self, view: &AppViewModel);
}

pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        let stamp = Local::now().format("%H:%M:%S");
        println!("[{stamp}] {} {}", tag(notice.kind), notice.message);
    }
}

fn tag(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Info => "info:",
        NoticeKind::Success => "ok:",
        NoticeKind::Warning => "warn:",
        NoticeKind::Error => "error:",
    }
}

/// Counter rolls take this long regardless of how far the value moves.
const ROLL_DURATION: Duration = Duration::from_secs(1);
/// A roll never prints more intermediate values than this.
const MAX_ROLL_STEPS: u64 = 20;

pub struct ConsolePanel {
    rolls: mpsc::Sender<CounterChange>,
}

impl ConsolePanel {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<CounterChange>();
        // One worker so concurrent rolls do not interleave on stdout.
        thread::spawn(move || {
            while let Ok(change) = rx.recv() {
                play_roll(&change);
            }
        });
        Self { rolls: tx }
    }
}

impl StatusPanel for ConsolePanel {
    fn document_settled(&self, outcome: &DocumentOutcome) {
        let status = match outcome.status {
            TerminalStatus::Completed => "completed",
            TerminalStatus::Failed => "failed",
        };
        println!("document {} ({}) is {status}", outcome.doc_id, outcome.filename);
    }

    fn roll_counter(&self, change: CounterChange) {
        let _ = self.rolls.send(change);
    }

    fn render(&self, view: &AppViewModel) {
        if view.watched.is_empty() {
            println!("watching: none");
        } else {
            println!("watching: {}", view.watched.join(", "));
        }
        if !view.online {
            println!("(offline)");
        }
        if let Some(stats) = view.stats {
            println!(
                "documents: {} total, {} processed, {} processing, {} failed",
                stats.total_documents,
                stats.processed_documents,
                stats.processing_documents,
                stats.failed_documents
            );
        }
    }
}

fn play_roll(change: &CounterChange) {
    let label = counter_label(change.counter);
    let mut out = std::io::stdout();
    for (value, pause) in roll_steps(change.from, change.to, ROLL_DURATION) {
        thread::sleep(pause);
        let _ = write!(out, "\r{label}: {value}");
        let _ = out.flush();
    }
    let _ = writeln!(out);
}

fn counter_label(counter: StatCounter) -> &'static str {
    match counter {
        StatCounter::TotalDocuments => "total documents",
        StatCounter::ProcessedDocuments => "processed documents",
        StatCounter::ProcessingDocuments => "processing documents",
        StatCounter::FailedDocuments => "failed documents",
    }
}

/// Evenly spaced intermediate values ending exactly at `to`, with the pause
/// to take before each one. At most `MAX_ROLL_STEPS` entries; an unchanged
/// counter yields none.
fn roll_steps(from: u64, to: u64, total: Duration) -> Vec<(u64, Duration)> {
    if from == to {
        return Vec::new();
    }
    let range = from.abs_diff(to);
    let steps = range.min(MAX_ROLL_STEPS);
    let pause = total / steps as u32;

    (1..=steps)
        .map(|step| {
            let offset = range * step / steps;
            let value = if to >= from { from + offset } else { from - offset };
            (value, pause)
        })
        .collect()
}
