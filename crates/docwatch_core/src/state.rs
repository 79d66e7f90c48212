use std::collections::BTreeSet;
use std::time::Duration;

use crate::view_model::AppViewModel;

/// Opaque backend identifier for an uploaded document.
pub type DocumentId = String;

/// How long a notice is shown before the sink may drop it.
pub const NOTICE_DURATION: Duration = Duration::from_secs(5);

/// Backend-reported processing state of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStatus {
    Processing,
    Completed,
    Failed,
}

impl ProcessingStatus {
    /// The settled form of this status, if the document is done being polled.
    pub fn settled(self) -> Option<TerminalStatus> {
        match self {
            ProcessingStatus::Processing => None,
            ProcessingStatus::Completed => Some(TerminalStatus::Completed),
            ProcessingStatus::Failed => Some(TerminalStatus::Failed),
        }
    }
}

/// A status after which a document is no longer polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalStatus {
    Completed,
    Failed,
}

/// One answer from the per-document status endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub doc_id: DocumentId,
    pub filename: String,
    pub status: ProcessingStatus,
    pub error: Option<String>,
}

/// A document observed leaving the processing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutcome {
    pub doc_id: DocumentId,
    pub filename: String,
    pub status: TerminalStatus,
    pub error: Option<String>,
}

/// Aggregate backend counters, replaced wholesale on each successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemStats {
    pub total_documents: u64,
    pub processed_documents: u64,
    pub processing_documents: u64,
    pub failed_documents: u64,
    pub total_queries: u64,
}

/// The counters shown on the stats panel. `total_queries` is cached but has
/// no display slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatCounter {
    TotalDocuments,
    ProcessedDocuments,
    ProcessingDocuments,
    FailedDocuments,
}

impl StatCounter {
    pub const ALL: [StatCounter; 4] = [
        StatCounter::TotalDocuments,
        StatCounter::ProcessedDocuments,
        StatCounter::ProcessingDocuments,
        StatCounter::FailedDocuments,
    ];
}

impl SystemStats {
    pub fn counter(&self, counter: StatCounter) -> u64 {
        match counter {
            StatCounter::TotalDocuments => self.total_documents,
            StatCounter::ProcessedDocuments => self.processed_documents,
            StatCounter::ProcessingDocuments => self.processing_documents,
            StatCounter::FailedDocuments => self.failed_documents,
        }
    }
}

/// A displayed counter moving from its previous value to a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterChange {
    pub counter: StatCounter,
    pub from: u64,
    pub to: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Fire-and-forget user notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub duration: Duration,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NoticeKind::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NoticeKind::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NoticeKind::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NoticeKind::Error)
    }

    fn new(message: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            message: message.into(),
            kind,
            duration: NOTICE_DURATION,
        }
    }
}

/// One fan-out of status fetches. Settled outcomes are buffered here until
/// the last fetch of the cycle has answered.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PollCycle {
    outstanding: usize,
    settled: Vec<DocumentOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    online: bool,
    watched: BTreeSet<DocumentId>,
    poll: Option<PollCycle>,
    stats: Option<SystemStats>,
    stats_in_flight: bool,
    stats_fetch_failed: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            online: true,
            watched: BTreeSet::new(),
            poll: None,
            stats: None,
            stats_in_flight: false,
            stats_fetch_failed: false,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            online: self.online,
            watched: self.watched.iter().cloned().collect(),
            stats: self.stats,
            poll_in_flight: self.poll.is_some(),
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn online(&self) -> bool {
        self.online
    }

    /// Records a connectivity flip. Returns false when the value is unchanged.
    pub(crate) fn set_online(&mut self, online: bool) -> bool {
        if self.online == online {
            return false;
        }
        self.online = online;
        self.dirty = true;
        true
    }

    pub fn watched_count(&self) -> usize {
        self.watched.len()
    }

    /// Starts watching a document. Returns false when it was already watched.
    pub(crate) fn watch(&mut self, doc_id: DocumentId) -> bool {
        let inserted = self.watched.insert(doc_id);
        if inserted {
            self.dirty = true;
        }
        inserted
    }

    pub(crate) fn poll_in_flight(&self) -> bool {
        self.poll.is_some()
    }

    /// Opens a poll cycle over the current watch set and returns the ids to
    /// fetch. Callers guard against an empty set and an open cycle.
    pub(crate) fn begin_status_poll(&mut self) -> Vec<DocumentId> {
        let ids: Vec<DocumentId> = self.watched.iter().cloned().collect();
        self.poll = Some(PollCycle {
            outstanding: ids.len(),
            settled: Vec::new(),
        });
        ids
    }

    /// Books one fetch answer into the open cycle. A settled status releases
    /// the document from the watch set; `None` and `processing` leave it
    /// untouched. Returns the buffered outcomes once the cycle is complete.
    pub(crate) fn apply_status(
        &mut self,
        doc_id: &DocumentId,
        outcome: Option<DocumentRecord>,
    ) -> Option<Vec<DocumentOutcome>> {
        let cycle = self.poll.as_mut()?;
        cycle.outstanding = cycle.outstanding.saturating_sub(1);

        if let Some(record) = outcome {
            if let Some(status) = record.status.settled() {
                if self.watched.remove(doc_id) {
                    cycle.settled.push(DocumentOutcome {
                        doc_id: record.doc_id,
                        filename: record.filename,
                        status,
                        error: record.error,
                    });
                    self.dirty = true;
                }
            }
        }

        if self.poll.as_ref().is_some_and(|c| c.outstanding == 0) {
            self.poll.take().map(|cycle| cycle.settled)
        } else {
            None
        }
    }

    pub(crate) fn stats_in_flight(&self) -> bool {
        self.stats_in_flight
    }

    pub(crate) fn begin_stats_fetch(&mut self) {
        self.stats_in_flight = true;
    }

    /// Replaces the cached stats and reports which displayed counters moved.
    /// The displayed baseline is zero until the first successful fetch.
    pub(crate) fn apply_stats(&mut self, stats: SystemStats) -> Vec<CounterChange> {
        self.stats_in_flight = false;
        self.stats_fetch_failed = false;

        let previous = self.stats.unwrap_or_default();
        let changes: Vec<CounterChange> = StatCounter::ALL
            .into_iter()
            .filter_map(|counter| {
                let from = previous.counter(counter);
                let to = stats.counter(counter);
                (from != to).then_some(CounterChange { counter, from, to })
            })
            .collect();

        if self.stats.is_none() || !changes.is_empty() {
            self.dirty = true;
        }
        self.stats = Some(stats);
        changes
    }

    /// Records a failed stats fetch, keeping the cache. Returns true only on
    /// the transition into the failed state, so repeated failures stay quiet.
    pub(crate) fn note_stats_failure(&mut self) -> bool {
        self.stats_in_flight = false;
        !std::mem::replace(&mut self.stats_fetch_failed, true)
    }
}
