use crate::state::{DocumentId, DocumentRecord, SystemStats};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// An upload was handed to the backend; start watching its status.
    DocumentSubmitted { doc_id: DocumentId },
    /// Watch list restored from persisted state at startup.
    WatchRestored(Vec<DocumentId>),
    /// Periodic timer for per-document status polling.
    StatusTick,
    /// Backend answer for one watched document. `None` means the request
    /// failed and nothing was learned this tick.
    StatusFetched {
        doc_id: DocumentId,
        outcome: Option<DocumentRecord>,
    },
    /// Periodic timer for the aggregate statistics refresh.
    StatsTick,
    /// Backend answer for the statistics endpoint, absent on failure.
    StatsFetched { outcome: Option<SystemStats> },
    /// Connectivity flips reported by the host environment.
    ConnectivityChanged { online: bool },
    /// Fallback for input that maps to nothing.
    NoOp,
}
