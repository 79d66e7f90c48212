use crate::state::{CounterChange, DocumentId, DocumentOutcome, Notice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the backend for one watched document's processing status.
    FetchDocumentStatus { doc_id: DocumentId },
    /// Ask the backend for fresh aggregate statistics.
    FetchSystemStats,
    /// Update whatever surface shows this document, now that it settled.
    RenderDocumentStatus { outcome: DocumentOutcome },
    /// Roll a stats counter from its last displayed value to a new one.
    AnimateCounter { change: CounterChange },
    /// Fire-and-forget user notification.
    Notify { notice: Notice },
}
