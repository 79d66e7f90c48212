use docwatch_backend::{
    ClientEvent, ClientHandle, DocumentStatusPayload, StatusLabel, SystemStatsPayload,
};
use docwatch_core::{DocumentRecord, Effect, Msg, ProcessingStatus, SystemStats};
use watch_logging::watch_warn;

use crate::display::{NotificationSink, StatusPanel};

pub struct EffectRunner {
    client: ClientHandle,
    notifier: Box<dyn NotificationSink>,
    panel: Box<dyn StatusPanel>,
}

impl EffectRunner {
    pub fn new(
        client: ClientHandle,
        notifier: Box<dyn NotificationSink>,
        panel: Box<dyn StatusPanel>,
    ) -> Self {
        Self {
            client,
            notifier,
            panel,
        }
    }

    pub fn panel(&self) -> &dyn StatusPanel {
        self.panel.as_ref()
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchDocumentStatus { doc_id } => self.client.poll_document(doc_id),
                Effect::FetchSystemStats => self.client.poll_stats(),
                Effect::RenderDocumentStatus { outcome } => self.panel.document_settled(&outcome),
                Effect::AnimateCounter { change } => self.panel.roll_counter(change),
                Effect::Notify { notice } => self.notifier.notify(&notice),
            }
        }
    }

    /// Collects backend answers and translates them into core messages.
    /// Request failures were already logged by the client; here they become
    /// absent outcomes, which leave the document watched.
    pub fn drain_events(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.client.try_recv() {
            msgs.push(match event {
                ClientEvent::DocumentStatus { doc_id, result } => {
                    let outcome = result.ok().map(|payload| map_document(&doc_id, payload));
                    Msg::StatusFetched { doc_id, outcome }
                }
                ClientEvent::SystemStats { result } => Msg::StatsFetched {
                    outcome: result.ok().map(map_stats),
                },
            });
        }
        msgs
    }
}

fn map_document(doc_id: &str, payload: DocumentStatusPayload) -> DocumentRecord {
    if let (StatusLabel::Failed, Some(detail)) = (payload.status, payload.error.as_deref()) {
        watch_warn!("Document {} failed in processing: {}", doc_id, detail);
    }
    DocumentRecord {
        doc_id: doc_id.to_string(),
        filename: payload.filename,
        status: map_label(payload.status),
        error: payload.error,
    }
}

fn map_label(label: StatusLabel) -> ProcessingStatus {
    match label {
        StatusLabel::Processing => ProcessingStatus::Processing,
        StatusLabel::Completed => ProcessingStatus::Completed,
        StatusLabel::Failed => ProcessingStatus::Failed,
    }
}

fn map_stats(payload: SystemStatsPayload) -> SystemStats {
    SystemStats {
        total_documents: payload.total_documents,
        processed_documents: payload.processed_documents,
        processing_documents: payload.processing_documents,
        failed_documents: payload.failed_documents,
        total_queries: payload.total_queries,
    }
}
