use std::sync::{mpsc, Arc};
use std::thread;

use watch_logging::watch_warn;

use crate::api::StatusApi;
use crate::{ApiError, DocumentStatusPayload, SystemStatsPayload};

enum ClientCommand {
    PollDocument { doc_id: String },
    PollStats,
}

#[derive(Debug)]
pub enum ClientEvent {
    DocumentStatus {
        doc_id: String,
        result: Result<DocumentStatusPayload, ApiError>,
    },
    SystemStats {
        result: Result<SystemStatsPayload, ApiError>,
    },
}

/// Runs status requests on a dedicated runtime thread. Commands fan out as
/// independent tasks, so one slow document cannot hold back the answers for
/// the others.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientHandle {
    pub fn new(api: Arc<dyn StatusApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn poll_document(&self, doc_id: impl Into<String>) {
        let _ = self.cmd_tx.send(ClientCommand::PollDocument {
            doc_id: doc_id.into(),
        });
    }

    pub fn poll_stats(&self) {
        let _ = self.cmd_tx.send(ClientCommand::PollStats);
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    api: &dyn StatusApi,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    match command {
        ClientCommand::PollDocument { doc_id } => {
            let result = api.document_status(&doc_id).await;
            if let Err(err) = &result {
                watch_warn!("document-status request for {} failed: {}", doc_id, err);
            }
            let _ = event_tx.send(ClientEvent::DocumentStatus { doc_id, result });
        }
        ClientCommand::PollStats => {
            let result = api.system_stats().await;
            if let Err(err) = &result {
                watch_warn!("system-stats request failed: {}", err);
            }
            let _ = event_tx.send(ClientEvent::SystemStats { result });
        }
    }
}
