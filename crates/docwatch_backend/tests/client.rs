use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use docwatch_backend::{
    ApiError, ApiFailure, ClientEvent, ClientHandle, DocumentStatusPayload, StatusApi, StatusLabel,
    SystemStatsPayload,
};

struct ScriptedApi {
    statuses: HashMap<String, DocumentStatusPayload>,
}

#[async_trait::async_trait]
impl StatusApi for ScriptedApi {
    async fn document_status(&self, doc_id: &str) -> Result<DocumentStatusPayload, ApiError> {
        self.statuses.get(doc_id).cloned().ok_or_else(|| ApiError {
            kind: ApiFailure::HttpStatus(404),
            message: "not found".to_string(),
        })
    }

    async fn system_stats(&self) -> Result<SystemStatsPayload, ApiError> {
        Ok(SystemStatsPayload {
            total_documents: 1,
            processed_documents: 1,
            ..SystemStatsPayload::default()
        })
    }
}

fn drain(handle: &ClientHandle, expected: usize) -> Vec<ClientEvent> {
    let deadline = Instant::now() + Duration::from_secs(2);
    let mut events = Vec::new();
    while events.len() < expected && Instant::now() < deadline {
        match handle.try_recv() {
            Some(event) => events.push(event),
            None => std::thread::sleep(Duration::from_millis(10)),
        }
    }
    events
}

#[test]
fn commands_answer_as_events() {
    watch_logging::initialize_for_tests();

    let mut statuses = HashMap::new();
    statuses.insert(
        "42".to_string(),
        DocumentStatusPayload {
            filename: "report.pdf".to_string(),
            status: StatusLabel::Completed,
            error: None,
        },
    );
    let handle = ClientHandle::new(Arc::new(ScriptedApi { statuses }));

    handle.poll_document("42");
    handle.poll_document("missing");
    handle.poll_stats();

    let events = drain(&handle, 3);
    assert_eq!(events.len(), 3);

    let mut completed = 0;
    let mut absent = 0;
    let mut stats = 0;
    for event in events {
        match event {
            ClientEvent::DocumentStatus { doc_id, result } if doc_id == "42" => {
                assert_eq!(result.expect("payload").status, StatusLabel::Completed);
                completed += 1;
            }
            ClientEvent::DocumentStatus { result, .. } => {
                assert_eq!(result.unwrap_err().kind, ApiFailure::HttpStatus(404));
                absent += 1;
            }
            ClientEvent::SystemStats { result } => {
                assert_eq!(result.expect("payload").total_documents, 1);
                stats += 1;
            }
        }
    }
    assert_eq!((completed, absent, stats), (1, 1, 1));
}
