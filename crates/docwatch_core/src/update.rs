use crate::{AppState, DocumentOutcome, Effect, Msg, Notice, TerminalStatus};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DocumentSubmitted { doc_id } => {
            state.watch(doc_id);
            Vec::new()
        }
        Msg::WatchRestored(doc_ids) => {
            for doc_id in doc_ids {
                state.watch(doc_id);
            }
            Vec::new()
        }
        Msg::StatusTick => {
            // Ticks are skipped, not queued: while a cycle is open a new one
            // would double-fetch and could settle the same document twice.
            if !state.online() || state.poll_in_flight() || state.watched_count() == 0 {
                return (state, Vec::new());
            }
            state
                .begin_status_poll()
                .into_iter()
                .map(|doc_id| Effect::FetchDocumentStatus { doc_id })
                .collect()
        }
        Msg::StatusFetched { doc_id, outcome } => {
            match state.apply_status(&doc_id, outcome) {
                Some(settled) => {
                    let mut effects = Vec::with_capacity(settled.len() * 2);
                    for outcome in settled {
                        let notice = settle_notice(&outcome);
                        effects.push(Effect::RenderDocumentStatus { outcome });
                        effects.push(Effect::Notify { notice });
                    }
                    effects
                }
                None => Vec::new(),
            }
        }
        Msg::StatsTick => {
            if !state.online() || state.stats_in_flight() {
                return (state, Vec::new());
            }
            state.begin_stats_fetch();
            vec![Effect::FetchSystemStats]
        }
        Msg::StatsFetched { outcome } => match outcome {
            Some(stats) => state
                .apply_stats(stats)
                .into_iter()
                .map(|change| Effect::AnimateCounter { change })
                .collect(),
            None => {
                if state.note_stats_failure() {
                    vec![Effect::Notify {
                        notice: Notice::error("Failed to update system statistics"),
                    }]
                } else {
                    Vec::new()
                }
            }
        },
        Msg::ConnectivityChanged { online } => {
            if !state.set_online(online) {
                return (state, Vec::new());
            }
            let notice = if online {
                Notice::success("Connection restored")
            } else {
                Notice::warning("Connection lost - some features may be unavailable")
            };
            vec![Effect::Notify { notice }]
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn settle_notice(outcome: &DocumentOutcome) -> Notice {
    match outcome.status {
        TerminalStatus::Completed => Notice::success(format!(
            "Document \"{}\" processed successfully",
            outcome.filename
        )),
        TerminalStatus::Failed => Notice::error(format!(
            "Document \"{}\" failed to process",
            outcome.filename
        )),
    }
}
