use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use docwatch_backend::{ApiSettings, ClientHandle, ReqwestStatusApi, UploadPolicy};
use docwatch_core::{update, AppState, DocumentId, Msg};
use watch_logging::watch_info;

use crate::display::{ConsoleNotifier, ConsolePanel};
use crate::effects::EffectRunner;
use crate::input::{self, Input};
use crate::persistence;

/// How long the main loop waits on the input channel before draining
/// backend events.
const POLL_SLICE: Duration = Duration::from_millis(20);

pub struct RunSettings {
    pub api: ApiSettings,
    pub state_dir: PathBuf,
    pub status_interval: Duration,
    pub stats_interval: Duration,
    pub initial_documents: Vec<DocumentId>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            state_dir: PathBuf::from("."),
            status_interval: Duration::from_secs(5),
            stats_interval: Duration::from_secs(10),
            initial_documents: Vec::new(),
        }
    }
}

impl RunSettings {
    /// Base URL from `DOCWATCH_API`; command-line arguments are document ids
    /// to watch from the start.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(base_url) = std::env::var("DOCWATCH_API") {
            settings.api.base_url = base_url;
        }
        settings.initial_documents = std::env::args().skip(1).collect();
        settings
    }
}

pub fn run(settings: RunSettings) -> anyhow::Result<()> {
    let api = ReqwestStatusApi::new(settings.api.clone())?;
    let client = ClientHandle::new(Arc::new(api));
    let runner = EffectRunner::new(
        client,
        Box::new(ConsoleNotifier),
        Box::new(ConsolePanel::new()),
    );

    let (input_tx, input_rx) = mpsc::channel::<Input>();
    spawn_ticker(input_tx.clone(), settings.status_interval, Msg::StatusTick);
    spawn_ticker(input_tx.clone(), settings.stats_interval, Msg::StatsTick);
    input::spawn_reader(input_tx, UploadPolicy::default());

    let mut shell = Shell {
        state: AppState::new(),
        runner,
        state_dir: settings.state_dir,
    };

    let restored = persistence::load_watch_list(&shell.state_dir);
    if !restored.is_empty() {
        shell.dispatch(Msg::WatchRestored(restored));
    }
    for doc_id in settings.initial_documents {
        shell.dispatch(Msg::DocumentSubmitted { doc_id });
    }
    println!("docwatch ready, commands: track <id>, check <path>, stats, online, offline, quit");

    loop {
        let mut pending = Vec::new();
        match input_rx.recv_timeout(POLL_SLICE) {
            Ok(input) => pending.push(input),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
        while let Ok(input) = input_rx.try_recv() {
            pending.push(input);
        }

        for input in pending {
            match input {
                Input::Msg(msg) => shell.dispatch(msg),
                Input::ShowStats => shell.show(),
                Input::Quit => {
                    watch_info!("Shutting down");
                    return Ok(());
                }
            }
        }

        for msg in shell.runner.drain_events() {
            shell.dispatch(msg);
        }
    }

    Ok(())
}

struct Shell {
    state: AppState,
    runner: EffectRunner,
    state_dir: PathBuf,
}

impl Shell {
    fn dispatch(&mut self, msg: Msg) {
        let watched_before = self.state.view().watched;

        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);

        if self.state.consume_dirty() {
            let view = self.state.view();
            self.runner.panel().render(&view);
            if view.watched != watched_before {
                persistence::save_watch_list(&self.state_dir, &view.watched);
            }
        }
    }

    fn show(&self) {
        self.runner.panel().render(&self.state.view());
    }
}

fn spawn_ticker(tx: mpsc::Sender<Input>, interval: Duration, msg: Msg) {
    thread::spawn(move || {
        while tx.send(Input::Msg(msg.clone())).is_ok() {
            thread::sleep(interval);
        }
    });
}
