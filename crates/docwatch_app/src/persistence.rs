use std::fs;
use std::io::Write;
use std::path::Path;

use docwatch_core::DocumentId;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use watch_logging::{watch_error, watch_info, watch_warn};

const STATE_FILENAME: &str = ".docwatch_state.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedState {
    watched: Vec<String>,
}

pub(crate) fn load_watch_list(dir: &Path) -> Vec<DocumentId> {
    let path = dir.join(STATE_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Vec::new();
        }
        Err(err) => {
            watch_warn!("Failed to read persisted state from {:?}: {}", path, err);
            return Vec::new();
        }
    };

    let state: PersistedState = match ron::from_str(&content) {
        Ok(state) => state,
        Err(err) => {
            watch_warn!("Failed to parse persisted state from {:?}: {}", path, err);
            return Vec::new();
        }
    };

    watch_info!("Loaded persisted watch list from {:?}", path);
    state.watched
}

pub(crate) fn save_watch_list(dir: &Path, watched: &[DocumentId]) {
    let state = PersistedState {
        watched: watched.to_vec(),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&state, pretty) {
        Ok(text) => text,
        Err(err) => {
            watch_error!("Failed to serialize persisted state: {}", err);
            return;
        }
    };

    if let Err(err) = write_atomic(dir, &content) {
        watch_error!("Failed to write persisted state to {:?}: {}", dir, err);
    }
}

// Temp file then rename, so a crash cannot leave a torn state file.
fn write_atomic(dir: &Path, content: &str) -> std::io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(dir.join(STATE_FILENAME)).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn watch_list_round_trips() {
        let dir = tempdir().expect("tempdir");
        let watched = vec!["doc-1".to_string(), "doc-2".to_string()];

        save_watch_list(dir.path(), &watched);
        assert_eq!(load_watch_list(dir.path()), watched);
    }

    #[test]
    fn a_missing_file_loads_as_empty() {
        let dir = tempdir().expect("tempdir");
        assert!(load_watch_list(dir.path()).is_empty());
    }

    #[test]
    fn a_corrupt_file_loads_as_empty() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join(STATE_FILENAME), "not ron at all {{{").expect("write");

        assert!(load_watch_list(dir.path()).is_empty());
    }

    #[test]
    fn saving_twice_keeps_the_latest_list() {
        let dir = tempdir().expect("tempdir");
        save_watch_list(dir.path(), &["doc-1".to_string()]);
        save_watch_list(dir.path(), &[]);

        assert!(load_watch_list(dir.path()).is_empty());
    }
}
