use crate::state::{DocumentId, SystemStats};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub online: bool,
    /// Watched ids in ascending order.
    pub watched: Vec<DocumentId>,
    pub stats: Option<SystemStats>,
    pub poll_in_flight: bool,
}
