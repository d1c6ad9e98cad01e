use serde::{Deserialize, Serialize};

/// Fan-out progress: one event per source that resolved successfully.
/// `total` is fixed at the number of registered sources for the run;
/// failed sources never advance `done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}
