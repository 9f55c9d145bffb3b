// crates/seclens-server/src/web/state.rs
// Web server state management

use std::sync::Arc;
use std::time::Duration;

use crate::analysis::Analyzer;
use crate::config::env::DEFAULT_ANALYZE_DELAY_MS;

/// Shared application state. Read-only after startup; requests share
/// nothing mutable.
#[derive(Clone)]
pub struct AppState {
    /// Prompt/response adapter
    pub analyzer: Arc<Analyzer>,

    /// Simulated processing latency applied before each analysis
    pub analyze_delay: Duration,
}

impl AppState {
    /// Create new application state with the default delay
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            analyze_delay: Duration::from_millis(DEFAULT_ANALYZE_DELAY_MS),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.analyze_delay = delay;
        self
    }
}
