//! Application State

use std::sync::Arc;

use agent_core::ToolRegistry;
use freight_advisor::{AdvisorConfig, QuoteStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// All specialist tools
    pub tools: Arc<ToolRegistry>,

    /// Quote memory; the same store the quote tools write to
    pub store: Arc<dyn QuoteStore>,

    pub config: Arc<AdvisorConfig>,
}
