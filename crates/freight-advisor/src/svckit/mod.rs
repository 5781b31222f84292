//! Service Kit - Specialist Tools
//!
//! Implementations of `agent_core::Tool`, grouped by the specialist that
//! owns them. Domain failures come back as a `ToolResult` with a non-success
//! status; only framework problems surface as `AgentError`.

mod args;
mod cost_analyst;
mod document_specialist;
mod quote_manager;
mod route_planner;

pub use cost_analyst::{CompareOptionsTool, FreightCostTool, LandedCostTool};
pub use document_specialist::{
    CustomsRegulationsTool, HsCodeTool, RequiredDocumentsTool, ShippingChecklistTool,
};
pub use quote_manager::{CustomerInfoTool, QuoteHistoryTool, SaveCustomerInfoTool, SaveQuoteTool};
pub use route_planner::{RecommendTransportTool, RouteSearchTool};
