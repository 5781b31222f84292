//! # freight-advisor
//!
//! International freight quoting: route search, sea and air freight pricing,
//! landed cost with duty and VAT, mode recommendations, shipping documents,
//! and a memory of saved quotes and customer preferences.
//!
//! ## Specialists
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  request ──▶ Specialist::classify                              │
//! ├───────────────────────────────────────────────────────────────┤
//! │  quote_manager        save_quote, get_quote_history, ...       │
//! │  document_specialist  get_required_documents, get_hs_code_info │
//! │  cost_analyst         calculate_*_cost, compare_shipping_...   │
//! │  route_planner        search_*_routes, recommend_transport_... │
//! └───────────────────────────────────────────────────────────────┘
//!            │                                   │
//!            ▼                                   ▼
//!   ReferenceData (routes, rates,         QuoteStore (RwLock)
//!   regulations; read-only)
//! ```
//!
//! ## Example: 500 kg / 2 CBM, Tokyo → Shanghai
//!
//! ```text
//! Sea LCL  $488.00     3 days   ████
//! Air      $2,292.50   1 day    ███████████████████
//! Landed (sea, $15,000 machinery): $18,563.25
//! ```

pub mod catalog;
pub mod config;
pub mod documents;
pub mod error;
pub mod memory;
pub mod model;
pub mod pricing;
pub mod recommend;
pub mod route_finder;
pub mod specialist;
pub mod svckit;

use std::sync::Arc;

use agent_core::ToolRegistry;

pub use catalog::ReferenceData;
pub use config::{AdvisorConfig, CustomsPolicy};
pub use error::{AdvisorError, Result};
pub use memory::{MemoryQuoteStore, QuoteStore};
pub use model::{ContainerType, Incoterm, TransportMode, Urgency};
pub use pricing::{Cargo, CostBreakdown, LandedCostBreakdown};
pub use specialist::Specialist;

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{
        CompareOptionsTool,
        CustomerInfoTool,
        CustomsRegulationsTool,
        FreightCostTool,
        HsCodeTool,
        LandedCostTool,
        QuoteHistoryTool,
        RecommendTransportTool,
        RequiredDocumentsTool,
        RouteSearchTool,
        SaveCustomerInfoTool,
        SaveQuoteTool,
        ShippingChecklistTool,
    };
}

/// Register all fifteen specialist tools
pub fn register_all(
    registry: &mut ToolRegistry,
    data: Arc<ReferenceData>,
    store: Arc<dyn QuoteStore>,
    config: &AdvisorConfig,
) {
    use tools::*;

    registry.register(RouteSearchTool::sea(data.clone()));
    registry.register(RouteSearchTool::air(data.clone()));
    registry.register(RecommendTransportTool::new(data.clone()));

    registry.register(FreightCostTool::sea(data.clone()));
    registry.register(FreightCostTool::air(data.clone()));
    registry.register(LandedCostTool::new(data.clone(), config.customs_policy));
    registry.register(CompareOptionsTool::new(data.clone()));

    registry.register(RequiredDocumentsTool::new(data.clone()));
    registry.register(CustomsRegulationsTool::new(data.clone()));
    registry.register(HsCodeTool::new(data.clone()));
    registry.register(ShippingChecklistTool::new(data));

    registry.register(SaveQuoteTool::new(store.clone()));
    registry.register(QuoteHistoryTool::new(store.clone(), config.history_limit));
    registry.register(SaveCustomerInfoTool::new(store.clone()));
    registry.register(CustomerInfoTool::new(store));

    tracing::debug!(tools = registry.len(), "Specialist tools registered");
}

/// System prompt for the coordinating agent
pub const COORDINATOR_PROMPT: &str = r#"You are the Logistics Coordinator, leading a team of specialists for international shipping quotes.

## Your Team

1. **route_planner** - finds sea and air routes and recommends a transport mode
2. **cost_analyst** - calculates freight, landed cost, and compares options
3. **document_specialist** - shipping documents, customs regulations, HS codes, checklists
4. **quote_manager** - saves and retrieves quotes and customer information

## Delegation Rules

- Route questions → route_planner
- Cost and pricing questions → cost_analyst
- Document and customs questions → document_specialist
- Save / store / keep / 保存 a quote → quote_manager
- Quote history / 履歴 → quote_manager
- Customer information → quote_manager

When the user asks to save a quote, ALWAYS delegate to quote_manager.

Always be professional and provide complete information, including the
validity period of every quote. Respond in the same language as the user."#;
