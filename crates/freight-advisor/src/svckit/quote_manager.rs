//! Quote Manager Tools
//!
//! Saving and reading back quotes and customer preferences. All four tools
//! share one injected [`QuoteStore`].

use std::sync::Arc;
use async_trait::async_trait;
use serde_json::json;

use agent_core::{
    Tool, ToolSchema, ToolCall, ToolResult, ToolStatus,
    tool::ParameterSchema,
    Result as CoreResult,
};

use super::args::{data_map, error_result, required_decimal, required_str};
use crate::error::Result;
use crate::memory::{NewQuote, QuoteStore};
use crate::model::TransportMode;

pub struct SaveQuoteTool {
    store: Arc<dyn QuoteStore>,
}

impl SaveQuoteTool {
    pub const NAME: &'static str = "save_quote";

    pub fn new(store: Arc<dyn QuoteStore>) -> Self {
        Self { store }
    }

    async fn run(&self, call: &ToolCall) -> Result<ToolResult> {
        let mode: TransportMode = required_str(call, "transport_mode")?.parse()?;
        let quote = NewQuote {
            customer_id: required_str(call, "customer_id")?.to_string(),
            origin: required_str(call, "origin")?.to_string(),
            destination: required_str(call, "destination")?.to_string(),
            cargo_description: required_str(call, "cargo_desc")?.to_string(),
            total_cost: required_decimal(call, "total_cost")?,
            mode,
        };

        let record = self.store.append(quote).await?;
        tracing::info!(tool = Self::NAME, quote_id = %record.quote_id, customer_id = %record.customer_id, "Quote stored");

        let output = format!(
            "Quote {} saved for customer {}\n{} → {} ({}) ${:.2}, valid until {}\n",
            record.quote_id,
            record.customer_id,
            record.origin,
            record.destination,
            record.mode,
            record.total_cost,
            record.valid_until
        );
        Ok(ToolResult::success(Self::NAME, output).with_data(data_map(ToolStatus::Success, &record)?))
    }
}

#[async_trait]
impl Tool for SaveQuoteTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Save a shipping quote for a customer; returns the quote ID and validity.".into(),
            parameters: vec![
                ParameterSchema::required("customer_id", "string", "Customer identifier"),
                ParameterSchema::required("origin", "string", "Origin (e.g., 'Tokyo, Japan')"),
                ParameterSchema::required("destination", "string", "Destination (e.g., 'Shanghai, China')"),
                ParameterSchema::required("cargo_desc", "string", "Cargo description"),
                ParameterSchema::required("total_cost", "number", "Quoted total in USD"),
                ParameterSchema::required("transport_mode", "string", "Transport mode")
                    .with_enum(["sea", "air"]),
            ],
            category: Some("quotes".into()),
            has_side_effects: true,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        Ok(self.run(call).await.unwrap_or_else(|e| error_result(Self::NAME, &e)))
    }
}

pub struct QuoteHistoryTool {
    store: Arc<dyn QuoteStore>,
    limit: usize,
}

impl QuoteHistoryTool {
    pub const NAME: &'static str = "get_quote_history";

    /// `limit` caps how many of the most recent quotes are returned
    pub fn new(store: Arc<dyn QuoteStore>, limit: usize) -> Self {
        Self { store, limit }
    }

    async fn run(&self, call: &ToolCall) -> Result<ToolResult> {
        let customer_id = call.str_arg("customer_id");
        let history = self.store.history(customer_id, self.limit).await;
        tracing::info!(
            tool = Self::NAME,
            customer_id = customer_id.unwrap_or("*"),
            total = history.total,
            returned = history.quotes.len(),
            "Quote history read"
        );

        if history.quotes.is_empty() {
            let message = match customer_id {
                Some(id) => format!("No quotes found for customer {}", id),
                None => "No quotes saved yet".to_string(),
            };
            return Ok(ToolResult::with_status(Self::NAME, ToolStatus::NotFound, message.clone())
                .with_data(json!({ "status": ToolStatus::NotFound, "message": message, "total": 0 })));
        }

        let mut output = format!("Showing {} of {} quotes\n", history.quotes.len(), history.total);
        for quote in &history.quotes {
            output.push_str(&format!(
                "  {} [{}] {} → {} {} ${:.2} (valid until {})\n",
                quote.quote_id,
                quote.customer_id,
                quote.origin,
                quote.destination,
                quote.mode.as_str(),
                quote.total_cost,
                quote.valid_until
            ));
        }

        Ok(ToolResult::success(Self::NAME, output).with_data(data_map(ToolStatus::Success, &history)?))
    }
}

#[async_trait]
impl Tool for QuoteHistoryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: format!(
                "Get the {} most recent quotes, optionally for one customer.",
                self.limit
            ),
            parameters: vec![ParameterSchema::optional(
                "customer_id",
                "string",
                "Only quotes of this customer",
            )],
            category: Some("quotes".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        Ok(self.run(call).await.unwrap_or_else(|e| error_result(Self::NAME, &e)))
    }
}

pub struct SaveCustomerInfoTool {
    store: Arc<dyn QuoteStore>,
}

impl SaveCustomerInfoTool {
    pub const NAME: &'static str = "save_customer_info";

    pub fn new(store: Arc<dyn QuoteStore>) -> Self {
        Self { store }
    }

    async fn run(&self, call: &ToolCall) -> Result<ToolResult> {
        let customer_id = required_str(call, "customer_id")?;
        let key = required_str(call, "info_type")?;
        let value = required_str(call, "value")?;

        let record = self.store.upsert_preference(customer_id, key, value).await?;

        let output = format!("Saved {} = {} for customer {}", key, record.value, customer_id);
        Ok(ToolResult::success(Self::NAME, output).with_data(json!({
            "status": ToolStatus::Success,
            "customer_id": customer_id,
            "info_type": key,
            "value": record.value,
            "saved_at": record.saved_at,
        })))
    }
}

#[async_trait]
impl Tool for SaveCustomerInfoTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Save a piece of customer information or preference.".into(),
            parameters: vec![
                ParameterSchema::required("customer_id", "string", "Customer identifier"),
                ParameterSchema::required(
                    "info_type",
                    "string",
                    "Kind of information (e.g., 'preferred_mode', 'company_name')",
                ),
                ParameterSchema::required("value", "string", "Value to store"),
            ],
            category: Some("quotes".into()),
            has_side_effects: true,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        Ok(self.run(call).await.unwrap_or_else(|e| error_result(Self::NAME, &e)))
    }
}

pub struct CustomerInfoTool {
    store: Arc<dyn QuoteStore>,
}

impl CustomerInfoTool {
    pub const NAME: &'static str = "get_customer_info";

    pub fn new(store: Arc<dyn QuoteStore>) -> Self {
        Self { store }
    }

    async fn run(&self, call: &ToolCall) -> Result<ToolResult> {
        let customer_id = required_str(call, "customer_id")?;

        let Some(preferences) = self.store.preferences(customer_id).await else {
            tracing::info!(tool = Self::NAME, customer_id = %customer_id, "Customer unknown");
            let message = format!("No information stored for customer {}", customer_id);
            return Ok(ToolResult::with_status(Self::NAME, ToolStatus::NotFound, message.clone())
                .with_data(json!({ "status": ToolStatus::NotFound, "message": message })));
        };

        tracing::info!(tool = Self::NAME, customer_id = %customer_id, entries = preferences.len(), "Customer info read");

        let mut output = format!("Customer {}\n", customer_id);
        for (key, pref) in &preferences {
            output.push_str(&format!("  {}: {} (saved {})\n", key, pref.value, pref.saved_at.format("%Y-%m-%d %H:%M")));
        }

        Ok(ToolResult::success(Self::NAME, output).with_data(json!({
            "status": ToolStatus::Success,
            "customer_id": customer_id,
            "info": preferences,
        })))
    }
}

#[async_trait]
impl Tool for CustomerInfoTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Retrieve the stored information and preferences of a customer.".into(),
            parameters: vec![ParameterSchema::required("customer_id", "string", "Customer identifier")],
            category: Some("quotes".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        Ok(self.run(call).await.unwrap_or_else(|e| error_result(Self::NAME, &e)))
    }
}
