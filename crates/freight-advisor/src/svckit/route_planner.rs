//! Route Planner Tools
//!
//! Route search per mode and the transport-mode recommendation.

use std::sync::Arc;
use async_trait::async_trait;
use serde_json::json;

use agent_core::{
    Tool, ToolSchema, ToolCall, ToolResult, ToolStatus,
    tool::ParameterSchema,
    Result as CoreResult,
};

use super::args::{self, data_map, error_result, required_str};
use crate::catalog::ReferenceData;
use crate::error::Result;
use crate::model::{TransportMode, Urgency};
use crate::recommend::recommend;
use crate::route_finder::{find_routes, RouteQuery, RouteSearch};

/// Searches the route table of one transport mode
pub struct RouteSearchTool {
    data: Arc<ReferenceData>,
    mode: TransportMode,
}

impl RouteSearchTool {
    pub fn sea(data: Arc<ReferenceData>) -> Self {
        Self { data, mode: TransportMode::Sea }
    }

    pub fn air(data: Arc<ReferenceData>) -> Self {
        Self { data, mode: TransportMode::Air }
    }

    fn name(&self) -> &'static str {
        match self.mode {
            TransportMode::Sea => "search_sea_routes",
            TransportMode::Air => "search_air_routes",
        }
    }

    fn search(&self, call: &ToolCall) -> Result<ToolResult> {
        let mut query = RouteQuery::new(
            required_str(call, "origin_country")?,
            required_str(call, "destination_country")?,
        );
        if let Some(port) = call.str_arg("origin_port") {
            query = query.origin_port(port);
        }
        if let Some(port) = call.str_arg("destination_port") {
            query = query.destination_port(port);
        }

        let search = find_routes(&self.data, self.mode, &query);
        tracing::info!(
            tool = self.name(),
            origin = %query.origin_country,
            destination = %query.destination_country,
            routes = search.routes().len(),
            "Route search"
        );

        let lane = format!("{} to {}", query.origin_country, query.destination_country);
        let routes = match search {
            RouteSearch::Found(routes) => routes,
            RouteSearch::NotFound => {
                let other = match self.mode {
                    TransportMode::Sea => TransportMode::Air,
                    TransportMode::Air => TransportMode::Sea,
                };
                let message = format!("No {} routes found from {}", self.mode.as_str(), lane);
                let suggestion = format!(
                    "Try {} or check nearby ports for alternative routes.",
                    other.label().to_lowercase()
                );
                return Ok(ToolResult::with_status(
                    self.name(),
                    ToolStatus::NoRoutesFound,
                    format!("{}. {}", message, suggestion),
                )
                .with_data(json!({
                    "status": ToolStatus::NoRoutesFound,
                    "message": message,
                    "suggestion": suggestion,
                })));
            }
        };

        let mut output = format!("{} routes from {} ({} found)\n", self.mode.label(), lane, routes.len());
        output.push_str("═".repeat(60).as_str());
        output.push('\n');
        for route in &routes {
            output.push_str(&format!(
                "{}: {} → {} | {} days | {} | {} | via {}\n",
                route.id,
                route.origin,
                route.destination,
                route.transit_time_days,
                route.frequency,
                route.carriers.join(", "),
                route.via_or_direct(),
            ));
        }

        let data = json!({
            "status": ToolStatus::Success,
            "route_count": routes.len(),
            "routes": routes,
        });
        Ok(ToolResult::success(self.name(), output).with_data(data))
    }

    fn origin_port_description(&self) -> &'static str {
        match self.mode {
            TransportMode::Sea => "Origin port name filter (e.g., 'Tokyo')",
            TransportMode::Air => "Origin airport name filter (e.g., 'Narita')",
        }
    }
}

#[async_trait]
impl Tool for RouteSearchTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().into(),
            description: format!(
                "Search {} routes between two countries, with transit times, frequency and carriers.",
                self.mode.as_str()
            ),
            parameters: vec![
                ParameterSchema::required("origin_country", "string", "Origin country (e.g., 'Japan')"),
                ParameterSchema::required("destination_country", "string", "Destination country (e.g., 'China')"),
                ParameterSchema::optional("origin_port", "string", self.origin_port_description()),
                ParameterSchema::optional("destination_port", "string", "Destination port or airport name filter"),
            ],
            category: Some("routing".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        Ok(self.search(call).unwrap_or_else(|e| error_result(self.name(), &e)))
    }
}

/// Ranks transport modes for a shipment
pub struct RecommendTransportTool {
    data: Arc<ReferenceData>,
}

impl RecommendTransportTool {
    pub const NAME: &'static str = "recommend_transport_mode";

    pub fn new(data: Arc<ReferenceData>) -> Self {
        Self { data }
    }

    fn run(&self, call: &ToolCall) -> Result<ToolResult> {
        let origin = required_str(call, "origin_country")?;
        let destination = required_str(call, "destination_country")?;
        let cargo = args::cargo(call)?;
        let urgency: Urgency = args::parsed_or_default(call, "urgency")?;

        let rec = recommend(&self.data, origin, destination, cargo, urgency);
        tracing::info!(
            tool = Self::NAME,
            origin = %origin,
            destination = %destination,
            urgency = urgency.as_str(),
            top = %rec.top_recommendation,
            "Transport mode recommended"
        );

        let mut output = format!(
            "Recommendation for {}kg / {} CBM ({} urgency): {}\n",
            cargo.weight_kg,
            cargo.volume_cbm,
            urgency.as_str(),
            rec.top_recommendation
        );
        for option in &rec.options {
            output.push_str(&format!(
                "  [{}] {} - {} ({})",
                option.priority, option.label, option.reason, option.transit
            ));
            if let Some(cost) = option.estimated_cost {
                output.push_str(&format!(" ~${:.2}", cost));
            }
            output.push('\n');
        }

        Ok(ToolResult::success(Self::NAME, output).with_data(data_map(ToolStatus::Success, &rec)?))
    }
}

#[async_trait]
impl Tool for RecommendTransportTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Recommend the best transport mode based on cargo weight, volume and urgency.".into(),
            parameters: vec![
                ParameterSchema::required("origin_country", "string", "Origin country"),
                ParameterSchema::required("destination_country", "string", "Destination country"),
                ParameterSchema::required("weight_kg", "number", "Cargo weight in kilograms"),
                ParameterSchema::required("volume_cbm", "number", "Cargo volume in cubic meters"),
                ParameterSchema::optional("urgency", "string", "Delivery urgency")
                    .with_default(json!("normal"))
                    .with_enum(["urgent", "normal", "economy"]),
            ],
            category: Some("routing".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        Ok(self.run(call).unwrap_or_else(|e| error_result(Self::NAME, &e)))
    }
}
