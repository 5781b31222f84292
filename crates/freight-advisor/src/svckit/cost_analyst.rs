//! Cost Analyst Tools
//!
//! Freight quotes per mode, landed cost and the side-by-side comparison.

use std::sync::Arc;
use async_trait::async_trait;
use serde_json::json;

use agent_core::{
    Tool, ToolSchema, ToolCall, ToolResult, ToolStatus,
    tool::ParameterSchema,
    Result as CoreResult,
};

use super::args::{self, data_map, error_result, required_decimal, required_str};
use crate::catalog::ReferenceData;
use crate::config::CustomsPolicy;
use crate::error::Result;
use crate::model::{ContainerType, TransportMode};
use crate::pricing::{
    compare_shipping_options, freight_cost, landed_cost, ComparisonOutcome, CostBreakdown,
    LandedCostRequest, DEFAULT_HS_CODE,
};

fn lane_params() -> Vec<ParameterSchema> {
    vec![
        ParameterSchema::required("origin_country", "string", "Origin country (e.g., 'Japan')"),
        ParameterSchema::required("destination_country", "string", "Destination country (e.g., 'China')"),
        ParameterSchema::required("weight_kg", "number", "Total cargo weight in kilograms"),
        ParameterSchema::required("volume_cbm", "number", "Total cargo volume in cubic meters"),
    ]
}

fn render_breakdown(quote: &CostBreakdown) -> String {
    let mut output = format!("{} quote {}", quote.mode.label(), quote.lane);
    if let Some(container) = quote.container {
        output.push_str(&format!(" ({})", container.label()));
    }
    output.push('\n');

    if let Some(weight) = &quote.weight {
        output.push_str(&format!(
            "Chargeable weight: {}kg (actual {}kg, volumetric {}kg), tier {} @ ${}/kg\n",
            weight.chargeable_weight_kg,
            weight.actual_weight_kg,
            weight.volumetric_weight_kg,
            weight.tier.label,
            weight.tier.rate_per_kg,
        ));
    }

    output.push_str("─".repeat(50).as_str());
    output.push('\n');
    for line in &quote.lines {
        output.push_str(&format!("{:<32} ${:>10.2}\n", line.name, line.amount));
    }
    output.push_str("─".repeat(50).as_str());
    output.push('\n');
    output.push_str(&format!(
        "{:<32} ${:>10.2} {}\nValid for {} days\n",
        "TOTAL", quote.total, quote.currency, quote.validity_days
    ));
    output
}

/// Freight quote for one transport mode
pub struct FreightCostTool {
    data: Arc<ReferenceData>,
    mode: TransportMode,
}

impl FreightCostTool {
    pub fn sea(data: Arc<ReferenceData>) -> Self {
        Self { data, mode: TransportMode::Sea }
    }

    pub fn air(data: Arc<ReferenceData>) -> Self {
        Self { data, mode: TransportMode::Air }
    }

    fn name(&self) -> &'static str {
        match self.mode {
            TransportMode::Sea => "calculate_sea_freight_cost",
            TransportMode::Air => "calculate_air_freight_cost",
        }
    }

    fn run(&self, call: &ToolCall) -> Result<ToolResult> {
        let origin = required_str(call, "origin_country")?;
        let destination = required_str(call, "destination_country")?;
        let cargo = args::cargo(call)?;
        let container: ContainerType = match self.mode {
            TransportMode::Sea => args::parsed_or_default(call, "container_type")?,
            TransportMode::Air => ContainerType::default(),
        };

        let quote = freight_cost(&self.data.rates, self.mode, origin, destination, cargo, container)?;
        tracing::info!(
            tool = self.name(),
            lane = %quote.lane,
            weight_kg = %cargo.weight_kg,
            volume_cbm = %cargo.volume_cbm,
            total = %quote.total,
            "Freight cost calculated"
        );

        let output = render_breakdown(&quote);
        Ok(ToolResult::success(self.name(), output).with_data(data_map(ToolStatus::Success, &quote)?))
    }
}

#[async_trait]
impl Tool for FreightCostTool {
    fn schema(&self) -> ToolSchema {
        let mut parameters = lane_params();
        let description = match self.mode {
            TransportMode::Sea => {
                parameters.push(
                    ParameterSchema::optional("container_type", "string", "Container type")
                        .with_default(json!("LCL"))
                        .with_enum(["LCL", "20ft", "40ft"]),
                );
                "Calculate sea freight cost with BAF, CAF, terminal handling and documentation charges."
            }
            TransportMode::Air => {
                "Calculate air freight cost on the chargeable weight with fuel and security surcharges."
            }
        };

        ToolSchema {
            name: self.name().into(),
            description: description.into(),
            parameters,
            category: Some("pricing".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        Ok(self.run(call).unwrap_or_else(|e| error_result(self.name(), &e)))
    }
}

/// Total landed cost including duty, VAT and clearance fees
pub struct LandedCostTool {
    data: Arc<ReferenceData>,
    policy: CustomsPolicy,
}

impl LandedCostTool {
    pub const NAME: &'static str = "calculate_total_landed_cost";

    pub fn new(data: Arc<ReferenceData>, policy: CustomsPolicy) -> Self {
        Self { data, policy }
    }

    fn run(&self, call: &ToolCall) -> Result<ToolResult> {
        let request = LandedCostRequest::new(
            required_decimal(call, "freight_cost")?,
            required_decimal(call, "cargo_value")?,
            required_str(call, "destination_country")?,
        )
        .hs_code(call.str_arg("hs_code").unwrap_or(DEFAULT_HS_CODE))
        .include_insurance(args::bool_or(call, "include_insurance", true)?);

        let landed = landed_cost(&self.data, self.policy, &request)?;
        tracing::info!(
            tool = Self::NAME,
            destination = %request.destination_country,
            profile = %landed.customs_profile,
            hs_code = %landed.hs_code,
            grand_total = %landed.grand_total,
            "Landed cost calculated"
        );

        let mut output = format!(
            "Landed cost into {} (HS {})\n\
             Cargo value (FOB):  ${:.2}\n\
             Freight:            ${:.2}\n\
             Insurance:          ${:.2}\n\
             CIF value:          ${:.2}\n\
             Import duty ({}%):  ${:.2}\n\
             VAT ({}%):          ${:.2}\n\
             Customs fees:       ${:.2}\n\
             GRAND TOTAL:        ${:.2} {}\n",
            landed.customs_profile,
            landed.hs_code,
            landed.cargo_value_fob,
            landed.freight_cost,
            landed.insurance,
            landed.cif_value,
            (landed.duty_rate * rust_decimal::Decimal::ONE_HUNDRED).normalize(),
            landed.duty,
            (landed.vat_rate * rust_decimal::Decimal::ONE_HUNDRED).normalize(),
            landed.vat,
            landed.customs_fees.total,
            landed.grand_total,
            landed.currency,
        );
        if landed.fallback_profile {
            output.push_str(&format!(
                "Note: no customs profile for {}; {} rates applied\n",
                request.destination_country, landed.customs_profile
            ));
        }
        if landed.fallback_duty_rate {
            output.push_str("Note: HS heading not in tariff table; default duty rate applied\n");
        }

        Ok(ToolResult::success(Self::NAME, output).with_data(data_map(ToolStatus::Success, &landed)?))
    }
}

#[async_trait]
impl Tool for LandedCostTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Calculate total landed cost: freight, insurance, import duty, VAT and customs fees.".into(),
            parameters: vec![
                ParameterSchema::required("freight_cost", "number", "Freight cost in USD"),
                ParameterSchema::required("cargo_value", "number", "Cargo value (FOB) in USD"),
                ParameterSchema::required("destination_country", "string", "Destination country"),
                ParameterSchema::optional("hs_code", "string", "HS code of the goods")
                    .with_default(json!(DEFAULT_HS_CODE)),
                ParameterSchema::optional("include_insurance", "boolean", "Include cargo insurance")
                    .with_default(json!(true)),
            ],
            category: Some("pricing".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        Ok(self.run(call).unwrap_or_else(|e| error_result(Self::NAME, &e)))
    }
}

pub struct CompareOptionsTool {
    data: Arc<ReferenceData>,
}

impl CompareOptionsTool {
    pub const NAME: &'static str = "compare_shipping_options";

    pub fn new(data: Arc<ReferenceData>) -> Self {
        Self { data }
    }

    fn run(&self, call: &ToolCall) -> Result<ToolResult> {
        let origin = required_str(call, "origin_country")?;
        let destination = required_str(call, "destination_country")?;
        let cargo = args::cargo(call)?;
        let cargo_value = required_decimal(call, "cargo_value")?;

        let comparison = match compare_shipping_options(&self.data, origin, destination, cargo, cargo_value)? {
            ComparisonOutcome::Options(comparison) => comparison,
            ComparisonOutcome::NoOptions => {
                let message = format!(
                    "No shipping options available from {} to {}. Please contact sales for a custom quote.",
                    origin, destination
                );
                tracing::info!(tool = Self::NAME, origin = %origin, destination = %destination, "No options priced");
                return Ok(ToolResult::with_status(Self::NAME, ToolStatus::NoOptions, message.clone())
                    .with_data(json!({ "status": ToolStatus::NoOptions, "message": message })));
            }
        };

        tracing::info!(
            tool = Self::NAME,
            origin = %origin,
            destination = %destination,
            options = comparison.options.len(),
            cheapest = %comparison.cheapest,
            "Shipping options compared"
        );

        let mut output = format!("Shipping options {} → {}\n", origin, destination);
        output.push_str("═".repeat(60).as_str());
        output.push('\n');
        for option in &comparison.options {
            let transit = option
                .transit_days
                .map_or_else(|| "n/a".to_string(), |d| format!("{} days", d));
            output.push_str(&format!(
                "{:<26} ${:>10.2}  {:<9} {}\n",
                option.option, option.freight_cost, transit, option.best_for
            ));
        }
        output.push_str(&format!(
            "Cheapest: {} | Fastest: {} | Savings: ${:.2}\n",
            comparison.cheapest, comparison.fastest, comparison.savings
        ));

        Ok(ToolResult::success(Self::NAME, output).with_data(data_map(ToolStatus::Success, &comparison)?))
    }
}

#[async_trait]
impl Tool for CompareOptionsTool {
    fn schema(&self) -> ToolSchema {
        let mut parameters = lane_params();
        parameters.push(ParameterSchema::required("cargo_value", "number", "Cargo value in USD"));

        ToolSchema {
            name: Self::NAME.into(),
            description: "Compare sea LCL, sea FCL and air freight options side by side.".into(),
            parameters,
            category: Some("pricing".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        Ok(self.run(call).unwrap_or_else(|e| error_result(Self::NAME, &e)))
    }
}
