//! Document Specialist Tools
//!
//! Document lists, customs regulations, HS lookups and shipping checklists.

use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use agent_core::{
    Tool, ToolSchema, ToolCall, ToolResult, ToolStatus,
    tool::ParameterSchema,
    Result as CoreResult,
};

use super::args::{data_map, error_result, parsed_or_default, required_str};
use crate::catalog::ReferenceData;
use crate::documents::{
    customs_regulations, hs_code_info, required_documents, shipping_checklist, DocumentItem,
};
use crate::error::Result;
use crate::model::{Incoterm, TransportMode};

fn mode_arg(call: &ToolCall) -> Result<TransportMode> {
    call.str_arg("transport_mode")
        .map_or(Ok(TransportMode::Sea), |mode| mode.parse())
}

fn mode_param() -> ParameterSchema {
    ParameterSchema::optional("transport_mode", "string", "Transport mode")
        .with_default(json!("sea"))
        .with_enum(["sea", "air"])
}

fn render_documents<'a>(output: &mut String, docs: impl Iterator<Item = &'a DocumentItem>) {
    for doc in docs {
        output.push_str(&format!("  • {} ({}) - {}\n", doc.name, doc.copies, doc.purpose));
        if let Some(condition) = &doc.condition {
            output.push_str(&format!("      when: {}\n", condition));
        }
        if let Some(deadline) = &doc.deadline {
            output.push_str(&format!("      deadline: {}\n", deadline));
        }
        if let Some(note) = &doc.preferential_option {
            output.push_str(&format!("      preferential: {}\n", note));
        }
    }
}

pub struct RequiredDocumentsTool {
    data: Arc<ReferenceData>,
}

impl RequiredDocumentsTool {
    pub const NAME: &'static str = "get_required_documents";

    pub fn new(data: Arc<ReferenceData>) -> Self {
        Self { data }
    }

    fn run(&self, call: &ToolCall) -> Result<ToolResult> {
        let origin = required_str(call, "origin_country")?;
        let destination = required_str(call, "destination_country")?;
        let mode = mode_arg(call)?;

        let docs = required_documents(&self.data, origin, destination, mode);
        tracing::info!(
            tool = Self::NAME,
            route = %docs.route,
            mode = mode.as_str(),
            required = docs.required.len(),
            additional = docs.additional.len(),
            "Document list prepared"
        );

        let mut output = format!("Documents for {} ({})\nRequired:\n", docs.route, mode.label());
        render_documents(&mut output, docs.required.iter());
        if !docs.additional.is_empty() {
            output.push_str("Additional:\n");
            render_documents(&mut output, docs.additional.iter());
        }

        Ok(ToolResult::success(Self::NAME, output).with_data(data_map(ToolStatus::Success, &docs)?))
    }
}

#[async_trait]
impl Tool for RequiredDocumentsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "List the shipping documents required for a route and transport mode.".into(),
            parameters: vec![
                ParameterSchema::required("origin_country", "string", "Origin country"),
                ParameterSchema::required("destination_country", "string", "Destination country"),
                mode_param(),
            ],
            category: Some("documents".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        Ok(self.run(call).unwrap_or_else(|e| error_result(Self::NAME, &e)))
    }
}

pub struct CustomsRegulationsTool {
    data: Arc<ReferenceData>,
}

impl CustomsRegulationsTool {
    pub const NAME: &'static str = "check_customs_regulations";

    pub fn new(data: Arc<ReferenceData>) -> Self {
        Self { data }
    }

    fn run(&self, call: &ToolCall) -> Result<ToolResult> {
        let destination = required_str(call, "destination_country")?;
        let product_type = call.str_arg("product_type").unwrap_or("machinery");

        let Some(summary) = customs_regulations(&self.data, destination, product_type) else {
            tracing::info!(tool = Self::NAME, destination = %destination, "No customs profile");
            let message = format!(
                "Limited information available for {}. Please consult a local customs broker.",
                destination
            );
            return Ok(ToolResult::with_status(Self::NAME, ToolStatus::Limited, message.clone())
                .with_data(json!({
                    "status": ToolStatus::Limited,
                    "country": destination,
                    "message": message,
                })));
        };

        tracing::info!(tool = Self::NAME, country = %summary.country, product_type = %product_type, "Customs regulations");

        let list = |items: &[String]| {
            if items.is_empty() {
                "none".to_string()
            } else {
                items.join(", ")
            }
        };
        let output = format!(
            "Customs regulations for {} ({})\n\
             VAT: {}%\n\
             Restricted: {}\n\
             Prohibited: {}\n\
             Required documents: {}\n\
             Special zones: {}\n",
            summary.country,
            summary.product_type,
            summary.vat_rate_percent,
            list(&summary.restricted_items),
            list(&summary.prohibited_items),
            list(&summary.required_documents),
            list(&summary.special_zones),
        );

        Ok(ToolResult::success(Self::NAME, output).with_data(data_map(ToolStatus::Success, &summary)?))
    }
}

#[async_trait]
impl Tool for CustomsRegulationsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Check import regulations, restricted items and VAT for a destination country.".into(),
            parameters: vec![
                ParameterSchema::required("destination_country", "string", "Destination country"),
                ParameterSchema::optional("product_type", "string", "Type of product")
                    .with_default(json!("machinery")),
            ],
            category: Some("documents".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        Ok(self.run(call).unwrap_or_else(|e| error_result(Self::NAME, &e)))
    }
}

pub struct HsCodeTool {
    data: Arc<ReferenceData>,
}

impl HsCodeTool {
    pub const NAME: &'static str = "get_hs_code_info";

    pub fn new(data: Arc<ReferenceData>) -> Self {
        Self { data }
    }

    fn run(&self, call: &ToolCall) -> Result<ToolResult> {
        let info = hs_code_info(&self.data, required_str(call, "hs_code")?)?;
        tracing::info!(tool = Self::NAME, hs_code = %info.hs_code, heading = %info.heading, "HS code lookup");

        let output = format!(
            "HS {} (heading {}): {}\nTypical duty: {}\n",
            info.hs_code, info.heading, info.description, info.typical_duty
        );
        Ok(ToolResult::success(Self::NAME, output).with_data(data_map(ToolStatus::Success, &info)?))
    }
}

#[async_trait]
impl Tool for HsCodeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Look up an HS code: description and typical duty range.".into(),
            parameters: vec![ParameterSchema::required(
                "hs_code",
                "string",
                "HS code, at least 4 digits (e.g., '8479')",
            )],
            category: Some("documents".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        Ok(self.run(call).unwrap_or_else(|e| error_result(Self::NAME, &e)))
    }
}

pub struct ShippingChecklistTool {
    data: Arc<ReferenceData>,
}

impl ShippingChecklistTool {
    pub const NAME: &'static str = "generate_shipping_checklist";

    pub fn new(data: Arc<ReferenceData>) -> Self {
        Self { data }
    }

    fn run(&self, call: &ToolCall) -> Result<ToolResult> {
        let origin = required_str(call, "origin_country")?;
        let destination = required_str(call, "destination_country")?;
        let mode = mode_arg(call)?;
        let incoterm: Incoterm = parsed_or_default(call, "incoterm")?;

        let checklist = shipping_checklist(
            &self.data,
            origin,
            destination,
            mode,
            incoterm,
            Utc::now().date_naive(),
        );
        tracing::info!(
            tool = Self::NAME,
            route = %checklist.route,
            mode = mode.as_str(),
            incoterm = incoterm.as_str(),
            "Shipping checklist generated"
        );

        let mut output = format!(
            "Shipping checklist {} ({}, {})\nInsurance: {} | Freight: {}\n\nTimeline:\n",
            checklist.route,
            mode.label(),
            incoterm,
            checklist.insurance_by,
            checklist.freight_by
        );
        for milestone in &checklist.timeline {
            output.push_str(&format!("  Day {:>2} ({}): {}\n", milestone.day, milestone.date, milestone.task));
        }
        output.push_str("\nPre-shipment:\n");
        for task in &checklist.pre_shipment {
            output.push_str(&format!("  [ ] {} ({})\n", task.task, task.responsible));
        }
        output.push_str("\nDocuments:\n");
        render_documents(&mut output, checklist.documents.iter());

        Ok(ToolResult::success(Self::NAME, output).with_data(data_map(ToolStatus::Success, &checklist)?))
    }
}

#[async_trait]
impl Tool for ShippingChecklistTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Generate a dated shipping checklist with tasks, responsibilities and documents.".into(),
            parameters: vec![
                ParameterSchema::required("origin_country", "string", "Origin country"),
                ParameterSchema::required("destination_country", "string", "Destination country"),
                mode_param(),
                ParameterSchema::optional("incoterm", "string", "Trade term")
                    .with_default(json!("FOB"))
                    .with_enum(["EXW", "FOB", "CFR", "CIF", "DAP", "DDP"]),
            ],
            category: Some("documents".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        Ok(self.run(call).unwrap_or_else(|e| error_result(Self::NAME, &e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> Arc<ReferenceData> {
        ReferenceData::shared().unwrap()
    }

    #[tokio::test]
    async fn test_required_documents_defaults_to_sea() {
        let tool = RequiredDocumentsTool::new(data());
        let call = ToolCall::new(RequiredDocumentsTool::NAME)
            .arg("origin_country", "Japan")
            .arg("destination_country", "Thailand");

        let result = tool.execute(&call).await.unwrap();
        assert!(result.is_success());
        assert!(result.output.contains("Bill of Lading"));
        assert!(result.output.contains("JTEPA"));

        let bad = tool.execute(&call.clone().arg("transport_mode", "rail")).await.unwrap();
        assert_eq!(bad.status, ToolStatus::Error);
    }

    #[tokio::test]
    async fn test_customs_regulations_limited() {
        let tool = CustomsRegulationsTool::new(data());

        let known = tool
            .execute(&ToolCall::new(CustomsRegulationsTool::NAME).arg("destination_country", "USA"))
            .await
            .unwrap();
        assert!(known.is_success());
        assert_eq!(known.data.unwrap()["product_type"], "machinery");

        let unknown = tool
            .execute(&ToolCall::new(CustomsRegulationsTool::NAME).arg("destination_country", "Vietnam"))
            .await
            .unwrap();
        assert_eq!(unknown.status, ToolStatus::Limited);
    }

    #[tokio::test]
    async fn test_hs_code_not_found() {
        let tool = HsCodeTool::new(data());

        let hit = tool
            .execute(&ToolCall::new(HsCodeTool::NAME).arg("hs_code", "8501.10"))
            .await
            .unwrap();
        assert!(hit.is_success());
        assert_eq!(hit.data.unwrap()["heading"], "8501");

        let miss = tool
            .execute(&ToolCall::new(HsCodeTool::NAME).arg("hs_code", "9999"))
            .await
            .unwrap();
        assert_eq!(miss.status, ToolStatus::NotFound);
    }

    #[tokio::test]
    async fn test_checklist_incoterm() {
        let tool = ShippingChecklistTool::new(data());
        let call = ToolCall::new(ShippingChecklistTool::NAME)
            .arg("origin_country", "Japan")
            .arg("destination_country", "China")
            .arg("transport_mode", "air")
            .arg("incoterm", "cif");

        let result = tool.execute(&call).await.unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["insurance_by"], "Seller");
        assert_eq!(data["timeline"][3]["day"], 6);

        let bad = tool.execute(&call.clone().arg("incoterm", "FAS")).await.unwrap();
        assert_eq!(bad.status, ToolStatus::Error);
    }
}
