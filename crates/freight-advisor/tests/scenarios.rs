//! End-to-end quoting through the tool registry.

use std::sync::Arc;

use agent_core::{AgentError, ToolCall, ToolRegistry, ToolStatus};
use freight_advisor::{register_all, AdvisorConfig, CustomsPolicy, MemoryQuoteStore, ReferenceData, Specialist};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

fn registry(config: &AdvisorConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_all(
        &mut registry,
        ReferenceData::shared().unwrap(),
        Arc::new(MemoryQuoteStore::new()),
        config,
    );
    registry
}

fn amount(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

fn tokyo_shanghai(tool: &str) -> ToolCall {
    ToolCall::new(tool)
        .arg("origin_country", "Japan")
        .arg("destination_country", "China")
        .arg("weight_kg", 500)
        .arg("volume_cbm", 2)
}

#[tokio::test]
async fn quote_sea_then_landed_then_save() {
    let tools = registry(&AdvisorConfig::default());

    let sea = tools.execute(&tokyo_shanghai("calculate_sea_freight_cost")).await.unwrap();
    assert_eq!(sea.status, ToolStatus::Success);
    let sea_data = sea.data.unwrap();
    assert_eq!(amount(&sea_data["total"]), dec!(488));
    let line_sum: Decimal = sea_data["lines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| amount(&line["amount"]))
        .sum();
    assert_eq!(line_sum, dec!(488));

    let landed = tools
        .execute(
            &ToolCall::new("calculate_total_landed_cost")
                .arg("freight_cost", sea_data["total"].clone())
                .arg("cargo_value", 15000)
                .arg("destination_country", "China"),
        )
        .await
        .unwrap();
    let landed_data = landed.data.unwrap();
    assert_eq!(landed_data["hs_code"], "8479");
    assert_eq!(amount(&landed_data["cif_value"]), dec!(15545.75));
    assert_eq!(amount(&landed_data["grand_total"]), dec!(18563.25));

    let saved = tools
        .execute(
            &ToolCall::new("save_quote")
                .arg("customer_id", "001")
                .arg("origin", "Tokyo, Japan")
                .arg("destination", "Shanghai, China")
                .arg("cargo_desc", "500kg 2CBM industrial machinery")
                .arg("total_cost", landed_data["grand_total"].clone())
                .arg("transport_mode", "sea"),
        )
        .await
        .unwrap();
    assert!(saved.is_success());
    assert!(saved.id.is_some());

    let history = tools
        .execute(&ToolCall::new("get_quote_history").arg("customer_id", "001"))
        .await
        .unwrap();
    let quotes = history.data.unwrap()["quotes"].clone();
    assert_eq!(amount(&quotes[0]["total_cost"]), dec!(18563.25));
}

#[tokio::test]
async fn air_scenario_uses_top_tier_at_500kg() {
    let tools = registry(&AdvisorConfig::default());

    let air = tools.execute(&tokyo_shanghai("calculate_air_freight_cost")).await.unwrap();
    let data = air.data.unwrap();
    assert_eq!(amount(&data["total"]), dec!(2292.5));
    assert_eq!(amount(&data["weight"]["chargeable_weight_kg"]), dec!(500));
    assert_eq!(data["weight"]["tier"]["label"], ">500kg");
}

#[tokio::test]
async fn urgent_recommendation_puts_air_first() {
    let tools = registry(&AdvisorConfig::default());

    for (weight, volume) in [(5, 0.02), (20000, 60.0)] {
        let result = tools
            .execute(
                &ToolCall::new("recommend_transport_mode")
                    .arg("origin_country", "Japan")
                    .arg("destination_country", "USA")
                    .arg("weight_kg", weight)
                    .arg("volume_cbm", volume)
                    .arg("urgency", "urgent"),
            )
            .await
            .unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["options"][0]["mode"], "air");
        assert_eq!(data["options"][0]["priority"], 1);
    }
}

#[tokio::test]
async fn strict_policy_rejects_unknown_destination() {
    let strict = AdvisorConfig {
        customs_policy: CustomsPolicy::Strict,
        ..AdvisorConfig::default()
    };
    let call = ToolCall::new("calculate_total_landed_cost")
        .arg("freight_cost", 100)
        .arg("cargo_value", 1000)
        .arg("destination_country", "Brazil")
        .arg("hs_code", "9999");

    let rejected = registry(&strict).execute(&call).await.unwrap();
    assert_eq!(rejected.status, ToolStatus::Error);

    let fallback = registry(&AdvisorConfig::default()).execute(&call).await.unwrap();
    let data = fallback.data.unwrap();
    assert_eq!(data["customs_profile"], "China");
    assert_eq!(data["fallback_profile"], true);
    assert_eq!(data["fallback_duty_rate"], true);
}

#[tokio::test]
async fn framework_errors_are_distinct_from_domain_outcomes() {
    let tools = registry(&AdvisorConfig::default());

    let unknown = tools.execute(&ToolCall::new("book_vessel")).await;
    assert!(matches!(unknown, Err(AgentError::ToolNotFound(_))));

    let missing = tools
        .execute(&ToolCall::new("calculate_sea_freight_cost").arg("origin_country", "Japan"))
        .await;
    assert!(matches!(missing, Err(AgentError::ToolValidation(_))));

    let no_routes = tools
        .execute(
            &ToolCall::new("search_sea_routes")
                .arg("origin_country", "Japan")
                .arg("destination_country", "Kenya"),
        )
        .await
        .unwrap();
    assert_eq!(no_routes.status, ToolStatus::NoRoutesFound);
}

#[test]
fn classified_requests_reach_registered_tools() {
    let tools = registry(&AdvisorConfig::default());

    let specialist = Specialist::classify("この見積もりを保存してください").unwrap();
    assert_eq!(specialist, Specialist::QuoteManager);
    assert!(tools.schemas_for(specialist.tool_names()).iter().any(|s| s.name == "save_quote"));

    let section = tools.generate_prompt_section(&tools.schemas_for(Specialist::CostAnalyst.tool_names()));
    assert!(section.contains("### calculate_total_landed_cost"));
}
