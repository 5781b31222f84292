//! Side-by-side comparison of every mode priced on a lane.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::air::air_freight_cost;
use super::breakdown::{check_range, round_cents, Cargo, CostBreakdown, MAX_AMOUNT};
use super::sea::sea_freight_cost;
use crate::catalog::ReferenceData;
use crate::error::{AdvisorError, Result};
use crate::model::{ContainerType, TransportMode};
use crate::route_finder::{find_routes, RouteQuery};

/// FCL is offered from this volume up
pub const FCL_MIN_VOLUME_CBM: Decimal = dec!(10);

/// Largest volume quoted in a 20ft container
pub const TWENTY_FT_MAX_VOLUME_CBM: Decimal = dec!(25);

#[derive(Clone, Debug, Serialize)]
pub struct ShippingOption {
    pub option: String,
    pub mode: TransportMode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerType>,

    pub freight_cost: Decimal,

    /// Transit of the first scheduled route, when the lane has one
    pub transit_days: Option<u32>,

    pub best_for: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct Comparison {
    pub cargo: Cargo,
    pub cargo_value: Decimal,

    /// Ascending by freight cost
    pub options: Vec<ShippingOption>,

    pub cheapest: String,
    pub fastest: String,

    /// Most expensive minus cheapest; zero with a single option
    pub savings: Decimal,

    /// Cargo value per dollar of the cheapest freight, one decimal
    pub value_ratio: Option<Decimal>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ComparisonOutcome {
    Options(Comparison),
    NoOptions,
}

pub fn compare_shipping_options(
    data: &ReferenceData,
    origin_country: &str,
    destination_country: &str,
    cargo: Cargo,
    cargo_value: Decimal,
) -> Result<ComparisonOutcome> {
    check_range("cargo_value", cargo_value, MAX_AMOUNT)?;

    let query = RouteQuery::new(origin_country, destination_country);
    let sea_transit = find_routes(data, TransportMode::Sea, &query).first_transit_days();
    let air_transit = find_routes(data, TransportMode::Air, &query).first_transit_days();

    let mut containers = vec![ContainerType::Lcl];
    if cargo.volume_cbm >= FCL_MIN_VOLUME_CBM {
        containers.push(if cargo.volume_cbm <= TWENTY_FT_MAX_VOLUME_CBM {
            ContainerType::Twenty
        } else {
            ContainerType::Forty
        });
    }

    let mut options = Vec::new();

    for container in containers {
        let quote = sea_freight_cost(&data.rates, origin_country, destination_country, cargo, container);
        if let Some(quote) = priced(quote)? {
            let (option, best_for) = match container {
                ContainerType::Lcl => ("Sea Freight (LCL)".to_string(), "Cost-sensitive, non-urgent cargo"),
                fcl => (
                    format!("Sea Freight ({})", fcl.label()),
                    "Large volume shipments, full container control",
                ),
            };
            options.push(ShippingOption {
                option,
                mode: TransportMode::Sea,
                container: Some(container),
                freight_cost: quote.total,
                transit_days: sea_transit,
                best_for,
            });
        }
    }

    let air = air_freight_cost(&data.rates, origin_country, destination_country, cargo);
    if let Some(quote) = priced(air)? {
        options.push(ShippingOption {
            option: TransportMode::Air.label().to_string(),
            mode: TransportMode::Air,
            container: None,
            freight_cost: quote.total,
            transit_days: air_transit,
            best_for: "Urgent, high-value goods",
        });
    }

    options.sort_by(|a, b| a.freight_cost.cmp(&b.freight_cost));

    let (Some(cheapest), Some(most_expensive)) = (options.first(), options.last()) else {
        tracing::debug!(origin = %origin_country, destination = %destination_country, "No priced options");
        return Ok(ComparisonOutcome::NoOptions);
    };

    let fastest = options
        .iter()
        .find(|o| o.mode == TransportMode::Air)
        .unwrap_or(cheapest);

    let value_ratio = (!cheapest.freight_cost.is_zero())
        .then(|| (cargo_value / cheapest.freight_cost).round_dp(1));

    Ok(ComparisonOutcome::Options(Comparison {
        cargo,
        cargo_value,
        cheapest: cheapest.option.clone(),
        fastest: fastest.option.clone(),
        savings: round_cents(most_expensive.freight_cost - cheapest.freight_cost),
        value_ratio,
        options,
    }))
}

/// A missing lane skips the mode; any other error aborts the comparison
fn priced(quote: Result<CostBreakdown>) -> Result<Option<CostBreakdown>> {
    match quote {
        Ok(quote) => Ok(Some(quote)),
        Err(AdvisorError::UnknownLane { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}
