//! Recommendation Engine
//!
//! Fixed priority heuristic over urgency, weight and volume. Costs and
//! transit times are attached for information only; they never change the
//! ranking.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::catalog::ReferenceData;
use crate::model::{ContainerType, TransportMode, Urgency};
use crate::pricing::{freight_cost, Cargo};
use crate::route_finder::{find_routes, RouteQuery};

/// Air is proposed for non-urgent cargo up to this weight...
pub const SMALL_CARGO_MAX_WEIGHT_KG: Decimal = dec!(300);
/// ...and this volume
pub const SMALL_CARGO_MAX_VOLUME_CBM: Decimal = dec!(1);

/// Below this volume sea cargo always goes LCL
pub const LCL_BELOW_CBM: Decimal = dec!(15);
pub const TWENTY_FT_MAX_CBM: Decimal = dec!(25);
pub const FORTY_FT_MAX_CBM: Decimal = dec!(55);

#[derive(Clone, Debug, Serialize)]
pub struct TransportOption {
    pub mode: TransportMode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerType>,

    /// e.g. "Air Freight", "Sea Freight (20ft FCL)"
    pub label: String,

    /// 1 is preferred over 2
    pub priority: u8,

    pub reason: &'static str,
    pub transit: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit_days: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<Decimal>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Recommendation {
    pub cargo: Cargo,
    pub urgency: Urgency,

    /// Ascending by priority, stable
    pub options: Vec<TransportOption>,

    pub top_recommendation: String,
}

/// Container suggested for sea cargo of `volume_cbm`
pub fn suggested_container(volume_cbm: Decimal) -> ContainerType {
    if volume_cbm < LCL_BELOW_CBM {
        ContainerType::Lcl
    } else if volume_cbm <= TWENTY_FT_MAX_CBM {
        ContainerType::Twenty
    } else if volume_cbm <= FORTY_FT_MAX_CBM {
        ContainerType::Forty
    } else {
        ContainerType::Lcl
    }
}

pub fn recommend(
    data: &ReferenceData,
    origin_country: &str,
    destination_country: &str,
    cargo: Cargo,
    urgency: Urgency,
) -> Recommendation {
    let query = RouteQuery::new(origin_country, destination_country);
    let enrich = |mode: TransportMode, container: ContainerType| {
        let transit_days = find_routes(data, mode, &query).first_transit_days();
        let estimated_cost = freight_cost(
            &data.rates,
            mode,
            origin_country,
            destination_country,
            cargo,
            container,
        )
        .ok()
        .map(|quote| quote.total);
        (transit_days, estimated_cost)
    };

    let mut options = Vec::with_capacity(2);

    let small = cargo.weight_kg <= SMALL_CARGO_MAX_WEIGHT_KG && cargo.volume_cbm <= SMALL_CARGO_MAX_VOLUME_CBM;
    if urgency == Urgency::Urgent || small {
        let (transit_days, estimated_cost) = enrich(TransportMode::Air, ContainerType::Lcl);
        let urgent = urgency == Urgency::Urgent;
        options.push(TransportOption {
            mode: TransportMode::Air,
            container: None,
            label: TransportMode::Air.label().to_string(),
            priority: if urgent { 1 } else { 2 },
            reason: if urgent {
                "Fastest delivery"
            } else {
                "Cost-effective for small cargo"
            },
            transit: "1-3 days",
            transit_days,
            estimated_cost,
        });
    }

    let container = suggested_container(cargo.volume_cbm);
    let (transit_days, estimated_cost) = enrich(TransportMode::Sea, container);
    options.push(TransportOption {
        mode: TransportMode::Sea,
        container: Some(container),
        label: format!("{} ({})", TransportMode::Sea.label(), container.label()),
        priority: if urgency == Urgency::Economy { 1 } else { 2 },
        reason: if cargo.weight_kg > SMALL_CARGO_MAX_WEIGHT_KG {
            "Most economical option"
        } else {
            "Good balance of cost and time"
        },
        transit: "5-35 days depending on destination",
        transit_days,
        estimated_cost,
    });

    options.sort_by_key(|o| o.priority);

    let top_recommendation = options
        .first()
        .map(|o| o.label.clone())
        .unwrap_or_default();

    tracing::debug!(
        urgency = urgency.as_str(),
        top = %top_recommendation,
        options = options.len(),
        "Transport mode ranked"
    );

    Recommendation {
        cargo,
        urgency,
        options,
        top_recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> ReferenceData {
        ReferenceData::embedded().unwrap()
    }

    fn run(weight: Decimal, volume: Decimal, urgency: Urgency) -> Recommendation {
        recommend(&data(), "Japan", "China", Cargo::new(weight, volume).unwrap(), urgency)
    }

    #[test]
    fn test_urgent_always_puts_air_first() {
        for (weight, volume) in [(dec!(10), dec!(0.1)), (dec!(5000), dec!(30)), (dec!(20000), dec!(70))] {
            let rec = run(weight, volume, Urgency::Urgent);
            assert_eq!(rec.options[0].mode, TransportMode::Air);
            assert_eq!(rec.options[0].priority, 1);
            assert_eq!(rec.top_recommendation, "Air Freight");
        }
    }

    #[test]
    fn test_small_cargo_offers_air_at_priority_two() {
        let rec = run(dec!(300), dec!(1), Urgency::Normal);
        assert_eq!(rec.options.len(), 2);
        assert_eq!(rec.options[0].priority, 2);
        assert_eq!(rec.options[1].priority, 2);
        // stable: air was proposed first
        assert_eq!(rec.top_recommendation, "Air Freight");
        assert_eq!(rec.options[0].reason, "Cost-effective for small cargo");
    }

    #[test]
    fn test_heavy_cargo_gets_sea_only() {
        let rec = run(dec!(301), dec!(1), Urgency::Normal);
        assert_eq!(rec.options.len(), 1);
        assert_eq!(rec.options[0].reason, "Most economical option");
        assert_eq!(rec.top_recommendation, "Sea Freight (LCL)");
    }

    #[test]
    fn test_economy_puts_sea_first() {
        let rec = run(dec!(100), dec!(0.5), Urgency::Economy);
        assert_eq!(rec.options[0].mode, TransportMode::Sea);
        assert_eq!(rec.options[0].priority, 1);
        assert_eq!(rec.options[1].mode, TransportMode::Air);
    }

    #[test]
    fn test_container_thresholds() {
        assert_eq!(suggested_container(dec!(14.99)), ContainerType::Lcl);
        assert_eq!(suggested_container(dec!(15)), ContainerType::Twenty);
        assert_eq!(suggested_container(dec!(25)), ContainerType::Twenty);
        assert_eq!(suggested_container(dec!(25.01)), ContainerType::Forty);
        assert_eq!(suggested_container(dec!(55)), ContainerType::Forty);
        assert_eq!(suggested_container(dec!(55.01)), ContainerType::Lcl);
    }

    #[test]
    fn test_options_carry_transit_and_estimate() {
        let rec = run(dec!(500), dec!(2), Urgency::Urgent);
        let air = &rec.options[0];
        let sea = &rec.options[1];

        assert_eq!(air.transit_days, Some(1));
        assert_eq!(air.estimated_cost, Some(dec!(2292.5)));
        assert_eq!(sea.transit_days, Some(3));
        assert_eq!(sea.estimated_cost, Some(dec!(488)));
    }

    #[test]
    fn test_unpriced_lane_still_recommends() {
        let rec = recommend(
            &data(),
            "Japan",
            "Brazil",
            Cargo::new(dec!(50), dec!(0.2)).unwrap(),
            Urgency::Normal,
        );
        assert_eq!(rec.options.len(), 2);
        assert!(rec.options.iter().all(|o| o.estimated_cost.is_none() && o.transit_days.is_none()));
    }
}
