//! Sea Freight
//!
//! LCL is billed per chargeable unit, where one unit is one CBM or one tonne,
//! whichever is greater. FCL is a flat container price regardless of fill.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::breakdown::{Cargo, ChargeLine, CostBreakdown};
use crate::catalog::{lane_key, RateTable};
use crate::error::{AdvisorError, Result};
use crate::model::{ContainerType, TransportMode};

/// Kilograms per LCL chargeable unit
pub const KG_PER_CBM: Decimal = dec!(1000);

pub fn sea_freight_cost(
    rates: &RateTable,
    origin_country: &str,
    destination_country: &str,
    cargo: Cargo,
    container: ContainerType,
) -> Result<CostBreakdown> {
    let (lane, rate) = rates
        .sea_lane(origin_country, destination_country)
        .ok_or_else(|| AdvisorError::UnknownLane {
            mode: TransportMode::Sea.as_str(),
            lane: lane_key(origin_country, destination_country),
        })?;
    let surcharges = &rates.sea_surcharges;

    let chargeable_units = match container {
        ContainerType::Lcl => Some(cargo.volume_cbm.max(cargo.weight_kg / KG_PER_CBM)),
        ContainerType::Twenty | ContainerType::Forty => None,
    };

    let base = match chargeable_units {
        Some(units) => units * rate.lcl_per_unit,
        None => rate.price(container),
    };

    let seal = if container.is_fcl() {
        surcharges.seal_fee
    } else {
        Decimal::ZERO
    };

    let lines = vec![
        ChargeLine::new("base_freight", base),
        ChargeLine::new("bunker_adjustment", base * surcharges.baf_percent / dec!(100)),
        ChargeLine::new("currency_adjustment", base * surcharges.caf_percent / dec!(100)),
        ChargeLine::new("terminal_handling_origin", surcharges.thc_origin),
        ChargeLine::new("terminal_handling_destination", surcharges.thc_destination),
        ChargeLine::new("documentation", surcharges.documentation_fee),
        ChargeLine::new("seal", seal),
    ];

    let mut breakdown = CostBreakdown::new(
        TransportMode::Sea,
        lane,
        lines,
        rates.validity_days.sea,
    );
    breakdown.container = Some(container);
    breakdown.chargeable_units = chargeable_units;
    Ok(breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ReferenceData;

    fn rates() -> RateTable {
        ReferenceData::embedded().unwrap().rates
    }

    fn cargo(weight: Decimal, volume: Decimal) -> Cargo {
        Cargo::new(weight, volume).unwrap()
    }

    #[test]
    fn test_lcl_japan_china() {
        let quote = sea_freight_cost(
            &rates(),
            "Japan",
            "China",
            cargo(dec!(500), dec!(2)),
            ContainerType::Lcl,
        )
        .unwrap();

        assert_eq!(quote.chargeable_units, Some(dec!(2)));
        assert_eq!(quote.line("base_freight"), Some(dec!(90)));
        assert_eq!(quote.line("bunker_adjustment"), Some(dec!(13.5)));
        assert_eq!(quote.line("currency_adjustment"), Some(dec!(4.5)));
        assert_eq!(quote.line("terminal_handling_origin"), Some(dec!(150)));
        assert_eq!(quote.line("terminal_handling_destination"), Some(dec!(180)));
        assert_eq!(quote.line("documentation"), Some(dec!(50)));
        assert_eq!(quote.line("seal"), Some(Decimal::ZERO));
        assert_eq!(quote.total, dec!(488.0));
        assert_eq!(quote.validity_days, 30);
        assert_eq!(quote.lane, "Japan-China");
    }

    #[test]
    fn test_lcl_heavy_cargo_billed_by_weight() {
        let quote = sea_freight_cost(
            &rates(),
            "Japan",
            "Thailand",
            cargo(dec!(3500), dec!(1.2)),
            ContainerType::Lcl,
        )
        .unwrap();

        assert_eq!(quote.chargeable_units, Some(dec!(3.5)));
        assert_eq!(quote.line("base_freight"), Some(dec!(297.5)));
    }

    #[test]
    fn test_fcl_is_flat_and_sealed() {
        let rates = rates();
        let small = sea_freight_cost(&rates, "Japan", "USA", cargo(dec!(100), dec!(1)), ContainerType::Forty)
            .unwrap();
        let full = sea_freight_cost(&rates, "Japan", "USA", cargo(dec!(20000), dec!(60)), ContainerType::Forty)
            .unwrap();

        assert_eq!(small.total, full.total);
        assert_eq!(small.line("base_freight"), Some(dec!(4500)));
        assert_eq!(small.line("seal"), Some(dec!(15)));
        assert_eq!(small.chargeable_units, None);
        // 4500 + 675 + 225 + 150 + 180 + 50 + 15
        assert_eq!(small.total, dec!(5795));
    }

    #[test]
    fn test_lcl_monotonic_in_chargeable_units() {
        let rates = rates();
        for lane in ["China", "Thailand", "USA", "Europe"] {
            let mut previous = Decimal::ZERO;
            for volume in [dec!(0), dec!(0.5), dec!(1), dec!(2.25), dec!(7), dec!(30)] {
                let quote = sea_freight_cost(&rates, "Japan", lane, cargo(dec!(0), volume), ContainerType::Lcl)
                    .unwrap();
                assert!(quote.total >= previous, "{lane} not monotonic at {volume}");
                previous = quote.total;
            }
        }
    }

    #[test]
    fn test_unknown_lane() {
        let err = sea_freight_cost(&rates(), "Japan", "Brazil", cargo(dec!(1), dec!(1)), ContainerType::Lcl)
            .unwrap_err();
        assert!(matches!(err, AdvisorError::UnknownLane { mode: "sea", ref lane } if lane == "Japan-Brazil"));
    }

    #[test]
    fn test_total_equals_sum_of_lines() {
        let quote = sea_freight_cost(
            &rates(),
            "Japan",
            "China",
            cargo(dec!(333), dec!(1.337)),
            ContainerType::Lcl,
        )
        .unwrap();
        let sum: Decimal = quote.lines.iter().map(|l| l.amount).sum();
        assert_eq!(quote.total, sum);
    }
}
