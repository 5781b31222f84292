//! Air Freight
//!
//! Billed on chargeable weight: the greater of actual weight and volumetric
//! weight (cm³ / dimensional factor).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::breakdown::{round_cents, AirWeightDetail, Cargo, ChargeLine, CostBreakdown};
use crate::catalog::{lane_key, RateTable};
use crate::error::{AdvisorError, Result};
use crate::model::TransportMode;

const CM3_PER_CBM: Decimal = dec!(1000000);

/// Volumetric weight in kg for `volume_cbm`
pub fn volumetric_weight(volume_cbm: Decimal, dimensional_factor: Decimal) -> Decimal {
    volume_cbm * CM3_PER_CBM / dimensional_factor
}

pub fn air_freight_cost(
    rates: &RateTable,
    origin_country: &str,
    destination_country: &str,
    cargo: Cargo,
) -> Result<CostBreakdown> {
    let (lane, rate) = rates
        .air_lane(origin_country, destination_country)
        .ok_or_else(|| AdvisorError::UnknownLane {
            mode: TransportMode::Air.as_str(),
            lane: lane_key(origin_country, destination_country),
        })?;
    let surcharges = &rates.air_surcharges;

    let volumetric = volumetric_weight(cargo.volume_cbm, surcharges.dimensional_factor);
    let chargeable = cargo.weight_kg.max(volumetric);
    let tier = rate.tier_for(chargeable);

    let base = (chargeable * tier.rate_per_kg).max(rate.min_charge);

    let lines = vec![
        ChargeLine::new("base_freight", base),
        ChargeLine::new("fuel_surcharge", base * surcharges.fuel_percent / dec!(100)),
        ChargeLine::new("security_fee", chargeable * surcharges.security_per_kg),
        ChargeLine::new("airway_bill_fee", surcharges.awb_fee),
    ];

    let mut breakdown = CostBreakdown::new(
        TransportMode::Air,
        lane,
        lines,
        rates.validity_days.air,
    );
    breakdown.weight = Some(AirWeightDetail {
        actual_weight_kg: cargo.weight_kg,
        volumetric_weight_kg: round_cents(volumetric),
        chargeable_weight_kg: round_cents(chargeable),
        tier,
    });
    Ok(breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ReferenceData;

    fn rates() -> RateTable {
        ReferenceData::embedded().unwrap().rates
    }

    fn quote(weight: Decimal, volume: Decimal) -> CostBreakdown {
        air_freight_cost(&rates(), "Japan", "China", Cargo::new(weight, volume).unwrap()).unwrap()
    }

    #[test]
    fn test_japan_china_500kg() {
        let quote = quote(dec!(500), dec!(2));
        let weight = quote.weight.as_ref().unwrap();

        assert_eq!(weight.volumetric_weight_kg, dec!(333.33));
        assert_eq!(weight.chargeable_weight_kg, dec!(500));
        assert_eq!(weight.tier.label, ">500kg");
        assert_eq!(weight.tier.rate_per_kg, dec!(3.5));
        assert_eq!(quote.line("base_freight"), Some(dec!(1750)));
        assert_eq!(quote.line("fuel_surcharge"), Some(dec!(437.5)));
        assert_eq!(quote.line("security_fee"), Some(dec!(75)));
        assert_eq!(quote.line("airway_bill_fee"), Some(dec!(30)));
        assert_eq!(quote.total, dec!(2292.5));
        assert_eq!(quote.validity_days, 7);
    }

    #[test]
    fn test_chargeable_weight_is_larger_of_actual_and_volumetric() {
        // 1.2 CBM -> 200 kg volumetric
        let bulky = quote(dec!(50), dec!(1.2));
        let weight = bulky.weight.as_ref().unwrap();
        assert_eq!(weight.chargeable_weight_kg, dec!(200));
        assert_eq!(weight.tier.label, "100-300kg");
        assert_eq!(bulky.line("base_freight"), Some(dec!(1000)));
    }

    #[test]
    fn test_tier_boundary_tie_breaking() {
        let below = quote(dec!(44.999), dec!(0));
        assert_eq!(below.weight.unwrap().tier.label, "<45kg");

        let at = quote(dec!(45), dec!(0));
        assert_eq!(at.weight.unwrap().tier.label, "45-100kg");

        // 0.27 CBM is exactly 45 kg volumetric
        let volumetric_at = quote(dec!(10), dec!(0.27));
        assert_eq!(volumetric_at.weight.unwrap().tier.label, "45-100kg");

        for (kg, label) in [(dec!(100), "100-300kg"), (dec!(300), "300-500kg"), (dec!(500), ">500kg")] {
            assert_eq!(quote(kg, dec!(0)).weight.unwrap().tier.label, label);
        }
    }

    #[test]
    fn test_minimum_charge_floor() {
        let light = quote(dec!(2), dec!(0.001));
        // 2 kg * 8.5 = 17 < 80
        assert_eq!(light.line("base_freight"), Some(dec!(80)));
        assert_eq!(light.line("fuel_surcharge"), Some(dec!(20)));
        assert_eq!(light.line("security_fee"), Some(dec!(0.3)));
        assert_eq!(light.total, dec!(130.3));
    }

    #[test]
    fn test_unknown_lane() {
        let err = air_freight_cost(
            &rates(),
            "Japan",
            "Europe",
            Cargo::new(dec!(10), dec!(0.1)).unwrap(),
        )
        .unwrap_err();
        assert!(err.is_lookup_miss());
    }
}
