//! Rate table: per-lane sea and air prices plus surcharge schedules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AdvisorError, Result};
use crate::model::{ContainerType, TransportMode};

/// Lower bounds (kg) of air tiers 2..5; tier 1 starts at zero
pub const AIR_TIER_BOUNDS: [u32; 4] = [45, 100, 300, 500];

const AIR_TIER_LABELS: [&str; 5] = ["<45kg", "45-100kg", "100-300kg", "300-500kg", ">500kg"];

/// Lane key in `{origin}-{destination}` form
pub fn lane_key(origin_country: &str, destination_country: &str) -> String {
    format!("{}-{}", origin_country.trim(), destination_country.trim())
}

/// Sea prices for one lane
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeaRate {
    /// Flat price of a 20-foot container
    #[serde(rename = "20ft")]
    pub twenty_ft: Decimal,

    /// Flat price of a 40-foot container
    #[serde(rename = "40ft")]
    pub forty_ft: Decimal,

    /// Price per chargeable unit (CBM, or tonne when heavier)
    #[serde(rename = "LCL")]
    pub lcl_per_unit: Decimal,
}

impl SeaRate {
    /// Unit price for LCL, flat container price for FCL
    pub fn price(&self, container: ContainerType) -> Decimal {
        match container {
            ContainerType::Lcl => self.lcl_per_unit,
            ContainerType::Twenty => self.twenty_ft,
            ContainerType::Forty => self.forty_ft,
        }
    }
}

/// Air prices for one lane
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AirRate {
    /// Floor on the base freight
    pub min_charge: Decimal,

    /// Per-kg rates for `[0,45) [45,100) [100,300) [300,500) [500,∞)`
    pub tier_rates: [Decimal; 5],
}

/// The weight band a chargeable weight falls into
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AirTier {
    pub label: &'static str,
    pub lower_kg: Decimal,
    pub upper_kg: Option<Decimal>,
    pub rate_per_kg: Decimal,
}

impl AirRate {
    /// Select the tier by half-open `[lower, upper)` bands
    pub fn tier_for(&self, chargeable_kg: Decimal) -> AirTier {
        let index = AIR_TIER_BOUNDS
            .iter()
            .position(|bound| chargeable_kg < Decimal::from(*bound))
            .unwrap_or(AIR_TIER_BOUNDS.len());

        let lower_kg = match index {
            0 => Decimal::ZERO,
            i => Decimal::from(AIR_TIER_BOUNDS[i - 1]),
        };

        AirTier {
            label: AIR_TIER_LABELS[index],
            lower_kg,
            upper_kg: AIR_TIER_BOUNDS.get(index).map(|b| Decimal::from(*b)),
            rate_per_kg: self.tier_rates[index],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeaSurcharges {
    /// Bunker adjustment factor, percent of base freight
    pub baf_percent: Decimal,
    /// Currency adjustment factor, percent of base freight
    pub caf_percent: Decimal,
    pub thc_origin: Decimal,
    pub thc_destination: Decimal,
    pub documentation_fee: Decimal,
    /// Charged on FCL only
    pub seal_fee: Decimal,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AirSurcharges {
    pub fuel_percent: Decimal,
    pub security_per_kg: Decimal,
    pub awb_fee: Decimal,
    /// cm³ per kg used for volumetric weight
    pub dimensional_factor: Decimal,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InsuranceTerms {
    pub rate: Decimal,
    pub minimum_premium: Decimal,
    /// Share of cargo value insured (1.1 = 110%)
    pub insured_value_factor: Decimal,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ValidityDays {
    pub sea: u32,
    pub air: u32,
}

impl ValidityDays {
    pub fn for_mode(&self, mode: TransportMode) -> u32 {
        match mode {
            TransportMode::Sea => self.sea,
            TransportMode::Air => self.air,
        }
    }
}

/// All pricing parameters, keyed by lane
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RateTable {
    pub sea_lanes: BTreeMap<String, SeaRate>,
    pub air_lanes: BTreeMap<String, AirRate>,
    pub sea_surcharges: SeaSurcharges,
    pub air_surcharges: AirSurcharges,
    pub insurance: InsuranceTerms,
    pub validity_days: ValidityDays,
}

impl RateTable {
    /// Case-insensitive sea lane lookup; returns the canonical lane key
    pub fn sea_lane(&self, origin: &str, destination: &str) -> Option<(&str, &SeaRate)> {
        find_lane(&self.sea_lanes, origin, destination)
    }

    /// Case-insensitive air lane lookup; returns the canonical lane key
    pub fn air_lane(&self, origin: &str, destination: &str) -> Option<(&str, &AirRate)> {
        find_lane(&self.air_lanes, origin, destination)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for key in self.sea_lanes.keys().chain(self.air_lanes.keys()) {
            validate_lane_key(key)?;
        }

        for (lane, rate) in &self.air_lanes {
            if rate.tier_rates.windows(2).any(|w| w[1] > w[0]) {
                return Err(AdvisorError::DataInvariant(format!(
                    "air tier rates for {} must be non-increasing",
                    lane
                )));
            }
            if rate.tier_rates.iter().any(|r| r.is_sign_negative()) || rate.min_charge.is_sign_negative() {
                return Err(AdvisorError::DataInvariant(format!(
                    "air rates for {} must not be negative",
                    lane
                )));
            }
        }

        for (lane, rate) in &self.sea_lanes {
            if [rate.twenty_ft, rate.forty_ft, rate.lcl_per_unit]
                .iter()
                .any(|r| r.is_sign_negative())
            {
                return Err(AdvisorError::DataInvariant(format!(
                    "sea rates for {} must not be negative",
                    lane
                )));
            }
        }

        if self.air_surcharges.dimensional_factor <= Decimal::ZERO {
            return Err(AdvisorError::DataInvariant(
                "dimensional factor must be positive".into(),
            ));
        }

        Ok(())
    }
}

fn find_lane<'a, T>(
    lanes: &'a BTreeMap<String, T>,
    origin: &str,
    destination: &str,
) -> Option<(&'a str, &'a T)> {
    let wanted = lane_key(origin, destination);
    lanes
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(&wanted))
        .map(|(key, rate)| (key.as_str(), rate))
}

fn validate_lane_key(key: &str) -> Result<()> {
    match key.split_once('-') {
        Some((origin, destination))
            if !origin.trim().is_empty()
                && !destination.trim().is_empty()
                && !destination.contains('-') =>
        {
            Ok(())
        }
        _ => Err(AdvisorError::DataInvariant(format!(
            "lane key '{}' must have the form Origin-Destination",
            key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn china_air() -> AirRate {
        AirRate {
            min_charge: dec!(80),
            tier_rates: [dec!(8.5), dec!(6.5), dec!(5.0), dec!(4.2), dec!(3.5)],
        }
    }

    #[test]
    fn test_tier_boundaries_are_half_open() {
        let rate = china_air();

        assert_eq!(rate.tier_for(dec!(44.999)).label, "<45kg");
        assert_eq!(rate.tier_for(dec!(45)).label, "45-100kg");
        assert_eq!(rate.tier_for(dec!(99.99)).rate_per_kg, dec!(6.5));
        assert_eq!(rate.tier_for(dec!(100)).rate_per_kg, dec!(5.0));
        assert_eq!(rate.tier_for(dec!(300)).rate_per_kg, dec!(4.2));
        assert_eq!(rate.tier_for(dec!(499.99)).label, "300-500kg");

        let top = rate.tier_for(dec!(500));
        assert_eq!(top.label, ">500kg");
        assert_eq!(top.lower_kg, dec!(500));
        assert_eq!(top.upper_kg, None);
        assert_eq!(rate.tier_for(Decimal::ZERO).upper_kg, Some(dec!(45)));
    }

    #[test]
    fn test_lane_lookup_is_case_insensitive() {
        let mut sea_lanes = BTreeMap::new();
        sea_lanes.insert(
            "Japan-China".to_string(),
            SeaRate {
                twenty_ft: dec!(150),
                forty_ft: dec!(280),
                lcl_per_unit: dec!(45),
            },
        );

        let (key, rate) = find_lane(&sea_lanes, "japan", " CHINA ").unwrap();
        assert_eq!(key, "Japan-China");
        assert_eq!(rate.price(ContainerType::Forty), dec!(280));
        assert!(find_lane(&sea_lanes, "China", "Japan").is_none());
    }

    #[test]
    fn test_lane_key_validation() {
        assert!(validate_lane_key("Japan-USA").is_ok());
        assert!(validate_lane_key("JapanUSA").is_err());
        assert!(validate_lane_key("-USA").is_err());
        assert!(validate_lane_key("Japan-USA-Mexico").is_err());
    }
}
