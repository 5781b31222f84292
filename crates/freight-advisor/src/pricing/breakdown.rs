//! Itemized cost breakdowns and cargo measurements.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::catalog::AirTier;
use crate::error::{AdvisorError, Result};
use crate::model::{ContainerType, TransportMode};

pub const CURRENCY: &str = "USD";

/// Round to cents, half away from zero
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Heaviest shipment accepted for pricing
pub const MAX_WEIGHT_KG: Decimal = dec!(1_000_000_000);

/// Largest shipment volume accepted for pricing
pub const MAX_VOLUME_CBM: Decimal = dec!(1_000_000_000);

/// Upper bound on cargo values and freight amounts
pub const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000_000);

/// Reject `value` when negative or above `max`
pub(crate) fn check_range(name: &str, value: Decimal, max: Decimal) -> Result<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AdvisorError::invalid(format!("{} must not be negative", name)));
    }
    if value > max {
        return Err(AdvisorError::invalid(format!("{} must not exceed {}", name, max)));
    }
    Ok(value)
}

/// Measured weight and volume of a shipment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Cargo {
    pub weight_kg: Decimal,
    pub volume_cbm: Decimal,
}

impl Cargo {
    pub fn new(weight_kg: Decimal, volume_cbm: Decimal) -> Result<Self> {
        Ok(Self {
            weight_kg: check_range("weight_kg", weight_kg, MAX_WEIGHT_KG)?,
            volume_cbm: check_range("volume_cbm", volume_cbm, MAX_VOLUME_CBM)?,
        })
    }
}

/// One named charge
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChargeLine {
    pub name: &'static str,
    pub amount: Decimal,
}

impl ChargeLine {
    /// Amount is rounded to cents on construction
    pub fn new(name: &'static str, amount: Decimal) -> Self {
        Self {
            name,
            amount: round_cents(amount),
        }
    }
}

/// Weight figures behind an air quote
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AirWeightDetail {
    pub actual_weight_kg: Decimal,
    pub volumetric_weight_kg: Decimal,
    pub chargeable_weight_kg: Decimal,
    pub tier: AirTier,
}

/// A freight quote, itemized
#[derive(Clone, Debug, Serialize)]
pub struct CostBreakdown {
    pub mode: TransportMode,

    /// Canonical lane key, e.g. "Japan-China"
    pub lane: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerType>,

    /// Sea LCL only: max(volume, weight / 1000)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chargeable_units: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<AirWeightDetail>,

    pub lines: Vec<ChargeLine>,

    /// Sum of the rounded lines
    pub total: Decimal,

    pub currency: &'static str,
    pub validity_days: u32,
}

impl CostBreakdown {
    pub(crate) fn new(
        mode: TransportMode,
        lane: impl Into<String>,
        lines: Vec<ChargeLine>,
        validity_days: u32,
    ) -> Self {
        let total = lines.iter().map(|l| l.amount).sum();
        Self {
            mode,
            lane: lane.into(),
            container: None,
            chargeable_units: None,
            weight: None,
            lines,
            total,
            currency: CURRENCY,
            validity_days,
        }
    }

    /// Amount of the named line
    pub fn line(&self, name: &str) -> Option<Decimal> {
        self.lines.iter().find(|l| l.name == name).map(|l| l.amount)
    }
}
