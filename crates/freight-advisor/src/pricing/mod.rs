//! Pricing
//!
//! Sea and air freight calculators, landed cost and option comparison.
//! All functions are pure over the reference data.

mod air;
mod breakdown;
mod compare;
mod landed;
mod sea;

pub use air::{air_freight_cost, volumetric_weight};
pub use breakdown::{
    round_cents, AirWeightDetail, Cargo, ChargeLine, CostBreakdown, CURRENCY, MAX_AMOUNT, MAX_VOLUME_CBM,
    MAX_WEIGHT_KG,
};
pub use compare::{
    compare_shipping_options, Comparison, ComparisonOutcome, ShippingOption, FCL_MIN_VOLUME_CBM,
    TWENTY_FT_MAX_VOLUME_CBM,
};
pub use landed::{
    landed_cost, ClearanceFees, LandedCostBreakdown, LandedCostRequest, DEFAULT_HS_CODE,
};
pub use sea::{sea_freight_cost, KG_PER_CBM};

use crate::catalog::RateTable;
use crate::error::Result;
use crate::model::{ContainerType, TransportMode};

/// Freight quote for either mode; the container applies to sea only
pub fn freight_cost(
    rates: &RateTable,
    mode: TransportMode,
    origin_country: &str,
    destination_country: &str,
    cargo: Cargo,
    container: ContainerType,
) -> Result<CostBreakdown> {
    match mode {
        TransportMode::Sea => sea_freight_cost(rates, origin_country, destination_country, cargo, container),
        TransportMode::Air => air_freight_cost(rates, origin_country, destination_country, cargo),
    }
}
