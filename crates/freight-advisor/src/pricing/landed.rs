//! Landed Cost
//!
//! Freight + insurance + duty + VAT + clearance fees. Duty is levied on FOB
//! value; VAT on FOB value plus duty. Every component is rounded to cents
//! before summing, so CIF and the grand total add up exactly over the
//! reported figures.

use rust_decimal::Decimal;
use serde::Serialize;

use super::breakdown::{check_range, round_cents, CURRENCY, MAX_AMOUNT};
use crate::catalog::{hs_prefix, ReferenceData};
use crate::config::CustomsPolicy;
use crate::error::{AdvisorError, Result};

pub const DEFAULT_HS_CODE: &str = "8479";

#[derive(Clone, Debug)]
pub struct LandedCostRequest {
    pub freight_cost: Decimal,

    /// FOB value
    pub cargo_value: Decimal,

    pub destination_country: String,
    pub hs_code: String,
    pub include_insurance: bool,
}

impl LandedCostRequest {
    pub fn new(freight_cost: Decimal, cargo_value: Decimal, destination_country: impl Into<String>) -> Self {
        Self {
            freight_cost,
            cargo_value,
            destination_country: destination_country.into(),
            hs_code: DEFAULT_HS_CODE.to_string(),
            include_insurance: true,
        }
    }

    pub fn hs_code(mut self, hs_code: impl Into<String>) -> Self {
        self.hs_code = hs_code.into();
        self
    }

    pub fn include_insurance(mut self, include: bool) -> Self {
        self.include_insurance = include;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClearanceFees {
    pub documentation: Decimal,
    pub inspection: Decimal,
    pub handling: Decimal,
    pub total: Decimal,
}

#[derive(Clone, Debug, Serialize)]
pub struct LandedCostBreakdown {
    /// Country whose customs profile was applied
    pub customs_profile: String,
    pub hs_code: String,

    pub cargo_value_fob: Decimal,
    pub freight_cost: Decimal,
    pub insurance: Decimal,
    pub cif_value: Decimal,

    pub duty_rate: Decimal,
    pub duty: Decimal,
    pub vat_rate: Decimal,
    pub vat: Decimal,

    pub customs_fees: ClearanceFees,
    pub grand_total: Decimal,
    pub currency: &'static str,

    /// Destination had no profile; the default profile was used
    pub fallback_profile: bool,

    /// HS heading had no tabled rate; the default duty rate was used
    pub fallback_duty_rate: bool,
}

pub fn landed_cost(
    data: &ReferenceData,
    policy: CustomsPolicy,
    request: &LandedCostRequest,
) -> Result<LandedCostBreakdown> {
    if request.cargo_value <= Decimal::ZERO {
        return Err(AdvisorError::invalid("cargo_value must be greater than zero"));
    }
    check_range("cargo_value", request.cargo_value, MAX_AMOUNT)?;
    check_range("freight_cost", request.freight_cost, MAX_AMOUNT)?;
    let heading = hs_prefix(&request.hs_code)?;

    let regs = &data.regulations;
    let destination = request.destination_country.trim();

    let (profile_name, profile, fallback_profile) = match regs.profile(destination) {
        Some((name, profile)) => (name, profile, false),
        None if policy == CustomsPolicy::Fallback => {
            let (name, profile) = regs
                .default_profile()
                .ok_or_else(|| AdvisorError::UnknownCountry(regs.default_profile.clone()))?;
            tracing::warn!(
                destination = %destination,
                profile = %name,
                "No customs profile for destination, using default"
            );
            (name, profile, true)
        }
        None => return Err(AdvisorError::UnknownCountry(destination.to_string())),
    };

    let (duty_rate, fallback_duty_rate) = match regs.hs_code(heading) {
        Ok((_, info)) => (info.duty_rate, false),
        Err(AdvisorError::UnknownHsCode(_)) if policy == CustomsPolicy::Fallback => {
            tracing::warn!(hs_code = %heading, rate = %regs.default_duty_rate, "Unknown HS heading, using default duty rate");
            (regs.default_duty_rate, true)
        }
        Err(AdvisorError::UnknownHsCode(_)) => {
            return Err(AdvisorError::UnknownHsCode(request.hs_code.trim().to_string()));
        }
        Err(e) => return Err(e),
    };

    let terms = &data.rates.insurance;
    let fob = round_cents(request.cargo_value);
    let freight = round_cents(request.freight_cost);

    let insurance = if request.include_insurance {
        round_cents((fob * terms.insured_value_factor * terms.rate).max(terms.minimum_premium))
    } else {
        Decimal::ZERO
    };
    let cif_value = fob + freight + insurance;

    let duty = round_cents(fob * duty_rate);
    let vat = round_cents((fob + duty) * profile.vat_rate);

    let customs_fees = ClearanceFees {
        documentation: round_cents(profile.documentation_fee),
        inspection: round_cents(profile.inspection_fee),
        handling: round_cents(profile.handling_fee),
        total: round_cents(profile.documentation_fee)
            + round_cents(profile.inspection_fee)
            + round_cents(profile.handling_fee),
    };

    let grand_total = cif_value + duty + vat + customs_fees.total;

    Ok(LandedCostBreakdown {
        customs_profile: profile_name.to_string(),
        hs_code: request.hs_code.trim().to_string(),
        cargo_value_fob: fob,
        freight_cost: freight,
        insurance,
        cif_value,
        duty_rate,
        duty,
        vat_rate: profile.vat_rate,
        vat,
        customs_fees,
        grand_total,
        currency: CURRENCY,
        fallback_profile,
        fallback_duty_rate,
    })
}
