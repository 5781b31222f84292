//! Customs regulations, clearance fees and the HS duty table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AdvisorError, Result};

/// A country-specific document requirement
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNote {
    pub name: String,
    pub purpose: String,

    /// Applies only in some cases, e.g. "For certain goods"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

/// Import rules and clearance fees of one destination country
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomsProfile {
    pub documentation_fee: Decimal,
    pub inspection_fee: Decimal,
    pub handling_fee: Decimal,

    /// Fraction, e.g. 0.13
    pub vat_rate: Decimal,

    pub restricted_items: Vec<String>,
    pub prohibited_items: Vec<String>,
    pub required_documents: Vec<String>,
    pub special_zones: Vec<String>,

    /// Extra documents demanded at import
    #[serde(default)]
    pub import_documents: Vec<DocumentNote>,
}

impl CustomsProfile {
    /// Documentation + inspection + handling
    pub fn clearance_fee_total(&self) -> Decimal {
        self.documentation_fee + self.inspection_fee + self.handling_fee
    }
}

/// A Harmonized System heading
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HsCode {
    pub description: String,

    /// Range seen across destinations, e.g. "0-8%"
    pub typical_duty: String,

    /// Ad-valorem rate applied to FOB value
    pub duty_rate: Decimal,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BilateralForm {
    pub origin: String,
    pub destination: String,
    pub form: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PreferentialOrigin {
    #[serde(default)]
    pub rcep_destinations: Vec<String>,
    #[serde(default)]
    pub bilateral: Vec<BilateralForm>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Regulations {
    /// Profile used when a destination has none of its own
    pub default_profile: String,

    /// Duty rate used when an HS heading is not tabled
    pub default_duty_rate: Decimal,

    pub countries: BTreeMap<String, CustomsProfile>,

    /// Export declarations keyed by origin country
    #[serde(default)]
    pub export_documents: BTreeMap<String, Vec<DocumentNote>>,

    #[serde(default)]
    pub preferential_origin: PreferentialOrigin,

    /// Keyed by 4-digit heading
    pub hs_codes: BTreeMap<String, HsCode>,
}

impl Regulations {
    /// Case-insensitive profile lookup; returns the canonical country name
    pub fn profile(&self, country: &str) -> Option<(&str, &CustomsProfile)> {
        find_country(&self.countries, country)
    }

    pub fn default_profile(&self) -> Option<(&str, &CustomsProfile)> {
        self.profile(&self.default_profile)
    }

    /// Look up the heading named by the first four digits of `code`
    pub fn hs_code(&self, code: &str) -> Result<(&str, &HsCode)> {
        let prefix = hs_prefix(code)?;
        self.hs_codes
            .get_key_value(prefix)
            .map(|(key, info)| (key.as_str(), info))
            .ok_or_else(|| AdvisorError::UnknownHsCode(code.trim().to_string()))
    }

    pub fn export_documents_for(&self, origin: &str) -> &[DocumentNote] {
        find_country(&self.export_documents, origin)
            .map(|(_, docs)| docs.as_slice())
            .unwrap_or_default()
    }

    /// Preferential certificate of origin available for the lane, if any
    pub fn preferential_note(&self, origin: &str, destination: &str) -> Option<String> {
        let prefs = &self.preferential_origin;

        let bilateral = prefs.bilateral.iter().find(|b| {
            b.origin.eq_ignore_ascii_case(origin.trim())
                && b.destination.eq_ignore_ascii_case(destination.trim())
        });
        if let Some(agreement) = bilateral {
            return Some(agreement.form.clone());
        }

        prefs
            .rcep_destinations
            .iter()
            .any(|c| c.eq_ignore_ascii_case(destination.trim()))
            .then(|| "RCEP Certificate of Origin for reduced duties".to_string())
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.default_profile().is_none() {
            return Err(AdvisorError::DataInvariant(format!(
                "default customs profile '{}' is not defined",
                self.default_profile
            )));
        }

        for (country, profile) in &self.countries {
            if profile.vat_rate.is_sign_negative() || profile.clearance_fee_total().is_sign_negative() {
                return Err(AdvisorError::DataInvariant(format!(
                    "customs fees and VAT for {} must not be negative",
                    country
                )));
            }
        }

        for key in self.hs_codes.keys() {
            if key.len() != 4 || !key.bytes().all(|b| b.is_ascii_digit()) {
                return Err(AdvisorError::DataInvariant(format!(
                    "HS heading '{}' must be four digits",
                    key
                )));
            }
        }

        Ok(())
    }
}

/// The significant 4-digit heading of an HS code
pub fn hs_prefix(code: &str) -> Result<&str> {
    let code = code.trim();
    match code.get(..4) {
        Some(prefix) if prefix.bytes().all(|b| b.is_ascii_digit()) => Ok(prefix),
        _ => Err(AdvisorError::invalid(format!(
            "HS code '{}' must start with four digits",
            code
        ))),
    }
}

fn find_country<'a, T>(map: &'a BTreeMap<String, T>, country: &str) -> Option<(&'a str, &'a T)> {
    let country = country.trim();
    map.iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(country))
        .map(|(key, value)| (key.as_str(), value))
}
