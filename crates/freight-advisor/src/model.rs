//! Domain Models
//!
//! Core data types for freight quoting. Weights, volumes and money are
//! `rust_decimal::Decimal` everywhere - never use f64 for money!

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AdvisorError;

/// Sea or air carriage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Sea,
    Air,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Sea => "sea",
            TransportMode::Air => "air",
        }
    }

    /// Display name used in quotes ("Sea Freight", "Air Freight")
    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::Sea => "Sea Freight",
            TransportMode::Air => "Air Freight",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransportMode {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sea" | "sea freight" | "ocean" => Ok(TransportMode::Sea),
            "air" | "air freight" => Ok(TransportMode::Air),
            other => Err(AdvisorError::invalid(format!(
                "unknown transport mode '{}' (expected sea or air)",
                other
            ))),
        }
    }
}

/// Whether a route calls at an intermediate hub
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteType {
    Direct,
    Transshipment,
}

/// A port or airport
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Port or airport name (e.g., "Tokyo", "Narita")
    pub name: String,

    /// UN/LOCODE for ports, IATA code for airports
    pub code: String,

    pub country: String,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// A scheduled sea or air service between two endpoints
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub id: String,
    pub origin: Endpoint,
    pub destination: Endpoint,
    pub transit_time_days: u32,

    /// Free text, e.g. "Daily", "3 times/week"
    pub frequency: String,

    pub carriers: Vec<String>,
    pub route_type: RouteType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
}

impl RouteRecord {
    pub fn via_or_direct(&self) -> &str {
        self.via.as_deref().unwrap_or("Direct")
    }
}

/// Sea container option
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerType {
    /// Less-than-container load, billed by volume or weight
    #[default]
    #[serde(rename = "LCL")]
    Lcl,
    #[serde(rename = "20ft")]
    Twenty,
    #[serde(rename = "40ft")]
    Forty,
}

impl ContainerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerType::Lcl => "LCL",
            ContainerType::Twenty => "20ft",
            ContainerType::Forty => "40ft",
        }
    }

    pub fn is_fcl(&self) -> bool {
        !matches!(self, ContainerType::Lcl)
    }

    /// Label as shown next to the sea mode, e.g. "20ft FCL"
    pub fn label(&self) -> String {
        if self.is_fcl() {
            format!("{} FCL", self.as_str())
        } else {
            "LCL".to_string()
        }
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerType {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lcl" => Ok(ContainerType::Lcl),
            "20ft" | "20" => Ok(ContainerType::Twenty),
            "40ft" | "40" => Ok(ContainerType::Forty),
            other => Err(AdvisorError::invalid(format!(
                "unknown container type '{}' (expected LCL, 20ft or 40ft)",
                other
            ))),
        }
    }
}

/// How time-sensitive a shipment is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Urgent,
    #[default]
    Normal,
    Economy,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Urgent => "urgent",
            Urgency::Normal => "normal",
            Urgency::Economy => "economy",
        }
    }
}

impl FromStr for Urgency {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "urgent" => Ok(Urgency::Urgent),
            "normal" => Ok(Urgency::Normal),
            "economy" => Ok(Urgency::Economy),
            other => Err(AdvisorError::invalid(format!(
                "unknown urgency '{}' (expected urgent, normal or economy)",
                other
            ))),
        }
    }
}

/// Party carrying a cost or risk under an Incoterm
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Party {
    Buyer,
    Seller,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Party::Buyer => "Buyer",
            Party::Seller => "Seller",
        })
    }
}

/// Incoterms 2020 rules supported by the checklist
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Incoterm {
    Exw,
    #[default]
    Fob,
    Cfr,
    Cif,
    Dap,
    Ddp,
}

impl Incoterm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Incoterm::Exw => "EXW",
            Incoterm::Fob => "FOB",
            Incoterm::Cfr => "CFR",
            Incoterm::Cif => "CIF",
            Incoterm::Dap => "DAP",
            Incoterm::Ddp => "DDP",
        }
    }

    /// Who arranges cargo insurance
    pub fn insurance_by(&self) -> Party {
        match self {
            Incoterm::Exw | Incoterm::Fob | Incoterm::Cfr => Party::Buyer,
            Incoterm::Cif | Incoterm::Dap | Incoterm::Ddp => Party::Seller,
        }
    }

    /// Who pays main carriage
    pub fn freight_by(&self) -> Party {
        match self {
            Incoterm::Exw | Incoterm::Fob => Party::Buyer,
            _ => Party::Seller,
        }
    }
}

impl fmt::Display for Incoterm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Incoterm {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EXW" => Ok(Incoterm::Exw),
            "FOB" => Ok(Incoterm::Fob),
            "CFR" => Ok(Incoterm::Cfr),
            "CIF" => Ok(Incoterm::Cif),
            "DAP" => Ok(Incoterm::Dap),
            "DDP" => Ok(Incoterm::Ddp),
            other => Err(AdvisorError::invalid(format!(
                "unsupported Incoterm '{}' (expected EXW, FOB, CFR, CIF, DAP or DDP)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_type_parsing() {
        assert_eq!("lcl".parse::<ContainerType>().unwrap(), ContainerType::Lcl);
        assert_eq!("20FT".parse::<ContainerType>().unwrap(), ContainerType::Twenty);
        assert_eq!(" 40ft ".parse::<ContainerType>().unwrap(), ContainerType::Forty);
        assert!("40ft_HC".parse::<ContainerType>().is_err());
        assert_eq!(ContainerType::Twenty.label(), "20ft FCL");
        assert_eq!(ContainerType::Lcl.label(), "LCL");
    }

    #[test]
    fn test_urgency_defaults_to_normal() {
        assert_eq!(Urgency::default(), Urgency::Normal);
        assert_eq!("ECONOMY".parse::<Urgency>().unwrap(), Urgency::Economy);
        assert!("asap".parse::<Urgency>().is_err());
    }

    #[test]
    fn test_incoterm_responsibilities() {
        assert_eq!(Incoterm::Fob.insurance_by(), Party::Buyer);
        assert_eq!(Incoterm::Cfr.insurance_by(), Party::Buyer);
        assert_eq!(Incoterm::Cfr.freight_by(), Party::Seller);
        assert_eq!(Incoterm::Cif.insurance_by(), Party::Seller);
        assert_eq!("ddp".parse::<Incoterm>().unwrap(), Incoterm::Ddp);
        assert!("FCA".parse::<Incoterm>().is_err());
    }

    #[test]
    fn test_route_record_deserializes_without_via() {
        let json = r#"{
            "id": "AIR001",
            "origin": { "name": "Narita", "code": "NRT", "country": "Japan" },
            "destination": { "name": "Shanghai Pudong", "code": "PVG", "country": "China" },
            "transit_time_days": 1,
            "frequency": "Daily",
            "carriers": ["ANA Cargo"],
            "route_type": "Direct"
        }"#;
        let route: RouteRecord = serde_json::from_str(json).unwrap();
        assert_eq!(route.via_or_direct(), "Direct");
        assert_eq!(route.origin.to_string(), "Narita (NRT)");
        assert_eq!(route.route_type, RouteType::Direct);
    }
}
