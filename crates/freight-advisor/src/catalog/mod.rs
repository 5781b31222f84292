//! Reference Data
//!
//! Routes, rates and customs regulations. The tables ship compiled into the
//! crate and can be replaced by a directory holding the same three JSON files.

mod customs;
mod rates;

pub use customs::{
    hs_prefix, BilateralForm, CustomsProfile, DocumentNote, HsCode, PreferentialOrigin,
    Regulations,
};
pub use rates::{
    lane_key, AirRate, AirSurcharges, AirTier, InsuranceTerms, RateTable, SeaRate,
    SeaSurcharges, ValidityDays, AIR_TIER_BOUNDS,
};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::error::{AdvisorError, Result};
use crate::model::{RouteRecord, TransportMode};

pub const ROUTES_FILE: &str = "routes.json";
pub const RATES_FILE: &str = "rates.json";
pub const REGULATIONS_FILE: &str = "regulations.json";

const EMBEDDED_ROUTES: &str = include_str!("../../data/routes.json");
const EMBEDDED_RATES: &str = include_str!("../../data/rates.json");
const EMBEDDED_REGULATIONS: &str = include_str!("../../data/regulations.json");

/// Scheduled services, in table order
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteTable {
    pub sea_routes: Vec<RouteRecord>,
    pub air_routes: Vec<RouteRecord>,
}

impl RouteTable {
    pub fn for_mode(&self, mode: TransportMode) -> &[RouteRecord] {
        match mode {
            TransportMode::Sea => &self.sea_routes,
            TransportMode::Air => &self.air_routes,
        }
    }

    fn validate(&self) -> Result<()> {
        for route in self.sea_routes.iter().chain(&self.air_routes) {
            if route.carriers.is_empty() {
                return Err(AdvisorError::DataInvariant(format!(
                    "route {} has no carriers",
                    route.id
                )));
            }
        }
        Ok(())
    }
}

/// The three static tables, validated together
#[derive(Clone, Debug)]
pub struct ReferenceData {
    pub routes: RouteTable,
    pub rates: RateTable,
    pub regulations: Regulations,
}

impl ReferenceData {
    /// Parse the tables compiled into the crate
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_ROUTES, EMBEDDED_RATES, EMBEDDED_REGULATIONS)
    }

    /// Process-wide copy of the embedded tables, parsed on first use
    pub fn shared() -> Result<Arc<Self>> {
        static SHARED: OnceLock<Arc<ReferenceData>> = OnceLock::new();

        if let Some(data) = SHARED.get() {
            return Ok(data.clone());
        }

        let data = Arc::new(Self::embedded()?);
        Ok(SHARED.get_or_init(|| data).clone())
    }

    /// Read `routes.json`, `rates.json` and `regulations.json` from `dir`
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let read = |file: &str| {
            std::fs::read_to_string(dir.join(file)).map_err(|e| AdvisorError::DataLoad {
                file: dir.join(file).display().to_string(),
                reason: e.to_string(),
            })
        };

        let data = Self::from_json(&read(ROUTES_FILE)?, &read(RATES_FILE)?, &read(REGULATIONS_FILE)?)?;
        tracing::info!(dir = %dir.display(), "Loaded reference data from disk");
        Ok(data)
    }

    pub fn from_json(routes: &str, rates: &str, regulations: &str) -> Result<Self> {
        let data = Self {
            routes: parse(ROUTES_FILE, routes)?,
            rates: parse(RATES_FILE, rates)?,
            regulations: parse(REGULATIONS_FILE, regulations)?,
        };
        data.validate()?;

        tracing::debug!(
            sea_routes = data.routes.sea_routes.len(),
            air_routes = data.routes.air_routes.len(),
            sea_lanes = data.rates.sea_lanes.len(),
            air_lanes = data.rates.air_lanes.len(),
            countries = data.regulations.countries.len(),
            "Reference data parsed"
        );
        Ok(data)
    }

    pub fn validate(&self) -> Result<()> {
        self.routes.validate()?;
        self.rates.validate()?;
        self.regulations.validate()
    }
}

fn parse<T: DeserializeOwned>(file: &str, json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| AdvisorError::DataLoad {
        file: file.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_embedded_tables_load() {
        let data = ReferenceData::embedded().unwrap();

        assert_eq!(data.routes.sea_routes.len(), 5);
        assert_eq!(data.routes.air_routes.len(), 3);
        assert_eq!(data.routes.sea_routes[0].id, "SEA001");
        assert_eq!(data.rates.sea_lanes.len(), 4);
        assert_eq!(data.rates.air_lanes.len(), 3);
        assert_eq!(data.rates.air_surcharges.dimensional_factor, dec!(6000));
        assert_eq!(data.rates.validity_days.sea, 30);
        assert_eq!(data.regulations.countries.len(), 3);
        assert_eq!(data.regulations.default_duty_rate, dec!(0.05));
    }

    #[test]
    fn test_shared_returns_same_instance() {
        let a = ReferenceData::shared().unwrap();
        let b = ReferenceData::shared().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_customs_lookups() {
        let data = ReferenceData::embedded().unwrap();
        let regs = &data.regulations;

        let (name, china) = regs.profile("china").unwrap();
        assert_eq!(name, "China");
        assert_eq!(china.clearance_fee_total(), dec!(220));
        assert_eq!(regs.default_profile().unwrap().0, "China");
        assert!(regs.profile("Brazil").is_none());

        let (heading, info) = regs.hs_code("847989").unwrap();
        assert_eq!(heading, "8479");
        assert_eq!(info.duty_rate, dec!(0.05));
        assert!(matches!(regs.hs_code("9999"), Err(AdvisorError::UnknownHsCode(_))));

        assert_eq!(regs.export_documents_for("JAPAN").len(), 1);
        assert!(regs.export_documents_for("USA").is_empty());
    }

    #[test]
    fn test_preferential_notes() {
        let data = ReferenceData::embedded().unwrap();
        let regs = &data.regulations;

        assert_eq!(
            regs.preferential_note("Japan", "Thailand").as_deref(),
            Some("Form JTEPA for Japan-Thailand EPA benefits")
        );
        assert_eq!(
            regs.preferential_note("Japan", "China").as_deref(),
            Some("RCEP Certificate of Origin for reduced duties")
        );
        assert!(regs.preferential_note("Japan", "USA").is_none());
    }

    #[test]
    fn test_increasing_air_tiers_are_rejected() {
        let rates = EMBEDDED_RATES.replace(r#"["8.5", "6.5""#, r#"["8.5", "9.5""#);
        let err = ReferenceData::from_json(EMBEDDED_ROUTES, &rates, EMBEDDED_REGULATIONS).unwrap_err();
        assert!(matches!(err, AdvisorError::DataInvariant(_)));
    }

    #[test]
    fn test_route_without_carriers_is_rejected() {
        let routes = EMBEDDED_ROUTES.replace(r#"["Maersk", "MSC"]"#, "[]");
        let err = ReferenceData::from_json(&routes, EMBEDDED_RATES, EMBEDDED_REGULATIONS).unwrap_err();
        assert!(matches!(err, AdvisorError::DataInvariant(_)));
    }

    #[test]
    fn test_missing_default_profile_is_rejected() {
        let regs = EMBEDDED_REGULATIONS.replace(
            r#""default_profile": "China""#,
            r#""default_profile": "Atlantis""#,
        );
        let err = ReferenceData::from_json(EMBEDDED_ROUTES, EMBEDDED_RATES, &regs).unwrap_err();
        assert!(matches!(err, AdvisorError::DataInvariant(_)));
    }

    #[test]
    fn test_malformed_json_names_the_file() {
        let err = ReferenceData::from_json("{", EMBEDDED_RATES, EMBEDDED_REGULATIONS).unwrap_err();
        match err {
            AdvisorError::DataLoad { file, .. } => assert_eq!(file, ROUTES_FILE),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_dir_missing_files() {
        let err = ReferenceData::load_dir("/nonexistent/freight-data").unwrap_err();
        assert!(matches!(err, AdvisorError::DataLoad { .. }));
    }
}
