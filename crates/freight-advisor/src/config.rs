//! Advisor Configuration
//!
//! Environment-driven settings. Tests build configs through
//! [`AdvisorConfig::from_lookup`] instead of mutating the process environment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::catalog::ReferenceData;
use crate::error::{AdvisorError, Result};

pub const ENV_CUSTOMS_POLICY: &str = "FREIGHT_CUSTOMS_POLICY";
pub const ENV_DATA_DIR: &str = "FREIGHT_DATA_DIR";
pub const ENV_HISTORY_LIMIT: &str = "FREIGHT_HISTORY_LIMIT";

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// What to do when a destination country or HS heading is not tabled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomsPolicy {
    /// Use the designated default profile / duty rate and flag it in the result
    #[default]
    Fallback,
    /// Report a lookup miss
    Strict,
}

impl FromStr for CustomsPolicy {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fallback" => Ok(CustomsPolicy::Fallback),
            "strict" => Ok(CustomsPolicy::Strict),
            other => Err(AdvisorError::Config(format!(
                "{} must be 'fallback' or 'strict', got '{}'",
                ENV_CUSTOMS_POLICY, other
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvisorConfig {
    pub customs_policy: CustomsPolicy,

    /// Directory with replacement JSON tables; `None` uses the embedded ones
    pub data_dir: Option<PathBuf>,

    /// Most-recent quotes returned by history queries
    pub history_limit: usize,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            customs_policy: CustomsPolicy::default(),
            data_dir: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl AdvisorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let customs_policy = match get(ENV_CUSTOMS_POLICY) {
            Some(value) => value.parse()?,
            None => CustomsPolicy::default(),
        };

        let history_limit = match get(ENV_HISTORY_LIMIT) {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    return Err(AdvisorError::Config(format!(
                        "{} must be a positive integer, got '{}'",
                        ENV_HISTORY_LIMIT, value
                    )));
                }
            },
            None => DEFAULT_HISTORY_LIMIT,
        };

        Ok(Self {
            customs_policy,
            data_dir: get(ENV_DATA_DIR).map(|dir| PathBuf::from(dir.trim())),
            history_limit,
        })
    }

    /// Tables from `data_dir` when set, otherwise the shared embedded copy
    pub fn load_reference_data(&self) -> Result<Arc<ReferenceData>> {
        match &self.data_dir {
            Some(dir) => ReferenceData::load_dir(dir).map(Arc::new),
            None => ReferenceData::shared(),
        }
    }
}
