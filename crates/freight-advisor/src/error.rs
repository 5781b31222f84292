//! Error Types for Freight Advisor

use agent_core::ToolStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("No {mode} rates available for {lane}. Please contact sales for a custom quote.")]
    UnknownLane { mode: &'static str, lane: String },

    #[error("No customs profile for {0}")]
    UnknownCountry(String),

    #[error("HS code {0} not found in tariff table")]
    UnknownHsCode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to load {file}: {reason}")]
    DataLoad { file: String, reason: String },

    #[error("Reference data invariant violated: {0}")]
    DataInvariant(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AdvisorError {
    pub fn invalid(message: impl Into<String>) -> Self {
        AdvisorError::InvalidInput(message.into())
    }

    /// Status reported by a tool when this error ends a computation
    pub fn status(&self) -> ToolStatus {
        match self {
            AdvisorError::UnknownHsCode(_) => ToolStatus::NotFound,
            _ => ToolStatus::Error,
        }
    }

    /// Lookup misses are safe to branch on; everything else is a rejected request
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            AdvisorError::UnknownLane { .. }
                | AdvisorError::UnknownCountry(_)
                | AdvisorError::UnknownHsCode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_message_names_mode_and_lane() {
        let err = AdvisorError::UnknownLane {
            mode: "sea",
            lane: "Japan-Mars".into(),
        };
        assert_eq!(
            err.to_string(),
            "No sea rates available for Japan-Mars. Please contact sales for a custom quote."
        );
        assert!(err.is_lookup_miss());
        assert_eq!(err.status(), ToolStatus::Error);
    }

    #[test]
    fn test_invalid_input_is_not_lookup_miss() {
        let err = AdvisorError::invalid("weight must not be negative");
        assert!(!err.is_lookup_miss());
        assert_eq!(AdvisorError::UnknownHsCode("9999".into()).status(), ToolStatus::NotFound);
    }
}
