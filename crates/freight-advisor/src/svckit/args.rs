//! Argument decoding shared by the tools.
//!
//! Numbers arrive as JSON numbers or numeric strings and are converted to
//! `Decimal` through their decimal text, never through `f64` arithmetic.

use agent_core::{ToolCall, ToolResult};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};
use std::str::FromStr;

use crate::error::{AdvisorError, Result};
use crate::pricing::Cargo;

pub(crate) fn required_str<'a>(call: &'a ToolCall, key: &str) -> Result<&'a str> {
    call.str_arg(key)
        .ok_or_else(|| AdvisorError::invalid(format!("{} is required", key)))
}

pub(crate) fn decimal_arg(call: &ToolCall, key: &str) -> Result<Option<Decimal>> {
    let Some(value) = call.value(key) else {
        return Ok(None);
    };

    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => {
            return Err(AdvisorError::invalid(format!(
                "{} must be a number, got {}",
                key, other
            )));
        }
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(Some)
        .map_err(|_| AdvisorError::invalid(format!("{} must be a number, got '{}'", key, text)))
}

pub(crate) fn required_decimal(call: &ToolCall, key: &str) -> Result<Decimal> {
    decimal_arg(call, key)?.ok_or_else(|| AdvisorError::invalid(format!("{} is required", key)))
}

/// Parse an enumerated argument, falling back to its default when absent
pub(crate) fn parsed_or_default<T>(call: &ToolCall, key: &str) -> Result<T>
where
    T: FromStr<Err = AdvisorError> + Default,
{
    match call.str_arg(key) {
        Some(text) => text.parse(),
        None => Ok(T::default()),
    }
}

pub(crate) fn bool_or(call: &ToolCall, key: &str, default: bool) -> Result<bool> {
    match call.value(key) {
        None => Ok(default),
        Some(_) => call
            .bool_arg(key)
            .ok_or_else(|| AdvisorError::invalid(format!("{} must be true or false", key))),
    }
}

/// `weight_kg` and `volume_cbm`, validated
pub(crate) fn cargo(call: &ToolCall) -> Result<Cargo> {
    Cargo::new(
        required_decimal(call, "weight_kg")?,
        required_decimal(call, "volume_cbm")?,
    )
}

/// Complete result for a computation that stopped on a domain error
pub(crate) fn error_result(tool: &str, err: &AdvisorError) -> ToolResult {
    tracing::debug!(tool = %tool, error = %err, "Tool request not fulfilled");
    ToolResult::with_status(tool, err.status(), err.to_string()).with_data(json!({
        "status": err.status(),
        "message": err.to_string(),
    }))
}

/// Serialize `payload` and stamp the status into the map
pub(crate) fn data_map<T: Serialize>(status: agent_core::ToolStatus, payload: &T) -> serde_json::Result<Value> {
    let mut value = serde_json::to_value(payload)?;
    if let Value::Object(map) = &mut value {
        map.insert("status".into(), json!(status));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContainerType;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal_from_numbers_and_strings() {
        let call = ToolCall::new("t")
            .arg("int", 500)
            .arg("float", 2.42)
            .arg("text", " 488.0 ")
            .arg("sci", "1e3")
            .arg("bad", "lots")
            .arg("bool", true);

        assert_eq!(decimal_arg(&call, "int").unwrap(), Some(dec!(500)));
        assert_eq!(decimal_arg(&call, "float").unwrap(), Some(dec!(2.42)));
        assert_eq!(decimal_arg(&call, "text").unwrap(), Some(dec!(488.0)));
        assert_eq!(decimal_arg(&call, "sci").unwrap(), Some(dec!(1000)));
        assert_eq!(decimal_arg(&call, "missing").unwrap(), None);
        assert!(decimal_arg(&call, "bad").is_err());
        assert!(decimal_arg(&call, "bool").is_err());
        assert!(required_decimal(&call, "missing").is_err());
    }

    #[test]
    fn test_enum_and_bool_defaults() {
        let call = ToolCall::new("t").arg("container_type", "40FT").arg("flag", "maybe");

        let container: ContainerType = parsed_or_default(&call, "container_type").unwrap();
        assert_eq!(container, ContainerType::Forty);
        let default: ContainerType = parsed_or_default(&call, "other").unwrap();
        assert_eq!(default, ContainerType::Lcl);

        assert!(bool_or(&call, "absent", true).unwrap());
        assert!(bool_or(&call, "flag", true).is_err());
    }

    #[test]
    fn test_error_result_carries_status() {
        let result = error_result("get_hs_code_info", &AdvisorError::UnknownHsCode("0101".into()));
        assert_eq!(result.status, agent_core::ToolStatus::NotFound);
        assert_eq!(result.data.unwrap()["status"], "not_found");
    }
}
