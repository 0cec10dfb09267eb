//! Strict validation of externally produced builds.
//!
//! A candidate is either the target object itself or the hosted-inference
//! envelope `[{"generated_text": "<json>"}]`. The generated text has to be a
//! complete JSON document; nothing is extracted from surrounding prose.

use crate::domain::model::{BuildItem, BuildResult, MAX_PRICE};
use crate::utils::error::{AdvisorError, Result};
use serde_json::{Map, Value};

pub fn parse_candidate_body(body: &str) -> Result<BuildResult> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| malformed(format!("response is not JSON: {}", e)))?;
    validate_candidate(&unwrap_envelope(value)?)
}

fn unwrap_envelope(value: Value) -> Result<Value> {
    match value {
        Value::Array(entries) => {
            let text = entries
                .first()
                .and_then(|entry| entry.get("generated_text"))
                .and_then(Value::as_str)
                .ok_or_else(|| malformed("envelope has no generated_text"))?;
            serde_json::from_str(text.trim())
                .map_err(|e| malformed(format!("generated_text is not a JSON document: {}", e)))
        }
        other => Ok(other),
    }
}

pub fn validate_candidate(value: &Value) -> Result<BuildResult> {
    let object = value
        .as_object()
        .ok_or_else(|| malformed("candidate is not an object"))?;

    let components = object
        .get("components")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("components must be an array"))?;
    if components.is_empty() {
        return Err(malformed("components array is empty"));
    }

    let items = components
        .iter()
        .enumerate()
        .map(|(index, entry)| validate_item(index, entry))
        .collect::<Result<Vec<_>>>()?;

    let performance = optional_string(object, "performance")?;
    let notes = optional_string(object, "notes")?;
    let build = BuildResult::try_from_items(items, performance, notes)
        .ok_or_else(|| malformed("component prices overflow the total"))?;

    match object.get("totalCost") {
        None | Some(Value::Null) => {}
        Some(Value::Number(declared)) => {
            if declared.as_f64() != Some(build.total_cost as f64) {
                tracing::warn!(
                    "Upstream totalCost {} disagrees with item sum {}, using item sum",
                    declared,
                    build.total_cost
                );
            }
        }
        Some(_) => return Err(malformed("totalCost must be a number")),
    }

    Ok(build)
}

fn validate_item(index: usize, entry: &Value) -> Result<BuildItem> {
    let object = entry
        .as_object()
        .ok_or_else(|| malformed(format!("components[{}] is not an object", index)))?;

    let slot_label = required_string(object, index, "type")?;
    let model = required_string(object, index, "model")?;
    let price = object
        .get("price")
        .and_then(Value::as_f64)
        .filter(|price| price.is_finite() && *price >= 0.0)
        .ok_or_else(|| {
            malformed(format!(
                "components[{}].price must be a non-negative number",
                index
            ))
        })?;
    if price.round() > MAX_PRICE as f64 {
        return Err(malformed(format!(
            "components[{}].price {} exceeds {}",
            index, price, MAX_PRICE
        )));
    }
    let reason = match object.get("reason") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(reason)) => reason.clone(),
        Some(_) => {
            return Err(malformed(format!(
                "components[{}].reason must be a string",
                index
            )))
        }
    };

    Ok(BuildItem::new(slot_label, model, price.round() as u64, reason))
}

fn required_string(object: &Map<String, Value>, index: usize, key: &str) -> Result<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            malformed(format!(
                "components[{}].{} must be a non-empty string",
                index, key
            ))
        })
}

fn optional_string(object: &Map<String, Value>, key: &str) -> Result<String> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(malformed(format!("{} must be a string", key))),
    }
}

fn malformed(message: impl Into<String>) -> AdvisorError {
    AdvisorError::UpstreamMalformed {
        message: message.into(),
    }
}
