//! Deal listing rules: filter fields, sort orders, and the legacy
//! `cash_delta` -> `support_cash` output transform.

use serde::Deserialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::payload::decode_document;

/// Legacy field that older parser versions emitted instead of `support_cash`.
const LEGACY_CASH_DELTA: &str = "cash_delta";

const SUPPORT_CASH: &str = "support_cash";

/// Sort order accepted by `GET /deals`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealSort {
    /// Newest `parsed_at` first.
    #[default]
    Latest,
    /// Cheapest `tco_total` first, deals without a TCO last, ties broken by
    /// newest `parsed_at`.
    TcoAsc,
}

/// Optional equality filters on top-level deal fields.
///
/// Empty strings are treated the same as an absent filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DealFilters {
    pub model: Option<String>,
    pub carrier: Option<String>,
    pub city: Option<String>,
    pub move_type: Option<String>,
    pub contract: Option<String>,
    pub payment: Option<String>,
    pub channel: Option<String>,
}

impl DealFilters {
    /// The active filters as `(json_field, value)` pairs, in a fixed order.
    pub fn active(&self) -> Vec<(&'static str, &str)> {
        [
            ("model", &self.model),
            ("carrier", &self.carrier),
            ("city", &self.city),
            ("move_type", &self.move_type),
            ("contract", &self.contract),
            ("payment", &self.payment),
            ("channel", &self.channel),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (field, v))
        })
        .collect()
    }
}

/// Decode a stored deal document and apply the back-compat transform.
///
/// - When `support_cash` is absent it is derived from `cash_delta`: the
///   absolute value (truncated to an integer) when `cash_delta` is a negative
///   number, `null` otherwise.
/// - `cash_delta` never appears in the output.
///
/// A document that is not a JSON object is rejected.
pub fn normalize_deal(raw: Value) -> Result<Value, CoreError> {
    let mut deal = match decode_document(raw)? {
        Value::Object(map) => map,
        other => {
            return Err(CoreError::MalformedPayload(format!(
                "deal document must be an object, got {}",
                json_kind(&other)
            )))
        }
    };

    if !deal.contains_key(SUPPORT_CASH) {
        let derived = support_cash_from_delta(deal.get(LEGACY_CASH_DELTA));
        deal.insert(SUPPORT_CASH.to_string(), derived);
    }
    deal.remove(LEGACY_CASH_DELTA);

    Ok(Value::Object(deal))
}

fn support_cash_from_delta(delta: Option<&Value>) -> Value {
    let Some(Value::Number(n)) = delta else {
        return Value::Null;
    };

    if let Some(i) = n.as_i64() {
        return if i < 0 {
            Value::from(i.unsigned_abs())
        } else {
            Value::Null
        };
    }

    match n.as_f64() {
        Some(f) if f < 0.0 => Value::from(f.abs().trunc() as i64),
        _ => Value::Null,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn negative_cash_delta_becomes_support_cash() {
        let out = normalize_deal(json!({"id": "d1", "cash_delta": -150000})).unwrap();
        assert_eq!(out["support_cash"], json!(150000));
        assert!(out.get("cash_delta").is_none());
    }

    #[test]
    fn fractional_cash_delta_is_truncated() {
        let out = normalize_deal(json!({"cash_delta": -1234.9})).unwrap();
        assert_eq!(out["support_cash"], json!(1234));
    }

    #[test]
    fn non_negative_cash_delta_yields_null() {
        for delta in [json!(0), json!(5000), json!(12.5)] {
            let out = normalize_deal(json!({ "cash_delta": delta })).unwrap();
            assert_eq!(out["support_cash"], Value::Null);
            assert!(out.get("cash_delta").is_none());
        }
    }

    #[test]
    fn non_numeric_cash_delta_yields_null() {
        let out = normalize_deal(json!({"cash_delta": "-100"})).unwrap();
        assert_eq!(out["support_cash"], Value::Null);
    }

    #[test]
    fn missing_cash_delta_yields_null() {
        let out = normalize_deal(json!({"id": "d1"})).unwrap();
        assert_eq!(out, json!({"id": "d1", "support_cash": null}));
    }

    #[test]
    fn existing_support_cash_is_kept_and_legacy_field_dropped() {
        let out = normalize_deal(json!({"support_cash": 70000, "cash_delta": -1})).unwrap();
        assert_eq!(out, json!({"support_cash": 70000}));
    }

    #[test]
    fn explicit_null_support_cash_is_kept() {
        let out = normalize_deal(json!({"support_cash": null, "cash_delta": -500})).unwrap();
        assert_eq!(out["support_cash"], Value::Null);
    }

    #[test]
    fn string_encoded_deal_is_decoded() {
        let out = normalize_deal(Value::String(r#"{"cash_delta":-10}"#.into())).unwrap();
        assert_eq!(out, json!({"support_cash": 10}));
    }

    #[test]
    fn non_object_deal_is_rejected() {
        assert_matches!(
            normalize_deal(json!([1, 2, 3])),
            Err(CoreError::MalformedPayload(msg)) if msg.contains("array")
        );
    }

    #[test]
    fn active_filters_skip_empty_values() {
        let filters = DealFilters {
            model: Some("Galaxy S24".into()),
            carrier: Some(String::new()),
            city: Some("Seoul".into()),
            ..Default::default()
        };
        assert_eq!(
            filters.active(),
            vec![("model", "Galaxy S24"), ("city", "Seoul")]
        );
    }

    #[test]
    fn sort_parses_snake_case() {
        let sort: DealSort = serde_json::from_value(json!("tco_asc")).unwrap();
        assert_eq!(sort, DealSort::TcoAsc);
        assert_eq!(DealSort::default(), DealSort::Latest);
    }
}
