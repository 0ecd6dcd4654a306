//! Custom serde helpers for upstream wire formats.
//!
//! The order book and the rate providers are not consistent about whether
//! numbers arrive as JSON numbers or strings, and occasionally send garbage.
//! These helpers accept both shapes and map anything unusable to `None`
//! instead of failing the whole response.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Interpret a JSON scalar as a `Decimal`. Non-numeric input yields `None`.
pub fn value_to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal_str(&n.to_string()),
        Value::String(s) => parse_decimal_str(s.trim()),
        _ => None,
    }
}

fn parse_decimal_str(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Interpret a JSON scalar as a string, keeping integers verbatim.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Deserializes a number-or-string field into `Option<Decimal>`.
pub mod lenient_decimal {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(value_to_decimal))
    }
}

/// Deserializes a number-or-string field into `Option<String>`.
///
/// Used for smallest-unit quantities, which must stay textual until they are
/// parsed as big integers.
pub mod lenient_string {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(value_to_string))
    }
}

/// Deserializes a number-or-string field into `Option<u32>`.
pub mod lenient_u32 {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
        price: Option<Decimal>,
        #[serde(default, deserialize_with = "lenient_string::deserialize")]
        quantity: Option<String>,
        #[serde(default, deserialize_with = "lenient_u32::deserialize")]
        decimals: Option<u32>,
    }

    #[test]
    fn test_value_to_decimal_shapes() {
        assert_eq!(
            value_to_decimal(&json!(4713.59)),
            Some(Decimal::from_str("4713.59").unwrap())
        );
        assert_eq!(
            value_to_decimal(&json!("5.42")),
            Some(Decimal::from_str("5.42").unwrap())
        );
        assert_eq!(
            value_to_decimal(&json!("1e2")),
            Some(Decimal::from(100))
        );
        assert_eq!(value_to_decimal(&json!("NaN")), None);
        assert_eq!(value_to_decimal(&json!("")), None);
        assert_eq!(value_to_decimal(&json!(null)), None);
        assert_eq!(value_to_decimal(&json!({"usd": 1})), None);
    }

    #[test]
    fn test_lenient_fields() {
        let p: Probe = serde_json::from_value(json!({
            "price": "12.5",
            "quantity": 70000000000000000u64,
            "decimals": "18"
        }))
        .unwrap();
        assert_eq!(p.price, Some(Decimal::from_str("12.5").unwrap()));
        assert_eq!(p.quantity.as_deref(), Some("70000000000000000"));
        assert_eq!(p.decimals, Some(18));
    }

    #[test]
    fn test_lenient_fields_absent_or_garbage() {
        let p: Probe = serde_json::from_value(json!({
            "price": "not a number",
            "decimals": -1
        }))
        .unwrap();
        assert_eq!(p.price, None);
        assert_eq!(p.quantity, None);
        assert_eq!(p.decimals, None);
    }
}
