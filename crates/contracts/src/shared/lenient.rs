//! Lenient deserializers for backend payloads.
//!
//! Decimal columns arrive as strings, counters as numbers and optional
//! relations as `null`. Everything numeric that the UI only displays or sums
//! goes through these helpers so a malformed value reads as zero instead of
//! failing the whole response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce an arbitrary JSON value into a finite number.
///
/// Numbers pass through, numeric strings are parsed, everything else is `0.0`.
pub fn number_from_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_number(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Parse a decimal string the way the cost fields are stored ("12.50", " 3 ").
pub fn parse_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `#[serde(deserialize_with)]` helper: number, numeric string, null or garbage → `f64`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(number_from_value).unwrap_or(0.0))
}

/// Identifier helper: integer, numeric string, null, absent or garbage → `i64`
/// (0 when it cannot be read).
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| parse_number(&s).map(|v| v as i64))
            .unwrap_or(0),
        _ => 0,
    })
}

/// Like [`lenient_f64`] but keeps "absent" distinguishable from zero.
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        Some(Value::String(s)) => parse_number(&s),
        _ => None,
    })
}

/// Numbers and strings both read as text; `null` is empty. Used for decimal
/// columns the forms edit as strings.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// `null` reads as the type's default (empty string, empty list, `false`).
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a list, a single object or `null` and always yields a list.
/// Entries that do not decode are skipped so one bad record does not fail
/// the whole response.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(item) => vec![item],
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_f64")]
        amount: f64,
        #[serde(default, deserialize_with = "lenient_opt_f64")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "one_or_many")]
        items: Vec<u32>,
        #[serde(default, deserialize_with = "null_as_default")]
        label: String,
        #[serde(default, deserialize_with = "lenient_i64")]
        id: i64,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_lenient_numbers() {
        assert_eq!(probe(r#"{"amount": 12.5}"#).amount, 12.5);
        assert_eq!(probe(r#"{"amount": "12.50"}"#).amount, 12.5);
        assert_eq!(probe(r#"{"amount": null}"#).amount, 0.0);
        assert_eq!(probe(r#"{"amount": "abc"}"#).amount, 0.0);
        assert_eq!(probe(r#"{}"#).amount, 0.0);
    }

    #[test]
    fn test_optional_number_keeps_absence() {
        assert_eq!(probe(r#"{"price": "7"}"#).price, Some(7.0));
        assert_eq!(probe(r#"{"price": null}"#).price, None);
        assert_eq!(probe(r#"{"price": ""}"#).price, None);
        assert_eq!(probe(r#"{}"#).price, None);
    }

    #[test]
    fn test_one_or_many() {
        assert_eq!(probe(r#"{"items": [1, 2]}"#).items, vec![1, 2]);
        assert_eq!(probe(r#"{"items": 3}"#).items, vec![3]);
        assert!(probe(r#"{"items": null}"#).items.is_empty());
        assert!(probe(r#"{}"#).items.is_empty());
    }

    #[test]
    fn test_one_or_many_skips_bad_entries() {
        assert_eq!(probe(r#"{"items": [1, "x", 2]}"#).items, vec![1, 2]);
        assert!(probe(r#"{"items": "x"}"#).items.is_empty());
    }

    #[test]
    fn test_lenient_ids() {
        assert_eq!(probe(r#"{"id": 42}"#).id, 42);
        assert_eq!(probe(r#"{"id": "42"}"#).id, 42);
        assert_eq!(probe(r#"{"id": 7.0}"#).id, 7);
        assert_eq!(probe(r#"{"id": null}"#).id, 0);
        assert_eq!(probe(r#"{"id": {}}"#).id, 0);
        assert_eq!(probe(r#"{}"#).id, 0);
    }

    #[test]
    fn test_null_string_is_empty() {
        assert_eq!(probe(r#"{"label": null}"#).label, "");
        assert_eq!(probe(r#"{"label": "x"}"#).label, "x");
    }
}
