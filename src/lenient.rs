//! Forgiving field deserializers.
//!
//! History files and ranking payloads come from older builds and other peers,
//! so a missing or mistyped field falls back to its zero value instead of
//! failing the whole document.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Non-negative integer. Integral floats such as `85.0` are accepted.
pub fn uint<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        }),
        _ => None,
    };

    Ok(value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0))
}

/// Like [`uint`], but a finite non-negative fraction such as `85.7` is
/// rounded instead of dropped. Used for live payloads, not for stored files.
pub fn uint_rounded<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.round() as u64)
        }),
        _ => None,
    };

    Ok(value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0))
}

pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        _ => 0.0,
    })
}

pub fn boolean<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// A list of records. A non-array value reads as empty and an element that
/// does not parse reads as `T::default()`.
pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "super::string")]
        name: String,
        #[serde(default, deserialize_with = "super::uint")]
        count: u32,
        #[serde(default, deserialize_with = "super::float")]
        ratio: f64,
        #[serde(default, deserialize_with = "super::boolean")]
        flag: bool,
    }

    #[derive(Debug, Default, Deserialize)]
    struct Live {
        #[serde(default, deserialize_with = "super::uint_rounded")]
        count: u32,
    }

    #[derive(Debug, Default, Deserialize)]
    struct Wrapper {
        #[serde(default, deserialize_with = "super::records")]
        items: Vec<Sample>,
    }

    #[test]
    fn test_missing_fields_default() {
        let sample: Sample = serde_json::from_value(json!({})).unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_mistyped_fields_default() {
        let sample: Sample = serde_json::from_value(json!({
            "name": 12,
            "count": "many",
            "ratio": null,
            "flag": "yes"
        }))
        .unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_uint_edge_values() {
        let integral: Sample = serde_json::from_value(json!({ "count": 85.0 })).unwrap();
        assert_eq!(integral.count, 85);

        let fractional: Sample = serde_json::from_value(json!({ "count": 85.5 })).unwrap();
        assert_eq!(fractional.count, 0);

        let negative: Sample = serde_json::from_value(json!({ "count": -3 })).unwrap();
        assert_eq!(negative.count, 0);

        let too_big: Sample = serde_json::from_value(json!({ "count": 5_000_000_000u64 })).unwrap();
        assert_eq!(too_big.count, 0);
    }

    #[test]
    fn test_uint_rounded_keeps_fractions() {
        let down: Live = serde_json::from_value(json!({ "count": 85.4 })).unwrap();
        assert_eq!(down.count, 85);

        let up: Live = serde_json::from_value(json!({ "count": 85.7 })).unwrap();
        assert_eq!(up.count, 86);

        let exact: Live = serde_json::from_value(json!({ "count": 90 })).unwrap();
        assert_eq!(exact.count, 90);

        let negative: Live = serde_json::from_value(json!({ "count": -2.5 })).unwrap();
        assert_eq!(negative.count, 0);

        let text: Live = serde_json::from_value(json!({ "count": "fast" })).unwrap();
        assert_eq!(text.count, 0);
    }

    #[test]
    fn test_records_non_array_is_empty() {
        let wrapper: Wrapper = serde_json::from_value(json!({ "items": "nope" })).unwrap();
        assert!(wrapper.items.is_empty());
    }

    #[test]
    fn test_records_bad_element_defaults() {
        let wrapper: Wrapper = serde_json::from_value(json!({
            "items": [{ "name": "a", "count": 2 }, 7, { "flag": true }]
        }))
        .unwrap();

        assert_eq!(wrapper.items.len(), 3);
        assert_eq!(wrapper.items[0].name, "a");
        assert_eq!(wrapper.items[0].count, 2);
        assert_eq!(wrapper.items[1], Sample::default());
        assert!(wrapper.items[2].flag);
    }
}
